// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The table view controller: lifecycle, scroll phases, and navigation.

use alloc::vec::Vec;

use kurbo::Size;
use tableview_window::{
    ContentGeometry, ScrollAxis, ScrollEdge, Window, WindowError, compute_window, navigator,
};

use crate::{
    CellSlot, CellTemplate, ConfigurationError, ReconcileReport, Reconciler, ScrollAnimation,
    ScrollHost, TableCell, TableViewError, TemplateFlags,
};

/// Whether the host is currently scrolling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollPhase {
    /// No scroll activity; ticks do nothing unless a refresh is pending.
    #[default]
    Idle,
    /// Between scroll-begin and scroll-end; every tick reconciles.
    Scrolling,
}

/// A virtualized list that recycles a small pool of cells over a data set.
///
/// The table view owns the data set, the visible cell slots, and the pool of
/// detached slots. It drives a [`ScrollHost`] by composition: the host reports
/// offsets and scroll boundaries, and the table view tells it how large the
/// content is and where to scroll.
///
/// Per frame, call [`TableView::tick`]. While the host is scrolling (between
/// [`TableView::on_scroll_began`] and [`TableView::on_scroll_ended`]) every
/// tick recomputes the visible window from the host offset and reconciles the
/// slots against it. Programmatic jumps schedule exactly one extra pass.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Size, Vec2};
/// use tableview::{
///     BindContext, CellTemplate, ScrollAnimation, ScrollAxis, ScrollEdge, ScrollHost, TableCell,
///     TableView,
/// };
///
/// struct Label(String);
///
/// impl TableCell<u32> for Label {
///     fn init(&mut self, index: usize, data: &u32, _owner: &BindContext) {
///         self.0 = format!("#{index}: {data}");
///     }
/// }
///
/// struct LabelTemplate;
///
/// impl CellTemplate for LabelTemplate {
///     type Cell = Label;
///     fn size(&self) -> Size {
///         Size::new(300.0, 50.0)
///     }
///     fn instantiate(&mut self) -> Label {
///         Label(String::new())
///     }
/// }
///
/// struct FixedHost(Vec2);
///
/// impl ScrollHost for FixedHost {
///     fn scroll_offset(&self) -> Vec2 {
///         self.0
///     }
///     fn viewport_size(&self) -> Size {
///         Size::new(300.0, 220.0)
///     }
///     fn scroll_to_percent_horizontal(&mut self, _: f64, _: ScrollAnimation) {}
///     fn scroll_to_percent_vertical(&mut self, _: f64, _: ScrollAnimation) {}
///     fn scroll_to_edge(&mut self, _: ScrollEdge, _: ScrollAnimation) {}
///     fn stop_auto_scroll(&mut self) {}
/// }
///
/// let mut table = TableView::new(ScrollAxis::Vertical)
///     .with_host(FixedHost(Vec2::ZERO))
///     .with_template(LabelTemplate);
/// table.init((0..30_u32).collect()).unwrap();
///
/// // ceil(220 / 50) + 1 cells cover the viewport.
/// assert_eq!(table.slots().len(), 6);
/// assert_eq!(table.get_cell_by_index(3).unwrap().0, "#3: 3");
///
/// // The host scrolls 130 pixels down.
/// table.on_scroll_began();
/// table.host_mut().unwrap().0 = Vec2::new(0.0, 130.0);
/// table.tick();
/// table.on_scroll_ended();
/// assert_eq!(table.window().start, 2);
/// assert!(table.get_cell_by_index(0).is_none());
/// ```
pub struct TableView<T, H, P>
where
    P: CellTemplate,
{
    axis: ScrollAxis,
    host: Option<H>,
    template: Option<P>,
    data: Option<Vec<T>>,
    cell_size: Option<f64>,
    geometry: ContentGeometry,
    window: Window,
    reconciler: Reconciler<P::Cell>,
    phase: ScrollPhase,
    pending_refresh: bool,
}

impl<T, H, P> core::fmt::Debug for TableView<T, H, P>
where
    P: CellTemplate,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TableView")
            .field("axis", &self.axis)
            .field("has_host", &self.host.is_some())
            .field("has_template", &self.template.is_some())
            .field("len", &self.data.as_ref().map_or(0, Vec::len))
            .field("cell_size", &self.cell_size)
            .field("geometry", &self.geometry)
            .field("window", &self.window)
            .field("slots", &self.reconciler.slots().len())
            .field("pooled", &self.reconciler.pool().len())
            .field("phase", &self.phase)
            .field("pending_refresh", &self.pending_refresh)
            .finish_non_exhaustive()
    }
}

impl<T, H, P> TableView<T, H, P>
where
    H: ScrollHost,
    P: CellTemplate,
    P::Cell: TableCell<T>,
{
    /// Creates an uninitialized table view scrolling along `axis`.
    #[must_use]
    pub fn new(axis: ScrollAxis) -> Self {
        Self {
            axis,
            host: None,
            template: None,
            data: None,
            cell_size: None,
            geometry: ContentGeometry::empty(axis, Size::ZERO),
            window: Window::EMPTY,
            reconciler: Reconciler::new(),
            phase: ScrollPhase::Idle,
            pending_refresh: false,
        }
    }

    /// Attaches the scroll host that owns the content container.
    #[must_use]
    pub fn with_host(mut self, host: H) -> Self {
        self.host = Some(host);
        self
    }

    /// Attaches the template new cells are created from.
    #[must_use]
    pub fn with_template(mut self, template: P) -> Self {
        self.template = Some(template);
        self
    }

    /// Replaces the scroll host, returning the previous one.
    pub fn set_host(&mut self, host: H) -> Option<H> {
        self.host.replace(host)
    }

    /// Replaces the cell template, returning the previous one.
    ///
    /// Takes effect at the next `init` after a `clear`; cells already created
    /// keep being recycled.
    pub fn set_template(&mut self, template: P) -> Option<P> {
        self.template.replace(template)
    }

    /// The scroll host, if attached.
    #[must_use]
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// Mutable access to the scroll host, if attached.
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    /// The cell template, if attached.
    #[must_use]
    pub fn template(&self) -> Option<&P> {
        self.template.as_ref()
    }

    /// Current scroll axis.
    #[must_use]
    pub const fn axis(&self) -> ScrollAxis {
        self.axis
    }

    /// Switches the scroll axis.
    ///
    /// An initialized table re-derives its cell size from the template and
    /// lays out again as [`TableView::refresh`] would. On error the axis is
    /// left unchanged.
    pub fn set_axis(&mut self, axis: ScrollAxis) -> Result<(), TableViewError> {
        if axis == self.axis {
            return Ok(());
        }
        let previous = self.axis;
        self.axis = axis;
        if self.data.is_none() {
            self.geometry = ContentGeometry::empty(axis, self.viewport_size());
            return Ok(());
        }
        match self.validate() {
            Ok(cell_size) => {
                self.cell_size = Some(cell_size);
                log::debug!("table view axis switched to {axis:?}");
                self.relayout(true)
            }
            Err(err) => {
                self.axis = previous;
                Err(err.into())
            }
        }
    }

    /// Sets up the table with `data`.
    ///
    /// The first call validates the collaborators, lays out the content at
    /// its rest position, and binds the initial window. Later calls behave
    /// like [`TableView::refresh`]. A configuration error leaves the table
    /// untouched.
    pub fn init(&mut self, data: Vec<T>) -> Result<(), TableViewError> {
        if self.data.is_some() {
            return self.refresh(data);
        }
        let cell_size = self.validate()?;
        self.cell_size = Some(cell_size);
        self.data = Some(data);
        log::debug!(
            "table view initialized: {} items of {cell_size} along {:?}",
            self.len(),
            self.axis
        );
        self.relayout(true)
    }

    /// Replaces the data set and rebinds every visible cell.
    ///
    /// Any animated scroll is halted first so that the content does not keep
    /// moving under the new layout. The current scroll position is kept.
    /// Calling this before [`TableView::init`] initializes the table.
    pub fn refresh(&mut self, data: Vec<T>) -> Result<(), TableViewError> {
        if self.data.is_none() {
            return self.init(data);
        }
        self.data = Some(data);
        if let Some(host) = self.host.as_mut() {
            host.stop_auto_scroll();
        }
        log::debug!("table view refreshed: {} items", self.len());
        self.relayout(false)
    }

    /// Empties the table and returns every cell to the pool.
    ///
    /// The content shrinks to zero length and moves back to its rest
    /// position. A later [`TableView::init`] starts from scratch.
    pub fn clear(&mut self) {
        self.data = None;
        self.geometry = ContentGeometry::layout(
            self.axis,
            self.cell_size.unwrap_or(0.0),
            0,
            self.viewport_size(),
        );
        self.window = Window::EMPTY;
        if let Some(host) = self.host.as_mut() {
            host.set_content_size(self.geometry.content_size);
            host.set_content_position(self.geometry.rest_position);
        }
        if let Err(err) = self.update_cells(true) {
            log::error!("clearing table view: {err}");
        }
        log::debug!(
            "table view cleared; {} cells pooled",
            self.reconciler.pool().len()
        );
    }

    /// The data set; empty before [`TableView::init`] and after [`TableView::clear`].
    #[must_use]
    pub fn data(&self) -> &[T] {
        self.data.as_deref().unwrap_or_default()
    }

    /// Number of items in the data set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns `true` if the data set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` once [`TableView::init`] has succeeded and until [`TableView::clear`].
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.data.is_some()
    }

    /// Replaces the item at `index` in place.
    ///
    /// If that index is visible its cell is asked to [`TableCell::reload`]
    /// rather than being rebound. Returns the replaced item, or `None` when
    /// `index` is out of range (the new item is dropped).
    pub fn update_item(&mut self, index: usize, item: T) -> Option<T> {
        let entry = self.data.as_mut()?.get_mut(index)?;
        let previous = core::mem::replace(entry, item);
        self.reconciler.reload(index, &*entry);
        Some(previous)
    }

    /// The cell currently showing `index`, if it is visible.
    #[must_use]
    pub fn get_cell_by_index(&self, index: usize) -> Option<&P::Cell> {
        self.reconciler.slot_for_index(index).map(CellSlot::cell)
    }

    /// Mutable access to the cell currently showing `index`, if it is visible.
    pub fn get_cell_by_index_mut(&mut self, index: usize) -> Option<&mut P::Cell> {
        self.reconciler
            .slot_for_index_mut(index)
            .map(CellSlot::cell_mut)
    }

    /// Visible slots in draw order, for the rendering layer.
    #[must_use]
    pub fn slots(&self) -> &[CellSlot<P::Cell>] {
        self.reconciler.slots()
    }

    /// Instantiates cells up front until at least `count` detached cells wait
    /// in the pool, so the first passes after `init` do not create any.
    pub fn reserve_cells(&mut self, count: usize) -> Result<(), ConfigurationError> {
        let Some(template) = self.template.as_mut() else {
            log::error!("cannot reserve cells without a cell template");
            return Err(ConfigurationError::MissingTemplate);
        };
        self.reconciler.reserve(template, count);
        log::debug!("reserved {count} pooled cells");
        Ok(())
    }

    /// Number of detached cells waiting in the pool.
    #[must_use]
    pub fn pool_len(&self) -> usize {
        self.reconciler.pool().len()
    }

    /// Window bound by the last reconcile pass.
    #[must_use]
    pub const fn window(&self) -> Window {
        self.window
    }

    /// Current content geometry.
    #[must_use]
    pub const fn geometry(&self) -> &ContentGeometry {
        &self.geometry
    }

    /// One viewport length as a fraction of the scroll range.
    #[must_use]
    pub const fn page_percent(&self) -> f64 {
        self.geometry.page_percent
    }

    /// Current scroll phase.
    #[must_use]
    pub const fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Returns `true` if the next tick runs a one-off refresh pass.
    #[must_use]
    pub const fn has_pending_refresh(&self) -> bool {
        self.pending_refresh
    }

    /// Host notification: the content started moving.
    pub fn on_scroll_began(&mut self) {
        if self.phase != ScrollPhase::Scrolling {
            log::trace!("table view scroll began");
        }
        self.phase = ScrollPhase::Scrolling;
    }

    /// Host notification: the content stopped moving.
    pub fn on_scroll_ended(&mut self) {
        if self.phase != ScrollPhase::Idle {
            log::trace!("table view scroll ended");
        }
        self.phase = ScrollPhase::Idle;
    }

    /// Per-frame update.
    ///
    /// Reconciles while scrolling, or once when a refresh is pending; the
    /// pending pass rebinds every visible cell. Returns what the pass did, or
    /// `None` if no pass ran.
    pub fn tick(&mut self) -> Option<ReconcileReport> {
        let force = self.pending_refresh;
        if self.phase != ScrollPhase::Scrolling && !force {
            return None;
        }
        match self.update_cells(force) {
            Ok(report) => report,
            Err(err) => {
                log::error!("table view tick: {err}");
                None
            }
        }
    }

    /// Scrolls so that `index` sits as close to the middle of the viewport as
    /// the content allows. Does nothing for an empty table.
    pub fn scroll_to_target_index(&mut self, index: usize, animation: ScrollAnimation) {
        if self.is_empty() {
            return;
        }
        let Some(percent) = navigator::target_index_percent(&self.geometry, index) else {
            return;
        };
        log::debug!("scroll to index {index}: percent = {percent}");
        self.scroll_to_percent(percent, animation);
    }

    /// Scrolls one page forward in the host's percent space.
    ///
    /// Does nothing when the table is empty or its content fits the viewport.
    pub fn scroll_to_next_page(&mut self, animation: ScrollAnimation) {
        if let Some(current) = self.pageable_percent() {
            let percent = navigator::next_page_percent(current, self.geometry.page_percent);
            log::debug!("scroll to next page: percent = {percent}");
            self.scroll_to_percent(percent, animation);
        }
    }

    /// Scrolls one page back in the host's percent space.
    ///
    /// Does nothing when the table is empty or its content fits the viewport.
    pub fn scroll_to_last_page(&mut self, animation: ScrollAnimation) {
        if let Some(current) = self.pageable_percent() {
            let percent = navigator::previous_page_percent(current, self.geometry.page_percent);
            log::debug!("scroll to last page: percent = {percent}");
            self.scroll_to_percent(percent, animation);
        }
    }

    /// Scrolls to `percent` of the range along the table's axis.
    pub fn scroll_to_percent(&mut self, percent: f64, animation: ScrollAnimation) {
        let percent = percent.clamp(0.0, 1.0);
        let axis = self.axis;
        if let Some(host) = self.begin_programmatic_scroll(animation) {
            match axis {
                ScrollAxis::Horizontal => host.scroll_to_percent_horizontal(percent, animation),
                ScrollAxis::Vertical => host.scroll_to_percent_vertical(percent, animation),
            }
        }
    }

    /// Scrolls to the left edge.
    pub fn scroll_to_left(&mut self, animation: ScrollAnimation) {
        self.scroll_to_edge(ScrollEdge::Left, animation);
    }

    /// Scrolls to the right edge.
    pub fn scroll_to_right(&mut self, animation: ScrollAnimation) {
        self.scroll_to_edge(ScrollEdge::Right, animation);
    }

    /// Scrolls to the top edge.
    pub fn scroll_to_top(&mut self, animation: ScrollAnimation) {
        self.scroll_to_edge(ScrollEdge::Top, animation);
    }

    /// Scrolls to the bottom edge.
    pub fn scroll_to_bottom(&mut self, animation: ScrollAnimation) {
        self.scroll_to_edge(ScrollEdge::Bottom, animation);
    }

    /// Scrolls to `edge`.
    pub fn scroll_to_edge(&mut self, edge: ScrollEdge, animation: ScrollAnimation) {
        if let Some(host) = self.begin_programmatic_scroll(animation) {
            host.scroll_to_edge(edge, animation);
        }
    }

    /// Halts the current animation and records how the table catches up with
    /// the new position: every tick for an animated scroll, once otherwise.
    fn begin_programmatic_scroll(&mut self, animation: ScrollAnimation) -> Option<&mut H> {
        let host = self.host.as_mut()?;
        host.stop_auto_scroll();
        if animation.is_animated() {
            self.phase = ScrollPhase::Scrolling;
        } else {
            self.pending_refresh = true;
        }
        Some(host)
    }

    fn pageable_percent(&self) -> Option<f64> {
        if self.is_empty() || self.geometry.fits_viewport() {
            return None;
        }
        let offset = self.host.as_ref()?.scroll_offset();
        navigator::current_percent(&self.geometry, offset)
    }

    fn viewport_size(&self) -> Size {
        self.host
            .as_ref()
            .map_or(self.geometry.viewport, H::viewport_size)
    }

    /// Checks the collaborators and derives the cell size along the axis.
    fn validate(&self) -> Result<f64, ConfigurationError> {
        let result = self.check_collaborators();
        if let Err(err) = &result {
            log::error!("table view initialization aborted: {err}");
        }
        result
    }

    fn check_collaborators(&self) -> Result<f64, ConfigurationError> {
        if self.host.is_none() {
            return Err(ConfigurationError::MissingContainer);
        }
        let template = self
            .template
            .as_ref()
            .ok_or(ConfigurationError::MissingTemplate)?;
        let flags = template.flags();
        if !flags.contains(TemplateFlags::BINDABLE) {
            return Err(ConfigurationError::TemplateNotBindable);
        }
        if flags.contains(TemplateFlags::STRETCH_LAYOUT) {
            log::warn!(
                "stretching cell template: drawn cells may not match the {:?} cell size",
                self.axis
            );
        }
        let cell_size = self.axis.length_of(template.size());
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(ConfigurationError::InvalidCellSize { cell_size });
        }
        Ok(cell_size)
    }

    /// Lays out the content for the current data and rebinds every visible cell.
    fn relayout(&mut self, reset_position: bool) -> Result<(), TableViewError> {
        let cell_size = self.cell_size.unwrap_or(0.0);
        self.geometry =
            ContentGeometry::layout(self.axis, cell_size, self.len(), self.viewport_size());
        if let Some(host) = self.host.as_mut() {
            host.set_content_size(self.geometry.content_size);
            if reset_position {
                host.set_content_position(self.geometry.rest_position);
            }
        }
        self.update_cells(true)?;
        Ok(())
    }

    /// Recomputes the window from the host offset and reconciles the slots.
    fn update_cells(&mut self, force: bool) -> Result<Option<ReconcileReport>, WindowError> {
        self.pending_refresh = false;
        let Some(template) = self.template.as_mut() else {
            return Ok(None);
        };
        let data = self.data.as_deref().unwrap_or_default();
        let offset = self
            .host
            .as_ref()
            .map_or(0.0, |host| self.axis.leading_offset(host.scroll_offset()));
        let window = compute_window(
            offset,
            self.geometry.cell_size,
            data.len(),
            self.geometry.viewport_length(),
        )?;
        self.window = window;

        let report = self
            .reconciler
            .reconcile(template, data, window, &self.geometry, force);
        if !report.fast_path {
            log::trace!("reconciled window {window:?}: {report:?}");
        }
        Ok(Some(report))
    }
}
