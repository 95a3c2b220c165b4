// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces for the table view demos: a simulated scroll view and a
//! label cell.

use kurbo::{Point, Size, Vec2};
use tableview::{
    BindContext, CellTemplate, ReconcileReport, ScrollAnimation, ScrollHost, TableCell, TableView,
};
use tableview_window::{ScrollAxis, ScrollEdge, navigator};

/// Boundary events the simulated scroll view reports to its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEvent {
    /// Content started moving.
    Began,
    /// Content stopped moving.
    Ended,
}

#[derive(Debug, Clone, Copy)]
struct Glide {
    from: f64,
    to: f64,
    elapsed: f64,
    duration: f64,
    decelerate: bool,
}

impl Glide {
    fn position(&self) -> f64 {
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        let eased = if self.decelerate {
            1.0 - (1.0 - t).powi(3)
        } else {
            t
        };
        self.from + (self.to - self.from) * eased
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// A scroll view without physics or input: it jumps or glides to requested
/// positions and queues begin/end events for [`step`] to deliver.
#[derive(Debug)]
pub struct SimulatedScroller {
    axis: ScrollAxis,
    viewport: Size,
    content: Size,
    travelled: f64,
    glide: Option<Glide>,
    release_pending: bool,
    events: Vec<ScrollEvent>,
}

impl SimulatedScroller {
    /// Creates a scroller along `axis` with the given viewport.
    pub fn new(axis: ScrollAxis, viewport: Size) -> Self {
        Self {
            axis,
            viewport,
            content: Size::ZERO,
            travelled: 0.0,
            glide: None,
            release_pending: false,
            events: Vec::new(),
        }
    }

    /// Distance scrolled from the leading edge.
    pub fn travelled(&self) -> f64 {
        self.travelled
    }

    /// Returns `true` while a glide is in flight.
    pub fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }

    /// Simulates the user dragging the content by `delta` along the axis.
    pub fn drag_by(&mut self, delta: f64) {
        self.halt();
        self.events.push(ScrollEvent::Began);
        self.travelled = (self.travelled + delta).clamp(0.0, self.range());
        self.release_pending = true;
    }

    /// Advances any glide by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        if self.release_pending {
            self.release_pending = false;
            self.events.push(ScrollEvent::Ended);
        }
        if let Some(glide) = self.glide.as_mut() {
            glide.elapsed += dt;
            self.travelled = glide.position();
            if glide.is_done() {
                self.glide = None;
                self.events.push(ScrollEvent::Ended);
            }
        }
    }

    /// Drains the queued boundary events.
    pub fn take_events(&mut self) -> Vec<ScrollEvent> {
        core::mem::take(&mut self.events)
    }

    fn range(&self) -> f64 {
        (self.axis.length_of(self.content) - self.axis.length_of(self.viewport)).max(0.0)
    }

    fn halt(&mut self) {
        if self.glide.take().is_some() {
            self.events.push(ScrollEvent::Ended);
        }
    }

    fn move_to(&mut self, target: f64, animation: ScrollAnimation) {
        let target = target.clamp(0.0, self.range());
        match animation.duration {
            Some(duration) if animation.is_animated() => {
                self.events.push(ScrollEvent::Began);
                self.glide = Some(Glide {
                    from: self.travelled,
                    to: target,
                    elapsed: 0.0,
                    duration,
                    decelerate: animation.decelerate,
                });
            }
            _ => self.travelled = target,
        }
    }

    fn move_to_percent(&mut self, axis: ScrollAxis, percent: f64, animation: ScrollAnimation) {
        if axis != self.axis {
            log::warn!("{axis:?} scroll requested on a {:?} scroller", self.axis);
            return;
        }
        let target = navigator::leading_offset_for_percent(axis, self.range(), percent);
        self.move_to(target, animation);
    }
}

impl ScrollHost for SimulatedScroller {
    fn scroll_offset(&self) -> Vec2 {
        match self.axis {
            ScrollAxis::Horizontal => Vec2::new(-self.travelled, 0.0),
            ScrollAxis::Vertical => Vec2::new(0.0, self.travelled),
        }
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn scroll_to_percent_horizontal(&mut self, percent: f64, animation: ScrollAnimation) {
        self.move_to_percent(ScrollAxis::Horizontal, percent, animation);
    }

    fn scroll_to_percent_vertical(&mut self, percent: f64, animation: ScrollAnimation) {
        self.move_to_percent(ScrollAxis::Vertical, percent, animation);
    }

    fn scroll_to_edge(&mut self, edge: ScrollEdge, animation: ScrollAnimation) {
        if edge.axis() != self.axis {
            log::warn!("{edge:?} edge requested on a {:?} scroller", self.axis);
            return;
        }
        let target = if edge == self.axis.leading_edge() {
            0.0
        } else {
            self.range()
        };
        self.move_to(target, animation);
    }

    fn stop_auto_scroll(&mut self) {
        self.halt();
    }

    fn set_content_size(&mut self, size: Size) {
        self.content = size;
        self.travelled = self.travelled.clamp(0.0, self.range());
    }

    fn set_content_position(&mut self, _position: Point) {
        self.travelled = 0.0;
    }
}

/// Runs one frame: delivers queued events, advances the scroller, ticks the
/// table, then delivers the events the frame produced.
pub fn step<T, P>(
    table: &mut TableView<T, SimulatedScroller, P>,
    dt: f64,
) -> Option<ReconcileReport>
where
    P: CellTemplate,
    P::Cell: TableCell<T>,
{
    let queued = table.host_mut().map(SimulatedScroller::take_events);
    deliver(table, queued.unwrap_or_default());

    if let Some(host) = table.host_mut() {
        host.advance(dt);
    }
    let report = table.tick();

    let produced = table.host_mut().map(SimulatedScroller::take_events);
    deliver(table, produced.unwrap_or_default());
    report
}

fn deliver<T, P>(table: &mut TableView<T, SimulatedScroller, P>, events: Vec<ScrollEvent>)
where
    P: CellTemplate,
    P::Cell: TableCell<T>,
{
    for event in events {
        match event {
            ScrollEvent::Began => table.on_scroll_began(),
            ScrollEvent::Ended => table.on_scroll_ended(),
        }
    }
}

/// A cell that renders its item as text.
#[derive(Debug, Default)]
pub struct LabelCell {
    /// Rendered text; empty while unbound.
    pub text: String,
}

impl<T: core::fmt::Display> TableCell<T> for LabelCell {
    fn init(&mut self, _index: usize, data: &T, _owner: &BindContext) {
        self.text = data.to_string();
    }

    fn un_init(&mut self) {
        self.text.clear();
    }

    fn reload(&mut self, data: &T) {
        self.text = data.to_string();
    }
}

/// Template producing [`LabelCell`]s of a fixed size.
#[derive(Debug, Clone, Copy)]
pub struct LabelTemplate {
    /// Design size of each cell.
    pub size: Size,
}

impl CellTemplate for LabelTemplate {
    type Cell = LabelCell;

    fn size(&self) -> Size {
        self.size
    }

    fn instantiate(&mut self) -> LabelCell {
        LabelCell::default()
    }
}
