// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell-facing interfaces: content binding and cell templates.

use kurbo::Size;
use tableview_window::{ScrollAxis, Window};

/// Content binder implemented by recyclable cells.
///
/// A cell is bound to one data item at a time. Calls are paired: once a cell
/// has been bound with [`TableCell::init`], [`TableCell::un_init`] runs before
/// it is bound again or returned to the pool, so resources acquired in `init`
/// can be released there.
pub trait TableCell<T> {
    /// Binds the cell to the item at `index`.
    ///
    /// Only called when the cell's index actually changes or a full rebind is
    /// forced, so implementations can treat every call as "redraw".
    fn init(&mut self, index: usize, data: &T, owner: &BindContext);

    /// Releases whatever the last [`TableCell::init`] acquired.
    fn un_init(&mut self) {}

    /// Refreshes the content in place for an item whose value changed but
    /// whose index did not.
    fn reload(&mut self, data: &T) {
        let _ = data;
    }
}

/// Read-only view of the owning table handed to [`TableCell::init`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BindContext {
    /// Scroll axis of the table.
    pub axis: ScrollAxis,
    /// Extent of every cell along the axis.
    pub cell_size: f64,
    /// Number of items in the data set.
    pub total_count: usize,
    /// Window being bound.
    pub window: Window,
}

bitflags::bitflags! {
    /// Capabilities a cell template declares about the cells it produces.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TemplateFlags: u8 {
        /// Cells carry a content binder and can be bound to data.
        const BINDABLE       = 0b0000_0001;
        /// Cells carry a component that sizes them from their parent, which
        /// fights the table's own placement.
        const STRETCH_LAYOUT = 0b0000_0010;
    }
}

impl Default for TemplateFlags {
    fn default() -> Self {
        Self::BINDABLE
    }
}

/// Factory for new cells, consulted when the pool runs dry.
pub trait CellTemplate {
    /// Cell type produced by this template.
    type Cell;

    /// Design size of a cell. Its extent along the scroll axis is the uniform
    /// cell size of the table.
    fn size(&self) -> Size;

    /// Capabilities of the produced cells.
    fn flags(&self) -> TemplateFlags {
        TemplateFlags::default()
    }

    /// Creates a fresh, unbound cell.
    fn instantiate(&mut self) -> Self::Cell;
}
