// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Table View: a cell-recycling virtualized list.
//!
//! A [`TableView`] maps a large data set of uniformly sized items onto a small,
//! bounded set of reusable cells. Only the cells needed to cover the viewport
//! (plus one for partially visible edges) exist at any time; as the content
//! scrolls, cells that leave the window are rebound to the indices that enter
//! it instead of being destroyed and recreated.
//!
//! The pieces, leaf to root:
//!
//! - [`CellPool`]: detached [`CellSlot`]s waiting to be reused. New cells are
//!   created through a [`CellTemplate`] only when the pool is empty.
//! - [`tableview_window::compute_window`]: the [`Window`] of indices that must be
//!   visible for a scroll offset.
//! - [`Reconciler`]: diffs the visible slots against a new window, keeps the
//!   slots whose index is still required, recycles the rest, and places every
//!   slot in index order.
//! - [`ContentGeometry`]: size and placement of the scrollable content, and the
//!   page fraction used for paging.
//! - [`tableview_window::navigator`]: percent targets for index jumps and paging.
//! - [`TableView`]: ties the above to a [`ScrollHost`] and a per-frame tick.
//!
//! This crate does **not** scroll anything itself. The host scroll view owns
//! physics, input, and animation; it reports offsets and scroll-begin/end
//! events, and the rendering layer reads [`TableView::slots`] to position and
//! order the cells. Cells receive their content through [`TableCell`].
//!
//! ## Frame loop
//!
//! ```text
//! host: scroll began   → table.on_scroll_began()   (phase = Scrolling)
//! host: every frame    → table.tick()              (window + reconcile)
//! host: scroll ended   → table.on_scroll_ended()   (phase = Idle)
//! api:  instant jump   → one forced pass on the next tick
//! ```
//!
//! Everything runs on the host's frame thread. The table view holds no locks;
//! it relies on the host never calling into it re-entrantly.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo` and `tableview_window`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for
//!   floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cell;
mod error;
mod host;
mod pool;
mod reconcile;
mod slot;
mod table_view;

#[cfg(test)]
mod test_support;

pub use cell::{BindContext, CellTemplate, TableCell, TemplateFlags};
pub use error::{ConfigurationError, TableViewError};
pub use host::{ScrollAnimation, ScrollHost};
pub use pool::CellPool;
pub use reconcile::{ReconcileReport, Reconciler};
pub use slot::CellSlot;
pub use table_view::{ScrollPhase, TableView};

pub use tableview_window::{ContentGeometry, ScrollAxis, ScrollEdge, Window};
