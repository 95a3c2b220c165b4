// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Table View Window: layout math for cell-recycling table views.
//!
//! This crate holds the renderer-agnostic arithmetic behind a table view that
//! recycles a small pool of cells over a large data set of uniformly sized
//! items:
//!
//! - [`ScrollAxis`]: which of the two axes the strip scrolls along, plus
//!   helpers that project sizes and host scroll offsets onto that axis.
//! - [`compute_window`]: given a scroll offset, cell size, item count, and
//!   viewport length, returns the contiguous [`Window`] of indices that must be
//!   bound to visible cells.
//! - [`ContentGeometry`]: the scrollable content's size, center anchor, rest
//!   position, cell placement, and the "one page" fraction of the scroll range.
//! - [`navigator`]: percent targets for jumping to an index and paging
//!   forwards/backwards.
//!
//! It knows nothing about cells, pools, or scroll views; the `tableview` crate
//! builds the recycling controller on top of it.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use tableview_window::{ContentGeometry, ScrollAxis, Window, compute_window};
//!
//! // 30 items, each 50 logical pixels tall, in a 220 pixel tall viewport.
//! let viewport = Size::new(300.0, 220.0);
//! let geometry = ContentGeometry::layout(ScrollAxis::Vertical, 50.0, 30, viewport);
//! assert_eq!(geometry.content_length(), 1500.0);
//!
//! // Scrolled 130 pixels from the top: items 2 through 7 need cells.
//! let window = compute_window(130.0, 50.0, 30, geometry.viewport_length()).unwrap();
//! assert_eq!(window, Window::inclusive(2, 7));
//!
//! // Each bound cell is placed relative to the content's center.
//! let top = geometry.cell_position(window.start);
//! assert_eq!(top.y, 750.0 - 125.0);
//! ```
//!
//! All extents and offsets live in one caller-chosen coordinate space
//! (typically logical pixels).
//!
//! ## Features
//!
//! - `std` (default): builds `kurbo` with `std`.
//! - `libm`: `no_std` builds that take rounding from `libm` through `kurbo`.
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

mod axis;
mod geometry;
pub mod navigator;
mod window;

pub use axis::{ScrollAxis, ScrollEdge};
pub use geometry::{ContentGeometry, page_percent};
pub use window::{Window, WindowError, compute_window, max_start_index, visible_slot_count};
