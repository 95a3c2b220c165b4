// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index windows over a uniform strip of cells.

use core::ops::Range;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use thiserror::Error;

/// Errors produced while computing a [`Window`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WindowError {
    /// The cell extent along the scroll axis is zero, negative, or not finite.
    #[error("cell size must be positive and finite; got {cell_size}")]
    InvalidCellSize {
        /// The rejected cell size.
        cell_size: f64,
    },
}

/// A contiguous run of data indices that must be bound to visible slots.
///
/// The window is stored as a start index plus a count so that the empty window
/// is representable; [`Window::last`] gives the inclusive end index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Window {
    /// First index in the window.
    pub start: usize,
    /// Number of indices in the window.
    pub count: usize,
}

impl Window {
    /// The window with no indices.
    pub const EMPTY: Self = Self { start: 0, count: 0 };

    /// Creates the window `[start, last]` (both inclusive).
    ///
    /// Returns [`Window::EMPTY`] when `last < start`.
    #[must_use]
    pub const fn inclusive(start: usize, last: usize) -> Self {
        if last < start {
            Self::EMPTY
        } else {
            Self {
                start,
                count: last - start + 1,
            }
        }
    }

    /// Returns `true` if the window holds no indices.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Inclusive end index, if any.
    #[must_use]
    pub const fn last(&self) -> Option<usize> {
        if self.count == 0 {
            None
        } else {
            Some(self.start + self.count - 1)
        }
    }

    /// Returns `true` if `index` lies in the window.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index - self.start < self.count
    }

    /// The indices of the window in ascending order.
    #[must_use]
    pub const fn indices(&self) -> Range<usize> {
        self.start..self.start + self.count
    }
}

/// Number of slots needed to cover `viewport_length` with cells of `cell_size`.
///
/// One extra slot covers the partially visible cells at both ends of the
/// viewport. The result never exceeds `total_count`.
pub fn visible_slot_count(
    cell_size: f64,
    total_count: usize,
    viewport_length: f64,
) -> Result<usize, WindowError> {
    check_cell_size(cell_size)?;
    let viewport_length = viewport_length.max(0.0);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "The ratio is non-negative and finite; the count is clamped right after"
    )]
    let needed = (viewport_length / cell_size).ceil() as usize;
    Ok(needed.saturating_add(1).min(total_count))
}

/// Largest start index that still leaves `slot_count` indices inside the data.
#[must_use]
pub const fn max_start_index(total_count: usize, slot_count: usize) -> usize {
    total_count.saturating_sub(slot_count)
}

/// Computes the window of indices that must be visible at `scroll_offset`.
///
/// - `scroll_offset`: distance scrolled from the leading edge; negative values
///   (overscroll at the start) are treated as `0`.
/// - `cell_size`: uniform cell extent along the scroll axis; must be positive.
/// - `total_count`: number of items in the data set.
/// - `viewport_length`: extent of the viewport along the scroll axis.
///
/// The window always holds [`visible_slot_count`] indices and never runs past
/// the end of the data. An empty data set yields [`Window::EMPTY`] no matter
/// the cell size.
pub fn compute_window(
    scroll_offset: f64,
    cell_size: f64,
    total_count: usize,
    viewport_length: f64,
) -> Result<Window, WindowError> {
    if total_count == 0 {
        return Ok(Window::EMPTY);
    }
    let count = visible_slot_count(cell_size, total_count, viewport_length)?;
    let max_start = max_start_index(total_count, count);

    let offset = if scroll_offset.is_finite() {
        scroll_offset.max(0.0)
    } else {
        0.0
    };
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "The ratio is non-negative; the index is clamped right after"
    )]
    let raw_start = (offset / cell_size).floor() as usize;

    Ok(Window {
        start: raw_start.min(max_start),
        count,
    })
}

fn check_cell_size(cell_size: f64) -> Result<(), WindowError> {
    if cell_size.is_finite() && cell_size > 0.0 {
        Ok(())
    } else {
        Err(WindowError::InvalidCellSize { cell_size })
    }
}
