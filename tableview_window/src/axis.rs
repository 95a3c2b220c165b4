// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll axis selection and projection helpers.

use kurbo::{Size, Vec2};

/// The single axis a table view scrolls along.
///
/// Exactly one axis is active at a time. Cells are laid out in a single strip
/// along this axis; the cross axis is not virtualized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    /// Cells run left to right.
    Horizontal,
    /// Cells run top to bottom.
    #[default]
    Vertical,
}

impl ScrollAxis {
    /// Returns the extent of `size` along this axis.
    #[must_use]
    pub const fn length_of(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Returns the extent of `size` across this axis.
    #[must_use]
    pub const fn cross_length_of(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.height,
            Self::Vertical => size.width,
        }
    }

    /// Builds a size whose on-axis extent is `length` and whose cross extent is `cross`.
    #[must_use]
    pub const fn size(self, length: f64, cross: f64) -> Size {
        match self {
            Self::Horizontal => Size::new(length, cross),
            Self::Vertical => Size::new(cross, length),
        }
    }

    /// Converts a host scroll offset into the distance scrolled from the leading edge.
    ///
    /// Hosts report the offset as the displacement of the content: scrolling a
    /// horizontal strip towards its end moves the content left (negative `x`),
    /// while scrolling a vertical strip towards its end moves the content up
    /// (positive `y`, y-up coordinates). The result is not clamped.
    #[must_use]
    pub fn leading_offset(self, offset: Vec2) -> f64 {
        match self {
            Self::Horizontal => -offset.x,
            Self::Vertical => offset.y,
        }
    }

    /// Returns `true` when scroll percents on this axis are measured from the leading edge.
    ///
    /// Horizontal percents count the hidden length on the left; vertical percents
    /// count the hidden length at the bottom, so `1.0` is the top of the strip.
    #[must_use]
    pub const fn percent_from_leading_edge(self) -> bool {
        matches!(self, Self::Horizontal)
    }

    /// The edge that shows the first cell.
    #[must_use]
    pub const fn leading_edge(self) -> ScrollEdge {
        match self {
            Self::Horizontal => ScrollEdge::Left,
            Self::Vertical => ScrollEdge::Top,
        }
    }

    /// The edge that shows the last cell.
    #[must_use]
    pub const fn trailing_edge(self) -> ScrollEdge {
        match self {
            Self::Horizontal => ScrollEdge::Right,
            Self::Vertical => ScrollEdge::Bottom,
        }
    }
}

/// One of the four edges a scroll view can be driven to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollEdge {
    /// Leading edge of a horizontal strip.
    Left,
    /// Trailing edge of a horizontal strip.
    Right,
    /// Leading edge of a vertical strip.
    Top,
    /// Trailing edge of a vertical strip.
    Bottom,
}

impl ScrollEdge {
    /// Returns the axis this edge lies on.
    #[must_use]
    pub const fn axis(self) -> ScrollAxis {
        match self {
            Self::Left | Self::Right => ScrollAxis::Horizontal,
            Self::Top | Self::Bottom => ScrollAxis::Vertical,
        }
    }
}
