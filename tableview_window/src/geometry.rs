// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollable content geometry for a uniform strip of cells.

use kurbo::{Point, Size};

use crate::ScrollAxis;

/// Size, anchor, and placement of the scrollable content for a strip of cells.
///
/// The content is anchored at its geometric center so that placement math is
/// the same on both axes. Cell positions are expressed in content-local
/// coordinates with the origin at that center, x growing right and y growing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentGeometry {
    /// Axis the content scrolls along.
    pub axis: ScrollAxis,
    /// Uniform cell extent along the axis.
    pub cell_size: f64,
    /// Number of cells laid out.
    pub total_count: usize,
    /// Size of the viewport the content scrolls within.
    pub viewport: Size,
    /// Size of the content. The on-axis extent is `cell_size * total_count`;
    /// the cross extent follows the viewport.
    pub content_size: Size,
    /// Normalized anchor of the content; always the center.
    pub anchor: Point,
    /// Content-local coordinate of the leading edge along the axis.
    pub leading_edge: f64,
    /// Content position (in viewport coordinates, relative to the viewport
    /// center) that aligns the content's leading edge with the viewport's.
    pub rest_position: Point,
    /// One viewport length as a fraction of the scrollable range, in `[0, 1]`.
    pub page_percent: f64,
}

impl ContentGeometry {
    /// Normalized center anchor applied to the content.
    pub const CENTER_ANCHOR: Point = Point::new(0.5, 0.5);

    /// Lays out `total_count` cells of `cell_size` along `axis` inside `viewport`.
    ///
    /// Negative or non-finite cell sizes are treated as `0`, which yields an
    /// empty content extent.
    #[must_use]
    pub fn layout(axis: ScrollAxis, cell_size: f64, total_count: usize, viewport: Size) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            0.0
        };
        #[allow(
            clippy::cast_precision_loss,
            reason = "Item counts stay far below 2^52"
        )]
        let content_length = cell_size * total_count as f64;
        let viewport_length = axis.length_of(viewport).max(0.0);
        let content_size = axis.size(content_length, axis.cross_length_of(viewport));

        let half_gap = viewport_length / 2.0 - content_length / 2.0;
        let (leading_edge, rest_position) = match axis {
            ScrollAxis::Horizontal => (-content_length / 2.0, Point::new(-half_gap, 0.0)),
            ScrollAxis::Vertical => (content_length / 2.0, Point::new(0.0, half_gap)),
        };

        Self {
            axis,
            cell_size,
            total_count,
            viewport,
            content_size,
            anchor: Self::CENTER_ANCHOR,
            leading_edge,
            rest_position,
            page_percent: page_percent(content_length, viewport_length),
        }
    }

    /// Geometry of a strip with no cells.
    #[must_use]
    pub fn empty(axis: ScrollAxis, viewport: Size) -> Self {
        Self::layout(axis, 0.0, 0, viewport)
    }

    /// Extent of the content along the axis.
    #[must_use]
    pub const fn content_length(&self) -> f64 {
        self.axis.length_of(self.content_size)
    }

    /// Extent of the viewport along the axis.
    #[must_use]
    pub const fn viewport_length(&self) -> f64 {
        self.axis.length_of(self.viewport)
    }

    /// Length the content can travel: content minus viewport, never negative.
    #[must_use]
    pub fn scrollable_length(&self) -> f64 {
        (self.content_length() - self.viewport_length()).max(0.0)
    }

    /// Returns `true` when the whole content fits inside the viewport.
    #[must_use]
    pub fn fits_viewport(&self) -> bool {
        self.content_length() <= self.viewport_length()
    }

    /// Content-local center of the cell at `index`.
    #[must_use]
    pub fn cell_position(&self, index: usize) -> Point {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Item indices stay far below 2^52"
        )]
        let along = self.cell_size * index as f64 + self.cell_size / 2.0;
        match self.axis {
            ScrollAxis::Horizontal => Point::new(self.leading_edge + along, 0.0),
            ScrollAxis::Vertical => Point::new(0.0, self.leading_edge - along),
        }
    }
}

/// One viewport length as a fraction of the scrollable range.
///
/// Content that fits within the viewport has nothing to page through; that
/// case, like any ratio above one, is reported as `1`.
#[must_use]
pub fn page_percent(content_length: f64, viewport_length: f64) -> f64 {
    let scrollable = content_length - viewport_length;
    if scrollable <= 0.0 {
        return 1.0;
    }
    (viewport_length / scrollable).clamp(0.0, 1.0)
}
