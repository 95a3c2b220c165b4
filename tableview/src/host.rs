// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scroll primitive a table view drives.

use kurbo::{Point, Size, Vec2};
use tableview_window::ScrollEdge;

/// How a programmatic scroll reaches its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    /// Seconds the scroll takes; `None` or zero jumps immediately.
    pub duration: Option<f64>,
    /// Whether the scroll eases out as it approaches the target.
    pub decelerate: bool,
}

impl Default for ScrollAnimation {
    fn default() -> Self {
        Self::INSTANT
    }
}

impl ScrollAnimation {
    /// Jump straight to the target.
    pub const INSTANT: Self = Self {
        duration: None,
        decelerate: true,
    };

    /// Animate over `seconds`, decelerating towards the end.
    #[must_use]
    pub const fn over(seconds: f64) -> Self {
        Self {
            duration: Some(seconds),
            decelerate: true,
        }
    }

    /// Same timing at a constant speed.
    #[must_use]
    pub const fn without_deceleration(self) -> Self {
        Self {
            decelerate: false,
            ..self
        }
    }

    /// Returns `true` if the scroll spans multiple frames.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.duration.is_some_and(|seconds| seconds > 0.0)
    }
}

/// Capabilities of the scroll view that physically moves the content.
///
/// The host owns scrolling physics, input, and animation. It reports where the
/// content is, moves it on request, and tells the table view when scrolling
/// starts and stops by calling [`TableView::on_scroll_began`] and
/// [`TableView::on_scroll_ended`].
///
/// Percents follow the conventions described in
/// [`tableview_window::navigator`]: horizontal `0` is the left end, vertical
/// `1` is the top end.
///
/// [`TableView::on_scroll_began`]: crate::TableView::on_scroll_began
/// [`TableView::on_scroll_ended`]: crate::TableView::on_scroll_ended
pub trait ScrollHost {
    /// Current displacement of the content relative to its rest position.
    ///
    /// Scrolling towards the end of a horizontal strip makes `x` negative;
    /// scrolling towards the end of a vertical strip makes `y` positive.
    fn scroll_offset(&self) -> Vec2;

    /// Size of the viewport the content is clipped to.
    fn viewport_size(&self) -> Size;

    /// Scrolls a horizontal strip to `percent` of its range.
    fn scroll_to_percent_horizontal(&mut self, percent: f64, animation: ScrollAnimation);

    /// Scrolls a vertical strip to `percent` of its range.
    fn scroll_to_percent_vertical(&mut self, percent: f64, animation: ScrollAnimation);

    /// Scrolls to one of the content's edges.
    fn scroll_to_edge(&mut self, edge: ScrollEdge, animation: ScrollAnimation);

    /// Halts any in-flight animated scroll.
    fn stop_auto_scroll(&mut self);

    /// Resizes the scrollable content.
    fn set_content_size(&mut self, size: Size) {
        let _ = size;
    }

    /// Moves the content, relative to the viewport center, with its anchor at
    /// the content's center.
    fn set_content_position(&mut self, position: Point) {
        let _ = position;
    }
}
