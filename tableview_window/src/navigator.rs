// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-percent math for index jumps and paging.
//!
//! Percents follow the host scroll primitive's convention for each axis:
//! horizontal percents measure the hidden length before the viewport (left),
//! vertical percents measure the hidden length after it (bottom). See
//! [`ScrollAxis::percent_from_leading_edge`].

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Vec2;

use crate::{ContentGeometry, ScrollAxis};

/// Percent that centers the viewport on `index`, as closely as clamping allows.
///
/// Returns `None` when there is nothing to scroll to (no cells, or a zero cell
/// size). When the content fits inside the viewport the leading edge is
/// targeted.
#[must_use]
pub fn target_index_percent(geometry: &ContentGeometry, index: usize) -> Option<f64> {
    if geometry.total_count == 0 || geometry.cell_size <= 0.0 {
        return None;
    }
    #[allow(
        clippy::cast_precision_loss,
        reason = "Item counts and indices stay far below 2^52"
    )]
    let (total, index) = (geometry.total_count as f64, index as f64);

    let view_span = geometry.viewport_length() / geometry.cell_size;
    let scroll_span = total - view_span;
    if scroll_span <= 0.0 {
        return Some(leading_percent(geometry.axis));
    }

    // Cells hidden before the viewport once `index` sits in its middle.
    let hidden_before = index - view_span / 2.0 + 0.5;
    let percent = if geometry.axis.percent_from_leading_edge() {
        hidden_before / scroll_span
    } else {
        (total - hidden_before - view_span) / scroll_span
    };
    Some(percent.clamp(0.0, 1.0))
}

/// Current scroll percent derived from the host's content offset.
///
/// Returns `None` when the content fits inside the viewport, since there is no
/// range to express a percent over. The value is not clamped; overscroll can
/// push it slightly outside `[0, 1]`.
#[must_use]
pub fn current_percent(geometry: &ContentGeometry, offset: Vec2) -> Option<f64> {
    let range = geometry.scrollable_length();
    if geometry.fits_viewport() || range <= 0.0 {
        return None;
    }
    let travelled = geometry.axis.leading_offset(offset).abs();
    Some(if geometry.axis.percent_from_leading_edge() {
        travelled / range
    } else {
        (range - travelled) / range
    })
}

/// Percent one page further along, clamped to `[0, 1]`.
#[must_use]
pub fn next_page_percent(current: f64, page_percent: f64) -> f64 {
    (current + page_percent).clamp(0.0, 1.0)
}

/// Percent one page back, clamped to `[0, 1]`.
#[must_use]
pub fn previous_page_percent(current: f64, page_percent: f64) -> f64 {
    (current - page_percent).clamp(0.0, 1.0)
}

/// Distance from the leading edge that a host reaches when scrolled to `percent`
/// over a scrollable `range` along `axis`.
///
/// This is the inverse of [`current_percent`] and is mostly useful for hosts
/// that simulate the scroll primitive. `percent` is clamped to `[0, 1]`.
#[must_use]
pub fn leading_offset_for_percent(axis: ScrollAxis, range: f64, percent: f64) -> f64 {
    let percent = percent.clamp(0.0, 1.0);
    let range = range.max(0.0);
    if axis.percent_from_leading_edge() {
        percent * range
    } else {
        (1.0 - percent) * range
    }
}

const fn leading_percent(axis: ScrollAxis) -> f64 {
    match axis {
        ScrollAxis::Horizontal => 0.0,
        ScrollAxis::Vertical => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Size, Vec2};

    use super::{
        current_percent, leading_offset_for_percent, next_page_percent, previous_page_percent,
        target_index_percent,
    };
    use crate::{ContentGeometry, ScrollAxis};

    fn strip(axis: ScrollAxis, total: usize) -> ContentGeometry {
        ContentGeometry::layout(axis, 50.0, total, axis.size(220.0, 100.0))
    }

    #[test]
    fn paging_adds_and_clamps() {
        assert!((next_page_percent(0.4, 0.3) - 0.7).abs() < 1e-12);
        assert_eq!(next_page_percent(0.9, 0.3), 1.0);
        assert!((previous_page_percent(0.4, 0.3) - 0.1).abs() < 1e-12);
        assert_eq!(previous_page_percent(0.1, 0.3), 0.0);
    }

    #[test]
    fn target_index_centers_cell_on_both_axes() {
        // 4.4 cells visible; centering index 10 hides 8.3 cells before the viewport.
        let horizontal = target_index_percent(&strip(ScrollAxis::Horizontal, 30), 10).unwrap();
        assert!((horizontal - 8.3 / 25.6).abs() < 1e-12);

        // Vertical percents count what is hidden after the viewport instead.
        let vertical = target_index_percent(&strip(ScrollAxis::Vertical, 30), 10).unwrap();
        assert!((vertical - 17.3 / 25.6).abs() < 1e-12);
        assert!((horizontal + vertical - 1.0).abs() < 1e-12);
    }

    #[test]
    fn target_index_clamps_near_the_ends() {
        let geometry = strip(ScrollAxis::Horizontal, 30);
        assert_eq!(target_index_percent(&geometry, 0), Some(0.0));
        assert_eq!(target_index_percent(&geometry, 29), Some(1.0));
        assert_eq!(target_index_percent(&geometry, 500), Some(1.0));

        let geometry = strip(ScrollAxis::Vertical, 30);
        assert_eq!(target_index_percent(&geometry, 0), Some(1.0));
        assert_eq!(target_index_percent(&geometry, 29), Some(0.0));
    }

    #[test]
    fn target_index_without_cells_is_none() {
        assert_eq!(target_index_percent(&strip(ScrollAxis::Vertical, 0), 3), None);
        // Short content targets the leading edge.
        assert_eq!(target_index_percent(&strip(ScrollAxis::Vertical, 3), 2), Some(1.0));
        assert_eq!(target_index_percent(&strip(ScrollAxis::Horizontal, 3), 2), Some(0.0));
    }

    #[test]
    fn current_percent_follows_axis_convention() {
        // 1500 - 220 = 1280 scrollable.
        let geometry = strip(ScrollAxis::Horizontal, 30);
        let percent = current_percent(&geometry, Vec2::new(-640.0, 0.0)).unwrap();
        assert!((percent - 0.5).abs() < 1e-12);
        assert_eq!(current_percent(&geometry, Vec2::ZERO), Some(0.0));

        let geometry = strip(ScrollAxis::Vertical, 30);
        assert_eq!(current_percent(&geometry, Vec2::ZERO), Some(1.0));
        assert_eq!(current_percent(&geometry, Vec2::new(0.0, 1280.0)), Some(0.0));

        let short = ContentGeometry::layout(ScrollAxis::Vertical, 50.0, 2, Size::new(100.0, 220.0));
        assert_eq!(current_percent(&short, Vec2::ZERO), None);
    }

    #[test]
    fn leading_offset_inverts_current_percent() {
        for axis in [ScrollAxis::Horizontal, ScrollAxis::Vertical] {
            let geometry = strip(axis, 30);
            let travelled = leading_offset_for_percent(axis, geometry.scrollable_length(), 0.25);
            let offset = match axis {
                ScrollAxis::Horizontal => Vec2::new(-travelled, 0.0),
                ScrollAxis::Vertical => Vec2::new(0.0, travelled),
            };
            let percent = current_percent(&geometry, offset).unwrap();
            assert!((percent - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn leading_offset_clamps_percent_and_range() {
        assert_eq!(leading_offset_for_percent(ScrollAxis::Horizontal, 1280.0, 1.5), 1280.0);
        assert_eq!(leading_offset_for_percent(ScrollAxis::Vertical, 1280.0, 1.5), 0.0);
        assert_eq!(leading_offset_for_percent(ScrollAxis::Vertical, 1280.0, -0.5), 1280.0);
        assert_eq!(leading_offset_for_percent(ScrollAxis::Vertical, -40.0, 0.5), 0.0);
    }
}
