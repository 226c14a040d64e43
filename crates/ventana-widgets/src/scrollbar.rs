//! Scrollbar geometry.
//!
//! One pure function maps scroll state and viewport bounds to the pixel
//! rectangles of a scrollbar's track and thumb. Painting and hit-testing
//! both go through it, so the thumb a user grabs is always exactly the thumb
//! that was drawn.

use serde::{Deserialize, Serialize};
use ventana_core::{Color, Point, Rect, Size};

/// Scroll axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Left-right scrolling; scrollbar sits in the bottom gutter.
    Horizontal,
    /// Up-down scrolling; scrollbar sits in the right gutter.
    Vertical,
}

impl Axis {
    /// Both axes, in paint order.
    pub const ALL: [Self; 2] = [Self::Horizontal, Self::Vertical];

    /// Length of a size along this axis.
    #[must_use]
    pub const fn length(self, size: Size) -> f32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Coordinate of a point along this axis.
    #[must_use]
    pub const fn coord(self, point: Point) -> f32 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }
}

/// Visual configuration of a scroll view's scrollbars.
///
/// Fixed at construction time; the viewport does not reconfigure styles at
/// runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollbarStyle {
    /// Gutter thickness in pixels
    pub thickness: f32,
    /// Inset reserved at each end of the track for arrow caps
    pub arrow_size: f32,
    /// Track fill color
    pub track_color: Color,
    /// Thumb fill color
    pub thumb_color: Color,
}

impl Default for ScrollbarStyle {
    fn default() -> Self {
        Self {
            thickness: 10.0,
            arrow_size: 1.0,
            track_color: Color::BLACK,
            thumb_color: Color::rgb(0.5, 0.5, 0.5),
        }
    }
}

/// Pixel geometry of one scrollbar, derived from scroll state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarGeometry {
    /// Full gutter rectangle (hit region and track background)
    pub track: Rect,
    /// Draggable thumb rectangle
    pub thumb: Rect,
    /// Distance the thumb can move; denominator for drag-to-scroll mapping
    pub travel: f32,
}

/// Where a point falls relative to the thumb along the scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbHit {
    /// Before the thumb (above it, or to its left)
    Before,
    /// On the thumb itself
    On,
    /// Past the thumb (below it, or to its right)
    After,
}

impl ScrollbarGeometry {
    /// Classify a point (already known to be inside the track) against the
    /// thumb along the given axis.
    #[must_use]
    pub fn hit_thumb(&self, axis: Axis, point: Point) -> ThumbHit {
        let coord = axis.coord(point);
        let start = axis.coord(self.thumb.origin());
        let end = start + axis.length(self.thumb.size());

        if coord < start {
            ThumbHit::Before
        } else if coord > end {
            ThumbHit::After
        } else {
            ThumbHit::On
        }
    }
}

/// Compute the track and thumb rectangles for one scrollbar.
///
/// `scroll` is the normalized offset in `[0, 1]`; `both_active` shortens the
/// track by the opposite gutter's thickness so the two bars never overlap in
/// the shared corner. Degenerate inputs (zero or negative child size, a
/// viewport thinner than the arrow insets) produce empty but finite
/// rectangles — never NaN.
#[must_use]
pub fn scrollbar_geometry(
    axis: Axis,
    bounds: Rect,
    child_preferred: Size,
    scroll: f32,
    both_active: bool,
    style: &ScrollbarStyle,
) -> ScrollbarGeometry {
    let len = axis.length(bounds.size());
    let child_len = axis.length(child_preferred);

    let viewable_ratio = if child_len > 0.0 {
        (len / child_len).min(1.0)
    } else {
        1.0
    };

    let reserved = if both_active { style.thickness } else { 0.0 };
    // Drawn gutter length vs. the run the thumb travels in: the run also
    // excludes the arrow insets at both ends.
    let span = (len - reserved).max(0.0);
    let run = (len - 2.0 * style.arrow_size - reserved).max(0.0);

    let thumb_len = run * viewable_ratio;
    let travel = (run - thumb_len).max(0.0);
    let thumb_offset = scroll.clamp(0.0, 1.0) * travel;

    let (track, thumb) = match axis {
        Axis::Vertical => {
            let x = bounds.right() - style.thickness;
            (
                Rect::new(x, bounds.y, style.thickness, span),
                Rect::new(
                    x,
                    bounds.y + style.arrow_size + thumb_offset,
                    style.thickness,
                    thumb_len,
                ),
            )
        }
        Axis::Horizontal => {
            let y = bounds.bottom() - style.thickness;
            (
                Rect::new(bounds.x, y, span, style.thickness),
                Rect::new(
                    bounds.x + style.arrow_size + thumb_offset,
                    y,
                    thumb_len,
                    style.thickness,
                ),
            )
        }
    };

    ScrollbarGeometry {
        track,
        thumb,
        travel,
    }
}
