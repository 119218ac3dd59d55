// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlap predicates between a draggable and a dropzone rectangle.
//!
//! All functions are pure. Rectangles use Kurbo's `x0/y0/x1/y1` as
//! `left/top/right/bottom` in page space.

use core::str::FromStr;

use kurbo::{Point, Rect, Vec2};

/// How a dropzone decides that a draggable is over it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Overlap {
    /// The pointer must be strictly inside the dropzone.
    #[default]
    Pointer,
    /// The center of the draggable's rect must be inside the dropzone (bounds inclusive).
    Center,
    /// At least this fraction (`0..=1`) of the draggable's area must overlap the dropzone.
    Ratio(f64),
}

/// Error returned when parsing an unknown overlap mode name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("overlap mode must be `pointer` or `center`")]
pub struct ParseOverlapError;

impl FromStr for Overlap {
    type Err = ParseOverlapError;

    /// Parse `pointer` or `center`. Ratios are set numerically with [`Overlap::ratio`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pointer" => Ok(Self::Pointer),
            "center" => Ok(Self::Center),
            _ => Err(ParseOverlapError),
        }
    }
}

impl Overlap {
    /// A ratio mode with `threshold` clamped to `[0, 1]`.
    ///
    /// Returns `None` for NaN.
    pub fn ratio(threshold: f64) -> Option<Self> {
        if threshold.is_nan() {
            return None;
        }
        Some(Self::Ratio(threshold.clamp(0.0, 1.0)))
    }

    /// Evaluate this mode.
    ///
    /// `page` is the drag event's page position and `origin` the draggable's
    /// origin offset; `drag_rect` is the draggable's rect, if laid out.
    pub fn check(self, page: Point, origin: Vec2, drag_rect: Option<Rect>, rect: Rect) -> bool {
        match self {
            Self::Pointer => pointer(page + origin, rect),
            Self::Center => drag_rect.is_some_and(|d| center(d, rect)),
            Self::Ratio(threshold) => drag_rect.is_some_and(|d| ratio(d, rect) >= threshold),
        }
    }
}

/// Whether `page` lies strictly inside `rect`.
pub fn pointer(page: Point, rect: Rect) -> bool {
    let horizontal = page.x > rect.x0 && page.x < rect.x1;
    let vertical = page.y > rect.y0 && page.y < rect.y1;
    horizontal && vertical
}

/// Whether the center of `drag_rect` lies inside `rect`, bounds inclusive.
pub fn center(drag_rect: Rect, rect: Rect) -> bool {
    let c = Point::new(
        drag_rect.x0 + drag_rect.width() / 2.0,
        drag_rect.y0 + drag_rect.height() / 2.0,
    );
    c.x >= rect.x0 && c.x <= rect.x1 && c.y >= rect.y0 && c.y <= rect.y1
}

/// Fraction of `drag_rect`'s area covered by `rect`.
///
/// A zero-area `drag_rect` covers nothing and yields `0.0`.
pub fn ratio(drag_rect: Rect, rect: Rect) -> f64 {
    let overlap_w = (rect.x1.min(drag_rect.x1) - rect.x0.max(drag_rect.x0)).max(0.0);
    let overlap_h = (rect.y1.min(drag_rect.y1) - rect.y0.max(drag_rect.y0)).max(0.0);
    let drag_area = drag_rect.width() * drag_rect.height();
    if drag_area <= 0.0 {
        return 0.0;
    }
    overlap_w * overlap_h / drag_area
}
