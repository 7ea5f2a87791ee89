//! Crop-rectangle geometry for the image editor.
//!
//! Coordinates are image pixels.  A valid rectangle satisfies
//! `0 <= x1 < x2 <= width` and `0 <= y1 < y2 <= height`, and every drag
//! keeps each side at least `MIN_CROP_EXTENT` long unless the image itself
//! is smaller than that.

use crate::config::{EDGE_GRAB_DISTANCE, MAX_SCALE_PERCENT, MIN_CROP_EXTENT, MIN_SCALE_PERCENT};
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl CropRect {
    /// The rectangle covering an entire `width × height` image.
    pub fn full(width: u32, height: u32) -> Self {
        CropRect {
            x1: 0,
            y1: 0,
            x2: width as i32,
            y2: height as i32,
        }
    }

    pub fn width(&self) -> u32 {
        (self.x2 - self.x1).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y2 - self.y1).max(0) as u32
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x1, self.y1, self.x2 - self.x1, self.y2 - self.y1)
    }

    /// Check every invariant against an image of the given size.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        let (w, h) = (width as i32, height as i32);
        let min_w = MIN_CROP_EXTENT.min(w);
        let min_h = MIN_CROP_EXTENT.min(h);
        self.x1 >= 0
            && self.y1 >= 0
            && self.x2 <= w
            && self.y2 <= h
            && self.x1 < self.x2
            && self.y1 < self.y2
            && self.x2 - self.x1 >= min_w
            && self.y2 - self.y1 >= min_h
    }
}

// ── Hover / drag classification ──────────────────────────────────────────────

/// The part of the crop rectangle under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Side {
    pub fn moves_left(&self) -> bool {
        matches!(self, Side::Left | Side::TopLeft | Side::BottomLeft)
    }

    pub fn moves_right(&self) -> bool {
        matches!(self, Side::Right | Side::TopRight | Side::BottomRight)
    }

    pub fn moves_top(&self) -> bool {
        matches!(self, Side::Top | Side::TopLeft | Side::TopRight)
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(self, Side::Bottom | Side::BottomLeft | Side::BottomRight)
    }

    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            Side::TopLeft | Side::TopRight | Side::BottomLeft | Side::BottomRight
        )
    }
}

/// Classify the image-space point `(px, py)` against the rectangle.
///
/// Corners win over edges; among edges the order is left, right, top,
/// bottom.  A point only counts as near an edge when it also lies within
/// the edge's span (padded by the grab distance).
pub fn hover_side(rect: &CropRect, px: i32, py: i32) -> Option<Side> {
    let near = |a: i32, b: i32| (a - b).abs() < EDGE_GRAB_DISTANCE;
    let near_left = near(px, rect.x1);
    let near_right = near(px, rect.x2);
    let near_top = near(py, rect.y1);
    let near_bottom = near(py, rect.y2);

    let in_x_span = px > rect.x1 - EDGE_GRAB_DISTANCE && px < rect.x2 + EDGE_GRAB_DISTANCE;
    let in_y_span = py > rect.y1 - EDGE_GRAB_DISTANCE && py < rect.y2 + EDGE_GRAB_DISTANCE;

    if near_left && near_top {
        Some(Side::TopLeft)
    } else if near_right && near_top {
        Some(Side::TopRight)
    } else if near_left && near_bottom {
        Some(Side::BottomLeft)
    } else if near_right && near_bottom {
        Some(Side::BottomRight)
    } else if near_left && in_y_span {
        Some(Side::Left)
    } else if near_right && in_y_span {
        Some(Side::Right)
    } else if near_top && in_x_span {
        Some(Side::Top)
    } else if near_bottom && in_x_span {
        Some(Side::Bottom)
    } else {
        None
    }
}

/// Move the edge(s) named by `side` by `(dx, dy)` image pixels.
///
/// Each moved edge is clamped to the image and kept `MIN_CROP_EXTENT` away
/// from the opposite edge.  When the image is too small to honour the
/// minimum extent, staying inside the image takes priority.
pub fn drag(rect: &CropRect, side: Side, dx: i32, dy: i32, width: u32, height: u32) -> CropRect {
    let (w, h) = (width as i32, height as i32);
    let mut next = *rect;

    if side.moves_left() {
        next.x1 = (rect.x1 + dx).min(rect.x2 - MIN_CROP_EXTENT).max(0);
    }
    if side.moves_right() {
        next.x2 = (rect.x2 + dx).max(rect.x1 + MIN_CROP_EXTENT).min(w);
    }
    if side.moves_top() {
        next.y1 = (rect.y1 + dy).min(rect.y2 - MIN_CROP_EXTENT).max(0);
    }
    if side.moves_bottom() {
        next.y2 = (rect.y2 + dy).max(rect.y1 + MIN_CROP_EXTENT).min(h);
    }

    next
}

// ── Resize arithmetic ─────────────────────────────────────────────────────────

pub fn clamp_scale(percent: u32) -> u32 {
    percent.clamp(MIN_SCALE_PERCENT, MAX_SCALE_PERCENT)
}

/// `floor(dim * percent / 100)` for both axes, never below one pixel.
pub fn scaled_size(width: u32, height: u32, percent: u32) -> (u32, u32) {
    let scale = |dim: u32| ((dim as u64 * percent as u64) / 100).max(1) as u32;
    (scale(width), scale(height))
}
