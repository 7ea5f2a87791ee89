//! Axis-aligned rectangles and linear coordinate mapping.
//!
//! `Rect` follows the usual screen convention: `x` grows rightward, `y`
//! grows downward, and the right/bottom edges are exclusive.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// Build a rectangle of the given size centred on `(cx, cy)`.
    pub fn centered(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Rect::new(cx - w / 2, cy - h / 2, w, h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// True when the two rectangles share at least one pixel.  Touching
    /// edges do not count, and empty rectangles never collide.
    pub fn collides(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }
}

// ── Linear mapping between two coordinate spaces ─────────────────────────────

/// Per-axis scale factor from one space into another, e.g. from the
/// on-screen label that shows an image into the image's own pixels, or
/// from terminal cells into world pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    pub sx: f64,
    pub sy: f64,
}

impl Scale {
    /// Factor mapping a `from_w × from_h` space onto `to_w × to_h`.
    /// Degenerate (zero-sized) source axes map with factor 1.
    pub fn between(from_w: u32, from_h: u32, to_w: u32, to_h: u32) -> Self {
        let axis = |from: u32, to: u32| {
            if from == 0 {
                1.0
            } else {
                to as f64 / from as f64
            }
        };
        Scale {
            sx: axis(from_w, to_w),
            sy: axis(from_h, to_h),
        }
    }

    /// Map a point, truncating toward zero like integer pixel coordinates.
    pub fn apply(&self, x: i32, y: i32) -> (i32, i32) {
        ((x as f64 * self.sx) as i32, (y as f64 * self.sy) as i32)
    }

    /// Map the centre of the unit cell at `(x, y)`; used when the source
    /// space is a coarse grid such as terminal cells.
    pub fn apply_cell_center(&self, x: i32, y: i32) -> (i32, i32) {
        (
            ((x as f64 + 0.5) * self.sx) as i32,
            ((y as f64 + 0.5) * self.sy) as i32,
        )
    }

    pub fn inverse(&self) -> Scale {
        Scale {
            sx: if self.sx == 0.0 { 1.0 } else { 1.0 / self.sx },
            sy: if self.sy == 0.0 { 1.0 } else { 1.0 / self.sy },
        }
    }
}
