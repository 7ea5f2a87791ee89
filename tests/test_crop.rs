use twin_demos::config::{MAX_SCALE_PERCENT, MIN_CROP_EXTENT, MIN_SCALE_PERCENT};
use twin_demos::crop::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIDES: [Side; 8] = [
    Side::Left,
    Side::Right,
    Side::Top,
    Side::Bottom,
    Side::TopLeft,
    Side::TopRight,
    Side::BottomLeft,
    Side::BottomRight,
];

fn sample_rect() -> CropRect {
    CropRect {
        x1: 50,
        y1: 50,
        x2: 150,
        y2: 150,
    }
}

// ── CropRect ──────────────────────────────────────────────────────────────────

#[test]
fn full_rect_covers_image() {
    let r = CropRect::full(320, 200);
    assert_eq!((r.x1, r.y1, r.x2, r.y2), (0, 0, 320, 200));
    assert_eq!((r.width(), r.height()), (320, 200));
    assert!(r.fits(320, 200));
}

#[test]
fn fits_rejects_out_of_bounds_and_slivers() {
    assert!(!CropRect { x1: -1, y1: 0, x2: 20, y2: 20 }.fits(100, 100));
    assert!(!CropRect { x1: 0, y1: 0, x2: 101, y2: 20 }.fits(100, 100));
    assert!(!CropRect { x1: 0, y1: 0, x2: 5, y2: 20 }.fits(100, 100));
    assert!(CropRect { x1: 0, y1: 0, x2: 4, y2: 3 }.fits(4, 3));
}

// ── Hover ─────────────────────────────────────────────────────────────────────

#[test]
fn hover_detects_corners() {
    let r = sample_rect();
    assert_eq!(hover_side(&r, 50, 50), Some(Side::TopLeft));
    assert_eq!(hover_side(&r, 150, 52), Some(Side::TopRight));
    assert_eq!(hover_side(&r, 45, 148), Some(Side::BottomLeft));
    assert_eq!(hover_side(&r, 155, 155), Some(Side::BottomRight));
}

#[test]
fn hover_detects_edges() {
    let r = sample_rect();
    assert_eq!(hover_side(&r, 52, 100), Some(Side::Left));
    assert_eq!(hover_side(&r, 148, 100), Some(Side::Right));
    assert_eq!(hover_side(&r, 100, 55), Some(Side::Top));
    assert_eq!(hover_side(&r, 100, 145), Some(Side::Bottom));
}

#[test]
fn hover_misses_interior_and_far_points() {
    let r = sample_rect();
    assert_eq!(hover_side(&r, 100, 100), None);
    assert_eq!(hover_side(&r, 60, 60), None);
    // In line with the left edge but far below it.
    assert_eq!(hover_side(&r, 50, 300), None);
    assert_eq!(hover_side(&r, 300, 50), None);
}

#[test]
fn hover_prefers_corner_on_tiny_rect() {
    let r = CropRect { x1: 0, y1: 0, x2: 10, y2: 10 };
    assert_eq!(hover_side(&r, 5, 5), Some(Side::TopLeft));
}

#[test]
fn side_axes() {
    assert!(Side::TopLeft.moves_left() && Side::TopLeft.moves_top());
    assert!(!Side::TopLeft.moves_right() && !Side::TopLeft.moves_bottom());
    assert!(Side::Bottom.moves_bottom() && !Side::Bottom.is_corner());
    assert!(Side::BottomRight.is_corner());
}

// ── Drag ──────────────────────────────────────────────────────────────────────

#[test]
fn drag_edges_moves_only_that_edge() {
    let r = sample_rect();
    assert_eq!(
        drag(&r, Side::Left, 20, 30, 300, 300),
        CropRect { x1: 70, ..r }
    );
    assert_eq!(
        drag(&r, Side::Bottom, 20, 30, 300, 300),
        CropRect { y2: 180, ..r }
    );
}

#[test]
fn drag_corner_moves_both_axes() {
    let r = sample_rect();
    assert_eq!(
        drag(&r, Side::TopRight, 10, -20, 300, 300),
        CropRect {
            x1: 50,
            y1: 30,
            x2: 160,
            y2: 150
        }
    );
}

#[test]
fn drag_clamps_to_image() {
    let r = sample_rect();
    assert_eq!(drag(&r, Side::Left, -100, 0, 300, 300).x1, 0);
    assert_eq!(drag(&r, Side::Right, 500, 0, 300, 300).x2, 300);
    assert_eq!(drag(&r, Side::Top, 0, -100, 300, 300).y1, 0);
    assert_eq!(drag(&r, Side::Bottom, 0, 500, 300, 200).y2, 200);
}

#[test]
fn drag_keeps_minimum_extent() {
    let r = sample_rect();
    assert_eq!(drag(&r, Side::Left, 200, 0, 300, 300).x1, 150 - MIN_CROP_EXTENT);
    assert_eq!(drag(&r, Side::Right, -200, 0, 300, 300).x2, 50 + MIN_CROP_EXTENT);
    assert_eq!(drag(&r, Side::Top, 0, 200, 300, 300).y1, 150 - MIN_CROP_EXTENT);
    assert_eq!(drag(&r, Side::Bottom, 0, -200, 300, 300).y2, 50 + MIN_CROP_EXTENT);
}

#[test]
fn random_drags_keep_rect_valid() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let width = rng.gen_range(1..400);
        let height = rng.gen_range(1..400);
        let mut rect = CropRect::full(width, height);
        for _ in 0..100 {
            let side = SIDES[rng.gen_range(0..SIDES.len())];
            let dx = rng.gen_range(-500..500);
            let dy = rng.gen_range(-500..500);
            rect = drag(&rect, side, dx, dy, width, height);
            assert!(rect.fits(width, height), "{:?} in {}x{}", rect, width, height);
        }
    }
}

// ── Resize arithmetic ─────────────────────────────────────────────────────────

#[test]
fn clamp_scale_bounds() {
    assert_eq!(clamp_scale(0), MIN_SCALE_PERCENT);
    assert_eq!(clamp_scale(75), 75);
    assert_eq!(clamp_scale(1000), MAX_SCALE_PERCENT);
}

#[test]
fn scaled_size_floors_and_never_vanishes() {
    assert_eq!(scaled_size(200, 100, 50), (100, 50));
    assert_eq!(scaled_size(199, 99, 50), (99, 49));
    assert_eq!(scaled_size(3, 3, 10), (1, 1));
    assert_eq!(scaled_size(150, 80, 200), (300, 160));
}

#[test]
fn scaled_size_is_monotonic_in_percent() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let w = rng.gen_range(1..5000);
        let h = rng.gen_range(1..5000);
        let p = rng.gen_range(MIN_SCALE_PERCENT..MAX_SCALE_PERCENT);
        let (a_w, a_h) = scaled_size(w, h, p);
        let (b_w, b_h) = scaled_size(w, h, p + 1);
        assert!(a_w <= b_w && a_h <= b_h);
    }
}
