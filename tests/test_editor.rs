use std::path::PathBuf;

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use twin_demos::crop::{CropRect, Side};
use twin_demos::editor::{EditorSession, StatusKind};
use twin_demos::Error;

/// A scratch path unique to this test process.
fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("twin_demos_{}_{}", std::process::id(), name))
}

/// Write a `width × height` gradient PNG and return its path.
fn write_png(name: &str, width: u32, height: u32) -> PathBuf {
    let path = scratch(name);
    let img = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 128]));
    img.save(&path).unwrap();
    path
}

fn loaded(name: &str, width: u32, height: u32) -> EditorSession {
    let path = write_png(name, width, height);
    let mut editor = EditorSession::new();
    editor.open(&path).unwrap();
    let _ = std::fs::remove_file(path);
    editor
}

// ── Open / reset ──────────────────────────────────────────────────────────────

#[test]
fn fresh_editor_has_no_image() {
    let editor = EditorSession::new();
    assert!(editor.image().is_none());
    assert!(editor.crop().is_none());
    assert_eq!(editor.scale_percent(), 100);
    assert_eq!(editor.status().kind, StatusKind::Info);
    assert!(editor.resized_image().is_none());
}

#[test]
fn open_selects_whole_image() {
    let editor = loaded("open.png", 64, 32);
    assert_eq!(editor.crop(), Some(CropRect::full(64, 32)));
    assert_eq!(editor.scale_percent(), 100);
    assert_eq!(editor.status().kind, StatusKind::Info);
    assert!(editor.status().text.contains("64×32"));
}

#[test]
fn open_missing_file_keeps_state_and_reports() {
    let mut editor = loaded("keep.png", 20, 20);
    let err = editor.open(&scratch("does_not_exist.png")).unwrap_err();
    assert!(matches!(err, Error::Open { .. }));
    assert_eq!(editor.status().kind, StatusKind::Error);
    assert_eq!(editor.crop(), Some(CropRect::full(20, 20)));
}

#[test]
fn every_open_gets_a_new_generation() {
    let first = write_png("gen_a.png", 8, 8);
    let second = write_png("gen_b.png", 8, 8);
    let mut editor = EditorSession::new();
    assert_eq!(editor.generation(), 0);

    editor.open(&first).unwrap();
    let after_first = editor.generation();
    editor.open(&second).unwrap();
    assert_ne!(editor.generation(), after_first);

    let before_failure = editor.generation();
    let _ = editor.open(&scratch("gen_missing.png"));
    assert_eq!(editor.generation(), before_failure);

    let _ = std::fs::remove_file(first);
    let _ = std::fs::remove_file(second);
}

#[test]
fn reset_restores_full_crop_and_scale() {
    let mut editor = loaded("reset.png", 100, 80);
    editor.set_label_size(100, 80);
    editor.pointer_pressed(0, 40);
    editor.pointer_dragged(30, 40);
    editor.pointer_released();
    editor.set_scale(50);
    assert_ne!(editor.crop(), Some(CropRect::full(100, 80)));

    editor.reset();
    assert_eq!(editor.crop(), Some(CropRect::full(100, 80)));
    assert_eq!(editor.scale_percent(), 100);
}

#[test]
fn reset_without_image_is_an_error_status() {
    let mut editor = EditorSession::new();
    editor.reset();
    assert_eq!(editor.status().kind, StatusKind::Error);
    assert!(editor.crop().is_none());
}

// ── Scale ─────────────────────────────────────────────────────────────────────

#[test]
fn scale_is_clamped() {
    let mut editor = EditorSession::new();
    editor.set_scale(5);
    assert_eq!(editor.scale_percent(), 10);
    editor.set_scale(900);
    assert_eq!(editor.scale_percent(), 200);
    editor.adjust_scale(-1000);
    assert_eq!(editor.scale_percent(), 10);
    editor.adjust_scale(15);
    assert_eq!(editor.scale_percent(), 25);
}

#[test]
fn resized_size_follows_crop_and_scale() {
    let mut editor = loaded("resize.png", 200, 100);
    editor.set_scale(50);
    assert_eq!(editor.resized_size(), Some((100, 50)));
    let resized = editor.resized_image().unwrap();
    assert_eq!((resized.width(), resized.height()), (100, 50));
}

// ── Pointer interaction ───────────────────────────────────────────────────────

#[test]
fn pointer_maps_label_into_image_space() {
    let mut editor = loaded("map.png", 200, 100);
    editor.set_label_size(100, 50);
    assert_eq!(editor.image_point(10, 20), Some((20, 40)));

    editor.set_label_size(0, 0);
    assert_eq!(editor.image_point(10, 20), None);
}

#[test]
fn hover_tracks_pointer() {
    let mut editor = loaded("hover.png", 200, 100);
    editor.set_label_size(100, 50);
    editor.pointer_moved(0, 0);
    assert_eq!(editor.hover(), Some(Side::TopLeft));
    editor.pointer_moved(50, 25);
    assert_eq!(editor.hover(), None);
}

#[test]
fn dragging_left_edge_through_scaled_label() {
    let mut editor = loaded("drag.png", 200, 100);
    editor.set_label_size(100, 50);

    editor.pointer_pressed(0, 25);
    assert!(editor.is_dragging());
    assert_eq!(editor.hover(), Some(Side::Left));

    editor.pointer_dragged(10, 25);
    editor.pointer_dragged(20, 25);
    editor.pointer_released();
    assert!(!editor.is_dragging());

    assert_eq!(
        editor.crop(),
        Some(CropRect {
            x1: 40,
            y1: 0,
            x2: 200,
            y2: 100
        })
    );
    let cropped = editor.cropped_image().unwrap();
    assert_eq!((cropped.width(), cropped.height()), (160, 100));
}

#[test]
fn press_away_from_edges_does_not_drag() {
    let mut editor = loaded("nodrag.png", 200, 100);
    editor.set_label_size(100, 50);
    editor.pointer_pressed(50, 25);
    assert!(!editor.is_dragging());
    editor.pointer_dragged(80, 40);
    assert_eq!(editor.crop(), Some(CropRect::full(200, 100)));
}

#[test]
fn drag_cannot_collapse_rect() {
    let mut editor = loaded("collapse.png", 100, 100);
    editor.set_label_size(100, 100);
    editor.pointer_pressed(100, 50);
    editor.pointer_dragged(-500, 50);
    editor.pointer_released();
    let crop = editor.crop().unwrap();
    assert!(crop.fits(100, 100));
    assert_eq!(crop.x2, 10);
}

// ── Save ──────────────────────────────────────────────────────────────────────

#[test]
fn save_png_writes_resized_crop() {
    let mut editor = loaded("save_src.png", 40, 20);
    editor.set_scale(50);
    let out = scratch("save_out.png");
    let saved = editor.save(&out).unwrap();
    assert_eq!(saved, out);
    assert_eq!(editor.status().kind, StatusKind::Info);

    let back = image::open(&out).unwrap();
    assert_eq!((back.width(), back.height()), (20, 10));
    let _ = std::fs::remove_file(out);
}

#[test]
fn save_jpeg_drops_alpha() {
    let path = scratch("alpha.png");
    RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 128]))
        .save(&path)
        .unwrap();
    let mut editor = EditorSession::new();
    editor.open(&path).unwrap();

    let out = scratch("alpha_out.JPG");
    editor.save(&out).unwrap();
    let back = image::open(&out).unwrap();
    assert!(matches!(back, DynamicImage::ImageRgb8(_)));
    assert_eq!((back.width(), back.height()), (16, 16));

    let _ = std::fs::remove_file(path);
    let _ = std::fs::remove_file(out);
}

#[test]
fn save_rejects_unknown_extension() {
    let mut editor = loaded("ext.png", 10, 10);
    let out = scratch("out.bmp");
    let err = editor.save(&out).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { .. }));
    assert_eq!(editor.status().kind, StatusKind::Error);
    assert!(!out.exists());
}

#[test]
fn save_without_image_fails() {
    let mut editor = EditorSession::new();
    let err = editor.save(&scratch("nothing.png")).unwrap_err();
    assert!(matches!(err, Error::NoImage));
    assert_eq!(editor.status().kind, StatusKind::Error);
}
