//! Rendering layer for the crop editor.
//!
//! Images are drawn with upper-half blocks: each terminal cell shows two
//! vertically stacked pixels (foreground = top, background = bottom), so a
//! label `w` cells wide and `r` rows tall is `w × 2r` label pixels.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use image::{DynamicImage, GenericImageView};
use twin_demos::crop::{CropRect, Side};
use twin_demos::editor::{EditorSession, StatusKind};
use twin_demos::geometry::Scale;

use crate::Prompt;

const C_TITLE: Color = Color::Cyan;
const C_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_ERROR: Color = Color::Red;
const C_OUTLINE: Color = Color::White;
const C_OUTLINE_ACTIVE: Color = Color::Yellow;

// ── Layout ────────────────────────────────────────────────────────────────────

/// Where things go for the current terminal size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Top-left cell of the image label.
    pub label_origin: (u16, u16),
    /// Label size in label pixels (two per cell vertically).
    pub label_size: (u32, u32),
    /// Top-left cell and size in cells of the preview pane.
    pub preview_origin: (u16, u16),
    pub preview_cells: (u16, u16),
    pub info_row: u16,
    pub status_row: u16,
}

impl Layout {
    pub fn compute(term_width: u16, term_height: u16, image: Option<&DynamicImage>) -> Self {
        let pane_rows = term_height.saturating_sub(4).max(1);
        let label_cols = (term_width as u32 * 2 / 3).max(1);
        let preview_cols = term_width.saturating_sub(label_cols as u16 + 2);

        let label_size = match image {
            Some(img) => fit(img.width(), img.height(), label_cols, pane_rows as u32 * 2),
            None => (label_cols, pane_rows as u32 * 2),
        };

        Layout {
            label_origin: (0, 1),
            label_size,
            preview_origin: (label_cols as u16 + 2, 1),
            preview_cells: (preview_cols, pane_rows),
            info_row: term_height.saturating_sub(2),
            status_row: term_height.saturating_sub(1),
        }
    }

    /// Label pixel under the terminal cell `(col, row)`; may fall outside
    /// the label when the pointer is beyond the image.
    pub fn label_point(&self, col: u16, row: u16) -> (i32, i32) {
        (
            col as i32 - self.label_origin.0 as i32,
            (row as i32 - self.label_origin.1 as i32) * 2,
        )
    }
}

/// Largest size with the image's aspect ratio that fits `max_w × max_h`.
fn fit(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (max_w.max(1), max_h.max(1));
    }
    let f = (max_w as f64 / width as f64).min(max_h as f64 / height as f64);
    (
        ((width as f64 * f) as u32).max(1),
        ((height as f64 * f) as u32).max(1),
    )
}

// ── Public entry point ────────────────────────────────────────────────────────

pub fn render<W: Write>(
    out: &mut W,
    editor: &EditorSession,
    layout: &Layout,
    preview: Option<&DynamicImage>,
    prompt: Option<&Prompt>,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print("Crop Editor"))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "   Ctrl+O open  Ctrl+S save  Ctrl+R reset  +/- scale  drag edges to crop  Esc quit",
    ))?;

    if let (Some(img), Some(crop)) = (editor.image(), editor.crop()) {
        draw_picture(out, layout.label_origin, layout.label_size, img, Some(crop))?;
        let active = editor.hover();
        draw_outline(out, layout, img, &crop, active)?;
    }

    if let Some(resized) = preview {
        let (cols, rows) = layout.preview_cells;
        if cols > 0 {
            let size = fit(resized.width(), resized.height(), cols as u32, rows as u32 * 2);
            draw_picture(out, layout.preview_origin, size, resized, None)?;
        }
    }

    draw_info(out, editor, layout)?;

    match prompt {
        Some(p) => draw_prompt(out, layout, p)?,
        None => draw_status(out, editor, layout)?,
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Pictures ──────────────────────────────────────────────────────────────────

fn draw_picture<W: Write>(
    out: &mut W,
    origin: (u16, u16),
    size: (u32, u32),
    img: &DynamicImage,
    crop: Option<CropRect>,
) -> std::io::Result<()> {
    let (lw, lh) = size;
    let to_image = Scale::between(lw, lh, img.width(), img.height());

    for row in 0..(lh + 1) / 2 {
        out.queue(cursor::MoveTo(origin.0, origin.1 + row as u16))?;
        for col in 0..lw {
            let top = sample(img, &to_image, col, row * 2, crop);
            let bottom = if row * 2 + 1 < lh {
                sample(img, &to_image, col, row * 2 + 1, crop)
            } else {
                Color::Reset
            };
            out.queue(style::SetForegroundColor(top))?;
            out.queue(style::SetBackgroundColor(bottom))?;
            out.queue(Print('▀'))?;
        }
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

/// Colour of the image pixel under a label pixel.  Pixels outside the crop
/// are dimmed.
fn sample(img: &DynamicImage, to_image: &Scale, lx: u32, ly: u32, crop: Option<CropRect>) -> Color {
    let (x, y) = to_image.apply(lx as i32, ly as i32);
    let x = x.clamp(0, img.width() as i32 - 1);
    let y = y.clamp(0, img.height() as i32 - 1);
    let [r, g, b, a] = img.get_pixel(x as u32, y as u32).0;

    let alpha = |c: u8| (c as u16 * a as u16 / 255) as u8;
    let (mut r, mut g, mut b) = (alpha(r), alpha(g), alpha(b));

    if crop.is_some_and(|c| !c.to_rect().contains_point(x, y)) {
        r /= 3;
        g /= 3;
        b /= 3;
    }
    Color::Rgb { r, g, b }
}

// ── Crop outline ──────────────────────────────────────────────────────────────

fn draw_outline<W: Write>(
    out: &mut W,
    layout: &Layout,
    img: &DynamicImage,
    crop: &CropRect,
    active: Option<Side>,
) -> std::io::Result<()> {
    let (lw, lh) = layout.label_size;
    let to_label = Scale::between(img.width(), img.height(), lw, lh);
    let (lx1, ly1) = to_label.apply(crop.x1, crop.y1);
    let (lx2, ly2) = to_label.apply(crop.x2, crop.y2);

    let (ox, oy) = (layout.label_origin.0 as i32, layout.label_origin.1 as i32);
    let left = ox + lx1;
    let right = ox + (lx2 - 1).max(lx1);
    let top = oy + ly1 / 2;
    let bottom = oy + ((ly2 - 1).max(ly1)) / 2;

    let color = |lit: bool| if lit { C_OUTLINE_ACTIVE } else { C_OUTLINE };
    let lit_left = active.is_some_and(|s| s.moves_left());
    let lit_right = active.is_some_and(|s| s.moves_right());
    let lit_top = active.is_some_and(|s| s.moves_top());
    let lit_bottom = active.is_some_and(|s| s.moves_bottom());

    out.queue(style::SetBackgroundColor(Color::Black))?;

    for col in left + 1..right {
        put(out, col, top, '─', color(lit_top))?;
        put(out, col, bottom, '─', color(lit_bottom))?;
    }
    for row in top + 1..bottom {
        put(out, left, row, '│', color(lit_left))?;
        put(out, right, row, '│', color(lit_right))?;
    }
    put(out, left, top, '┌', color(lit_left && lit_top))?;
    put(out, right, top, '┐', color(lit_right && lit_top))?;
    put(out, left, bottom, '└', color(lit_left && lit_bottom))?;
    put(out, right, bottom, '┘', color(lit_right && lit_bottom))?;

    out.queue(style::ResetColor)?;
    Ok(())
}

fn put<W: Write>(out: &mut W, col: i32, row: i32, glyph: char, color: Color) -> std::io::Result<()> {
    if col < 0 || row < 0 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Text rows ─────────────────────────────────────────────────────────────────

fn draw_info<W: Write>(out: &mut W, editor: &EditorSession, layout: &Layout) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, layout.info_row))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    match (editor.crop(), editor.resized_size()) {
        (Some(c), Some((w, h))) => {
            out.queue(Print(format!(
                "Crop ({}, {}) – ({}, {})  {}×{}   Scale {:>3}%  →  {}×{}",
                c.x1,
                c.y1,
                c.x2,
                c.y2,
                c.width(),
                c.height(),
                editor.scale_percent(),
                w,
                h
            )))?;
        }
        _ => {
            out.queue(Print(format!("Scale {:>3}%", editor.scale_percent())))?;
        }
    }
    Ok(())
}

fn draw_status<W: Write>(out: &mut W, editor: &EditorSession, layout: &Layout) -> std::io::Result<()> {
    let status = editor.status();
    let color = match status.kind {
        StatusKind::Info => C_TEXT,
        StatusKind::Error => C_ERROR,
    };
    out.queue(cursor::MoveTo(0, layout.status_row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(&status.text))?;
    Ok(())
}

fn draw_prompt<W: Write>(out: &mut W, layout: &Layout, prompt: &Prompt) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, layout.status_row))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(prompt.label()))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(Print(&prompt.input))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("   (Enter to confirm, Esc to cancel)"))?;
    Ok(())
}
