//! Editing session for the crop editor: the loaded image, its crop
//! rectangle, the resize percentage, pointer interaction and the status
//! line.  The front end feeds pointer positions in label space (the area
//! the image is drawn into) and reads derived images back out.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use log::{debug, info, warn};

use crate::config::DEFAULT_SCALE_PERCENT;
use crate::crop::{self, CropRect, Side};
use crate::error::{Error, Result};
use crate::geometry::Scale;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

impl Status {
    fn info(text: impl Into<String>) -> Self {
        Status {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Status {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DragState {
    side: Side,
    /// Last pointer position in image space.
    last: (i32, i32),
}

pub struct EditorSession {
    image: Option<DynamicImage>,
    crop: Option<CropRect>,
    scale_percent: u32,
    label_size: (u32, u32),
    hover: Option<Side>,
    drag: Option<DragState>,
    status: Status,
    /// Bumped on every successful `open`.
    generation: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        EditorSession {
            image: None,
            crop: None,
            scale_percent: DEFAULT_SCALE_PERCENT,
            label_size: (0, 0),
            hover: None,
            drag: None,
            status: Status::info("Open an image with Ctrl+O"),
            generation: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    pub fn crop(&self) -> Option<CropRect> {
        self.crop
    }

    pub fn scale_percent(&self) -> u32 {
        self.scale_percent
    }

    pub fn hover(&self) -> Option<Side> {
        self.hover
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn label_size(&self) -> (u32, u32) {
        self.label_size
    }

    /// Identifies the loaded image; changes whenever a new one is opened,
    /// even if it has the same size as the last.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ── File operations ───────────────────────────────────────────────────────

    /// Load an image and select all of it.  On failure the current image is
    /// kept and the error is also shown in the status line.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let loaded = image::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        });
        let loaded = loaded.and_then(|img| {
            if img.width() == 0 || img.height() == 0 {
                Err(Error::EmptyImage {
                    path: path.to_path_buf(),
                })
            } else {
                Ok(img)
            }
        });
        let img = match loaded {
            Ok(img) => img,
            Err(err) => {
                warn!("{err}");
                self.status = Status::error(err.to_string());
                return Err(err);
            }
        };

        let (w, h) = (img.width(), img.height());
        info!("opened {} ({}x{})", path.display(), w, h);
        self.crop = Some(CropRect::full(w, h));
        self.image = Some(img);
        self.generation += 1;
        self.scale_percent = DEFAULT_SCALE_PERCENT;
        self.hover = None;
        self.drag = None;
        self.status = Status::info(format!("Loaded {} ({}×{})", display_name(path), w, h));
        Ok(())
    }

    /// Write the resized crop.  The encoder is chosen from the extension:
    /// `.png`, `.jpg` or `.jpeg`.
    pub fn save(&mut self, path: &Path) -> Result<PathBuf> {
        let result = self.write_resized(path);
        match &result {
            Ok(saved) => {
                info!("saved {}", saved.display());
                self.status = Status::info(format!("Saved {}", display_name(saved)));
            }
            Err(err) => {
                warn!("{err}");
                self.status = Status::error(err.to_string());
            }
        }
        result
    }

    fn write_resized(&self, path: &Path) -> Result<PathBuf> {
        let resized = self.resized_image().ok_or(Error::NoImage)?;
        let format = output_format(path)?;
        let encoded = match format {
            // The JPEG encoder rejects alpha channels.
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8()),
            _ => resized,
        };
        encoded
            .save_with_format(path, format)
            .map_err(|source| Error::Save {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(path.to_path_buf())
    }

    /// Select the whole image again and restore 100 %.
    pub fn reset(&mut self) {
        let Some(img) = &self.image else {
            self.status = Status::error(Error::NoImage.to_string());
            return;
        };
        self.crop = Some(CropRect::full(img.width(), img.height()));
        self.scale_percent = DEFAULT_SCALE_PERCENT;
        self.drag = None;
        self.hover = None;
        self.status = Status::info("Crop reset");
        debug!("crop reset");
    }

    // ── Resize slider ─────────────────────────────────────────────────────────

    pub fn set_scale(&mut self, percent: u32) {
        self.scale_percent = crop::clamp_scale(percent);
    }

    pub fn adjust_scale(&mut self, delta: i32) {
        let next = (self.scale_percent as i64 + delta as i64).max(0) as u32;
        self.set_scale(next);
    }

    // ── Pointer interaction (label space) ────────────────────────────────────

    /// Record the size of the area the image is currently drawn into.
    pub fn set_label_size(&mut self, width: u32, height: u32) {
        self.label_size = (width, height);
    }

    /// Map a label-space point into image pixels.
    pub fn image_point(&self, lx: i32, ly: i32) -> Option<(i32, i32)> {
        let img = self.image.as_ref()?;
        let (lw, lh) = self.label_size;
        if lw == 0 || lh == 0 {
            return None;
        }
        Some(Scale::between(lw, lh, img.width(), img.height()).apply(lx, ly))
    }

    /// Pointer moved with no button held: refresh the hovered side.
    pub fn pointer_moved(&mut self, lx: i32, ly: i32) {
        self.hover = match (self.crop, self.image_point(lx, ly)) {
            (Some(rect), Some((px, py))) => crop::hover_side(&rect, px, py),
            _ => None,
        };
    }

    /// Button pressed: start dragging whatever side is under the pointer.
    pub fn pointer_pressed(&mut self, lx: i32, ly: i32) {
        self.pointer_moved(lx, ly);
        self.drag = match (self.hover, self.image_point(lx, ly)) {
            (Some(side), Some(last)) => Some(DragState { side, last }),
            _ => None,
        };
    }

    /// Pointer moved with the button held.
    pub fn pointer_dragged(&mut self, lx: i32, ly: i32) {
        let (Some(state), Some(rect), Some(img), Some(point)) =
            (self.drag, self.crop, self.image.as_ref(), self.image_point(lx, ly))
        else {
            return;
        };
        let (dx, dy) = (point.0 - state.last.0, point.1 - state.last.1);
        self.crop = Some(crop::drag(&rect, state.side, dx, dy, img.width(), img.height()));
        self.drag = Some(DragState {
            last: point,
            ..state
        });
    }

    pub fn pointer_released(&mut self) {
        if let Some(state) = self.drag.take() {
            debug!("drag of {:?} finished at {:?}", state.side, self.crop);
        }
    }

    // ── Derived images ────────────────────────────────────────────────────────

    pub fn cropped_image(&self) -> Option<DynamicImage> {
        let img = self.image.as_ref()?;
        let rect = self.crop?;
        Some(img.crop_imm(rect.x1 as u32, rect.y1 as u32, rect.width(), rect.height()))
    }

    /// Size the resized image will have at the current percentage.
    pub fn resized_size(&self) -> Option<(u32, u32)> {
        let rect = self.crop?;
        self.image.as_ref()?;
        Some(crop::scaled_size(rect.width(), rect.height(), self.scale_percent))
    }

    pub fn resized_image(&self) -> Option<DynamicImage> {
        let cropped = self.cropped_image()?;
        let (w, h) = self.resized_size()?;
        if (w, h) == (cropped.width(), cropped.height()) {
            return Some(cropped);
        }
        Some(cropped.resize_exact(w, h, FilterType::Triangle))
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn output_format(path: &Path) -> Result<ImageFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => Ok(ImageFormat::Png),
        Some("jpg") | Some("jpeg") => Ok(ImageFormat::Jpeg),
        _ => Err(Error::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}
