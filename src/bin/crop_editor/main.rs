mod view;

use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use image::DynamicImage;
use log::info;

use twin_demos::config::RuntimeConfig;
use twin_demos::crop::CropRect;
use twin_demos::editor::EditorSession;
use twin_demos::logging;

use view::Layout;

/// Scale change per key press, in percent.
const SCALE_STEP: i32 = 5;

// ── Path prompt (stands in for the open/save dialogs) ────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptAction {
    Open,
    Save,
}

#[derive(Clone, Debug)]
pub struct Prompt {
    pub action: PromptAction,
    pub input: String,
}

impl Prompt {
    pub fn label(&self) -> &'static str {
        match self.action {
            PromptAction::Open => "Open image: ",
            PromptAction::Save => "Save as (.png/.jpg): ",
        }
    }
}

/// Default save target next to the source: `<stem>_cropped.png`.
fn suggested_save_path(source: Option<&Path>) -> String {
    let Some(source) = source else {
        return "cropped.png".to_string();
    };
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    source
        .with_file_name(format!("{stem}_cropped.png"))
        .display()
        .to_string()
}

// ── Resized preview cache ─────────────────────────────────────────────────────

/// Resizing is the expensive part of a redraw, so the preview is only
/// rebuilt when the image, the crop or the scale changes.
#[derive(Default)]
struct Preview {
    key: Option<(u64, CropRect, u32)>,
    image: Option<DynamicImage>,
}

impl Preview {
    fn refresh(&mut self, editor: &EditorSession) -> Option<&DynamicImage> {
        let key = editor
            .crop()
            .filter(|_| editor.image().is_some())
            .map(|crop| (editor.generation(), crop, editor.scale_percent()));
        if key != self.key {
            self.key = key;
            self.image = editor.resized_image();
        }
        self.image.as_ref()
    }
}

// ── Event handling ────────────────────────────────────────────────────────────

struct App {
    editor: EditorSession,
    prompt: Option<Prompt>,
    source: Option<PathBuf>,
    layout: Layout,
    quit: bool,
}

impl App {
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if self.prompt.is_some() {
            self.handle_prompt_key(code);
            return;
        }

        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        match code {
            KeyCode::Char('o') if ctrl => {
                self.prompt = Some(Prompt {
                    action: PromptAction::Open,
                    input: String::new(),
                });
            }
            KeyCode::Char('s') if ctrl => {
                self.prompt = Some(Prompt {
                    action: PromptAction::Save,
                    input: suggested_save_path(self.source.as_deref()),
                });
            }
            KeyCode::Char('r') if ctrl => self.editor.reset(),
            KeyCode::Char('q') | KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up | KeyCode::Right => {
                self.editor.adjust_scale(SCALE_STEP)
            }
            KeyCode::Char('-') | KeyCode::Down | KeyCode::Left => {
                self.editor.adjust_scale(-SCALE_STEP)
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.run_prompt(prompt);
                }
            }
            KeyCode::Esc => self.prompt = None,
            KeyCode::Backspace => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.input.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.input.push(c);
                }
            }
            _ => {}
        }
    }

    fn run_prompt(&mut self, prompt: Prompt) {
        let path = PathBuf::from(prompt.input.trim());
        if path.as_os_str().is_empty() {
            return;
        }
        match prompt.action {
            PromptAction::Open => {
                if self.editor.open(&path).is_ok() {
                    self.source = Some(path);
                }
            }
            // Failures are already on the status line.
            PromptAction::Save => {
                let _ = self.editor.save(&path);
            }
        }
    }

    fn handle_mouse(&mut self, ev: MouseEvent) {
        if self.prompt.is_some() {
            return;
        }
        let (lx, ly) = self.layout.label_point(ev.column, ev.row);
        match ev.kind {
            MouseEventKind::Moved => self.editor.pointer_moved(lx, ly),
            MouseEventKind::Down(MouseButton::Left) => self.editor.pointer_pressed(lx, ly),
            MouseEventKind::Drag(MouseButton::Left) => self.editor.pointer_dragged(lx, ly),
            MouseEventKind::Up(MouseButton::Left) => self.editor.pointer_released(),
            _ => {}
        }
    }

    fn relayout(&mut self) -> std::io::Result<()> {
        let (width, height) = terminal::size()?;
        self.layout = Layout::compute(width, height, self.editor.image());
        let (lw, lh) = self.layout.label_size;
        self.editor.set_label_size(lw, lh);
        Ok(())
    }
}

/// Block on the next terminal event, react, redraw.  Nothing happens
/// between events.
fn run<W: Write>(out: &mut W, initial: Option<PathBuf>) -> std::io::Result<()> {
    let mut app = App {
        editor: EditorSession::new(),
        prompt: None,
        source: None,
        layout: Layout::compute(1, 1, None),
        quit: false,
    };
    let mut preview = Preview::default();

    if let Some(path) = initial {
        if app.editor.open(&path).is_ok() {
            app.source = Some(path);
        }
    }

    loop {
        app.relayout()?;
        let resized = preview.refresh(&app.editor);
        view::render(out, &app.editor, &app.layout, resized, app.prompt.as_ref())?;

        match event::read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => app.handle_key(code, modifiers),
            Event::Mouse(ev) => app.handle_mouse(ev),
            _ => {}
        }

        if app.quit {
            info!("crop editor closed");
            return Ok(());
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let config = RuntimeConfig::from_env();
    if let Err(err) = logging::init(&config) {
        eprintln!("logging disabled: {err}");
    }
    info!("starting crop editor");

    let initial = std::env::args_os().nth(1).map(PathBuf::from);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    let result = run(&mut out, initial);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn solid_png(name: &str, width: u32, height: u32, rgb: [u8; 3]) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "crop_editor_{}_{}",
            std::process::id(),
            name
        ));
        RgbImage::from_pixel(width, height, Rgb(rgb))
            .save(&path)
            .unwrap();
        path
    }

    fn corner_colour(img: &DynamicImage) -> [u8; 3] {
        img.to_rgb8().get_pixel(0, 0).0
    }

    fn new_app() -> App {
        App {
            editor: EditorSession::new(),
            prompt: None,
            source: None,
            layout: Layout::compute(80, 24, None),
            quit: false,
        }
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_key(KeyCode::Char(c), KeyModifiers::CONTROL);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    // ── Preview cache ─────────────────────────────────────────────────────────

    #[test]
    fn preview_empty_without_image() {
        let mut preview = Preview::default();
        assert!(preview.refresh(&EditorSession::new()).is_none());
    }

    #[test]
    fn preview_shows_newly_opened_image_of_same_size() {
        let red = solid_png("red.png", 20, 20, [255, 0, 0]);
        let blue = solid_png("blue.png", 20, 20, [0, 0, 255]);
        let mut editor = EditorSession::new();
        let mut preview = Preview::default();

        editor.open(&red).unwrap();
        assert_eq!(corner_colour(preview.refresh(&editor).unwrap()), [255, 0, 0]);

        editor.open(&blue).unwrap();
        assert_eq!(corner_colour(preview.refresh(&editor).unwrap()), [0, 0, 255]);

        let _ = std::fs::remove_file(red);
        let _ = std::fs::remove_file(blue);
    }

    #[test]
    fn preview_follows_crop_and_scale() {
        let path = solid_png("follow.png", 20, 20, [10, 200, 10]);
        let mut editor = EditorSession::new();
        editor.open(&path).unwrap();
        let mut preview = Preview::default();
        let size = |p: &mut Preview, e: &EditorSession| {
            p.refresh(e).map(|img| (img.width(), img.height()))
        };

        assert_eq!(size(&mut preview, &editor), Some((20, 20)));

        editor.set_scale(50);
        assert_eq!(size(&mut preview, &editor), Some((10, 10)));

        editor.set_label_size(20, 20);
        editor.pointer_pressed(0, 10);
        editor.pointer_dragged(5, 10);
        editor.pointer_released();
        assert_eq!(size(&mut preview, &editor), Some((7, 10)));

        let _ = std::fs::remove_file(path);
    }

    // ── Save path suggestion ──────────────────────────────────────────────────

    #[test]
    fn suggested_path_sits_next_to_source() {
        let suggested = suggested_save_path(Some(Path::new("/tmp/photos/cat.jpg")));
        assert_eq!(PathBuf::from(suggested), PathBuf::from("/tmp/photos/cat_cropped.png"));
    }

    #[test]
    fn suggested_path_without_source() {
        assert_eq!(suggested_save_path(None), "cropped.png");
    }

    // ── Layout ────────────────────────────────────────────────────────────────

    #[test]
    fn label_point_is_relative_to_origin_with_two_pixels_per_row() {
        let layout = Layout {
            label_origin: (3, 2),
            ..Layout::compute(80, 24, None)
        };
        assert_eq!(layout.label_point(3, 2), (0, 0));
        assert_eq!(layout.label_point(13, 7), (10, 10));
        assert_eq!(layout.label_point(2, 1), (-1, -2));
    }

    // ── Keys and prompt ───────────────────────────────────────────────────────

    #[test]
    fn prompt_collects_and_edits_input() {
        let mut app = new_app();
        ctrl(&mut app, 'o');
        assert_eq!(app.prompt.as_ref().map(|p| p.action), Some(PromptAction::Open));

        type_text(&mut app, "abc");
        app.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(app.prompt.as_ref().map(|p| p.input.as_str()), Some("ab"));
    }

    #[test]
    fn escape_cancels_prompt_before_quitting() {
        let mut app = new_app();
        ctrl(&mut app, 's');
        assert_eq!(
            app.prompt.as_ref().map(|p| p.input.as_str()),
            Some("cropped.png")
        );

        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.prompt.is_none());
        assert!(!app.quit);

        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.quit);
    }

    #[test]
    fn open_prompt_loads_image_and_remembers_source() {
        let path = solid_png("prompt.png", 12, 8, [1, 2, 3]);
        let mut app = new_app();
        ctrl(&mut app, 'o');
        type_text(&mut app, &path.display().to_string());
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert!(app.prompt.is_none());
        assert_eq!(app.source.as_deref(), Some(path.as_path()));
        assert_eq!(app.editor.crop(), Some(CropRect::full(12, 8)));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn save_prompt_without_image_reports_error() {
        let mut app = new_app();
        ctrl(&mut app, 's');
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.prompt.is_none());
        assert_eq!(
            app.editor.status().kind,
            twin_demos::editor::StatusKind::Error
        );
    }

    #[test]
    fn scale_keys_step_by_five() {
        let mut app = new_app();
        app.handle_key(KeyCode::Char('+'), KeyModifiers::NONE);
        assert_eq!(app.editor.scale_percent(), 105);
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.editor.scale_percent(), 95);
    }
}
