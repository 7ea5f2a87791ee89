mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};

use twin_demos::compute::{click, new_session, press_key, tick, GameKey, HeldKeys};
use twin_demos::config::{RuntimeConfig, FPS};
use twin_demos::logging;

use display::Viewport;

const FRAME: Duration = Duration::from_micros(1_000_000 / FPS);

/// Frames an arrow key stays "down" after its last press or repeat event.
/// Terminals without release events only send auto-repeats (15 Hz or
/// faster), which refresh this window before it lapses.
const HOLD_WINDOW: u64 = 8;

/// Whether `key` was pressed or repeated within `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// One-shot keys; arrows are sampled through `is_held` instead.
fn game_key(code: KeyCode) -> Option<GameKey> {
    match code {
        KeyCode::Enter => Some(GameKey::Enter),
        KeyCode::Char(' ') => Some(GameKey::Jump),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(GameKey::Fire),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameKey::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(GameKey::Quit),
        KeyCode::Esc => Some(GameKey::Escape),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the session asks to quit.
///
/// Input model: every press/repeat records the frame it was seen in
/// `key_frame`; each frame the arrows still "fresh" there are applied as
/// held movement, while one-shot keys (jump, fire, menu keys) act on the
/// press itself.  Release events, where the terminal sends them, drop the
/// key immediately.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut session = new_session();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Input ─────────────────────────────────────────────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                            session.quit = true;
                        } else if let Some(key) = game_key(code) {
                            session = press_key(&session, key);
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    let (width, height) = terminal::size()?;
                    let (x, y) = Viewport::new(width, height).to_world(column, row);
                    session = click(&session, x, y);
                }
                _ => {}
            }

            if session.quit {
                info!("quit requested, final score {}", session.score);
                return Ok(());
            }
        }

        let held = HeldKeys {
            left: is_held(&key_frame, &KeyCode::Left, frame),
            right: is_held(&key_frame, &KeyCode::Right, frame),
        };
        session = tick(&session, held);

        display::render(out, &session)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let config = RuntimeConfig::from_env();
    if let Err(err) = logging::init(&config) {
        eprintln!("logging disabled: {err}");
    }
    info!("starting The Jumper's Journey");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Ask for release events so held arrows stop promptly where supported.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread; the frame loop only polls.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                warn!("input thread stopped: {err}");
                break;
            }
        }
    });

    let result = run(&mut out, &rx);

    // Restore the terminal whatever run() returned
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
