//! Rendering layer. All terminal I/O for the platformer lives here.
//!
//! The 800×600 world is scaled onto the terminal, leaving the last row for
//! the controls hint.  Each function receives a mutable writer and an
//! immutable view of the session; no game logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use twin_demos::compute::{continue_button, start_button, GameSession};
use twin_demos::config::{PLAYER_MAX_HEALTH, SCREEN_HEIGHT, SCREEN_WIDTH};
use twin_demos::entities::{
    Collectible, CollectibleKind, Enemy, EnemyKind, Entity, GameState, Platform, Player,
};
use twin_demos::geometry::{Rect, Scale};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::Blue;
const C_PLAYER_FLASH: Color = Color::Red;
const C_ENEMY: Color = Color::Red;
const C_BOSS: Color = Color::Magenta;
const C_PLATFORM: Color = Color::DarkYellow;
const C_PROJECTILE: Color = Color::Yellow;
const C_HEALTH_BOOST: Color = Color::Green;
const C_EXTRA_LIFE: Color = Color::Rgb { r: 255, g: 165, b: 0 };
const C_SCORE_BOOST: Color = Color::Yellow;
const C_BAR_EMPTY: Color = Color::Red;
const C_BAR_FULL: Color = Color::Green;
const C_START_BUTTON: Color = Color::Green;
const C_CONTINUE_BUTTON: Color = Color::Blue;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// The terminal area the world is drawn into.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(term_width: u16, term_height: u16) -> Self {
        Viewport {
            cols: term_width.max(1),
            rows: term_height.saturating_sub(1).max(1),
        }
    }

    fn to_world_scale(&self) -> Scale {
        Scale::between(
            self.cols as u32,
            self.rows as u32,
            SCREEN_WIDTH as u32,
            SCREEN_HEIGHT as u32,
        )
    }

    /// World coordinates under the terminal cell `(col, row)`.
    pub fn to_world(&self, col: u16, row: u16) -> (i32, i32) {
        self.to_world_scale()
            .apply_cell_center(col as i32, row as i32)
    }

    /// Cells covered by a world rectangle as `(col, row, width, height)`,
    /// clipped to the viewport.  Anything visible gets at least one cell.
    fn cells(&self, rect: Rect) -> Option<(u16, u16, u16, u16)> {
        let s = self.to_world_scale().inverse();
        let x0 = (rect.left() as f64 * s.sx).floor().max(0.0);
        let y0 = (rect.top() as f64 * s.sy).floor().max(0.0);
        let x1 = (rect.right() as f64 * s.sx).ceil().min(self.cols as f64);
        let y1 = (rect.bottom() as f64 * s.sy).ceil().min(self.rows as f64);
        if x0 >= self.cols as f64 || y0 >= self.rows as f64 || x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
    }

    fn row_of(&self, world_y: i32) -> u16 {
        let s = self.to_world_scale().inverse();
        ((world_y as f64 * s.sy) as i64).clamp(0, self.rows as i64 - 1) as u16
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match session.state {
        GameState::Menu => draw_menu(out, &view)?,
        GameState::Playing => draw_level(out, &view, session)?,
        GameState::LevelCompleted => draw_level_completed(out, &view, session)?,
        GameState::GameOver | GameState::GameWon => draw_end_screen(out, &view, session)?,
    }

    draw_controls_hint(out, &view, session.state)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows))?;
    out.flush()?;
    Ok(())
}

// ── Primitives ────────────────────────────────────────────────────────────────

fn fill_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: Rect,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row, w, h)) = view.cells(rect) else {
        return Ok(());
    };
    let line: String = std::iter::repeat(glyph).take(w as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for r in row..row + h {
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_text_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    world_y: i32,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let row = view.row_of(world_y);
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_button<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: Rect,
    label: &str,
    color: Color,
) -> std::io::Result<()> {
    fill_rect(out, view, rect, '█', color)?;
    let row = view.row_of(rect.center_y());
    let col = (view.cols / 2).saturating_sub(label.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(Color::Black))?;
    out.queue(style::SetBackgroundColor(color))?;
    out.queue(Print(label))?;
    out.queue(style::ResetColor)?;
    Ok(())
}

/// Thin bar above `rect`: green share = current / max.
fn draw_health_bar<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: Rect,
    current: u32,
    max: u32,
) -> std::io::Result<()> {
    let bar = Rect::new(rect.x, rect.y - 10, rect.w, 5);
    fill_rect(out, view, bar, '▀', C_BAR_EMPTY)?;
    let filled = if max == 0 {
        0
    } else {
        (rect.w as i64 * current as i64 / max as i64) as i32
    };
    if filled > 0 {
        fill_rect(out, view, Rect { w: filled, ..bar }, '▀', C_BAR_FULL)?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_entity<W: Write>(out: &mut W, view: &Viewport, entity: Entity<'_>) -> std::io::Result<()> {
    match entity {
        Entity::Platform(p) => draw_platform(out, view, p),
        Entity::Collectible(c) => draw_collectible(out, view, c),
        Entity::Enemy(e) => draw_enemy(out, view, e),
        Entity::Player(p) => draw_player(out, view, p),
    }
}

fn draw_platform<W: Write>(out: &mut W, view: &Viewport, platform: &Platform) -> std::io::Result<()> {
    fill_rect(out, view, platform.rect, '▓', C_PLATFORM)
}

fn draw_collectible<W: Write>(
    out: &mut W,
    view: &Viewport,
    item: &Collectible,
) -> std::io::Result<()> {
    let (glyph, color) = match item.kind {
        CollectibleKind::HealthBoost => ('+', C_HEALTH_BOOST),
        CollectibleKind::ExtraLife => ('♥', C_EXTRA_LIFE),
        CollectibleKind::ScoreBoost => ('$', C_SCORE_BOOST),
    };
    fill_rect(out, view, item.rect(), glyph, color)
}

fn draw_enemy<W: Write>(out: &mut W, view: &Viewport, enemy: &Enemy) -> std::io::Result<()> {
    let color = match enemy.kind {
        EnemyKind::Normal => C_ENEMY,
        EnemyKind::Boss => C_BOSS,
    };
    let rect = enemy.rect();
    fill_rect(out, view, rect, '█', color)?;
    draw_health_bar(out, view, rect, enemy.health, enemy.kind.max_health())
}

fn draw_player<W: Write>(out: &mut W, view: &Viewport, player: &Player) -> std::io::Result<()> {
    // Flash red in 10-frame beats while invincible
    let flashing = player.invincible_timer > 0 && (player.invincible_timer / 10) % 2 == 0;
    let color = if flashing { C_PLAYER_FLASH } else { C_PLAYER };
    let rect = player.rect();
    fill_rect(out, view, rect, '█', color)?;
    draw_health_bar(out, view, rect, player.health, PLAYER_MAX_HEALTH)?;

    for projectile in &player.projectiles {
        fill_rect(out, view, projectile.rect, '●', C_PROJECTILE)?;
    }
    Ok(())
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let cy = SCREEN_HEIGHT / 2;
    draw_text_centered(out, view, cy - 200, "The Jumper's Journey", C_TEXT)?;

    let instructions = [
        "To Start the Game: Click 'Start' or Press ENTER",
        "To Move Left: Press the LEFT ARROW key",
        "To Move Right: Press the RIGHT ARROW key",
        "To Jump: Press the SPACEBAR",
        "To Shoot: Press the F key",
        "To Restart (Game Over/Won): Press the R key",
        "To Quit (Game Over/Won): Press the Q key",
    ];
    for (i, line) in instructions.iter().enumerate() {
        draw_text_centered(out, view, cy - 120 + 30 * i as i32, line, C_TEXT)?;
    }

    draw_button(out, view, start_button(), "START GAME", C_START_BUTTON)
}

fn draw_level<W: Write>(out: &mut W, view: &Viewport, session: &GameSession) -> std::io::Result<()> {
    for entity in session.entities() {
        draw_entity(out, view, entity)?;
    }
    draw_hud(out, view, session)
}

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, session: &GameSession) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(Print(format!(
        "Score: {}  Health: {}  Lives: {}",
        session.score, session.player.health, session.player.lives
    )))?;

    let level_str = format!("Level: {}", session.level_index + 1);
    let col = view
        .cols
        .saturating_sub(level_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(Print(level_str))?;
    Ok(())
}

fn draw_level_completed<W: Write>(
    out: &mut W,
    view: &Viewport,
    session: &GameSession,
) -> std::io::Result<()> {
    let cy = SCREEN_HEIGHT / 2;
    let title = format!("Level {} Completed!", session.level_index);
    draw_text_centered(out, view, cy - 80, &title, Color::Green)?;
    draw_text_centered(out, view, cy - 20, &format!("Score: {}", session.score), C_TEXT)?;
    draw_button(out, view, continue_button(), "CONTINUE", C_CONTINUE_BUTTON)
}

fn draw_end_screen<W: Write>(
    out: &mut W,
    view: &Viewport,
    session: &GameSession,
) -> std::io::Result<()> {
    let (main, main_color, sub) = if session.state == GameState::GameWon {
        ("CONGRATULATIONS!", Color::Green, "You completed all levels!")
    } else {
        ("GAME OVER", Color::Red, "Better luck next time!")
    };

    let cy = SCREEN_HEIGHT / 2;
    draw_text_centered(out, view, cy - 80, main, main_color)?;
    draw_text_centered(out, view, cy - 20, sub, C_TEXT)?;
    draw_text_centered(out, view, cy + 40, &format!("Final Score: {}", session.score), C_TEXT)?;
    draw_text_centered(out, view, cy + 100, "Press 'R' to Restart", C_TEXT)?;
    draw_text_centered(out, view, cy + 140, "Press 'Q' to Quit", C_TEXT)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: GameState,
) -> std::io::Result<()> {
    let hint = match state {
        GameState::Menu => "ENTER / click : Start   ESC : Quit",
        GameState::Playing => "← → : Move   SPACE : Jump   F : Shoot   ESC : Quit",
        GameState::LevelCompleted => "ENTER / click : Continue   ESC : Quit",
        GameState::GameOver | GameState::GameWon => "R : Restart   Q : Quit",
    };
    out.queue(cursor::MoveTo(1, view.rows))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
