//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameSession` (or one of its entities) and returns a brand-new value.
//! The front end owns the only mutable binding and swaps in the result.

use log::{debug, info, warn};

use crate::config::{
    BUTTON_HEIGHT, BUTTON_WIDTH, CONTINUE_BUTTON_Y, ENEMY_FALL, GRAVITY, INVINCIBLE_FRAMES,
    JUMP_POWER, PLAYER_HEIGHT, PLAYER_MAX_HEALTH, PLAYER_SPEED, PLAYER_WIDTH, SCORE_ENEMY_KILL,
    SCORE_EXTRA_LIFE, SCORE_HEALTH_BOOST, SCREEN_HEIGHT, SCREEN_WIDTH, SPAWN_X, SPAWN_Y,
    START_BUTTON_Y,
};
use crate::entities::{
    Collectible, CollectibleKind, Enemy, EnemyKind, Entity, GameState, Platform, Player,
    Projectile,
};
use crate::geometry::Rect;
use crate::levels::{level_data, LevelSpec};

// ── Session ──────────────────────────────────────────────────────────────────

/// Everything one run of the game needs.  Passed explicitly to every
/// update instead of living in globals.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub state: GameState,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    pub score: u32,
    /// Index of the level being played, or of the next level once one has
    /// been completed.
    pub level_index: usize,
    pub levels: Vec<LevelSpec>,
    /// Set once the player asked to leave; the front end exits on it.
    pub quit: bool,
}

impl GameSession {
    /// Draw order: platforms, collectibles, enemies, then the player.
    pub fn entities(&self) -> Vec<Entity<'_>> {
        let mut out = Vec::with_capacity(
            self.platforms.len() + self.collectibles.len() + self.enemies.len() + 1,
        );
        out.extend(self.platforms.iter().map(Entity::Platform));
        out.extend(self.collectibles.iter().map(Entity::Collectible));
        out.extend(self.enemies.iter().map(Entity::Enemy));
        out.push(Entity::Player(&self.player));
        out
    }

    pub fn is_last_level(&self) -> bool {
        self.level_index + 1 >= self.levels.len()
    }
}

/// Discrete key presses the game reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameKey {
    Enter,
    Jump,
    Fire,
    Restart,
    Quit,
    Escape,
}

/// Keys sampled every frame while held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Still invincible from an earlier hit.
    Ignored,
    Hurt,
    /// Health ran out but lives remain; health was refilled.
    LifeLost,
    /// Last life gone.
    Dead,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// A session sitting on the title menu, using the built-in levels.
pub fn new_session() -> GameSession {
    new_session_with_levels(level_data())
}

pub fn new_session_with_levels(levels: Vec<LevelSpec>) -> GameSession {
    GameSession {
        state: GameState::Menu,
        player: Player::new(SPAWN_X, SPAWN_Y),
        platforms: Vec::new(),
        enemies: Vec::new(),
        collectibles: Vec::new(),
        score: 0,
        level_index: 0,
        levels,
        quit: false,
    }
}

/// Fresh run: new player, zero score, first level, playing.
pub fn init_game(state: &GameSession) -> GameSession {
    let fresh = GameSession {
        player: Player::new(SPAWN_X, SPAWN_Y),
        score: 0,
        quit: false,
        ..state.clone()
    };
    let mut next = load_level(&fresh, 0);
    set_state(&mut next, GameState::Playing);
    next
}

/// Put the player back on the spawn point, standing still with nothing in
/// flight.  Level entities are untouched: enemies defeated before a lost
/// life stay gone.
pub fn respawn(state: &GameSession) -> GameSession {
    GameSession {
        player: Player {
            x: SPAWN_X,
            y: SPAWN_Y,
            y_velocity: 0.0,
            is_jumping: false,
            projectiles: Vec::new(),
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Replace the level entities with a fresh copy of level `index` and put
/// the player back on the spawn point.  Health, lives and score carry over.
pub fn load_level(state: &GameSession, index: usize) -> GameSession {
    let Some(level) = state.levels.get(index) else {
        warn!("level {} does not exist ({} levels)", index, state.levels.len());
        return state.clone();
    };

    let mut enemies = level.enemies.clone();
    enemies.extend(level.boss.clone());

    info!("loading level {}", index + 1);
    respawn(&GameSession {
        platforms: level.platforms.clone(),
        enemies,
        collectibles: level.collectibles.clone(),
        level_index: index,
        ..state.clone()
    })
}

fn set_state(session: &mut GameSession, state: GameState) {
    if session.state != state {
        info!("state {:?} -> {:?}", session.state, state);
        session.state = state;
    }
}

// ── Menu buttons ─────────────────────────────────────────────────────────────

pub fn start_button() -> Rect {
    Rect::new(
        (SCREEN_WIDTH - BUTTON_WIDTH) / 2,
        START_BUTTON_Y,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

pub fn continue_button() -> Rect {
    Rect::new(
        (SCREEN_WIDTH - BUTTON_WIDTH) / 2,
        CONTINUE_BUTTON_Y,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

// ── Input-driven state transitions ───────────────────────────────────────────

pub fn press_key(state: &GameSession, key: GameKey) -> GameSession {
    use GameState::*;

    match (state.state, key) {
        (_, GameKey::Escape) | (GameOver | GameWon, GameKey::Quit) => GameSession {
            quit: true,
            ..state.clone()
        },
        (Menu, GameKey::Enter) | (GameOver | GameWon, GameKey::Restart) => init_game(state),
        (LevelCompleted, GameKey::Enter) => continue_level(state),
        (Playing, GameKey::Jump) => GameSession {
            player: jump(&state.player),
            ..state.clone()
        },
        (Playing, GameKey::Fire) => GameSession {
            player: shoot(&state.player),
            ..state.clone()
        },
        _ => state.clone(),
    }
}

/// A mouse click at world coordinates `(x, y)`.
pub fn click(state: &GameSession, x: i32, y: i32) -> GameSession {
    match state.state {
        GameState::Menu if start_button().contains_point(x, y) => init_game(state),
        GameState::LevelCompleted if continue_button().contains_point(x, y) => {
            continue_level(state)
        }
        _ => state.clone(),
    }
}

fn continue_level(state: &GameSession) -> GameSession {
    let mut next = load_level(state, state.level_index);
    set_state(&mut next, GameState::Playing);
    next
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Step horizontally by `dx` speed units and face that way.
pub fn move_player(player: &Player, dx: i32) -> Player {
    Player {
        x: player.x + dx as f32 * PLAYER_SPEED,
        direction: if dx == 0 { player.direction } else { dx.signum() },
        ..player.clone()
    }
}

pub fn jump(player: &Player) -> Player {
    if player.is_jumping {
        return player.clone();
    }
    Player {
        y_velocity: JUMP_POWER,
        is_jumping: true,
        ..player.clone()
    }
}

pub fn shoot(player: &Player) -> Player {
    let rect = player.rect();
    let mut projectiles = player.projectiles.clone();
    projectiles.push(Projectile::new(
        rect.center_x(),
        rect.center_y() - 10,
        player.direction,
    ));
    Player {
        projectiles,
        ..player.clone()
    }
}

/// Gravity, platform resolution (vertical only), screen clamping,
/// invincibility countdown and projectile flight.
pub fn update_player(player: &Player, platforms: &[Platform]) -> Player {
    let mut next = player.clone();
    next.y_velocity += GRAVITY;
    next.y += next.y_velocity;

    for platform in platforms {
        if !next.rect().collides(&platform.rect) {
            continue;
        }
        if next.y_velocity > 0.0 {
            next.y = (platform.rect.top() - PLAYER_HEIGHT) as f32;
            next.is_jumping = false;
            next.y_velocity = 0.0;
        } else if next.y_velocity < 0.0 {
            next.y = platform.rect.bottom() as f32;
            next.y_velocity = 0.0;
        }
    }

    next.x = next.x.clamp(0.0, (SCREEN_WIDTH - PLAYER_WIDTH) as f32);
    next.invincible_timer = next.invincible_timer.saturating_sub(1);
    next.projectiles = next.projectiles.iter().filter_map(advance_projectile).collect();
    next
}

/// Move a projectile one frame; `None` once it has left the screen.
pub fn advance_projectile(projectile: &Projectile) -> Option<Projectile> {
    let rect = Rect {
        x: projectile.rect.x + projectile.vx,
        ..projectile.rect
    };
    if rect.right() < 0 || rect.left() > SCREEN_WIDTH {
        None
    } else {
        Some(Projectile {
            rect,
            ..projectile.clone()
        })
    }
}

/// Apply `damage` unless invincible.  Health and lives never go below
/// zero; a lost life with lives to spare refills health.
pub fn take_damage(player: &Player, damage: u32) -> (Player, DamageOutcome) {
    if player.invincible_timer > 0 {
        return (player.clone(), DamageOutcome::Ignored);
    }
    let next = Player {
        health: player.health.saturating_sub(damage),
        invincible_timer: INVINCIBLE_FRAMES,
        ..player.clone()
    };
    if next.health > 0 {
        return (next, DamageOutcome::Hurt);
    }
    spend_life(next)
}

/// Unconditionally cost one life (falling out of the world).
pub fn lose_life(player: &Player) -> (Player, DamageOutcome) {
    spend_life(Player {
        health: 0,
        invincible_timer: INVINCIBLE_FRAMES,
        ..player.clone()
    })
}

fn spend_life(player: Player) -> (Player, DamageOutcome) {
    let lives = player.lives.saturating_sub(1);
    if lives > 0 {
        (
            Player {
                lives,
                health: PLAYER_MAX_HEALTH,
                ..player
            },
            DamageOutcome::LifeLost,
        )
    } else {
        (
            Player {
                lives: 0,
                health: 0,
                ..player
            },
            DamageOutcome::Dead,
        )
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

/// Patrol, bounce off the screen sides, sink and snap onto platforms.
/// `None` once the enemy has dropped below the screen.
pub fn update_enemy(enemy: &Enemy, platforms: &[Platform]) -> Option<Enemy> {
    let speed = enemy.kind.speed();
    let mut next = enemy.clone();

    next.x += speed * next.direction;
    let rect = next.rect();
    if rect.left() < 0 || rect.right() > SCREEN_WIDTH {
        next.direction = -next.direction;
        next.x += speed * next.direction * 2;
    }

    next.y += ENEMY_FALL;
    for platform in platforms {
        let rect = next.rect();
        let top = platform.rect.top();
        if rect.collides(&platform.rect) && rect.bottom() > top && rect.top() < top {
            next.y = top - next.kind.size();
        }
    }

    if next.rect().top() > SCREEN_HEIGHT {
        None
    } else {
        Some(next)
    }
}

/// `None` when the hit was fatal.
pub fn damage_enemy(enemy: &Enemy, damage: u32) -> Option<Enemy> {
    let health = enemy.health.saturating_sub(damage);
    if health == 0 {
        None
    } else {
        Some(Enemy {
            health,
            ..enemy.clone()
        })
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance one frame.  Does nothing outside `Playing`.
pub fn tick(state: &GameSession, held: HeldKeys) -> GameSession {
    if state.state != GameState::Playing {
        return state.clone();
    }

    let mut next = state.clone();

    // ── 1. Held-key movement ─────────────────────────────────────────────────
    if held.left {
        next.player = move_player(&next.player, -1);
    }
    if held.right {
        next.player = move_player(&next.player, 1);
    }

    // ── 2. Physics ───────────────────────────────────────────────────────────
    next.player = update_player(&next.player, &next.platforms);
    next.enemies = next
        .enemies
        .iter()
        .filter_map(|e| update_enemy(e, &next.platforms))
        .collect();

    // ── 3. Player ↔ enemy contact ────────────────────────────────────────────
    let player_rect = next.player.rect();
    let touching: Vec<u32> = next
        .enemies
        .iter()
        .filter(|e| e.rect().collides(&player_rect))
        .map(|e| e.kind.damage())
        .collect();
    for damage in touching {
        let (player, outcome) = take_damage(&next.player, damage);
        next.player = player;
        match outcome {
            DamageOutcome::Dead => {
                set_state(&mut next, GameState::GameOver);
                return next;
            }
            DamageOutcome::LifeLost => {
                info!("life lost, {} left", next.player.lives);
                return respawn(&next);
            }
            DamageOutcome::Hurt => debug!("player hit, health {}", next.player.health),
            DamageOutcome::Ignored => {}
        }
    }

    // ── 4. Projectile ↔ enemy contact ────────────────────────────────────────
    resolve_projectile_hits(&mut next);
    if next.state != GameState::Playing {
        return next;
    }

    // ── 5. Collectibles ──────────────────────────────────────────────────────
    let player_rect = next.player.rect();
    let (taken, kept): (Vec<Collectible>, Vec<Collectible>) = next
        .collectibles
        .iter()
        .cloned()
        .partition(|c| c.rect().collides(&player_rect));
    next.collectibles = kept;
    for item in taken {
        apply_collectible(&mut next, item.kind);
    }

    // ── 6. Level cleared ─────────────────────────────────────────────────────
    if next.enemies.is_empty() {
        advance_level(&mut next);
        return next;
    }

    // ── 7. Fell out of the world ─────────────────────────────────────────────
    if next.player.rect().top() > SCREEN_HEIGHT {
        let (player, outcome) = lose_life(&next.player);
        next.player = player;
        match outcome {
            DamageOutcome::Dead => set_state(&mut next, GameState::GameOver),
            _ => {
                info!("fell off the level, {} lives left", next.player.lives);
                return respawn(&next);
            }
        }
    }

    if next.player.lives == 0 {
        set_state(&mut next, GameState::GameOver);
    }

    next
}

fn resolve_projectile_hits(session: &mut GameSession) {
    let projectiles = std::mem::take(&mut session.player.projectiles);
    let mut remaining = Vec::with_capacity(projectiles.len());

    for projectile in projectiles {
        if session.state != GameState::Playing {
            remaining.push(projectile);
            continue;
        }

        let mut hit = false;
        let mut survivors = Vec::with_capacity(session.enemies.len());
        for enemy in std::mem::take(&mut session.enemies) {
            if session.state != GameState::Playing || !projectile.rect.collides(&enemy.rect()) {
                survivors.push(enemy);
                continue;
            }
            hit = true;
            match damage_enemy(&enemy, projectile.damage) {
                Some(wounded) => survivors.push(wounded),
                None => {
                    session.score += SCORE_ENEMY_KILL;
                    debug!("{:?} enemy defeated, score {}", enemy.kind, session.score);
                    if enemy.kind == EnemyKind::Boss {
                        info!("boss defeated");
                        advance_level(session);
                    }
                }
            }
        }
        session.enemies = survivors;

        if !hit {
            remaining.push(projectile);
        }
    }

    session.player.projectiles = remaining;
}

fn apply_collectible(session: &mut GameSession, kind: CollectibleKind) {
    let value = kind.value();
    match kind {
        CollectibleKind::HealthBoost => {
            session.player.health = (session.player.health + value).min(PLAYER_MAX_HEALTH);
            session.score += SCORE_HEALTH_BOOST;
        }
        CollectibleKind::ExtraLife => {
            session.player.lives += value;
            session.score += SCORE_EXTRA_LIFE;
        }
        CollectibleKind::ScoreBoost => session.score += value,
    }
    debug!("picked up {:?}, score {}", kind, session.score);
}

fn advance_level(session: &mut GameSession) {
    let state = if session.is_last_level() {
        GameState::GameWon
    } else {
        GameState::LevelCompleted
    };
    session.level_index += 1;
    set_state(session, state);
}
