//! All game entity types: plain data plus size and attribute tables.
//! Behaviour lives in `compute`.

use crate::config::{
    PLAYER_HEIGHT, PLAYER_LIVES, PLAYER_MAX_HEALTH, PLAYER_WIDTH, PROJECTILE_DAMAGE,
    PROJECTILE_SIZE, PROJECTILE_SPEED,
};
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    GameOver,
    GameWon,
    LevelCompleted,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Normal,
    Boss,
}

impl EnemyKind {
    /// Side length of the (square) bounding box.
    pub fn size(&self) -> i32 {
        match self {
            EnemyKind::Normal => 50,
            EnemyKind::Boss => 100,
        }
    }

    pub fn max_health(&self) -> u32 {
        match self {
            EnemyKind::Normal => 50,
            EnemyKind::Boss => 300,
        }
    }

    pub fn speed(&self) -> i32 {
        match self {
            EnemyKind::Normal => 2,
            EnemyKind::Boss => 1,
        }
    }

    /// Damage dealt to the player on contact.
    pub fn damage(&self) -> u32 {
        match self {
            EnemyKind::Normal => 20,
            EnemyKind::Boss => 40,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub health: u32,
    /// Patrol heading: +1 right, −1 left.
    pub direction: i32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn new(x: i32, y: i32, kind: EnemyKind) -> Self {
        Enemy {
            x,
            y,
            health: kind.max_health(),
            direction: 1,
            kind,
        }
    }

    pub fn normal(x: i32, y: i32) -> Self {
        Enemy::new(x, y, EnemyKind::Normal)
    }

    pub fn boss(x: i32, y: i32) -> Self {
        Enemy::new(x, y, EnemyKind::Boss)
    }

    pub fn rect(&self) -> Rect {
        let size = self.kind.size();
        Rect::new(self.x, self.y, size, size)
    }
}

// ── Collectibles ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectibleKind {
    /// Restores health, capped at the maximum.
    HealthBoost,
    /// Adds a life.
    ExtraLife,
    /// Adds straight to the score.
    ScoreBoost,
}

impl CollectibleKind {
    pub fn value(&self) -> u32 {
        match self {
            CollectibleKind::HealthBoost => 25,
            CollectibleKind::ExtraLife => 1,
            CollectibleKind::ScoreBoost => 50,
        }
    }
}

pub const COLLECTIBLE_SIZE: i32 = 30;

#[derive(Clone, Debug, PartialEq)]
pub struct Collectible {
    pub x: i32,
    pub y: i32,
    pub kind: CollectibleKind,
}

impl Collectible {
    pub fn new(x: i32, y: i32, kind: CollectibleKind) -> Self {
        Collectible { x, y, kind }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE)
    }
}

// ── Platforms ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Platform {
            rect: Rect::new(x, y, w, h),
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub rect: Rect,
    /// Horizontal velocity in pixels per frame (sign = heading).
    pub vx: i32,
    pub damage: u32,
}

impl Projectile {
    /// A projectile centred on `(cx, cy)` travelling in `direction`.
    pub fn new(cx: i32, cy: i32, direction: i32) -> Self {
        Projectile {
            rect: Rect::centered(cx, cy, PROJECTILE_SIZE, PROJECTILE_SIZE),
            vx: PROJECTILE_SPEED * direction,
            damage: PROJECTILE_DAMAGE,
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Top-left corner; fractional so gravity can accumulate sub-pixel.
    pub x: f32,
    pub y: f32,
    pub y_velocity: f32,
    pub is_jumping: bool,
    pub health: u32,
    pub lives: u32,
    /// Facing: +1 right, −1 left.  Projectiles travel this way.
    pub direction: i32,
    /// Frames of damage immunity left.
    pub invincible_timer: u32,
    pub projectiles: Vec<Projectile>,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Player {
            x,
            y,
            y_velocity: 0.0,
            is_jumping: false,
            health: PLAYER_MAX_HEALTH,
            lives: PLAYER_LIVES,
            direction: 1,
            invincible_timer: 0,
            projectiles: Vec::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x as i32, self.y as i32, PLAYER_WIDTH, PLAYER_HEIGHT)
    }
}

// ── Tagged view used by the renderer ──────────────────────────────────────────

/// One drawable entity.  Renderers match on this instead of each entity
/// type carrying its own draw method.
#[derive(Clone, Copy, Debug)]
pub enum Entity<'a> {
    Player(&'a Player),
    Enemy(&'a Enemy),
    Collectible(&'a Collectible),
    Platform(&'a Platform),
}

impl Entity<'_> {
    pub fn rect(&self) -> Rect {
        match self {
            Entity::Player(p) => p.rect(),
            Entity::Enemy(e) => e.rect(),
            Entity::Collectible(c) => c.rect(),
            Entity::Platform(p) => p.rect,
        }
    }
}
