//! Fixed design constants and the small amount of runtime configuration
//! read from the environment.

use std::path::PathBuf;

// ── World ─────────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;
pub const FPS: u64 = 60;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: i32 = 40;
pub const PLAYER_HEIGHT: i32 = 60;
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_MAX_HEALTH: u32 = 100;
pub const PLAYER_LIVES: u32 = 3;
pub const GRAVITY: f32 = 0.7;
pub const JUMP_POWER: f32 = -20.0;
/// 1.5 seconds at 60 FPS.
pub const INVINCIBLE_FRAMES: u32 = 90;
pub const SPAWN_X: f32 = 50.0;
pub const SPAWN_Y: f32 = (SCREEN_HEIGHT - 100) as f32;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const PROJECTILE_SIZE: i32 = 10;
pub const PROJECTILE_SPEED: i32 = 10;
pub const PROJECTILE_DAMAGE: u32 = 10;

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Pixels an enemy sinks per frame before being snapped back onto a platform.
pub const ENEMY_FALL: i32 = 2;

// ── Scoring ───────────────────────────────────────────────────────────────────

pub const SCORE_ENEMY_KILL: u32 = 100;
pub const SCORE_HEALTH_BOOST: u32 = 20;
pub const SCORE_EXTRA_LIFE: u32 = 50;

// ── Menu buttons (world coordinates) ──────────────────────────────────────────

pub const BUTTON_WIDTH: i32 = 200;
pub const BUTTON_HEIGHT: i32 = 60;
pub const START_BUTTON_Y: i32 = SCREEN_HEIGHT / 2 + 180;
pub const CONTINUE_BUTTON_Y: i32 = SCREEN_HEIGHT / 2 + 80;

// ── Crop editor ───────────────────────────────────────────────────────────────

/// Pointer distance (image pixels) at which an edge counts as hovered.
pub const EDGE_GRAB_DISTANCE: i32 = 10;
/// Smallest width/height the crop rectangle may be dragged down to.
pub const MIN_CROP_EXTENT: i32 = 10;
pub const MIN_SCALE_PERCENT: u32 = 10;
pub const MAX_SCALE_PERCENT: u32 = 200;
pub const DEFAULT_SCALE_PERCENT: u32 = 100;

// ── Runtime configuration ─────────────────────────────────────────────────────

/// Environment variable naming the log file.
pub const LOG_PATH_VAR: &str = "TWIN_DEMOS_LOG";
/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub log_path: PathBuf,
    pub log_filter: String,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        let log_path = std::env::var_os(LOG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_log_path);
        let log_filter =
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
        RuntimeConfig { log_path, log_filter }
    }
}

fn default_log_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".twin_demos.log")
}
