//! The static level table.

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entities::{Collectible, CollectibleKind, Enemy, Platform};

#[derive(Clone, Debug, PartialEq)]
pub struct LevelSpec {
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    /// Spawned alongside the regular enemies; killing it ends the level.
    pub boss: Option<Enemy>,
}

impl LevelSpec {
    pub fn has_boss(&self) -> bool {
        self.boss.is_some()
    }
}

fn ground() -> Platform {
    Platform::new(0, SCREEN_HEIGHT - 40, SCREEN_WIDTH, 40)
}

/// Build the three levels.  The last one is the boss level.
pub fn level_data() -> Vec<LevelSpec> {
    use CollectibleKind::*;

    let h = SCREEN_HEIGHT;
    let w = SCREEN_WIDTH;

    vec![
        LevelSpec {
            platforms: vec![
                ground(),
                Platform::new(150, h - 150, 200, 20),
                Platform::new(450, h - 250, 150, 20),
                Platform::new(0, h - 350, 100, 20),
                Platform::new(600, h - 400, 200, 20),
            ],
            enemies: vec![Enemy::normal(200, h - 90), Enemy::normal(500, h - 300)],
            collectibles: vec![
                Collectible::new(100, h - 70, HealthBoost),
                Collectible::new(500, h - 70, ScoreBoost),
            ],
            boss: None,
        },
        LevelSpec {
            platforms: vec![
                ground(),
                Platform::new(100, h - 120, 150, 20),
                Platform::new(300, h - 200, 200, 20),
                Platform::new(550, h - 120, 150, 20),
                Platform::new(200, h - 300, 100, 20),
                Platform::new(400, h - 400, 150, 20),
            ],
            enemies: vec![
                Enemy::normal(150, h - 170),
                Enemy::normal(400, h - 250),
                Enemy::normal(600, h - 170),
            ],
            collectibles: vec![
                Collectible::new(200, h - 70, ScoreBoost),
                Collectible::new(600, h - 70, HealthBoost),
                Collectible::new(450, h - 450, ExtraLife),
            ],
            boss: None,
        },
        LevelSpec {
            platforms: vec![
                ground(),
                Platform::new(w / 2 - 100, h - 200, 200, 20),
                Platform::new(50, h - 350, 100, 20),
                Platform::new(w - 150, h - 350, 100, 20),
            ],
            enemies: Vec::new(),
            collectibles: vec![
                Collectible::new(100, h - 70, HealthBoost),
                Collectible::new(w - 100, h - 70, HealthBoost),
            ],
            boss: Some(Enemy::boss(w / 2 - 50, h - 150)),
        },
    ]
}
