//! # Enemy Factory
//!
//! Creates enemies by kind. Each kind comes with its movement strategy: slimes patrol,
//! ghosts chase.

use crate::game::{Enemy, EnemyBehavior, EnemyId, EnemyKind};
use macroquad::math::Vec2;

/// Hands out enemies with dungeon-unique ids.
#[derive(Debug, Clone)]
pub struct EnemyFactory {
    next_id: EnemyId,
}

impl Default for EnemyFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl EnemyFactory {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// The strategy an enemy of `kind` starts with.
    pub fn behavior_for(kind: EnemyKind) -> EnemyBehavior {
        match kind {
            EnemyKind::Slime => EnemyBehavior::patrol(),
            EnemyKind::Ghost => EnemyBehavior::chase(),
        }
    }

    pub fn create(&mut self, kind: EnemyKind, position: Vec2) -> Enemy {
        let id = self.next_id;
        self.next_id += 1;
        Enemy::new(id, kind, position, Self::behavior_for(kind))
    }
}
