//! # Enemy Behaviors
//!
//! Movement strategies an enemy can run each frame.
//!
//! A behavior receives the enemy's position mutably and the player read-only, so the
//! only thing a strategy can change is where its enemy stands. Enemies ignore tile
//! collision and can drift through walls.

use crate::game::{Entity, Player};
use macroquad::math::Vec2;

/// Seconds a patrol walks in one direction before turning around.
pub const PATROL_TURN_SECONDS: f32 = 2.0;

/// Fraction of nominal speed used while chasing.
pub const CHASE_SPEED_FACTOR: f32 = 0.8;

/// Common interface for enemy movement strategies.
pub trait Behavior {
    /// Moves `position` for one frame of `dt` seconds.
    fn update(&mut self, position: &mut Vec2, speed: f32, player: &Player, dt: f32);
}

/// Walks back and forth along the x axis, turning every two seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct PatrolBehavior {
    direction: Vec2,
    timer: f32,
}

impl Default for PatrolBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl PatrolBehavior {
    pub fn new() -> Self {
        Self {
            direction: Vec2::X,
            timer: 0.0,
        }
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }
}

impl Behavior for PatrolBehavior {
    fn update(&mut self, position: &mut Vec2, speed: f32, _player: &Player, dt: f32) {
        self.timer += dt;
        if self.timer > PATROL_TURN_SECONDS {
            self.direction = -self.direction;
            self.timer = 0.0;
        }

        *position += self.direction * speed * dt;
    }
}

/// Heads straight for the player at reduced speed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChaseBehavior;

impl Behavior for ChaseBehavior {
    fn update(&mut self, position: &mut Vec2, speed: f32, player: &Player, dt: f32) {
        let direction = (player.position() - *position).normalize_or_zero();
        *position += direction * (speed * CHASE_SPEED_FACTOR) * dt;
    }
}

/// The behavior slot on an enemy.
#[derive(Debug, Clone, PartialEq)]
pub enum EnemyBehavior {
    Patrol(PatrolBehavior),
    Chase(ChaseBehavior),
}

impl EnemyBehavior {
    pub fn patrol() -> Self {
        EnemyBehavior::Patrol(PatrolBehavior::new())
    }

    pub fn chase() -> Self {
        EnemyBehavior::Chase(ChaseBehavior)
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnemyBehavior::Patrol(_) => "patrol",
            EnemyBehavior::Chase(_) => "chase",
        }
    }
}

impl Behavior for EnemyBehavior {
    fn update(&mut self, position: &mut Vec2, speed: f32, player: &Player, dt: f32) {
        match self {
            EnemyBehavior::Patrol(patrol) => patrol.update(position, speed, player, dt),
            EnemyBehavior::Chase(chase) => chase.update(position, speed, player, dt),
        }
    }
}
