//! # Entities
//!
//! The player, enemies, collectibles and decor that populate a room.
//!
//! Each entity keeps a float world position and derives an integer [`Bounds`] from it
//! with a fixed per-type offset and size. Collision and pickup work on those bounds.

use crate::config::{
    DEFAULT_ENEMY_DAMAGE, DEFAULT_ENEMY_SPEED, DEFAULT_PLAYER_HEALTH, DEFAULT_PLAYER_SPEED,
    INVINCIBILITY_DURATION,
};
use crate::game::{
    AnimationSet, AnimationState, Behavior, Bounds, EnemyBehavior, EnemyId, Facing, ItemId,
    Tilemap,
};
use crate::rendering::{SpriteDraw, Surface};
use log::debug;
use macroquad::color::WHITE;
use macroquad::math::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Shared shape of everything placed in the world.
pub trait Entity {
    fn position(&self) -> Vec2;

    /// Collision rectangle in world pixels.
    fn bounds(&self) -> Bounds;

    /// Returns true if the two collision rectangles overlap.
    fn touches(&self, other: &dyn Entity) -> bool {
        self.bounds().intersects(&other.bounds())
    }
}

/// Offset of the player's collision box inside its 32x32 sprite: the feet.
const PLAYER_BOUNDS_OFFSET: IVec2 = IVec2::new(8, 16);

/// Edge length of the player's collision box.
pub const PLAYER_BOUNDS_SIZE: i32 = 16;

/// Edge length of enemy and item collision boxes.
pub const SMALL_BOUNDS_SIZE: i32 = 16;

/// The player character.
///
/// # Examples
///
/// ```
/// use tilecrawl::{Entity, Player};
/// use macroquad::math::Vec2;
///
/// let mut player = Player::new(Vec2::new(100.0, 100.0));
/// assert_eq!(player.health(), 100);
/// assert!(player.take_damage(10));
/// assert!(!player.take_damage(10)); // still invincible
/// assert_eq!(player.health(), 90);
/// ```
#[derive(Debug, Clone)]
pub struct Player {
    position: Vec2,
    /// Walking speed in pixels per second
    pub speed: f32,
    health: u32,
    score: u32,
    invincibility: f32,
    invincibility_duration: f32,
    /// Ignore all damage
    pub god_mode: bool,
    animation: AnimationState,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            speed: DEFAULT_PLAYER_SPEED,
            health: DEFAULT_PLAYER_HEALTH,
            score: 0,
            invincibility: 0.0,
            invincibility_duration: INVINCIBILITY_DURATION,
            god_mode: false,
            animation: AnimationState::default(),
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_invincibility_duration(mut self, seconds: f32) -> Self {
        self.invincibility_duration = seconds.max(0.0);
        self
    }

    pub fn with_god_mode(mut self, enabled: bool) -> Self {
        self.god_mode = enabled;
        self
    }

    /// Collision box the player would have standing at `position`.
    pub fn bounds_at(position: Vec2) -> Bounds {
        Bounds::at(
            position,
            PLAYER_BOUNDS_OFFSET,
            PLAYER_BOUNDS_SIZE,
            PLAYER_BOUNDS_SIZE,
        )
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn invincibility(&self) -> f32 {
        self.invincibility
    }

    pub fn facing(&self) -> Facing {
        self.animation.facing
    }

    pub fn is_moving(&self) -> bool {
        self.animation.is_moving()
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// Moves the player without collision checks (spawns, loads, room changes).
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Puts back a saved position and score.
    pub fn restore(&mut self, position: Vec2, score: u32) {
        self.position = position;
        self.score = score;
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        debug!("Score: {}", self.score);
    }

    /// Applies damage unless the player is invincible or in god mode.
    ///
    /// Returns true if health changed. A hit restarts the invincibility window.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.god_mode || self.invincibility > 0.0 {
            return false;
        }

        self.health = self.health.saturating_sub(amount);
        self.invincibility = self.invincibility_duration;
        debug!("Player took {} damage, health {}", amount, self.health);
        true
    }

    /// True on the frames the invincibility blink hides the sprite.
    pub fn is_blink_hidden(&self) -> bool {
        self.invincibility > 0.0 && ((self.invincibility * 10.0) as i32) % 2 == 0
    }

    /// Advances one frame: invincibility, animation, then movement.
    ///
    /// The x and y components of the step are tried separately, so walking diagonally
    /// into a wall slides along it instead of stopping.
    pub fn update(&mut self, movement: Vec2, dt: f32, tilemap: &Tilemap) {
        if self.invincibility > 0.0 {
            self.invincibility = (self.invincibility - dt).max(0.0);
        }

        let direction = movement.normalize_or_zero();
        self.animation
            .advance(dt, direction != Vec2::ZERO, Facing::from_vector(direction));

        let target = self.position + direction * self.speed * dt;

        if !tilemap.is_colliding(Self::bounds_at(Vec2::new(target.x, self.position.y))) {
            self.position.x = target.x;
        }
        if !tilemap.is_colliding(Self::bounds_at(Vec2::new(self.position.x, target.y))) {
            self.position.y = target.y;
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, animations: &AnimationSet) {
        if self.is_blink_hidden() {
            return;
        }

        let clip = animations.clip(self.animation.facing, self.animation.motion);
        surface.draw_sprite(SpriteDraw {
            sheet: &clip.sheet,
            source: Some(clip.frame(self.animation.frame)),
            position: self.position,
            tint: WHITE,
            flip_x: clip.flip_x,
        });
    }
}

impl Entity for Player {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn bounds(&self) -> Bounds {
        Self::bounds_at(self.position)
    }
}

/// Enemy species; picks the sprites and the default behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Slow blob that patrols
    Slime,
    /// Drifts through walls after the player
    Ghost,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 2] = [EnemyKind::Slime, EnemyKind::Ghost];

    /// Folder name under `enemies/` in the assets.
    pub fn asset_name(self) -> &'static str {
        match self {
            EnemyKind::Slime => "slime",
            EnemyKind::Ghost => "ghost",
        }
    }
}

/// A hostile that hurts the player on contact.
#[derive(Debug, Clone)]
pub struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    position: Vec2,
    /// Movement speed in pixels per second
    pub speed: f32,
    damage: u32,
    behavior: EnemyBehavior,
    animation: AnimationState,
}

impl Enemy {
    pub fn new(id: EnemyId, kind: EnemyKind, position: Vec2, behavior: EnemyBehavior) -> Self {
        Self {
            id,
            kind,
            position,
            speed: DEFAULT_ENEMY_SPEED,
            damage: DEFAULT_ENEMY_DAMAGE,
            behavior,
            animation: AnimationState::default(),
        }
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    pub fn id(&self) -> EnemyId {
        self.id
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    pub fn behavior(&self) -> &EnemyBehavior {
        &self.behavior
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// Swaps the movement strategy on a live enemy.
    pub fn change_behavior(&mut self, behavior: EnemyBehavior) {
        debug!(
            "Enemy {} switches from {} to {}",
            self.id,
            self.behavior.name(),
            behavior.name()
        );
        self.behavior = behavior;
    }

    /// Runs the behavior for one frame and updates facing from the step taken.
    pub fn update(&mut self, player: &Player, dt: f32) {
        let before = self.position;
        self.behavior
            .update(&mut self.position, self.speed, player, dt);

        let step = self.position - before;
        self.animation
            .advance(dt, step != Vec2::ZERO, Facing::from_vector(step));
    }

    pub fn draw(&self, surface: &mut dyn Surface, animations: &AnimationSet) {
        let clip = animations.clip(self.animation.facing, self.animation.motion);
        surface.draw_sprite(SpriteDraw {
            sheet: &clip.sheet,
            source: Some(clip.frame(self.animation.frame)),
            position: self.position,
            tint: WHITE,
            flip_x: clip.flip_x,
        });
    }
}

impl Entity for Enemy {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn bounds(&self) -> Bounds {
        Bounds::at(self.position, IVec2::ZERO, SMALL_BOUNDS_SIZE, SMALL_BOUNDS_SIZE)
    }
}

/// Kind of collectible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Coin,
    /// Picking this up wins the game
    Chest,
}

impl ItemKind {
    pub const ALL: [ItemKind; 2] = [ItemKind::Coin, ItemKind::Chest];

    pub fn sheet(self) -> &'static str {
        match self {
            ItemKind::Coin => "items/coin",
            ItemKind::Chest => "items/chest",
        }
    }
}

/// A one-shot collectible worth a fixed number of points.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    name: String,
    kind: ItemKind,
    value: u32,
    position: Vec2,
    active: bool,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, kind: ItemKind, value: u32, position: Vec2) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            value,
            position,
            active: true,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_victory_item(&self) -> bool {
        self.kind == ItemKind::Chest
    }

    /// Deactivates the item and returns its value; `None` if it was already taken.
    pub fn collect(&mut self) -> Option<u32> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(self.value)
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if !self.active {
            return;
        }
        surface.draw_sprite(SpriteDraw {
            sheet: self.kind.sheet(),
            source: None,
            position: self.position,
            tint: WHITE,
            flip_x: false,
        });
    }
}

impl Entity for Item {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn bounds(&self) -> Bounds {
        Bounds::at(self.position, IVec2::ZERO, SMALL_BOUNDS_SIZE, SMALL_BOUNDS_SIZE)
    }
}

/// Static prop that blocks the player.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorObject {
    position: Vec2,
    sheet: String,
    source: Bounds,
}

impl DecorObject {
    /// The collision box matches the size of `source` on the sheet.
    pub fn new(position: Vec2, sheet: impl Into<String>, source: Bounds) -> Self {
        Self {
            position,
            sheet: sheet.into(),
            source,
        }
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_sprite(SpriteDraw {
            sheet: &self.sheet,
            source: Some(self.source),
            position: self.position,
            tint: WHITE,
            flip_x: false,
        });
    }
}

impl Entity for DecorObject {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn bounds(&self) -> Bounds {
        Bounds::at(
            self.position,
            IVec2::ZERO,
            self.source.width,
            self.source.height,
        )
    }
}
