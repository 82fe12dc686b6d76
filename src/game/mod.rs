//! # Game Module
//!
//! Core simulation: geometry, tilemaps, entities, rooms and the state machines that
//! drive a play session.
//!
//! This module contains the building blocks of a Tilecrawl dungeon:
//! - Tilemap collision and door detection
//! - Player, enemies, items and decor with their animation state
//! - Rooms and the dungeon graph that links them
//! - Fade transitions between rooms and the outer game-state machine

pub mod animation;
pub mod behavior;
pub mod camera;
pub mod entities;
pub mod room;
pub mod save;
pub mod settings;
pub mod state;
pub mod tilemap;
pub mod transition;
pub mod world;

pub use animation::*;
pub use behavior::*;
pub use camera::*;
pub use entities::*;
pub use room::*;
pub use save::*;
pub use settings::*;
pub use state::*;
pub use tilemap::*;
pub use transition::*;
pub use world::*;

use macroquad::math::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Identifier of a room; the key of the dungeon graph.
pub type RoomId = u32;

/// Identifier of an enemy, unique within a dungeon.
pub type EnemyId = u32;

/// Identifier of an item, unique within a dungeon.
pub type ItemId = u32;

/// Integer axis-aligned rectangle in world pixels.
///
/// Entity bounds are derived from float positions by truncation, so collision works on
/// whole pixels just like the tile grid does.
///
/// # Examples
///
/// ```
/// use tilecrawl::Bounds;
///
/// let a = Bounds::new(0, 0, 16, 16);
/// let b = Bounds::new(15, 15, 16, 16);
/// assert!(a.intersects(&b));
/// assert!(!a.intersects(&Bounds::new(16, 0, 16, 16)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle at a float position plus a pixel offset, truncating toward zero.
    pub fn at(position: Vec2, offset: IVec2, width: i32, height: i32) -> Self {
        Self::new(
            position.x as i32 + offset.x,
            position.y as i32 + offset.y,
            width,
            height,
        )
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    /// One past the last pixel column inside the rectangle.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    /// One past the last pixel row inside the rectangle.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Center point, rounded toward the top-left.
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Returns true if the two rectangles share at least one pixel.
    ///
    /// Rectangles that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        other.left() < self.right()
            && self.left() < other.right()
            && other.top() < self.bottom()
            && self.top() < other.bottom()
    }
}

/// Compass directions used for room connections and exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Order in which room exits are checked each frame.
    pub const EXIT_ORDER: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
    ];

    /// Returns the direction pointing the other way.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecrawl::Direction;
    ///
    /// assert_eq!(Direction::East.opposite(), Direction::West);
    /// ```
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// The way an animated actor is looking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Down, Facing::Up, Facing::Left, Facing::Right];

    /// Derives a facing from a movement vector.
    ///
    /// Vertical movement wins over horizontal, so diagonal walking shows the up or down
    /// sprite. Returns `None` for the zero vector, which keeps the previous facing.
    pub fn from_vector(v: Vec2) -> Option<Facing> {
        if v.y > 0.0 {
            Some(Facing::Down)
        } else if v.y < 0.0 {
            Some(Facing::Up)
        } else if v.x > 0.0 {
            Some(Facing::Right)
        } else if v.x < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}
