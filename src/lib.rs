//! # Tilecrawl
//!
//! The simulation core of a tile-based dungeon crawler.
//!
//! ## Architecture Overview
//!
//! A dungeon is a graph of rooms joined by compass-direction edges. Each room owns a
//! collidable tilemap plus the enemies, items and decor placed in it. The pieces are:
//!
//! - **Game**: tilemaps, entities, enemy behaviors, rooms, the dungeon registry, the
//!   fade transition between rooms and the outer game-state machine
//! - **Content**: CSV map ingestion and data-driven dungeon assembly
//! - **Input**: movement intent and edge-triggered actions, sampled once per frame
//! - **Rendering**: a draw-surface contract with a macroquad implementation
//!
//! The simulation never touches the window directly. Each frame, [`GameSession`]
//! receives a [`FrameInput`] and draws into any [`Surface`], so the whole core runs
//! headless under test.

pub mod content;
pub mod game;
pub mod input;
pub mod rendering;
pub mod scenes;

// Core module re-exports
pub use content::*;
pub use game::*;
pub use input::*;
pub use rendering::*;
pub use scenes::SceneManager;

use std::path::PathBuf;

/// Core error type for the Tilecrawl engine.
#[derive(thiserror::Error, Debug)]
pub enum TilecrawlError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A map file could not be read
    #[error("Failed to load map {path}: {source}")]
    MapLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Map data is structurally unusable
    #[error("Invalid map: {0}")]
    InvalidMap(String),

    /// Content definitions (animations, manifests) are incomplete or inconsistent
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Save slot could not be read or written
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type used throughout the Tilecrawl codebase.
pub type TilecrawlResult<T> = Result<T, TilecrawlError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Tile edge length in pixels for the shipped maps
    pub const DEFAULT_TILE_SIZE: i32 = 16;

    /// Default player starting health
    pub const DEFAULT_PLAYER_HEALTH: u32 = 100;

    /// Player walking speed in pixels per second
    pub const DEFAULT_PLAYER_SPEED: f32 = 100.0;

    /// Seconds of damage immunity after being hit
    pub const INVINCIBILITY_DURATION: f32 = 1.0;

    /// Enemy movement speed in pixels per second
    pub const DEFAULT_ENEMY_SPEED: f32 = 50.0;

    /// Damage dealt by touching an enemy
    pub const DEFAULT_ENEMY_DAMAGE: u32 = 10;

    /// Points awarded by a collectible
    pub const DEFAULT_ITEM_VALUE: u32 = 10;

    /// Fade opacity change per second during room transitions
    pub const DEFAULT_FADE_RATE: f32 = 2.0;

    /// World pixels drawn per screen pixel
    pub const DEFAULT_CAMERA_ZOOM: f32 = 3.0;

    /// Seconds a status message stays on the HUD
    pub const STATUS_MESSAGE_SECONDS: f32 = 3.0;
}
