//! # Game Settings
//!
//! Tunable parameters for a play session, loadable from JSON.

use crate::config::{
    DEFAULT_CAMERA_ZOOM, DEFAULT_FADE_RATE, DEFAULT_PLAYER_SPEED, DEFAULT_TILE_SIZE,
    INVINCIBILITY_DURATION,
};
use crate::game::{DoorPolicy, RoomId, DEFAULT_EDGE_MARGIN, DEFAULT_SPAWN_INSET};
use crate::TilecrawlResult;
use macroquad::math::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Session configuration.
///
/// Every field has a default, so a settings file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Tile edge length in pixels
    pub tile_size: i32,
    /// Tiles per row in the tileset texture
    pub tileset_columns: i32,
    /// How tilemaps mark their exits
    pub door_policy: DoorPolicy,
    /// Pixels from a map edge the player must cross to leave
    pub edge_margin: i32,
    /// Pixels from the entry edge the player appears at
    pub spawn_inset: f32,
    /// Fade progress per second
    pub fade_rate: f32,
    /// Player speed in pixels per second
    pub player_speed: f32,
    /// Where the player starts and restarts
    pub player_start: [f32; 2],
    /// Room the session starts and restarts in; the dungeon's start room when unset
    pub start_room: Option<RoomId>,
    /// Seconds of invincibility after a hit
    pub invincibility: f32,
    /// Ignore all damage
    pub god_mode: bool,
    pub camera_zoom: f32,
    /// Logical window size in pixels
    pub viewport: [f32; 2],
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            tileset_columns: 16,
            door_policy: DoorPolicy::default(),
            edge_margin: DEFAULT_EDGE_MARGIN,
            spawn_inset: DEFAULT_SPAWN_INSET,
            fade_rate: DEFAULT_FADE_RATE,
            player_speed: DEFAULT_PLAYER_SPEED,
            player_start: [100.0, 100.0],
            start_room: None,
            invincibility: INVINCIBILITY_DURATION,
            god_mode: false,
            camera_zoom: DEFAULT_CAMERA_ZOOM,
            viewport: [800.0, 600.0],
        }
    }
}

impl GameSettings {
    /// Settings for headless tests: fast fades and a small viewport.
    pub fn for_testing() -> Self {
        Self {
            fade_rate: 4.0,
            viewport: [320.0, 240.0],
            camera_zoom: 1.0,
            ..Self::default()
        }
    }

    /// Reads settings from a JSON file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tilecrawl::GameSettings;
    ///
    /// let settings = GameSettings::from_json_file("settings.json").unwrap();
    /// println!("starting in room {:?}", settings.start_room);
    /// ```
    pub fn from_json_file(path: impl AsRef<Path>) -> TilecrawlResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn player_spawn(&self) -> Vec2 {
        Vec2::from(self.player_start)
    }

    pub fn viewport_size(&self) -> Vec2 {
        Vec2::from(self.viewport)
    }
}
