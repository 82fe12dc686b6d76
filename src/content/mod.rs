//! # Content Module
//!
//! Turning files on disk into playable rooms: CSV maps, entity factories and the
//! dungeon manifest that wires them together.

pub mod dungeon;
pub mod encounters;
pub mod items;
pub mod maps;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;
pub use maps::*;

use crate::game::{AnimationLibrary, DungeonGraph, ItemKind, TILESET_SHEET};

/// Every sprite sheet a dungeon can draw, for preloading.
pub fn asset_manifest(animations: &AnimationLibrary, dungeon: &DungeonGraph) -> Vec<String> {
    let mut sheets: Vec<String> = animations.sheets().into_iter().map(String::from).collect();
    sheets.push(TILESET_SHEET.to_string());
    sheets.extend(ItemKind::ALL.iter().map(|kind| kind.sheet().to_string()));
    for room in dungeon.rooms() {
        sheets.extend(room.decor.iter().map(|d| d.sheet().to_string()));
    }
    sheets.sort();
    sheets.dedup();
    sheets
}
