//! # Save Slots
//!
//! Persistence of the player's room, position and score.
//!
//! There is a single slot, `"1"`, overwritten on every save. Stores are handed to the
//! session at construction so tests can swap the file for memory.

use crate::game::RoomId;
use crate::{TilecrawlError, TilecrawlResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key of the only save slot.
pub const SAVE_SLOT: &str = "1";

/// Snapshot written to a save slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub room_id: RoomId,
    pub x: f32,
    pub y: f32,
    pub score: u32,
}

/// Backing storage for the save slot.
pub trait SaveStore {
    /// Overwrites the slot.
    fn save(&mut self, data: &SaveData) -> TilecrawlResult<()>;

    /// Reads the slot. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> TilecrawlResult<Option<SaveData>>;
}

/// On-disk layout: `{ "slots": { "1": { ... } } }`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SaveFile {
    #[serde(default)]
    slots: BTreeMap<String, SaveData>,
}

/// Save slot kept in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonSaveStore {
    path: PathBuf,
}

impl JsonSaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> TilecrawlResult<Option<SaveFile>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TilecrawlError::Persistence(format!(
                "cannot read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

impl SaveStore for JsonSaveStore {
    fn save(&mut self, data: &SaveData) -> TilecrawlResult<()> {
        // Keep any other slots a newer build may have written.
        let mut file = self.read_file().ok().flatten().unwrap_or_default();
        file.slots.insert(SAVE_SLOT.to_string(), *data);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, json).map_err(|e| {
            TilecrawlError::Persistence(format!("cannot write {}: {}", self.path.display(), e))
        })?;
        info!("Saved game to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> TilecrawlResult<Option<SaveData>> {
        Ok(self
            .read_file()?
            .and_then(|mut file| file.slots.remove(SAVE_SLOT)))
    }
}

/// Save slot held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySaveStore {
    slot: Option<SaveData>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `data`.
    pub fn with_data(data: SaveData) -> Self {
        Self { slot: Some(data) }
    }
}

impl SaveStore for MemorySaveStore {
    fn save(&mut self, data: &SaveData) -> TilecrawlResult<()> {
        self.slot = Some(*data);
        Ok(())
    }

    fn load(&self) -> TilecrawlResult<Option<SaveData>> {
        Ok(self.slot)
    }
}
