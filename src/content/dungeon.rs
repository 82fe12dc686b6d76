//! # Dungeon Manifest
//!
//! Data-driven description of a dungeon and the builder that turns it into a
//! [`DungeonGraph`].

use crate::content::{load_map_csv, EnemyFactory, ItemFactory};
use crate::game::{
    Bounds, DecorObject, Direction, DungeonGraph, EnemyKind, GameSettings, ItemKind, Room,
    RoomId, Tilemap,
};
use crate::{TilecrawlError, TilecrawlResult};
use log::{info, warn};
use macroquad::math::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// An exit from one room to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSpec {
    pub direction: Direction,
    pub target: RoomId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub kind: ItemKind,
    pub position: [f32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub kind: EnemyKind,
    pub position: [f32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorSpec {
    pub sheet: String,
    pub position: [f32; 2],
    /// Region of the sheet; also the collision size
    pub source: Bounds,
}

/// One room: its map file and what is placed in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub id: RoomId,
    /// CSV file name, relative to the maps directory
    pub map: String,
    /// Exits, in priority order. The first entry for a direction wins.
    #[serde(default)]
    pub connections: Vec<ConnectionSpec>,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
    #[serde(default)]
    pub enemies: Vec<EnemySpec>,
    #[serde(default)]
    pub decor: Vec<DecorSpec>,
}

impl RoomSpec {
    pub fn new(id: RoomId, map: impl Into<String>) -> Self {
        Self {
            id,
            map: map.into(),
            connections: Vec::new(),
            items: Vec::new(),
            enemies: Vec::new(),
            decor: Vec::new(),
        }
    }

    pub fn connect(mut self, direction: Direction, target: RoomId) -> Self {
        self.connections.push(ConnectionSpec { direction, target });
        self
    }

    pub fn item(mut self, kind: ItemKind, x: f32, y: f32) -> Self {
        self.items.push(ItemSpec {
            kind,
            position: [x, y],
        });
        self
    }

    pub fn enemy(mut self, kind: EnemyKind, x: f32, y: f32) -> Self {
        self.enemies.push(EnemySpec {
            kind,
            position: [x, y],
        });
        self
    }
}

/// A whole dungeon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonManifest {
    pub start_room: RoomId,
    pub rooms: Vec<RoomSpec>,
}

impl DungeonManifest {
    /// The shipped two-room dungeon: coins and a slime, then a ghost guarding the
    /// treasure chest.
    pub fn classic() -> Self {
        Self {
            start_room: 1,
            rooms: vec![
                RoomSpec::new(1, "Room_01.csv")
                    .connect(Direction::East, 2)
                    .item(ItemKind::Coin, 200.0, 200.0)
                    .item(ItemKind::Coin, 250.0, 200.0)
                    .item(ItemKind::Coin, 300.0, 200.0)
                    .enemy(EnemyKind::Slime, 150.0, 150.0),
                RoomSpec::new(2, "Room_02.csv")
                    .connect(Direction::West, 1)
                    .enemy(EnemyKind::Ghost, 200.0, 200.0)
                    .item(ItemKind::Chest, 150.0, 100.0),
            ],
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> TilecrawlResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Loads every map from `maps_dir` and builds the room graph.
    ///
    /// The start room becomes the current room. Rooms that reuse an id are skipped
    /// with a warning, and so are exits to rooms the manifest does not define.
    pub fn build(
        &self,
        maps_dir: impl AsRef<Path>,
        settings: &GameSettings,
    ) -> TilecrawlResult<DungeonGraph> {
        let maps_dir = maps_dir.as_ref();
        let start = self
            .rooms
            .iter()
            .find(|spec| spec.id == self.start_room)
            .ok_or_else(|| {
                TilecrawlError::InvalidContent(format!(
                    "start room {} is not defined",
                    self.start_room
                ))
            })?;
        let known: HashSet<RoomId> = self.rooms.iter().map(|spec| spec.id).collect();

        let mut items = ItemFactory::new();
        let mut enemies = EnemyFactory::new();

        let first = Self::build_room(start, maps_dir, settings, &known, &mut items, &mut enemies)?;
        let mut dungeon = DungeonGraph::new(first);
        let mut seen = HashSet::from([start.id]);
        for spec in &self.rooms {
            if std::ptr::eq(spec, start) {
                continue;
            }
            if !seen.insert(spec.id) {
                warn!("Room {} is defined more than once, keeping the first", spec.id);
                continue;
            }
            let room = Self::build_room(spec, maps_dir, settings, &known, &mut items, &mut enemies)?;
            dungeon.add_room(room);
        }

        info!(
            "Built dungeon with {} rooms, starting in room {}",
            dungeon.len(),
            dungeon.current_id()
        );
        Ok(dungeon)
    }

    fn build_room(
        spec: &RoomSpec,
        maps_dir: &Path,
        settings: &GameSettings,
        known: &HashSet<RoomId>,
        items: &mut ItemFactory,
        enemies: &mut EnemyFactory,
    ) -> TilecrawlResult<Room> {
        let grid = load_map_csv(maps_dir.join(&spec.map))?;
        let tilemap = Tilemap::new(grid, settings.tile_size, settings.tile_size)
            .with_tileset_columns(settings.tileset_columns)
            .with_door_policy(settings.door_policy);
        let mut room = Room::new(spec.id, tilemap);

        for connection in &spec.connections {
            if !known.contains(&connection.target) {
                warn!(
                    "Room {} exit {:?} leads to undefined room {}",
                    spec.id, connection.direction, connection.target
                );
                continue;
            }
            room.connect(connection.direction, connection.target);
        }
        for item in &spec.items {
            room.add_item(items.create(item.kind, Vec2::from(item.position)));
        }
        for enemy in &spec.enemies {
            room.add_enemy(enemies.create(enemy.kind, Vec2::from(enemy.position)));
        }
        for decor in &spec.decor {
            room.add_decor(DecorObject::new(
                Vec2::from(decor.position),
                decor.sheet.clone(),
                decor.source,
            ));
        }
        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_map(dir: &Path, name: &str) {
        let row = vec!["-1"; 20].join(",");
        let text = vec![row; 15].join("\n");
        fs::write(dir.join(name), text).unwrap();
    }

    #[test]
    fn test_classic_layout() {
        let manifest = DungeonManifest::classic();
        assert_eq!(manifest.start_room, 1);
        assert_eq!(manifest.rooms.len(), 2);
        assert_eq!(manifest.rooms[0].items.len(), 3);
        assert_eq!(manifest.rooms[1].items[0].kind, ItemKind::Chest);
    }

    #[test]
    fn test_build_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_map(dir.path(), "Room_01.csv");
        write_map(dir.path(), "Room_02.csv");

        let dungeon = DungeonManifest::classic()
            .build(dir.path(), &GameSettings::default())
            .unwrap();
        assert_eq!(dungeon.current_id(), 1);
        assert_eq!(dungeon.current_room().neighbor(Direction::East), Some(2));
        assert_eq!(dungeon.room(2).unwrap().neighbor(Direction::West), Some(1));
        assert_eq!(dungeon.room(2).unwrap().enemies[0].behavior().name(), "chase");

        let item_ids: Vec<u32> = dungeon
            .rooms()
            .flat_map(|room| room.items.iter().map(|item| item.id()))
            .collect();
        let unique: HashSet<u32> = item_ids.iter().copied().collect();
        assert_eq!(unique.len(), item_ids.len());
    }

    #[test]
    fn test_missing_map_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_map(dir.path(), "Room_01.csv");
        let err = DungeonManifest::classic()
            .build(dir.path(), &GameSettings::default())
            .unwrap_err();
        assert!(matches!(err, TilecrawlError::MapLoad { .. }));
    }

    #[test]
    fn test_undefined_start_room() {
        let manifest = DungeonManifest {
            start_room: 5,
            rooms: vec![RoomSpec::new(1, "a.csv")],
        };
        assert!(matches!(
            manifest.build(".", &GameSettings::default()),
            Err(TilecrawlError::InvalidContent(_))
        ));
    }

    #[test]
    fn test_duplicates_and_dangling_exits_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_map(dir.path(), "a.csv");
        let manifest = DungeonManifest {
            start_room: 1,
            rooms: vec![
                RoomSpec::new(1, "a.csv")
                    .connect(Direction::North, 8)
                    .connect(Direction::East, 2),
                RoomSpec::new(2, "a.csv"),
                RoomSpec::new(2, "a.csv").item(ItemKind::Coin, 0.0, 0.0),
            ],
        };
        let dungeon = manifest.build(dir.path(), &GameSettings::default()).unwrap();
        assert_eq!(dungeon.len(), 2);
        assert!(dungeon.room(2).unwrap().items.is_empty());
        assert_eq!(dungeon.current_room().neighbor(Direction::North), None);
        assert_eq!(dungeon.current_room().neighbor(Direction::East), Some(2));
    }

    #[test]
    fn test_manifest_json() {
        let json = r#"{
            "start_room": 1,
            "rooms": [{
                "id": 1,
                "map": "a.csv",
                "decor": [{"sheet": "decor/barrel", "position": [40.0, 40.0],
                           "source": {"x": 0, "y": 0, "width": 16, "height": 24}}]
            }]
        }"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dungeon.json");
        fs::write(&path, json).unwrap();
        write_map(dir.path(), "a.csv");

        let manifest = DungeonManifest::from_json_file(&path).unwrap();
        let dungeon = manifest.build(dir.path(), &GameSettings::default()).unwrap();
        assert!(dungeon
            .current_room()
            .is_colliding_with_decor(Bounds::new(45, 60, 4, 4)));
    }
}
