//! # Dungeon Graph
//!
//! Registry of every room in the dungeon plus the pointer to the one being played.

use crate::game::{Room, RoomId};
use log::{debug, info};
use std::collections::HashMap;

/// All rooms of a session, keyed by id, and the current room.
///
/// The graph is built around a start room, so a current room always exists. Rooms are
/// never removed.
#[derive(Debug, Clone)]
pub struct DungeonGraph {
    rooms: Vec<Room>,
    index: HashMap<RoomId, usize>,
    current: usize,
}

impl DungeonGraph {
    /// Creates a graph whose current and start room is `start`.
    pub fn new(start: Room) -> Self {
        let mut index = HashMap::new();
        index.insert(start.id(), 0);
        Self {
            rooms: vec![start],
            index,
            current: 0,
        }
    }

    /// Registers a room. A room whose id is already taken is dropped.
    ///
    /// Returns true if the room was added.
    pub fn add_room(&mut self, room: Room) -> bool {
        let id = room.id();
        if self.index.contains_key(&id) {
            debug!("Room {} already registered, ignoring duplicate", id);
            return false;
        }
        self.index.insert(id, self.rooms.len());
        self.rooms.push(room);
        true
    }

    pub fn contains(&self, id: RoomId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.index.get(&id).map(|&i| &self.rooms[i])
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        let i = *self.index.get(&id)?;
        Some(&mut self.rooms[i])
    }

    pub fn current_id(&self) -> RoomId {
        self.rooms[self.current].id()
    }

    /// The room the graph was built around.
    pub fn start_id(&self) -> RoomId {
        self.rooms[0].id()
    }

    pub fn current_room(&self) -> &Room {
        &self.rooms[self.current]
    }

    pub fn current_room_mut(&mut self) -> &mut Room {
        &mut self.rooms[self.current]
    }

    /// Makes `id` the current room. Unknown ids leave the current room unchanged.
    ///
    /// Returns true if the current room is now `id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecrawl::{DungeonGraph, Room, TileGrid, Tilemap};
    ///
    /// let map = Tilemap::new(TileGrid::from_rows(vec![vec![-1]]).unwrap(), 16, 16);
    /// let mut dungeon = DungeonGraph::new(Room::new(1, map.clone()));
    /// dungeon.add_room(Room::new(2, map));
    /// assert!(dungeon.change_room(2));
    /// assert!(!dungeon.change_room(42));
    /// assert_eq!(dungeon.current_id(), 2);
    /// ```
    pub fn change_room(&mut self, id: RoomId) -> bool {
        let Some(&i) = self.index.get(&id) else {
            debug!("Ignoring change to unknown room {}", id);
            return false;
        };
        if i != self.current {
            info!("Entering room {}", id);
        }
        self.current = i;
        true
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Room ids in ascending order.
    pub fn room_ids(&self) -> Vec<RoomId> {
        let mut ids: Vec<RoomId> = self.index.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }
}
