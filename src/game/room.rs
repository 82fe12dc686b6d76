//! # Room
//!
//! A node of the dungeon graph: static geometry, the entities placed in it and the
//! exits to neighboring rooms.

use crate::game::{
    AnimationLibrary, Bounds, DecorObject, Direction, Enemy, Entity, Item, Player, RoomId,
    Tilemap,
};
use crate::rendering::Surface;
use log::debug;
use std::collections::HashMap;

/// A room and everything inside it.
///
/// Neighbors are referenced by id only; the [`DungeonGraph`](crate::DungeonGraph)
/// resolves them.
#[derive(Debug, Clone)]
pub struct Room {
    id: RoomId,
    tilemap: Tilemap,
    connections: HashMap<Direction, RoomId>,
    pub items: Vec<Item>,
    pub enemies: Vec<Enemy>,
    pub decor: Vec<DecorObject>,
}

impl Room {
    pub fn new(id: RoomId, tilemap: Tilemap) -> Self {
        Self {
            id,
            tilemap,
            connections: HashMap::new(),
            items: Vec::new(),
            enemies: Vec::new(),
            decor: Vec::new(),
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn tilemap(&self) -> &Tilemap {
        &self.tilemap
    }

    /// Links an exit to another room. The first link for a direction sticks.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecrawl::{Direction, Room, TileGrid, Tilemap};
    ///
    /// let grid = TileGrid::from_rows(vec![vec![-1]]).unwrap();
    /// let mut room = Room::new(1, Tilemap::new(grid, 16, 16));
    /// room.connect(Direction::East, 2);
    /// room.connect(Direction::East, 3);
    /// assert_eq!(room.neighbor(Direction::East), Some(2));
    /// ```
    pub fn connect(&mut self, direction: Direction, room_id: RoomId) {
        self.connections.entry(direction).or_insert(room_id);
    }

    pub fn neighbor(&self, direction: Direction) -> Option<RoomId> {
        self.connections.get(&direction).copied()
    }

    pub fn connections(&self) -> &HashMap<Direction, RoomId> {
        &self.connections
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn add_decor(&mut self, decor: DecorObject) {
        self.decor.push(decor);
    }

    /// Returns true if `bounds` overlaps any decor object.
    pub fn is_colliding_with_decor(&self, bounds: Bounds) -> bool {
        self.decor.iter().any(|d| bounds.intersects(&d.bounds()))
    }

    /// Resolves one frame of interaction between the player and the room.
    ///
    /// Items go first: every active item under the player is taken, scored and handed
    /// to `on_item_collected`. Then each enemy moves and hurts the player on contact.
    /// Both lists are walked in insertion order.
    pub fn update<F>(&mut self, dt: f32, player: &mut Player, mut on_item_collected: F)
    where
        F: FnMut(&Item),
    {
        let player_bounds = player.bounds();
        for item in self.items.iter_mut() {
            if !item.is_active() || !player_bounds.intersects(&item.bounds()) {
                continue;
            }
            if let Some(points) = item.collect() {
                player.add_score(points);
                debug!("Room {}: collected {} (+{})", self.id, item.name(), points);
                on_item_collected(&*item);
            }
        }

        for enemy in self.enemies.iter_mut() {
            enemy.update(player, dt);
            if player.touches(&*enemy) {
                player.take_damage(enemy.damage());
            }
        }
    }

    /// Draws the tilemap, decor, items and enemies, back to front.
    pub fn draw(&self, surface: &mut dyn Surface, animations: &AnimationLibrary) {
        self.tilemap.draw(surface);
        for decor in &self.decor {
            decor.draw(surface);
        }
        for item in &self.items {
            item.draw(surface);
        }
        for enemy in &self.enemies {
            enemy.draw(surface, animations.enemy(enemy.kind()));
        }
    }
}
