//! # Item Factory
//!
//! Creates collectibles by kind with their standard names and values.

use crate::config::DEFAULT_ITEM_VALUE;
use crate::game::{Item, ItemId, ItemKind};
use macroquad::math::Vec2;

/// Hands out items with dungeon-unique ids.
#[derive(Debug, Clone)]
pub struct ItemFactory {
    next_id: ItemId,
}

impl Default for ItemFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemFactory {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Display name for an item kind.
    pub fn name_of(kind: ItemKind) -> &'static str {
        match kind {
            ItemKind::Coin => "Gold Coin",
            ItemKind::Chest => "Treasure Chest",
        }
    }

    /// Creates an item of `kind` at `position`.
    ///
    /// # Examples
    ///
    /// ```
    /// use macroquad::math::Vec2;
    /// use tilecrawl::{ItemFactory, ItemKind};
    ///
    /// let mut items = ItemFactory::new();
    /// let coin = items.create(ItemKind::Coin, Vec2::new(200.0, 200.0));
    /// let chest = items.create(ItemKind::Chest, Vec2::new(150.0, 100.0));
    /// assert_eq!(coin.name(), "Gold Coin");
    /// assert!(chest.is_victory_item());
    /// assert_ne!(coin.id(), chest.id());
    /// ```
    pub fn create(&mut self, kind: ItemKind, position: Vec2) -> Item {
        let id = self.next_id;
        self.next_id += 1;
        Item::new(id, Self::name_of(kind), kind, DEFAULT_ITEM_VALUE, position)
    }
}
