//! # Tilemap
//!
//! Collision, door lookup and rendering over an immutable grid of tile indices.

use crate::game::{Bounds, Direction};
use crate::rendering::{SpriteDraw, Surface};
use crate::{TilecrawlError, TilecrawlResult};
use macroquad::color::WHITE;
use macroquad::math::Vec2;
use serde::{Deserialize, Serialize};

/// Index into the tileset, as exported by the map editor.
pub type TileIndex = i32;

/// Walkable cell with nothing drawn.
pub const EMPTY_TILE: TileIndex = -1;

/// Highest index of the wall row at the top of the tileset.
pub const LAST_SOLID_TILE: TileIndex = 10;

pub const DOOR_EAST: TileIndex = 99;
pub const DOOR_WEST: TileIndex = 98;
pub const DOOR_NORTH: TileIndex = 97;
pub const DOOR_SOUTH: TileIndex = 96;

/// Sheet name the tileset texture is registered under.
pub const TILESET_SHEET: &str = "tiles/tileset";

/// Returns true for indices that block movement.
pub fn is_solid_tile(tile: TileIndex) -> bool {
    (0..=LAST_SOLID_TILE).contains(&tile)
}

/// Returns the reserved door index leading in `direction`.
pub fn door_tile(direction: Direction) -> TileIndex {
    match direction {
        Direction::East => DOOR_EAST,
        Direction::West => DOOR_WEST,
        Direction::North => DOOR_NORTH,
        Direction::South => DOOR_SOUTH,
    }
}

/// How a tilemap marks the cells that lead to a neighboring room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DoorPolicy {
    /// Doors are the reserved indices 96..=99, one per direction.
    ReservedTiles,
    /// Any empty cell at the map edge is a way out.
    #[default]
    EmptyEdge,
}

impl DoorPolicy {
    /// Returns true if `tile` opens toward `direction` under this policy.
    pub fn is_exit(self, tile: Option<TileIndex>, direction: Direction) -> bool {
        match self {
            DoorPolicy::ReservedTiles => tile == Some(door_tile(direction)),
            DoorPolicy::EmptyEdge => tile == Some(EMPTY_TILE),
        }
    }
}

/// Rectangular grid of tile indices, stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<TileIndex>,
}

impl TileGrid {
    /// Builds a grid from rows, rejecting empty or ragged input.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecrawl::TileGrid;
    ///
    /// let grid = TileGrid::from_rows(vec![vec![1, 1], vec![-1, 1]]).unwrap();
    /// assert_eq!(grid.width(), 2);
    /// assert_eq!(grid.get(0, 1), Some(-1));
    /// assert!(TileGrid::from_rows(vec![vec![1, 1], vec![1]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<TileIndex>>) -> TilecrawlResult<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(TilecrawlError::InvalidMap("map has no cells".to_string()));
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(TilecrawlError::InvalidMap(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            cells.extend(row);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at a column and row, or `None` outside the grid.
    pub fn get(&self, column: usize, row: usize) -> Option<TileIndex> {
        if column < self.width && row < self.height {
            Some(self.cells[row * self.width + column])
        } else {
            None
        }
    }

    /// Iterates `(column, row, tile)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, TileIndex)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &tile)| (i % width, i / width, tile))
    }
}

/// A room's static geometry: tile grid, tile size and door policy.
#[derive(Debug, Clone)]
pub struct Tilemap {
    grid: TileGrid,
    tile_width: i32,
    tile_height: i32,
    tileset_columns: i32,
    door_policy: DoorPolicy,
}

impl Tilemap {
    /// Creates a tilemap with a 16-column tileset and the default door policy.
    pub fn new(grid: TileGrid, tile_width: i32, tile_height: i32) -> Self {
        Self {
            grid,
            tile_width: tile_width.max(1),
            tile_height: tile_height.max(1),
            tileset_columns: 16,
            door_policy: DoorPolicy::default(),
        }
    }

    /// Sets how many tiles one row of the tileset texture holds.
    pub fn with_tileset_columns(mut self, columns: i32) -> Self {
        self.tileset_columns = columns.max(1);
        self
    }

    pub fn with_door_policy(mut self, policy: DoorPolicy) -> Self {
        self.door_policy = policy;
        self
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn door_policy(&self) -> DoorPolicy {
        self.door_policy
    }

    pub fn tile_width(&self) -> i32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> i32 {
        self.tile_height
    }

    /// Map width in world pixels.
    pub fn pixel_width(&self) -> i32 {
        self.grid.width() as i32 * self.tile_width
    }

    /// Map height in world pixels.
    pub fn pixel_height(&self) -> i32 {
        self.grid.height() as i32 * self.tile_height
    }

    /// Tile under a world pixel, or `None` when the pixel lies outside the map.
    pub fn tile_at(&self, world_x: i32, world_y: i32) -> Option<TileIndex> {
        if world_x < 0 || world_y < 0 {
            return None;
        }
        let column = (world_x / self.tile_width) as usize;
        let row = (world_y / self.tile_height) as usize;
        self.grid.get(column, row)
    }

    /// Out-of-bounds pixels count as solid so nothing walks off the map.
    pub fn is_solid(&self, world_x: i32, world_y: i32) -> bool {
        match self.tile_at(world_x, world_y) {
            Some(tile) => is_solid_tile(tile),
            None => true,
        }
    }

    /// Tests the four corner pixels that lie inside `bounds`.
    ///
    /// The far edges are sampled one pixel in, so a box flush against a wall does not
    /// register as overlapping it.
    pub fn is_colliding(&self, bounds: Bounds) -> bool {
        self.is_solid(bounds.left(), bounds.top())
            || self.is_solid(bounds.right() - 1, bounds.top())
            || self.is_solid(bounds.left(), bounds.bottom() - 1)
            || self.is_solid(bounds.right() - 1, bounds.bottom() - 1)
    }

    /// Returns true if the tile under the pixel leads toward `direction`.
    pub fn is_exit_at(&self, world_x: i32, world_y: i32, direction: Direction) -> bool {
        self.door_policy
            .is_exit(self.tile_at(world_x, world_y), direction)
    }

    /// Emits one sprite per non-empty cell.
    pub fn draw(&self, surface: &mut dyn Surface) {
        for (column, row, tile) in self.grid.iter() {
            if tile < 0 {
                continue;
            }

            let source = Bounds::new(
                (tile % self.tileset_columns) * self.tile_width,
                (tile / self.tileset_columns) * self.tile_height,
                self.tile_width,
                self.tile_height,
            );
            let position = Vec2::new(
                (column as i32 * self.tile_width) as f32,
                (row as i32 * self.tile_height) as f32,
            );

            surface.draw_sprite(SpriteDraw {
                sheet: TILESET_SHEET,
                source: Some(source),
                position,
                tint: WHITE,
                flip_x: false,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::{DrawCommand, RecordingSurface};

    /// 4x3 room: wall ring with an open east doorway in the middle row.
    fn sample_map() -> Tilemap {
        let grid = TileGrid::from_rows(vec![
            vec![1, 1, 1, 1],
            vec![1, -1, 12, -1],
            vec![1, 1, 1, 1],
        ])
        .unwrap();
        Tilemap::new(grid, 16, 16)
    }

    #[test]
    fn test_tile_at_maps_pixels_to_cells() {
        let map = sample_map();
        assert_eq!(map.tile_at(0, 0), Some(1));
        assert_eq!(map.tile_at(17, 17), Some(-1));
        assert_eq!(map.tile_at(47, 31), Some(12));
        assert_eq!(map.tile_at(48, 16), Some(-1));
    }

    #[test]
    fn test_tile_at_out_of_bounds() {
        let map = sample_map();
        assert_eq!(map.tile_at(64, 0), None);
        assert_eq!(map.tile_at(0, 48), None);
        assert_eq!(map.tile_at(-1, 5), None);
        assert_eq!(map.tile_at(5, -15), None);
    }

    #[test]
    fn test_is_solid() {
        let map = sample_map();
        assert!(map.is_solid(0, 0));
        assert!(!map.is_solid(20, 20));
        assert!(!map.is_solid(40, 20));
        assert!(map.is_solid(-3, 20));
        assert!(map.is_solid(200, 20));
    }

    #[test]
    fn test_is_colliding_uses_inner_far_edge() {
        let map = sample_map();
        // Exactly filling the empty cell at (1,1): the far edges sample pixel 31, not 32.
        assert!(!map.is_colliding(Bounds::new(16, 16, 16, 16)));
        // One pixel further down reaches the wall row.
        assert!(map.is_colliding(Bounds::new(16, 17, 16, 16)));
        // Spanning the open middle row to the map edge is fine.
        assert!(!map.is_colliding(Bounds::new(16, 16, 48, 16)));
        // Poking past the right edge hits out-of-bounds.
        assert!(map.is_colliding(Bounds::new(17, 16, 48, 16)));
    }

    #[test]
    fn test_door_policies() {
        let grid = TileGrid::from_rows(vec![vec![DOOR_EAST, -1, 5]]).unwrap();
        let reserved = Tilemap::new(grid.clone(), 16, 16).with_door_policy(DoorPolicy::ReservedTiles);
        assert!(reserved.is_exit_at(2, 2, Direction::East));
        assert!(!reserved.is_exit_at(2, 2, Direction::West));
        assert!(!reserved.is_exit_at(20, 2, Direction::East));

        let empty = Tilemap::new(grid, 16, 16).with_door_policy(DoorPolicy::EmptyEdge);
        assert!(!empty.is_exit_at(2, 2, Direction::East));
        assert!(empty.is_exit_at(20, 2, Direction::East));
        assert!(empty.is_exit_at(20, 2, Direction::North));
        assert!(!empty.is_exit_at(40, 2, Direction::East));
        assert!(!empty.is_exit_at(100, 2, Direction::East));
    }

    #[test]
    fn test_pixel_size() {
        let map = sample_map();
        assert_eq!(map.pixel_width(), 64);
        assert_eq!(map.pixel_height(), 48);
    }

    #[test]
    fn test_draw_emits_one_sprite_per_non_empty_cell() {
        let map = sample_map().with_tileset_columns(10);
        let mut surface = RecordingSurface::new();
        map.draw(&mut surface);

        let sprites: Vec<_> = surface
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { sheet, source, position, .. } => {
                    Some((sheet.clone(), *source, *position))
                }
                _ => None,
            })
            .collect();
        assert_eq!(sprites.len(), 10);
        assert!(sprites.iter().all(|(sheet, _, _)| sheet == TILESET_SHEET));

        // Tile 12 at column 2, row 1 reads from tileset column 2, row 1.
        let floor = sprites
            .iter()
            .find(|(_, _, pos)| *pos == Vec2::new(32.0, 16.0))
            .unwrap();
        assert_eq!(floor.1, Some(Bounds::new(32, 16, 16, 16)));
    }

    #[test]
    fn test_grid_rejects_empty() {
        assert!(TileGrid::from_rows(Vec::new()).is_err());
        assert!(TileGrid::from_rows(vec![Vec::new()]).is_err());
    }
}
