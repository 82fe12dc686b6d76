//! # Map Loading
//!
//! Reads tile grids from the CSV layers exported by the map editor.

use crate::game::{TileGrid, TileIndex, EMPTY_TILE};
use crate::{TilecrawlError, TilecrawlResult};
use log::debug;
use std::path::Path;

/// Parses one cell. Garbage becomes 0 and every negative value becomes empty.
fn parse_cell(cell: &str) -> TileIndex {
    match cell.trim().parse::<TileIndex>() {
        Ok(value) if value < 0 => EMPTY_TILE,
        Ok(value) => value,
        Err(_) => 0,
    }
}

/// Parses CSV text into a grid, one row per non-blank line.
///
/// The first row fixes the width: shorter rows are padded with 0 and longer rows are
/// cut. Only input without any rows is an error.
///
/// # Examples
///
/// ```
/// use tilecrawl::parse_map_csv;
///
/// let grid = parse_map_csv("-1,-1,-1\n0,0,0\n-1,-1,-1").unwrap();
/// assert_eq!(grid.width(), 3);
/// assert_eq!(grid.get(1, 1), Some(0));
/// assert_eq!(grid.get(2, 2), Some(-1));
/// ```
pub fn parse_map_csv(text: &str) -> TilecrawlResult<TileGrid> {
    let mut rows: Vec<Vec<TileIndex>> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split(',').map(parse_cell).collect())
        .collect();

    let width = match rows.first() {
        Some(first) => first.len(),
        None => return Err(TilecrawlError::InvalidMap("map has no rows".to_string())),
    };
    for row in rows.iter_mut() {
        row.resize(width, 0);
    }

    TileGrid::from_rows(rows)
}

/// Reads and parses a CSV map file.
pub fn load_map_csv(path: impl AsRef<Path>) -> TilecrawlResult<TileGrid> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| TilecrawlError::MapLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = parse_map_csv(&text)?;
    debug!(
        "Loaded map {} ({}x{})",
        path.display(),
        grid.width(),
        grid.height()
    );
    Ok(grid)
}
