//! Sparse grid cell storage

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifier of a tile type, as stored in a grid cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileTypeId(String);

impl TileTypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TileTypeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TileTypeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Read access to a grid of tile-type cells.
///
/// Any coordinate is valid. Cells that were never written, or that lie
/// outside the store's bounds, read as `None`.
pub trait CellLookup {
    fn cell_type(&self, x: i32, y: i32) -> Option<&TileTypeId>;
}

/// Write access to a grid of tile-type cells.
///
/// Writing `None` deletes the cell, writing `Some` upserts it.
pub trait CellStore: CellLookup {
    fn set_cell_type(&mut self, x: i32, y: i32, tile: Option<TileTypeId>);
}

/// Hash-map backed cell store.
///
/// An unbounded grid accepts any coordinate. A bounded grid treats cells
/// outside `0..width` x `0..height` as permanently empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellGrid {
    cells: HashMap<(i32, i32), TileTypeId>,
    bounds: Option<(u32, u32)>,
}

impl CellGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid limited to `width` x `height` cells starting at the origin
    pub fn with_bounds(width: u32, height: u32) -> Self {
        Self {
            cells: HashMap::new(),
            bounds: Some((width, height)),
        }
    }

    pub fn bounds(&self) -> Option<(u32, u32)> {
        self.bounds
    }

    /// Check whether a coordinate can hold a tile
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        match self.bounds {
            Some((width, height)) => x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height,
            None => true,
        }
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate occupied cells as `((x, y), tile)` in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), &TileTypeId)> {
        self.cells.iter().map(|(pos, tile)| (*pos, tile))
    }

    /// Remove every cell
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Remove every cell holding `tile`. Returns the number of cells removed.
    pub fn remove_type(&mut self, tile: &TileTypeId) -> usize {
        let before = self.cells.len();
        self.cells.retain(|_, t| t != tile);
        before - self.cells.len()
    }
}

impl CellLookup for CellGrid {
    fn cell_type(&self, x: i32, y: i32) -> Option<&TileTypeId> {
        self.cells.get(&(x, y))
    }
}

impl CellStore for CellGrid {
    fn set_cell_type(&mut self, x: i32, y: i32, tile: Option<TileTypeId>) {
        if !self.in_bounds(x, y) {
            return;
        }
        match tile {
            Some(tile) => {
                self.cells.insert((x, y), tile);
            }
            None => {
                self.cells.remove(&(x, y));
            }
        }
    }
}

/// Configuration for a single grid layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// World size of a single cell
    pub cell_size: f32,
    /// Name of the tile set the layer's tile types belong to
    pub tile_set: String,
    pub is_collidable: bool,
    /// Render layer
    pub layer: i32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            cell_size: 32.0,
            tile_set: "<missing>".to_string(),
            is_collidable: false,
            layer: 0,
        }
    }
}
