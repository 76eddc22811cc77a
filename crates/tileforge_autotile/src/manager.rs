//! Registry of loaded tile sets

use std::collections::HashMap;
use std::path::Path;

use crate::persist::TileSetError;
use crate::tileset::TileSet;

/// Named collection of tile sets.
///
/// Tile sets are keyed by name, which is the file path for tile sets
/// loaded from disk.
#[derive(Debug)]
pub struct TileSetManager {
    tile_sets: HashMap<String, TileSet>,
    empty: TileSet,
}

impl Default for TileSetManager {
    fn default() -> Self {
        Self {
            tile_sets: HashMap::new(),
            empty: TileSet::new("<empty>"),
        }
    }
}

impl TileSetManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a tile set file and register it under its path.
    ///
    /// On failure nothing is registered and the error is logged and returned.
    pub fn load(&mut self, path: &Path) -> Result<&TileSet, TileSetError> {
        let name = path.to_string_lossy().to_string();
        match TileSet::load(path) {
            Ok(tile_set) => {
                tracing::debug!("loaded tile set '{}' ({} types)", name, tile_set.len());
                self.tile_sets.insert(name.clone(), tile_set);
                Ok(&self.tile_sets[&name])
            }
            Err(e) => {
                tracing::error!("Failed to load tile set file '{}': {}", name, e);
                Err(e)
            }
        }
    }

    /// Register a tile set under a name, returning any tile set it replaced
    pub fn insert(&mut self, name: impl Into<String>, tile_set: TileSet) -> Option<TileSet> {
        self.tile_sets.insert(name.into(), tile_set)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tile_sets.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&TileSet> {
        self.tile_sets.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TileSet> {
        self.tile_sets.get_mut(name)
    }

    /// Look up a tile set, falling back to a shared empty tile set
    pub fn get_or_empty(&self, name: &str) -> &TileSet {
        self.tile_sets.get(name).unwrap_or(&self.empty)
    }

    /// Return the tile set registered under `path`, loading it first if needed
    pub fn get_or_load(&mut self, path: &Path) -> Result<&TileSet, TileSetError> {
        let name = path.to_string_lossy();
        if self.tile_sets.contains_key(name.as_ref()) {
            return Ok(&self.tile_sets[name.as_ref()]);
        }
        self.load(path)
    }

    pub fn remove(&mut self, name: &str) -> Option<TileSet> {
        self.tile_sets.remove(name)
    }

    /// Names of all registered tile sets, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tile_sets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tile_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tile_sets.is_empty()
    }
}
