//! Command pattern for undo/redo

use tileforge_core::{Array2D, CellLookup, CellStore, GridRegion, TileSnapshot, TileTypeId};

/// A reversible change to a cell store
pub trait Command: Send + Sync {
    /// Execute the command (do/redo).
    ///
    /// Returns `true` if the command counts as a committed change.
    fn execute(&self, cells: &mut dyn CellStore) -> bool;
    /// Undo the command
    fn undo(&self, cells: &mut dyn CellStore);
    /// Whether the command is recorded in the undo history
    fn is_undoable(&self) -> bool {
        false
    }
    /// Get a description of the command
    fn description(&self) -> &str;
}

/// Command that writes a block of tiles into a region.
///
/// The region's previous contents are captured when the command is built,
/// so undo restores exactly what was there at that time.
pub struct SetTilesCommand {
    region: GridRegion,
    tiles: TileSnapshot,
    previous: TileSnapshot,
    description: String,
}

impl SetTilesCommand {
    /// Build a command writing `tiles` into `region`.
    ///
    /// `tiles` may be smaller than the region; only the overlap is written.
    pub fn new(
        region: GridRegion,
        tiles: TileSnapshot,
        cells: &(impl CellLookup + ?Sized),
    ) -> Self {
        Self {
            previous: region.snapshot(cells),
            region,
            tiles,
            description: "Set Tiles".to_string(),
        }
    }

    /// Build a command filling every cell of `region` with `tile`
    pub fn fill(
        region: GridRegion,
        tile: Option<TileTypeId>,
        cells: &(impl CellLookup + ?Sized),
    ) -> Self {
        let tiles = Array2D::filled(region.width() as usize, region.height() as usize, tile);
        Self::new(region, tiles, cells)
    }

    /// Replace the description shown in the history
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn region(&self) -> &GridRegion {
        &self.region
    }

    /// Tiles applied by execute/redo
    pub fn tiles(&self) -> &TileSnapshot {
        &self.tiles
    }

    /// Tiles restored by undo
    pub fn previous(&self) -> &TileSnapshot {
        &self.previous
    }
}

impl Command for SetTilesCommand {
    fn execute(&self, cells: &mut dyn CellStore) -> bool {
        self.region.apply(cells, &self.tiles);
        true
    }

    fn undo(&self, cells: &mut dyn CellStore) {
        self.region.apply(cells, &self.previous);
    }

    fn is_undoable(&self) -> bool {
        true
    }

    fn description(&self) -> &str {
        &self.description
    }
}
