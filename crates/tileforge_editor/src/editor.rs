//! Level editor state: a grid edited through the command history

use tileforge_autotile::{Material, MaterialRef, TileSet};
use tileforge_core::{
    Array2D, CellGrid, CellLookup, GridRegion, GridSettings, TileSnapshot, TileTypeId,
};

use crate::commands::{Command, CommandHistory, SetTilesCommand, TileClipboard};
use crate::settings::EditorSettings;

/// A single editable grid layer with undo/redo.
///
/// All edits made through the editor go through [`CommandHistory`], so they
/// can be undone.
#[derive(Debug)]
pub struct LevelEditor {
    grid: CellGrid,
    grid_settings: GridSettings,
    history: CommandHistory,
    clipboard: TileClipboard,
}

impl Default for LevelEditor {
    fn default() -> Self {
        Self::from_settings(&EditorSettings::default())
    }
}

impl LevelEditor {
    /// Create an editor with an unbounded grid
    pub fn new(max_commands: usize) -> Self {
        Self::with_grid(CellGrid::new(), max_commands)
    }

    pub fn with_grid(grid: CellGrid, max_commands: usize) -> Self {
        Self {
            grid,
            grid_settings: GridSettings::default(),
            history: CommandHistory::new(max_commands),
            clipboard: TileClipboard::new(),
        }
    }

    pub fn from_settings(settings: &EditorSettings) -> Self {
        let mut editor = Self::new(settings.max_commands);
        editor.grid_settings = settings.grid.clone();
        editor
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn grid_settings(&self) -> &GridSettings {
        &self.grid_settings
    }

    pub fn grid_settings_mut(&mut self) -> &mut GridSettings {
        &mut self.grid_settings
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn clipboard(&self) -> &TileClipboard {
        &self.clipboard
    }

    /// Execute a command against the grid and record it
    pub fn execute(&mut self, command: Box<dyn Command>) -> bool {
        self.history.execute(command, &mut self.grid)
    }

    /// Write `tiles` into `region`
    pub fn set_tiles(&mut self, region: GridRegion, tiles: TileSnapshot) -> bool {
        let command = SetTilesCommand::new(region, tiles, &self.grid);
        self.execute(Box::new(command))
    }

    /// Write `tiles` into the `width` x `height` block starting at `(x, y)`
    pub fn set_tiles_at(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        tiles: TileSnapshot,
    ) -> bool {
        self.set_tiles(GridRegion::from_origin_size(x, y, width, height), tiles)
    }

    /// Fill every cell of `region` with `tile`; `None` erases
    pub fn fill(&mut self, region: GridRegion, tile: Option<TileTypeId>) -> bool {
        let description = if tile.is_some() { "Fill" } else { "Erase" };
        let command = SetTilesCommand::fill(region, tile, &self.grid).with_description(description);
        self.execute(Box::new(command))
    }

    /// Paint or erase a single cell
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Option<TileTypeId>) -> bool {
        let description = if tile.is_some() { "Paint Tile" } else { "Erase Tile" };
        let tiles = Array2D::filled(1, 1, tile);
        let command = SetTilesCommand::new(GridRegion::cell(x, y), tiles, &self.grid)
            .with_description(description);
        self.execute(Box::new(command))
    }

    /// Copy a region to the editor clipboard
    pub fn copy(&mut self, region: GridRegion) {
        self.clipboard.copy(region, &self.grid);
    }

    /// Copy a region to the clipboard and erase it
    pub fn cut(&mut self, region: GridRegion) -> bool {
        self.clipboard.copy(region, &self.grid);
        let command = SetTilesCommand::fill(region, None, &self.grid).with_description("Cut");
        self.execute(Box::new(command))
    }

    /// Paste the clipboard with its top-left corner at `(x, y)`.
    /// Returns `false` if the clipboard is empty.
    pub fn paste(&mut self, x: i32, y: i32) -> bool {
        match self.clipboard.paste_command(x, y, &self.grid) {
            Some(command) => self.execute(Box::new(command)),
            None => false,
        }
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.grid)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.grid)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Material reference for the tile at `(x, y)`, chosen by the tile type's rules
    pub fn material_at<'a>(
        &self,
        tile_set: &'a TileSet,
        x: i32,
        y: i32,
    ) -> Option<&'a MaterialRef> {
        let id = self.grid.cell_type(x, y)?;
        tile_set.material_at(id, &self.grid, x, y)
    }

    /// Material definition for the tile at `(x, y)`
    pub fn resolve_material<'a>(
        &self,
        tile_set: &'a TileSet,
        x: i32,
        y: i32,
    ) -> Option<&'a Material> {
        tile_set.resolve_cell(&self.grid, x, y)
    }
}
