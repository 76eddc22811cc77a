//! Rule-based autotiling and undoable grid editing for 2D tile maps
//!
//! This crate re-exports the tileforge crates:
//! - [`grid`] - Grid cells, regions and snapshots
//! - [`autotile`] - Tile sets, rules and material resolution
//! - [`editor`] - Undo/redo commands and the level editor (feature `editor`)

pub use tileforge_autotile as autotile;
pub use tileforge_core as grid;
#[cfg(feature = "editor")]
pub use tileforge_editor as editor;

pub mod prelude {
    pub use tileforge_autotile::{
        Dependency, Direction, Material, MaterialRef, Rule, RuleId, TileSet, TileSetError,
        TileSetManager, TileType,
    };
    pub use tileforge_core::{
        Array2D, CellGrid, CellLookup, CellStore, GridRegion, GridSettings, TileSnapshot,
        TileTypeId,
    };

    #[cfg(feature = "editor")]
    pub use tileforge_editor::{
        Command, CommandHistory, EditorSettings, LevelEditor, SetTilesCommand, TileClipboard,
    };
}
