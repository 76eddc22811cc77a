//! Level editor core for tileforge
//!
//! Edits to a [`CellGrid`](tileforge_core::CellGrid) are expressed as
//! [`Command`]s and recorded in a bounded [`CommandHistory`] so they can be
//! undone and redone. [`LevelEditor`] bundles a grid with its history and a
//! clipboard, and resolves autotile materials for painted cells.

pub mod commands;
pub mod editor;
pub mod settings;

pub use commands::{
    BoundedStack, Command, CommandHistory, SetTilesCommand, TileClipboard, DEFAULT_MAX_COMMANDS,
};
pub use editor::LevelEditor;
pub use settings::{EditorSettings, SettingsError};
