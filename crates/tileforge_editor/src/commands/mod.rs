//! Undo/redo command system

pub mod clipboard;
mod command;
mod history;

pub use clipboard::TileClipboard;
pub use command::{Command, SetTilesCommand};
pub use history::{BoundedStack, CommandHistory, DEFAULT_MAX_COMMANDS};
