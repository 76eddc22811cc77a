//! Clipboard for copy/paste of tile regions

use tileforge_core::{CellLookup, GridRegion, TileSnapshot};

use super::command::SetTilesCommand;

/// Tile data copied from a region of the grid
#[derive(Debug, Clone, Default)]
pub struct TileClipboard {
    content: Option<TileSnapshot>,
}

impl TileClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the contents of a region, replacing any previous content
    pub fn copy(&mut self, region: GridRegion, cells: &(impl CellLookup + ?Sized)) {
        let snapshot = region.snapshot(cells);
        tracing::debug!(
            "copied {}x{} tiles to clipboard",
            snapshot.width(),
            snapshot.height()
        );
        self.content = Some(snapshot);
    }

    /// Build a command that pastes the content with its top-left corner at `(x, y)`
    pub fn paste_command(
        &self,
        x: i32,
        y: i32,
        cells: &(impl CellLookup + ?Sized),
    ) -> Option<SetTilesCommand> {
        let content = self.content.as_ref()?;
        let region =
            GridRegion::from_origin_size(x, y, content.width() as u32, content.height() as u32);
        Some(SetTilesCommand::new(region, content.clone(), cells).with_description("Paste"))
    }

    pub fn content(&self) -> Option<&TileSnapshot> {
        self.content.as_ref()
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    pub fn clear(&mut self) {
        self.content = None;
    }
}
