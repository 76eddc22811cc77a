//! Bounded undo/redo history

use std::collections::VecDeque;
use tileforge_core::CellStore;

use super::command::Command;

/// Default number of commands kept on each history stack
pub const DEFAULT_MAX_COMMANDS: usize = 100;

/// LIFO stack with a fixed capacity.
///
/// Pushing onto a full stack evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct BoundedStack<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.min(DEFAULT_MAX_COMMANDS)),
            capacity,
        }
    }

    /// Push an item, returning the evicted oldest item if the stack was full
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }
        let evicted = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    /// Most recently pushed item
    pub fn peek(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

/// Command history for undo/redo
pub struct CommandHistory {
    undo_stack: BoundedStack<Box<dyn Command>>,
    redo_stack: BoundedStack<Box<dyn Command>>,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COMMANDS)
    }
}

impl std::fmt::Debug for CommandHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandHistory")
            .field("undo", &self.undo_stack.len())
            .field("redo", &self.redo_stack.len())
            .field("max_commands", &self.max_commands())
            .finish()
    }
}

impl CommandHistory {
    /// Create a history keeping at most `max_commands` entries per stack
    pub fn new(max_commands: usize) -> Self {
        Self {
            undo_stack: BoundedStack::new(max_commands),
            redo_stack: BoundedStack::new(max_commands),
        }
    }

    pub fn max_commands(&self) -> usize {
        self.undo_stack.capacity()
    }

    /// Execute a command and record it.
    ///
    /// A command that reports no change leaves both stacks untouched.
    /// Otherwise the redo stack is cleared, and undoable commands are pushed
    /// onto the undo stack.
    pub fn execute(&mut self, command: Box<dyn Command>, cells: &mut dyn CellStore) -> bool {
        if !command.execute(cells) {
            tracing::debug!("command '{}' made no change", command.description());
            return false;
        }

        self.redo_stack.clear();
        if command.is_undoable() {
            self.push_undo(command);
        }
        true
    }

    /// Add a command that has already been executed to the undo stack
    pub fn push_undo(&mut self, command: Box<dyn Command>) {
        if let Some(evicted) = self.undo_stack.push(command) {
            tracing::debug!("undo history full, dropped '{}'", evicted.description());
        }
    }

    /// Undo the last command. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self, cells: &mut dyn CellStore) -> bool {
        let Some(command) = self.undo_stack.pop() else {
            return false;
        };
        command.undo(cells);
        if let Some(evicted) = self.redo_stack.push(command) {
            tracing::debug!("redo history full, dropped '{}'", evicted.description());
        }
        true
    }

    /// Redo the last undone command. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self, cells: &mut dyn CellStore) -> bool {
        let Some(command) = self.redo_stack.pop() else {
            return false;
        };
        command.execute(cells);
        self.push_undo(command);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.peek().map(|c| c.description())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.peek().map(|c| c.description())
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::SetTilesCommand;
    use tileforge_core::{CellGrid, CellLookup, GridRegion, TileTypeId};

    fn paint(grid: &CellGrid, x: i32, tile: &str) -> Box<dyn Command> {
        Box::new(SetTilesCommand::fill(
            GridRegion::cell(x, 0),
            Some(TileTypeId::new(tile)),
            grid,
        ))
    }

    fn tile_at(grid: &CellGrid, x: i32) -> Option<&str> {
        grid.cell_type(x, 0).map(|t| t.as_str())
    }

    /// Counts executions, optionally reporting no change
    struct FixedResult {
        changes: bool,
        undoable: bool,
    }

    impl Command for FixedResult {
        fn execute(&self, _cells: &mut dyn CellStore) -> bool {
            self.changes
        }

        fn undo(&self, _cells: &mut dyn CellStore) {}

        fn is_undoable(&self) -> bool {
            self.undoable
        }

        fn description(&self) -> &str {
            "FixedResult"
        }
    }

    #[test]
    fn test_bounded_stack_evicts_oldest() {
        let mut stack = BoundedStack::new(2);
        assert_eq!(stack.push(1), None);
        assert_eq!(stack.push(2), None);
        assert_eq!(stack.push(3), Some(1));
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.peek(), Some(&2));
    }

    #[test]
    fn test_zero_capacity_stack_keeps_nothing() {
        let mut stack = BoundedStack::new(0);
        assert_eq!(stack.push("a"), Some("a"));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut grid = CellGrid::new();
        let mut history = CommandHistory::default();

        let command = paint(&grid, 0, "a");
        assert!(history.execute(command, &mut grid));
        assert_eq!(tile_at(&grid, 0), Some("a"));
        assert_eq!(history.undo_description(), Some("Set Tiles"));

        assert!(history.undo(&mut grid));
        assert_eq!(tile_at(&grid, 0), None);
        assert!(history.can_redo());

        assert!(history.redo(&mut grid));
        assert_eq!(tile_at(&grid, 0), Some("a"));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_and_redo_on_empty_history() {
        let mut grid = CellGrid::new();
        let mut history = CommandHistory::default();
        assert!(!history.undo(&mut grid));
        assert!(!history.redo(&mut grid));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_new_command_clears_redo() {
        let mut grid = CellGrid::new();
        let mut history = CommandHistory::default();

        let command = paint(&grid, 0, "a");
        history.execute(command, &mut grid);
        history.undo(&mut grid);
        assert_eq!(history.redo_len(), 1);

        let command = paint(&grid, 1, "b");
        history.execute(command, &mut grid);
        assert!(!history.can_redo());
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_capacity_drops_oldest_commands() {
        let mut grid = CellGrid::new();
        let mut history = CommandHistory::new(2);

        for (x, tile) in ["a", "b", "c"].into_iter().enumerate() {
            let command = paint(&grid, x as i32, tile);
            history.execute(command, &mut grid);
        }
        assert_eq!(history.undo_len(), 2);

        assert!(history.undo(&mut grid));
        assert!(history.undo(&mut grid));
        assert!(!history.undo(&mut grid));

        // Only the last two paints were reverted
        assert_eq!(tile_at(&grid, 0), Some("a"));
        assert_eq!(tile_at(&grid, 1), None);
        assert_eq!(tile_at(&grid, 2), None);
    }

    #[test]
    fn test_unchanged_command_leaves_stacks_alone() {
        let mut grid = CellGrid::new();
        let mut history = CommandHistory::default();

        let command = paint(&grid, 0, "a");
        history.execute(command, &mut grid);
        history.undo(&mut grid);

        let command = FixedResult {
            changes: false,
            undoable: true,
        };
        assert!(!history.execute(Box::new(command), &mut grid));
        assert_eq!(history.undo_len(), 0);
        assert_eq!(history.redo_len(), 1);
    }

    #[test]
    fn test_non_undoable_command_clears_redo_only() {
        let mut grid = CellGrid::new();
        let mut history = CommandHistory::default();

        let command = paint(&grid, 0, "a");
        history.execute(command, &mut grid);
        history.undo(&mut grid);

        let command = FixedResult {
            changes: true,
            undoable: false,
        };
        assert!(history.execute(Box::new(command), &mut grid));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_clear() {
        let mut grid = CellGrid::new();
        let mut history = CommandHistory::default();
        let command = paint(&grid, 0, "a");
        history.execute(command, &mut grid);
        let command = paint(&grid, 1, "b");
        history.execute(command, &mut grid);
        history.undo(&mut grid);

        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo_description(), None);
        // The grid itself is not touched
        assert_eq!(tile_at(&grid, 0), Some("a"));
    }
}
