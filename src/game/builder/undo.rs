//! Undo/Redo Ledger for Placed Modules
//!
//! The placement session reports every committed module through the
//! [`UndoLedger`] trait. [`UndoStack`] is the bundled implementation: a
//! bounded command history with a cursor, stepping backwards and forwards.
//! Reversing a command (destroying or recreating the node) is up to the
//! host that owns the scene.
//!
//! # Usage
//!
//! ```ignore
//! use modular_builder_engine::game::builder::undo::{UndoLedger, UndoStack, UndoCommand};
//!
//! let mut stack = UndoStack::new();
//! stack.register_creation(node, "Object Spawned: Wall_Plain_1");
//!
//! if let Some(UndoCommand::CreateModule { node, .. }) = stack.undo() {
//!     scene.destroy(*node);
//! }
//! ```

use crate::world::NodeId;

// ============================================================================
// TYPES
// ============================================================================

/// An undoable builder command.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoCommand {
    /// A module was committed into the building.
    CreateModule {
        /// The placed module's root node
        node: NodeId,
        /// Human-readable history label
        label: String,
    },
}

impl UndoCommand {
    pub fn label(&self) -> &str {
        match self {
            UndoCommand::CreateModule { label, .. } => label,
        }
    }
}

/// Receives creation records from the placement session.
pub trait UndoLedger {
    /// Record that `node` was created, under the history entry `label`.
    fn register_creation(&mut self, node: NodeId, label: &str);
}

// ============================================================================
// UNDO STACK
// ============================================================================

/// Maximum number of commands stored in the undo stack.
/// When exceeded, the oldest commands are dropped.
const MAX_UNDO_SIZE: usize = 50;

/// A bounded undo/redo stack.
///
/// Commands at `[0..cursor]` are undoable, commands at `[cursor..len]` are
/// redoable. Pushing after an undo discards the redo history.
#[derive(Debug)]
pub struct UndoStack {
    commands: Vec<UndoCommand>,
    cursor: usize,
    max_size: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoStack {
    /// Create a new empty undo stack with the default max size (50).
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            cursor: 0,
            max_size: MAX_UNDO_SIZE,
        }
    }

    /// Push a new command onto the stack, dropping redo history and, past
    /// the size limit, the oldest entry.
    pub fn push(&mut self, command: UndoCommand) {
        self.commands.truncate(self.cursor);
        self.commands.push(command);
        self.cursor = self.commands.len();

        if self.commands.len() > self.max_size {
            let excess = self.commands.len() - self.max_size;
            self.commands.drain(0..excess);
            self.cursor = self.commands.len();
        }
    }

    /// Step back; returns the command to reverse.
    pub fn undo(&mut self) -> Option<&UndoCommand> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.commands.get(self.cursor)
    }

    /// Step forward; returns the command to re-apply.
    pub fn redo(&mut self) -> Option<&UndoCommand> {
        let cmd = self.commands.get(self.cursor)?;
        self.cursor += 1;
        Some(cmd)
    }

    /// Most recent undoable command.
    pub fn last(&self) -> Option<&UndoCommand> {
        self.cursor.checked_sub(1).and_then(|i| self.commands.get(i))
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    pub fn undo_count(&self) -> usize {
        self.cursor
    }

    pub fn redo_count(&self) -> usize {
        self.commands.len() - self.cursor
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.cursor = 0;
    }
}

impl UndoLedger for UndoStack {
    fn register_creation(&mut self, node: NodeId, label: &str) {
        self.push(UndoCommand::CreateModule {
            node,
            label: label.to_string(),
        });
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_cmd(index: u32) -> UndoCommand {
        UndoCommand::CreateModule {
            node: NodeId(index),
            label: format!("Object Spawned: Wall_{index}"),
        }
    }

    #[test]
    fn test_new_stack_is_empty() {
        let stack = UndoStack::new();
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
        assert_eq!(stack.undo_count(), 0);
        assert_eq!(stack.redo_count(), 0);
        assert!(stack.last().is_none());
    }

    #[test]
    fn test_register_creation_pushes_labelled_entry() {
        let mut stack = UndoStack::new();
        stack.register_creation(NodeId(7), "Object Spawned: Floor_Tile_1");

        assert_eq!(stack.undo_count(), 1);
        let last = stack.last().unwrap();
        assert_eq!(last.label(), "Object Spawned: Floor_Tile_1");
        assert!(matches!(last, UndoCommand::CreateModule { node: NodeId(7), .. }));
    }

    #[test]
    fn test_undo_and_redo() {
        let mut stack = UndoStack::new();
        stack.push(create_cmd(0));
        stack.push(create_cmd(1));

        assert_eq!(stack.undo(), Some(&create_cmd(1)));
        assert_eq!(stack.undo(), Some(&create_cmd(0)));
        assert!(stack.undo().is_none());

        assert_eq!(stack.redo(), Some(&create_cmd(0)));
        assert_eq!(stack.redo(), Some(&create_cmd(1)));
        assert!(stack.redo().is_none());
    }

    #[test]
    fn test_push_truncates_redo_history() {
        let mut stack = UndoStack::new();
        stack.push(create_cmd(0));
        stack.push(create_cmd(1));
        stack.push(create_cmd(2));

        stack.undo();
        stack.undo();
        assert_eq!(stack.redo_count(), 2);

        stack.push(create_cmd(99));
        assert!(!stack.can_redo());
        assert_eq!(stack.undo_count(), 2);
    }

    #[test]
    fn test_max_size_enforcement() {
        let mut stack = UndoStack::new();
        for i in 0..55 {
            stack.push(create_cmd(i));
        }

        assert_eq!(stack.undo_count(), 50);
        assert_eq!(stack.redo_count(), 0);

        // The oldest five were dropped
        let mut oldest = None;
        while let Some(cmd) = stack.undo() {
            oldest = Some(cmd.clone());
        }
        assert_eq!(oldest, Some(create_cmd(5)));
    }

    #[test]
    fn test_clear() {
        let mut stack = UndoStack::new();
        stack.push(create_cmd(0));
        stack.push(create_cmd(1));
        stack.clear();
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }
}
