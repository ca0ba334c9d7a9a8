//! # History
//!
//! Linear undo/redo over committed tree snapshots.
//!
//! Snapshots share subtrees through `Arc`, so holding a hundred of
//! them costs little more than holding one. A new checkpoint clears
//! the redo stack; live preview edits never reach this type at all,
//! which bounds growth to one entry per user gesture.

use stencil_model::PageContent;

/// Undo/redo stacks of committed snapshots.
#[derive(Debug)]
pub struct History {
    /// Trees as they were *before* each commit (most recent last).
    undo_stack: Vec<PageContent>,

    /// Trees undone from (most recent last).
    redo_stack: Vec<PageContent>,

    /// Maximum undo depth (0 = unlimited).
    max_levels: usize,
}

impl History {
    /// Default depth of 100 checkpoints.
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record the tree as it was before a commit.
    pub fn checkpoint(&mut self, before: PageContent) {
        self.undo_stack.push(before);
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }
        // A new commit invalidates any undone future.
        self.redo_stack.clear();
    }

    /// Step back one checkpoint. `current` is the tree being replaced;
    /// it moves onto the redo stack.
    pub fn undo(&mut self, current: PageContent) -> Option<PageContent> {
        let restored = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(restored)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: PageContent) -> Option<PageContent> {
        let restored = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
