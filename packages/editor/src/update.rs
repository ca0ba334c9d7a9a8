//! # Update Protocol
//!
//! The single entry point every settings control goes through, split
//! into two explicit operations:
//!
//! - [`Editor::preview_update`]: live edit. The tree changes so the
//!   preview tracks the control (a slider mid-drag, text mid-typing),
//!   but no history checkpoint is made and nothing is persisted.
//! - [`Editor::commit_update`]: the same tree change, plus a history
//!   checkpoint. The caller forwards committed trees to the autosave
//!   scheduler.
//!
//! Caller contract for continuous gestures: preview on every
//! intermediate change, exactly one trailing commit with the final
//! value (mouse-up, blur, input debounce). Discrete controls commit
//! directly. This bounds history to one entry per gesture while the
//! preview stays live.
//!
//! Structural edits (insert, remove, move, preset change) are always
//! commits.

use stencil_model::{
    merge_settings, sanitize_anchor, Animation, Block, BlockData, BlockStyles, BlockTheme,
    ContainerPath, NodePath, PageContent, Preset,
};

use crate::history::History;
use crate::presets::apply_preset;
use crate::resolver;

/// One settings-panel edit to the currently selected block.
///
/// Styles and animation merge into their sub-objects; a patch never
/// replaces fields it does not mention.
#[derive(Debug, Clone)]
pub enum BlockPatch {
    /// Replace the whole `data` record. The variant must match the
    /// block's kind (layout data on layout blocks, settings elsewhere).
    ReplaceData(BlockData),

    /// Shallow-merge keys into the settings object.
    MergeSettings(serde_json::Map<String, serde_json::Value>),

    /// Merge spacing overrides field-wise (values are clamped).
    MergeStyles(BlockStyles),

    /// Replace or clear the animation metadata.
    SetAnimation(Option<Animation>),

    /// Set or clear the anchor (sanitized to `[a-z0-9-_]`).
    SetAnchor(Option<String>),

    /// Set or clear the block theme.
    SetTheme(Option<BlockTheme>),
}

impl BlockPatch {
    /// Apply to a block, in place. `false` means the patch does not
    /// fit this block and nothing changed.
    fn apply_to(self, block: &mut Block) -> bool {
        match self {
            BlockPatch::ReplaceData(data) => {
                match (&data, block.kind.is_layout()) {
                    (BlockData::Layout(layout), true) => {
                        if layout.columns.len() != layout.preset.column_count() {
                            tracing::warn!(
                                id = %block.id,
                                "rejected layout data with mismatched column arity"
                            );
                            return false;
                        }
                    }
                    (BlockData::Settings(_), false) => {}
                    _ => {
                        tracing::warn!(
                            id = %block.id,
                            kind = %block.kind,
                            "rejected data record of the wrong shape for this kind"
                        );
                        return false;
                    }
                }
                block.data = data;
                true
            }
            BlockPatch::MergeSettings(overlay) => match &mut block.data {
                BlockData::Settings(settings) => {
                    merge_settings(settings, &overlay);
                    true
                }
                BlockData::Layout(_) => {
                    tracing::warn!(id = %block.id, "settings merge on a layout block ignored");
                    false
                }
            },
            BlockPatch::MergeStyles(patch) => {
                let current = block.styles.unwrap_or_default();
                block.styles = Some(current.merged(&patch));
                true
            }
            BlockPatch::SetAnimation(animation) => {
                block.animation = animation;
                true
            }
            BlockPatch::SetAnchor(anchor) => {
                block.anchor_id = anchor.map(|raw| sanitize_anchor(&raw));
                true
            }
            BlockPatch::SetTheme(theme) => {
                block.block_theme = theme;
                true
            }
        }
    }
}

/// The block-tree editing engine for one open page.
///
/// Owns the working tree and the undo history. All mutation funnels
/// through this type; callers re-render from [`Editor::content`] after
/// every call.
#[derive(Debug)]
pub struct Editor {
    content: PageContent,
    history: History,
}

impl Editor {
    pub fn new(content: PageContent) -> Self {
        Self {
            content,
            history: History::new(),
        }
    }

    pub fn with_history(content: PageContent, history: History) -> Self {
        Self { content, history }
    }

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Live edit: update the tree for preview only. Returns whether
    /// anything changed.
    pub fn preview_update(&mut self, path: &NodePath, patch: BlockPatch) -> bool {
        match self.patched(path, patch) {
            Some(next) => {
                self.content = next;
                true
            }
            None => false,
        }
    }

    /// Committed edit: update the tree and checkpoint the previous
    /// state. Returns whether anything changed (a failed patch neither
    /// checkpoints nor dirties anything).
    pub fn commit_update(&mut self, path: &NodePath, patch: BlockPatch) -> bool {
        match self.patched(path, patch) {
            Some(next) => {
                self.commit(next);
                true
            }
            None => false,
        }
    }

    /// Insert a block into a container at `index`. Always a commit.
    pub fn insert_block(&mut self, container: &ContainerPath, index: usize, block: Block) -> bool {
        match resolver::try_insert(&self.content, container, index, block) {
            Some(next) => {
                self.commit(next);
                true
            }
            None => {
                tracing::warn!(?container, "insert: container did not resolve");
                false
            }
        }
    }

    /// Delete the block at `path` and its whole subtree. Always a
    /// commit.
    pub fn remove_block(&mut self, path: &NodePath) -> bool {
        match resolver::try_remove(&self.content, path) {
            Some((next, _)) => {
                self.commit(next);
                true
            }
            None => {
                tracing::warn!(?path, "remove: path did not resolve");
                false
            }
        }
    }

    /// Drag-reorder: move a block (with its subtree) into another
    /// container. Always a commit.
    pub fn move_block(
        &mut self,
        from: &NodePath,
        to_container: &ContainerPath,
        to_index: usize,
    ) -> bool {
        match resolver::try_move(&self.content, from, to_container, to_index) {
            Some(next) => {
                self.commit(next);
                true
            }
            None => {
                tracing::warn!(?from, ?to_container, "move: path did not resolve");
                false
            }
        }
    }

    /// Change a layout block's column preset, redistributing its
    /// children losslessly. Always a commit.
    pub fn change_preset(&mut self, path: &NodePath, preset: Preset) -> bool {
        let Some(block) = resolver::find(&self.content, path) else {
            tracing::warn!(?path, "change_preset: path did not resolve");
            return false;
        };
        let Some(layout) = block.layout_data() else {
            tracing::warn!(?path, "change_preset: block is not a layout");
            return false;
        };

        let mut updated = block.clone();
        updated.data = BlockData::Layout(apply_preset(layout, preset));
        match resolver::try_replace(&self.content, path, updated) {
            Some(next) => {
                self.commit(next);
                true
            }
            None => false,
        }
    }

    /// Step back to the previous committed snapshot.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.content.clone()) {
            Some(previous) => {
                self.content = previous;
                true
            }
            None => false,
        }
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.content.clone()) {
            Some(next) => {
                self.content = next;
                true
            }
            None => false,
        }
    }

    fn patched(&self, path: &NodePath, patch: BlockPatch) -> Option<PageContent> {
        let Some(block) = resolver::find(&self.content, path) else {
            tracing::warn!(?path, "update: path did not resolve, tree unchanged");
            return None;
        };
        let mut updated = block.clone();
        if !patch.apply_to(&mut updated) {
            return None;
        }
        resolver::try_replace(&self.content, path, updated)
    }

    fn commit(&mut self, next: PageContent) {
        let before = std::mem::replace(&mut self.content, next);
        self.history.checkpoint(before);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stencil_model::BlockKind;

    fn editor_with_text() -> Editor {
        Editor::new(PageContent::from_blocks(vec![Block::new(BlockKind::Text)]))
    }

    #[test]
    fn previews_do_not_checkpoint() {
        let mut editor = editor_with_text();
        for i in 0..10 {
            let mut patch = serde_json::Map::new();
            patch.insert("content".to_string(), json!(format!("draft {i}")));
            assert!(editor.preview_update(&NodePath::root(0), BlockPatch::MergeSettings(patch)));
        }
        assert_eq!(editor.history().undo_levels(), 0);

        let mut fin = serde_json::Map::new();
        fin.insert("content".to_string(), json!("final"));
        assert!(editor.commit_update(&NodePath::root(0), BlockPatch::MergeSettings(fin)));
        assert_eq!(editor.history().undo_levels(), 1);
    }

    #[test]
    fn anchor_is_sanitized_on_write() {
        let mut editor = editor_with_text();
        editor.commit_update(
            &NodePath::root(0),
            BlockPatch::SetAnchor(Some("My Anchor!".to_string())),
        );
        assert_eq!(
            editor.content().blocks[0].anchor_id.as_deref(),
            Some("my-anchor")
        );
    }

    #[test]
    fn wrong_shape_data_is_rejected() {
        let mut editor = editor_with_text();
        let layout_data = stencil_model::initial_data(&BlockKind::Layout);
        assert!(!editor.commit_update(&NodePath::root(0), BlockPatch::ReplaceData(layout_data)));
        assert_eq!(editor.history().undo_levels(), 0);
    }

    #[test]
    fn failed_commit_does_not_checkpoint() {
        let mut editor = editor_with_text();
        assert!(!editor.commit_update(
            &NodePath::root(99),
            BlockPatch::SetTheme(Some(BlockTheme::Dark))
        ));
        assert_eq!(editor.history().undo_levels(), 0);
    }

    #[test]
    fn undo_restores_previous_tree() {
        let mut editor = editor_with_text();
        let original = editor.content().clone();

        editor.commit_update(
            &NodePath::root(0),
            BlockPatch::SetTheme(Some(BlockTheme::Dark)),
        );
        assert_ne!(editor.content(), &original);

        assert!(editor.undo());
        assert_eq!(editor.content(), &original);

        assert!(editor.redo());
        assert_eq!(
            editor.content().blocks[0].block_theme,
            Some(BlockTheme::Dark)
        );
    }
}
