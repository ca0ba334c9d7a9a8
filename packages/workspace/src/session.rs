//! # Editor Session
//!
//! One open page: the working tree and its history, the selection,
//! the autosave scheduler, and the injected UI preference store.
//!
//! The session is the seam the UI talks to. Live preview edits pass
//! straight through; committed edits additionally checkpoint history
//! and hand the new tree to the autosave scheduler. The tree is
//! exclusively owned here, so no locking is needed anywhere in the
//! engine.

use std::sync::Arc;

use stencil_editor::{resolver, BlockPatch, Editor, SettingsRegistry, SettingsView};
use stencil_model::{
    Block, BlockId, BlockKind, ContainerPath, ContentError, NodePath, PageContent, Preset,
};
use thiserror::Error;

use crate::autosave::{AutosaveConfig, AutosaveHandle, AutosaveStatus};
use crate::prefs::PrefStore;
use crate::transport::{ContentTransport, PageId, TransportError};

const PREF_SETTINGS_PANEL: &str = "settings_panel_open";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid page content: {0}")]
    Content(#[from] ContentError),
}

pub struct EditorSession {
    page_id: PageId,
    editor: Editor,
    registry: SettingsRegistry,
    autosave: AutosaveHandle,
    selection: Vec<BlockId>,
    prefs: Box<dyn PrefStore>,
}

impl EditorSession {
    /// Load a page and start its autosave scheduler.
    pub async fn open(
        page_id: PageId,
        transport: Arc<dyn ContentTransport>,
        prefs: Box<dyn PrefStore>,
        config: AutosaveConfig,
    ) -> Result<Self, SessionError> {
        let content = transport.load(&page_id).await?;
        content.validate()?;

        let autosave = AutosaveHandle::spawn(page_id.clone(), transport, config);
        Ok(Self {
            page_id,
            editor: Editor::new(content),
            registry: SettingsRegistry::with_stock_providers(),
            autosave,
            selection: Vec::new(),
            prefs,
        })
    }

    pub fn page_id(&self) -> &PageId {
        &self.page_id
    }

    /// The working tree the UI renders from.
    pub fn content(&self) -> &PageContent {
        self.editor.content()
    }

    /// Live edit for immediate preview; no history, no persistence.
    pub fn preview_update(&mut self, path: &NodePath, patch: BlockPatch) -> &PageContent {
        self.editor.preview_update(path, patch);
        self.editor.content()
    }

    /// Committed edit: history checkpoint plus autosave scheduling.
    pub fn commit_update(&mut self, path: &NodePath, patch: BlockPatch) -> &PageContent {
        if self.editor.commit_update(path, patch) {
            self.push_autosave();
        }
        self.editor.content()
    }

    /// Drop a palette entry onto the tree: fresh id, kind-appropriate
    /// defaults. Returns the new block's id when the drop landed.
    pub fn insert_block(
        &mut self,
        container: &ContainerPath,
        index: usize,
        kind: BlockKind,
    ) -> Option<BlockId> {
        let block = Block::new(kind);
        let id = block.id.clone();
        if self.editor.insert_block(container, index, block) {
            self.push_autosave();
            Some(id)
        } else {
            None
        }
    }

    /// Delete a block and its subtree.
    pub fn remove_block(&mut self, path: &NodePath) -> bool {
        if self.editor.remove_block(path) {
            // Selection may reference blocks that no longer exist.
            let content = self.editor.content();
            self.selection.retain(|id| content.contains_id(id));
            self.push_autosave();
            true
        } else {
            false
        }
    }

    /// Drag-reorder, including moves across columns and layouts.
    pub fn move_block(
        &mut self,
        from: &NodePath,
        to_container: &ContainerPath,
        to_index: usize,
    ) -> bool {
        if self.editor.move_block(from, to_container, to_index) {
            self.push_autosave();
            true
        } else {
            false
        }
    }

    /// Change a layout block's column split.
    pub fn change_preset(&mut self, path: &NodePath, preset: Preset) -> bool {
        if self.editor.change_preset(path, preset) {
            self.push_autosave();
            true
        } else {
            false
        }
    }

    /// Undo the last commit. The restored tree is persisted like any
    /// other commit, so the server follows what the user sees.
    pub fn undo(&mut self) -> bool {
        if self.editor.undo() {
            self.push_autosave();
            true
        } else {
            false
        }
    }

    pub fn redo(&mut self) -> bool {
        if self.editor.redo() {
            self.push_autosave();
            true
        } else {
            false
        }
    }

    pub fn select(&mut self, ids: Vec<BlockId>) {
        self.selection = ids;
    }

    pub fn selection(&self) -> &[BlockId] {
        &self.selection
    }

    /// Settings panel contents for the block at `path`, defaults
    /// resolved; unknown kinds get the raw inspector.
    pub fn settings_for(&self, path: &NodePath) -> Option<SettingsView> {
        let block = resolver::find(self.editor.content(), path)?;
        Some(self.registry.describe(block))
    }

    pub fn save_status(&self) -> AutosaveStatus {
        self.autosave.status()
    }

    pub fn subscribe_save_status(&self) -> tokio::sync::watch::Receiver<AutosaveStatus> {
        self.autosave.subscribe()
    }

    /// Manual save-now trigger (also the retry path after a failure).
    pub fn flush(&self) {
        self.autosave.flush();
    }

    pub fn settings_panel_open(&self) -> bool {
        self.prefs.get_bool(PREF_SETTINGS_PANEL).unwrap_or(true)
    }

    pub fn set_settings_panel_open(&mut self, open: bool) {
        self.prefs.set_bool(PREF_SETTINGS_PANEL, open);
    }

    /// Tear down, saving anything still pending.
    pub async fn close(self) {
        self.autosave.flush();
        self.autosave.shutdown().await;
    }

    fn push_autosave(&self) {
        self.autosave.commit(self.editor.content().clone());
    }
}
