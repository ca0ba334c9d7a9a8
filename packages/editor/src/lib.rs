//! # Stencil Editor
//!
//! The block-tree editing engine for Stencil pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: blocks, paths, presets, defaults     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: tree mutation + update protocol     │
//! │  - Path resolver (find/replace/remove/      │
//! │    insert/move, structural sharing)         │
//! │  - Layout preset engine                     │
//! │  - Live preview vs. committed edits         │
//! │  - Snapshot undo/redo history               │
//! │  - Settings provider registry               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ workspace: sessions + debounced autosave    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Pure mutation**: every operation returns a new tree sharing
//!    untouched subtrees with the old one; nothing mutates in place.
//! 2. **Total operations**: bad paths degrade to a logged no-op, never
//!    a panic or an error the UI has to handle.
//! 3. **Per-gesture history**: preview edits keep the preview live,
//!    commits checkpoint. One undo entry per gesture, not per
//!    keystroke.

mod history;
mod presets;
mod registry;
pub mod resolver;
mod update;

pub use history::History;
pub use presets::apply_preset;
pub use registry::{
    DefaultsProvider, RawInspector, SettingsProvider, SettingsRegistry, SettingsView,
};
pub use update::{BlockPatch, Editor};
