//! # Stencil Model
//!
//! Data model for the Stencil page builder: the recursive block tree,
//! the path addressing scheme, column presets, and per-kind default
//! settings.
//!
//! ## Shape
//!
//! ```text
//! PageContent
//!   └─ Vec<Block>            (ordered, "column 0" of the page)
//!        └─ Block
//!             ├─ id / kind / data / anchor_id / styles / animation
//!             └─ LayoutData (layout blocks only)
//!                  └─ Vec<Column>
//!                       └─ Vec<Block>  (recurse)
//! ```
//!
//! ## Core Principles
//!
//! 1. **Strict tree**: every block is owned by exactly one column (or
//!    the page root). No aliasing within a single tree.
//! 2. **Snapshots are cheap**: children are held behind `Arc`, so a
//!    mutated tree shares every untouched subtree with its ancestor
//!    snapshot. Mutation itself lives in `stencil-editor`.
//! 3. **Forward compatible**: unknown block kinds and unknown settings
//!    keys round-trip losslessly instead of failing to load.

mod block;
mod content;
mod defaults;
mod path;
mod preset;

pub use block::{
    sanitize_anchor, Animation, Block, BlockData, BlockId, BlockKind, BlockStyles, BlockTheme,
    Column, Direction, LayoutData, VerticalAlign,
};
pub use content::{ContentError, PageContent};
pub use defaults::{default_settings, initial_data, merge_settings, settings_with_defaults};
pub use path::{ContainerPath, NodePath, PathStep};
pub use preset::Preset;
