//! # Page Content
//!
//! The top-level tree for one page: an ordered block sequence,
//! conceptually "column 0" with no owning layout block.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::block::{Block, BlockId};

/// Structural problems in a persisted tree, caught at load time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContentError {
    #[error("duplicate block id: {0}")]
    DuplicateId(BlockId),

    #[error("layout {id}: preset {preset} declares {expected} columns, found {actual}")]
    ColumnArity {
        id: BlockId,
        preset: String,
        expected: usize,
        actual: usize,
    },
}

/// One page's block tree.
///
/// Persisted as a plain JSON array of blocks. Cloning a
/// `PageContent` clones `Arc` handles only, so snapshots held by the
/// undo history and the autosave scheduler stay cheap.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageContent {
    pub blocks: Vec<Arc<Block>>,
}

impl PageContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks: blocks.into_iter().map(Arc::new).collect(),
        }
    }

    /// Total number of blocks, including everything nested inside
    /// layout columns.
    pub fn block_count(&self) -> usize {
        fn count(blocks: &[Arc<Block>]) -> usize {
            let mut total = blocks.len();
            for block in blocks {
                if let Some(layout) = block.layout_data() {
                    for column in &layout.columns {
                        total += count(&column.0);
                    }
                }
            }
            total
        }
        count(&self.blocks)
    }

    /// Every block id in tree order (depth-first, columns
    /// left-to-right).
    pub fn collect_ids(&self) -> Vec<BlockId> {
        let mut ids = Vec::new();
        self.for_each_block(&mut |block| ids.push(block.id.clone()));
        ids
    }

    pub fn contains_id(&self, id: &BlockId) -> bool {
        let mut found = false;
        self.for_each_block(&mut |block| {
            if &block.id == id {
                found = true;
            }
        });
        found
    }

    /// Depth-first walk over every block.
    pub fn for_each_block(&self, f: &mut impl FnMut(&Block)) {
        fn walk(blocks: &[Arc<Block>], f: &mut impl FnMut(&Block)) {
            for block in blocks {
                f(block);
                if let Some(layout) = block.layout_data() {
                    for column in &layout.columns {
                        walk(&column.0, f);
                    }
                }
            }
        }
        walk(&self.blocks, f);
    }

    /// Check the structural invariants a loaded tree must satisfy:
    /// globally unique ids, and column arity matching each layout
    /// block's preset.
    pub fn validate(&self) -> Result<(), ContentError> {
        fn check(
            blocks: &[Arc<Block>],
            seen: &mut HashSet<BlockId>,
        ) -> Result<(), ContentError> {
            for block in blocks {
                if !seen.insert(block.id.clone()) {
                    return Err(ContentError::DuplicateId(block.id.clone()));
                }
                if let Some(layout) = block.layout_data() {
                    let expected = layout.preset.column_count();
                    if layout.columns.len() != expected {
                        return Err(ContentError::ColumnArity {
                            id: block.id.clone(),
                            preset: layout.preset.as_str().to_string(),
                            expected,
                            actual: layout.columns.len(),
                        });
                    }
                    for column in &layout.columns {
                        check(&column.0, seen)?;
                    }
                }
            }
            Ok(())
        }
        check(&self.blocks, &mut HashSet::new())
    }
}
