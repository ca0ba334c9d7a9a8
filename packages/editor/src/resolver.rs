//! # Path Resolver
//!
//! Lookup and structural mutation of the block tree by path.
//!
//! All mutation here is pure: every operation takes `&PageContent` and
//! returns a new tree. Ancestors along the edited path are shallow
//! cloned; every untouched sibling and subtree is reused through its
//! `Arc`, so snapshots stay cheap no matter how large the page is.
//!
//! Paths that do not resolve are never fatal. The `try_*` variants
//! return `None`; the plain variants log a warning and hand back the
//! input tree unchanged, which is the contract the editor surface
//! relies on.

use std::sync::Arc;

use stencil_model::{Block, BlockData, Column, ContainerPath, NodePath, PageContent, PathStep};

/// Resolve a path to the block it addresses.
///
/// Returns `None` if any step's index or column is out of range, or a
/// column step follows a block that is not a layout block.
pub fn find<'a>(tree: &'a PageContent, path: &NodePath) -> Option<&'a Block> {
    let mut seq: &[Arc<Block>] = &tree.blocks;
    let mut current: Option<&'a Arc<Block>> = None;

    for (depth, step) in path.steps().iter().enumerate() {
        match (depth, step.column) {
            (0, None) => {}
            (_, Some(column)) if depth > 0 => {
                let layout = current?.layout_data()?;
                seq = &layout.columns.get(column)?.0;
            }
            // First step with a column, or a later step without one.
            _ => return None,
        }
        current = seq.get(step.index);
        current?;
    }

    current.map(|block| block.as_ref())
}

/// Replace the block at `path` with `new_block`.
pub fn try_replace(tree: &PageContent, path: &NodePath, new_block: Block) -> Option<PageContent> {
    let (container, index) = path.container()?;
    edit_container(tree, &container, move |seq| {
        seq.get(index)?;
        let mut out = seq.to_vec();
        out[index] = Arc::new(new_block);
        Some(out)
    })
}

/// Total version of [`try_replace`]: an unresolvable path leaves the
/// tree unchanged and logs a warning.
pub fn replace(tree: &PageContent, path: &NodePath, new_block: Block) -> PageContent {
    match try_replace(tree, path, new_block) {
        Some(next) => next,
        None => {
            tracing::warn!(?path, "replace: path did not resolve, tree unchanged");
            tree.clone()
        }
    }
}

/// Remove exactly the block at `path`, returning the new tree and the
/// removed block. Later siblings shift down by one slot.
pub fn try_remove(tree: &PageContent, path: &NodePath) -> Option<(PageContent, Arc<Block>)> {
    let (container, index) = path.container()?;
    let mut removed: Option<Arc<Block>> = None;
    let next = edit_container(tree, &container, |seq| {
        seq.get(index)?;
        let mut out = seq.to_vec();
        removed = Some(out.remove(index));
        Some(out)
    })?;
    Some((next, removed?))
}

/// Total version of [`try_remove`].
pub fn remove(tree: &PageContent, path: &NodePath) -> PageContent {
    match try_remove(tree, path) {
        Some((next, _)) => next,
        None => {
            tracing::warn!(?path, "remove: path did not resolve, tree unchanged");
            tree.clone()
        }
    }
}

/// Insert `block` into the container sequence at `index` (clamped to
/// the sequence length), shifting later elements right.
pub fn try_insert(
    tree: &PageContent,
    container: &ContainerPath,
    index: usize,
    block: Block,
) -> Option<PageContent> {
    try_insert_arc(tree, container, index, Arc::new(block))
}

/// Total version of [`try_insert`].
pub fn insert(
    tree: &PageContent,
    container: &ContainerPath,
    index: usize,
    block: Block,
) -> PageContent {
    match try_insert(tree, container, index, block) {
        Some(next) => next,
        None => {
            tracing::warn!(?container, "insert: container did not resolve, tree unchanged");
            tree.clone()
        }
    }
}

/// Move the block at `from` into `to_container` at `to_index`,
/// preserving its id and contents. `to_container` is interpreted
/// against the tree *after* removal.
pub fn try_move(
    tree: &PageContent,
    from: &NodePath,
    to_container: &ContainerPath,
    to_index: usize,
) -> Option<PageContent> {
    let (interim, moved) = try_remove(tree, from)?;
    try_insert_arc(&interim, to_container, to_index, moved)
}

/// Total version of [`try_move`]: if either end fails to resolve the
/// original tree comes back unchanged (the block is never lost).
pub fn move_block(
    tree: &PageContent,
    from: &NodePath,
    to_container: &ContainerPath,
    to_index: usize,
) -> PageContent {
    match try_move(tree, from, to_container, to_index) {
        Some(next) => next,
        None => {
            tracing::warn!(?from, ?to_container, "move: path did not resolve, tree unchanged");
            tree.clone()
        }
    }
}

fn try_insert_arc(
    tree: &PageContent,
    container: &ContainerPath,
    index: usize,
    block: Arc<Block>,
) -> Option<PageContent> {
    edit_container(tree, container, move |seq| {
        let mut out = seq.to_vec();
        out.insert(index.min(out.len()), block);
        Some(out)
    })
}

/// Apply `edit` to the sequence the container addresses, rebuilding
/// the spine above it. `edit` returning `None` aborts the whole
/// operation with the tree untouched.
fn edit_container(
    tree: &PageContent,
    container: &ContainerPath,
    edit: impl FnOnce(&[Arc<Block>]) -> Option<Vec<Arc<Block>>>,
) -> Option<PageContent> {
    match container {
        ContainerPath::Root => {
            let blocks = edit(&tree.blocks)?;
            Some(PageContent { blocks })
        }
        ContainerPath::Column { layout, column } => {
            let steps = layout.steps();
            match steps.first() {
                Some(step) if step.column.is_none() => {}
                _ => return None,
            }
            let blocks = edit_column_at(&tree.blocks, steps, *column, edit)?;
            Some(PageContent { blocks })
        }
    }
}

/// Recursive spine rebuild. `steps[0].index` addresses `seq`; the last
/// step must land on a layout block whose `column`-th column gets
/// edited.
fn edit_column_at(
    seq: &[Arc<Block>],
    steps: &[PathStep],
    column: usize,
    edit: impl FnOnce(&[Arc<Block>]) -> Option<Vec<Arc<Block>>>,
) -> Option<Vec<Arc<Block>>> {
    let step = steps.first()?;
    let block = seq.get(step.index)?;
    let layout = block.layout_data()?;

    let mut new_layout = layout.clone();
    if steps.len() == 1 {
        let target = layout.columns.get(column)?;
        new_layout.columns[column] = Column(edit(&target.0)?);
    } else {
        let inner_column = steps[1].column?;
        let target = layout.columns.get(inner_column)?;
        new_layout.columns[inner_column] = Column(edit_column_at(&target.0, &steps[1..], column, edit)?);
    }

    let mut new_block = (**block).clone();
    new_block.data = BlockData::Layout(new_layout);

    let mut out = seq.to_vec();
    out[step.index] = Arc::new(new_block);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_model::BlockKind;

    #[test]
    fn find_rejects_column_step_on_non_layout() {
        let tree = PageContent::from_blocks(vec![Block::new(BlockKind::Text)]);
        let path = NodePath::root(0).into_column(0, 0);
        assert!(find(&tree, &path).is_none());
    }

    #[test]
    fn find_rejects_malformed_later_step() {
        let tree = PageContent::from_blocks(vec![Block::new(BlockKind::Layout)]);
        let malformed = NodePath::from(vec![PathStep::root(0), PathStep::root(0)]);
        assert!(find(&tree, &malformed).is_none());
    }

    #[test]
    fn replace_on_bad_path_returns_tree_unchanged() {
        let tree = PageContent::from_blocks(vec![Block::new(BlockKind::Text)]);
        let next = replace(&tree, &NodePath::root(99), Block::new(BlockKind::Text));
        assert_eq!(next, tree);
    }

    #[test]
    fn insert_clamps_index_to_length() {
        let tree = PageContent::from_blocks(vec![Block::new(BlockKind::Text)]);
        let block = Block::new(BlockKind::Divider);
        let id = block.id.clone();
        let next = insert(&tree, &ContainerPath::Root, 42, block);
        assert_eq!(next.blocks.len(), 2);
        assert_eq!(next.blocks[1].id, id);
    }

    #[test]
    fn untouched_subtrees_are_shared_not_cloned() {
        let keep = Block::new(BlockKind::Hero);
        let tree = PageContent::from_blocks(vec![keep, Block::new(BlockKind::Text)]);
        let next = replace(
            &tree,
            &NodePath::root(1),
            Block {
                id: tree.blocks[1].id.clone(),
                ..Block::new(BlockKind::Text)
            },
        );
        assert!(Arc::ptr_eq(&tree.blocks[0], &next.blocks[0]));
        assert!(!Arc::ptr_eq(&tree.blocks[1], &next.blocks[1]));
    }

    #[test]
    fn remove_returns_the_removed_block() {
        let tree = PageContent::from_blocks(vec![Block::new(BlockKind::Text)]);
        let id = tree.blocks[0].id.clone();
        let (next, removed) = try_remove(&tree, &NodePath::root(0)).unwrap();
        assert!(next.blocks.is_empty());
        assert_eq!(removed.id, id);
    }
}
