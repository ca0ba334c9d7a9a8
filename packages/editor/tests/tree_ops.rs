//! Tree operation tests: find/replace round trips, removal, moves,
//! and the no-op behavior of unresolvable paths.

use std::sync::Arc;

use stencil_editor::resolver::{find, insert, move_block, remove, replace};
use stencil_editor::{apply_preset, BlockPatch, Editor};
use stencil_model::{
    Block, BlockData, BlockId, BlockKind, Column, ContainerPath, LayoutData, NodePath,
    PageContent, Preset,
};

fn text(id: &str) -> Block {
    Block {
        id: BlockId::from(id),
        ..Block::new(BlockKind::Text)
    }
}

fn layout(id: &str, preset: &str, columns: Vec<Vec<Block>>) -> Block {
    Block {
        id: BlockId::from(id),
        kind: BlockKind::Layout,
        data: BlockData::Layout(LayoutData {
            preset: Preset::new(preset),
            columns: columns
                .into_iter()
                .map(|blocks| Column(blocks.into_iter().map(Arc::new).collect()))
                .collect(),
            vertical_align: None,
            direction: None,
        }),
        anchor_id: None,
        styles: None,
        animation: None,
        block_theme: None,
    }
}

/// Page used throughout: three root blocks, the middle one a 2-column
/// layout with one nested block per column.
fn sample_page() -> PageContent {
    PageContent::from_blocks(vec![
        text("intro"),
        layout("cols", "50-50", vec![vec![text("left")], vec![text("right")]]),
        text("outro"),
    ])
}

#[test]
fn find_resolves_nested_blocks() {
    let tree = sample_page();
    let path = NodePath::root(1).into_column(1, 0);
    let block = find(&tree, &path).expect("nested block");
    assert_eq!(block.id.as_str(), "right");
}

#[test]
fn find_replace_round_trip() {
    let tree = sample_page();
    let path = NodePath::root(1).into_column(0, 0);

    let mut replacement = text("left");
    replacement.anchor_id = Some("renamed".to_string());

    let next = replace(&tree, &path, replacement.clone());
    assert_eq!(find(&next, &path), Some(&replacement));

    // Every other path resolves to the same block as before.
    for other in [
        NodePath::root(0),
        NodePath::root(1),
        NodePath::root(2),
        NodePath::root(1).into_column(1, 0),
    ] {
        if other == path {
            continue;
        }
        let before = find(&tree, &other).map(|b| b.id.clone());
        let after = find(&next, &other).map(|b| b.id.clone());
        assert_eq!(before, after, "path {other:?} changed");
    }
}

#[test]
fn remove_preserves_every_other_block() {
    let tree = sample_page();
    let before_count = tree.block_count();

    let next = remove(&tree, &NodePath::root(1).into_column(0, 0));

    assert_eq!(next.block_count(), before_count - 1);
    let surviving: Vec<_> = next.collect_ids().iter().map(|id| id.to_string()).collect();
    assert_eq!(surviving, vec!["intro", "cols", "right", "outro"]);
}

#[test]
fn remove_shifts_later_siblings_down() {
    let tree = PageContent::from_blocks(vec![text("a"), text("b"), text("c")]);
    let next = remove(&tree, &NodePath::root(0));
    assert_eq!(find(&next, &NodePath::root(0)).unwrap().id.as_str(), "b");
    assert_eq!(find(&next, &NodePath::root(1)).unwrap().id.as_str(), "c");
}

#[test]
fn invalid_paths_are_no_ops() {
    let tree = PageContent::from_blocks(vec![text("a"), text("b"), text("c")]);

    assert!(find(&tree, &NodePath::root(99)).is_none());

    let replaced = replace(&tree, &NodePath::root(99), text("x"));
    assert_eq!(replaced, tree);

    let removed = remove(&tree, &NodePath::root(99));
    assert_eq!(removed, tree);

    // Column step into a non-layout block.
    let bad_column = NodePath::root(0).into_column(0, 0);
    assert!(find(&tree, &bad_column).is_none());
    assert_eq!(replace(&tree, &bad_column, text("x")), tree);
}

#[test]
fn insert_into_column() {
    let tree = sample_page();
    let container = ContainerPath::column(NodePath::root(1), 0);

    let next = insert(&tree, &container, 0, text("new"));

    let ids: Vec<_> = next.collect_ids().iter().map(|id| id.to_string()).collect();
    assert_eq!(ids, vec!["intro", "cols", "new", "left", "right", "outro"]);
}

#[test]
fn move_across_columns_preserves_identity() {
    let tree = sample_page();
    let from = NodePath::root(1).into_column(0, 0);
    let to = ContainerPath::column(NodePath::root(1), 1);

    let next = move_block(&tree, &from, &to, 1);

    assert_eq!(next.block_count(), tree.block_count());
    let moved = find(&next, &NodePath::root(1).into_column(1, 1)).expect("moved block");
    assert_eq!(moved.id.as_str(), "left");
    assert!(find(&next, &from).map(|b| b.id.as_str()) != Some("left"));
}

#[test]
fn move_out_of_a_column_to_the_root() {
    let tree = sample_page();
    let from = NodePath::root(1).into_column(1, 0);

    let next = move_block(&tree, &from, &ContainerPath::Root, 0);

    let ids: Vec<_> = next.collect_ids().iter().map(|id| id.to_string()).collect();
    assert_eq!(ids, vec!["right", "intro", "cols", "left", "outro"]);
}

#[test]
fn move_with_bad_destination_loses_nothing() {
    let tree = sample_page();
    let from = NodePath::root(1).into_column(0, 0);
    // Destination column index out of range.
    let to = ContainerPath::column(NodePath::root(1), 7);

    let next = move_block(&tree, &from, &to, 0);

    assert_eq!(next, tree);
}

#[test]
fn preset_change_through_the_editor_keeps_blocks() {
    let mut editor = Editor::new(sample_page());

    assert!(editor.change_preset(&NodePath::root(1), Preset::new("33-33-33")));

    let block = find(editor.content(), &NodePath::root(1)).unwrap();
    let layout = block.layout_data().unwrap();
    assert_eq!(layout.columns.len(), 3);
    assert!(layout.columns[2].is_empty());
    assert_eq!(editor.content().block_count(), 5);

    assert!(editor.change_preset(&NodePath::root(1), Preset::new("100")));
    let block = find(editor.content(), &NodePath::root(1)).unwrap();
    let layout = block.layout_data().unwrap();
    assert_eq!(layout.columns.len(), 1);
    let ids: Vec<_> = layout.columns[0].iter().map(|b| b.id.to_string()).collect();
    assert_eq!(ids, vec!["left", "right"]);
}

#[test]
fn preset_change_on_non_layout_is_rejected() {
    let mut editor = Editor::new(sample_page());
    assert!(!editor.change_preset(&NodePath::root(0), Preset::new("33-33-33")));
    assert_eq!(editor.content(), &sample_page());
}

#[test]
fn apply_preset_is_lossless_for_any_transition() {
    let block = layout(
        "l",
        "25-25-25-25",
        vec![
            vec![text("a")],
            vec![text("b"), text("c")],
            vec![],
            vec![text("d")],
        ],
    );
    let data = block.layout_data().unwrap();

    for target in ["100", "50-50", "33-33-33", "25-25-25-25"] {
        let reshaped = apply_preset(data, Preset::new(target));
        let total: usize = reshaped.columns.iter().map(|c| c.len()).sum();
        assert_eq!(total, 4, "preset {target} dropped blocks");
        assert_eq!(reshaped.columns.len(), Preset::new(target).column_count());
    }
}

#[test]
fn nested_layout_mutation_rebuilds_only_the_spine() {
    let inner = layout("inner", "50-50", vec![vec![text("deep")], vec![]]);
    let tree = PageContent::from_blocks(vec![
        text("first"),
        layout("outer", "50-50", vec![vec![], vec![]]),
    ]);
    // Put the inner layout inside the outer one, then edit the deep
    // block two layers down.
    let tree = insert(
        &tree,
        &ContainerPath::column(NodePath::root(1), 0),
        0,
        inner,
    );
    let deep = NodePath::root(1).into_column(0, 0).into_column(0, 0);
    assert_eq!(find(&tree, &deep).unwrap().id.as_str(), "deep");

    let mut editor = Editor::new(tree.clone());
    assert!(editor.commit_update(
        &deep,
        BlockPatch::SetAnchor(Some("Deep Link".to_string()))
    ));
    assert_eq!(
        find(editor.content(), &deep).unwrap().anchor_id.as_deref(),
        Some("deep-link")
    );
    // The untouched first root block is shared, not cloned.
    assert!(Arc::ptr_eq(&tree.blocks[0], &editor.content().blocks[0]));
}
