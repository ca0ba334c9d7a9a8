//! # Layout Preset Engine
//!
//! Reshapes a layout block's column set when its preset changes,
//! without ever dropping a block.
//!
//! Growing appends empty columns; shrinking folds the last surviving
//! column together with every dropped column, left to right, into the
//! new last column. This is the only place blocks move between columns
//! implicitly; every other cross-column move is an explicit drag.

use std::sync::Arc;

use stencil_model::{Block, Column, LayoutData, Preset};

/// Recompute `layout`'s columns for `new_preset`.
///
/// Total for any old/new column count; equal counts leave the column
/// array untouched and only swap the preset identifier.
pub fn apply_preset(layout: &LayoutData, new_preset: Preset) -> LayoutData {
    let old_count = layout.columns.len();
    let new_count = new_preset.column_count();

    let columns = if new_count == old_count {
        layout.columns.clone()
    } else if new_count > old_count {
        let mut columns = layout.columns.clone();
        columns.resize_with(new_count, Column::default);
        columns
    } else {
        // Keep the first new_count - 1 columns; everything from the
        // last surviving column onward merges into it, in order.
        let mut columns: Vec<Column> = layout.columns[..new_count - 1].to_vec();
        let mut merged: Vec<Arc<Block>> = Vec::new();
        for column in &layout.columns[new_count - 1..] {
            merged.extend(column.0.iter().cloned());
        }
        columns.push(Column(merged));
        columns
    };

    LayoutData {
        preset: new_preset,
        columns,
        vertical_align: layout.vertical_align,
        direction: layout.direction,
    }
}
