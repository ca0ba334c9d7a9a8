//! # Path
//!
//! Positional addressing for blocks anywhere in the tree, including
//! blocks nested inside layout columns.
//!
//! A path is an ordered list of steps. The first step indexes the page
//! root; every later step names the column of the layout block picked
//! by the previous step, then an index within that column:
//!
//! ```text
//! [{index: 0}, {column: 1, index: 2}]
//!   → block 2 in column 1 of the layout block at root slot 0
//! ```
//!
//! A block nested inside N layout blocks has a path of length N+1.

use serde::{Deserialize, Serialize};

/// One step of a path.
///
/// `column` is `None` only on the first step of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl PathStep {
    pub fn root(index: usize) -> Self {
        Self {
            index,
            column: None,
        }
    }

    pub fn column(column: usize, index: usize) -> Self {
        Self {
            index,
            column: Some(column),
        }
    }
}

/// Ordered steps addressing one block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(Vec<PathStep>);

impl NodePath {
    /// Path to a block in the page root sequence.
    pub fn root(index: usize) -> Self {
        Self(vec![PathStep::root(index)])
    }

    /// Extend this path into column `column`, slot `index`, of the
    /// layout block it currently addresses.
    pub fn into_column(mut self, column: usize, index: usize) -> Self {
        self.0.push(PathStep::column(column, index));
        self
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The container holding the addressed block, plus the block's
    /// index within it. `None` for empty or malformed paths (a
    /// non-first step without a column).
    pub fn container(&self) -> Option<(ContainerPath, usize)> {
        let (last, prefix) = self.0.split_last()?;
        if prefix.is_empty() {
            if last.column.is_some() {
                return None;
            }
            return Some((ContainerPath::Root, last.index));
        }
        let column = last.column?;
        Some((
            ContainerPath::Column {
                layout: NodePath(prefix.to_vec()),
                column,
            },
            last.index,
        ))
    }
}

impl From<Vec<PathStep>> for NodePath {
    fn from(steps: Vec<PathStep>) -> Self {
        Self(steps)
    }
}

/// A sequence blocks can be inserted into: the page root, or one
/// column of a layout block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerPath {
    Root,
    Column { layout: NodePath, column: usize },
}

impl ContainerPath {
    pub fn column(layout: NodePath, column: usize) -> Self {
        Self::Column { layout, column }
    }

    /// Path to slot `index` inside this container.
    pub fn slot(&self, index: usize) -> NodePath {
        match self {
            ContainerPath::Root => NodePath::root(index),
            ContainerPath::Column { layout, column } => {
                layout.clone().into_column(*column, index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_serde_shape() {
        let path = NodePath::root(0).into_column(1, 2);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"index": 0}, {"index": 2, "column": 1}])
        );
        let back: NodePath = serde_json::from_value(json).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn container_of_root_block() {
        let (container, index) = NodePath::root(3).container().unwrap();
        assert_eq!(container, ContainerPath::Root);
        assert_eq!(index, 3);
    }

    #[test]
    fn container_of_nested_block() {
        let path = NodePath::root(0).into_column(1, 2);
        let (container, index) = path.container().unwrap();
        assert_eq!(
            container,
            ContainerPath::column(NodePath::root(0), 1)
        );
        assert_eq!(index, 2);
    }

    #[test]
    fn malformed_paths_have_no_container() {
        assert!(NodePath::default().container().is_none());
        let missing_column = NodePath::from(vec![PathStep::root(0), PathStep::root(1)]);
        assert!(missing_column.container().is_none());
    }

    #[test]
    fn slot_rebuilds_block_path() {
        let container = ContainerPath::column(NodePath::root(0), 1);
        assert_eq!(container.slot(2), NodePath::root(0).into_column(1, 2));
    }
}
