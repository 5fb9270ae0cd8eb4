use crate::data::dataset::{Number, WholeNumber};
use crate::error::{Result, TreeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision tree node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TreeNode<XT: Number, YT: WholeNumber> {
    /// Sends a row left when `row[feature_index] < threshold`, right otherwise.
    Internal {
        feature_index: usize,
        threshold: XT,
        left: Box<TreeNode<XT, YT>>,
        right: Box<TreeNode<XT, YT>>,
    },
    /// Terminal prediction.
    Leaf { label: YT },
}

impl<XT: Number, YT: WholeNumber> TreeNode<XT, YT> {
    pub fn leaf(label: YT) -> Self {
        Self::Leaf { label }
    }

    pub fn internal(feature_index: usize, threshold: XT, left: Self, right: Self) -> Self {
        Self::Internal {
            feature_index,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Walks from this node down to a leaf and returns its label.
    ///
    /// `row` only needs the feature columns; a trailing label column is
    /// ignored. `row_index` is reported if the row is too short.
    pub fn predict_row(&self, row: &[XT], row_index: usize) -> Result<YT> {
        let mut node = self;
        loop {
            match node {
                Self::Leaf { label } => return Ok(*label),
                Self::Internal {
                    feature_index,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.get(*feature_index).ok_or(TreeError::MalformedRow {
                        row: row_index,
                        expected: feature_index + 1,
                        found: row.len(),
                    })?;
                    node = if value < threshold {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                }
            }
        }
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }

    pub fn n_nodes(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right, .. } => 1 + left.n_nodes() + right.n_nodes(),
        }
    }

    /// One line per node, indented by one space per level: internal nodes as
    /// `[X{feature + 1} < {threshold:.3}]`, leaves as `[{label}]`.
    pub(crate) fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = " ".repeat(depth);
        match self {
            Self::Leaf { label } => writeln!(f, "{}[{}]", indent, label),
            Self::Internal {
                feature_index,
                threshold,
                left,
                right,
            } => {
                writeln!(f, "{}[X{} < {:.3}]", indent, feature_index + 1, threshold)?;
                left.write_tree(f, depth + 1)?;
                right.write_tree(f, depth + 1)
            }
        }
    }
}
