//! Decision Tree Classifier
use super::{
    node::TreeNode,
    params::TreeParams,
    split::{find_best_split, SplitData},
};
use crate::{
    data::dataset::{Dataset, Number, WholeNumber},
    error::{Result, TreeError},
    metrics::confusion::ClassificationMetrics,
};
use log::{debug, info, trace};
use nalgebra::{DMatrix, DVector};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Binary decision tree grown greedily on Gini impurity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeClassifier<XT: Number, YT: WholeNumber> {
    root: Option<TreeNode<XT, YT>>,
    tree_params: TreeParams,
}

impl<XT: Number, YT: WholeNumber> Default for DecisionTreeClassifier<XT, YT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<XT: Number, YT: WholeNumber> ClassificationMetrics<YT> for DecisionTreeClassifier<XT, YT> {}

impl<XT: Number, YT: WholeNumber> DecisionTreeClassifier<XT, YT> {
    /// Creates an unbounded tree whose branches of a single row become leaves.
    pub fn new() -> Self {
        Self {
            root: None,
            tree_params: TreeParams::new(),
        }
    }

    /// Creates a new instance of the decision tree classifier with custom parameters.
    ///
    /// # Arguments
    ///
    /// * `max_depth` - The maximum depth of the tree, `None` for no limit.
    /// * `min_size` - Branches with at most this many rows become leaves.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the maximum depth is 0.
    pub fn with_params(max_depth: Option<u16>, min_size: Option<usize>) -> Result<Self> {
        let mut tree = Self::new();

        tree.set_max_depth(max_depth)?;
        tree.set_min_size(min_size.unwrap_or(1));
        Ok(tree)
    }

    pub fn set_max_depth(&mut self, max_depth: Option<u16>) -> Result<()> {
        self.tree_params.set_max_depth(max_depth)
    }

    pub fn set_min_size(&mut self, min_size: usize) {
        self.tree_params.set_min_size(min_size)
    }

    pub fn max_depth(&self) -> Option<u16> {
        self.tree_params.max_depth()
    }

    pub fn min_size(&self) -> usize {
        self.tree_params.min_size()
    }

    /// The fitted tree, if any.
    pub fn root(&self) -> Option<&TreeNode<XT, YT>> {
        self.root.as_ref()
    }

    /// Builds the decision tree from a dataset.
    ///
    /// The root split is searched over the whole dataset; each side is then
    /// split again until it is pure, holds at most `min_size` rows or the
    /// maximum depth is reached. A training set with a single class yields a
    /// lone leaf.
    ///
    /// # Errors
    ///
    /// * `LengthMismatch` if `x` and `y` hold a different number of rows.
    /// * `EmptyDataset` if the dataset has no rows.
    /// * `InvalidLabel` if a label can't be used as a class index.
    pub fn fit(&mut self, dataset: &Dataset<XT, YT>) -> Result<()> {
        dataset.check_shape()?;
        if dataset.nrows() == 0 {
            return Err(TreeError::EmptyDataset);
        }

        let root = if dataset.is_pure() {
            TreeNode::leaf(terminal_label(&dataset.y)?)
        } else {
            self.grow(find_best_split(dataset)?, 1)?
        };

        info!(
            "Finished building the tree: {} nodes, {} leaves, depth {}",
            root.n_nodes(),
            root.n_leaves(),
            root.depth()
        );
        self.root = Some(root);
        Ok(())
    }

    /// Predicts the labels for new data, one row per sample.
    ///
    /// # Errors
    ///
    /// * `NotFitted` if the tree wasn't built yet.
    /// * `MalformedRow` if a row lacks a feature the tree splits on.
    pub fn predict(&self, features: &DMatrix<XT>) -> Result<DVector<YT>> {
        let root = self.root.as_ref().ok_or(TreeError::NotFitted)?;

        let predictions = (0..features.nrows())
            .into_par_iter()
            .map(|index| {
                let row = features.row(index).iter().copied().collect::<Vec<_>>();
                root.predict_row(&row, index)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DVector::from_vec(predictions))
    }

    /// Predicts the label of a single row.
    pub fn predict_row(&self, row: &[XT]) -> Result<YT> {
        self.root
            .as_ref()
            .ok_or(TreeError::NotFitted)?
            .predict_row(row, 0)
    }

    /// Fraction of the dataset's rows whose label is predicted correctly.
    pub fn score(&self, dataset: &Dataset<XT, YT>) -> Result<f64> {
        dataset.check_shape()?;
        let predictions = self.predict(&dataset.x)?;
        self.accuracy(&dataset.y, &predictions)
    }

    pub fn to_json(&self) -> Result<String>
    where
        XT: Serialize,
        YT: Serialize,
    {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self>
    where
        XT: DeserializeOwned,
        YT: DeserializeOwned,
    {
        Ok(serde_json::from_str(json)?)
    }

    fn grow(&self, split: SplitData<XT, YT>, depth: usize) -> Result<TreeNode<XT, YT>> {
        let degenerate = split.is_degenerate();
        let SplitData {
            feature_index,
            threshold,
            left,
            right,
            cost,
        } = split;
        debug!(
            "Split on X{} < {} at depth {} (cost {:.4}, {} | {} rows)",
            feature_index + 1,
            threshold,
            depth,
            cost,
            left.nrows(),
            right.nrows()
        );

        if degenerate {
            let filled = if left.nrows() == 0 { &right } else { &left };
            let label = terminal_label(&filled.y)?;
            return Ok(TreeNode::internal(
                feature_index,
                threshold,
                TreeNode::leaf(label),
                TreeNode::leaf(label),
            ));
        }

        if self.tree_params.depth_reached(depth) {
            return Ok(TreeNode::internal(
                feature_index,
                threshold,
                TreeNode::leaf(terminal_label(&left.y)?),
                TreeNode::leaf(terminal_label(&right.y)?),
            ));
        }

        let left_node = self.branch(left, depth)?;
        let right_node = self.branch(right, depth)?;
        Ok(TreeNode::internal(
            feature_index,
            threshold,
            left_node,
            right_node,
        ))
    }

    fn branch(&self, rows: Dataset<XT, YT>, depth: usize) -> Result<TreeNode<XT, YT>> {
        if rows.nrows() <= self.min_size() || rows.is_pure() {
            let label = terminal_label(&rows.y)?;
            trace!("Leaf [{}] from {} rows at depth {}", label, rows.nrows(), depth + 1);
            return Ok(TreeNode::leaf(label));
        }

        self.grow(find_best_split(&rows)?, depth + 1)
    }
}

impl<XT: Number, YT: WholeNumber> fmt::Display for DecisionTreeClassifier<XT, YT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => root.write_tree(f, 0),
            None => writeln!(f, "Tree wasn't built yet."),
        }
    }
}

/// Majority label of a group of rows; ties go to the lowest label.
///
/// # Errors
///
/// * `EmptyDataset` if `labels` is empty.
/// * `InvalidLabel` if a label is negative.
pub fn terminal_label<YT: WholeNumber>(labels: &DVector<YT>) -> Result<YT> {
    // keyed by class index so iteration runs in ascending label order
    let mut counts = BTreeMap::new();
    for (row, label) in labels.iter().enumerate() {
        let class = label.to_usize().ok_or_else(|| TreeError::InvalidLabel {
            row,
            value: label.to_string(),
        })?;
        counts.entry(class).or_insert((*label, 0usize)).1 += 1;
    }

    let mut majority: Option<(YT, usize)> = None;
    for (label, count) in counts.into_values() {
        if majority.map_or(true, |(_, best)| count > best) {
            majority = Some((label, count));
        }
    }

    majority
        .map(|(label, _)| label)
        .ok_or(TreeError::EmptyDataset)
}
