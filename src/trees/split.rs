//! Exhaustive search for the split with the lowest weighted Gini cost.
use super::criterion::split_cost;
use crate::data::dataset::{Dataset, Number, WholeNumber};
use crate::error::{Result, TreeError};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// A candidate split and the partition it produces.
#[derive(Clone, Debug)]
pub struct SplitData<XT: Number, YT: WholeNumber> {
    pub feature_index: usize,
    pub threshold: XT,
    pub left: Dataset<XT, YT>,
    pub right: Dataset<XT, YT>,
    pub cost: f64,
}

impl<XT: Number, YT: WholeNumber> SplitData<XT, YT> {
    /// True when every row landed on the same side.
    pub fn is_degenerate(&self) -> bool {
        self.left.nrows() == 0 || self.right.nrows() == 0
    }
}

/// Tries every row's value of every feature as a threshold and returns the
/// cheapest split.
///
/// Ties keep the first candidate in scan order (feature index ascending, then
/// row order). A split with an empty side is returned when nothing better
/// exists.
///
/// # Errors
///
/// * `EmptyDataset` if the dataset has no rows.
/// * `MalformedRow` if the dataset has no feature columns.
pub fn find_best_split<XT: Number, YT: WholeNumber>(
    dataset: &Dataset<XT, YT>,
) -> Result<SplitData<XT, YT>> {
    if dataset.nrows() == 0 {
        return Err(TreeError::EmptyDataset);
    }
    if dataset.ncols() == 0 {
        return Err(TreeError::MalformedRow {
            row: 0,
            expected: 1,
            found: 0,
        });
    }

    let classes = dataset.class_labels();

    // Per-feature winners come back in feature order, so a sequential
    // strict-less reduction keeps the global scan order tie-break.
    let feature_splits = (0..dataset.ncols())
        .into_par_iter()
        .map(|feature_index| best_split_on_feature(dataset, feature_index, &classes))
        .collect::<Vec<_>>();

    feature_splits
        .into_iter()
        .flatten()
        .reduce(|best, candidate| {
            if candidate.cost < best.cost {
                candidate
            } else {
                best
            }
        })
        .ok_or(TreeError::EmptyDataset)
}

fn best_split_on_feature<XT: Number, YT: WholeNumber>(
    dataset: &Dataset<XT, YT>,
    feature_index: usize,
    classes: &[YT],
) -> Option<SplitData<XT, YT>> {
    let mut best_split: Option<SplitData<XT, YT>> = None;

    for &threshold in dataset.x.column(feature_index).iter() {
        let (left, right) = dataset.split_on_threshold(feature_index, threshold);
        let cost = split_cost(&left, &right, classes);

        if best_split.as_ref().map_or(true, |best| cost < best.cost) {
            best_split = Some(SplitData {
                feature_index,
                threshold,
                left,
                right,
                cost,
            });
        }
    }
    best_split
}
