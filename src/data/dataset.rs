use crate::error::{Result, TreeError};
use nalgebra::{DMatrix, DVector};
use num_traits::{FromPrimitive, Num, ToPrimitive};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::cmp::{Ordering, PartialOrd};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::path::Path;

pub trait DataValue:
    Debug + Clone + Copy + Num + FromPrimitive + ToPrimitive + Send + Sync + Display + 'static
{
}

impl<T> DataValue for T where
    T: Debug + Clone + Copy + Num + FromPrimitive + ToPrimitive + Send + Sync + Display + 'static
{
}

pub trait Number: DataValue + PartialOrd {}
impl<T> Number for T where T: DataValue + PartialOrd {}

pub trait WholeNumber: Number + Eq + Hash {}
impl<T> WholeNumber for T where T: Number + Eq + Hash {}

pub trait TargetValue: DataValue {}
impl<T> TargetValue for T where T: DataValue {}

/// Tabular dataset: one row of features per sample and one label per row.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset<XT: Number, YT: TargetValue> {
    pub x: DMatrix<XT>,
    pub y: DVector<YT>,
}

impl<XT: Number, YT: TargetValue> Dataset<XT, YT> {
    pub fn new(x: DMatrix<XT>, y: DVector<YT>) -> Self {
        Self { x, y }
    }

    /// Builds a dataset from row-major rows where the last value of each row
    /// is the class label and every other value is a feature.
    ///
    /// # Errors
    ///
    /// * `EmptyDataset` if `rows` is empty.
    /// * `MalformedRow` if a row has no feature column or its length differs
    ///   from the first row.
    /// * `InvalidLabel` if a label is negative, non-integer or doesn't fit `YT`.
    pub fn from_rows(rows: &[Vec<XT>]) -> Result<Self> {
        let width = rows.first().ok_or(TreeError::EmptyDataset)?.len();
        if width < 2 {
            return Err(TreeError::MalformedRow {
                row: 0,
                expected: 2,
                found: width,
            });
        }

        let mut features = Vec::with_capacity(rows.len() * (width - 1));
        let mut labels = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(TreeError::MalformedRow {
                    row: index,
                    expected: width,
                    found: row.len(),
                });
            }
            features.extend_from_slice(&row[..width - 1]);
            labels.push(Self::label_from_value(index, row[width - 1])?);
        }

        Ok(Self::new(
            DMatrix::from_row_slice(rows.len(), width - 1, &features),
            DVector::from_vec(labels),
        ))
    }

    /// Reads a numeric CSV file whose last column holds the class label.
    pub fn from_csv<P: AsRef<Path>>(path: P, has_headers: bool) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(has_headers)
            .from_path(path)?;

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let row = record
                .iter()
                .map(|field| {
                    field
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .and_then(XT::from_f64)
                        .ok_or_else(|| {
                            TreeError::Parse(format!("row {}: can't read value '{}'", index, field))
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }

        Self::from_rows(&rows)
    }

    fn label_from_value(row: usize, value: XT) -> Result<YT> {
        let invalid = || TreeError::InvalidLabel {
            row,
            value: value.to_string(),
        };
        let as_float = value.to_f64().ok_or_else(invalid)?;
        if !as_float.is_finite() || as_float < 0.0 || as_float.fract() != 0.0 {
            return Err(invalid());
        }
        YT::from_f64(as_float).ok_or_else(invalid)
    }

    /// Fails with `LengthMismatch` when the feature matrix and the label
    /// vector disagree on the number of rows.
    pub fn check_shape(&self) -> Result<()> {
        if self.x.nrows() != self.y.len() {
            return Err(TreeError::LengthMismatch {
                expected: self.y.len(),
                found: self.x.nrows(),
            });
        }
        Ok(())
    }

    pub fn nrows(&self) -> usize {
        self.y.len()
    }

    /// Number of feature columns.
    pub fn ncols(&self) -> usize {
        self.x.ncols()
    }

    /// Shuffles the rows with a seeded RNG and splits them into a training and
    /// a test dataset.
    pub fn train_test_split(&self, train_size: f64, seed: Option<u64>) -> Result<(Self, Self)> {
        self.check_shape()?;
        if !(0.0..=1.0).contains(&train_size) {
            return Err(TreeError::InvalidParameter(
                "Train size should be between 0.0 and 1.0".into(),
            ));
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.nrows()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_size = (self.nrows() as f64 * train_size).floor() as usize;

        Ok((
            self.select_rows(&indices[..train_size]),
            self.select_rows(&indices[train_size..]),
        ))
    }

    /// Partitions the rows on one feature: rows whose value is strictly less
    /// than `threshold` go left, all others go right. Row order is preserved
    /// within each side.
    pub fn split_on_threshold(&self, feature_index: usize, threshold: XT) -> (Self, Self) {
        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) =
            (0..self.nrows()).partition(|&index| self.x[(index, feature_index)] < threshold);

        (
            self.select_rows(&left_indices),
            self.select_rows(&right_indices),
        )
    }

    fn select_rows(&self, indices: &[usize]) -> Self {
        if indices.is_empty() {
            return Self::new(DMatrix::zeros(0, self.ncols()), DVector::zeros(0));
        }

        let rows = indices
            .iter()
            .map(|&index| self.x.row(index))
            .collect::<Vec<_>>();
        let labels = indices
            .iter()
            .map(|&index| self.y[index])
            .collect::<Vec<_>>();

        Self::new(DMatrix::from_rows(&rows), DVector::from_vec(labels))
    }
}

impl<XT: Number, YT: WholeNumber> Dataset<XT, YT> {
    /// Distinct class labels in ascending order.
    pub fn class_labels(&self) -> Vec<YT> {
        let mut classes = self.y.iter().copied().collect::<Vec<_>>();
        classes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        classes.dedup();
        classes
    }

    /// Number of rows carrying each of `classes`, in the same order.
    pub fn class_counts(&self, classes: &[YT]) -> Vec<usize> {
        classes
            .iter()
            .map(|class| self.y.iter().filter(|&label| label == class).count())
            .collect()
    }

    /// True when every row shares a single label.
    pub fn is_pure(&self) -> bool {
        match self.y.iter().next() {
            Some(first) => self.y.iter().all(|label| label == first),
            None => true,
        }
    }
}
