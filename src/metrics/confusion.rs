use std::{cmp::Ordering, collections::HashMap};

use nalgebra::{DMatrix, DVector};

use crate::data::dataset::WholeNumber;
use crate::error::{Result, TreeError};

type ConfusionMatrix = DMatrix<usize>;

/// Fraction of positions where the predicted label equals the true label.
///
/// # Errors
///
/// * `LengthMismatch` if the sequences differ in length.
/// * `EmptyDataset` if both are empty.
pub fn score<T: PartialEq>(y_true: &[T], y_pred: &[T]) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(TreeError::LengthMismatch {
            expected: y_true.len(),
            found: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(TreeError::EmptyDataset);
    }

    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(y_t, y_p)| y_t == y_p)
        .count();

    Ok(correct as f64 / y_true.len() as f64)
}

pub trait ClassificationMetrics<T: WholeNumber> {
    /// Computes the confusion matrix based on the true labels and predicted labels.
    ///
    /// Rows are indexed by true class, columns by predicted class, both in
    /// ascending label order over every label seen in either vector.
    fn confusion_matrix(
        &self,
        y_true: &DVector<T>,
        y_pred: &DVector<T>,
    ) -> Result<ConfusionMatrix> {
        if y_true.len() != y_pred.len() {
            return Err(TreeError::LengthMismatch {
                expected: y_true.len(),
                found: y_pred.len(),
            });
        }

        let mut classes = y_true.iter().chain(y_pred.iter()).copied().collect::<Vec<_>>();
        classes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        classes.dedup();

        let positions = classes
            .iter()
            .enumerate()
            .map(|(position, class)| (*class, position))
            .collect::<HashMap<_, _>>();

        let mut matrix = DMatrix::zeros(classes.len(), classes.len());

        for (y_t, y_p) in y_true.iter().zip(y_pred.iter()) {
            matrix[(positions[y_t], positions[y_p])] += 1;
        }

        Ok(matrix)
    }

    /// Computes the accuracy based on the true labels and predicted labels.
    fn accuracy(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<f64> {
        score(y_true.as_slice(), y_pred.as_slice())
    }
}
