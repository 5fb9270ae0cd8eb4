//! Gini impurity and the weighted cost of a binary split.
use crate::data::dataset::{Dataset, Number, WholeNumber};

/// Gini impurity `1 - sum(p_c^2)` of one branch, given the number of rows of
/// each class in it. An empty branch scores 1.
pub fn gini_impurity(class_counts: &[usize]) -> f64 {
    let total: usize = class_counts.iter().sum();
    if total == 0 {
        return 1.0;
    }
    let total = total as f64;

    class_counts.iter().fold(1.0, |gini, &count| {
        let p_class = count as f64 / total;
        gini - p_class * p_class
    })
}

/// Impurity of each branch weighted by its share of the rows. Empty branches
/// contribute nothing; 0 means both sides are pure.
pub fn split_cost<XT: Number, YT: WholeNumber>(
    left: &Dataset<XT, YT>,
    right: &Dataset<XT, YT>,
    classes: &[YT],
) -> f64 {
    let total_samples = (left.nrows() + right.nrows()) as f64;

    [left, right]
        .iter()
        .filter(|branch| branch.nrows() > 0)
        .map(|branch| {
            gini_impurity(&branch.class_counts(classes)) * branch.nrows() as f64 / total_samples
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{DMatrix, DVector};

    fn branch(labels: Vec<u8>) -> Dataset<f64, u8> {
        let x = DMatrix::from_element(labels.len(), 1, 0.0);
        Dataset::new(x, DVector::from_vec(labels))
    }

    #[test]
    fn test_gini_pure() {
        assert_eq!(gini_impurity(&[4]), 0.0);
        assert_eq!(gini_impurity(&[0, 7, 0]), 0.0);
    }

    #[test]
    fn test_gini_mixed() {
        assert_relative_eq!(gini_impurity(&[5, 5]), 0.5);
        assert_relative_eq!(gini_impurity(&[1, 2]), 4.0 / 9.0);
        assert_relative_eq!(gini_impurity(&[3, 3, 3]), 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gini_empty_branch() {
        assert_eq!(gini_impurity(&[]), 1.0);
        assert_eq!(gini_impurity(&[0, 0]), 1.0);
    }

    #[test]
    fn test_gini_bounds() {
        let groupings: [&[usize]; 5] = [&[1, 9], &[2, 3, 4], &[10, 1, 1, 1], &[6, 6], &[1, 1, 1, 1]];
        for counts in groupings {
            let classes_present = counts.iter().filter(|&&count| count > 0).count() as f64;
            let gini = gini_impurity(counts);
            assert!(gini > 0.0);
            assert!(gini <= 1.0 - 1.0 / classes_present + 1e-12);
        }
    }

    #[test]
    fn test_split_cost_pure_branches() {
        let classes = [0, 1];
        let cost = split_cost(&branch(vec![0, 0, 0]), &branch(vec![1, 1]), &classes);
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn test_split_cost_weighted() {
        let classes = [0, 1];
        // left: gini 0.5 with weight 4/6, right: pure
        let cost = split_cost(&branch(vec![0, 0, 1, 1]), &branch(vec![1, 1]), &classes);
        assert_relative_eq!(cost, 0.5 * 4.0 / 6.0);
    }

    #[test]
    fn test_split_cost_empty_side() {
        let classes = [0, 1];
        let cost = split_cost(&branch(vec![]), &branch(vec![0, 1, 1]), &classes);
        assert_relative_eq!(cost, 4.0 / 9.0);
    }
}
