//! # Gini-tree
//!
//! `gini-tree` provides a binary decision tree classifier that grows greedily by
//! minimizing the weighted Gini impurity of each split.
//! It also contains utilities for loading tabular data and scoring predictions.
//!
//! ## Getting Started
//!
//! To use `gini-tree`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! gini-tree = "*"
//! ```
//!
//! ## Example Usage
//!
//! Rows hold the features followed by an integer class label:
//!
//! ```rust
//! use gini_tree::data::dataset::Dataset;
//! use gini_tree::trees::classifier::DecisionTreeClassifier;
//!
//! let rows = vec![
//!     vec![2.77, 1.78, 0.0],
//!     vec![1.73, 1.17, 0.0],
//!     vec![3.68, 2.81, 0.0],
//!     vec![7.50, 3.16, 1.0],
//!     vec![9.00, 3.34, 1.0],
//!     vec![6.64, 3.32, 1.0],
//! ];
//! let dataset: Dataset<f64, u8> = Dataset::from_rows(&rows).unwrap();
//!
//! let mut tree = DecisionTreeClassifier::with_params(Some(3), Some(1)).unwrap();
//! tree.fit(&dataset).unwrap();
//!
//! assert_eq!(tree.predict_row(&[8.5, 4.32]).unwrap(), 1);
//! assert_eq!(tree.score(&dataset).unwrap(), 1.0);
//! println!("{}", tree);
//! ```

/// Dataset and data manipulation utilities
pub mod data;
/// Error types
pub mod error;
/// Functions for evaluating model performance
pub mod metrics;
/// Decision trees
pub mod trees;

pub use error::{Result, TreeError};
