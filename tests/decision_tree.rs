use gini_tree::data::dataset::Dataset;
use gini_tree::metrics::confusion::score;
use gini_tree::trees::classifier::DecisionTreeClassifier;
use gini_tree::trees::node::TreeNode;
use gini_tree::TreeError;
use nalgebra::{DMatrix, DVector};
use std::io::Write;

fn separable_rows() -> Vec<Vec<f64>> {
    vec![
        vec![2.771244718, 1.784783929, 0.0],
        vec![1.728571309, 1.169761413, 0.0],
        vec![3.678319846, 2.81281357, 0.0],
        vec![3.961043357, 2.61995032, 0.0],
        vec![2.999208922, 2.209014212, 0.0],
        vec![7.497545867, 3.162953546, 1.0],
        vec![9.00220326, 3.339047188, 1.0],
        vec![7.444542326, 0.476683375, 1.0],
        vec![10.12493903, 3.234550982, 1.0],
        vec![6.642287351, 3.319983761, 1.0],
    ]
}

#[test]
fn perfect_separation_with_a_single_split() {
    let dataset: Dataset<f64, u8> = Dataset::from_rows(&separable_rows()).unwrap();
    let mut tree = DecisionTreeClassifier::with_params(Some(1), Some(1)).unwrap();
    tree.fit(&dataset).unwrap();

    match tree.root().unwrap() {
        TreeNode::Internal {
            feature_index,
            threshold,
            ..
        } => {
            assert_eq!(*feature_index, 0);
            assert!(*threshold > 3.961043357 && *threshold <= 6.642287351);
        }
        TreeNode::Leaf { .. } => panic!("root should split"),
    }

    assert_eq!(tree.predict_row(&[8.5, 4.32]).unwrap(), 1);
    assert_eq!(tree.predict_row(&[4.99, 4.32]).unwrap(), 0);
    assert_eq!(tree.predict_row(&[8.5, 4.32, 1.0]).unwrap(), 1);

    let predictions = tree.predict(&dataset.x).unwrap();
    assert_eq!(score(dataset.y.as_slice(), predictions.as_slice()).unwrap(), 1.0);
}

#[test]
fn deeper_configurations_print_the_same_stump() {
    let dataset: Dataset<f64, u8> = Dataset::from_rows(&separable_rows()).unwrap();
    let mut tree = DecisionTreeClassifier::with_params(Some(3), Some(1)).unwrap();
    tree.fit(&dataset).unwrap();

    assert_eq!(tree.to_string(), "[X1 < 6.642]\n [0]\n [1]\n");
}

#[test]
fn single_class_dataset_is_a_leaf() {
    let rows = vec![
        vec![1.0, 9.0, 4.0],
        vec![3.0, 2.0, 4.0],
        vec![2.0, 5.0, 4.0],
    ];
    let dataset: Dataset<f64, u8> = Dataset::from_rows(&rows).unwrap();
    let mut tree = DecisionTreeClassifier::new();
    tree.fit(&dataset).unwrap();

    assert!(tree.root().unwrap().is_leaf());
    let test_x = DMatrix::from_row_slice(2, 2, &[-3.0, 0.0, 100.0, 100.0]);
    assert_eq!(tree.predict(&test_x).unwrap(), DVector::from_vec(vec![4, 4]));
}

#[test]
fn empty_branch_gives_both_children_the_same_label() {
    let rows = vec![vec![2.0, 0.0], vec![2.0, 1.0], vec![2.0, 1.0], vec![2.0, 0.0], vec![2.0, 1.0]];
    let dataset: Dataset<f64, u8> = Dataset::from_rows(&rows).unwrap();
    let mut tree = DecisionTreeClassifier::new();
    tree.fit(&dataset).unwrap();

    match tree.root().unwrap() {
        TreeNode::Internal { left, right, .. } => {
            assert_eq!(**left, TreeNode::leaf(1));
            assert_eq!(**right, TreeNode::leaf(1));
        }
        TreeNode::Leaf { .. } => panic!("root should be an internal node"),
    }
}

#[test]
fn depth_never_exceeds_the_limit() {
    // labels alternate along the single feature, so every split leaves mixed sides
    let rows = (0..32)
        .map(|i| vec![i as f64, (i % 3) as f64, (i % 2) as f64])
        .collect::<Vec<_>>();
    let dataset: Dataset<f64, u8> = Dataset::from_rows(&rows).unwrap();

    for max_depth in 1..6 {
        let mut tree = DecisionTreeClassifier::with_params(Some(max_depth), Some(1)).unwrap();
        tree.fit(&dataset).unwrap();
        assert!(tree.root().unwrap().depth() <= usize::from(max_depth));
    }

    let mut unbounded = DecisionTreeClassifier::new();
    unbounded.fit(&dataset).unwrap();
    assert_eq!(unbounded.score(&dataset).unwrap(), 1.0);
}

#[test]
fn duplicate_rows_with_conflicting_labels_terminate() {
    let rows = vec![
        vec![1.0, 1.0, 0.0],
        vec![1.0, 1.0, 1.0],
        vec![1.0, 1.0, 1.0],
        vec![2.0, 1.0, 0.0],
        vec![2.0, 1.0, 0.0],
        vec![2.0, 1.0, 1.0],
    ];
    let dataset: Dataset<f64, u8> = Dataset::from_rows(&rows).unwrap();
    let mut tree = DecisionTreeClassifier::new();
    tree.fit(&dataset).unwrap();

    assert_eq!(tree.predict_row(&[1.0, 1.0]).unwrap(), 1);
    assert_eq!(tree.predict_row(&[2.0, 1.0]).unwrap(), 0);
}

#[test]
fn short_rows_fail_at_prediction() {
    let dataset: Dataset<f64, u8> = Dataset::from_rows(&separable_rows()).unwrap();
    let mut tree = DecisionTreeClassifier::new();
    tree.fit(&dataset).unwrap();

    assert!(matches!(
        tree.predict_row(&[]),
        Err(TreeError::MalformedRow { .. })
    ));
}

#[test]
fn negative_labels_are_rejected_when_building() {
    let x = DMatrix::from_row_slice(3, 1, &[1.0, 2.0, 3.0]);
    let y = DVector::from_vec(vec![0i32, -1, -1]);
    let mut tree = DecisionTreeClassifier::new();
    assert!(matches!(
        tree.fit(&Dataset::new(x, y)),
        Err(TreeError::InvalidLabel { .. })
    ));
}

#[test]
fn loads_csv_and_round_trips_through_json() {
    let path = std::env::temp_dir().join(format!("gini_tree_{}.csv", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "x1,x2,label").unwrap();
        for row in separable_rows() {
            writeln!(file, "{},{},{}", row[0], row[1], row[2]).unwrap();
        }
    }

    let dataset: Dataset<f64, u32> = Dataset::from_csv(&path, true).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(dataset.nrows(), 10);
    assert_eq!(dataset.ncols(), 2);

    let mut tree = DecisionTreeClassifier::with_params(Some(2), None).unwrap();
    tree.fit(&dataset).unwrap();

    let restored = DecisionTreeClassifier::<f64, u32>::from_json(&tree.to_json().unwrap()).unwrap();
    assert_eq!(restored.to_string(), tree.to_string());
    assert_eq!(
        restored.predict(&dataset.x).unwrap(),
        tree.predict(&dataset.x).unwrap()
    );
}
