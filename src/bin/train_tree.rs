use gini_tree::data::dataset::Dataset;
use gini_tree::metrics::confusion::ClassificationMetrics;
use gini_tree::trees::classifier::DecisionTreeClassifier;
use std::env;
use std::error::Error;

const TRAIN_SIZE: f64 = 0.6;

struct RunConfig {
    file_path: Option<String>,
    max_depth: Option<u16>,
    min_size: usize,
    seed: u64,
}

/// `train-tree [data.csv] [max_depth|none] [min_size] [seed]`
fn parse_args() -> Result<RunConfig, Box<dyn Error>> {
    let args = env::args().skip(1).collect::<Vec<_>>();

    let max_depth = match args.get(1).map(String::as_str) {
        None => Some(3),
        Some("none") => None,
        Some(depth) => Some(depth.parse::<u16>()?),
    };
    let min_size = match args.get(2) {
        Some(size) => size.parse::<usize>()?,
        None => 1,
    };
    let seed = match args.get(3) {
        Some(seed) => seed.parse::<u64>()?,
        None => 42,
    };

    Ok(RunConfig {
        file_path: args.first().cloned(),
        max_depth,
        min_size,
        seed,
    })
}

fn demo_dataset() -> Result<Dataset<f64, u8>, Box<dyn Error>> {
    let rows = vec![
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
    ];
    Ok(Dataset::from_rows(&rows)?)
}

fn run_demo(config: &RunConfig) -> Result<String, Box<dyn Error>> {
    let dataset = demo_dataset()?;
    let mut classifier = DecisionTreeClassifier::with_params(config.max_depth, Some(config.min_size))?;
    classifier.fit(&dataset)?;
    println!("Decision Tree:\n{}", classifier);

    let prediction = classifier.predict_row(&[8.5, 4.32])?;
    Ok(format!("Expected=1, Got={}", prediction))
}

fn run_file(file_path: &str, config: &RunConfig) -> Result<String, Box<dyn Error>> {
    let dataset: Dataset<f64, u32> = Dataset::from_csv(file_path, true)?;
    println!("Loaded dataset: {} rows, {} features", dataset.nrows(), dataset.ncols());

    let (train_dataset, test_dataset) = dataset.train_test_split(TRAIN_SIZE, Some(config.seed))?;
    let mut classifier = DecisionTreeClassifier::with_params(config.max_depth, Some(config.min_size))?;
    classifier.fit(&train_dataset)?;
    println!("Decision Tree:\n{}", classifier);

    let predictions = classifier.predict(&test_dataset.x)?;
    let accuracy = classifier.accuracy(&test_dataset.y, &predictions)?;
    println!(
        "Confusion matrix:{}",
        classifier.confusion_matrix(&test_dataset.y, &predictions)?
    );
    Ok(format!(
        "Train accuracy: {}%, test accuracy: {}%",
        classifier.score(&train_dataset)? * 100.0,
        accuracy * 100.0
    ))
}

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => panic!("{}", err),
    };

    let report = match &config.file_path {
        Some(file_path) => run_file(file_path, &config),
        None => run_demo(&config),
    };
    match report {
        Ok(report) => println!("{}", report),
        Err(err) => panic!("{}", err),
    }
}
