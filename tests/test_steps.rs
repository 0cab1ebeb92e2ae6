//! Integration tests: individual step contracts

use polars::prelude::*;
use tabular_steps::prelude::*;
use tabular_steps::steps::{binarize_target, CATEGORICAL_COLUMNS};

fn beer_table() -> DataFrame {
    df!(
        "DATE" => &[
            "2011-06-01", "2011-09-01", "2011-12-01",
            "2012-01-01", "2012-03-01", "2012-06-01",
        ],
        "BeerProduction" => &[25.0, 28.5, 30.1, 27.3, 26.8, 29.9],
        "Temperature" => &[18.0, 15.5, 9.0, 8.2, 11.0, 17.4],
    )
    .unwrap()
}

fn bind(step: &dyn Step, pairs: &[(&str, &str)]) -> StepArgs {
    let raw: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    StepArgs::bind(&step.arguments(), &raw).unwrap()
}

#[test]
fn test_preprocess_data_projects_unchanged() {
    let step = PreprocessData;
    let args = bind(&step, &[]);

    let input = beer_table();
    let out = step.run(vec![input.clone()], &args, None).unwrap();
    let projected = &out[0];

    let names: Vec<&str> = projected
        .get_column_names()
        .iter()
        .map(|s| s.as_str())
        .collect();
    assert_eq!(names, vec!["DATE", "BeerProduction"]);
    assert_eq!(projected.height(), input.height());
    assert_eq!(
        projected.column("BeerProduction").unwrap(),
        input.column("BeerProduction").unwrap()
    );
}

#[test]
fn test_preprocess_data_missing_column_fails_without_output() {
    let step = PreprocessData;
    let args = bind(&step, &[("target_column_name", "Yield")]);

    let result = step.run(vec![beer_table()], &args, None);
    assert!(matches!(result, Err(StepError::ColumnNotFound(name)) if name == "Yield"));
}

#[test]
fn test_split_data_partitions_on_threshold() {
    let step = SplitData;
    let args = bind(&step, &[("split_date", "2012-01-01")]);

    let input = beer_table();
    let out = step.run(vec![input.clone()], &args, None).unwrap();
    let (train, valid) = (&out[0], &out[1]);

    assert_eq!(train.height() + valid.height(), input.height());

    let threshold = "2012-01-01";
    for date in train.column("DATE").unwrap().str().unwrap().into_iter().flatten() {
        assert!(date < threshold, "train row {date} not below threshold");
    }
    for date in valid.column("DATE").unwrap().str().unwrap().into_iter().flatten() {
        assert!(date >= threshold, "valid row {date} below threshold");
    }
}

#[test]
fn test_split_data_counts_sum_for_every_threshold() {
    let step = SplitData;
    let input = beer_table();

    for threshold in ["2000-01-01", "2011-12-01", "2012-06-01", "2050-01-01"] {
        let args = bind(&step, &[("split_date", threshold)]);
        let out = step.run(vec![input.clone()], &args, None).unwrap();
        assert_eq!(out[0].height() + out[1].height(), input.height());
    }
}

fn adult_features() -> DataFrame {
    df!(
        "age" => &[25i64, 38, 50, 62, 29, 44],
        "hours-per-week" => &[40i64, 50, 38, 20, 45, 60],
        "workclass" => &[Some("Private"), None, Some("State-gov"), Some("Private"), Some("Self-emp"), None],
        "education" => &["11th", "HS-grad", "Masters", "Some-college", "Bachelors", "HS-grad"],
        "marital-status" => &["Never-married", "Married", "Divorced", "Widowed", "Married", "Never-married"],
        "occupation" => &["Sales", "Farming", "Exec", "Sales", "Tech", "Farming"],
        "relationship" => &["Own-child", "Husband", "Not-in-family", "Unmarried", "Wife", "Husband"],
        "race" => &["Black", "White", "White", "Asian", "White", "Black"],
        "sex" => &["Male", "Male", "Female", "Female", "Female", "Male"],
        "native-country" => &["United-States", "United-States", "Cuba", "United-States", "Mexico", "Cuba"],
    )
    .unwrap()
}

#[test]
fn test_preprocess_adult_expands_categoricals_and_scales() {
    let step = PreprocessAdult;
    let out = step
        .run(vec![adult_features()], &StepArgs::default(), None)
        .unwrap();
    let table = &out[0];

    // every declared categorical column is replaced by indicators
    for name in CATEGORICAL_COLUMNS {
        assert!(table.column(name).is_err(), "{name} survived preprocessing");
    }

    // numeric complement is scaled into [0,1]
    for name in ["age", "hours-per-week"] {
        let ca = table.column(name).unwrap().f64().unwrap();
        for v in ca.into_iter().flatten() {
            assert!((0.0..=1.0).contains(&v), "{name} value {v} escaped [0,1]");
        }
    }

    // null categoricals became a sentinel indicator column
    let missing = table.column("workclass_missing").unwrap().f64().unwrap();
    let fired: f64 = missing.into_iter().flatten().sum();
    assert_eq!(fired, 2.0, "two rows had a null workclass");
}

#[test]
fn test_preprocess_adult_missing_column_fails() {
    let step = PreprocessAdult;
    let incomplete = adult_features().drop("race").unwrap();
    let result = step.run(vec![incomplete], &StepArgs::default(), None);
    assert!(matches!(result, Err(StepError::ColumnNotFound(_))));
}

#[test]
fn test_binarize_target_labels() {
    let table = df!(
        "class" => &["<=50K", ">50K", "<=50K", ">50K", "<=50K"],
    )
    .unwrap();

    let targets = binarize_target(&table, "class").unwrap();
    let col = targets.column("target").unwrap().i64().unwrap();
    let values: Vec<i64> = col.into_iter().flatten().collect();

    assert_eq!(values, vec![0, 1, 0, 1, 0]);
    assert!(values.iter().all(|v| *v == 0 || *v == 1));
}

#[test]
fn test_load_adult_from_seeded_cache() {
    use tabular_steps::data::OpenmlClient;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("adult-v2.csv"),
        "age,workclass,class\n39,State-gov,<=50K\n50,Private,>50K\n38,Private,<=50K\n",
    )
    .unwrap();

    // unreachable base URL: a cache hit must satisfy the whole fetch
    let step = LoadAdult::with_client(OpenmlClient::new("http://localhost:1", dir.path()));
    let args = bind(&step, &[("ratio", "0.5")]);

    let out = step.run(Vec::new(), &args, None).unwrap();
    assert_eq!(out.len(), 2);

    let (features, targets) = (&out[0], &out[1]);
    assert!(features.column("class").is_err(), "target column must be split off");
    assert_eq!(features.height(), 3);

    let labels: Vec<i64> = targets
        .column("target")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(labels, vec![0, 1, 0]);
}

#[test]
fn test_registry_exposes_all_steps() {
    let names: Vec<&str> = registry().iter().map(|s| s.name()).collect();
    for expected in [
        "load_adult",
        "preprocess_adult",
        "preprocess_data",
        "split_data",
        "train_lr",
    ] {
        assert!(names.contains(&expected), "missing step {expected}");
    }
}
