//! Adult census feature preprocessing

use crate::error::Result;
use crate::preprocessing::{CategoryEncoder, Scaler, ScalerKind};
use crate::step::{RunContext, Step, StepArgs};
use crate::steps::take_inputs;
use polars::prelude::*;

/// The categorical columns of the adult table. Fixed by the dataset schema.
pub const CATEGORICAL_COLUMNS: [&str; 8] = [
    "workclass",
    "education",
    "marital-status",
    "occupation",
    "relationship",
    "race",
    "sex",
    "native-country",
];

/// One-hot encodes the fixed categorical columns (nulls imputed with a
/// sentinel category) and min-max scales the numeric complement to [0,1].
///
/// The scaler is fit on the same table it transforms; there is no held-out
/// fit/transform separation here.
pub struct PreprocessAdult;

impl Step for PreprocessAdult {
    fn name(&self) -> &'static str {
        "preprocess_adult"
    }

    fn n_inputs(&self) -> usize {
        1
    }

    fn run(
        &self,
        inputs: Vec<DataFrame>,
        _args: &StepArgs,
        _run: Option<&mut dyn RunContext>,
    ) -> Result<Vec<DataFrame>> {
        let [features] = take_inputs(inputs, self.name())?;

        let numeric_columns: Vec<String> = features
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .filter(|name| !CATEGORICAL_COLUMNS.contains(&name.as_str()))
            .collect();

        let mut encoder = CategoryEncoder::new();
        let encoded = encoder.fit_transform(&features, &CATEGORICAL_COLUMNS)?;

        let numeric: Vec<&str> = numeric_columns.iter().map(String::as_str).collect();
        let mut scaler = Scaler::new(ScalerKind::MinMax);
        let scaled = scaler.fit_transform(&encoded, &numeric)?;

        Ok(vec![scaled])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StepError;

    fn adult_features() -> DataFrame {
        df!(
            "age" => &[25i64, 38, 50, 62],
            "fnlwgt" => &[226_802i64, 89_814, 336_951, 160_323],
            "workclass" => &[Some("Private"), None, Some("State-gov"), Some("Private")],
            "education" => &["11th", "HS-grad", "Masters", "Some-college"],
            "marital-status" => &["Never-married", "Married-civ-spouse", "Divorced", "Widowed"],
            "occupation" => &["Machine-op-inspct", "Farming-fishing", "Exec-managerial", "Sales"],
            "relationship" => &["Own-child", "Husband", "Not-in-family", "Unmarried"],
            "race" => &["Black", "White", "White", "Asian-Pac-Islander"],
            "sex" => &["Male", "Male", "Female", "Female"],
            "native-country" => &["United-States", "United-States", "Cuba", "United-States"],
        )
        .unwrap()
    }

    #[test]
    fn test_categorical_columns_are_replaced() {
        let out = PreprocessAdult
            .run(vec![adult_features()], &StepArgs::default(), None)
            .unwrap();
        let table = &out[0];

        for name in CATEGORICAL_COLUMNS {
            assert!(table.column(name).is_err(), "{name} should be expanded away");
        }
        assert!(table.column("sex_Male").is_ok());
        assert!(table.column("workclass_missing").is_ok());
    }

    #[test]
    fn test_numeric_columns_scaled_to_unit_interval() {
        let out = PreprocessAdult
            .run(vec![adult_features()], &StepArgs::default(), None)
            .unwrap();
        let table = &out[0];

        for name in ["age", "fnlwgt"] {
            let ca = table.column(name).unwrap().f64().unwrap();
            for v in ca.into_iter().flatten() {
                assert!((0.0..=1.0).contains(&v), "{name} value {v} out of range");
            }
        }
    }

    #[test]
    fn test_row_count_preserved() {
        let features = adult_features();
        let n = features.height();
        let out = PreprocessAdult
            .run(vec![features], &StepArgs::default(), None)
            .unwrap();
        assert_eq!(out[0].height(), n);
    }

    #[test]
    fn test_missing_expected_column_fails() {
        let incomplete = adult_features().drop("occupation").unwrap();
        let result = PreprocessAdult.run(vec![incomplete], &StepArgs::default(), None);
        assert!(matches!(result, Err(StepError::ColumnNotFound(_))));
    }
}
