//! Categorical encoding
//!
//! Fit collects a closed category table per column (code = position in the
//! table); transform replaces each declared column with one indicator
//! column per category and drops the original. Nulls are imputed with a
//! sentinel category, which earns its own indicator when observed at fit.

use crate::error::{Result, StepError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const SENTINEL_CATEGORY: &str = "missing";

/// One-hot encoder for string-typed columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEncoder {
    sentinel: String,
    // (column, category table); kept in fit order so output columns are stable
    tables: Vec<(String, Vec<String>)>,
    is_fitted: bool,
}

impl Default for CategoryEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryEncoder {
    pub fn new() -> Self {
        Self {
            sentinel: SENTINEL_CATEGORY.to_string(),
            tables: Vec::new(),
            is_fitted: false,
        }
    }

    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Collect category tables for the named columns.
    /// The sentinel is prepended when the column contains nulls.
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        self.tables.clear();

        for col_name in columns {
            let values = string_values(df, col_name)?;

            let observed: BTreeSet<String> = values.iter().flatten().cloned().collect();
            let has_nulls = values.iter().any(Option::is_none);

            let mut categories = Vec::with_capacity(observed.len() + 1);
            if has_nulls {
                categories.push(self.sentinel.clone());
            }
            categories.extend(observed);

            self.tables.push((col_name.to_string(), categories));
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Integer codes for one fitted column; nulls map to the sentinel's code.
    /// Unseen categories code as -1.
    pub fn codes(&self, df: &DataFrame, col_name: &str) -> Result<Vec<i64>> {
        let categories = self.table_for(col_name)?;
        let values = string_values(df, col_name)?;

        Ok(values
            .iter()
            .map(|opt| {
                let value = opt.as_deref().unwrap_or(self.sentinel.as_str());
                categories
                    .iter()
                    .position(|c| c == value)
                    .map(|p| p as i64)
                    .unwrap_or(-1)
            })
            .collect())
    }

    /// Replace every fitted column with its one-hot indicator columns.
    /// Rows holding a category unseen at fit get all-zero indicators.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(StepError::ModelNotFitted);
        }

        let mut result = df.clone();
        for (col_name, categories) in &self.tables {
            let values = string_values(&result, col_name)?;

            for category in categories {
                let indicator: Float64Chunked = values
                    .iter()
                    .map(|opt| {
                        let value = opt.as_deref().unwrap_or(self.sentinel.as_str());
                        Some(if value == category { 1.0 } else { 0.0 })
                    })
                    .collect();
                let name = format!("{col_name}_{category}");
                result = result
                    .with_column(indicator.with_name(name.into()).into_series())?
                    .clone();
            }

            result = result.drop(col_name)?;
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    fn table_for(&self, col_name: &str) -> Result<&[String]> {
        self.tables
            .iter()
            .find(|(name, _)| name == col_name)
            .map(|(_, cats)| cats.as_slice())
            .ok_or_else(|| StepError::ColumnNotFound(col_name.to_string()))
    }
}

/// Materialize a column as owned string values (nulls preserved)
fn string_values(df: &DataFrame, col_name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(col_name)
        .map_err(|_| StepError::ColumnNotFound(col_name.to_string()))?;
    let series = column
        .as_materialized_series()
        .cast(&DataType::String)
        .map_err(|e| StepError::DataError(e.to_string()))?;
    let ca = series.str().map_err(|e| StepError::DataError(e.to_string()))?;

    Ok(ca.into_iter().map(|opt| opt.map(str::to_string)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df!(
            "color" => &[Some("red"), Some("blue"), None, Some("red")],
            "size" => &[1.0, 2.0, 3.0, 4.0],
        )
        .unwrap()
    }

    #[test]
    fn test_one_hot_replaces_column() {
        let df = frame();
        let mut encoder = CategoryEncoder::new();
        let result = encoder.fit_transform(&df, &["color"]).unwrap();

        assert!(result.column("color").is_err());
        assert!(result.column("color_red").is_ok());
        assert!(result.column("color_blue").is_ok());
        assert!(result.column("color_missing").is_ok());
        // untouched column survives
        assert!(result.column("size").is_ok());
    }

    #[test]
    fn test_indicators_are_exclusive() {
        let df = frame();
        let mut encoder = CategoryEncoder::new();
        let result = encoder.fit_transform(&df, &["color"]).unwrap();

        let red = result.column("color_red").unwrap().f64().unwrap();
        let blue = result.column("color_blue").unwrap().f64().unwrap();
        let missing = result.column("color_missing").unwrap().f64().unwrap();

        for i in 0..df.height() {
            let sum = red.get(i).unwrap() + blue.get(i).unwrap() + missing.get(i).unwrap();
            assert_eq!(sum, 1.0, "exactly one indicator fires per row");
        }
    }

    #[test]
    fn test_codes_sentinel_first() {
        let df = frame();
        let mut encoder = CategoryEncoder::new();
        encoder.fit(&df, &["color"]).unwrap();

        let codes = encoder.codes(&df, "color").unwrap();
        // sentinel holds code 0; blue and red follow in sorted order
        assert_eq!(codes, vec![2, 1, 0, 2]);
    }

    #[test]
    fn test_no_sentinel_without_nulls() {
        let df = df!("color" => &["red", "blue"]).unwrap();
        let mut encoder = CategoryEncoder::new();
        let result = encoder.fit_transform(&df, &["color"]).unwrap();
        assert!(result.column("color_missing").is_err());
    }

    #[test]
    fn test_unseen_category_all_zero() {
        let train = df!("color" => &["red", "blue"]).unwrap();
        let test = df!("color" => &["green"]).unwrap();

        let mut encoder = CategoryEncoder::new();
        encoder.fit(&train, &["color"]).unwrap();
        let result = encoder.transform(&test).unwrap();

        let red = result.column("color_red").unwrap().f64().unwrap();
        let blue = result.column("color_blue").unwrap().f64().unwrap();
        assert_eq!(red.get(0).unwrap(), 0.0);
        assert_eq!(blue.get(0).unwrap(), 0.0);
    }

    #[test]
    fn test_fit_missing_column_fails() {
        let mut encoder = CategoryEncoder::new();
        assert!(matches!(
            encoder.fit(&frame(), &["nope"]),
            Err(StepError::ColumnNotFound(_))
        ));
    }
}
