//! Table loading and dataset registry access

pub mod loader;
pub mod openml;

pub use loader::{save_csv, TableLoader};
pub use openml::{FetchedDataset, OpenmlClient};

use crate::error::{Result, StepError};
use ndarray::{Array1, Array2};
use polars::prelude::*;

/// Convert a fully numeric DataFrame into a dense feature matrix.
///
/// Every column is cast to Float64. A null anywhere is an error: the step
/// must fail before any partial output is produced.
pub fn to_feature_matrix(df: &DataFrame) -> Result<Array2<f64>> {
    let mut matrix = Array2::<f64>::zeros((df.height(), df.width()));

    for (j, column) in df.get_columns().iter().enumerate() {
        let series = column
            .as_materialized_series()
            .cast(&DataType::Float64)
            .map_err(|_| {
                StepError::DataError(format!(
                    "column {} is not numeric (dtype {})",
                    column.name(),
                    column.dtype()
                ))
            })?;
        let ca = series.f64().map_err(|e| StepError::DataError(e.to_string()))?;

        for (i, value) in ca.into_iter().enumerate() {
            match value {
                Some(v) => matrix[[i, j]] = v,
                None => {
                    return Err(StepError::DataError(format!(
                        "null value in column {} at row {i}",
                        column.name()
                    )))
                }
            }
        }
    }

    Ok(matrix)
}

/// Convert a single-column DataFrame into a target vector
pub fn to_target_vector(df: &DataFrame) -> Result<Array1<f64>> {
    if df.width() != 1 {
        return Err(StepError::ShapeError {
            expected: "1 column".to_string(),
            actual: format!("{} columns", df.width()),
        });
    }
    let matrix = to_feature_matrix(df)?;
    Ok(matrix.column(0).to_owned())
}

/// Wrap a prediction vector as a single-column DataFrame
pub fn predictions_frame(name: &str, values: &Array1<f64>) -> Result<DataFrame> {
    let series = Float64Chunked::from_iter_values(name.into(), values.iter().copied()).into_series();
    DataFrame::new(vec![series.into()]).map_err(|e| StepError::DataError(e.to_string()))
}
