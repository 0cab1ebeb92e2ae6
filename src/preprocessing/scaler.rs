//! Column scaling

use crate::error::{Result, StepError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Scaling strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalerKind {
    /// Min-Max scaling to [0,1]: (x - min) / (max - min)
    MinMax,
    /// Standard scaling (z-score): (x - mean) / std
    Standard,
}

/// Parameters for one fitted column
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ColumnParams {
    center: f64, // min or mean
    scale: f64,  // range or std
}

/// Per-column feature scaler over DataFrames
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    kind: ScalerKind,
    params: HashMap<String, ColumnParams>,
    is_fitted: bool,
}

impl Scaler {
    pub fn new(kind: ScalerKind) -> Self {
        Self {
            kind,
            params: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Fit scaling parameters on the named columns
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| StepError::ColumnNotFound(col_name.to_string()))?;
            let series = column
                .as_materialized_series()
                .cast(&DataType::Float64)
                .map_err(|e| StepError::DataError(e.to_string()))?;

            let params = self.compute_params(&series)?;
            self.params.insert(col_name.to_string(), params);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform all fitted columns, leaving other columns untouched
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(StepError::ModelNotFitted);
        }

        let mut result = df.clone();
        for (col_name, params) in &self.params {
            let column = df
                .column(col_name)
                .map_err(|_| StepError::ColumnNotFound(col_name.to_string()))?;
            let series = column
                .as_materialized_series()
                .cast(&DataType::Float64)
                .map_err(|e| StepError::DataError(e.to_string()))?;
            let ca = series.f64().map_err(|e| StepError::DataError(e.to_string()))?;

            let scaled: Float64Chunked = ca
                .into_iter()
                .map(|opt| opt.map(|v| (v - params.center) / params.scale))
                .collect();

            result = result
                .with_column(scaled.with_name(series.name().clone()).into_series())?
                .clone();
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    fn compute_params(&self, series: &Series) -> Result<ColumnParams> {
        let ca = series.f64().map_err(|e| StepError::DataError(e.to_string()))?;

        match self.kind {
            ScalerKind::MinMax => {
                let min = ca.min().unwrap_or(0.0);
                let max = ca.max().unwrap_or(1.0);
                let range = max - min;
                Ok(ColumnParams {
                    center: min,
                    scale: if range == 0.0 { 1.0 } else { range },
                })
            }
            ScalerKind::Standard => {
                let mean = ca.mean().unwrap_or(0.0);
                let std = ca.std(1).unwrap_or(1.0);
                Ok(ColumnParams {
                    center: mean,
                    scale: if std == 0.0 { 1.0 } else { std },
                })
            }
        }
    }
}
