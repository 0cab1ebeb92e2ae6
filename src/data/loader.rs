//! Table load/save helpers
//!
//! Steps exchange tables in memory; the CLI materializes them as CSV files
//! between invocations.

use crate::error::{Result, StepError};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Loader for tabular files
pub struct TableLoader {
    infer_schema_rows: usize,
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TableLoader {
    pub fn new() -> Self {
        Self {
            infer_schema_rows: 100,
        }
    }

    /// Number of rows used for schema inference
    pub fn with_infer_schema_rows(mut self, n: usize) -> Self {
        self.infer_schema_rows = n;
        self
    }

    /// Load a CSV file with a header row
    pub fn load_csv(&self, path: impl AsRef<Path>) -> Result<DataFrame> {
        let file = File::open(path.as_ref())
            .map_err(|e| StepError::DataError(format!("{}: {e}", path.as_ref().display())))?;

        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(self.infer_schema_rows))
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(|e| StepError::DataError(e.to_string()))
    }
}

/// Save a DataFrame as CSV
pub fn save_csv(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path.as_ref())
        .map_err(|e| StepError::DataError(format!("{}: {e}", path.as_ref().display())))?;

    CsvWriter::new(&mut file)
        .finish(df)
        .map_err(|e| StepError::DataError(e.to_string()))
}
