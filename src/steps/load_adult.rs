//! Adult census income loader

use crate::data::{OpenmlClient, TableLoader};
use crate::error::{Result, StepError};
use crate::step::{ArgType, ArgValue, RunContext, Step, StepArgs, StepArgument};
use polars::prelude::*;

pub const DATASET_NAME: &str = "adult";
pub const DATASET_VERSION: u32 = 2;
const FALLBACK_TARGET_COLUMN: &str = "class";
const POSITIVE_LABEL: &str = ">50K";

/// Fetches the adult dataset from the registry and splits it into a
/// feature table and a binarized target table.
pub struct LoadAdult {
    client: OpenmlClient,
}

impl Default for LoadAdult {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadAdult {
    pub fn new() -> Self {
        Self {
            client: OpenmlClient::default(),
        }
    }

    /// Use a non-default registry client (tests point this at a cache dir)
    pub fn with_client(client: OpenmlClient) -> Self {
        Self { client }
    }
}

impl Step for LoadAdult {
    fn name(&self) -> &'static str {
        "load_adult"
    }

    fn arguments(&self) -> Vec<StepArgument> {
        vec![
            StepArgument::new("active", "Dummy argument", ArgType::Bool)
                .with_default(ArgValue::Bool(false))
                .required(),
            StepArgument::new("ratio", "a float", ArgType::Float).required(),
        ]
    }

    fn run(
        &self,
        _inputs: Vec<DataFrame>,
        args: &StepArgs,
        _run: Option<&mut dyn RunContext>,
    ) -> Result<Vec<DataFrame>> {
        let active = args.get_bool("active")?;
        let ratio = args.get_float("ratio")?;
        tracing::info!(active, "active flag");
        tracing::info!(ratio, "ratio argument");

        let fetched = self.client.fetch(DATASET_NAME, DATASET_VERSION)?;
        let target_column = fetched
            .target_column
            .unwrap_or_else(|| FALLBACK_TARGET_COLUMN.to_string());

        let targets = binarize_target(&fetched.table, &target_column)?;
        let features = fetched.table.drop(&target_column)?;

        Ok(vec![features, targets])
    }
}

/// Binarize the raw class column: 1 iff the label equals `>50K`, else 0.
pub fn binarize_target(table: &DataFrame, target_column: &str) -> Result<DataFrame> {
    let column = table
        .column(target_column)
        .map_err(|_| StepError::ColumnNotFound(target_column.to_string()))?;
    let series = column
        .as_materialized_series()
        .cast(&DataType::String)
        .map_err(|e| StepError::DataError(e.to_string()))?;
    let ca = series.str().map_err(|e| StepError::DataError(e.to_string()))?;

    let labels: Int64Chunked = ca
        .into_iter()
        .map(|opt| Some(i64::from(opt == Some(POSITIVE_LABEL))))
        .collect();

    DataFrame::new(vec![labels.with_name("target".into()).into_series().into()])
        .map_err(|e| StepError::DataError(e.to_string()))
}

/// Load the adult table from a local CSV instead of the registry.
/// Same feature/target contract as the step itself.
pub fn load_adult_from_csv(path: &str, target_column: &str) -> Result<(DataFrame, DataFrame)> {
    let table = TableLoader::new().load_csv(path)?;
    let targets = binarize_target(&table, target_column)?;
    let features = table.drop(target_column)?;
    Ok((features, targets))
}
