//! Date-threshold train/validation split

use crate::error::{Result, StepError};
use crate::step::{ArgType, ArgValue, RunContext, Step, StepArgs, StepArgument};
use crate::steps::take_inputs;
use polars::prelude::*;

/// Partitions rows on a time column: rows strictly below the split date go
/// to the train table, every other row (nulls included) to validation, so
/// the two outputs always account for the whole input.
///
/// The comparison is lexical over the column's string rendition; date
/// columns render as ISO-8601, so lexical and temporal order coincide.
pub struct SplitData;

impl Step for SplitData {
    fn name(&self) -> &'static str {
        "split_data"
    }

    fn arguments(&self) -> Vec<StepArgument> {
        vec![
            StepArgument::new(
                "time_column_name",
                "Time column name for training",
                ArgType::Str,
            )
            .with_default(ArgValue::Str("DATE".to_string())),
            StepArgument::new(
                "split_date",
                "Date to split the dataset into train and validation sets",
                ArgType::Str,
            )
            .with_default(ArgValue::Str("2012-01-01".to_string())),
        ]
    }

    fn n_inputs(&self) -> usize {
        1
    }

    fn run(
        &self,
        inputs: Vec<DataFrame>,
        args: &StepArgs,
        _run: Option<&mut dyn RunContext>,
    ) -> Result<Vec<DataFrame>> {
        let [data] = take_inputs(inputs, self.name())?;
        let time_column = args.get_str("time_column_name")?;
        let split_date = args.get_str("split_date")?;

        let column = data
            .column(time_column)
            .map_err(|_| StepError::ColumnNotFound(time_column.to_string()))?;
        let series = column
            .as_materialized_series()
            .cast(&DataType::String)
            .map_err(|e| StepError::DataError(e.to_string()))?;
        let ca = series.str().map_err(|e| StepError::DataError(e.to_string()))?;

        let is_train: BooleanChunked = ca
            .into_iter()
            .map(|opt| Some(opt.map(|time| time < split_date).unwrap_or(false)))
            .collect();
        let is_valid: BooleanChunked = is_train.into_iter().map(|opt| opt.map(|b| !b)).collect();

        let train = data.filter(&is_train)?;
        let valid = data.filter(&is_valid)?;

        Ok(vec![train, valid])
    }
}
