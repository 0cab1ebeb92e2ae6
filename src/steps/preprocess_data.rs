//! Beer production preprocessing: column projection

use crate::error::{Result, StepError};
use crate::step::{ArgType, ArgValue, RunContext, Step, StepArgs, StepArgument};
use crate::steps::take_inputs;
use polars::prelude::*;

/// Projects the time and target columns out of the input table, preserving
/// row order and values.
pub struct PreprocessData;

impl Step for PreprocessData {
    fn name(&self) -> &'static str {
        "preprocess_data"
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
                "target_column_name",
                "Target column name to predict",
                ArgType::Str,
            )
            .with_default(ArgValue::Str("BeerProduction".to_string())),
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
        let target_column = args.get_str("target_column_name")?;

        for name in [time_column, target_column] {
            if data.column(name).is_err() {
                return Err(StepError::ColumnNotFound(name.to_string()));
            }
        }

        let result = data.select([time_column, target_column])?;
        Ok(vec![result])
    }
}
