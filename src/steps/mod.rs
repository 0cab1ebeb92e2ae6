//! The pipeline steps
//!
//! Each step is an independent, stateless transformation; ordering and
//! data hand-off between them belong to the executing platform.

mod load_adult;
mod preprocess_adult;
mod preprocess_data;
mod split_data;
mod train_lr;

pub use load_adult::{binarize_target, load_adult_from_csv, LoadAdult};
pub use preprocess_adult::{PreprocessAdult, CATEGORICAL_COLUMNS};
pub use preprocess_data::PreprocessData;
pub use split_data::SplitData;
pub use train_lr::{TrainLr, DEFAULT_MODEL_PATH, MODEL_FRAMEWORK, MODEL_NAME};

use crate::error::{Result, StepError};
use crate::step::Step;
use polars::prelude::DataFrame;

/// All steps this crate registers, for CLI dispatch and listing
pub fn registry() -> Vec<Box<dyn Step>> {
    vec![
        Box::new(LoadAdult::new()),
        Box::new(PreprocessAdult),
        Box::new(PreprocessData),
        Box::new(SplitData),
        Box::new(TrainLr::new()),
    ]
}

/// Unpack the step's input tables, failing when the count is off
pub(crate) fn take_inputs<const N: usize>(
    inputs: Vec<DataFrame>,
    step: &str,
) -> Result<[DataFrame; N]> {
    let got = inputs.len();
    inputs.try_into().map_err(|_| StepError::ShapeError {
        expected: format!("{N} input tables for {step}"),
        actual: format!("{got} tables"),
    })
}
