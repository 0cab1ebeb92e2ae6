//! Tabular data-pipeline steps for a managed ML-training platform
//!
//! Each step is a stateless transformation over in-memory tables: load a
//! dataset from a remote registry, preprocess features, split rows by
//! date, train a logistic-regression classifier and export it to a
//! portable tensor-graph format. Steps declare their CLI-bindable
//! arguments and receive an optional run context for metric logging and
//! model registration; scheduling and data hand-off between steps belong
//! to the executing platform.
//!
//! # Modules
//!
//! - [`step`] - step, argument and run-context contracts
//! - [`steps`] - the five step implementations
//! - [`data`] - CSV table IO and the dataset registry client
//! - [`preprocessing`] - column scaling and categorical encoding
//! - [`training`] - train/test splitting, logistic regression, metrics
//! - [`export`] - portable model serialization
//! - [`cli`] - per-step command-line execution

pub mod error;

pub mod cli;
pub mod data;
pub mod export;
pub mod preprocessing;
pub mod step;
pub mod steps;
pub mod training;

pub use error::{Result, StepError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Result, StepError};
    pub use crate::step::{
        ArgType, ArgValue, LocalRun, RunContext, Step, StepArgs, StepArgument,
    };
    pub use crate::steps::{
        registry, LoadAdult, PreprocessAdult, PreprocessData, SplitData, TrainLr,
    };
    pub use crate::training::{train_test_split, ClassificationReport, LogisticRegression};
}
