//! The step contract
//!
//! A step is a stateless transformation over in-memory tables: zero or more
//! input DataFrames plus a bound argument set in, zero or more output
//! DataFrames out. Binding, scheduling and data hand-off between steps
//! belong to the executing platform, not to the steps themselves.

mod argument;
mod context;

pub use argument::{ArgType, ArgValue, StepArgs, StepArgument};
pub use context::{LocalRun, RegisteredModel, RunContext, RunRecord};

use crate::error::Result;
use polars::prelude::DataFrame;

/// A single runnable pipeline step
pub trait Step {
    /// Stable step name, used for registration and CLI dispatch
    fn name(&self) -> &'static str;

    /// The fixed set of CLI-bindable parameter declarations
    fn arguments(&self) -> Vec<StepArgument> {
        Vec::new()
    }

    /// Number of input tables the step consumes
    fn n_inputs(&self) -> usize {
        0
    }

    /// Execute the step.
    ///
    /// `run` is the optional platform handle for metric logging and model
    /// registration; steps must tolerate its absence.
    fn run(
        &self,
        inputs: Vec<DataFrame>,
        args: &StepArgs,
        run: Option<&mut dyn RunContext>,
    ) -> Result<Vec<DataFrame>>;
}
