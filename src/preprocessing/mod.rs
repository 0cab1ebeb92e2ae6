//! Data preprocessing
//!
//! Column scaling and categorical encoding over polars DataFrames. Both
//! transformers follow the fit/transform pattern and fail on use before
//! fit.

mod encoder;
mod scaler;

pub use encoder::CategoryEncoder;
pub use scaler::{Scaler, ScalerKind};
