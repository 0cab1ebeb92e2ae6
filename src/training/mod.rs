//! Model training
//!
//! Seeded train/test splitting, binary logistic regression and the
//! classification metrics the training step reports.

pub mod logistic;
pub mod metrics;
pub mod split;

pub use logistic::LogisticRegression;
pub use metrics::ClassificationReport;
pub use split::{train_test_split, SplitTables};
