//! Logistic regression training

use crate::data::{predictions_frame, to_feature_matrix, to_target_vector};
use crate::error::Result;
use crate::export::{logistic_regression_to_onnx, OnnxExporter};
use crate::step::{ArgType, ArgValue, RunContext, Step, StepArgs, StepArgument};
use crate::steps::take_inputs;
use crate::training::{train_test_split, ClassificationReport, LogisticRegression};
use polars::prelude::*;
use std::path::{Path, PathBuf};

pub const MODEL_NAME: &str = "simple_pipeline_lr";
pub const MODEL_FRAMEWORK: &str = "ONNX";
pub const DEFAULT_MODEL_PATH: &str = "./outputs/lr_model.onnx";
const SPLIT_SEED: u64 = 42;

/// Fits a logistic regression on a held-in split and scores the held-out
/// split. Only when a run context is supplied does the step log metrics,
/// export the model graph and register it; without one it still trains
/// and returns predictions, skipping all reporting.
pub struct TrainLr {
    model_path: PathBuf,
}

impl Default for TrainLr {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainLr {
    pub fn new() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }

    /// Redirect the exported model file (tests point this at a temp dir)
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }
}

impl Step for TrainLr {
    fn name(&self) -> &'static str {
        "train_lr"
    }

    fn arguments(&self) -> Vec<StepArgument> {
        vec![StepArgument::new(
            "test_size",
            "The test size ratio for train test split",
            ArgType::Float,
        )
        .with_default(ArgValue::Float(0.2))]
    }

    fn n_inputs(&self) -> usize {
        2
    }

    fn run(
        &self,
        inputs: Vec<DataFrame>,
        args: &StepArgs,
        run: Option<&mut dyn RunContext>,
    ) -> Result<Vec<DataFrame>> {
        let [features, targets] = take_inputs(inputs, self.name())?;
        let test_size = args.get_float("test_size")?;

        let split = train_test_split(&features, &targets, test_size, SPLIT_SEED)?;

        let x_train = to_feature_matrix(&split.features_train)?;
        let x_test = to_feature_matrix(&split.features_test)?;
        let y_train = to_target_vector(&split.targets_train)?;
        let y_test = to_target_vector(&split.targets_test)?;

        let mut model = LogisticRegression::new();
        model.fit(&x_train, &y_train)?;

        let y_pred = model.predict(&x_test)?;
        let report = ClassificationReport::compute(&y_test, &y_pred)?;

        if let Some(run) = run {
            run.log_metric("f1_score", report.f1_score);
            run.log_metric("recall", report.recall);
            run.log_metric("precision", report.precision);
            run.log_metric("accuracy", report.accuracy);

            let graph = logistic_regression_to_onnx(&model)?;
            OnnxExporter::new().export(graph, &self.model_path)?;

            run.upload_artifact(&self.model_path, "outputs/lr_model.onnx")?;
            run.register_model(MODEL_NAME, Path::new(&self.model_path), MODEL_FRAMEWORK)?;
        }

        Ok(vec![predictions_frame("prediction", &y_pred)?])
    }
}
