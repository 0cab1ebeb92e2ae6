//! Run context for metric logging and artifact registration
//!
//! A step may be handed a run context by the executing platform. Absence of
//! a context disables metric logging and model registration for that
//! invocation; the step itself still runs.

use crate::error::{Result, StepError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// External handle used by steps to report metrics and register artifacts.
pub trait RunContext {
    /// Record a scalar metric under the given name
    fn log_metric(&mut self, name: &str, value: f64);

    /// Upload a local file to the run's artifact store under `remote_path`
    fn upload_artifact(&mut self, local_path: &Path, remote_path: &str) -> Result<()>;

    /// Register a model artifact under a fixed name and framework tag
    fn register_model(&mut self, name: &str, path: &Path, framework: &str) -> Result<()>;
}

/// A model registration entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredModel {
    pub name: String,
    pub path: String,
    pub framework: String,
}

/// Serialized record of a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub metrics: HashMap<String, f64>,
    pub artifacts: Vec<String>,
    pub models: Vec<RegisteredModel>,
}

/// File-system backed run context.
///
/// Artifacts are copied into `<base_dir>/<run_id>/artifacts/`; the run
/// record lands in `<base_dir>/<run_id>/run.json` on [`LocalRun::finish`].
pub struct LocalRun {
    base_dir: PathBuf,
    record: RunRecord,
}

impl LocalRun {
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let run_id = uuid::Uuid::new_v4().to_string();
        let run = Self {
            base_dir,
            record: RunRecord {
                run_id,
                started_at: Utc::now(),
                finished_at: None,
                metrics: HashMap::new(),
                artifacts: Vec::new(),
                models: Vec::new(),
            },
        };
        fs::create_dir_all(run.artifacts_dir())?;
        Ok(run)
    }

    pub fn run_id(&self) -> &str {
        &self.record.run_id
    }

    pub fn run_dir(&self) -> PathBuf {
        self.base_dir.join(&self.record.run_id)
    }

    fn artifacts_dir(&self) -> PathBuf {
        self.run_dir().join("artifacts")
    }

    pub fn metrics(&self) -> &HashMap<String, f64> {
        &self.record.metrics
    }

    pub fn registered_models(&self) -> &[RegisteredModel] {
        &self.record.models
    }

    /// Close the run and persist its record
    pub fn finish(mut self) -> Result<RunRecord> {
        self.record.finished_at = Some(Utc::now());
        let json = serde_json::to_string_pretty(&self.record)?;
        fs::write(self.run_dir().join("run.json"), json)?;
        Ok(self.record)
    }
}

impl RunContext for LocalRun {
    fn log_metric(&mut self, name: &str, value: f64) {
        tracing::info!(metric = name, value, "logged metric");
        self.record.metrics.insert(name.to_string(), value);
    }

    fn upload_artifact(&mut self, local_path: &Path, remote_path: &str) -> Result<()> {
        if !local_path.exists() {
            return Err(StepError::DataError(format!(
                "artifact does not exist: {}",
                local_path.display()
            )));
        }
        let dest = self.artifacts_dir().join(remote_path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(local_path, &dest)?;
        self.record.artifacts.push(remote_path.to_string());
        Ok(())
    }

    fn register_model(&mut self, name: &str, path: &Path, framework: &str) -> Result<()> {
        tracing::info!(model = name, framework, "registered model");
        self.record.models.push(RegisteredModel {
            name: name.to_string(),
            path: path.display().to_string(),
            framework: framework.to_string(),
        });
        Ok(())
    }
}
