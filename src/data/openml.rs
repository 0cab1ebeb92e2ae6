//! OpenML dataset registry client
//!
//! Resolves a dataset by name and version through the registry's JSON
//! listing, downloads its CSV materialization, and caches it on disk.
//! Network and lookup failures propagate to the caller unmodified.

use crate::data::loader::TableLoader;
use crate::error::{Result, StepError};
use polars::prelude::DataFrame;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

const DEFAULT_BASE_URL: &str = "https://www.openml.org";

#[derive(Debug, Deserialize)]
struct ListResponse {
    data: ListInner,
}

#[derive(Debug, Deserialize)]
struct ListInner {
    dataset: Vec<DatasetEntry>,
}

#[derive(Debug, Deserialize)]
struct DatasetEntry {
    did: u64,
    version: u32,
}

#[derive(Debug, Deserialize)]
struct DescriptionResponse {
    data_set_description: DatasetDescription,
}

#[derive(Debug, Deserialize)]
struct DatasetDescription {
    file_id: String,
    #[serde(default)]
    default_target_attribute: Option<String>,
}

/// A fetched dataset: the full table plus the registry's declared target column
#[derive(Debug)]
pub struct FetchedDataset {
    pub table: DataFrame,
    pub target_column: Option<String>,
}

/// Blocking client for the dataset registry
pub struct OpenmlClient {
    base_url: String,
    cache_dir: PathBuf,
    client: reqwest::blocking::Client,
}

impl Default for OpenmlClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, std::env::temp_dir().join("openml-cache"))
    }
}

impl OpenmlClient {
    pub fn new(base_url: impl Into<String>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            cache_dir: cache_dir.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn cache_path(&self, name: &str, version: u32) -> PathBuf {
        self.cache_dir.join(format!("{name}-v{version}.csv"))
    }

    /// Fetch a dataset by name and version.
    ///
    /// Serves from the local cache when present; otherwise resolves the
    /// dataset id, downloads the CSV body and caches it.
    pub fn fetch(&self, name: &str, version: u32) -> Result<FetchedDataset> {
        let cached = self.cache_path(name, version);
        let (csv_path, target_column) = if cached.exists() {
            tracing::debug!(dataset = name, version, "serving dataset from cache");
            (cached, self.read_cached_target(name, version))
        } else {
            let did = self.resolve_dataset_id(name, version)?;
            let description = self.fetch_description(did)?;
            tracing::debug!(dataset = name, version, did, "downloading dataset");

            let url = format!(
                "{}/data/v1/get_csv/{}/{name}.csv",
                self.base_url, description.file_id
            );
            let body = self.client.get(&url).send()?.error_for_status()?.bytes()?;

            fs::create_dir_all(&self.cache_dir)?;
            fs::write(&cached, &body)?;
            if let Some(target) = &description.default_target_attribute {
                fs::write(self.target_marker_path(name, version), target)?;
            }

            (cached, description.default_target_attribute)
        };

        let table = TableLoader::new().load_csv(&csv_path)?;
        Ok(FetchedDataset {
            table,
            target_column,
        })
    }

    fn target_marker_path(&self, name: &str, version: u32) -> PathBuf {
        self.cache_dir.join(format!("{name}-v{version}.target"))
    }

    fn read_cached_target(&self, name: &str, version: u32) -> Option<String> {
        fs::read_to_string(self.target_marker_path(name, version)).ok()
    }

    fn resolve_dataset_id(&self, name: &str, version: u32) -> Result<u64> {
        let url = format!("{}/api/v1/json/data/list/data_name/{name}", self.base_url);
        let listing: ListResponse = self.client.get(&url).send()?.error_for_status()?.json()?;

        listing
            .data
            .dataset
            .iter()
            .find(|entry| entry.version == version)
            .map(|entry| entry.did)
            .ok_or_else(|| StepError::DatasetNotFound {
                name: name.to_string(),
                version,
            })
    }

    fn fetch_description(&self, did: u64) -> Result<DatasetDescription> {
        let url = format!("{}/api/v1/json/data/{did}", self.base_url);
        let response: DescriptionResponse =
            self.client.get(&url).send()?.error_for_status()?.json()?;
        Ok(response.data_set_description)
    }
}
