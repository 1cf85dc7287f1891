use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::geo_point_extractor::DEFAULT_SKIPPED_POINT_LOG_LIMIT;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Remove points coinciding with an earlier one before indexing.
    pub dedupe_coincident: bool,
    pub skipped_point_log_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            dedupe_coincident: false,
            skipped_point_log_limit: DEFAULT_SKIPPED_POINT_LOG_LIMIT,
        }
    }
}

impl PipelineConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
