//! Dataset sources.

use crate::reader::load_records;
use pc_core::error::{PcError, Result};
use pc_core::QaRecord;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};

/// Produces an ordered, finite list of question/answer records.
pub trait DatasetSource: Send + Sync {
    fn name(&self) -> &str;
    fn load(&self) -> Result<Vec<QaRecord>>;
}

/// A local JSON array of `{question, answer}` objects.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    limit: Option<usize>,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), limit: None }
    }

    /// Keep only the first `limit` records.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl DatasetSource for JsonFileSource {
    fn name(&self) -> &str {
        self.path.to_str().unwrap_or("<non-utf8 path>")
    }

    fn load(&self) -> Result<Vec<QaRecord>> {
        let raw = load_records(&self.path)?;
        let mut records: Vec<QaRecord> = serde_json::from_value(Value::Array(raw))
            .map_err(|source| PcError::InvalidJson { path: self.path.clone(), source })?;
        if let Some(limit) = self.limit {
            if limit > records.len() {
                warn!(limit, available = records.len(), "Limit exceeds dataset size, using all records");
            }
            records.truncate(limit);
        }
        info!(source = %self.path.display(), records = records.len(), "Dataset loaded");
        Ok(records)
    }
}
