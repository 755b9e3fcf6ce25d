use crate::error::{PcError, Result};
use crate::types::AggressivenessLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Run configuration for the compression pipeline.
///
/// Every section has defaults, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactorConfig {
    pub io: IoConfig,
    pub compression: CompressionConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    pub input: PathBuf,
    /// Output files are written to `{output_prefix}_{level}.json`.
    pub output_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    pub levels: Vec<AggressivenessLevel>,
    /// Run the legacy phrase-rewrite pre-pass before token filtering.
    pub rewrite: bool,
    /// Target rate handed to a neural compressor, when one is attached.
    pub neural_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub checkpoint_every: usize,
    pub workers: Option<usize>,
    /// Accepted names for the question field, first match wins.
    pub question_fields: Vec<String>,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("datasets/gsm8k_trial_set.json"),
            output_prefix: "datasets/output_compressed_rulebased".into(),
        }
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            levels: AggressivenessLevel::ALL.to_vec(),
            rewrite: false,
            neural_rate: 0.8,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            checkpoint_every: 10,
            workers: None,
            question_fields: vec!["question".into(), "question_original".into()],
        }
    }
}

impl Default for CompactorConfig {
    fn default() -> Self {
        Self {
            io: IoConfig::default(),
            compression: CompressionConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl CompactorConfig {
    /// Load from a TOML file and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PcError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| PcError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch.checkpoint_every == 0 {
            return Err(PcError::Config("batch.checkpoint_every must be at least 1".into()));
        }
        if self.batch.workers == Some(0) {
            return Err(PcError::Config("batch.workers must be at least 1".into()));
        }
        if self.batch.question_fields.is_empty() {
            return Err(PcError::Config("batch.question_fields must not be empty".into()));
        }
        if self.compression.levels.is_empty() {
            return Err(PcError::Config("compression.levels must not be empty".into()));
        }
        if !(self.compression.neural_rate > 0.0 && self.compression.neural_rate <= 1.0) {
            return Err(PcError::Config(format!(
                "compression.neural_rate must be in (0, 1], got {}",
                self.compression.neural_rate
            )));
        }
        Ok(())
    }

    /// Output file for one level.
    pub fn output_path(&self, level: AggressivenessLevel) -> PathBuf {
        PathBuf::from(format!("{}_{}.json", self.io.output_prefix, level))
    }
}
