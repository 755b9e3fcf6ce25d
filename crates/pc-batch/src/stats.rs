//! Compression-rate statistics over a compressed output file.

use crate::reader::load_records;
use pc_core::error::{PcError, Result};
use pc_core::CompressedRecord;
use serde_json::Value;
use std::path::Path;

pub fn load_compressed(path: &Path) -> Result<Vec<CompressedRecord>> {
    let raw = load_records(path)?;
    serde_json::from_value(Value::Array(raw))
        .map_err(|source| PcError::InvalidJson { path: path.to_path_buf(), source })
}

/// Mean of per-record `compressed / original`.
///
/// Records with no original tokens carry no rate and are left out; `None`
/// when nothing is left.
pub fn mean_compression_rate(records: &[CompressedRecord]) -> Option<f64> {
    let rates: Vec<f64> = records
        .iter()
        .filter(|r| r.original_tokens > 0)
        .map(|r| r.stats().rate())
        .collect();
    if rates.is_empty() {
        return None;
    }
    Some(rates.iter().sum::<f64>() / rates.len() as f64)
}
