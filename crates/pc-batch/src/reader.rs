//! Loading record batches from JSON files.

use pc_core::error::{PcError, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Keys owned by the output schema; never copied from input into `extra`.
pub const RESERVED_FIELDS: &[&str] = &[
    "question",
    "question_original",
    "question_rulebased",
    "question_neural",
    "question_llmlingua2",
    "question_pos",
    "question_cut",
    "original_tokens",
    "compressed_tokens",
    "answer",
];

/// Read a JSON array of records. Any failure here is file-level.
pub fn load_records(path: &Path) -> Result<Vec<Value>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PcError::InputNotFound { path: path.to_path_buf() });
        }
        Err(e) => return Err(e.into()),
    };
    let value: Value = serde_json::from_str(&raw)
        .map_err(|source| PcError::InvalidJson { path: path.to_path_buf(), source })?;
    match value {
        Value::Array(records) => Ok(records),
        _ => Err(PcError::NotAnArray { path: path.to_path_buf() }),
    }
}

/// First string-valued field of `record` named in `fields`.
pub fn question_of<'a>(record: &'a Value, index: usize, fields: &[String]) -> Result<&'a str> {
    fields
        .iter()
        .find_map(|f| record.get(f).and_then(Value::as_str))
        .ok_or_else(|| PcError::MissingField {
            index,
            field: fields.first().cloned().unwrap_or_default(),
        })
}

/// The `answer` field as text; absent or null gives an empty string.
pub fn answer_of(record: &Value) -> String {
    match record.get("answer") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Fields to carry through unchanged.
pub fn extra_fields(record: &Value, question_fields: &[String]) -> Map<String, Value> {
    let Some(obj) = record.as_object() else {
        return Map::new();
    };
    obj.iter()
        .filter(|(k, _)| {
            !RESERVED_FIELDS.contains(&k.as_str()) && !question_fields.iter().any(|f| f == *k)
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
