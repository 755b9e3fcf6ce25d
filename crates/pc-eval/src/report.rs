//! Per-method aggregation of evaluation results.

use crate::runner::{EvaluationEntry, MethodOutcome};
use pc_batch::reader::load_records;
use pc_core::error::{PcError, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Aggregates for one method.
///
/// `accuracy` only covers calls whose response yielded a number; responses
/// without one are counted in `excluded` and left out of the denominator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSummary {
    pub method: String,
    pub attempted: usize,
    pub scored: usize,
    pub excluded: usize,
    pub errors: usize,
    pub accuracy: f64,
    pub mean_tokens: f64,
    pub mean_latency_secs: f64,
}

#[derive(Default)]
struct Acc {
    attempted: usize,
    scored: usize,
    excluded: usize,
    errors: usize,
    correct: usize,
    tokens: usize,
    latency: f64,
}

fn mean(total: f64, n: usize) -> f64 {
    if n == 0 { 0.0 } else { total / n as f64 }
}

pub fn summarize(entries: &[EvaluationEntry]) -> Vec<MethodSummary> {
    let mut by_method: BTreeMap<&str, Acc> = BTreeMap::new();
    for entry in entries {
        for (method, outcome) in &entry.evaluations {
            let acc = by_method.entry(method.as_str()).or_default();
            acc.attempted += 1;
            match outcome {
                MethodOutcome::Failed { .. } => acc.errors += 1,
                MethodOutcome::Scored { prediction, correct, tokens, latency_secs, .. } => {
                    acc.tokens += tokens;
                    acc.latency += latency_secs;
                    if prediction.is_some() {
                        acc.scored += 1;
                        if *correct {
                            acc.correct += 1;
                        }
                    } else {
                        acc.excluded += 1;
                    }
                }
            }
        }
    }

    by_method
        .into_iter()
        .map(|(method, acc)| {
            let answered = acc.scored + acc.excluded;
            MethodSummary {
                method: method.to_string(),
                attempted: acc.attempted,
                scored: acc.scored,
                excluded: acc.excluded,
                errors: acc.errors,
                accuracy: mean(acc.correct as f64, acc.scored),
                mean_tokens: mean(acc.tokens as f64, answered),
                mean_latency_secs: mean(acc.latency, answered),
            }
        })
        .collect()
}

pub fn load_entries(path: &Path) -> Result<Vec<EvaluationEntry>> {
    let raw = load_records(path)?;
    serde_json::from_value(Value::Array(raw))
        .map_err(|source| PcError::InvalidJson { path: path.to_path_buf(), source })
}
