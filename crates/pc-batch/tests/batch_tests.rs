//! File-level behaviour of the batch pipeline: errors, output files, checkpoints.

use pc_batch::reader::load_records;
use pc_batch::{
    load_compressed, mean_compression_rate, write_json_atomic, BatchProcessor, Checkpoint,
    DatasetSource, JsonFileSource, NeuralCompressor,
};
use pc_core::error::{PcError, Result};
use pc_core::{AggressivenessLevel, CompactorConfig, CompressedRecord, QaRecord};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write(path: &Path, value: &serde_json::Value) {
    std::fs::write(path, serde_json::to_string(value).unwrap()).unwrap();
}

fn config_for(dir: &TempDir, input: &Path) -> CompactorConfig {
    let mut config = CompactorConfig::default();
    config.io.input = input.to_path_buf();
    config.io.output_prefix = dir.path().join("out").to_string_lossy().into_owned();
    config.batch.checkpoint_every = 2;
    config.batch.workers = Some(2);
    config
}

fn gsm8k_like() -> serde_json::Value {
    json!([
        {"question": "Janet’s ducks lay 16 eggs per day. She eats three for breakfast every morning.", "answer": "#### 13"},
        {"question": "A robe takes 2 bolts of blue fiber and half that much white fiber. How many bolts in total does it take?", "answer": "#### 3"},
        {"question": "Josh decides to try flipping a house. He buys a house for $80,000 and then puts in $50,000 in repairs.", "answer": "#### 70000"},
        {"answer": "no question here"},
        {"question": "Une très belle journée, été.", "answer": "#### 0"}
    ])
}

// ========== File-level errors ==========

#[test]
fn test_missing_input() {
    let err = load_records(Path::new("/no/such/input.json")).unwrap_err();
    assert!(matches!(err, PcError::InputNotFound { .. }));
}

#[test]
fn test_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "[{\"question\": ").unwrap();
    assert!(matches!(load_records(&path).unwrap_err(), PcError::InvalidJson { .. }));
}

#[test]
fn test_not_an_array() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("obj.json");
    write(&path, &json!({"question": "q"}));
    assert!(matches!(load_records(&path).unwrap_err(), PcError::NotAnArray { .. }));
}

#[test]
fn test_run_aborts_on_missing_input() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, &dir.path().join("absent.json"));
    let err = BatchProcessor::new(config).unwrap().run().unwrap_err();
    assert!(matches!(err, PcError::InputNotFound { .. }));
}

// ========== End to end ==========

#[test]
fn test_run_all_levels() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.json");
    write(&input, &gsm8k_like());

    let processor = BatchProcessor::new(config_for(&dir, &input)).unwrap();
    let summaries = processor.run().unwrap();
    assert_eq!(summaries.len(), 3);

    for s in &summaries {
        assert_eq!(s.processed, 4);
        assert_eq!(s.skipped, 1);
        let path = processor.config().output_path(s.level);
        let records = load_compressed(&path).unwrap();
        assert_eq!(records.len(), 4);
        for r in &records {
            assert!(r.compressed_tokens <= r.original_tokens);
        }
    }

    let kept: Vec<usize> = summaries.iter().map(|s| s.stats.compressed_tokens).collect();
    assert!(kept[2] <= kept[1] && kept[1] <= kept[0]);
    assert_eq!(summaries[0].stats.original_tokens, summaries[2].stats.original_tokens);
}

#[test]
fn test_output_format() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.json");
    write(&input, &gsm8k_like());

    let mut config = config_for(&dir, &input);
    config.compression.levels = vec![AggressivenessLevel::Light];
    let processor = BatchProcessor::new(config).unwrap();
    processor.run().unwrap();

    let path = processor.config().output_path(AggressivenessLevel::Light);
    assert!(path.to_string_lossy().ends_with("out_light.json"));
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("[\n    {\n        \"question_original\""));
    assert!(text.contains("très belle journée, été."));
    assert!(!dir.path().join("out_medium.json").exists());

    let records: Vec<CompressedRecord> = serde_json::from_str(&text).unwrap();
    assert_eq!(records[0].answer, "#### 13");
    assert!(records[1].question_rulebased.starts_with("robe takes 2 bolts of blue fiber"));
    assert!(records[2].question_rulebased.starts_with("Josh decides to try flipping house."));
}

#[test]
fn test_rerun_on_own_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.json");
    write(&input, &gsm8k_like());

    let mut config = config_for(&dir, &input);
    config.compression.levels = vec![AggressivenessLevel::Light];
    let first = BatchProcessor::new(config.clone()).unwrap();
    first.run().unwrap();

    // Feed the light output back in: question_original is accepted as input.
    config.io.input = first.config().output_path(AggressivenessLevel::Light);
    config.io.output_prefix = dir.path().join("again").to_string_lossy().into_owned();
    let second = BatchProcessor::new(config).unwrap();
    let summary = second.run().unwrap().remove(0);
    assert_eq!(summary.processed, 4);
    assert_eq!(summary.skipped, 0);

    let records = load_compressed(&second.config().output_path(AggressivenessLevel::Light)).unwrap();
    let value = serde_json::to_value(&records[0]).unwrap();
    assert!(value.get("question").is_none());
}

// ========== Checkpoints ==========

struct ExplodesOn(&'static str);

impl NeuralCompressor for ExplodesOn {
    fn name(&self) -> &str {
        "exploding"
    }

    fn compress(&self, text: &str, _target_rate: f64) -> Result<String> {
        if text.contains(self.0) {
            Err(PcError::CollaboratorLoad("runtime crashed".into()))
        } else {
            Ok(text.to_string())
        }
    }
}

#[test]
fn test_checkpoint_survives_crash() {
    let dir = TempDir::new().unwrap();
    let records = vec![
        json!({"question": "first one"}),
        json!({"question": "second one"}),
        json!({"question": "third one"}),
        json!({"question": "boom"}),
        json!({"question": "fifth one"}),
    ];
    let mut config = CompactorConfig::default();
    config.batch.checkpoint_every = 2;
    let processor = BatchProcessor::new(config).unwrap().with_neural(Arc::new(ExplodesOn("boom")));

    let cp = Checkpoint::new(dir.path().join("partial.json"));
    let err = processor.process(&records, AggressivenessLevel::Light, Some(&cp)).unwrap_err();
    assert!(matches!(err, PcError::CollaboratorLoad(_)));

    let saved = load_compressed(cp.path()).unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[1].question_original, "second one");
}

#[test]
fn test_atomic_write_leaves_no_tmp() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("data.json");
    write_json_atomic(&path, &vec![1, 2, 3]).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());
    let back: Vec<i32> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back, vec![1, 2, 3]);
}

// ========== Dataset source & stats ==========

#[test]
fn test_json_file_source_limit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gsm8k.json");
    write(&path, &json!([
        {"question": "q1", "answer": "a1"},
        {"question": "q2", "answer": "a2"},
        {"question": "q3"}
    ]));

    let all = JsonFileSource::new(&path).load().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2], QaRecord { question: "q3".into(), answer: String::new() });

    let two = JsonFileSource::new(&path).with_limit(2).load().unwrap();
    assert_eq!(two.len(), 2);

    let more = JsonFileSource::new(&path).with_limit(50).load().unwrap();
    assert_eq!(more.len(), 3);
}

#[test]
fn test_json_file_source_bad_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gsm8k.json");
    write(&path, &json!([{"answer": "a1"}]));
    assert!(matches!(JsonFileSource::new(&path).load().unwrap_err(), PcError::InvalidJson { .. }));
}

#[test]
fn test_stats_over_output_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.json");
    write(&input, &json!([{"question": "the cat sat"}, {"question": "dogs bark"}]));

    let mut config = config_for(&dir, &input);
    config.compression.levels = vec![AggressivenessLevel::Light];
    let processor = BatchProcessor::new(config).unwrap();
    processor.run().unwrap();

    let records = load_compressed(&processor.config().output_path(AggressivenessLevel::Light)).unwrap();
    let mean = mean_compression_rate(&records).unwrap();
    assert!((mean - (2.0 / 3.0 + 1.0) / 2.0).abs() < 1e-9);
}
