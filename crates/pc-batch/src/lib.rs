//! Batch glue around the compactor: record loading, per-level runs,
//! checkpointed output, and dataset helpers.

pub mod checkpoint;
pub mod fewshot;
pub mod neural;
pub mod pos;
pub mod processor;
pub mod reader;
pub mod source;
pub mod stats;

pub use checkpoint::{write_json_atomic, Checkpoint};
pub use fewshot::FewShotBuilder;
pub use neural::NeuralCompressor;
pub use pos::{PosTagger, TaggedToken, Upos};
pub use processor::{BatchOutput, BatchProcessor, BatchSummary};
pub use source::{DatasetSource, JsonFileSource};
pub use stats::{load_compressed, mean_compression_rate};
