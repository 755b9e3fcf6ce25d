//! Batch compression: one engine per level over a list of JSON records.

use crate::checkpoint::Checkpoint;
use crate::neural::NeuralCompressor;
use crate::pos::{compress_tagged, PosTagger};
use crate::reader::{answer_of, extra_fields, load_records, question_of};
use pc_compactor::{count_tokens, CompressionEngine, LEXICON_VERSION};
use pc_core::error::{PcError, Result};
use pc_core::{AggressivenessLevel, CompactorConfig, CompressedRecord, CompressionStats};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Totals for one level of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub level: AggressivenessLevel,
    pub processed: usize,
    pub skipped: usize,
    pub stats: CompressionStats,
    pub lexicon_version: u32,
}

impl BatchSummary {
    pub fn compression_rate(&self) -> f64 {
        self.stats.rate()
    }

    pub fn reduction_pct(&self) -> f64 {
        self.stats.reduction_pct()
    }
}

#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub records: Vec<CompressedRecord>,
    pub summary: BatchSummary,
}

pub struct BatchProcessor {
    config: CompactorConfig,
    neural: Option<Arc<dyn NeuralCompressor>>,
    tagger: Option<Arc<dyn PosTagger>>,
    pool: rayon::ThreadPool,
}

impl BatchProcessor {
    pub fn new(config: CompactorConfig) -> Result<Self> {
        config.validate()?;
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(workers) = config.batch.workers {
            builder = builder.num_threads(workers);
        }
        let pool = builder.build().map_err(|e| PcError::Config(e.to_string()))?;
        Ok(Self { config, neural: None, tagger: None, pool })
    }

    pub fn with_neural(mut self, neural: Arc<dyn NeuralCompressor>) -> Self {
        self.neural = Some(neural);
        self
    }

    /// Also fill `question_pos` by dropping tokens by POS tag.
    pub fn with_pos_tagger(mut self, tagger: Arc<dyn PosTagger>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    pub fn config(&self) -> &CompactorConfig {
        &self.config
    }

    pub fn engine(&self, level: AggressivenessLevel) -> CompressionEngine {
        let engine = CompressionEngine::new(level);
        if self.config.compression.rewrite {
            engine.with_legacy_rewrite()
        } else {
            engine
        }
    }

    /// Compress one input record.
    pub fn compress_record(
        &self,
        engine: &CompressionEngine,
        index: usize,
        record: &Value,
    ) -> Result<CompressedRecord> {
        let fields = &self.config.batch.question_fields;
        let question = question_of(record, index, fields)?;
        let compressed = engine.compress(question);
        let question_neural = match &self.neural {
            Some(neural) => Some(
                neural
                    .compress(question, self.config.compression.neural_rate)
                    .map_err(|e| PcError::CollaboratorLoad(format!("{}: {e}", neural.name())))?,
            ),
            None => None,
        };
        let question_pos = match &self.tagger {
            Some(tagger) => Some(compress_tagged(tagger.as_ref(), question, engine.level)?),
            None => None,
        };
        Ok(CompressedRecord {
            question_original: question.to_string(),
            original_tokens: count_tokens(question),
            compressed_tokens: count_tokens(&compressed),
            question_rulebased: compressed,
            question_neural,
            question_pos,
            answer: answer_of(record),
            extra: extra_fields(record, fields),
        })
    }

    /// Compress `records` in chunks of `checkpoint_every`, fanning each chunk
    /// out over the pool. Output order matches input order.
    pub fn process(
        &self,
        records: &[Value],
        level: AggressivenessLevel,
        checkpoint: Option<&Checkpoint>,
    ) -> Result<BatchOutput> {
        let engine = self.engine(level);
        let every = self.config.batch.checkpoint_every;
        let mut out = Vec::with_capacity(records.len());
        let mut skipped = 0;

        for (chunk_idx, chunk) in records.chunks(every).enumerate() {
            let offset = chunk_idx * every;
            let results: Vec<Result<CompressedRecord>> = self.pool.install(|| {
                chunk
                    .par_iter()
                    .enumerate()
                    .map(|(i, record)| self.compress_record(&engine, offset + i, record))
                    .collect()
            });
            for result in results {
                match result {
                    Ok(record) => out.push(record),
                    Err(e) if e.is_record_level() => {
                        warn!(error = %e, "Skipping record");
                        skipped += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
            if let Some(cp) = checkpoint {
                cp.save(&out)?;
            }
            debug!(%level, done = offset + chunk.len(), total = records.len(), "Chunk compressed");
        }

        let stats = out.iter().map(CompressedRecord::stats).sum();
        let summary = BatchSummary {
            level,
            processed: out.len(),
            skipped,
            stats,
            lexicon_version: LEXICON_VERSION,
        };
        Ok(BatchOutput { records: out, summary })
    }

    /// Compress already-loaded records at one level and write the output file.
    pub fn run_level(&self, records: &[Value], level: AggressivenessLevel) -> Result<BatchSummary> {
        let checkpoint = Checkpoint::new(self.config.output_path(level));
        let output = self.process(records, level, Some(&checkpoint))?;
        checkpoint.save(&output.records)?;

        let s = &output.summary;
        info!(
            %level,
            output = %checkpoint.path().display(),
            processed = s.processed,
            skipped = s.skipped,
            original_tokens = s.stats.original_tokens,
            compressed_tokens = s.stats.compressed_tokens,
            reduction_pct = %format!("{:.1}", s.reduction_pct()),
            "Level complete"
        );
        if let Some(sample) = output.records.first() {
            info!(
                original = %sample.question_original,
                compressed = %sample.question_rulebased,
                reduction_pct = %format!("{:.1}", sample.stats().reduction_pct()),
                "Sample compression"
            );
        }
        Ok(output.summary)
    }

    /// Load the configured input once and run every configured level.
    pub fn run(&self) -> Result<Vec<BatchSummary>> {
        let input = &self.config.io.input;
        let records = load_records(input)?;
        info!(input = %input.display(), records = records.len(), "Input loaded");
        self.config
            .compression
            .levels
            .iter()
            .map(|level| self.run_level(&records, *level))
            .collect()
    }
}
