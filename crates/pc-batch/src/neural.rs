//! Neural compressor contract.
//!
//! Model-backed compressors live outside this workspace; the batch processor
//! only needs something that turns a question into a shorter one.

use pc_core::error::Result;

pub trait NeuralCompressor: Send + Sync {
    fn name(&self) -> &str;

    /// Compress `text`, keeping roughly `target_rate` of its tokens.
    ///
    /// Errors are reported as `PcError::CollaboratorLoad` and end the run.
    fn compress(&self, text: &str, target_rate: f64) -> Result<String>;
}
