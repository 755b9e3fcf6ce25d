pub mod config;
pub mod error;
pub mod types;

pub use config::CompactorConfig;
pub use error::{PcError, Result};
pub use types::{AggressivenessLevel, CompressedRecord, CompressionStats, QaRecord};
