//! Inference collaborator contract.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// One completed model call.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub prompt_tokens: usize,
    pub latency: Duration,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("Rate limited")]
    RateLimited,
    #[error("Transient API error: {0}")]
    Transient(String),
    #[error("Permanent API error: {0}")]
    Permanent(String),
}

impl InferenceError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::Transient(_))
    }
}

/// A hosted language model. Implementations own their HTTP client and keys.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    fn model(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<Completion, InferenceError>;
}
