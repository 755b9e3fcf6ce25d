//! Evaluation glue: inference contract, retry, answer scoring, reporting.

pub mod answer;
pub mod client;
pub mod report;
pub mod retry;
pub mod runner;

pub use answer::{check_correctness, extract_answer};
pub use client::{Completion, InferenceClient, InferenceError};
pub use report::{load_entries, summarize, MethodSummary};
pub use retry::RetryPolicy;
pub use runner::{default_methods, EvaluationEntry, Evaluator, Method, MethodOutcome};
