//! Evaluation runner: every configured method of every record through the
//! inference client, errors recorded inline.

use crate::answer::{check_correctness, extract_answer};
use crate::client::InferenceClient;
use crate::retry::RetryPolicy;
use chrono::{DateTime, Utc};
use pc_batch::reader::answer_of;
use pc_batch::Checkpoint;
use pc_core::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_TEMPLATE: &str = "You are a math expert. Solve the following problem step by step. \
End your answer strictly with '####' followed by the number.\n\nProblem: {prompt}";

/// A prompt variant to evaluate: display name and the record key holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub key: String,
}

impl Method {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self { name: name.into(), key: key.into() }
    }
}

pub fn default_methods() -> Vec<Method> {
    vec![
        Method::new("Original", "question_original"),
        Method::new("RuleBased", "question_rulebased"),
        Method::new("Neural", "question_neural"),
        Method::new("PosTag", "question_pos"),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MethodOutcome {
    Scored {
        prompt: String,
        response: String,
        prediction: Option<String>,
        correct: bool,
        tokens: usize,
        latency_secs: f64,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationEntry {
    pub id: usize,
    pub gold: Option<String>,
    pub evaluations: BTreeMap<String, MethodOutcome>,
    pub processed_at: DateTime<Utc>,
}

pub struct Evaluator<C> {
    client: C,
    retry: RetryPolicy,
    methods: Vec<Method>,
    template: String,
    checkpoint_every: usize,
    pause: Duration,
}

impl<C: InferenceClient> Evaluator<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            retry: RetryPolicy::default(),
            methods: default_methods(),
            template: DEFAULT_TEMPLATE.to_string(),
            checkpoint_every: 10,
            pause: Duration::ZERO,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_methods(mut self, methods: Vec<Method>) -> Self {
        self.methods = methods;
        self
    }

    /// `{prompt}` is replaced by the record's text for the method.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_checkpoint_every(mut self, every: usize) -> Self {
        self.checkpoint_every = every.max(1);
        self
    }

    /// Sleep between calls, for providers with strict per-minute quotas.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn render(&self, prompt: &str) -> String {
        self.template.replace("{prompt}", prompt)
    }

    async fn run_method(&self, prompt: &str, gold: Option<&str>) -> MethodOutcome {
        let full_prompt = self.render(prompt);
        match self.retry.run(|| self.client.complete(&full_prompt)).await {
            Ok(completion) => {
                let prediction = extract_answer(&completion.text);
                let correct = match (&prediction, gold) {
                    (Some(p), Some(g)) => check_correctness(p, g),
                    _ => false,
                };
                MethodOutcome::Scored {
                    prompt: prompt.to_string(),
                    response: completion.text,
                    prediction,
                    correct,
                    tokens: completion.prompt_tokens,
                    latency_secs: completion.latency.as_secs_f64(),
                }
            }
            Err(e) => MethodOutcome::Failed { error: e.to_string() },
        }
    }

    /// Evaluate a batch. Collaborator errors never abort the run; only a
    /// failed checkpoint write does.
    pub async fn evaluate(
        &self,
        records: &[Value],
        checkpoint: Option<&Checkpoint>,
    ) -> Result<Vec<EvaluationEntry>> {
        let mut entries = Vec::with_capacity(records.len());
        info!(model = self.client.model(), records = records.len(), "Starting evaluation");

        for (id, record) in records.iter().enumerate() {
            let gold = extract_answer(&answer_of(record));
            let mut evaluations = BTreeMap::new();

            for method in &self.methods {
                let Some(prompt) = record.get(&method.key).and_then(Value::as_str).filter(|p| !p.is_empty())
                else {
                    debug!(id, method = %method.name, "No prompt for method, skipping");
                    continue;
                };
                let outcome = self.run_method(prompt, gold.as_deref()).await;
                match &outcome {
                    MethodOutcome::Scored { tokens, latency_secs, correct, prediction, .. } => info!(
                        id,
                        method = %method.name,
                        tokens,
                        latency = %format!("{latency_secs:.2}s"),
                        correct,
                        prediction = prediction.as_deref().unwrap_or("N/A"),
                        "Evaluated"
                    ),
                    MethodOutcome::Failed { error } => {
                        warn!(id, method = %method.name, %error, "Inference failed")
                    }
                }
                evaluations.insert(method.name.clone(), outcome);
                if !self.pause.is_zero() {
                    tokio::time::sleep(self.pause).await;
                }
            }

            entries.push(EvaluationEntry { id, gold, evaluations, processed_at: Utc::now() });

            if (id + 1) % self.checkpoint_every == 0 {
                if let Some(cp) = checkpoint {
                    cp.save(&entries)?;
                }
            }
        }

        if let Some(cp) = checkpoint {
            cp.save(&entries)?;
        }
        Ok(entries)
    }
}
