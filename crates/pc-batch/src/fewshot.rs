//! Few-shot chain-of-thought prompt builder.

use pc_core::QaRecord;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub const FEWSHOT_HEADER: &str =
    "Instruction: Answer the following math problems reasoning step by step.\n\n";
pub const FEWSHOT_SEPARATOR: &str = "###\n\n";
pub const FEWSHOT_CUE: &str = "Answer: Let's think step by step.";

/// Prefixes every target question with examples drawn from the other records.
#[derive(Debug, Clone, Copy)]
pub struct FewShotBuilder {
    pub shots: usize,
    pub seed: u64,
}

impl Default for FewShotBuilder {
    fn default() -> Self {
        Self { shots: 5, seed: 42 }
    }
}

impl FewShotBuilder {
    pub fn new(shots: usize, seed: u64) -> Self {
        Self { shots, seed }
    }

    /// One output record per input: the answer is kept, the question becomes
    /// the full prompt. A target is never among its own examples.
    pub fn build(&self, records: &[QaRecord]) -> Vec<QaRecord> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        records
            .iter()
            .enumerate()
            .map(|(i, target)| {
                let candidates: Vec<&QaRecord> = records
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, r)| r)
                    .collect();
                let shots = self.shots.min(candidates.len());
                let examples: Vec<&QaRecord> =
                    candidates.choose_multiple(&mut rng, shots).copied().collect();
                QaRecord {
                    question: render_prompt(&examples, &target.question),
                    answer: target.answer.clone(),
                }
            })
            .collect()
    }
}

pub fn render_prompt(examples: &[&QaRecord], question: &str) -> String {
    let mut prompt = String::from(FEWSHOT_HEADER);
    for ex in examples {
        prompt.push_str(&format!("Question: {}\nAnswer: {}\n", ex.question, ex.answer));
        prompt.push_str(FEWSHOT_SEPARATOR);
    }
    prompt.push_str(&format!("Question: {question}\n"));
    prompt.push_str(FEWSHOT_CUE);
    prompt
}
