use chrono::{DateTime, Utc};
use knapga_core::{Candidate, RunConfig};
use knapga_evaluator::FitnessEvaluator;
use knapga_training::{driver::RunOutcome, genetic::Generation, tracker::GenerationRecord};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BestCandidate {
    pub candidate: Candidate,
    pub items: Vec<usize>,
    pub value: u64,
    pub weight: u64,
}

impl BestCandidate {
    pub fn new(evaluator: &FitnessEvaluator<'_>, candidate: &Candidate) -> Self {
        let totals = evaluator.totals(candidate);
        Self {
            candidate: candidate.clone(),
            items: candidate.selected_indices().collect(),
            value: totals.value,
            weight: totals.weight,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub config: &'a RunConfig,
    pub best: Option<BestCandidate>,
    pub optimum: Option<u64>,
    pub history: &'a [GenerationRecord],
    pub final_generation: &'a Generation,
}

impl<'a> RunReport<'a> {
    pub fn new(
        config: &'a RunConfig,
        outcome: &'a RunOutcome,
        best: Option<BestCandidate>,
        optimum: Option<u64>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            seed: outcome.seed,
            config,
            best,
            optimum,
            history: &outcome.history,
            final_generation: &outcome.final_generation,
        }
    }
}
