//! The generation pipeline.
//!
//! A [`GenerationDriver`] exists only once its zeroth generation is seeded.
//! Each [`step`](GenerationDriver::step) then runs select, breed, mutate and
//! measure once, until the configured number of generations is reached:
//!
//! ```text
//! seed ──▶ Seeded ──step──▶ Evolving ──step──▶ ... ──▶ Complete
//!   │                          │
//!   └─ InitializationFailure   └─ PopulationCollapsed
//! ```
//!
//! The run never stops early on convergence.

use knapga_core::RunConfig;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::{
    EvolutionError,
    genetic::{self, Evolver, Generation},
    tracker::GenerationRecord,
};

/// Where a seeded driver is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Phase {
    /// Zeroth generation drawn, nothing bred yet
    Seeded,
    /// Some, but not all, generations bred
    Evolving { completed: usize },
    /// Every configured generation bred
    Complete,
}

/// Runs the generation pipeline for one configuration.
#[derive(Debug)]
pub struct GenerationDriver<'a> {
    evolver: Evolver<'a>,
    generations: usize,
    seed: u64,
    rng: Pcg32,
    current: Generation,
    history: Vec<GenerationRecord>,
}

impl<'a> GenerationDriver<'a> {
    /// Validates `config` and seeds the zeroth generation.
    ///
    /// Up to `config.max_seed_attempts` batches are drawn; the run fails with
    /// [`EvolutionError::InitializationFailure`] from the last one if none of
    /// them has two viable candidates.
    pub fn seed(config: &'a RunConfig) -> Result<Self, EvolutionError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = Pcg32::seed_from_u64(seed);
        let evolver = Evolver::from_config(config);
        tracing::info!(
            seed,
            items = config.catalog.len(),
            population = config.population_size,
            generations = config.generations,
            "starting run"
        );

        let mut attempt = 1;
        let current = loop {
            match genetic::generate_candidates(&evolver.evaluator, config.population_size, &mut rng)
            {
                Ok(generation) => break generation,
                Err(err) if attempt < config.max_seed_attempts => {
                    tracing::info!(attempt, %err, "redrawing zeroth generation");
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        };

        Ok(Self {
            evolver,
            generations: config.generations,
            seed,
            rng,
            current,
            history: Vec::with_capacity(config.generations),
        })
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.history.len() {
            completed if completed >= self.generations => Phase::Complete,
            0 => Phase::Seeded,
            completed => Phase::Evolving { completed },
        }
    }

    /// The most recent generation: the zeroth one until the first step.
    #[must_use]
    pub fn current(&self) -> &Generation {
        &self.current
    }

    #[must_use]
    pub fn history(&self) -> &[GenerationRecord] {
        &self.history
    }

    /// Breeds and measures the next generation.
    ///
    /// Returns `Ok(None)` once the run is complete.
    pub fn step(&mut self) -> Result<Option<&GenerationRecord>, EvolutionError> {
        if self.phase().is_complete() {
            return Ok(None);
        }

        let generation = self.history.len() + 1;
        let children = self
            .evolver
            .evolve(&self.current, &mut self.rng)
            .map_err(|source| {
                tracing::warn!(generation, %source, "population collapsed");
                EvolutionError::PopulationCollapsed { generation, source }
            })?;

        let record = GenerationRecord::measure(generation, &self.evolver.evaluator, &children);
        tracing::debug!(
            generation,
            best = record.best,
            viable = record.viable,
            character = record.variation.character,
            "generation bred"
        );

        self.current = children;
        self.history.push(record);
        Ok(self.history.last())
    }

    /// Steps until complete, handing every new record to `observer`.
    pub fn run_to_completion<F>(mut self, mut observer: F) -> Result<RunOutcome, EvolutionError>
    where
        F: FnMut(&GenerationRecord),
    {
        while let Some(record) = self.step()? {
            observer(record);
        }

        let outcome = RunOutcome {
            seed: self.seed,
            history: self.history,
            final_generation: self.current,
        };
        tracing::info!(
            seed = outcome.seed,
            generations = outcome.history.len(),
            peak = outcome.peak_score(),
            "run complete"
        );
        Ok(outcome)
    }
}

/// What a completed run hands to reporting.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    /// Seed that reproduces this run
    pub seed: u64,
    /// One record per bred generation, in order
    pub history: Vec<GenerationRecord>,
    /// The last mutated generation
    pub final_generation: Generation,
}

impl RunOutcome {
    /// `(generation, best score)` pairs in generation order.
    pub fn best_scores(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.history.iter().map(|r| (r.generation, r.best))
    }

    /// `(generation, character)` pairs in generation order.
    pub fn characters(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.history
            .iter()
            .map(|r| (r.generation, r.variation.character))
    }

    /// Highest best score over all bred generations.
    #[must_use]
    pub fn peak_score(&self) -> u64 {
        self.history.iter().map(|r| r.best).max().unwrap_or(0)
    }
}

/// Seeds and runs `config` to completion.
pub fn run(config: &RunConfig) -> Result<RunOutcome, EvolutionError> {
    run_with_observer(config, |_| {})
}

/// Like [`run`], but reports every generation record as it is produced.
pub fn run_with_observer<F>(config: &RunConfig, observer: F) -> Result<RunOutcome, EvolutionError>
where
    F: FnMut(&GenerationRecord),
{
    GenerationDriver::seed(config)?.run_to_completion(observer)
}
