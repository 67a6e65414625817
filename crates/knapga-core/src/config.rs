//! Run parameters.
//!
//! A [`RunConfig`] is built once before a run and only ever passed by shared
//! reference afterwards. Nothing in the workspace keeps run parameters in
//! global state.

use serde::{Deserialize, Serialize};

use crate::Catalog;

pub const DEFAULT_POPULATION_SIZE: usize = 200;
pub const DEFAULT_WEIGHT_LIMIT: u64 = 20;
pub const DEFAULT_MUTATION_RATE: f64 = 0.05;
pub const DEFAULT_GENERATIONS: usize = 200;
pub const DEFAULT_MAX_TOURNAMENTS_PER_SLOT: usize = 1000;
pub const DEFAULT_MAX_SEED_ATTEMPTS: usize = 1;

/// Immutable parameters of a single run.
///
/// [`RunConfig::default`] is the reference run: the reference catalog, 200
/// candidates, weight limit 20, mutation rate 0.05 and 200 generations.
///
/// ```
/// use knapga_core::RunConfig;
///
/// let config = RunConfig::default()
///     .with_population_size(50)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.catalog.len(), 16);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Items to choose from; candidate bit `i` refers to `catalog[i]`
    pub catalog: Catalog,
    /// Number of candidates in every generation
    pub population_size: usize,
    /// Total weight a candidate may carry and still score
    pub weight_limit: u64,
    /// Probability of flipping each bit of a freshly bred child
    pub mutation_rate: f64,
    /// Number of generations bred after the zeroth one
    pub generations: usize,
    /// Seed for the run's random source; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// Tournaments the selector may hold per parent slot before it reports
    /// a collapsed population
    pub max_tournaments_per_slot: usize,
    /// Zeroth-generation batches to draw before giving up on a run; `1`
    /// aborts on the first batch with fewer than two viable candidates
    pub max_seed_attempts: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            catalog: Catalog::reference(),
            population_size: DEFAULT_POPULATION_SIZE,
            weight_limit: DEFAULT_WEIGHT_LIMIT,
            mutation_rate: DEFAULT_MUTATION_RATE,
            generations: DEFAULT_GENERATIONS,
            seed: None,
            max_tournaments_per_slot: DEFAULT_MAX_TOURNAMENTS_PER_SLOT,
            max_seed_attempts: DEFAULT_MAX_SEED_ATTEMPTS,
        }
    }
}

impl RunConfig {
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    #[must_use]
    pub fn with_weight_limit(mut self, weight_limit: u64) -> Self {
        self.weight_limit = weight_limit;
        self
    }

    #[must_use]
    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }

    #[must_use]
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_max_tournaments_per_slot(mut self, max_tournaments_per_slot: usize) -> Self {
        self.max_tournaments_per_slot = max_tournaments_per_slot;
        self
    }

    #[must_use]
    pub fn with_max_seed_attempts(mut self, max_seed_attempts: usize) -> Self {
        self.max_seed_attempts = max_seed_attempts;
        self
    }

    /// Checks the parameters a run relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if let Some(index) = self.catalog.iter().position(|item| item.weight == 0) {
            return Err(ConfigError::ZeroWeightItem { index });
        }
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall {
                size: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate {
                rate: self.mutation_rate,
            });
        }
        if self.max_tournaments_per_slot == 0 {
            return Err(ConfigError::ZeroTournamentBudget);
        }
        if self.max_seed_attempts == 0 {
            return Err(ConfigError::ZeroSeedAttempts);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("item catalog is empty")]
    EmptyCatalog,
    #[display("item #{index} has zero weight")]
    ZeroWeightItem { index: usize },
    #[display("population size must be at least 2, got {size}")]
    PopulationTooSmall { size: usize },
    #[display("mutation rate must be within [0, 1], got {rate}")]
    InvalidMutationRate { rate: f64 },
    #[display("tournament budget per parent slot must be positive")]
    ZeroTournamentBudget,
    #[display("at least one zeroth-generation attempt is required")]
    ZeroSeedAttempts,
}
