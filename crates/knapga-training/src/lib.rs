//! Evolutionary search for knapsack packings.
//!
//! This crate runs the generational genetic algorithm on top of the scoring
//! in `knapga-evaluator`.
//!
//! # How a Run Works
//!
//! 1. **Seed** - draw a random zeroth generation; give up unless at least two
//!    candidates are viable
//! 2. **Select** - resample parents through two-candidate tournaments
//! 3. **Breed** - splice random parent pairs at the midpoint
//! 4. **Mutate** - flip each child bit with the configured probability
//! 5. **Measure** - record the best score and the diversity signal
//! 6. **Repeat** steps 2-5 for exactly the configured number of generations
//!
//! There is no elitism and no early stopping: the final generation is the
//! last mutated one, whatever it scores.
//!
//! # Modules
//!
//! - [`bits`] - bit-vector initialization, crossover and mutation
//! - [`genetic`] - generation-level operators (selection, breeding, mutation)
//! - [`tracker`] - best-score and diversity measurements
//! - [`driver`] - the per-generation pipeline and its history
//!
//! # Example
//!
//! ```rust,no_run
//! use knapga_core::RunConfig;
//!
//! let config = RunConfig::default().with_seed(42).with_max_seed_attempts(20);
//! let outcome = knapga_training::driver::run(&config)?;
//! for (generation, best) in outcome.best_scores() {
//!     println!("{generation}: {best}");
//! }
//! # Ok::<(), knapga_training::EvolutionError>(())
//! ```
//!
//! # Randomness
//!
//! Every stochastic operation takes its random source as `&mut R` where
//! `R: Rng + ?Sized`. The driver owns a `Pcg32` seeded from the run
//! configuration, so a seeded run is fully reproducible.

use knapga_core::ConfigError;

use self::genetic::Collapsed;

pub mod bits;
pub mod driver;
pub mod genetic;
pub mod tracker;

/// Ways a run can end without completing.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EvolutionError {
    #[display("invalid run configuration: {_0}")]
    #[from]
    Config(ConfigError),
    #[display(
        "first generation failure: {viable} of {population} candidates are viable, at least 2 required"
    )]
    InitializationFailure { viable: usize, population: usize },
    #[display("population collapsed in generation {generation}: {source}")]
    PopulationCollapsed { generation: usize, source: Collapsed },
}
