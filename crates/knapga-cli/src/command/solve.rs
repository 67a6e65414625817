use std::path::PathBuf;

use anyhow::Context as _;
use knapga_core::{
    RunConfig,
    config::{
        DEFAULT_GENERATIONS, DEFAULT_MAX_SEED_ATTEMPTS, DEFAULT_MUTATION_RATE,
        DEFAULT_POPULATION_SIZE, DEFAULT_WEIGHT_LIMIT,
    },
};
use knapga_evaluator::{FitnessEvaluator, exhaustive};
use knapga_training::{driver, tracker};

use crate::{
    model::report::{BestCandidate, RunReport},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SolveArg {
    /// Number of candidates in every generation
    #[arg(long, default_value_t = DEFAULT_POPULATION_SIZE)]
    population: usize,
    /// Number of generations to breed
    #[arg(long, default_value_t = DEFAULT_GENERATIONS)]
    generations: usize,
    /// Heaviest total weight that still scores
    #[arg(long, default_value_t = DEFAULT_WEIGHT_LIMIT)]
    weight_limit: u64,
    /// Probability of flipping each bit of a child
    #[arg(long, default_value_t = DEFAULT_MUTATION_RATE)]
    mutation_rate: f64,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// How many zeroth generations to draw before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_SEED_ATTEMPTS)]
    seed_attempts: usize,
    /// Print every candidate of the final generation
    #[arg(long)]
    show_final: bool,
    /// Compare the result against the exhaustive optimum
    #[arg(long)]
    verify: bool,
    /// Write a JSON run report to this path (`-` for stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Default for SolveArg {
    fn default() -> Self {
        Self {
            population: DEFAULT_POPULATION_SIZE,
            generations: DEFAULT_GENERATIONS,
            weight_limit: DEFAULT_WEIGHT_LIMIT,
            mutation_rate: DEFAULT_MUTATION_RATE,
            seed: None,
            seed_attempts: DEFAULT_MAX_SEED_ATTEMPTS,
            show_final: false,
            verify: false,
            output: None,
        }
    }
}

impl SolveArg {
    pub(super) fn to_config(&self) -> RunConfig {
        let config = RunConfig::default()
            .with_population_size(self.population)
            .with_generations(self.generations)
            .with_weight_limit(self.weight_limit)
            .with_mutation_rate(self.mutation_rate)
            .with_max_seed_attempts(self.seed_attempts);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

pub(crate) fn run(arg: &SolveArg) -> anyhow::Result<()> {
    let config = arg.to_config();
    tracing::debug!(?config, "parsed run configuration");
    let evaluator = FitnessEvaluator::from_config(&config);

    eprintln!(
        "Evolving {} candidates over {} items for {} generations...",
        config.population_size,
        config.catalog.len(),
        config.generations
    );
    let outcome = driver::run_with_observer(&config, |record| {
        eprintln!(
            "Generation #{:3}: best {:3}, viable {:3}, character {:5}: {:?}",
            record.generation,
            record.best,
            record.viable,
            record.variation.character,
            record.variation.deviations,
        );
    })
    .context("Knapsack run failed")?;

    if arg.show_final {
        eprintln!("Final generation:");
        for candidate in &outcome.final_generation {
            println!("{candidate}");
        }
    }

    let best = tracker::best_candidate(&evaluator, &outcome.final_generation)
        .map(|(candidate, _)| BestCandidate::new(&evaluator, candidate));

    eprintln!();
    eprintln!("Run completed");
    eprintln!("  Seed:            {}", outcome.seed);
    eprintln!("  Peak best score: {}", outcome.peak_score());
    match &best {
        Some(best) => {
            eprintln!("  Final best:      {} (weight {})", best.value, best.weight);
            util::print_packing(&evaluator, &best.candidate);
        }
        None => eprintln!("  Final best:      none"),
    }

    let optimum = if arg.verify {
        let optimum = exhaustive::solve(&evaluator)?;
        let found = best.as_ref().map_or(0, |b| b.value);
        eprintln!(
            "  Exact optimum:   {} ({} of it found)",
            optimum.value(),
            util::percent(found, optimum.value())
        );
        Some(optimum.value())
    } else {
        None
    };

    if let Some(path) = &arg.output {
        let report = RunReport::new(&config, &outcome, best, optimum);
        let mut output = Output::open(path.clone())?;
        output.write_json(&report)?;
        eprintln!("  Report:          {}", output.display_path());
    }

    Ok(())
}
