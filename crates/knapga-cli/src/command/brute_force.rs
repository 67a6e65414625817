use knapga_core::{Catalog, config::DEFAULT_WEIGHT_LIMIT};
use knapga_evaluator::{FitnessEvaluator, exhaustive};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BruteForceArg {
    /// Heaviest total weight that still scores
    #[arg(long, default_value_t = DEFAULT_WEIGHT_LIMIT)]
    weight_limit: u64,
}

pub(crate) fn run(arg: &BruteForceArg) -> anyhow::Result<()> {
    let catalog = Catalog::reference();
    let evaluator = FitnessEvaluator::new(&catalog, arg.weight_limit);

    eprintln!(
        "Trying all {} subsets of {} items...",
        1_u64 << catalog.len(),
        catalog.len()
    );
    let optimum = exhaustive::solve(&evaluator)?;

    println!("{}", optimum.candidate);
    eprintln!("Optimum");
    eprintln!("  Value:  {}", optimum.totals.value);
    eprintln!("  Weight: {} / {}", optimum.totals.weight, arg.weight_limit);
    util::print_packing(&evaluator, &optimum.candidate);

    Ok(())
}
