use knapga_core::{Candidate, Catalog, Item, RunConfig};
use knapga_evaluator::{FitnessEvaluator, exhaustive};
use knapga_training::{
    EvolutionError, driver,
    genetic::{self, Evolver},
    tracker,
};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

fn reference_config(seed: u64) -> RunConfig {
    // about a third of the random zeroth generations of the reference
    // catalog have fewer than two viable candidates
    RunConfig::default()
        .with_seed(seed)
        .with_max_seed_attempts(50)
}

#[test]
fn reference_run_reaches_exhaustive_optimum() {
    let catalog = Catalog::reference();
    let evaluator = FitnessEvaluator::new(&catalog, 20);
    let optimum = exhaustive::solve(&evaluator).unwrap();
    assert_eq!(optimum.value(), 32);

    let mut finals = vec![];
    for seed in 0..4 {
        let config = reference_config(seed);
        let outcome = driver::run(&config).unwrap();

        assert_eq!(outcome.history.len(), 200);
        assert_eq!(outcome.final_generation.len(), 200);
        assert!(outcome.final_generation.iter().all(|c| c.len() == 16));

        let (best, score) =
            tracker::best_candidate(&evaluator, &outcome.final_generation).unwrap();
        let totals = evaluator.totals(best);
        assert!(totals.weight <= 20);
        assert_eq!(totals.value, score);
        assert!(score <= optimum.value());

        // the optimum must be the ceiling of every generation
        assert!(
            outcome
                .best_scores()
                .all(|(_, generation_best)| generation_best <= optimum.value())
        );
        assert_eq!(outcome.peak_score(), optimum.value(), "seed {seed}");

        // late generations do better than early ones
        let early = outcome.history[..10].iter().map(|r| r.best).sum::<u64>();
        let late = outcome.history[190..].iter().map(|r| r.best).sum::<u64>();
        assert!(late >= early, "seed {seed}: early {early}, late {late}");

        finals.push(score);
    }

    let at_optimum = finals.iter().filter(|&&s| s == optimum.value()).count();
    assert!(
        at_optimum >= 3,
        "final bests {finals:?}, optimum {}",
        optimum.value()
    );
}

#[test]
fn reference_parents_are_always_viable() {
    let config = reference_config(123);
    let evolver = Evolver::from_config(&config);
    let mut rng = Pcg32::seed_from_u64(123);

    let mut generation = (0..config.max_seed_attempts)
        .find_map(|_| {
            genetic::generate_candidates(&evolver.evaluator, config.population_size, &mut rng)
                .ok()
        })
        .unwrap();

    for _ in 0..30 {
        let parents = evolver.next_parents(&generation, &mut rng).unwrap();
        assert_eq!(parents.len(), config.population_size);
        assert!(parents.iter().all(|p| evolver.evaluator.score(p) > 0));

        let mut children = genetic::next_children(&parents, &mut rng);
        evolver.mutate_all(&mut children, &mut rng);
        generation = children;
    }
}

#[test]
fn reference_run_never_collapses() {
    let config = reference_config(123).with_generations(30);
    let outcome = driver::run(&config).unwrap();
    assert_eq!(outcome.history.len(), 30);
    assert!(outcome.history.iter().all(|r| r.viable > 0));
}

#[test]
fn overweight_catalog_fails_first_generation() {
    let catalog = Catalog::new(vec![Item::new(5, 2), Item::new(3, 4), Item::new(8, 3)]);
    let config = RunConfig::default()
        .with_catalog(catalog)
        .with_weight_limit(1)
        .with_population_size(40)
        .with_seed(1);
    let err = driver::run(&config).unwrap_err();
    assert!(matches!(
        err,
        EvolutionError::InitializationFailure {
            viable: 0,
            population: 40
        }
    ));
    assert!(err.to_string().starts_with("first generation failure"));
}

#[test]
fn optimum_candidate_is_feasible() {
    let catalog = Catalog::reference();
    let evaluator = FitnessEvaluator::new(&catalog, 20);
    let optimum = exhaustive::solve(&evaluator).unwrap();
    let expected = Candidate::from_bits(&[0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 1, 0, 1, 0, 0, 1]);
    assert_eq!(optimum.candidate, expected);
    assert!(evaluator.is_feasible(&expected));
}
