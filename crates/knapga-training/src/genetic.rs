//! Genetic operators over whole generations.
//!
//! One generation step runs, in order:
//!
//! 1. **Tournament selection** - [`Evolver::next_parents`] resamples the
//!    generation through two-candidate fights, keeping only viable winners
//! 2. **Breeding** - [`next_children`] splices random parent pairs at the
//!    midpoint (see [`bits::breed`])
//! 3. **Mutation** - [`Evolver::mutate_all`] flips bits of every child
//!
//! The zeroth generation comes from [`generate_candidates`].
//!
//! # Selection stalls
//!
//! Selection only accepts winners that score above zero, so a generation
//! without viable candidates could keep it drawing forever. The number of
//! tournaments is bounded by `population * max_tournaments_per_slot`; running
//! out yields [`Collapsed`] instead of looping.

use std::ops::Index;

use knapga_core::{Candidate, RunConfig};
use knapga_evaluator::FitnessEvaluator;
use rand::Rng;
use serde::Serialize;

use crate::{EvolutionError, bits};

/// A fixed-size collection of candidates.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Generation {
    candidates: Vec<Candidate>,
}

impl Generation {
    #[must_use]
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Candidate> {
        self.candidates.iter_mut()
    }
}

impl Index<usize> for Generation {
    type Output = Candidate;

    fn index(&self, index: usize) -> &Self::Output {
        &self.candidates[index]
    }
}

impl FromIterator<Candidate> for Generation {
    fn from_iter<T: IntoIterator<Item = Candidate>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Generation {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}

impl<'a> IntoIterator for &'a Generation {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

/// Creates the zeroth generation of `quantity` random candidates.
///
/// Fails with [`EvolutionError::InitializationFailure`] when fewer than two
/// of them are viable. The batch is not redrawn.
pub fn generate_candidates<R>(
    evaluator: &FitnessEvaluator<'_>,
    quantity: usize,
    rng: &mut R,
) -> Result<Generation, EvolutionError>
where
    R: Rng + ?Sized,
{
    let len = evaluator.catalog().len();
    let generation: Generation = (0..quantity).map(|_| bits::random(rng, len)).collect();

    let viable = generation
        .iter()
        .filter(|candidate| evaluator.is_viable(candidate))
        .count();
    if viable < 2 {
        tracing::warn!(viable, quantity, "first generation failure");
        return Err(EvolutionError::InitializationFailure {
            viable,
            population: quantity,
        });
    }

    tracing::info!(viable, quantity, "zeroth generation seeded");
    Ok(generation)
}

/// Returns whether the first of two fighters wins.
///
/// The higher score wins; a tie is a coin flip.
fn first_wins<R>(first: u64, second: u64, rng: &mut R) -> bool
where
    R: Rng + ?Sized,
{
    match first.cmp(&second) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => rng.random_bool(0.5),
    }
}

/// Fights two candidates: the higher score wins, a tie goes either way with
/// equal probability.
pub fn fight<'c, R>(
    evaluator: &FitnessEvaluator<'_>,
    first: &'c Candidate,
    second: &'c Candidate,
    rng: &mut R,
) -> &'c Candidate
where
    R: Rng + ?Sized,
{
    if first_wins(evaluator.score(first), evaluator.score(second), rng) {
        first
    } else {
        second
    }
}

/// Breeds a generation of children the same size as `parents`.
///
/// Each child comes from two parents drawn uniformly with replacement.
pub fn next_children<R>(parents: &Generation, rng: &mut R) -> Generation
where
    R: Rng + ?Sized,
{
    let len = parents.len();
    (0..len)
        .map(|_| {
            let first = &parents[rng.random_range(0..len)];
            let second = &parents[rng.random_range(0..len)];
            bits::breed(first, second)
        })
        .collect()
}

/// Selection ran out of tournaments before it filled every parent slot.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no viable winner after {attempts} tournaments ({accepted} of {target} parents selected)")]
pub struct Collapsed {
    pub attempts: usize,
    pub accepted: usize,
    pub target: usize,
}

/// Parameters that turn one generation into the next.
#[derive(Debug, Clone, Copy)]
pub struct Evolver<'a> {
    /// Scores candidates for selection
    pub evaluator: FitnessEvaluator<'a>,
    /// Per-bit flip probability applied to every child
    pub mutation_rate: f64,
    /// Tournaments allowed per parent slot before selection gives up
    pub max_tournaments_per_slot: usize,
}

impl<'a> Evolver<'a> {
    #[must_use]
    pub fn from_config(config: &'a RunConfig) -> Self {
        Self {
            evaluator: FitnessEvaluator::from_config(config),
            mutation_rate: config.mutation_rate,
            max_tournaments_per_slot: config.max_tournaments_per_slot,
        }
    }

    /// Selects a parent generation the same size as `generation`.
    ///
    /// Repeatedly draws two candidates uniformly with replacement and fights
    /// them. The winner is kept only if it is viable. Parents bear no relation
    /// to the input order.
    pub fn next_parents<R>(
        &self,
        generation: &Generation,
        rng: &mut R,
    ) -> Result<Generation, Collapsed>
    where
        R: Rng + ?Sized,
    {
        let target = generation.len();
        let scores = generation
            .iter()
            .map(|candidate| self.evaluator.score(candidate))
            .collect::<Vec<_>>();
        let budget = target.saturating_mul(self.max_tournaments_per_slot);

        let mut parents = Vec::with_capacity(target);
        let mut attempts = 0;
        while parents.len() < target {
            if attempts == budget {
                return Err(Collapsed {
                    attempts,
                    accepted: parents.len(),
                    target,
                });
            }
            attempts += 1;

            let first = rng.random_range(0..target);
            let second = rng.random_range(0..target);
            let winner = if first_wins(scores[first], scores[second], rng) {
                first
            } else {
                second
            };
            if scores[winner] > 0 {
                parents.push(generation[winner].clone());
            }
        }
        Ok(Generation::new(parents))
    }

    /// Mutates `candidate` in place at this evolver's mutation rate.
    pub fn mutate<R>(&self, candidate: &mut Candidate, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        bits::flip_mutate(candidate, self.mutation_rate, rng);
    }

    pub fn mutate_all<R>(&self, generation: &mut Generation, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for candidate in generation.iter_mut() {
            self.mutate(candidate, rng);
        }
    }

    /// Runs select, breed and mutate once and returns the mutated children.
    pub fn evolve<R>(&self, generation: &Generation, rng: &mut R) -> Result<Generation, Collapsed>
    where
        R: Rng + ?Sized,
    {
        let parents = self.next_parents(generation, rng)?;
        let mut children = next_children(&parents, rng);
        self.mutate_all(&mut children, rng);
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use knapga_core::{Catalog, Item};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    /// Reference catalog with room for about half of it, so that most
    /// random candidates are viable.
    fn roomy_config() -> RunConfig {
        RunConfig::default().with_weight_limit(60)
    }

    #[test]
    fn test_generate_candidates_roomy() {
        let config = roomy_config();
        let evaluator = FitnessEvaluator::from_config(&config);
        let mut rng = Pcg32::seed_from_u64(42);
        let generation = generate_candidates(&evaluator, 200, &mut rng).unwrap();
        assert_eq!(generation.len(), 200);
        assert!(generation.iter().all(|c| c.len() == 16));
        assert!(generation.iter().filter(|c| evaluator.is_viable(c)).count() > 100);
    }

    #[test]
    fn test_generate_candidates_nothing_fits() {
        let catalog = Catalog::new((0..8).map(|i| Item::new(i + 1, 2 + i)).collect());
        let evaluator = FitnessEvaluator::new(&catalog, 1);
        let mut rng = Pcg32::seed_from_u64(7);
        let err = generate_candidates(&evaluator, 50, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            EvolutionError::InitializationFailure {
                viable: 0,
                population: 50
            }
        ));
    }

    #[test]
    fn test_fight_higher_score_wins() {
        let catalog = Catalog::new(vec![Item::new(3, 1), Item::new(5, 1)]);
        let evaluator = FitnessEvaluator::new(&catalog, 10);
        let weak = Candidate::from_bits(&[1, 0]);
        let strong = Candidate::from_bits(&[0, 1]);
        let mut rng = Pcg32::seed_from_u64(0);
        for _ in 0..100 {
            assert_eq!(fight(&evaluator, &weak, &strong, &mut rng), &strong);
            assert_eq!(fight(&evaluator, &strong, &weak, &mut rng), &strong);
        }
    }

    #[test]
    fn test_fight_tie_is_fair() {
        let catalog = Catalog::new(vec![Item::new(4, 1), Item::new(4, 1)]);
        let evaluator = FitnessEvaluator::new(&catalog, 10);
        let first = Candidate::from_bits(&[1, 0]);
        let second = Candidate::from_bits(&[0, 1]);
        let mut rng = Pcg32::seed_from_u64(99);
        let n = 10_000;
        let first_count = (0..n)
            .filter(|_| std::ptr::eq(fight(&evaluator, &first, &second, &mut rng), &first))
            .count();
        assert!(
            (4500..5500).contains(&first_count),
            "expected roughly even split, got {first_count}/{n}"
        );
    }

    #[test]
    fn test_next_parents_are_viable() {
        let config = roomy_config();
        let evolver = Evolver::from_config(&config);
        let mut rng = Pcg32::seed_from_u64(5);
        let generation = generate_candidates(&evolver.evaluator, 200, &mut rng).unwrap();
        let parents = evolver.next_parents(&generation, &mut rng).unwrap();
        assert_eq!(parents.len(), 200);
        assert!(parents.iter().all(|p| evolver.evaluator.is_viable(p)));
        assert!(parents.iter().all(|p| generation.candidates().contains(p)));
    }

    #[test]
    fn test_next_parents_collapses_without_viable_candidates() {
        let config = roomy_config().with_max_tournaments_per_slot(3);
        let evolver = Evolver::from_config(&config);
        let mut rng = Pcg32::seed_from_u64(5);
        let generation = Generation::new(vec![Candidate::empty(16); 10]);
        let err = evolver.next_parents(&generation, &mut rng).unwrap_err();
        assert_eq!(
            err,
            Collapsed {
                attempts: 30,
                accepted: 0,
                target: 10
            }
        );
    }

    #[test]
    fn test_next_children_size_and_length() {
        let mut rng = Pcg32::seed_from_u64(11);
        let parents: Generation = (0..30).map(|_| bits::random(&mut rng, 16)).collect();
        let children = next_children(&parents, &mut rng);
        assert_eq!(children.len(), 30);
        for child in &children {
            assert_eq!(child.len(), 16);
            // the first half comes from some parent's first half
            assert!(
                parents
                    .iter()
                    .any(|p| p.genes()[..8] == child.genes()[..8])
            );
            assert!(
                parents
                    .iter()
                    .any(|p| p.genes()[8..] == child.genes()[8..])
            );
        }
    }

    #[test]
    fn test_next_children_of_empty_generation() {
        let mut rng = Pcg32::seed_from_u64(0);
        assert!(next_children(&Generation::default(), &mut rng).is_empty());
    }

    #[test]
    fn test_mutate_all_rate_bounds() {
        let mut rng = Pcg32::seed_from_u64(21);
        let original: Generation = (0..20).map(|_| bits::random(&mut rng, 64)).collect();
        let config = roomy_config();

        let frozen = Evolver {
            mutation_rate: 0.0,
            ..Evolver::from_config(&config)
        };
        let mut generation = original.clone();
        frozen.mutate_all(&mut generation, &mut rng);
        assert_eq!(generation, original);

        let inverting = Evolver {
            mutation_rate: 1.0,
            ..Evolver::from_config(&config)
        };
        inverting.mutate_all(&mut generation, &mut rng);
        for (mutated, before) in generation.iter().zip(&original) {
            assert_eq!(mutated.count_selected(), 64 - before.count_selected());
        }
    }

    #[test]
    fn test_evolve_keeps_population_shape() {
        let config = roomy_config();
        let evolver = Evolver::from_config(&config);
        let mut rng = Pcg32::seed_from_u64(8);
        let mut generation = generate_candidates(&evolver.evaluator, 200, &mut rng).unwrap();
        for _ in 0..10 {
            generation = evolver.evolve(&generation, &mut rng).unwrap();
            assert_eq!(generation.len(), 200);
            assert!(generation.iter().all(|c| c.len() == 16));
        }
    }
}
