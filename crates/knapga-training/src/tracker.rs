//! Per-generation progress and diversity measurements.
//!
//! Everything here only reads a generation.

use knapga_core::Candidate;
use knapga_evaluator::FitnessEvaluator;
use serde::Serialize;

use crate::genetic::Generation;

/// Highest score in the generation, `0` if it is empty.
#[must_use]
pub fn best(evaluator: &FitnessEvaluator<'_>, generation: &Generation) -> u64 {
    generation
        .iter()
        .map(|candidate| evaluator.score(candidate))
        .max()
        .unwrap_or(0)
}

/// A highest-scoring candidate and its score.
#[must_use]
pub fn best_candidate<'g>(
    evaluator: &FitnessEvaluator<'_>,
    generation: &'g Generation,
) -> Option<(&'g Candidate, u64)> {
    generation
        .iter()
        .map(|candidate| (candidate, evaluator.score(candidate)))
        .max_by_key(|(_, score)| *score)
}

#[must_use]
pub fn viable_count(evaluator: &FitnessEvaluator<'_>, generation: &Generation) -> usize {
    generation
        .iter()
        .filter(|candidate| evaluator.is_viable(candidate))
        .count()
}

/// How strongly a generation leans toward selecting each item.
///
/// For item `i`, `deviations[i]` is the number of candidates selecting it
/// minus a quarter of the generation size (integer division). `character`
/// is the sum of all deviations.
///
/// This is a bias signal, not a variance: a population where every item is
/// picked by a quarter of the candidates has character 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variation {
    pub character: i64,
    pub deviations: Vec<i64>,
}

/// Measures the [`Variation`] of a generation over `item_count` item indices.
///
/// ```
/// use knapga_core::Candidate;
/// use knapga_training::{genetic::Generation, tracker};
///
/// let generation = Generation::new(vec![
///     Candidate::from_bits(&[1, 1, 0]),
///     Candidate::from_bits(&[1, 0, 0]),
///     Candidate::from_bits(&[1, 0, 0]),
///     Candidate::from_bits(&[1, 0, 1]),
/// ]);
/// let variation = tracker::variation(&generation, 3);
/// assert_eq!(variation.deviations, vec![3, 0, 0]);
/// assert_eq!(variation.character, 3);
/// ```
#[expect(clippy::cast_possible_wrap)]
#[must_use]
pub fn variation(generation: &Generation, item_count: usize) -> Variation {
    let baseline = (generation.len() / 4) as i64;
    let deviations = (0..item_count)
        .map(|i| {
            let selected = generation.iter().filter(|c| c.is_selected(i)).count();
            selected as i64 - baseline
        })
        .collect::<Vec<_>>();
    let character = deviations.iter().sum();
    Variation {
        character,
        deviations,
    }
}

/// Measurements of one bred generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRecord {
    /// 1-based index; generation 0 is the random seed population
    pub generation: usize,
    pub best: u64,
    pub viable: usize,
    pub variation: Variation,
}

impl GenerationRecord {
    #[must_use]
    pub fn measure(
        index: usize,
        evaluator: &FitnessEvaluator<'_>,
        generation: &Generation,
    ) -> Self {
        Self {
            generation: index,
            best: best(evaluator, generation),
            viable: viable_count(evaluator, generation),
            variation: variation(generation, evaluator.catalog().len()),
        }
    }
}
