use knapga_core::{Candidate, Catalog, RunConfig};
use serde::Serialize;

/// Summed value and weight of the items a candidate packs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub value: u64,
    pub weight: u64,
}

/// Scores candidates against a catalog and a weight limit.
///
/// Scoring is a pure function of the candidate, the catalog and the limit.
///
/// ```
/// use knapga_core::{Candidate, Catalog, Item};
/// use knapga_evaluator::FitnessEvaluator;
///
/// let catalog = Catalog::new(vec![Item::new(4, 3), Item::new(5, 4), Item::new(1, 1)]);
/// let evaluator = FitnessEvaluator::new(&catalog, 5);
///
/// assert_eq!(evaluator.score(&Candidate::from_bits(&[1, 0, 1])), 5);
/// // 3 + 4 > 5: too heavy
/// assert_eq!(evaluator.score(&Candidate::from_bits(&[1, 1, 0])), 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    catalog: &'a Catalog,
    weight_limit: u64,
}

impl<'a> FitnessEvaluator<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog, weight_limit: u64) -> Self {
        Self {
            catalog,
            weight_limit,
        }
    }

    #[must_use]
    pub fn from_config(config: &'a RunConfig) -> Self {
        Self::new(&config.catalog, config.weight_limit)
    }

    #[must_use]
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Sums the value and weight of the packed items.
    ///
    /// The candidate must have one bit per catalog item.
    #[must_use]
    pub fn totals(&self, candidate: &Candidate) -> Totals {
        debug_assert_eq!(candidate.len(), self.catalog.len());
        candidate
            .genes()
            .iter()
            .zip(self.catalog)
            .filter(|(gene, _)| **gene)
            .fold(Totals::default(), |acc, (_, item)| Totals {
                value: acc.value + u64::from(item.value),
                weight: acc.weight + u64::from(item.weight),
            })
    }

    #[must_use]
    pub fn is_feasible(&self, candidate: &Candidate) -> bool {
        self.totals(candidate).weight <= self.weight_limit
    }

    /// Value of the packed items, or `0` when they exceed the weight limit.
    #[must_use]
    pub fn score(&self, candidate: &Candidate) -> u64 {
        let Totals { value, weight } = self.totals(candidate);
        if weight > self.weight_limit { 0 } else { value }
    }

    /// A candidate is viable when it scores strictly above zero.
    #[must_use]
    pub fn is_viable(&self, candidate: &Candidate) -> bool {
        self.score(candidate) > 0
    }
}

#[cfg(test)]
mod tests {
    use knapga_core::Item;

    use super::*;

    fn reference() -> Catalog {
        Catalog::reference()
    }

    #[test]
    fn test_empty_candidate_scores_zero() {
        let catalog = reference();
        let evaluator = FitnessEvaluator::new(&catalog, 20);
        let empty = Candidate::empty(catalog.len());
        assert_eq!(evaluator.score(&empty), 0);
        assert!(evaluator.is_feasible(&empty));
        assert!(!evaluator.is_viable(&empty));
    }

    #[test]
    fn test_overweight_scores_zero() {
        let catalog = reference();
        let evaluator = FitnessEvaluator::new(&catalog, 20);
        let full = Candidate::full(catalog.len());
        assert!(evaluator.totals(&full).weight > 20);
        assert_eq!(evaluator.score(&full), 0);
        assert!(!evaluator.is_feasible(&full));
    }

    #[test]
    fn test_feasible_scores_value() {
        let catalog = reference();
        let evaluator = FitnessEvaluator::new(&catalog, 20);
        // items 6, 7, 10, 12, 15: weight 4+5+6+2+3 = 20, value 5+7+6+9+5 = 32
        let best = Candidate::from_bits(&[0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 1, 0, 1, 0, 0, 1]);
        assert_eq!(
            evaluator.totals(&best),
            Totals {
                value: 32,
                weight: 20
            }
        );
        assert_eq!(evaluator.score(&best), 32);
    }

    #[test]
    fn test_weight_exactly_at_limit_is_feasible() {
        let catalog = Catalog::new(vec![Item::new(3, 5), Item::new(2, 5)]);
        let evaluator = FitnessEvaluator::new(&catalog, 10);
        assert_eq!(evaluator.score(&Candidate::full(2)), 5);
        let tighter = FitnessEvaluator::new(&catalog, 9);
        assert_eq!(tighter.score(&Candidate::full(2)), 0);
    }

    #[test]
    fn test_zero_value_item_is_not_viable() {
        let catalog = Catalog::new(vec![Item::new(0, 1), Item::new(4, 30)]);
        let evaluator = FitnessEvaluator::new(&catalog, 10);
        let candidate = Candidate::from_bits(&[1, 0]);
        assert!(evaluator.is_feasible(&candidate));
        assert!(!evaluator.is_viable(&candidate));
    }

    #[test]
    fn test_score_is_deterministic() {
        let catalog = reference();
        let evaluator = FitnessEvaluator::new(&catalog, 20);
        let candidate = Candidate::from_bits(&[1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0]);
        let first = evaluator.score(&candidate);
        for _ in 0..10 {
            assert_eq!(evaluator.score(&candidate), first);
        }
        assert_eq!(first, 9 + 5 + 9);
    }
}
