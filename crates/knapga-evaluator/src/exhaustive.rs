//! Exact optimum by enumeration.
//!
//! Tries all `2^N` subsets of the catalog, so it is only usable for small
//! catalogs. The reference catalog (16 items) takes 65536 evaluations.

use knapga_core::Candidate;
use serde::Serialize;

use crate::{FitnessEvaluator, Totals};

/// Largest catalog [`solve`] accepts.
pub const MAX_ITEMS: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("exhaustive search supports at most {max} items, catalog has {len}")]
pub struct CatalogTooLarge {
    pub len: usize,
    pub max: usize,
}

/// Best packing of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Optimum {
    pub candidate: Candidate,
    pub totals: Totals,
}

impl Optimum {
    #[must_use]
    pub fn value(&self) -> u64 {
        self.totals.value
    }
}

/// Finds a subset with the highest score.
///
/// Among equally good subsets the one with the lowest bit pattern (item 0 as
/// the least significant bit) wins.
///
/// ```
/// use knapga_core::Catalog;
/// use knapga_evaluator::{FitnessEvaluator, exhaustive};
///
/// let catalog = Catalog::reference();
/// let optimum = exhaustive::solve(&FitnessEvaluator::new(&catalog, 20)).unwrap();
/// assert_eq!(optimum.value(), 32);
/// ```
pub fn solve(evaluator: &FitnessEvaluator<'_>) -> Result<Optimum, CatalogTooLarge> {
    let len = evaluator.catalog().len();
    if len > MAX_ITEMS {
        return Err(CatalogTooLarge {
            len,
            max: MAX_ITEMS,
        });
    }

    let mut best_mask = 0_u32;
    let mut best_score = 0;
    for mask in 1..(1_u32 << len) {
        let score = evaluator.score(&from_mask(mask, len));
        if score > best_score {
            best_score = score;
            best_mask = mask;
        }
    }

    let candidate = from_mask(best_mask, len);
    let totals = evaluator.totals(&candidate);
    Ok(Optimum { candidate, totals })
}

fn from_mask(mask: u32, len: usize) -> Candidate {
    Candidate::from_genes((0..len).map(|i| (mask >> i) & 1 == 1).collect())
}

#[cfg(test)]
mod tests {
    use knapga_core::{Catalog, Item};

    use super::*;

    #[test]
    fn test_reference_optimum() {
        let catalog = Catalog::reference();
        let optimum = solve(&FitnessEvaluator::new(&catalog, 20)).unwrap();
        assert_eq!(
            optimum.totals,
            Totals {
                value: 32,
                weight: 20
            }
        );
        assert_eq!(
            optimum.candidate.selected_indices().collect::<Vec<_>>(),
            vec![6, 7, 10, 12, 15]
        );
    }

    #[test]
    fn test_nothing_fits() {
        let catalog = Catalog::new(vec![Item::new(5, 2), Item::new(7, 3)]);
        let optimum = solve(&FitnessEvaluator::new(&catalog, 1)).unwrap();
        assert_eq!(optimum.value(), 0);
        assert_eq!(optimum.candidate, Candidate::empty(2));
    }

    #[test]
    fn test_rejects_large_catalog() {
        let catalog: Catalog = (0..25).map(|_| Item::new(1, 1)).collect();
        let err = solve(&FitnessEvaluator::new(&catalog, 10)).unwrap_err();
        assert_eq!(err, CatalogTooLarge { len: 25, max: 24 });
    }
}
