//! Bit-vector operations behind the genetic operators.
//!
//! - **Initialization**: [`random`] draws every bit with probability 0.5
//! - **Crossover**: [`breed`] splices two parents at the midpoint
//! - **Mutation**: [`flip_mutate`] flips each bit with a fixed probability
//!
//! None of these change the length of a candidate.

use knapga_core::Candidate;
use rand::Rng;

/// Draws a candidate with each of its `len` bits set independently with
/// probability 0.5.
pub fn random<R>(rng: &mut R, len: usize) -> Candidate
where
    R: Rng + ?Sized,
{
    Candidate::from_genes((0..len).map(|_| rng.random_bool(0.5)).collect())
}

/// Single-point crossover at the fixed midpoint `len / 2`.
///
/// The child takes bits `0..len / 2` from `first` and bits `len / 2..len`
/// from `second`.
///
/// ```
/// use knapga_core::Candidate;
/// use knapga_training::bits;
///
/// let child = bits::breed(&Candidate::full(16), &Candidate::empty(16));
/// assert_eq!(
///     child.to_bits(),
///     vec![1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0]
/// );
/// ```
///
/// # Panics
///
/// Panics if the parents have different lengths.
#[must_use]
pub fn breed(first: &Candidate, second: &Candidate) -> Candidate {
    assert_eq!(first.len(), second.len());
    let point = first.len() / 2;
    let mut genes = Vec::with_capacity(first.len());
    genes.extend_from_slice(&first.genes()[..point]);
    genes.extend_from_slice(&second.genes()[point..]);
    Candidate::from_genes(genes)
}

/// Flips each bit of `candidate` in place when a uniform draw from `[0, 1)`
/// falls below `rate`.
///
/// A rate of `0.0` never flips anything and a rate of `1.0` flips every bit.
pub fn flip_mutate<R>(candidate: &mut Candidate, rate: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for gene in candidate.genes_mut() {
        if rng.random::<f64>() < rate {
            *gene = !*gene;
        }
    }
}
