//! Scoring of knapsack candidates.
//!
//! - [`fitness`] turns a candidate into a score: the value it packs, or zero
//!   when it is over the weight limit.
//! - [`exhaustive`] finds the true optimum of a small catalog by trying every
//!   subset. It exists to check what the genetic algorithm finds.
//!
//! # Zero scores
//!
//! A score of zero means either "too heavy" or "packs nothing of value". The
//! two cases are deliberately not told apart: selection treats every
//! zero-scored candidate as non-viable.

pub use self::fitness::{FitnessEvaluator, Totals};

pub mod exhaustive;
pub mod fitness;
