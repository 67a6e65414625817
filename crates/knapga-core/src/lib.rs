//! Core data model for the knapsack genetic algorithm.
//!
//! This crate defines the values every other crate passes around:
//!
//! - [`Item`] and [`Catalog`] - the fixed list of things that may be packed
//! - [`Candidate`] - one proposed subset of the catalog, one bit per item
//! - [`RunConfig`] - the immutable parameters of a single run
//!
//! Scoring lives in `knapga-evaluator`; the evolutionary loop lives in
//! `knapga-training`.
//!
//! # Positional contract
//!
//! A candidate never stores items. Bit `i` of a candidate refers to item `i`
//! of the catalog it is scored against, so a candidate is only meaningful
//! together with a catalog of the same length.
//!
//! ```
//! use knapga_core::{Candidate, Catalog};
//!
//! let catalog = Catalog::reference();
//! let candidate = Candidate::empty(catalog.len());
//! assert_eq!(candidate.len(), 16);
//! assert_eq!(candidate.count_selected(), 0);
//! ```

pub use self::{
    candidate::Candidate,
    config::{ConfigError, RunConfig},
    item::{Catalog, Item},
};

pub mod candidate;
pub mod config;
pub mod item;
