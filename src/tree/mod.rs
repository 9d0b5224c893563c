// src/tree/mod.rs
//! Recombining binomial tree pricer for European and American exercise.
//!
//! The tree is a separate numerical method from the Monte Carlo engine and is mostly
//! useful as an independent check of it, and for early exercise which the path
//! engine does not handle.

pub mod binomial;
pub mod products;

pub use binomial::SimpleBinomialTree;
pub use products::{TreeAmerican, TreeEuropean, TreeProduct};
