//! Mock order generation
//!
//! Produces realistic, reproducible order records for demos, load runs and
//! tests. Every generator is driven by a seeded RNG, so the same
//! configuration and seed always yield the same records, ids included.
//!
//! # Modules
//! - `generator`: customer pool, item catalog and the seeded generator

pub mod generator;

pub use generator::{CustomerProfile, GeneratorConfig, GeneratorError, OrderGenerator};

/// Crate version constant
pub const VERSION: &str = "0.1.0";
