//! # Simulation Crate
//!
//! The `sim` crate generates benchmark data for sequence aligners. It builds
//! a sparse mutation profile over a reference, derives a population of
//! mutated genomes from it, and cuts noisy reads with known origins from
//! those genomes.

pub mod base;
pub mod config;
pub mod errors;
pub mod genome;
pub mod mutation;
pub mod prelude;
pub mod reads;

pub use base::{Nucleotide, Reference, Sequence};
