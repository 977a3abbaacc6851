//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use mutabench_sim::prelude::*;
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//! use std::str::FromStr;
//!
//! let reference = Sequence::from_str("ACGTACGTACGTACGTACGT").unwrap();
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
//!
//! let builder = MutationProfileBuilder::new(ProfileConfig {
//!     mutation_rate: 0.25,
//!     ..ProfileConfig::default()
//! })
//! .unwrap();
//! let profile = builder.build(&reference, &mut rng).unwrap();
//! assert_eq!(profile.len(), 5);
//!
//! let deriver = GenomeDeriver::new(&reference, &profile, DerivationConfig::default()).unwrap();
//! let genomes = deriver.derive_population(profile.population_size(), &mut rng);
//! assert_eq!(genomes.len(), 10);
//! ```

pub use crate::base::{Nucleotide, Reference, Sequence};
pub use crate::config::{
    BenchConfig, DerivationConfig, Matching, ProfileConfig, ReadConfig, ScoringConfig,
};
pub use crate::errors;
pub use crate::genome::{DerivedGenome, FastaSink, GenomeDeriver, GenomeSink, MemorySink};
pub use crate::mutation::{MutationProfile, MutationProfileBuilder, MutationSite};
pub use crate::reads::{ReadRecord, ReadSampler, SampledRead};
