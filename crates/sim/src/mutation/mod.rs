//! Mutation model: sparse SNP sites with per-site allele frequencies.
//!
//! - **Profile**: site sampling, substitution alphabets, frequency tables
//! - **Entropy**: diagnostic entropy of a site's allele distribution
//! - **Report**: human-readable profile dump

pub mod entropy;
pub mod profile;
pub mod report;

pub use entropy::{entropy, Entropy};
pub use profile::{
    choose_alleles, sample_frequencies, sample_positions, MutationProfile,
    MutationProfileBuilder, MutationSite, SNP_CATALOGUE,
};
pub use report::write_profile_report;
