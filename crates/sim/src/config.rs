//! Benchmark parameters and configuration.
//!
//! Every component takes its own section by value at construction. The
//! sections are grouped into [`BenchConfig`], which can be read from a JSON
//! file to reproduce a benchmark setup.

use crate::errors::{ConfigError, DerivationError, ProfileError, ReadError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default base mutation rate (sites per reference base).
pub const MUTATION_RATE: f64 = 0.001;
/// Indels occur at roughly one eighth the rate of SNPs.
pub const INDEL_FRACTION: f64 = 1.0 / 9.0;
pub const INDEL_EXTENSION: f64 = 0.3;
pub const POPULATION_SIZE: usize = 10;
pub const READ_LENGTH: usize = 100;
pub const READ_COUNT: usize = 1000;
pub const READ_ERROR_RATE: f64 = 0.02;
pub const GAP_TOLERANCE: u64 = 20;

/// The master configuration struct.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Optional RNG seed for reproducibility
    pub seed: Option<u64>,
    pub profile: ProfileConfig,
    pub derivation: DerivationConfig,
    pub reads: ReadConfig,
    pub scoring: ScoringConfig,
}

impl BenchConfig {
    /// Load and validate a JSON configuration file. Missing fields take their
    /// defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty JSON rendering, suitable for `from_path`.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.profile.validate()?;
        self.derivation.validate()?;
        self.reads.validate()?;
        Ok(())
    }
}

/// Parameters for building a mutation profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Fraction of reference positions that become mutation sites
    pub mutation_rate: f64,
    /// Weight of the first allele as a fraction of the population
    /// (entropy skew); `None` draws it uniformly
    pub first_allele_prob: Option<f64>,
    /// Number of genomes the frequency tables are expressed over
    pub population_size: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            mutation_rate: MUTATION_RATE,
            first_allele_prob: None,
            population_size: POPULATION_SIZE,
        }
    }
}

impl ProfileConfig {
    pub fn validate(&self) -> Result<(), ProfileError> {
        if !self.mutation_rate.is_finite() || self.mutation_rate < 0.0 {
            return Err(ProfileError::InvalidMutationRate(self.mutation_rate));
        }
        if let Some(p) = self.first_allele_prob {
            if !(0.0..=1.0).contains(&p) {
                return Err(ProfileError::InvalidProbability("first_allele_prob", p));
            }
        }
        if self.population_size == 0 {
            return Err(ProfileError::EmptyPopulation);
        }
        Ok(())
    }
}

/// Parameters for deriving genomes from a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivationConfig {
    /// Probability that a site becomes an indel instead of a substitution
    pub indel_fraction: f64,
    /// Probability of extending an indel by one more base
    pub indel_extension: f64,
    /// Lower-case injected symbols in written output
    pub debug: bool,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            indel_fraction: INDEL_FRACTION,
            indel_extension: INDEL_EXTENSION,
            debug: false,
        }
    }
}

impl DerivationConfig {
    pub fn validate(&self) -> Result<(), DerivationError> {
        if !(0.0..=1.0).contains(&self.indel_fraction) {
            return Err(DerivationError::InvalidProbability(
                "indel_fraction",
                self.indel_fraction,
            ));
        }
        // An extension probability of 1 never terminates
        if !(0.0..1.0).contains(&self.indel_extension) {
            return Err(DerivationError::InvalidProbability(
                "indel_extension",
                self.indel_extension,
            ));
        }
        Ok(())
    }
}

/// Parameters for sampling reads from a genome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadConfig {
    /// Read length in bases
    pub length: usize,
    /// Number of reads
    pub count: usize,
    /// Per-base substitution error probability
    pub error_rate: f64,
    /// Lower-case injected errors in written output
    pub debug: bool,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            length: READ_LENGTH,
            count: READ_COUNT,
            error_rate: READ_ERROR_RATE,
            debug: false,
        }
    }
}

impl ReadConfig {
    pub fn validate(&self) -> Result<(), ReadError> {
        if self.length == 0 {
            return Err(ReadError::ZeroLength);
        }
        if !(0.0..=1.0).contains(&self.error_rate) {
            return Err(ReadError::InvalidErrorRate(self.error_rate));
        }
        Ok(())
    }
}

/// How reported positions may claim ground-truth positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Matching {
    /// Any number of reported positions may match the same true position.
    #[default]
    Lenient,
    /// Each true position can be claimed by one reported position.
    Exclusive,
}

/// Parameters for scoring an alignment against ground truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Maximum distance between a reported and a true position
    pub gap_tolerance: u64,
    pub matching: Matching,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            gap_tolerance: GAP_TOLERANCE,
            matching: Matching::Lenient,
        }
    }
}
