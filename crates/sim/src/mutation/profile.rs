//! Mutation profiles: where a population may differ from the reference and
//! how often each allele appears.
//!
//! A profile is built once per reference and then shared read-only by every
//! derived genome. Each site carries a small substitution alphabet and a
//! cumulative frequency table over a population of `N` genomes, so drawing an
//! allele is a single uniform draw in `[0, N]` followed by a scan.

use super::entropy::{entropy, Entropy};
use crate::base::{Nucleotide, Sequence};
use crate::config::ProfileConfig;
use crate::errors::ProfileError;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use Nucleotide::{A, C, G, T};

/// Substitution alphabets a site may carry: all biallelic pairs, all
/// triallelic subsets and the full tetra-allelic set.
pub const SNP_CATALOGUE: [&[Nucleotide]; 11] = [
    &[A, C],
    &[A, G],
    &[A, T],
    &[C, G],
    &[C, T],
    &[G, T],
    &[A, C, G],
    &[A, C, T],
    &[A, G, T],
    &[C, G, T],
    &[A, C, G, T],
];

/// One position of the reference at which substitutions are modeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationSite {
    position: usize,
    alleles: Vec<Nucleotide>,
    /// Cumulative weights, one per allele; the last entry is the population size.
    frequencies: Vec<usize>,
}

impl MutationSite {
    /// Create a site from its parts.
    ///
    /// Fails when there are no alleles, when the table length differs from
    /// the allele count, or when the table is not non-decreasing.
    pub fn new(
        position: usize,
        alleles: Vec<Nucleotide>,
        frequencies: Vec<usize>,
    ) -> Result<Self, ProfileError> {
        let invalid = |reason| ProfileError::InvalidSite { position, reason };
        if alleles.is_empty() {
            return Err(invalid("a site needs at least one allele"));
        }
        if alleles.len() != frequencies.len() {
            return Err(invalid("expected one cumulative weight per allele"));
        }
        if frequencies.windows(2).any(|w| w[0] > w[1]) {
            return Err(invalid("frequency table must be non-decreasing"));
        }
        Ok(Self {
            position,
            alleles,
            frequencies,
        })
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn alleles(&self) -> &[Nucleotide] {
        &self.alleles
    }

    #[inline]
    pub fn frequencies(&self) -> &[usize] {
        &self.frequencies
    }

    /// Total population size encoded in the table.
    #[inline]
    pub fn population_size(&self) -> usize {
        self.frequencies.last().copied().unwrap_or(0)
    }

    /// Shannon entropy of the allele distribution (diagnostic only).
    pub fn entropy(&self) -> Entropy {
        entropy(&self.frequencies)
    }

    /// Draw an allele: a uniform `r` in `[0, N]`, then the first allele whose
    /// cumulative weight is at least `r`.
    pub fn draw_allele<R: Rng + ?Sized>(&self, rng: &mut R) -> Nucleotide {
        let r = rng.random_range(0..=self.population_size());
        self.allele_for(r)
    }

    /// The allele selected by the draw `r`.
    pub fn allele_for(&self, r: usize) -> Nucleotide {
        let idx = self
            .frequencies
            .iter()
            .position(|&f| r <= f)
            .unwrap_or(self.alleles.len() - 1);
        self.alleles[idx]
    }
}

/// The set of mutation sites over a reference, sorted by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationProfile {
    population_size: usize,
    sites: Vec<MutationSite>,
}

impl MutationProfile {
    /// Create a profile. Sites are sorted by position.
    pub fn new(population_size: usize, mut sites: Vec<MutationSite>) -> Self {
        sites.sort_by_key(|s| s.position);
        Self {
            population_size,
            sites,
        }
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn sites(&self) -> &[MutationSite] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Largest site position, if any.
    pub fn max_position(&self) -> Option<usize> {
        self.sites.last().map(|s| s.position)
    }
}

/// Builds a [`MutationProfile`] for a reference sequence.
///
/// # Examples
///
/// ```
/// use mutabench_sim::config::ProfileConfig;
/// use mutabench_sim::mutation::MutationProfileBuilder;
/// use mutabench_sim::Sequence;
/// use rand::SeedableRng;
/// use rand_xoshiro::Xoshiro256PlusPlus;
/// use std::str::FromStr;
///
/// let reference = Sequence::from_str(&"ACGT".repeat(250)).unwrap();
/// let config = ProfileConfig { mutation_rate: 0.01, ..ProfileConfig::default() };
/// let builder = MutationProfileBuilder::new(config).unwrap();
/// let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
///
/// let profile = builder.build(&reference, &mut rng).unwrap();
/// assert_eq!(profile.len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct MutationProfileBuilder {
    config: ProfileConfig,
}

impl MutationProfileBuilder {
    /// Create a builder; the configuration is validated here.
    pub fn new(config: ProfileConfig) -> Result<Self, ProfileError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Sample sites over `reference` and give each an alphabet and a table.
    pub fn build<R: Rng + ?Sized>(
        &self,
        reference: &Sequence,
        rng: &mut R,
    ) -> Result<MutationProfile, ProfileError> {
        let n = self.config.population_size;
        let positions = sample_positions(reference.len(), self.config.mutation_rate, rng)?;
        log::debug!(
            "sampled {} mutation sites over {} bases",
            positions.len(),
            reference.len()
        );

        let sites = positions
            .into_iter()
            .map(|position| {
                let alleles = choose_alleles(rng);
                let frequencies =
                    sample_frequencies(alleles.len(), n, self.config.first_allele_prob, rng);
                MutationSite::new(position, alleles.to_vec(), frequencies)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MutationProfile::new(n, sites))
    }
}

/// Sample `floor(rate × len)` distinct positions from `[0, len)`.
///
/// Positions are drawn by rejection sampling (redraw on collision). A request
/// larger than `len` is clamped to `len` with a warning. When more than half
/// of the range is requested, the excluded positions are sampled instead so
/// the rejection loop stays short. The result is sorted.
pub fn sample_positions<R: Rng + ?Sized>(
    len: usize,
    rate: f64,
    rng: &mut R,
) -> Result<Vec<usize>, ProfileError> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(ProfileError::InvalidMutationRate(rate));
    }

    let requested = (rate * len as f64).floor() as usize;
    if requested > len {
        log::warn!(
            "requested {requested} mutation sites but the sequence has only {len} positions; clamping"
        );
    }
    let count = requested.min(len);

    let invert = count > len / 2;
    let target = if invert { len - count } else { count };

    let mut drawn = HashSet::with_capacity(target);
    while drawn.len() < target {
        drawn.insert(rng.random_range(0..len));
    }

    let mut positions: Vec<usize> = if invert {
        (0..len).filter(|p| !drawn.contains(p)).collect()
    } else {
        drawn.into_iter().collect()
    };
    positions.sort_unstable();
    Ok(positions)
}

/// Draw a substitution alphabet uniformly from [`SNP_CATALOGUE`].
pub fn choose_alleles<R: Rng + ?Sized>(rng: &mut R) -> &'static [Nucleotide] {
    SNP_CATALOGUE.choose(rng).copied().unwrap_or(&SNP_CATALOGUE[0])
}

/// Build a cumulative frequency table of length `k` that ends in `n`.
///
/// With `first_prob` set, the first entry is pinned to `round(first_prob × n)`
/// so that allele dominates; otherwise it is uniform in `[0, n]`. Every later
/// entry except the last adds a uniform increment bounded by the remaining
/// budget, and the last entry is pinned to `n`.
pub fn sample_frequencies<R: Rng + ?Sized>(
    k: usize,
    n: usize,
    first_prob: Option<f64>,
    rng: &mut R,
) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }

    let mut table = Vec::with_capacity(k);
    let mut cumulative = 0;
    for i in 0..k - 1 {
        let part = match first_prob {
            Some(p) if i == 0 => ((p * n as f64).round() as usize).min(n),
            _ => rng.random_range(0..=n - cumulative),
        };
        cumulative += part;
        table.push(cumulative);
    }
    table.push(n);
    table
}
