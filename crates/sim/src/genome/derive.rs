//! Deriving mutated genomes from a reference and a mutation profile.
//!
//! Every derived genome draws one outcome per profile site: an insertion or
//! deletion with probability `indel_fraction` (split evenly between the two),
//! otherwise a substitution drawn from the site's frequency table.
//!
//! Outcomes are resolved in a fixed order:
//! 1. substitutions are written in place,
//! 2. deletion runs are marked, overwriting any substituted symbol,
//! 3. insertion runs are spliced after their anchor symbol, even when the
//!    anchor itself is marked deleted,
//! 4. deletion-marked symbols are stripped.
//!
//! Indel lengths are `1 + Geometric`: a run keeps growing by one base with
//! probability `indel_extension`.

use crate::base::{Nucleotide, Sequence};
use crate::config::DerivationConfig;
use crate::errors::{DerivationError, SinkError};
use crate::genome::GenomeSink;
use crate::mutation::MutationProfile;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Geometric};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// What happened at one profile site in one derived genome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteOutcome {
    /// The reference symbol was replaced by `allele` (possibly the same base).
    Substitution { position: usize, allele: Nucleotide },
    /// `bases` were spliced in right after `position`.
    Insertion {
        position: usize,
        bases: Vec<Nucleotide>,
    },
    /// `length` symbols starting at `position` were marked deleted
    /// (already clipped at the sequence end).
    Deletion { position: usize, length: usize },
}

impl SiteOutcome {
    pub fn position(&self) -> usize {
        match self {
            Self::Substitution { position, .. }
            | Self::Insertion { position, .. }
            | Self::Deletion { position, .. } => *position,
        }
    }
}

/// One member of the derived population. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedGenome {
    index: usize,
    sequence: Sequence,
    /// Offsets into `sequence` of substituted and inserted symbols.
    injected: Vec<usize>,
    outcomes: Vec<SiteOutcome>,
    deleted_bases: usize,
}

impl DerivedGenome {
    /// 0-based index within the population.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn into_sequence(self) -> Sequence {
        self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Per-site outcomes, sorted by position.
    pub fn outcomes(&self) -> &[SiteOutcome] {
        &self.outcomes
    }

    /// Sorted offsets of substituted and inserted symbols in the output.
    pub fn injected(&self) -> &[usize] {
        &self.injected
    }

    /// Total number of inserted bases.
    pub fn inserted_bases(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                SiteOutcome::Insertion { bases, .. } => bases.len(),
                _ => 0,
            })
            .sum()
    }

    /// Number of reference symbols removed. Overlapping deletion runs are
    /// counted once.
    pub fn deleted_bases(&self) -> usize {
        self.deleted_bases
    }

    /// Count of (substitutions, insertions, deletions) drawn.
    pub fn outcome_counts(&self) -> (usize, usize, usize) {
        self.outcomes.iter().fold((0, 0, 0), |(s, i, d), o| match o {
            SiteOutcome::Substitution { .. } => (s + 1, i, d),
            SiteOutcome::Insertion { .. } => (s, i + 1, d),
            SiteOutcome::Deletion { .. } => (s, i, d + 1),
        })
    }

    /// ASCII rendering. With `debug`, injected symbols are lower-cased so the
    /// genome can be diffed against the reference by eye.
    pub fn render(&self, debug: bool) -> Vec<u8> {
        let mut out = self.sequence.to_ascii();
        if debug {
            for &i in &self.injected {
                out[i] = out[i].to_ascii_lowercase();
            }
        }
        out
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Kept,
    Substituted,
    Deleted,
}

/// Derives genomes from a borrowed reference and profile.
///
/// The deriver holds no mutable state, so one instance can derive any number
/// of genomes, from any number of threads.
#[derive(Debug, Clone)]
pub struct GenomeDeriver<'a> {
    reference: &'a Sequence,
    profile: &'a MutationProfile,
    config: DerivationConfig,
    extension: Geometric,
}

impl<'a> GenomeDeriver<'a> {
    /// Create a deriver. Fails if the configuration is invalid or the profile
    /// has a site past the end of the reference.
    pub fn new(
        reference: &'a Sequence,
        profile: &'a MutationProfile,
        config: DerivationConfig,
    ) -> Result<Self, DerivationError> {
        config.validate()?;
        if let Some(position) = profile.max_position() {
            if position >= reference.len() {
                return Err(DerivationError::SiteOutOfBounds {
                    position,
                    length: reference.len(),
                });
            }
        }
        // Geometric counts failures before the first success; a "success"
        // here is the run stopping.
        let extension = Geometric::new(1.0 - config.indel_extension).map_err(|_| {
            DerivationError::InvalidProbability("indel_extension", config.indel_extension)
        })?;
        Ok(Self {
            reference,
            profile,
            config,
            extension,
        })
    }

    pub fn config(&self) -> &DerivationConfig {
        &self.config
    }

    pub fn profile(&self) -> &MutationProfile {
        self.profile
    }

    /// Length of an indel run: one base plus geometric extensions.
    fn run_length<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        1 + self.extension.sample(rng) as usize
    }

    /// Derive genome number `index` using `rng` for every draw.
    pub fn derive<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> DerivedGenome {
        let len = self.reference.len();
        let mut bases = self.reference.as_slice().to_vec();
        let mut marks = vec![Mark::Kept; len];
        let mut outcomes = Vec::with_capacity(self.profile.len());
        let mut insertion_sites = Vec::new();
        let mut deletion_sites = Vec::new();

        for site in self.profile.sites() {
            let position = site.position();
            if rng.random::<f64>() < self.config.indel_fraction {
                if rng.random::<f64>() < 0.5 {
                    insertion_sites.push(position);
                } else {
                    deletion_sites.push(position);
                }
            } else {
                let allele = site.draw_allele(rng);
                bases[position] = allele;
                marks[position] = Mark::Substituted;
                outcomes.push(SiteOutcome::Substitution { position, allele });
            }
        }

        for position in deletion_sites {
            let end = (position + self.run_length(rng)).min(len);
            marks[position..end].fill(Mark::Deleted);
            outcomes.push(SiteOutcome::Deletion {
                position,
                length: end - position,
            });
        }

        let mut insertions = Vec::with_capacity(insertion_sites.len());
        for position in insertion_sites {
            let run: Vec<Nucleotide> = (0..self.run_length(rng))
                .map(|_| Nucleotide::random(rng))
                .collect();
            outcomes.push(SiteOutcome::Insertion {
                position,
                bases: run.clone(),
            });
            insertions.push((position, run));
        }

        let inserted: usize = insertions.iter().map(|(_, run)| run.len()).sum();
        let deleted_bases = marks.iter().filter(|&&m| m == Mark::Deleted).count();

        let mut sequence = Sequence::with_capacity(len + inserted - deleted_bases);
        let mut injected = Vec::new();
        let mut pending = insertions.iter().peekable();
        for (i, (&base, &mark)) in bases.iter().zip(marks.iter()).enumerate() {
            match mark {
                Mark::Deleted => {}
                Mark::Substituted => {
                    injected.push(sequence.len());
                    sequence.push(base);
                }
                Mark::Kept => sequence.push(base),
            }
            if let Some((_, run)) = pending.next_if(|(p, _)| *p == i) {
                injected.extend(sequence.len()..sequence.len() + run.len());
                sequence.extend_from_slice(run);
            }
        }

        outcomes.sort_by_key(SiteOutcome::position);

        DerivedGenome {
            index,
            sequence,
            injected,
            outcomes,
            deleted_bases,
        }
    }

    /// Derive `size` genomes in parallel.
    ///
    /// One seed per genome is drawn from `rng` up front, and each genome gets
    /// its own generator, so the result depends only on `rng`'s state and not
    /// on the number of threads.
    pub fn derive_population<R: Rng + ?Sized>(
        &self,
        size: usize,
        rng: &mut R,
    ) -> Vec<DerivedGenome> {
        let seeds: Vec<u64> = (0..size).map(|_| rng.random()).collect();
        seeds
            .par_iter()
            .enumerate()
            .map(|(index, &seed)| {
                let mut local_rng = Xoshiro256PlusPlus::seed_from_u64(seed);
                self.derive(index, &mut local_rng)
            })
            .collect()
    }

    /// Derive `size` genomes and stream them into `sink` in index order.
    ///
    /// Genomes are derived in parallel batches and written as each batch
    /// completes, so only one batch is held in memory. The output is
    /// identical to [`derive_population`](Self::derive_population) for the
    /// same generator state.
    pub fn derive_into<R, S>(&self, size: usize, rng: &mut R, sink: &mut S) -> Result<usize, SinkError>
    where
        R: Rng + ?Sized,
        S: GenomeSink + ?Sized,
    {
        let seeds: Vec<u64> = (0..size).map(|_| rng.random()).collect();
        let batch = rayon::current_num_threads().max(1) * 4;

        for (b, chunk) in seeds.chunks(batch).enumerate() {
            let genomes: Vec<DerivedGenome> = chunk
                .par_iter()
                .enumerate()
                .map(|(i, &seed)| {
                    let mut local_rng = Xoshiro256PlusPlus::seed_from_u64(seed);
                    self.derive(b * batch + i, &mut local_rng)
                })
                .collect();
            for genome in &genomes {
                log::debug!(
                    "genome #{}: {} bp, {:?} (sub, ins, del)",
                    genome.index(),
                    genome.len(),
                    genome.outcome_counts()
                );
                sink.write_genome(genome)?;
            }
        }
        sink.finish()?;
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Nucleotide::{A, C, G, T};
    use crate::config::ProfileConfig;
    use crate::genome::MemorySink;
    use crate::mutation::{MutationProfileBuilder, MutationSite};
    use std::str::FromStr;

    fn rng(seed: u64) -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(seed)
    }

    fn config(indel_fraction: f64, indel_extension: f64) -> DerivationConfig {
        DerivationConfig {
            indel_fraction,
            indel_extension,
            debug: false,
        }
    }

    #[test]
    fn test_no_sites_copies_reference() {
        let reference = Sequence::from_str("ACGTACGT").unwrap();
        let profile = MutationProfile::new(10, vec![]);
        let deriver = GenomeDeriver::new(&reference, &profile, config(0.5, 0.3)).unwrap();
        let genome = deriver.derive(0, &mut rng(1));
        assert_eq!(genome.sequence(), &reference);
        assert!(genome.outcomes().is_empty());
        assert!(genome.injected().is_empty());
    }

    #[test]
    fn test_substitution_only() {
        let reference = Sequence::from_str("AAAAAAAA").unwrap();
        // Every draw in [0, 10] selects T
        let profile = MutationProfile::new(
            10,
            vec![
                MutationSite::new(2, vec![C, T], vec![0, 10]).unwrap(),
                MutationSite::new(5, vec![G, T], vec![10, 10]).unwrap(),
            ],
        );
        let deriver = GenomeDeriver::new(&reference, &profile, config(0.0, 0.3)).unwrap();
        for seed in 0..20 {
            let genome = deriver.derive(3, &mut rng(seed));
            let s = genome.sequence().to_string();
            assert_eq!(s.len(), 8);
            assert_eq!(&s[5..6], "G");
            assert!(&s[2..3] == "T" || &s[2..3] == "C");
            assert_eq!(genome.index(), 3);
            assert_eq!(genome.injected(), &[2, 5]);
            assert_eq!(genome.outcome_counts(), (2, 0, 0));
        }
    }

    #[test]
    fn test_debug_render_lowercases_injected() {
        let reference = Sequence::from_str("AAAA").unwrap();
        let profile = MutationProfile::new(
            1,
            vec![MutationSite::new(1, vec![G, T], vec![1, 1]).unwrap()],
        );
        let deriver = GenomeDeriver::new(&reference, &profile, config(0.0, 0.0)).unwrap();
        let genome = deriver.derive(0, &mut rng(0));
        assert_eq!(genome.render(false), b"AGAA".to_vec());
        assert_eq!(genome.render(true), b"AgAA".to_vec());
    }

    #[test]
    fn test_all_indels_length_accounting() {
        let reference = Sequence::from_str(&"ACGT".repeat(50)).unwrap();
        let builder = MutationProfileBuilder::new(ProfileConfig {
            mutation_rate: 0.2,
            first_allele_prob: None,
            population_size: 10,
        })
        .unwrap();
        let profile = builder.build(&reference, &mut rng(5)).unwrap();
        let deriver = GenomeDeriver::new(&reference, &profile, config(1.0, 0.5)).unwrap();

        for seed in 0..50 {
            let genome = deriver.derive(0, &mut rng(seed));
            let (subs, ins, del) = genome.outcome_counts();
            assert_eq!(subs, 0);
            assert_eq!(ins + del, profile.len());
            assert_eq!(
                genome.len(),
                reference.len() + genome.inserted_bases() - genome.deleted_bases()
            );
        }
    }

    #[test]
    fn test_length_accounting_mixed() {
        let reference = Sequence::from_str(&"GATTACA".repeat(40)).unwrap();
        let builder = MutationProfileBuilder::new(ProfileConfig {
            mutation_rate: 0.1,
            first_allele_prob: Some(0.7),
            population_size: 25,
        })
        .unwrap();
        let profile = builder.build(&reference, &mut rng(8)).unwrap();
        let deriver = GenomeDeriver::new(&reference, &profile, config(0.3, 0.3)).unwrap();

        for genome in deriver.derive_population(40, &mut rng(9)) {
            assert_eq!(
                genome.len(),
                reference.len() + genome.inserted_bases() - genome.deleted_bases()
            );
            assert_eq!(genome.outcomes().len(), profile.len());
            assert!(genome.injected().windows(2).all(|w| w[0] < w[1]));
            assert!(genome.injected().iter().all(|&i| i < genome.len()));
        }
    }

    #[test]
    fn test_deletion_clipped_at_end() {
        let reference = Sequence::from_str("ACGTAC").unwrap();
        let profile = MutationProfile::new(
            2,
            vec![MutationSite::new(5, vec![A, C], vec![1, 2]).unwrap()],
        );
        // Always an indel, long runs
        let deriver = GenomeDeriver::new(&reference, &profile, config(1.0, 0.9)).unwrap();
        for seed in 0..30 {
            let genome = deriver.derive(0, &mut rng(seed));
            match &genome.outcomes()[0] {
                SiteOutcome::Deletion { position, length } => {
                    assert_eq!(*position, 5);
                    assert_eq!(*length, 1);
                    assert_eq!(genome.sequence().to_string(), "ACGTA");
                }
                SiteOutcome::Insertion { bases, .. } => {
                    assert!(genome.sequence().to_string().starts_with("ACGTAC"));
                    assert_eq!(genome.len(), 6 + bases.len());
                }
                other => panic!("unexpected outcome {other:?}"),
            }
        }
    }

    #[test]
    fn test_insertion_survives_deleted_anchor() {
        // Site 1 is an insertion anchor, site 0 a deletion run covering it.
        // Find a seed producing that combination and check the splice.
        let reference = Sequence::from_str("ACGTACGT").unwrap();
        let profile = MutationProfile::new(
            2,
            vec![
                MutationSite::new(0, vec![A, C], vec![1, 2]).unwrap(),
                MutationSite::new(1, vec![A, C], vec![1, 2]).unwrap(),
            ],
        );
        let deriver = GenomeDeriver::new(&reference, &profile, config(1.0, 0.8)).unwrap();
        let mut checked = 0;
        for seed in 0..500 {
            let genome = deriver.derive(0, &mut rng(seed));
            let covered = matches!(
                genome.outcomes()[0],
                SiteOutcome::Deletion { length, .. } if length >= 2
            );
            if let (true, SiteOutcome::Insertion { bases, .. }) = (covered, &genome.outcomes()[1]) {
                let SiteOutcome::Deletion { length, .. } = genome.outcomes()[0] else {
                    unreachable!()
                };
                let inserted: String = bases.iter().map(|b| b.to_char()).collect();
                let expected = format!("{inserted}{}", &"ACGTACGT"[length..]);
                assert_eq!(genome.sequence().to_string(), expected);
                checked += 1;
            }
        }
        assert!(checked > 0, "no seed produced a covered insertion anchor");
    }

    #[test]
    fn test_zero_extension_gives_single_base_indels() {
        let reference = Sequence::from_str(&"ACGT".repeat(25)).unwrap();
        let sites = (0..100)
            .step_by(10)
            .map(|p| MutationSite::new(p, vec![A, T], vec![1, 2]).unwrap())
            .collect();
        let profile = MutationProfile::new(2, sites);
        let deriver = GenomeDeriver::new(&reference, &profile, config(1.0, 0.0)).unwrap();
        let genome = deriver.derive(0, &mut rng(4));
        for outcome in genome.outcomes() {
            match outcome {
                SiteOutcome::Insertion { bases, .. } => assert_eq!(bases.len(), 1),
                SiteOutcome::Deletion { length, .. } => assert_eq!(*length, 1),
                SiteOutcome::Substitution { .. } => panic!("indel fraction is 1"),
            }
        }
    }

    #[test]
    fn test_population_reproducible_and_matches_sink() {
        let reference = Sequence::from_str(&"ACGGTCA".repeat(30)).unwrap();
        let builder = MutationProfileBuilder::new(ProfileConfig {
            mutation_rate: 0.05,
            ..ProfileConfig::default()
        })
        .unwrap();
        let profile = builder.build(&reference, &mut rng(1)).unwrap();
        let deriver =
            GenomeDeriver::new(&reference, &profile, DerivationConfig::default()).unwrap();

        let a = deriver.derive_population(30, &mut rng(2));
        let b = deriver.derive_population(30, &mut rng(2));
        assert_eq!(a, b);

        let mut sink = MemorySink::new();
        let written = deriver.derive_into(30, &mut rng(2), &mut sink).unwrap();
        assert_eq!(written, 30);
        assert_eq!(sink.genomes(), a.as_slice());
        assert!(a.iter().enumerate().all(|(i, g)| g.index() == i));
    }

    #[test]
    fn test_rejects_site_past_reference() {
        let reference = Sequence::from_str("ACGT").unwrap();
        let profile = MutationProfile::new(
            2,
            vec![MutationSite::new(4, vec![A, C], vec![1, 2]).unwrap()],
        );
        let err = GenomeDeriver::new(&reference, &profile, DerivationConfig::default()).unwrap_err();
        assert_eq!(
            err,
            DerivationError::SiteOutOfBounds {
                position: 4,
                length: 4
            }
        );
    }

    #[test]
    fn test_rejects_bad_probabilities() {
        let reference = Sequence::from_str("ACGT").unwrap();
        let profile = MutationProfile::new(2, vec![]);
        assert!(GenomeDeriver::new(&reference, &profile, config(1.2, 0.3)).is_err());
        assert!(GenomeDeriver::new(&reference, &profile, config(0.1, 1.0)).is_err());
    }

    #[test]
    fn test_substitution_frequencies_follow_table() {
        let reference = Sequence::from_str("A").unwrap();
        // C takes r in [0, 90], T takes (90, 100]
        let profile = MutationProfile::new(
            100,
            vec![MutationSite::new(0, vec![C, T], vec![90, 100]).unwrap()],
        );
        let deriver = GenomeDeriver::new(&reference, &profile, config(0.0, 0.3)).unwrap();
        let genomes = deriver.derive_population(2000, &mut rng(12));
        let cs = genomes
            .iter()
            .filter(|g| g.sequence().get(0) == Some(C))
            .count();
        let frac = cs as f64 / 2000.0;
        assert!((frac - 91.0 / 101.0).abs() < 0.03, "C fraction {frac}");
    }
}
