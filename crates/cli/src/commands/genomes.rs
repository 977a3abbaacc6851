use anyhow::{Context, Result};
use indicatif::ProgressBar;
use mutabench_sim::errors::SinkError;
use mutabench_sim::genome::{DerivedGenome, FastaSink, GenomeDeriver, GenomeSink};
use mutabench_sim::mutation::{write_profile_report, MutationProfileBuilder};
use mutabench_sim::Reference;

use crate::args::GenomesArgs;
use crate::printing::print_genome_parameters;
use crate::utils::{create_output, load_config, progress_bar, seeded_rng};

/// Advances a progress bar for every genome written.
struct ProgressSink<S> {
    inner: S,
    pb: ProgressBar,
}

impl<S: GenomeSink> GenomeSink for ProgressSink<S> {
    fn write_genome(&mut self, genome: &DerivedGenome) -> Result<(), SinkError> {
        self.inner.write_genome(genome)?;
        self.pb.inc(1);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.inner.finish()?;
        self.pb.finish_and_clear();
        Ok(())
    }
}

pub fn derive_genomes(args: &GenomesArgs) -> Result<()> {
    println!("🧬 Mutabench - Deriving Genomes");
    println!("============================================");

    let mut config = load_config(args.config.as_deref())?;
    if let Some(rate) = args.mutation_rate {
        config.profile.mutation_rate = rate;
    }
    if args.first_prob.is_some() {
        config.profile.first_allele_prob = args.first_prob;
    }
    if let Some(n) = args.population_size {
        config.profile.population_size = n;
    }
    if let Some(fraction) = args.indel_fraction {
        config.derivation.indel_fraction = fraction;
    }
    if let Some(extension) = args.indel_extension {
        config.derivation.indel_extension = extension;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.derivation.debug |= args.debug;
    config.validate().context("Invalid configuration")?;

    let reference = Reference::from_path(&args.reference)
        .with_context(|| format!("Failed to read reference {}", args.reference.display()))?;
    let sequence = reference
        .to_sequence()
        .context("Reference cannot be used for mutation")?;

    let (mut rng, seed) = seeded_rng(config.seed);
    print_genome_parameters(&config, seed, &reference);

    let profile = MutationProfileBuilder::new(config.profile.clone())?.build(&sequence, &mut rng)?;
    let deriver = GenomeDeriver::new(&sequence, &profile, config.derivation.clone())?;
    println!("✓ Sampled {} mutation sites", profile.len());

    let mut report = create_output(&args.profile)?;
    write_profile_report(&profile, config.derivation.indel_fraction, &mut report)
        .with_context(|| format!("Failed to write {}", args.profile.display()))?;
    println!("✓ Profile saved to {}", args.profile.display());

    let size = profile.population_size();
    let fasta = FastaSink::create(&args.output, reference.description(), config.derivation.debug)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut sink = ProgressSink {
        inner: fasta,
        pb: progress_bar(size as u64, args.quiet),
    };
    deriver
        .derive_into(size, &mut rng, &mut sink)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("✓ {size} genomes saved to {}", args.output.display());
    Ok(())
}
