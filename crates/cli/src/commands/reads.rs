use anyhow::{Context, Result};
use mutabench_sim::reads::{write_reads_fasta, write_records, write_truth, ReadSampler};
use std::io::Write;
use std::path::Path;

use crate::args::ReadsArgs;
use crate::printing::print_read_parameters;
use crate::utils::{create_output, load_config, load_genome, seeded_rng};

fn write_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let mut out = create_output(path)?;
    write(&mut out)
        .and_then(|_| out.flush())
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub fn sample_reads(args: &ReadsArgs) -> Result<()> {
    println!("🧬 Mutabench - Sampling Reads");
    println!("============================================");

    let mut config = load_config(args.config.as_deref())?;
    if let Some(length) = args.length {
        config.reads.length = length;
    }
    if let Some(count) = args.count {
        config.reads.count = count;
    }
    if let Some(rate) = args.error_rate {
        config.reads.error_rate = rate;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.reads.debug |= args.debug;
    config.validate().context("Invalid configuration")?;

    let genome = load_genome(&args.genome, args.record)?;
    if genome.ambiguous_count() > 0 {
        log::warn!(
            "Genome holds {} ambiguous (N) bases; reads may contain them",
            genome.ambiguous_count()
        );
    }

    let (mut rng, seed) = seeded_rng(config.seed);
    print_read_parameters(&config, seed, &genome);

    let sampler = ReadSampler::new(config.reads.clone())?;
    let reads = sampler.sample(genome.bases(), &mut rng)?;
    let errors: usize = reads.iter().map(|r| r.errors().len()).sum();
    println!("✓ Sampled {} reads ({errors} errors)", reads.len());

    write_file(&args.output, |out| {
        write_reads_fasta(&reads, genome.description(), config.reads.debug, out)
    })?;
    println!("✓ Reads saved to {}", args.output.display());

    write_file(&args.truth, |out| write_truth(&reads, out))?;
    println!("✓ Ground truth saved to {}", args.truth.display());

    write_file(&args.records, |out| write_records(&reads, out))?;
    println!("✓ Read records saved to {}", args.records.display());

    Ok(())
}
