use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use mutabench_sim::config::BenchConfig;
use mutabench_sim::Reference;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Load the configuration file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<BenchConfig> {
    match path {
        Some(path) => BenchConfig::from_path(path)
            .with_context(|| format!("Failed to load configuration {}", path.display())),
        None => Ok(BenchConfig::default()),
    }
}

/// Load one genome. Without `record` the file must hold a single record;
/// with it, the 1-based record of a multi-genome file is selected.
pub fn load_genome(path: &Path, record: Option<usize>) -> Result<Reference> {
    let Some(record) = record else {
        return Reference::from_path(path)
            .with_context(|| format!("Failed to read genome {}", path.display()));
    };
    let mut records = Reference::from_path_all(path)
        .with_context(|| format!("Failed to read genome {}", path.display()))?;
    if record == 0 || record > records.len() {
        bail!(
            "Record {record} is out of range: {} holds {} record(s)",
            path.display(),
            records.len()
        );
    }
    Ok(records.swap_remove(record - 1))
}

/// Generator seeded from `seed`, or from OS entropy. Returns the seed used.
pub fn seeded_rng(seed: Option<u64>) -> (Xoshiro256PlusPlus, u64) {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("Random seed: {seed}");
    (Xoshiro256PlusPlus::seed_from_u64(seed), seed)
}

pub fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

pub fn progress_bar(len: u64, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
