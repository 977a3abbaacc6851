mod args;
mod commands;
pub mod defaults;
mod printing;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use args::{EvaluateArgs, GenomesArgs, ReadsArgs, VerifyArgs};
use commands::{config, evaluate, genomes, reads, verify};

/// Mutabench: benchmark data for sequence aligners
///
/// Derives a population of mutated genomes from a reference, samples noisy
/// reads with known origins from them, and scores an aligner's reported
/// positions against that ground truth.
#[derive(Parser, Debug)]
#[command(name = "mutabench")]
#[command(author, version, about = "Generates and scores aligner benchmarks", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel processing
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive mutated genomes from a reference.
    ///
    /// Builds a mutation profile over the reference, writes it as a report,
    /// and writes every derived genome to a multi-record FASTA file.
    Genomes(Box<GenomesArgs>),

    /// Sample reads with substitution errors from a genome.
    ///
    /// Writes the reads as FASTA, the ground-truth positions as TSV and one
    /// read record per read.
    Reads(ReadsArgs),

    /// Score aligner output against ground truth.
    Evaluate(EvaluateArgs),

    /// Check read records against the genome they were sampled from.
    Verify(VerifyArgs),

    /// Write a configuration file with every default filled in.
    Config {
        /// Output path
        #[arg(short, long, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level(cli.verbose)))
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    match cli.command {
        Commands::Genomes(args) => genomes::derive_genomes(&args)?,
        Commands::Reads(args) => reads::sample_reads(&args)?,
        Commands::Evaluate(args) => evaluate::evaluate_alignment(&args)?,
        Commands::Verify(args) => verify::verify_reads(&args)?,
        Commands::Config { output } => config::write_default_config(&output)?,
    }

    Ok(())
}
