use clap::Args;
use std::path::PathBuf;

use crate::defaults;

#[derive(Args, Debug)]
pub struct GenomesArgs {
    /// Reference genome (FASTA)
    pub reference: PathBuf,

    /// Configuration file (JSON); flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fraction of reference positions that become mutation sites
    ///
    /// Defaults to 0.001.
    #[arg(short = 'm', long)]
    pub mutation_rate: Option<f64>,

    /// Weight of the first allele at each site, as a fraction of the population
    ///
    /// Skews sites toward a dominant allele (lower entropy). Drawn uniformly
    /// when not given.
    #[arg(long)]
    pub first_prob: Option<f64>,

    /// Probability that a site becomes an insertion or deletion
    ///
    /// Defaults to 1/9.
    #[arg(short = 'i', long)]
    pub indel_fraction: Option<f64>,

    /// Probability of extending an indel by one more base
    ///
    /// Defaults to 0.3 (mean length ~1.4 bp).
    #[arg(long)]
    pub indel_extension: Option<f64>,

    /// Number of genomes to derive
    ///
    /// Defaults to 10.
    #[arg(short = 'n', long)]
    pub population_size: Option<usize>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Lower-case every substituted or inserted base in the output
    #[arg(long)]
    pub debug: bool,

    /// Output FASTA file
    #[arg(short, long, default_value = defaults::GENOMES_FILE)]
    pub output: PathBuf,

    /// Mutation profile report
    #[arg(long, default_value = defaults::PROFILE_FILE)]
    pub profile: PathBuf,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Args, Debug)]
pub struct ReadsArgs {
    /// Genome to sample from (FASTA)
    pub genome: PathBuf,

    /// Record of a multi-genome FASTA file to sample from (1-based)
    ///
    /// Single-record files need no selection.
    #[arg(long)]
    pub record: Option<usize>,

    /// Configuration file (JSON); flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Read length
    ///
    /// Defaults to 100.
    #[arg(short = 'l', long)]
    pub length: Option<usize>,

    /// Number of reads
    ///
    /// Defaults to 1000.
    #[arg(short = 'N', long)]
    pub count: Option<usize>,

    /// Per-base substitution error rate
    ///
    /// Defaults to 0.02.
    #[arg(short = 'e', long)]
    pub error_rate: Option<f64>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Lower-case error bases in the reads FASTA
    #[arg(long)]
    pub debug: bool,

    /// Reads FASTA output
    #[arg(short, long, default_value = defaults::READS_FILE)]
    pub output: PathBuf,

    /// Ground-truth output (read, tab, positions)
    #[arg(long, default_value = defaults::TRUTH_FILE)]
    pub truth: PathBuf,

    /// Read-record output (`R N p.. E q..`)
    #[arg(long, default_value = defaults::RECORDS_FILE)]
    pub records: PathBuf,
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Ground truth: one `read<TAB>positions` line per read
    pub truth: PathBuf,

    /// Aligner output: one `read id<TAB>positions` line per aligned read
    pub alignment: PathBuf,

    /// Configuration file (JSON); flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum distance between a reported and a true position
    ///
    /// Defaults to 20.
    #[arg(short = 'g', long)]
    pub gap: Option<u64>,

    /// Let each true position be matched at most once
    #[arg(long)]
    pub exclusive: bool,

    /// Print per-read diagnostics before the summary
    #[arg(long)]
    pub details: bool,

    /// Also write the evaluation as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Genome the reads were sampled from (FASTA)
    #[arg(short = 's', long)]
    pub genome: PathBuf,

    /// Record of a multi-genome FASTA file the reads came from (1-based)
    #[arg(long)]
    pub record: Option<usize>,

    /// Read-record file
    #[arg(short = 'r', long)]
    pub reads: PathBuf,

    /// Exit with an error when any issue is found
    #[arg(long)]
    pub strict: bool,
}
