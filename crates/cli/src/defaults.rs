//! Default output paths shared by the subcommands.
//! Numeric defaults live in `mutabench_sim::config`.

pub const CONFIG_FILE: &str = "mutabench.json";

pub const GENOMES_FILE: &str = "multigenome.fasta";
pub const PROFILE_FILE: &str = "snp_profile.txt";

pub const READS_FILE: &str = "reads.fasta";
pub const TRUTH_FILE: &str = "reads_truth.tsv";
pub const RECORDS_FILE: &str = "reads.txt";
