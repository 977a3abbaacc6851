use anyhow::{bail, Result};
use mutabench_analysis::verify::verify_file;

use crate::args::VerifyArgs;
use crate::utils::load_genome;

pub fn verify_reads(args: &VerifyArgs) -> Result<()> {
    let genome = load_genome(&args.genome, args.record)?;

    println!("Checking reads against {} ...", genome.description());
    let report = verify_file(genome.bases(), &args.reads)?;

    for issue in &report.issues {
        println!("  line {}: {}", issue.line, issue.issue);
    }
    println!(
        "Finished verifying {} reads (from {}) in genome {} (len={})",
        report.reads,
        args.reads.display(),
        args.genome.display(),
        report.genome_len
    );

    if report.is_clean() {
        println!("✓ No issues found");
    } else {
        println!("⚠️  {} issue(s) found", report.issues.len());
        if args.strict {
            bail!("{} read record issue(s)", report.issues.len());
        }
    }
    Ok(())
}
