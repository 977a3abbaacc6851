use anyhow::{Context, Result};
use mutabench_analysis::scoring::{
    evaluate, write_read_diagnostics, write_summary, Alignment, GroundTruth,
};
use mutabench_sim::config::Matching;
use std::io::{self, Write};

use crate::args::EvaluateArgs;
use crate::printing::print_evaluation;
use crate::utils::{create_output, load_config};

pub fn evaluate_alignment(args: &EvaluateArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(gap) = args.gap {
        config.scoring.gap_tolerance = gap;
    }
    if args.exclusive {
        config.scoring.matching = Matching::Exclusive;
    }

    let truth = GroundTruth::from_path(&args.truth)?;
    let alignment = Alignment::from_path(&args.alignment)?;
    log::info!(
        "{} ground-truth reads, {} alignment lines",
        truth.len(),
        alignment.len()
    );

    let evaluation = evaluate(&truth, &alignment, &config.scoring)
        .context("Alignment does not match the ground truth")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.details {
        write_read_diagnostics(&evaluation.reads, &mut out)?;
    }
    write_summary(&evaluation.summary, &mut out)?;
    out.flush()?;
    drop(out);

    print_evaluation(&evaluation.summary);

    if let Some(path) = &args.json {
        let mut file = create_output(path)?;
        serde_json::to_writer_pretty(&mut file, &evaluation)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        file.flush()?;
        println!("✓ Evaluation saved to {}", path.display());
    }

    Ok(())
}
