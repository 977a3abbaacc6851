//! Text output for evaluations.

use super::evaluate::{EvaluationSummary, ReadScore};
use std::fmt::Display;
use std::io::{self, Write};

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.8}"),
        None => "NaN".to_string(),
    }
}

/// Four lines per read: `id label`, truth positions, reported positions and
/// `tp fp fn`.
pub fn write_read_diagnostics<W: Write>(reads: &[ReadScore], out: &mut W) -> io::Result<()> {
    for read in reads {
        writeln!(out, "{} {}", read.id, read.label)?;
        writeln!(out, "{}", join(&read.truth))?;
        writeln!(out, "{}", join(&read.reported))?;
        writeln!(
            out,
            "{} {} {}",
            read.true_positives, read.false_positives, read.false_negatives
        )?;
    }
    Ok(())
}

/// `G=...` followed by a tab-separated header and value line.
pub fn write_summary<W: Write>(summary: &EvaluationSummary, out: &mut W) -> io::Result<()> {
    writeln!(out, "G={}", summary.gap_tolerance)?;
    writeln!(
        out,
        "Reads\tPos\tAlignedReads\tAlignedPos\tTP\tFP\tFN\tPrecision\tRecall"
    )?;
    writeln!(
        out,
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        summary.reads,
        summary.positions,
        summary.aligned_reads,
        summary.aligned_positions,
        summary.true_positives,
        summary.false_positives,
        summary.false_negatives,
        metric(summary.precision),
        metric(summary.recall)
    )
}
