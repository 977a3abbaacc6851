//! Scoring aligner output against ground truth.

mod evaluate;
mod mapping;
mod report;

pub use evaluate::{
    evaluate, nearest_within, Evaluation, EvaluationSummary, ReadScore, ScoreAccumulator,
};
pub use mapping::{AlignedRead, Alignment, GroundTruth, Position, TruthEntry};
pub use report::{write_read_diagnostics, write_summary};
