//! # Analysis Crate
//!
//! Scoring of aligner output against simulated ground truth, and
//! consistency checks for sampled read records.
//!
//! - **Scoring**: gap-tolerant matching of reported read positions
//! - **Verify**: re-checking read records against their source genome

pub mod errors;
pub mod scoring;
pub mod verify;

pub use errors::{ParseError, ScoreError, VerifyError};
pub use scoring::{evaluate, Alignment, Evaluation, EvaluationSummary, GroundTruth, ReadScore};
pub use verify::{verify_records, VerifyReport};
