use mutabench_sim::errors::RecordError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a read-to-positions mapping file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Line {line}: invalid read id '{value}'")]
    InvalidReadId { line: usize, value: String },
    #[error("Line {line}: invalid position '{value}'")]
    InvalidPosition { line: usize, value: String },
}

/// Errors raised while scoring an alignment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("Alignment line {line}: read id {id} does not exist in the ground truth")]
    UnknownRead { id: usize, line: usize },
}

/// Errors raised while verifying read records.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },
}
