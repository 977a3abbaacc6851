//! Re-checking read records against the genome they were cut from.
//!
//! For every listed position, a base flagged as an error must differ from
//! the genome and every other base must match it. Genome `N` bases are
//! skipped.

use crate::errors::VerifyError;
use mutabench_sim::reads::ReadRecord;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// The read holds a symbol outside `ACGTN`
    InvalidSymbol { offset: usize, symbol: u8 },
    /// The read window starting at `position` runs past the genome end
    PastEnd { position: usize },
    /// An error offset lies outside the read
    ErrorOffsetOutOfRange { offset: usize },
    /// A flagged error base equals the genome
    ErrorMatches { position: usize, offset: usize },
    /// An unflagged base differs from the genome
    Mismatch { position: usize, offset: usize },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSymbol { offset, symbol } => {
                write!(f, "invalid symbol '{}' at offset {offset}", *symbol as char)
            }
            Self::PastEnd { position } => {
                write!(f, "window at {position} runs past the genome end")
            }
            Self::ErrorOffsetOutOfRange { offset } => {
                write!(f, "error offset {offset} lies outside the read")
            }
            Self::ErrorMatches { position, offset } => write!(
                f,
                "offset {offset} is flagged as an error but matches the genome at {position}"
            ),
            Self::Mismatch { position, offset } => write!(
                f,
                "offset {offset} differs from the genome at {position} without an error flag"
            ),
        }
    }
}

/// An issue found on one line of the record file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIssue {
    pub line: usize,
    pub issue: Issue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub reads: usize,
    pub genome_len: usize,
    pub issues: Vec<LineIssue>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check one record against `genome`.
pub fn verify_record(genome: &[u8], record: &ReadRecord) -> Vec<Issue> {
    let mut issues = Vec::new();
    let n = record.len();

    for (offset, &symbol) in record.bases.iter().enumerate() {
        if !b"ACGTN".contains(&symbol.to_ascii_uppercase()) {
            issues.push(Issue::InvalidSymbol { offset, symbol });
            break;
        }
    }
    for &offset in &record.errors {
        if offset >= n {
            issues.push(Issue::ErrorOffsetOutOfRange { offset });
        }
    }

    for &position in &record.positions {
        let Some(window) = genome.get(position..position + n) else {
            issues.push(Issue::PastEnd { position });
            continue;
        };
        for (offset, (&r, &g)) in record.bases.iter().zip(window).enumerate() {
            if g == b'N' {
                continue;
            }
            let same = r.eq_ignore_ascii_case(&g);
            match (record.is_error(offset), same) {
                (true, true) => issues.push(Issue::ErrorMatches { position, offset }),
                (false, false) => issues.push(Issue::Mismatch { position, offset }),
                _ => {}
            }
        }
    }
    issues
}

/// Parse and check every non-blank line of read-record text.
pub fn verify_records(genome: &[u8], text: &str) -> Result<VerifyReport, VerifyError> {
    let mut report = VerifyReport {
        genome_len: genome.len(),
        ..VerifyReport::default()
    };
    for (i, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        let line = i + 1;
        let record: ReadRecord = raw
            .parse()
            .map_err(|source| VerifyError::Record { line, source })?;
        for issue in verify_record(genome, &record) {
            log::debug!("line {line}: {issue}");
            report.issues.push(LineIssue { line, issue });
        }
        report.reads += 1;
    }
    Ok(report)
}

/// Like [`verify_records`], reading the records from `path`.
pub fn verify_file(genome: &[u8], path: impl AsRef<Path>) -> Result<VerifyReport, VerifyError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| VerifyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    verify_records(genome, &text)
}
