//! Read-to-positions mapping files.
//!
//! Each line is `<first column>\t<space-separated positions>`. Lines without
//! a tab are skipped. In a ground-truth file the first column is a free-text
//! label and the read id is the 0-based ordinal of the accepted line; in an
//! alignment file the first column is the integer read id.

use crate::errors::ParseError;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub type Position = u64;

/// Split accepted lines into `(line number, first column, positions)`.
fn mapping_lines(
    text: &str,
) -> impl Iterator<Item = Result<(usize, &str, BTreeSet<Position>), ParseError>> + '_ {
    text.lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let line = raw.trim();
            line.split_once('\t').map(|(first, rest)| (i + 1, first, rest))
        })
        .map(|(line, first, rest)| {
            let positions = rest
                .split_whitespace()
                .map(|p| {
                    p.parse::<Position>().map_err(|_| ParseError::InvalidPosition {
                        line,
                        value: p.to_string(),
                    })
                })
                .collect::<Result<BTreeSet<_>, _>>()?;
            Ok((line, first, positions))
        })
}

fn read_file(path: &Path) -> Result<String, ParseError> {
    fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// One ground-truth read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthEntry {
    pub label: String,
    pub positions: BTreeSet<Position>,
}

/// Ground truth: read id to the set of positions the read came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundTruth {
    entries: Vec<TruthEntry>,
}

impl GroundTruth {
    /// Parse ground-truth text. Lines with no positions are skipped and do
    /// not consume an id.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut entries = Vec::new();
        for item in mapping_lines(text) {
            let (_, label, positions) = item?;
            if positions.is_empty() {
                continue;
            }
            entries.push(TruthEntry {
                label: label.to_string(),
                positions,
            });
        }
        log::debug!("Loaded ground truth for {} reads", entries.len());
        Ok(Self { entries })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        Self::parse(&read_file(path.as_ref())?)
    }

    pub fn from_entries(entries: Vec<TruthEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, id: usize) -> Option<&TruthEntry> {
        self.entries.get(id)
    }

    pub fn entries(&self) -> &[TruthEntry] {
        &self.entries
    }

    /// Number of reads.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of ground-truth positions over all reads.
    pub fn total_positions(&self) -> usize {
        self.entries.iter().map(|e| e.positions.len()).sum()
    }
}

/// One line of aligner output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedRead {
    pub id: usize,
    /// Line number in the source file.
    pub line: usize,
    pub positions: BTreeSet<Position>,
}

/// Aligner output in file order. A read id may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    reads: Vec<AlignedRead>,
}

impl Alignment {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut reads = Vec::new();
        for item in mapping_lines(text) {
            let (line, first, positions) = item?;
            let id = first.trim().parse().map_err(|_| ParseError::InvalidReadId {
                line,
                value: first.to_string(),
            })?;
            reads.push(AlignedRead {
                id,
                line,
                positions,
            });
        }
        Ok(Self { reads })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        Self::parse(&read_file(path.as_ref())?)
    }

    pub fn from_reads(reads: Vec<AlignedRead>) -> Self {
        Self { reads }
    }

    pub fn reads(&self) -> &[AlignedRead] {
        &self.reads
    }

    pub fn len(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_truth_ids_are_ordinals() {
        let text = "ACGT\t10 20\nheader line without tab\nGGCC\t\nTTAA\t5 5 7\n";
        let truth = GroundTruth::parse(text).unwrap();
        assert_eq!(truth.len(), 2);
        assert_eq!(truth.get(0).unwrap().label, "ACGT");
        assert_eq!(truth.get(1).unwrap().label, "TTAA");
        // Duplicates collapse
        assert_eq!(
            truth.get(1).unwrap().positions.iter().copied().collect::<Vec<_>>(),
            vec![5, 7]
        );
        assert_eq!(truth.total_positions(), 4);
        assert!(truth.get(2).is_none());
    }

    #[test]
    fn test_ground_truth_bad_position() {
        let err = GroundTruth::parse("A\t1 2\nB\t3 x\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidPosition { line: 2, ref value } if value == "x"
        ));
    }

    #[test]
    fn test_negative_position_rejected() {
        assert!(GroundTruth::parse("A\t-3\n").is_err());
    }

    #[test]
    fn test_alignment_parse() {
        // A trailing tab is trimmed away, so "3\t" has no mapping
        let aln = Alignment::parse("0\t12 14\n\n3\t\n0\t99\n").unwrap();
        assert_eq!(aln.len(), 2);
        assert_eq!(aln.reads()[0].id, 0);
        assert_eq!(aln.reads()[0].line, 1);
        assert_eq!(aln.reads()[1].line, 4);
        assert!(aln.reads()[1].positions.contains(&99));
    }

    #[test]
    fn test_alignment_bad_id() {
        let err = Alignment::parse("r1\t12\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidReadId { line: 1, .. }));
    }

    #[test]
    fn test_from_path() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ACGT\t1 2 3").unwrap();
        let truth = GroundTruth::from_path(file.path()).unwrap();
        assert_eq!(truth.total_positions(), 3);

        let missing = GroundTruth::from_path("/nonexistent/truth.tsv").unwrap_err();
        assert!(matches!(missing, ParseError::Io { .. }));
    }
}
