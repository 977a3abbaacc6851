//! Reading reference genomes from FASTA text.
//!
//! A record is a `>` description line followed by one or more sequence lines
//! over `A`, `C`, `G`, `T` and the ambiguity code `N`. Letters are normalized
//! to uppercase. Any other symbol, or text before the first header, is fatal.

use super::Sequence;
use crate::errors::ReferenceError;
use std::fs;
use std::path::Path;

/// A named reference sequence as read from FASTA.
///
/// The raw bases may still contain `N`; call [`Reference::to_sequence`] to get
/// a `Sequence` suitable for mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    description: String,
    bases: Vec<u8>,
}

impl Reference {
    /// Build a reference from a description and uppercase raw bases.
    pub fn new(description: impl Into<String>, bases: Vec<u8>) -> Self {
        Self {
            description: description.into(),
            bases,
        }
    }

    /// Read a single-record FASTA file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse FASTA text holding exactly one record.
    pub fn parse(text: &str) -> Result<Self, ReferenceError> {
        let mut records = Self::parse_all(text)?;
        if records.len() > 1 {
            return Err(ReferenceError::MultipleRecords(records.len()));
        }
        Ok(records.swap_remove(0))
    }

    /// Read every record of a FASTA file.
    pub fn from_path_all(path: impl AsRef<Path>) -> Result<Vec<Self>, ReferenceError> {
        let text = fs::read_to_string(path)?;
        Self::parse_all(&text)
    }

    /// Parse every record of FASTA text. At least one record is required.
    pub fn parse_all(text: &str) -> Result<Vec<Self>, ReferenceError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let first = match lines.next() {
            Some((_, line)) => line,
            None => return Err(ReferenceError::MissingHeader),
        };
        let mut current = match first.strip_prefix('>') {
            Some(header) => Reference::new(header.trim(), Vec::new()),
            None => return Err(ReferenceError::MissingHeader),
        };

        let mut records = Vec::new();
        for (line_no, line) in lines {
            if let Some(header) = line.strip_prefix('>') {
                let done = std::mem::replace(&mut current, Reference::new(header.trim(), Vec::new()));
                records.push(done.checked()?);
                continue;
            }
            for &b in line.as_bytes() {
                let upper = b.to_ascii_uppercase();
                if !matches!(upper, b'A' | b'C' | b'G' | b'T' | b'N') {
                    return Err(ReferenceError::InvalidSymbol {
                        line: line_no,
                        ch: b as char,
                    });
                }
                current.bases.push(upper);
            }
        }
        records.push(current.checked()?);
        Ok(records)
    }

    fn checked(self) -> Result<Self, ReferenceError> {
        if self.bases.is_empty() {
            Err(ReferenceError::EmptySequence)
        } else {
            Ok(self)
        }
    }

    /// Free-form description from the header line, without the leading `>`.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Uppercase raw bases (may contain `N`).
    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Number of `N` bases in the record.
    pub fn ambiguous_count(&self) -> usize {
        self.bases.iter().filter(|&&b| b == b'N').count()
    }

    /// Convert to a concrete `Sequence`. Fails on the first `N`.
    pub fn to_sequence(&self) -> Result<Sequence, ReferenceError> {
        Ok(Sequence::from_ascii(&self.bases)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InvalidSequence;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_simple() {
        let r = Reference::parse(">chr1 test genome\nACGT\nacgt\n").unwrap();
        assert_eq!(r.description(), "chr1 test genome");
        assert_eq!(r.bases(), b"ACGTACGT");
        assert_eq!(r.to_sequence().unwrap().to_string(), "ACGTACGT");
    }

    #[test]
    fn test_parse_skips_blank_lines_and_crlf() {
        let r = Reference::parse(">x\r\nAC\r\n\r\nGT\r\n").unwrap();
        assert_eq!(r.bases(), b"ACGT");
    }

    #[test]
    fn test_parse_missing_header() {
        let err = Reference::parse("ACGT\n").unwrap_err();
        assert!(matches!(err, ReferenceError::MissingHeader));
        assert!(matches!(
            Reference::parse("").unwrap_err(),
            ReferenceError::MissingHeader
        ));
    }

    #[test]
    fn test_parse_invalid_symbol() {
        let err = Reference::parse(">x\nACGT\nACXT\n").unwrap_err();
        match err {
            ReferenceError::InvalidSymbol { line, ch } => {
                assert_eq!(line, 3);
                assert_eq!(ch, 'X');
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_n_is_accepted_but_not_mutable() {
        let r = Reference::parse(">x\nACNNT\n").unwrap();
        assert_eq!(r.ambiguous_count(), 2);
        let err = r.to_sequence().unwrap_err();
        assert!(matches!(
            err,
            ReferenceError::Sequence(InvalidSequence::AmbiguousBase { position: 2 })
        ));
    }

    #[test]
    fn test_parse_all_records() {
        let records = Reference::parse_all(">1.g\nAAAA\n>2.g\nCCCC\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].description(), "2.g");
        assert_eq!(records[1].bases(), b"CCCC");
    }

    #[test]
    fn test_parse_rejects_multiple_records() {
        let err = Reference::parse(">a\nACGT\n>b\nTTTT\n").unwrap_err();
        assert!(matches!(err, ReferenceError::MultipleRecords(2)));
    }

    #[test]
    fn test_parse_empty_record() {
        let err = Reference::parse_all(">1\n>2\nACGT\n").unwrap_err();
        assert!(matches!(err, ReferenceError::EmptySequence));
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">ref").unwrap();
        writeln!(file, "GATTACA").unwrap();
        let r = Reference::from_path(file.path()).unwrap();
        assert_eq!(r.len(), 7);

        writeln!(file, ">second").unwrap();
        writeln!(file, "CC").unwrap();
        assert!(matches!(
            Reference::from_path(file.path()).unwrap_err(),
            ReferenceError::MultipleRecords(2)
        ));
        let all = Reference::from_path_all(file.path()).unwrap();
        assert_eq!(all[1].bases(), b"CC");
    }
}
