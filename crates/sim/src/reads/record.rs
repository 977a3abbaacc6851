//! The read-record line format.
//!
//! ```text
//! R N p1 .. pN E q1 .. qE
//! ```
//!
//! `R` is the read, `N` the number of positions at which its error-free
//! template occurs in the genome, followed by those positions, then `E` the
//! number of injected errors followed by their offsets within the read.

use crate::errors::RecordError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRecord {
    pub bases: Vec<u8>,
    pub positions: Vec<usize>,
    pub errors: Vec<usize>,
}

impl ReadRecord {
    pub fn new(bases: Vec<u8>, positions: Vec<usize>, errors: Vec<usize>) -> Self {
        Self {
            bases,
            positions,
            errors,
        }
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Whether offset `i` of the read carries an injected error.
    pub fn is_error(&self, i: usize) -> bool {
        self.errors.contains(&i)
    }
}

impl fmt::Display for ReadRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", String::from_utf8_lossy(&self.bases), self.positions.len())?;
        for p in &self.positions {
            write!(f, " {p}")?;
        }
        write!(f, " {}", self.errors.len())?;
        for q in &self.errors {
            write!(f, " {q}")?;
        }
        Ok(())
    }
}

fn parse_count<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<usize, RecordError> {
    let field = fields.next().ok_or(RecordError::MissingField(name))?;
    field
        .parse()
        .map_err(|_| RecordError::InvalidInteger(field.to_string()))
}

impl FromStr for ReadRecord {
    type Err = RecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.split_whitespace();
        let bases = fields
            .next()
            .ok_or(RecordError::MissingField("read"))?
            .as_bytes()
            .to_vec();

        let n = parse_count(&mut fields, "occurrence count")?;
        let positions = (0..n)
            .map(|_| parse_count(&mut fields, "occurrence position"))
            .collect::<Result<Vec<_>, _>>()?;

        let e = parse_count(&mut fields, "error count")?;
        let errors = (0..e)
            .map(|_| parse_count(&mut fields, "error offset"))
            .collect::<Result<Vec<_>, _>>()?;

        let rest = fields.count();
        if rest > 0 {
            return Err(RecordError::TrailingFields(rest));
        }

        Ok(Self {
            bases,
            positions,
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let rec: ReadRecord = "ACGTTA 1 25 2 1 4".parse().unwrap();
        assert_eq!(rec.bases, b"ACGTTA");
        assert_eq!(rec.positions, vec![25]);
        assert_eq!(rec.errors, vec![1, 4]);
        assert!(rec.is_error(4));
        assert!(!rec.is_error(0));
    }

    #[test]
    fn test_parse_tolerates_trailing_space() {
        let rec: ReadRecord = "ACG 2 0 7 0 ".parse().unwrap();
        assert_eq!(rec.positions, vec![0, 7]);
        assert!(rec.errors.is_empty());
    }

    #[test]
    fn test_display_matches_parse() {
        let rec = ReadRecord::new(b"GATTACA".to_vec(), vec![3, 40], vec![6]);
        let line = rec.to_string();
        assert_eq!(line, "GATTACA 2 3 40 1 6");
        assert_eq!(line.parse::<ReadRecord>().unwrap(), rec);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "".parse::<ReadRecord>().unwrap_err(),
            RecordError::MissingField("read")
        );
        assert_eq!(
            "ACG 2 5".parse::<ReadRecord>().unwrap_err(),
            RecordError::MissingField("occurrence position")
        );
        assert_eq!(
            "ACG x".parse::<ReadRecord>().unwrap_err(),
            RecordError::InvalidInteger("x".into())
        );
        assert_eq!(
            "ACG 0 0 9".parse::<ReadRecord>().unwrap_err(),
            RecordError::TrailingFields(1)
        );
    }
}
