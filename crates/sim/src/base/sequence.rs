use super::Nucleotide;
use crate::errors::InvalidSequence;
use std::fmt;
use std::str::FromStr;

/// Owned biological sequence backed by a vector of Nucleotides.
///
/// The reference genome is held as a `Sequence` and borrowed read-only by the
/// deriver; every derived genome owns an independent `Sequence`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Sequence(Vec<Nucleotide>);

impl Sequence {
    /// Create a new, empty `Sequence`.
    ///
    /// ```rust
    /// # use mutabench_sim::base::Sequence;
    /// let seq = Sequence::new();
    /// assert_eq!(seq.len(), 0);
    /// ```
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a `Sequence` with reserved capacity for `capacity` bases.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Parse raw ASCII bytes, case-insensitively.
    ///
    /// `N` is reported as `AmbiguousBase` so callers can tell an ambiguity
    /// code apart from garbage input.
    pub fn from_ascii(bytes: &[u8]) -> Result<Self, InvalidSequence> {
        bytes
            .iter()
            .enumerate()
            .map(|(position, &b)| match Nucleotide::from_ascii(b) {
                Some(n) => Ok(n),
                None if b.eq_ignore_ascii_case(&b'N') => {
                    Err(InvalidSequence::AmbiguousBase { position })
                }
                None => Err(InvalidSequence::InvalidChar {
                    position,
                    ch: b as char,
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Return the length of the sequence in bases.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` if the sequence contains no bases.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the `Nucleotide` at `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Nucleotide> {
        self.0.get(index).copied()
    }

    /// Borrow the underlying `Nucleotide` slice.
    #[inline]
    pub fn as_slice(&self) -> &[Nucleotide] {
        &self.0
    }

    /// Append `base` to the end of the sequence.
    #[inline]
    pub fn push(&mut self, base: Nucleotide) {
        self.0.push(base);
    }

    /// Append every base of `bases`.
    #[inline]
    pub fn extend_from_slice(&mut self, bases: &[Nucleotide]) {
        self.0.extend_from_slice(bases);
    }

    /// Uppercase ASCII rendering of the sequence.
    pub fn to_ascii(&self) -> Vec<u8> {
        self.0.iter().map(|n| n.to_ascii()).collect()
    }
}

impl From<Vec<Nucleotide>> for Sequence {
    fn from(nucleotides: Vec<Nucleotide>) -> Self {
        Self(nucleotides)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &nuc in &self.0 {
            write!(f, "{}", nuc.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Sequence {
    type Err = InvalidSequence;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ascii(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_from_str() {
        let seq = Sequence::from_str("acgT").unwrap();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.to_string(), "ACGT");
    }

    #[test]
    fn test_sequence_rejects_ambiguous_base() {
        let err = Sequence::from_str("ACNT").unwrap_err();
        assert_eq!(err, InvalidSequence::AmbiguousBase { position: 2 });
    }

    #[test]
    fn test_sequence_rejects_garbage() {
        let err = Sequence::from_str("AC-T").unwrap_err();
        assert_eq!(
            err,
            InvalidSequence::InvalidChar {
                position: 2,
                ch: '-'
            }
        );
    }

    #[test]
    fn test_sequence_get() {
        let seq = Sequence::from_str("AGAA").unwrap();
        assert_eq!(seq.get(1), Some(Nucleotide::G));
        assert_eq!(seq.get(4), None);
    }

    #[test]
    fn test_sequence_to_ascii() {
        let seq = Sequence::from_str("GATTACA").unwrap();
        assert_eq!(seq.to_ascii(), b"GATTACA".to_vec());
    }
}
