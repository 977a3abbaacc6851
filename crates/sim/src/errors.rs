use std::error;
use std::fmt;
use std::io;

/// Error type for failures when constructing a `Sequence`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidSequence {
    /// A character was not recognized as a valid nucleotide.
    InvalidChar { position: usize, ch: char },

    /// An ambiguity code (`N`) was found where a concrete base is required.
    AmbiguousBase { position: usize },
}

impl fmt::Display for InvalidSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { position, ch } => {
                write!(f, "Invalid character '{ch}' at position {position}")
            }
            Self::AmbiguousBase { position } => write!(
                f,
                "Ambiguous base 'N' at position {position} (mutation requires A, C, G or T)"
            ),
        }
    }
}

impl error::Error for InvalidSequence {}

/// Errors raised while reading a reference genome in FASTA format.
#[derive(Debug)]
pub enum ReferenceError {
    /// IO error
    Io(io::Error),
    /// The first line is not a `>` description line.
    MissingHeader,
    /// A sequence line contains something other than A, C, G, T or N.
    InvalidSymbol { line: usize, ch: char },
    /// No sequence lines follow the header.
    EmptySequence,
    /// A single genome was expected but the text holds this many records.
    MultipleRecords(usize),
    /// The raw text could not be turned into a mutable sequence.
    Sequence(InvalidSequence),
}

impl fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::MissingHeader => {
                write!(f, "Invalid FASTA format: first line must be a description starting with '>'")
            }
            Self::InvalidSymbol { line, ch } => write!(
                f,
                "Content is not a valid DNA sequence: '{ch}' on line {line} (allowed: A, C, G, T, N)"
            ),
            Self::EmptySequence => write!(f, "FASTA record contains no sequence"),
            Self::MultipleRecords(n) => {
                write!(f, "Expected a single FASTA record, found {n}")
            }
            Self::Sequence(e) => write!(f, "Invalid reference sequence: {e}"),
        }
    }
}

impl error::Error for ReferenceError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Sequence(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReferenceError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<InvalidSequence> for ReferenceError {
    fn from(e: InvalidSequence) -> Self {
        Self::Sequence(e)
    }
}

/// Errors that can occur while building a mutation profile.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// Mutation rate is negative or not finite
    InvalidMutationRate(f64),
    /// A probability parameter lies outside [0, 1]
    InvalidProbability(&'static str, f64),
    /// The population size must be at least one
    EmptyPopulation,
    /// A site's alleles and frequency table do not fit together
    InvalidSite {
        position: usize,
        reason: &'static str,
    },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMutationRate(rate) => {
                write!(f, "Invalid mutation rate: {rate} (must be finite and >= 0.0)")
            }
            Self::InvalidProbability(name, val) => {
                write!(f, "Invalid probability for {name}: {val} (must be between 0.0 and 1.0)")
            }
            Self::EmptyPopulation => write!(f, "Population size must be at least 1"),
            Self::InvalidSite { position, reason } => {
                write!(f, "Invalid mutation site at position {position}: {reason}")
            }
        }
    }
}

impl error::Error for ProfileError {}

/// Errors that can occur while deriving genomes from a profile.
#[derive(Debug, Clone, PartialEq)]
pub enum DerivationError {
    /// A probability parameter lies outside its valid range
    InvalidProbability(&'static str, f64),
    /// A profile site points past the end of the reference
    SiteOutOfBounds { position: usize, length: usize },
}

impl fmt::Display for DerivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProbability(name, val) => {
                write!(f, "Invalid probability for {name}: {val}")
            }
            Self::SiteOutOfBounds { position, length } => write!(
                f,
                "Mutation site {position} is outside the reference (length {length})"
            ),
        }
    }
}

impl error::Error for DerivationError {}

/// Errors that can occur while sampling reads.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadError {
    /// Error rate outside [0, 1]
    InvalidErrorRate(f64),
    /// Reads must contain at least one base
    ZeroLength,
    /// The genome is shorter than a single read
    GenomeTooShort { genome: usize, read: usize },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidErrorRate(rate) => {
                write!(f, "Invalid error rate: {rate} (must be between 0.0 and 1.0)")
            }
            Self::ZeroLength => write!(f, "Read length must be at least 1"),
            Self::GenomeTooShort { genome, read } => write!(
                f,
                "Genome of length {genome} is shorter than the read length {read}"
            ),
        }
    }
}

impl error::Error for ReadError {}

/// Errors raised while parsing a read-record line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The line ended before the named field
    MissingField(&'static str),
    /// A count or offset is not a non-negative integer
    InvalidInteger(String),
    /// Extra fields after the last error offset
    TrailingFields(usize),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(name) => write!(f, "Missing field: {name}"),
            Self::InvalidInteger(s) => write!(f, "Invalid integer '{s}'"),
            Self::TrailingFields(n) => write!(f, "{n} unexpected trailing field(s)"),
        }
    }
}

impl error::Error for RecordError {}

/// Errors raised by a `GenomeSink` while writing output.
#[derive(Debug)]
pub enum SinkError {
    Io(io::Error),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Failed to write genome: {e}"),
        }
    }
}

impl error::Error for SinkError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Errors raised while loading or validating a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error
    Io(io::Error),
    /// Parse error
    Parse(String),
    /// Validation error
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Parse(msg) => write!(f, "Parse error: {msg}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(format!("JSON error: {e}"))
    }
}

impl From<ProfileError> for ConfigError {
    fn from(e: ProfileError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<DerivationError> for ConfigError {
    fn from(e: DerivationError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<ReadError> for ConfigError {
    fn from(e: ReadError) -> Self {
        Self::Validation(e.to_string())
    }
}
