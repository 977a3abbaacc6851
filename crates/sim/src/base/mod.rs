//! Base types for sequence representation.
//!
//! This module provides the foundational types for representing nucleotides,
//! sequences and FASTA references in the mutabench library.

mod nucleotide;
mod reference;
mod sequence;

pub use nucleotide::Nucleotide;
pub use reference::Reference;
pub use sequence::Sequence;
