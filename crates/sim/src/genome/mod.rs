//! Derived genomes: applying a mutation profile to a reference.

mod derive;
mod sink;

pub use derive::{DerivedGenome, GenomeDeriver, SiteOutcome};
pub use sink::{FastaSink, GenomeSink, MemorySink};
