//! Read sampling and the read-record format.

mod record;
mod sampler;

pub use record::ReadRecord;
pub use sampler::{
    find_occurrences, write_reads_fasta, write_records, write_truth, ReadSampler, SampledRead,
};
