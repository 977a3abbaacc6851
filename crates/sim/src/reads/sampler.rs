//! Sampling fixed-length reads with substitution errors from a genome.

use crate::base::Nucleotide;
use crate::config::ReadConfig;
use crate::errors::ReadError;
use crate::reads::ReadRecord;
use rand::Rng;
use std::io::{self, Write};

/// One read cut from a genome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledRead {
    id: usize,
    bases: Vec<u8>,
    origin: usize,
    positions: Vec<usize>,
    errors: Vec<usize>,
}

impl SampledRead {
    /// 0-based read id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Read bases, uppercase, errors included.
    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    /// Offset in the genome the read was cut from.
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Exclusive end of the source window.
    pub fn end(&self) -> usize {
        self.origin + self.bases.len()
    }

    /// Every genome offset where the error-free template occurs. Always
    /// contains `origin`.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Offsets within the read that carry an injected error, ascending.
    pub fn errors(&self) -> &[usize] {
        &self.errors
    }

    /// The read with error bases lower-cased when `debug` is set.
    pub fn render(&self, debug: bool) -> Vec<u8> {
        let mut out = self.bases.clone();
        if debug {
            for &e in &self.errors {
                out[e] = out[e].to_ascii_lowercase();
            }
        }
        out
    }

    pub fn to_record(&self) -> ReadRecord {
        ReadRecord::new(self.bases.clone(), self.positions.clone(), self.errors.clone())
    }
}

/// Every offset at which `template` occurs in `genome`, overlaps included.
pub fn find_occurrences(genome: &[u8], template: &[u8]) -> Vec<usize> {
    if template.is_empty() || template.len() > genome.len() {
        return Vec::new();
    }
    genome
        .windows(template.len())
        .enumerate()
        .filter(|(_, w)| *w == template)
        .map(|(i, _)| i)
        .collect()
}

/// Cuts reads of a fixed length at uniform offsets.
#[derive(Debug, Clone)]
pub struct ReadSampler {
    config: ReadConfig,
}

impl ReadSampler {
    pub fn new(config: ReadConfig) -> Result<Self, ReadError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReadConfig {
        &self.config
    }

    /// Sample read `id` from `genome` (uppercase ASCII).
    pub fn sample_one<R: Rng + ?Sized>(
        &self,
        genome: &[u8],
        id: usize,
        rng: &mut R,
    ) -> Result<SampledRead, ReadError> {
        let length = self.config.length;
        if genome.len() < length {
            return Err(ReadError::GenomeTooShort {
                genome: genome.len(),
                read: length,
            });
        }

        let origin = rng.random_range(0..=genome.len() - length);
        let template = &genome[origin..origin + length];
        let positions = find_occurrences(genome, template);

        let mut bases = template.to_vec();
        let mut errors = Vec::new();
        for (k, base) in bases.iter_mut().enumerate() {
            if rng.random::<f64>() < self.config.error_rate {
                *base = match Nucleotide::from_ascii(*base) {
                    Some(n) => n.random_other(rng),
                    // N: any base differs
                    None => Nucleotide::random(rng),
                }
                .to_ascii();
                errors.push(k);
            }
        }

        Ok(SampledRead {
            id,
            bases,
            origin,
            positions,
            errors,
        })
    }

    /// Sample `count` reads with ids `0..count`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        genome: &[u8],
        rng: &mut R,
    ) -> Result<Vec<SampledRead>, ReadError> {
        let reads = (0..self.config.count)
            .map(|id| self.sample_one(genome, id, rng))
            .collect::<Result<Vec<_>, _>>()?;
        let errors: usize = reads.iter().map(|r| r.errors.len()).sum();
        log::info!(
            "Sampled {} reads of length {} ({} injected errors)",
            reads.len(),
            self.config.length,
            errors
        );
        Ok(reads)
    }
}

/// Write reads as FASTA: `>r{id+1} {start}:{end} {description}`.
pub fn write_reads_fasta<W: Write + ?Sized>(
    reads: &[SampledRead],
    description: &str,
    debug: bool,
    out: &mut W,
) -> io::Result<()> {
    for read in reads {
        writeln!(
            out,
            ">r{} {}:{} {}",
            read.id + 1,
            read.origin,
            read.end(),
            description
        )?;
        out.write_all(&read.render(debug))?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Write the ground-truth mapping: `{bases}\t{space separated positions}`.
pub fn write_truth<W: Write + ?Sized>(reads: &[SampledRead], out: &mut W) -> io::Result<()> {
    for read in reads {
        let positions: Vec<String> = read.positions.iter().map(|p| p.to_string()).collect();
        out.write_all(&read.bases)?;
        writeln!(out, "\t{}", positions.join(" "))?;
    }
    Ok(())
}

/// Write one read-record line per read.
pub fn write_records<W: Write + ?Sized>(reads: &[SampledRead], out: &mut W) -> io::Result<()> {
    for read in reads {
        writeln!(out, "{}", read.to_record())?;
    }
    Ok(())
}
