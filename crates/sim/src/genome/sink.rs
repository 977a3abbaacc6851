//! Destinations for derived genomes.

use crate::errors::SinkError;
use crate::genome::DerivedGenome;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Receives derived genomes in index order.
pub trait GenomeSink {
    /// Consume one genome.
    fn write_genome(&mut self, genome: &DerivedGenome) -> Result<(), SinkError>;

    /// Called once after the last genome. Flushes buffered output.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: GenomeSink + ?Sized> GenomeSink for &mut S {
    fn write_genome(&mut self, genome: &DerivedGenome) -> Result<(), SinkError> {
        (**self).write_genome(genome)
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        (**self).finish()
    }
}

/// Writes genomes as multi-record FASTA.
///
/// Each record is a header `>{index + 1}.{description}` followed by the
/// whole sequence on a single line.
pub struct FastaSink<W: Write> {
    writer: W,
    description: String,
    debug: bool,
}

impl FastaSink<BufWriter<File>> {
    /// Create (or truncate) `path` and write genomes to it.
    pub fn create(
        path: impl AsRef<Path>,
        description: impl Into<String>,
        debug: bool,
    ) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file), description, debug))
    }
}

impl<W: Write> FastaSink<W> {
    /// Wrap a writer. With `debug`, injected symbols are written lower-case.
    pub fn new(writer: W, description: impl Into<String>, debug: bool) -> Self {
        Self {
            writer,
            description: description.into(),
            debug,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> GenomeSink for FastaSink<W> {
    fn write_genome(&mut self, genome: &DerivedGenome) -> Result<(), SinkError> {
        writeln!(self.writer, ">{}.{}", genome.index() + 1, self.description)?;
        self.writer.write_all(&genome.render(self.debug))?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps every genome in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    genomes: Vec<DerivedGenome>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn genomes(&self) -> &[DerivedGenome] {
        &self.genomes
    }

    pub fn into_genomes(self) -> Vec<DerivedGenome> {
        self.genomes
    }
}

impl GenomeSink for MemorySink {
    fn write_genome(&mut self, genome: &DerivedGenome) -> Result<(), SinkError> {
        self.genomes.push(genome.clone());
        Ok(())
    }
}
