use super::database::Item;
use crate::error::Result;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A periodic high-utility itemset as handed to a sink. Items are in mining
/// order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phui<'a> {
    pub items: &'a [Item],
    pub utility: u64,
    pub support: usize,
    pub smallest_periodicity: usize,
    pub largest_periodicity: usize,
    pub average_periodicity: f64,
}

/// Receives each itemset as soon as it is found. An error aborts the run.
pub trait PhuiSink {
    fn accept(&mut self, phui: &Phui<'_>) -> Result<()>;

    /// Called once after the last itemset.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: PhuiSink + ?Sized> PhuiSink for &mut S {
    fn accept(&mut self, phui: &Phui<'_>) -> Result<()> {
        (**self).accept(phui)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Writes one line per itemset:
/// `1 2 #UTIL: 27 #SUP: 3 #MINPER: 1 #MAXPER: 3 #AVGPER: 1.25`.
pub struct WriterSink<W: Write> {
    writer: W,
    line: String,
}

impl WriterSink<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            line: String::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PhuiSink for WriterSink<W> {
    fn accept(&mut self, phui: &Phui<'_>) -> Result<()> {
        self.line.clear();
        for item in phui.items {
            // Writing into a String cannot fail.
            let _ = write!(self.line, "{item} ");
        }
        let _ = writeln!(
            self.line,
            "#UTIL: {} #SUP: {} #MINPER: {} #MAXPER: {} #AVGPER: {}",
            phui.utility,
            phui.support,
            phui.smallest_periodicity,
            phui.largest_periodicity,
            phui.average_periodicity
        );
        self.writer.write_all(self.line.as_bytes())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
