//! Types for standardized reports to the user about extraction.
//!
//! The scan loop never aborts on a bad data line: it tallies it here, and the
//! caller decides what to tell the user.
//!

use std::fmt;

/// The [`Extraction<U>`] type is generic over the value extracted from a file,
/// and an [`ExtractionReport`] describing how each line was handled.
#[derive(Debug)]
pub struct Extraction<U> {
    pub value: U,
    pub report: ExtractionReport,
}

impl<U> Extraction<U> {
    pub fn new(value: U, report: ExtractionReport) -> Self {
        Self { value, report }
    }

    /// Convert the extracted value, keeping the report.
    pub fn map<V, F: FnOnce(U) -> V>(self, f: F) -> Extraction<V> {
        Extraction {
            value: f(self.value),
            report: self.report,
        }
    }
}

/// Per-outcome line counts of one extraction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Lines read, including the line that ended the extraction early.
    pub lines: usize,
    pub appended: usize,
    pub not_data: usize,
    pub filtered: usize,
    pub malformed: usize,
    pub unknown_chromosome: usize,
    /// Whether the scan stopped before the end of the input, because all
    /// selected chromosomes were extracted.
    pub stopped_early: bool,
}

impl ExtractionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of rejected lines.
    pub fn rejected(&self) -> usize {
        self.malformed + self.unknown_chromosome
    }
}

impl fmt::Display for ExtractionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines: {} extracted, {} not data, {} filtered, {} malformed, {} unknown chromosome",
            self.lines,
            self.appended,
            self.not_data,
            self.filtered,
            self.malformed,
            self.unknown_chromosome
        )?;
        if self.stopped_early {
            write!(f, " (stopped after the last selected chromosome)")?;
        }
        Ok(())
    }
}
