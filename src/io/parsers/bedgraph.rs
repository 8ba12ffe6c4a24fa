//! bedGraph: `chromosome start stop score`, tab-separated.
//!
//! Zero-score windows are dropped at parse time, since a bin list treats
//! uncovered positions as zero anyway.

use crate::error::GenPlayError;
use crate::ranges::{validate_range, WindowColumns};

use super::utils::{parse_column, parse_position, split_tabs};
use super::{ExtractionContext, LineOutcome, LineParser};

/// Parser for bedGraph lines.
#[derive(Debug)]
pub struct BedGraphParser {
    windows: WindowColumns,
}

impl BedGraphParser {
    pub fn new(chromosome_count: usize) -> Self {
        Self {
            windows: WindowColumns::new(chromosome_count),
        }
    }
}

impl LineParser for BedGraphParser {
    type Output = WindowColumns;

    fn parse_line(
        &mut self,
        line: &str,
        context: &ExtractionContext,
    ) -> Result<LineOutcome, GenPlayError> {
        let fields = split_tabs(line);
        if fields.len() < 4 {
            return Err(GenPlayError::MalformedLine(line.to_string()));
        }
        let chromosome = extract_chromosome!(context, fields[0]);
        let start = parse_position(fields[1], line)?;
        let stop = parse_position(fields[2], line)?;
        validate_range(start, stop, line)?;
        let score: f64 = parse_column(fields[3], line)?;
        if score == 0.0 {
            return Ok(LineOutcome::SkippedFiltered);
        }
        self.windows.push(chromosome.index, start, stop, score);
        Ok(LineOutcome::Appended)
    }

    fn chromosome_count(&self) -> usize {
        self.windows.chromosome_count()
    }

    fn finish(self) -> Self::Output {
        self.windows
    }
}
