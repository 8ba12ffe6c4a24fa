//! SAM alignments: only the reference name and the 1-based leftmost
//! position of each read are extracted.

use crate::columns::ChromosomeColumns;
use crate::error::GenPlayError;
use crate::ranges::WindowColumns;
use crate::Position;

use super::utils::{parse_position, split_tabs};
use super::{ExtractionContext, LineOutcome, LineParser};

/// Read positions, per chromosome, as written in the file.
#[derive(Clone, Debug)]
pub struct PositionColumns {
    pub positions: ChromosomeColumns<Position>,
}

impl PositionColumns {
    pub fn new(chromosome_count: usize) -> Self {
        Self {
            positions: ChromosomeColumns::new(chromosome_count),
        }
    }

    pub fn size(&self, index: usize) -> usize {
        self.positions.size(index)
    }

    /// Convert to one-basepair windows scored 1, 0-based.
    pub fn into_windows(self) -> WindowColumns {
        let starts = self.positions.map(|position| position.saturating_sub(1));
        let stops = starts.map(|&start| start + 1);
        let scores = self.positions.map(|_| 1.0);
        WindowColumns {
            starts,
            stops,
            scores,
        }
    }
}

/// Parser for SAM lines.
#[derive(Debug)]
pub struct SamParser {
    columns: PositionColumns,
}

impl SamParser {
    pub fn new(chromosome_count: usize) -> Self {
        Self {
            columns: PositionColumns::new(chromosome_count),
        }
    }
}

impl LineParser for SamParser {
    type Output = PositionColumns;

    fn parse_line(
        &mut self,
        line: &str,
        context: &ExtractionContext,
    ) -> Result<LineOutcome, GenPlayError> {
        if line.starts_with('@') {
            return Ok(LineOutcome::SkippedNotData);
        }
        let fields = split_tabs(line);
        if fields.len() < 4 {
            return Err(GenPlayError::MalformedLine(line.to_string()));
        }
        if fields[2] == "*" {
            // unmapped read
            return Ok(LineOutcome::SkippedFiltered);
        }
        let chromosome = extract_chromosome!(context, fields[2]);
        let position = parse_position(fields[3], line)?;
        self.columns.positions.push(chromosome.index, position);
        Ok(LineOutcome::Appended)
    }

    fn chromosome_count(&self) -> usize {
        self.columns.positions.chromosome_count()
    }

    fn finish(self) -> Self::Output {
        self.columns
    }
}
