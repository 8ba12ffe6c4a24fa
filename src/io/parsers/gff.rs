//! GFF: tab-separated features with 1-based, inclusive coordinates.
//!
//! Positions are converted to 0-based, right-exclusive ranges on parse, so
//! `chr1 . exon 1 10` becomes `[0, 10)`. A score of `.` is stored as
//! [`DEFAULT_WINDOW_SCORE`].
//!
//! [`DEFAULT_WINDOW_SCORE`]: super::bed::DEFAULT_WINDOW_SCORE

use crate::columns::ChromosomeColumns;
use crate::error::GenPlayError;
use crate::ranges::{validate_range, Strand, WindowColumns};

use super::bed::DEFAULT_WINDOW_SCORE;
use super::utils::{parse_one_based, parse_optional_score, parse_position, split_tabs};
use super::{ExtractionContext, LineOutcome, LineParser};

/// The extracted fields of a GFF file: scored windows plus the feature type
/// and strand of each.
#[derive(Clone, Debug)]
pub struct GffColumns {
    pub windows: WindowColumns,
    pub names: ChromosomeColumns<String>,
    pub strands: ChromosomeColumns<Option<Strand>>,
}

impl GffColumns {
    pub fn new(chromosome_count: usize) -> Self {
        Self {
            windows: WindowColumns::new(chromosome_count),
            names: ChromosomeColumns::new(chromosome_count),
            strands: ChromosomeColumns::new(chromosome_count),
        }
    }

    pub fn size(&self, index: usize) -> usize {
        self.windows.size(index)
    }
}

/// Parser for GFF lines.
#[derive(Debug)]
pub struct GffParser {
    columns: GffColumns,
}

impl GffParser {
    pub fn new(chromosome_count: usize) -> Self {
        Self {
            columns: GffColumns::new(chromosome_count),
        }
    }
}

impl LineParser for GffParser {
    type Output = GffColumns;

    fn parse_line(
        &mut self,
        line: &str,
        context: &ExtractionContext,
    ) -> Result<LineOutcome, GenPlayError> {
        let fields = split_tabs(line);
        if fields.len() < 7 {
            return Err(GenPlayError::MalformedLine(line.to_string()));
        }
        let chromosome = extract_chromosome!(context, fields[0]);
        let start = parse_one_based(fields[3], line)?;
        let stop = parse_position(fields[4], line)?;
        validate_range(start, stop, line)?;
        let score = parse_optional_score(fields[5], line)?.unwrap_or(DEFAULT_WINDOW_SCORE);
        let strand = Strand::from_field(fields[6]);
        if !context.strand().is_selected(strand) {
            return Ok(LineOutcome::SkippedFiltered);
        }
        let (start, stop) = context
            .strand()
            .adjust(strand, start, stop, chromosome.length);

        let index = chromosome.index;
        self.columns.windows.push(index, start, stop, score);
        self.columns.names.push(index, fields[2].to_string());
        self.columns.strands.push(index, strand);
        Ok(LineOutcome::Appended)
    }

    fn chromosome_count(&self) -> usize {
        self.columns.windows.chromosome_count()
    }

    fn finish(self) -> Self::Output {
        self.columns
    }
}
