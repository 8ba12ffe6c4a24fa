//! GdpGene: GenPlay's own gene format.
//!
//! ```text
//! name  chromosome  strand  start  stop  exon_starts  exon_stops  [exon_scores]
//! ```
//!
//! Exon lists are comma-separated. A `searchURL=` header line is kept as
//! metadata.

use crate::error::GenPlayError;
use crate::genes::{GeneRow, GeneRows};
use crate::ranges::{validate_range, Strand};
use crate::Position;

use super::utils::{parse_comma_list, parse_position, parse_search_url, split_tabs_and_spaces};
use super::{ExtractionContext, LineOutcome, LineParser};

/// Parser for GdpGene lines.
#[derive(Debug)]
pub struct GdpGeneParser {
    rows: GeneRows,
}

impl GdpGeneParser {
    pub fn new(chromosome_count: usize) -> Self {
        Self {
            rows: GeneRows::new(chromosome_count),
        }
    }
}

impl LineParser for GdpGeneParser {
    type Output = GeneRows;

    fn parse_line(
        &mut self,
        line: &str,
        context: &ExtractionContext,
    ) -> Result<LineOutcome, GenPlayError> {
        if let Some(url) = parse_search_url(line) {
            self.rows.search_url = Some(url);
            return Ok(LineOutcome::SkippedNotData);
        }
        let fields = split_tabs_and_spaces(line);
        if fields.len() < 7 {
            return Err(GenPlayError::MalformedLine(line.to_string()));
        }
        let chromosome = extract_chromosome!(context, fields[1]);
        let strand = Strand::from_field(fields[2]);
        if !context.strand().is_selected(strand) {
            return Ok(LineOutcome::SkippedFiltered);
        }
        let start = parse_position(fields[3], line)?;
        let stop = parse_position(fields[4], line)?;
        validate_range(start, stop, line)?;
        let exon_starts: Vec<Position> = parse_comma_list(fields[5], line)?;
        let exon_stops: Vec<Position> = parse_comma_list(fields[6], line)?;
        if exon_starts.len() != exon_stops.len() {
            return Err(GenPlayError::MalformedLine(line.to_string()));
        }
        let exon_scores = match fields.get(7) {
            Some(field) => {
                let scores: Vec<f64> = parse_comma_list(field, line)?;
                if scores.len() != exon_starts.len() {
                    return Err(GenPlayError::MalformedLine(line.to_string()));
                }
                Some(scores)
            }
            None => None,
        };

        let length = chromosome.length;
        let shift = |position| context.strand().shifted_position(strand, position, length);
        let (exon_starts, exon_stops) = if exon_starts.is_empty() {
            (vec![shift(start)], vec![shift(stop)])
        } else {
            (
                exon_starts.into_iter().map(shift).collect(),
                exon_stops.into_iter().map(shift).collect(),
            )
        };
        self.rows.push(
            chromosome.index,
            GeneRow {
                name: fields[0].to_string(),
                strand,
                exon_starts,
                exon_stops,
                exon_scores,
            },
        );
        Ok(LineOutcome::Appended)
    }

    fn chromosome_count(&self) -> usize {
        self.rows.chromosome_count()
    }

    fn finish(self) -> Self::Output {
        self.rows
    }
}
