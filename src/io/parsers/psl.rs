//! PSL alignments, as produced by BLAT.
//!
//! | Field | Content |
//! |---|---|
//! | 0 | matches, used as the score |
//! | 8 | strand |
//! | 9 | query name |
//! | 13 | target (chromosome) name |
//! | 15, 16 | target start and stop |
//! | 18 | block sizes |
//! | 20 | target block starts |
//!
//! Each alignment becomes a gene row whose exons are its blocks, every block
//! scored with the alignment score.

use crate::error::GenPlayError;
use crate::genes::{GeneRow, GeneRows};
use crate::ranges::{validate_range, Strand};
use crate::Position;

use super::utils::{parse_column, parse_comma_list, parse_position, split_tabs};
use super::{ExtractionContext, LineOutcome, LineParser};

const PSL_FIELDS: usize = 21;

/// Parser for PSL lines.
#[derive(Debug)]
pub struct PslParser {
    rows: GeneRows,
}

impl PslParser {
    pub fn new(chromosome_count: usize) -> Self {
        Self {
            rows: GeneRows::new(chromosome_count),
        }
    }
}

impl LineParser for PslParser {
    type Output = GeneRows;

    fn parse_line(
        &mut self,
        line: &str,
        context: &ExtractionContext,
    ) -> Result<LineOutcome, GenPlayError> {
        let fields = split_tabs(line);
        let score: f64 = match fields[0].trim().parse() {
            Ok(score) => score,
            // psLayout headers ("psLayout version 3", "match mis-...", dashes)
            Err(_) => return Ok(LineOutcome::SkippedNotData),
        };
        if fields.len() < PSL_FIELDS {
            return Err(GenPlayError::MalformedLine(line.to_string()));
        }
        let chromosome = extract_chromosome!(context, fields[13]);
        let strand = Strand::from_field(fields[8]);
        if !context.strand().is_selected(strand) {
            return Ok(LineOutcome::SkippedFiltered);
        }
        let start = parse_position(fields[15], line)?;
        let stop = parse_position(fields[16], line)?;
        validate_range(start, stop, line)?;

        let block_sizes: Vec<Position> = parse_comma_list(fields[18], line)?;
        let block_starts: Vec<Position> = parse_comma_list(fields[20], line)?;
        let block_count: usize = parse_column(fields[17], line)?;
        if block_sizes.len() != block_starts.len() || block_sizes.len() != block_count {
            return Err(GenPlayError::MalformedLine(line.to_string()));
        }

        let length = chromosome.length;
        let shift = |position| context.strand().shifted_position(strand, position, length);
        let exon_starts: Vec<Position> = block_starts.iter().map(|&start| shift(start)).collect();
        let exon_stops: Vec<Position> = block_starts
            .iter()
            .zip(&block_sizes)
            .map(|(&start, &size)| shift(start.saturating_add(size)))
            .collect();
        let exon_scores = Some(vec![score; exon_starts.len()]);

        self.rows.push(
            chromosome.index,
            GeneRow {
                name: fields[9].to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use std::io::Cursor;

    fn psl_line(strand: &str, chromosome: &str) -> String {
        [
            "50", "0", "0", "0", "0", "0", "0", "0", strand, "query1", "60", "0", "60",
            chromosome, "5000", "1000", "1100", "2", "20,30,", "0,30,", "1000,1070,",
        ]
        .join("\t")
    }

    #[test]
    fn test_psl_blocks() {
        let registry = registry! { "chr1" => 5000 };
        let options = ExtractionOptions::default();
        let context = ExtractionContext::new(&registry, &options);
        let input = format!(
            "psLayout version 3\n\n{}\n{}\n",
            psl_line("+", "chr1"),
            psl_line("-", "chr7")
        );
        let extraction = extract(
            PslParser::new(1),
            &mut Cursor::new(input),
            &context,
            &CancellationToken::new(),
        )
        .unwrap();
        assert_eq!(extraction.report.appended, 1);
        assert_eq!(extraction.report.unknown_chromosome, 1);
        let row = extraction.value.rows.get_value(0, 0).unwrap();
        assert_eq!(row.name, "query1");
        assert_eq!(row.strand, Some(Strand::Forward));
        assert_eq!(row.exon_starts, vec![1000, 1070]);
        assert_eq!(row.exon_stops, vec![1020, 1100]);
        assert_eq!(row.exon_scores, Some(vec![50.0, 50.0]));
    }

    #[test]
    fn test_psl_truncated_line() {
        let registry = registry! { "chr1" => 5000 };
        let options = ExtractionOptions::default();
        let context = ExtractionContext::new(&registry, &options);
        let truncated = psl_line("+", "chr1")
            .split('\t')
            .take(15)
            .collect::<Vec<_>>()
            .join("\t");
        let input = format!(
            "psLayout version 3\nmatch\tmis-\n---------\n{}\n",
            truncated
        );
        let extraction = extract(
            PslParser::new(1),
            &mut Cursor::new(input),
            &context,
            &CancellationToken::new(),
        )
        .unwrap();
        assert_eq!(extraction.report.not_data, 3);
        assert_eq!(extraction.report.malformed, 1);
        assert_eq!(extraction.report.appended, 0);
    }
}
