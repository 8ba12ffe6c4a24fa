//! GTF: exon lines grouped into genes by their `gene_id` attribute.
//!
//! Only `exon` features are extracted. Coordinates are 1-based and inclusive,
//! and are stored 0-based, right-exclusive. The exon score is the score field,
//! overridden by an `FPKM` attribute, or else by an `RPKM` attribute. Genes
//! whose exon scores are all zero get no scores.

use crate::error::GenPlayError;
use crate::genes::{GeneRow, GeneRows};
use crate::ranges::{validate_range, Strand};

use super::utils::{
    parse_column, parse_one_based, parse_optional_score, parse_position, split_tabs, unquote,
};
use super::{ExtractionContext, LineOutcome, LineParser};

/// Look up an attribute value in a GTF attribute field, e.g.
/// `gene_id "ENSG1"; FPKM "3.5";`.
pub fn attribute<'a>(attributes: &'a str, key: &str) -> Option<&'a str> {
    attributes
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once(|c: char| c.is_whitespace()))
        .find(|(name, _)| *name == key)
        .map(|(_, value)| unquote(value))
}

const GTF_FIELDS: usize = 8;

/// Parser for GTF lines.
#[derive(Debug)]
pub struct GtfParser {
    rows: GeneRows,
}

impl GtfParser {
    pub fn new(chromosome_count: usize) -> Self {
        let mut rows = GeneRows::new(chromosome_count);
        rows.null_scores_if_all_zero = true;
        Self { rows }
    }
}

impl LineParser for GtfParser {
    type Output = GeneRows;

    fn parse_line(
        &mut self,
        line: &str,
        context: &ExtractionContext,
    ) -> Result<LineOutcome, GenPlayError> {
        let fields = split_tabs(line);
        if fields.len() < GTF_FIELDS {
            return Err(GenPlayError::MalformedLine(line.to_string()));
        }
        if !fields[2].trim().eq_ignore_ascii_case("exon") {
            return Ok(LineOutcome::SkippedNotData);
        }
        let chromosome = extract_chromosome!(context, fields[0]);
        let start = parse_one_based(fields[3], line)?;
        let stop = parse_position(fields[4], line)?;
        validate_range(start, stop, line)?;
        let strand = Strand::from_field(fields[6]);
        if !context.strand().is_selected(strand) {
            return Ok(LineOutcome::SkippedFiltered);
        }

        let attributes = fields
            .get(8)
            .copied()
            .ok_or_else(|| GenPlayError::MalformedLine(line.to_string()))?;
        let name = attribute(attributes, "gene_id")
            .ok_or_else(|| GenPlayError::MalformedLine(line.to_string()))?;
        let score = match (attribute(attributes, "FPKM"), attribute(attributes, "RPKM")) {
            (Some(fpkm), _) => Some(parse_column::<f64>(fpkm, line)?),
            (None, Some(rpkm)) => Some(parse_column::<f64>(rpkm, line)?),
            (None, None) => parse_optional_score(fields[5], line)?,
        };

        let length = chromosome.length;
        let start = context.strand().shifted_position(strand, start, length);
        let stop = context.strand().shifted_position(strand, stop, length);
        self.rows.push(
            chromosome.index,
            GeneRow::single(name, strand, start, stop, score),
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
