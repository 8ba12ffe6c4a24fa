//! SOAPsnp consensus calls.
//!
//! Of the SOAPsnp columns, the chromosome (0), the 1-based position (1), the
//! consensus genotype (3), the best base and its count (5, 7) and the second
//! best base and its count (9, 11) are extracted. A SNP is *significant* when
//! its second best base differs from the consensus.

use crate::columns::ChromosomeColumns;
use crate::error::GenPlayError;
use crate::Position;

use super::utils::{parse_column, parse_position, split_tabs};
use super::{ExtractionContext, LineOutcome, LineParser};

/// One SNP call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snp {
    pub position: Position,
    pub first_base: char,
    pub first_base_count: u32,
    pub second_base: char,
    pub second_base_count: u32,
    pub is_significant: bool,
}

/// SNP calls per chromosome.
#[derive(Clone, Debug)]
pub struct SnpColumns {
    pub snps: ChromosomeColumns<Snp>,
}

impl SnpColumns {
    pub fn new(chromosome_count: usize) -> Self {
        Self {
            snps: ChromosomeColumns::new(chromosome_count),
        }
    }

    pub fn size(&self, index: usize) -> usize {
        self.snps.size(index)
    }

    /// The number of significant SNPs, over all chromosomes.
    pub fn significant_count(&self) -> usize {
        self.snps
            .iter()
            .map(|(_, snps)| snps.iter().filter(|snp| snp.is_significant).count())
            .sum()
    }
}

fn parse_base(field: &str, line: &str) -> Result<char, GenPlayError> {
    field
        .trim()
        .chars()
        .next()
        .ok_or_else(|| GenPlayError::MalformedLine(line.to_string()))
}

/// Parser for SOAPsnp lines.
#[derive(Debug)]
pub struct SoapSnpParser {
    columns: SnpColumns,
}

impl SoapSnpParser {
    pub fn new(chromosome_count: usize) -> Self {
        Self {
            columns: SnpColumns::new(chromosome_count),
        }
    }
}

impl LineParser for SoapSnpParser {
    type Output = SnpColumns;

    fn parse_line(
        &mut self,
        line: &str,
        context: &ExtractionContext,
    ) -> Result<LineOutcome, GenPlayError> {
        let fields = split_tabs(line);
        if fields.len() < 12 {
            return Err(GenPlayError::MalformedLine(line.to_string()));
        }
        let chromosome = extract_chromosome!(context, fields[0]);
        let position = parse_position(fields[1], line)?;
        let consensus = parse_base(fields[3], line)?;
        let first_base = parse_base(fields[5], line)?;
        let first_base_count = parse_column(fields[7], line)?;
        let second_base = parse_base(fields[9], line)?;
        let second_base_count = parse_column(fields[11], line)?;
        self.columns.snps.push(
            chromosome.index,
            Snp {
                position,
                first_base,
                first_base_count,
                second_base,
                second_base_count,
                is_significant: second_base != consensus,
            },
        );
        Ok(LineOutcome::Appended)
    }

    fn chromosome_count(&self) -> usize {
        self.columns.snps.chromosome_count()
    }

    fn finish(self) -> Self::Output {
        self.columns
    }
}
