//! Eland extended read alignments.
//!
//! A line looks like
//!
//! ```text
//! >read_name  ACGTACGT  1:0:0  chr1.fa:1000F0
//! ```
//!
//! i.e. the read name, the read sequence, the number of exact, one- and
//! two-mismatch matches, then the alignments. Only uniquely matched reads
//! (exactly one match over the three counts) are extracted; multi-match and
//! no-match reads are counted. Lines are scanned byte by byte since these
//! files are typically very large.

use crate::columns::ChromosomeColumns;
use crate::error::GenPlayError;
use crate::ranges::{Strand, WindowColumns};
use crate::Position;

use super::{ExtractionContext, LineOutcome, LineParser};

/// The uniquely matched reads of an Eland extended file.
#[derive(Clone, Debug)]
pub struct ElandColumns {
    pub positions: ChromosomeColumns<Position>,
    pub strands: ChromosomeColumns<Strand>,
    pub read_lengths: ChromosomeColumns<Position>,
    pub unique_count: usize,
    pub multi_match_count: usize,
    pub no_match_count: usize,
}

impl ElandColumns {
    pub fn new(chromosome_count: usize) -> Self {
        Self {
            positions: ChromosomeColumns::new(chromosome_count),
            strands: ChromosomeColumns::new(chromosome_count),
            read_lengths: ChromosomeColumns::new(chromosome_count),
            unique_count: 0,
            multi_match_count: 0,
            no_match_count: 0,
        }
    }

    pub fn size(&self, index: usize) -> usize {
        self.positions.size(index)
    }

    /// Convert to windows `[position - 1, position - 1 + read length)` scored
    /// 1, since Eland positions are 1-based.
    pub fn into_windows(self) -> WindowColumns {
        let mut windows = WindowColumns::new(self.positions.chromosome_count());
        for ((index, positions), (_, lengths)) in self.positions.iter().zip(self.read_lengths.iter())
        {
            for (&position, &length) in positions.iter().zip(lengths) {
                let start = position.saturating_sub(1);
                windows.push(index, start, start.saturating_add(length), 1.0);
            }
        }
        windows
    }
}

/// Byte index of the next `delimiter` at or after `from`.
fn find(bytes: &[u8], from: usize, delimiter: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == delimiter)
        .map(|offset| from + offset)
}

/// Parse the decimal number in `bytes[from..to]`.
fn parse_count(bytes: &[u8], from: usize, to: usize) -> Option<usize> {
    let digits = bytes.get(from..to)?;
    if digits.is_empty() {
        return None;
    }
    digits.iter().try_fold(0usize, |acc, &b| {
        if b.is_ascii_digit() {
            acc.checked_mul(10)?.checked_add((b - b'0') as usize)
        } else {
            None
        }
    })
}

/// Parser for Eland extended lines.
#[derive(Debug)]
pub struct ElandExtendedParser {
    columns: ElandColumns,
}

impl ElandExtendedParser {
    pub fn new(chromosome_count: usize) -> Self {
        Self {
            columns: ElandColumns::new(chromosome_count),
        }
    }
}

impl LineParser for ElandExtendedParser {
    type Output = ElandColumns;

    fn parse_line(
        &mut self,
        line: &str,
        context: &ExtractionContext,
    ) -> Result<LineOutcome, GenPlayError> {
        let malformed = || GenPlayError::MalformedLine(line.to_string());
        let bytes = line.as_bytes();

        let sequence_start = find(bytes, 0, b'\t').ok_or_else(malformed)? + 1;
        let sequence_stop = find(bytes, sequence_start, b'\t').ok_or_else(malformed)?;
        let read_length = (sequence_stop - sequence_start) as Position;

        let counts_start = sequence_stop + 1;
        match bytes.get(counts_start) {
            Some(b'N') | Some(b'Q') => {
                self.columns.no_match_count += 1;
                return Ok(LineOutcome::SkippedFiltered);
            }
            None => return Err(malformed()),
            _ => {}
        }
        let first_colon = find(bytes, counts_start, b':').ok_or_else(malformed)?;
        let second_colon = find(bytes, first_colon + 1, b':').ok_or_else(malformed)?;
        let counts_stop = find(bytes, second_colon + 1, b'\t').unwrap_or(bytes.len());
        let exact = parse_count(bytes, counts_start, first_colon).ok_or_else(malformed)?;
        let one_mismatch = parse_count(bytes, first_colon + 1, second_colon).ok_or_else(malformed)?;
        let two_mismatches = parse_count(bytes, second_colon + 1, counts_stop).ok_or_else(malformed)?;
        match exact + one_mismatch + two_mismatches {
            0 => {
                self.columns.no_match_count += 1;
                return Ok(LineOutcome::SkippedFiltered);
            }
            1 => {}
            _ => {
                self.columns.multi_match_count += 1;
                return Ok(LineOutcome::SkippedFiltered);
            }
        }

        // chromosome name runs up to the '.' of its file extension
        let name_start = counts_stop + 1;
        let name_stop = find(bytes, name_start, b'.').ok_or_else(malformed)?;
        let position_start = find(bytes, name_stop, b':').ok_or_else(malformed)? + 1;
        let strand_offset = bytes
            .get(position_start..)
            .ok_or_else(malformed)?
            .iter()
            .position(|&b| b == b'F' || b == b'R')
            .ok_or_else(malformed)?;
        let strand_index = position_start + strand_offset;

        let chromosome = extract_chromosome!(context, &line[name_start..name_stop]);
        let strand = if bytes[strand_index] == b'F' {
            Strand::Forward
        } else {
            Strand::Reverse
        };
        if !context.strand().is_selected(Some(strand)) {
            return Ok(LineOutcome::SkippedFiltered);
        }
        let position = parse_count(bytes, position_start, strand_index).ok_or_else(malformed)?;
        let position = Position::try_from(position).map_err(|_| malformed())?;
        let position = context
            .strand()
            .shifted_position(Some(strand), position, chromosome.length);
        let read_length = context.strand().read_length.unwrap_or(read_length);

        let index = chromosome.index;
        self.columns.positions.push(index, position);
        self.columns.strands.push(index, strand);
        self.columns.read_lengths.push(index, read_length);
        self.columns.unique_count += 1;
        Ok(LineOutcome::Appended)
    }

    fn chromosome_count(&self) -> usize {
        self.columns.positions.chromosome_count()
    }

    fn finish(self) -> Self::Output {
        self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use std::io::Cursor;

    fn parse(input: &str) -> Extraction<ElandColumns> {
        let registry = registry! { "chr1" => 10_000, "chr2" => 10_000 };
        let options = ExtractionOptions::default();
        let context = ExtractionContext::new(&registry, &options);
        extract(
            ElandExtendedParser::new(2),
            &mut Cursor::new(input.to_string()),
            &context,
            &CancellationToken::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_unique_match() {
        let extraction = parse(">read1\tACGTACGT\t1:0:0\tchr2.fa:1000R0\n");
        let columns = extraction.value;
        assert_eq!(columns.unique_count, 1);
        assert_eq!(columns.positions.get(1).unwrap(), &[1000]);
        assert_eq!(columns.strands.get(1).unwrap(), &[Strand::Reverse]);
        assert_eq!(columns.read_lengths.get(1).unwrap(), &[8]);
    }

    #[test]
    fn test_multi_match_counted() {
        let extraction =
            parse(">read1\tACGTACGT\t1:1:0\tchr1.fa:100F0,chr2.fa:200R1\n");
        let columns = extraction.value;
        assert_eq!(columns.multi_match_count, 1);
        assert_eq!(columns.unique_count, 0);
        assert!(columns.positions.is_empty());
        assert_eq!(extraction.report.filtered, 1);
    }

    #[test]
    fn test_no_match_counted() {
        let input = ">r1\tACGT\tNM\n>r2\tACGT\tQC\n>r3\tACGT\t0:0:0\n";
        let columns = parse(input).value;
        assert_eq!(columns.no_match_count, 3);
    }

    #[test]
    fn test_into_windows() {
        let windows = parse(">r\tACGT\t0:1:0\tchr1.fa:50F1\n").value.into_windows();
        assert_eq!(windows.intervals(0), vec![ScoredInterval::new(49, 53, 1.0)]);
    }

    #[test]
    fn test_read_at_bin_edge() {
        let registry = registry! { "chr1" => 10_000, "chr2" => 10_000 };
        let windows = parse(">r\tA\t1:0:0\tchr1.fa:100F0\n").value.into_windows();
        let binning = BinningOptions::new(100, DataPrecision::Int32, ScoreCalculationMethod::Sum);
        let list = BinList::from_windows(windows, &registry, &binning).unwrap();
        assert_eq!(list.get(0, 0), Some(1.0));
        assert_eq!(list.get(0, 1), Some(0.0));
    }

    #[test]
    fn test_truncated_line() {
        let extraction = parse(">r\tACGT\t1:0\n>r\tACGT\n");
        assert_eq!(extraction.report.malformed, 2);
    }
}
