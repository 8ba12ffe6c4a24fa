//! BED, from BED3 to BED12, plus the GenPlay 13th column of exon scores.
//!
//! The BED (Browser Extensible Format) is a TSV format in bioinformatics.
//! It has a fairly strict [specification](https://samtools.github.io/hts-specs/BEDv1.pdf),
//! but in practice it is quite permissive: fields here may be separated by
//! tabs or spaces, and a missing score may be written `.`.
//!
//! | Field | Content |
//! |---|---|
//! | 0–2 | chromosome, start, stop (0-based, right-exclusive) |
//! | 3 | name |
//! | 4 | score |
//! | 5 | strand |
//! | 9 | exon count |
//! | 10 | exon lengths, comma-separated |
//! | 11 | exon starts relative to the feature start, comma-separated |
//! | 12 | exon scores, comma-separated |
//!
//! A `searchURL=` header line is kept as metadata.

use crate::columns::ChromosomeColumns;
use crate::error::GenPlayError;
use crate::genes::{GeneRow, GeneRows};
use crate::ranges::{validate_range, Strand, WindowColumns};
use crate::Position;

use super::utils::{
    parse_comma_list, parse_optional_score, parse_position, parse_search_url,
    split_tabs_and_spaces,
};
use super::{ExtractionContext, LineOutcome, LineParser};

/// The score given to BED features without one when they are converted
/// to windows: each feature counts once.
pub const DEFAULT_WINDOW_SCORE: f64 = 1.0;

/// The extracted fields of a BED file, per chromosome.
#[derive(Clone, Debug)]
pub struct BedColumns {
    pub starts: ChromosomeColumns<Position>,
    pub stops: ChromosomeColumns<Position>,
    pub names: ChromosomeColumns<Option<String>>,
    pub scores: ChromosomeColumns<Option<f64>>,
    pub strands: ChromosomeColumns<Option<Strand>>,
    pub exon_starts: ChromosomeColumns<Option<Vec<Position>>>,
    pub exon_stops: ChromosomeColumns<Option<Vec<Position>>>,
    pub exon_scores: ChromosomeColumns<Option<Vec<f64>>>,
    pub search_url: Option<String>,
}

impl BedColumns {
    pub fn new(chromosome_count: usize) -> Self {
        Self {
            starts: ChromosomeColumns::new(chromosome_count),
            stops: ChromosomeColumns::new(chromosome_count),
            names: ChromosomeColumns::new(chromosome_count),
            scores: ChromosomeColumns::new(chromosome_count),
            strands: ChromosomeColumns::new(chromosome_count),
            exon_starts: ChromosomeColumns::new(chromosome_count),
            exon_stops: ChromosomeColumns::new(chromosome_count),
            exon_scores: ChromosomeColumns::new(chromosome_count),
            search_url: None,
        }
    }

    pub fn chromosome_count(&self) -> usize {
        self.starts.chromosome_count()
    }

    /// The number of features of chromosome `index`.
    pub fn size(&self, index: usize) -> usize {
        self.starts.size(index)
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to scored windows. Features without a score get
    /// [`DEFAULT_WINDOW_SCORE`].
    pub fn into_windows(self) -> WindowColumns {
        WindowColumns {
            starts: self.starts,
            stops: self.stops,
            scores: self
                .scores
                .map(|score| score.unwrap_or(DEFAULT_WINDOW_SCORE)),
        }
    }

    /// Convert to gene rows. Features without exons are single-exon genes,
    /// and features without a name are named by their position.
    pub fn into_gene_rows(self) -> GeneRows {
        let mut rows = GeneRows::new(self.chromosome_count());
        rows.search_url = self.search_url;
        let columns = self
            .starts
            .into_inner()
            .into_iter()
            .zip(self.stops.into_inner())
            .zip(self.names.into_inner())
            .zip(self.strands.into_inner())
            .zip(self.scores.into_inner())
            .zip(self.exon_starts.into_inner())
            .zip(self.exon_stops.into_inner())
            .zip(self.exon_scores.into_inner());
        for (index, (((((((starts, stops), names), strands), scores), ex_starts), ex_stops), ex_scores)) in
            columns.enumerate()
        {
            let features = starts
                .into_iter()
                .zip(stops)
                .zip(names)
                .zip(strands)
                .zip(scores)
                .zip(ex_starts)
                .zip(ex_stops)
                .zip(ex_scores);
            for (((((((start, stop), name), strand), score), ex_start), ex_stop), ex_score) in
                features
            {
                let name = name.unwrap_or_else(|| format!("{}-{}", start, stop));
                let row = match (ex_start, ex_stop) {
                    (Some(exon_starts), Some(exon_stops)) if !exon_starts.is_empty() => GeneRow {
                        name,
                        strand,
                        exon_starts,
                        exon_stops,
                        exon_scores: ex_score,
                    },
                    _ => GeneRow::single(name, strand, start, stop, score),
                };
                rows.push(index, row);
            }
        }
        rows
    }
}

/// Parser for BED lines.
#[derive(Debug)]
pub struct BedParser {
    columns: BedColumns,
}

impl BedParser {
    pub fn new(chromosome_count: usize) -> Self {
        Self {
            columns: BedColumns::new(chromosome_count),
        }
    }
}

impl LineParser for BedParser {
    type Output = BedColumns;

    fn parse_line(
        &mut self,
        line: &str,
        context: &ExtractionContext,
    ) -> Result<LineOutcome, GenPlayError> {
        if let Some(url) = parse_search_url(line) {
            self.columns.search_url = Some(url);
            return Ok(LineOutcome::SkippedNotData);
        }
        let fields = split_tabs_and_spaces(line);
        if fields.len() < 3 {
            return Err(GenPlayError::MalformedLine(line.to_string()));
        }
        let chromosome = extract_chromosome!(context, fields[0]);

        let start = parse_position(fields[1], line)?;
        let stop = parse_position(fields[2], line)?;
        validate_range(start, stop, line)?;
        let name = fields.get(3).map(|name| name.to_string());
        let score = match fields.get(4) {
            Some(field) => parse_optional_score(field, line)?,
            None => None,
        };
        let strand = fields.get(5).and_then(|field| Strand::from_field(field));
        if !context.strand().is_selected(strand) {
            return Ok(LineOutcome::SkippedFiltered);
        }

        let length = chromosome.length;
        let shift = |position| context.strand().shifted_position(strand, position, length);

        let (exon_starts, exon_stops) = if fields.len() > 11 {
            let lengths: Vec<Position> = parse_comma_list(fields[10], line)?;
            let relative_starts: Vec<Position> = parse_comma_list(fields[11], line)?;
            if lengths.len() != relative_starts.len() {
                return Err(GenPlayError::MalformedLine(line.to_string()));
            }
            let mut exon_starts = Vec::with_capacity(lengths.len());
            let mut exon_stops = Vec::with_capacity(lengths.len());
            for (relative_start, exon_length) in relative_starts.iter().zip(&lengths) {
                let exon_start = start.saturating_add(*relative_start);
                exon_starts.push(shift(exon_start));
                exon_stops.push(shift(exon_start.saturating_add(*exon_length)));
            }
            (Some(exon_starts), Some(exon_stops))
        } else {
            (None, None)
        };

        let exon_scores = match (fields.get(12), &exon_starts) {
            (Some(field), Some(exon_starts)) => {
                let scores: Vec<f64> = parse_comma_list(field, line)?;
                if scores.len() != exon_starts.len() {
                    return Err(GenPlayError::MalformedLine(line.to_string()));
                }
                Some(scores)
            }
            _ => None,
        };

        let (start, stop) = context.strand().adjust(strand, start, stop, length);
        let index = chromosome.index;
        let columns = &mut self.columns;
        columns.starts.push(index, start);
        columns.stops.push(index, stop);
        columns.names.push(index, name);
        columns.scores.push(index, score);
        columns.strands.push(index, strand);
        columns.exon_starts.push(index, exon_starts);
        columns.exon_stops.push(index, exon_stops);
        columns.exon_scores.push(index, exon_scores);
        Ok(LineOutcome::Appended)
    }

    fn chromosome_count(&self) -> usize {
        self.columns.chromosome_count()
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

    fn parse(input: &str, options: &ExtractionOptions) -> Extraction<BedColumns> {
        let registry = registry! { "chr1" => 1000, "chr2" => 500 };
        let context = ExtractionContext::new(&registry, options);
        extract(
            BedParser::new(registry.count()),
            &mut Cursor::new(input.to_string()),
            &context,
            &CancellationToken::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_bed12_exons() {
        let input = "chr1\t100\t200\tg1\t0\t+\t100\t200\t0\t2\t5,5\t0,50\n";
        let extraction = parse(input, &ExtractionOptions::default());
        let columns = extraction.value;
        assert_eq!(extraction.report.appended, 1);
        assert_eq!(columns.exon_starts.get_value(0, 0), Some(&Some(vec![100, 150])));
        assert_eq!(columns.exon_stops.get_value(0, 0), Some(&Some(vec![105, 155])));
        assert_eq!(columns.exon_scores.get_value(0, 0), Some(&None));
    }

    #[test]
    fn test_bed_exon_scores() {
        let input = "chr1\t100\t200\tg1\t0\t+\t100\t200\t0\t2\t5,5,\t0,50,\t1.5,2.5\n";
        let columns = parse(input, &ExtractionOptions::default()).value;
        assert_eq!(columns.exon_scores.get_value(0, 0), Some(&Some(vec![1.5, 2.5])));
    }

    #[test]
    fn test_bed_mismatched_exon_lists() {
        let input = "chr1\t100\t200\tg1\t0\t+\t100\t200\t0\t2\t5,5\t0\n";
        let extraction = parse(input, &ExtractionOptions::default());
        assert_eq!(extraction.report.malformed, 1);
        assert!(extraction.value.is_empty());
    }

    #[test]
    fn test_bed3_and_space_separated() {
        let input = "searchURL=\"http://example.org/\"\nchr1 10 20\nchr2\t5\t6\tfeature\t.\n";
        let extraction = parse(input, &ExtractionOptions::default());
        let columns = extraction.value;
        assert_eq!(extraction.report.not_data, 1);
        assert_eq!(columns.search_url.as_deref(), Some("http://example.org/"));
        assert_eq!(columns.size(0), 1);
        assert_eq!(columns.scores.get_value(1, 0), Some(&None));
        assert_eq!(columns.names.get_value(1, 0), Some(&Some("feature".to_string())));
    }

    #[test]
    fn test_bed_strand_filter_and_shift() {
        let options = ExtractionOptions {
            strand: StrandOptions {
                selected: Some(Strand::Reverse),
                shift: 10,
                read_length: None,
            },
            ..Default::default()
        };
        let input = "chr1\t100\t200\ta\t1\t+\nchr1\t100\t200\tb\t1\t-\nchr1\t300\t400\tc\t1\t.\n";
        let extraction = parse(input, &options);
        assert_eq!(extraction.report.filtered, 2);
        let columns = extraction.value;
        assert_eq!(columns.starts.get(0).unwrap(), &[90]);
        assert_eq!(columns.stops.get(0).unwrap(), &[190]);
    }

    #[test]
    fn test_bed_into_windows() {
        let input = "chr1\t0\t10\ta\t3\nchr1\t10\t20\n";
        let windows = parse(input, &ExtractionOptions::default()).value.into_windows();
        assert_eq!(windows.scores.get(0).unwrap(), &[3.0, DEFAULT_WINDOW_SCORE]);
    }

    #[test]
    fn test_bed_into_gene_rows() {
        let input = "chr1\t100\t200\tg1\t0\t+\t100\t200\t0\t2\t5,5\t0,50\nchr1\t300\t310\n";
        let rows = parse(input, &ExtractionOptions::default())
            .value
            .into_gene_rows();
        assert_eq!(rows.size(0), 2);
        let first = rows.rows.get_value(0, 0).unwrap();
        assert_eq!(first.exon_starts, vec![100, 150]);
        let second = rows.rows.get_value(0, 1).unwrap();
        assert_eq!(second.name, "300-310");
        assert_eq!(second.exon_starts, vec![300]);
        assert_eq!(second.exon_stops, vec![310]);
    }

    #[test]
    fn test_bed_reversed_range() {
        let extraction = parse("chr1\t20\t10\n", &ExtractionOptions::default());
        assert_eq!(extraction.report.malformed, 1);
    }
}
