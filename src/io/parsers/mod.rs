//! Line parsers for genomic interval text formats, and the shared scan loop
//! that drives them.
//!
//! Every supported format has one type implementing [`LineParser`]. A parser
//! owns the per-chromosome columns it fills, and turns one raw line into a
//! [`LineOutcome`] (or a per-line error). The scan loop, [`extract()`], is the
//! same for every format: it pulls lines from a [`LineSupplier`], skips the
//! usual non-data lines (blank lines, `#` comments, `track` and `browser`
//! lines), tallies outcomes into an [`ExtractionReport`], and stops early once
//! the parser reports [`LineOutcome::ExtractionDone`].
//!
//! ## Supported formats
//!
//! | Format | Parser | Output |
//! |---|---|---|
//! | BED | [`BedParser`] | [`BedColumns`] |
//! | bedGraph | [`BedGraphParser`] | [`WindowColumns`] |
//! | GFF | [`GffParser`] | [`GffColumns`] |
//! | GTF | [`GtfParser`] | [`GeneRows`] |
//! | PSL | [`PslParser`] | [`GeneRows`] |
//! | Eland extended | [`ElandExtendedParser`] | [`ElandColumns`] |
//! | SAM | [`SamParser`] | [`PositionColumns`] |
//! | GdpGene | [`GdpGeneParser`] | [`GeneRows`] |
//! | SOAPsnp | [`SoapSnpParser`] | [`SnpColumns`] |
//!
//! ## Error handling
//!
//! [`GenPlayError::UnknownChromosome`] and [`GenPlayError::MalformedLine`]
//! reject a single line: the scan counts it and continues. Any other error
//! (e.g. an I/O error) aborts the scan.
//!
//! [`WindowColumns`]: crate::ranges::WindowColumns
//! [`GeneRows`]: crate::genes::GeneRows

use clap::ValueEnum;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::chromosomes::{Chromosome, ChromosomeRegistry};
use crate::error::GenPlayError;
use crate::genes::{GeneList, GeneRows};
use crate::io::{InputFile, LineSupplier};
use crate::ranges::{StrandOptions, WindowColumns};
use crate::repeats::RepeatFamilyList;
use crate::selection::{ChromosomeSelectionFilter, ChromosomeStatus};

pub use crate::reporting::{Extraction, ExtractionReport};

/// Resolve the chromosome of a line and consult the selection filter,
/// returning early from `parse_line()` with the appropriate [`LineOutcome`]
/// if the line is not to be extracted.
macro_rules! extract_chromosome {
    ($context:expr, $name:expr) => {
        match $context.resolve($name)? {
            $crate::io::parsers::ChromosomeResolution::Extract(chromosome) => chromosome,
            $crate::io::parsers::ChromosomeResolution::Stop(outcome) => return Ok(outcome),
        }
    };
}

pub mod bed;
pub mod bedgraph;
pub mod eland;
pub mod gdp_gene;
pub mod gff;
pub mod gtf;
pub mod psl;
pub mod sam;
pub mod soapsnp;
pub mod utils;

pub use bed::{BedColumns, BedParser};
pub use bedgraph::BedGraphParser;
pub use eland::{ElandColumns, ElandExtendedParser};
pub use gdp_gene::GdpGeneParser;
pub use gff::{GffColumns, GffParser};
pub use gtf::GtfParser;
pub use psl::PslParser;
pub use sam::{PositionColumns, SamParser};
pub use soapsnp::{SnpColumns, SoapSnpParser};

/// Initial capacity of the line buffer.
pub const PARSE_CAPACITY: usize = 512;

/// Rejected lines beyond this count are tallied but not logged.
pub const MAX_LOGGED_REJECTIONS: usize = 10;

/// What happened to one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line's fields were appended to the columns.
    Appended,
    /// The line is not a data line (header, comment, metadata).
    SkippedNotData,
    /// The line is data, but was filtered out (unselected chromosome or
    /// strand, zero bedGraph score, multi-match read...).
    SkippedFiltered,
    /// The line belongs to a chromosome after the last selected one: the
    /// scan is complete.
    ExtractionDone,
}

/// Options shared by every parser.
#[derive(Clone, Debug, Default)]
pub struct ExtractionOptions {
    pub selection: ChromosomeSelectionFilter,
    pub strand: StrandOptions,
}

/// Everything a parser consults while parsing a line.
#[derive(Clone, Copy, Debug)]
pub struct ExtractionContext<'a> {
    pub registry: &'a ChromosomeRegistry,
    pub options: &'a ExtractionOptions,
}

/// The result of resolving a line's chromosome.
#[derive(Debug)]
pub enum ChromosomeResolution<'a> {
    Extract(&'a Chromosome),
    Stop(LineOutcome),
}

impl<'a> ExtractionContext<'a> {
    pub fn new(registry: &'a ChromosomeRegistry, options: &'a ExtractionOptions) -> Self {
        Self { registry, options }
    }

    /// Resolve a chromosome name and classify it with the selection filter.
    pub fn resolve(&self, name: &str) -> Result<ChromosomeResolution<'a>, GenPlayError> {
        let chromosome = self.registry.resolve(name)?;
        Ok(match self.options.selection.classify(chromosome) {
            ChromosomeStatus::Extract => ChromosomeResolution::Extract(chromosome),
            ChromosomeStatus::Skip => ChromosomeResolution::Stop(LineOutcome::SkippedFiltered),
            ChromosomeStatus::PastLast => ChromosomeResolution::Stop(LineOutcome::ExtractionDone),
        })
    }

    pub fn strand(&self) -> &StrandOptions {
        &self.options.strand
    }

    pub fn chromosome_count(&self) -> usize {
        self.registry.count()
    }
}

/// A parser for one line-based format.
pub trait LineParser {
    /// The columns (or other value) built by this parser.
    type Output;

    /// Parse one raw data line, appending its fields to this parser's columns.
    fn parse_line(
        &mut self,
        line: &str,
        context: &ExtractionContext,
    ) -> Result<LineOutcome, GenPlayError>;

    /// The number of chromosomes the parser's columns were sized for.
    fn chromosome_count(&self) -> usize;

    /// Consume the parser, handing over the extracted columns.
    fn finish(self) -> Self::Output;
}

/// Cooperative cancellation flag, checked once per line by [`extract()`].
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; every clone of this token sees it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Lines that are never data, whatever the format.
fn is_header_line(line: &str) -> bool {
    let line = line.trim_start();
    line.is_empty()
        || line.starts_with('#')
        || line.starts_with("track")
        || line.starts_with("browser")
}

/// The shared scan loop: run `parser` over every line of `supplier`.
///
/// Per-line errors are tallied in the returned [`ExtractionReport`] and never
/// abort the scan. Returns [`GenPlayError::Cancelled`] if `cancel` is set.
pub fn extract<P, S>(
    mut parser: P,
    supplier: &mut S,
    context: &ExtractionContext,
    cancel: &CancellationToken,
) -> Result<Extraction<P::Output>, GenPlayError>
where
    P: LineParser,
    S: LineSupplier + ?Sized,
{
    if parser.chromosome_count() != context.chromosome_count() {
        return Err(GenPlayError::ChromosomeCountMismatch(
            parser.chromosome_count(),
            context.chromosome_count(),
        ));
    }
    let mut report = ExtractionReport::new();
    let mut line = String::with_capacity(PARSE_CAPACITY);

    loop {
        if cancel.is_cancelled() {
            log::info!("extraction cancelled after {} lines", report.lines);
            return Err(GenPlayError::Cancelled);
        }
        if !supplier.next_line(&mut line)? {
            break;
        }
        report.lines += 1;
        if is_header_line(&line) {
            report.not_data += 1;
            continue;
        }
        match parser.parse_line(&line, context) {
            Ok(LineOutcome::Appended) => report.appended += 1,
            Ok(LineOutcome::SkippedNotData) => report.not_data += 1,
            Ok(LineOutcome::SkippedFiltered) => report.filtered += 1,
            Ok(LineOutcome::ExtractionDone) => {
                report.stopped_early = true;
                break;
            }
            Err(e) if e.is_line_error() => {
                if matches!(e, GenPlayError::UnknownChromosome(_)) {
                    report.unknown_chromosome += 1;
                } else {
                    report.malformed += 1;
                }
                if report.rejected() <= MAX_LOGGED_REJECTIONS {
                    log::warn!("line {} rejected: {}", report.lines, e);
                }
            }
            Err(e) => return Err(e),
        }
    }

    if report.rejected() > MAX_LOGGED_REJECTIONS {
        log::warn!(
            "{} more rejected lines were not logged",
            report.rejected() - MAX_LOGGED_REJECTIONS
        );
    }
    log::info!("{}", report);
    Ok(Extraction::new(parser.finish(), report))
}

/// The supported line formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatKind {
    Bed,
    #[value(name = "bedgraph")]
    BedGraph,
    Gff,
    Gtf,
    Psl,
    #[value(name = "eland")]
    ElandExtended,
    Sam,
    #[value(name = "gdp")]
    GdpGene,
    #[value(name = "soapsnp")]
    SoapSnp,
}

impl FormatKind {
    /// Detect the format from a file extension, ignoring compression
    /// extensions (`.gz`, `.bgz`).
    pub fn detect(filepath: impl AsRef<Path>) -> Result<Self, GenPlayError> {
        let extension = utils::get_base_extension(filepath)
            .ok_or(GenPlayError::CouldNotDetectFormat)?
            .to_lowercase();
        let format = match extension.as_str() {
            "bed" => FormatKind::Bed,
            "bedgraph" | "bg" => FormatKind::BedGraph,
            "gff" | "gff3" => FormatKind::Gff,
            "gtf" => FormatKind::Gtf,
            "psl" => FormatKind::Psl,
            "eland" => FormatKind::ElandExtended,
            "sam" => FormatKind::Sam,
            "gdp" => FormatKind::GdpGene,
            "snp" | "soapsnp" => FormatKind::SoapSnp,
            _ => return Err(GenPlayError::CouldNotDetectFormat),
        };
        Ok(format)
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormatKind::Bed => "BED",
            FormatKind::BedGraph => "bedGraph",
            FormatKind::Gff => "GFF",
            FormatKind::Gtf => "GTF",
            FormatKind::Psl => "PSL",
            FormatKind::ElandExtended => "Eland extended",
            FormatKind::Sam => "SAM",
            FormatKind::GdpGene => "GdpGene",
            FormatKind::SoapSnp => "SOAPsnp",
        }
    }

    /// Run the parser for this format over every line of `supplier`.
    pub fn extract<S: LineSupplier + ?Sized>(
        &self,
        supplier: &mut S,
        context: &ExtractionContext,
        cancel: &CancellationToken,
    ) -> Result<Extraction<ExtractedData>, GenPlayError> {
        let n = context.chromosome_count();
        let extraction = match self {
            FormatKind::Bed => {
                extract(BedParser::new(n), supplier, context, cancel)?.map(ExtractedData::Bed)
            }
            FormatKind::BedGraph => extract(BedGraphParser::new(n), supplier, context, cancel)?
                .map(ExtractedData::BedGraph),
            FormatKind::Gff => {
                extract(GffParser::new(n), supplier, context, cancel)?.map(ExtractedData::Gff)
            }
            FormatKind::Gtf => {
                extract(GtfParser::new(n), supplier, context, cancel)?.map(ExtractedData::Gtf)
            }
            FormatKind::Psl => {
                extract(PslParser::new(n), supplier, context, cancel)?.map(ExtractedData::Psl)
            }
            FormatKind::ElandExtended => {
                extract(ElandExtendedParser::new(n), supplier, context, cancel)?
                    .map(ExtractedData::ElandExtended)
            }
            FormatKind::Sam => {
                extract(SamParser::new(n), supplier, context, cancel)?.map(ExtractedData::Sam)
            }
            FormatKind::GdpGene => extract(GdpGeneParser::new(n), supplier, context, cancel)?
                .map(ExtractedData::GdpGene),
            FormatKind::SoapSnp => extract(SoapSnpParser::new(n), supplier, context, cancel)?
                .map(ExtractedData::SoapSnp),
        };
        Ok(extraction)
    }

    /// Open a (possibly gzip-compressed) file and extract it with this format's parser.
    pub fn extract_file(
        &self,
        filepath: impl Into<PathBuf>,
        context: &ExtractionContext,
        cancel: &CancellationToken,
    ) -> Result<Extraction<ExtractedData>, GenPlayError> {
        let filepath = filepath.into();
        log::info!("extracting {} file {}", self.name(), filepath.display());
        let mut reader = InputFile::new(filepath).reader()?;
        self.extract(&mut reader, context, cancel)
    }
}

/// The columns extracted from a file whose format is only known at runtime.
#[derive(Clone, Debug)]
pub enum ExtractedData {
    Bed(BedColumns),
    BedGraph(WindowColumns),
    Gff(GffColumns),
    Gtf(GeneRows),
    Psl(GeneRows),
    ElandExtended(ElandColumns),
    Sam(PositionColumns),
    GdpGene(GeneRows),
    SoapSnp(SnpColumns),
}

impl ExtractedData {
    pub fn format(&self) -> FormatKind {
        match self {
            ExtractedData::Bed(_) => FormatKind::Bed,
            ExtractedData::BedGraph(_) => FormatKind::BedGraph,
            ExtractedData::Gff(_) => FormatKind::Gff,
            ExtractedData::Gtf(_) => FormatKind::Gtf,
            ExtractedData::Psl(_) => FormatKind::Psl,
            ExtractedData::ElandExtended(_) => FormatKind::ElandExtended,
            ExtractedData::Sam(_) => FormatKind::Sam,
            ExtractedData::GdpGene(_) => FormatKind::GdpGene,
            ExtractedData::SoapSnp(_) => FormatKind::SoapSnp,
        }
    }

    /// Convert to scored windows, for windowed lists and binning.
    pub fn into_windows(self) -> Result<WindowColumns, GenPlayError> {
        match self {
            ExtractedData::Bed(columns) => Ok(columns.into_windows()),
            ExtractedData::BedGraph(windows) => Ok(windows),
            ExtractedData::Gff(columns) => Ok(columns.windows),
            ExtractedData::ElandExtended(columns) => Ok(columns.into_windows()),
            ExtractedData::Sam(columns) => Ok(columns.into_windows()),
            other => Err(GenPlayError::UnsupportedFormat(
                other.format().name().to_string(),
            )),
        }
    }

    /// Convert to a gene list.
    pub fn into_genes(self) -> Result<GeneList, GenPlayError> {
        match self {
            ExtractedData::Bed(columns) => Ok(GeneList::from_rows(columns.into_gene_rows())),
            ExtractedData::Gtf(rows) | ExtractedData::Psl(rows) | ExtractedData::GdpGene(rows) => {
                Ok(GeneList::from_rows(rows))
            }
            other => Err(GenPlayError::UnsupportedFormat(
                other.format().name().to_string(),
            )),
        }
    }

    /// Convert to a repeat family list.
    pub fn into_repeat_families(self) -> Result<RepeatFamilyList, GenPlayError> {
        match self {
            ExtractedData::Bed(columns) => Ok(RepeatFamilyList::from_bed(&columns)),
            other => Err(GenPlayError::UnsupportedFormat(
                other.format().name().to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use std::io::Cursor;

    fn run_bedgraph(
        input: &str,
        registry: &ChromosomeRegistry,
        options: &ExtractionOptions,
    ) -> Extraction<WindowColumns> {
        let context = ExtractionContext::new(registry, options);
        let mut supplier = Cursor::new(input.to_string());
        extract(
            BedGraphParser::new(registry.count()),
            &mut supplier,
            &context,
            &CancellationToken::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_scan_tallies_outcomes() {
        let registry = registry! { "chr1" => 100, "chr2" => 100 };
        let input = "track type=bedGraph\n\
                     # comment\n\
                     chr1\t0\t10\t1.5\n\
                     chr1\t10\t20\tnot_a_number\n\
                     chrUn\t0\t10\t1\n\
                     chr1\t20\t30\t0\n\
                     \n\
                     chr2\t0\t10\t2\n";
        let extraction = run_bedgraph(input, &registry, &ExtractionOptions::default());
        let report = extraction.report;
        assert_eq!(report.lines, 8);
        assert_eq!(report.appended, 2);
        assert_eq!(report.not_data, 3);
        assert_eq!(report.malformed, 1);
        assert_eq!(report.unknown_chromosome, 1);
        assert_eq!(report.filtered, 1);
        assert!(!report.stopped_early);
        assert_eq!(extraction.value.size(0), 1);
        assert_eq!(extraction.value.size(1), 1);
    }

    #[test]
    fn test_scan_stops_past_last_selected() {
        let registry = registry! { "chr1" => 100, "chr2" => 100, "chr3" => 100 };
        let options = ExtractionOptions {
            selection: ChromosomeSelectionFilter::from_names(&registry, &["chr2"]).unwrap(),
            ..Default::default()
        };
        let input = "chr1\t0\t10\t1\n\
                     chr2\t0\t10\t2\n\
                     chr2\t10\t20\t3\n\
                     chr3\t0\t10\t4\n\
                     chr2\t20\t30\t5\n";
        let extraction = run_bedgraph(input, &registry, &options);
        assert!(extraction.report.stopped_early);
        assert_eq!(extraction.report.filtered, 1);
        assert_eq!(extraction.report.lines, 4);
        // the unsorted chr2 line after chr3 is never read
        assert_eq!(extraction.value.size(1), 2);
        assert_eq!(extraction.value.size(2), 0);
    }

    #[test]
    fn test_cancellation() {
        let registry = registry! { "chr1" => 100 };
        let options = ExtractionOptions::default();
        let context = ExtractionContext::new(&registry, &options);
        let cancel = CancellationToken::new();
        cancel.clone().cancel();
        let mut supplier = Cursor::new("chr1\t0\t10\t1\n".to_string());
        let result = extract(BedGraphParser::new(1), &mut supplier, &context, &cancel);
        assert!(matches!(result, Err(GenPlayError::Cancelled)));
    }

    #[test]
    fn test_parser_sized_for_other_registry() {
        let registry = registry! { "chr1" => 100, "chr2" => 100 };
        let options = ExtractionOptions::default();
        let context = ExtractionContext::new(&registry, &options);
        let mut supplier = Cursor::new("chr2\t0\t10\t1\n".to_string());
        let result = extract(
            BedGraphParser::new(1),
            &mut supplier,
            &context,
            &CancellationToken::new(),
        );
        assert!(matches!(
            result,
            Err(GenPlayError::ChromosomeCountMismatch(1, 2))
        ));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(FormatKind::detect("a/b/reads.bed.gz").unwrap(), FormatKind::Bed);
        assert_eq!(FormatKind::detect("x.bedGraph").unwrap(), FormatKind::BedGraph);
        assert_eq!(FormatKind::detect("genes.gtf").unwrap(), FormatKind::Gtf);
        assert_eq!(FormatKind::detect("hits.SAM").unwrap(), FormatKind::Sam);
        assert!(FormatKind::detect("noextension").is_err());
        assert!(FormatKind::detect("table.xlsx").is_err());
    }

    #[test]
    fn test_into_windows_unsupported() {
        let data = ExtractedData::SoapSnp(SnpColumns::new(1));
        assert!(matches!(
            data.into_windows(),
            Err(GenPlayError::UnsupportedFormat(_))
        ));
    }
}
