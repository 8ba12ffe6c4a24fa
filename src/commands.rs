//! Command functions of the `genplay` command line tool.
//!
//! Each command reads the genome file into a [`ChromosomeRegistry`], extracts
//! the input file with the parser for its format, builds a list from the
//! extracted columns, and writes the list as TSV.

use std::io::Write;
use std::path::PathBuf;

use crate::binlist::{BinList, BinningOptions};
use crate::chromosomes::{read_chromosome_file, ChromosomeRegistry};
use crate::data::operations::ScoreCalculationMethod;
use crate::error::GenPlayError;
use crate::io::parsers::{
    CancellationToken, ExtractedData, Extraction, ExtractionContext, ExtractionOptions,
    FormatKind,
};
use crate::io::tsv::write_tsv;
use crate::io::OutputFile;
use crate::ranges::StrandOptions;
use crate::reporting::ExtractionReport;
use crate::repeats::RepeatFamilyList;
use crate::selection::ChromosomeSelectionFilter;
use crate::windows::ScoredWindowList;

/// Where the input comes from, and how to extract it.
#[derive(Clone, Debug, Default)]
pub struct InputArgs {
    /// The TSV genome file of chromosome names and their lengths.
    pub genome: PathBuf,
    pub input: Option<PathBuf>,
    /// Detected from the input file extension if not set.
    pub format: Option<FormatKind>,
    /// Chromosomes to extract; all if empty.
    pub chromosomes: Vec<String>,
    pub strand: StrandOptions,
}

impl InputArgs {
    fn selection(
        &self,
        registry: &ChromosomeRegistry,
    ) -> Result<ChromosomeSelectionFilter, GenPlayError> {
        if self.chromosomes.is_empty() {
            Ok(ChromosomeSelectionFilter::all())
        } else {
            ChromosomeSelectionFilter::from_names(registry, &self.chromosomes)
        }
    }

    /// Extract the input file.
    fn extract(
        &self,
        registry: &ChromosomeRegistry,
    ) -> Result<Extraction<ExtractedData>, GenPlayError> {
        let input = self.input.as_ref().ok_or(GenPlayError::MissingInput)?;
        let format = match self.format {
            Some(format) => format,
            None => FormatKind::detect(input)?,
        };
        let options = ExtractionOptions {
            selection: self.selection(registry)?,
            strand: self.strand.clone(),
        };
        if options.selection.is_restricted() {
            log::warn!(
                "selecting chromosomes assumes {} is sorted by chromosome",
                input.display()
            );
        }
        let context = ExtractionContext::new(registry, &options);
        format.extract_file(input, &context, &CancellationToken::new())
    }
}

fn output_file(output: Option<&PathBuf>, header: Option<Vec<String>>) -> OutputFile {
    match output {
        Some(path) => OutputFile::new(path, header),
        None => OutputFile::new_stdout(header),
    }
}

fn bedgraph_header(name: &str) -> Option<Vec<String>> {
    Some(vec![format!("track type=bedGraph name=\"{}\"", name)])
}

/// Bin the scored windows of a file, or load a saved bin list, and write
/// the non-zero bins as bedGraph.
pub fn genplay_bin(
    input: &InputArgs,
    binning: &BinningOptions,
    output: Option<&PathBuf>,
    save: Option<&PathBuf>,
    load: Option<&PathBuf>,
) -> Result<ExtractionReport, GenPlayError> {
    let registry = read_chromosome_file(&input.genome)?;

    let (list, report) = match load {
        Some(path) => {
            let list = BinList::read_from(path)?;
            list.ensure_compatible(&registry)?;
            log::info!(
                "loaded {} bins of {} bp from {}",
                list.len(),
                list.bin_size(),
                path.display()
            );
            (list, ExtractionReport::new())
        }
        None => {
            let extraction = input.extract(&registry)?;
            let windows = extraction.value.into_windows()?;
            let (list, aggregation) = BinList::aggregate(windows, &registry, binning)?;
            log::info!(
                "binned into {} bins of {} bp ({} bytes at {:?})",
                list.len(),
                list.bin_size(),
                list.byte_size(),
                list.precision()
            );
            if aggregation.clamped > 0 {
                log::warn!(
                    "{} bin values did not fit {:?} and were clamped",
                    aggregation.clamped,
                    binning.precision
                );
            }
            if aggregation.dropped > 0 {
                log::warn!(
                    "{} windows past their chromosome end were dropped",
                    aggregation.dropped
                );
            }
            (list, extraction.report)
        }
    };

    if let Some(path) = save {
        list.write_to(path)?;
    }
    if save.is_none() || output.is_some() {
        write_tsv(&list, &registry, &output_file(output, bedgraph_header("bins")))?;
    }
    Ok(report)
}

/// Build a scored window list, resolving overlaps, and write it as bedGraph.
pub fn genplay_windows(
    input: &InputArgs,
    method: ScoreCalculationMethod,
    output: Option<&PathBuf>,
) -> Result<ExtractionReport, GenPlayError> {
    let registry = read_chromosome_file(&input.genome)?;
    let extraction = input.extract(&registry)?;
    let windows = extraction.value.into_windows()?;
    let list = ScoredWindowList::from_windows(windows, method);
    write_tsv(&list, &registry, &output_file(output, bedgraph_header("windows")))?;
    Ok(extraction.report)
}

/// Group gene rows into genes and write them as BED12.
pub fn genplay_genes(
    input: &InputArgs,
    output: Option<&PathBuf>,
) -> Result<ExtractionReport, GenPlayError> {
    let registry = read_chromosome_file(&input.genome)?;
    let extraction = input.extract(&registry)?;
    let genes = extraction.value.into_genes()?;
    write_tsv(&genes, &registry, &output_file(output, None))?;
    Ok(extraction.report)
}

/// Group BED features into repeat families, and write the number of repeats
/// of each family on each chromosome.
pub fn genplay_repeats(
    input: &InputArgs,
    output: Option<&PathBuf>,
) -> Result<ExtractionReport, GenPlayError> {
    let registry = read_chromosome_file(&input.genome)?;
    let extraction = input.extract(&registry)?;
    let families: RepeatFamilyList = extraction.value.into_repeat_families()?;

    let mut writer = output_file(output, None).writer()?;
    for family in families.iter() {
        for chromosome in registry.iter() {
            let size = family.size(chromosome.index);
            if size > 0 {
                writeln!(writer, "{}\t{}\t{}", family.name, chromosome.name, size)?;
            }
        }
    }
    writer.flush()?;
    Ok(extraction.report)
}
