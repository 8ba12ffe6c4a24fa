//! # GenPlay
//!
//! Extraction of genomic interval text formats (BED, bedGraph, GFF, GTF, PSL,
//! SAM, Eland extended, GdpGene, SOAPsnp) into per-chromosome columns, and
//! aggregation of scored intervals into fixed-width, precision-tiered
//! [`BinList`] objects.
//!
//! The pipeline is:
//!
//!  1. Build a [`ChromosomeRegistry`] from the ordered chromosome catalog
//!     (usually a tab-delimited *genome file*, see [`read_chromosome_file()`]).
//!  2. Run a format parser through the shared scan loop, [`extract()`], which
//!     appends each data line to the parser's [`ChromosomeColumns`].
//!  3. Hand the columns to one of the list constructors: [`BinList`],
//!     [`ScoredWindowList`] or [`GeneList`].
//!
//! [`BinList`]: crate::binlist::BinList
//! [`ChromosomeRegistry`]: crate::chromosomes::ChromosomeRegistry
//! [`read_chromosome_file()`]: crate::chromosomes::read_chromosome_file
//! [`extract()`]: crate::io::parsers::extract
//! [`ChromosomeColumns`]: crate::columns::ChromosomeColumns
//! [`ScoredWindowList`]: crate::windows::ScoredWindowList
//! [`GeneList`]: crate::genes::GeneList

/// Build a [`ChromosomeRegistry`] from `name => length` pairs, in order.
///
/// # Example
/// ```
/// use genplay::prelude::*;
///
/// let registry = registry! { "chr1" => 100, "chr2" => 50 };
/// assert_eq!(registry.count(), 2);
/// assert_eq!(registry.resolve("CHR2").unwrap().index, 1);
/// ```
///
/// [`ChromosomeRegistry`]: crate::chromosomes::ChromosomeRegistry
#[macro_export]
macro_rules! registry {
    ( $( $name:expr => $length:expr ),* $(,)? ) => {{
        let catalog: Vec<(String, $crate::Position)> = vec![
            $( ($name.to_string(), $length), )*
        ];
        $crate::chromosomes::ChromosomeRegistry::new(catalog)
            .expect("invalid chromosome catalog")
    }};
}

pub mod binlist;
pub mod chromosomes;
pub mod columns;
pub mod commands;
pub mod data;
pub mod error;
pub mod genes;
pub mod io;
pub mod ranges;
pub mod reporting;
pub mod repeats;
pub mod selection;
pub mod test_utilities;
pub mod windows;

/// Genomic coordinate type. Coordinates are 0-based; stops are exclusive.
pub type Position = u32;

/// Signed offsets applied to positions (e.g. strand shifts).
pub type PositionOffset = i64;

pub mod prelude {
    pub use crate::binlist::{AggregationReport, BinList, BinningOptions};
    pub use crate::chromosomes::{read_chromosome_file, Chromosome, ChromosomeRegistry};
    pub use crate::registry;
    pub use crate::columns::ChromosomeColumns;
    pub use crate::data::operations::ScoreCalculationMethod;
    pub use crate::data::DataPrecision;
    pub use crate::error::GenPlayError;
    pub use crate::genes::{Gene, GeneList, GeneRow, GeneRows};
    pub use crate::io::parsers::{
        extract, CancellationToken, ExtractedData, Extraction, ExtractionContext, ExtractionOptions,
        FormatKind, LineOutcome, LineParser,
    };
    pub use crate::io::{InputFile, LineSupplier, OutputFile};
    pub use crate::ranges::{ScoredInterval, Strand, StrandOptions, WindowColumns};
    pub use crate::reporting::ExtractionReport;
    pub use crate::repeats::RepeatFamilyList;
    pub use crate::selection::{ChromosomeSelectionFilter, ChromosomeStatus};
    pub use crate::windows::ScoredWindowList;
    pub use crate::{Position, PositionOffset};
}
