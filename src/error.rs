//! The [`GenPlayError`] `enum` definition and error messages.
//!
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// The [`GenPlayError`] defines the standard set of errors that should
/// be passed to the user.
#[derive(Debug, Error)]
pub enum GenPlayError {
    // IO related errors
    #[error("File reading error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("TSV reading error: {0}")]
    CsvError(#[from] csv::Error),

    // Per-line parsing errors: these are tallied by the scan loop, never fatal.
    #[error("Chromosome '{0}' is not in the chromosome registry")]
    UnknownChromosome(String),
    #[error("Malformed data line: {0}")]
    MalformedLine(String),
    #[error("Integer parsing error: {0}")]
    ParseIntError(#[from] ParseIntError),
    #[error("Float parsing error: {0}")]
    ParseFloatError(#[from] ParseFloatError),

    // Chromosome catalog errors
    #[error("Chromosome file is invalid: {0}")]
    InvalidChromosomeFile(String),
    #[error("Chromosome '{0}' is duplicated (names are case-insensitive)")]
    DuplicateChromosome(String),
    #[error("Chromosome index {0} is out of range (registry has {1} chromosomes)")]
    ChromosomeIndexOutOfRange(usize, usize),

    // Aggregation errors
    #[error("Bin size must be strictly positive, got {0}")]
    IllegalBinSize(i64),
    #[error("Column store has {0} chromosomes but the registry has {1}")]
    ChromosomeCountMismatch(usize, usize),

    #[error("Extraction was cancelled")]
    Cancelled,

    // Persisted bin lists
    #[error("Bin list serialization error: {0}")]
    BincodeError(#[from] bincode::Error),
    #[error("Invalid bin list file: {0}")]
    InvalidBinListFile(String),

    // Format detection
    #[error("Could not detect genomic file format from extension.")]
    CouldNotDetectFormat,
    #[error("Format '{0}' is not supported by this operation")]
    UnsupportedFormat(String),

    // Command line tool related errors
    #[error("Command line argument error: {0}")]
    ArgumentError(#[from] clap::error::Error),
    #[error("An input file is required unless a saved bin list is loaded")]
    MissingInput,
    #[error("Could not set up the thread pool: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),
}

impl GenPlayError {
    /// Whether this error rejects a single data line, in which case the scan
    /// continues with the next line.
    pub fn is_line_error(&self) -> bool {
        matches!(
            self,
            GenPlayError::UnknownChromosome(_)
                | GenPlayError::MalformedLine(_)
                | GenPlayError::ParseIntError(_)
                | GenPlayError::ParseFloatError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::GenPlayError;

    #[test]
    fn test_line_errors() {
        assert!(GenPlayError::UnknownChromosome("chrZ".to_string()).is_line_error());
        assert!(GenPlayError::MalformedLine("chr1".to_string()).is_line_error());
        assert!(!GenPlayError::IllegalBinSize(0).is_line_error());
        assert!(!GenPlayError::Cancelled.is_line_error());
    }
}
