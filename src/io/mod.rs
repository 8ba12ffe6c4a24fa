//! Types and methods for reading and parsing input and writing output.

pub mod file;
pub mod parsers;
pub mod tsv;

pub use file::{InputFile, LineSupplier, OutputFile};
pub use parsers::{extract, FormatKind, LineOutcome, LineParser};
pub use tsv::{write_tsv, TsvSerialize};
