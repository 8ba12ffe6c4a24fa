//! TSV serializing helpers.

use std::io::Write;

use crate::chromosomes::ChromosomeRegistry;
use crate::error::GenPlayError;
use crate::io::OutputFile;

/// Defines how to serialize something to TSV, given the registry that
/// resolves chromosome indices back to names.
pub trait TsvSerialize {
    /// Write every record as one TSV line.
    fn write_tsv(
        &self,
        registry: &ChromosomeRegistry,
        writer: &mut dyn Write,
    ) -> Result<(), GenPlayError>;
}

/// Write a [`TsvSerialize`] object to an [`OutputFile`].
pub fn write_tsv<T: TsvSerialize>(
    value: &T,
    registry: &ChromosomeRegistry,
    output: &OutputFile,
) -> Result<(), GenPlayError> {
    let mut writer = output.writer()?;
    value.write_tsv(registry, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Join values with commas, as in BED12 list columns.
pub fn comma_list<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
