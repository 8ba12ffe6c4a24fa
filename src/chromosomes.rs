//! The ordered chromosome catalog, [`ChromosomeRegistry`].
//!
//! Every per-chromosome column in this crate is indexed by the dense index
//! a chromosome has in the registry, so the registry is built once, before
//! any parsing begins, and never changes afterwards. It is safe to share
//! between threads.

use csv::ReaderBuilder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::GenPlayError;
use crate::io::InputFile;
use crate::Position;

/// A chromosome of the genome being worked on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chromosome {
    pub index: usize,
    pub name: String,
    pub length: Position,
}

/// Ordered catalog of chromosomes: name → index → length.
///
/// Lookups are case-insensitive and tolerate a missing or extra `chr`
/// prefix, so `"chr1"`, `"CHR1"` and `"1"` all resolve to the same
/// chromosome.
#[derive(Clone, Debug, PartialEq)]
pub struct ChromosomeRegistry {
    chromosomes: Vec<Chromosome>,
    lookup: IndexMap<String, usize>,
}

/// Normalized lookup key: lowercase, without the `chr` prefix.
fn lookup_key(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    match lower.strip_prefix("chr") {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => lower,
    }
}

impl ChromosomeRegistry {
    /// Build a registry from the ordered `(name, length)` catalog.
    pub fn new(catalog: Vec<(String, Position)>) -> Result<Self, GenPlayError> {
        let mut chromosomes = Vec::with_capacity(catalog.len());
        let mut lookup = IndexMap::with_capacity(catalog.len());
        for (index, (name, length)) in catalog.into_iter().enumerate() {
            let key = lookup_key(&name);
            if lookup.contains_key(&key) {
                return Err(GenPlayError::DuplicateChromosome(name));
            }
            lookup.insert(key, index);
            chromosomes.push(Chromosome {
                index,
                name,
                length,
            });
        }
        Ok(Self {
            chromosomes,
            lookup,
        })
    }

    /// Resolve a chromosome name, as it appears in a data file.
    pub fn resolve(&self, name: &str) -> Result<&Chromosome, GenPlayError> {
        self.lookup
            .get(&lookup_key(name))
            .map(|&index| &self.chromosomes[index])
            .ok_or_else(|| GenPlayError::UnknownChromosome(name.to_string()))
    }

    /// Get the index of a chromosome in this registry.
    pub fn index_of(&self, chromosome: &Chromosome) -> Result<usize, GenPlayError> {
        self.resolve(&chromosome.name).map(|c| c.index)
    }

    /// Get a chromosome by its index.
    pub fn get(&self, index: usize) -> Result<&Chromosome, GenPlayError> {
        self.chromosomes
            .get(index)
            .ok_or(GenPlayError::ChromosomeIndexOutOfRange(index, self.count()))
    }

    /// The number of chromosomes.
    pub fn count(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// The chromosome names, in registry order.
    pub fn names(&self) -> Vec<String> {
        self.chromosomes.iter().map(|c| c.name.clone()).collect()
    }

    /// The chromosome lengths, in registry order.
    pub fn lengths(&self) -> Vec<Position> {
        self.chromosomes.iter().map(|c| c.length).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chromosome> {
        self.chromosomes.iter()
    }
}

/// Read a tab-delimited *genome file* of chromosome names and their lengths,
/// in the order they should be registered. Lines starting with `#` are ignored,
/// and the file may be gzip-compressed.
pub fn read_chromosome_file(
    filepath: impl Into<PathBuf>,
) -> Result<ChromosomeRegistry, GenPlayError> {
    let filepath = filepath.into();
    let input_file = InputFile::new(&filepath);
    let reader = input_file.reader()?;

    let mut tsv = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut catalog = Vec::new();
    for result in tsv.records() {
        let record = result?;
        if record.len() < 2 {
            return Err(GenPlayError::InvalidChromosomeFile(format!(
                "line {} has fewer than two columns",
                catalog.len() + 1
            )));
        }
        let name = record[0].trim().to_string();
        let length: Position = record[1].trim().parse().map_err(|_| {
            GenPlayError::InvalidChromosomeFile(format!(
                "invalid length '{}' for chromosome '{}'",
                &record[1], name
            ))
        })?;
        catalog.push((name, length));
    }
    if catalog.is_empty() {
        return Err(GenPlayError::InvalidChromosomeFile(format!(
            "'{}' contains no chromosomes",
            filepath.display()
        )));
    }
    log::debug!(
        "read {} chromosomes from {}",
        catalog.len(),
        filepath.display()
    );
    ChromosomeRegistry::new(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use crate::test_utilities::temp_text_file;

    #[test]
    fn test_resolve_case_insensitive() {
        let registry = registry! { "chr1" => 100, "chrX" => 50 };
        assert_eq!(registry.resolve("chr1").unwrap().index, 0);
        assert_eq!(registry.resolve("CHR1").unwrap().index, 0);
        assert_eq!(registry.resolve("x").unwrap().name, "chrX");
        assert_eq!(registry.resolve("chrx").unwrap().length, 50);
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = registry! { "chr1" => 100 };
        assert!(matches!(
            registry.resolve("chr2"),
            Err(GenPlayError::UnknownChromosome(name)) if name == "chr2"
        ));
    }

    #[test]
    fn test_duplicate_names() {
        let result = ChromosomeRegistry::new(vec![
            ("chr1".to_string(), 10),
            ("CHR1".to_string(), 20),
        ]);
        assert!(matches!(result, Err(GenPlayError::DuplicateChromosome(_))));
    }

    #[test]
    fn test_index_of_and_get() {
        let registry = registry! { "chr1" => 100, "chr2" => 50, "chr3" => 20 };
        let chr3 = registry.get(2).unwrap().clone();
        assert_eq!(registry.index_of(&chr3).unwrap(), 2);
        assert!(registry.get(3).is_err());
        assert_eq!(registry.names(), vec!["chr1", "chr2", "chr3"]);
        assert_eq!(registry.lengths(), vec![100, 50, 20]);
    }

    #[test]
    fn test_read_chromosome_file() {
        let file = temp_text_file("# genome\nchr1\t1000\nchr2\t500\n");
        let registry = read_chromosome_file(file.path()).unwrap();
        assert_eq!(registry.count(), 2);
        assert_eq!(registry.get(1).unwrap().length, 500);
    }

    #[test]
    fn test_read_chromosome_file_invalid() {
        let file = temp_text_file("chr1\tlong\n");
        assert!(matches!(
            read_chromosome_file(file.path()),
            Err(GenPlayError::InvalidChromosomeFile(_))
        ));
    }
}
