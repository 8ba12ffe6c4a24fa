//! The per-chromosome column store, [`ChromosomeColumns<T>`].
//!
//! Extractors append the fields of each data line to one column per field;
//! every column holds one growable [`Vec<T>`] per chromosome index. Entries are
//! stored in file-encounter order.

use serde::{Deserialize, Serialize};

use crate::error::GenPlayError;

/// One growable column of `T` per chromosome index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChromosomeColumns<T> {
    columns: Vec<Vec<T>>,
}

impl<T> ChromosomeColumns<T> {
    /// Create a new, empty column store for `chromosome_count` chromosomes.
    pub fn new(chromosome_count: usize) -> Self {
        let mut columns = Vec::with_capacity(chromosome_count);
        columns.resize_with(chromosome_count, Vec::new);
        Self { columns }
    }

    /// Wrap already-built per-chromosome vectors.
    pub fn from_vecs(columns: Vec<Vec<T>>) -> Self {
        Self { columns }
    }

    /// Append a value to the column of chromosome `index`.
    ///
    /// # Panics
    /// This panics if `index` is not a valid chromosome index. Indices come from
    /// the same registry the store was sized from, so an invalid index is an
    /// internal error.
    #[inline]
    pub fn push(&mut self, index: usize, value: T) {
        self.columns[index].push(value)
    }

    /// The number of entries of chromosome `index`, zero if `index` is invalid.
    pub fn size(&self, index: usize) -> usize {
        self.columns.get(index).map_or(0, |column| column.len())
    }

    /// The entries of chromosome `index`.
    pub fn get(&self, index: usize) -> Option<&[T]> {
        self.columns.get(index).map(|column| column.as_slice())
    }

    /// The entry `position` of chromosome `index`.
    pub fn get_value(&self, index: usize, position: usize) -> Option<&T> {
        self.columns.get(index).and_then(|column| column.get(position))
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Vec<T>> {
        self.columns.get_mut(index)
    }

    /// The number of chromosomes.
    pub fn chromosome_count(&self) -> usize {
        self.columns.len()
    }

    /// The total number of entries, over all chromosomes.
    pub fn len(&self) -> usize {
        self.columns.iter().map(|column| column.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over `(chromosome index, entries)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[T])> {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, column)| (index, column.as_slice()))
    }

    /// Consume the store, returning the per-chromosome vectors.
    pub fn into_inner(self) -> Vec<Vec<T>> {
        self.columns
    }

    /// Build a new store by mapping every entry.
    pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> ChromosomeColumns<U> {
        ChromosomeColumns {
            columns: self
                .columns
                .iter()
                .map(|column| column.iter().map(&mut f).collect())
                .collect(),
        }
    }

    /// Check that this store has the number of chromosomes expected.
    pub fn ensure_chromosome_count(&self, expected: usize) -> Result<(), GenPlayError> {
        if self.columns.len() != expected {
            return Err(GenPlayError::ChromosomeCountMismatch(
                self.columns.len(),
                expected,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ChromosomeColumns;

    #[test]
    fn test_push_and_size() {
        let mut columns: ChromosomeColumns<u32> = ChromosomeColumns::new(3);
        columns.push(0, 10);
        columns.push(0, 20);
        columns.push(2, 5);
        assert_eq!(columns.size(0), 2);
        assert_eq!(columns.size(1), 0);
        assert_eq!(columns.size(7), 0);
        assert_eq!(columns.get(0).unwrap(), &[10, 20]);
        assert_eq!(columns.get_value(2, 0), Some(&5));
        assert_eq!(columns.len(), 3);
        assert_eq!(columns.chromosome_count(), 3);
    }

    #[test]
    fn test_map_keeps_layout() {
        let mut columns: ChromosomeColumns<u32> = ChromosomeColumns::new(2);
        columns.push(1, 3);
        let doubled = columns.map(|x| (*x as f64) * 2.0);
        assert_eq!(doubled.get(1).unwrap(), &[6.0]);
        assert!(doubled.get(0).unwrap().is_empty());
    }

    #[test]
    fn test_chromosome_count_mismatch() {
        let columns: ChromosomeColumns<u32> = ChromosomeColumns::new(2);
        assert!(columns.ensure_chromosome_count(2).is_ok());
        assert!(columns.ensure_chromosome_count(3).is_err());
    }
}
