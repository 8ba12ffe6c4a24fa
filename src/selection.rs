//! Chromosome selection, and the early-exit classification it enables.
//!
//! # ⚠️ Sorted input
//!
//! [`ChromosomeStatus::PastLast`] assumes the input file is sorted by
//! chromosome in the same order as the [`ChromosomeRegistry`]. The scan stops
//! as soon as a chromosome after the last selected one is seen, so lines of a
//! selected chromosome appearing later in an unsorted file are silently
//! dropped. Callers selecting a subset of chromosomes must make sure their
//! files are sorted.
//!
//! [`ChromosomeRegistry`]: crate::chromosomes::ChromosomeRegistry

use crate::chromosomes::{Chromosome, ChromosomeRegistry};
use crate::error::GenPlayError;

/// How the scan loop should treat lines of a given chromosome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChromosomeStatus {
    /// The chromosome is selected: extract its lines.
    Extract,
    /// The chromosome is not selected: skip its lines.
    Skip,
    /// The chromosome comes after the last selected one: the scan is done.
    PastLast,
}

/// An optional mask over chromosome indices. `None` means all chromosomes
/// are selected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChromosomeSelectionFilter {
    selected: Option<Vec<bool>>,
    last_selected: Option<usize>,
}

impl ChromosomeSelectionFilter {
    /// A filter selecting every chromosome.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter from a mask over chromosome indices.
    pub fn from_mask(selected: Vec<bool>) -> Self {
        let last_selected = selected.iter().rposition(|&is_selected| is_selected);
        Self {
            selected: Some(selected),
            last_selected,
        }
    }

    /// Build a filter selecting the named chromosomes.
    pub fn from_names<S: AsRef<str>>(
        registry: &ChromosomeRegistry,
        names: &[S],
    ) -> Result<Self, GenPlayError> {
        let mut mask = vec![false; registry.count()];
        for name in names {
            let chromosome = registry.resolve(name.as_ref())?;
            mask[chromosome.index] = true;
        }
        Ok(Self::from_mask(mask))
    }

    /// Whether a filter is set at all.
    pub fn is_restricted(&self) -> bool {
        self.selected.is_some()
    }

    /// The highest selected chromosome index, if any chromosome is selected.
    /// Unrestricted filters have no last selected index.
    pub fn last_selected_index(&self) -> Option<usize> {
        self.last_selected
    }

    /// Classify a chromosome as [`ChromosomeStatus::Extract`],
    /// [`ChromosomeStatus::Skip`] or [`ChromosomeStatus::PastLast`].
    pub fn classify(&self, chromosome: &Chromosome) -> ChromosomeStatus {
        self.classify_index(chromosome.index)
    }

    pub fn classify_index(&self, index: usize) -> ChromosomeStatus {
        let selected = match &self.selected {
            None => return ChromosomeStatus::Extract,
            Some(selected) => selected,
        };
        match self.last_selected {
            Some(last) if index <= last => {
                if selected.get(index).copied().unwrap_or(false) {
                    ChromosomeStatus::Extract
                } else {
                    ChromosomeStatus::Skip
                }
            }
            // nothing selected, or beyond the last selected chromosome
            _ => ChromosomeStatus::PastLast,
        }
    }
}
