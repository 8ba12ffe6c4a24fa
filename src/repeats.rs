//! Repeat families: BED features grouped by name.
//!
//! A RepeatMasker-style BED file names each feature after its repeat family
//! (e.g. `AluY`, `L1HS`). [`RepeatFamilyList`] groups features by name, in
//! the order families are first seen.

use indexmap::IndexMap;

use crate::columns::ChromosomeColumns;
use crate::io::parsers::BedColumns;
use crate::Position;

/// The family name of unnamed features.
pub const UNNAMED_FAMILY: &str = "unnamed";

/// The repeats of one family, per chromosome.
#[derive(Clone, Debug)]
pub struct RepeatFamily {
    pub name: String,
    pub starts: ChromosomeColumns<Position>,
    pub stops: ChromosomeColumns<Position>,
}

impl RepeatFamily {
    fn new(name: String, chromosome_count: usize) -> Self {
        Self {
            name,
            starts: ChromosomeColumns::new(chromosome_count),
            stops: ChromosomeColumns::new(chromosome_count),
        }
    }

    /// Repeat `position` of chromosome `index`, as `(start, stop)`.
    pub fn get(&self, index: usize, position: usize) -> Option<(Position, Position)> {
        Some((
            *self.starts.get_value(index, position)?,
            *self.stops.get_value(index, position)?,
        ))
    }

    /// The number of repeats of this family on chromosome `index`.
    pub fn size(&self, index: usize) -> usize {
        self.starts.size(index)
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

/// Repeat families, keyed by name in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct RepeatFamilyList {
    families: IndexMap<String, RepeatFamily>,
}

impl RepeatFamilyList {
    pub fn from_bed(columns: &BedColumns) -> Self {
        let chromosome_count = columns.chromosome_count();
        let mut families: IndexMap<String, RepeatFamily> = IndexMap::new();
        for (index, starts) in columns.starts.iter() {
            let stops = columns.stops.get(index).unwrap_or(&[]);
            let names = columns.names.get(index).unwrap_or(&[]);
            for ((start, stop), name) in starts.iter().zip(stops).zip(names) {
                let name = name.as_deref().unwrap_or(UNNAMED_FAMILY);
                let family = families
                    .entry(name.to_string())
                    .or_insert_with(|| RepeatFamily::new(name.to_string(), chromosome_count));
                family.starts.push(index, *start);
                family.stops.push(index, *stop);
            }
        }
        log::debug!("grouped repeats into {} families", families.len());
        Self { families }
    }

    /// Family `position`, in first-seen order.
    pub fn get(&self, position: usize) -> Option<&RepeatFamily> {
        self.families.get_index(position).map(|(_, family)| family)
    }

    pub fn family(&self, name: &str) -> Option<&RepeatFamily> {
        self.families.get(name)
    }

    /// The number of families.
    pub fn size(&self) -> usize {
        self.families.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RepeatFamily> {
        self.families.values()
    }
}
