//! Scored windows, with overlapping windows resolved, [`ScoredWindowList`].
//!
//! Windows are sorted by start. Where windows of a chromosome overlap, the
//! chromosome is cut into elementary segments at every window boundary, and
//! each covered segment gets the combination (per [`ScoreCalculationMethod`])
//! of the scores of the windows covering it. Averages are unweighted here,
//! since every window covering a segment covers all of it. Zero-width point
//! features are kept as they are.

use std::io::Write;

use rayon::prelude::*;

use crate::chromosomes::ChromosomeRegistry;
use crate::columns::ChromosomeColumns;
use crate::data::operations::ScoreCalculationMethod;
use crate::error::GenPlayError;
use crate::io::tsv::TsvSerialize;
use crate::ranges::{ScoredInterval, WindowColumns};

/// Cut overlapping intervals into non-overlapping segments.
///
/// `intervals` must be sorted by start. Uncovered gaps produce no segment.
pub fn resolve_overlaps(
    intervals: &[ScoredInterval],
    method: ScoreCalculationMethod,
) -> Vec<ScoredInterval> {
    let (points, ranges): (Vec<ScoredInterval>, Vec<ScoredInterval>) = intervals
        .iter()
        .copied()
        .partition(|interval| interval.start == interval.stop);

    let mut boundaries: Vec<_> = ranges
        .iter()
        .flat_map(|interval| [interval.start, interval.stop])
        .collect();
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut segments = Vec::with_capacity(boundaries.len() + points.len());
    let mut active: Vec<&ScoredInterval> = Vec::new();
    let mut next = 0;
    for pair in boundaries.windows(2) {
        let (start, stop) = (pair[0], pair[1]);
        while next < ranges.len() && ranges[next].start <= start {
            active.push(&ranges[next]);
            next += 1;
        }
        active.retain(|interval| interval.stop > start);
        if active.is_empty() {
            continue;
        }
        let mut accumulator = method.accumulator();
        active
            .iter()
            .for_each(|interval| accumulator.add(interval.score, 1.0));
        if let Some(score) = accumulator.result() {
            segments.push(ScoredInterval::new(start, stop, score));
        }
    }

    segments.extend(points);
    segments.sort_by_key(|interval| (interval.start, interval.stop));
    segments
}

/// Scored windows per chromosome, sorted by start, with no overlaps between
/// windows of non-zero width.
#[derive(Clone, Debug)]
pub struct ScoredWindowList {
    windows: ChromosomeColumns<ScoredInterval>,
    method: ScoreCalculationMethod,
}

impl ScoredWindowList {
    /// Build from extracted windows. `method` combines overlapping scores.
    pub fn from_windows(windows: WindowColumns, method: ScoreCalculationMethod) -> Self {
        let columns = (0..windows.chromosome_count())
            .into_par_iter()
            .map(|index| {
                let mut intervals = windows.intervals(index);
                intervals.sort_by_key(|interval| (interval.start, interval.stop));
                if windows.has_overlap(index) {
                    log::debug!("resolving overlapping windows on chromosome {}", index);
                    resolve_overlaps(&intervals, method)
                } else {
                    intervals
                }
            })
            .collect();
        Self {
            windows: ChromosomeColumns::from_vecs(columns),
            method,
        }
    }

    /// Window `position` of chromosome `index`.
    pub fn get(&self, index: usize, position: usize) -> Option<&ScoredInterval> {
        self.windows.get_value(index, position)
    }

    /// The number of windows of chromosome `index`.
    pub fn size(&self, index: usize) -> usize {
        self.windows.size(index)
    }

    pub fn windows(&self, index: usize) -> &[ScoredInterval] {
        self.windows.get(index).unwrap_or(&[])
    }

    pub fn method(&self) -> ScoreCalculationMethod {
        self.method
    }

    pub fn chromosome_count(&self) -> usize {
        self.windows.chromosome_count()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl TsvSerialize for ScoredWindowList {
    /// Write windows as bedGraph.
    fn write_tsv(
        &self,
        registry: &ChromosomeRegistry,
        writer: &mut dyn Write,
    ) -> Result<(), GenPlayError> {
        for (index, windows) in self.windows.iter() {
            let chromosome = registry.get(index)?;
            for window in windows {
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}",
                    chromosome.name, window.start, window.stop, window.score
                )?;
            }
        }
        Ok(())
    }
}
