//! Fixed-width binned scores, [`BinList`].
//!
//! A [`BinList`] tiles every chromosome of a [`ChromosomeRegistry`] with bins
//! of `bin_size` basepairs (the last bin of a chromosome may extend past its
//! end), and stores one score per bin at a [`DataPrecision`].
//!
//! # Aggregation
//!
//! Scored windows are aggregated into bins per chromosome, in parallel.
//!
//!  - **Direct placement**: if the windows of a chromosome are sorted,
//!    non-overlapping, exactly one bin wide and aligned on bin boundaries,
//!    each window *is* a bin and its score is stored as-is.
//!  - **General case**: a window `[start, stop)` contributes to every bin from
//!    `start / bin_size` through `(stop - 1) / bin_size` (a zero-width window
//!    contributes to the bin `start / bin_size`). Contributions to a bin are
//!    combined with the [`ScoreCalculationMethod`]; averages are weighted by
//!    the overlap between window and bin, a zero-width window weighing as one
//!    basepair.
//!
//! Bins no window touches are zero. Windows starting at or past the last bin
//! of their chromosome are dropped. Values outside the range of the storage
//! tier are clamped; integer tiers round half to even. Both are counted in
//! the [`AggregationReport`].
//!
//! [`ChromosomeRegistry`]: crate::chromosomes::ChromosomeRegistry

use bincode::Options;
use flate2::write::GzEncoder;
use flate2::Compression;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::chromosomes::ChromosomeRegistry;
use crate::data::operations::{ScoreAccumulator, ScoreCalculationMethod};
use crate::data::{BinStorage, DataPrecision};
use crate::error::GenPlayError;
use crate::io::tsv::TsvSerialize;
use crate::io::InputFile;
use crate::ranges::overlaps::{has_overlap, is_sorted_by_start};
use crate::ranges::WindowColumns;
use crate::Position;

/// Leading bytes of serialized bin lists.
pub const BINLIST_MAGIC: &[u8; 8] = b"GPBINLST";

/// Version of the serialized bin list layout, stored little-endian after
/// the magic bytes.
pub const BINLIST_VERSION: u32 = 2;

/// Upper bound on the decoded size of a serialized bin list.
pub const MAX_BINLIST_BYTES: u64 = 1 << 32;

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new().with_limit(MAX_BINLIST_BYTES)
}

/// The parameters of a binning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinningOptions {
    /// Width of each bin, in basepairs. Must be positive.
    pub bin_size: i64,
    pub precision: DataPrecision,
    pub method: ScoreCalculationMethod,
}

impl BinningOptions {
    pub fn new(bin_size: i64, precision: DataPrecision, method: ScoreCalculationMethod) -> Self {
        Self {
            bin_size,
            precision,
            method,
        }
    }

    /// The bin size as a [`Position`], or an error if it is not positive or
    /// does not fit.
    pub fn validated_bin_size(&self) -> Result<Position, GenPlayError> {
        match Position::try_from(self.bin_size) {
            Ok(bin_size) if bin_size > 0 => Ok(bin_size),
            _ => Err(GenPlayError::IllegalBinSize(self.bin_size)),
        }
    }
}

/// What happened during one aggregation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregationReport {
    /// Bin values clamped to the storage tier.
    pub clamped: usize,
    /// Windows dropped for starting past the last bin of their chromosome.
    pub dropped: usize,
    /// Chromosomes aggregated by direct placement.
    pub direct_placement: usize,
}

impl AggregationReport {
    fn merge(&mut self, other: &AggregationReport) {
        self.clamped += other.clamped;
        self.dropped += other.dropped;
        self.direct_placement += other.direct_placement;
    }
}

/// The number of bins of a chromosome of `length` basepairs.
pub fn bin_count(length: Position, bin_size: Position) -> usize {
    length.div_ceil(bin_size) as usize
}

/// Whether every window is exactly one bin, in bin order with no overlaps.
fn is_direct_placement(starts: &[Position], stops: &[Position], bin_size: Position) -> bool {
    starts
        .iter()
        .zip(stops)
        .all(|(&start, &stop)| start % bin_size == 0 && stop.checked_sub(start) == Some(bin_size))
        && is_sorted_by_start(starts)
        && !has_overlap(starts, stops)
}

/// Aggregate the windows of one chromosome.
fn aggregate_chromosome(
    starts: &[Position],
    stops: &[Position],
    scores: &[f64],
    length: Position,
    bin_size: Position,
    options: &BinningOptions,
) -> (BinStorage, AggregationReport) {
    let nbins = bin_count(length, bin_size);
    let mut bins = BinStorage::zeros(options.precision, nbins);
    let mut report = AggregationReport::default();

    if !starts.is_empty() && is_direct_placement(starts, stops, bin_size) {
        report.direct_placement = 1;
        for (&start, &score) in starts.iter().zip(scores) {
            let bin = (start / bin_size) as usize;
            if bin >= nbins {
                report.dropped += 1;
                continue;
            }
            let value = match options.method {
                ScoreCalculationMethod::Count => 1.0,
                _ => score,
            };
            report.clamped += bins.set(bin, value) as usize;
        }
        return (bins, report);
    }

    let first_bin = |i: usize| (starts[i] / bin_size) as usize;
    let last_bin = |i: usize| {
        if stops[i] > starts[i] {
            ((stops[i] - 1) / bin_size) as usize
        } else {
            first_bin(i)
        }
    };

    let mut order: Vec<usize> = (0..starts.len())
        .filter(|&i| {
            let kept = first_bin(i) < nbins;
            report.dropped += !kept as usize;
            kept
        })
        .collect();
    order.sort_by_key(|&i| (starts[i], stops[i]));

    // sweep bins left to right, keeping the windows touching the current bin
    let mut active: Vec<usize> = Vec::new();
    let mut next = 0;
    let mut bin = 0;
    while bin < nbins {
        if active.is_empty() {
            match order.get(next) {
                Some(&i) => bin = bin.max(first_bin(i)),
                None => break,
            }
        }
        while next < order.len() && first_bin(order[next]) <= bin {
            active.push(order[next]);
            next += 1;
        }
        active.retain(|&i| last_bin(i) >= bin);

        let bin_start = (bin as Position).saturating_mul(bin_size);
        let bin_stop = bin_start.saturating_add(bin_size);
        let mut accumulator = ScoreAccumulator::new(options.method);
        for &i in &active {
            let weight = if stops[i] > starts[i] {
                let overlap_start = starts[i].max(bin_start);
                let overlap_stop = stops[i].min(bin_stop);
                overlap_stop.saturating_sub(overlap_start) as f64
            } else {
                1.0
            };
            accumulator.add(scores[i], weight);
        }
        if let Some(value) = accumulator.result() {
            report.clamped += bins.set(bin, value) as usize;
        }
        bin += 1;
    }
    (bins, report)
}

/// Binned scores for every chromosome of a registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinList {
    bin_size: Position,
    precision: DataPrecision,
    method: ScoreCalculationMethod,
    chromosome_lengths: Vec<Position>,
    bins: Vec<BinStorage>,
}

impl BinList {
    /// Aggregate scored windows into bins.
    pub fn from_windows(
        windows: WindowColumns,
        registry: &ChromosomeRegistry,
        options: &BinningOptions,
    ) -> Result<Self, GenPlayError> {
        Self::aggregate(windows, registry, options).map(|(list, _)| list)
    }

    /// Aggregate scored windows into bins, also returning what happened.
    pub fn aggregate(
        windows: WindowColumns,
        registry: &ChromosomeRegistry,
        options: &BinningOptions,
    ) -> Result<(Self, AggregationReport), GenPlayError> {
        let bin_size = options.validated_bin_size()?;
        windows.starts.ensure_chromosome_count(registry.count())?;
        let lengths = registry.lengths();

        let results: Vec<(BinStorage, AggregationReport)> = lengths
            .par_iter()
            .enumerate()
            .map(|(index, &length)| {
                aggregate_chromosome(
                    windows.starts.get(index).unwrap_or(&[]),
                    windows.stops.get(index).unwrap_or(&[]),
                    windows.scores.get(index).unwrap_or(&[]),
                    length,
                    bin_size,
                    options,
                )
            })
            .collect();

        let mut report = AggregationReport::default();
        let mut bins = Vec::with_capacity(results.len());
        for (storage, chromosome_report) in results {
            report.merge(&chromosome_report);
            bins.push(storage);
        }
        if report.clamped > 0 {
            log::debug!(
                "{} bin values clamped to the {:?} range",
                report.clamped,
                options.precision
            );
        }
        if report.dropped > 0 {
            log::debug!("{} windows past chromosome ends dropped", report.dropped);
        }

        let list = Self {
            bin_size,
            precision: options.precision,
            method: options.method,
            chromosome_lengths: lengths,
            bins,
        };
        Ok((list, report))
    }

    /// An all-zero bin list.
    pub fn zeros(
        registry: &ChromosomeRegistry,
        options: &BinningOptions,
    ) -> Result<Self, GenPlayError> {
        Self::from_windows(WindowColumns::new(registry.count()), registry, options)
    }

    /// The score of bin `bin` of chromosome `index`.
    pub fn get(&self, index: usize, bin: usize) -> Option<f64> {
        self.bins.get(index).and_then(|storage| storage.get(bin))
    }

    /// The number of bins of chromosome `index`, zero if `index` is invalid.
    pub fn size(&self, index: usize) -> usize {
        self.bins.get(index).map_or(0, |storage| storage.len())
    }

    pub fn bins(&self, index: usize) -> Option<&BinStorage> {
        self.bins.get(index)
    }

    pub fn bin_size(&self) -> Position {
        self.bin_size
    }

    pub fn precision(&self) -> DataPrecision {
        self.precision
    }

    pub fn method(&self) -> ScoreCalculationMethod {
        self.method
    }

    pub fn chromosome_count(&self) -> usize {
        self.bins.len()
    }

    /// The number of bytes taken by the stored bin values.
    pub fn byte_size(&self) -> usize {
        self.len() * self.precision.byte_size()
    }

    /// The total number of bins.
    pub fn len(&self) -> usize {
        self.bins.iter().map(|storage| storage.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check this list was built for the chromosomes of `registry`.
    pub fn ensure_compatible(&self, registry: &ChromosomeRegistry) -> Result<(), GenPlayError> {
        if self.chromosome_count() != registry.count() {
            return Err(GenPlayError::ChromosomeCountMismatch(
                self.chromosome_count(),
                registry.count(),
            ));
        }
        for (chromosome, &length) in registry.iter().zip(&self.chromosome_lengths) {
            if chromosome.length != length {
                return Err(GenPlayError::InvalidBinListFile(format!(
                    "chromosome '{}' is {} bp long, but the bin list was built for {} bp",
                    chromosome.name, chromosome.length, length
                )));
            }
        }
        Ok(())
    }

    /// Save to a gzip-compressed binary file.
    pub fn write_to(&self, filepath: impl AsRef<Path>) -> Result<(), GenPlayError> {
        let file = File::create(filepath.as_ref())?;
        let mut writer = GzEncoder::new(BufWriter::new(file), Compression::default());
        writer.write_all(BINLIST_MAGIC)?;
        writer.write_all(&BINLIST_VERSION.to_le_bytes())?;
        bincode_options().serialize_into(&mut writer, self)?;
        writer.finish()?.flush()?;
        log::info!("saved bin list to {}", filepath.as_ref().display());
        Ok(())
    }

    /// Load a bin list saved by [`BinList::write_to()`]. The stored bins are
    /// used as they are.
    pub fn read_from(filepath: impl AsRef<Path>) -> Result<Self, GenPlayError> {
        let filepath = filepath.as_ref();
        let invalid = || GenPlayError::InvalidBinListFile(filepath.display().to_string());
        let mut reader = InputFile::new(filepath).reader()?;

        let mut magic = [0u8; 8];
        let mut version = [0u8; 4];
        reader.read_exact(&mut magic).map_err(|_| invalid())?;
        reader.read_exact(&mut version).map_err(|_| invalid())?;
        if &magic != BINLIST_MAGIC || u32::from_le_bytes(version) != BINLIST_VERSION {
            return Err(invalid());
        }

        let list: BinList = bincode_options()
            .deserialize_from(&mut reader)
            .map_err(|_| invalid())?;
        if list.bins.len() != list.chromosome_lengths.len() {
            return Err(invalid());
        }
        Ok(list)
    }
}

impl TsvSerialize for BinList {
    /// Write non-zero bins as bedGraph. The last bin of a chromosome is cut
    /// at the chromosome end.
    fn write_tsv(
        &self,
        registry: &ChromosomeRegistry,
        writer: &mut dyn Write,
    ) -> Result<(), GenPlayError> {
        for (index, storage) in self.bins.iter().enumerate() {
            let chromosome = registry.get(index)?;
            let length = self.chromosome_lengths[index];
            for (bin, value) in storage.iter().enumerate() {
                if value == 0.0 {
                    continue;
                }
                let start = (bin as Position).saturating_mul(self.bin_size);
                let stop = start.saturating_add(self.bin_size).min(length);
                writeln!(writer, "{}\t{}\t{}\t{}", chromosome.name, start, stop, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::random_windows;

    fn options(bin_size: i64, method: ScoreCalculationMethod) -> BinningOptions {
        BinningOptions::new(bin_size, DataPrecision::Float64, method)
    }

    fn windows(count: usize, intervals: &[(usize, Position, Position, f64)]) -> WindowColumns {
        let mut windows = WindowColumns::new(count);
        for &(index, start, stop, score) in intervals {
            windows.push(index, start, stop, score);
        }
        windows
    }

    #[test]
    fn test_bin_counts() {
        let registry = crate::registry! { "chr1" => 1000, "chr2" => 1001, "chr3" => 5 };
        let list = BinList::zeros(&registry, &options(100, ScoreCalculationMethod::Sum)).unwrap();
        assert_eq!(list.size(0), 10);
        assert_eq!(list.size(1), 11);
        assert_eq!(list.size(2), 1);
        assert_eq!(list.size(3), 0);
        for (index, chromosome) in registry.iter().enumerate() {
            let covered = list.size(index) as Position * list.bin_size();
            assert!(covered >= chromosome.length && covered - chromosome.length < 100);
        }
    }

    #[test]
    fn test_illegal_bin_size() {
        let registry = crate::registry! { "chr1" => 1000 };
        for bin_size in [0, -5, i64::MAX] {
            let result = BinList::zeros(&registry, &options(bin_size, ScoreCalculationMethod::Sum));
            assert!(matches!(result, Err(GenPlayError::IllegalBinSize(_))));
        }
    }

    #[test]
    fn test_chromosome_count_mismatch() {
        let registry = crate::registry! { "chr1" => 1000 };
        let result = BinList::from_windows(
            WindowColumns::new(2),
            &registry,
            &options(10, ScoreCalculationMethod::Sum),
        );
        assert!(matches!(
            result,
            Err(GenPlayError::ChromosomeCountMismatch(2, 1))
        ));
    }

    #[test]
    fn test_average_single_bin() {
        let registry = crate::registry! { "chr1" => 1000 };
        let windows = windows(1, &[(0, 0, 50, 10.0), (0, 50, 100, 20.0)]);
        let list = BinList::from_windows(
            windows,
            &registry,
            &options(100, ScoreCalculationMethod::Average),
        )
        .unwrap();
        assert_eq!(list.get(0, 0), Some(15.0));
        assert_eq!(list.get(0, 1), Some(0.0));
    }

    #[test]
    fn test_weighted_average() {
        let registry = crate::registry! { "chr1" => 1000 };
        let windows = windows(1, &[(0, 0, 75, 10.0), (0, 75, 100, 20.0)]);
        let list = BinList::from_windows(
            windows,
            &registry,
            &options(100, ScoreCalculationMethod::Average),
        )
        .unwrap();
        assert_eq!(list.get(0, 0), Some(12.5));
    }

    #[test]
    fn test_spanning_window() {
        let registry = crate::registry! { "chr1" => 1000 };
        let windows = windows(1, &[(0, 150, 350, 2.0), (0, 399, 400, 1.0)]);
        let list = BinList::from_windows(
            windows,
            &registry,
            &options(100, ScoreCalculationMethod::Sum),
        )
        .unwrap();
        let values: Vec<f64> = (0..5).map(|bin| list.get(0, bin).unwrap()).collect();
        assert_eq!(values, vec![0.0, 2.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn test_direct_placement() {
        let registry = crate::registry! { "chr1" => 50 };
        let windows = windows(1, &[(0, 0, 10, 1.0), (0, 20, 30, -3.0), (0, 40, 50, 2.5)]);
        let (list, report) = BinList::aggregate(
            windows,
            &registry,
            &options(10, ScoreCalculationMethod::Maximum),
        )
        .unwrap();
        assert_eq!(report.direct_placement, 1);
        let values: Vec<f64> = (0..5).map(|bin| list.get(0, bin).unwrap()).collect();
        assert_eq!(values, vec![1.0, 0.0, -3.0, 0.0, 2.5]);
    }

    #[test]
    fn test_direct_placement_count() {
        let registry = crate::registry! { "chr1" => 30 };
        let windows = windows(1, &[(0, 0, 10, 7.0), (0, 10, 20, 7.0)]);
        let list = BinList::from_windows(
            windows,
            &registry,
            &options(10, ScoreCalculationMethod::Count),
        )
        .unwrap();
        assert_eq!(list.get(0, 0), Some(1.0));
        assert_eq!(list.get(0, 2), Some(0.0));
    }

    #[test]
    fn test_direct_placement_matches_general_path() {
        // the same windows, unsorted, take the general path
        let registry = crate::registry! { "chr1" => 100 };
        let sorted = windows(1, &[(0, 10, 20, 4.0), (0, 50, 60, 6.0)]);
        let unsorted = windows(1, &[(0, 50, 60, 6.0), (0, 10, 20, 4.0)]);
        let options = options(10, ScoreCalculationMethod::Average);
        let (direct, report) = BinList::aggregate(sorted, &registry, &options).unwrap();
        let (general, general_report) = BinList::aggregate(unsorted, &registry, &options).unwrap();
        assert_eq!(report.direct_placement, 1);
        assert_eq!(general_report.direct_placement, 0);
        assert_eq!(direct, general);
    }

    #[test]
    fn test_point_feature() {
        let registry = crate::registry! { "chr1" => 100 };
        let windows = windows(1, &[(0, 25, 25, 3.0), (0, 20, 30, 1.0)]);
        let list = BinList::from_windows(
            windows,
            &registry,
            &options(10, ScoreCalculationMethod::Average),
        )
        .unwrap();
        // the point weighs one basepair against the ten of the window
        assert_eq!(list.get(0, 2), Some((3.0 + 10.0) / 11.0));
    }

    #[test]
    fn test_windows_past_end_dropped() {
        let registry = crate::registry! { "chr1" => 100 };
        let windows = windows(1, &[(0, 95, 120, 1.0), (0, 100, 110, 1.0), (0, 500, 600, 1.0)]);
        let (list, report) = BinList::aggregate(
            windows,
            &registry,
            &options(10, ScoreCalculationMethod::Sum),
        )
        .unwrap();
        assert_eq!(report.dropped, 2);
        assert_eq!(list.size(0), 10);
        assert_eq!(list.get(0, 9), Some(1.0));
    }

    #[test]
    fn test_clamping_reported() {
        let registry = crate::registry! { "chr1" => 20 };
        let windows = windows(1, &[(0, 0, 10, 300.0), (0, 10, 20, 2.5)]);
        let options = BinningOptions::new(10, DataPrecision::Int8, ScoreCalculationMethod::Sum);
        let (list, report) = BinList::aggregate(windows, &registry, &options).unwrap();
        assert_eq!(report.clamped, 1);
        assert_eq!(list.get(0, 0), Some(127.0));
        assert_eq!(list.get(0, 1), Some(2.0));
    }

    #[test]
    fn test_negative_maximum() {
        let registry = crate::registry! { "chr1" => 20 };
        let windows = windows(1, &[(0, 0, 5, -3.0), (0, 2, 8, -5.0)]);
        let list = BinList::from_windows(
            windows,
            &registry,
            &options(10, ScoreCalculationMethod::Maximum),
        )
        .unwrap();
        assert_eq!(list.get(0, 0), Some(-3.0));
    }

    #[test]
    fn test_order_independent() {
        let registry = crate::registry! { "chr1" => 10_000, "chr2" => 5_000 };
        let windows = random_windows(&registry, 500, 300);
        let mut shuffled = WindowColumns::new(2);
        for index in 0..2 {
            let mut intervals = windows.intervals(index);
            intervals.reverse();
            for interval in intervals {
                shuffled.push(index, interval.start, interval.stop, interval.score);
            }
        }
        let options = options(100, ScoreCalculationMethod::Maximum);
        let forward = BinList::from_windows(windows, &registry, &options).unwrap();
        let reversed = BinList::from_windows(shuffled, &registry, &options).unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_save_and_load() {
        let registry = crate::registry! { "chr1" => 1000, "chr2" => 333 };
        let windows = windows(2, &[(0, 0, 150, 2.0), (1, 300, 333, 7.0)]);
        let options = BinningOptions::new(100, DataPrecision::Int16, ScoreCalculationMethod::Sum);
        let list = BinList::from_windows(windows, &registry, &options).unwrap();
        assert_eq!(list.len(), 14);
        assert_eq!(list.byte_size(), 28);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bins.gpb");
        list.write_to(&path).unwrap();
        let loaded = BinList::read_from(&path).unwrap();
        assert_eq!(loaded, list);
        assert!(loaded.ensure_compatible(&registry).is_ok());

        let other = crate::registry! { "chr1" => 1000, "chr2" => 334 };
        assert!(loaded.ensure_compatible(&other).is_err());
    }

    #[test]
    fn test_load_invalid_file() {
        let file = crate::test_utilities::temp_text_file("chr1\t0\t10\t1\n");
        assert!(matches!(
            BinList::read_from(file.path()),
            Err(GenPlayError::InvalidBinListFile(_))
        ));

        let empty = crate::test_utilities::temp_text_file("");
        assert!(matches!(
            BinList::read_from(empty.path()),
            Err(GenPlayError::InvalidBinListFile(_))
        ));
    }

    #[test]
    fn test_load_corrupt_payload() {
        // a valid header followed by a huge sequence length
        let mut bytes = BINLIST_MAGIC.to_vec();
        bytes.extend_from_slice(&BINLIST_VERSION.to_le_bytes());
        bytes.extend_from_slice(&[0x01, 0x00, 0x00, 0xfd, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f]);
        bytes.extend_from_slice(&[0xff; 32]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.gpb");
        let file = File::create(&path).unwrap();
        let mut writer = GzEncoder::new(file, Compression::default());
        writer.write_all(&bytes).unwrap();
        writer.finish().unwrap();

        assert!(matches!(
            BinList::read_from(&path),
            Err(GenPlayError::InvalidBinListFile(_))
        ));
    }

    #[test]
    fn test_load_other_version() {
        let mut bytes = BINLIST_MAGIC.to_vec();
        bytes.extend_from_slice(&(BINLIST_VERSION + 1).to_le_bytes());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.gpb");
        std::fs::write(&path, bytes).unwrap();
        assert!(matches!(
            BinList::read_from(&path),
            Err(GenPlayError::InvalidBinListFile(_))
        ));
    }

    #[test]
    fn test_bedgraph_output() {
        let registry = crate::registry! { "chr1" => 250 };
        let windows = windows(1, &[(0, 210, 220, 4.0)]);
        let list = BinList::from_windows(
            windows,
            &registry,
            &options(100, ScoreCalculationMethod::Sum),
        )
        .unwrap();
        let mut buffer = Vec::new();
        list.write_tsv(&registry, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "chr1\t200\t250\t4\n");
    }
}
