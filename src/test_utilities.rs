//! Test cases and test utility functions.
//!

use rand::{thread_rng, Rng};
use std::io::Write;
use tempfile::NamedTempFile;

use crate::chromosomes::ChromosomeRegistry;
use crate::ranges::WindowColumns;
use crate::Position;

// Stochastic test ranges defaults
//
// This is the random number of windows to use in tests.
// The tradeoff is catching stochastic errors vs test time.
pub const NRANDOM_WINDOWS: usize = 10000;

// window length
pub const MIN_LEN: Position = 1;
pub const MAX_LEN: Position = 10000;

// number of chromosome sequences
pub const NCHROM: usize = 22;

// chromosome sizes
pub const MIN_CHROM_LEN: Position = 500_000;
pub const MAX_CHROM_LEN: Position = 2_500_000;

/// Build a random range start/end on a sequence of `chrom_len`, at most
/// `max_len` long. 0-indexed, right exclusive.
pub fn random_range(chrom_len: Position, max_len: Position) -> (Position, Position) {
    let mut rng = thread_rng();
    let max_len = max_len.clamp(MIN_LEN + 1, chrom_len.max(MIN_LEN + 1));
    let len = rng.gen_range(MIN_LEN..max_len);
    let start = rng.gen_range(0..chrom_len.saturating_sub(len) + 1);
    (start, start + len)
}

/// Build random sequence lengths
pub fn random_seqlen() -> Position {
    let mut rng = thread_rng();
    rng.gen_range(MIN_CHROM_LEN..=MAX_CHROM_LEN)
}

/// Build a registry of `NCHROM` chromosomes with random lengths.
pub fn random_registry() -> ChromosomeRegistry {
    let catalog = (1..=NCHROM)
        .map(|i| (format!("chr{}", i), random_seqlen()))
        .collect();
    ChromosomeRegistry::new(catalog).expect("random chromosome names are unique")
}

/// Build `n` random scored windows per chromosome of `registry`, each at
/// most `max_len` long.
pub fn random_windows(registry: &ChromosomeRegistry, n: usize, max_len: Position) -> WindowColumns {
    let mut rng = thread_rng();
    let mut windows = WindowColumns::new(registry.count());
    for chromosome in registry.iter() {
        for _ in 0..n {
            let (start, stop) = random_range(chromosome.length, max_len);
            let score = rng.gen_range(-100.0..100.0);
            windows.push(chromosome.index, start, stop, score);
        }
    }
    windows
}

/// Write random windows as bedGraph lines, sorted by start per chromosome.
pub fn random_bedgraph(registry: &ChromosomeRegistry, n: usize) -> String {
    let windows = random_windows(registry, n, MAX_LEN);
    let mut lines = String::new();
    for chromosome in registry.iter() {
        let mut intervals = windows.intervals(chromosome.index);
        intervals.sort_by_key(|interval| interval.start);
        for interval in intervals {
            lines.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                chromosome.name, interval.start, interval.stop, interval.score
            ));
        }
    }
    lines
}

/// Write `contents` to a temporary file, removed when the handle is dropped.
pub fn temp_text_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("could not create temporary file");
    file.write_all(contents.as_bytes())
        .expect("could not write temporary file");
    file.flush().expect("could not flush temporary file");
    file
}
