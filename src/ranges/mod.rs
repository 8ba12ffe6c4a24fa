//! Scored ranges, strands, and the column layout shared by every
//! windowed extractor.
//!

use serde::{Deserialize, Serialize};

use crate::columns::ChromosomeColumns;
use crate::error::GenPlayError;
use crate::Position;

pub mod operations;
pub mod overlaps;

pub use operations::StrandOptions;

/// Nucleotide strand enum type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Parse the strand character of a data line: `'+'` or `'-'`. Anything
    /// else (e.g. `'.'`) means the feature has no strand.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Strand::Forward),
            '-' => Some(Strand::Reverse),
            _ => None,
        }
    }

    /// Parse the first character of a field as a strand.
    pub fn from_field(field: &str) -> Option<Self> {
        field.trim().chars().next().and_then(Strand::from_char)
    }

    pub fn as_char(&self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl std::str::FromStr for Strand {
    type Err = GenPlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strand::from_field(s).ok_or_else(|| GenPlayError::MalformedLine(s.to_string()))
    }
}

/// A scored chromosome window: a 0-based, right-exclusive range with a score.
/// Zero-width windows (`start == stop`) represent point features.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoredInterval {
    pub start: Position,
    pub stop: Position,
    pub score: f64,
}

impl ScoredInterval {
    pub fn new(start: Position, stop: Position, score: f64) -> Self {
        Self { start, stop, score }
    }

    pub fn width(&self) -> Position {
        self.stop.saturating_sub(self.start)
    }

    /// Calculate how many basepairs overlap this range and `[start, stop)`.
    pub fn overlap_width(&self, start: Position, stop: Position) -> Position {
        let overlap_start = std::cmp::max(self.start, start);
        let overlap_end = std::cmp::min(self.stop, stop);
        overlap_end.saturating_sub(overlap_start)
    }
}

/// The `(start, stop, score)` columns of scored windows, per chromosome.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowColumns {
    pub starts: ChromosomeColumns<Position>,
    pub stops: ChromosomeColumns<Position>,
    pub scores: ChromosomeColumns<f64>,
}

impl WindowColumns {
    pub fn new(chromosome_count: usize) -> Self {
        Self {
            starts: ChromosomeColumns::new(chromosome_count),
            stops: ChromosomeColumns::new(chromosome_count),
            scores: ChromosomeColumns::new(chromosome_count),
        }
    }

    /// Append a window to chromosome `index`.
    pub fn push(&mut self, index: usize, start: Position, stop: Position, score: f64) {
        self.starts.push(index, start);
        self.stops.push(index, stop);
        self.scores.push(index, score);
    }

    pub fn chromosome_count(&self) -> usize {
        self.starts.chromosome_count()
    }

    /// The number of windows of chromosome `index`.
    pub fn size(&self, index: usize) -> usize {
        self.starts.size(index)
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The windows of chromosome `index`, in encounter order.
    pub fn intervals(&self, index: usize) -> Vec<ScoredInterval> {
        match (
            self.starts.get(index),
            self.stops.get(index),
            self.scores.get(index),
        ) {
            (Some(starts), Some(stops), Some(scores)) => starts
                .iter()
                .zip(stops)
                .zip(scores)
                .map(|((&start, &stop), &score)| ScoredInterval::new(start, stop, score))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether any two windows of chromosome `index` overlap.
    pub fn has_overlap(&self, index: usize) -> bool {
        match (self.starts.get(index), self.stops.get(index)) {
            (Some(starts), Some(stops)) => overlaps::has_overlap(starts, stops),
            _ => false,
        }
    }
}

/// Validates a range read from a data line: the start must not be after
/// the stop.
pub fn validate_range(start: Position, stop: Position, line: &str) -> Result<(), GenPlayError> {
    if start > stop {
        return Err(GenPlayError::MalformedLine(line.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strand_parsing() {
        assert_eq!(Strand::from_field("+"), Some(Strand::Forward));
        assert_eq!(Strand::from_field("-1"), Some(Strand::Reverse));
        assert_eq!(Strand::from_field("."), None);
        assert_eq!(Strand::from_field(""), None);
        assert_eq!("+".parse::<Strand>().unwrap(), Strand::Forward);
        assert!(".".parse::<Strand>().is_err());
    }

    #[test]
    fn test_overlap_width() {
        let interval = ScoredInterval::new(10, 20, 1.0);
        assert_eq!(interval.overlap_width(0, 15), 5);
        assert_eq!(interval.overlap_width(20, 30), 0);
        assert_eq!(interval.overlap_width(12, 14), 2);
        assert_eq!(interval.width(), 10);
    }

    #[test]
    fn test_window_columns() {
        let mut windows = WindowColumns::new(2);
        windows.push(1, 0, 10, 1.0);
        windows.push(1, 5, 15, 2.0);
        assert_eq!(windows.size(1), 2);
        assert_eq!(windows.intervals(1)[1], ScoredInterval::new(5, 15, 2.0));
        assert!(windows.has_overlap(1));
        assert!(!windows.has_overlap(0));
    }

    #[test]
    fn test_invalid_range_start_stop() {
        assert!(matches!(
            validate_range(5, 1, "chr1\t5\t1"),
            Err(GenPlayError::MalformedLine(_))
        ));
        assert!(validate_range(5, 5, "chr1\t5\t5").is_ok());
    }
}
