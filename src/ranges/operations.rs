//! Strand-aware position operations.
//!
//! - [`StrandOptions::shifted_position()`]: shift a position toward the 3' end
//!   of its strand, e.g. to move read starts toward fragment centers.
//! - [`StrandOptions::read_length_adjusted()`]: extend a read to a fixed
//!   length from its 5' end.

use crate::{Position, PositionOffset};

use super::Strand;

/// Strand selection, shift and read-length extension, applied by the
/// stranded extractors (BED, GFF, PSL, Eland extended) before storing
/// positions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrandOptions {
    /// Only keep features on this strand. Features without a strand are
    /// dropped when a strand is selected.
    pub selected: Option<Strand>,
    /// Number of basepairs to shift positions toward the 3' end.
    pub shift: Position,
    /// If set, reads are resized to this length, from their 5' end.
    pub read_length: Option<Position>,
}

impl StrandOptions {
    /// Whether a feature on `strand` passes the strand selection.
    pub fn is_selected(&self, strand: Option<Strand>) -> bool {
        match self.selected {
            Some(selected) => strand == Some(selected),
            None => true,
        }
    }

    /// Shift a position toward the 3' end of `strand`.
    ///
    /// Forward positions move right and are clamped to `[0, length]`; reverse
    /// positions move left and are clamped to `[0, ∞)`. Unstranded positions
    /// are left as-is.
    pub fn shifted_position(
        &self,
        strand: Option<Strand>,
        position: Position,
        length: Position,
    ) -> Position {
        if self.shift == 0 {
            return position;
        }
        match strand {
            Some(Strand::Forward) => position.saturating_add(self.shift).min(length),
            Some(Strand::Reverse) => position.saturating_sub(self.shift),
            None => position,
        }
    }

    /// Resize a `[start, stop)` read to the configured read length, keeping its
    /// 5' end fixed, then clamp it to `[0, length]`. Without a configured read
    /// length the range is returned unchanged.
    pub fn read_length_adjusted(
        &self,
        strand: Option<Strand>,
        start: Position,
        stop: Position,
        length: Position,
    ) -> (Position, Position) {
        let read_length = match self.read_length {
            Some(read_length) => read_length as PositionOffset,
            None => return (start, stop),
        };
        let (new_start, new_stop) = match strand {
            Some(Strand::Reverse) => (stop as PositionOffset - read_length, stop as PositionOffset),
            _ => (start as PositionOffset, start as PositionOffset + read_length),
        };
        let length = length as PositionOffset;
        let clamp = |x: PositionOffset| x.max(0).min(length) as Position;
        (clamp(new_start), clamp(new_stop))
    }

    /// Apply the shift then the read length adjustment to a range.
    pub fn adjust(
        &self,
        strand: Option<Strand>,
        start: Position,
        stop: Position,
        length: Position,
    ) -> (Position, Position) {
        let start = self.shifted_position(strand, start, length);
        let stop = self.shifted_position(strand, stop, length);
        self.read_length_adjusted(strand, start, stop, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shifted(shift: Position) -> StrandOptions {
        StrandOptions {
            shift,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_shift() {
        let options = StrandOptions::default();
        assert_eq!(options.shifted_position(Some(Strand::Forward), 10, 100), 10);
    }

    #[test]
    fn test_forward_shift_clamped_to_length() {
        let options = shifted(20);
        assert_eq!(options.shifted_position(Some(Strand::Forward), 10, 100), 30);
        assert_eq!(options.shifted_position(Some(Strand::Forward), 90, 100), 100);
    }

    #[test]
    fn test_reverse_shift_clamped_to_zero() {
        let options = shifted(20);
        assert_eq!(options.shifted_position(Some(Strand::Reverse), 50, 100), 30);
        assert_eq!(options.shifted_position(Some(Strand::Reverse), 5, 100), 0);
        // no upper clamp on the reverse strand
        assert_eq!(options.shifted_position(Some(Strand::Reverse), 500, 100), 480);
    }

    #[test]
    fn test_unstranded_not_shifted() {
        assert_eq!(shifted(20).shifted_position(None, 50, 100), 50);
    }

    #[test]
    fn test_read_length() {
        let options = StrandOptions {
            read_length: Some(30),
            ..Default::default()
        };
        assert_eq!(
            options.read_length_adjusted(Some(Strand::Forward), 10, 20, 100),
            (10, 40)
        );
        assert_eq!(
            options.read_length_adjusted(Some(Strand::Reverse), 10, 20, 100),
            (0, 20)
        );
        assert_eq!(
            options.read_length_adjusted(Some(Strand::Forward), 90, 95, 100),
            (90, 100)
        );
    }

    #[test]
    fn test_strand_selection() {
        let options = StrandOptions {
            selected: Some(Strand::Forward),
            ..Default::default()
        };
        assert!(options.is_selected(Some(Strand::Forward)));
        assert!(!options.is_selected(Some(Strand::Reverse)));
        assert!(!options.is_selected(None));
        assert!(StrandOptions::default().is_selected(None));
    }
}
