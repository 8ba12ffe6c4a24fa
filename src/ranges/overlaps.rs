//! Overlap detection over the start/stop columns of one chromosome.

use crate::Position;

/// Whether any two ranges overlap: after sorting by start, some range stops
/// after the next one starts. Zero-width ranges never overlap anything they
/// only touch.
///
/// This does not modify its input.
pub fn has_overlap(starts: &[Position], stops: &[Position]) -> bool {
    let n = starts.len().min(stops.len());
    if n < 2 {
        return false;
    }
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_unstable_by_key(|&i| (starts[i], stops[i]));
    order
        .windows(2)
        .any(|pair| stops[pair[0]] > starts[pair[1]])
}

/// Whether the starts are already in non-decreasing order.
pub fn is_sorted_by_start(starts: &[Position]) -> bool {
    starts.windows(2).all(|pair| pair[0] <= pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overlap() {
        assert!(!has_overlap(&[0, 10, 20], &[10, 20, 30]));
        assert!(!has_overlap(&[], &[]));
        assert!(!has_overlap(&[5], &[50]));
    }

    #[test]
    fn test_overlap() {
        assert!(has_overlap(&[0, 10], &[11, 20]));
    }

    #[test]
    fn test_overlap_unsorted_input() {
        // sorted, (0, 15) overlaps (10, 20)
        assert!(has_overlap(&[10, 30, 0], &[20, 40, 15]));
        assert!(!has_overlap(&[20, 0, 10], &[30, 10, 20]));
    }

    #[test]
    fn test_point_features() {
        assert!(!has_overlap(&[10, 10], &[10, 20]));
    }

    #[test]
    fn test_is_sorted_by_start() {
        assert!(is_sorted_by_start(&[1, 1, 4]));
        assert!(!is_sorted_by_start(&[4, 1]));
    }
}
