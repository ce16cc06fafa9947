//! Static work partitioning across a fixed worker pool.
//!
//! Every phase splits an index range into contiguous chunks with
//! `start = id * extent / count` and `end = min((id + 1) * extent / count, extent)`.
//! Workers whose chunk is empty simply skip the phase.

use std::ops::Range;

/// Identity of one worker within a pool of `count` workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkPartition {
    pub id: usize,
    pub count: usize,
}

impl WorkPartition {
    pub fn new(id: usize, count: usize) -> Self {
        debug_assert!(count > 0 && id < count);
        Self { id, count }
    }

    /// This worker's chunk of `0..extent`.
    #[inline]
    pub fn range(&self, extent: usize) -> Range<usize> {
        let start = self.id * extent / self.count;
        let end = ((self.id + 1) * extent / self.count).min(extent);
        start..end
    }

    /// Chunks for every worker of a pool, in worker order.
    pub fn all(count: usize, extent: usize) -> Vec<Range<usize>> {
        (0..count)
            .map(|id| WorkPartition::new(id, count).range(extent))
            .collect()
    }
}

/// Whether `ranges`, in order, cover `0..extent` exactly once with no gap or overlap.
pub fn tiles(ranges: &[Range<usize>], extent: usize) -> bool {
    let mut next = 0;
    for range in ranges {
        if range.start != next || range.end < range.start {
            return false;
        }
        next = range.end;
    }
    next == extent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        assert_eq!(WorkPartition::all(4, 8), vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn test_uneven_split() {
        assert_eq!(WorkPartition::all(3, 10), vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn test_more_workers_than_items() {
        let ranges = WorkPartition::all(5, 2);
        assert_eq!(ranges.iter().filter(|r| r.is_empty()).count(), 3);
        assert!(tiles(&ranges, 2));
    }

    #[test]
    fn test_empty_extent() {
        let ranges = WorkPartition::all(3, 0);
        assert!(ranges.iter().all(|r| r.is_empty()));
        assert!(tiles(&ranges, 0));
    }

    #[test]
    fn test_partitions_always_tile() {
        for count in 1..=17 {
            for extent in 0..=300 {
                let ranges = WorkPartition::all(count, extent);
                assert!(tiles(&ranges, extent), "count={count} extent={extent}");
            }
        }
    }

    #[test]
    fn test_tiles_detects_gap_and_overlap() {
        assert!(!tiles(&[0..2, 3..5], 5));
        assert!(!tiles(&[0..3, 2..5], 5));
        assert!(!tiles(&[0..2, 2..4], 5));
    }
}
