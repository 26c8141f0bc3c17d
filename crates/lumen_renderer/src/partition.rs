//! Static scanline partitioning for parallel rendering.
//!
//! Divides the image rows into contiguous bands, one per worker thread.

/// A half-open range of image rows `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    /// First row of the range
    pub start: u32,
    /// One past the last row of the range
    pub end: u32,
}

impl RowRange {
    /// Create a new row range.
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Number of rows in the range.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, row: u32) -> bool {
        self.start <= row && row < self.end
    }
}

/// Split `height` rows into `parts` contiguous ranges as evenly as possible.
///
/// Every range gets `height / parts` rows and the first `height % parts`
/// ranges get one more. Ranges are returned in order and tile `[0, height)`
/// exactly; this is asserted before returning, since render workers write
/// the film concurrently through the resulting bands.
///
/// # Panics
///
/// Panics if `parts` is zero.
pub fn partition_rows(height: u32, parts: usize) -> Vec<RowRange> {
    assert!(parts > 0, "cannot partition rows into zero parts");
    let parts_u32 = u32::try_from(parts).unwrap_or(u32::MAX);

    let chunk_size = height / parts_u32;
    let mut leftover = height % parts_u32;
    let mut ranges = Vec::with_capacity(parts);

    let mut start = 0;
    for _ in 0..parts {
        let mut end = start + chunk_size;
        if leftover > 0 {
            end += 1;
            leftover -= 1;
        }
        ranges.push(RowRange::new(start, end));
        start = end;
    }

    assert_disjoint_cover(&ranges, height);
    ranges
}

/// Check that `ranges` are ordered, non-overlapping, gap-free, cover
/// `[0, height)`, and differ in size by at most one row.
fn assert_disjoint_cover(ranges: &[RowRange], height: u32) {
    let mut expected_start = 0;
    for range in ranges {
        assert_eq!(range.start, expected_start, "row ranges overlap or leave a gap");
        assert!(range.start <= range.end, "row range is inverted");
        expected_start = range.end;
    }
    assert_eq!(expected_start, height, "row ranges do not cover the image");

    let smallest = ranges.iter().map(RowRange::len).min().unwrap_or(0);
    let largest = ranges.iter().map(RowRange::len).max().unwrap_or(0);
    assert!(largest - smallest <= 1, "row ranges are unbalanced");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fit() {
        let ranges = partition_rows(128, 4);
        assert_eq!(ranges.len(), 4);
        assert!(ranges.iter().all(|r| r.len() == 32));
    }

    #[test]
    fn test_remainder_goes_to_first_ranges() {
        let ranges = partition_rows(10, 4);
        let sizes: Vec<u32> = ranges.iter().map(RowRange::len).collect();
        assert_eq!(sizes, vec![3, 3, 2, 2]);
        assert_eq!(ranges[0], RowRange::new(0, 3));
        assert_eq!(ranges[3], RowRange::new(8, 10));
    }

    #[test]
    fn test_more_parts_than_rows() {
        let ranges = partition_rows(3, 5);
        let sizes: Vec<u32> = ranges.iter().map(RowRange::len).collect();
        assert_eq!(sizes, vec![1, 1, 1, 0, 0]);
    }

    #[test]
    fn test_every_row_in_exactly_one_range() {
        for height in [0, 1, 7, 64, 99, 450] {
            for parts in 1..=17 {
                let ranges = partition_rows(height, parts);
                assert_eq!(ranges.len(), parts);

                for row in 0..height {
                    let owners = ranges.iter().filter(|r| r.contains(row)).count();
                    assert_eq!(owners, 1, "row {row} of {height} with {parts} parts");
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "zero parts")]
    fn test_zero_parts_panics() {
        partition_rows(10, 0);
    }

    #[test]
    #[should_panic(expected = "overlap")]
    fn test_overlap_is_rejected() {
        assert_disjoint_cover(&[RowRange::new(0, 3), RowRange::new(2, 4)], 4);
    }
}
