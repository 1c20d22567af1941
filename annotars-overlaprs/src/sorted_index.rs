use annotars_core::models::Interval;

use super::Overlapper;

/// A sorted-position interval index for fast overlap queries.
///
/// Intervals are kept sorted by (start, end). A query binary-searches for the
/// first interval whose start could still reach the query range (compensating
/// for the longest interval in the set), then scans forward until interval
/// starts pass the query end. This gives logarithmic-ish lookups on the kind
/// of annotation data the gene indexes hold, without any tree structure.
///
/// The index is immutable after [`build`](Overlapper::build); rebuilding is
/// the only way to reflect changed data.
///
/// # Examples
///
/// ```
/// use annotars_overlaprs::{Overlapper, SortedIndex};
/// use annotars_core::models::Interval;
///
/// let exons = vec![
///     Interval { start: 100, end: 150, val: "GENE1" },
///     Interval { start: 200, end: 250, val: "GENE2" },
///     Interval { start: 225, end: 275, val: "GENE3" },
/// ];
///
/// let index = SortedIndex::build(exons);
/// assert_eq!(index.find(210, 240).len(), 2); // GENE2 and GENE3
/// ```
#[derive(Debug, Clone)]
pub struct SortedIndex<T>
where
    T: Eq + Clone + Send + Sync,
{
    /// Intervals sorted by (start, end)
    intervals: Vec<Interval<T>>,
    /// The length of the longest interval
    max_len: u32,
}

impl<T> Overlapper<T> for SortedIndex<T>
where
    T: Eq + Clone + Send + Sync,
{
    /// Create a new index from a vector of intervals. The vector is sorted
    /// immediately.
    fn build(mut intervals: Vec<Interval<T>>) -> Self
    where
        Self: Sized,
    {
        intervals.sort();
        let max_len = intervals
            .iter()
            .map(|iv| iv.end.saturating_sub(iv.start))
            .max()
            .unwrap_or(0);
        SortedIndex { intervals, max_len }
    }

    /// Find all intervals that overlap [start, end)
    #[inline]
    fn find(&self, start: u32, end: u32) -> Vec<Interval<T>> {
        self.find_iter(start, end).cloned().collect()
    }

    fn find_iter<'a>(
        &'a self,
        start: u32,
        end: u32,
    ) -> Box<dyn Iterator<Item = &'a Interval<T>> + 'a> {
        Box::new(IterFind {
            inner: self,
            off: Self::lower_bound(start.saturating_sub(self.max_len), &self.intervals),
            start,
            end,
        })
    }
}

impl<T> SortedIndex<T>
where
    T: Eq + Clone + Send + Sync,
{
    /// Number of intervals in the index
    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Return an iterator over all intervals, in sorted order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Interval<T>> {
        self.intervals.iter()
    }

    /// Determine the first index to check for overlaps via binary search.
    /// Assumes the maximum interval length has been subtracted from `start`,
    /// otherwise the result is undefined.
    #[inline]
    fn lower_bound(start: u32, intervals: &[Interval<T>]) -> usize {
        let mut size = intervals.len();
        let mut low = 0;

        while size > 0 {
            let half = size / 2;
            let other_half = size - half;
            let probe = low + half;
            let other_low = low + other_half;
            let v = &intervals[probe];
            size = half;
            low = if v.start < start { other_low } else { low }
        }
        low
    }
}

/// An iterator over intervals in a [`SortedIndex`] that overlap a query range.
///
/// Created by [`find_iter`](Overlapper::find_iter); yields references without
/// allocating a vector.
#[derive(Debug)]
pub struct IterFind<'a, T>
where
    T: Eq + Clone + Send + Sync + 'a,
{
    inner: &'a SortedIndex<T>,
    off: usize,
    start: u32,
    end: u32,
}

impl<'a, T> Iterator for IterFind<'a, T>
where
    T: Eq + Clone + Send + Sync + 'a,
{
    type Item = &'a Interval<T>;

    #[inline]
    // interval.start < end && interval.end > start
    fn next(&mut self) -> Option<Self::Item> {
        while self.off < self.inner.intervals.len() {
            let interval = &self.inner.intervals[self.off];
            self.off += 1;
            if interval.overlap(self.start, self.end) {
                return Some(interval);
            } else if interval.start >= self.end {
                break;
            }
        }
        None
    }
}

impl<'a, T> IntoIterator for &'a SortedIndex<T>
where
    T: Eq + Clone + Send + Sync + 'a,
{
    type Item = &'a Interval<T>;
    type IntoIter = std::slice::Iter<'a, Interval<T>>;

    fn into_iter(self) -> std::slice::Iter<'a, Interval<T>> {
        self.intervals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn intervals() -> Vec<Interval<&'static str>> {
        vec![
            Interval {
                start: 1,
                end: 5,
                val: "a",
            },
            Interval {
                start: 3,
                end: 7,
                val: "b",
            },
            Interval {
                start: 6,
                end: 10,
                val: "c",
            },
            Interval {
                start: 8,
                end: 12,
                val: "d",
            },
        ]
    }

    #[rstest]
    fn test_build_and_len(intervals: Vec<Interval<&'static str>>) {
        let index = SortedIndex::build(intervals.clone());
        assert_eq!(index.len(), intervals.len());
        assert_eq!(index.is_empty(), false);
    }

    #[rstest]
    fn test_find_overlapping_intervals(intervals: Vec<Interval<&'static str>>) {
        let index = SortedIndex::build(intervals);

        // Query that overlaps with "a" and "b"
        let results = index.find(2, 4);
        let vals: Vec<&str> = results.iter().map(|i| i.val).collect();
        assert_eq!(vals, vec!["a", "b"]);

        // Query that overlaps with "c" and "d"
        let results = index.find(9, 11);
        let vals: Vec<&str> = results.iter().map(|i| i.val).collect();
        assert_eq!(vals, vec!["c", "d"]);
    }

    #[rstest]
    fn test_find_respects_half_open_bounds(intervals: Vec<Interval<&'static str>>) {
        let index = SortedIndex::build(intervals);

        // [5, 6) touches the end of "a" and the start of "c"; only "b" covers it
        let results = index.find(5, 6);
        let vals: Vec<&str> = results.iter().map(|i| i.val).collect();
        assert_eq!(vals, vec!["b"]);
    }

    #[rstest]
    fn test_find_no_overlap(intervals: Vec<Interval<&'static str>>) {
        let index = SortedIndex::build(intervals);
        assert_eq!(index.find(13, 15).is_empty(), true);
    }

    #[rstest]
    fn test_long_interval_is_not_skipped() {
        // a long interval starting well before the query must still be found
        let index = SortedIndex::build(vec![
            Interval {
                start: 0,
                end: 1000,
                val: "long",
            },
            Interval {
                start: 400,
                end: 410,
                val: "short",
            },
        ]);
        let vals: Vec<&str> = index.find(500, 510).iter().map(|i| i.val).collect();
        assert_eq!(vals, vec!["long"]);
    }

    #[rstest]
    fn test_empty_index() {
        let index: SortedIndex<&str> = SortedIndex::build(vec![]);
        assert_eq!(index.len(), 0);
        assert_eq!(index.is_empty(), true);
        assert_eq!(index.find(1, 2).is_empty(), true);
    }
}
