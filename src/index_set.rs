//! IndexSet: an ordered set of indices stored as canonical ranges.
//!
//! The set is a sorted list of half-open ranges that neither overlap nor
//! touch. Every mutation restores that form before returning, so the
//! representation of a given set is unique and structural equality is set
//! equality. Lookups binary-search the range list; a running count of the
//! indices before each range keeps rank queries logarithmic too.

use core::fmt;
use core::iter::FusedIterator;
use core::ops::{ControlFlow, Range};

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct IndexSet {
    ranges: Vec<Range<usize>>,
    // counts_before[i] = number of indices in ranges[..i]
    counts_before: Vec<usize>,
}

impl IndexSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_index(index: usize) -> Self {
        let mut set = Self::new();
        set.add_index(index);
        set
    }

    pub fn from_range(range: Range<usize>) -> Self {
        let mut set = Self::new();
        set.add_range(range);
        set
    }

    /// Number of indices in the set.
    pub fn len(&self) -> usize {
        match (self.counts_before.last(), self.ranges.last()) {
            (Some(n), Some(r)) => n + r.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of disjoint ranges backing the set.
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn ranges(&self) -> impl ExactSizeIterator<Item = Range<usize>> + '_ {
        self.ranges.iter().cloned()
    }

    // Position of the first range ending after `index`.
    fn first_ending_after(&self, index: usize) -> usize {
        self.ranges.partition_point(|r| r.end <= index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.ranges
            .get(self.first_ending_after(index))
            .is_some_and(|r| r.start <= index)
    }

    pub fn first(&self) -> Option<usize> {
        self.ranges.first().map(|r| r.start)
    }

    pub fn last(&self) -> Option<usize> {
        self.ranges.last().map(|r| r.end - 1)
    }

    pub fn index_less_than(&self, index: usize) -> Option<usize> {
        self.index_less_or_equal(index.checked_sub(1)?)
    }

    pub fn index_less_or_equal(&self, index: usize) -> Option<usize> {
        let p = self.ranges.partition_point(|r| r.start <= index);
        let r = self.ranges.get(p.checked_sub(1)?)?;
        Some(index.min(r.end - 1))
    }

    pub fn index_greater_than(&self, index: usize) -> Option<usize> {
        self.index_greater_or_equal(index.checked_add(1)?)
    }

    pub fn index_greater_or_equal(&self, index: usize) -> Option<usize> {
        let r = self.ranges.get(self.first_ending_after(index))?;
        Some(index.max(r.start))
    }

    /// Number of indices in the set strictly below `index`.
    pub fn count_less_than(&self, index: usize) -> usize {
        let p = self.ranges.partition_point(|r| r.start < index);
        let Some(last) = p.checked_sub(1) else {
            return 0;
        };
        let r = &self.ranges[last];
        self.counts_before[last] + (r.end.min(index) - r.start)
    }

    // Rebuild running counts for ranges[from..] after a splice at `from`.
    fn recount(&mut self, from: usize) {
        self.counts_before.truncate(from);
        let mut n = match from.checked_sub(1) {
            Some(i) => self.counts_before[i] + self.ranges[i].len(),
            None => 0,
        };
        for r in &self.ranges[from..] {
            self.counts_before.push(n);
            n += r.len();
        }
    }

    /// Add one index. Panics if `index == usize::MAX`.
    pub fn add_index(&mut self, index: usize) {
        require!(index < usize::MAX, "index {index} is reserved");
        self.add_range(index..index + 1);
    }

    /// Add every index in `range`, merging all ranges it overlaps or touches.
    pub fn add_range(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let lo = self.ranges.partition_point(|r| r.end < range.start);
        let hi = self.ranges.partition_point(|r| r.start <= range.end);
        let merged = if lo < hi {
            range.start.min(self.ranges[lo].start)..range.end.max(self.ranges[hi - 1].end)
        } else {
            range
        };
        self.ranges.splice(lo..hi, Some(merged));
        self.recount(lo);
    }

    pub fn add_indexes(&mut self, other: &IndexSet) {
        for r in other.ranges() {
            self.add_range(r);
        }
    }

    pub fn remove_index(&mut self, index: usize) {
        require!(index < usize::MAX, "index {index} is reserved");
        self.remove_range(index..index + 1);
    }

    /// Remove every index in `range`. A removal strictly inside one range
    /// splits it in two; ranges it covers entirely disappear.
    pub fn remove_range(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let lo = self.first_ending_after(range.start);
        let hi = self.ranges.partition_point(|r| r.start < range.end);
        if lo >= hi {
            return;
        }
        let head = self.ranges[lo].start..range.start;
        let tail = range.end..self.ranges[hi - 1].end;
        let remnants = [head, tail].into_iter().filter(|r| !r.is_empty());
        self.ranges.splice(lo..hi, remnants);
        self.recount(lo);
    }

    pub fn remove_indexes(&mut self, other: &IndexSet) {
        for r in other.ranges() {
            self.remove_range(r);
        }
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
        self.counts_before.clear();
    }

    /// Visit every index in ascending order until `f` breaks.
    ///
    /// Returns `Break` when the visit stopped early.
    pub fn enumerate<F>(&self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(usize) -> ControlFlow<()>,
    {
        for r in &self.ranges {
            for i in r.clone() {
                f(i)?;
            }
        }
        ControlFlow::Continue(())
    }

    pub fn iter(&self) -> Indexes<'_> {
        Indexes {
            ranges: self.ranges.iter(),
            current: 0..0,
        }
    }
}

/// Ascending iterator over the indices of an [`IndexSet`].
pub struct Indexes<'a> {
    ranges: core::slice::Iter<'a, Range<usize>>,
    current: Range<usize>,
}

impl Iterator for Indexes<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        loop {
            if let Some(i) = self.current.next() {
                return Some(i);
            }
            self.current = self.ranges.next()?.clone();
        }
    }
}

impl FusedIterator for Indexes<'_> {}

impl<'a> IntoIterator for &'a IndexSet {
    type Item = usize;
    type IntoIter = Indexes<'a>;

    fn into_iter(self) -> Indexes<'a> {
        self.iter()
    }
}

impl FromIterator<usize> for IndexSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<usize> for IndexSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for i in iter {
            self.add_index(i);
        }
    }
}

impl fmt::Debug for IndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ranges.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(ranges: &[Range<usize>]) -> IndexSet {
        let mut s = IndexSet::new();
        for r in ranges {
            s.add_range(r.clone());
        }
        s
    }

    /// Invariant: touching ranges coalesce into one.
    #[test]
    fn adjacent_ranges_coalesce() {
        let s = set_of(&[5..10, 10..15]);
        assert_eq!(s.ranges().collect::<Vec<_>>(), vec![5..15]);
        assert_eq!(s.len(), 10);
    }

    /// Invariant: a range bridging several existing ranges swallows them all.
    #[test]
    fn bridging_range_merges_many() {
        let mut s = set_of(&[0..2, 4..6, 8..10, 20..22]);
        s.add_range(1..9);
        assert_eq!(s.ranges().collect::<Vec<_>>(), vec![0..10, 20..22]);
    }

    #[test]
    fn disjoint_ranges_stay_sorted() {
        let s = set_of(&[30..31, 0..1, 10..12]);
        assert_eq!(s.ranges().collect::<Vec<_>>(), vec![0..1, 10..12, 30..31]);
    }

    #[test]
    fn add_then_remove_single_indices() {
        let mut s = IndexSet::new();
        s.add_index(3);
        s.add_index(7);
        s.remove_index(3);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![7]);
        assert!(!s.contains(3));
        assert!(s.contains(7));
    }

    /// Invariant: removing from the middle of a range splits it in two.
    #[test]
    fn interior_removal_splits() {
        let mut s = IndexSet::from_range(0..10);
        s.remove_range(3..6);
        assert_eq!(s.ranges().collect::<Vec<_>>(), vec![0..3, 6..10]);
        assert_eq!(s.range_count(), 2);
    }

    #[test]
    fn boundary_removal_shrinks() {
        let mut s = IndexSet::from_range(0..10);
        s.remove_index(0);
        s.remove_index(9);
        assert_eq!(s.ranges().collect::<Vec<_>>(), vec![1..9]);
    }

    #[test]
    fn spanning_removal_truncates_and_drops() {
        let mut s = set_of(&[0..4, 6..8, 10..14]);
        s.remove_range(2..12);
        assert_eq!(s.ranges().collect::<Vec<_>>(), vec![0..2, 12..14]);
    }

    #[test]
    fn removing_absent_indices_is_noop() {
        let mut s = set_of(&[2..4]);
        s.remove_range(5..9);
        s.remove_index(0);
        assert_eq!(s, IndexSet::from_range(2..4));
    }

    #[test]
    fn boundaries() {
        let s = set_of(&[4..6, 9..12]);
        assert_eq!(s.first(), Some(4));
        assert_eq!(s.last(), Some(11));
        let empty = IndexSet::new();
        assert_eq!(empty.first(), None);
        assert_eq!(empty.last(), None);
    }

    /// Invariant: neighbor queries honor strict and inclusive bounds at range
    /// edges and report absence past either end.
    #[test]
    fn neighbor_queries() {
        let s = set_of(&[4..6, 9..12]);

        assert_eq!(s.index_less_than(4), None);
        assert_eq!(s.index_less_than(5), Some(4));
        assert_eq!(s.index_less_than(9), Some(5));
        assert_eq!(s.index_less_than(100), Some(11));
        assert_eq!(s.index_less_than(0), None);

        assert_eq!(s.index_less_or_equal(3), None);
        assert_eq!(s.index_less_or_equal(4), Some(4));
        assert_eq!(s.index_less_or_equal(7), Some(5));

        assert_eq!(s.index_greater_than(5), Some(9));
        assert_eq!(s.index_greater_than(4), Some(5));
        assert_eq!(s.index_greater_than(11), None);
        assert_eq!(s.index_greater_than(usize::MAX), None);

        assert_eq!(s.index_greater_or_equal(0), Some(4));
        assert_eq!(s.index_greater_or_equal(10), Some(10));
        assert_eq!(s.index_greater_or_equal(6), Some(9));
        assert_eq!(s.index_greater_or_equal(12), None);
    }

    #[test]
    fn rank_counts_indices_below() {
        let s = set_of(&[2..5, 8..10]);
        assert_eq!(s.count_less_than(0), 0);
        assert_eq!(s.count_less_than(3), 1);
        assert_eq!(s.count_less_than(5), 3);
        assert_eq!(s.count_less_than(9), 4);
        assert_eq!(s.count_less_than(50), 5);
    }

    /// Invariant: running counts follow merges and splits, so rank and len
    /// agree with a direct count after every edit.
    #[test]
    fn rank_survives_merges_and_splits() {
        let mut s = set_of(&[0..3, 10..13, 20..23, 30..33]);
        s.add_range(12..21);
        s.remove_range(15..16);
        s.remove_index(1);
        s.add_index(40);
        assert_eq!(
            s.ranges().collect::<Vec<_>>(),
            vec![0..1, 2..3, 10..15, 16..23, 30..33, 40..41]
        );
        let members: Vec<usize> = s.iter().collect();
        assert_eq!(s.len(), members.len());
        for i in 0..45 {
            let direct = members.iter().filter(|&&m| m < i).count();
            assert_eq!(s.count_less_than(i), direct, "rank of {i}");
        }
        s.clear();
        assert_eq!(s.count_less_than(5), 0);
        assert_eq!(s.len(), 0);
    }

    /// Invariant: enumeration visits ascending and stops on request.
    #[test]
    fn enumerate_stops_early() {
        let s = set_of(&[1..3, 7..9]);
        let mut seen = Vec::new();
        let flow = s.enumerate(|i| {
            seen.push(i);
            if i == 7 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(seen, vec![1, 2, 7]);

        let mut all = Vec::new();
        let flow = s.enumerate(|i| {
            all.push(i);
            ControlFlow::Continue(())
        });
        assert!(flow.is_continue());
        assert_eq!(all, vec![1, 2, 7, 8]);
    }

    /// Invariant: a clone is independent of the set it came from.
    #[test]
    fn clone_shares_no_state() {
        let mut a = IndexSet::from_index(1);
        let b = a.clone();
        a.add_index(2);
        assert_eq!(b.iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn bulk_add_and_remove() {
        let mut s: IndexSet = [1, 2, 3, 10].into_iter().collect();
        s.add_indexes(&IndexSet::from_range(4..6));
        assert_eq!(s.ranges().collect::<Vec<_>>(), vec![1..6, 10..11]);
        s.remove_indexes(&set_of(&[2..3, 10..11]));
        assert_eq!(s.ranges().collect::<Vec<_>>(), vec![1..2, 3..6]);
        s.clear();
        assert!(s.is_empty());
    }

    #[test]
    fn debug_lists_ranges() {
        let s = set_of(&[1..3]);
        assert_eq!(format!("{s:?}"), "{1..3}");
    }
}
