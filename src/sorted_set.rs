//! SortedSet: unique elements kept in ascending order of a comparator.

use crate::storage::OwnedStorage;
use crate::DEFAULT_CAPACITY;
use core::cmp::Ordering;
use core::fmt;

pub struct SortedSet<T, F = fn(&T, &T) -> Ordering> {
    items: OwnedStorage<T>,
    compare: F,
}

impl<T: Ord> SortedSet<T> {
    pub fn new() -> Self {
        Self::with_comparator(T::cmp)
    }
}

impl<T: Ord> Default for SortedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F> SortedSet<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub fn with_comparator(compare: F) -> Self {
        Self {
            items: OwnedStorage::with_capacity(DEFAULT_CAPACITY),
            compare,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // Position of an element comparing equal, or where one would go.
    fn search(&self, value: &T) -> Result<usize, usize> {
        let (mut lo, mut hi) = (0, self.items.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match (self.compare)(self.items.get(mid), value) {
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
                Ordering::Equal => return Ok(mid),
            }
        }
        Err(lo)
    }

    /// Insert unless an equal element is present. Returns whether it was
    /// inserted.
    pub fn insert(&mut self, value: T) -> bool {
        match self.search(&value) {
            Ok(_) => false,
            Err(pos) => {
                self.items.insert_at(pos, value);
                true
            }
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.search(value).is_ok()
    }

    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.search(value).ok()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        (index < self.items.len()).then(|| self.items.get(index))
    }

    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&T> {
        self.get(self.items.len().checked_sub(1)?)
    }

    pub fn remove(&mut self, value: &T) -> Option<T> {
        let pos = self.search(value).ok()?;
        Some(self.items.remove_at(pos))
    }

    /// Panics unless `index < len()`.
    pub fn remove_at(&mut self, index: usize) -> T {
        self.items.remove_at(index)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }
}

impl<T, F> Extend<T> for SortedSet<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for SortedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: fmt::Debug, F> fmt::Debug for SortedSet<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_and_uniqueness() {
        let mut s = SortedSet::new();
        for v in [5, 1, 9, 1, 3, 9] {
            s.insert(v);
        }
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 9]);
        assert!(!s.insert(3));
        assert_eq!(s.len(), 4);
        assert_eq!(s.index_of(&5), Some(2));
        assert_eq!(s.index_of(&4), None);
        assert_eq!(s.first(), Some(&1));
        assert_eq!(s.last(), Some(&9));
    }

    #[test]
    fn custom_comparator_descending_by_length() {
        let mut s: SortedSet<&str, _> =
            SortedSet::with_comparator(|a: &&str, b: &&str| b.len().cmp(&a.len()));
        s.extend(["aa", "b", "cccc", "dd"]);
        // "dd" compares equal to "aa" and is rejected.
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), vec!["cccc", "aa", "b"]);
        assert!(s.contains(&"zz"));
    }

    #[test]
    fn removal() {
        let mut s: SortedSet<u32> = (0..10).collect();
        assert_eq!(s.remove(&4), Some(4));
        assert_eq!(s.remove(&4), None);
        assert_eq!(s.remove_at(0), 0);
        assert_eq!(s.get(0), Some(&1));
        assert_eq!(s.get(100), None);
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.last(), None);
    }

    #[test]
    fn debug_lists_elements() {
        let s: SortedSet<u8> = [2, 1].into_iter().collect();
        assert_eq!(format!("{s:?}"), "{1, 2}");
    }
}
