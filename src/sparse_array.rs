//! SparseArray: a fixed index space where only occupied slots take memory.
//!
//! Elements are kept densely, in index order, in a growable [`Storage`];
//! an element's position there is the number of occupied indices below it.
//! Filling a hole is a gap insertion at that position.
//!
//! [`Storage`]: crate::storage::Storage

use crate::index_set::IndexSet;
use crate::storage::OwnedStorage;
use crate::DEFAULT_CAPACITY;
use core::mem;

pub struct SparseArray<T> {
    capacity: usize,
    items: OwnedStorage<T>,
    occupied: IndexSet,
}

impl<T> SparseArray<T> {
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        require!(capacity > 0, "sparse array capacity must be non-zero");
        Self {
            capacity,
            items: OwnedStorage::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            occupied: IndexSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn occupied_indexes(&self) -> &IndexSet {
        &self.occupied
    }

    fn check(&self, index: usize) {
        require!(
            index < self.capacity,
            "index {index} out of bounds for capacity {}",
            self.capacity
        );
    }

    /// Panics unless `index < capacity()`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.check(index);
        self.occupied
            .contains(index)
            .then(|| self.items.get(self.occupied.count_less_than(index)))
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.check(index);
        if !self.occupied.contains(index) {
            return None;
        }
        let rank = self.occupied.count_less_than(index);
        Some(self.items.get_mut(rank))
    }

    /// Store `value` at `index` (`None` empties the slot). Returns the
    /// previous occupant.
    ///
    /// Panics unless `index < capacity()`.
    pub fn set(&mut self, index: usize, value: Option<T>) -> Option<T> {
        self.check(index);
        let rank = self.occupied.count_less_than(index);
        match (self.occupied.contains(index), value) {
            (true, Some(v)) => Some(mem::replace(self.items.get_mut(rank), v)),
            (true, None) => {
                self.occupied.remove_index(index);
                Some(self.items.remove_at(rank))
            }
            (false, Some(v)) => {
                self.items.insert_at(rank, v);
                self.occupied.add_index(index);
                None
            }
            (false, None) => None,
        }
    }

    pub fn take(&mut self, index: usize) -> Option<T> {
        self.set(index, None)
    }

    /// Occupied slots in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.occupied.iter().zip(self.items.iter())
    }
}
