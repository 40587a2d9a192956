//! FixedArray: a fixed number of slots, any of which may be empty.
//!
//! Unlike a `Vec`, an index below the capacity does not imply an element.
//! Occupancy is tracked in an [`IndexSet`], so iteration and counting never
//! scan the empty slots.

use crate::index_set::IndexSet;
use crate::storage::OwnedStorage;
use core::mem;

pub struct FixedArray<T> {
    slots: OwnedStorage<Option<T>>,
    occupied: IndexSet,
}

impl<T> FixedArray<T> {
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = OwnedStorage::with_capacity(capacity);
        for _ in 0..capacity {
            slots.push(None);
        }
        Self {
            slots,
            occupied: IndexSet::new(),
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn occupied_indexes(&self) -> &IndexSet {
        &self.occupied
    }

    /// Element at `index`, or `None` for an empty slot.
    ///
    /// Panics unless `index < capacity()`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).as_ref()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).as_mut()
    }

    /// Store `value` at `index` (`None` empties the slot). Returns the
    /// previous occupant.
    ///
    /// Panics unless `index < capacity()`.
    pub fn set(&mut self, index: usize, value: Option<T>) -> Option<T> {
        let occupied = value.is_some();
        let old = mem::replace(self.slots.get_mut(index), value);
        if occupied {
            self.occupied.add_index(index);
        } else {
            self.occupied.remove_index(index);
        }
        old
    }

    pub fn take(&mut self, index: usize) -> Option<T> {
        self.set(index, None)
    }

    /// Occupied slots in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.occupied.iter().map(move |i| {
            let value = self
                .slots
                .get(i)
                .as_ref()
                .expect("occupied index must hold an element");
            (i, value)
        })
    }
}
