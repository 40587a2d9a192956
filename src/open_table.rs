//! OpenTable: open addressing with linear probing.
//!
//! One entry per bucket; the bucket count is a hard ceiling on entries.
//! Removal back-shifts displaced entries into the vacated bucket instead of
//! leaving a tombstone, so a probe can always stop at the first empty bucket.

use crate::hash_table::Entry;
use crate::storage::OwnedStorage;
use core::mem;
use tracing::{debug, trace};

pub(crate) struct OpenTable<K, V> {
    slots: OwnedStorage<Option<Entry<K, V>>>,
    len: usize,
}

// Whether `x` lies in the circular interval `(lo, hi]`.
fn in_cyclic_range(x: usize, lo: usize, hi: usize) -> bool {
    if lo <= hi {
        lo < x && x <= hi
    } else {
        lo < x || x <= hi
    }
}

fn empty_slots<K, V>(buckets: usize) -> OwnedStorage<Option<Entry<K, V>>> {
    let mut slots = OwnedStorage::with_capacity(buckets);
    for _ in 0..buckets {
        slots.push(None);
    }
    slots
}

impl<K, V> OpenTable<K, V> {
    pub(crate) fn with_buckets(buckets: usize) -> Self {
        Self {
            slots: empty_slots(buckets),
            len: 0,
        }
    }

    pub(crate) fn buckets(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    fn home(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    // Bucket visited at `step` of the probe sequence starting at `home`.
    fn probe(&self, home: usize, step: usize) -> usize {
        (home + step) % self.slots.len()
    }

    fn find(&self, hash: u64, mut eq: impl FnMut(&K) -> bool) -> Option<usize> {
        let home = self.home(hash);
        for step in 0..self.buckets() {
            let i = self.probe(home, step);
            match self.slots.get(i) {
                None => return None,
                Some(e) if e.hash == hash && eq(&e.key) => return Some(i),
                Some(_) => {}
            }
        }
        None
    }

    pub(crate) fn get(&self, hash: u64, eq: impl FnMut(&K) -> bool) -> Option<&Entry<K, V>> {
        let i = self.find(hash, eq)?;
        self.slots.get(i).as_ref()
    }

    pub(crate) fn get_mut(
        &mut self,
        hash: u64,
        eq: impl FnMut(&K) -> bool,
    ) -> Option<&mut Entry<K, V>> {
        let i = self.find(hash, eq)?;
        self.slots.get_mut(i).as_mut()
    }

    /// Update in place when the key is present, otherwise bind the entry to
    /// the first empty bucket of its probe sequence.
    ///
    /// On update, returns the caller's now-unused key with the replaced
    /// value. A full table hands the rejected entry back. Either way the
    /// caller drops them.
    pub(crate) fn insert(&mut self, entry: Entry<K, V>) -> Result<Option<(K, V)>, Entry<K, V>>
    where
        K: Eq,
    {
        let home = self.home(entry.hash);
        for step in 0..self.buckets() {
            let i = self.probe(home, step);
            let slot = self.slots.get_mut(i);
            if let Some(e) = slot.as_mut() {
                if e.hash == entry.hash && e.key == entry.key {
                    let old = mem::replace(&mut e.value, entry.value);
                    return Ok(Some((entry.key, old)));
                }
                continue;
            }
            *slot = Some(entry);
            self.len += 1;
            return Ok(None);
        }
        debug!(
            capacity = self.buckets(),
            "open-addressing table full, insert rejected"
        );
        Err(entry)
    }

    pub(crate) fn remove(&mut self, hash: u64, eq: impl FnMut(&K) -> bool) -> Option<Entry<K, V>> {
        let mut gap = self.find(hash, eq)?;
        let removed = self.slots.get_mut(gap).take()?;
        self.len -= 1;

        // The gap is always empty, so the scan stops at the latest when it
        // wraps around to it.
        let mut j = gap;
        loop {
            j = self.probe(j, 1);
            let Some(e) = self.slots.get(j) else {
                break;
            };
            // An entry whose home lies in (gap, j] is still reachable; any
            // other entry would be cut off from its home by the gap.
            if !in_cyclic_range(self.home(e.hash), gap, j) {
                trace!(from = j, to = gap, "back-shifting displaced entry");
                let moved = self.slots.get_mut(j).take();
                *self.slots.get_mut(gap) = moved;
                gap = j;
            }
        }
        Some(removed)
    }

    /// Empty the table and hand back the old buckets. The table is already
    /// consistent when the caller drops them.
    pub(crate) fn take_all(&mut self) -> OwnedStorage<Option<Entry<K, V>>> {
        let fresh = empty_slots(self.buckets());
        self.len = 0;
        mem::replace(&mut self.slots, fresh)
    }

    /// Entries in bucket order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Entry<K, V>> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entry<K, V>> + '_ {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }
}
