//! Storage: a growable slot buffer parameterized by ownership mode.
//!
//! Slots `[0, len)` hold live elements. Slots `[len, capacity)` are vacant:
//! cleared for [`Owned`] and [`Observed`], unspecified for [`Raw`]. The
//! buffer doubles when an insertion finds it full; an insertion that has to
//! grow copies prefix and suffix around the new element's gap in one pass.

use crate::ownership::{Observed, Owned, Ownership, Raw};
use crate::DEFAULT_CAPACITY;
use core::fmt;
use core::mem;
use std::rc::Rc;
use tracing::trace;

pub struct Storage<M: Ownership> {
    count: usize,
    items: Box<[M::Slot]>,
}

pub type RawStorage<T> = Storage<Raw<T>>;
pub type OwnedStorage<T> = Storage<Owned<T>>;
pub type ObservedStorage<T> = Storage<Observed<T>>;

impl<M: Ownership> Storage<M> {
    /// Create an empty buffer with room for `capacity` elements.
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        require!(capacity > 0, "storage capacity must be non-zero");
        let mut items = Vec::with_capacity(capacity);
        items.resize_with(capacity, M::vacant);
        Self {
            count: 0,
            items: items.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Read the element at `index`. Panics unless `index < len()`.
    pub fn get<'a>(&'a self, index: usize) -> M::Ref<'a>
    where
        M: 'a,
    {
        require!(
            index < self.count,
            "index {index} out of bounds for count {}",
            self.count
        );
        M::view(&self.items[index])
    }

    /// Append at the end, doubling the capacity first when full.
    pub fn push(&mut self, elem: M::Elem) {
        if self.count == self.capacity() {
            self.grow_to(self.doubled(), None);
        }
        self.items[self.count] = M::bind(elem);
        self.count += 1;
    }

    /// Insert at `index`, shifting `[index, len)` up by one.
    ///
    /// Panics unless `index <= len()`.
    pub fn insert_at(&mut self, index: usize, elem: M::Elem) {
        require!(
            index <= self.count,
            "insertion index {index} out of bounds for count {}",
            self.count
        );
        if self.count == self.capacity() {
            self.grow_to(self.doubled(), Some(index));
        } else {
            // The vacant slot at `count` rotates down into the gap.
            self.items[index..=self.count].rotate_right(1);
        }
        self.items[index] = M::bind(elem);
        self.count += 1;
    }

    /// Remove and return the element at `index`, shifting `[index + 1, len)`
    /// down by one. The vacated trailing slot retains no ownership.
    ///
    /// Panics unless `index < len()`.
    pub fn remove_at(&mut self, index: usize) -> M::Elem {
        require!(
            index < self.count,
            "removal index {index} out of bounds for count {}",
            self.count
        );
        let slot = mem::replace(&mut self.items[index], M::vacant());
        self.items[index..self.count].rotate_left(1);
        self.count -= 1;
        M::unbind(slot)
    }

    /// Replace the element at `index`. The previous occupant is released
    /// before the new one is bound.
    ///
    /// Panics unless `index < len()`.
    pub fn set_at(&mut self, index: usize, elem: M::Elem) {
        require!(
            index < self.count,
            "index {index} out of bounds for count {}",
            self.count
        );
        let slot = &mut self.items[index];
        M::release(slot);
        *slot = M::bind(elem);
    }

    /// Release every element and reset the count. Capacity is kept.
    pub fn clear(&mut self) {
        for slot in &mut self.items[..self.count] {
            M::release(slot);
        }
        self.count = 0;
    }

    /// Grow the buffer to exactly `new_capacity` slots.
    ///
    /// Panics unless `new_capacity > capacity()`.
    pub fn grow(&mut self, new_capacity: usize) {
        self.grow_to(new_capacity, None);
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = M::Ref<'a>> + 'a
    where
        M: 'a,
    {
        self.items[..self.count].iter().map(|slot| M::view(slot))
    }

    fn doubled(&self) -> usize {
        self.capacity()
            .checked_mul(2)
            .expect("storage capacity overflow")
    }

    // Moves live elements into a fresh buffer. With a gap, `[0, gap)` keeps its
    // position and `[gap, len)` lands one slot higher, leaving `gap` vacant.
    fn grow_to(&mut self, new_capacity: usize, gap: Option<usize>) {
        require!(
            new_capacity > self.capacity(),
            "new capacity {new_capacity} must exceed current capacity {}",
            self.capacity()
        );
        trace!(
            from = self.capacity(),
            to = new_capacity,
            ?gap,
            "growing storage"
        );
        let old = mem::take(&mut self.items).into_vec();
        let mut items = Vec::with_capacity(new_capacity);
        for (i, slot) in old.into_iter().take(self.count).enumerate() {
            if gap == Some(i) {
                items.push(M::vacant());
            }
            items.push(slot);
        }
        if gap == Some(self.count) {
            items.push(M::vacant());
        }
        items.resize_with(new_capacity, M::vacant);
        self.items = items.into_boxed_slice();
    }
}

impl<T> Storage<Owned<T>> {
    /// Mutable access to an owned element. Panics unless `index < len()`.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        require!(
            index < self.count,
            "index {index} out of bounds for count {}",
            self.count
        );
        self.items[index]
            .as_mut()
            .expect("slot below count must be occupied")
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.items[..self.count]
            .iter_mut()
            .map(|slot| slot.as_mut().expect("slot below count must be occupied"))
    }
}

impl<T> Storage<Observed<T>> {
    /// Append a non-owning reference to `rc`.
    pub fn push_observed(&mut self, rc: &Rc<T>) {
        self.push(Rc::downgrade(rc));
    }

    /// Number of observed elements whose referent is still alive.
    pub fn live_count(&self) -> usize {
        self.items[..self.count]
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }
}

impl<M: Ownership> Default for Storage<M> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<M> fmt::Debug for Storage<M>
where
    M: Ownership,
    M::Slot: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("count", &self.count)
            .field("capacity", &self.capacity())
            .field("items", &&self.items[..self.count])
            .finish()
    }
}
