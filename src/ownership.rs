//! Element-ownership modes for [`Storage`](crate::storage::Storage).
//!
//! A mode decides what a slot physically holds, what a vacant slot looks
//! like, and what happens to an element when it leaves the buffer.
//!
//! - [`Raw`]: plain `Copy` values. Nothing is released; vacant slots hold an
//!   unspecified (default) value.
//! - [`Owned`]: the slot owns its element. Overwrite, removal and teardown
//!   drop it. Put an `Rc<T>` in to share it with other owners.
//! - [`Observed`]: the slot holds a `Weak<T>`. Reading it yields `None` once
//!   the last strong owner elsewhere is gone; it never dangles.

use core::marker::PhantomData;
use std::rc::{Rc, Weak};

/// How a buffer slot binds, exposes and releases its element.
pub trait Ownership {
    /// What callers hand in and get back out on removal.
    type Elem;
    /// What lives in the buffer.
    type Slot;
    /// What a read through a shared borrow produces.
    type Ref<'a>
    where
        Self: 'a;

    /// A slot that holds nothing the mode would need to release.
    fn vacant() -> Self::Slot;

    fn bind(elem: Self::Elem) -> Self::Slot;

    /// Read an occupied slot.
    fn view<'a>(slot: &'a Self::Slot) -> Self::Ref<'a>
    where
        Self: 'a;

    /// Give up whatever the slot holds, leaving it vacant.
    fn release(slot: &mut Self::Slot);

    /// Turn an occupied slot taken out of the buffer back into an element.
    fn unbind(slot: Self::Slot) -> Self::Elem;
}

/// Plain values with no ownership semantics.
pub struct Raw<T>(PhantomData<T>);

impl<T: Copy + Default> Ownership for Raw<T> {
    type Elem = T;
    type Slot = T;
    type Ref<'a>
        = T
    where
        Self: 'a;

    #[inline]
    fn vacant() -> T {
        T::default()
    }

    #[inline]
    fn bind(elem: T) -> T {
        elem
    }

    #[inline]
    fn view<'a>(slot: &'a T) -> T
    where
        Self: 'a,
    {
        *slot
    }

    // Raw slots are never cleared; their content past the count is unspecified.
    #[inline]
    fn release(_slot: &mut T) {}

    #[inline]
    fn unbind(slot: T) -> T {
        slot
    }
}

/// Slots that own their element.
pub struct Owned<T>(PhantomData<T>);

impl<T> Ownership for Owned<T> {
    type Elem = T;
    type Slot = Option<T>;
    type Ref<'a>
        = &'a T
    where
        Self: 'a;

    #[inline]
    fn vacant() -> Option<T> {
        None
    }

    #[inline]
    fn bind(elem: T) -> Option<T> {
        Some(elem)
    }

    #[inline]
    fn view<'a>(slot: &'a Option<T>) -> &'a T
    where
        Self: 'a,
    {
        slot.as_ref().expect("slot below count must be occupied")
    }

    #[inline]
    fn release(slot: &mut Option<T>) {
        *slot = None;
    }

    #[inline]
    fn unbind(slot: Option<T>) -> T {
        slot.expect("slot below count must be occupied")
    }
}

/// Slots that observe an element owned elsewhere.
pub struct Observed<T>(PhantomData<T>);

impl<T> Ownership for Observed<T> {
    type Elem = Weak<T>;
    type Slot = Weak<T>;
    type Ref<'a>
        = Option<Rc<T>>
    where
        Self: 'a;

    #[inline]
    fn vacant() -> Weak<T> {
        Weak::new()
    }

    #[inline]
    fn bind(elem: Weak<T>) -> Weak<T> {
        elem
    }

    #[inline]
    fn view<'a>(slot: &'a Weak<T>) -> Option<Rc<T>>
    where
        Self: 'a,
    {
        slot.upgrade()
    }

    #[inline]
    fn release(slot: &mut Weak<T>) {
        *slot = Weak::new();
    }

    #[inline]
    fn unbind(slot: Weak<T>) -> Weak<T> {
        slot
    }
}
