//! slotkit: standalone collections built from three small cores.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: collections whose invariants are their own, instead of wrappers
//!   that bend the contract of `Vec` or `HashMap` (e.g. "every index below
//!   `len` holds an element" does not hold for an array with holes).
//! - Cores:
//!   - `Storage<M>`: growable slot buffer. `M` picks one of three
//!     ownership modes (`Raw`, `Owned`, `Observed`); inserting into a full
//!     buffer grows and opens the gap in a single copy pass.
//!   - `IndexSet`: ordered set of `usize` stored as canonical half-open
//!     ranges; binary-searched containment and neighbor queries.
//!   - `HashTable<K, V, S>`: buckets on top of `Storage`, with the
//!     collision policy fixed at construction: separate chaining
//!     (unbounded) or open addressing (capacity is a hard ceiling, removal
//!     by back-shift).
//! - Front ends composed from the cores: `FixedArray` and `SparseArray`
//!   (slots that may be empty, occupancy in an `IndexSet`) and `SortedSet`
//!   (binary-search insertion under a caller comparator).
//!
//! Constraints
//! - Single-threaded. No internal locking; wrap instances in your own lock
//!   to share them. Types holding `Rc`/`Weak` or the reentrancy guard are
//!   `!Send`/`!Sync`.
//! - Capacity and collision policy of a `HashTable` never change. A chained
//!   table keeps its bucket count however many entries it holds.
//! - Open addressing reports a full table as `InsertError::CapacityExceeded`;
//!   that is a normal runtime outcome, never a panic.
//!
//! Failure classes
//! - Precondition violations (index past `len`, growing to a smaller
//!   capacity, zero capacity) are programmer errors and panic with a
//!   "contract violation" message. Debug and test builds always check;
//!   release builds check unless the `unchecked` feature is enabled.
//! - Lookups and removals of absent keys or indices return `None`.
//!
//! Hashing
//! - Each entry stores its `u64` hash. `K: Hash` runs only on the key
//!   passed to a public call; chain walks, probes and back-shifts compare
//!   stored hashes and call `K: Eq` only on a hash match.
//! - A debug-only reentrancy guard wraps those calls so a `K: Eq`/`K: Hash`
//!   that reaches back into the same table panics instead of observing it
//!   mid-update.
//!
//! Logging
//! - `tracing` events at `trace` (storage growth, back-shift moves) and
//!   `debug` (rejected inserts). The crate installs no subscriber.

#[macro_use]
mod contract;

mod chained_table;
pub mod fixed_array;
pub mod hash_table;
mod hash_table_proptest;
pub mod index_set;
mod open_table;
pub mod ownership;
mod reentrancy;
pub mod sorted_set;
pub mod sparse_array;
pub mod storage;

/// Initial capacity used by `Default` impls and by growable front ends.
pub const DEFAULT_CAPACITY: usize = 16;

// Public surface
pub use fixed_array::FixedArray;
pub use hash_table::{CollisionPolicy, HashTable, InsertError};
pub use index_set::IndexSet;
pub use ownership::{Observed, Owned, Ownership, Raw};
pub use sorted_set::SortedSet;
pub use sparse_array::SparseArray;
pub use storage::{ObservedStorage, OwnedStorage, RawStorage, Storage};
