//! HashTable: key-value map with a collision policy chosen at construction.
//!
//! - [`CollisionPolicy::Chaining`]: `capacity` buckets, each heading a chain.
//!   Entry count is unbounded; the bucket count never changes.
//! - [`CollisionPolicy::OpenAddressing`]: `capacity` buckets holding one
//!   entry each; inserting a new key into a full table fails with
//!   [`InsertError::CapacityExceeded`].
//!
//! Every entry stores its 64-bit hash. `K: Hash` runs once per public call on
//! the caller's key; chain walks, probes and back-shifts compare stored
//! hashes before calling `K: Eq`.

use crate::chained_table::ChainedTable;
use crate::open_table::OpenTable;
use crate::reentrancy::DebugReentrancy;
use crate::DEFAULT_CAPACITY;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::ops::ControlFlow;
use hashbrown::hash_map::DefaultHashBuilder;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CollisionPolicy {
    Chaining,
    OpenAddressing,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum InsertError {
    #[error("open-addressing table is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },
}

#[derive(Debug, PartialEq)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
}

enum Buckets<K, V> {
    Chained(ChainedTable<K, V>),
    Open(OpenTable<K, V>),
}

pub struct HashTable<K, V, S = DefaultHashBuilder> {
    hasher: S,
    buckets: Buckets<K, V>,
    reentrancy: DebugReentrancy,
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    /// Create a table with `capacity` buckets. Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize, policy: CollisionPolicy) -> Self {
        Self::with_capacity_and_hasher(capacity, policy, Default::default())
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, CollisionPolicy::Chaining)
    }
}

/// Iterator over the entries of a [`HashTable`].
pub struct Iter<'a, K: 'a, V: 'a> {
    it: Box<dyn Iterator<Item = &'a Entry<K, V>> + 'a>,
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|e| (&e.key, &e.value))
    }
}

/// Iterator over the entries of a [`HashTable`] with mutable values.
pub struct IterMut<'a, K: 'a, V: 'a> {
    it: Box<dyn Iterator<Item = &'a mut Entry<K, V>> + 'a>,
}

impl<'a, K: 'a, V: 'a> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|e| (&e.key, &mut e.value))
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_capacity_and_hasher(capacity: usize, policy: CollisionPolicy, hasher: S) -> Self {
        require!(capacity > 0, "hash table capacity must be non-zero");
        let buckets = match policy {
            CollisionPolicy::Chaining => Buckets::Chained(ChainedTable::with_buckets(capacity)),
            CollisionPolicy::OpenAddressing => Buckets::Open(OpenTable::with_buckets(capacity)),
        };
        Self {
            hasher,
            buckets,
            reentrancy: DebugReentrancy::new(),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    pub fn policy(&self) -> CollisionPolicy {
        match self.buckets {
            Buckets::Chained(_) => CollisionPolicy::Chaining,
            Buckets::Open(_) => CollisionPolicy::OpenAddressing,
        }
    }

    /// Bucket count; for open addressing also the maximum entry count.
    pub fn capacity(&self) -> usize {
        match &self.buckets {
            Buckets::Chained(t) => t.buckets(),
            Buckets::Open(t) => t.buckets(),
        }
    }

    pub fn len(&self) -> usize {
        match &self.buckets {
            Buckets::Chained(t) => t.len(),
            Buckets::Open(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert or update. Returns the replaced value when the key was present.
    ///
    /// Fails only under open addressing, when the key is new and every bucket
    /// is taken; the table is left unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, InsertError> {
        let outcome = {
            let _g = self.reentrancy.enter();
            let hash = self.make_hash(&key);
            let entry = Entry { key, value, hash };
            match &mut self.buckets {
                Buckets::Chained(t) => Ok(t.insert(entry)),
                Buckets::Open(t) => t.insert(entry),
            }
        };
        // Leftover keys, replaced values and rejected entries drop here,
        // outside the guard; their Drop may reenter.
        match outcome {
            Ok(replaced) => Ok(replaced.map(|(_, old)| old)),
            Err(rejected) => {
                drop(rejected);
                Err(InsertError::CapacityExceeded {
                    capacity: self.capacity(),
                })
            }
        }
    }

    fn entry<Q>(&self, q: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let eq = |k: &K| k.borrow() == q;
        match &self.buckets {
            Buckets::Chained(t) => t.get(hash, eq),
            Buckets::Open(t) => t.get(hash, eq),
        }
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        self.entry(q).map(|e| &e.value)
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        self.entry(q).map(|e| (&e.key, &e.value))
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        let eq = |k: &K| k.borrow() == q;
        let entry = match &mut self.buckets {
            Buckets::Chained(t) => t.get_mut(hash, eq),
            Buckets::Open(t) => t.get_mut(hash, eq),
        };
        entry.map(|e| &mut e.value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        self.entry(q).is_some()
    }

    /// Remove a key, returning the owned key and value if it was present.
    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let entry = {
            let _g = self.reentrancy.enter();
            let hash = self.make_hash(q);
            let eq = |k: &K| k.borrow() == q;
            match &mut self.buckets {
                Buckets::Chained(t) => t.remove(hash, eq),
                Buckets::Open(t) => t.remove(hash, eq),
            }
        };
        // Structure is consistent again; dropping K/V may reenter.
        entry.map(|e| (e.key, e.value))
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(q).map(|(_, v)| v)
    }

    /// Drop every entry. Capacity and policy are kept.
    pub fn clear(&mut self) {
        // Entries are detached first and dropped once the table is empty.
        match &mut self.buckets {
            Buckets::Chained(t) => drop(t.take_all()),
            Buckets::Open(t) => drop(t.take_all()),
        }
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        let it: Box<dyn Iterator<Item = &Entry<K, V>> + '_> = match &self.buckets {
            Buckets::Chained(t) => Box::new(t.iter()),
            Buckets::Open(t) => Box::new(t.iter()),
        };
        Iter { it }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let it: Box<dyn Iterator<Item = &mut Entry<K, V>> + '_> = match &mut self.buckets {
            Buckets::Chained(t) => Box::new(t.iter_mut()),
            Buckets::Open(t) => Box::new(t.iter_mut()),
        };
        IterMut { it }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Visit every entry until `f` breaks. Returns `Break` when stopped early.
    pub fn for_each_entry<F>(&self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        self.iter().try_for_each(|(k, v)| f(k, v))
    }
}

impl<K, V, S> fmt::Debug for HashTable<K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
