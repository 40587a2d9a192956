//! ChainedTable: separate chaining over a fixed number of buckets.
//!
//! Each bucket is the head of a singly linked chain. Links live in a
//! generational arena, so unlinking never moves other entries. New keys are
//! pushed at the chain head; the bucket count never changes.

use crate::hash_table::Entry;
use crate::storage::RawStorage;
use core::mem;
use slotmap::{DefaultKey, SlotMap};

pub(crate) struct Link<K, V> {
    entry: Entry<K, V>,
    next: Option<DefaultKey>,
}

pub(crate) struct ChainedTable<K, V> {
    heads: RawStorage<Option<DefaultKey>>,
    links: SlotMap<DefaultKey, Link<K, V>>,
}

impl<K, V> ChainedTable<K, V> {
    pub(crate) fn with_buckets(buckets: usize) -> Self {
        let mut heads = RawStorage::with_capacity(buckets);
        for _ in 0..buckets {
            heads.push(None);
        }
        Self {
            heads,
            links: SlotMap::with_key(),
        }
    }

    pub(crate) fn buckets(&self) -> usize {
        self.heads.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.links.len()
    }

    fn bucket(&self, hash: u64) -> usize {
        (hash % self.heads.len() as u64) as usize
    }

    fn chain(&self, bucket: usize) -> impl Iterator<Item = DefaultKey> + '_ {
        core::iter::successors(self.heads.get(bucket), |&k| self.links[k].next)
    }

    fn find(&self, hash: u64, mut eq: impl FnMut(&K) -> bool) -> Option<DefaultKey> {
        self.chain(self.bucket(hash)).find(|&k| {
            let e = &self.links[k].entry;
            e.hash == hash && eq(&e.key)
        })
    }

    pub(crate) fn get(&self, hash: u64, eq: impl FnMut(&K) -> bool) -> Option<&Entry<K, V>> {
        self.find(hash, eq).map(|k| &self.links[k].entry)
    }

    pub(crate) fn get_mut(
        &mut self,
        hash: u64,
        eq: impl FnMut(&K) -> bool,
    ) -> Option<&mut Entry<K, V>> {
        let k = self.find(hash, eq)?;
        Some(&mut self.links[k].entry)
    }

    /// Update in place when the key is present, otherwise push a new link at
    /// the head of its chain. On update, returns the caller's now-unused key
    /// with the replaced value, for the caller to drop.
    pub(crate) fn insert(&mut self, entry: Entry<K, V>) -> Option<(K, V)>
    where
        K: Eq,
    {
        if let Some(k) = self.find(entry.hash, |k| *k == entry.key) {
            let old = mem::replace(&mut self.links[k].entry.value, entry.value);
            return Some((entry.key, old));
        }
        let bucket = self.bucket(entry.hash);
        let next = self.heads.get(bucket);
        let k = self.links.insert(Link { entry, next });
        self.heads.set_at(bucket, Some(k));
        None
    }

    pub(crate) fn remove(&mut self, hash: u64, mut eq: impl FnMut(&K) -> bool) -> Option<Entry<K, V>> {
        let bucket = self.bucket(hash);
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.heads.get(bucket);
        while let Some(k) = cur {
            let link = &self.links[k];
            if link.entry.hash == hash && eq(&link.entry.key) {
                let next = link.next;
                match prev {
                    None => self.heads.set_at(bucket, next),
                    Some(p) => self.links[p].next = next,
                }
                return self.links.remove(k).map(|l| l.entry);
            }
            prev = cur;
            cur = link.next;
        }
        None
    }

    /// Empty the table and hand back every link. The table is already
    /// consistent when the caller drops them.
    pub(crate) fn take_all(&mut self) -> SlotMap<DefaultKey, Link<K, V>> {
        for bucket in 0..self.heads.len() {
            self.heads.set_at(bucket, None);
        }
        mem::take(&mut self.links)
    }

    /// Entries in arena order, the same order `iter_mut` visits.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Entry<K, V>> + '_ {
        self.links.values().map(|l| &l.entry)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entry<K, V>> + '_ {
        self.links.values_mut().map(|l| &mut l.entry)
    }
}
