//! ChainedHashTable: bucket array of chain heads over an entry arena.

use crate::config::TableConfig;
use crate::djb2::bucket_index;
use crate::entry::{Entry, EntryKey};
use crate::error::TableError;
use core::mem;
use log::{debug, info, warn};
use slotmap::SlotMap;

#[derive(Debug)]
pub struct ChainedHashTable {
    buckets: Vec<Option<EntryKey>>, // chain heads, len == capacity
    entries: SlotMap<EntryKey, Entry>,
    max_load_factor: Option<f64>,
}

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

/// Link `new` at the tail of bucket `idx`. `tail` must be the current last node
/// of that chain, or `None` when the bucket is empty.
fn link_tail(
    buckets: &mut [Option<EntryKey>],
    entries: &mut SlotMap<EntryKey, Entry>,
    idx: usize,
    tail: Option<EntryKey>,
    new: EntryKey,
) {
    match tail {
        Some(t) => entries[t].next = Some(new),
        None => buckets[idx] = Some(new),
    }
}

impl ChainedHashTable {
    /// Create a table with `capacity` empty buckets and no automatic growth.
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        Self::with_config(TableConfig::new(capacity))
    }

    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        debug!(
            "creating table with capacity {} (max load factor {:?})",
            config.initial_capacity, config.max_load_factor
        );
        Ok(Self::empty(config.initial_capacity, config.max_load_factor))
    }

    fn empty(capacity: usize, max_load_factor: Option<f64>) -> Self {
        Self {
            buckets: vec![None; capacity],
            entries: SlotMap::with_key(),
            max_load_factor,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    pub fn max_load_factor(&self) -> Option<f64> {
        self.max_load_factor
    }

    fn find(&self, key: &str) -> Option<EntryKey> {
        let mut cur = self.buckets[bucket_index(key, self.capacity())];
        while let Some(k) = cur {
            let e = &self.entries[k];
            if e.key == key {
                return Some(k);
            }
            cur = e.next;
        }
        None
    }

    /// Insert or update `key`. Returns the previous value on update.
    ///
    /// A new key is appended to the tail of its bucket's chain, so chains keep
    /// first-insertion order. With a configured max load factor the table may
    /// grow before returning; `capacity()` reflects the result.
    pub fn insert(&mut self, key: &str, value: &str) -> Option<String> {
        let idx = bucket_index(key, self.capacity());
        let mut tail = None;
        let mut cur = self.buckets[idx];
        while let Some(k) = cur {
            let e = &mut self.entries[k];
            if e.key == key {
                return Some(mem::replace(&mut e.value, value.to_owned()));
            }
            tail = Some(k);
            cur = e.next;
        }

        let new = self.entries.insert(Entry::new(key, value));
        link_tail(&mut self.buckets, &mut self.entries, idx, tail, new);
        self.grow_to_load_factor();
        None
    }

    /// Value stored for `key`, valid until the next mutation.
    pub fn retrieve(&self, key: &str) -> Option<&str> {
        self.find(key).map(|k| self.entries[k].value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Unlink and release `key`'s entry, returning its value.
    ///
    /// Removing an absent key leaves the table untouched and logs a warning.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = bucket_index(key, self.capacity());
        let mut prev: Option<EntryKey> = None;
        let mut cur = self.buckets[idx];
        while let Some(k) = cur {
            let e = &self.entries[k];
            if e.key == key {
                let next = e.next;
                match prev {
                    Some(p) => self.entries[p].next = next,
                    None => self.buckets[idx] = next,
                }
                return self.entries.remove(k).map(|e| e.value);
            }
            prev = Some(k);
            cur = e.next;
        }
        warn!("remove: key {:?} does not exist", key);
        None
    }

    /// Consume the table and return one with twice the capacity holding the
    /// same entries. The old bucket array is released before returning.
    pub fn resize(mut self) -> Self {
        self.grow();
        self
    }

    /// Double the capacity in place: rehash into a new table, swap, release the old one.
    pub fn grow(&mut self) {
        let new_capacity = self
            .capacity()
            .checked_mul(2)
            .unwrap_or_else(|| capacity_overflow());
        self.rehash_to(new_capacity);
    }

    fn rehash_to(&mut self, new_capacity: usize) {
        let old_capacity = self.capacity();
        let rehashed = self.rehash_into(new_capacity);
        let old = mem::replace(self, rehashed);
        debug_assert!(old.entries.is_empty());
        info!(
            "resized table from {} to {} buckets ({} entries)",
            old_capacity,
            new_capacity,
            self.len()
        );
    }

    /// Move every entry into a fresh table of `new_capacity` buckets.
    ///
    /// Buckets are visited in index order and each chain head to tail; every
    /// moved node is appended at its new bucket's tail, so nodes that share a
    /// new bucket keep their previous relative order. Leaves `self` empty.
    ///
    /// While moving, each new bucket holds its chain's tail and the chain is
    /// circular (tail.next is the head), giving O(1) append with only the
    /// old and new bucket arrays alive. The rings are opened before returning.
    fn rehash_into(&mut self, new_capacity: usize) -> Self {
        let mut new = Self {
            buckets: vec![None; new_capacity],
            entries: SlotMap::with_capacity_and_key(self.len()),
            max_load_factor: self.max_load_factor,
        };

        for head in self.buckets.iter_mut() {
            let mut cur = head.take();
            while let Some(k) = cur {
                let mut entry = self.entries.remove(k).unwrap();
                cur = entry.next.take();

                let idx = bucket_index(&entry.key, new_capacity);
                let moved = new.entries.insert(entry);
                match new.buckets[idx] {
                    Some(tail) => {
                        let first = new.entries[tail].next;
                        new.entries[moved].next = first;
                        new.entries[tail].next = Some(moved);
                    }
                    None => new.entries[moved].next = Some(moved),
                }
                new.buckets[idx] = Some(moved);
            }
        }

        for slot in new.buckets.iter_mut() {
            if let Some(tail) = *slot {
                *slot = new.entries[tail].next.take();
            }
        }
        new
    }

    /// Smallest `capacity * 2^k` whose load factor is at most `max`.
    fn target_capacity(&self, max: f64) -> usize {
        let mut capacity = self.capacity();
        while self.len() as f64 / capacity as f64 > max {
            capacity = capacity
                .checked_mul(2)
                .unwrap_or_else(|| capacity_overflow());
        }
        capacity
    }

    fn grow_to_load_factor(&mut self) {
        let Some(max) = self.max_load_factor else {
            return;
        };
        if self.load_factor() <= max {
            return;
        }
        let target = self.target_capacity(max);
        debug!(
            "load factor {:.3} exceeds {:.3}, growing to {} buckets",
            self.load_factor(),
            max,
            target
        );
        self.rehash_to(target);
    }

    /// Release every chain, then the bucket array, then the table.
    pub fn destroy(mut self) {
        debug!(
            "destroying table with capacity {} and {} entries",
            self.capacity(),
            self.len()
        );
        self.entries.clear();
    }

    /// Number of nodes in bucket `bucket`'s chain. Panics if out of range.
    pub fn chain_len(&self, bucket: usize) -> usize {
        self.chain(bucket).count()
    }

    /// Entries of bucket `bucket` in chain order. Panics if out of range.
    pub fn chain(&self, bucket: usize) -> Chain<'_> {
        Chain {
            entries: &self.entries,
            cur: self.buckets[bucket],
        }
    }

    /// All entries, bucket by bucket, each chain head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            entries: &self.entries,
            buckets: self.buckets.iter(),
            chain: None,
        }
    }

    /// Panics if a structural invariant is broken.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        use std::collections::HashSet;
        let mut seen = HashSet::new();
        for (i, head) in self.buckets.iter().enumerate() {
            let mut cur = *head;
            let mut steps = 0;
            while let Some(k) = cur {
                steps += 1;
                assert!(steps <= self.entries.len(), "cycle in bucket {}", i);
                let e = self.entries.get(k).expect("dangling chain link");
                assert_eq!(bucket_index(&e.key, self.capacity()), i, "misplaced key");
                assert!(seen.insert(e.key.as_str()), "duplicate key {:?}", e.key);
                cur = e.next;
            }
        }
        assert_eq!(seen.len(), self.entries.len(), "orphaned entries");
    }
}

/// Iterator over one bucket's chain.
pub struct Chain<'a> {
    entries: &'a SlotMap<EntryKey, Entry>,
    cur: Option<EntryKey>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = (&'a str, &'a str);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entries = self.entries;
        let e = &entries[self.cur?];
        self.cur = e.next;
        Some((e.key.as_str(), e.value.as_str()))
    }
}

/// Iterator over every entry in bucket order.
pub struct Iter<'a> {
    entries: &'a SlotMap<EntryKey, Entry>,
    buckets: core::slice::Iter<'a, Option<EntryKey>>,
    chain: Option<Chain<'a>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.chain.as_mut().and_then(Iterator::next) {
                return Some(item);
            }
            let head = *self.buckets.next()?;
            self.chain = Some(Chain {
                entries: self.entries,
                cur: head,
            });
        }
    }
}

impl<'a> IntoIterator for &'a ChainedHashTable {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
