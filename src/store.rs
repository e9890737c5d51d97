//! Backing strategies for [`LruCache`](crate::LruCache).
//!
//! The eviction policy lives once in `LruCache`; how entries are located is
//! delegated to an [`LruStore`]. Two stores are provided:
//!
//! | Store | Lookup | Structure |
//! |-------|--------|-----------|
//! | [`HashIndexed`] | O(1) | hash index beside a recency list of keys |
//! | [`LinearScan`] | O(n) | one key-value list, searched front to back |
//!
//! Both keep entries ordered most recent first.

use crate::kv_list::{self, SentinelKeyValueList};
use crate::list::{self, NodeId, SentinelList};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Storage behind an LRU cache: a set of key-value entries kept in recency
/// order, most recent at the front.
///
/// Implementations never evict on their own; the cache decides when to call
/// [`pop_back`](LruStore::pop_back).
pub trait LruStore<K, V> {
    /// Name reported through [`CacheMetrics::algorithm_name`](crate::metrics::CacheMetrics::algorithm_name).
    const NAME: &'static str;

    /// Iterator over the entries, most recent first.
    type Iter<'a>: Iterator<Item = (&'a K, &'a V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// Returns `true` when nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves the entry for `key` to the front and returns its value.
    fn touch<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Looks up `key` without changing the recency order.
    fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Inserts an entry at the front.
    ///
    /// Callers look the key up with [`touch`](LruStore::touch) first and only
    /// push keys that are absent. [`HashIndexed`] replaces a duplicate entry;
    /// [`LinearScan`] rejects one with a debug assertion.
    fn push_front(&mut self, key: K, value: V);

    /// Removes and returns the least recently used entry.
    fn pop_back(&mut self) -> Option<(K, V)>;

    /// Removes the entry for `key` wherever it sits in the order.
    fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// The most recently used entry.
    fn front(&self) -> Option<(&K, &V)>;

    /// The least recently used entry.
    fn back(&self) -> Option<(&K, &V)>;

    /// Drops every entry.
    fn clear(&mut self);

    /// Entries from most to least recently used. Does not touch them.
    fn iter(&self) -> Self::Iter<'_>;
}

/// Hash index from key to list node, beside a [`SentinelList`] of keys.
///
/// The value sits in the index next to the node handle, so the list only
/// carries keys. Every entry appears in both structures, and both are always
/// updated in the same call.
pub struct HashIndexed<K, V, S = DefaultHashBuilder> {
    map: HashMap<K, (NodeId, V), S>,
    order: SentinelList<K>,
}

impl<K, V> HashIndexed<K, V, DefaultHashBuilder> {
    /// Creates an empty store sized for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> HashIndexed<K, V, S> {
    /// Like [`with_capacity`](HashIndexed::with_capacity), hashing with
    /// `hash_builder`.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        HashIndexed {
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            order: SentinelList::with_capacity(capacity),
        }
    }
}

impl<K, V, S> LruStore<K, V> for HashIndexed<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    const NAME: &'static str = "LRU";

    type Iter<'a> = IndexedIter<'a, K, V, S>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    fn touch<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (node, value) = self.map.get_mut(key)?;
        self.order.move_to_front(*node);
        Some(value)
    }

    fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).map(|(_, value)| value)
    }

    fn push_front(&mut self, key: K, value: V) {
        let node = self.order.insert_first(key.clone());
        if let Some((stale, _)) = self.map.insert(key, (node, value)) {
            // Keep one list node per indexed key
            self.order.erase(stale);
        }
    }

    fn pop_back(&mut self) -> Option<(K, V)> {
        let key = self.order.erase_last()?;
        let (_, value) = self.map.remove(&key)?;
        Some((key, value))
    }

    fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (key, (node, value)) = self.map.remove_entry(key)?;
        self.order.erase(node);
        Some((key, value))
    }

    fn front(&self) -> Option<(&K, &V)> {
        self.entry_at(self.order.first())
    }

    fn back(&self) -> Option<(&K, &V)> {
        self.entry_at(self.order.last())
    }

    fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }

    fn iter(&self) -> Self::Iter<'_> {
        IndexedIter {
            keys: self.order.iter(),
            map: &self.map,
        }
    }
}

impl<K, V, S> HashIndexed<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn entry_at(&self, node: NodeId) -> Option<(&K, &V)> {
        let key = self.order.get(node)?;
        self.map.get(key).map(|(_, value)| (key, value))
    }
}

impl<K, V, S> fmt::Debug for HashIndexed<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashIndexed")
            .field("len", &self.map.len())
            .finish()
    }
}

/// Iterator over a [`HashIndexed`] store, most recent first.
pub struct IndexedIter<'a, K, V, S> {
    keys: list::Iter<'a, K>,
    map: &'a HashMap<K, (NodeId, V), S>,
}

impl<'a, K, V, S> Iterator for IndexedIter<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        self.map.get(key).map(|(_, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K, V, S> DoubleEndedIterator for IndexedIter<'_, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.keys.next_back()?;
        self.map.get(key).map(|(_, value)| (key, value))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> FusedIterator for IndexedIter<'_, K, V, S> {}

impl<K, V, S> fmt::Debug for IndexedIter<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedIter")
            .field("keys", &self.keys)
            .finish()
    }
}

/// A single [`SentinelKeyValueList`] searched from the front on every lookup.
///
/// Needs no hashing and never clones keys; each lookup is O(n).
pub struct LinearScan<K, V> {
    list: SentinelKeyValueList<K, V>,
}

impl<K, V> LinearScan<K, V> {
    /// Creates an empty store.
    pub fn new() -> Self {
        LinearScan {
            list: SentinelKeyValueList::new(),
        }
    }

    /// Creates an empty store with list slots reserved for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        LinearScan {
            list: SentinelKeyValueList::with_capacity(capacity),
        }
    }
}

impl<K, V> Default for LinearScan<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq, V> LruStore<K, V> for LinearScan<K, V> {
    const NAME: &'static str = "LRU-SCAN";

    type Iter<'a> = kv_list::Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.list.len()
    }

    fn touch<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.list.find_key(key)?;
        self.list.move_to_front(node);
        self.list.value_mut(node)
    }

    fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.list.find_key(key)?;
        self.list.value(node)
    }

    fn push_front(&mut self, key: K, value: V) {
        debug_assert!(
            self.list.find_key(&key).is_none(),
            "push_front called with a key that is already stored"
        );
        self.list.insert_first(key, value);
    }

    fn pop_back(&mut self) -> Option<(K, V)> {
        self.list.erase_last()
    }

    fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.list.find_key(key)?;
        self.list.remove(node)
    }

    fn front(&self) -> Option<(&K, &V)> {
        self.list.get(self.list.first())
    }

    fn back(&self) -> Option<(&K, &V)> {
        self.list.get(self.list.last())
    }

    fn clear(&mut self) {
        self.list.clear();
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.list.iter()
    }
}

impl<K, V> fmt::Debug for LinearScan<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearScan")
            .field("len", &self.list.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    fn keys<B: LruStore<u32, u32>>(store: &B) -> Vec<u32> {
        store.iter().map(|(k, _)| *k).collect()
    }

    fn exercise<B: LruStore<u32, u32>>(mut store: B) {
        assert!(store.is_empty());
        assert_eq!(store.pop_back(), None);
        assert_eq!(store.front(), None);

        store.push_front(1, 10);
        store.push_front(2, 20);
        store.push_front(3, 30);
        assert_eq!(keys(&store), vec![3, 2, 1]);

        assert_eq!(store.touch(&1).map(|v| *v), Some(10));
        assert_eq!(keys(&store), vec![1, 3, 2]);
        assert_eq!(store.peek(&2), Some(&20));
        assert_eq!(keys(&store), vec![1, 3, 2]);
        assert_eq!(store.touch(&9), None);

        assert_eq!(store.front(), Some((&1, &10)));
        assert_eq!(store.back(), Some((&2, &20)));
        assert_eq!(store.pop_back(), Some((2, 20)));
        assert_eq!(store.remove(&1), Some((1, 10)));
        assert_eq!(store.remove(&1), None);
        assert_eq!(store.len(), 1);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.back(), None);
    }

    #[test]
    fn test_hash_indexed_store() {
        exercise(HashIndexed::with_capacity(4));
    }

    #[test]
    fn test_linear_scan_store() {
        exercise(LinearScan::with_capacity(4));
    }

    #[test]
    fn test_hash_indexed_iter_reverse() {
        let mut store: HashIndexed<String, i32> = HashIndexed::with_capacity(3);
        store.push_front(String::from("a"), 1);
        store.push_front(String::from("b"), 2);
        let oldest_first: Vec<i32> = store.iter().rev().map(|(_, v)| *v).collect();
        assert_eq!(oldest_first, vec![1, 2]);
        assert_eq!(store.peek("a"), Some(&1));
    }

    #[test]
    fn test_hash_indexed_duplicate_push_replaces_entry() {
        let mut store: HashIndexed<u32, u32> = HashIndexed::with_capacity(2);
        store.push_front(1, 10);
        store.push_front(2, 20);
        store.push_front(1, 11);

        assert_eq!(store.len(), 2);
        assert_eq!(store.iter().count(), store.len());
        assert_eq!(keys(&store), vec![1, 2]);
        assert_eq!(store.peek(&1), Some(&11));

        assert_eq!(store.pop_back(), Some((2, 20)));
        assert_eq!(store.pop_back(), Some((1, 11)));
        assert_eq!(store.pop_back(), None);
        assert!(store.order.is_empty(), "no list node may outlive its key");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "already stored")]
    fn test_linear_scan_duplicate_push_is_rejected() {
        let mut store: LinearScan<u32, u32> = LinearScan::new();
        store.push_front(1, 10);
        store.push_front(1, 20);
    }

    #[test]
    fn test_touch_returns_mutable_value() {
        let mut store: LinearScan<&str, i32> = LinearScan::new();
        store.push_front("k", 1);
        if let Some(v) = store.touch("k") {
            *v += 1;
        }
        assert_eq!(store.peek("k"), Some(&2));
    }
}
