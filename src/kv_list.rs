//! Key-value flavour of the sentinel list.
//!
//! Same shape as [`SentinelList`], but every node carries a key next to its
//! value, which lets the list double as a small key-searchable store.
//! Key search is a linear scan from the first node to the sentinel.

use crate::list::{self, NodeId, SentinelList};
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

/// A circular doubly linked list of key-value pairs with a single sentinel.
///
/// # Examples
///
/// ```
/// use sentinel_cache::SentinelKeyValueList;
///
/// let mut list = SentinelKeyValueList::new();
/// list.insert_last("a", 1);
/// list.insert_last("b", 2);
///
/// let b = list.find_key("b").unwrap();
/// assert_eq!(list.value(b), Some(&2));
/// assert_eq!(list.find_key("z"), None);
/// ```
pub struct SentinelKeyValueList<K, V> {
    inner: SentinelList<(K, V)>,
}

impl<K, V> SentinelKeyValueList<K, V> {
    /// Creates an empty list holding only the sentinel.
    pub fn new() -> Self {
        SentinelKeyValueList {
            inner: SentinelList::new(),
        }
    }

    /// Creates an empty list with slots reserved for `capacity` pairs.
    pub fn with_capacity(capacity: usize) -> Self {
        SentinelKeyValueList {
            inner: SentinelList::with_capacity(capacity),
        }
    }

    /// The sentinel. Reached after the last node and before the first.
    #[inline]
    pub fn end(&self) -> NodeId {
        self.inner.end()
    }

    /// The first node, or the sentinel when empty.
    #[inline]
    pub fn first(&self) -> NodeId {
        self.inner.first()
    }

    /// The last node, or the sentinel when empty.
    #[inline]
    pub fn last(&self) -> NodeId {
        self.inner.last()
    }

    /// The node after `id`; `None` for a handle this list did not issue.
    #[inline]
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.inner.next(id)
    }

    /// The node before `id`; `None` for a handle this list did not issue.
    #[inline]
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.inner.prev(id)
    }

    /// Number of pairs, not counting the sentinel.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` when only the sentinel is left.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Whether `id` names a live pair of this list.
    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.inner.contains_node(id)
    }

    /// The key and value stored at `id`.
    pub fn get(&self, id: NodeId) -> Option<(&K, &V)> {
        self.inner.get(id).map(|(k, v)| (k, v))
    }

    /// The key stored at `id`.
    pub fn key(&self, id: NodeId) -> Option<&K> {
        self.inner.get(id).map(|(k, _)| k)
    }

    /// The value stored at `id`.
    pub fn value(&self, id: NodeId) -> Option<&V> {
        self.inner.get(id).map(|(_, v)| v)
    }

    /// Only the value is reachable mutably; keys are fixed once inserted.
    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut V> {
        self.inner.get_mut(id).map(|(_, v)| v)
    }

    /// Zero-based positional lookup. O(n).
    pub fn nth(&self, index: usize) -> Option<NodeId> {
        self.inner.nth(index)
    }

    /// Links a new pair right after `anchor`. `None` if `anchor` is not ours.
    pub fn insert_after(&mut self, anchor: NodeId, key: K, value: V) -> Option<NodeId> {
        self.inner.insert_after(anchor, (key, value))
    }

    /// Links a new pair right before `anchor`. `None` if `anchor` is not ours.
    pub fn insert_before(&mut self, anchor: NodeId, key: K, value: V) -> Option<NodeId> {
        self.inner.insert_before(anchor, (key, value))
    }

    /// Pushes a pair at the front.
    pub fn insert_first(&mut self, key: K, value: V) -> NodeId {
        self.inner.insert_first((key, value))
    }

    /// Pushes a pair at the back.
    pub fn insert_last(&mut self, key: K, value: V) -> NodeId {
        self.inner.insert_last((key, value))
    }

    /// Unlinks `node` and returns the node that followed it. Erasing the
    /// sentinel is a no-op that returns the sentinel.
    pub fn erase(&mut self, node: NodeId) -> Option<NodeId> {
        self.inner.erase(node)
    }

    /// Unlinks `node` and hands back its pair.
    pub fn remove(&mut self, node: NodeId) -> Option<(K, V)> {
        self.inner.remove(node)
    }

    /// Removes and returns the first pair.
    pub fn erase_first(&mut self) -> Option<(K, V)> {
        self.inner.erase_first()
    }

    /// Removes and returns the last pair.
    pub fn erase_last(&mut self) -> Option<(K, V)> {
        self.inner.erase_last()
    }

    /// Relinks `node` at the front without reallocating it.
    /// Returns `false` for the sentinel or a stale handle.
    pub fn move_to_front(&mut self, node: NodeId) -> bool {
        self.inner.move_to_front(node)
    }

    /// Relinks `node` at the back. Same rules as [`Self::move_to_front`].
    pub fn move_to_back(&mut self, node: NodeId) -> bool {
        self.inner.move_to_back(node)
    }

    /// Drops every pair. Handles issued before the call stop resolving.
    pub fn clear(&mut self) {
        self.inner.clear()
    }

    /// Returns the first node whose key equals `key`. O(n).
    pub fn find_key<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.inner
            .node_ids()
            .zip(self.inner.iter())
            .find(|(_, pair)| pair.0.borrow() == key)
            .map(|(id, _)| id)
    }

    /// Every node whose value equals `value`, first to last.
    pub fn find_value<'a>(&'a self, value: &'a V) -> impl Iterator<Item = NodeId> + 'a
    where
        V: PartialEq,
    {
        self.inner
            .node_ids()
            .zip(self.inner.iter())
            .filter(move |(_, pair)| pair.1 == *value)
            .map(|(id, _)| id)
    }

    /// Iterates over the pairs from first to last.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.inner.iter(),
        }
    }

    /// Keys from first to last.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.inner.iter().map(|(k, _)| k)
    }

    /// Values from first to last.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        self.inner.iter().map(|(_, v)| v)
    }

    /// Handles of every pair from first to last.
    pub fn node_ids(&self) -> list::NodeIds<'_, (K, V)> {
        self.inner.node_ids()
    }
}

impl<K, V> Default for SentinelKeyValueList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SentinelKeyValueList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Extend<(K, V)> for SentinelKeyValueList<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.inner.extend(iter)
    }
}

impl<K, V> FromIterator<(K, V)> for SentinelKeyValueList<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        SentinelKeyValueList {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a SentinelKeyValueList<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the pairs of a [`SentinelKeyValueList`], first to last.
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.inner).finish()
    }
}
