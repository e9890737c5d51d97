//! Sentinel-based circular doubly linked list.
//!
//! Every list owns one permanent sentinel node. The sentinel sits both before
//! the first element and after the last one, so inserting or erasing at either
//! end never has to special-case a missing neighbour:
//!
//! ```text
//!        ┌──────────────────────────────────────────────┐
//!        ▼                                              │
//!   ┌──────────┐    ┌────────┐    ┌────────┐    ┌────────┐
//!   │ sentinel │ ─▶ │ first  │ ─▶ │  ...   │ ─▶ │  last  │
//!   └──────────┘ ◀─ └────────┘ ◀─ └────────┘ ◀─ └────────┘
//!        │                                              ▲
//!        └──────────────────────────────────────────────┘
//! ```
//!
//! The list is empty iff `sentinel.next == sentinel`.
//!
//! # Storage
//!
//! Nodes live in an arena (a `Vec` of slots) owned by the list and link to
//! each other by slot index, so the cycle through the sentinel involves no
//! shared ownership and no raw pointers. Erased slots go onto a free chain and
//! are reused by later inserts.
//!
//! # Handles
//!
//! Insert operations hand back a [`NodeId`]. A handle carries the identity of
//! the list that issued it and the generation of its slot, so a handle from a
//! different list, or one whose node has since been erased, is rejected by
//! every operation before anything is mutated.

use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;
use core::sync::atomic::{AtomicU32, Ordering};

/// Slot index of the sentinel in every list.
const SENTINEL: usize = 0;

/// Marks the end of the free chain.
const NIL: usize = usize::MAX;

static NEXT_LIST_TAG: AtomicU32 = AtomicU32::new(1);

fn next_tag() -> u32 {
    NEXT_LIST_TAG.fetch_add(1, Ordering::Relaxed)
}

/// Handle to a node of one particular list.
///
/// Handles are cheap to copy and stay valid until the node they name is
/// erased or the list is cleared. The sentinel also has a handle, returned by
/// [`SentinelList::end`].
///
/// Slot generations are 64-bit and cannot realistically wrap. List tags are
/// 32-bit and drawn from one process-wide counter bumped by every `new` and
/// `clear`; after 2^32 of those the counter wraps, and a handle kept across
/// that many calls could name a node of an unrelated list again.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    list: u32,
    index: usize,
    generation: u64,
}

impl NodeId {
    /// Returns true if this handle names a list's sentinel.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.index == SENTINEL
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sentinel() {
            write!(f, "NodeId(#{}:end)", self.list)
        } else {
            write!(f, "NodeId(#{}:{}@{})", self.list, self.index, self.generation)
        }
    }
}

/// One arena slot. The sentinel and free slots hold no value.
struct Slot<T> {
    val: Option<T>,
    prev: usize,
    next: usize,
    generation: u64,
}

/// A circular doubly linked list with a single sentinel node.
///
/// # Examples
///
/// ```
/// use sentinel_cache::SentinelList;
///
/// let mut list = SentinelList::new();
/// let ten = list.insert_first(10);
/// list.insert_first(9);
/// list.insert_after(ten, 11).unwrap();
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [9, 10, 11]);
/// assert_eq!(list.get(list.first()), Some(&9));
///
/// // Erasing returns the node that followed the erased one.
/// let after = list.erase(ten).unwrap();
/// assert_eq!(list.get(after), Some(&11));
/// ```
pub struct SentinelList<T> {
    tag: u32,
    slots: Vec<Slot<T>>,
    free: usize,
    len: usize,
}

impl<T> SentinelList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` elements before the
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.saturating_add(1));
        slots.push(Slot {
            val: None,
            prev: SENTINEL,
            next: SENTINEL,
            generation: 0,
        });
        SentinelList {
            tag: next_tag(),
            slots,
            free: NIL,
            len: 0,
        }
    }

    #[inline]
    fn id(&self, index: usize) -> NodeId {
        NodeId {
            list: self.tag,
            index,
            generation: self.slots[index].generation,
        }
    }

    /// Maps a handle to its slot index if it names the sentinel or a live
    /// node of this list.
    #[inline]
    fn resolve(&self, id: NodeId) -> Option<usize> {
        if id.list != self.tag {
            return None;
        }
        let slot = self.slots.get(id.index)?;
        if slot.generation != id.generation || (id.index != SENTINEL && slot.val.is_none()) {
            return None;
        }
        Some(id.index)
    }

    /// Returns true if `id` names the sentinel or a live node of this list.
    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.resolve(id).is_some()
    }

    /// The sentinel, used as the end marker when walking the list.
    #[inline]
    pub fn end(&self) -> NodeId {
        self.id(SENTINEL)
    }

    /// The first node, or [`end`](Self::end) if the list is empty.
    #[inline]
    pub fn first(&self) -> NodeId {
        self.id(self.slots[SENTINEL].next)
    }

    /// The last node, or [`end`](Self::end) if the list is empty.
    #[inline]
    pub fn last(&self) -> NodeId {
        self.id(self.slots[SENTINEL].prev)
    }

    /// The node after `id`. Following `next` from the last node yields the
    /// sentinel, and from the sentinel yields the first node.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        let index = self.resolve(id)?;
        Some(self.id(self.slots[index].next))
    }

    /// The node before `id`.
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        let index = self.resolve(id)?;
        Some(self.id(self.slots[index].prev))
    }

    /// Number of elements, not counting the sentinel.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when only the sentinel is left.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots[SENTINEL].next == SENTINEL
    }

    /// The value stored at `id`. `None` for the sentinel and for handles that
    /// do not name a live node of this list.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        let index = self.resolve(id)?;
        self.slots[index].val.as_ref()
    }

    /// Mutable access to the value at `id`. Same rules as [`Self::get`].
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let index = self.resolve(id)?;
        self.slots[index].val.as_mut()
    }

    /// The handle of the element at zero-based position `index`, counting
    /// from the first node. O(n).
    pub fn nth(&self, index: usize) -> Option<NodeId> {
        self.node_ids().nth(index)
    }

    fn alloc(&mut self, val: T) -> usize {
        if self.free == NIL {
            self.slots.push(Slot {
                val: Some(val),
                prev: NIL,
                next: NIL,
                generation: 0,
            });
            return self.slots.len() - 1;
        }
        let index = self.free;
        let slot = &mut self.slots[index];
        self.free = slot.next;
        slot.val = Some(val);
        index
    }

    /// Links the detached slot `index` right after slot `prev`.
    fn attach(&mut self, index: usize, prev: usize) {
        let next = self.slots[prev].next;
        self.slots[index].prev = prev;
        self.slots[index].next = next;
        self.slots[prev].next = index;
        self.slots[next].prev = index;
    }

    /// Unlinks slot `index` from its neighbours. The slot's own links are left
    /// stale.
    fn detach(&mut self, index: usize) {
        let (prev, next) = (self.slots[index].prev, self.slots[index].next);
        self.slots[prev].next = next;
        self.slots[next].prev = prev;
    }

    /// Returns a detached slot to the free chain and hands back its value.
    fn release(&mut self, index: usize) -> Option<T> {
        let free = self.free;
        let slot = &mut self.slots[index];
        let val = slot.val.take();
        slot.generation = slot.generation.wrapping_add(1);
        slot.prev = NIL;
        slot.next = free;
        self.free = index;
        self.len -= 1;
        val
    }

    fn link_after(&mut self, value: T, prev: usize) -> NodeId {
        let index = self.alloc(value);
        self.attach(index, prev);
        self.len += 1;
        self.id(index)
    }

    fn unlink(&mut self, index: usize) -> Option<T> {
        debug_assert_ne!(index, SENTINEL);
        self.detach(index);
        self.release(index)
    }

    /// Inserts `value` between `anchor` and the node after it.
    ///
    /// Returns `None` without modifying the list if `anchor` is not a node of
    /// this list. The sentinel is a valid anchor.
    pub fn insert_after(&mut self, anchor: NodeId, value: T) -> Option<NodeId> {
        let prev = self.resolve(anchor)?;
        Some(self.link_after(value, prev))
    }

    /// Inserts `value` between the node before `anchor` and `anchor`.
    pub fn insert_before(&mut self, anchor: NodeId, value: T) -> Option<NodeId> {
        let next = self.resolve(anchor)?;
        let prev = self.slots[next].prev;
        Some(self.link_after(value, prev))
    }

    /// Inserts `value` at the front, right after the sentinel.
    pub fn insert_first(&mut self, value: T) -> NodeId {
        self.link_after(value, SENTINEL)
    }

    /// Inserts `value` at the back, right before the sentinel.
    pub fn insert_last(&mut self, value: T) -> NodeId {
        let prev = self.slots[SENTINEL].prev;
        self.link_after(value, prev)
    }

    /// Unlinks `node` and returns the node that followed it.
    ///
    /// Erasing the sentinel does nothing and returns the sentinel. Returns
    /// `None` if `node` is not a node of this list.
    pub fn erase(&mut self, node: NodeId) -> Option<NodeId> {
        let index = self.resolve(node)?;
        if index == SENTINEL {
            return Some(self.end());
        }
        let next = self.slots[index].next;
        self.unlink(index);
        Some(self.id(next))
    }

    /// Unlinks `node` and returns its value. `None` for the sentinel and for
    /// foreign or stale handles.
    pub fn remove(&mut self, node: NodeId) -> Option<T> {
        match self.resolve(node)? {
            SENTINEL => None,
            index => self.unlink(index),
        }
    }

    /// Removes the first element. Does nothing on an empty list.
    pub fn erase_first(&mut self) -> Option<T> {
        match self.slots[SENTINEL].next {
            SENTINEL => None,
            index => self.unlink(index),
        }
    }

    /// Removes the last element. Does nothing on an empty list.
    pub fn erase_last(&mut self) -> Option<T> {
        match self.slots[SENTINEL].prev {
            SENTINEL => None,
            index => self.unlink(index),
        }
    }

    /// Relinks `node` at the front. The handle stays valid.
    ///
    /// Returns false if `node` is the sentinel or not a node of this list.
    pub fn move_to_front(&mut self, node: NodeId) -> bool {
        let index = match self.resolve(node) {
            Some(SENTINEL) | None => return false,
            Some(index) => index,
        };
        if self.slots[SENTINEL].next != index {
            self.detach(index);
            self.attach(index, SENTINEL);
        }
        true
    }

    /// Relinks `node` at the back. The handle stays valid.
    pub fn move_to_back(&mut self, node: NodeId) -> bool {
        let index = match self.resolve(node) {
            Some(SENTINEL) | None => return false,
            Some(index) => index,
        };
        if self.slots[SENTINEL].prev != index {
            self.detach(index);
            let prev = self.slots[SENTINEL].prev;
            self.attach(index, prev);
        }
        true
    }

    /// Removes every element.
    ///
    /// All previously issued handles, including the old [`end`](Self::end),
    /// stop naming nodes of this list.
    pub fn clear(&mut self) {
        self.slots.truncate(1);
        self.slots[SENTINEL].prev = SENTINEL;
        self.slots[SENTINEL].next = SENTINEL;
        self.free = NIL;
        self.len = 0;
        self.tag = next_tag();
    }

    /// Iterates over the elements from first to last.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            walk: self.walk(),
        }
    }

    /// Iterates over the handles of the elements from first to last.
    pub fn node_ids(&self) -> NodeIds<'_, T> {
        NodeIds {
            tag: self.tag,
            walk: self.walk(),
        }
    }

    fn walk(&self) -> Walk<'_, T> {
        Walk {
            slots: &self.slots,
            front: self.slots[SENTINEL].next,
            back: self.slots[SENTINEL].prev,
            remaining: self.len,
        }
    }
}

impl<T: PartialEq> SentinelList<T> {
    /// Returns the first node whose value equals `value`. O(n).
    pub fn find(&self, value: &T) -> Option<NodeId> {
        self.walk()
            .find(|&index| self.slots[index].val.as_ref() == Some(value))
            .map(|index| self.id(index))
    }
}

impl<T> Default for SentinelList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SentinelList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for SentinelList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_last(value);
        }
    }
}

impl<T> FromIterator<T> for SentinelList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SentinelList::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a SentinelList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Walks slot indices between the sentinel's neighbours.
struct Walk<'a, T> {
    slots: &'a [Slot<T>],
    front: usize,
    back: usize,
    remaining: usize,
}

impl<T> Iterator for Walk<'_, T> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front;
        self.front = self.slots[index].next;
        self.remaining -= 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Walk<'_, T> {
    fn next_back(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back;
        self.back = self.slots[index].prev;
        self.remaining -= 1;
        Some(index)
    }
}

/// Iterator over the elements of a [`SentinelList`], first to last.
pub struct Iter<'a, T> {
    walk: Walk<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let slots = self.walk.slots;
        self.walk.next().and_then(|index| slots[index].val.as_ref())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.walk.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        let slots = self.walk.slots;
        self.walk.next_back().and_then(|index| slots[index].val.as_ref())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.walk.remaining)
            .finish()
    }
}

/// Iterator over the handles of a [`SentinelList`], first to last.
pub struct NodeIds<'a, T> {
    tag: u32,
    walk: Walk<'a, T>,
}

impl<T> NodeIds<'_, T> {
    fn id(&self, index: usize) -> NodeId {
        NodeId {
            list: self.tag,
            index,
            generation: self.walk.slots[index].generation,
        }
    }
}

impl<T> Iterator for NodeIds<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let index = self.walk.next()?;
        Some(self.id(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.walk.size_hint()
    }
}

impl<T> DoubleEndedIterator for NodeIds<'_, T> {
    fn next_back(&mut self) -> Option<NodeId> {
        let index = self.walk.next_back()?;
        Some(self.id(index))
    }
}

impl<T> ExactSizeIterator for NodeIds<'_, T> {}
impl<T> FusedIterator for NodeIds<'_, T> {}

impl<T> fmt::Debug for NodeIds<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeIds")
            .field("list", &self.tag)
            .field("remaining", &self.walk.remaining)
            .finish()
    }
}
