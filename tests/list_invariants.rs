//! Link Invariant Tests for the Sentinel Lists
//!
//! Drives the lists through long, formula-generated operation sequences and
//! checks after every step that the cycle through the sentinel is intact:
//! walking `next` from `first()` exactly `len()` times lands on `end()`, and
//! so does walking `prev` from `last()`.

use sentinel_cache::{NodeId, SentinelKeyValueList, SentinelList};
use std::collections::VecDeque;

// ============================================================================
// HELPERS
// ============================================================================

fn assert_cycle<T>(list: &SentinelList<T>) {
    let mut node = list.first();
    for _ in 0..list.len() {
        assert!(!node.is_sentinel(), "Reached the sentinel too early");
        node = list.next(node).unwrap();
    }
    assert_eq!(node, list.end(), "Forward walk should end on the sentinel");

    let mut node = list.last();
    for _ in 0..list.len() {
        assert!(!node.is_sentinel(), "Reached the sentinel too early");
        node = list.prev(node).unwrap();
    }
    assert_eq!(node, list.end(), "Backward walk should end on the sentinel");

    assert_eq!(list.is_empty(), list.first() == list.end());
    assert_eq!(list.iter().count(), list.len());
    assert_eq!(list.iter().rev().count(), list.len());
}

/// Applies the same operation to the list and to a `VecDeque` model.
fn step(list: &mut SentinelList<u32>, model: &mut VecDeque<u32>, ids: &mut Vec<NodeId>, i: u32) {
    match i % 7 {
        0 => {
            ids.push(list.insert_first(i));
            model.push_front(i);
        }
        1 | 2 => {
            ids.push(list.insert_last(i));
            model.push_back(i);
        }
        3 => assert_eq!(list.erase_first(), model.pop_front()),
        4 => assert_eq!(list.erase_last(), model.pop_back()),
        5 => {
            // Insert after a positional node, or after the sentinel when empty
            let pos = (i as usize * 31) % (model.len() + 1);
            let anchor = if pos == model.len() {
                list.end()
            } else {
                list.nth(pos).unwrap()
            };
            ids.push(list.insert_after(anchor, i).unwrap());
            if pos == model.len() {
                model.push_front(i);
            } else {
                model.insert(pos + 1, i);
            }
        }
        _ => {
            if !model.is_empty() {
                let pos = (i as usize * 17) % model.len();
                let node = list.nth(pos).unwrap();
                let value = *list.get(node).unwrap();
                assert!(list.move_to_front(node));
                model.remove(pos);
                model.push_front(value);
            }
        }
    }
}

// ============================================================================
// SENTINEL LIST
// ============================================================================

#[test]
fn test_cycle_survives_mixed_operations() {
    let mut list = SentinelList::new();
    let mut model = VecDeque::new();
    let mut ids = Vec::new();

    for i in 0..500 {
        step(&mut list, &mut model, &mut ids, i);
        assert_cycle(&list);
        assert_eq!(list.len(), model.len());
        assert!(list.iter().eq(model.iter()), "List diverged at step {}", i);
    }
}

#[test]
fn test_stale_handles_never_mutate() {
    let mut list = SentinelList::new();
    let mut model = VecDeque::new();
    let mut ids = Vec::new();

    for i in 0..300 {
        step(&mut list, &mut model, &mut ids, i);
    }

    // Most handles have been erased by now; the rest must still resolve
    for id in ids {
        let before: Vec<u32> = list.iter().copied().collect();
        if list.get(id).is_none() {
            assert_eq!(list.erase(id), None);
            assert_eq!(list.insert_after(id, 9999), None);
            assert!(!list.move_to_back(id));
            assert_eq!(list.iter().copied().collect::<Vec<_>>(), before);
        }
    }
    assert_cycle(&list);
}

#[test]
fn test_erase_walk_empties_list() {
    let mut list: SentinelList<u32> = (0..50).collect();
    let mut node = list.first();
    let mut erased = 0;
    while node != list.end() {
        node = list.erase(node).unwrap();
        erased += 1;
        assert_cycle(&list);
    }
    assert_eq!(erased, 50);
    assert!(list.is_empty());
}

#[test]
fn test_clear_then_reuse() {
    let mut list: SentinelList<u32> = (0..10).collect();
    let old_end = list.end();
    list.clear();
    assert_cycle(&list);
    assert_eq!(list.insert_after(old_end, 1), None);

    list.extend(0..5);
    assert_cycle(&list);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
}

// ============================================================================
// KEY-VALUE LIST
// ============================================================================

#[test]
fn test_kv_list_find_after_reordering() {
    let mut list: SentinelKeyValueList<u32, u32> = (0..20).map(|k| (k, k * 100)).collect();

    for k in (0..20).step_by(3) {
        let node = list.find_key(&k).unwrap();
        let (key, value) = list.remove(node).unwrap();
        list.insert_first(key, value);
    }

    for k in 0..20 {
        let node = list.find_key(&k).unwrap();
        assert_eq!(list.value(node), Some(&(k * 100)));
    }
    assert_eq!(list.find_key(&20), None);
    assert_eq!(list.len(), 20);
    assert_eq!(list.keys().take(2).copied().collect::<Vec<_>>(), vec![18, 15]);
}
