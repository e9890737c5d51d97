//! no_std Tests
//!
//! Uses every public type from a `#![no_std]` crate, with only `alloc`.

#![no_std]
extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::num::NonZeroUsize;
use sentinel_cache::config::{LruCacheConfig, PageCacheConfig};
use sentinel_cache::{LruCache, PageCache, SentinelKeyValueList, SentinelList};

fn make_lru<K: core::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LruCache::init(config)
}

#[test]
fn test_list_in_no_std() {
    let mut list: SentinelList<String> = (0..3).map(|i| format!("node{i}")).collect();
    let last = list.last();
    list.insert_before(last, String::from("inserted")).unwrap();

    let names: Vec<&str> = list.iter().map(String::as_str).collect();
    assert_eq!(names, ["node0", "node1", "inserted", "node2"]);
    assert_eq!(list.erase_first().as_deref(), Some("node0"));
    assert_eq!(list.len(), 3);
}

#[test]
fn test_kv_list_in_no_std() {
    let mut list = SentinelKeyValueList::new();
    list.insert_last(String::from("key1"), 1);
    list.insert_last(String::from("key2"), 2);

    let node = list.find_key("key2").unwrap();
    assert!(list.move_to_front(node));
    assert_eq!(list.keys().map(String::as_str).collect::<Vec<_>>(), ["key2", "key1"]);
}

#[test]
fn test_lru_in_no_std() {
    let mut cache = make_lru(2);

    // Using String as it requires the alloc crate
    let key1 = String::from("key1");
    let key2 = String::from("key2");
    let key3 = String::from("key3");

    cache.put(key1.clone(), 1);
    cache.put(key2.clone(), 2);

    assert_eq!(*cache.get(&key1).unwrap(), 1);
    assert_eq!(*cache.get(&key2).unwrap(), 2);

    // This should evict key1
    assert_eq!(cache.put(key3.clone(), 3), Some((key1.clone(), 1)));

    assert!(cache.get(&key1).is_none());
    assert_eq!(*cache.get(&key2).unwrap(), 2);
    assert_eq!(*cache.get(&key3).unwrap(), 3);
}

#[test]
fn test_linear_scan_lru_in_no_std() {
    let mut cache = LruCache::linear_scan(NonZeroUsize::new(2).unwrap());
    cache.put(String::from("a"), 1);
    cache.put(String::from("b"), 2);
    cache.get("a");
    cache.put(String::from("c"), 3);
    assert!(!cache.contains("b"));
    assert_eq!(cache.peek("a"), Some(&1));
}

#[test]
fn test_page_cache_in_no_std() {
    let mut cache = PageCache::init(PageCacheConfig::try_from(2).unwrap());
    cache.reference(String::from("p1"));
    cache.reference(String::from("p2"));
    cache.reference(String::from("p1"));
    let evicted = cache.access(String::from("p3")).evicted();
    assert_eq!(evicted.as_deref(), Some("p2"));
}
