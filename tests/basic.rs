//! Basic test - just to prove both structures work

use hashcraft::{DisplacementMap, MembershipFilter};

#[test]
fn test_filter_add_and_find() {
    let mut filter = MembershipFilter::new(10, 3).unwrap();

    filter.add("hello");

    assert!(
        filter.contains("hello"),
        "Should find the item we just added"
    );
    // "world" may be a false positive, but "hello" must stay present
    let _ = filter.contains("world");
    assert!(filter.contains("hello"));
}

#[test]
fn test_filter_rejects_bad_geometry() {
    assert!(MembershipFilter::new(0, 3).is_err());
    assert!(MembershipFilter::new(32, 3).is_err());
    assert!(MembershipFilter::new(10, 0).is_err());
    assert!(MembershipFilter::new(10, 9).is_err());
    assert!(MembershipFilter::new(1, 1).is_ok());
    assert!(MembershipFilter::new(31, 8).is_ok());
}

#[test]
fn test_map_put_and_get() {
    let mut map = DisplacementMap::new(5).unwrap();

    map.put("apple".to_string(), 1).unwrap();
    map.put("banana".to_string(), 2).unwrap();
    map.put("cherry".to_string(), 3).unwrap();

    assert_eq!(map.get("apple"), Some(&1));
    assert_eq!(map.get("banana"), Some(&2));
    assert_eq!(map.get("cherry"), Some(&3));
    assert_eq!(map.get("durian"), None);
    assert_eq!(map.len(), 3);
}

#[test]
fn test_map_value_addressed_remove() {
    let mut map = DisplacementMap::new(5).unwrap();
    map.put(10u32, "ten").unwrap();

    // Key matches, value does not: nothing happens
    assert!(!map.remove(&10, &"TEN"));
    assert_eq!(map.get(&10), Some(&"ten"));

    assert!(map.remove(&10, &"ten"));
    assert_eq!(map.get(&10), None);
    assert!(map.is_empty());
}

#[test]
fn test_map_clear() {
    let mut map = DisplacementMap::new(5).unwrap();
    for i in 0..10u32 {
        map.put(i, i * i).unwrap();
    }

    map.clear();

    assert_eq!(map.len(), 0);
    assert_eq!(map.keys().count(), 0);
    assert_eq!(map.values().count(), 0);
}
