//! Membership filter integration tests over generated words.

mod common;

use common::{distinct_words, random_words};
use hashcraft::{HashCraftError, MembershipFilter, MembershipFilterBuilder, ScrambleTable};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

#[test]
fn test_no_false_negatives_on_generated_words() {
    let mut filter = MembershipFilter::new(16, 4).unwrap();
    let words = random_words(10_000, 1);

    for word in &words {
        filter.add(word);
    }

    for word in &words {
        assert!(filter.contains(word), "false negative for {:?}", word);
    }
}

#[test]
fn test_membership_survives_later_adds() {
    let mut filter = MembershipFilter::new(8, 3).unwrap();
    filter.add("first");

    // Saturate a small filter; "first" must never disappear
    for word in random_words(2_000, 2) {
        filter.add(&word);
        assert!(filter.contains("first"));
    }
}

#[test]
fn test_false_positive_rate_near_estimate() {
    let inserted = distinct_words(1_000, 3, &HashSet::new());
    let inserted_set: HashSet<String> = inserted.iter().cloned().collect();
    let probes = distinct_words(10_000, 4, &inserted_set);

    let mut filter = MembershipFilterBuilder::new()
        .expected_items(1_000)
        .false_positive_rate(0.01)
        .build()
        .unwrap();
    filter.add_all(inserted.iter().map(String::as_str));

    let false_positives = probes.iter().filter(|w| filter.contains(w)).count();
    let observed = false_positives as f64 / probes.len() as f64;

    assert!(observed < 0.02, "observed FPR {} too high", observed);
    assert!(filter.estimate_fpr() < 0.01);
}

#[test]
fn test_digests_identical_across_instances() {
    let words = random_words(500, 5);

    let mut a = MembershipFilter::new(12, 5).unwrap();
    let mut b = MembershipFilter::new(12, 5).unwrap();
    a.add_all(words.iter().map(String::as_str));
    for word in words.iter().rev() {
        b.add(word);
    }

    assert_eq!(a.count_set_bits(), b.count_set_bits());
    for word in &words {
        assert!(b.contains(word));
    }
}

#[test]
fn test_accented_and_plain_letters_differ() {
    let table = ScrambleTable::global();
    for slot in 0..8 {
        assert_ne!(table.digest("é", slot), table.digest("e", slot));
        assert_ne!(table.digest("àô", slot), table.digest("ôà", slot));
    }

    let mut filter = MembershipFilter::new(20, 8).unwrap();
    filter.add("café");
    assert!(filter.contains("café"));
    assert!(!filter.contains("cafe"));
}

#[test]
fn test_empty_string_is_a_member_like_any_other() {
    let mut filter = MembershipFilter::new(10, 3).unwrap();
    assert!(!filter.contains(""));

    filter.add("");
    assert!(filter.contains(""));
    assert!(filter.count_set_bits() >= 1);
}

#[test]
fn test_union_of_disjoint_sets() {
    let left = random_words(300, 6);
    let right = random_words(300, 7);

    let mut a = MembershipFilter::new(14, 6).unwrap();
    let mut b = MembershipFilter::new(14, 6).unwrap();
    a.add_all(left.iter().map(String::as_str));
    b.add_all(right.iter().map(String::as_str));

    a.union_with(&b).unwrap();
    for word in left.iter().chain(&right) {
        assert!(a.contains(word));
    }
}

#[test]
fn test_union_rejects_mismatched_geometry() {
    let mut a = MembershipFilter::new(10, 3).unwrap();
    let b = MembershipFilter::new(11, 3).unwrap();
    let c = MembershipFilter::new(10, 4).unwrap();

    assert!(matches!(
        a.union_with(&b),
        Err(HashCraftError::IncompatibleFilters { .. })
    ));
    assert!(matches!(
        a.union_with(&c),
        Err(HashCraftError::IncompatibleFilters { .. })
    ));
}

#[test]
fn test_fill_rate_grows_monotonically() {
    let mut filter = MembershipFilter::new(12, 3).unwrap();
    let mut last = filter.fill_rate();

    for word in random_words(1_000, 8) {
        filter.add(&word);
        let now = filter.fill_rate();
        assert!(now >= last);
        last = now;
    }

    assert!(last > 0.0 && last <= 1.0);
}

#[test]
fn test_shared_table_across_threads() {
    let words = Arc::new(random_words(200, 9));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let words = Arc::clone(&words);
            thread::spawn(move || {
                let mut filter = MembershipFilter::new(12, 4).unwrap();
                filter.add_all(words.iter().map(String::as_str));
                (
                    ScrambleTable::global() as *const ScrambleTable as usize,
                    filter.count_set_bits(),
                )
            })
        })
        .collect();

    let results: Vec<(usize, usize)> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_filter_readable_from_many_threads() {
    let mut filter = MembershipFilter::new(14, 5).unwrap();
    let words = random_words(500, 10);
    filter.add_all(words.iter().map(String::as_str));

    let filter = Arc::new(filter);
    let words = Arc::new(words);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let filter = Arc::clone(&filter);
            let words = Arc::clone(&words);
            thread::spawn(move || words.iter().all(|w| filter.contains(w)))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
