//! Shared test data: pseudo-words over a fixed alphabet.
//!
//! Word length is `5 + 2 * round(g)` for a standard-normal `g`, clamped to
//! at least one character. The alphabet mixes ASCII with accented letters so
//! both bytes of a UTF-16 code unit get exercised.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::collections::HashSet;

/// Characters words are drawn from.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvexyABCDEFGHIJKLMNOPQRSTUVWYXZzéèêàôû";

/// Deterministic generator for reproducible tests.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// One pseudo-word.
pub fn random_word<R: Rng + ?Sized>(rng: &mut R) -> String {
    let alphabet: Vec<char> = ALPHABET.chars().collect();
    let gauss: f64 = rng.sample(StandardNormal);
    let len = (5 + 2 * gauss.round() as i64).max(1) as usize;

    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

/// `count` pseudo-words, duplicates allowed.
pub fn random_words(count: usize, seed: u64) -> Vec<String> {
    let mut rng = rng(seed);
    (0..count).map(|_| random_word(&mut rng)).collect()
}

/// `count` pairwise distinct pseudo-words, none of them in `exclude`.
pub fn distinct_words(count: usize, seed: u64, exclude: &HashSet<String>) -> Vec<String> {
    let mut rng = rng(seed);
    let mut seen = HashSet::with_capacity(count);
    let mut words = Vec::with_capacity(count);

    while words.len() < count {
        let word = random_word(&mut rng);
        if !exclude.contains(&word) && seen.insert(word.clone()) {
            words.push(word);
        }
    }

    words
}
