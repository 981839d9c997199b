//! Shared data generators and constants for the benchmarks
//!
//! Words are pseudo-random strings over a fixed alphabet of ASCII and
//! accented letters, with length `5 + 2 * round(g)` for a standard-normal
//! `g` (at least 1).
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

// CONSTANTS

/// Item counts used across benchmarks
pub const SIZES: &[usize] = &[1_000, 10_000, 100_000];

/// Hash slot counts for the membership filter
pub const HASH_COUNTS: &[usize] = &[1, 3, 5, 8];

/// Fixed seed so every run sees the same data
pub const SEED: u64 = 0x5EED;

const ALPHABET: &str = "abcdefghijklmnopqrstuvexyABCDEFGHIJKLMNOPQRSTUVWYXZzéèêàôû";

// DATA GENERATORS

/// Generate one pseudo-word
pub fn random_word<R: Rng + ?Sized>(rng: &mut R, alphabet: &[char]) -> String {
    let gauss: f64 = rng.sample(StandardNormal);
    let len = (5 + 2 * gauss.round() as i64).max(1) as usize;

    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

/// Generate `count` pseudo-words from a seeded generator
pub fn generate_words(count: usize, seed: u64) -> Vec<String> {
    let alphabet: Vec<char> = ALPHABET.chars().collect();
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| random_word(&mut rng, &alphabet)).collect()
}

/// Smallest `log2_bits` giving roughly ten bits per item
pub fn log2_bits_for(items: usize) -> u32 {
    (items * 10).next_power_of_two().trailing_zeros()
}
