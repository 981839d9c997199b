//! Parameter bounds and sizing formulas for the membership filter.
//!
//! The filter's bit count is always a power of two, `m = 2^log2_bits`, so a
//! 64-bit digest maps to a bit index with a single mask. The classic formulas
//! from Bloom's 1970 analysis still apply:
//!
//! - `m = -n × ln(ε) / (ln 2)²` (bits in filter)
//! - `k = (m/n) × ln 2` (number of hash functions)
//! - `p = (1 - e^(-kn/m))^k` (expected false positive rate)
//!
//! [`optimal_log2_bits`] rounds `m` up to the next power of two and
//! [`optimal_hash_count`] clamps `k` to the scramble table's
//! [`MAX_HASHES`] slots.
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/Time Trade-offs in Hash Coding with Allowable Errors"

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use crate::error::{HashCraftError, Result};
use std::f64::consts::LN_2;

/// (ln 2)², used by the optimal bit count formula.
const LN2_SQUARED: f64 = LN_2 * LN_2;

/// Smallest accepted `log2_bits` (a 2-bit filter).
pub const MIN_LOG2_BITS: u32 = 1;

/// Largest accepted `log2_bits`; bit indices must fit a non-negative `i32`.
pub const MAX_LOG2_BITS: u32 = 31;

/// Minimum number of hash slots.
pub const MIN_HASHES: usize = 1;

/// Maximum number of hash slots, one scramble table segment each.
pub const MAX_HASHES: usize = 8;

/// Check a filter geometry before any allocation happens.
///
/// # Errors
///
/// - [`HashCraftError::InvalidBitCount`] if `log2_bits` is outside
///   [`MIN_LOG2_BITS`]..=[`MAX_LOG2_BITS`]
/// - [`HashCraftError::InvalidHashCount`] if `hash_count` is outside
///   [`MIN_HASHES`]..=[`MAX_HASHES`]
///
/// # Examples
///
/// ```
/// use hashcraft::core::params::validate_geometry;
///
/// assert!(validate_geometry(10, 3).is_ok());
/// assert!(validate_geometry(0, 3).is_err());
/// assert!(validate_geometry(10, 9).is_err());
/// ```
pub fn validate_geometry(log2_bits: u32, hash_count: usize) -> Result<()> {
    if !(MIN_LOG2_BITS..=MAX_LOG2_BITS).contains(&log2_bits) {
        return Err(HashCraftError::invalid_bit_count(
            log2_bits,
            MIN_LOG2_BITS,
            MAX_LOG2_BITS,
        ));
    }

    if !(MIN_HASHES..=MAX_HASHES).contains(&hash_count) {
        return Err(HashCraftError::invalid_hash_count(
            hash_count, MIN_HASHES, MAX_HASHES,
        ));
    }

    Ok(())
}

/// Calculate the optimal number of bits for `n` items at rate `fp_rate`.
///
/// Implements `m = -n × ln(ε) / (ln 2)²`, rounded up.
///
/// # Errors
///
/// - [`HashCraftError::InvalidItemCount`] if `n == 0`
/// - [`HashCraftError::FalsePositiveRateOutOfBounds`] if `fp_rate` not in (0, 1)
///
/// # Examples
///
/// ```
/// use hashcraft::core::params::optimal_bit_count;
///
/// let bits = optimal_bit_count(1000, 0.01).unwrap();
/// assert!(bits >= 9585 && bits <= 9586);
/// ```
pub fn optimal_bit_count(n: usize, fp_rate: f64) -> Result<usize> {
    if n == 0 {
        return Err(HashCraftError::invalid_item_count(n));
    }

    if fp_rate <= 0.0 || fp_rate >= 1.0 || fp_rate.is_nan() {
        return Err(HashCraftError::fp_rate_out_of_bounds(fp_rate));
    }

    let m = -(n as f64) * fp_rate.ln() / LN2_SQUARED;

    if m > usize::MAX as f64 {
        return Err(HashCraftError::invalid_parameters(format!(
            "calculated filter size {:.0} exceeds usize::MAX",
            m
        )));
    }

    Ok((m.ceil() as usize).max(2))
}

/// Smallest `log2_bits` whose filter holds `n` items at rate `fp_rate`.
///
/// # Errors
///
/// Propagates [`optimal_bit_count`] errors, and returns
/// [`HashCraftError::InvalidBitCount`] when the required size exceeds
/// `2^31` bits.
///
/// # Examples
///
/// ```
/// use hashcraft::core::params::optimal_log2_bits;
///
/// // ≈9586 bits round up to 2^14
/// assert_eq!(optimal_log2_bits(1000, 0.01).unwrap(), 14);
/// ```
pub fn optimal_log2_bits(n: usize, fp_rate: f64) -> Result<u32> {
    let m = optimal_bit_count(n, fp_rate)?;

    let log2_bits = match m.checked_next_power_of_two() {
        Some(pow) => pow.trailing_zeros(),
        None => usize::BITS,
    };

    if log2_bits > MAX_LOG2_BITS {
        return Err(HashCraftError::invalid_bit_count(
            log2_bits,
            MIN_LOG2_BITS,
            MAX_LOG2_BITS,
        ));
    }

    Ok(log2_bits.max(MIN_LOG2_BITS))
}

/// Optimal number of hash slots, `k = (m/n) × ln 2`, clamped to
/// [[`MIN_HASHES`], [`MAX_HASHES`]].
///
/// # Errors
///
/// - [`HashCraftError::InvalidParameters`] if `m == 0`
/// - [`HashCraftError::InvalidItemCount`] if `n == 0`
///
/// # Examples
///
/// ```
/// use hashcraft::core::params::optimal_hash_count;
///
/// assert_eq!(optimal_hash_count(9585, 1000).unwrap(), 7);
/// // Large filters are capped at the table's slot count
/// assert_eq!(optimal_hash_count(1 << 20, 1000).unwrap(), 8);
/// ```
pub fn optimal_hash_count(m: usize, n: usize) -> Result<usize> {
    if m == 0 {
        return Err(HashCraftError::invalid_parameters("filter size must be positive"));
    }

    if n == 0 {
        return Err(HashCraftError::invalid_item_count(n));
    }

    let k = (m as f64 / n as f64) * LN_2;

    Ok((k.round() as usize).clamp(MIN_HASHES, MAX_HASHES))
}

/// Expected false positive rate after inserting `n` items into `m` bits
/// with `k` hash slots: `p = (1 - e^(-kn/m))^k`.
///
/// # Errors
///
/// - [`HashCraftError::InvalidParameters`] if `m == 0`
/// - [`HashCraftError::InvalidHashCount`] if `k` is outside the slot range
///
/// # Examples
///
/// ```
/// use hashcraft::core::params::expected_fp_rate;
///
/// let fp = expected_fp_rate(9585, 1000, 7).unwrap();
/// assert!((fp - 0.01).abs() < 0.001);
/// ```
pub fn expected_fp_rate(m: usize, n: usize, k: usize) -> Result<f64> {
    if m == 0 {
        return Err(HashCraftError::invalid_parameters("filter size must be positive"));
    }

    if !(MIN_HASHES..=MAX_HASHES).contains(&k) {
        return Err(HashCraftError::invalid_hash_count(k, MIN_HASHES, MAX_HASHES));
    }

    if n == 0 {
        return Ok(0.0);
    }

    let k_f64 = k as f64;
    let prob_bit_one = 1.0 - (-(k_f64 * n as f64) / m as f64).exp();

    Ok(prob_bit_one.powf(k_f64).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_geometry_bounds() {
        assert!(validate_geometry(1, 1).is_ok());
        assert!(validate_geometry(31, 8).is_ok());

        assert_eq!(
            validate_geometry(32, 3),
            Err(HashCraftError::invalid_bit_count(32, 1, 31))
        );
        assert_eq!(
            validate_geometry(0, 3),
            Err(HashCraftError::invalid_bit_count(0, 1, 31))
        );
        assert_eq!(
            validate_geometry(10, 0),
            Err(HashCraftError::invalid_hash_count(0, 1, 8))
        );
    }

    #[test]
    fn test_optimal_bit_count_errors() {
        assert!(matches!(
            optimal_bit_count(0, 0.01),
            Err(HashCraftError::InvalidItemCount { count: 0 })
        ));
        assert!(optimal_bit_count(100, 0.0).is_err());
        assert!(optimal_bit_count(100, 1.0).is_err());
        assert!(optimal_bit_count(100, f64::NAN).is_err());
    }

    #[test]
    fn test_optimal_log2_bits_rounds_up() {
        assert_eq!(optimal_log2_bits(1000, 0.01).unwrap(), 14);
        assert_eq!(optimal_log2_bits(1, 0.5).unwrap(), 1);
    }

    #[test]
    fn test_optimal_log2_bits_too_large() {
        assert!(matches!(
            optimal_log2_bits(1_000_000_000, 0.000_001),
            Err(HashCraftError::InvalidBitCount { .. })
        ));
    }

    #[test]
    fn test_optimal_hash_count_clamped() {
        assert_eq!(optimal_hash_count(10, 1000).unwrap(), MIN_HASHES);
        assert_eq!(optimal_hash_count(1 << 24, 10).unwrap(), MAX_HASHES);
    }

    #[test]
    fn test_expected_fp_rate_monotonic_in_items() {
        let low = expected_fp_rate(1 << 14, 500, 4).unwrap();
        let high = expected_fp_rate(1 << 14, 5000, 4).unwrap();
        assert!(low < high);
        assert_eq!(expected_fp_rate(1 << 14, 0, 4).unwrap(), 0.0);
    }
}
