//! djb2: the fixed string hash used for bucket selection.
//!
//! The accumulator is a wrapping `u64`; doubling resize relies on the
//! index being reproducible for a given key and capacity.

const SEED: u64 = 5381;

/// Raw djb2 accumulator over `bytes`.
#[inline]
pub fn djb2(bytes: &[u8]) -> u64 {
    bytes.iter().fold(SEED, |acc, &c| {
        (acc << 5).wrapping_add(acc).wrapping_add(u64::from(c))
    })
}

/// Bucket index for `key` in a table of `max` buckets. `max` must be non-zero.
#[inline]
pub fn bucket_index(key: &str, max: usize) -> usize {
    debug_assert!(max > 0, "bucket_index called with zero buckets");
    (djb2(key.as_bytes()) % max as u64) as usize
}
