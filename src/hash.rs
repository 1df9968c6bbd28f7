//! Key hashing and bucket selection.

/// Folds a 64-bit key into a 32-bit hash by XOR-ing its high and low halves.
///
/// This is the usual hash-code contract for 64-bit integers, so keys that only
/// differ in their upper half still land in different buckets.
#[inline]
pub fn hash_key(key: i64) -> i32 {
    let bits = key as u64;
    (bits ^ (bits >> 32)) as i32
}

/// Maps a hash onto `0..capacity`.
///
/// The hash is reinterpreted as an unsigned 32-bit number first, so negative
/// hashes never produce a negative index.
#[inline]
pub fn bucket_index(hash: i32, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "Bucket array can't be empty");
    (hash as u32 as usize) % capacity
}
