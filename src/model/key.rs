// Package model provides opaque subject keys and slot hashing.

use std::hash::{Hash, Hasher};

use xxhash_rust::xxh3::Xxh3;

/// Opaque subject key. The controller never inspects a key beyond hashing
/// and equality, so any fixed-width identifier qualifies: a 64-bit entity
/// id, a packed spatial coordinate, a tuple of integers.
pub trait TickKey: Hash + Eq + Copy + Send {}

impl<T: Hash + Eq + Copy + Send> TickKey for T {}

/// Hashes a key into a 64-bit slot seed using xxh3.
#[inline]
pub fn key_hash<K: TickKey>(key: &K) -> u64 {
    let mut hasher = Xxh3::new();
    key.hash(&mut hasher);
    hasher.finish()
}
