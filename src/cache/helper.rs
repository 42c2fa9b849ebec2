// Package cache provides test-support helpers for key fabrication.

/// Produces well-diffused pseudo-independent values from a single 64-bit
/// seed. This is the SplitMix64 mixing function (public-domain; Steele et
/// al.); used by tests to fabricate adversarial key sets.
pub fn mix64(x: u64) -> u64 {
    const SPLITMIX64_INCREMENT: u64 = 0x9E3779B97F4A7C15;
    const SPLITMIX64_MUL1: u64 = 0xBF58476D1CE4E5B9;
    const SPLITMIX64_MUL2: u64 = 0x94D049BB133111EB;

    let mut x = x.wrapping_add(SPLITMIX64_INCREMENT);
    x = (x ^ (x >> 30)).wrapping_mul(SPLITMIX64_MUL1);
    x = (x ^ (x >> 27)).wrapping_mul(SPLITMIX64_MUL2);
    x ^ (x >> 31)
}
