//! Key and tick plumbing shared by the admission path.

pub mod key;
pub mod tick;

#[cfg(test)]
mod tick_test;

// Re-export main types
pub use key::{key_hash, TickKey};
pub use tick::{tick_age, TickId};
