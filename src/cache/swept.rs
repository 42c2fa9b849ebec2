// Swept backend: unbounded associative store with periodic bulk expiry.

use std::collections::HashMap;

use crate::model::{tick_age, TickId, TickKey};

use super::CooldownCache;

/// Maps each key to the tick of its last admission. Memory grows with the
/// number of distinct live keys, so the owner must keep `sweep` on a
/// cadence that matches key churn.
pub struct SweptCache<K: TickKey> {
    entries: HashMap<K, TickId>,
}

impl<K: TickKey> SweptCache<K> {
    /// Creates the map with an initial reservation so early churn does not
    /// rehash mid-frame.
    pub fn new(initial_reserve: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(initial_reserve),
        }
    }
}

impl<K: TickKey> CooldownCache<K> for SweptCache<K> {
    fn admit(&mut self, key: K, current_tick: TickId, cooldown_ticks: u64) -> bool {
        match self.entries.get_mut(&key) {
            Some(last) => match tick_age(current_tick, *last) {
                Some(age) if age >= cooldown_ticks => {
                    *last = current_tick;
                    true
                }
                // Within cooldown, or the tick source rolled back.
                _ => false,
            },
            None => {
                self.entries.insert(key, current_tick);
                true
            }
        }
    }

    fn remove(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    fn sweep(&mut self, current_tick: TickId, max_age: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, last| {
            match tick_age(current_tick, *last) {
                Some(age) => age <= max_age,
                // Entry stamped ahead of the current tick: keep it, a
                // rewound tick source must not flush the cache.
                None => true,
            }
        });
        before - self.entries.len()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
