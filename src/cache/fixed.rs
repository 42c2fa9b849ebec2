//! Fixed backend: bounded open-addressing slot array with inline eviction.
//

use crate::config::{MAX_FIXED_CAPACITY_POWER, MIN_FIXED_CAPACITY_POWER};
use crate::model::{key_hash, tick_age, TickId, TickKey};

use super::CooldownCache;

/// Linear probe chain length. Four candidate slots keep the worst-case
/// admit cost a handful of comparisons regardless of table pressure.
const PROBE_LIMIT: u64 = 4;

#[derive(Clone, Copy)]
struct Slot<K> {
    key: K,
    last_tick: TickId,
}

/// Power-of-two slot array probed linearly from `hash & mask`.
///
/// Slots are never individually freed, only overwritten, so the backend
/// allocates exactly once at construction and never exceeds
/// `capacity * slot_size` bytes. When all probed slots hold unrelated keys
/// still inside their cooldown, the first probed slot is forcibly
/// overwritten and the invocation permitted: a false admission under heavy
/// hash collision is the price of strictly bounded cost, and the displaced
/// key simply re-enters on its next invocation.
pub struct FixedCache<K: TickKey> {
    slots: Vec<Option<Slot<K>>>,
    mask: u64,
    occupied: usize,
}

impl<K: TickKey> FixedCache<K> {
    /// Allocates `2^power` slots. The power is clamped to the supported
    /// range here as well as at config load, so a hand-constructed value
    /// cannot produce a degenerate table.
    pub fn new(power: u32) -> Self {
        let power = power.clamp(MIN_FIXED_CAPACITY_POWER, MAX_FIXED_CAPACITY_POWER);
        let capacity = 1usize << power;
        Self {
            slots: vec![None; capacity],
            mask: (capacity - 1) as u64,
            occupied: 0,
        }
    }

    /// Total slot count (fixed for the lifetime of the cache).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn probe_index(&self, base: u64, i: u64) -> usize {
        ((base + i) & self.mask) as usize
    }
}

impl<K: TickKey> CooldownCache<K> for FixedCache<K> {
    fn admit(&mut self, key: K, current_tick: TickId, cooldown_ticks: u64) -> bool {
        let base = key_hash(&key) & self.mask;

        for i in 0..PROBE_LIMIT {
            let idx = self.probe_index(base, i);
            match &mut self.slots[idx] {
                Some(slot) if slot.key == key => {
                    return match tick_age(current_tick, slot.last_tick) {
                        Some(age) if age >= cooldown_ticks => {
                            slot.last_tick = current_tick;
                            true
                        }
                        // Within cooldown, or the tick source rolled back.
                        _ => false,
                    };
                }
                Some(slot) => {
                    // A stranger whose cooldown has lapsed is as good as
                    // an empty slot.
                    if matches!(
                        tick_age(current_tick, slot.last_tick),
                        Some(age) if age > cooldown_ticks
                    ) {
                        *slot = Slot {
                            key,
                            last_tick: current_tick,
                        };
                        return true;
                    }
                }
                empty @ None => {
                    *empty = Some(Slot {
                        key,
                        last_tick: current_tick,
                    });
                    self.occupied += 1;
                    return true;
                }
            }
        }

        // Every probed slot is hot with someone else's key: overwrite the
        // first one (approximate-LRU degradation) and permit.
        self.slots[base as usize] = Some(Slot {
            key,
            last_tick: current_tick,
        });
        true
    }

    fn remove(&mut self, key: &K) -> bool {
        let base = key_hash(key) & self.mask;
        for i in 0..PROBE_LIMIT {
            let idx = self.probe_index(base, i);
            if matches!(&self.slots[idx], Some(slot) if slot.key == *key) {
                self.slots[idx] = None;
                self.occupied -= 1;
                return true;
            }
        }
        false
    }

    fn sweep(&mut self, _current_tick: TickId, _max_age: u64) -> usize {
        // Eviction happens inline during probing; there is nothing to scan.
        0
    }

    fn len(&self) -> usize {
        self.occupied
    }
}
