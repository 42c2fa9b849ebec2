// Tests for the swept cooldown cache backend.

#[cfg(test)]
mod tests {
    use crate::cache::{CooldownCache, SweptCache};

    #[test]
    fn test_cooldown_scenario() {
        // cooldown=10: admit at 0, deny at 5, admit again at 10.
        let mut c = SweptCache::new(16);
        assert!(c.admit(7u64, 0, 10));
        assert!(!c.admit(7u64, 5, 10));
        assert!(c.admit(7u64, 10, 10));
    }

    #[test]
    fn test_min_gap_between_admissions() {
        // For any admission sequence the gap between two permits is >= C.
        const COOLDOWN: u64 = 7;
        let mut c = SweptCache::new(16);
        let mut last_admitted: Option<u64> = None;
        for tick in 0..100u64 {
            if c.admit(42u64, tick, COOLDOWN) {
                if let Some(prev) = last_admitted {
                    assert!(
                        tick - prev >= COOLDOWN,
                        "admitted at {} only {} ticks after {}",
                        tick,
                        tick - prev,
                        prev
                    );
                }
                last_admitted = Some(tick);
            }
        }
        assert!(last_admitted.is_some());
    }

    #[test]
    fn test_denial_does_not_refresh_timestamp() {
        let mut c = SweptCache::new(16);
        assert!(c.admit(1u64, 0, 10));
        // Repeated denied probes must not push the window forward.
        for tick in 1..10 {
            assert!(!c.admit(1u64, tick, 10));
        }
        assert!(c.admit(1u64, 10, 10));
    }

    #[test]
    fn test_remove_is_idempotent_and_resets_cooldown() {
        let mut c = SweptCache::new(16);
        assert!(c.admit(5u64, 0, 100));
        assert!(c.remove(&5u64));
        assert!(!c.remove(&5u64));
        // After removal the key behaves as first-ever admission.
        assert!(c.admit(5u64, 1, 100));
    }

    #[test]
    fn test_sweep_removes_only_expired_entries() {
        let mut c = SweptCache::new(16);
        for key in 0u64..10 {
            assert!(c.admit(key, key, 1));
        }
        assert_eq!(c.len(), 10);

        // At tick 20 with max_age=12, keys stamped 0..=7 are too old.
        let removed = c.sweep(20, 12);
        assert_eq!(removed, 8);
        assert_eq!(c.len(), 2);

        // Survivors are still subject to their cooldown.
        assert!(!c.admit(9u64, 9, 5));
    }

    #[test]
    fn test_rolled_back_tick_is_not_expired() {
        let mut c = SweptCache::new(16);
        assert!(c.admit(3u64, 100, 10));

        // The tick source rewound: age must not underflow into "expired".
        assert!(!c.admit(3u64, 50, 10));
        assert_eq!(c.sweep(50, 10), 0);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_distinct_keys_are_independent() {
        let mut c = SweptCache::new(16);
        assert!(c.admit(1u64, 0, 10));
        assert!(c.admit(2u64, 0, 10));
        assert!(!c.admit(1u64, 5, 10));
        assert!(c.admit(3u64, 5, 10));
        assert_eq!(c.len(), 3);
    }
}
