// Package model provides tick arithmetic for admission decisions.

/// Monotonically non-decreasing frame counter supplied by the host.
pub type TickId = u64;

/// Returns the number of ticks elapsed since `last`, or `None` when the
/// tick source was reset or rolled back (`last` ahead of `current`).
///
/// Callers must treat `None` as "not expired" so a rewound tick source can
/// never underflow into a huge age and flush every cooldown at once.
#[inline]
pub fn tick_age(current: TickId, last: TickId) -> Option<u64> {
    current.checked_sub(last)
}
