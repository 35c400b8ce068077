//! Monotonic time source

/// Milliseconds on a monotonic timeline
///
/// 64 bits so that uptime never wraps in practice.
pub type TimeMs = u64;

/// Monotonic clock
///
/// Readings must never decrease. The origin is arbitrary (usually boot).
pub trait Clock {
    /// Current time in milliseconds
    fn now_ms(&self) -> TimeMs;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> TimeMs {
        (**self).now_ms()
    }
}
