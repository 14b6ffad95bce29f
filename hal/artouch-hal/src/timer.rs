//! Countdown timer abstraction
//!
//! Both blocking points in the driver (the post-command wait for SIQ and
//! the calibration acknowledgement waits) are plain busy-polling loops
//! bounded by a countdown. The board supplies a free-running timer that
//! can be armed with a duration and queried for expiry, which keeps the
//! protocol engine testable with a fake clock.

/// One-shot countdown timer
pub trait CountdownTimer {
    /// Arm the timer to expire after `duration_ms` milliseconds
    ///
    /// Re-arming an already running timer restarts it.
    fn arm(&mut self, duration_ms: u32);

    /// Check whether the armed duration has elapsed
    fn is_expired(&self) -> bool;
}

impl<T: CountdownTimer + ?Sized> CountdownTimer for &mut T {
    fn arm(&mut self, duration_ms: u32) {
        T::arm(self, duration_ms)
    }

    fn is_expired(&self) -> bool {
        T::is_expired(self)
    }
}
