//! Non-blocking periodic checks against a monotonic clock.
use embassy_time::{Duration, Instant};

/// Fires at most once per `period`.
///
/// Each interval is polled independently with the current time. When it fires it re-arms from the
/// time it was polled at, so `period` is a minimum spacing between firings, not a fixed grid.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interval {
    period: Duration,
    last: Instant,
}

impl Interval {
    /// Start an interval; the first firing is one `period` after `start`.
    pub fn new(period: Duration, start: Instant) -> Self {
        Self {
            period,
            last: start,
        }
    }

    /// Returns `true` if at least one period has elapsed since the last firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        // A clock reading from before `last` never fires.
        let Some(elapsed) = now.checked_duration_since(self.last) else {
            return false;
        };
        if elapsed >= self.period {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// Earliest instant the next poll can fire at.
    pub fn deadline(&self) -> Instant {
        self.last + self.period
    }
}
