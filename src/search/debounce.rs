//! Trailing-edge debounce control
//!
//! Collapses a rapid burst of state changes into a single action after a
//! quiet interval: only the last payload scheduled within `delay` of
//! silence is ever published. The clock is passed in explicitly so callers
//! and tests drive time themselves instead of racing real timers.

use std::time::{Duration, Instant};

/// Timer-coalescing publisher holding at most one pending payload
#[derive(Debug)]
pub struct DebouncedPublisher<T> {
    delay: Duration,
    pending: Option<T>,
    armed_at: Option<Instant>,
}

impl<T> DebouncedPublisher<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            armed_at: None,
        }
    }

    /// Replace any pending payload and restart the quiet interval.
    pub fn schedule(&mut self, payload: T, now: Instant) {
        self.pending = Some(payload);
        self.armed_at = Some(now);
    }

    /// Drop the pending payload without publishing it.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.armed_at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Yield the payload once the quiet interval has fully elapsed,
    /// disarming the publisher. Returns `None` while still inside the
    /// interval or when nothing is scheduled.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        let armed_at = self.armed_at?;
        if now.saturating_duration_since(armed_at) < self.delay {
            return None;
        }
        self.armed_at = None;
        self.pending.take()
    }
}
