use std::time::{Duration, Instant};

/// Fixed-period tick source polled from the window event loop.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    last: Instant,
}

impl Ticker {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self { period, last: now }
    }

    /// True once per elapsed period. Missed periods are dropped rather than
    /// replayed, so a stalled window never fast-forwards the snake.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) < self.period {
            return false;
        }
        self.last = now;
        true
    }

    /// Start a new period at `now`.
    pub fn restart(&mut self, now: Instant) {
        self.last = now;
    }

    /// Time left before the next tick is due.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.period
            .saturating_sub(now.saturating_duration_since(self.last))
    }
}
