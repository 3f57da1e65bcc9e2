//! Client-side rate limiter for the price index.
//!
//! The free tier of the price index throttles aggressively, so calls are
//! tracked in a sliding window. Once more than `max_calls` fall inside the
//! window, the next call pauses for a fixed interval before it is sent.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Sliding-window call tracker.
#[derive(Debug)]
pub struct RateLimiter {
    calls: Mutex<VecDeque<Instant>>,
    window: Duration,
    max_calls: usize,
    pause: Duration,
}

impl RateLimiter {
    pub fn new(window: Duration, max_calls: usize, pause: Duration) -> Self {
        Self {
            calls: Mutex::new(VecDeque::new()),
            window,
            max_calls,
            pause,
        }
    }

    /// One-minute window with the given call ceiling and pause.
    pub fn per_minute(max_calls: usize, pause: Duration) -> Self {
        Self::new(Duration::from_secs(60), max_calls, pause)
    }

    /// Record a call made at `now` and return how long the caller must wait.
    pub fn admit_at(&self, now: Instant) -> Duration {
        let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
        calls.push_back(now);
        while let Some(&oldest) = calls.front() {
            if oldest + self.window < now {
                calls.pop_front();
            } else {
                break;
            }
        }
        if calls.len() > self.max_calls {
            self.pause
        } else {
            Duration::ZERO
        }
    }

    /// Record a call now, sleeping first if the window is full.
    pub fn acquire(&self) {
        let delay = self.admit_at(Instant::now());
        if !delay.is_zero() {
            tracing::debug!(
                calls = self.recent_calls(),
                pause_ms = delay.as_millis() as u64,
                "rate limit reached, pausing"
            );
            std::thread::sleep(delay);
        }
    }

    /// Calls currently inside the window.
    pub fn recent_calls(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_ceiling_never_waits() {
        let rl = RateLimiter::per_minute(3, Duration::from_secs(8));
        let t0 = Instant::now();
        for i in 0..3 {
            assert_eq!(rl.admit_at(t0 + Duration::from_secs(i)), Duration::ZERO);
        }
    }

    #[test]
    fn over_ceiling_pauses() {
        let rl = RateLimiter::per_minute(2, Duration::from_secs(8));
        let t0 = Instant::now();
        rl.admit_at(t0);
        rl.admit_at(t0 + Duration::from_secs(1));
        assert_eq!(
            rl.admit_at(t0 + Duration::from_secs(2)),
            Duration::from_secs(8)
        );
    }

    #[test]
    fn old_calls_leave_the_window() {
        let rl = RateLimiter::per_minute(2, Duration::from_secs(8));
        let t0 = Instant::now();
        rl.admit_at(t0);
        rl.admit_at(t0 + Duration::from_secs(1));
        // Both earlier calls are more than 60s old by now.
        assert_eq!(
            rl.admit_at(t0 + Duration::from_secs(62)),
            Duration::ZERO
        );
        assert_eq!(rl.recent_calls(), 1);
    }

    #[test]
    fn acquire_without_pressure_returns_immediately() {
        let rl = RateLimiter::per_minute(6, Duration::from_secs(8));
        let start = Instant::now();
        rl.acquire();
        rl.acquire();
        rl.acquire();
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(rl.recent_calls(), 3);
    }
}
