//! Request pacing for the record store.
//!
//! A [`RateLimiter`] hands out permits under a sliding-window policy of at
//! most `max_calls` per `window`. It reads time through `tokio::time`, so
//! tests can drive it with a paused clock.


use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::constants::{DEFAULT_RECORD_INTERVAL_MS, DEFAULT_WRITE_INTERVAL_MS};

/// At most `max_calls` permits in any `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePolicy {
    pub max_calls: u32,
    pub window: Duration,
}

impl RatePolicy {
    pub fn new(max_calls: u32, window: Duration) -> Self {
        Self { max_calls, window }
    }

    /// One permit per `interval`: consecutive permits are at least `interval` apart.
    pub fn fixed_interval(interval: Duration) -> Self {
        Self::new(1, interval)
    }

    /// A policy that never waits.
    pub fn unlimited() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Zero calls or a zero window disables limiting.
    pub fn is_unlimited(&self) -> bool {
        self.max_calls == 0 || self.window.is_zero()
    }
}

/// Pacing applied by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Applied to every read-modify-write cycle against the store.
    pub write: RatePolicy,
    /// Applied to every record of a pass, whatever its outcome.
    pub record: RatePolicy,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            write: RatePolicy::fixed_interval(Duration::from_millis(DEFAULT_WRITE_INTERVAL_MS)),
            record: RatePolicy::fixed_interval(Duration::from_millis(DEFAULT_RECORD_INTERVAL_MS)),
        }
    }
}

impl Pacing {
    pub fn new(write_interval: Duration, record_interval: Duration) -> Self {
        Self {
            write: RatePolicy::fixed_interval(write_interval),
            record: RatePolicy::fixed_interval(record_interval),
        }
    }

    pub fn unlimited() -> Self {
        Self {
            write: RatePolicy::unlimited(),
            record: RatePolicy::unlimited(),
        }
    }
}

/// Sliding-window limiter. Callers of [`acquire`](Self::acquire) are served
/// one at a time, in arrival order.
#[derive(Debug)]
pub struct RateLimiter {
    policy: RatePolicy,
    granted: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(policy: RatePolicy) -> Self {
        Self {
            policy,
            granted: Mutex::new(VecDeque::new()),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(RatePolicy::unlimited())
    }

    pub fn policy(&self) -> RatePolicy {
        self.policy
    }

    /// Waits until a permit is available under the policy, then takes it.
    pub async fn acquire(&self) {
        if self.policy.is_unlimited() {
            return;
        }

        let window = self.policy.window;
        let max_calls = self.policy.max_calls as usize;
        let mut granted = self.granted.lock().await;

        loop {
            let now = Instant::now();
            while let Some(&oldest) = granted.front() {
                if now.duration_since(oldest) >= window {
                    granted.pop_front();
                } else {
                    break;
                }
            }

            if granted.len() < max_calls {
                granted.push_back(now);
                return;
            }

            let Some(&oldest) = granted.front() else {
                continue;
            };
            let ready_at = oldest + window;
            debug!(
                wait_ms = ready_at.saturating_duration_since(now).as_millis() as u64,
                max_calls, "Rate limit reached; waiting"
            );
            tokio::time::sleep_until(ready_at).await;
        }
    }
}
