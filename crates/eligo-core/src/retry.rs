//! Shared retry schedule for external calls.

use std::time::Duration;

/// An exponential-backoff retry schedule.
///
/// Attempts are 1-based. `delay_for(n)` is the pause taken after a failed
/// attempt `n`, before attempt `n + 1`: base, 2x base, 4x base and so on.
/// With the defaults (3 attempts, 2s base) the schedule is 2s then 4s.
///
/// The classifier gateway applies this automatically to transient transport
/// failures. Payer submissions are never retried automatically; callers may
/// reuse the schedule at their own discretion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Pause after the first failed attempt.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            // A zero budget would mean "never call at all".
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// The pause after failed attempt `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.max(1) - 1;
        self.base_delay.saturating_mul(2u32.saturating_pow(exponent))
    }

    /// Whether `attempt` is the last one the budget allows.
    pub fn is_final(&self, attempt: u32) -> bool {
        attempt >= self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}
