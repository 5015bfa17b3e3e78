use time::Duration;

/// Backoff schedule for webhook delivery attempts.
///
/// Delays are deterministic so a delivery's timing can be reasoned about
/// from its attempt history alone.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts allowed, the initial try included.
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    /// Return the delay to wait after a failed attempt.
    ///
    /// `attempt` is the attempt that just failed, starting at 1.
    pub fn next_delay(&self, attempt: u32) -> Duration {
        // Step 1: Compute the exponential delay (base * 2^(attempt-1)).
        let attempt = attempt.max(1);
        let raw = self
            .base_delay_ms
            .saturating_mul(2_u64.saturating_pow(attempt - 1));

        // Step 2: Cap at the max delay to avoid unbounded backoff.
        let capped = raw.min(self.max_delay_ms);
        Duration::milliseconds(capped as i64)
    }

    /// Returns `true` when another attempt is allowed after `attempt` failed.
    pub fn can_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1_000,
            max_delay_ms: 30_000,
        }
    }
}
