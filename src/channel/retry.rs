//! Reconnect Policies
//!
//! The two live feeds want different recovery behavior: the triage chat
//! backs off exponentially, the wait-time board retries on a flat cadence.
//! Both are expressed here as named configuration rather than hard-coded
//! into the channel.

/// Delay schedule applied between reconnect attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryPolicy {
    /// `delay = min(base_ms * 2^attempt, cap_ms)` for attempt 1, 2, 3, ...
    Exponential { base_ms: u32, cap_ms: u32 },
    /// The same delay for every attempt.
    Fixed { delay_ms: u32 },
}

impl RetryPolicy {
    /// Standard exponential profile: 1s base doubling up to a 30s ceiling.
    pub fn exponential() -> Self {
        RetryPolicy::Exponential {
            base_ms: 1_000,
            cap_ms: 30_000,
        }
    }

    /// Standard flat profile: steady 3s cadence.
    pub fn fixed() -> Self {
        RetryPolicy::Fixed { delay_ms: 3_000 }
    }

    /// Delay in milliseconds before reconnect attempt number `attempt`
    /// (1-based; the counter resets after a successful open).
    pub fn delay_ms(&self, attempt: u32) -> u32 {
        match *self {
            RetryPolicy::Exponential { base_ms, cap_ms } => {
                let scaled = u64::from(base_ms).saturating_mul(1u64 << attempt.min(32));
                scaled.min(u64::from(cap_ms)) as u32
            }
            RetryPolicy::Fixed { delay_ms } => delay_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponential_doubles_from_base() {
        let policy = RetryPolicy::exponential();
        assert_eq!(policy.delay_ms(1), 2_000);
        assert_eq!(policy.delay_ms(2), 4_000);
        assert_eq!(policy.delay_ms(3), 8_000);
        assert_eq!(policy.delay_ms(4), 16_000);
    }

    #[test]
    fn exponential_caps_at_ceiling() {
        let policy = RetryPolicy::exponential();
        assert_eq!(policy.delay_ms(5), 30_000);
        assert_eq!(policy.delay_ms(10), 30_000);
        assert_eq!(policy.delay_ms(1_000), 30_000);
    }

    #[test]
    fn exponential_is_monotonic() {
        let policy = RetryPolicy::exponential();
        let mut previous = 0;
        for attempt in 1..40 {
            let delay = policy.delay_ms(attempt);
            assert!(delay >= previous, "delay shrank at attempt {}", attempt);
            previous = delay;
        }
    }

    #[test]
    fn fixed_ignores_attempt_count() {
        let policy = RetryPolicy::fixed();
        assert_eq!(policy.delay_ms(1), 3_000);
        assert_eq!(policy.delay_ms(50), 3_000);
    }
}
