use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::config::BackoffPolicy;

/// Reconnect delay sequence of a listen stream.
///
/// The delay starts at zero so the very first connection is immediate. Every
/// `advance` moves to the next step (`base`, then `delay * multiplier`, capped
/// at `max`) and `reset` returns to zero once the backend confirms progress.
pub(crate) struct ExponentialBackoff {
    policy: BackoffPolicy,
    attempt: u32,
    delay: Duration,
    rng: StdRng,
}

impl ExponentialBackoff {
    pub(crate) fn new(policy: BackoffPolicy) -> Self {
        Self::with_rng(policy, StdRng::from_entropy())
    }

    pub(crate) fn with_rng(
        policy: BackoffPolicy,
        rng: StdRng,
    ) -> Self {
        Self {
            policy,
            attempt: 0,
            delay: Duration::ZERO,
            rng,
        }
    }

    /// Number of advances since the last reset
    pub(crate) fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Nominal delay of the current step, before jitter
    #[cfg(test)]
    pub(crate) fn current_delay(&self) -> Duration {
        self.delay
    }

    pub(crate) fn reset(&mut self) {
        self.attempt = 0;
        self.delay = Duration::ZERO;
    }

    pub(crate) fn advance(&mut self) {
        let base = Duration::from_millis(self.policy.base_delay_ms);
        let max = Duration::from_millis(self.policy.max_delay_ms);

        self.attempt = self.attempt.saturating_add(1);
        self.delay = if self.delay.is_zero() {
            base.min(max)
        } else {
            let next = (self.delay.as_nanos() as f64 * self.policy.multiplier).round();
            if next >= max.as_nanos() as f64 {
                max
            } else {
                Duration::from_nanos(next as u64)
            }
        };
    }

    /// Delay to wait before the next connection, drawn uniformly from
    /// `[delay * (1 - jitter), delay]`.
    pub(crate) fn randomized_delay(&mut self) -> Duration {
        let jitter = self.policy.jitter.clamp(0.0, 1.0);
        if self.delay.is_zero() || jitter == 0.0 {
            return self.delay;
        }

        let high = self.delay.as_nanos() as f64;
        let low = high * (1.0 - jitter);
        Duration::from_nanos(self.rng.gen_range(low..=high).round() as u64)
    }
}
