use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Exponential backoff applied between listen stream reconnects
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct BackoffPolicy {
    /// First non-zero delay (unit: milliseconds)
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Upper bound of the delay (unit: milliseconds)
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Growth factor applied on every attempt
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Fraction of the delay that is randomized away. 1.0 draws the delay
    /// uniformly from zero up to the nominal value, 0.0 disables jitter.
    #[serde(default = "default_jitter")]
    pub jitter: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            multiplier: default_multiplier(),
            jitter: default_jitter(),
        }
    }
}

impl BackoffPolicy {
    pub fn validate(&self) -> Result<()> {
        if self.base_delay_ms == 0 {
            return Err(Error::Config(ConfigError::Message(
                "backoff base_delay_ms must be > 0".into(),
            )));
        }

        if self.base_delay_ms > self.max_delay_ms {
            return Err(Error::Config(ConfigError::Message(format!(
                "backoff base_delay_ms {} exceeds max_delay_ms {}",
                self.base_delay_ms, self.max_delay_ms
            ))));
        }

        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err(Error::Config(ConfigError::Message(format!(
                "backoff multiplier {} must be >= 1.0",
                self.multiplier
            ))));
        }

        if !(0.0..=1.0).contains(&self.jitter) {
            return Err(Error::Config(ConfigError::Message(format!(
                "backoff jitter {} must be within [0.0, 1.0]",
                self.jitter
            ))));
        }

        Ok(())
    }
}

fn default_base_delay_ms() -> u64 {
    1000
}
fn default_max_delay_ms() -> u64 {
    60_000
}
fn default_multiplier() -> f64 {
    1.5
}
fn default_jitter() -> f64 {
    1.0
}
