//! Configuration management for the watch client.
//!
//! Values are layered with increasing priority:
//! 1. Type defaults
//! 2. Configuration file named by `CONFIG_PATH`
//! 3. Environment variables with the `WATCH__` prefix
mod listen;
mod network;
mod retry;
pub use listen::*;
pub use network::*;
pub use retry::*;

#[cfg(test)]
mod config_test;

use std::env;

use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::CONFIG_ENV_PREFIX;
use crate::constants::CONFIG_PATH_ENV;
use crate::Result;

/// Top-level configuration of a watch and its transport
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct WatchConfig {
    /// Listen target and protocol bounds
    #[serde(default)]
    pub listen: ListenConfig,
    /// Reconnect delays
    #[serde(default)]
    pub backoff: BackoffPolicy,
    /// gRPC channel parameters
    #[serde(default)]
    pub network: ConnectionParams,
}

impl WatchConfig {
    /// Loads configuration from defaults, the `CONFIG_PATH` file and `WATCH__`
    /// environment variables.
    ///
    /// # Note
    /// No validation happens here so that further overrides can still be
    /// applied. Call `validate()` before use.
    ///
    /// # Examples
    /// ```ignore
    /// std::env::set_var("WATCH__LISTEN__DATABASE", "projects/p/databases/(default)");
    /// let cfg = WatchConfig::new()?.validate()?;
    /// ```
    pub fn new() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            builder = builder.add_source(File::with_name(&config_path).required(true));
        }

        builder = builder.add_source(env_source());

        let config: Self = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Applies a configuration file on top of the current values. Environment
    /// variables are re-applied last so they keep the highest priority.
    pub fn with_override_config(
        &self,
        path: &str,
    ) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(Config::try_from(self)?)
            .add_source(File::with_name(path))
            .add_source(env_source())
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Validates every section and returns the validated configuration
    pub fn validate(self) -> Result<Self> {
        self.listen.validate()?;
        self.backoff.validate()?;
        self.network.validate()?;
        Ok(self)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(CONFIG_ENV_PREFIX)
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}
