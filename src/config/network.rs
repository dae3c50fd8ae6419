use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// gRPC channel parameters for the listen transport
#[derive(Serialize, Deserialize, Clone)]
pub struct ConnectionParams {
    /// Backend address, `https://` enables TLS
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// TCP connect timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_in_ms: u64,

    /// TCP keepalive in seconds
    #[serde(default = "default_tcp_keepalive")]
    pub tcp_keepalive_in_secs: u64,

    /// HTTP2 keepalive ping interval in seconds
    #[serde(default = "default_h2_keepalive_interval")]
    pub http2_keep_alive_interval_in_secs: u64,

    /// HTTP2 keepalive timeout in seconds
    #[serde(default = "default_h2_keepalive_timeout")]
    pub http2_keep_alive_timeout_in_secs: u64,

    /// Gzip-compress requests and accept gzip responses
    #[serde(default)]
    pub enable_compression: bool,

    /// Bearer token sent as `authorization` metadata
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl std::fmt::Debug for ConnectionParams {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("endpoint", &self.endpoint)
            .field("connect_timeout_in_ms", &self.connect_timeout_in_ms)
            .field("tcp_keepalive_in_secs", &self.tcp_keepalive_in_secs)
            .field(
                "http2_keep_alive_interval_in_secs",
                &self.http2_keep_alive_interval_in_secs,
            )
            .field(
                "http2_keep_alive_timeout_in_secs",
                &self.http2_keep_alive_timeout_in_secs,
            )
            .field("enable_compression", &self.enable_compression)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            connect_timeout_in_ms: default_connect_timeout(),
            tcp_keepalive_in_secs: default_tcp_keepalive(),
            http2_keep_alive_interval_in_secs: default_h2_keepalive_interval(),
            http2_keep_alive_timeout_in_secs: default_h2_keepalive_timeout(),
            enable_compression: false,
            auth_token: None,
        }
    }
}

impl ConnectionParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(Error::Config(ConfigError::Message(format!(
                "endpoint {:?} must start with http:// or https://",
                self.endpoint
            ))));
        }

        if self.connect_timeout_in_ms == 0 {
            return Err(Error::Config(ConfigError::Message(
                "connection timeout must be > 0".into(),
            )));
        }

        if self.http2_keep_alive_timeout_in_secs >= self.http2_keep_alive_interval_in_secs {
            return Err(Error::Config(ConfigError::Message(format!(
                "keepalive timeout {}s must be < interval {}s",
                self.http2_keep_alive_timeout_in_secs, self.http2_keep_alive_interval_in_secs
            ))));
        }

        if matches!(&self.auth_token, Some(token) if token.trim().is_empty()) {
            return Err(Error::Config(ConfigError::Message(
                "auth_token must not be blank".into(),
            )));
        }

        Ok(())
    }
}

fn default_endpoint() -> String {
    "https://firestore.googleapis.com".to_string()
}
fn default_connect_timeout() -> u64 {
    5000
}
fn default_tcp_keepalive() -> u64 {
    300
}
fn default_h2_keepalive_interval() -> u64 {
    30
}
fn default_h2_keepalive_timeout() -> u64 {
    10
}
