use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Listen protocol settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ListenConfig {
    /// Database resource name, `projects/{project}/databases/{database}`
    #[serde(default = "default_database")]
    pub database: String,

    /// Capacity of the outbound request channel of a listen stream
    #[serde(default = "default_request_buffer_size")]
    pub request_buffer_size: usize,

    /// Existence filter mismatches without a matching filter in between
    /// before the watch gives up (0 means unlimited)
    #[serde(default = "default_max_filter_mismatches")]
    pub max_filter_mismatches: u32,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            request_buffer_size: default_request_buffer_size(),
            max_filter_mismatches: default_max_filter_mismatches(),
        }
    }
}

impl ListenConfig {
    pub fn validate(&self) -> Result<()> {
        let segments: Vec<&str> = self.database.split('/').collect();
        let well_formed = segments.len() == 4
            && segments[0] == "projects"
            && segments[2] == "databases"
            && !segments[1].is_empty()
            && !segments[3].is_empty();
        if !well_formed {
            return Err(Error::Config(ConfigError::Message(format!(
                "database {:?} must look like projects/{{project}}/databases/{{database}}",
                self.database
            ))));
        }

        if self.request_buffer_size == 0 {
            return Err(Error::Config(ConfigError::Message(
                "request_buffer_size must be > 0".into(),
            )));
        }

        Ok(())
    }
}

fn default_database() -> String {
    "projects/demo-project/databases/(default)".to_string()
}
fn default_request_buffer_size() -> usize {
    8
}
fn default_max_filter_mismatches() -> u32 {
    10
}
