// -
// Listen protocol

/// Target id used by every watch. Only one target is ever added per stream, so
/// the actual value is arbitrary.
pub(crate) const WATCH_TARGET_ID: i32 = 0x1;

/// Routing header carrying the database resource name
pub(crate) const RESOURCE_PREFIX_HEADER: &str = "google-cloud-resource-prefix";

/// Request params header used by the backend for request routing
pub(crate) const REQUEST_PARAMS_HEADER: &str = "x-goog-request-params";

// -
// Configuration

/// Environment variable prefix for configuration overrides
pub(crate) const CONFIG_ENV_PREFIX: &str = "WATCH";

/// Environment variable naming an extra configuration file
pub(crate) const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
