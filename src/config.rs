use serde::Deserialize;
use thiserror::Error;

use crate::constants::{
    DEFAULT_MAX_BACKLOG, DEFAULT_MAX_TRIES, DEFAULT_RETRY_WAIT_SECS, DEFAULT_SERVER_URL,
    DEFAULT_TIMEOUT_SECS,
};

/// A setting the uploader cannot start with.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required option `{0}`")]
    MissingOption(&'static str),
    #[error("option `{option}` must be {requirement}")]
    InvalidOption {
        option: &'static str,
        requirement: &'static str,
    },
}

/// Uploader settings, taken from the host's configuration.
///
/// Only `appid` and `station_id` have no usable default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OwmConfig {
    /// API key issued by OpenWeatherMap.
    pub appid: String,
    /// Station identifier the measurements are filed under.
    pub station_id: String,
    /// Station latitude, decimal degrees.
    pub latitude: Option<f64>,
    /// Station longitude, decimal degrees.
    pub longitude: Option<f64>,
    /// Station altitude, meters.
    pub altitude: Option<f64>,
    /// Measurements endpoint.
    pub server_url: String,
    /// Build request bodies but never send them.
    pub skip_upload: bool,
    /// Log each successful upload.
    pub log_success: bool,
    /// Log each abandoned upload.
    pub log_failure: bool,
    /// Per-request timeout, seconds.
    pub timeout_secs: u64,
    /// Total delivery attempts per record.
    pub max_tries: usize,
    /// Wait between delivery attempts, seconds.
    pub retry_wait_secs: u64,
    /// Minimum spacing between posted records, seconds.
    pub post_interval_secs: Option<i64>,
    /// Drop records older than this, seconds.
    pub stale_secs: Option<i64>,
    /// Bound on records queued behind a slow upload.
    pub max_backlog: usize,
}

impl Default for OwmConfig {
    fn default() -> Self {
        Self {
            appid: String::new(),
            station_id: String::new(),
            latitude: None,
            longitude: None,
            altitude: None,
            server_url: DEFAULT_SERVER_URL.to_string(),
            skip_upload: false,
            log_success: true,
            log_failure: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_tries: DEFAULT_MAX_TRIES,
            retry_wait_secs: DEFAULT_RETRY_WAIT_SECS,
            post_interval_secs: None,
            stale_secs: None,
            max_backlog: DEFAULT_MAX_BACKLOG,
        }
    }
}

impl OwmConfig {
    /// Checks the settings the uploader cannot run without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.appid.is_empty() {
            return Err(ConfigError::MissingOption("appid"));
        }
        if self.station_id.is_empty() {
            return Err(ConfigError::MissingOption("station_id"));
        }
        if self.server_url.is_empty() {
            return Err(ConfigError::MissingOption("server_url"));
        }
        if self.max_tries == 0 {
            return Err(ConfigError::InvalidOption {
                option: "max_tries",
                requirement: "at least 1",
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidOption {
                option: "timeout_secs",
                requirement: "at least 1",
            });
        }
        if self.max_backlog == 0 {
            return Err(ConfigError::InvalidOption {
                option: "max_backlog",
                requirement: "at least 1",
            });
        }
        Ok(())
    }
}

/// Masks all but the last four characters of a credential for logging.
pub(crate) fn obfuscate(secret: &str) -> String {
    let chars = secret.chars().count();
    let masked = chars.saturating_sub(4);
    let tail: String = secret.chars().skip(masked).collect();
    format!("{}{}", "X".repeat(masked), tail)
}
