//! Upload weather station observations to OpenWeatherMap.
//!
//! This crate is the OpenWeatherMap output target for a station
//! data-collection daemon. The host constructs the service once at
//! startup and hands it each new archive record; the service maps the
//! record's readings onto the measurements API's parameter set (wind
//! km/h → m/s, rain cm → mm) and POSTs it, retrying transient failures a
//! bounded number of times before dropping the record. A slow or dead
//! network never blocks the host: records are queued to a worker task and
//! discarded when the backlog fills.
//!
//! Host configuration stanza:
//!
//! ```toml
//! appid = "APPID"
//! station_id = "STATION_ID"
//! ```
//!
//! ```no_run
//! use owm_uploader::{Observation, OpenWeatherMap, OwmConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OwmConfig {
//!     appid: "APPID".to_string(),
//!     station_id: "STATION_ID".to_string(),
//!     ..OwmConfig::default()
//! };
//! let service = OpenWeatherMap::new(config)?;
//!
//! // On each new archive record:
//! service.queue_record(Observation {
//!     timestamp: 1700000000,
//!     temperature: Some(20.0),
//!     humidity: Some(55.0),
//!     pressure: Some(1013.0),
//!     ..Observation::default()
//! });
//!
//! service.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod config;
mod constants;
mod formatters;
mod models;
mod service;

pub use config::{ConfigError, OwmConfig};
pub use constants::DEFAULT_SERVER_URL;
pub use formatters::{post_body, to_measurement};
pub use models::{Measurement, Observation};
pub use service::{OpenWeatherMap, StartupError, UploadError};
