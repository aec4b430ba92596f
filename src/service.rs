use std::time::{Duration, SystemTime, UNIX_EPOCH};

use backon::{ConstantBuilder, Retryable};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::{obfuscate, ConfigError, OwmConfig};
use crate::constants::USER_AGENT;
use crate::formatters::post_body;
use crate::models::Observation;

/// Why the service could not be constructed.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Why a single delivery attempt failed.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The API rejected the station credentials.
    #[error("credentials rejected with status {0}")]
    BadCredentials(StatusCode),
    #[error("server responded with status {status}: {body}")]
    BadStatus { status: StatusCode, body: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not encode measurement: {0}")]
    Encode(#[from] serde_json::Error),
}

impl UploadError {
    /// Whether another attempt could plausibly succeed.
    fn is_transient(&self) -> bool {
        !matches!(
            self,
            UploadError::BadCredentials(_) | UploadError::Encode(_)
        )
    }
}

/// Output target that uploads each archived observation to
/// OpenWeatherMap.
///
/// Construction validates the configuration and spawns the upload worker
/// on the calling tokio runtime; the host then feeds it one record per
/// archive interval through [`queue_record`](Self::queue_record). Delivery
/// is best effort: a record that still fails after the configured attempts
/// is dropped, not replayed.
pub struct OpenWeatherMap {
    tx: mpsc::Sender<Observation>,
    worker: JoinHandle<()>,
}

impl OpenWeatherMap {
    pub fn new(config: OwmConfig) -> Result<Self, StartupError> {
        config.validate()?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        tracing::info!(
            station_id = %config.station_id,
            appid = %obfuscate(&config.appid),
            "observations will be uploaded"
        );
        if let (Some(latitude), Some(longitude)) = (config.latitude, config.longitude) {
            // TODO: push the station location to the stations API instead
            // of only logging it.
            tracing::debug!(latitude, longitude, altitude = ?config.altitude, "station location");
        }

        let (tx, rx) = mpsc::channel(config.max_backlog);
        let uploader = Uploader {
            client,
            config,
            last_post: None,
        };
        let worker = tokio::spawn(uploader.run(rx));

        Ok(Self { tx, worker })
    }

    /// Queues one record for delivery without blocking the caller.
    ///
    /// The record is discarded, with a log line, when the backlog is full
    /// or the worker has gone inactive.
    pub fn queue_record(&self, record: Observation) {
        match self.tx.try_send(record) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!("upload backlog full; discarding record");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!("uploader is not running; discarding record");
            }
        }
    }

    /// Closes the queue, lets the worker drain it, and reaps the task.
    pub async fn shutdown(self) {
        let Self { tx, worker } = self;
        drop(tx);
        if let Err(e) = worker.await {
            tracing::error!("uploader task failed: {e}");
        }
    }
}

struct Uploader {
    client: Client,
    config: OwmConfig,
    /// Timestamp of the last record actually posted.
    last_post: Option<i64>,
}

impl Uploader {
    async fn run(mut self, mut rx: mpsc::Receiver<Observation>) {
        while let Some(record) = rx.recv().await {
            if self.should_skip(&record) {
                continue;
            }
            match self.post(&record).await {
                Ok(()) => {
                    self.last_post = Some(record.timestamp);
                    if self.config.log_success && !self.config.skip_upload {
                        tracing::info!(dt = record.timestamp, "published record");
                    }
                }
                Err(e @ UploadError::BadCredentials(_)) => {
                    tracing::error!("{e}; uploads disabled");
                    return;
                }
                Err(e) => {
                    if self.config.log_failure {
                        tracing::warn!(
                            dt = record.timestamp,
                            tries = self.config.max_tries,
                            "record not posted: {e}"
                        );
                    }
                }
            }
        }
        tracing::debug!("uploader stopped");
    }

    fn should_skip(&self, record: &Observation) -> bool {
        if let Some(stale) = self.config.stale_secs {
            let age = unix_now() - record.timestamp;
            if age > stale {
                tracing::debug!(age, "skipping stale record");
                return true;
            }
        }
        if let (Some(interval), Some(last)) = (self.config.post_interval_secs, self.last_post) {
            if record.timestamp - last < interval {
                tracing::debug!(dt = record.timestamp, "skipping record inside post interval");
                return true;
            }
        }
        false
    }

    async fn post(&self, record: &Observation) -> Result<(), UploadError> {
        let url = format!("{}?appid={}", self.config.server_url, self.config.appid);
        let body = post_body(&self.config.station_id, record)?;

        if self.config.skip_upload {
            tracing::debug!(%body, "skip_upload set; record not sent");
            return Ok(());
        }

        (|| self.post_once(&url, &body))
            .retry(
                ConstantBuilder::default()
                    .with_delay(Duration::from_secs(self.config.retry_wait_secs))
                    .with_max_times(self.config.max_tries - 1),
            )
            .when(UploadError::is_transient)
            .notify(|e: &UploadError, wait: Duration| {
                tracing::debug!("upload attempt failed ({e}); retrying in {wait:?}");
            })
            .await
    }

    async fn post_once(&self, url: &str, body: &str) -> Result<(), UploadError> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_owned())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(UploadError::BadCredentials(status));
        }
        let body = response.text().await.unwrap_or_default();
        Err(UploadError::BadStatus { status, body })
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
