use serde::Serialize;

/// One timestamped set of sensor readings, as the station collects them.
///
/// Readings use the station's metric units: temperature in degrees
/// Celsius, pressure in hPa, wind in km/h, rain totals in cm. A sensor
/// that produced no value for an interval is `None` and is omitted from
/// the upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observation {
    /// Observation time, seconds since the Unix epoch.
    pub timestamp: i64,
    /// Outdoor temperature, degrees Celsius.
    pub temperature: Option<f64>,
    /// Relative humidity, percent.
    pub humidity: Option<f64>,
    /// Barometric pressure, hPa.
    pub pressure: Option<f64>,
    /// Wind direction, degrees.
    pub wind_dir: Option<f64>,
    /// Wind speed, km/h.
    pub wind_speed: Option<f64>,
    /// Wind gust speed, km/h.
    pub wind_gust: Option<f64>,
    /// Rainfall over the last hour, cm.
    pub rain_1h: Option<f64>,
    /// Rainfall over the last 24 hours, cm.
    pub rain_24h: Option<f64>,
}

/// One element of the measurements POST body, in the units the API
/// expects (m/s wind, mm rain).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Measurement {
    pub station_id: String,
    pub dt: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_1h: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_24h: Option<f64>,
}
