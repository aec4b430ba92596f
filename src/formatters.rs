use crate::models::{Measurement, Observation};

// The measurements API wants wind in m/s and rain in mm; station records
// carry km/h and cm.
const KPH_TO_MPS: f64 = 0.2777777777;
const CM_TO_MM: f64 = 10.0;

/// Maps a station record onto the measurement the API accepts, converting
/// units where the two disagree. Absent readings stay absent.
pub fn to_measurement(station_id: &str, record: &Observation) -> Measurement {
    Measurement {
        station_id: station_id.to_owned(),
        dt: record.timestamp,
        temperature: record.temperature,
        humidity: record.humidity,
        pressure: record.pressure,
        wind_deg: record.wind_dir,
        wind_speed: record.wind_speed.map(|v| v * KPH_TO_MPS),
        wind_gust: record.wind_gust.map(|v| v * KPH_TO_MPS),
        rain_1h: record.rain_1h.map(|v| v * CM_TO_MM),
        rain_24h: record.rain_24h.map(|v| v * CM_TO_MM),
    }
}

/// Serializes the POST body: a JSON array holding the single measurement.
pub fn post_body(station_id: &str, record: &Observation) -> serde_json::Result<String> {
    serde_json::to_string(&[to_measurement(station_id, record)])
}
