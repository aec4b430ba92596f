/// User agent string for HTTP requests
pub const USER_AGENT: &str = "owm-uploader/0.9.0";

/// OpenWeatherMap measurements API endpoint
pub const DEFAULT_SERVER_URL: &str = "http://api.openweathermap.org/data/3.0/measurements";

/// Default per-request timeout, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default total number of delivery attempts per record
pub const DEFAULT_MAX_TRIES: usize = 3;

/// Default wait between delivery attempts, in seconds
pub const DEFAULT_RETRY_WAIT_SECS: u64 = 5;

/// Default bound on queued records awaiting upload
pub const DEFAULT_MAX_BACKLOG: usize = 16;
