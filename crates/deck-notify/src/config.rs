use serde::Deserialize;

/// Seconds an alert stays up before it is removed.
pub const DEFAULT_ALERT_LIFETIME_SECS: f64 = 4.0;
/// Alerts fade out over their last second.
pub const DEFAULT_FADE_WINDOW_SECS: f64 = 1.0;
/// Maximum number of alerts shown at once.
pub const DEFAULT_ALERT_CAPACITY: usize = 10;

/// Alert timing and sizing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub lifetime_secs: f64,
    pub fade_window_secs: f64,
    pub capacity: usize,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            lifetime_secs: DEFAULT_ALERT_LIFETIME_SECS,
            fade_window_secs: DEFAULT_FADE_WINDOW_SECS,
            capacity: DEFAULT_ALERT_CAPACITY,
        }
    }
}
