//! Panel configuration.
//!
//! Read from `$SOUNDDECK_CONFIG`, or `<config dir>/sounddeck/panel.json`.
//! Every field is optional; a missing or unreadable file means defaults.

use deck_bridge::{BridgeKind, SliderBinding};
use deck_notify::AlertConfig;
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "SOUNDDECK_CONFIG";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub alerts: AlertConfig,
    /// Milliseconds between frames.
    pub frame_interval_ms: u64,
    pub slider_binding: SliderBinding,
    pub bridge: BridgeKind,
    /// Handler name used by the message-handler bridge.
    pub handler_name: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            alerts: AlertConfig::default(),
            frame_interval_ms: 16,
            slider_binding: SliderBinding::default(),
            bridge: BridgeKind::default(),
            handler_name: "external".to_string(),
        }
    }
}

/// Where the config file is expected.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("sounddeck").join("panel.json"))
}

impl PanelConfig {
    /// Load from `path`, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {:?}, using defaults", path);
                return Self::default();
            }
            Err(e) => {
                warn!("Failed to read config {:?}: {}", path, e);
                return Self::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Invalid config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn load_default() -> Self {
        match config_path() {
            Some(path) => Self::load(&path),
            None => Self::default(),
        }
    }
}
