use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::ProtocolVersion;
use crate::error::{Error, Result};
use crate::renderer::{SurfaceStyle, DEFAULT_PANEL_HEIGHT};

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub url: String,
    pub protocol: ProtocolVersion,
    /// Board size in cells
    pub board_width: u16,
    pub board_height: u16,
    pub panel_height: i32,
    pub style: SurfaceStyle,
    /// Period of the local simulation clock; no ticker when unset
    pub tick_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1/game_data".into(),
            protocol: ProtocolVersion::V1,
            board_width: 20,
            board_height: 5,
            panel_height: DEFAULT_PANEL_HEIGHT,
            style: SurfaceStyle::default(),
            tick_ms: None,
        }
    }
}

impl ClientConfig {
    /// `<config dir>/snake-client/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("snake-client").join("config.json"))
    }

    /// Read a JSON config; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_json(&text).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn tick_period(&self) -> Option<Duration> {
        self.tick_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Rgb;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.url, "ws://127.0.0.1/game_data");
        assert_eq!((config.board_width, config.board_height), (20, 5));
        assert_eq!(config.style.pixel_width, 6);
        assert_eq!(config.style.pixel_height, 9);
        assert_eq!(config.style.spacing, 1);
        assert_eq!(config.style.background, Rgb::new(164, 197, 63));
        assert_eq!(config.style.foreground, Rgb::new(59, 75, 20));
        assert_eq!(config.tick_period(), None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ClientConfig::from_json(r#"{"protocol": "v2", "board_width": 10, "tick_ms": 250}"#).unwrap();
        assert_eq!(config.protocol, ProtocolVersion::V2);
        assert_eq!(config.board_width, 10);
        assert_eq!(config.board_height, 5);
        assert_eq!(config.tick_period(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(ClientConfig::from_json("{"), Err(Error::Config(_))));
        assert!(matches!(ClientConfig::from_json(r#"{"protocol": "v9"}"#), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("snake-client-no-such-dir").join("config.json");
        assert_eq!(ClientConfig::load(&path).unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_load_round_trip() {
        let path = std::env::temp_dir().join(format!("snake-client-config-{}.json", std::process::id()));
        let mut config = ClientConfig::default();
        config.url = "ws://example.test:8080/game_data".into();
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        let loaded = ClientConfig::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.unwrap(), config);
    }
}
