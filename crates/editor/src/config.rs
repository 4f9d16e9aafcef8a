use std::env;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tunables of the editing session.
///
/// Defaults reproduce the stock editor; a JSON file and `FLOORPLAN_*`
/// environment variables can override any field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub grid_unit: f64,
    pub grid_snap: bool,
    /// Viewer colour pulse length (seconds).
    pub flash_secs: f64,
    /// List row highlight length after a scene selection (seconds).
    pub list_highlight_secs: f64,
    /// Camera height above a focused object in the viewer.
    pub focus_height: f64,
    pub min_camera_distance: f64,
    pub max_camera_distance: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_unit: 1.0,
            grid_snap: true,
            flash_secs: 1.0,
            list_highlight_secs: 1.5,
            focus_height: 50.0,
            min_camera_distance: 10.0,
            max_camera_distance: 100.0,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "I/O error: {err}"),
            ConfigError::Parse(err) => write!(f, "Config parse error: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl EditorConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(payload).map_err(ConfigError::Parse)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let payload = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json_str(&payload)
    }

    /// Defaults overridden from the process environment.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Applies `FLOORPLAN_*` overrides read through `lookup`. Unparseable
    /// values are ignored.
    pub fn with_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let f64_var = |key: &str, default: f64| -> f64 {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };
        let bool_var = |key: &str, default: bool| -> bool {
            match lookup(key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
                Some("1" | "true" | "on" | "yes") => true,
                Some("0" | "false" | "off" | "no") => false,
                _ => default,
            }
        };

        Self {
            grid_unit: f64_var("FLOORPLAN_GRID_UNIT", self.grid_unit),
            grid_snap: bool_var("FLOORPLAN_GRID_SNAP", self.grid_snap),
            flash_secs: f64_var("FLOORPLAN_FLASH_SECS", self.flash_secs),
            list_highlight_secs: f64_var("FLOORPLAN_LIST_HIGHLIGHT_SECS", self.list_highlight_secs),
            focus_height: f64_var("FLOORPLAN_FOCUS_HEIGHT", self.focus_height),
            min_camera_distance: f64_var("FLOORPLAN_MIN_CAMERA_DISTANCE", self.min_camera_distance),
            max_camera_distance: f64_var("FLOORPLAN_MAX_CAMERA_DISTANCE", self.max_camera_distance),
        }
    }
}
