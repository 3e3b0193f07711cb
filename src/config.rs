use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "wastewater-map.toml";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub terminals: TerminalConfig,
    pub map: MapConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InputConfig {
    pub plants: PathBuf,
    /// GeoJSON override for the built-in region outline
    pub geometry: Option<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            plants: PathBuf::from("plants.txt"),
            geometry: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub measurement_log: PathBuf,
    pub diagnostics_log: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            measurement_log: PathBuf::from("ppp-logs.txt"),
            diagnostics_log: PathBuf::from("wastewater-map.log"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TerminalConfig {
    /// Number of plants that get an entry form
    pub count: usize,
    pub cooldown_secs: u64,
}

impl TerminalConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            count: 3,
            cooldown_secs: 10,
        }
    }
}

/// Reference canvas and marker parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
    /// Map width in reference pixels, margin excluded
    pub width: f64,
    /// Map height in reference pixels, margin excluded
    pub height: f64,
    pub margin: f64,
    pub marker_size: i32,
    /// Total value at which a marker turns fully red
    pub max_threshold: f64,
    pub legend: LegendConfig,
}

impl MapConfig {
    pub fn reference_width(&self) -> f64 {
        self.width + 2.0 * self.margin
    }

    pub fn reference_height(&self) -> f64 {
        self.height + 2.0 * self.margin
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            min_lon: 7.4,
            max_lon: 10.6,
            min_lat: 47.4,
            max_lat: 49.9,
            width: 753.0,
            height: 868.0,
            margin: 5.0,
            marker_size: 20,
            max_threshold: 500.0,
            legend: LegendConfig::default(),
        }
    }
}

/// Legend gradient rectangle in reference pixels
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct LegendConfig {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            x: 690.0,
            y: 550.0,
            width: 50.0,
            height: 280.0,
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;
        Ok(config)
    }

    /// Load the config file if present, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}
