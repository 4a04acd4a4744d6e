//! Configuration file support for pitmap.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/pitmap/config.toml`. Settings include element defaults,
//! hit-test distances, camera limits, and the scouting gesture timings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::PitPlacement;
pub use types::{CameraConfig, DrawingConfig, GestureConfig, HitTestConfig, ScoutingConfig};

use crate::draw::Color;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "#1976D2"
/// pit_size = 50.0
/// pit_placement = "instant"
///
/// [camera]
/// zoom_step = 1.2
/// max_zoom = 3.0
///
/// [gesture]
/// hold_delay_ms = 200
/// fade_ms = 300
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Element defaults and pit placement
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Hit-test tolerances and snapping distances
    #[serde(default)]
    pub hit_test: HitTestConfig,

    /// Zoom step and limits
    #[serde(default)]
    pub camera: CameraConfig,

    /// Scouting hold gesture and radial menu
    #[serde(default)]
    pub gesture: GestureConfig,

    /// Scouting status colors
    #[serde(default)]
    pub scouting: ScoutingConfig,
}

fn clamp_f64(name: &str, value: &mut f64, min: f64, max: f64) {
    if !(min..=max).contains(&*value) {
        log::warn!("Invalid {name} {value:.2}, clamping to {min}-{max} range");
        *value = if value.is_nan() {
            min
        } else {
            (*value).clamp(min, max)
        };
    }
}

fn clamp_u64(name: &str, value: &mut u64, min: u64, max: u64) {
    if !(min..=max).contains(&*value) {
        log::warn!("Invalid {name} {value}, clamping to {min}-{max} range");
        *value = (*value).clamp(min, max);
    }
}

fn validate_color(name: &str, value: &mut String, fallback: &str) {
    if value.parse::<Color>().is_err() {
        log::warn!("Invalid {name} '{value}', falling back to '{fallback}'");
        *value = fallback.to_string();
    }
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or reset to the
    /// default for colors) and a warning is logged.
    pub fn validate_and_clamp(&mut self) {
        let drawing = &mut self.drawing;
        validate_color("default_color", &mut drawing.default_color, "#1976D2");
        clamp_f64("stroke_width", &mut drawing.stroke_width, 0.5, 20.0);
        clamp_f64("pit_size", &mut drawing.pit_size, 10.0, 500.0);
        clamp_f64("grid_size", &mut drawing.grid_size, 5.0, 200.0);

        let hit = &mut self.hit_test;
        clamp_f64("tolerance", &mut hit.tolerance, 0.0, 50.0);
        clamp_f64("eraser_radius", &mut hit.eraser_radius, 1.0, 100.0);
        clamp_f64("snap_threshold", &mut hit.snap_threshold, 0.0, 100.0);

        let camera = &mut self.camera;
        clamp_f64("zoom_step", &mut camera.zoom_step, 1.01, 4.0);
        clamp_f64("min_zoom", &mut camera.min_zoom, 0.1, 1.0);
        clamp_f64("max_zoom", &mut camera.max_zoom, 1.0, 10.0);

        let gesture = &mut self.gesture;
        clamp_u64("hold_delay_ms", &mut gesture.hold_delay_ms, 50, 2000);
        clamp_f64("menu_distance", &mut gesture.menu_distance, 20.0, 200.0);
        clamp_f64("circle_radius", &mut gesture.circle_radius, 8.0, 100.0);
        clamp_f64("hover_scale", &mut gesture.hover_scale, 1.0, 2.0);
        clamp_f64("hover_rate", &mut gesture.hover_rate, 0.01, 1.0);
        clamp_u64("fade_ms", &mut gesture.fade_ms, 0, 2000);

        let scouting = &mut self.scouting;
        validate_color("not_visited_color", &mut scouting.not_visited_color, "#EF4444");
        validate_color("done_color", &mut scouting.done_color, "#22C55E");
        validate_color("absent_color", &mut scouting.absent_color, "#EAB308");
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/pitmap/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("pitmap");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file is absent.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the config to TOML and writes it to `config_path`,
    /// creating the parent directory if needed.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }
}
