//! Configuration type definitions.

use super::enums::PitPlacement;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the appearance of new elements and how pits are placed.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Stroke color for new elements as a hex string (e.g. "#1976D2")
    #[serde(default = "default_color")]
    pub default_color: String,

    /// Stroke width for new elements in logical units (valid range: 0.5 - 20.0)
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Edge length of instantly placed pits (valid range: 10.0 - 500.0)
    #[serde(default = "default_pit_size")]
    pub pit_size: f64,

    /// Whether the pit tool places fixed-size pits or sizes them by dragging
    #[serde(default)]
    pub pit_placement: PitPlacement,

    /// Background grid spacing (valid range: 5.0 - 200.0)
    #[serde(default = "default_grid_size")]
    pub grid_size: f64,

    /// Round new pit anchors and line endpoints to the grid
    #[serde(default)]
    pub snap_to_grid: bool,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            stroke_width: default_stroke_width(),
            pit_size: default_pit_size(),
            pit_placement: PitPlacement::default(),
            grid_size: default_grid_size(),
            snap_to_grid: false,
        }
    }
}

/// Hit-testing and magnetic snapping distances.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct HitTestConfig {
    /// Slack around element bounds when grabbing (valid range: 0.0 - 50.0)
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// How close to an element's anchor the eraser must land (valid range: 1.0 - 100.0)
    #[serde(default = "default_eraser_radius")]
    pub eraser_radius: f64,

    /// Distance at which a dragged pit snaps onto nearby edges (valid range: 0.0 - 100.0)
    #[serde(default = "default_snap_threshold")]
    pub snap_threshold: f64,
}

impl Default for HitTestConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            eraser_radius: default_eraser_radius(),
            snap_threshold: default_snap_threshold(),
        }
    }
}

/// Camera zoom limits.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CameraConfig {
    /// Factor applied per zoom step (valid range: 1.01 - 4.0)
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,

    /// Minimum zoom (valid range: 0.1 - 1.0)
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,

    /// Maximum zoom (valid range: 1.0 - 10.0)
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom_step: default_zoom_step(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
        }
    }
}

/// Press-and-hold status menu settings for scouting mode.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GestureConfig {
    /// How long a press must be held before the menu appears (valid range: 50 - 2000)
    #[serde(default = "default_hold_delay_ms")]
    pub hold_delay_ms: u64,

    /// Distance from the hold point to each circle center (valid range: 20.0 - 200.0)
    #[serde(default = "default_menu_distance")]
    pub menu_distance: f64,

    /// Hit radius of each status circle (valid range: 8.0 - 100.0)
    #[serde(default = "default_circle_radius")]
    pub circle_radius: f64,

    /// Visual scale a hovered circle grows to (valid range: 1.0 - 2.0)
    #[serde(default = "default_hover_scale")]
    pub hover_scale: f64,

    /// Fraction of the remaining scale gap closed per 60 Hz frame (valid range: 0.01 - 1.0)
    #[serde(default = "default_hover_rate")]
    pub hover_rate: f64,

    /// Duration of the fade-out after release (valid range: 0 - 2000)
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            hold_delay_ms: default_hold_delay_ms(),
            menu_distance: default_menu_distance(),
            circle_radius: default_circle_radius(),
            hover_scale: default_hover_scale(),
            hover_rate: default_hover_rate(),
            fade_ms: default_fade_ms(),
        }
    }
}

/// Colors used to paint pits while scouting.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ScoutingConfig {
    /// Pits not yet visited
    #[serde(default = "default_not_visited_color")]
    pub not_visited_color: String,

    /// Pits marked done
    #[serde(default = "default_done_color")]
    pub done_color: String,

    /// Pits whose team was absent
    #[serde(default = "default_absent_color")]
    pub absent_color: String,
}

impl Default for ScoutingConfig {
    fn default() -> Self {
        Self {
            not_visited_color: default_not_visited_color(),
            done_color: default_done_color(),
            absent_color: default_absent_color(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> String {
    "#1976D2".to_string()
}

fn default_stroke_width() -> f64 {
    2.0
}

fn default_pit_size() -> f64 {
    50.0
}

fn default_grid_size() -> f64 {
    20.0
}

fn default_tolerance() -> f64 {
    5.0
}

fn default_eraser_radius() -> f64 {
    10.0
}

fn default_snap_threshold() -> f64 {
    10.0
}

fn default_zoom_step() -> f64 {
    1.2
}

fn default_min_zoom() -> f64 {
    0.5
}

fn default_max_zoom() -> f64 {
    3.0
}

fn default_hold_delay_ms() -> u64 {
    200
}

fn default_menu_distance() -> f64 {
    50.0
}

fn default_circle_radius() -> f64 {
    22.0
}

fn default_hover_scale() -> f64 {
    1.1
}

fn default_hover_rate() -> f64 {
    0.2
}

fn default_fade_ms() -> u64 {
    300
}

fn default_not_visited_color() -> String {
    "#EF4444".to_string()
}

fn default_done_color() -> String {
    "#22C55E".to_string()
}

fn default_absent_color() -> String {
    "#EAB308".to_string()
}
