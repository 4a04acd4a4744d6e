//! Element definitions for pit maps.

use super::color::{Color, MAP_BLUE};
use crate::util::Rect;
use serde::{Deserialize, Deserializer, Serialize};

/// Approximate advance of one glyph, used for text hit-testing.
pub const TEXT_GLYPH_WIDTH: f64 = 8.0;
/// Line height of text elements; the box sits above the baseline.
pub const TEXT_LINE_HEIGHT: f64 = 16.0;
/// Stroke width applied when a stored element omits one.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// A single primitive on the pit map.
///
/// The `id` is assigned once at creation and never changes; everything else
/// lives in [`ElementKind`]. On the wire the two are flattened into one object
/// discriminated by `type`, e.g.
/// `{"id":"..","type":"pit","startX":0,"startY":0,"width":50,"height":50,...}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    id: String,
    #[serde(flatten)]
    pub kind: ElementKind,
}

/// The drawable payload of an [`Element`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// Straight wall or aisle marker between two points
    #[serde(rename_all = "camelCase")]
    Line {
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
        #[serde(default = "default_color", deserialize_with = "lenient_color")]
        color: Color,
        #[serde(default = "default_stroke_width")]
        stroke_width: f64,
    },
    /// Rectangular team workspace, optionally assigned to a team
    #[serde(rename_all = "camelCase")]
    Pit {
        start_x: f64,
        start_y: f64,
        #[serde(default)]
        width: f64,
        #[serde(default)]
        height: f64,
        #[serde(default = "default_color", deserialize_with = "lenient_color")]
        color: Color,
        #[serde(default = "default_stroke_width")]
        stroke_width: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        team_number: Option<u32>,
    },
    /// Free text label; `(start_x, start_y)` is the baseline origin
    #[serde(rename_all = "camelCase")]
    Text {
        start_x: f64,
        start_y: f64,
        #[serde(default)]
        text: String,
        #[serde(default = "default_color", deserialize_with = "lenient_color")]
        color: Color,
        #[serde(default = "default_stroke_width")]
        stroke_width: f64,
    },
}

fn default_color() -> Color {
    MAP_BLUE
}

/// Stored colors that fail to parse fall back to the default with a warning
/// instead of rejecting the whole map.
fn lenient_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let hex = String::deserialize(deserializer)?;
    Ok(Color::from_hex_or(&hex, MAP_BLUE))
}

fn default_stroke_width() -> f64 {
    DEFAULT_STROKE_WIDTH
}

impl Element {
    /// Wraps a payload with a freshly generated id.
    pub fn new(kind: ElementKind) -> Self {
        Self::with_id(generate_id(), kind)
    }

    /// Wraps a payload with an explicit id (used when loading stored maps).
    pub fn with_id(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Zero-length line anchored at `(x, y)`.
    pub fn line(x: f64, y: f64, color: Color, stroke_width: f64) -> Self {
        Self::new(ElementKind::Line {
            start_x: x,
            start_y: y,
            end_x: x,
            end_y: y,
            color,
            stroke_width,
        })
    }

    /// Unassigned pit with its top-left corner at `(x, y)`.
    pub fn pit(x: f64, y: f64, width: f64, height: f64, color: Color, stroke_width: f64) -> Self {
        Self::new(ElementKind::Pit {
            start_x: x,
            start_y: y,
            width,
            height,
            color,
            stroke_width,
            team_number: None,
        })
    }

    /// Text label with its baseline origin at `(x, y)`.
    pub fn text(x: f64, y: f64, text: String, color: Color, stroke_width: f64) -> Self {
        Self::new(ElementKind::Text {
            start_x: x,
            start_y: y,
            text,
            color,
            stroke_width,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_pit(&self) -> bool {
        matches!(self.kind, ElementKind::Pit { .. })
    }

    pub fn is_line(&self) -> bool {
        matches!(self.kind, ElementKind::Line { .. })
    }

    /// Team assigned to this pit, if any. Always `None` for other kinds.
    pub fn team_number(&self) -> Option<u32> {
        match self.kind {
            ElementKind::Pit { team_number, .. } => team_number,
            _ => None,
        }
    }

    /// Sets or clears the team assignment. Returns `false` for non-pit elements.
    pub fn set_team_number(&mut self, team: Option<u32>) -> bool {
        match &mut self.kind {
            ElementKind::Pit { team_number, .. } => {
                *team_number = team;
                true
            }
            _ => false,
        }
    }

    pub fn color(&self) -> Color {
        match self.kind {
            ElementKind::Line { color, .. }
            | ElementKind::Pit { color, .. }
            | ElementKind::Text { color, .. } => color,
        }
    }

    /// The stored anchor point (`startX`, `startY`).
    pub fn anchor(&self) -> (f64, f64) {
        match self.kind {
            ElementKind::Line {
                start_x, start_y, ..
            }
            | ElementKind::Pit {
                start_x, start_y, ..
            }
            | ElementKind::Text {
                start_x, start_y, ..
            } => (start_x, start_y),
        }
    }

    /// Moves the anchor to `(x, y)`.
    ///
    /// Lines move rigidly (both endpoints shift by the same delta); every other
    /// field, including a pit's team assignment, is left untouched.
    pub fn move_anchor_to(&mut self, x: f64, y: f64) {
        match &mut self.kind {
            ElementKind::Line {
                start_x,
                start_y,
                end_x,
                end_y,
                ..
            } => {
                let dx = x - *start_x;
                let dy = y - *start_y;
                *start_x = x;
                *start_y = y;
                *end_x += dx;
                *end_y += dy;
            }
            ElementKind::Pit {
                start_x, start_y, ..
            }
            | ElementKind::Text {
                start_x, start_y, ..
            } => {
                *start_x = x;
                *start_y = y;
            }
        }
    }

    /// Returns the axis-aligned box used for hit-testing.
    ///
    /// Text has no measured extent here; its box is approximated from the
    /// character count and a fixed line height sitting above the baseline.
    pub fn bounding_box(&self) -> Rect {
        match &self.kind {
            ElementKind::Line {
                start_x,
                start_y,
                end_x,
                end_y,
                ..
            } => Rect::from_min_max(
                start_x.min(*end_x),
                start_y.min(*end_y),
                start_x.max(*end_x),
                start_y.max(*end_y),
            ),
            ElementKind::Pit {
                start_x,
                start_y,
                width,
                height,
                ..
            } => Rect::new(*start_x, *start_y, *width, *height),
            ElementKind::Text {
                start_x,
                start_y,
                text,
                ..
            } => Rect::new(
                *start_x,
                *start_y - TEXT_LINE_HEIGHT,
                text.chars().count() as f64 * TEXT_GLYPH_WIDTH,
                TEXT_LINE_HEIGHT,
            ),
        }
    }

    /// True when `(x, y)` lies within the bounding box grown by `tolerance`.
    pub fn contains_point(&self, x: f64, y: f64, tolerance: f64) -> bool {
        self.bounding_box().inflate(tolerance).contains(x, y)
    }

    /// True when `(x, y)` lies within `radius` of the anchor on both axes.
    pub fn anchor_near(&self, x: f64, y: f64, radius: f64) -> bool {
        let (ax, ay) = self.anchor();
        (ax - x).abs() < radius && (ay - y).abs() < radius
    }
}

/// Generates a unique element id.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
