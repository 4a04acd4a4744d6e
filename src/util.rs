//! Geometry helpers shared by hit-testing, snapping, and the radial menu.
//!
//! This module provides:
//! - An axis-aligned [`Rect`] in logical canvas units
//! - Euclidean distance and grid snapping
//! - Polar placement used by the status menu

// ============================================================================
// Rectangles
// ============================================================================

/// Axis-aligned rectangle in logical canvas units.
///
/// Unlike dirty-region rectangles this one allows zero width or height: a
/// horizontal line has a perfectly valid bounding box of height 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle. Negative sizes are normalised so that
    /// `(x, y)` is always the top-left corner.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let (x, width) = if width < 0.0 {
            (x + width, -width)
        } else {
            (x, width)
        };
        let (y, height) = if height < 0.0 {
            (y + height, -height)
        } else {
            (y, height)
        };
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from min/max bounds.
    pub fn from_min_max(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns a copy grown by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    /// Inclusive containment test (points on the border count as inside).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

// ============================================================================
// Scalar Geometry
// ============================================================================

/// Euclidean distance between two points.
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
}

/// Rounds `value` to the nearest multiple of `grid_size`.
///
/// A non-positive grid size leaves the value untouched.
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Returns the point at `distance` from `(cx, cy)` along `angle_degrees`.
///
/// Angles follow screen conventions: 0° points right and positive angles
/// turn clockwise because the y axis grows downwards.
pub fn polar_offset(cx: f64, cy: f64, angle_degrees: f64, distance: f64) -> (f64, f64) {
    let angle = angle_degrees.to_radians();
    (cx + distance * angle.cos(), cy + distance * angle.sin())
}
