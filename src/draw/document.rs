//! The pit map document: ordered elements plus the camera.

use super::element::{Element, ElementKind};
use serde::{Deserialize, Deserializer, Serialize};

/// Zoom stepping and clamping limits for the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    /// Factor applied per zoom-in / divided per zoom-out step
    pub step: f64,
    /// Smallest allowed zoom
    pub min: f64,
    /// Largest allowed zoom
    pub max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            step: 1.2,
            min: 0.5,
            max: 3.0,
        }
    }
}

/// One team-to-pit assignment derived from the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAssignment {
    pub team_number: u32,
    pub pit_id: String,
    pub x: f64,
    pub y: f64,
}

/// Container for everything drawn on one pit map.
///
/// Element order is paint order: the first element is the bottom layer and
/// the last one is drawn on top. Hit-testing therefore walks the list in
/// reverse so the topmost element wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// All elements in draw order
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Camera scale (always > 0)
    #[serde(default = "default_zoom", deserialize_with = "positive_zoom")]
    pub zoom: f64,
    /// Camera translation applied after scaling
    #[serde(default)]
    pub pan_x: f64,
    #[serde(default)]
    pub pan_y: f64,
}

fn default_zoom() -> f64 {
    1.0
}

fn positive_zoom<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let zoom = f64::deserialize(deserializer)?;
    if zoom.is_finite() && zoom > 0.0 {
        Ok(zoom)
    } else {
        log::warn!("Invalid stored zoom {zoom}, resetting to 1");
        Ok(default_zoom())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document with the default camera.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    /// Drops every element and resets the camera.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Appends an element on top of everything else.
    pub fn add(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Removes the element with `id`, returning it.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.id() == id)?;
        Some(self.elements.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Finds the topmost element containing `(x, y)` within `tolerance`.
    ///
    /// With `pits_only` set, lines and text are skipped.
    pub fn hit_test(&self, x: f64, y: f64, tolerance: f64, pits_only: bool) -> Option<&Element> {
        self.elements
            .iter()
            .rev()
            .filter(|e| !pits_only || e.is_pit())
            .find(|e| e.contains_point(x, y, tolerance))
    }

    /// Finds the topmost pit whose rectangle strictly covers `(x, y)`.
    ///
    /// With `assigned_only` set, pits without a team are skipped.
    pub fn pit_at(&self, x: f64, y: f64, assigned_only: bool) -> Option<&Element> {
        self.elements
            .iter()
            .rev()
            .filter(|e| e.is_pit())
            .filter(|e| !assigned_only || e.team_number().is_some())
            .find(|e| e.contains_point(x, y, 0.0))
    }

    /// Finds the first element (in insertion order) whose anchor is within
    /// `radius` of `(x, y)` on both axes.
    pub fn element_near_anchor(&self, x: f64, y: f64, radius: f64) -> Option<&Element> {
        self.elements.iter().find(|e| e.anchor_near(x, y, radius))
    }

    /// Assigns `team` to the pit `pit_id`, first clearing it from any other pit.
    ///
    /// Returns `false` (and changes nothing) when `pit_id` is not a pit.
    pub fn assign_team(&mut self, pit_id: &str, team: u32) -> bool {
        if !self.get(pit_id).is_some_and(Element::is_pit) {
            return false;
        }

        for element in &mut self.elements {
            if element.team_number() == Some(team) {
                element.set_team_number(None);
            }
        }

        self.get_mut(pit_id)
            .is_some_and(|pit| pit.set_team_number(Some(team)))
    }

    /// Pulls `(x, y)` onto nearby pit edges and line endpoints.
    ///
    /// Each axis is resolved independently: the first pit or line (in
    /// insertion order, skipping `exclude_id`) with an edge within `threshold`
    /// of the candidate supplies the exact value for that axis.
    pub fn snap_to_nearby(
        &self,
        x: f64,
        y: f64,
        exclude_id: Option<&str>,
        threshold: f64,
    ) -> (f64, f64) {
        let mut snapped_x = None;
        let mut snapped_y = None;

        for element in &self.elements {
            if exclude_id == Some(element.id()) {
                continue;
            }
            let (xs, ys) = match element.kind {
                ElementKind::Pit {
                    start_x,
                    start_y,
                    width,
                    height,
                    ..
                } => (
                    [start_x, start_x + width],
                    [start_y, start_y + height],
                ),
                ElementKind::Line {
                    start_x,
                    start_y,
                    end_x,
                    end_y,
                    ..
                } => ([start_x, end_x], [start_y, end_y]),
                ElementKind::Text { .. } => continue,
            };

            if snapped_x.is_none() {
                snapped_x = xs.into_iter().find(|edge| (x - edge).abs() <= threshold);
            }
            if snapped_y.is_none() {
                snapped_y = ys.into_iter().find(|edge| (y - edge).abs() <= threshold);
            }
            if snapped_x.is_some() && snapped_y.is_some() {
                break;
            }
        }

        (snapped_x.unwrap_or(x), snapped_y.unwrap_or(y))
    }

    /// Multiplies the zoom by one step, clamped to the limits.
    pub fn zoom_in(&mut self, limits: &ZoomLimits) {
        self.zoom = (self.zoom * limits.step).clamp(limits.min, limits.max);
    }

    /// Divides the zoom by one step, clamped to the limits.
    pub fn zoom_out(&mut self, limits: &ZoomLimits) {
        self.zoom = (self.zoom / limits.step).clamp(limits.min, limits.max);
    }

    /// Scales the zoom by an arbitrary factor (pinch), clamped on both ends.
    pub fn zoom_by(&mut self, factor: f64, limits: &ZoomLimits) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.zoom = (self.zoom * factor).clamp(limits.min, limits.max);
    }

    /// Restores zoom 1 and pan (0, 0) without touching elements.
    pub fn reset_view(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    /// Lists every current team assignment in element order.
    pub fn team_assignments(&self) -> Vec<TeamAssignment> {
        self.elements
            .iter()
            .filter_map(|e| {
                let team_number = e.team_number()?;
                let (x, y) = e.anchor();
                Some(TeamAssignment {
                    team_number,
                    pit_id: e.id().to_string(),
                    x,
                    y,
                })
            })
            .collect()
    }
}
