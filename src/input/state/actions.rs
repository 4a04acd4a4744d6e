use serde::{Deserialize, Deserializer, de};

use crate::draw::Document;

use super::{EditorEvent, EditorHost, EditorState};

/// Payload dragged in from the team roster, e.g. `{"teamNumber": 254}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamDropPayload {
    #[serde(deserialize_with = "whole_team_number")]
    team_number: u32,
}

/// Accepts `254` as well as `254.0`; fractions and out-of-range numbers are rejected.
fn whole_team_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value) {
        Ok(value as u32)
    } else {
        Err(de::Error::custom(format!("invalid team number {value}")))
    }
}

impl EditorState {
    /// Multiplies the zoom by one step, up to the configured maximum.
    pub fn zoom_in(&mut self) {
        let limits = self.settings().zoom;
        self.document.zoom_in(&limits);
        self.notify_document_changed();
    }

    /// Divides the zoom by one step, down to the configured minimum.
    pub fn zoom_out(&mut self) {
        let limits = self.settings().zoom;
        self.document.zoom_out(&limits);
        self.notify_document_changed();
    }

    /// Applies a pinch ratio to the zoom.
    pub fn zoom_by(&mut self, factor: f64) {
        let limits = self.settings().zoom;
        let before = self.document.zoom;
        self.document.zoom_by(factor, &limits);
        if self.document.zoom != before {
            self.notify_document_changed();
        }
    }

    /// Zoom 1, pan (0, 0).
    pub fn reset_view(&mut self) {
        self.document.reset_view();
        self.notify_document_changed();
    }

    /// Empties the map after the host confirms. Returns true if cleared.
    pub fn clear(&mut self, host: &mut dyn EditorHost) -> bool {
        if !host.confirm_clear() {
            log::debug!("Clear cancelled");
            return false;
        }
        log::info!("Clearing map ({} elements)", self.document.len());
        self.reset();
        self.document = Document::new();
        self.notify_document_changed();
        true
    }

    /// Assigns the team in a dropped roster payload to the pit under `(x, y)`.
    ///
    /// The team is first cleared from any pit that already holds it. A payload
    /// without a usable team number, or a drop that misses every pit, changes
    /// nothing. Returns true if an assignment was made.
    pub fn drop_team(&mut self, x: f64, y: f64, payload: &str) -> bool {
        let team_number = match serde_json::from_str::<TeamDropPayload>(payload) {
            Ok(TeamDropPayload { team_number }) if team_number > 0 => team_number,
            Ok(_) => {
                log::warn!("Ignoring team drop without a team number");
                return false;
            }
            Err(err) => {
                log::warn!("Ignoring malformed team drop payload: {err}");
                return false;
            }
        };

        let Some(pit_id) = self
            .document
            .pit_at(x, y, false)
            .map(|pit| pit.id().to_string())
        else {
            log::debug!("Team {team_number} dropped outside any pit");
            return false;
        };

        if !self.document.assign_team(&pit_id, team_number) {
            return false;
        }

        log::info!("Team {team_number} assigned to pit {pit_id}");
        self.notify_document_changed();
        self.push_event(EditorEvent::TeamAssigned {
            pit_id,
            team_number,
        });
        true
    }
}
