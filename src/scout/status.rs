//! Per-pit visit status for a scouting session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ScoutingConfig;
use crate::draw::color::{Color, STATUS_GREEN, STATUS_RED, STATUS_YELLOW};
use crate::draw::Document;

/// Where a team's pit stands in the scouting round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PitStatus {
    #[default]
    NotVisited,
    Done,
    Absent,
}

impl PitStatus {
    pub fn label(self) -> &'static str {
        match self {
            PitStatus::NotVisited => "not visited",
            PitStatus::Done => "done",
            PitStatus::Absent => "absent",
        }
    }
}

/// Emitted when a hold gesture commits a new status for a pit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub pit_id: String,
    pub team_number: u32,
    pub status: PitStatus,
}

/// Counts shown in the scouting progress header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoutingStats {
    pub total: usize,
    pub done: usize,
    pub absent: usize,
    pub not_visited: usize,
}

/// Pit id → status, owned by the scouting session.
///
/// Serialized as a flat JSON object, e.g. `{"a1b2": "done"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusMap {
    statuses: BTreeMap<String, PitStatus>,
}

impl StatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every assigned pit in `doc` starts out not visited.
    pub fn seeded_from(doc: &Document) -> Self {
        let statuses = doc
            .elements
            .iter()
            .filter(|element| element.is_pit() && element.team_number().is_some())
            .map(|element| (element.id().to_string(), PitStatus::NotVisited))
            .collect();
        Self { statuses }
    }

    /// Keeps statuses from `previous` for pits that are still present.
    pub fn merge_from(&mut self, previous: &StatusMap) {
        for (pit_id, status) in self.statuses.iter_mut() {
            if let Some(old) = previous.statuses.get(pit_id) {
                *status = *old;
            }
        }
    }

    /// Unknown pits read as not visited.
    pub fn get(&self, pit_id: &str) -> PitStatus {
        self.statuses.get(pit_id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, pit_id: impl Into<String>, status: PitStatus) {
        self.statuses.insert(pit_id.into(), status);
    }

    pub fn apply(&mut self, change: &StatusChange) {
        log::debug!(
            "Team {} (pit {}) marked {}",
            change.team_number,
            change.pit_id,
            change.status.label()
        );
        self.set(change.pit_id.clone(), change.status);
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, PitStatus)> {
        self.statuses
            .iter()
            .map(|(pit_id, status)| (pit_id.as_str(), *status))
    }

    pub fn stats(&self) -> ScoutingStats {
        let mut stats = ScoutingStats {
            total: self.statuses.len(),
            ..ScoutingStats::default()
        };
        for status in self.statuses.values() {
            match status {
                PitStatus::NotVisited => stats.not_visited += 1,
                PitStatus::Done => stats.done += 1,
                PitStatus::Absent => stats.absent += 1,
            }
        }
        stats
    }
}

/// Fill and outline colors per status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusPalette {
    pub not_visited: Color,
    pub done: Color,
    pub absent: Color,
}

impl Default for StatusPalette {
    fn default() -> Self {
        Self {
            not_visited: STATUS_RED,
            done: STATUS_GREEN,
            absent: STATUS_YELLOW,
        }
    }
}

impl From<&ScoutingConfig> for StatusPalette {
    fn from(cfg: &ScoutingConfig) -> Self {
        Self {
            not_visited: Color::from_hex_or(&cfg.not_visited_color, STATUS_RED),
            done: Color::from_hex_or(&cfg.done_color, STATUS_GREEN),
            absent: Color::from_hex_or(&cfg.absent_color, STATUS_YELLOW),
        }
    }
}

impl StatusPalette {
    pub fn color_for(&self, status: PitStatus) -> Color {
        match status {
            PitStatus::NotVisited => self.not_visited,
            PitStatus::Done => self.done,
            PitStatus::Absent => self.absent,
        }
    }
}
