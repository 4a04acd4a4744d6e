use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::draw::element::generate_id;
use crate::draw::Document;

/// Suffix appended to the name of every imported map.
pub const IMPORTED_SUFFIX: &str = " (Imported)";

/// Raised when an exported map is missing something it cannot do without.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapFileError {
    #[error("invalid pit map format: missing {0}")]
    MissingField(&'static str),

    #[error("invalid pit map format: expected a JSON object")]
    NotAnObject,
}

/// Team assignment as recorded alongside a stored map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAssignment {
    pub team_number: u32,
    #[serde(default)]
    pub pit_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// A pit map as saved to disk and exchanged by export/import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPitMap {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub competition_key: String,
    #[serde(default)]
    pub competition_name: String,
    pub canvas_data: Document,
    #[serde(default)]
    pub team_assignments: Vec<StoredAssignment>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl StoredPitMap {
    /// Wraps a document in a new stored map with a fresh id and timestamps.
    pub fn new(
        name: impl Into<String>,
        competition_key: impl Into<String>,
        competition_name: impl Into<String>,
        canvas_data: Document,
    ) -> Self {
        let now = Utc::now().to_rfc3339();
        let mut map = Self {
            id: generate_id(),
            name: name.into(),
            competition_key: competition_key.into(),
            competition_name: competition_name.into(),
            canvas_data,
            team_assignments: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        };
        map.refresh_assignments();
        map
    }

    /// Replaces the document and bumps `updated_at`.
    pub fn update_canvas(&mut self, canvas_data: Document) {
        self.canvas_data = canvas_data;
        self.refresh_assignments();
        self.updated_at = Utc::now().to_rfc3339();
    }

    /// Rebuilds the assignment list from the pits in the document.
    pub fn refresh_assignments(&mut self) {
        self.team_assignments = self
            .canvas_data
            .team_assignments()
            .into_iter()
            .map(|assignment| StoredAssignment {
                team_number: assignment.team_number,
                pit_location: format!("Pit {}", assignment.team_number),
                x: Some(assignment.x),
                y: Some(assignment.y),
            })
            .collect();
    }
}

/// Serializes a map as pretty-printed JSON.
pub fn export_map(map: &StoredPitMap) -> Result<String> {
    serde_json::to_string_pretty(map).context("failed to serialise pit map")
}

/// Parses an exported map and turns it into a new local map.
///
/// `name`, `canvasData` and `competitionKey` must be present and non-empty.
/// The result gets a new id, fresh timestamps, and `" (Imported)"` appended
/// to its name.
pub fn import_map(json: &str) -> Result<StoredPitMap> {
    let value: Value = serde_json::from_str(json).context("failed to parse pit map JSON")?;
    validate_exported(&value)?;

    let imported: StoredPitMap =
        serde_json::from_value(value).context("failed to read pit map contents")?;

    let now = Utc::now().to_rfc3339();
    let map = StoredPitMap {
        id: generate_id(),
        name: format!("{}{}", imported.name, IMPORTED_SUFFIX),
        created_at: now.clone(),
        updated_at: now,
        ..imported
    };
    log::info!(
        "Imported pit map '{}' ({} elements)",
        map.name,
        map.canvas_data.len()
    );
    Ok(map)
}

fn validate_exported(value: &Value) -> Result<(), MapFileError> {
    let object = value.as_object().ok_or(MapFileError::NotAnObject)?;

    let present = |key: &str| match object.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    };

    if !present("name") {
        return Err(MapFileError::MissingField("name"));
    }
    if !present("canvasData") {
        return Err(MapFileError::MissingField("canvasData"));
    }
    if !present("competitionKey") {
        return Err(MapFileError::MissingField("competitionKey"));
    }
    Ok(())
}
