//! Configuration enum types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the pit tool creates new pits.
///
/// Instant placement drops a fixed-size pit centered on the click. Drag
/// placement is the older behavior where the pit is sized by dragging.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PitPlacement {
    /// Fixed-size pit centered on the pointer (default)
    #[default]
    Instant,
    /// Press-drag-release rectangle
    Drag,
}
