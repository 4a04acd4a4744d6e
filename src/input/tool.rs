//! Editing tool selection.

use std::fmt;
use std::str::FromStr;

/// Editing tool selection.
///
/// The active tool decides what a press on the canvas does. Tools are
/// mutually exclusive and switching resets any in-progress action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tool {
    /// Axis-aligned wall or aisle line (press, drag, release)
    #[default]
    Line,
    /// Pit placement; pressing an existing pit drags it instead
    Pit,
    /// Text label placed at the press point after a prompt
    Text,
    /// Removes the element whose anchor is under the press
    Eraser,
    /// Moves any element
    Grab,
}

impl Tool {
    pub const ALL: [Tool; 5] = [Tool::Line, Tool::Pit, Tool::Text, Tool::Eraser, Tool::Grab];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Line => "line",
            Tool::Pit => "pit",
            Tool::Text => "text",
            Tool::Eraser => "eraser",
            Tool::Grab => "grab",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tool '{s}'"))
    }
}
