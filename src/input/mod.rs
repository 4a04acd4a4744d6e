//! Input handling and the editing state machine.
//!
//! This module normalizes pointer and touch input, maps client positions onto
//! the canvas, and drives the edit-mode state machine (tool selection,
//! element construction, drag-move with snapping, erase).

pub mod coords;
pub mod events;
pub mod state;
pub mod tool;
pub mod touch;

pub use coords::CoordinateMapper;
pub use events::{InputEvent, PointerEvent, TouchPoint};
pub use state::{EditState, EditorEvent, EditorHost, EditorSettings, EditorState};
pub use tool::Tool;
pub use touch::TouchAdapter;
