//! Library exports for the pit map canvas core.
//!
//! The canvas ([`PitMapCanvas`]) ties together the drawing model in [`draw`],
//! the edit-mode state machine in [`input`], and the scouting gesture engine
//! in [`scout`]. Map files are read and written through [`store`].

pub mod canvas;
pub mod config;
pub mod draw;
pub mod input;
pub mod scout;
pub mod store;
pub mod util;

pub use canvas::{CanvasEvent, CanvasMode, PitMapCanvas};
pub use config::Config;
