//! Scouting mode: per-pit visit status and the hold gesture that sets it.

mod gesture;
mod menu;
mod status;
#[cfg(test)]
mod tests;

pub use gesture::{GestureEngine, GesturePhase, GestureSettings, GestureTarget};
pub use menu::{MenuChoice, RadialMenu, StatusCircle};
pub use status::{PitStatus, ScoutingStats, StatusChange, StatusMap, StatusPalette};
