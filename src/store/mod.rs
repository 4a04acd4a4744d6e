//! Pit map files.
//!
//! A stored map wraps the canvas document with its name, competition and a
//! copy of the team assignments. Maps are written to disk with locking and an
//! atomic rename, and can be exported to / imported from standalone JSON.

mod file;
mod map;

pub use file::{load_map, save_map};
pub use map::{
    IMPORTED_SUFFIX, MapFileError, StoredAssignment, StoredPitMap, export_map, import_map,
};
