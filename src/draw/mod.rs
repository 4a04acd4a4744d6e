//! Map content and its Cairo rendering.
//!
//! - [`Element`]: lines, pits and text labels, tagged by kind
//! - [`Document`]: ordered elements plus the camera (zoom and pan)
//! - [`CanvasSurface`]: the offscreen backing store the canvas paints into
//! - Rendering functions for the full map and its overlays

pub mod color;
pub mod document;
pub mod element;
pub mod font;
pub mod render;
pub mod surface;

pub use color::Color;
pub use document::{Document, TeamAssignment, ZoomLimits};
pub use element::{Element, ElementKind};
pub use font::FontDescriptor;
pub use render::{Overlay, ScoutingLook, render_map};
pub use surface::{CanvasSurface, SurfaceError};
