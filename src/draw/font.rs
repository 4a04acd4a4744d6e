//! Font descriptor for map labels.

/// Font configuration for text rendering.
///
/// Describes which font to use for a label: family name, weight, and an
/// absolute pixel size. Pit labels, free text, and menu captions each use
/// their own descriptor so preview and committed text always match.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Arial")
    pub family: String,

    /// Font weight (e.g., "normal", "bold")
    pub weight: String,

    /// Absolute size in logical pixels
    pub size: f64,
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(family: impl Into<String>, weight: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            weight: weight.into(),
            size,
        }
    }

    /// Free text elements (16px, regular).
    pub fn text_element() -> Self {
        Self::new("Sans", "normal", 16.0)
    }

    /// "Team N" caption inside pits while editing (14px, regular).
    pub fn pit_label() -> Self {
        Self::new("Sans", "normal", 14.0)
    }

    /// Bare team number inside pits while scouting (10px, bold).
    pub fn scouting_label() -> Self {
        Self::new("Sans", "bold", 10.0)
    }

    /// Status menu captions (11px, bold).
    pub fn menu_label() -> Self {
        Self::new("Sans", "bold", 11.0)
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Weight Sizepx"
    /// Example: "Sans Bold 10px" or "Sans 16px"
    pub fn to_pango_string(&self) -> String {
        let mut parts = vec![self.family.clone()];

        if self.weight.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}px", self.size.round() as i32));

        parts.join(" ")
    }
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
