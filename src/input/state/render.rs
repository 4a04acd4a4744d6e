use crate::draw::{Element, Overlay};

use super::{EditState, EditorState};

impl EditorState {
    /// Returns the element being built for live preview.
    ///
    /// # Returns
    /// - `Some(&Element)` while drawing a line or drag-sized pit
    /// - `None` when idle or dragging (dragged elements are already in the
    ///   document)
    pub fn provisional_element(&self) -> Option<&Element> {
        match &self.state {
            EditState::Drawing { element, .. } => Some(element),
            _ => None,
        }
    }

    /// Transient content for the render pass.
    pub fn overlay(&self) -> Overlay<'_> {
        Overlay {
            provisional: self.provisional_element(),
            ..Overlay::default()
        }
    }
}
