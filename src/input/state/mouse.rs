use crate::config::PitPlacement;
use crate::draw::{Element, ElementKind};
use crate::input::tool::Tool;
use crate::util;

use super::{EditState, EditorHost, EditorState};

impl EditorState {
    /// Processes a pointer press.
    ///
    /// # Arguments
    /// * `x` - Pointer X in canvas coordinates
    /// * `y` - Pointer Y in canvas coordinates
    /// * `host` - Answers the text prompt for the text tool
    ///
    /// # Behavior
    /// - Pit / Grab: grabbing an existing element starts a drag (pit only
    ///   grabs pits); a miss places a new pit (Pit) or does nothing (Grab)
    /// - Line: starts a zero-length line at the pointer
    /// - Text: prompts for text and places it immediately
    /// - Eraser: removes the first element whose anchor is near the pointer
    ///
    /// Presses are ignored while a previous press is still in progress.
    pub fn on_pointer_down(&mut self, x: f64, y: f64, host: &mut dyn EditorHost) {
        if !matches!(self.state, EditState::Idle) {
            log::debug!("Ignoring press while {:?} is in progress", self.tool);
            return;
        }

        match self.tool {
            Tool::Pit | Tool::Grab => {
                let pits_only = self.tool == Tool::Pit;
                let tolerance = self.settings().tolerance;
                if let Some(hit) = self.document.hit_test(x, y, tolerance, pits_only) {
                    let (ax, ay) = hit.anchor();
                    log::debug!("Grabbed element {}", hit.id());
                    self.state = EditState::Dragging {
                        id: hit.id().to_string(),
                        offset_x: x - ax,
                        offset_y: y - ay,
                    };
                } else if self.tool == Tool::Pit {
                    self.start_pit(x, y);
                }
            }
            Tool::Line => {
                let (x, y) = self.grid_point(x, y);
                let settings = self.settings();
                self.state = EditState::Drawing {
                    element: Element::line(x, y, settings.color, settings.stroke_width),
                    origin_x: x,
                    origin_y: y,
                };
                self.needs_redraw = true;
            }
            Tool::Text => match host.prompt_text() {
                Some(text) if !text.is_empty() => {
                    let settings = self.settings();
                    let element = Element::text(x, y, text, settings.color, settings.stroke_width);
                    self.document.add(element);
                    self.notify_document_changed();
                }
                _ => log::debug!("Text prompt cancelled; nothing placed"),
            },
            Tool::Eraser => {
                let radius = self.settings().eraser_radius;
                let target = self
                    .document
                    .element_near_anchor(x, y, radius)
                    .map(|element| element.id().to_string());
                if let Some(id) = target {
                    self.document.remove(&id);
                    log::debug!("Erased element {id}");
                    self.notify_document_changed();
                }
            }
        }
    }

    /// Processes pointer motion.
    ///
    /// # Behavior
    /// - Drawing a line: moves the free end, locked to the dominant axis
    /// - Drawing a pit: resizes so the box spans the press point and pointer
    /// - Dragging: moves the element to pointer minus grab offset, snapping
    ///   pits onto nearby edges
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        match self.state {
            EditState::Idle => {}
            EditState::Drawing { .. } => self.update_drawing(x, y),
            EditState::Dragging { .. } => self.update_drag(x, y),
        }
    }

    /// Processes pointer release.
    ///
    /// A drawn element takes the release position as its final size and is
    /// committed. A drag just ends; the element stays where the last move put it.
    pub fn on_pointer_up(&mut self, x: f64, y: f64) {
        if matches!(self.state, EditState::Drawing { .. }) {
            self.update_drawing(x, y);
        }

        match std::mem::replace(&mut self.state, EditState::Idle) {
            EditState::Idle => {}
            EditState::Drawing { element, .. } => {
                if is_degenerate_pit(&element) {
                    log::debug!("Discarding zero-area pit");
                    self.needs_redraw = true;
                    return;
                }
                log::debug!("Committed element {}", element.id());
                self.document.add(element);
                self.notify_document_changed();
            }
            EditState::Dragging { id, .. } => {
                log::debug!("Released element {id}");
            }
        }
    }

    /// The pointer left the canvas: drop any element under construction and
    /// end a drag where it currently is.
    pub fn on_pointer_leave(&mut self) {
        match self.state {
            EditState::Drawing { .. } => {
                log::debug!("Pointer left; discarding element under construction");
                self.reset();
            }
            EditState::Dragging { .. } => self.reset(),
            EditState::Idle => {}
        }
    }

    fn start_pit(&mut self, x: f64, y: f64) {
        let settings = self.settings().clone();
        match settings.pit_placement {
            PitPlacement::Instant => {
                let half = settings.pit_size / 2.0;
                let (ax, ay) = self.snap_pit_anchor(x - half, y - half, None);
                let pit = Element::pit(
                    ax,
                    ay,
                    settings.pit_size,
                    settings.pit_size,
                    settings.color,
                    settings.stroke_width,
                );
                log::debug!("Placed pit {} at ({ax}, {ay})", pit.id());
                self.document.add(pit);
                self.notify_document_changed();
            }
            PitPlacement::Drag => {
                let (ox, oy) = self.snap_pit_anchor(x, y, None);
                self.state = EditState::Drawing {
                    element: Element::pit(ox, oy, 0.0, 0.0, settings.color, settings.stroke_width),
                    origin_x: ox,
                    origin_y: oy,
                };
                self.needs_redraw = true;
            }
        }
    }

    fn update_drawing(&mut self, x: f64, y: f64) {
        let (x, y) = self.grid_point(x, y);
        let EditState::Drawing {
            element,
            origin_x,
            origin_y,
        } = &mut self.state
        else {
            return;
        };

        match &mut element.kind {
            ElementKind::Line {
                start_x,
                start_y,
                end_x,
                end_y,
                ..
            } => {
                let dx = x - *start_x;
                let dy = y - *start_y;
                if dx.abs() >= dy.abs() {
                    *end_x = x;
                    *end_y = *start_y;
                } else {
                    *end_x = *start_x;
                    *end_y = y;
                }
            }
            ElementKind::Pit {
                start_x,
                start_y,
                width,
                height,
                ..
            } => {
                let dx = x - *origin_x;
                let dy = y - *origin_y;
                *width = dx.abs();
                *height = dy.abs();
                *start_x = if dx < 0.0 { x } else { *origin_x };
                *start_y = if dy < 0.0 { y } else { *origin_y };
            }
            ElementKind::Text { .. } => {}
        }
        self.needs_redraw = true;
    }

    fn update_drag(&mut self, x: f64, y: f64) {
        let EditState::Dragging {
            id,
            offset_x,
            offset_y,
        } = &self.state
        else {
            return;
        };
        let id = id.clone();
        let (mut ax, mut ay) = (x - offset_x, y - offset_y);

        let Some(element) = self.document.get(&id) else {
            log::warn!("Dragged element {id} vanished; ending drag");
            self.state = EditState::Idle;
            return;
        };
        if element.is_pit() {
            (ax, ay) = self.snap_pit_anchor(ax, ay, Some(&id));
        }
        if element.anchor() == (ax, ay) {
            return;
        }

        if let Some(element) = self.document.get_mut(&id) {
            element.move_anchor_to(ax, ay);
            self.notify_document_changed();
        }
    }

    /// Applies grid rounding (when enabled) and edge snapping to a pit anchor.
    fn snap_pit_anchor(&self, x: f64, y: f64, exclude_id: Option<&str>) -> (f64, f64) {
        let (x, y) = self.grid_point(x, y);
        let threshold = self.settings().snap_threshold;
        self.document.snap_to_nearby(x, y, exclude_id, threshold)
    }

    fn grid_point(&self, x: f64, y: f64) -> (f64, f64) {
        let settings = self.settings();
        if settings.snap_to_grid {
            (
                util::snap_to_grid(x, settings.grid_size),
                util::snap_to_grid(y, settings.grid_size),
            )
        } else {
            (x, y)
        }
    }
}

fn is_degenerate_pit(element: &Element) -> bool {
    matches!(
        element.kind,
        ElementKind::Pit { width, height, .. } if width == 0.0 || height == 0.0
    )
}
