//! Editing state machine and editor state.

use crate::config::{Config, PitPlacement};
use crate::draw::color::MAP_BLUE;
use crate::draw::element::DEFAULT_STROKE_WIDTH;
use crate::draw::{Color, Document, Element, TeamAssignment, ZoomLimits};
use crate::input::tool::Tool;

/// Current editing phase.
///
/// Tracks whether the user is idle, building a new element with a
/// press-drag-release, or moving an existing element.
#[derive(Debug, Clone, PartialEq)]
pub enum EditState {
    /// Waiting for a press
    Idle,
    /// Building a line (or a drag-sized pit) that is not yet in the document
    Drawing {
        /// The element under construction
        element: Element,
        /// Where the press happened; a drag-sized pit grows from here
        origin_x: f64,
        origin_y: f64,
    },
    /// Moving an element that is already in the document
    Dragging {
        /// Id of the grabbed element
        id: String,
        /// Pointer position minus the element anchor at grab time
        offset_x: f64,
        offset_y: f64,
    },
}

/// Collaborator that answers the editor's blocking questions.
///
/// Implemented by whatever hosts the canvas: a UI shows a dialog, tests
/// return canned answers.
pub trait EditorHost {
    /// Asks for the text of a new label. `None` means the prompt was cancelled.
    fn prompt_text(&mut self) -> Option<String>;

    /// Asks whether the whole map may be cleared.
    fn confirm_clear(&mut self) -> bool;
}

/// Notifications for the host, drained with [`EditorState::take_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The document changed; carries the full updated document
    DocumentChanged(Document),
    /// A team was dropped onto a pit
    TeamAssigned { pit_id: String, team_number: u32 },
}

/// Runtime settings for the editor, resolved from [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSettings {
    pub color: Color,
    pub stroke_width: f64,
    pub pit_size: f64,
    pub pit_placement: PitPlacement,
    pub grid_size: f64,
    pub snap_to_grid: bool,
    pub tolerance: f64,
    pub eraser_radius: f64,
    pub snap_threshold: f64,
    pub zoom: ZoomLimits,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            color: MAP_BLUE,
            stroke_width: DEFAULT_STROKE_WIDTH,
            pit_size: 50.0,
            pit_placement: PitPlacement::Instant,
            grid_size: 20.0,
            snap_to_grid: false,
            tolerance: 5.0,
            eraser_radius: 10.0,
            snap_threshold: 10.0,
            zoom: ZoomLimits::default(),
        }
    }
}

impl From<&Config> for EditorSettings {
    fn from(config: &Config) -> Self {
        Self {
            color: Color::from_hex_or(&config.drawing.default_color, MAP_BLUE),
            stroke_width: config.drawing.stroke_width,
            pit_size: config.drawing.pit_size,
            pit_placement: config.drawing.pit_placement,
            grid_size: config.drawing.grid_size,
            snap_to_grid: config.drawing.snap_to_grid,
            tolerance: config.hit_test.tolerance,
            eraser_radius: config.hit_test.eraser_radius,
            snap_threshold: config.hit_test.snap_threshold,
            zoom: ZoomLimits {
                step: config.camera.zoom_step,
                min: config.camera.min_zoom,
                max: config.camera.max_zoom,
            },
        }
    }
}

/// Editing session state.
///
/// Holds the document being edited, the selected tool and the current
/// [`EditState`]. Every handler works on this one value; nothing is kept in
/// shared or global state.
pub struct EditorState {
    /// The map being edited
    pub document: Document,
    /// Currently selected tool
    pub tool: Tool,
    /// Current phase of the state machine
    pub state: EditState,
    /// Whether the canvas needs to be redrawn
    pub needs_redraw: bool,
    settings: EditorSettings,
    pending_events: Vec<EditorEvent>,
}

impl EditorState {
    pub fn new(settings: EditorSettings) -> Self {
        Self::with_document(Document::new(), settings)
    }

    pub fn with_document(document: Document, settings: EditorSettings) -> Self {
        Self {
            document,
            tool: Tool::default(),
            state: EditState::Idle,
            needs_redraw: true,
            settings,
            pending_events: Vec::new(),
        }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Switches tools, abandoning whatever the previous tool was doing.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            log::debug!("Tool changed: {} -> {}", self.tool, tool);
        }
        self.tool = tool;
        self.reset();
    }

    /// Returns to idle, discarding any element under construction.
    pub fn reset(&mut self) {
        if !matches!(self.state, EditState::Idle) {
            self.state = EditState::Idle;
            self.needs_redraw = true;
        }
    }

    /// Replaces the document wholesale (map loaded by the host).
    pub fn load_document(&mut self, document: Document) {
        log::info!("Loaded map with {} elements", document.len());
        self.document = document;
        self.state = EditState::Idle;
        self.needs_redraw = true;
    }

    /// Current team assignments derived from the document.
    pub fn team_assignments(&self) -> Vec<TeamAssignment> {
        self.document.team_assignments()
    }

    /// Drains notifications produced since the last call.
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Queues a document snapshot for the host and requests a redraw.
    ///
    /// Back-to-back changes collapse into one notification carrying the
    /// latest document.
    pub(super) fn notify_document_changed(&mut self) {
        let snapshot = EditorEvent::DocumentChanged(self.document.clone());
        match self.pending_events.last_mut() {
            Some(last @ EditorEvent::DocumentChanged(_)) => *last = snapshot,
            _ => self.pending_events.push(snapshot),
        }
        self.needs_redraw = true;
    }

    pub(super) fn push_event(&mut self, event: EditorEvent) {
        self.pending_events.push(event);
    }
}
