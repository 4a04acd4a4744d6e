//! The pit map canvas: one surface, one document, one active engine.
//!
//! [`PitMapCanvas`] owns the drawing surface it was given at construction,
//! the client → canvas coordinate mapper, and exactly one engine: the
//! editing state machine in [`CanvasMode::Edit`] or the hold-gesture engine
//! in [`CanvasMode::Scout`]. Every state-affecting call (pointer event, drop,
//! toolbar action, resize, timer tick) redraws synchronously before it
//! returns, so the surface never lags behind the document.

use std::time::Instant;

use crate::config::Config;
use crate::draw::{
    CanvasSurface, Document, Overlay, ScoutingLook, SurfaceError, ZoomLimits, render_map,
};
use crate::input::{
    CoordinateMapper, EditorEvent, EditorHost, EditorSettings, EditorState, InputEvent,
    PointerEvent, Tool,
};
use crate::scout::{GestureEngine, GestureSettings, StatusChange, StatusMap, StatusPalette};

/// Which engine is driving the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasMode {
    /// Drawing and editing the map
    Edit,
    /// Read-only map with press-and-hold status updates
    Scout,
}

/// Notifications for the host, drained with [`PitMapCanvas::take_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// The document changed; carries the full updated document
    DocumentChanged(Document),
    /// A team was dropped onto a pit
    TeamAssigned { pit_id: String, team_number: u32 },
    /// A hold gesture committed a new status for a pit
    StatusChanged(StatusChange),
}

impl From<EditorEvent> for CanvasEvent {
    fn from(event: EditorEvent) -> Self {
        match event {
            EditorEvent::DocumentChanged(doc) => CanvasEvent::DocumentChanged(doc),
            EditorEvent::TeamAssigned {
                pit_id,
                team_number,
            } => CanvasEvent::TeamAssigned {
                pit_id,
                team_number,
            },
        }
    }
}

enum Engine {
    Edit(EditorState),
    Scout {
        document: Document,
        statuses: StatusMap,
        gesture: GestureEngine,
    },
}

pub struct PitMapCanvas {
    surface: CanvasSurface,
    mapper: CoordinateMapper,
    engine: Engine,
    editor_settings: EditorSettings,
    gesture_settings: GestureSettings,
    palette: StatusPalette,
    grid_size: f64,
    events: Vec<CanvasEvent>,
    frames_rendered: u64,
}

impl PitMapCanvas {
    /// Creates a canvas in edit mode with an empty document.
    ///
    /// The surface is displayed 1:1 until [`set_display_size`](Self::set_display_size)
    /// says otherwise.
    pub fn new(surface: CanvasSurface, config: &Config) -> Self {
        let editor_settings = EditorSettings::from(config);
        let mapper =
            CoordinateMapper::identity(surface.width() as f64, surface.height() as f64);
        let mut canvas = Self {
            surface,
            mapper,
            engine: Engine::Edit(EditorState::new(editor_settings.clone())),
            editor_settings,
            gesture_settings: GestureSettings::from(&config.gesture),
            palette: StatusPalette::from(&config.scouting),
            grid_size: config.drawing.grid_size,
            events: Vec::new(),
            frames_rendered: 0,
        };
        canvas.redraw();
        canvas
    }

    pub fn mode(&self) -> CanvasMode {
        match self.engine {
            Engine::Edit(_) => CanvasMode::Edit,
            Engine::Scout { .. } => CanvasMode::Scout,
        }
    }

    pub fn document(&self) -> &Document {
        match &self.engine {
            Engine::Edit(editor) => &editor.document,
            Engine::Scout { document, .. } => document,
        }
    }

    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut CanvasSurface {
        &mut self.surface
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// The editor, while in edit mode.
    pub fn editor(&self) -> Option<&EditorState> {
        match &self.engine {
            Engine::Edit(editor) => Some(editor),
            Engine::Scout { .. } => None,
        }
    }

    /// Pit statuses, while in scout mode.
    pub fn statuses(&self) -> Option<&StatusMap> {
        match &self.engine {
            Engine::Scout { statuses, .. } => Some(statuses),
            Engine::Edit(_) => None,
        }
    }

    /// The gesture engine, while in scout mode.
    pub fn gesture(&self) -> Option<&GestureEngine> {
        match &self.engine {
            Engine::Scout { gesture, .. } => Some(gesture),
            Engine::Edit(_) => None,
        }
    }

    /// Number of completed render passes.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Drains notifications produced since the last call.
    pub fn take_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }

    // ======================================================================
    // Lifecycle
    // ======================================================================

    /// Replaces the document (a map was loaded).
    ///
    /// In scout mode statuses are reseeded for the new pits, keeping the
    /// status of any pit that is still present.
    pub fn load_document(&mut self, new_document: Document) {
        match &mut self.engine {
            Engine::Edit(editor) => editor.load_document(new_document),
            Engine::Scout {
                document,
                statuses,
                gesture,
            } => {
                gesture.reset();
                let mut seeded = StatusMap::seeded_from(&new_document);
                seeded.merge_from(statuses);
                *statuses = seeded;
                *document = new_document;
            }
        }
        self.redraw();
    }

    /// Switches to editing, dropping any gesture session.
    pub fn enter_edit_mode(&mut self) {
        if let Engine::Scout {
            document, gesture, ..
        } = &mut self.engine
        {
            gesture.reset();
            let document = std::mem::take(document);
            log::info!("Entering edit mode");
            self.engine = Engine::Edit(EditorState::with_document(
                document,
                self.editor_settings.clone(),
            ));
            self.redraw();
        }
    }

    /// Switches to scouting.
    ///
    /// `statuses` carries a previously saved status map; every assigned pit
    /// missing from it starts out not visited. Without one, a canvas that is
    /// already scouting keeps the statuses of its current session.
    pub fn enter_scout_mode(&mut self, statuses: Option<StatusMap>) {
        let (document, current) = match &mut self.engine {
            Engine::Edit(editor) => {
                editor.reset();
                self.events
                    .extend(editor.take_events().into_iter().map(CanvasEvent::from));
                (std::mem::take(&mut editor.document), None)
            }
            Engine::Scout {
                document, statuses, ..
            } => (std::mem::take(document), Some(std::mem::take(statuses))),
        };

        let mut seeded = StatusMap::seeded_from(&document);
        if let Some(previous) = statuses.as_ref().or(current.as_ref()) {
            seeded.merge_from(previous);
        }
        log::info!("Entering scout mode with {} assigned pits", seeded.len());

        self.engine = Engine::Scout {
            document,
            statuses: seeded,
            gesture: GestureEngine::new(self.gesture_settings.clone(), self.palette),
        };
        self.redraw();
    }

    /// Cancels every outstanding timer and animation and returns to idle.
    ///
    /// After this no later [`tick`](Self::tick) can bring a menu back.
    pub fn teardown(&mut self) {
        match &mut self.engine {
            Engine::Edit(editor) => editor.reset(),
            Engine::Scout { gesture, .. } => gesture.reset(),
        }
        log::debug!("Canvas torn down");
        self.redraw();
    }

    /// Resizes the backing store and redraws.
    ///
    /// A zero-sized surface is accepted; drawing is skipped until it grows.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), SurfaceError> {
        self.surface.resize(width, height)?;
        self.mapper.backing_width = width as f64;
        self.mapper.backing_height = height as f64;
        self.redraw();
        Ok(())
    }

    /// Records where and how large the canvas is displayed, in client units.
    pub fn set_display_size(&mut self, width: f64, height: f64, offset_x: f64, offset_y: f64) {
        self.mapper.display_width = width;
        self.mapper.display_height = height;
        self.mapper.offset_x = offset_x;
        self.mapper.offset_y = offset_y;
    }

    // ======================================================================
    // Input
    // ======================================================================

    /// Feeds one normalized input event (pointer or pinch).
    pub fn handle_input(&mut self, event: InputEvent, now: Instant, host: &mut dyn EditorHost) {
        match event {
            InputEvent::Pointer(pointer) => self.handle_pointer(pointer, now, host),
            InputEvent::Pinch { scale } => self.zoom_by(scale),
        }
    }

    /// Feeds one pointer event in client coordinates.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant, host: &mut dyn EditorHost) {
        let redraw = match &mut self.engine {
            Engine::Edit(editor) => {
                match event {
                    PointerEvent::Down { x, y } => {
                        let (x, y) = self.mapper.to_logical(x, y);
                        editor.on_pointer_down(x, y, host);
                    }
                    PointerEvent::Move { x, y } => {
                        let (x, y) = self.mapper.to_logical(x, y);
                        editor.on_pointer_move(x, y);
                    }
                    PointerEvent::Up { x, y } => {
                        let (x, y) = self.mapper.to_logical(x, y);
                        editor.on_pointer_up(x, y);
                    }
                    PointerEvent::Leave => editor.on_pointer_leave(),
                }
                std::mem::take(&mut editor.needs_redraw)
            }
            Engine::Scout {
                document, gesture, ..
            } => match event {
                PointerEvent::Down { x, y } => {
                    let (x, y) = self.mapper.to_logical(x, y);
                    gesture.on_pointer_down(document, x, y, now)
                }
                PointerEvent::Move { x, y } => {
                    let (x, y) = self.mapper.to_logical(x, y);
                    gesture.on_pointer_move(x, y, now)
                }
                PointerEvent::Up { x, y } => {
                    let (x, y) = self.mapper.to_logical(x, y);
                    gesture.on_pointer_up(x, y, now)
                }
                PointerEvent::Leave => gesture.on_pointer_leave(now),
            },
        };
        self.finish_event(redraw);
    }

    /// Runs due timers and animation frames. Returns true if a frame was drawn.
    pub fn tick(&mut self, now: Instant) -> bool {
        let redraw = match &mut self.engine {
            Engine::Scout { gesture, .. } => gesture.advance(now),
            Engine::Edit(_) => false,
        };
        self.finish_event(redraw);
        redraw
    }

    /// True while a hold timer or animation wants [`tick`](Self::tick) calls.
    pub fn needs_tick(&self) -> bool {
        match &self.engine {
            Engine::Scout { gesture, .. } => gesture.needs_tick(),
            Engine::Edit(_) => false,
        }
    }

    /// Handles a team dragged in from the roster and dropped at a client position.
    ///
    /// Only meaningful while editing. Returns true if a team was assigned.
    pub fn drop_team(&mut self, client_x: f64, client_y: f64, payload: &str) -> bool {
        let (x, y) = self.mapper.to_logical(client_x, client_y);
        let assigned = match &mut self.engine {
            Engine::Edit(editor) => editor.drop_team(x, y, payload),
            Engine::Scout { .. } => {
                log::debug!("Ignoring team drop in scout mode");
                false
            }
        };
        self.finish_event(assigned);
        assigned
    }

    // ======================================================================
    // Toolbar actions
    // ======================================================================

    pub fn set_tool(&mut self, tool: Tool) {
        match &mut self.engine {
            Engine::Edit(editor) => {
                editor.set_tool(tool);
                let redraw = std::mem::take(&mut editor.needs_redraw);
                self.finish_event(redraw);
            }
            Engine::Scout { .. } => log::debug!("Tools are unavailable in scout mode"),
        }
    }

    pub fn zoom_in(&mut self) {
        self.camera_action(
            |editor| editor.zoom_in(),
            |doc, limits| doc.zoom_in(limits),
        );
    }

    pub fn zoom_out(&mut self) {
        self.camera_action(
            |editor| editor.zoom_out(),
            |doc, limits| doc.zoom_out(limits),
        );
    }

    /// Applies a pinch ratio to the camera zoom.
    pub fn zoom_by(&mut self, factor: f64) {
        self.camera_action(
            |editor| editor.zoom_by(factor),
            |doc, limits| doc.zoom_by(factor, limits),
        );
    }

    pub fn reset_view(&mut self) {
        self.camera_action(|editor| editor.reset_view(), |doc, _| doc.reset_view());
    }

    /// Clears the map after confirmation. Only available while editing.
    pub fn clear(&mut self, host: &mut dyn EditorHost) -> bool {
        let cleared = match &mut self.engine {
            Engine::Edit(editor) => editor.clear(host),
            Engine::Scout { .. } => false,
        };
        self.finish_event(cleared);
        cleared
    }

    fn camera_action(
        &mut self,
        edit: impl FnOnce(&mut EditorState),
        scout: impl FnOnce(&mut Document, &ZoomLimits),
    ) {
        match &mut self.engine {
            Engine::Edit(editor) => edit(editor),
            Engine::Scout { document, .. } => {
                scout(document, &self.editor_settings.zoom);
                self.events
                    .push(CanvasEvent::DocumentChanged(document.clone()));
            }
        }
        self.finish_event(true);
    }

    // ======================================================================
    // Rendering
    // ======================================================================

    /// Collects engine output and redraws if anything visible changed.
    fn finish_event(&mut self, mut redraw: bool) {
        match &mut self.engine {
            Engine::Edit(editor) => {
                redraw |= std::mem::take(&mut editor.needs_redraw);
                self.events
                    .extend(editor.take_events().into_iter().map(CanvasEvent::from));
            }
            Engine::Scout {
                statuses, gesture, ..
            } => {
                for change in gesture.take_events() {
                    statuses.apply(&change);
                    self.events.push(CanvasEvent::StatusChanged(change));
                    redraw = true;
                }
            }
        }

        if redraw {
            self.redraw();
        }
    }

    /// Renders the current state onto the surface.
    pub fn redraw(&mut self) {
        let ctx = match self.surface.context() {
            Ok(Some(ctx)) => ctx,
            Ok(None) => {
                log::debug!("Surface is zero-sized; skipping render");
                return;
            }
            Err(err) => {
                log::warn!("Failed to open drawing context: {err}");
                return;
            }
        };

        let (width, height) = (self.surface.width(), self.surface.height());
        match &self.engine {
            Engine::Edit(editor) => {
                render_map(
                    &ctx,
                    &editor.document,
                    &editor.overlay(),
                    width,
                    height,
                    self.grid_size,
                );
            }
            Engine::Scout {
                document,
                statuses,
                gesture,
            } => {
                let overlay = Overlay {
                    provisional: None,
                    menu: gesture.menu(),
                    scouting: Some(ScoutingLook {
                        statuses,
                        palette: &self.palette,
                    }),
                };
                render_map(&ctx, document, &overlay, width, height, self.grid_size);
            }
        }
        drop(ctx);

        self.frames_rendered += 1;
    }
}
