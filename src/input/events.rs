//! Normalized input event types shared by mouse and touch sources.

/// Single-pointer event in client (on-screen) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed or first finger down
    Down { x: f64, y: f64 },
    /// Pointer moved, with or without a button held
    Move { x: f64, y: f64 },
    /// Primary button released or last finger lifted
    Up { x: f64, y: f64 },
    /// Pointer left the canvas or the touch sequence was cancelled
    Leave,
}

/// Everything the canvas consumes from an input source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    /// Two-finger pinch; `scale` is new finger distance over previous distance
    Pinch { scale: f64 },
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}

/// One active touch contact in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}
