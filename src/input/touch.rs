//! Touch → pointer translation.
//!
//! One finger drives the ordinary pointer stream. A second finger turns the
//! contact into a pinch: any single-finger action in progress is aborted
//! with [`PointerEvent::Leave`] and finger-distance changes are reported as
//! [`InputEvent::Pinch`] ratios. Two-finger panning is not translated.

use crate::util::distance;

use super::events::{InputEvent, PointerEvent, TouchPoint};

#[derive(Debug, Default)]
pub struct TouchAdapter {
    /// Last position of the single driving finger, while one is down
    primary: Option<(f64, f64)>,
    /// Finger distance at the previous pinch update
    pinch_distance: Option<f64>,
}

impl TouchAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a one-finger pointer sequence is in progress.
    pub fn is_tracking(&self) -> bool {
        self.primary.is_some()
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch_distance.is_some()
    }

    /// Handles new contacts; `touches` is every finger currently down.
    pub fn touch_start(&mut self, touches: &[TouchPoint]) -> Vec<InputEvent> {
        let mut events = Vec::new();
        match touches {
            [touch] => {
                if self.pinch_distance.is_none() {
                    self.primary = Some((touch.x, touch.y));
                    events.push(PointerEvent::Down {
                        x: touch.x,
                        y: touch.y,
                    }
                    .into());
                }
            }
            [first, second, ..] => {
                if self.primary.take().is_some() {
                    log::debug!("Second finger down; aborting single-touch action");
                    events.push(PointerEvent::Leave.into());
                }
                self.pinch_distance = Some(finger_distance(first, second));
            }
            [] => {}
        }
        events
    }

    /// Handles finger movement; `touches` is every finger currently down.
    pub fn touch_move(&mut self, touches: &[TouchPoint]) -> Vec<InputEvent> {
        let mut events = Vec::new();
        match touches {
            [touch] => {
                if self.primary.is_some() {
                    self.primary = Some((touch.x, touch.y));
                    events.push(
                        PointerEvent::Move {
                            x: touch.x,
                            y: touch.y,
                        }
                        .into(),
                    );
                }
            }
            [first, second, ..] => {
                let current = finger_distance(first, second);
                if let Some(previous) = self.pinch_distance {
                    if previous > 0.0 && current > 0.0 {
                        events.push(InputEvent::Pinch {
                            scale: current / previous,
                        });
                    }
                }
                self.pinch_distance = Some(current);
            }
            [] => {}
        }
        events
    }

    /// Handles lifted fingers; `remaining` is every finger still down.
    pub fn touch_end(&mut self, remaining: &[TouchPoint]) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if remaining.is_empty() {
            if let Some((x, y)) = self.primary.take() {
                events.push(PointerEvent::Up { x, y }.into());
            }
            self.pinch_distance = None;
        } else if remaining.len() == 1 {
            // The pinch is over; the remaining finger does not start a new action.
            self.pinch_distance = None;
        }
        events
    }

    /// The platform cancelled the touch sequence.
    pub fn touch_cancel(&mut self) -> Vec<InputEvent> {
        self.pinch_distance = None;
        match self.primary.take() {
            Some(_) => vec![PointerEvent::Leave.into()],
            None => Vec::new(),
        }
    }
}

fn finger_distance(a: &TouchPoint, b: &TouchPoint) -> f64 {
    distance(a.x, a.y, b.x, b.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_finger_becomes_pointer_stream() {
        let mut adapter = TouchAdapter::new();
        let down = adapter.touch_start(&[TouchPoint::new(1, 10.0, 10.0)]);
        assert_eq!(down, vec![InputEvent::Pointer(PointerEvent::Down { x: 10.0, y: 10.0 })]);

        let moved = adapter.touch_move(&[TouchPoint::new(1, 30.0, 12.0)]);
        assert_eq!(moved, vec![InputEvent::Pointer(PointerEvent::Move { x: 30.0, y: 12.0 })]);

        // Release reports the last position seen, not the start.
        let up = adapter.touch_end(&[]);
        assert_eq!(up, vec![InputEvent::Pointer(PointerEvent::Up { x: 30.0, y: 12.0 })]);
        assert!(!adapter.is_tracking());
    }

    #[test]
    fn pinch_reports_distance_ratio() {
        let mut adapter = TouchAdapter::new();
        adapter.touch_start(&[TouchPoint::new(1, 0.0, 0.0), TouchPoint::new(2, 100.0, 0.0)]);
        assert!(adapter.is_pinching());

        let events =
            adapter.touch_move(&[TouchPoint::new(1, 0.0, 0.0), TouchPoint::new(2, 150.0, 0.0)]);
        assert_eq!(events, vec![InputEvent::Pinch { scale: 1.5 }]);

        let events =
            adapter.touch_move(&[TouchPoint::new(1, 0.0, 0.0), TouchPoint::new(2, 75.0, 0.0)]);
        assert_eq!(events, vec![InputEvent::Pinch { scale: 0.5 }]);
    }

    #[test]
    fn second_finger_aborts_single_touch_action() {
        let mut adapter = TouchAdapter::new();
        adapter.touch_start(&[TouchPoint::new(1, 10.0, 10.0)]);
        let events =
            adapter.touch_start(&[TouchPoint::new(1, 10.0, 10.0), TouchPoint::new(2, 60.0, 10.0)]);
        assert_eq!(events, vec![InputEvent::Pointer(PointerEvent::Leave)]);

        // Lifting one finger ends the pinch without resuming drawing.
        assert!(adapter.touch_end(&[TouchPoint::new(1, 10.0, 10.0)]).is_empty());
        assert!(adapter.touch_move(&[TouchPoint::new(1, 20.0, 10.0)]).is_empty());
        assert!(adapter.touch_end(&[]).is_empty());
    }

    #[test]
    fn cancel_becomes_leave() {
        let mut adapter = TouchAdapter::new();
        adapter.touch_start(&[TouchPoint::new(1, 10.0, 10.0)]);
        assert_eq!(adapter.touch_cancel(), vec![InputEvent::Pointer(PointerEvent::Leave)]);
        assert!(adapter.touch_cancel().is_empty());
    }
}
