//! Press-and-hold gesture engine for scouting mode.
//!
//! A press on an assigned pit arms a hold timer. Once the hold delay has
//! elapsed the radial menu opens around the press point; releasing over a
//! status circle commits that status, and the menu then fades out. Time never
//! advances on its own: every handler takes the current [`Instant`] and
//! [`GestureEngine::advance`] runs due timers and animations, so any
//! scheduler (a frame clock, a test driving synthetic time) can drive it.

use std::time::{Duration, Instant};

use crate::config::GestureConfig;
use crate::draw::Document;

use super::menu::RadialMenu;
use super::status::{StatusChange, StatusPalette};

/// Reference frame rate for hover interpolation.
const FRAMES_PER_SECOND: f64 = 60.0;

/// Runtime settings for the hold gesture and its menu.
#[derive(Debug, Clone)]
pub struct GestureSettings {
    pub hold_delay: Duration,
    pub menu_distance: f64,
    pub circle_radius: f64,
    pub hover_scale: f64,
    pub hover_rate: f64,
    pub fade: Duration,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self::from(&GestureConfig::default())
    }
}

impl From<&GestureConfig> for GestureSettings {
    fn from(cfg: &GestureConfig) -> Self {
        Self {
            hold_delay: Duration::from_millis(cfg.hold_delay_ms),
            menu_distance: cfg.menu_distance,
            circle_radius: cfg.circle_radius,
            hover_scale: cfg.hover_scale,
            hover_rate: cfg.hover_rate,
            fade: Duration::from_millis(cfg.fade_ms),
        }
    }
}

/// The pit a gesture session is about.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureTarget {
    pub pit_id: String,
    pub team_number: u32,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

/// Current phase of the gesture state machine.
#[derive(Debug)]
pub enum GesturePhase {
    /// No session
    Idle,
    /// Pressed on an assigned pit, waiting for the hold delay
    Armed {
        target: GestureTarget,
        pressed_at: Instant,
    },
    /// Menu visible and tracking hover
    Holding {
        target: GestureTarget,
        menu: RadialMenu,
        last_frame: Instant,
    },
    /// Released; menu fading out
    Resolving { menu: RadialMenu, started: Instant },
}

pub struct GestureEngine {
    settings: GestureSettings,
    palette: StatusPalette,
    phase: GesturePhase,
    /// Last known pointer position, used to seed hover when the menu opens
    pointer: Option<(f64, f64)>,
    pending: Vec<StatusChange>,
}

impl GestureEngine {
    pub fn new(settings: GestureSettings, palette: StatusPalette) -> Self {
        Self {
            settings,
            palette,
            phase: GesturePhase::Idle,
            pointer: None,
            pending: Vec::new(),
        }
    }

    pub fn phase(&self) -> &GesturePhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, GesturePhase::Idle)
    }

    /// True while a timer or animation is outstanding and [`advance`](Self::advance)
    /// should keep being called.
    pub fn needs_tick(&self) -> bool {
        !self.is_idle()
    }

    /// The menu to draw, while holding or fading out.
    pub fn menu(&self) -> Option<&RadialMenu> {
        match &self.phase {
            GesturePhase::Holding { menu, .. } | GesturePhase::Resolving { menu, .. } => Some(menu),
            _ => None,
        }
    }

    /// Drains status commits since the last call.
    pub fn take_events(&mut self) -> Vec<StatusChange> {
        std::mem::take(&mut self.pending)
    }

    /// Starts a session when `(x, y)` lands on an assigned pit.
    ///
    /// Ignored unless the engine is idle. Returns true if a session was armed.
    pub fn on_pointer_down(&mut self, doc: &Document, x: f64, y: f64, now: Instant) -> bool {
        self.advance(now);
        self.pointer = Some((x, y));

        if !self.is_idle() {
            log::debug!("Ignoring press while a status gesture is active");
            return false;
        }

        let Some(pit) = doc.pit_at(x, y, true) else {
            return false;
        };
        let Some(team_number) = pit.team_number() else {
            return false;
        };

        log::debug!("Hold armed on team {team_number}");
        self.phase = GesturePhase::Armed {
            target: GestureTarget {
                pit_id: pit.id().to_string(),
                team_number,
                anchor_x: x,
                anchor_y: y,
            },
            pressed_at: now,
        };
        true
    }

    /// Tracks hover while the menu is open. Returns true if a redraw is needed.
    pub fn on_pointer_move(&mut self, x: f64, y: f64, now: Instant) -> bool {
        let mut redraw = self.advance(now);
        self.pointer = Some((x, y));
        if let GesturePhase::Holding { menu, .. } = &mut self.phase {
            redraw |= menu.update_hover(x, y);
        }
        redraw
    }

    /// Commits the circle under the pointer, if any, and starts the fade.
    ///
    /// A release before the hold delay simply ends the session. Returns true
    /// if a redraw is needed.
    pub fn on_pointer_up(&mut self, x: f64, y: f64, now: Instant) -> bool {
        let redraw = self.advance(now);
        self.pointer = None;

        match std::mem::replace(&mut self.phase, GesturePhase::Idle) {
            GesturePhase::Armed { .. } => {
                log::debug!("Hold released early; no status change");
                redraw
            }
            GesturePhase::Holding {
                target, mut menu, ..
            } => {
                let choice = menu.choice_at(x, y);
                match choice.and_then(|choice| choice.status()) {
                    Some(status) => {
                        log::info!("Team {} marked {}", target.team_number, status.label());
                        self.pending.push(StatusChange {
                            pit_id: target.pit_id,
                            team_number: target.team_number,
                            status,
                        });
                    }
                    None => log::debug!("Status menu dismissed without a choice"),
                }
                menu.set_opacity(1.0);
                self.phase = GesturePhase::Resolving { menu, started: now };
                true
            }
            other => {
                self.phase = other;
                redraw
            }
        }
    }

    /// Aborts an armed or open session without fading. Returns true if a
    /// visible menu was discarded.
    pub fn on_pointer_leave(&mut self, now: Instant) -> bool {
        let redraw = self.advance(now);
        self.pointer = None;
        match self.phase {
            GesturePhase::Armed { .. } => {
                log::debug!("Pointer left; hold cancelled");
                self.phase = GesturePhase::Idle;
                redraw
            }
            GesturePhase::Holding { .. } => {
                log::debug!("Pointer left; status menu discarded");
                self.phase = GesturePhase::Idle;
                true
            }
            _ => redraw,
        }
    }

    /// Runs the hold timer, hover interpolation and fade up to `now`.
    ///
    /// Returns true if anything visible changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut redraw = false;

        if let GesturePhase::Armed { pressed_at, .. } = &self.phase {
            let fires_at = *pressed_at + self.settings.hold_delay;
            if now >= fires_at {
                if let GesturePhase::Armed { target, .. } =
                    std::mem::replace(&mut self.phase, GesturePhase::Idle)
                {
                    let mut menu = RadialMenu::open(
                        target.anchor_x,
                        target.anchor_y,
                        self.settings.menu_distance,
                        self.settings.circle_radius,
                        &self.palette,
                    );
                    if let Some((x, y)) = self.pointer {
                        menu.update_hover(x, y);
                    }
                    log::debug!("Status menu opened for team {}", target.team_number);
                    self.phase = GesturePhase::Holding {
                        target,
                        menu,
                        last_frame: fires_at,
                    };
                    redraw = true;
                }
            }
        }

        match &mut self.phase {
            GesturePhase::Holding {
                menu, last_frame, ..
            } => {
                let elapsed = now.saturating_duration_since(*last_frame);
                let frames = elapsed.as_secs_f64() * FRAMES_PER_SECOND;
                *last_frame = (*last_frame).max(now);
                if menu.is_animating(self.settings.hover_scale) {
                    menu.step_scales(frames, self.settings.hover_scale, self.settings.hover_rate);
                    redraw = true;
                }
            }
            GesturePhase::Resolving { menu, started } => {
                let elapsed = now.saturating_duration_since(*started);
                let progress = if self.settings.fade.is_zero() {
                    1.0
                } else {
                    elapsed.as_secs_f64() / self.settings.fade.as_secs_f64()
                };
                if progress >= 1.0 {
                    self.phase = GesturePhase::Idle;
                } else {
                    menu.set_opacity(1.0 - progress);
                }
                redraw = true;
            }
            _ => {}
        }

        redraw
    }

    /// Drops any session, timer and animation immediately.
    pub fn reset(&mut self) {
        if !self.is_idle() {
            log::debug!("Gesture session reset");
        }
        self.phase = GesturePhase::Idle;
        self.pointer = None;
    }
}
