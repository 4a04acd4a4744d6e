//! Radial status menu shown around a held pit.

use crate::draw::color::{CANCEL_GRAY, Color};
use crate::util::{distance, polar_offset};

use super::status::{PitStatus, StatusPalette};

/// Scale differences below this are treated as settled.
const SCALE_EPSILON: f64 = 0.001;

/// One of the three outcomes offered by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Done,
    Absent,
    Cancel,
}

impl MenuChoice {
    /// Menu order: top, lower-right, lower-left.
    pub const ALL: [MenuChoice; 3] = [MenuChoice::Done, MenuChoice::Absent, MenuChoice::Cancel];

    /// Placement around the hold point in screen degrees (0° right, clockwise).
    pub fn angle(self) -> f64 {
        match self {
            MenuChoice::Done => -90.0,
            MenuChoice::Absent => 30.0,
            MenuChoice::Cancel => 150.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Done => "Done",
            MenuChoice::Absent => "Absent",
            MenuChoice::Cancel => "Cancel",
        }
    }

    /// Status committed by releasing over this choice; cancel commits nothing.
    pub fn status(self) -> Option<PitStatus> {
        match self {
            MenuChoice::Done => Some(PitStatus::Done),
            MenuChoice::Absent => Some(PitStatus::Absent),
            MenuChoice::Cancel => None,
        }
    }

    fn color(self, palette: &StatusPalette) -> Color {
        match self {
            MenuChoice::Done => palette.done,
            MenuChoice::Absent => palette.absent,
            MenuChoice::Cancel => CANCEL_GRAY,
        }
    }
}

/// A single circular control in the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusCircle {
    pub choice: MenuChoice,
    pub cx: f64,
    pub cy: f64,
    /// Base radius used for hit-testing
    pub radius: f64,
    pub color: Color,
    pub hovered: bool,
    /// Current visual scale (1.0 at rest)
    pub scale: f64,
}

impl StatusCircle {
    /// Hit test against the base radius, ignoring the animated scale.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        distance(self.cx, self.cy, x, y) <= self.radius
    }
}

/// Three status circles placed around an anchor point.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialMenu {
    anchor: (f64, f64),
    circles: Vec<StatusCircle>,
    opacity: f64,
}

impl RadialMenu {
    /// Lays out the circles at `menu_distance` from `(x, y)`.
    pub fn open(x: f64, y: f64, menu_distance: f64, radius: f64, palette: &StatusPalette) -> Self {
        let circles = MenuChoice::ALL
            .iter()
            .map(|&choice| {
                let (cx, cy) = polar_offset(x, y, choice.angle(), menu_distance);
                StatusCircle {
                    choice,
                    cx,
                    cy,
                    radius,
                    color: choice.color(palette),
                    hovered: false,
                    scale: 1.0,
                }
            })
            .collect();

        Self {
            anchor: (x, y),
            circles,
            opacity: 1.0,
        }
    }

    pub fn anchor(&self) -> (f64, f64) {
        self.anchor
    }

    pub fn circles(&self) -> &[StatusCircle] {
        &self.circles
    }

    pub fn circle(&self, choice: MenuChoice) -> Option<&StatusCircle> {
        self.circles.iter().find(|circle| circle.choice == choice)
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Choice whose base circle contains the point, if any.
    pub fn choice_at(&self, x: f64, y: f64) -> Option<MenuChoice> {
        self.circles
            .iter()
            .find(|circle| circle.contains(x, y))
            .map(|circle| circle.choice)
    }

    /// Recomputes hover flags for a pointer at `(x, y)`.
    ///
    /// Returns true if any flag changed.
    pub fn update_hover(&mut self, x: f64, y: f64) -> bool {
        let mut changed = false;
        for circle in &mut self.circles {
            let hovered = circle.contains(x, y);
            if circle.hovered != hovered {
                circle.hovered = hovered;
                changed = true;
            }
        }
        changed
    }

    /// Moves every circle's scale toward its target.
    ///
    /// `rate` is the fraction of the remaining gap closed per 60 Hz frame and
    /// `frames` the (fractional) number of such frames elapsed, so the result
    /// does not depend on how often this is called. Returns true while any
    /// circle is still moving.
    pub fn step_scales(&mut self, frames: f64, hover_scale: f64, rate: f64) -> bool {
        if frames <= 0.0 {
            return self.is_animating(hover_scale);
        }

        let blend = 1.0 - (1.0 - rate.clamp(0.0, 1.0)).powf(frames);
        let mut moving = false;
        for circle in &mut self.circles {
            let target = if circle.hovered { hover_scale } else { 1.0 };
            let gap = target - circle.scale;
            if gap.abs() < SCALE_EPSILON {
                circle.scale = target;
                continue;
            }
            circle.scale += gap * blend;
            if (target - circle.scale).abs() < SCALE_EPSILON {
                circle.scale = target;
            } else {
                moving = true;
            }
        }
        moving
    }

    /// True while any circle has not reached its target scale.
    pub fn is_animating(&self, hover_scale: f64) -> bool {
        self.circles.iter().any(|circle| {
            let target = if circle.hovered { hover_scale } else { 1.0 };
            (target - circle.scale).abs() >= SCALE_EPSILON
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> RadialMenu {
        RadialMenu::open(100.0, 100.0, 50.0, 22.0, &StatusPalette::default())
    }

    #[test]
    fn circles_sit_at_fixed_angles() {
        let menu = menu();
        let done = menu.circle(MenuChoice::Done).unwrap();
        assert!((done.cx - 100.0).abs() < 1e-9);
        assert!((done.cy - 50.0).abs() < 1e-9);

        let absent = menu.circle(MenuChoice::Absent).unwrap();
        assert!(absent.cx > 100.0 && absent.cy > 100.0);

        let cancel = menu.circle(MenuChoice::Cancel).unwrap();
        assert!(cancel.cx < 100.0 && cancel.cy > 100.0);
    }

    #[test]
    fn hit_test_ignores_visual_scale() {
        let mut menu = menu();
        menu.update_hover(100.0, 50.0);
        for _ in 0..100 {
            menu.step_scales(1.0, 1.5, 0.2);
        }
        let done = menu.circle(MenuChoice::Done).unwrap();
        assert_eq!(done.scale, 1.5);

        // Inside the scaled circle but outside the base radius.
        assert_eq!(menu.choice_at(100.0, 50.0 - 25.0), None);
        assert_eq!(menu.choice_at(100.0, 50.0 - 21.0), Some(MenuChoice::Done));
    }

    #[test]
    fn scale_approaches_target_and_settles() {
        let mut menu = menu();
        assert!(menu.update_hover(100.0, 50.0));

        assert!(menu.step_scales(1.0, 1.1, 0.2));
        let after_one = menu.circle(MenuChoice::Done).unwrap().scale;
        assert!((after_one - 1.02).abs() < 1e-9);

        // Two half frames land where one full frame does.
        let mut halves = self::menu();
        halves.update_hover(100.0, 50.0);
        halves.step_scales(0.5, 1.1, 0.2);
        halves.step_scales(0.5, 1.1, 0.2);
        let after_halves = halves.circle(MenuChoice::Done).unwrap().scale;
        assert!((after_halves - after_one).abs() < 1e-9);

        while menu.step_scales(1.0, 1.1, 0.2) {}
        assert_eq!(menu.circle(MenuChoice::Done).unwrap().scale, 1.1);
        assert!(!menu.is_animating(1.1));
    }

    #[test]
    fn leaving_a_circle_shrinks_it_back() {
        let mut menu = menu();
        menu.update_hover(100.0, 50.0);
        while menu.step_scales(1.0, 1.1, 0.2) {}
        assert!(menu.update_hover(0.0, 0.0));
        while menu.step_scales(1.0, 1.1, 0.2) {}
        assert!(menu.circles().iter().all(|circle| circle.scale == 1.0));
    }

    #[test]
    fn empty_space_has_no_choice() {
        assert_eq!(menu().choice_at(100.0, 100.0), None);
    }
}
