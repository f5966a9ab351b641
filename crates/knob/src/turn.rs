use crate::geometry::Point;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f64::consts::{FRAC_PI_2, PI};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// How pointer motion is translated into knob rotation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TurnType {
    /// Horizontal drag distance, one degree per pixel.
    #[default]
    #[strum(to_string = "horizontal", serialize = "h")]
    Horizontal,
    /// Vertical drag distance, growing downward.
    #[strum(to_string = "vertical", serialize = "v")]
    Vertical,
    /// Change of distance to the knob center.
    #[strum(to_string = "dist", serialize = "distance", serialize = "d")]
    Dist,
    /// Pointer angle around the knob center, across any number of revolutions.
    #[strum(to_string = "angle", serialize = "a")]
    Angle,
}

/// Pointer position handed in by the host on every pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    /// Relative to the top-left corner of the knob surface.
    pub local: Point,
    /// In the host's global coordinate space.
    pub screen: Point,
}

impl PointerEvent {
    pub fn new(local: Point, screen: Point) -> Self {
        Self { local, screen }
    }

    /// Event for a surface whose top-left corner sits at `origin`.
    pub fn at(local: Point, origin: Point) -> Self {
        Self::new(local, origin + local)
    }

    /// Screen position of the surface's top-left corner.
    pub fn origin(&self) -> Point {
        self.screen - self.local
    }
}

/// State captured on pointer-down and carried until pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    start_screen: Point,
    start_distance: f64,
    start_angle: f64,
    start_mouse_angle: f64,
    last_mouse_angle: f64,
    full_turns: i32,
}

impl DragSession {
    pub fn begin(
        start_screen: Point,
        start_distance: f64,
        start_angle: f64,
        start_mouse_angle: f64,
    ) -> Self {
        Self {
            start_screen,
            start_distance,
            start_angle,
            start_mouse_angle,
            last_mouse_angle: start_mouse_angle,
            full_turns: 0,
        }
    }

    pub fn start_screen(&self) -> Point {
        self.start_screen
    }

    pub fn start_distance(&self) -> f64 {
        self.start_distance
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn start_mouse_angle(&self) -> f64 {
        self.start_mouse_angle
    }

    pub fn last_mouse_angle(&self) -> f64 {
        self.last_mouse_angle
    }

    /// Signed number of times the pointer crossed the 0/2π border.
    pub fn full_turns(&self) -> i32 {
        self.full_turns
    }

    /// Unclamped knob angle for the pointer at `screen`, which lies
    /// `distance` pixels from the knob center at `mouse_angle`.
    pub fn candidate_angle(
        &mut self,
        turn_type: TurnType,
        screen: Point,
        distance: f64,
        mouse_angle: f64,
        dist_angle_factor: f64,
    ) -> f64 {
        match turn_type {
            TurnType::Horizontal => {
                self.start_angle + (screen.x - self.start_screen.x) * dist_angle_factor
            }
            TurnType::Vertical => {
                self.start_angle + (screen.y - self.start_screen.y) * dist_angle_factor
            }
            TurnType::Dist => {
                self.start_angle + (distance - self.start_distance) * dist_angle_factor
            }
            TurnType::Angle => self.start_angle + self.track_mouse_angle(mouse_angle),
        }
    }

    /// Angle turned since pointer-down, counting full revolutions.
    fn track_mouse_angle(&mut self, mouse_angle: f64) -> f64 {
        let last = self.last_mouse_angle;
        if mouse_angle < FRAC_PI_2 && last > 3.0 * FRAC_PI_2 {
            self.full_turns += 1;
        } else if mouse_angle > 3.0 * FRAC_PI_2 && last < FRAC_PI_2 {
            self.full_turns -= 1;
        }
        self.last_mouse_angle = mouse_angle;

        mouse_angle + f64::from(self.full_turns) * 2.0 * PI - self.start_mouse_angle
    }
}
