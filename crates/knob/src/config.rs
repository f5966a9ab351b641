use crate::render::MarkerType;
use crate::turn::TurnType;
use serde::{Deserialize, Serialize};

/// Construction parameters of a [`Knob`](crate::Knob).
///
/// Angles are in degrees. `angle_value_factor` is the value gained per degree
/// of rotation. Within a serialized knob, a missing limit is unbounded and
/// every other missing field takes its [`Default`] value. A knob missing as a
/// whole from a `#[serde(default)]` parent is [`KnobConfig::default()`], limits
/// included.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct KnobConfig {
    pub size: f64,
    pub knob_radius: f64,
    #[serde(default)]
    pub left_value_limit: Option<f64>,
    #[serde(default)]
    pub right_value_limit: Option<f64>,
    pub value: f64,
    pub zero_position_angle: f64,
    pub angle_value_factor: f64,
    pub step_size: f64,
    pub turn_type: TurnType,
    pub marker: MarkerType,
    pub drag_sensitivity: f64,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            size: 80.0,
            knob_radius: 0.8,
            left_value_limit: Some(0.0),
            right_value_limit: Some(100.0),
            value: 30.0,
            zero_position_angle: 250.0,
            angle_value_factor: 100.0 / 320.0,
            step_size: 1.0,
            turn_type: TurnType::Angle,
            marker: MarkerType::Line,
            drag_sensitivity: 1.0,
        }
    }
}
