pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod knob;
pub mod render;
pub mod turn;

pub use canvas::{Canvas, Color, DisplayList, Primitive, PrimitiveId};
pub use config::KnobConfig;
pub use error::KnobError;
pub use geometry::{AngleScale, BoundingBox, Geometry, Point};
pub use knob::Knob;
pub use render::{KnobColors, MarkerType};
pub use turn::{DragSession, PointerEvent, TurnType};
