use crate::canvas::{Canvas, Color, PrimitiveId};
use crate::error::KnobError;
use crate::geometry::{BoundingBox, Geometry, Point};
use palette::Srgba;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const RING_WIDTH: f64 = 2.0;
pub const BODY_OUTLINE_WIDTH: f64 = 1.0;
pub const REFLECTION_RADIUS: f64 = 0.9; // relative to the knob radius
pub const REFLECTION_START: f64 = 30.0;
pub const REFLECTION_EXTENT: f64 = 170.0;
pub const LINE_MARKER_INNER: f64 = 0.7;
pub const LINE_MARKER_WIDTH: f64 = 3.0;
pub const DOT_MARKER_DISTANCE: f64 = 0.85;
pub const DOT_MARKER_RADIUS: f64 = 0.12;

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
pub enum MarkerType {
    #[strum(to_string = "none")]
    None,
    #[default]
    #[strum(to_string = "line")]
    Line,
    #[strum(to_string = "circle", serialize = "dot")]
    Circle,
}

pub struct KnobColors {
    /// Outermost first.
    pub rings: [Color; 3],
    pub body: Color,
    pub reflection: Color,
    pub marker: Color,
}

impl Default for KnobColors {
    fn default() -> Self {
        Self {
            rings: [
                Srgba::new(1.0, 1.0, 0.0, 1.0),
                Srgba::new(1.0, 0.647, 0.0, 1.0),
                Srgba::new(1.0, 0.0, 0.0, 1.0),
            ],
            body: Srgba::new(0.0, 0.0, 0.0, 1.0),
            reflection: Srgba::new(0.827, 0.827, 0.827, 1.0),
            marker: Srgba::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

/// Static parts of the knob, painted once: the rings, the body and the
/// light reflection.
pub fn draw_face<C: Canvas>(
    canvas: &mut C,
    geometry: &Geometry,
    knob_radius: f64,
    colors: &KnobColors,
) -> Result<(), KnobError> {
    let knob_px = geometry.radius_in_pixels(knob_radius)?;
    let ring_count = colors.rings.len();

    // Resolve every box before painting so a misfit leaves the canvas empty.
    let rings = colors
        .rings
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let gap = (ring_count - i + 1) as f64;
            let fraction = geometry.radius_from_pixels(knob_px + gap)?;
            Ok((geometry.bounding_box(fraction)?, *color))
        })
        .collect::<Result<Vec<_>, KnobError>>()?;
    let body = geometry.bounding_box(knob_radius)?;
    let reflection = geometry.bounding_box(knob_radius * REFLECTION_RADIUS)?;

    for (bbox, color) in rings {
        canvas.draw_oval(bbox, None, Some(color), RING_WIDTH);
    }
    canvas.draw_oval(
        body,
        Some(colors.body),
        Some(colors.body),
        BODY_OUTLINE_WIDTH,
    );
    canvas.draw_arc(
        reflection,
        REFLECTION_START,
        REFLECTION_EXTENT,
        colors.reflection,
        BODY_OUTLINE_WIDTH,
    );
    Ok(())
}

/// The moving part of the knob.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    kind: MarkerType,
    id: Option<PrimitiveId>,
}

impl Marker {
    pub fn kind(&self) -> MarkerType {
        self.kind
    }

    pub fn id(&self) -> Option<PrimitiveId> {
        self.id
    }

    pub fn draw<C: Canvas>(
        canvas: &mut C,
        kind: MarkerType,
        geometry: &Geometry,
        knob_radius: f64,
        screen_angle: f64,
        color: Color,
    ) -> Result<Self, KnobError> {
        let points = marker_points(kind, geometry, knob_radius, screen_angle)?;
        let id = match kind {
            MarkerType::None => None,
            MarkerType::Line => Some(canvas.draw_line(&points, color, LINE_MARKER_WIDTH)),
            MarkerType::Circle => Some(canvas.draw_oval(
                BoundingBox::from_corners(points[0], points[1]),
                Some(color),
                None,
                0.0,
            )),
        };
        Ok(Self { kind, id })
    }

    pub fn update<C: Canvas>(
        &self,
        canvas: &mut C,
        geometry: &Geometry,
        knob_radius: f64,
        screen_angle: f64,
    ) -> Result<(), KnobError> {
        match self.id {
            Some(id) => canvas.move_primitive(
                id,
                &marker_points(self.kind, geometry, knob_radius, screen_angle)?,
            ),
            None => Ok(()),
        }
    }
}

/// Coordinates for a marker at `screen_angle` (counter-clockwise, radians).
/// Lines get their two end points, circles the corners of their box.
pub fn marker_points(
    kind: MarkerType,
    geometry: &Geometry,
    knob_radius: f64,
    screen_angle: f64,
) -> Result<Vec<Point>, KnobError> {
    match kind {
        MarkerType::None => Ok(Vec::new()),
        MarkerType::Line => Ok(vec![
            geometry.polar(knob_radius * LINE_MARKER_INNER, screen_angle)?,
            geometry.polar(knob_radius, screen_angle)?,
        ]),
        MarkerType::Circle => {
            let center = geometry.polar(knob_radius * DOT_MARKER_DISTANCE, screen_angle)?;
            let radius = geometry.radius_in_pixels(knob_radius * DOT_MARKER_RADIUS)?;
            Ok(BoundingBox::around(center, radius).corners().to_vec())
        }
    }
}
