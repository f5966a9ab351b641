use crate::error::KnobError;
use crate::geometry::{BoundingBox, Point};
use derive_more::{Display, From, Into};
use palette::Srgba;

pub type Color = Srgba<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
pub struct PrimitiveId(u32);

/// Retained-mode drawing surface the knob paints onto.
///
/// Every draw call creates a primitive that stays on the surface until the
/// surface is dropped. The knob only ever moves primitives after creating them.
pub trait Canvas {
    fn draw_oval(
        &mut self,
        bbox: BoundingBox,
        fill: Option<Color>,
        outline: Option<Color>,
        width: f64,
    ) -> PrimitiveId;

    /// `start` and `extent` are in degrees, counter-clockwise from three
    /// o'clock.
    fn draw_arc(
        &mut self,
        bbox: BoundingBox,
        start: f64,
        extent: f64,
        outline: Color,
        width: f64,
    ) -> PrimitiveId;

    fn draw_line(&mut self, points: &[Point], fill: Color, width: f64) -> PrimitiveId;

    /// Replaces the coordinates of an existing primitive. Ovals and arcs take
    /// the two corners of their bounding box.
    fn move_primitive(&mut self, id: PrimitiveId, points: &[Point]) -> Result<(), KnobError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Oval {
        bbox: BoundingBox,
        fill: Option<Color>,
        outline: Option<Color>,
        width: f64,
    },
    Arc {
        bbox: BoundingBox,
        start: f64,
        extent: f64,
        outline: Color,
        width: f64,
    },
    Line {
        points: Vec<Point>,
        fill: Color,
        width: f64,
    },
}

impl Primitive {
    fn reposition(&mut self, points: &[Point]) -> Result<(), KnobError> {
        match self {
            Self::Oval { bbox, .. } | Self::Arc { bbox, .. } => match points {
                [a, b] => {
                    *bbox = BoundingBox::from_corners(*a, *b);
                    Ok(())
                }
                _ => Err(KnobError::invalid(
                    "points",
                    points.len(),
                    "exactly 2 corners",
                )),
            },
            Self::Line { points: current, .. } => {
                if points.len() < 2 {
                    return Err(KnobError::invalid("points", points.len(), ">= 2 points"));
                }
                *current = points.to_vec();
                Ok(())
            }
        }
    }
}

/// A [`Canvas`] that records primitives in paint order, for hosts that
/// repaint from scratch on every frame.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    primitives: Vec<(PrimitiveId, Primitive)>,
    next_id: u32,
    moves: usize,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, primitive: Primitive) -> PrimitiveId {
        self.next_id += 1;
        let id = PrimitiveId(self.next_id);
        self.primitives.push((id, primitive));
        id
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, p)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Number of successful [`Canvas::move_primitive`] calls so far.
    pub fn moves(&self) -> usize {
        self.moves
    }
}

impl Canvas for DisplayList {
    fn draw_oval(
        &mut self,
        bbox: BoundingBox,
        fill: Option<Color>,
        outline: Option<Color>,
        width: f64,
    ) -> PrimitiveId {
        self.push(Primitive::Oval {
            bbox,
            fill,
            outline,
            width,
        })
    }

    fn draw_arc(
        &mut self,
        bbox: BoundingBox,
        start: f64,
        extent: f64,
        outline: Color,
        width: f64,
    ) -> PrimitiveId {
        self.push(Primitive::Arc {
            bbox,
            start,
            extent,
            outline,
            width,
        })
    }

    fn draw_line(&mut self, points: &[Point], fill: Color, width: f64) -> PrimitiveId {
        self.push(Primitive::Line {
            points: points.to_vec(),
            fill,
            width,
        })
    }

    fn move_primitive(&mut self, id: PrimitiveId, points: &[Point]) -> Result<(), KnobError> {
        let (_, primitive) = self
            .primitives
            .iter_mut()
            .find(|(pid, _)| *pid == id)
            .ok_or(KnobError::UnknownPrimitive(id))?;
        primitive.reposition(points)?;
        self.moves += 1;
        Ok(())
    }
}
