use crate::error::KnobError;
use std::f64::consts::PI;
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Angle of `self` seen from `center`, in `0..2π`.
    ///
    /// Screen y grows downward, so the angle grows clockwise on screen.
    pub fn angle_from(self, center: Point) -> f64 {
        normalize_angle((self.y - center.y).atan2(self.x - center.x))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Maps `atan2` output from `-π..π` onto `0..2π`.
pub fn normalize_angle(angle: f64) -> f64 {
    if angle < 0.0 { angle + 2.0 * PI } else { angle }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// Square box of half side `radius` around `center`.
    pub fn around(center: Point, radius: f64) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    pub fn corners(&self) -> [Point; 2] {
        [Point::new(self.x1, self.y1), Point::new(self.x2, self.y2)]
    }

    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

/// Pixel geometry of the square knob surface.
///
/// Radii are expressed as fractions of half the side length, so `1.0` is a
/// circle touching all four edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    size: f64,
}

impl Geometry {
    pub fn new(size: f64) -> Result<Self, KnobError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(KnobError::invalid("size", size, "> 0"));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn half_size(&self) -> f64 {
        self.size / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.half_size(), self.half_size())
    }

    pub fn check_fraction(name: &'static str, fraction: f64) -> Result<f64, KnobError> {
        if fraction > 0.0 && fraction <= 1.0 {
            Ok(fraction)
        } else {
            Err(KnobError::invalid(name, fraction, "> 0 and <= 1"))
        }
    }

    pub fn radius_in_pixels(&self, fraction: f64) -> Result<f64, KnobError> {
        let fraction = Self::check_fraction("radius", fraction)?;
        Ok(fraction * self.half_size())
    }

    pub fn radius_from_pixels(&self, pixels: f64) -> Result<f64, KnobError> {
        if !(pixels > 0.0 && pixels <= self.size) {
            return Err(KnobError::invalid("radius", pixels, "> 0 and <= size"));
        }
        Ok(pixels / self.half_size())
    }

    /// Box centered in the surface that inscribes a circle of `fraction`.
    pub fn bounding_box(&self, fraction: f64) -> Result<BoundingBox, KnobError> {
        let fraction = Self::check_fraction("radius", fraction)?;
        let inset = (1.0 - fraction) * self.half_size();
        let far = self.size - inset;
        Ok(BoundingBox::new(inset, inset, far, far))
    }

    pub fn point_in_radius(&self, point: Point, fraction: f64) -> Result<bool, KnobError> {
        let fraction = Self::check_fraction("radius", fraction)?;
        Ok(self.within(point, fraction))
    }

    pub(crate) fn within(&self, point: Point, fraction: f64) -> bool {
        point.distance(self.center()) / self.half_size() <= fraction
    }

    /// Point at `fraction` of the radius along a screen angle, where positive
    /// angles turn counter-clockwise as in standard math convention.
    pub(crate) fn polar(&self, fraction: f64, screen_angle: f64) -> Result<Point, KnobError> {
        let radius = self.radius_in_pixels(fraction)?;
        let center = self.center();
        Ok(Point::new(
            center.x + screen_angle.cos() * radius,
            center.y - screen_angle.sin() * radius,
        ))
    }
}

/// Linear conversion between the internal angle (radians) and the value.
///
/// The factor is configured as value per degree and stored pre-scaled so that
/// radians convert directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleScale {
    factor: f64,
}

impl AngleScale {
    pub fn from_value_per_degree(value_per_degree: f64) -> Result<Self, KnobError> {
        if !value_per_degree.is_finite() || value_per_degree == 0.0 {
            return Err(KnobError::invalid(
                "angle_value_factor",
                value_per_degree,
                "finite and != 0",
            ));
        }
        Ok(Self {
            factor: value_per_degree * 180.0 / PI,
        })
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn angle_to_value(&self, angle: f64) -> f64 {
        angle * self.factor
    }

    pub fn value_to_angle(&self, value: f64) -> f64 {
        value / self.factor
    }
}
