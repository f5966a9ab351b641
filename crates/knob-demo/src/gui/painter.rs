use cairo::Context;
use knob::{BoundingBox, DisplayList, Point, Primitive};
use palette::Srgba;
use std::f64::consts::PI;

/// Replays the knob's display list onto a cairo context.
pub fn paint(cr: &Context, list: &DisplayList) -> Result<(), cairo::Error> {
    for primitive in list.iter() {
        match primitive {
            Primitive::Oval {
                bbox,
                fill,
                outline,
                width,
            } => paint_oval(cr, bbox, *fill, *outline, *width)?,
            Primitive::Arc {
                bbox,
                start,
                extent,
                outline,
                width,
            } => paint_arc(cr, bbox, *start, *extent, *outline, *width)?,
            Primitive::Line {
                points,
                fill,
                width,
            } => paint_line(cr, points, *fill, *width)?,
        }
    }
    Ok(())
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn radius(bbox: &BoundingBox) -> f64 {
    bbox.width().min(bbox.height()) / 2.0
}

fn paint_oval(
    cr: &Context,
    bbox: &BoundingBox,
    fill: Option<Srgba<f64>>,
    outline: Option<Srgba<f64>>,
    width: f64,
) -> Result<(), cairo::Error> {
    let center = bbox.center();
    cr.new_path();
    cr.arc(center.x, center.y, radius(bbox), 0.0, 2.0 * PI);

    if let Some(color) = fill {
        set_source(cr, color);
        cr.fill_preserve()?;
    }
    match outline {
        Some(color) if width > 0.0 => {
            set_source(cr, color);
            cr.set_line_width(width);
            cr.stroke()
        }
        _ => {
            cr.new_path();
            Ok(())
        }
    }
}

/// Arc angles are counter-clockwise from three o'clock while cairo turns
/// clockwise on a y-down surface, so both are negated.
fn paint_arc(
    cr: &Context,
    bbox: &BoundingBox,
    start: f64,
    extent: f64,
    outline: Srgba<f64>,
    width: f64,
) -> Result<(), cairo::Error> {
    let center = bbox.center();
    let from = -start.to_radians();
    let to = -(start + extent).to_radians();

    cr.new_path();
    if extent >= 0.0 {
        cr.arc_negative(center.x, center.y, radius(bbox), from, to);
    } else {
        cr.arc(center.x, center.y, radius(bbox), from, to);
    }
    set_source(cr, outline);
    cr.set_line_width(width);
    cr.stroke()
}

fn paint_line(
    cr: &Context,
    points: &[Point],
    fill: Srgba<f64>,
    width: f64,
) -> Result<(), cairo::Error> {
    let Some((first, rest)) = points.split_first() else {
        return Ok(());
    };

    cr.new_path();
    cr.move_to(first.x, first.y);
    for p in rest {
        cr.line_to(p.x, p.y);
    }
    set_source(cr, fill);
    cr.set_line_width(width);
    cr.stroke()
}

#[cfg(test)]
mod tests {
    use super::*;
    use knob::{Knob, KnobConfig};

    /// Paints the knob onto an 80x80 image and returns its ARGB pixels.
    fn render(knob: &Knob<DisplayList>) -> (Vec<u8>, usize) {
        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 80, 80).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            paint(&cr, knob.canvas()).unwrap();
        }
        surface.flush();
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap().to_vec();
        (data, stride)
    }

    /// (alpha, red, green, blue) of one pixel.
    fn pixel(data: &[u8], stride: usize, x: usize, y: usize) -> (u8, u8, u8, u8) {
        let i = y * stride + x * 4;
        // native-endian ARGB32
        let v = u32::from_ne_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);
        ((v >> 24) as u8, (v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    #[test]
    fn test_paint_demo_knob() {
        let knob = Knob::new(&KnobConfig::default(), DisplayList::new()).unwrap();
        let (data, stride) = render(&knob);

        // the body is opaque black
        assert_eq!(pixel(&data, stride, 40, 40), (255, 0, 0, 0));
        // nothing is painted in the corners
        assert_eq!(pixel(&data, stride, 1, 1).0, 0);
        // the yellow ring, 36px out to the right
        let (a, r, g, b) = pixel(&data, stride, 75, 40);
        assert!(a > 0 && r > 0 && g > 0 && b == 0, "{:?}", (a, r, g, b));

        // the marker for value 30 points up and to the left
        let (a, r, g, b) = pixel(&data, stride, 15, 28);
        assert!(a == 255 && r > 128 && g > 128 && b > 128, "{:?}", (a, r, g, b));
    }
}
