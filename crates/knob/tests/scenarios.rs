//! End-to-end interaction scenarios, driven through the pointer entry points.

use knob::{DisplayList, Knob, KnobConfig, Point, PointerEvent, Primitive, TurnType};
use std::cell::RefCell;
use std::rc::Rc;

const EPS: f64 = 1e-9;
const VALUE_PER_DEGREE: f64 = 100.0 / 320.0;

/// Where the host window places the knob on screen.
const ORIGIN: Point = Point { x: 85.0, y: 85.0 };
/// Center of the 80px demo knob.
const CENTER: Point = Point { x: 40.0, y: 40.0 };

/// Pointer event at `degrees` clockwise around the knob center, `radius`
/// pixels out.
fn polar(degrees: f64, radius: f64) -> PointerEvent {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let local = Point::new(CENTER.x + radius * cos, CENTER.y + radius * sin);
    PointerEvent::at(local, ORIGIN)
}

struct Harness {
    knob: Knob<DisplayList>,
    changes: Rc<RefCell<Vec<f64>>>,
}

impl Harness {
    fn new(config: KnobConfig) -> Self {
        let mut knob = Knob::new(&config, DisplayList::new()).unwrap();
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        knob.connect_value_changed(move |v| sink.borrow_mut().push(v));
        Self { knob, changes }
    }

    fn demo() -> Self {
        Self::new(KnobConfig::default())
    }

    fn drag_around(&mut self, degrees: &[f64]) {
        let (first, rest) = degrees.split_first().unwrap();
        assert!(self.knob.pointer_down(polar(*first, 20.0)));
        for d in rest {
            self.knob.pointer_move(polar(*d, 20.0)).unwrap();
        }
    }

    fn change_count(&self) -> usize {
        self.changes.borrow().len()
    }
}

#[test]
fn test_demo_knob_initial_state() {
    let harness = Harness::demo();
    assert_eq!(format!("{:.2}", harness.knob.value()), "30.00");
    assert_eq!(harness.knob.turn_type(), TurnType::Angle);
    assert_eq!(harness.change_count(), 0);
}

#[test]
fn test_quarter_turn_in_angle_mode() {
    let mut harness = Harness::demo();
    let before = harness.knob.value();

    assert!(harness.knob.pointer_down(polar(0.0, 20.0)));
    assert!(harness.knob.pointer_move(polar(90.0, 20.0)).unwrap());
    harness.knob.pointer_up(polar(90.0, 20.0));

    let expected = (before + 90.0 * VALUE_PER_DEGREE).clamp(0.0, 100.0);
    assert!((harness.knob.value() - expected).abs() < EPS);
    assert_eq!(harness.change_count(), 1);
    assert!(!harness.knob.is_turning());
}

#[test]
fn test_assigning_below_left_limit_fails() {
    let mut harness = Harness::demo();
    let err = harness.knob.set_value(-5.0).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(harness.knob.value(), 30.0);
    assert_eq!(harness.change_count(), 0);
}

#[test]
fn test_press_outside_knob_disc_changes_nothing() {
    let mut harness = Harness::demo();
    // inside the rings but outside the turnable disc
    assert!(!harness.knob.pointer_down(polar(0.0, 34.0)));
    for d in [10.0, 45.0, 90.0, 180.0] {
        assert!(!harness.knob.pointer_move(polar(d, 20.0)).unwrap());
    }
    harness.knob.pointer_up(polar(180.0, 20.0));

    assert_eq!(harness.knob.value(), 30.0);
    assert_eq!(harness.change_count(), 0);
    assert_eq!(harness.knob.canvas().moves(), 0);
}

#[test]
fn test_multiple_revolutions_keep_counting() {
    let mut config = KnobConfig::default();
    config.left_value_limit = None;
    config.right_value_limit = None;
    config.value = 0.0;
    let mut harness = Harness::new(config);

    let mut path = Vec::new();
    for lap in 0..3 {
        for step in 0..12 {
            path.push(f64::from(lap * 360 + step * 30) % 360.0);
        }
    }
    path.push(15.0);
    harness.drag_around(&path);

    let session = harness.knob.drag_session().unwrap();
    assert_eq!(session.full_turns(), 3);
    let expected = (3.0 * 360.0 + 15.0) * VALUE_PER_DEGREE;
    assert!((harness.knob.value() - expected).abs() < 1e-6);

    // values grow monotonically past a single revolution
    let changes = harness.changes.borrow();
    assert!(changes.windows(2).all(|w| w[1] > w[0]));
    assert!(changes.last().copied().unwrap() > 360.0 * VALUE_PER_DEGREE);
}

#[test]
fn test_turning_back_decrements_revolutions() {
    let mut config = KnobConfig::default();
    config.left_value_limit = None;
    config.right_value_limit = None;
    config.value = 0.0;
    let mut harness = Harness::new(config);

    harness.drag_around(&[30.0, 0.0, 330.0, 240.0, 150.0, 60.0, 0.0, 300.0]);
    let session = harness.knob.drag_session().unwrap();
    assert_eq!(session.full_turns(), -2);
    let expected = -(360.0 + 90.0) * VALUE_PER_DEGREE;
    assert!((harness.knob.value() - expected).abs() < 1e-6);
}

#[test]
fn test_angle_drag_stops_at_right_limit() {
    let mut harness = Harness::demo();
    harness.drag_around(&[0.0, 90.0, 180.0, 270.0, 0.0, 90.0, 180.0, 270.0]);
    assert_eq!(harness.knob.value(), 100.0);
    assert!((harness.knob.angle() - harness.knob.value_to_angle(100.0)).abs() < EPS);

    // sitting at the limit raises no further notifications
    let count = harness.change_count();
    harness.knob.pointer_move(polar(300.0, 20.0)).unwrap();
    harness.knob.pointer_move(polar(330.0, 20.0)).unwrap();
    assert_eq!(harness.change_count(), count);
}

#[test]
fn test_marker_tracks_value() {
    let mut harness = Harness::demo();
    harness.knob.set_value(0.0).unwrap();

    let marker_end = |knob: &Knob<DisplayList>| match knob.canvas().iter().last() {
        Some(Primitive::Line { points, .. }) => points[1],
        other => panic!("expected the line marker last, got {other:?}"),
    };

    // the zero position is 250 degrees counter-clockwise, down and to the left
    let end = marker_end(&harness.knob);
    let center = harness.knob.geometry().center();
    assert_eq!(center, CENTER);
    assert!((end.angle_from(center) - 110.0_f64.to_radians()).abs() < 1e-9);

    // the full range sweeps 320 degrees clockwise, ending down and to the right
    harness.knob.set_value(100.0).unwrap();
    let end = marker_end(&harness.knob);
    assert!((end.angle_from(center) - 70.0_f64.to_radians()).abs() < 1e-9);
    assert!((end.distance(center) - 32.0).abs() < 1e-9);
    assert_eq!(harness.knob.canvas().len(), 6);
}
