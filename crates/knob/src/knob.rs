use crate::canvas::Canvas;
use crate::config::KnobConfig;
use crate::error::KnobError;
use crate::geometry::{AngleScale, Geometry, Point};
use crate::render::{self, KnobColors, Marker, MarkerType};
use crate::turn::{DragSession, PointerEvent, TurnType};

type ValueListener = Box<dyn FnMut(f64)>;

/// A round control turned by dragging the pointer.
///
/// The knob owns its drawing surface and paints the static face once at
/// construction. Afterwards only the marker primitive is moved, whenever the
/// value changes. Listeners registered with
/// [`connect_value_changed`](Self::connect_value_changed) are called
/// synchronously after every accepted change.
///
/// Not thread-safe: drive it from the host's UI loop through
/// [`pointer_down`](Self::pointer_down), [`pointer_move`](Self::pointer_move)
/// and [`pointer_up`](Self::pointer_up).
pub struct Knob<C: Canvas> {
    canvas: C,
    geometry: Geometry,
    knob_radius: f64,
    left_value_limit: Option<f64>,
    right_value_limit: Option<f64>,
    value: f64,
    angle: f64,
    zero_position_angle: f64,
    scale: AngleScale,
    dist_angle_factor: f64,
    step_size: f64,
    turn_type: TurnType,
    marker: Marker,
    session: Option<DragSession>,
    listeners: Vec<ValueListener>,
}

impl<C: Canvas> Knob<C> {
    pub fn new(config: &KnobConfig, canvas: C) -> Result<Self, KnobError> {
        Self::with_colors(config, canvas, &KnobColors::default())
    }

    pub fn with_colors(
        config: &KnobConfig,
        mut canvas: C,
        colors: &KnobColors,
    ) -> Result<Self, KnobError> {
        let geometry = Geometry::new(config.size)?;
        let knob_radius = Geometry::check_fraction("knob_radius", config.knob_radius)?;
        check_limit_pair(config.left_value_limit, config.right_value_limit)?;
        let scale = AngleScale::from_value_per_degree(config.angle_value_factor)?;
        check_value(
            config.value,
            config.left_value_limit,
            config.right_value_limit,
        )?;
        let step_size = check_step_size(config.step_size)?;
        let dist_angle_factor = check_drag_sensitivity(config.drag_sensitivity)?.to_radians();

        let zero_position_angle = config.zero_position_angle.to_radians();
        let angle = scale.value_to_angle(config.value);

        render::draw_face(&mut canvas, &geometry, knob_radius, colors)?;
        let marker = Marker::draw(
            &mut canvas,
            config.marker,
            &geometry,
            knob_radius,
            screen_angle(angle, zero_position_angle),
            colors.marker,
        )?;

        log::debug!(
            "Created {}px knob at value {} turning by {}",
            config.size,
            config.value,
            config.turn_type
        );

        Ok(Self {
            canvas,
            geometry,
            knob_radius,
            left_value_limit: config.left_value_limit,
            right_value_limit: config.right_value_limit,
            value: config.value,
            angle,
            zero_position_angle,
            scale,
            dist_angle_factor,
            step_size,
            turn_type: config.turn_type,
            marker,
            session: None,
            listeners: Vec::new(),
        })
    }

    pub fn connect_value_changed(&mut self, listener: impl FnMut(f64) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn size(&self) -> f64 {
        self.geometry.size()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Internal angle in radians, always `value_to_angle(value)`.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn zero_position_angle(&self) -> f64 {
        self.zero_position_angle
    }

    pub fn knob_radius(&self) -> f64 {
        self.knob_radius
    }

    pub fn left_value_limit(&self) -> Option<f64> {
        self.left_value_limit
    }

    pub fn right_value_limit(&self) -> Option<f64> {
        self.right_value_limit
    }

    /// Stored for hosts; drag updates are not quantized by it.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn turn_type(&self) -> TurnType {
        self.turn_type
    }

    pub fn marker_type(&self) -> MarkerType {
        self.marker.kind()
    }

    pub fn is_turning(&self) -> bool {
        self.session.is_some()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn angle_to_value(&self, angle: f64) -> f64 {
        self.scale.angle_to_value(angle)
    }

    pub fn value_to_angle(&self, value: f64) -> f64 {
        self.scale.value_to_angle(value)
    }

    pub fn value_within_limits(&self, value: f64) -> bool {
        within_limits(value, self.left_value_limit, self.right_value_limit)
    }

    /// Clamps against the left limit first, then the right one. With crossed
    /// limits the right limit wins.
    pub fn limited_value(&self, value: f64) -> f64 {
        let value = match self.left_value_limit {
            Some(left) => left.max(value),
            None => value,
        };
        match self.right_value_limit {
            Some(right) => right.min(value),
            None => value,
        }
    }

    /// Returns whether the value changed. Listeners only hear about changes.
    pub fn set_value(&mut self, value: f64) -> Result<bool, KnobError> {
        check_value(value, self.left_value_limit, self.right_value_limit)?;
        if value == self.value {
            return Ok(false);
        }

        let angle = self.scale.value_to_angle(value);
        self.marker.update(
            &mut self.canvas,
            &self.geometry,
            self.knob_radius,
            screen_angle(angle, self.zero_position_angle),
        )?;
        self.value = value;
        self.angle = angle;
        for listener in &mut self.listeners {
            listener(value);
        }
        Ok(true)
    }

    /// The current value is left alone, even if it falls outside the new
    /// limit.
    pub fn set_left_value_limit(&mut self, limit: Option<f64>) -> Result<(), KnobError> {
        if let (Some(right), Some(left)) = (self.right_value_limit, limit)
            && left == right
        {
            return Err(KnobError::invalid(
                "left_value_limit",
                left,
                format!("!= right_value_limit ({right})"),
            ));
        }
        self.left_value_limit = limit;
        Ok(())
    }

    pub fn set_right_value_limit(&mut self, limit: Option<f64>) -> Result<(), KnobError> {
        if let (Some(left), Some(right)) = (self.left_value_limit, limit)
            && left == right
        {
            return Err(KnobError::invalid(
                "right_value_limit",
                right,
                format!("!= left_value_limit ({left})"),
            ));
        }
        self.right_value_limit = limit;
        Ok(())
    }

    /// Takes effect on the marker from the next value change on; the face is
    /// never repainted.
    pub fn set_knob_radius(&mut self, knob_radius: f64) -> Result<(), KnobError> {
        self.knob_radius = Geometry::check_fraction("knob_radius", knob_radius)?;
        Ok(())
    }

    pub fn set_step_size(&mut self, step_size: f64) -> Result<(), KnobError> {
        self.step_size = check_step_size(step_size)?;
        Ok(())
    }

    pub fn set_turn_type(&mut self, turn_type: TurnType) {
        self.turn_type = turn_type;
    }

    /// Degrees of rotation per pixel of drag in the linear turn modes.
    pub fn set_drag_sensitivity(&mut self, degrees_per_pixel: f64) -> Result<(), KnobError> {
        self.dist_angle_factor = check_drag_sensitivity(degrees_per_pixel)?.to_radians();
        Ok(())
    }

    fn pointer_center(&self, event: &PointerEvent) -> Point {
        event.origin() + self.geometry.center()
    }

    /// Enters turn mode when the press lands on the knob body. Presses
    /// elsewhere are ignored. Returns whether turn mode was entered.
    pub fn pointer_down(&mut self, event: PointerEvent) -> bool {
        if !self.geometry.within(event.local, self.knob_radius) {
            log::debug!("Ignoring press outside the knob at {:?}", event.local);
            return false;
        }

        let center = self.pointer_center(&event);
        let session = DragSession::begin(
            event.screen,
            event.screen.distance(center),
            self.angle,
            event.screen.angle_from(center),
        );
        log::debug!("Entering turn mode: {:?}", session);
        self.session = Some(session);
        true
    }

    /// Turns the knob while in turn mode. Returns whether the value changed.
    ///
    /// Fails only when crossed limits clamp the value outside themselves.
    pub fn pointer_move(&mut self, event: PointerEvent) -> Result<bool, KnobError> {
        let center = self.pointer_center(&event);
        let turn_type = self.turn_type;
        let dist_angle_factor = self.dist_angle_factor;
        let Some(session) = self.session.as_mut() else {
            return Ok(false);
        };

        let candidate = session.candidate_angle(
            turn_type,
            event.screen,
            event.screen.distance(center),
            event.screen.angle_from(center),
            dist_angle_factor,
        );
        let value = self.limited_value(self.scale.angle_to_value(candidate));
        log::trace!(
            "{} turn to {:.4} rad, value {}",
            turn_type,
            candidate,
            value
        );

        self.set_value(value)
    }

    pub fn pointer_up(&mut self, _event: PointerEvent) {
        if let Some(session) = self.session.take() {
            log::debug!(
                "Leaving turn mode at value {} after {} full turns",
                self.value,
                session.full_turns()
            );
        }
    }
}

/// Marker direction on screen: the knob angle offset by the zero position,
/// mirrored because screen y grows downward.
fn screen_angle(angle: f64, zero_position_angle: f64) -> f64 {
    -(angle - zero_position_angle)
}

fn within_limits(value: f64, left: Option<f64>, right: Option<f64>) -> bool {
    !(left.is_some_and(|l| value < l) || right.is_some_and(|r| value > r))
}

fn check_value(value: f64, left: Option<f64>, right: Option<f64>) -> Result<(), KnobError> {
    if !value.is_finite() {
        return Err(KnobError::invalid("value", value, "finite"));
    }
    if !within_limits(value, left, right) {
        return Err(KnobError::invalid(
            "value",
            value,
            format!("between left_value_limit ({left:?}) and right_value_limit ({right:?})"),
        ));
    }
    Ok(())
}

fn check_limit_pair(left: Option<f64>, right: Option<f64>) -> Result<(), KnobError> {
    match (left, right) {
        (Some(l), Some(r)) if l == r => Err(KnobError::invalid(
            "right_value_limit",
            r,
            format!("!= left_value_limit ({l})"),
        )),
        _ => Ok(()),
    }
}

fn check_step_size(step_size: f64) -> Result<f64, KnobError> {
    if step_size == 0.0 {
        return Err(KnobError::invalid("step_size", step_size, "!= 0"));
    }
    Ok(step_size)
}

fn check_drag_sensitivity(degrees_per_pixel: f64) -> Result<f64, KnobError> {
    if !degrees_per_pixel.is_finite() || degrees_per_pixel == 0.0 {
        return Err(KnobError::invalid(
            "drag_sensitivity",
            degrees_per_pixel,
            "finite and != 0",
        ));
    }
    Ok(degrees_per_pixel)
}
