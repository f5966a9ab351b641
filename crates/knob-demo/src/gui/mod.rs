pub mod app;
pub mod painter;
pub mod theme;

/// Window opacity for a knob value: half transparent at 0, opaque at 100.
pub fn window_opacity(value: f64) -> f64 {
    (value / 100.0 / 2.0 + 0.5).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_opacity() {
        assert_eq!(window_opacity(0.0), 0.5);
        assert!((window_opacity(30.0) - 0.65).abs() < 1e-12);
        assert_eq!(window_opacity(100.0), 1.0);
        // unbounded knobs can leave the 0..100 range
        assert_eq!(window_opacity(-400.0), 0.0);
        assert_eq!(window_opacity(250.0), 1.0);
    }
}
