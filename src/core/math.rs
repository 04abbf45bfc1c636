// Math utilities and helper functions

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Check whether `value` has moved more than `epsilon` away from `reference`
pub fn drifted(value: f32, reference: f32, epsilon: f32) -> bool {
    (value - reference).abs() > epsilon
}

/// Sign of a horizontal input component, or None inside the dead zone
pub fn axis_sign(value: f32, dead_zone: f32) -> Option<f32> {
    if value > dead_zone {
        Some(1.0)
    } else if value < -dead_zone {
        Some(-1.0)
    } else {
        None
    }
}
