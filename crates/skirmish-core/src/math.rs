//! Small numeric helpers.

use glam::Vec2;

/// Squared distance between two points. Cheaper than `distance` for comparisons.
#[inline]
pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    distance_squared(a, b).sqrt()
}

/// Constrain `value` to `[min, max]`.
///
/// Unlike `f32::clamp` this never panics; if `min > max` the result is `min`.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Largest finite `f32` strictly below `value`.
///
/// Infinities and NaN are returned unchanged.
pub fn next_down(value: f32) -> f32 {
    if !value.is_finite() {
        return value;
    }
    if value == 0.0 {
        // Smallest negative subnormal.
        return -f32::from_bits(1);
    }
    let bits = value.to_bits();
    if value > 0.0 {
        f32::from_bits(bits - 1)
    } else {
        f32::from_bits(bits + 1)
    }
}
