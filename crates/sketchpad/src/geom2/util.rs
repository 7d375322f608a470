use super::types::Vec2;

/// Clockwise quarter turn: `(x, y) ↦ (y, −x)`.
#[inline]
pub fn perp(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// z-component of the 3D cross product of `a` and `b`.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

#[inline]
pub fn dist2(a: Vec2, b: Vec2) -> f64 {
    (a - b).norm_squared()
}

#[inline]
pub fn is_finite(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
