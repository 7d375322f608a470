//! Intersection resolver: pure functions, no state, called on demand.
//!
//! - `circle_circle`: chord-midpoint construction, 0 or 2 points.
//! - `segment_segment`: parametric segment crossing, 0 or 1 point.
//!
//! Degenerate policy
//! - Concentric circles, tangency and parallel segments all mean "no result".
//!   There is no single-point tangency case.

use super::types::{GeomCfg, Vec2};
use super::util::{cross, is_finite, perp};

/// Intersections of circle `(c1, r1)` with circle `(c2, r2)`.
///
/// Returns `None` unless the circles cross properly (`|r1−r2| < d < r1+r2`).
/// Output order is `[M + h/d·perp(Δ), M − h/d·perp(Δ)]` with `Δ = c2 − c1`, so it is
/// deterministic for identical inputs; callers must not rely on it across motion.
pub fn circle_circle(c1: Vec2, r1: f64, c2: Vec2, r2: f64, cfg: GeomCfg) -> Option<[Vec2; 2]> {
    if !(is_finite(c1) && is_finite(c2) && r1.is_finite() && r2.is_finite()) {
        return None;
    }
    let delta = c2 - c1;
    let d = delta.norm();
    if d < cfg.eps_coincident {
        return None;
    }
    if d >= r1 + r2 || d <= (r1 - r2).abs() {
        return None;
    }
    let a_off = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    // Near tangency the radicand can dip below zero by rounding alone.
    let h = (r1 * r1 - a_off * a_off).max(0.0).sqrt();
    let mid = c1 + delta * (a_off / d);
    let off = perp(delta) * (h / d);
    Some([mid + off, mid - off])
}

/// Crossing point of segments `p0→p1` and `q0→q1`, if both parameters lie in `[0, 1]`.
pub fn segment_segment(p0: Vec2, p1: Vec2, q0: Vec2, q1: Vec2, cfg: GeomCfg) -> Option<Vec2> {
    let r = p1 - p0;
    let s = q1 - q0;
    let denom = cross(r, s);
    if !denom.is_finite() || denom.abs() < cfg.eps_det {
        return None;
    }
    let qp = q0 - p0;
    let t = cross(qp, s) / denom;
    let u = cross(qp, r) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(p0 + r * t)
    } else {
        None
    }
}
