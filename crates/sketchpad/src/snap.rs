//! Interaction/snap controller: cursor → nearest derived point, and snapped drags.
//!
//! Two snap behaviours for a dragged circle, both gated by a modifier flag the
//! shell supplies (the core never polls input devices):
//! - snap-to-intersection: center placed exactly on a nearby intersection;
//! - snap-to-edge: center placed on the nearest point of another circle's edge.
//!
//! Intersection snapping takes precedence over edge snapping.

use crate::geom2::{dist2, Vec2};
use crate::scene::{Anchor, CircleId, EntityRef, Frame, IntersectionPoint, ParentPair};

/// Snap and pick tolerances, in screen units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapCfg {
    /// Click-to-pick radius for intersections.
    pub pick_tolerance: f64,
    /// Drag snap tolerance as a fraction of the dragged circle's radius.
    pub snap_radius_frac: f64,
    /// Floor for the drag snap tolerance, so small circles still snap.
    pub min_snap_tolerance: f64,
}

impl Default for SnapCfg {
    fn default() -> Self {
        Self {
            pick_tolerance: 10.0,
            snap_radius_frac: 0.25,
            min_snap_tolerance: 4.0,
        }
    }
}

impl SnapCfg {
    /// Drag snap tolerance for a circle of effective radius `radius`.
    #[inline]
    pub fn drag_tolerance(&self, radius: f64) -> f64 {
        (self.snap_radius_frac * radius).max(self.min_snap_tolerance)
    }
}

/// Outcome of a drag step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Snap {
    Free(Vec2),
    Intersection(IntersectionPoint),
    Edge { circle: CircleId, pos: Vec2 },
}

impl Snap {
    #[inline]
    pub fn position(&self) -> Vec2 {
        match *self {
            Snap::Free(p) => p,
            Snap::Intersection(ip) => ip.pos,
            Snap::Edge { pos, .. } => pos,
        }
    }

    #[inline]
    pub fn is_snapped(&self) -> bool {
        !matches!(self, Snap::Free(_))
    }
}

/// Closest circle- or line-pair intersection within `tolerance` of `cursor`.
pub fn find_nearest_intersection(
    frame: &Frame<'_>,
    cursor: Vec2,
    tolerance: f64,
) -> Option<IntersectionPoint> {
    nearest_within(frame.intersections(), cursor, tolerance)
}

/// Click-to-pick for line construction: anchor on the nearest intersection.
pub fn pick_anchor(frame: &Frame<'_>, cursor: Vec2, tolerance: f64) -> Option<Anchor> {
    find_nearest_intersection(frame, cursor, tolerance).map(|ip| ip.anchor())
}

/// Where a circle dragged to `proposed` should land.
///
/// Any intersection point is a target except those that move with the dragged
/// circle: its own circle-pair points, and line crossings where either line is
/// built on it.
pub fn snap_circle_center(
    frame: &Frame<'_>,
    dragged: CircleId,
    proposed: Vec2,
    modifier: bool,
    cfg: &SnapCfg,
) -> Snap {
    if !modifier {
        return Snap::Free(proposed);
    }
    let Some(circle) = frame.scene().circle(dragged) else {
        return Snap::Free(proposed);
    };
    let tol = cfg.drag_tolerance(circle.radius());
    let me = EntityRef::Circle(dragged);
    let riders = frame.scene().dependents(me);

    let foreign = frame.intersections().into_iter().filter(|ip| match ip.parents {
        ParentPair::Circles(..) => !ip.parents.contains(me),
        ParentPair::Lines(a, b) => !riders.contains(&a) && !riders.contains(&b),
    });
    if let Some(ip) = nearest_within(foreign, proposed, tol) {
        tracing::trace!(circle = %dragged, x = ip.pos.x, y = ip.pos.y, "snap to intersection");
        return Snap::Intersection(ip);
    }

    let mut best: Option<(CircleId, Vec2, f64)> = None;
    for (id, other) in frame.scene().list_circles() {
        if id == dragged {
            continue;
        }
        let delta = other.center - proposed;
        let d = delta.norm();
        // Dragged onto the other center: no edge direction to project along.
        if d < frame.scene().cfg().geom.eps_coincident {
            continue;
        }
        let gap = (d - other.radius()).abs();
        if gap <= tol && best.is_none_or(|(_, _, g)| gap < g) {
            let pos = other.center - delta / d * other.radius();
            best = Some((id, pos, gap));
        }
    }
    match best {
        Some((circle, pos, _)) => {
            tracing::trace!(%circle, x = pos.x, y = pos.y, "snap to edge");
            Snap::Edge { circle, pos }
        }
        None => Snap::Free(proposed),
    }
}

fn nearest_within(
    points: impl IntoIterator<Item = IntersectionPoint>,
    cursor: Vec2,
    tolerance: f64,
) -> Option<IntersectionPoint> {
    if tolerance.is_nan() || tolerance < 0.0 {
        return None;
    }
    let tol2 = tolerance * tolerance;
    let mut best: Option<(IntersectionPoint, f64)> = None;
    for ip in points {
        let d = dist2(ip.pos, cursor);
        if d <= tol2 && best.is_none_or(|(_, bd)| d < bd) {
            best = Some((ip, d));
        }
    }
    best.map(|(ip, _)| ip)
}
