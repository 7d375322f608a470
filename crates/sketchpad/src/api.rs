//! Flat re-export surface for shells embedding the core.
//!
//! Mirrors the operation names the shell drives: mutators live on `Scene`,
//! frame-fresh queries on `Scene` or on a `Frame` snapshot.

pub use crate::geom2::{circle_circle, segment_segment, GeomCfg, Vec2};
pub use crate::rand_scene::{draw_scene, RandomSceneCfg, ReplayToken};
pub use crate::scene::{
    Anchor, Circle, CircleId, Deletion, EntityRef, Frame, IntersectionPoint, Line, LineId,
    ParentPair, Scene, SceneCfg, SceneError, Segment,
};
pub use crate::snap::{find_nearest_intersection, pick_anchor, snap_circle_center, Snap, SnapCfg};
pub use crate::track::pick_closest;

/// Segment×segment crossing of two lines' current endpoints (`None` if either is unresolved).
pub fn line_line_intersection(frame: &Frame<'_>, a: LineId, b: LineId) -> Option<Vec2> {
    let (sa, sb) = (frame.segment(a)?, frame.segment(b)?);
    segment_segment(sa.start, sa.end, sb.start, sb.end, frame.scene().cfg().geom)
}

/// Circle×circle solutions for two scene circles, as a candidate list.
pub fn circle_circle_intersections(scene: &Scene, a: CircleId, b: CircleId) -> Vec<Vec2> {
    match (scene.circle(a), scene.circle(b)) {
        (Some(ca), Some(cb)) => {
            circle_circle(ca.center, ca.radius(), cb.center, cb.radius(), scene.cfg().geom)
                .map(Vec::from)
                .unwrap_or_default()
        }
        _ => Vec::new(),
    }
}
