//! One consistent snapshot of derived state.
//!
//! A `Frame` borrows the scene immutably, so no circle can move while derived
//! entities are being read. Lines are resolved once, in id order. A line can
//! only reference entities that existed before it, so every parent line is
//! already resolved when its children are.

use std::collections::BTreeMap;

use crate::geom2::{circle_circle, segment_segment, Vec2};
use crate::track::pick_closest;

use super::types::{Anchor, IntersectionPoint, LineId, ParentPair, Segment};
use super::Scene;

type Segments = BTreeMap<LineId, Option<Segment>>;

#[derive(Debug)]
pub struct Frame<'a> {
    scene: &'a Scene,
    segments: Segments,
}

impl<'a> Frame<'a> {
    pub(super) fn new(scene: &'a Scene) -> Self {
        let mut segments = Segments::new();
        for (&id, line) in &scene.lines {
            let start = resolve_in(scene, &segments, &line.start);
            let end = resolve_in(scene, &segments, &line.end);
            let seg = match (start, end) {
                (Some(start), Some(end)) => Some(Segment { start, end }),
                _ => None,
            };
            segments.insert(id, seg);
        }
        Self { scene, segments }
    }

    #[inline]
    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// Current solutions for a parent pair, in resolver order.
    pub fn candidates(&self, parents: ParentPair) -> Vec<Vec2> {
        candidates_in(self.scene, &self.segments, parents)
    }

    /// Follow an anchor to its current position, if its parents intersect right now.
    pub fn resolve(&self, anchor: &Anchor) -> Option<Vec2> {
        resolve_in(self.scene, &self.segments, anchor)
    }

    /// Current endpoints of `id`; `None` if unknown or unresolved this frame.
    pub fn segment(&self, id: LineId) -> Option<Segment> {
        self.segments.get(&id).copied().flatten()
    }

    /// Lines whose both endpoints resolve this frame, in id order.
    pub fn valid_lines(&self) -> Vec<(LineId, Segment)> {
        self.segments
            .iter()
            .filter_map(|(&id, seg)| seg.map(|s| (id, s)))
            .collect()
    }

    /// Every circle-pair solution, pairs in id order.
    pub fn circle_intersections(&self) -> Vec<IntersectionPoint> {
        let ids: Vec<_> = self.scene.circles.keys().copied().collect();
        let mut out = Vec::new();
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                let parents = ParentPair::Circles(a, b);
                for (branch, pos) in self.candidates(parents).into_iter().enumerate() {
                    out.push(IntersectionPoint {
                        pos,
                        parents,
                        branch: branch as u8,
                    });
                }
            }
        }
        out
    }

    /// Every crossing between two currently valid lines.
    pub fn line_intersections(&self) -> Vec<IntersectionPoint> {
        let valid = self.valid_lines();
        let geom = self.scene.cfg.geom;
        let mut out = Vec::new();
        for (i, &(a, sa)) in valid.iter().enumerate() {
            for &(b, sb) in &valid[i + 1..] {
                if let Some(pos) = segment_segment(sa.start, sa.end, sb.start, sb.end, geom) {
                    out.push(IntersectionPoint {
                        pos,
                        parents: ParentPair::Lines(a, b),
                        branch: 0,
                    });
                }
            }
        }
        out
    }

    /// Circle-pair solutions followed by line-pair crossings.
    pub fn intersections(&self) -> Vec<IntersectionPoint> {
        let mut out = self.circle_intersections();
        out.extend(self.line_intersections());
        out
    }
}

fn candidates_in(scene: &Scene, segments: &Segments, parents: ParentPair) -> Vec<Vec2> {
    let geom = scene.cfg.geom;
    match parents {
        ParentPair::Circles(a, b) => {
            let (Some(ca), Some(cb)) = (scene.circles.get(&a), scene.circles.get(&b)) else {
                return Vec::new();
            };
            circle_circle(ca.center, ca.radius(), cb.center, cb.radius(), geom)
                .map(Vec::from)
                .unwrap_or_default()
        }
        ParentPair::Lines(a, b) => {
            let (Some(Some(sa)), Some(Some(sb))) = (segments.get(&a), segments.get(&b)) else {
                return Vec::new();
            };
            segment_segment(sa.start, sa.end, sb.start, sb.end, geom)
                .into_iter()
                .collect()
        }
    }
}

fn resolve_in(scene: &Scene, segments: &Segments, anchor: &Anchor) -> Option<Vec2> {
    pick_closest(&candidates_in(scene, segments, anchor.parents), anchor.hint)
}
