//! Scene graph: the arena of circles and lines plus the operations the
//! presentation shell calls.
//!
//! Model
//! - Circles are authored directly (create, drag, scale, select, delete).
//! - Lines reference their parents by id (`EntityRef`/`ParentPair`), never by
//!   ownership, so Lines-on-Lines cannot form ownership cycles.
//! - Intersections are never stored; every query recomputes them from the
//!   current circles via a `Frame`.
//!
//! Deletion policy
//! - Removing an entity cascades transitively: any line with a missing parent
//!   is removed, repeated until nothing changes.
//!
//! Code cross-refs: `frame::Frame`, `crate::snap`, `crate::track::pick_closest`

mod error;
mod frame;
mod types;

pub use error::SceneError;
pub use frame::Frame;
pub use types::{
    Anchor, Circle, CircleId, EntityRef, IntersectionPoint, Line, LineId, ParentPair, Segment,
};

use std::collections::{BTreeMap, BTreeSet};

use crate::geom2::{is_finite, GeomCfg, Vec2};
use crate::snap::{self, Snap, SnapCfg};

/// Scene behaviour knobs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneCfg {
    /// Lower bound for `Circle::scale`; keeps effective radii positive.
    pub min_scale: f64,
    /// Scale change per wheel step in `scroll_at`.
    pub scroll_step: f64,
    pub geom: GeomCfg,
    pub snap: SnapCfg,
}

impl Default for SceneCfg {
    fn default() -> Self {
        Self {
            min_scale: 0.05,
            scroll_step: 0.1,
            geom: GeomCfg::default(),
            snap: SnapCfg::default(),
        }
    }
}

/// Ids removed by one deletion, cascade included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deletion {
    pub circles: Vec<CircleId>,
    pub lines: Vec<LineId>,
}

impl Deletion {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.circles.is_empty() && self.lines.is_empty()
    }
}

/// Mutable collection of circles and lines. Iteration order is creation order.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub(crate) circles: BTreeMap<CircleId, Circle>,
    pub(crate) lines: BTreeMap<LineId, Line>,
    pub(crate) cfg: SceneCfg,
    next_circle: u32,
    next_line: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cfg(cfg: SceneCfg) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    #[inline]
    pub fn cfg(&self) -> &SceneCfg {
        &self.cfg
    }

    // ----- mutators -------------------------------------------------------

    pub fn create_circle(&mut self, x: f64, y: f64, radius: f64) -> Result<CircleId, SceneError> {
        self.add_circle(Vec2::new(x, y), radius)
    }

    pub fn add_circle(&mut self, center: Vec2, radius: f64) -> Result<CircleId, SceneError> {
        check_position(center)?;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SceneError::InvalidRadius(radius));
        }
        let id = CircleId(self.next_circle);
        self.next_circle += 1;
        self.circles.insert(id, Circle::new(center, radius));
        tracing::debug!(%id, x = center.x, y = center.y, radius, "circle created");
        Ok(id)
    }

    pub fn set_circle_position(&mut self, id: CircleId, x: f64, y: f64) -> Result<(), SceneError> {
        let p = Vec2::new(x, y);
        check_position(p)?;
        self.circle_mut(id)?.center = p;
        Ok(())
    }

    /// Add `scale_delta` to the circle's scale, clamped to `SceneCfg::min_scale`.
    /// Returns the new scale.
    pub fn set_circle_scale(&mut self, id: CircleId, scale_delta: f64) -> Result<f64, SceneError> {
        if !scale_delta.is_finite() {
            return Err(SceneError::InvalidScale(scale_delta));
        }
        let min_scale = self.cfg.min_scale;
        let c = self.circle_mut(id)?;
        c.scale = (c.scale + scale_delta).max(min_scale);
        Ok(c.scale)
    }

    pub fn set_selected(&mut self, id: CircleId, selected: bool) -> Result<(), SceneError> {
        self.circle_mut(id)?.selected = selected;
        Ok(())
    }

    /// Flip selection; returns the new state.
    pub fn toggle_selected(&mut self, id: CircleId) -> Result<bool, SceneError> {
        let c = self.circle_mut(id)?;
        c.selected = !c.selected;
        Ok(c.selected)
    }

    /// Wheel input over the canvas: rescale the topmost circle under `cursor`.
    pub fn scroll_at(&mut self, cursor: Vec2, wheel_steps: f64) -> Option<CircleId> {
        let id = self.circle_at(cursor)?;
        let delta = wheel_steps * self.cfg.scroll_step;
        self.set_circle_scale(id, delta).ok()?;
        Some(id)
    }

    pub fn create_line(
        &mut self,
        start_parents: ParentPair,
        start_point: Vec2,
        end_parents: ParentPair,
        end_point: Vec2,
    ) -> Result<LineId, SceneError> {
        self.add_line(
            Anchor::new(start_parents, start_point),
            Anchor::new(end_parents, end_point),
        )
    }

    /// Insert a line between two anchors. Every parent must currently exist.
    pub fn add_line(&mut self, start: Anchor, end: Anchor) -> Result<LineId, SceneError> {
        check_position(start.hint)?;
        check_position(end.hint)?;
        let line = Line { start, end };
        if let Some(missing) = line.parents().into_iter().find(|e| !self.contains(*e)) {
            return Err(SceneError::UnknownEntity(missing));
        }
        let id = LineId(self.next_line);
        self.next_line += 1;
        self.lines.insert(id, line);
        tracing::debug!(%id, "line created");
        Ok(id)
    }

    pub fn delete_selected(&mut self) -> Deletion {
        self.delete_selected_circles()
    }

    /// Remove every selected circle and, transitively, every line depending on one.
    pub fn delete_selected_circles(&mut self) -> Deletion {
        let mut gone = Deletion::default();
        self.circles.retain(|&id, c| {
            if c.selected {
                gone.circles.push(id);
            }
            !c.selected
        });
        self.cascade(&mut gone);
        if !gone.is_empty() {
            tracing::debug!(
                circles = gone.circles.len(),
                lines = gone.lines.len(),
                "deleted selection"
            );
        }
        gone
    }

    /// Remove one line and everything built on it.
    pub fn remove_line(&mut self, id: LineId) -> Result<Deletion, SceneError> {
        if self.lines.remove(&id).is_none() {
            return Err(SceneError::UnknownLine(id));
        }
        let mut gone = Deletion {
            circles: Vec::new(),
            lines: vec![id],
        };
        self.cascade(&mut gone);
        tracing::debug!(%id, cascaded = gone.lines.len() - 1, "line removed");
        Ok(gone)
    }

    pub fn clear_scene(&mut self) {
        self.circles.clear();
        self.lines.clear();
        tracing::debug!("scene cleared");
    }

    /// Move a circle to `proposed`, snapped when `modifier` holds. Returns the applied snap.
    pub fn drag_circle(
        &mut self,
        id: CircleId,
        proposed: Vec2,
        modifier: bool,
    ) -> Result<Snap, SceneError> {
        check_position(proposed)?;
        if !self.circles.contains_key(&id) {
            return Err(SceneError::UnknownCircle(id));
        }
        let snap = {
            let frame = self.frame();
            snap::snap_circle_center(&frame, id, proposed, modifier, &self.cfg.snap)
        };
        let p = snap.position();
        self.set_circle_position(id, p.x, p.y)?;
        Ok(snap)
    }

    // ----- queries --------------------------------------------------------

    /// Snapshot for one frame; all derived queries below go through it.
    pub fn frame(&self) -> Frame<'_> {
        Frame::new(self)
    }

    pub fn circle(&self, id: CircleId) -> Option<&Circle> {
        self.circles.get(&id)
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    pub fn list_circles(&self) -> impl Iterator<Item = (CircleId, &Circle)> + '_ {
        self.circles.iter().map(|(&id, c)| (id, c))
    }

    pub fn list_lines(&self) -> impl Iterator<Item = (LineId, &Line)> + '_ {
        self.lines.iter().map(|(&id, l)| (id, l))
    }

    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn contains(&self, e: EntityRef) -> bool {
        match e {
            EntityRef::Circle(id) => self.circles.contains_key(&id),
            EntityRef::Line(id) => self.lines.contains_key(&id),
        }
    }

    /// Lines built on `root`, directly or through other lines.
    ///
    /// One pass in id order suffices: a line's parents always have smaller ids.
    pub fn dependents(&self, root: EntityRef) -> BTreeSet<LineId> {
        let mut out = BTreeSet::new();
        for (&id, line) in &self.lines {
            let hit = line.parents().iter().any(|&e| {
                e == root || matches!(e, EntityRef::Line(l) if out.contains(&l))
            });
            if hit {
                out.insert(id);
            }
        }
        out
    }

    /// Topmost (most recently created) circle whose disc contains `p`.
    pub fn circle_at(&self, p: Vec2) -> Option<CircleId> {
        self.circles
            .iter()
            .rev()
            .find(|(_, c)| c.contains(p))
            .map(|(&id, _)| id)
    }

    /// Current endpoints of a line; `None` when it does not resolve this frame.
    pub fn line_endpoints(&self, id: LineId) -> Option<Segment> {
        self.frame().segment(id)
    }

    pub fn resolve(&self, anchor: &Anchor) -> Option<Vec2> {
        self.frame().resolve(anchor)
    }

    pub fn list_valid_lines(&self) -> Vec<(LineId, Segment)> {
        self.frame().valid_lines()
    }

    pub fn list_circle_intersections(&self) -> Vec<IntersectionPoint> {
        self.frame().circle_intersections()
    }

    pub fn list_line_intersections(&self) -> Vec<IntersectionPoint> {
        self.frame().line_intersections()
    }

    pub fn find_nearest_intersection(
        &self,
        cursor: Vec2,
        tolerance: f64,
    ) -> Option<IntersectionPoint> {
        snap::find_nearest_intersection(&self.frame(), cursor, tolerance)
    }

    /// Click-to-pick with `SnapCfg::pick_tolerance`: anchor on the nearest intersection.
    pub fn pick_at(&self, cursor: Vec2) -> Option<Anchor> {
        snap::pick_anchor(&self.frame(), cursor, self.cfg.snap.pick_tolerance)
    }

    // ----- internals ------------------------------------------------------

    fn circle_mut(&mut self, id: CircleId) -> Result<&mut Circle, SceneError> {
        self.circles
            .get_mut(&id)
            .ok_or(SceneError::UnknownCircle(id))
    }

    /// Drop lines with a missing parent until a fixpoint is reached.
    fn cascade(&mut self, gone: &mut Deletion) {
        loop {
            let doomed: Vec<LineId> = self
                .lines
                .iter()
                .filter(|(_, l)| l.parents().iter().any(|e| !self.contains(*e)))
                .map(|(&id, _)| id)
                .collect();
            if doomed.is_empty() {
                break;
            }
            for id in doomed {
                self.lines.remove(&id);
                gone.lines.push(id);
            }
        }
    }
}

fn check_position(p: Vec2) -> Result<(), SceneError> {
    if is_finite(p) {
        Ok(())
    } else {
        Err(SceneError::InvalidPosition { x: p.x, y: p.y })
    }
}

#[cfg(test)]
mod tests;
