//! Entity types for the scene arena.
//!
//! Circles are primitives. Lines and intersection points are derived: a line
//! stores only `(parent pair, creation hint)` anchors, and intersection points
//! are never stored at all.

use std::fmt;

use crate::geom2::Vec2;

use super::error::SceneError;

/// Stable circle identifier; never reused within a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CircleId(pub u32);

/// Stable line identifier; never reused within a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(pub u32);

impl fmt::Display for CircleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l{}", self.0)
    }
}

/// Reference to any entity that can act as an intersection parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityRef {
    Circle(CircleId),
    Line(LineId),
}

impl From<CircleId> for EntityRef {
    fn from(id: CircleId) -> Self {
        EntityRef::Circle(id)
    }
}

impl From<LineId> for EntityRef {
    fn from(id: LineId) -> Self {
        EntityRef::Line(id)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Circle(id) => id.fmt(f),
            EntityRef::Line(id) => id.fmt(f),
        }
    }
}

/// Two distinct entities of the same kind whose intersection defines a point.
///
/// Invariant: never mixes a circle with a line, never pairs an entity with itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParentPair {
    Circles(CircleId, CircleId),
    Lines(LineId, LineId),
}

impl ParentPair {
    pub fn new(a: EntityRef, b: EntityRef) -> Result<Self, SceneError> {
        match (a, b) {
            (EntityRef::Circle(x), EntityRef::Circle(y)) => Self::circles(x, y),
            (EntityRef::Line(x), EntityRef::Line(y)) => Self::lines(x, y),
            _ => Err(SceneError::MixedParents { a, b }),
        }
    }

    pub fn circles(a: CircleId, b: CircleId) -> Result<Self, SceneError> {
        if a == b {
            return Err(SceneError::SelfParent(a.into()));
        }
        Ok(ParentPair::Circles(a, b))
    }

    pub fn lines(a: LineId, b: LineId) -> Result<Self, SceneError> {
        if a == b {
            return Err(SceneError::SelfParent(a.into()));
        }
        Ok(ParentPair::Lines(a, b))
    }

    #[inline]
    pub fn refs(&self) -> (EntityRef, EntityRef) {
        match *self {
            ParentPair::Circles(a, b) => (a.into(), b.into()),
            ParentPair::Lines(a, b) => (a.into(), b.into()),
        }
    }

    #[inline]
    pub fn contains(&self, e: EntityRef) -> bool {
        let (a, b) = self.refs();
        a == e || b == e
    }
}

/// Primitive disc. Effective radius is `base_radius * scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub base_radius: f64,
    pub scale: f64,
    pub selected: bool,
}

impl Circle {
    #[inline]
    pub fn new(center: Vec2, radius: f64) -> Self {
        Self {
            center,
            base_radius: radius,
            scale: 1.0,
            selected: false,
        }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.base_radius * self.scale
    }

    /// Closed-disc hit test on the effective radius.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        let r = self.radius();
        (p - self.center).norm_squared() <= r * r
    }
}

/// Reference to a derived point: which parents produce it, and where it was at creation.
///
/// The hint is never updated; it encodes "the solution the user clicked", not
/// "where it was last frame".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub parents: ParentPair,
    pub hint: Vec2,
}

impl Anchor {
    #[inline]
    pub fn new(parents: ParentPair, hint: Vec2) -> Self {
        Self { parents, hint }
    }
}

/// Derived segment between two anchors. Endpoints are recomputed on every query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub start: Anchor,
    pub end: Anchor,
}

impl Line {
    /// The up to four entities this line depends on.
    pub fn parents(&self) -> [EntityRef; 4] {
        let (a, b) = self.start.parents.refs();
        let (c, d) = self.end.parents.refs();
        [a, b, c, d]
    }

    #[inline]
    pub fn depends_on(&self, e: EntityRef) -> bool {
        self.start.parents.contains(e) || self.end.parents.contains(e)
    }
}

/// Current endpoints of a line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

/// A live intersection, computed for one frame and then discarded.
///
/// `branch` is the resolver's output index (0 or 1 for circle pairs, always 0 for
/// line pairs). It separates the two solutions within a frame; across frames,
/// identity comes from anchors and the tracker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionPoint {
    pub pos: Vec2,
    pub parents: ParentPair,
    pub branch: u8,
}

impl IntersectionPoint {
    /// Anchor that keeps following this solution in later frames.
    #[inline]
    pub fn anchor(&self) -> Anchor {
        Anchor::new(self.parents, self.pos)
    }
}
