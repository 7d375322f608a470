//! Dynamic geometry core for an interactive circle-and-line sketchpad.
//!
//! Circles are primitives; intersection points and lines anchored to them are
//! derived and recomputed from the current circles on every query. Rendering
//! and input handling live in the presentation shell, which calls the `Scene`
//! mutators and reads back `Frame` queries.
//!
//! Layout
//! - `geom2`: vectors, tolerances, circle×circle and segment×segment resolver.
//! - `track`: nearest-hint disambiguation between two solutions.
//! - `scene`: entity arena, lines, cascade deletion, frame snapshots.
//! - `snap`: cursor picking and snapped drags.
//! - `rand_scene`: reproducible random scenes.

pub mod api;
pub mod geom2;
pub mod rand_scene;
pub mod scene;
pub mod snap;
pub mod track;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{GeomCfg, Vec2};
pub use scene::{Scene, SceneCfg, SceneError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::{GeomCfg, Vec2};
    pub use crate::scene::{
        Anchor, Circle, CircleId, Deletion, EntityRef, Frame, IntersectionPoint, Line, LineId,
        ParentPair, Scene, SceneCfg, SceneError, Segment,
    };
    pub use crate::snap::{Snap, SnapCfg};
}
