//! 2D vectors, tolerances and the intersection resolver.
//!
//! Purpose
//! - Provide the stateless pieces every derived entity is recomputed from:
//!   circle×circle (0 or 2 points) and segment×segment (0 or 1 point).
//! - Keep numerics explicit: every degenerate branch is eps-gated and returns
//!   "no result" instead of propagating NaN/Inf.
//!
//! Code cross-refs: `solvers::{circle_circle, segment_segment}`, `types::GeomCfg`

mod solvers;
mod types;
mod util;

pub use solvers::{circle_circle, segment_segment};
pub use types::{GeomCfg, Vec2};
pub use util::{cross, dist2, is_finite, perp};
