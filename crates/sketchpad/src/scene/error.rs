use std::fmt;

use super::types::{CircleId, EntityRef, LineId};

/// Structural errors surfaced by scene mutators.
///
/// "No intersection this frame" is never an error; resolver results use `Option`.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    UnknownCircle(CircleId),
    UnknownLine(LineId),
    /// A line parent that is not (or no longer) in the scene.
    UnknownEntity(EntityRef),
    /// Parent pairs must be two circles or two lines.
    MixedParents { a: EntityRef, b: EntityRef },
    SelfParent(EntityRef),
    InvalidRadius(f64),
    InvalidPosition { x: f64, y: f64 },
    InvalidScale(f64),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnknownCircle(id) => write!(f, "no circle {id} in scene"),
            SceneError::UnknownLine(id) => write!(f, "no line {id} in scene"),
            SceneError::UnknownEntity(e) => write!(f, "parent {e} is not in scene"),
            SceneError::MixedParents { a, b } => {
                write!(f, "parents {a} and {b} must both be circles or both be lines")
            }
            SceneError::SelfParent(e) => write!(f, "{e} cannot intersect itself"),
            SceneError::InvalidRadius(r) => write!(f, "radius must be finite and > 0, got {r}"),
            SceneError::InvalidPosition { x, y } => {
                write!(f, "position ({x}, {y}) is not finite")
            }
            SceneError::InvalidScale(d) => write!(f, "scale delta {d} is not finite"),
        }
    }
}

impl std::error::Error for SceneError {}
