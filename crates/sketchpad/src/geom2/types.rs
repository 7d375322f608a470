//! Basic 2D types and tolerances used by the resolver.
//!
//! - `Vec2`: plain `nalgebra` column vector, used for points and directions alike.
//! - `GeomCfg`: centralizes the epsilons for coincident centers and parallel segments.

use nalgebra::Vector2;

/// Point or direction in the sketch plane (screen units).
pub type Vec2 = Vector2<f64>;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Center distance below which two circles count as concentric.
    pub eps_coincident: f64,
    /// Cross-product magnitude below which two segments count as parallel.
    pub eps_det: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_coincident: 1e-10,
            eps_det: 1e-10,
        }
    }
}
