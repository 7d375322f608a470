//! Random scenes (uniform circles + lines anchored on their intersections).
//!
//! Purpose
//! - Deterministic, indexable scene streams for benchmarks, randomized tests and
//!   the CLI `random` command.
//!
//! Model
//! - Circle centers uniform in `[0, extent]²`, radii uniform in `[radius_min, radius_max]`.
//! - Each line picks two distinct current circle intersections as anchors.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::scene::{Scene, SceneError};

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Random scene parameters.
#[derive(Clone, Copy, Debug)]
pub struct RandomSceneCfg {
    pub circles: usize,
    /// Upper bound; fewer lines are created when there are too few intersections.
    pub lines: usize,
    /// Side of the square that circle centers are drawn from.
    pub extent: f64,
    pub radius_min: f64,
    pub radius_max: f64,
}

impl Default for RandomSceneCfg {
    fn default() -> Self {
        Self {
            circles: 16,
            lines: 8,
            extent: 800.0,
            radius_min: 40.0,
            radius_max: 160.0,
        }
    }
}

/// Draw a scene for `tok`. Same `(cfg, tok)` gives the same scene.
pub fn draw_scene(cfg: RandomSceneCfg, tok: ReplayToken) -> Result<Scene, SceneError> {
    let mut rng = tok.to_std_rng();
    let mut scene = Scene::new();
    let extent = cfg.extent.abs().max(1.0);
    let r_lo = cfg.radius_min.max(1e-3);
    let r_hi = cfg.radius_max.max(r_lo);
    for _ in 0..cfg.circles {
        let x = rng.gen::<f64>() * extent;
        let y = rng.gen::<f64>() * extent;
        let r = r_lo + rng.gen::<f64>() * (r_hi - r_lo);
        scene.create_circle(x, y, r)?;
    }

    let points = scene.list_circle_intersections();
    if points.len() >= 2 {
        for _ in 0..cfg.lines {
            let i = rng.gen_range(0..points.len());
            let mut j = rng.gen_range(0..points.len() - 1);
            if j >= i {
                j += 1;
            }
            scene.add_line(points[i].anchor(), points[j].anchor())?;
        }
    }
    tracing::debug!(
        seed = tok.seed,
        index = tok.index,
        circles = scene.circle_count(),
        lines = scene.line_count(),
        "random scene"
    );
    Ok(scene)
}
