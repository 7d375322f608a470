//! Derived point identity tracker.
//!
//! A circle pair usually has two solutions. A derived object created on one of
//! them keeps a creation-time hint and, every frame, follows whichever current
//! solution lies nearest to that hint. This is a best-effort heuristic: under
//! fast motion, or when both solutions pass close to the hint, it can switch
//! sides. It is not a continuity guarantee.

use crate::geom2::{dist2, Vec2};

/// Candidate nearest to `hint` (squared Euclidean distance); ties keep the earlier one.
///
/// `None` for an empty candidate list means "temporarily unresolved", not "gone".
pub fn pick_closest(candidates: &[Vec2], hint: Vec2) -> Option<Vec2> {
    let mut best: Option<(Vec2, f64)> = None;
    for &c in candidates {
        let d = dist2(c, hint);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((c, d));
        }
    }
    best.map(|(c, _)| c)
}
