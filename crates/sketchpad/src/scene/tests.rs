use super::*;
use crate::geom2::segment_segment;
use nalgebra::vector;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn close(a: Vec2, b: Vec2) -> bool {
    (a - b).norm() < 1e-9
}

/// A(0,0) r5 and B(8,0) r5, crossing at (4, ±3).
fn lens(s: &mut Scene) -> (CircleId, CircleId) {
    let a = s.create_circle(0.0, 0.0, 5.0).unwrap();
    let b = s.create_circle(8.0, 0.0, 5.0).unwrap();
    (a, b)
}

/// Vertical chord of a lens: (4,-3) → (4,3) in the unmoved position.
fn chord(s: &mut Scene, a: CircleId, b: CircleId, lo: Vec2, hi: Vec2) -> LineId {
    let pair = ParentPair::circles(a, b).unwrap();
    s.create_line(pair, lo, pair, hi).unwrap()
}

#[test]
fn textbook_lens_then_move() {
    let mut s = Scene::new();
    let (a, b) = lens(&mut s);
    let pts = s.list_circle_intersections();
    assert_eq!(pts.len(), 2);
    assert!(close(pts[0].pos, vector![4.0, -3.0]));
    assert!(close(pts[1].pos, vector![4.0, 3.0]));
    assert_eq!((pts[0].branch, pts[1].branch), (0, 1));
    assert!(pts.iter().all(|p| p.parents == ParentPair::Circles(a, b)));

    s.set_circle_position(b, 6.0, 0.0).unwrap();
    let pts = s.list_circle_intersections();
    assert_eq!(pts.len(), 2);
    for p in &pts {
        assert!((p.pos.norm() - 5.0).abs() < 1e-6);
        assert!(((p.pos - vector![6.0, 0.0]).norm() - 5.0).abs() < 1e-6);
        assert!((p.pos.x - 3.0).abs() < 1e-9);
    }
}

#[test]
fn tangent_and_separate_circles_have_no_points() {
    let mut s = Scene::new();
    s.create_circle(0.0, 0.0, 5.0).unwrap();
    let b = s.create_circle(10.0, 0.0, 5.0).unwrap();
    assert!(s.list_circle_intersections().is_empty());
    s.set_circle_position(b, 40.0, 0.0).unwrap();
    assert!(s.list_circle_intersections().is_empty());
}

#[test]
fn line_tracks_same_side_under_small_steps() {
    let mut s = Scene::new();
    let (a, b) = lens(&mut s);
    let c = s.create_circle(30.0, 0.0, 5.0).unwrap();
    let d = s.create_circle(38.0, 0.0, 5.0).unwrap();
    let l = s
        .create_line(
            ParentPair::circles(a, b).unwrap(),
            vector![4.0, 3.0],
            ParentPair::circles(c, d).unwrap(),
            vector![34.0, 3.0],
        )
        .unwrap();

    let seg = s.line_endpoints(l).unwrap();
    assert!(close(seg.start, vector![4.0, 3.0]));
    assert!(close(seg.end, vector![34.0, 3.0]));

    // Slide B from x=8 to x=6 in small steps; the start follows the upper solution.
    for k in 1..=20 {
        let x = 8.0 - 0.1 * k as f64;
        s.set_circle_position(b, x, 0.0).unwrap();
        let frame = s.frame();
        let seg = frame.segment(l).unwrap();
        let cands = frame.candidates(ParentPair::Circles(a, b));
        assert!(cands.iter().any(|p| close(*p, seg.start)));
        assert!(seg.start.y > 0.0, "jumped to the lower solution at x={x}");
        assert!(close(seg.end, vector![34.0, 3.0]));
    }
    let seg = s.line_endpoints(l).unwrap();
    assert!(close(seg.start, vector![3.0, 4.0]));
}

#[test]
fn creation_hint_is_never_updated() {
    let mut s = Scene::new();
    let (a, b) = lens(&mut s);
    let l = chord(&mut s, a, b, vector![4.0, -3.0], vector![4.0, 3.0]);
    // Translate the whole lens by (5, 5): the new solutions are (9, 2) and (9, 8).
    // The end hint (4, 3) is now closer to (9, 2), so the end follows that one.
    for k in 1..=10 {
        let t = 0.5 * k as f64;
        s.set_circle_position(a, t, t).unwrap();
        s.set_circle_position(b, 8.0 + t, t).unwrap();
    }
    let seg = s.line_endpoints(l).unwrap();
    assert!(close(seg.end, vector![9.0, 2.0]));
    assert_eq!(s.line(l).unwrap().end.hint, vector![4.0, 3.0]);
}

#[test]
fn line_disappears_and_reappears_with_its_parents() {
    let mut s = Scene::new();
    let (a, b) = lens(&mut s);
    let l = chord(&mut s, a, b, vector![4.0, -3.0], vector![4.0, 3.0]);
    assert_eq!(s.list_valid_lines().len(), 1);

    s.set_circle_position(b, 20.0, 0.0).unwrap();
    assert!(s.line_endpoints(l).is_none());
    assert!(s.list_valid_lines().is_empty());
    assert_eq!(s.line_count(), 1, "unresolved lines are kept");

    s.set_circle_position(b, 8.0, 0.0).unwrap();
    let valid = s.list_valid_lines();
    assert_eq!(valid.len(), 1);
    assert_eq!(valid[0].0, l);
    assert!(close(valid[0].1.start, vector![4.0, -3.0]));
}

#[test]
fn deleting_a_parent_circle_removes_the_line() {
    let mut s = Scene::new();
    let (a, b) = lens(&mut s);
    let l = chord(&mut s, a, b, vector![4.0, -3.0], vector![4.0, 3.0]);
    s.set_selected(a, true).unwrap();
    let gone = s.delete_selected_circles();
    assert_eq!(gone.circles, vec![a]);
    assert_eq!(gone.lines, vec![l]);
    assert!(s.list_valid_lines().is_empty());
    assert!(s.line(l).is_none());
    assert!(s.circle(b).is_some());
}

/// Two chords from disjoint lenses crossing at (4, 0).
fn crossing_chords(s: &mut Scene) -> ([CircleId; 4], LineId, LineId) {
    let (a, b) = lens(s);
    let c = s.create_circle(4.0, -4.0, 5.0).unwrap();
    let d = s.create_circle(4.0, 4.0, 5.0).unwrap();
    let l1 = chord(s, a, b, vector![4.0, -3.0], vector![4.0, 3.0]);
    let l2 = chord(s, c, d, vector![1.0, 0.0], vector![7.0, 0.0]);
    ([a, b, c, d], l1, l2)
}

#[test]
fn crossing_chords_meet_once_then_separate() {
    let mut s = Scene::new();
    let ([_, _, c, d], l1, l2) = crossing_chords(&mut s);
    let hits = s.list_line_intersections();
    assert_eq!(hits.len(), 1);
    assert!(close(hits[0].pos, vector![4.0, 0.0]));
    assert_eq!(hits[0].parents, ParentPair::Lines(l1, l2));

    let s1 = s.line_endpoints(l1).unwrap();
    let s2 = s.line_endpoints(l2).unwrap();
    let p = segment_segment(s1.start, s1.end, s2.start, s2.end, s.cfg().geom).unwrap();
    assert!(close(p, vector![4.0, 0.0]));

    // Lift the second lens so its chord runs at y = 10, clear of the first chord.
    s.set_circle_position(c, 4.0, 6.0).unwrap();
    s.set_circle_position(d, 4.0, 14.0).unwrap();
    let s2 = s.line_endpoints(l2).unwrap();
    assert!(close(s2.start, vector![1.0, 10.0]));
    assert!(s.list_line_intersections().is_empty());
}

#[test]
fn line_on_line_intersection_follows_and_cascades() {
    let mut s = Scene::new();
    let ([a, b, _, d], l1, l2) = crossing_chords(&mut s);
    let e = s.create_circle(20.0, 0.0, 3.0).unwrap();
    let f = s.create_circle(24.0, 0.0, 3.0).unwrap();
    let ef = s.list_circle_intersections();
    let top = ef
        .iter()
        .find(|p| p.parents == ParentPair::Circles(e, f) && p.pos.y > 0.0)
        .unwrap();
    let cross = s.find_nearest_intersection(vector![4.0, 0.2], 0.5).unwrap();
    assert_eq!(cross.parents, ParentPair::Lines(l1, l2));
    let l3 = s.add_line(cross.anchor(), top.anchor()).unwrap();

    let seg = s.line_endpoints(l3).unwrap();
    assert!(close(seg.start, vector![4.0, 0.0]));

    // Shift the first lens right: the vertical chord moves to x = 5, so does the crossing.
    s.set_circle_position(a, 1.0, 0.0).unwrap();
    s.set_circle_position(b, 9.0, 0.0).unwrap();
    let seg = s.line_endpoints(l3).unwrap();
    assert!(close(seg.start, vector![5.0, 0.0]));

    // Removing D kills l2 directly and l3 through l2.
    s.set_selected(d, true).unwrap();
    let gone = s.delete_selected();
    assert_eq!(gone.lines, vec![l2, l3]);
    assert!(s.line(l1).is_some());
    assert_eq!(s.line_count(), 1);
}

#[test]
fn remove_line_cascades_to_dependents() {
    let mut s = Scene::new();
    let (_, l1, l2) = crossing_chords(&mut s);
    let cross = s.list_line_intersections()[0];
    let l3 = s.add_line(cross.anchor(), cross.anchor()).unwrap();
    let gone = s.remove_line(l1).unwrap();
    assert_eq!(gone.lines, vec![l1, l3]);
    assert!(gone.circles.is_empty());
    assert!(s.line(l2).is_some());
    assert_eq!(s.remove_line(l1), Err(SceneError::UnknownLine(l1)));
}

#[test]
fn dependents_follow_lines_on_lines() {
    let mut s = Scene::new();
    let ([a, _, c, _], l1, l2) = crossing_chords(&mut s);
    let cross = s.list_line_intersections()[0];
    let l3 = s.add_line(cross.anchor(), cross.anchor()).unwrap();
    assert_eq!(
        s.dependents(a.into()).into_iter().collect::<Vec<_>>(),
        vec![l1, l3]
    );
    assert_eq!(
        s.dependents(c.into()).into_iter().collect::<Vec<_>>(),
        vec![l2, l3]
    );
    assert_eq!(
        s.dependents(l1.into()).into_iter().collect::<Vec<_>>(),
        vec![l3]
    );
    assert!(s.dependents(l3.into()).is_empty());
}

#[test]
fn structural_errors() {
    let mut s = Scene::new();
    let (a, b) = lens(&mut s);
    let ghost = CircleId(99);
    let pair = ParentPair::circles(a, ghost).unwrap();
    let ok = ParentPair::circles(a, b).unwrap();
    assert_eq!(
        s.create_line(pair, vector![0.0, 0.0], ok, vector![4.0, 3.0]),
        Err(SceneError::UnknownEntity(EntityRef::Circle(ghost)))
    );
    assert!(matches!(
        ParentPair::new(EntityRef::Circle(a), EntityRef::Line(LineId(0))),
        Err(SceneError::MixedParents { .. })
    ));
    assert_eq!(
        ParentPair::circles(a, a),
        Err(SceneError::SelfParent(EntityRef::Circle(a)))
    );
    assert_eq!(
        s.create_circle(0.0, 0.0, 0.0),
        Err(SceneError::InvalidRadius(0.0))
    );
    assert!(s.create_circle(f64::INFINITY, 0.0, 1.0).is_err());
    assert_eq!(
        s.set_circle_position(ghost, 1.0, 1.0),
        Err(SceneError::UnknownCircle(ghost))
    );
    assert!(s.set_circle_scale(a, f64::NAN).is_err());
    assert_eq!(s.line_count(), 0);
}

#[test]
fn scale_is_clamped_positive() {
    let mut s = Scene::new();
    let a = s.create_circle(0.0, 0.0, 10.0).unwrap();
    assert!((s.set_circle_scale(a, 0.5).unwrap() - 1.5).abs() < 1e-12);
    let scale = s.set_circle_scale(a, -100.0).unwrap();
    assert_eq!(scale, s.cfg().min_scale);
    assert!(s.circle(a).unwrap().radius() > 0.0);
}

#[test]
fn scroll_hits_topmost_circle() {
    let mut s = Scene::new();
    let a = s.create_circle(0.0, 0.0, 10.0).unwrap();
    let b = s.create_circle(5.0, 0.0, 10.0).unwrap();
    assert_eq!(s.circle_at(vector![3.0, 0.0]), Some(b));
    assert_eq!(s.circle_at(vector![-8.0, 0.0]), Some(a));
    assert_eq!(s.scroll_at(vector![3.0, 0.0], 2.0), Some(b));
    assert!((s.circle(b).unwrap().scale - 1.2).abs() < 1e-12);
    assert_eq!(s.circle(a).unwrap().scale, 1.0);
    assert_eq!(s.scroll_at(vector![100.0, 0.0], 1.0), None);
}

#[test]
fn selection_toggles() {
    let mut s = Scene::new();
    let a = s.create_circle(0.0, 0.0, 10.0).unwrap();
    assert!(s.toggle_selected(a).unwrap());
    assert!(!s.toggle_selected(a).unwrap());
    assert!(s.delete_selected_circles().is_empty());
}

#[test]
fn clear_keeps_ids_fresh() {
    let mut s = Scene::new();
    let (a, b) = lens(&mut s);
    chord(&mut s, a, b, vector![4.0, -3.0], vector![4.0, 3.0]);
    s.clear_scene();
    assert_eq!(s.circle_count(), 0);
    assert_eq!(s.line_count(), 0);
    let c = s.create_circle(0.0, 0.0, 1.0).unwrap();
    assert!(c > b);
}

#[test]
fn frame_matches_scene_queries() {
    let mut s = Scene::new();
    crossing_chords(&mut s);
    let frame = s.frame();
    assert_eq!(frame.valid_lines(), s.list_valid_lines());
    assert_eq!(frame.circle_intersections(), s.list_circle_intersections());
    assert_eq!(frame.line_intersections(), s.list_line_intersections());
    assert_eq!(
        frame.intersections().len(),
        frame.circle_intersections().len() + frame.line_intersections().len()
    );
}

#[test]
fn random_scenes_satisfy_distance_invariants_seeded() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut s = Scene::new();
    for _ in 0..12 {
        let x = rng.gen_range(0.0..200.0);
        let y = rng.gen_range(0.0..200.0);
        let r = rng.gen_range(10.0..60.0);
        s.create_circle(x, y, r).unwrap();
    }
    for ip in s.list_circle_intersections() {
        let ParentPair::Circles(a, b) = ip.parents else {
            panic!("circle intersection with line parents");
        };
        let (ca, cb) = (s.circle(a).unwrap(), s.circle(b).unwrap());
        assert!(((ip.pos - ca.center).norm() - ca.radius()).abs() < 1e-6);
        assert!(((ip.pos - cb.center).norm() - cb.radius()).abs() < 1e-6);
    }
}

#[test]
fn pick_at_respects_configured_tolerance() {
    let mut cfg = SceneCfg::default();
    cfg.snap.pick_tolerance = 0.5;
    let mut s = Scene::with_cfg(cfg);
    lens(&mut s);
    assert!(s.pick_at(vector![4.0, 3.8]).is_none());
    let anchor = s.pick_at(vector![4.0, 3.3]).unwrap();
    assert!(close(anchor.hint, vector![4.0, 3.0]));
}
