//! JSON view of one frame: what a renderer would draw.

use serde::Serialize;
use sketchpad::prelude::*;

#[derive(Clone, Debug, Serialize)]
pub struct CircleOut {
    pub id: String,
    pub center: [f64; 2],
    pub radius: f64,
    pub scale: f64,
    pub selected: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct LineOut {
    pub id: String,
    pub start: [f64; 2],
    pub end: [f64; 2],
}

#[derive(Clone, Debug, Serialize)]
pub struct PointOut {
    pub pos: [f64; 2],
    pub parents: [String; 2],
    pub branch: u8,
}

impl From<&IntersectionPoint> for PointOut {
    fn from(ip: &IntersectionPoint) -> Self {
        let (a, b) = ip.parents.refs();
        Self {
            pos: xy(ip.pos),
            parents: [a.to_string(), b.to_string()],
            branch: ip.branch,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct FrameReport {
    pub frame: usize,
    pub circles: Vec<CircleOut>,
    pub lines: Vec<LineOut>,
    /// Lines kept in the scene whose parents do not intersect this frame.
    pub unresolved_lines: Vec<String>,
    pub circle_intersections: Vec<PointOut>,
    pub line_intersections: Vec<PointOut>,
}

impl FrameReport {
    pub fn capture(frame_no: usize, frame: &Frame<'_>) -> Self {
        let scene = frame.scene();
        let circles = scene
            .list_circles()
            .map(|(id, c)| CircleOut {
                id: id.to_string(),
                center: xy(c.center),
                radius: c.radius(),
                scale: c.scale,
                selected: c.selected,
            })
            .collect();
        let lines = frame
            .valid_lines()
            .into_iter()
            .map(|(id, seg)| LineOut {
                id: id.to_string(),
                start: xy(seg.start),
                end: xy(seg.end),
            })
            .collect();
        let unresolved_lines = scene
            .list_lines()
            .filter(|(id, _)| frame.segment(*id).is_none())
            .map(|(id, _)| id.to_string())
            .collect();
        Self {
            frame: frame_no,
            circles,
            lines,
            unresolved_lines,
            circle_intersections: frame.circle_intersections().iter().map(PointOut::from).collect(),
            line_intersections: frame.line_intersections().iter().map(PointOut::from).collect(),
        }
    }
}

fn xy(v: Vec2) -> [f64; 2] {
    [v.x, v.y]
}
