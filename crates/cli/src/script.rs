//! Line-oriented command scripts standing in for a live input layer.
//!
//! One command per line, `#` starts a comment. Entity ids are written `c<N>` and
//! `l<N>` and match the ids the scene hands out (counting from 0).
//!
//! ```text
//! circle 0 0 50          # create circle
//! move c0 10 0           # set position
//! drag c1 40 30 snap     # drag with the snap modifier held
//! scale c0 0.5           # add to scale
//! scroll 10 0 -1         # wheel steps over the topmost circle under (10, 0)
//! select c0 | deselect c0 | toggle c0
//! delete                 # delete selected circles (cascades)
//! line c0 c1 40 30 c0 c1 40 -30
//! connect 40 30 40 -30   # pick two intersections by cursor, then connect them
//! unline l0              # remove a line (cascades)
//! clear
//! frame                  # emit a frame report
//! ```

use anyhow::{anyhow, bail, Context, Result};
use sketchpad::prelude::*;

use crate::report::FrameReport;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Circle { x: f64, y: f64, r: f64 },
    Move { id: CircleId, x: f64, y: f64 },
    Drag { id: CircleId, x: f64, y: f64, snap: bool },
    Scale { id: CircleId, delta: f64 },
    Scroll { x: f64, y: f64, steps: f64 },
    Select { id: CircleId, on: bool },
    Toggle { id: CircleId },
    Delete,
    Line { start: (EntityRef, EntityRef, Vec2), end: (EntityRef, EntityRef, Vec2) },
    Connect { from: Vec2, to: Vec2 },
    Unline { id: LineId },
    Clear,
    Frame,
}

pub fn parse_script(src: &str) -> Result<Vec<Command>> {
    let mut out = Vec::new();
    for (no, raw) in src.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let cmd = parse_command(line).with_context(|| format!("line {}: `{line}`", no + 1))?;
        out.push(cmd);
    }
    Ok(out)
}

fn parse_command(line: &str) -> Result<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let (head, args) = words
        .split_first()
        .ok_or_else(|| anyhow!("empty command"))?;
    let cmd = match *head {
        "circle" => {
            arity(args, 3)?;
            Command::Circle {
                x: num(args[0])?,
                y: num(args[1])?,
                r: num(args[2])?,
            }
        }
        "move" => {
            arity(args, 3)?;
            Command::Move {
                id: circle_id(args[0])?,
                x: num(args[1])?,
                y: num(args[2])?,
            }
        }
        "drag" => {
            let snap = match args.len() {
                3 => false,
                4 if args[3] == "snap" => true,
                _ => bail!("usage: drag c<N> X Y [snap]"),
            };
            Command::Drag {
                id: circle_id(args[0])?,
                x: num(args[1])?,
                y: num(args[2])?,
                snap,
            }
        }
        "scale" => {
            arity(args, 2)?;
            Command::Scale {
                id: circle_id(args[0])?,
                delta: num(args[1])?,
            }
        }
        "scroll" => {
            arity(args, 3)?;
            Command::Scroll {
                x: num(args[0])?,
                y: num(args[1])?,
                steps: num(args[2])?,
            }
        }
        "select" | "deselect" => {
            arity(args, 1)?;
            Command::Select {
                id: circle_id(args[0])?,
                on: *head == "select",
            }
        }
        "toggle" => {
            arity(args, 1)?;
            Command::Toggle {
                id: circle_id(args[0])?,
            }
        }
        "delete" => {
            arity(args, 0)?;
            Command::Delete
        }
        "line" => {
            arity(args, 8)?;
            let point =
                |i: usize| -> Result<Vec2> { Ok(Vec2::new(num(args[i])?, num(args[i + 1])?)) };
            Command::Line {
                start: (entity(args[0])?, entity(args[1])?, point(2)?),
                end: (entity(args[4])?, entity(args[5])?, point(6)?),
            }
        }
        "connect" => {
            arity(args, 4)?;
            Command::Connect {
                from: Vec2::new(num(args[0])?, num(args[1])?),
                to: Vec2::new(num(args[2])?, num(args[3])?),
            }
        }
        "unline" => {
            arity(args, 1)?;
            match entity(args[0])? {
                EntityRef::Line(id) => Command::Unline { id },
                other => bail!("expected a line id, got {other}"),
            }
        }
        "clear" => {
            arity(args, 0)?;
            Command::Clear
        }
        "frame" => {
            arity(args, 0)?;
            Command::Frame
        }
        other => bail!("unknown command `{other}`"),
    };
    Ok(cmd)
}

fn arity(args: &[&str], n: usize) -> Result<()> {
    if args.len() != n {
        bail!("expected {n} arguments, got {}", args.len());
    }
    Ok(())
}

fn num(s: &str) -> Result<f64> {
    s.parse::<f64>()
        .with_context(|| format!("`{s}` is not a number"))
}

fn entity(s: &str) -> Result<EntityRef> {
    let mut chars = s.chars();
    let kind = chars.next();
    let n: u32 = chars
        .as_str()
        .parse()
        .with_context(|| format!("`{s}` is not an entity id (c<N> or l<N>)"))?;
    match kind {
        Some('c') => Ok(EntityRef::Circle(CircleId(n))),
        Some('l') => Ok(EntityRef::Line(LineId(n))),
        _ => bail!("`{s}` is not an entity id (c<N> or l<N>)"),
    }
}

fn circle_id(s: &str) -> Result<CircleId> {
    match entity(s)? {
        EntityRef::Circle(id) => Ok(id),
        other => bail!("expected a circle id, got {other}"),
    }
}

/// Replays commands into a scene and collects frame reports.
///
/// `connect` picks within the scene's `SnapCfg::pick_tolerance`.
#[derive(Debug)]
pub struct Shell {
    pub scene: Scene,
    pub reports: Vec<FrameReport>,
}

impl Shell {
    pub fn new(tolerance: f64) -> Self {
        let mut cfg = SceneCfg::default();
        cfg.snap.pick_tolerance = tolerance;
        Self {
            scene: Scene::with_cfg(cfg),
            reports: Vec::new(),
        }
    }

    pub fn run(&mut self, commands: &[Command]) -> Result<()> {
        for (i, cmd) in commands.iter().enumerate() {
            self.apply(cmd)
                .with_context(|| format!("command #{}: {cmd:?}", i + 1))?;
        }
        Ok(())
    }

    pub fn apply(&mut self, cmd: &Command) -> Result<()> {
        let scene = &mut self.scene;
        match *cmd {
            Command::Circle { x, y, r } => {
                scene.create_circle(x, y, r)?;
            }
            Command::Move { id, x, y } => scene.set_circle_position(id, x, y)?,
            Command::Drag { id, x, y, snap } => {
                let applied = scene.drag_circle(id, Vec2::new(x, y), snap)?;
                if applied.is_snapped() {
                    tracing::info!(circle = %id, ?applied, "snapped");
                }
            }
            Command::Scale { id, delta } => {
                scene.set_circle_scale(id, delta)?;
            }
            Command::Scroll { x, y, steps } => {
                if scene.scroll_at(Vec2::new(x, y), steps).is_none() {
                    tracing::warn!(x, y, "scroll outside every circle");
                }
            }
            Command::Select { id, on } => scene.set_selected(id, on)?,
            Command::Toggle { id } => {
                scene.toggle_selected(id)?;
            }
            Command::Delete => {
                let gone = scene.delete_selected_circles();
                tracing::info!(
                    circles = gone.circles.len(),
                    lines = gone.lines.len(),
                    "delete"
                );
            }
            Command::Line { start, end } => {
                let sp = ParentPair::new(start.0, start.1)?;
                let ep = ParentPair::new(end.0, end.1)?;
                scene.create_line(sp, start.2, ep, end.2)?;
            }
            Command::Connect { from, to } => {
                let pick = |p: Vec2| {
                    scene
                        .pick_at(p)
                        .ok_or_else(|| anyhow!("no intersection near ({}, {})", p.x, p.y))
                };
                let (start, end) = (pick(from)?, pick(to)?);
                scene.add_line(start, end)?;
            }
            Command::Unline { id } => {
                scene.remove_line(id)?;
            }
            Command::Clear => scene.clear_scene(),
            Command::Frame => {
                let report = FrameReport::capture(self.reports.len(), &scene.frame());
                self.reports.push(report);
            }
        }
        Ok(())
    }
}
