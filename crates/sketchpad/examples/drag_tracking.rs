//! Drag one circle of a lens in small steps and print where a chord's
//! endpoints go, including the frames where the circles stop intersecting.
//!
//! Run: cargo run -p sketchpad --example drag_tracking

use sketchpad::prelude::*;

fn main() -> Result<(), SceneError> {
    let mut scene = Scene::new();
    let a = scene.create_circle(0.0, 0.0, 50.0)?;
    let b = scene.create_circle(80.0, 0.0, 50.0)?;

    let points = scene.list_circle_intersections();
    let (lo, hi) = (points[0].anchor(), points[1].anchor());
    let chord = scene.add_line(lo, hi)?;
    println!("chord {chord} between {a} and {b}");

    for step in 0..=12 {
        let x = 80.0 + 2.0 * step as f64;
        scene.set_circle_position(b, x, 0.0)?;
        match scene.line_endpoints(chord) {
            Some(seg) => println!(
                "b.x={x:6.1} start=({:7.3}, {:7.3}) end=({:7.3}, {:7.3})",
                seg.start.x, seg.start.y, seg.end.x, seg.end.y
            ),
            None => println!("b.x={x:6.1} unresolved"),
        }
    }
    Ok(())
}
