//! Reference turbine rendered to PNG and exported as STL.

use kaplan::export::stl::export_stl;
use kaplan::{Rasterizer, Scene, TessellationParams};

fn main() {
    let scene = Scene::reference().unwrap();

    let mut target = Rasterizer::new(640, 480).unwrap();
    let frame = scene.render(&mut target).unwrap();
    frame.save("turbine.png").unwrap();
    println!("wrote turbine.png");

    let triangles = export_stl(&scene, &TessellationParams::default(), "turbine.stl").unwrap();
    println!("wrote turbine.stl ({triangles} triangles)");
}
