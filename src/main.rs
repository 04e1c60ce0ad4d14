// main.rs
//
// Generate a planetary gear set with the default configuration and write
// each linked member to stl/ as an ASCII STL.

use epicyclic::{MemoryScene, PlanetaryConfig, generate_planetary_set};
use std::fs;

fn main() {
    // Ensure the folder exists
    let _ = fs::create_dir_all("stl");

    let config = PlanetaryConfig::default();
    let mut scene = MemoryScene::<()>::new();

    let report = match generate_planetary_set(&config, &mut scene) {
        Ok(report) => report,
        Err(error) => {
            eprintln!("invalid configuration: {error}");
            return;
        },
    };

    for (name, error) in &report.skipped {
        eprintln!("skipping {name}: {error}");
    }

    for entity in scene.linked() {
        let placed = entity.world_mesh();
        let _ = fs::write(
            format!("stl/{}.stl", entity.name),
            placed.to_stl_ascii(&entity.name),
        );
    }

    println!(
        "generated {} members (ring teeth: {}, orbit radius: {})",
        report.placed.len(),
        report.ring_teeth,
        report.orbit_radius,
    );
}
