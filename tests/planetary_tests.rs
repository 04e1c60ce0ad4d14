mod support;

use epicyclic::float_types::{PI, Real, TAU};
use epicyclic::{
    MemoryScene, PlanetaryConfig, ValidationError, generate_planetary_set,
};
use std::sync::Arc;

use crate::support::approx_eq;

/// The reference scenario: 32/16 teeth, six planets, module 0.05, no
/// clearance.
fn reference_config() -> PlanetaryConfig {
    PlanetaryConfig {
        sun_teeth: 32,
        planet_teeth: 16,
        num_planets: 6,
        pressure_angle_deg: 20.0,
        module: 0.05,
        thickness: 0.2,
        ring_margin: 4.0,
        clearance: 0.0,
    }
}

#[test]
fn reference_scenario_derives_the_documented_quantities() {
    let config = reference_config();
    assert_eq!(config.ring_teeth(), 64);
    assert!(approx_eq(config.orbit_radius(), 1.2, 1e-12));
    assert!(approx_eq(config.ring_module(), 0.05, 1e-12));

    let mut scene = MemoryScene::<()>::new();
    let report = generate_planetary_set(&config, &mut scene).unwrap();

    assert_eq!(report.ring_teeth, 64);
    assert!(approx_eq(report.orbit_radius, 1.2, 1e-12));
    assert!(report.skipped.is_empty());
    assert_eq!(report.placed.len(), 2 + 6);
    assert_eq!(scene.linked().count(), 2 + 6);

    let sun = scene.find("SunGear").unwrap();
    assert!(approx_eq(sun.placement.rotation_z, PI / 32.0, 1e-12));
    assert_eq!(sun.placement.translation, nalgebra::Point3::origin());

    let ring = scene.find("RingGear").unwrap();
    assert_eq!(ring.placement.rotation_z, 0.0);
}

#[test]
fn the_planet_template_is_discarded_after_instancing() {
    let mut scene = MemoryScene::<()>::new();
    generate_planetary_set(&reference_config(), &mut scene).unwrap();

    assert!(scene.find("PlanetGearTemplate").is_none());
    for i in 1..=6 {
        let planet = scene.find(&format!("PlanetGear_{i}")).unwrap();
        assert!(planet.linked);
    }
}

#[test]
fn planet_instances_share_one_mesh() {
    let mut scene = MemoryScene::<()>::new();
    generate_planetary_set(&reference_config(), &mut scene).unwrap();

    let first = scene.find("PlanetGear_1").unwrap();
    for i in 2..=6 {
        let other = scene.find(&format!("PlanetGear_{i}")).unwrap();
        assert!(
            Arc::ptr_eq(&first.mesh, &other.mesh),
            "planet {i} does not share the template mesh"
        );
    }
}

#[test]
fn planet_placements_are_uniformly_spaced_on_the_orbit() {
    let config = reference_config();
    let mut scene = MemoryScene::<()>::new();
    let report = generate_planetary_set(&config, &mut scene).unwrap();

    for i in 0..6usize {
        let planet = scene.find(&format!("PlanetGear_{}", i + 1)).unwrap();
        let t = planet.placement.translation;

        let radius = (t.x * t.x + t.y * t.y).sqrt();
        assert!(approx_eq(radius, report.orbit_radius, 1e-12));

        let angle = TAU * i as Real / 6.0;
        assert!(approx_eq(t.x, report.orbit_radius * angle.cos(), 1e-12));
        assert!(approx_eq(t.y, report.orbit_radius * angle.sin(), 1e-12));
        assert!(t.z == 0.0);
    }
}

#[test]
fn planet_rotation_follows_the_rolling_constraint() {
    let config = reference_config();
    let mut scene = MemoryScene::<()>::new();
    generate_planetary_set(&config, &mut scene).unwrap();

    // sun/planet = 32/16, so each planet spins at 1 + 2 times its orbital
    // angle, offset by half a turn.
    for i in 0..6usize {
        let planet = scene.find(&format!("PlanetGear_{}", i + 1)).unwrap();
        let angle = TAU * i as Real / 6.0;
        assert!(approx_eq(
            planet.placement.rotation_z,
            PI - angle * 3.0,
            1e-12
        ));
    }
}

#[test]
fn precondition_violations_abort_before_any_geometry() {
    let mut scene = MemoryScene::<()>::new();

    let no_planets = PlanetaryConfig {
        num_planets: 0,
        ..reference_config()
    };
    assert_eq!(
        generate_planetary_set(&no_planets, &mut scene).unwrap_err(),
        ValidationError::CountTooSmall {
            parameter: "num_planets",
            value: 0,
            min: 1,
        }
    );

    let no_planet_teeth = PlanetaryConfig {
        planet_teeth: 0,
        ..reference_config()
    };
    assert!(matches!(
        generate_planetary_set(&no_planet_teeth, &mut scene).unwrap_err(),
        ValidationError::CountTooSmall {
            parameter: "planet_teeth",
            ..
        }
    ));

    let zero_module = PlanetaryConfig {
        module: 0.0,
        ..reference_config()
    };
    assert!(matches!(
        generate_planetary_set(&zero_module, &mut scene).unwrap_err(),
        ValidationError::NonPositive {
            parameter: "module",
            ..
        }
    ));

    let nan_clearance = PlanetaryConfig {
        clearance: Real::NAN,
        ..reference_config()
    };
    assert!(matches!(
        generate_planetary_set(&nan_clearance, &mut scene).unwrap_err(),
        ValidationError::NonFinite {
            parameter: "clearance",
            ..
        }
    ));

    assert!(scene.is_empty());
}

#[test]
fn an_unbuildable_member_is_skipped_not_fatal() {
    // Two sun teeth pass the layout preconditions but cannot form a gear, so
    // the sun is skipped while the ring and planets are still placed.
    let config = PlanetaryConfig {
        sun_teeth: 2,
        ..reference_config()
    };
    let mut scene = MemoryScene::<()>::new();
    let report = generate_planetary_set(&config, &mut scene).unwrap();

    assert_eq!(report.ring_teeth, 34);
    assert_eq!(report.skipped.len(), 1);
    let (name, error) = &report.skipped[0];
    assert_eq!(name, "SunGear");
    assert!(matches!(
        error,
        ValidationError::CountTooSmall {
            parameter: "teeth",
            ..
        }
    ));

    assert!(scene.find("SunGear").is_none());
    assert!(scene.find("RingGear").is_some());
    assert_eq!(scene.linked().count(), 1 + 6);
}

#[test]
fn clearance_enlarges_the_ring_and_the_orbit() {
    let tight = reference_config();
    let loose = PlanetaryConfig {
        clearance: 0.01,
        ..reference_config()
    };

    assert!(approx_eq(
        loose.ring_module(),
        tight.module + 4.0 * 0.01 / 64.0,
        1e-15
    ));
    assert!(approx_eq(
        loose.orbit_radius(),
        tight.orbit_radius() + 0.01,
        1e-15
    ));
}

#[test]
fn default_config_is_valid_and_generates_a_full_set() {
    let config = PlanetaryConfig::default();
    assert_eq!(config.ring_teeth(), 64);

    let mut scene = MemoryScene::<()>::new();
    let report = generate_planetary_set(&config, &mut scene).unwrap();
    assert!(report.skipped.is_empty());
    assert_eq!(scene.linked().count(), 2 + config.num_planets);
}
