//! Layout of a single-stage planetary gear set.
//!
//! Derives the ring tooth count, the clearance-adjusted ring module, the
//! planet orbit radius and each member's placement from the sun and planet
//! tooth counts, then requests one gear solid per member through a
//! [`MeshSink`].

use crate::errors::ValidationError;
use crate::float_types::{PI, Real, TAU};
use crate::mesh::Mesh;
use crate::outline::GearSpec;
use crate::scene::MeshSink;
use nalgebra::Point3;
use std::fmt::Debug;
use std::sync::Arc;

/// Parameters of a planetary gear set.
///
/// The pressure angle, module, thickness and clearance are shared across the
/// sun, ring and planets; the ring tooth count is derived, never supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetaryConfig {
    /// Sun gear tooth count, at least 1.
    pub sun_teeth: usize,
    /// Planet gear tooth count, at least 1.
    pub planet_teeth: usize,
    /// Number of planet gears, at least 1.
    pub num_planets: usize,
    /// Pressure angle in degrees, shared by all members.
    pub pressure_angle_deg: Real,
    /// Module (overall scale) of the set.
    pub module: Real,
    /// Extrusion thickness of the solid gears.
    pub thickness: Real,
    /// Outer thickness of the ring blank, as a multiple of the module.
    pub ring_margin: Real,
    /// Radial gap between gears for print tolerance. Moves the planets
    /// outwards and enlarges the ring accordingly.
    pub clearance: Real,
}

impl Default for PlanetaryConfig {
    fn default() -> Self {
        PlanetaryConfig {
            sun_teeth: 32,
            planet_teeth: 16,
            num_planets: 6,
            pressure_angle_deg: 20.0,
            module: 0.05,
            thickness: 0.2,
            ring_margin: 4.0,
            clearance: 0.0002,
        }
    }
}

impl PlanetaryConfig {
    /// Reject invalid configurations before any geometry work.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::require_count("sun_teeth", self.sun_teeth, 1)?;
        ValidationError::require_count("planet_teeth", self.planet_teeth, 1)?;
        ValidationError::require_count("num_planets", self.num_planets, 1)?;
        ValidationError::require_positive("module", self.module)?;
        ValidationError::require_in_open_range(
            "pressure_angle_deg",
            self.pressure_angle_deg,
            0.0,
            90.0,
        )?;
        ValidationError::require_non_negative("thickness", self.thickness)?;
        ValidationError::require_non_negative("ring_margin", self.ring_margin)?;
        ValidationError::require_non_negative("clearance", self.clearance)?;
        Ok(())
    }

    /// Tooth count of the internal ring gear. A meshing planetary set
    /// requires exactly `sun + 2 * planet`.
    pub fn ring_teeth(&self) -> usize {
        self.sun_teeth + 2 * self.planet_teeth
    }

    /// The ring's clearance-adjusted module. The gap is injected by slightly
    /// enlarging the ring's tooth spacing, which leaves the sun and planet
    /// geometry clearance-free.
    pub fn ring_module(&self) -> Real {
        self.module + 4.0 * self.clearance / self.ring_teeth() as Real
    }

    /// Center distance between the gear axis and each planet axis.
    pub fn orbit_radius(&self) -> Real {
        0.5 * (self.sun_teeth + self.planet_teeth) as Real * self.module
            + self.clearance
    }

    fn sun_spec(&self) -> GearSpec {
        GearSpec::external(
            self.sun_teeth,
            self.module,
            self.pressure_angle_deg,
            self.thickness,
        )
    }

    fn ring_spec(&self) -> GearSpec {
        GearSpec::internal(
            self.ring_teeth(),
            self.ring_module(),
            self.pressure_angle_deg,
            self.thickness,
            self.ring_margin,
        )
    }

    fn planet_spec(&self) -> GearSpec {
        GearSpec::external(
            self.planet_teeth,
            self.module,
            self.pressure_angle_deg,
            self.thickness,
        )
    }
}

/// What a layout run produced: the derived quantities, the entities that
/// were placed, and the members skipped because their solid could not be
/// built.
#[derive(Debug, Clone)]
pub struct PlanetaryReport {
    pub ring_teeth: usize,
    pub orbit_radius: Real,
    pub placed: Vec<String>,
    pub skipped: Vec<(String, ValidationError)>,
}

/// Generate a full planetary gear set into `sink`.
///
/// Configuration errors abort before any geometry work. A member whose
/// solid cannot be built is recorded as skipped and the rest of the set is
/// still placed. The planet solid is built once; every planet entity shares
/// the template's mesh and differs only in placement, and the template
/// entity itself is discarded once instancing completes.
pub fn generate_planetary_set<S, K>(
    config: &PlanetaryConfig,
    sink: &mut K,
) -> Result<PlanetaryReport, ValidationError>
where
    S: Clone + Send + Sync + Debug,
    K: MeshSink<S>,
{
    config.validate()?;

    let mut report = PlanetaryReport {
        ring_teeth: config.ring_teeth(),
        orbit_radius: config.orbit_radius(),
        placed: Vec::new(),
        skipped: Vec::new(),
    };

    let (sun, ring, planet) = build_member_meshes(config);

    match sun {
        Ok(mesh) => {
            let handle = sink.create_entity("SunGear", Arc::new(mesh));
            // Half a tooth of twist lines the sun's gaps up with the planets.
            sink.place(
                &handle,
                Point3::origin(),
                PI / config.sun_teeth as Real,
            );
            sink.link_into_scene(&handle);
            report.placed.push("SunGear".to_owned());
        },
        Err(error) => report.skipped.push(("SunGear".to_owned(), error)),
    }

    match ring {
        Ok(mesh) => {
            let handle = sink.create_entity("RingGear", Arc::new(mesh));
            sink.place(&handle, Point3::origin(), 0.0);
            sink.link_into_scene(&handle);
            report.placed.push("RingGear".to_owned());
        },
        Err(error) => report.skipped.push(("RingGear".to_owned(), error)),
    }

    match planet {
        Ok(mesh) => {
            let shared = Arc::new(mesh);
            let template = sink.create_entity("PlanetGearTemplate", Arc::clone(&shared));

            // Rolling without slipping against the sun fixes each planet's
            // spin as a function of its orbital angle.
            let rotation_ratio =
                1.0 + config.sun_teeth as Real / config.planet_teeth as Real;
            let orbit_radius = report.orbit_radius;

            for i in 0..config.num_planets {
                let angle = TAU * i as Real / config.num_planets as Real;
                let name = format!("PlanetGear_{}", i + 1);
                let handle = sink.create_entity(&name, Arc::clone(&shared));
                sink.place(
                    &handle,
                    Point3::new(
                        orbit_radius * angle.cos(),
                        orbit_radius * angle.sin(),
                        0.0,
                    ),
                    PI - angle * rotation_ratio,
                );
                sink.link_into_scene(&handle);
                report.placed.push(name);
            }

            sink.discard(template);
        },
        Err(error) => {
            report
                .skipped
                .push(("PlanetGearTemplate".to_owned(), error));
        },
    }

    Ok(report)
}

type MemberMeshes<S> = (
    Result<Mesh<S>, ValidationError>,
    Result<Mesh<S>, ValidationError>,
    Result<Mesh<S>, ValidationError>,
);

/// Build the sun, ring and planet-template solids.
#[cfg(not(feature = "parallel"))]
fn build_member_meshes<S: Clone + Send + Sync + Debug>(
    config: &PlanetaryConfig,
) -> MemberMeshes<S> {
    (
        Mesh::gear(&config.sun_spec(), None),
        Mesh::gear(&config.ring_spec(), None),
        Mesh::gear(&config.planet_spec(), None),
    )
}

/// Build the sun, ring and planet-template solids concurrently. Each build
/// is independent, so the results match the serial path exactly.
#[cfg(feature = "parallel")]
fn build_member_meshes<S: Clone + Send + Sync + Debug>(
    config: &PlanetaryConfig,
) -> MemberMeshes<S> {
    let (sun, (ring, planet)) = rayon::join(
        || Mesh::gear(&config.sun_spec(), None),
        || {
            rayon::join(
                || Mesh::gear(&config.ring_spec(), None),
                || Mesh::gear(&config.planet_spec(), None),
            )
        },
    );
    (sun, ring, planet)
}
