//! Involute gear outlines, extruded gear solids, and **planetary gear set**
//! layout.
//!
//! The crate samples one tooth's involute face curve, replicates it into a
//! closed 2D outline, extrudes the outline into a watertight indexed solid,
//! and positions a sun gear, an internal ring gear and N planet gears into a
//! valid single-stage planetary set. Finished solids are handed outward
//! through the [`MeshSink`] trait.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` export
//! - **earcut**: ear-cut triangulation of the ring gear's annulus faces
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **delaunay**: constrained Delaunay triangulation instead of ear-cut
//! - **parallel**: use rayon to build the set's member solids concurrently

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod involute;
pub mod profile;
pub mod outline;
pub mod mesh;
pub mod scene;
pub mod planetary;

#[cfg(feature = "stl-io")]
pub mod io;

#[cfg(any(
    all(feature = "earcut", feature = "delaunay"),
    not(any(feature = "earcut", feature = "delaunay"))
))]
compile_error!("Either 'earcut' or 'delaunay' feature must be specified, but not both");

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::ValidationError;
pub use mesh::{Mesh, MeshBuilder};
pub use outline::{GearOutline, GearSpec};
pub use planetary::{PlanetaryConfig, PlanetaryReport, generate_planetary_set};
pub use scene::{MemoryScene, MeshSink, Placement, SceneEntity};
