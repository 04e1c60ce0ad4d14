//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use epicyclic::float_types::Real;
use epicyclic::mesh::Mesh;
use std::collections::HashMap;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Shoelace area of a ring, positive for counterclockwise winding. Accepts
/// rings with or without an explicit closing point.
pub fn signed_area(ring: &[[Real; 2]]) -> Real {
    let mut doubled = 0.0;
    for i in 0..ring.len() {
        let j = (i + 1) % ring.len();
        doubled += ring[i][0] * ring[j][1] - ring[j][0] * ring[i][1];
    }
    0.5 * doubled
}

/// Returns the approximate bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// for a mesh.
pub fn bounding_box(mesh: &Mesh<()>) -> [Real; 6] {
    let mut bounds = [
        Real::MAX,
        Real::MAX,
        Real::MAX,
        Real::MIN,
        Real::MIN,
        Real::MIN,
    ];

    for p in &mesh.vertices {
        bounds[0] = bounds[0].min(p.x);
        bounds[1] = bounds[1].min(p.y);
        bounds[2] = bounds[2].min(p.z);
        bounds[3] = bounds[3].max(p.x);
        bounds[4] = bounds[4].max(p.y);
        bounds[5] = bounds[5].max(p.z);
    }

    bounds
}

/// How often each undirected edge is used by the mesh's faces. A closed
/// solid uses every edge exactly twice.
pub fn edge_use_counts(mesh: &Mesh<()>) -> HashMap<(usize, usize), usize> {
    let mut counts = HashMap::new();
    for face in &mesh.faces {
        let n = face.len();
        for i in 0..n {
            let a = face[i];
            let b = face[(i + 1) % n];
            let key = (a.min(b), a.max(b));
            *counts.entry(key).or_insert(0usize) += 1;
        }
    }
    counts
}
