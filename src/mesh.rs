//! Indexed solid meshes and the extrusion that produces them.
//!
//! A [`Mesh`] owns a vertex list and a face list; faces are ordered index
//! lists wound for outward normals. Meshes are accumulated through a
//! [`MeshBuilder`] and immutable once built.

use crate::errors::ValidationError;
use crate::float_types::{EPSILON, Real};
use crate::outline::{GearOutline, GearSpec};
use geo::{Coord, LineString, Polygon as GeoPolygon};
use nalgebra::{Matrix4, Point3, Rotation3, Translation3, Vector3};
use std::collections::HashMap;
use std::fmt::Debug;

/// An indexed solid mesh.
///
/// - `S` is the generic metadata type, stored as `Option<S>`.
#[derive(Debug, Clone)]
pub struct Mesh<S: Clone + Send + Sync + Debug> {
    /// Vertex positions, shared between faces.
    pub vertices: Vec<Point3<Real>>,

    /// Faces as ordered vertex index lists, wound for outward normals.
    pub faces: Vec<Vec<usize>>,

    /// Metadata
    pub metadata: Option<S>,
}

/// Arena-style accumulator for [`Mesh`] construction.
///
/// Vertices are deduplicated by exact coordinate bits, so faces built from
/// the same source coordinates share indices and the finished solid has no
/// seams.
#[derive(Debug)]
pub struct MeshBuilder<S: Clone + Send + Sync + Debug> {
    vertices: Vec<Point3<Real>>,
    faces: Vec<Vec<usize>>,
    index: HashMap<[u64; 3], usize>,
    metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> MeshBuilder<S> {
    pub fn new(metadata: Option<S>) -> Self {
        MeshBuilder {
            vertices: Vec::new(),
            faces: Vec::new(),
            index: HashMap::new(),
            metadata,
        }
    }

    /// Index of `point`, inserting it on first sight.
    pub fn vertex(&mut self, point: Point3<Real>) -> usize {
        let key = [
            point.x.to_bits() as u64,
            point.y.to_bits() as u64,
            point.z.to_bits() as u64,
        ];
        *self.index.entry(key).or_insert_with(|| {
            self.vertices.push(point);
            self.vertices.len() - 1
        })
    }

    /// Append a face. Indices must come from [`MeshBuilder::vertex`].
    pub fn face(&mut self, indices: Vec<usize>) {
        self.faces.push(indices);
    }

    /// Convert the accumulated geometry into an immutable [`Mesh`].
    pub fn build(self) -> Mesh<S> {
        Mesh {
            vertices: self.vertices,
            faces: self.faces,
            metadata: self.metadata,
        }
    }
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Build the solid mesh for a gear: outline construction followed by
    /// extrusion along z by the spec's `thickness`.
    pub fn gear(spec: &GearSpec, metadata: Option<S>) -> Result<Mesh<S>, ValidationError> {
        let outline = spec.outline()?;
        Self::extrude_outline(&outline, spec.thickness, metadata)
    }

    /// Extrude a closed 2D outline into a solid.
    ///
    /// An external outline becomes one n-gon cap per end plus a ring of side
    /// quads. An internal outline (with a rim loop) gets triangulated
    /// annulus caps and side walls along both loops. `thickness == 0` skips
    /// extrusion and leaves the planar face(s) only.
    ///
    /// Degenerate outlines (fewer than 3 distinct boundary points, or an
    /// annulus that cannot be triangulated) report failure and build no
    /// partial mesh.
    pub fn extrude_outline(
        outline: &GearOutline,
        thickness: Real,
        metadata: Option<S>,
    ) -> Result<Mesh<S>, ValidationError> {
        let boundary = open_ring(&outline.boundary);
        let distinct = count_distinct(&boundary);
        if distinct < 3 {
            return Err(ValidationError::DegenerateOutline { points: distinct });
        }

        let mut builder = MeshBuilder::new(metadata);

        match &outline.rim {
            None => {
                let bottom: Vec<usize> = boundary
                    .iter()
                    .map(|&[x, y]| builder.vertex(Point3::new(x, y, 0.0)))
                    .collect();

                if thickness > 0.0 {
                    let top: Vec<usize> = boundary
                        .iter()
                        .map(|&[x, y]| builder.vertex(Point3::new(x, y, thickness)))
                        .collect();
                    builder.face(bottom.iter().rev().copied().collect());
                    builder.face(top.clone());
                    side_walls(&mut builder, &bottom, &top);
                } else {
                    builder.face(bottom);
                }
            },
            Some(rim) => {
                let rim = open_ring(rim);
                let rim_distinct = count_distinct(&rim);
                if rim_distinct < 3 {
                    return Err(ValidationError::DegenerateOutline {
                        points: rim_distinct,
                    });
                }

                // One triangulation, reused for both caps, keeps top and
                // bottom consistent.
                let triangles = Self::triangulate_2d(&rim, &[boundary.as_slice()]);
                if triangles.is_empty() {
                    return Err(ValidationError::DegenerateOutline { points: distinct });
                }

                if thickness > 0.0 {
                    for tri in &triangles {
                        let face: Vec<usize> = tri
                            .iter()
                            .rev()
                            .map(|p| builder.vertex(Point3::new(p.x, p.y, 0.0)))
                            .collect();
                        builder.face(face);
                    }
                    for tri in &triangles {
                        let face: Vec<usize> = tri
                            .iter()
                            .map(|p| builder.vertex(Point3::new(p.x, p.y, thickness)))
                            .collect();
                        builder.face(face);
                    }

                    let rim_bottom: Vec<usize> = rim
                        .iter()
                        .map(|&[x, y]| builder.vertex(Point3::new(x, y, 0.0)))
                        .collect();
                    let rim_top: Vec<usize> = rim
                        .iter()
                        .map(|&[x, y]| builder.vertex(Point3::new(x, y, thickness)))
                        .collect();
                    side_walls(&mut builder, &rim_bottom, &rim_top);

                    let inner_bottom: Vec<usize> = boundary
                        .iter()
                        .map(|&[x, y]| builder.vertex(Point3::new(x, y, 0.0)))
                        .collect();
                    let inner_top: Vec<usize> = boundary
                        .iter()
                        .map(|&[x, y]| builder.vertex(Point3::new(x, y, thickness)))
                        .collect();
                    side_walls(&mut builder, &inner_bottom, &inner_top);
                } else {
                    for tri in &triangles {
                        let face: Vec<usize> = tri
                            .iter()
                            .map(|p| builder.vertex(Point3::new(p.x, p.y, 0.0)))
                            .collect();
                        builder.face(face);
                    }
                }
            },
        }

        Ok(builder.build())
    }

    /// Ear-cut (or Delaunay) triangulation of a polygon with optional holes,
    /// returned as triangles embedded at z = 0.
    pub fn triangulate_2d(
        outer: &[[Real; 2]],
        holes: &[&[[Real; 2]]],
    ) -> Vec<[Point3<Real>; 3]> {
        // Convert the outer ring into a `LineString`
        let outer_coords: Vec<Coord<Real>> =
            outer.iter().map(|&[x, y]| Coord { x, y }).collect();

        // Convert each hole into its own `LineString`
        let holes_coords: Vec<LineString<Real>> = holes
            .iter()
            .map(|hole| {
                let coords: Vec<Coord<Real>> =
                    hole.iter().map(|&[x, y]| Coord { x, y }).collect();
                LineString::new(coords)
            })
            .collect();

        // Ear-cut triangulation on the polygon (outer + holes)
        let polygon = GeoPolygon::new(LineString::new(outer_coords), holes_coords);

        #[cfg(feature = "earcut")]
        {
            use geo::TriangulateEarcut;
            let triangulation = polygon.earcut_triangles_raw();
            let triangle_indices = triangulation.triangle_indices;
            let vertices = triangulation.vertices;

            // Convert the 2D result (x,y) into 3D triangles with z=0
            let mut result = Vec::with_capacity(triangle_indices.len() / 3);
            for tri in triangle_indices.chunks_exact(3) {
                let pts = [
                    Point3::new(vertices[2 * tri[0]], vertices[2 * tri[0] + 1], 0.0),
                    Point3::new(vertices[2 * tri[1]], vertices[2 * tri[1] + 1], 0.0),
                    Point3::new(vertices[2 * tri[2]], vertices[2 * tri[2] + 1], 0.0),
                ];
                result.push(pts);
            }
            result
        }

        #[cfg(feature = "delaunay")]
        {
            use geo::TriangulateSpade;
            // Constrained triangulation respects the hole boundaries.
            let Ok(tris) = polygon.constrained_triangulation(Default::default()) else {
                return Vec::new();
            };

            let mut result = Vec::with_capacity(tris.len());
            for triangle in tris {
                let [a, b, c] = [triangle.0, triangle.1, triangle.2];
                result.push([
                    Point3::new(a.x, a.y, 0.0),
                    Point3::new(b.x, b.y, 0.0),
                    Point3::new(c.x, c.y, 0.0),
                ]);
            }
            result
        }
    }

    /// Triangulate each face, returning a mesh containing only triangles.
    ///
    /// Quads split along a diagonal; larger faces (the planar gear caps) are
    /// ear-cut in the XY plane with their original winding preserved.
    pub fn triangulate(&self) -> Mesh<S> {
        let mut faces = Vec::with_capacity(self.faces.len());
        for face in &self.faces {
            match face.len() {
                0..=2 => {},
                3 => faces.push(face.clone()),
                4 => {
                    faces.push(vec![face[0], face[1], face[2]]);
                    faces.push(vec![face[0], face[2], face[3]]);
                },
                _ => {
                    let ring: Vec<[Real; 2]> = face
                        .iter()
                        .map(|&i| {
                            let p = self.vertices[i];
                            [p.x, p.y]
                        })
                        .collect();
                    let clockwise = signed_area(&ring) < 0.0;

                    // Map triangulated coordinates back to this face's
                    // vertex indices.
                    let lookup: HashMap<[u64; 2], usize> = face
                        .iter()
                        .map(|&i| {
                            let p = self.vertices[i];
                            ([p.x.to_bits() as u64, p.y.to_bits() as u64], i)
                        })
                        .collect();

                    for tri in Self::triangulate_2d(&ring, &[]) {
                        let mut indices = Vec::with_capacity(3);
                        for p in &tri {
                            let key = [p.x.to_bits() as u64, p.y.to_bits() as u64];
                            if let Some(&i) = lookup.get(&key) {
                                indices.push(i);
                            }
                        }
                        if indices.len() == 3 {
                            // Ear-cut output is counterclockwise; restore
                            // the face's own winding.
                            if clockwise {
                                indices.reverse();
                            }
                            faces.push(indices);
                        }
                    }
                },
            }
        }

        Mesh {
            vertices: self.vertices.clone(),
            faces,
            metadata: self.metadata.clone(),
        }
    }

    /// Apply an arbitrary affine transform (as a 4x4 matrix) to the mesh.
    pub fn transformed(&self, matrix: &Matrix4<Real>) -> Mesh<S> {
        let vertices = self
            .vertices
            .iter()
            .map(|p| matrix.transform_point(p))
            .collect();

        Mesh {
            vertices,
            faces: self.faces.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Returns a new mesh translated by x, y, and z.
    pub fn translate(&self, x: Real, y: Real, z: Real) -> Mesh<S> {
        self.transformed(&Translation3::new(x, y, z).to_homogeneous())
    }

    /// Returns a new mesh rotated about the z axis by `angle` radians.
    pub fn rotate_z(&self, angle: Real) -> Mesh<S> {
        let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), angle);
        self.transformed(&rotation.to_homogeneous())
    }
}

/// Strip the explicit closing point from a closed ring.
fn open_ring(ring: &[[Real; 2]]) -> Vec<[Real; 2]> {
    let mut points = ring.to_vec();
    if points.len() >= 2 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Number of pairwise-distinct points, saturating at 3.
fn count_distinct(points: &[[Real; 2]]) -> usize {
    let mut distinct: Vec<[Real; 2]> = Vec::new();
    for p in points {
        if distinct
            .iter()
            .all(|q| (p[0] - q[0]).abs() > EPSILON || (p[1] - q[1]).abs() > EPSILON)
        {
            distinct.push(*p);
            if distinct.len() >= 3 {
                return 3;
            }
        }
    }
    distinct.len()
}

/// Shoelace area of an open ring, positive for counterclockwise winding.
fn signed_area(ring: &[[Real; 2]]) -> Real {
    let mut doubled = 0.0;
    for i in 0..ring.len() {
        let j = (i + 1) % ring.len();
        doubled += ring[i][0] * ring[j][1] - ring[j][0] * ring[i][1];
    }
    0.5 * doubled
}

/// One quad per boundary edge, joining a loop to its offset copy. Zero-width
/// edges (repeated indices) are skipped.
fn side_walls<S: Clone + Send + Sync + Debug>(
    builder: &mut MeshBuilder<S>,
    bottom: &[usize],
    top: &[usize],
) {
    let n = bottom.len();
    for i in 0..n {
        let j = (i + 1) % n;
        if bottom[i] == bottom[j] {
            continue;
        }
        builder.face(vec![bottom[i], bottom[j], top[j], top[i]]);
    }
}
