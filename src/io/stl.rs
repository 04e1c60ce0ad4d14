//! STL export for [`Mesh`].

use crate::float_types::{EPSILON, Real};
use crate::mesh::Mesh;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;
use std::io::Cursor;

fn facet_normal(
    a: &Point3<Real>,
    b: &Point3<Real>,
    c: &Point3<Real>,
) -> Vector3<Real> {
    (b - a)
        .cross(&(c - a))
        .try_normalize(EPSILON)
        .unwrap_or_else(Vector3::zeros)
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Convert this mesh to an **ASCII STL** string with the given `name`.
    ///
    /// ```rust
    /// # use epicyclic::{GearSpec, Mesh};
    /// let gear: Mesh<()> = Mesh::gear(&GearSpec::external(12, 1.0, 20.0, 3.0), None).unwrap();
    /// let text = gear.to_stl_ascii("gear");
    /// assert!(text.starts_with("solid gear"));
    /// ```
    pub fn to_stl_ascii(&self, name: &str) -> String {
        let triangulated = self.triangulate();

        let mut out = String::new();
        out.push_str(&format!("solid {name}\n"));

        for face in &triangulated.faces {
            let a = triangulated.vertices[face[0]];
            let b = triangulated.vertices[face[1]];
            let c = triangulated.vertices[face[2]];
            let n = facet_normal(&a, &b, &c);

            out.push_str(&format!(
                "  facet normal {:.6} {:.6} {:.6}\n",
                n.x, n.y, n.z
            ));
            out.push_str("    outer loop\n");
            for p in [a, b, c] {
                out.push_str(&format!(
                    "      vertex {:.6} {:.6} {:.6}\n",
                    p.x, p.y, p.z
                ));
            }
            out.push_str("    endloop\n");
            out.push_str("  endfacet\n");
        }

        out.push_str(&format!("endsolid {name}\n"));
        out
    }

    /// Convert this mesh to a **binary STL** byte vector with the given
    /// `name`.
    ///
    /// The resulting `Vec<u8>` can be written to a file or handled in
    /// memory.
    pub fn to_stl_binary(&self, _name: &str) -> std::io::Result<Vec<u8>> {
        use stl_io::{Normal, Triangle, Vertex, write_stl};

        let triangulated = self.triangulate();

        let mut triangles = Vec::<Triangle>::with_capacity(triangulated.faces.len());
        for face in &triangulated.faces {
            let a = triangulated.vertices[face[0]];
            let b = triangulated.vertices[face[1]];
            let c = triangulated.vertices[face[2]];
            let n = facet_normal(&a, &b, &c);

            #[allow(clippy::unnecessary_cast)]
            triangles.push(Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [a, b, c]
                    .map(|p| Vertex::new([p.x as f32, p.y as f32, p.z as f32])),
            });
        }

        let mut out = Cursor::new(Vec::new());
        write_stl(&mut out, triangles.iter())?;
        Ok(out.into_inner())
    }
}
