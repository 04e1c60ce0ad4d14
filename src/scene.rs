//! The outward mesh-sink contract and an in-memory scene.

use crate::float_types::Real;
use crate::mesh::Mesh;
use nalgebra::Point3;
use std::fmt::Debug;
use std::sync::Arc;

/// Where finished gear meshes go.
///
/// The generator hands each solid outward through this trait: an entity is
/// created from a (possibly shared) mesh, placed, and linked into the host's
/// scene. `discard` removes an entity that never gets linked, such as the
/// planet template once its instances exist. Shared meshes are immutable;
/// instances differ only in their placement records.
pub trait MeshSink<S: Clone + Send + Sync + Debug> {
    type Handle;

    /// Instantiate a named entity around `mesh`.
    fn create_entity(&mut self, name: &str, mesh: Arc<Mesh<S>>) -> Self::Handle;

    /// Set an entity's translation and rotation about the z axis.
    fn place(
        &mut self,
        entity: &Self::Handle,
        translation: Point3<Real>,
        rotation_z: Real,
    );

    /// Make the entity part of the visible scene.
    fn link_into_scene(&mut self, entity: &Self::Handle);

    /// Drop an entity that is not part of the scene.
    fn discard(&mut self, entity: Self::Handle);
}

/// A placement record: translation plus rotation about the z axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub translation: Point3<Real>,
    pub rotation_z: Real,
}

impl Default for Placement {
    fn default() -> Self {
        Placement {
            translation: Point3::origin(),
            rotation_z: 0.0,
        }
    }
}

/// An entity held by a [`MemoryScene`].
#[derive(Debug, Clone)]
pub struct SceneEntity<S: Clone + Send + Sync + Debug> {
    pub name: String,
    pub mesh: Arc<Mesh<S>>,
    pub placement: Placement,
    pub linked: bool,
}

impl<S: Clone + Send + Sync + Debug> SceneEntity<S> {
    /// The entity's mesh with its placement applied: rotated about its own
    /// axis, then translated to its position.
    pub fn world_mesh(&self) -> Mesh<S> {
        let t = self.placement.translation;
        self.mesh
            .rotate_z(self.placement.rotation_z)
            .translate(t.x, t.y, t.z)
    }
}

/// An in-memory [`MeshSink`], used by the demo binary and tests.
///
/// Discarded entities leave a tombstone so handles stay stable.
#[derive(Debug)]
pub struct MemoryScene<S: Clone + Send + Sync + Debug> {
    entities: Vec<Option<SceneEntity<S>>>,
}

impl<S: Clone + Send + Sync + Debug> MemoryScene<S> {
    pub fn new() -> Self {
        MemoryScene {
            entities: Vec::new(),
        }
    }

    /// The entity behind `handle`, unless it was discarded.
    pub fn get(&self, handle: usize) -> Option<&SceneEntity<S>> {
        self.entities.get(handle).and_then(|slot| slot.as_ref())
    }

    /// Look an entity up by name.
    pub fn find(&self, name: &str) -> Option<&SceneEntity<S>> {
        self.iter().find(|entity| entity.name == name)
    }

    /// All live entities.
    pub fn iter(&self) -> impl Iterator<Item = &SceneEntity<S>> {
        self.entities.iter().filter_map(|slot| slot.as_ref())
    }

    /// Entities that were linked into the scene.
    pub fn linked(&self) -> impl Iterator<Item = &SceneEntity<S>> {
        self.iter().filter(|entity| entity.linked)
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: Clone + Send + Sync + Debug> Default for MemoryScene<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> MeshSink<S> for MemoryScene<S> {
    type Handle = usize;

    fn create_entity(&mut self, name: &str, mesh: Arc<Mesh<S>>) -> usize {
        self.entities.push(Some(SceneEntity {
            name: name.to_owned(),
            mesh,
            placement: Placement::default(),
            linked: false,
        }));
        self.entities.len() - 1
    }

    fn place(&mut self, entity: &usize, translation: Point3<Real>, rotation_z: Real) {
        if let Some(Some(entity)) = self.entities.get_mut(*entity) {
            entity.placement = Placement {
                translation,
                rotation_z,
            };
        }
    }

    fn link_into_scene(&mut self, entity: &usize) {
        if let Some(Some(entity)) = self.entities.get_mut(*entity) {
            entity.linked = true;
        }
    }

    fn discard(&mut self, entity: usize) {
        if let Some(slot) = self.entities.get_mut(entity) {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::GearOutline;

    fn triangle_mesh() -> Arc<Mesh<()>> {
        let outline = GearOutline {
            boundary: vec![[0.0, 0.0], [1.0, 0.0], [0.5, 1.0], [0.0, 0.0]],
            rim: None,
        };
        Arc::new(Mesh::extrude_outline(&outline, 1.0, None).unwrap())
    }

    #[test]
    fn entities_are_created_unlinked_at_the_origin() {
        let mut scene = MemoryScene::new();
        let handle = scene.create_entity("Tri", triangle_mesh());
        let entity = scene.get(handle).unwrap();
        assert_eq!(entity.name, "Tri");
        assert!(!entity.linked);
        assert_eq!(entity.placement, Placement::default());
    }

    #[test]
    fn place_and_link_update_the_entity() {
        let mut scene = MemoryScene::new();
        let handle = scene.create_entity("Tri", triangle_mesh());
        scene.place(&handle, Point3::new(1.0, 2.0, 0.0), 0.5);
        scene.link_into_scene(&handle);

        let entity = scene.get(handle).unwrap();
        assert!(entity.linked);
        assert_eq!(entity.placement.rotation_z, 0.5);
        assert_eq!(scene.linked().count(), 1);
    }

    #[test]
    fn discard_removes_the_entity_but_keeps_handles_stable() {
        let mut scene = MemoryScene::new();
        let first = scene.create_entity("A", triangle_mesh());
        let second = scene.create_entity("B", triangle_mesh());
        scene.discard(first);

        assert!(scene.get(first).is_none());
        assert_eq!(scene.get(second).unwrap().name, "B");
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn world_mesh_applies_rotation_before_translation() {
        let mut scene = MemoryScene::new();
        let handle = scene.create_entity("Tri", triangle_mesh());
        scene.place(&handle, Point3::new(5.0, 0.0, 0.0), crate::float_types::PI);

        let world = scene.get(handle).unwrap().world_mesh();
        // The corner at (1, 0) rotates to (-1, 0) and lands at (4, 0).
        assert!(
            world
                .vertices
                .iter()
                .any(|p| (p.x - 4.0).abs() < 1e-9 && p.y.abs() < 1e-9)
        );
    }
}
