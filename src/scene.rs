//! In‑memory scene implementing [`GeometryService`]

use std::collections::BTreeMap;

use nalgebra::{Matrix4, Point3, Translation3, Vector3};
use tracing::{debug, info};

use crate::errors::{PointCubeError, Result};
use crate::float_types::Real;
use crate::geometry::{Axis, GeometryService, ObjectHandle};
use crate::mesh::Mesh;
use crate::traits::{Transformable, euler_xyz};

/// A named object: local geometry placed by a location and an XYZ Euler rotation.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub location: Point3<Real>,
    /// Radians, applied X then Y then Z
    pub rotation: Vector3<Real>,
    /// Geometry in object space; polygon metadata carries the creating tag
    pub mesh: Mesh<String>,
}

impl SceneObject {
    /// Object‑to‑world matrix, `T(location) * Rz * Ry * Rx`.
    pub fn world_transform(&self) -> Matrix4<Real> {
        Translation3::from(self.location.coords).to_homogeneous() * euler_xyz(self.rotation)
    }

    /// World‑to‑object matrix.
    pub fn inverse_world_transform(&self) -> Matrix4<Real> {
        // the rotation part is orthonormal
        euler_xyz(self.rotation).transpose()
            * Translation3::from(-self.location.coords).to_homogeneous()
    }

    /// Geometry with the object transform baked in.
    pub fn world_mesh(&self) -> Mesh<String> {
        self.mesh.transform(&self.world_transform())
    }
}

/// A flat collection of objects, addressed by [`ObjectHandle`].
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: BTreeMap<ObjectHandle, SceneObject>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(&handle)
    }

    /// Insert a ready-made object and return its handle.
    pub fn insert(&mut self, object: SceneObject) -> ObjectHandle {
        let handle = ObjectHandle(self.next_id);
        self.next_id += 1;
        self.objects.insert(handle, object);
        handle
    }

    pub fn world_mesh(&self, handle: ObjectHandle) -> Option<Mesh<String>> {
        self.objects.get(&handle).map(SceneObject::world_mesh)
    }

    /// Every object baked into world space and joined into one mesh.
    pub fn to_mesh(&self) -> Mesh<String> {
        let mut mesh = Mesh::new();
        for ob in self.objects.values() {
            mesh.append(ob.world_mesh());
        }
        mesh
    }

    fn get_mut(&mut self, handle: ObjectHandle) -> Result<&mut SceneObject> {
        self.objects
            .get_mut(&handle)
            .ok_or(PointCubeError::UnknownObject(handle))
    }
}

impl GeometryService for Scene {
    fn create_point_primitive(
        &mut self,
        position: Point3<Real>,
        radius: Real,
        orientation: Vector3<Real>,
        tag: &str,
    ) -> Result<ObjectHandle> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(PointCubeError::InvalidConfig(format!(
                "point radius must be zero or positive, got {radius}"
            )));
        }

        Ok(self.insert(SceneObject {
            name: tag.to_string(),
            location: position,
            rotation: orientation,
            mesh: Mesh::point_marker(radius, Some(tag.to_string())),
        }))
    }

    fn select_and_join(&mut self, handles: &[ObjectHandle], name: &str) -> Result<ObjectHandle> {
        let Some((&active, rest)) = handles.split_first() else {
            return Err(PointCubeError::NoPrimitives {
                face: name.to_string(),
            });
        };

        let mut selection = Vec::with_capacity(rest.len());
        for &handle in rest {
            if !self.objects.contains_key(&handle) {
                return Err(PointCubeError::UnknownObject(handle));
            }
            if handle != active && !selection.contains(&handle) {
                selection.push(handle);
            }
        }
        let to_local = self.get_mut(active)?.inverse_world_transform();

        let mut joined = Mesh::new();
        for handle in &selection {
            if let Some(ob) = self.objects.remove(handle) {
                joined.append(ob.mesh.transform(&(to_local * ob.world_transform())));
            }
        }

        let target = self.get_mut(active)?;
        target.mesh.append(joined);
        target.name = name.to_string();

        info!(
            object = name,
            handle = %active,
            joined = selection.len() + 1,
            "joined objects"
        );
        Ok(active)
    }

    fn set_rotation(&mut self, handle: ObjectHandle, axis: Axis, radians: Real) -> Result<()> {
        let ob = self.get_mut(handle)?;
        ob.rotation[axis.index()] = radians;
        debug!(object = %ob.name, ?axis, radians, "set rotation");
        Ok(())
    }

    fn rotation(&self, handle: ObjectHandle) -> Option<Vector3<Real>> {
        self.objects.get(&handle).map(|ob| ob.rotation)
    }

    fn list_scene_objects(&self) -> Vec<(ObjectHandle, String)> {
        self.objects
            .iter()
            .map(|(handle, ob)| (*handle, ob.name.clone()))
            .collect()
    }
}
