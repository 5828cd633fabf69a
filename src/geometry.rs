//! The geometry‑authoring service the assembler drives.
//!
//! Anything that can create point primitives, join objects and rotate them
//! can host a sculpture. [`crate::scene::Scene`] is the in-memory
//! implementation shipped with this crate.

use std::fmt;

use nalgebra::{Point3, Vector3};

use crate::errors::Result;
use crate::float_types::Real;

/// Opaque identifier of an object owned by a [`GeometryService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectHandle(pub u64);

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Principal axes, used to address one component of an Euler rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

pub trait GeometryService {
    /// Create one point marker of `radius` at `position`, rotated by the XYZ
    /// Euler triple `orientation` (radians) and named `tag`.
    fn create_point_primitive(
        &mut self,
        position: Point3<Real>,
        radius: Real,
        orientation: Vector3<Real>,
        tag: &str,
    ) -> Result<ObjectHandle>;

    /// Join `handles` into the first of them and rename it to `name`.
    ///
    /// The other handles are invalidated.
    fn select_and_join(&mut self, handles: &[ObjectHandle], name: &str) -> Result<ObjectHandle>;

    /// Overwrite one component of the object's Euler rotation.
    fn set_rotation(&mut self, handle: ObjectHandle, axis: Axis, radians: Real) -> Result<()>;

    /// Current XYZ Euler rotation of an object, `None` if the handle is stale.
    fn rotation(&self, handle: ObjectHandle) -> Option<Vector3<Real>>;

    /// Every live object, in creation order.
    fn list_scene_objects(&self) -> Vec<(ObjectHandle, String)>;
}
