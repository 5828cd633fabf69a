//! Turns sampled cells into point primitives and merges them per face.

use std::collections::BTreeMap;
use std::fmt;

use nalgebra::{Point3, Vector3};
use rand::Rng;
use tracing::{debug, info};

use crate::errors::{PointCubeError, Result};
use crate::float_types::{FRAC_PI_2, Real};
use crate::geometry::{Axis, GeometryService, ObjectHandle};
use crate::sampler::Cell;

pub const FRONT: &str = "front";
pub const SIDE: &str = "side";
pub const TOP: &str = "top";

/// Every primitive is stood up so its face points along the depth (Y) axis.
pub const POINT_ORIENTATION: Vector3<Real> = Vector3::new(FRAC_PI_2, 0.0, 0.0);

/// Lifecycle of a single face. Transitions only move forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FaceState {
    #[default]
    NotStarted,
    Emitting {
        cells_processed: usize,
    },
    Merged,
    Reoriented,
}

impl fmt::Display for FaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceState::NotStarted => write!(f, "not started"),
            FaceState::Emitting { cells_processed } => {
                write!(f, "emitting ({cells_processed} cells processed)")
            },
            FaceState::Merged => write!(f, "merged"),
            FaceState::Reoriented => write!(f, "reoriented"),
        }
    }
}

/// The merged object of one face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceAssembly {
    pub name: String,
    pub handle: ObjectHandle,
    /// Number of point primitives created for this face
    pub primitives: usize,
}

/// Drives a [`GeometryService`], drawing depth jitter from an injected RNG.
#[derive(Debug)]
pub struct Assembler<G: GeometryService, R: Rng> {
    service: G,
    rng: R,
    states: BTreeMap<String, FaceState>,
}

impl<G: GeometryService, R: Rng> Assembler<G, R> {
    pub fn new(service: G, rng: R) -> Self {
        Assembler {
            service,
            rng,
            states: BTreeMap::new(),
        }
    }

    pub const fn service(&self) -> &G {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut G {
        &mut self.service
    }

    pub fn into_service(self) -> G {
        self.service
    }

    pub fn face_state(&self, face: &str) -> FaceState {
        self.states.get(face).copied().unwrap_or_default()
    }

    /// Create one primitive per cell at `(x_idx, jitter, z_idx)` with
    /// `jitter` uniform in `[0, y_max]`, then join those primitives into a
    /// single object named `face`. An empty `cells` yields
    /// [`PointCubeError::NoPrimitives`].
    ///
    /// A failure while emitting leaves the face in [`FaceState::Emitting`];
    /// it cannot be retried.
    pub fn emit_face<I>(&mut self, face: &str, cells: I, y_max: u32) -> Result<FaceAssembly>
    where
        I: IntoIterator<Item = Cell>,
    {
        let state = self.face_state(face);
        if state != FaceState::NotStarted {
            return Err(PointCubeError::InvalidTransition {
                face: face.to_string(),
                action: "emit",
                state: state.to_string(),
            });
        }

        let mut handles = Vec::new();
        let mut cells_processed = 0;
        self.states
            .insert(face.to_string(), FaceState::Emitting { cells_processed });

        for cell in cells {
            let jitter = self.rng.gen_range(0..=y_max);
            let position = Point3::new(cell.x_idx as Real, jitter as Real, cell.z_idx as Real);
            handles.push(self.service.create_point_primitive(
                position,
                cell.size,
                POINT_ORIENTATION,
                face,
            )?);

            cells_processed += 1;
            self.states
                .insert(face.to_string(), FaceState::Emitting { cells_processed });
        }
        debug!(face, cells_processed, "emitted point primitives");

        let handle = self.merge_face(face, &handles)?;
        Ok(FaceAssembly {
            name: face.to_string(),
            handle,
            primitives: cells_processed,
        })
    }

    /// Join exactly the primitives created for `face`; other objects in the
    /// service are never selected, whatever their names.
    fn merge_face(&mut self, face: &str, handles: &[ObjectHandle]) -> Result<ObjectHandle> {
        if handles.is_empty() {
            return Err(PointCubeError::NoPrimitives {
                face: face.to_string(),
            });
        }

        let merged = self.service.select_and_join(handles, face)?;
        self.states.insert(face.to_string(), FaceState::Merged);
        info!(face, handle = %merged, primitives = handles.len(), "merged face");
        Ok(merged)
    }

    /// Turn "side" +90° about Z and "top" −90° about X.
    ///
    /// Missing objects are skipped and a face is only ever turned once.
    /// Returns the names of the faces rotated by this call.
    pub fn finalize_orientation(&mut self) -> Result<Vec<String>> {
        let mut rotated = Vec::new();

        for (handle, name) in self.service.list_scene_objects() {
            let (axis, delta) = match name.as_str() {
                SIDE => (Axis::Z, FRAC_PI_2),
                TOP => (Axis::X, -FRAC_PI_2),
                _ => continue,
            };
            if self.face_state(&name) == FaceState::Reoriented {
                continue;
            }

            let current = self
                .service
                .rotation(handle)
                .ok_or(PointCubeError::UnknownObject(handle))?;
            self.service
                .set_rotation(handle, axis, current[axis.index()] + delta)?;

            self.states.insert(name.clone(), FaceState::Reoriented);
            info!(face = %name, ?axis, "reoriented face");
            rotated.push(name);
        }

        Ok(rotated)
    }
}
