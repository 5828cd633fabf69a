//! End‑to‑end build: sample every face, emit and merge, then reorient.

use rand::Rng;
use tracing::{info, warn};

use crate::assembler::Assembler;
use crate::config::SculptureConfig;
use crate::errors::{FaceError, PointCubeError, Result};
use crate::geometry::{GeometryService, ObjectHandle};
use crate::sampler::{FaceSampler, sample_face};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceReport {
    pub name: String,
    pub handle: ObjectHandle,
    pub primitives: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SculptureReport {
    pub faces: Vec<FaceReport>,
    /// Faces turned by the final orientation pass
    pub reoriented: Vec<String>,
}

impl SculptureReport {
    pub fn face(&self, name: &str) -> Option<&FaceReport> {
        self.faces.iter().find(|f| f.name == name)
    }
}

/// Build every configured face into `assembler`'s service.
///
/// All images are loaded and sampled before the first primitive is
/// created. If any face fails (unreadable image, degenerate grid, flat
/// image, or no cell above the cutoff) the failures are returned together
/// as [`PointCubeError::Faces`] and the service is left untouched.
pub fn build_sculpture<G, R>(
    config: &SculptureConfig,
    assembler: &mut Assembler<G, R>,
) -> Result<SculptureReport>
where
    G: GeometryService,
    R: Rng,
{
    config.validate()?;

    let mut prepared: Vec<(&str, u32, FaceSampler)> = Vec::with_capacity(config.faces.len());
    let mut failures = Vec::new();

    for face in &config.faces {
        let checked = sample_face(&face.image, face.sample_params()).and_then(|sampler| {
            if sampler.cells().next().is_none() {
                Err(PointCubeError::NoPrimitives {
                    face: face.name.clone(),
                })
            } else {
                Ok(sampler)
            }
        });

        match checked {
            Ok(sampler) => prepared.push((face.name.as_str(), face.y_max, sampler)),
            Err(source) => {
                warn!(face = %face.name, error = %source, "face failed validation");
                failures.push(FaceError {
                    face: face.name.clone(),
                    source,
                });
            },
        }
    }

    if !failures.is_empty() {
        return Err(PointCubeError::Faces(failures));
    }

    let mut faces = Vec::with_capacity(prepared.len());
    for (name, y_max, sampler) in &prepared {
        let assembly = assembler.emit_face(name, sampler, *y_max)?;
        faces.push(FaceReport {
            name: assembly.name,
            handle: assembly.handle,
            primitives: assembly.primitives,
        });
    }

    let reoriented = assembler.finalize_orientation()?;
    info!(
        faces = faces.len(),
        primitives = faces.iter().map(|f| f.primitives).sum::<usize>(),
        "sculpture complete"
    );

    Ok(SculptureReport { faces, reoriented })
}
