//! TOML configuration of a sculpture
//!
//! ```toml
//! seed = 7
//!
//! [[faces]]
//! name = "front"
//! image = "input-images/front_.png"
//! invert = true
//!
//! [[faces]]
//! name = "side"
//! image = "input-images/side_.png"
//! stack_count = 30
//! point_size_cutoff = 0.05
//! zero_radius = "suppress"
//! ```
//!
//! Omitted per‑face keys fall back to the defaults of [`FaceConfig`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assembler::{FRONT, SIDE, TOP};
use crate::errors::{PointCubeError, Result};
use crate::float_types::Real;
use crate::sampler::{SampleParams, ZeroRadiusPolicy};

const fn default_stack_count() -> u32 {
    20
}

const fn default_y_max() -> u32 {
    20
}

const fn default_point_size() -> Real {
    0.5
}

/// Settings for one face of the cube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaceConfig {
    pub name: String,
    pub image: PathBuf,
    #[serde(default = "default_stack_count")]
    pub stack_count: u32,
    /// Upper bound (inclusive) of the random depth jitter
    #[serde(default = "default_y_max")]
    pub y_max: u32,
    #[serde(default)]
    pub invert: bool,
    #[serde(default = "default_point_size")]
    pub point_size: Real,
    #[serde(default)]
    pub point_size_cutoff: Real,
    #[serde(default)]
    pub zero_radius: ZeroRadiusPolicy,
}

impl FaceConfig {
    /// A face with every tunable at its default.
    pub fn new(name: impl Into<String>, image: impl Into<PathBuf>) -> Self {
        FaceConfig {
            name: name.into(),
            image: image.into(),
            stack_count: default_stack_count(),
            y_max: default_y_max(),
            invert: false,
            point_size: default_point_size(),
            point_size_cutoff: 0.0,
            zero_radius: ZeroRadiusPolicy::Emit,
        }
    }

    pub const fn sample_params(&self) -> SampleParams {
        SampleParams {
            stack_count: self.stack_count,
            invert: self.invert,
            point_size: self.point_size,
            point_size_cutoff: self.point_size_cutoff,
            zero_radius: self.zero_radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SculptureConfig {
    /// Seed for the depth jitter; `None` draws one from the OS
    #[serde(default)]
    pub seed: Option<u64>,
    pub faces: Vec<FaceConfig>,
}

impl Default for SculptureConfig {
    /// The classic arrangement: an inverted front view plus side and top.
    fn default() -> Self {
        let mut front = FaceConfig::new(FRONT, "input-images/front_.png");
        front.invert = true;

        SculptureConfig {
            seed: None,
            faces: vec![
                front,
                FaceConfig::new(SIDE, "input-images/side_.png"),
                FaceConfig::new(TOP, "input-images/top_.png"),
            ],
        }
    }
}

impl SculptureConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SculptureConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file. Relative image paths are resolved
    /// against the directory holding the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::from_toml_str(&std::fs::read_to_string(path)?)?;

        if let Some(dir) = path.parent() {
            for face in &mut config.faces {
                if face.image.is_relative() {
                    face.image = dir.join(&face.image);
                }
            }
        }
        Ok(config)
    }

    pub fn face(&self, name: &str) -> Option<&FaceConfig> {
        self.faces.iter().find(|f| f.name == name)
    }

    pub fn face_mut(&mut self, name: &str) -> Option<&mut FaceConfig> {
        self.faces.iter_mut().find(|f| f.name == name)
    }

    /// Reject empty or duplicate face names and out-of-range parameters.
    pub fn validate(&self) -> Result<()> {
        if self.faces.is_empty() {
            return Err(PointCubeError::InvalidConfig("no faces configured".into()));
        }

        let mut seen = HashSet::new();
        for face in &self.faces {
            if face.name.is_empty() {
                return Err(PointCubeError::InvalidConfig("face name is empty".into()));
            }
            if !seen.insert(face.name.as_str()) {
                return Err(PointCubeError::InvalidConfig(format!(
                    "face '{}' is configured twice",
                    face.name
                )));
            }
            face.sample_params().validate().map_err(|err| match err {
                PointCubeError::InvalidConfig(msg) => {
                    PointCubeError::InvalidConfig(format!("face '{}': {msg}", face.name))
                },
                other => other,
            })?;
        }

        Ok(())
    }
}
