//! Error taxonomy for sampling, assembling and configuring a sculpture

use std::path::PathBuf;

use crate::geometry::ObjectHandle;

/// Convenience alias used throughout the crate.
pub type Result<T, E = PointCubeError> = std::result::Result<T, E>;

/// All the possible failures we might encounter while building a sculpture
#[derive(Debug, thiserror::Error)]
pub enum PointCubeError {
    /// (ImageLoad) The raster image could not be opened or decoded
    #[error("(ImageLoad) could not load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// (DegenerateGrid) More stacks were requested than the image has rows
    #[error(
        "(DegenerateGrid) stack count {stack_count} exceeds image height {height}, cell size would be zero"
    )]
    DegenerateGrid { stack_count: u32, height: u32 },

    /// (FlatImage) Every pixel has the same intensity, so sizes cannot be normalized
    #[error("(FlatImage) image has no intensity range (every pixel is {value})")]
    FlatImage { value: u8 },

    /// (NoPrimitives) A face produced no point primitive to merge
    #[error("(NoPrimitives) face '{face}' has no primitives to merge")]
    NoPrimitives { face: String },

    /// (InvalidConfig) A parameter is out of its allowed range
    #[error("(InvalidConfig) {0}")]
    InvalidConfig(String),

    /// (InvalidTransition) A face was asked to move backwards through its lifecycle
    #[error("(InvalidTransition) face '{face}' cannot {action} while {state}")]
    InvalidTransition {
        face: String,
        action: &'static str,
        state: String,
    },

    /// (UnknownObject) A handle does not refer to a live scene object
    #[error("(UnknownObject) no scene object with handle {0}")]
    UnknownObject(ObjectHandle),

    /// Configuration file could not be parsed
    #[error("could not parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Error bubbled up from the filesystem
    #[error("std::io::Error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more faces failed validation; the scene was left untouched
    #[error("{} face(s) failed: {}", .0.len(), summarize(.0))]
    Faces(Vec<FaceError>),
}

/// A failure attributed to a single named face.
#[derive(Debug, thiserror::Error)]
#[error("face '{face}': {source}")]
pub struct FaceError {
    pub face: String,
    #[source]
    pub source: PointCubeError,
}

fn summarize(errors: &[FaceError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
