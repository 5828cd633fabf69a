//! Turn three grayscale views (front, side, top) into a **point‑cloud sculpture**.
//!
//! Each image is overlaid with a coarse grid; the intensity of every grid
//! cell becomes the radius of a small octagonal disc placed at
//! `(column, random depth, row)`. The discs of one view are joined into a
//! single object and the three objects are turned so they face each other
//! like the sides of a cube.
//!
//! ```no_run
//! use pointcube::{Assembler, Scene, SculptureConfig, build_sculpture};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let config = SculptureConfig::default();
//! let mut assembler = Assembler::new(Scene::new(), StdRng::seed_from_u64(7));
//! let report = build_sculpture(&config, &mut assembler)?;
//! println!("{} faces", report.faces.len());
//! # Ok::<(), pointcube::PointCubeError>(())
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` export
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod assembler;
pub mod config;
pub mod errors;
pub mod float_types;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod polygon;
pub mod raster;
pub mod sampler;
pub mod scene;
pub mod sculpture;
pub mod traits;
pub mod vertex;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use assembler::{Assembler, FaceAssembly, FaceState};
pub use config::{FaceConfig, SculptureConfig};
pub use errors::{FaceError, PointCubeError};
pub use geometry::{Axis, GeometryService, ObjectHandle};
pub use raster::RasterImage;
pub use sampler::{Cell, FaceSampler, SampleParams, ZeroRadiusPolicy, sample_face};
pub use scene::Scene;
pub use sculpture::{FaceReport, SculptureReport, build_sculpture};
