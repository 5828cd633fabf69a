//! Coarse grid sampling of a raster image into sized point cells.
//!
//! A square grid with edge `floor(height / stack_count)` is laid over the
//! image. The top‑left pixel of every grid cell is read and mapped to a
//! point size:
//!
//! ```text
//! raw  = invert ? p : 255 - p
//! size = raw / (v_max - v_min) * point_size
//! ```
//!
//! where `v_min`/`v_max` are the global intensity extremes of the image.
//! Cells whose size falls below `point_size_cutoff` are dropped. Row order is
//! inverted so that the top of the image receives the highest `z_idx`; rows
//! that would land below `z_idx = 0` (the remainder when the height is not a
//! multiple of the cell size) are not sampled.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{PointCubeError, Result};
use crate::float_types::Real;
use crate::raster::RasterImage;

/// What to do with cells whose computed size is exactly zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroRadiusPolicy {
    /// Keep them; they become zero‑radius primitives.
    #[default]
    Emit,
    /// Drop them as if they were below the cutoff.
    Suppress,
}

/// Tunables for sampling one face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleParams {
    /// Number of grid rows along the depth axis
    pub stack_count: u32,
    /// Map bright pixels to big points instead of dark ones
    pub invert: bool,
    /// Scaling factor applied to the normalized intensity
    pub point_size: Real,
    /// Cells with a smaller size are not emitted
    pub point_size_cutoff: Real,
    pub zero_radius: ZeroRadiusPolicy,
}

impl Default for SampleParams {
    fn default() -> Self {
        SampleParams {
            stack_count: 20,
            invert: false,
            point_size: 0.5,
            point_size_cutoff: 0.0,
            zero_radius: ZeroRadiusPolicy::Emit,
        }
    }
}

impl SampleParams {
    /// Check every parameter against its allowed range.
    pub fn validate(&self) -> Result<()> {
        if self.stack_count == 0 {
            return Err(PointCubeError::InvalidConfig(
                "stack_count must be greater than zero".into(),
            ));
        }
        if !self.point_size.is_finite() || self.point_size <= 0.0 {
            return Err(PointCubeError::InvalidConfig(format!(
                "point_size must be a positive number, got {}",
                self.point_size
            )));
        }
        if !self.point_size_cutoff.is_finite() || self.point_size_cutoff < 0.0 {
            return Err(PointCubeError::InvalidConfig(format!(
                "point_size_cutoff must be zero or positive, got {}",
                self.point_size_cutoff
            )));
        }
        Ok(())
    }
}

/// One emitted grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x_idx: u32,
    pub z_idx: u32,
    pub size: Real,
}

/// A validated image + parameter pair ready to produce cells.
///
/// All failure modes (bad parameters, degenerate grid, flat image) are
/// reported by [`FaceSampler::new`]; iterating never fails.
#[derive(Debug, Clone)]
pub struct FaceSampler {
    image: RasterImage,
    params: SampleParams,
    cell_size: u32,
    range: u8,
}

/// Open `path` and prepare it for sampling.
pub fn sample_face(path: impl AsRef<Path>, params: SampleParams) -> Result<FaceSampler> {
    let image = RasterImage::open(path)?;
    FaceSampler::new(image, params)
}

impl FaceSampler {
    pub fn new(image: RasterImage, params: SampleParams) -> Result<Self> {
        params.validate()?;

        let cell_size = image.height() / params.stack_count;
        if cell_size == 0 {
            return Err(PointCubeError::DegenerateGrid {
                stack_count: params.stack_count,
                height: image.height(),
            });
        }

        // a zero-width image has no pixels and ends up as FlatImage
        let (v_min, v_max) = image.intensity_range().unwrap_or((0, 0));
        if v_max == v_min {
            return Err(PointCubeError::FlatImage { value: v_min });
        }

        debug!(
            width = image.width(),
            height = image.height(),
            cell_size,
            v_min,
            v_max,
            "prepared sampling grid"
        );

        Ok(FaceSampler {
            image,
            params,
            cell_size,
            range: v_max - v_min,
        })
    }

    /// Edge length of one grid cell in pixels.
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub const fn image(&self) -> &RasterImage {
        &self.image
    }

    /// Size the pixel at (`x`, `row`) maps to, before the cutoff is applied.
    pub fn size_at(&self, x: u32, row: u32) -> Real {
        let p = self.image.pixel(x, row);
        let raw = if self.params.invert { p } else { 255 - p };
        Real::from(raw) / Real::from(self.range) * self.params.point_size
    }

    /// A fresh iterator over the emitted cells, x outer, rows inner.
    pub fn cells(&self) -> Cells<'_> {
        Cells {
            sampler: self,
            x: 0,
            row: 0,
        }
    }
}

impl<'a> IntoIterator for &'a FaceSampler {
    type Item = Cell;
    type IntoIter = Cells<'a>;

    fn into_iter(self) -> Cells<'a> {
        self.cells()
    }
}

/// Lazy scan over the grid of a [`FaceSampler`].
#[derive(Debug, Clone)]
pub struct Cells<'a> {
    sampler: &'a FaceSampler,
    x: u32,
    row: u32,
}

impl Iterator for Cells<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        let s = self.sampler;
        let (width, height) = (s.image.width(), s.image.height());
        let step = s.cell_size;

        loop {
            if self.x >= width {
                return None;
            }
            if self.row >= height {
                self.x = self.x.saturating_add(step);
                self.row = 0;
                continue;
            }

            let (x, row) = (self.x, self.row);
            let band = row / step;
            if band > s.params.stack_count {
                // leftover rows below the last full stack
                self.row = height;
                continue;
            }
            self.row = self.row.saturating_add(step);

            let size = s.size_at(x, row);
            if size < s.params.point_size_cutoff {
                continue;
            }
            if size == 0.0 && s.params.zero_radius == ZeroRadiusPolicy::Suppress {
                continue;
            }

            return Some(Cell {
                x_idx: x / step,
                z_idx: s.params.stack_count - band,
                size,
            });
        }
    }
}
