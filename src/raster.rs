//! Grayscale raster images loaded through the `image` crate

use std::path::Path;

use image::GrayImage;

use crate::errors::{PointCubeError, Result};

/// An immutable 8‑bit intensity grid, stored row‑major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Open any image the `image` crate can decode and reduce it to luma.
    ///
    /// # Example
    /// ```no_run
    /// # use pointcube::raster::RasterImage;
    /// let img = RasterImage::open("input-images/front_.png")?;
    /// println!("{}x{}", img.width(), img.height());
    /// # Ok::<(), pointcube::errors::PointCubeError>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| PointCubeError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_gray(&img.to_luma8()))
    }

    /// Copy the pixels out of an in-memory grayscale buffer.
    pub fn from_gray(img: &GrayImage) -> Self {
        RasterImage {
            width: img.width(),
            height: img.height(),
            pixels: img.as_raw().clone(),
        }
    }

    /// Build from raw row‑major pixels. `pixels.len()` must equal `width * height`.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(PointCubeError::InvalidConfig(format!(
                "{width}x{height} image needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(RasterImage {
            width,
            height,
            pixels,
        })
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Intensity at column `x`, row `row` (row 0 is the top of the image).
    ///
    /// # Panics
    /// If the coordinate is outside the image.
    pub fn pixel(&self, x: u32, row: u32) -> u8 {
        assert!(x < self.width && row < self.height, "pixel out of bounds");
        self.pixels[row as usize * self.width as usize + x as usize]
    }

    /// Global `(min, max)` intensity over every pixel, `None` for an empty image.
    pub fn intensity_range(&self) -> Option<(u8, u8)> {
        let min = self.pixels.iter().copied().min()?;
        let max = self.pixels.iter().copied().max()?;
        Some((min, max))
    }
}
