//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};
use pointcube::{FaceSampler, RasterImage, SampleParams, float_types::Real};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// A `width x height` image whose pixels come from `f(x, row)`.
pub fn gray(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([f(x, y)]))
}

/// 4x4 image, rows 0, 85, 170, 255 from top to bottom.
pub fn vertical_gradient() -> GrayImage {
    gray(4, 4, |_, row| (row * 85) as u8)
}

/// Diagonal ramp covering the full 0..=255 range.
pub fn full_range(width: u32, height: u32) -> GrayImage {
    gray(width, height, |x, row| {
        let t = (x + row) as f64 / (width + height - 2).max(1) as f64;
        (t * 255.0).round() as u8
    })
}

pub fn sampler(img: &GrayImage, params: SampleParams) -> FaceSampler {
    FaceSampler::new(RasterImage::from_gray(img), params).expect("valid sampler")
}

pub fn params(stack_count: u32, invert: bool) -> SampleParams {
    SampleParams {
        stack_count,
        invert,
        ..SampleParams::default()
    }
}

/// Save `img` as PNG under `dir` and return the full path.
pub fn save_png(dir: &Path, name: &str, img: &GrayImage) -> PathBuf {
    let path = dir.join(name);
    img.save(&path).expect("write png");
    path
}
