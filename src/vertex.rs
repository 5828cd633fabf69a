//! Struct and functions for working with `Vertex`s from which `Polygon`s are composed.

use crate::float_types::Real;
use nalgebra::{Matrix4, Point3, Vector3};

/// A vertex of a polygon, holding position and normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`].
    ///
    /// * `pos`    – the position in model space
    /// * `normal` – (optionally non‑unit) normal; it will be **copied
    ///   verbatim**, so make sure it is oriented the way you need it.
    pub const fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        Vertex { pos, normal }
    }

    /// Flip vertex normal
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Apply an affine transform in place.
    ///
    /// `normal_matrix` is the inverse‑transpose of `mat`; callers compute it
    /// once per mesh instead of once per vertex.
    pub fn transform(&mut self, mat: &Matrix4<Real>, normal_matrix: &Matrix4<Real>) {
        self.pos = mat.transform_point(&self.pos);
        let n = normal_matrix.transform_vector(&self.normal);
        self.normal = n.try_normalize(Real::EPSILON).unwrap_or(n);
    }
}
