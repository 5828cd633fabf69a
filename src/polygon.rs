//! Struct and functions for working with planar `Polygon`s without holes

use crate::float_types::{Real, parry3d::bounding_volume::Aabb, tolerance};
use crate::vertex::Vertex;
use nalgebra::{Matrix4, Point3, Vector3};
use std::sync::OnceLock;

/// A polygon, defined by a list of vertices.
/// - `S` is the generic metadata type, stored as `Option<S>`.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    /// Vertices defining the Polygon's shape, counter-clockwise seen from the normal
    pub vertices: Vec<Vertex>,

    /// Lazily‑computed axis‑aligned bounding box of the Polygon
    pub bounding_box: OnceLock<Aabb>,

    /// Generic metadata associated with the Polygon
    pub metadata: Option<S>,
}

impl<S: Clone + PartialEq> PartialEq for Polygon<S> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.metadata == other.metadata
    }
}

impl<S: Clone + Send + Sync> Polygon<S> {
    /// Create a polygon from vertices
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        assert!(vertices.len() >= 3, "degenerate polygon");

        Polygon {
            vertices,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// Face normal computed with Newell's method.
    ///
    /// A polygon with no area (e.g. a zero‑radius disc) has no geometric
    /// normal, so the first vertex normal is returned instead.
    pub fn normal(&self) -> Vector3<Real> {
        let mut n = Vector3::zeros();
        for (i, current) in self.vertices.iter().enumerate() {
            let next = &self.vertices[(i + 1) % self.vertices.len()];
            let (c, x) = (current.pos, next.pos);
            n.x += (c.y - x.y) * (c.z + x.z);
            n.y += (c.z - x.z) * (c.x + x.x);
            n.z += (c.x - x.x) * (c.y + x.y);
        }

        n.try_normalize(tolerance() * tolerance())
            .unwrap_or(self.vertices[0].normal)
    }

    /// Axis aligned bounding box of this Polygon (cached after first call)
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for v in &self.vertices {
                mins = mins.inf(&v.pos);
                maxs = maxs.sup(&v.pos);
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Apply an affine transform to every vertex, invalidating the cached box.
    pub fn transform(&mut self, mat: &Matrix4<Real>, normal_matrix: &Matrix4<Real>) {
        for vert in &mut self.vertices {
            vert.transform(mat, normal_matrix);
        }
        self.bounding_box = OnceLock::new();
    }

    /// Reverse winding order and flip every vertex normal
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.bounding_box = OnceLock::new();
    }

    /// Fan‑triangulate this polygon around its first vertex.
    ///
    /// Only valid for convex polygons, which is all this crate produces.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let first = &self.vertices[0];
        self.vertices[1..]
            .windows(2)
            .map(|pair| [first.clone(), pair[0].clone(), pair[1].clone()])
            .collect()
    }

    /// Returns a reference to the metadata, if any.
    pub const fn metadata(&self) -> Option<&S> {
        self.metadata.as_ref()
    }
}
