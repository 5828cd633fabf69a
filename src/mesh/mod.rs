//! `Mesh` struct and implementations of the `Transformable` trait for `Mesh`

use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::polygon::Polygon;
use crate::traits::Transformable;
use crate::vertex::Vertex;
use nalgebra::{Matrix4, Point3};
use std::{fmt::Debug, sync::OnceLock};

pub mod shapes;

/// A polygon soup. Polygons are kept as‑is; joining two meshes never
/// clips or welds anything.
#[derive(Clone, Debug)]
pub struct Mesh<S: Clone + Send + Sync + Debug> {
    /// 3D polygons
    pub polygons: Vec<Polygon<S>>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,
}

impl<S: Clone + Send + Sync + Debug> Default for Mesh<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Empty mesh
    pub const fn new() -> Self {
        Mesh {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
        }
    }

    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon<S>]) -> Self {
        Mesh {
            polygons: polygons.to_vec(),
            bounding_box: OnceLock::new(),
        }
    }

    /// Move every polygon of `other` into `self` without any boolean clipping.
    ///
    /// This is the "join" used when merging the primitives of a face.
    pub fn append(&mut self, other: Mesh<S>) {
        self.polygons.extend(other.polygons);
        self.invalidate_bounding_box();
    }

    /// Number of polygons
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// `true` when the mesh holds no polygons
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Helper to collect all vertices from the mesh.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.clone())
            .collect()
    }

    /// Triangulate each polygon in the Mesh returning a Mesh containing triangles
    pub fn triangulate(&self) -> Mesh<S> {
        let triangles = self
            .polygons
            .iter()
            .flat_map(|poly| {
                poly.triangulate()
                    .into_iter()
                    .map(move |triangle| Polygon::new(triangle.to_vec(), poly.metadata.clone()))
            })
            .collect::<Vec<_>>();

        Mesh::from_polygons(&triangles)
    }

    /// Visit every triangle of the fan triangulation with its face normal.
    pub fn visit_triangles<F>(&self, mut visit: F)
    where
        F: FnMut([Vertex; 3], nalgebra::Vector3<Real>),
    {
        for poly in &self.polygons {
            let normal = poly.normal();
            for tri in poly.triangulate() {
                visit(tri, normal);
            }
        }
    }
}

impl<S: Clone + Send + Sync + Debug> Transformable for Mesh<S> {
    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to every polygon.
    fn transform(&self, mat: &Matrix4<Real>) -> Mesh<S> {
        // singular matrices only happen for zero scales, where normals carry no meaning anyway
        let normal_matrix = mat
            .try_inverse()
            .map(|inv| inv.transpose())
            .unwrap_or(*mat);
        let mut mesh = self.clone();

        for poly in &mut mesh.polygons {
            poly.transform(mat, &normal_matrix);
        }

        mesh.invalidate_bounding_box();
        mesh
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`] indicating the 3D bounds of all `polygons`.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);

            for poly in &self.polygons {
                let bb = poly.bounding_box();
                mins = mins.inf(&bb.mins);
                maxs = maxs.sup(&bb.maxs);
            }

            // If still uninitialized (e.g., no polygons), return a trivial AABB at origin
            if mins.x > maxs.x {
                return Aabb::new(Point3::origin(), Point3::origin());
            }

            Aabb::new(mins, maxs)
        })
    }

    /// Invalidates object's cached bounding box.
    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }
}
