//! Primitive shapes used as point markers

use crate::float_types::{Real, TAU};
use crate::mesh::Mesh;
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

/// Number of sides of the polygon standing in for one sampled cell.
pub const POINT_SEGMENTS: usize = 8;

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// A filled regular n‑gon of the given `radius`, centered at the origin
    /// in the XY plane with its normal along +Z.
    ///
    /// `segments` is clamped to at least 3. A radius of zero yields a single
    /// polygon whose vertices all coincide.
    ///
    /// # Example
    /// ```
    /// # use pointcube::mesh::Mesh;
    /// let disc: Mesh<()> = Mesh::disc(0.5, 8, None);
    /// assert_eq!(disc.polygons[0].vertices.len(), 8);
    /// ```
    pub fn disc(radius: Real, segments: usize, metadata: Option<S>) -> Self {
        let segments = segments.max(3);
        let normal = Vector3::z();

        let vertices = (0..segments)
            .map(|i| {
                let theta = TAU * (i as Real) / (segments as Real);
                Vertex::new(
                    Point3::new(radius * theta.cos(), radius * theta.sin(), 0.0),
                    normal,
                )
            })
            .collect();

        Mesh::from_polygons(&[Polygon::new(vertices, metadata)])
    }

    /// The octagonal marker used for every point primitive.
    pub fn point_marker(radius: Real, metadata: Option<S>) -> Self {
        Self::disc(radius, POINT_SEGMENTS, metadata)
    }
}
