use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use nalgebra::{Matrix4, Rotation3, Translation3, Vector3};

/// Rigid transformations shared by every geometry container
pub trait Transformable: Sized + Clone {
    fn transform(&self, matrix: &Matrix4<Real>) -> Self;
    fn bounding_box(&self) -> Aabb;
    fn invalidate_bounding_box(&mut self);

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector3<Real>) -> Self {
        self.transform(&Translation3::from(vector).to_homogeneous())
    }

    /// Returns a new Self translated by x, y, and z.
    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Rotates by x_degrees, y_degrees, z_degrees
    fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Self {
        self.rotate_euler(Vector3::new(
            x_deg.to_radians(),
            y_deg.to_radians(),
            z_deg.to_radians(),
        ))
    }

    /// Rotates by an XYZ Euler triple given in radians.
    ///
    /// X is applied first, then Y, then Z (`R = Rz * Ry * Rx`).
    fn rotate_euler(&self, radians: Vector3<Real>) -> Self {
        self.transform(&euler_xyz(radians))
    }
}

/// Homogeneous rotation for an XYZ Euler triple in radians (`Rz * Ry * Rx`).
pub fn euler_xyz(radians: Vector3<Real>) -> Matrix4<Real> {
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), radians.x);
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), radians.y);
    let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), radians.z);

    // Compose them in the desired order
    (rz * ry * rx).to_homogeneous()
}
