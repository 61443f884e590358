#![warn(missing_docs)]

//! Math types for the kerf geometry kernel.
//!
//! Thin wrappers around nalgebra providing the primitives shared by every
//! kernel layer: points, vectors, directions, tolerance-aware comparisons,
//! bounding boxes, rigid transforms, and the error taxonomy.

mod bound;
mod error;
mod tolerance;
mod transform;

pub use bound::Bound3;
pub use error::{GeometryError, GeometryResult};
pub use tolerance::Tolerance;
pub use transform::{Axis, RigidTransform};

use nalgebra::{Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Vectors shorter than this cannot be normalized.
pub const NORMALIZE_EPSILON: f64 = 1e-12;

/// Normalize `v`, failing with [`GeometryError::DegenerateVector`] when it
/// has (near) zero length.
pub fn normalize(v: &Vec3, context: &'static str) -> GeometryResult<Dir3> {
    Dir3::try_new(*v, NORMALIZE_EPSILON).ok_or(GeometryError::DegenerateVector { context })
}

/// True when `a` and `b` point into opposite half-spaces (`a · b < 0`).
pub fn opposing(a: &Vec3, b: &Vec3) -> bool {
    a.dot(b) < 0.0
}

/// True when `a` and `b` do not oppose each other (`a · b >= 0`).
pub fn aligned(a: &Vec3, b: &Vec3) -> bool {
    !opposing(a, b)
}

/// Distance between two points.
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    (b - a).norm()
}

/// Translate `p` by `distance` along `dir` (normalized first).
pub fn move_point(p: &Point3, dir: &Vec3, distance: f64) -> GeometryResult<Point3> {
    Ok(p + normalize(dir, "move direction")?.as_ref() * distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let d = normalize(&Vec3::new(3.0, 4.0, 0.0), "test").unwrap();
        assert!((d.norm() - 1.0).abs() < 1e-12);
        assert!((d.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_zero_fails() {
        let err = normalize(&Vec3::zeros(), "zero").unwrap_err();
        assert_eq!(err, GeometryError::DegenerateVector { context: "zero" });
    }

    #[test]
    fn test_opposing() {
        assert!(opposing(&Vec3::z(), &Vec3::new(0.1, 0.0, -1.0)));
        assert!(aligned(&Vec3::z(), &Vec3::x()));
    }

    #[test]
    fn test_move_point() {
        let p = move_point(&Point3::origin(), &Vec3::new(0.0, 2.0, 0.0), 3.0).unwrap();
        assert!((p - Point3::new(0.0, 3.0, 0.0)).norm() < 1e-12);
        assert!((distance(&p, &Point3::origin()) - 3.0).abs() < 1e-12);
    }
}
