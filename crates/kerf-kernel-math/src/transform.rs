//! Rigid transforms (rotation + translation) in homogeneous form.

use std::ops::Mul;

use nalgebra::{Matrix3, Matrix4, Rotation3, Vector4};

use crate::error::GeometryResult;
use crate::{normalize, Dir3, Point3, Tolerance, Vec3};

/// One of the six signed coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// +X
    X,
    /// +Y
    Y,
    /// +Z
    Z,
    /// -X
    NegX,
    /// -Y
    NegY,
    /// -Z
    NegZ,
}

impl Axis {
    /// Unit vector along this axis.
    pub fn unit_vector(self) -> Vec3 {
        match self {
            Axis::X => Vec3::x(),
            Axis::Y => Vec3::y(),
            Axis::Z => Vec3::z(),
            Axis::NegX => -Vec3::x(),
            Axis::NegY => -Vec3::y(),
            Axis::NegZ => -Vec3::z(),
        }
    }

    /// Whether `v` points along this axis (after normalization).
    pub fn matches(self, v: &Vec3, tol: &Tolerance) -> bool {
        tol.dirs_equal(v, &self.unit_vector())
    }
}

/// A rigid 4x4 transform: orthonormal rotation plus translation.
///
/// The upper-left 3x3 block is kept orthonormal with determinant +1, so the
/// inverse is a transpose and never fails. Columns 0..3 are the local X, Y
/// and Z axes expressed in the parent frame; column 3 is the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    matrix: Matrix4<f64>,
}

impl RigidTransform {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Pure translation.
    pub fn translation(t: &Vec3) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = t.x;
        m[(1, 3)] = t.y;
        m[(2, 3)] = t.z;
        Self { matrix: m }
    }

    /// Build from three axis columns and a translation.
    ///
    /// Columns are normalized; they must already be mutually orthogonal and
    /// right-handed.
    pub fn from_columns(x: &Vec3, y: &Vec3, z: &Vec3, origin: &Vec3) -> GeometryResult<Self> {
        let x = normalize(x, "transform x column")?;
        let y = normalize(y, "transform y column")?;
        let z = normalize(z, "transform z column")?;
        Ok(Self::from_unit_columns(&x, &y, &z, origin))
    }

    /// Build a frame at `origin` with Z along `z` and X as close to `x_hint`
    /// as orthogonality allows.
    pub fn from_frame(origin: &Point3, x_hint: &Vec3, z: &Vec3) -> GeometryResult<Self> {
        let z = normalize(z, "frame z axis")?;
        let x = normalize(&(x_hint - z.as_ref() * x_hint.dot(z.as_ref())), "frame x axis")?;
        let y = Dir3::new_unchecked(z.cross(x.as_ref()));
        Ok(Self::from_unit_columns(&x, &y, &z, &origin.coords))
    }

    fn from_unit_columns(x: &Dir3, y: &Dir3, z: &Dir3, origin: &Vec3) -> Self {
        let mut m = Matrix4::identity();
        for (col, axis) in [x, y, z].into_iter().enumerate() {
            m[(0, col)] = axis.x;
            m[(1, col)] = axis.y;
            m[(2, col)] = axis.z;
        }
        m[(0, 3)] = origin.x;
        m[(1, 3)] = origin.y;
        m[(2, 3)] = origin.z;
        let xf = Self { matrix: m };
        debug_assert!(
            xf.is_orthonormal(&Tolerance::DEFAULT.with_linear(1e-6)),
            "rigid transform columns must be orthonormal and right-handed"
        );
        xf
    }

    /// Rotation about a coordinate axis by `angle` radians.
    ///
    /// Negative axes rotate the opposite way.
    pub fn rotation(axis: Axis, angle: f64) -> Self {
        Self::rotation_about_axis(&Dir3::new_unchecked(axis.unit_vector()), angle)
    }

    /// Rotation about an arbitrary axis through the origin by `angle` radians.
    pub fn rotation_about_axis(axis: &Dir3, angle: f64) -> Self {
        Self {
            matrix: Rotation3::from_axis_angle(axis, angle).to_homogeneous(),
        }
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Compose: `self` then `other` (self * other).
    pub fn then(&self, other: &RigidTransform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Post-multiply by a rotation about `axis`, i.e. rotate in the local frame.
    pub fn rotate(&self, axis: Axis, angle: f64) -> Self {
        self.then(&Self::rotation(axis, angle))
    }

    /// Inverse: transposed rotation and `-R^T t` translation.
    pub fn inverse(&self) -> Self {
        let r_t: Matrix3<f64> = self.rotation_part().transpose();
        let t = -(r_t * self.translation_part());
        let mut m = Matrix4::identity();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(&r_t);
        m[(0, 3)] = t.x;
        m[(1, 3)] = t.y;
        m[(2, 3)] = t.z;
        Self { matrix: m }
    }

    // =========================================================================
    // Application
    // =========================================================================

    /// Transform a point (w = 1).
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (w = 0, translation ignored).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The underlying homogeneous matrix.
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Local X axis (column 0).
    pub fn x_axis(&self) -> Vec3 {
        self.matrix.fixed_view::<3, 1>(0, 0).into_owned()
    }

    /// Local Y axis (column 1).
    pub fn y_axis(&self) -> Vec3 {
        self.matrix.fixed_view::<3, 1>(0, 1).into_owned()
    }

    /// Local Z axis (column 2).
    pub fn z_axis(&self) -> Vec3 {
        self.matrix.fixed_view::<3, 1>(0, 2).into_owned()
    }

    /// Translation (column 3).
    pub fn translation_part(&self) -> Vec3 {
        self.matrix.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// Frame origin as a point.
    pub fn origin(&self) -> Point3 {
        Point3::from(self.translation_part())
    }

    /// The 3x3 rotation block.
    pub fn rotation_part(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// Whether the rotation block is orthonormal with determinant +1.
    pub fn is_orthonormal(&self, tol: &Tolerance) -> bool {
        let r = self.rotation_part();
        let err = (r.transpose() * r - Matrix3::identity()).abs().max();
        err < tol.linear && tol.eq(r.determinant(), 1.0)
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for RigidTransform {
    type Output = RigidTransform;

    fn mul(self, rhs: RigidTransform) -> RigidTransform {
        self.then(&rhs)
    }
}
