//! Tolerance-aware scalar and point comparisons.

use serde::{Deserialize, Serialize};

use crate::{Point3, Vec3};

/// Tolerances for geometric comparisons.
///
/// The comparison helpers mirror the fuzzy relations used throughout the
/// kernel: `eq` is `|a - b| < linear`, the strict relations exclude the
/// equality band, and the non-strict ones include it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Linear distance tolerance in mm.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default kernel tolerances (1e-6 mm linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Tolerance used when matching endpoints of adjacent tooling segments.
    pub const CHAIN: Self = Self {
        linear: 1e-3,
        angular: 1e-6,
    };

    /// Same angular tolerance, different linear tolerance.
    pub fn with_linear(self, linear: f64) -> Self {
        Self { linear, ..self }
    }

    /// `|a - b| < linear`.
    pub fn eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.linear
    }

    /// Strictly greater: not equal within tolerance and `a > b`.
    pub fn sgt(&self, a: f64, b: f64) -> bool {
        !self.eq(a, b) && a > b
    }

    /// Strictly less: not equal within tolerance and `a < b`.
    pub fn slt(&self, a: f64, b: f64) -> bool {
        !self.eq(a, b) && a < b
    }

    /// Greater than or equal within tolerance.
    pub fn gteq(&self, a: f64, b: f64) -> bool {
        self.eq(a, b) || a > b
    }

    /// Less than or equal within tolerance.
    pub fn lteq(&self, a: f64, b: f64) -> bool {
        self.eq(a, b) || a < b
    }

    /// `lo - linear <= v <= hi + linear`.
    pub fn lie_within(&self, v: f64, lo: f64, hi: f64) -> bool {
        lo - self.linear <= v && v <= hi + self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if two vectors point the same way (compared after normalization).
    ///
    /// Zero vectors are never equal to anything.
    pub fn dirs_equal(&self, a: &Vec3, b: &Vec3) -> bool {
        match (a.try_normalize(f64::EPSILON), b.try_normalize(f64::EPSILON)) {
            (Some(a), Some(b)) => (a - b).norm() < self.linear,
            _ => false,
        }
    }

    /// Check if two angles are effectively equal (in radians).
    pub fn angles_equal(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.angular
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
