//! Axis-aligned bounding boxes.

use crate::{Point3, Vec3};

/// An axis-aligned bounding box that accumulates points.
///
/// A freshly created box is empty (min > max) and swallows the first point
/// added to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Bound3 {
    /// An empty box.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Box spanning two corners (in any order).
    pub fn new(a: Point3, b: Point3) -> Self {
        Self::from_points([a, b])
    }

    /// Tightest box around `points`.
    pub fn from_points<I: IntoIterator<Item = Point3>>(points: I) -> Self {
        let mut b = Self::empty();
        for p in points {
            b.include_point(&p);
        }
        b
    }

    /// True if no point has been added.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow to contain `p`.
    pub fn include_point(&mut self, p: &Point3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Bound3) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Clamp both corners into `limits`.
    pub fn clamped_to(&self, limits: &Bound3) -> Self {
        let clamp = |p: &Point3| p.sup(&limits.min).inf(&limits.max);
        Self {
            min: clamp(&self.min),
            max: clamp(&self.max),
        }
    }

    /// Whether `p` lies inside (boundary included, with `eps` slack).
    pub fn contains(&self, p: &Point3, eps: f64) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] - eps && p[i] <= self.max[i] + eps)
    }

    /// Centre point.
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

impl Default for Bound3 {
    fn default() -> Self {
        Self::empty()
    }
}
