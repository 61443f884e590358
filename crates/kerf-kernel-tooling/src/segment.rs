//! A single tooling segment: a curve plus the surface normals at its ends.

use kerf_kernel_geom::{
    interpolated_normals_for_line, interpolated_normal_at_point, reversed_curve, split_curve, Curve3,
};
use kerf_kernel_math::{GeometryResult, Point3, Tolerance, Vec3};

/// A curve the tool follows, with the part surface normal at each end.
///
/// For arcs the start normal doubles as the arc plane normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolingSegment {
    /// The path curve.
    pub curve: Curve3,
    /// Surface normal at the curve start.
    pub normal_at_start: Vec3,
    /// Surface normal at the curve end.
    pub normal_at_end: Vec3,
}

impl ToolingSegment {
    /// Create a segment.
    pub fn new(curve: Curve3, normal_at_start: Vec3, normal_at_end: Vec3) -> Self {
        Self {
            curve,
            normal_at_start,
            normal_at_end,
        }
    }

    /// Plane normal used for arc queries.
    pub fn plane_normal(&self) -> &Vec3 {
        &self.normal_at_start
    }

    /// Curve start.
    pub fn start(&self) -> Point3 {
        self.curve.start()
    }

    /// Curve end.
    pub fn end(&self) -> Point3 {
        self.curve.end()
    }

    /// Curve length.
    pub fn length(&self) -> f64 {
        self.curve.length()
    }

    /// The same segment traversed end to start, with the end normals swapped.
    pub fn reversed(&self) -> GeometryResult<Self> {
        Ok(Self {
            curve: reversed_curve(&self.curve, Some(self.plane_normal()))?,
            normal_at_start: self.normal_at_end,
            normal_at_end: self.normal_at_start,
        })
    }

    /// Surface normal at `p`: the end normals at the ends, the plane normal
    /// along arcs, and a linear blend along lines.
    pub fn interpolated_normal_at(&self, p: &Point3) -> GeometryResult<Vec3> {
        let tol = Tolerance::DEFAULT;
        if tol.points_equal(p, &self.start()) {
            return Ok(self.normal_at_start);
        }
        if tol.points_equal(p, &self.end()) {
            return Ok(self.normal_at_end);
        }
        match &self.curve {
            Curve3::Arc(_) => Ok(self.normal_at_start),
            Curve3::Line(line) => interpolated_normal_at_point(line, &self.normal_at_start, &self.normal_at_end, p),
        }
    }

    /// A segment for `curve`, a piece of this segment's curve, carrying
    /// normals derived from this segment.
    pub fn with_curve(&self, curve: Curve3) -> GeometryResult<Self> {
        match (&self.curve, &curve) {
            (Curve3::Line(parent), Curve3::Line(child)) => {
                let (n0, n1) =
                    interpolated_normals_for_line(parent, &self.normal_at_start, &self.normal_at_end, child)?;
                Ok(Self::new(curve, n0, n1))
            }
            _ => Ok(Self::new(curve, self.normal_at_start, self.normal_at_end)),
        }
    }

    /// Split at `points` on the curve, leaving `gap` between the pieces.
    pub fn split(&self, points: &[Point3], gap: f64) -> GeometryResult<Vec<Self>> {
        segments_for_curves(self, split_curve(&self.curve, points, Some(self.plane_normal()), gap)?)
    }
}

/// Wrap each of `curves` (pieces of `parent`) into a segment with normals
/// derived from `parent`.
pub fn segments_for_curves<I>(parent: &ToolingSegment, curves: I) -> GeometryResult<Vec<ToolingSegment>>
where
    I: IntoIterator<Item = Curve3>,
{
    curves.into_iter().map(|c| parent.with_curve(c)).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kerf_kernel_geom::{create_arc, ArcSense, Line3};

    pub(crate) fn line_seg(a: Point3, b: Point3) -> ToolingSegment {
        ToolingSegment::new(Curve3::Line(Line3::new(a, b)), Vec3::z(), Vec3::z())
    }

    pub(crate) fn arc_seg(start: Point3, end: Point3, center: Point3, sense: ArcSense) -> ToolingSegment {
        let arc = create_arc(&start, &end, &center, &Vec3::z(), sense).unwrap();
        ToolingSegment::new(Curve3::Arc(arc), Vec3::z(), Vec3::z())
    }

    #[test]
    fn test_reversed_swaps_normals() {
        let seg = ToolingSegment::new(
            Curve3::Line(Line3::new(Point3::origin(), Point3::new(4.0, 0.0, 0.0))),
            Vec3::z(),
            Vec3::y(),
        );
        let rev = seg.reversed().unwrap();
        assert_eq!(rev.start(), seg.end());
        assert_eq!(rev.normal_at_start, Vec3::y());
        assert_eq!(rev.normal_at_end, Vec3::z());
    }

    #[test]
    fn test_reversed_arc() {
        let seg = arc_seg(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::origin(),
            ArcSense::Ccw,
        );
        let rev = seg.reversed().unwrap();
        assert_relative_eq!(rev.start(), seg.end(), epsilon = 1e-12);
        assert_relative_eq!(rev.length(), seg.length(), epsilon = 1e-9);
    }

    #[test]
    fn test_interpolated_normal() {
        let seg = ToolingSegment::new(
            Curve3::Line(Line3::new(Point3::origin(), Point3::new(2.0, 0.0, 0.0))),
            Vec3::z(),
            Vec3::y(),
        );
        assert_eq!(seg.interpolated_normal_at(&Point3::origin()).unwrap(), Vec3::z());
        let mid = seg.interpolated_normal_at(&Point3::new(1.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(mid, Vec3::new(0.0, 1.0, 1.0).normalize(), epsilon = 1e-12);
    }

    #[test]
    fn test_split_segment_carries_normals() {
        let seg = ToolingSegment::new(
            Curve3::Line(Line3::new(Point3::origin(), Point3::new(2.0, 0.0, 0.0))),
            Vec3::z(),
            Vec3::y(),
        );
        let parts = seg.split(&[Point3::new(1.0, 0.0, 0.0)], 0.0).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].normal_at_start, Vec3::z());
        assert_relative_eq!(parts[0].normal_at_end, parts[1].normal_at_start, epsilon = 1e-12);
        assert_relative_eq!(parts[1].normal_at_end, Vec3::y(), epsilon = 1e-12);
    }
}
