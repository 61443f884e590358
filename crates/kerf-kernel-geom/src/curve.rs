//! Curve primitives: straight lines and four-point circular arcs.

use std::f64::consts::{PI, TAU};

use kerf_kernel_math::{normalize, Dir3, GeometryError, GeometryResult, Point3, Tolerance, Vec3};

use crate::line::solve_line_parameters;

/// The kind of a curve (for match-free dispatch in callers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// Straight segment.
    Line,
    /// Circular arc (or full circle).
    Arc,
}

// =============================================================================
// Line
// =============================================================================

/// A straight segment between two points.
///
/// Parameterization: `P(t) = start + t * (end - start)`, `t ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3 {
    /// Start point.
    pub start: Point3,
    /// End point.
    pub end: Point3,
}

impl Line3 {
    /// Create a line from two points.
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Vector from start to end.
    pub fn vector(&self) -> Vec3 {
        self.end - self.start
    }

    /// Unit direction from start to end.
    pub fn direction(&self) -> GeometryResult<Dir3> {
        normalize(&self.vector(), "line direction")
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// Point at parameter `t` (not clamped).
    pub fn point_at(&self, t: f64) -> Point3 {
        self.start + self.vector() * t
    }
}

// =============================================================================
// Arc
// =============================================================================

/// A circular arc defined by four points: `start`, two interior samples `p1`
/// and `p2`, and `end`.
///
/// The traversal order start → p1 → p2 → end fixes the direction of the arc.
/// When `start` and `end` coincide the arc is a full circle. The centre,
/// radius, fitted axis and swept angle are recovered once at construction;
/// arcs are immutable so they never go stale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc3 {
    start: Point3,
    p1: Point3,
    p2: Point3,
    end: Point3,
    center: Point3,
    radius: f64,
    axis: Dir3,
    sweep: f64,
}

impl Arc3 {
    /// Build an arc from its four defining points.
    ///
    /// `end` is accepted within a radius-scaled tolerance of the circle and
    /// stored projected onto it; an end that lands on `start` closes a circle.
    /// Fails with [`GeometryError::InvalidCurve`] when the first three points
    /// are coincident or collinear, when `end` is off the circle they define,
    /// or when `p2` lies beyond `end` along the traversal.
    pub fn new(start: Point3, p1: Point3, p2: Point3, end: Point3) -> GeometryResult<Self> {
        let (center, radius, axis) = fit_circle(&start, &p1, &p2)?;
        let tol = Tolerance::DEFAULT.with_linear(Tolerance::DEFAULT.linear * radius.max(1.0));

        let off_circle = ((end - center).norm() - radius).abs();
        let off_plane = axis.dot(&(end - center)).abs();
        if off_circle > tol.linear || off_plane > tol.linear {
            return Err(GeometryError::InvalidCurve(format!(
                "arc end point is {:.3e} off the circle through the first three points",
                off_circle.max(off_plane)
            )));
        }

        // Store the end exactly on the fitted circle so on-curve queries at
        // the default tolerance accept it whatever the radius.
        let radial = (end - center) - axis.as_ref() * axis.dot(&(end - center));
        let mut end = center + normalize(&radial, "arc end radial")?.as_ref() * radius;
        if tol.points_equal(&start, &end) {
            end = start;
        }

        let mut arc = Self {
            start,
            p1,
            p2,
            end,
            center,
            radius,
            axis,
            sweep: TAU,
        };
        if start != end {
            arc.sweep = arc.angle_from_start(&end);
            if arc.angle_from_start(&p2) > arc.sweep {
                return Err(GeometryError::InvalidCurve(
                    "arc interior points do not lie between start and end".into(),
                ));
            }
        }
        Ok(arc)
    }

    /// Start point.
    pub fn start(&self) -> Point3 {
        self.start
    }

    /// First interior sample.
    pub fn p1(&self) -> Point3 {
        self.p1
    }

    /// Second interior sample.
    pub fn p2(&self) -> Point3 {
        self.p2
    }

    /// End point.
    pub fn end(&self) -> Point3 {
        self.end
    }

    /// Centre of the supporting circle.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Radius of the supporting circle.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Unit normal about which the traversal runs counter-clockwise.
    pub fn axis(&self) -> Dir3 {
        self.axis
    }

    /// Positive angle swept from start to end, in `(0, 2π]`.
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Arc length.
    pub fn length(&self) -> f64 {
        self.radius * self.sweep
    }

    /// True when start and end coincide.
    pub fn is_circle(&self) -> bool {
        Tolerance::DEFAULT.points_equal(&self.start, &self.end)
    }

    /// True when the arc covers more than half of its circle.
    pub fn is_major(&self) -> bool {
        Tolerance::DEFAULT.sgt(self.length(), PI * self.radius)
    }

    /// Angle from `start` to the radial direction of `p`, measured about
    /// [`axis`](Self::axis), in `[0, 2π)`.
    pub fn angle_from_start(&self, p: &Point3) -> f64 {
        let us = self.start - self.center;
        let up = p - self.center;
        let a = self.axis.dot(&us.cross(&up)).atan2(us.dot(&up));
        if a < 0.0 {
            a + TAU
        } else {
            a
        }
    }

    /// Rotate `p` about the arc axis through the centre by `angle` radians.
    pub fn rotate_point(&self, p: &Point3, angle: f64) -> Point3 {
        let v = p - self.center;
        let (s, c) = angle.sin_cos();
        let k = self.axis.as_ref();
        // Rodrigues
        self.center + v * c + k.cross(&v) * s + k * (k.dot(&v) * (1.0 - c))
    }

    /// Point at intrinsic parameter `t ∈ [0, 1]` along the traversal.
    pub fn point_at(&self, t: f64) -> Point3 {
        self.rotate_point(&self.start, t * self.sweep)
    }
}

/// Recover centre, radius and plane normal from three points on a circle.
///
/// The centre is the intersection of the perpendicular bisectors of the two
/// chords, solved in the least-squares sense.
fn fit_circle(a: &Point3, b: &Point3, c: &Point3) -> GeometryResult<(Point3, f64, Dir3)> {
    let ab = b - a;
    let bc = c - b;
    let axis = normalize(&ab.cross(&bc), "arc plane normal")
        .map_err(|_| GeometryError::InvalidCurve("arc points are coincident or collinear".into()))?;

    let m_ab = nalgebra::center(a, b);
    let m_bc = nalgebra::center(b, c);
    let r_ab = ab.cross(axis.as_ref());
    let r_bc = bc.cross(axis.as_ref());
    let (s, _) = solve_line_parameters(&m_ab, &r_ab, &m_bc, &r_bc)
        .ok_or_else(|| GeometryError::InvalidCurve("arc chord bisectors do not meet".into()))?;

    let center = m_ab + r_ab * s;
    let radius = (a - center).norm();
    Ok((center, radius, axis))
}

// =============================================================================
// Curve
// =============================================================================

/// A tooling curve: either a line or an arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve3 {
    /// Straight segment.
    Line(Line3),
    /// Circular arc.
    Arc(Arc3),
}

impl Curve3 {
    /// The kind of this curve.
    pub fn kind(&self) -> CurveKind {
        match self {
            Curve3::Line(_) => CurveKind::Line,
            Curve3::Arc(_) => CurveKind::Arc,
        }
    }

    /// Start point.
    pub fn start(&self) -> Point3 {
        match self {
            Curve3::Line(l) => l.start,
            Curve3::Arc(a) => a.start(),
        }
    }

    /// End point.
    pub fn end(&self) -> Point3 {
        match self {
            Curve3::Line(l) => l.end,
            Curve3::Arc(a) => a.end(),
        }
    }

    /// Curve length.
    pub fn length(&self) -> f64 {
        match self {
            Curve3::Line(l) => l.length(),
            Curve3::Arc(a) => a.length(),
        }
    }

    /// The arc, if this is one.
    pub fn as_arc(&self) -> Option<&Arc3> {
        match self {
            Curve3::Arc(a) => Some(a),
            Curve3::Line(_) => None,
        }
    }

    /// The line, if this is one.
    pub fn as_line(&self) -> Option<&Line3> {
        match self {
            Curve3::Line(l) => Some(l),
            Curve3::Arc(_) => None,
        }
    }

    /// True for an arc whose start and end coincide.
    pub fn is_circle(&self) -> bool {
        self.as_arc().is_some_and(Arc3::is_circle)
    }
}

impl From<Line3> for Curve3 {
    fn from(l: Line3) -> Self {
        Curve3::Line(l)
    }
}

impl From<Arc3> for Curve3 {
    fn from(a: Arc3) -> Self {
        Curve3::Arc(a)
    }
}
