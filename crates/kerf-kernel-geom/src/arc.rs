//! Arc metrics: centre and radius recovery, local frames, interior samples,
//! projection onto the circle and gap advance past the end.

use std::f64::consts::TAU;

use kerf_kernel_math::{normalize, Dir3, GeometryError, GeometryResult, Point3, RigidTransform, Tolerance, Vec3};

use crate::curve::{Arc3, Curve3};
use crate::ops::is_point_on_curve;
use crate::sense::{arc_angle_and_sense, arc_angle_at_point, ArcSense};

/// Centre and radius of an arc's supporting circle.
///
/// Fails with [`GeometryError::InvalidCurve`] if `curve` is not an arc.
pub fn evaluate_center_and_radius(curve: &Curve3) -> GeometryResult<(Point3, f64)> {
    match curve {
        Curve3::Arc(arc) => Ok((arc.center(), arc.radius())),
        Curve3::Line(_) => Err(GeometryError::InvalidCurve(
            "centre and radius requested for a line".into(),
        )),
    }
}

/// Plane normal fitted from the first three arc points,
/// `normalize((p1 - start) × (p2 - p1))`.
pub fn arc_plane_normal(arc: &Arc3) -> Dir3 {
    arc.axis()
}

/// True when the arc is longer than half its circle.
pub fn is_major(arc: &Arc3) -> bool {
    arc.is_major()
}

/// Local frame of an arc: origin at the centre, X towards the start point,
/// Z along `normal`.
pub fn arc_frame(arc: &Arc3, normal: &Vec3) -> GeometryResult<RigidTransform> {
    RigidTransform::from_frame(&arc.center(), &(arc.start() - arc.center()), normal)
}

/// Point at signed `angle` from the arc start, measured counter-clockwise
/// about `normal`.
pub fn arc_point_at_angle(arc: &Arc3, angle: f64, normal: &Vec3) -> GeometryResult<Point3> {
    let frame = arc_frame(arc, normal)?;
    let r = arc.radius();
    Ok(frame.apply_point(&Point3::new(r * angle.cos(), r * angle.sin(), 0.0)))
}

/// Midpoint of the arc (half its signed angle).
pub fn arc_midpoint(arc: &Arc3, normal: &Vec3) -> GeometryResult<Point3> {
    let whole = arc_angle_and_sense(arc, normal)?;
    arc_point_at_angle(arc, whole.angle / 2.0, normal)
}

/// Project `p` onto the circle of given centre, radius and plane normal.
pub fn nudge_point_to_arc(center: &Point3, radius: f64, normal: &Vec3, p: &Point3) -> GeometryResult<Point3> {
    let n = normalize(normal, "arc plane normal")?;
    let v = p - center;
    let in_plane = v - n.as_ref() * v.dot(n.as_ref());
    let dir = normalize(&in_plane, "point projected onto arc axis")?;
    Ok(center + dir.as_ref() * radius)
}

/// Two points on `arc` at one quarter and three quarters of the way from
/// `from` to `to`.
///
/// On a full circle the span always runs counter-clockwise about `normal`
/// and wraps past the seam, so `from == to` yields the whole circle.
pub fn two_intermediate_points(arc: &Arc3, from: &Point3, to: &Point3, normal: &Vec3) -> GeometryResult<[Point3; 2]> {
    let curve = Curve3::Arc(*arc);
    let tol = Tolerance::DEFAULT;
    for p in [from, to] {
        if !is_point_on_curve(&curve, p, Some(normal), &tol, true)? {
            return Err(GeometryError::not_on_curve(p));
        }
    }

    let a_from = arc_angle_at_point(arc, from, normal)?.angle;
    let a_to = arc_angle_at_point(arc, to, normal)?.angle;
    let mut delta = a_to - a_from;
    if arc.is_circle() && tol.lteq(delta, 0.0) {
        delta += TAU;
    }

    Ok([
        arc_point_at_angle(arc, a_from + delta / 4.0, normal)?,
        arc_point_at_angle(arc, a_from + 3.0 * delta / 4.0, normal)?,
    ])
}

/// Point `increment` (arc length) beyond the end of `arc`, continuing in the
/// arc's own sense.
pub fn new_end_point_on_arc_at_increment(arc: &Arc3, increment: f64, normal: &Vec3) -> GeometryResult<Point3> {
    let whole = arc_angle_and_sense(arc, normal)?;
    let angle = whole.angle + whole.sense.signum() * increment / arc.radius();
    arc_point_at_angle(arc, angle, normal)
}

/// Build an arc from its end points, centre and sense about `normal`.
///
/// Interior samples are placed at 0.3 and 0.7 of the swept angle. Equal
/// start and end produce a full circle.
pub fn create_arc(start: &Point3, end: &Point3, center: &Point3, normal: &Vec3, sense: ArcSense) -> GeometryResult<Arc3> {
    let n = normalize(normal, "arc plane normal")?;
    let radius = (start - center).norm();
    let tol = Tolerance::DEFAULT.with_linear(Tolerance::DEFAULT.linear * radius.max(1.0));
    if tol.is_zero(radius) {
        return Err(GeometryError::InvalidCurve("arc radius is zero".into()));
    }
    if !tol.eq((end - center).norm(), radius) {
        return Err(GeometryError::InvalidCurve("arc end is not on the circle of its start".into()));
    }

    let frame = RigidTransform::from_frame(center, &(start - center), &n)?;
    let local_end = frame.inverse().apply_point(end);
    let mut ccw_angle = local_end.y.atan2(local_end.x);
    if ccw_angle <= tol.linear {
        ccw_angle += TAU;
    }
    let angle = match sense {
        ArcSense::Ccw => ccw_angle,
        ArcSense::Cw if tol.eq(ccw_angle, TAU) => -TAU,
        ArcSense::Cw => ccw_angle - TAU,
    };

    let at = |f: f64| {
        let a = angle * f;
        frame.apply_point(&Point3::new(radius * a.cos(), radius * a.sin(), 0.0))
    };
    Arc3::new(*start, at(0.3), at(0.7), *end)
}

/// Unit tangent at `p` in the direction of travel along `arc`.
pub fn arc_tangent_at_point(arc: &Arc3, p: &Point3) -> GeometryResult<Dir3> {
    normalize(&arc.axis().cross(&(p - arc.center())), "arc tangent")
}
