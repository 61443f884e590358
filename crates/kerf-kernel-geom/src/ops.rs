//! Generic curve queries that dispatch on line vs arc.
//!
//! Arc queries need the plane normal the caller views the arc along; passing
//! `None` for an arc fails with [`GeometryError::MissingPlaneNormal`]. Lines
//! ignore the normal.

use kerf_kernel_math::{normalize, Dir3, GeometryError, GeometryResult, Point3, Tolerance, Vec3};

use crate::arc::{arc_midpoint, arc_point_at_angle, arc_tangent_at_point, nudge_point_to_arc, two_intermediate_points};
use crate::curve::{Arc3, Curve3, Line3};
use crate::line::line_param_at_point;
use crate::sense::{arc_angle_and_sense, arc_angle_at_point, lies_on_circle};

/// Slack on the normalized parameter when testing if a point lies within an arc.
const ARC_PARAM_TOLERANCE: f64 = 1e-5;

fn require_normal(normal: Option<&Vec3>) -> GeometryResult<&Vec3> {
    normal.ok_or(GeometryError::MissingPlaneNormal)
}

/// Point at normalized parameter `t ∈ [0, 1]`.
///
/// For arcs `t` is a fraction of the signed angle seen along `normal`.
pub fn evaluate(curve: &Curve3, t: f64, normal: Option<&Vec3>) -> GeometryResult<Point3> {
    match curve {
        Curve3::Line(line) => Ok(line.point_at(t)),
        Curve3::Arc(arc) => {
            let normal = require_normal(normal)?;
            let whole = arc_angle_and_sense(arc, normal)?;
            arc_point_at_angle(arc, whole.angle * t, normal)
        }
    }
}

/// Whether `p` lies on `curve` within `tol`.
///
/// With `constrained`, `p` must also fall within the curve's extent rather
/// than merely on its supporting line or circle. Full circles accept any
/// point on the circle. A zero-length line is an error.
pub fn is_point_on_curve(
    curve: &Curve3,
    p: &Point3,
    normal: Option<&Vec3>,
    tol: &Tolerance,
    constrained: bool,
) -> GeometryResult<bool> {
    match curve {
        Curve3::Arc(arc) => {
            let normal = require_normal(normal)?;
            let n = normalize(normal, "arc plane normal")?;
            if !lies_on_circle(arc, p, &n, tol) {
                return Ok(false);
            }
            if arc.is_circle() || !constrained {
                return Ok(true);
            }
            let whole = arc_angle_and_sense(arc, normal)?;
            let at = arc_angle_at_point(arc, p, normal)?;
            let t = at.angle / whole.angle;
            Ok(Tolerance::DEFAULT
                .with_linear(ARC_PARAM_TOLERANCE)
                .lie_within(t, 0.0, 1.0))
        }
        Curve3::Line(line) => {
            let ab = line.vector();
            let len = ab.norm();
            if len < tol.linear {
                return Err(GeometryError::InvalidCurve("degenerate line".into()));
            }
            let ap = p - line.start;
            if ab.cross(&ap).norm() / len > tol.linear {
                return Ok(false);
            }
            if !constrained {
                return Ok(true);
            }
            let t = ap.dot(&ab) / (len * len);
            Ok(tol.with_linear(tol.linear / len).lie_within(t, 0.0, 1.0))
        }
    }
}

/// Normalized parameter of `p` on `curve`; `p` must lie on the curve.
pub fn param_at_point(curve: &Curve3, p: &Point3, normal: Option<&Vec3>) -> GeometryResult<f64> {
    if !is_point_on_curve(curve, p, normal, &Tolerance::DEFAULT, true)? {
        return Err(GeometryError::not_on_curve(p));
    }
    match curve {
        Curve3::Line(line) => line_param_at_point(line, p),
        Curve3::Arc(arc) => {
            let normal = require_normal(normal)?;
            let whole = arc_angle_and_sense(arc, normal)?;
            let at = arc_angle_at_point(arc, p, normal)?;
            Ok(at.angle / whole.angle)
        }
    }
}

/// Point at arc length `length` from the start.
///
/// Fails with [`GeometryError::LengthOutOfRange`] outside `[0, curve.length()]`.
pub fn point_at_length_from_start(curve: &Curve3, length: f64, normal: Option<&Vec3>) -> GeometryResult<Point3> {
    let tol = Tolerance::DEFAULT;
    let total = curve.length();
    if !tol.lie_within(length, 0.0, total) {
        return Err(GeometryError::LengthOutOfRange {
            length,
            curve_length: total,
        });
    }
    if tol.is_zero(length) {
        return Ok(curve.start());
    }
    if tol.eq(length, total) {
        return Ok(curve.end());
    }

    match curve {
        Curve3::Line(line) => Ok(line.point_at(length / total)),
        Curve3::Arc(arc) => {
            let normal = require_normal(normal)?;
            let whole = arc_angle_and_sense(arc, normal)?;
            let p = arc_point_at_angle(arc, whole.angle * length / total, normal)?;
            if is_point_on_curve(curve, &p, Some(normal), &tol, true)? {
                Ok(p)
            } else {
                nudge_point_to_arc(&arc.center(), arc.radius(), normal, &p)
            }
        }
    }
}

/// Arc length from the start of `curve` to `p`.
pub fn length_at_point(curve: &Curve3, p: &Point3, normal: Option<&Vec3>) -> GeometryResult<f64> {
    Ok(param_at_point(curve, p, normal)? * curve.length())
}

/// Arc length between two points on `curve`, in either order.
pub fn length_between_points(curve: &Curve3, a: &Point3, b: &Point3, normal: Option<&Vec3>) -> GeometryResult<f64> {
    let tol = Tolerance::DEFAULT;
    let (s, e) = (curve.start(), curve.end());
    let spans_curve = (tol.points_equal(a, &s) && tol.points_equal(b, &e))
        || (tol.points_equal(a, &e) && tol.points_equal(b, &s));
    if spans_curve {
        return Ok(curve.length());
    }
    let la = length_at_point(curve, a, normal)?;
    let lb = length_at_point(curve, b, normal)?;
    Ok((la - lb).abs())
}

/// Arc length between two normalized parameters.
pub fn length_between_params(curve: &Curve3, t0: f64, t1: f64) -> f64 {
    (t1 - t0).abs() * curve.length()
}

/// The same curve traversed end to start.
///
/// Arcs are rebuilt through the two intermediate points of the original
/// span, in reverse order.
pub fn reversed_curve(curve: &Curve3, normal: Option<&Vec3>) -> GeometryResult<Curve3> {
    match curve {
        Curve3::Line(line) => Ok(Curve3::Line(Line3::new(line.end, line.start))),
        Curve3::Arc(arc) => {
            let normal = require_normal(normal)?;
            let [a, b] = two_intermediate_points(arc, &arc.start(), &arc.end(), normal)?;
            Ok(Curve3::Arc(Arc3::new(arc.end(), b, a, arc.start())?))
        }
    }
}

/// Midpoint of the curve.
pub fn midpoint(curve: &Curve3, normal: Option<&Vec3>) -> GeometryResult<Point3> {
    match curve {
        Curve3::Line(line) => Ok(nalgebra::center(&line.start, &line.end)),
        Curve3::Arc(arc) => arc_midpoint(arc, require_normal(normal)?),
    }
}

/// Unit tangent at `p` in the direction of travel.
pub fn tangent_at_point(curve: &Curve3, p: &Point3) -> GeometryResult<Dir3> {
    match curve {
        Curve3::Line(line) => line.direction(),
        Curve3::Arc(arc) => arc_tangent_at_point(arc, p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::tests::{unit, xy_arc};
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn line(a: (f64, f64), b: (f64, f64)) -> Curve3 {
        Curve3::Line(Line3::new(Point3::new(a.0, a.1, 0.0), Point3::new(b.0, b.1, 0.0)))
    }

    #[test]
    fn test_arc_needs_normal() {
        let arc = Curve3::Arc(xy_arc(0.0, FRAC_PI_2));
        assert_eq!(evaluate(&arc, 0.5, None), Err(GeometryError::MissingPlaneNormal));
        assert!(evaluate(&line((0.0, 0.0), (1.0, 0.0)), 0.5, None).is_ok());
    }

    #[test]
    fn test_param_round_trip_arc() {
        let z = Vec3::z();
        for arc in [xy_arc(0.0, FRAC_PI_2), xy_arc(0.0, -1.5 * PI), xy_arc(1.0, 4.0)] {
            let curve = Curve3::Arc(arc);
            for normal in [z, -z] {
                for &t in &[0.0, 0.2, 0.5, 0.9, 1.0] {
                    let p = evaluate(&curve, t, Some(&normal)).unwrap();
                    let back = param_at_point(&curve, &p, Some(&normal)).unwrap();
                    assert!((back - t).abs() < 1e-6, "t={t} back={back}");
                }
            }
        }
    }

    #[test]
    fn test_param_round_trip_line() {
        let curve = line((1.0, 1.0), (4.0, 5.0));
        let p = evaluate(&curve, 0.3, None).unwrap();
        assert_relative_eq!(param_at_point(&curve, &p, None).unwrap(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_point_on_curve_constrained() {
        let tol = Tolerance::DEFAULT;
        let arc = Curve3::Arc(xy_arc(0.0, FRAC_PI_2));
        let z = Vec3::z();
        assert!(is_point_on_curve(&arc, &unit(0.5), Some(&z), &tol, true).unwrap());
        assert!(!is_point_on_curve(&arc, &unit(2.0), Some(&z), &tol, true).unwrap());
        assert!(is_point_on_curve(&arc, &unit(2.0), Some(&z), &tol, false).unwrap());
        assert!(!is_point_on_curve(&arc, &Point3::new(0.5, 0.5, 0.0), Some(&z), &tol, false).unwrap());

        let l = line((0.0, 0.0), (2.0, 0.0));
        assert!(is_point_on_curve(&l, &Point3::new(1.0, 0.0, 0.0), None, &tol, true).unwrap());
        assert!(!is_point_on_curve(&l, &Point3::new(3.0, 0.0, 0.0), None, &tol, true).unwrap());
        assert!(is_point_on_curve(&l, &Point3::new(3.0, 0.0, 0.0), None, &tol, false).unwrap());
        assert!(!is_point_on_curve(&l, &Point3::new(1.0, 0.1, 0.0), None, &tol, false).unwrap());
    }

    #[test]
    fn test_degenerate_line_is_invalid() {
        let l = line((1.0, 1.0), (1.0, 1.0));
        let err = is_point_on_curve(&l, &Point3::new(1.0, 1.0, 0.0), None, &Tolerance::DEFAULT, true);
        assert!(matches!(err, Err(GeometryError::InvalidCurve(_))));
    }

    #[test]
    fn test_point_at_length() {
        let arc = Curve3::Arc(xy_arc(0.0, FRAC_PI_2));
        let z = Vec3::z();
        let p = point_at_length_from_start(&arc, FRAC_PI_2 / 3.0, Some(&z)).unwrap();
        assert_relative_eq!(p, unit(PI / 6.0), epsilon = 1e-9);
        assert_relative_eq!(
            point_at_length_from_start(&arc, 0.0, Some(&z)).unwrap(),
            arc.start()
        );
        assert!(matches!(
            point_at_length_from_start(&arc, 2.0, Some(&z)),
            Err(GeometryError::LengthOutOfRange { .. })
        ));
        assert!(point_at_length_from_start(&arc, -0.1, Some(&z)).is_err());
    }

    #[test]
    fn test_large_radius_arc_accepts_its_own_ends() {
        let r = 1000.0;
        let at = |a: f64, rr: f64| Point3::new(rr * a.cos(), rr * a.sin(), 0.0);
        let arc = Arc3::new(at(0.0, r), at(0.3, r), at(0.7, r), at(1.0, r + 5e-4)).unwrap();
        let curve = Curve3::Arc(arc);
        let z = Vec3::z();
        let tol = Tolerance::DEFAULT;

        assert!(is_point_on_curve(&curve, &arc.start(), Some(&z), &tol, true).unwrap());
        assert!(is_point_on_curve(&curve, &arc.end(), Some(&z), &tol, true).unwrap());
        assert_relative_eq!(param_at_point(&curve, &arc.end(), Some(&z)).unwrap(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(
            length_at_point(&curve, &arc.end(), Some(&z)).unwrap(),
            curve.length(),
            epsilon = 1e-6
        );
        let mid = evaluate(&curve, 0.5, Some(&z)).unwrap();
        assert_relative_eq!(length_at_point(&curve, &mid, Some(&z)).unwrap(), r * 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_lengths() {
        let z = Vec3::z();
        let arc = Curve3::Arc(xy_arc(0.0, PI));
        assert_relative_eq!(length_at_point(&arc, &unit(FRAC_PI_2), Some(&z)).unwrap(), FRAC_PI_2, epsilon = 1e-6);
        let between = length_between_points(&arc, &unit(2.0), &unit(0.5), Some(&z)).unwrap();
        assert_relative_eq!(between, 1.5, epsilon = 1e-6);
        let whole = length_between_points(&arc, &arc.end(), &arc.start(), Some(&z)).unwrap();
        assert_relative_eq!(whole, PI, epsilon = 1e-9);
        assert_relative_eq!(length_between_params(&arc, 0.25, 0.75), PI / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_reversed_arc() {
        let z = Vec3::z();
        let arc = Curve3::Arc(xy_arc(0.0, FRAC_PI_2));
        let rev = reversed_curve(&arc, Some(&z)).unwrap();
        assert_relative_eq!(rev.start(), arc.end());
        assert_relative_eq!(rev.end(), arc.start());
        assert_relative_eq!(rev.length(), arc.length(), epsilon = 1e-9);
        let sense = arc_angle_and_sense(rev.as_arc().unwrap(), &z).unwrap();
        assert_relative_eq!(sense.angle, -FRAC_PI_2, epsilon = 1e-9);
        assert_relative_eq!(midpoint(&rev, Some(&z)).unwrap(), midpoint(&arc, Some(&z)).unwrap(), epsilon = 1e-9);
    }

    #[test]
    fn test_reversed_line_and_tangent() {
        let l = line((0.0, 0.0), (0.0, 3.0));
        let rev = reversed_curve(&l, None).unwrap();
        assert_relative_eq!(tangent_at_point(&rev, &rev.start()).unwrap().into_inner(), -Vec3::y());
        assert_relative_eq!(midpoint(&l, None).unwrap(), Point3::new(0.0, 1.5, 0.0));
    }
}
