//! Line queries: line-pair classification, intersection, gap advance and
//! normal interpolation.

use nalgebra::Matrix3x2;

use kerf_kernel_math::{normalize, GeometryError, GeometryResult, Point3, Tolerance, Vec3};

use crate::curve::Line3;

/// How two infinite lines (or segments) relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePairKind {
    /// Parallel and overlapping.
    Collinear,
    /// Non-parallel and non-intersecting.
    Skew,
    /// Parallel and separated.
    Parallel,
    /// The lines cross at exactly one point.
    SinglePointIntersection,
    /// The lines cross, but outside one or both segments.
    SegmentsNotIntersectingWithinLimits,
}

/// Result of [`intersecting_point_between_lines`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineIntersection {
    /// Classification of the pair.
    pub kind: LinePairKind,
    /// Crossing point, present when the infinite lines meet.
    pub point: Option<Point3>,
}

/// Least-squares solve of `p1 + s·u = p2 + t·v` for `(s, t)`.
///
/// Solves the 3-equation / 2-unknown system `[u, -v]·[s, t]ᵀ = p2 - p1` via
/// the normal equations. Returns `None` when `u` and `v` are parallel.
pub(crate) fn solve_line_parameters(p1: &Point3, u: &Vec3, p2: &Point3, v: &Vec3) -> Option<(f64, f64)> {
    let a = Matrix3x2::from_columns(&[*u, -v]);
    let b = p2 - p1;
    let at = a.transpose();
    let x = (at * a).try_inverse()? * at * b;
    Some((x[0], x[1]))
}

/// Shortest distance between the infinite lines through `(p11, p12)` and
/// `(p21, p22)`, with the pair classification.
pub fn shortest_dist_between_lines(
    p11: &Point3,
    p12: &Point3,
    p21: &Point3,
    p22: &Point3,
    tol: &Tolerance,
) -> GeometryResult<(f64, LinePairKind)> {
    let d1 = p12 - p11;
    let d2 = p22 - p21;
    let u1 = normalize(&d1, "first line direction")?.into_inner();
    let u2 = normalize(&d2, "second line direction")?.into_inner();
    let r = p21 - p11;

    let cross = u1.cross(&u2);
    if cross.norm() < tol.linear {
        let dist = (r - u1 * r.dot(&u1)).norm();
        let kind = if tol.is_zero(dist) {
            LinePairKind::Collinear
        } else {
            LinePairKind::Parallel
        };
        return Ok((dist, kind));
    }

    let dist = (-r).dot(&cross).abs() / cross.norm();
    let kind = if tol.is_zero(dist) {
        LinePairKind::SinglePointIntersection
    } else {
        LinePairKind::Skew
    };
    Ok((dist, kind))
}

/// Crossing point of two lines.
///
/// Only a [`LinePairKind::SinglePointIntersection`] pair yields a point. With
/// `constrained`, the crossing must also lie within both segments, otherwise
/// the kind becomes [`LinePairKind::SegmentsNotIntersectingWithinLimits`]
/// (the point is still reported).
pub fn intersecting_point_between_lines(
    p11: &Point3,
    p12: &Point3,
    p21: &Point3,
    p22: &Point3,
    constrained: bool,
    tol: &Tolerance,
) -> GeometryResult<LineIntersection> {
    let (_, kind) = shortest_dist_between_lines(p11, p12, p21, p22, tol)?;
    if kind != LinePairKind::SinglePointIntersection {
        return Ok(LineIntersection { kind, point: None });
    }

    let u = p12 - p11;
    let v = p22 - p21;
    let Some((s, t)) = solve_line_parameters(p11, &u, p21, &v) else {
        return Ok(LineIntersection {
            kind: LinePairKind::Parallel,
            point: None,
        });
    };
    let point = p11 + u * s;

    let kind = if constrained && !(tol.lie_within(s, 0.0, 1.0) && tol.lie_within(t, 0.0, 1.0)) {
        LinePairKind::SegmentsNotIntersectingWithinLimits
    } else {
        LinePairKind::SinglePointIntersection
    };
    Ok(LineIntersection {
        kind,
        point: Some(point),
    })
}

/// Point `increment` past the end of `line`, along its direction.
pub fn new_end_point_on_line_at_increment(line: &Line3, increment: f64) -> GeometryResult<Point3> {
    Ok(line.end + line.direction()?.as_ref() * increment)
}

/// Unclamped projection parameter of `p` on `line`: `AP·AB / AB·AB`.
pub fn line_param_at_point(line: &Line3, p: &Point3) -> GeometryResult<f64> {
    let ab = line.vector();
    let len2 = ab.norm_squared();
    if len2 < Tolerance::DEFAULT.linear * Tolerance::DEFAULT.linear {
        return Err(GeometryError::InvalidCurve("degenerate line".into()));
    }
    Ok((p - line.start).dot(&ab) / len2)
}

/// Surface normal at `p`, linearly interpolated between the normals at the
/// ends of `line` and re-normalized.
pub fn interpolated_normal_at_point(
    line: &Line3,
    start_normal: &Vec3,
    end_normal: &Vec3,
    p: &Point3,
) -> GeometryResult<Vec3> {
    let t = line_param_at_point(line, p)?;
    let n = start_normal.lerp(end_normal, t);
    Ok(normalize(&n, "interpolated normal")?.into_inner())
}

/// Normals at the ends of `child`, a sub-segment of `parent`, interpolated
/// from the parent's end normals.
pub fn interpolated_normals_for_line(
    parent: &Line3,
    start_normal: &Vec3,
    end_normal: &Vec3,
    child: &Line3,
) -> GeometryResult<(Vec3, Vec3)> {
    Ok((
        interpolated_normal_at_point(parent, start_normal, end_normal, &child.start)?,
        interpolated_normal_at_point(parent, start_normal, end_normal, &child.end)?,
    ))
}
