//! Splitting curves at interior points, with an optional gap between pieces.
//!
//! Each piece after the first starts `gap` further along the parent curve
//! than the split point, so that the pieces plus the gaps add up to the
//! parent's length.

use tracing::debug;

use kerf_kernel_math::{GeometryError, GeometryResult, Point3, Tolerance, Vec3};

use crate::arc::{new_end_point_on_arc_at_increment, nudge_point_to_arc, two_intermediate_points};
use crate::curve::{Arc3, Curve3, Line3};
use crate::line::new_end_point_on_line_at_increment;
use crate::ops::{is_point_on_curve, length_at_point, point_at_length_from_start};

/// Split `line` at already ordered and de-duplicated interior `points`.
pub fn split_line(line: &Line3, points: &[Point3], gap: f64) -> GeometryResult<Vec<Curve3>> {
    let tol = Tolerance::DEFAULT;
    let stops: Vec<Point3> = std::iter::once(line.start)
        .chain(points.iter().copied())
        .chain(std::iter::once(line.end))
        .collect();

    let mut pieces = Vec::with_capacity(stops.len() - 1);
    let mut start = line.start;
    for (i, next) in stops.iter().enumerate().skip(1) {
        if i > 1 && tol.gteq(gap, (next - stops[i - 1]).norm()) {
            return Err(GeometryError::InvalidCurve(format!(
                "gap {gap} consumes line piece {}",
                i - 1
            )));
        }
        let piece = Line3::new(start, *next);
        pieces.push(Curve3::Line(piece));
        if i + 1 < stops.len() {
            start = new_end_point_on_line_at_increment(&piece, gap)?;
        }
    }
    Ok(pieces)
}

/// Split `arc` at already ordered and de-duplicated interior `points`.
///
/// Interior samples of every piece are projected back onto the parent's
/// circle so the pieces share its centre and radius.
pub fn split_arc(arc: &Arc3, points: &[Point3], normal: &Vec3, gap: f64) -> GeometryResult<Vec<Curve3>> {
    let stops: Vec<Point3> = std::iter::once(arc.start())
        .chain(points.iter().copied())
        .chain(std::iter::once(arc.end()))
        .collect();
    let (center, radius) = (arc.center(), arc.radius());
    let tol = Tolerance::DEFAULT;
    // Distance along the parent's traversal; the last stop is the full sweep
    // so a circle's shared start/end does not read as zero.
    let along = |i: usize| -> f64 {
        if i + 1 == stops.len() {
            arc.length()
        } else {
            radius * arc.angle_from_start(&stops[i])
        }
    };

    let mut pieces = Vec::with_capacity(stops.len() - 1);
    let mut start = arc.start();
    for (i, next) in stops.iter().enumerate().skip(1) {
        if i > 1 && tol.gteq(gap, along(i) - along(i - 1)) {
            return Err(GeometryError::InvalidCurve(format!(
                "gap {gap} consumes arc piece {}",
                i - 1
            )));
        }
        let [a, b] = two_intermediate_points(arc, &start, next, normal)?;
        let a = nudge_point_to_arc(&center, radius, normal, &a)?;
        let b = nudge_point_to_arc(&center, radius, normal, &b)?;
        let piece = Arc3::new(start, a, b, *next)?;
        pieces.push(Curve3::Arc(piece));
        if i + 1 < stops.len() {
            start = new_end_point_on_arc_at_increment(&piece, gap, normal)?;
        }
    }
    Ok(pieces)
}

/// Split `curve` at `points`, leaving `gap` between consecutive pieces.
///
/// Points coincident with each other or with the curve ends are dropped and
/// the rest are ordered along the curve. Every point must lie on the curve.
pub fn split_curve(curve: &Curve3, points: &[Point3], normal: Option<&Vec3>, gap: f64) -> GeometryResult<Vec<Curve3>> {
    let tol = Tolerance::DEFAULT;
    let mut stops: Vec<(f64, Point3)> = Vec::with_capacity(points.len());
    for p in points {
        if tol.points_equal(p, &curve.start()) || tol.points_equal(p, &curve.end()) {
            continue;
        }
        if stops.iter().any(|(_, q)| tol.points_equal(p, q)) {
            continue;
        }
        if !is_point_on_curve(curve, p, normal, &tol, true)? {
            return Err(GeometryError::not_on_curve(p));
        }
        stops.push((length_at_point(curve, p, normal)?, *p));
    }
    stops.sort_by(|a, b| a.0.total_cmp(&b.0));
    let ordered: Vec<Point3> = stops.into_iter().map(|(_, p)| p).collect();

    debug!(pieces = ordered.len() + 1, gap, "splitting curve");
    match curve {
        Curve3::Line(line) => split_line(line, &ordered, gap),
        Curve3::Arc(arc) => {
            let normal = normal.ok_or(GeometryError::MissingPlaneNormal)?;
            split_arc(arc, &ordered, normal, gap)
        }
    }
}

/// Split `curve` into pieces of the given successive `lengths`, each
/// followed by `gap`; the remainder forms the last piece.
pub fn split_curve_at_lengths(
    curve: &Curve3,
    lengths: &[f64],
    normal: Option<&Vec3>,
    gap: f64,
) -> GeometryResult<Vec<Curve3>> {
    let total: f64 = lengths.iter().map(|l| l + gap).sum();
    if Tolerance::DEFAULT.sgt(total, curve.length()) {
        return Err(GeometryError::LengthOutOfRange {
            length: total,
            curve_length: curve.length(),
        });
    }

    let mut points = Vec::with_capacity(lengths.len());
    let mut at = 0.0;
    for (i, l) in lengths.iter().enumerate() {
        if i > 0 {
            at += gap;
        }
        at += l;
        points.push(point_at_length_from_start(curve, at, normal)?);
    }
    split_curve(curve, &points, normal, gap)
}
