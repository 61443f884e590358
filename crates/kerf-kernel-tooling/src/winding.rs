//! Winding of a closed tooling loop projected onto a plane.

use serde::{Deserialize, Serialize};

use kerf_kernel_math::{normalize, opposing, GeometryError, GeometryResult, Point3, Tolerance, Vec3};

use crate::segment::ToolingSegment;

/// Rotational direction of a closed loop seen along a plane normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winding {
    /// Clockwise.
    Cw,
    /// Counter-clockwise.
    Ccw,
}

/// Winding of the loop formed by the segment start points, projected onto
/// the plane through `point_on_plane` with normal `plane_normal`.
///
/// The loop orientation is read off the corner at the projected point
/// farthest from the first one. This is reliable for convex and mildly
/// concave loops; strongly non-convex or self-intersecting loops can be
/// misclassified.
pub fn tooling_winding(
    plane_normal: &Vec3,
    point_on_plane: &Point3,
    segs: &[ToolingSegment],
) -> GeometryResult<Winding> {
    let n = normalize(plane_normal, "winding plane normal")?.into_inner();
    let tol = Tolerance::CHAIN;

    let mut pts: Vec<Point3> = Vec::with_capacity(segs.len());
    for seg in segs {
        let p = seg.start();
        let projected = p + n * (point_on_plane - p).dot(&n);
        if !pts.iter().any(|q| tol.points_equal(q, &projected)) {
            pts.push(projected);
        }
    }
    if pts.len() < 3 {
        return Err(GeometryError::DegenerateLoop(format!(
            "{} distinct projected points, need at least 3",
            pts.len()
        )));
    }

    let reference = pts[0];
    let mut farthest = 1;
    let mut best = (pts[1] - reference).norm();
    for (i, q) in pts.iter().enumerate().skip(2) {
        let d = (q - reference).norm();
        if d > best {
            best = d;
            farthest = i;
        }
    }

    let to_far = pts[farthest] - reference;
    // The corner before the farthest point; when that is the reference
    // itself, use the corner after it with the cross product flipped.
    let turn = if farthest > 1 {
        (pts[farthest - 1] - reference).cross(&to_far)
    } else {
        to_far.cross(&(pts[2] - reference))
    };
    if turn.norm() < tol.linear * tol.linear {
        return Err(GeometryError::DegenerateLoop("projected loop is collinear".into()));
    }

    Ok(if opposing(&turn, &n) { Winding::Cw } else { Winding::Ccw })
}
