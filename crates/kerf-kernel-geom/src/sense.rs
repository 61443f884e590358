//! Signed arc angles and traversal sense relative to a caller-supplied plane
//! normal.
//!
//! An arc's four points fix its traversal, but whether that traversal is
//! clockwise or counter-clockwise depends on which side of the plane it is
//! viewed from. Every query here takes the viewing normal explicitly and
//! returns a signed angle: positive for counter-clockwise, negative for
//! clockwise.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};
use tracing::trace;

use kerf_kernel_math::{aligned, normalize, opposing, Dir3, GeometryError, GeometryResult, Point3, Tolerance, Vec3};

use crate::curve::Arc3;

/// Angular window around π inside which a sub-range is treated as a half turn.
const HALF_TURN_EPSILON: f64 = 1e-5;

/// Rotational direction of an arc as seen along a plane normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArcSense {
    /// Clockwise.
    Cw,
    /// Counter-clockwise.
    Ccw,
}

impl ArcSense {
    /// The opposite sense.
    pub fn reversed(self) -> Self {
        match self {
            ArcSense::Cw => ArcSense::Ccw,
            ArcSense::Ccw => ArcSense::Cw,
        }
    }

    /// `+1.0` for counter-clockwise, `-1.0` for clockwise.
    pub fn signum(self) -> f64 {
        match self {
            ArcSense::Cw => -1.0,
            ArcSense::Ccw => 1.0,
        }
    }
}

/// A signed swept angle and its sense.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcAngle {
    /// Signed angle in radians, in `[-2π, 2π]`.
    pub angle: f64,
    /// Sense of the sweep.
    pub sense: ArcSense,
}

impl ArcAngle {
    fn new(angle: f64, sense: ArcSense) -> Self {
        Self { angle, sense }
    }
}

/// Signed angle and sense of the whole arc as seen along `normal`.
pub fn arc_angle_and_sense(arc: &Arc3, normal: &Vec3) -> GeometryResult<ArcAngle> {
    arc_angle_and_sense_between(arc, &arc.start(), &arc.end(), normal)
}

/// Signed angle and sense of the portion of `arc` from `start` to `end`, as
/// seen along `normal`.
///
/// Full circles always report a counter-clockwise sweep. For open arcs a
/// sub-range inherits the sense of the whole arc: the candidate derived from
/// the chord geometry is swapped for its complement when the two disagree.
pub fn arc_angle_and_sense_between(
    arc: &Arc3,
    start: &Point3,
    end: &Point3,
    normal: &Vec3,
) -> GeometryResult<ArcAngle> {
    let tol = Tolerance::DEFAULT;
    let n = normalize(normal, "arc plane normal")?;
    let center = arc.center();

    if arc.is_circle() {
        if tol.points_equal(start, &arc.start()) && tol.points_equal(end, &arc.end()) {
            return Ok(ArcAngle::new(TAU, ArcSense::Ccw));
        }
        for p in [start, end] {
            if !lies_on_circle(arc, p, &n, &tol) {
                return Err(GeometryError::not_on_curve(p));
            }
        }
        let to_start = start - center;
        let to_end = end - center;
        let cos = to_start.normalize().dot(&to_end.normalize()).clamp(-1.0, 1.0);
        let mut angle = cos.acos();
        if opposing(&to_start.cross(&to_end), &n) {
            angle = TAU - angle;
        }
        return Ok(ArcAngle::new(angle, ArcSense::Ccw));
    }

    let vs = normalize(&(start - center), "arc start radial")?.into_inner();
    let ve = normalize(&(end - center), "arc end radial")?.into_inner();
    let theta = vs.dot(&ve).clamp(-1.0 + f64::EPSILON, 1.0 - f64::EPSILON).acos();

    if (theta - PI).abs() < HALF_TURN_EPSILON {
        // Direction of travel just past `start`, compared against the
        // direction from `start` to the centre.
        let ahead = arc.rotate_point(start, 0.1 * arc.sweep());
        let dir = normalize(&(ahead - start), "arc travel direction")?;
        let to_center = normalize(&(center - start), "arc start to centre")?.into_inner();
        let ccw = aligned(&dir.cross(&to_center), &n);
        trace!(theta, ccw, "half-turn sub-range");
        return Ok(if ccw {
            ArcAngle::new(theta, ArcSense::Ccw)
        } else {
            ArcAngle::new(-theta, ArcSense::Cw)
        });
    }

    let length = arc.length();
    let half = PI * arc.radius();
    let s_x_e = vs.cross(&ve);
    if s_x_e.norm() < tol.linear {
        trace!(length, "coincident radials, zero-angle sentinel");
        let sense = if length > half { ArcSense::Cw } else { ArcSense::Ccw };
        return Ok(ArcAngle::new(0.0, sense));
    }
    let d = s_x_e.normalize().dot(n.as_ref());

    let full_arc = tol.points_equal(start, &arc.start()) && tol.points_equal(end, &arc.end());
    let arc_sense = if full_arc {
        None
    } else {
        Some(arc_angle_and_sense(arc, normal)?.sense)
    };

    if tol.is_zero(d) {
        return Err(GeometryError::UnhandledGeometricConfiguration(format!(
            "plane normal lies in the arc plane (n · (vs × ve) = {d:.3e})"
        )));
    }
    // An exact half-circle arc is neither major nor minor; treat it as major
    // and let the reconciliation below pick the right complement.
    let major = length >= half;
    let (candidate, complement) = match (d > 0.0, major) {
        (false, true) => (ArcAngle::new(TAU - theta, ArcSense::Ccw), ArcAngle::new(-theta, ArcSense::Cw)),
        (true, true) => (ArcAngle::new(-(TAU - theta), ArcSense::Cw), ArcAngle::new(theta, ArcSense::Ccw)),
        (true, false) => (ArcAngle::new(theta, ArcSense::Ccw), ArcAngle::new(-(TAU - theta), ArcSense::Cw)),
        (false, false) => (ArcAngle::new(-theta, ArcSense::Cw), ArcAngle::new(TAU - theta, ArcSense::Ccw)),
    };

    match arc_sense {
        Some(sense) if sense != candidate.sense => {
            trace!(angle = complement.angle, "sub-range reconciled with arc sense");
            Ok(complement)
        }
        _ => Ok(candidate),
    }
}

/// Signed angle from the arc's start to `p`, as seen along `normal`.
///
/// `p` at the start yields zero and `p` at the end yields the whole arc's
/// angle; circles resolve the shared start/end point to zero.
pub fn arc_angle_at_point(arc: &Arc3, p: &Point3, normal: &Vec3) -> GeometryResult<ArcAngle> {
    let tol = Tolerance::DEFAULT;
    let n = normalize(normal, "arc plane normal")?;
    if !lies_on_circle(arc, p, &n, &tol) {
        return Err(GeometryError::not_on_curve(p));
    }

    if arc.is_circle() {
        if tol.points_equal(p, &arc.start()) {
            return Ok(ArcAngle::new(0.0, ArcSense::Ccw));
        }
    } else if tol.points_equal(p, &arc.start()) {
        let whole = arc_angle_and_sense(arc, normal)?;
        return Ok(ArcAngle::new(0.0, whole.sense));
    } else if tol.points_equal(p, &arc.end()) {
        return arc_angle_and_sense(arc, normal);
    }
    arc_angle_and_sense_between(arc, &arc.start(), p, normal)
}

/// Radius and planarity test of `p` against the arc's supporting circle.
pub(crate) fn lies_on_circle(arc: &Arc3, p: &Point3, n: &Dir3, tol: &Tolerance) -> bool {
    let radial = p - arc.center();
    if (radial.norm() - arc.radius()).abs() >= tol.linear {
        return false;
    }
    match normalize(&radial, "radial") {
        Ok(r) => n.dot(r.as_ref()).abs() < tol.linear,
        Err(_) => false,
    }
}
