//! Sampling tooling segments into points, normals and tool poses.
//!
//! Simulation consumers need a local frame at each sampled point: X along
//! the direction of travel, Z along the surface normal. Chains are sampled
//! segment by segment in parallel and the per-segment buffers are
//! concatenated in chain order.

use rayon::prelude::*;
use tracing::debug;

use kerf_kernel_geom::{arc_angle_and_sense, arc_point_at_angle, tangent_at_point, Curve3};
use kerf_kernel_math::{normalize, GeometryError, GeometryResult, Point3, RigidTransform, Vec3};

use crate::segment::ToolingSegment;

/// A sampled point on a segment and the surface normal there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Position.
    pub point: Point3,
    /// Unit surface normal.
    pub normal: Vec3,
}

/// `steps + 1` evenly spaced samples from the segment start to its end.
///
/// Arc samples carry the plane normal; line samples blend the end normals.
pub fn sample_segment(seg: &ToolingSegment, steps: usize) -> GeometryResult<Vec<PathSample>> {
    if steps == 0 {
        return Err(GeometryError::InvalidSettings("sample steps must be at least 1".into()));
    }
    let mut samples = Vec::with_capacity(steps + 1);
    match &seg.curve {
        Curve3::Line(line) => {
            for i in 0..=steps {
                let t = i as f64 / steps as f64;
                let normal = seg.normal_at_start.lerp(&seg.normal_at_end, t);
                samples.push(PathSample {
                    point: line.point_at(t),
                    normal: normalize(&normal, "sampled normal")?.into_inner(),
                });
            }
        }
        Curve3::Arc(arc) => {
            let normal = seg.plane_normal();
            let whole = arc_angle_and_sense(arc, normal)?;
            let unit = normalize(normal, "arc plane normal")?.into_inner();
            for i in 0..=steps {
                let angle = whole.angle * i as f64 / steps as f64;
                samples.push(PathSample {
                    point: arc_point_at_angle(arc, angle, normal)?,
                    normal: unit,
                });
            }
        }
    }
    Ok(samples)
}

/// Tool pose at `p` on `seg`: origin at `p`, X along travel, Z along the
/// surface normal.
pub fn pose_at(seg: &ToolingSegment, p: &Point3) -> GeometryResult<RigidTransform> {
    let tangent = tangent_at_point(&seg.curve, p)?;
    let normal = seg.interpolated_normal_at(p)?;
    RigidTransform::from_frame(p, tangent.as_ref(), &normal)
}

/// Poses at `steps + 1` samples of every segment, in chain order.
///
/// Points shared by consecutive segments appear once per segment.
pub fn sample_chain_poses(segs: &[ToolingSegment], steps: usize) -> GeometryResult<Vec<RigidTransform>> {
    let per_segment: Vec<GeometryResult<Vec<RigidTransform>>> = segs
        .par_iter()
        .map(|seg| -> GeometryResult<Vec<RigidTransform>> {
            sample_segment(seg, steps)?
                .iter()
                .map(|s| {
                    let tangent = tangent_at_point(&seg.curve, &s.point)?;
                    RigidTransform::from_frame(&s.point, tangent.as_ref(), &s.normal)
                })
                .collect()
        })
        .collect();

    let mut poses = Vec::with_capacity(segs.len() * (steps + 1));
    for buffer in per_segment {
        poses.extend(buffer?);
    }
    debug!(segments = segs.len(), poses = poses.len(), "sampled chain poses");
    Ok(poses)
}

/// Apply `xf` to every point, in parallel.
pub fn transform_points(xf: &RigidTransform, points: &[Point3]) -> Vec<Point3> {
    points.par_iter().map(|p| xf.apply_point(p)).collect()
}
