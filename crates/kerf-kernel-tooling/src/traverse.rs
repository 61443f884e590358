//! Walking a tooling chain by accumulated length.
//!
//! Forward traversal measures from the start of the segment at the given
//! start index towards the chain end. Reverse traversal measures from the
//! end of that segment back towards index 0. Positions that land within
//! [`TraversalSettings::min_segment_length`] of a segment end snap onto it,
//! so downstream code never emits a sliver segment.

use tracing::debug;

use kerf_kernel_geom::{arc_angle_and_sense, evaluate, is_point_on_curve, length_at_point as curve_length_at_point, Curve3};
use kerf_kernel_math::{GeometryError, GeometryResult, Point3};

use crate::chain::{check_continuity, total_length};
use crate::segment::ToolingSegment;
use crate::settings::TraversalSettings;

/// A position on a chain: the point and the index of the segment holding it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainPoint {
    /// Position in space.
    pub point: Point3,
    /// Index of the segment the position lies on.
    pub index: usize,
}

impl ChainPoint {
    fn new(point: Point3, index: usize) -> Self {
        Self { point, index }
    }
}

fn check_index(segs: &[ToolingSegment], index: usize) -> GeometryResult<()> {
    if index >= segs.len() {
        return Err(GeometryError::SegmentIndexOutOfRange {
            index,
            len: segs.len(),
        });
    }
    Ok(())
}

/// Point at `target` length along the chain, starting at segment
/// `start_index`, walking forwards or (with `reverse`) backwards.
pub fn point_and_index_at_length(
    segs: &[ToolingSegment],
    start_index: usize,
    target: f64,
    reverse: bool,
    settings: &TraversalSettings,
) -> GeometryResult<ChainPoint> {
    settings.validate()?;
    check_index(segs, start_index)?;
    check_continuity(segs, settings.continuity_tolerance)?;
    if !target.is_finite() || target < -settings.length_tolerance {
        return Err(GeometryError::LengthOutOfRange {
            length: target,
            curve_length: total_length(segs),
        });
    }

    let order: Box<dyn Iterator<Item = usize>> = if reverse {
        Box::new((0..=start_index).rev())
    } else {
        Box::new(start_index..segs.len())
    };

    let mut accumulated = 0.0;
    let mut current = start_index;
    for i in order {
        current = i;
        accumulated += segs[i].length();
        if accumulated >= target - settings.length_tolerance {
            break;
        }
    }
    if accumulated < target - settings.length_tolerance {
        return Err(GeometryError::SegmentChainLengthExceeded {
            requested: target,
            available: accumulated,
        });
    }

    let seg = &segs[current];
    let seg_len = seg.length();
    let before = accumulated - seg_len;
    let delta = target - before;

    // Segment end where the walk enters `current`, and where it leaves.
    let entry = |c: usize| -> ChainPoint {
        if reverse {
            ChainPoint::new(segs[c].end(), c)
        } else {
            previous_end(segs, c)
        }
    };
    let exit = |c: usize| -> ChainPoint {
        if reverse {
            previous_end(segs, c)
        } else {
            ChainPoint::new(segs[c].end(), c)
        }
    };

    if delta < settings.min_segment_length {
        let snapped = entry(current);
        debug!(index = snapped.index, delta, "traversal snapped to segment entry");
        return Ok(snapped);
    }
    if seg_len - delta < settings.min_segment_length {
        let snapped = exit(current);
        debug!(index = snapped.index, remaining = seg_len - delta, "traversal snapped to segment exit");
        return Ok(snapped);
    }

    let mut t = match &seg.curve {
        Curve3::Line(_) => delta / seg_len,
        Curve3::Arc(arc) => {
            let whole = arc_angle_and_sense(arc, seg.plane_normal())?;
            delta / (arc.radius() * whole.angle).abs()
        }
    };
    if reverse {
        t = 1.0 - t;
    }
    let point = evaluate(&seg.curve, t, Some(seg.plane_normal()))?;
    if !is_point_on_curve(&seg.curve, &point, Some(seg.plane_normal()), &settings.tolerance(), true)? {
        return Err(GeometryError::not_on_curve(&point));
    }
    debug!(index = current, t, "traversal landed inside segment");
    Ok(ChainPoint::new(point, current))
}

/// End of segment `c - 1`, which is the start of `c`; the chain start for `c == 0`.
fn previous_end(segs: &[ToolingSegment], c: usize) -> ChainPoint {
    match c.checked_sub(1) {
        Some(p) => ChainPoint::new(segs[p].end(), p),
        None => ChainPoint::new(segs[0].start(), 0),
    }
}

/// Length from the chain start to `p`, and the index of the first segment
/// containing `p`.
pub fn length_at_point(
    segs: &[ToolingSegment],
    p: &Point3,
    settings: &TraversalSettings,
) -> GeometryResult<(f64, usize)> {
    settings.validate()?;
    check_continuity(segs, settings.continuity_tolerance)?;
    let tol = settings.tolerance();
    let mut before = 0.0;
    for (i, seg) in segs.iter().enumerate() {
        let normal = Some(seg.plane_normal());
        if is_point_on_curve(&seg.curve, p, normal, &tol, true)? {
            return Ok((before + curve_length_at_point(&seg.curve, p, normal)?, i));
        }
        before += seg.length();
    }
    Err(GeometryError::not_on_curve(p))
}

/// Point `length` further along the chain from `p`.
pub fn point_at_length_from(
    p: &Point3,
    length: f64,
    segs: &[ToolingSegment],
    settings: &TraversalSettings,
) -> GeometryResult<ChainPoint> {
    let (at, _) = length_at_point(segs, p, settings)?;
    point_and_index_at_length(segs, 0, at + length, false, settings)
}

/// Index of the segment containing chain length `length`, and the length
/// already used up before that segment.
pub fn segment_for_length(segs: &[ToolingSegment], length: f64) -> GeometryResult<(usize, f64)> {
    let mut before = 0.0;
    for (i, seg) in segs.iter().enumerate() {
        if before + seg.length() >= length {
            return Ok((i, before));
        }
        before += seg.length();
    }
    Err(GeometryError::SegmentChainLengthExceeded {
        requested: length,
        available: before,
    })
}

/// Chain length between two points on the chain, in either order.
pub fn length_between_points(
    segs: &[ToolingSegment],
    from: &Point3,
    to: &Point3,
    settings: &TraversalSettings,
) -> GeometryResult<f64> {
    let (a, _) = length_at_point(segs, from, settings)?;
    let (b, _) = length_at_point(segs, to, settings)?;
    Ok((b - a).abs())
}

/// Chain length from the chain start to `p`.
pub fn length_from_start_to_point(
    segs: &[ToolingSegment],
    p: &Point3,
    settings: &TraversalSettings,
) -> GeometryResult<f64> {
    Ok(length_at_point(segs, p, settings)?.0)
}

/// Chain length from `p` to the chain end.
pub fn length_from_point_to_end(
    segs: &[ToolingSegment],
    p: &Point3,
    settings: &TraversalSettings,
) -> GeometryResult<f64> {
    Ok(total_length(segs) - length_at_point(segs, p, settings)?.0)
}
