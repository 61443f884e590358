//! Chains of tooling segments: continuity, repair, reversal and aggregates.

use tracing::warn;

use kerf_kernel_geom::{curve_bounds, is_point_on_curve, Curve3, Line3};
use kerf_kernel_math::{Bound3, GeometryError, GeometryResult, Point3, Tolerance};

use crate::segment::ToolingSegment;

/// Check that every segment starts where its predecessor ends, within `tol`.
pub fn check_continuity(segs: &[ToolingSegment], tol: f64) -> GeometryResult<()> {
    for (i, pair) in segs.windows(2).enumerate() {
        let gap = (pair[1].start() - pair[0].end()).norm();
        if gap > tol {
            return Err(GeometryError::DisconnectedChain { index: i + 1, gap });
        }
    }
    Ok(())
}

/// Close gaps between consecutive segments.
///
/// A line next to a gap is stretched over it (the earlier line when it
/// precedes its neighbour, the later one when it follows an arc); two arcs
/// are joined with a linking line.
pub fn repair_chain(segs: &[ToolingSegment], tol: f64) -> GeometryResult<Vec<ToolingSegment>> {
    let mut fixed = segs.to_vec();
    let mut i = 1;
    while i < fixed.len() {
        let (prev, curr) = (fixed[i - 1], fixed[i]);
        let gap = (curr.start() - prev.end()).norm();
        if gap <= Tolerance::DEFAULT.linear {
            i += 1;
            continue;
        }
        warn!(index = i, gap, "repairing tooling chain discontinuity");
        match (&prev.curve, &curr.curve) {
            (Curve3::Line(l), _) => {
                fixed[i - 1] = ToolingSegment::new(
                    Curve3::Line(Line3::new(l.start, curr.start())),
                    prev.normal_at_start,
                    curr.normal_at_start,
                );
            }
            (Curve3::Arc(_), Curve3::Line(l)) => {
                fixed[i] = ToolingSegment::new(
                    Curve3::Line(Line3::new(prev.end(), l.end)),
                    prev.normal_at_end,
                    curr.normal_at_end,
                );
            }
            (Curve3::Arc(_), Curve3::Arc(_)) => {
                let link = ToolingSegment::new(
                    Curve3::Line(Line3::new(prev.end(), curr.start())),
                    prev.normal_at_end,
                    curr.normal_at_start,
                );
                fixed.insert(i, link);
            }
        }
        i += 1;
    }
    check_continuity(&fixed, tol)?;
    Ok(fixed)
}

/// The chain traversed backwards: reversed order, each segment reversed.
pub fn reversed_segments(segs: &[ToolingSegment]) -> GeometryResult<Vec<ToolingSegment>> {
    segs.iter().rev().map(ToolingSegment::reversed).collect()
}

/// Sum of all segment lengths.
pub fn total_length(segs: &[ToolingSegment]) -> f64 {
    segs.iter().map(ToolingSegment::length).sum()
}

/// Sum of the lengths of segments `from..=to` (either order).
pub fn length_between_indices(segs: &[ToolingSegment], from: usize, to: usize) -> GeometryResult<f64> {
    let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
    if hi >= segs.len() {
        return Err(GeometryError::SegmentIndexOutOfRange {
            index: hi,
            len: segs.len(),
        });
    }
    Ok(segs[lo..=hi].iter().map(ToolingSegment::length).sum())
}

/// Index of the first segment at or after `from` whose curve contains `p`.
pub fn index_of_point(segs: &[ToolingSegment], p: &Point3, from: usize, tol: &Tolerance) -> GeometryResult<Option<usize>> {
    for (i, seg) in segs.iter().enumerate().skip(from) {
        if is_point_on_curve(&seg.curve, p, Some(seg.plane_normal()), tol, true)? {
            return Ok(Some(i));
        }
    }
    Ok(None)
}

/// Bounds of the whole chain, optionally clamped into `limits`.
pub fn chain_bounds(segs: &[ToolingSegment], limits: Option<&Bound3>) -> Bound3 {
    let b = segs
        .iter()
        .fold(Bound3::empty(), |acc, s| acc.union(&curve_bounds(&s.curve)));
    match limits {
        Some(l) if !b.is_empty() => b.clamped_to(l),
        _ => b,
    }
}

/// Split every segment at those of `points` that lie on it.
///
/// Points at segment ends are ignored. The result is still a continuous chain.
pub fn split_chain_at_points(segs: &[ToolingSegment], points: &[Point3]) -> GeometryResult<Vec<ToolingSegment>> {
    let tol = Tolerance::DEFAULT;
    let mut out = Vec::with_capacity(segs.len() + points.len());
    for seg in segs {
        let mut on_seg = Vec::new();
        for p in points {
            if is_point_on_curve(&seg.curve, p, Some(seg.plane_normal()), &tol, true)? {
                on_seg.push(*p);
            }
        }
        if on_seg.is_empty() {
            out.push(*seg);
        } else {
            out.extend(seg.split(&on_seg, 0.0)?);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::tests::{arc_seg, line_seg};
    use approx::assert_relative_eq;
    use kerf_kernel_geom::ArcSense;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn square() -> Vec<ToolingSegment> {
        vec![
            line_seg(p(0.0, 0.0), p(2.0, 0.0)),
            line_seg(p(2.0, 0.0), p(2.0, 2.0)),
            line_seg(p(2.0, 2.0), p(0.0, 2.0)),
            line_seg(p(0.0, 2.0), p(0.0, 0.0)),
        ]
    }

    #[test]
    fn test_continuity() {
        assert!(check_continuity(&square(), 1e-3).is_ok());
        let broken = vec![line_seg(p(0.0, 0.0), p(1.0, 0.0)), line_seg(p(1.1, 0.0), p(2.0, 0.0))];
        match check_continuity(&broken, 1e-3) {
            Err(GeometryError::DisconnectedChain { index, gap }) => {
                assert_eq!(index, 1);
                assert_relative_eq!(gap, 0.1, epsilon = 1e-12);
            }
            other => panic!("expected disconnected chain, got {other:?}"),
        }
    }

    #[test]
    fn test_repair_stretches_line() {
        let broken = vec![line_seg(p(0.0, 0.0), p(1.0, 0.0)), line_seg(p(1.1, 0.0), p(2.0, 0.0))];
        let fixed = repair_chain(&broken, 1e-3).unwrap();
        assert_eq!(fixed.len(), 2);
        assert_relative_eq!(fixed[0].end(), p(1.1, 0.0));
    }

    #[test]
    fn test_repair_links_arcs() {
        let a = arc_seg(p(1.0, 0.0), p(0.0, 1.0), p(0.0, 0.0), ArcSense::Ccw);
        let b = arc_seg(p(0.0, 1.5), p(-1.5, 0.0), p(0.0, 0.0), ArcSense::Ccw);
        let fixed = repair_chain(&[a, b], 1e-3).unwrap();
        assert_eq!(fixed.len(), 3);
        assert!(fixed[1].curve.as_line().is_some());
        assert!(check_continuity(&fixed, 1e-3).is_ok());
    }

    #[test]
    fn test_reversed_chain() {
        let rev = reversed_segments(&square()).unwrap();
        assert!(check_continuity(&rev, 1e-3).is_ok());
        assert_eq!(rev[0].start(), p(0.0, 0.0));
        assert_eq!(rev[0].end(), p(0.0, 2.0));
    }

    #[test]
    fn test_lengths() {
        let segs = square();
        assert_relative_eq!(total_length(&segs), 8.0);
        assert_relative_eq!(length_between_indices(&segs, 1, 2).unwrap(), 4.0);
        assert_relative_eq!(length_between_indices(&segs, 3, 0).unwrap(), 8.0);
        assert!(length_between_indices(&segs, 0, 4).is_err());
    }

    #[test]
    fn test_index_of_point() {
        let segs = square();
        let tol = Tolerance::DEFAULT;
        assert_eq!(index_of_point(&segs, &p(2.0, 1.0), 0, &tol).unwrap(), Some(1));
        assert_eq!(index_of_point(&segs, &p(1.0, 1.0), 0, &tol).unwrap(), None);
        assert_eq!(index_of_point(&segs, &p(0.0, 0.0), 1, &tol).unwrap(), Some(3));
    }

    #[test]
    fn test_bounds() {
        let b = chain_bounds(&square(), None);
        assert_eq!(b.min, p(0.0, 0.0));
        assert_eq!(b.max, p(2.0, 2.0));
        let limits = Bound3::new(p(0.0, 0.0), p(1.0, 1.0));
        assert_eq!(chain_bounds(&square(), Some(&limits)).max, p(1.0, 1.0));
    }

    #[test]
    fn test_split_chain() {
        let out = split_chain_at_points(&square(), &[p(1.0, 0.0), p(2.0, 1.0), p(2.0, 2.0)]).unwrap();
        assert_eq!(out.len(), 6);
        assert!(check_continuity(&out, 1e-6).is_ok());
        assert_relative_eq!(total_length(&out), 8.0, epsilon = 1e-12);
    }
}
