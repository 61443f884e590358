#![warn(missing_docs)]

//! Geometry kernel facade for kerf.
//!
//! Re-exports the three kernel layers and a [`prelude`] with the types most
//! callers need: math primitives and transforms, line/arc curves, and
//! tooling chains.
//!
//! # Example
//!
//! ```
//! use kerf_kernel::prelude::*;
//!
//! // A slot: straight run, half-circle end, straight run back.
//! let z = Vec3::z();
//! let seg = |c: Curve3| ToolingSegment::new(c, z, z);
//! let chain = vec![
//!     seg(Curve3::Line(Line3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)))),
//!     seg(Curve3::Arc(
//!         create_arc(
//!             &Point3::new(10.0, 0.0, 0.0),
//!             &Point3::new(10.0, 4.0, 0.0),
//!             &Point3::new(10.0, 2.0, 0.0),
//!             &z,
//!             ArcSense::Ccw,
//!         )
//!         .unwrap(),
//!     )),
//!     seg(Curve3::Line(Line3::new(Point3::new(10.0, 4.0, 0.0), Point3::new(0.0, 4.0, 0.0)))),
//! ];
//!
//! let settings = TraversalSettings::default();
//! check_continuity(&chain, settings.continuity_tolerance).unwrap();
//! let at = point_and_index_at_length(&chain, 0, 12.0, false, &settings).unwrap();
//! assert_eq!(at.index, 1);
//! ```

pub use kerf_kernel_geom;
pub use kerf_kernel_math;
pub use kerf_kernel_tooling;

/// Commonly used types and functions from every kernel layer.
pub mod prelude {
    pub use kerf_kernel_geom::{
        arc_angle_and_sense, arc_angle_and_sense_between, arc_angle_at_point, create_arc, evaluate,
        is_point_on_curve, param_at_point, reversed_curve, split_curve, Arc3, ArcAngle, ArcSense, Curve3, Line3,
        LinePairKind,
    };
    pub use kerf_kernel_math::{
        Axis, Bound3, Dir3, GeometryError, GeometryResult, Point3, RigidTransform, Tolerance, Vec3,
    };
    pub use kerf_kernel_tooling::{
        check_continuity, length_at_point, point_and_index_at_length, reversed_segments, tooling_winding,
        ChainPoint, ToolingSegment, TraversalSettings, Winding,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_relative_eq;
    use kerf_kernel_geom::{length_at_point as curve_length_at_point, shortest_dist_between_lines, split_arc, split_line};
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    fn unit(a: f64) -> Point3 {
        Point3::new(a.cos(), a.sin(), 0.0)
    }

    fn quarter_arc() -> Arc3 {
        Arc3::new(unit(0.0), unit(0.4), unit(1.2), unit(FRAC_PI_2)).unwrap()
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    #[test]
    fn test_quarter_arc_scenario() {
        let arc = quarter_arc();
        let sweep = arc_angle_and_sense(&arc, &Vec3::z()).unwrap();
        assert_eq!(sweep.sense, ArcSense::Ccw);
        assert_relative_eq!(sweep.angle, FRAC_PI_2, epsilon = 1e-9);
        assert_relative_eq!(arc.length(), FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn test_traversal_scenario() {
        let z = Vec3::z();
        let chain = vec![
            ToolingSegment::new(Curve3::Line(Line3::new(Point3::origin(), Point3::new(3.0, 0.0, 0.0))), z, z),
            ToolingSegment::new(
                Curve3::Line(Line3::new(Point3::new(3.0, 0.0, 0.0), Point3::new(3.0, 4.0, 0.0))),
                z,
                z,
            ),
        ];
        let at = point_and_index_at_length(&chain, 0, 5.0, false, &TraversalSettings::default()).unwrap();
        assert_eq!(at.index, 1);
        assert_relative_eq!(at.point, Point3::new(3.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_parallel_lines_scenario() {
        let (d, kind) = shortest_dist_between_lines(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
            &Point3::new(1.0, 1.0, 0.0),
            &Tolerance::DEFAULT,
        )
        .unwrap();
        assert_eq!(kind, LinePairKind::Parallel);
        assert_relative_eq!(d, 1.0, epsilon = 1e-12);
    }

    // =========================================================================
    // Properties
    // =========================================================================

    #[test]
    fn test_evaluate_param_round_trip() {
        let normals = [Vec3::z(), -Vec3::z()];
        let arcs = [
            quarter_arc(),
            Arc3::new(unit(0.0), unit(-1.0), unit(-3.0), unit(-4.5)).unwrap(),
            Arc3::new(unit(0.5), unit(2.0), unit(4.0), unit(5.5)).unwrap(),
        ];
        for arc in arcs {
            let curve = Curve3::Arc(arc);
            for n in &normals {
                for i in 0..=10 {
                    let t = i as f64 / 10.0;
                    let p = evaluate(&curve, t, Some(n)).unwrap();
                    assert!(is_point_on_curve(&curve, &p, Some(n), &Tolerance::DEFAULT, true).unwrap());
                    let back = param_at_point(&curve, &p, Some(n)).unwrap();
                    assert!((back - t).abs() < 1e-6, "t={t} back={back}");
                }
            }
        }
    }

    #[test]
    fn test_angle_length_consistency() {
        let z = Vec3::z();
        for arc in [quarter_arc(), Arc3::new(unit(0.0), unit(-1.0), unit(-3.0), unit(-4.5)).unwrap()] {
            let sweep = arc_angle_and_sense(&arc, &z).unwrap();
            assert_relative_eq!(arc.length(), arc.radius() * sweep.angle.abs(), epsilon = 1e-9);
            let curve = Curve3::Arc(arc);
            let at_end = curve_length_at_point(&curve, &arc.end(), Some(&z)).unwrap();
            assert_relative_eq!(at_end, curve.length(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_sense_symmetry() {
        // Minor and major spans, both senses about +Z.
        for sweep in [1.0, -1.0, 5.0, -5.0, 4.5, -2.5] {
            let arc = Arc3::new(unit(0.0), unit(0.3 * sweep), unit(0.7 * sweep), unit(sweep)).unwrap();
            let pairs = [
                (arc.start(), arc.end()),
                (unit(0.2 * sweep), unit(0.7 * sweep)),
                (arc.start(), unit(0.9 * sweep)),
                (unit(0.1 * sweep), arc.end()),
            ];
            for n in [Vec3::z(), -Vec3::z()] {
                let whole = arc_angle_and_sense(&arc, &n).unwrap();
                for (a, b) in &pairs {
                    let fwd = arc_angle_and_sense_between(&arc, a, b, &n).unwrap();
                    let rev = arc_angle_and_sense_between(&arc, b, a, &n).unwrap();
                    assert_eq!(fwd.sense, whole.sense, "sweep={sweep}");
                    assert_eq!(rev.sense, whole.sense, "sweep={sweep}");
                    assert_relative_eq!(fwd.angle.abs() + rev.angle.abs(), TAU, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_transform_orthonormality() {
        let mut xf = RigidTransform::identity();
        for i in 0..500 {
            let axis = [Axis::X, Axis::NegY, Axis::Z][i % 3];
            xf = xf.rotate(axis, 0.37 * (i as f64 + 1.0));
        }
        assert!(xf.is_orthonormal(&Tolerance::DEFAULT.with_linear(1e-9)));
        let id = xf.then(&xf.inverse());
        assert!((id.matrix() - RigidTransform::identity().matrix()).abs().max() < 1e-9);
    }

    #[test]
    fn test_split_conservation() {
        let z = Vec3::z();
        let gap = 0.05;
        let arc = Arc3::new(unit(0.0), unit(1.0), unit(3.0), unit(1.6 * PI)).unwrap();
        let pieces = split_arc(&arc, &[unit(0.8), unit(2.0), unit(4.0)], &z, gap).unwrap();
        let sum: f64 = pieces.iter().map(Curve3::length).sum();
        assert_relative_eq!(sum + (pieces.len() - 1) as f64 * gap, arc.length(), epsilon = 1e-6);

        let line = Line3::new(Point3::origin(), Point3::new(0.0, 0.0, 9.0));
        let stops = [Point3::new(0.0, 0.0, 2.0), Point3::new(0.0, 0.0, 5.0)];
        let pieces = split_line(&line, &stops, gap).unwrap();
        let sum: f64 = pieces.iter().map(Curve3::length).sum();
        assert_relative_eq!(sum + 2.0 * gap, 9.0, epsilon = 1e-9);
    }

    #[test]
    fn test_traversal_idempotence() {
        let z = Vec3::z();
        let settings = TraversalSettings::default();
        let chain = vec![
            ToolingSegment::new(
                Curve3::Line(Line3::new(Point3::new(0.0, -2.0, 0.0), Point3::new(5.0, -2.0, 0.0))),
                z,
                z,
            ),
            ToolingSegment::new(
                Curve3::Arc(
                    create_arc(
                        &Point3::new(5.0, -2.0, 0.0),
                        &Point3::new(5.0, 2.0, 0.0),
                        &Point3::new(5.0, 0.0, 0.0),
                        &z,
                        ArcSense::Ccw,
                    )
                    .unwrap(),
                ),
                z,
                z,
            ),
            ToolingSegment::new(
                Curve3::Line(Line3::new(Point3::new(5.0, 2.0, 0.0), Point3::new(0.0, 2.0, 0.0))),
                z,
                z,
            ),
        ];
        for target in [1.0, 2.5, 6.3, 8.0, 10.0, 13.7] {
            let at = point_and_index_at_length(&chain, 0, target, false, &settings).unwrap();
            let (len, _) = length_at_point(&chain, &at.point, &settings).unwrap();
            assert!((len - target).abs() < 1e-3, "target={target} len={len}");
        }
    }

    #[test]
    fn test_reversed_chain_keeps_winding_flipped() {
        let z = Vec3::z();
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 3.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        ];
        let chain: Vec<_> = (0..4)
            .map(|i| ToolingSegment::new(Curve3::Line(Line3::new(pts[i], pts[(i + 1) % 4])), z, z))
            .collect();
        assert_eq!(tooling_winding(&z, &Point3::origin(), &chain).unwrap(), Winding::Ccw);
        let rev = reversed_segments(&chain).unwrap();
        assert!(check_continuity(&rev, 1e-6).is_ok());
        assert_eq!(tooling_winding(&z, &Point3::origin(), &rev).unwrap(), Winding::Cw);
    }
}
