#![warn(missing_docs)]

//! Line and arc geometry for the kerf kernel.
//!
//! Tool paths on sheet and tube parts are built from two curve kinds:
//! straight [`Line3`] segments and circular [`Arc3`]s given by four points.
//! This crate recovers arc metrics, classifies traversal sense against a
//! plane normal, evaluates and inverts curve parameterizations, and splits
//! curves with gaps.
//!
//! # Example
//!
//! ```
//! use kerf_kernel_geom::{arc_angle_and_sense, create_arc, ArcSense};
//! use kerf_kernel_math::{Point3, Vec3};
//!
//! let arc = create_arc(
//!     &Point3::new(1.0, 0.0, 0.0),
//!     &Point3::new(0.0, 1.0, 0.0),
//!     &Point3::origin(),
//!     &Vec3::z(),
//!     ArcSense::Ccw,
//! )
//! .unwrap();
//!
//! let sweep = arc_angle_and_sense(&arc, &Vec3::z()).unwrap();
//! assert_eq!(sweep.sense, ArcSense::Ccw);
//! assert!((sweep.angle - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
//! ```

mod arc;
mod bbox;
mod curve;
mod line;
mod ops;
mod sense;
mod split;

pub use arc::{
    arc_frame, arc_midpoint, arc_plane_normal, arc_point_at_angle, arc_tangent_at_point, create_arc,
    evaluate_center_and_radius, is_major, new_end_point_on_arc_at_increment, nudge_point_to_arc,
    two_intermediate_points,
};
pub use bbox::{curve_bounds, curve_bounds_within};
pub use curve::{Arc3, Curve3, CurveKind, Line3};
pub use line::{
    interpolated_normal_at_point, interpolated_normals_for_line, intersecting_point_between_lines,
    line_param_at_point, new_end_point_on_line_at_increment, shortest_dist_between_lines, LineIntersection,
    LinePairKind,
};
pub use ops::{
    evaluate, is_point_on_curve, length_at_point, length_between_params, length_between_points, midpoint,
    param_at_point, point_at_length_from_start, reversed_curve, tangent_at_point,
};
pub use sense::{arc_angle_and_sense, arc_angle_and_sense_between, arc_angle_at_point, ArcAngle, ArcSense};
pub use split::{split_arc, split_curve, split_curve_at_lengths, split_line};

pub use kerf_kernel_math::{GeometryError, GeometryResult};
