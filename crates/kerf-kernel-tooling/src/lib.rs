#![warn(missing_docs)]

//! Tooling chains for the kerf geometry kernel.
//!
//! A tool path is an ordered chain of [`ToolingSegment`]s: lines and arcs
//! carrying the part's surface normal at each end, where every segment
//! starts exactly where the previous one ends. This crate validates and
//! repairs chains, walks them by length, classifies their winding, and
//! samples them into tool poses.
//!
//! # Example
//!
//! ```
//! use kerf_kernel_geom::{Curve3, Line3};
//! use kerf_kernel_math::{Point3, Vec3};
//! use kerf_kernel_tooling::{point_and_index_at_length, ToolingSegment, TraversalSettings};
//!
//! let line = |a: f64, b: f64| {
//!     let curve = Curve3::Line(Line3::new(Point3::new(a, 0.0, 0.0), Point3::new(b, 0.0, 0.0)));
//!     ToolingSegment::new(curve, Vec3::z(), Vec3::z())
//! };
//! let chain = vec![line(0.0, 3.0), line(3.0, 7.0)];
//!
//! let at = point_and_index_at_length(&chain, 0, 5.0, false, &TraversalSettings::default()).unwrap();
//! assert_eq!(at.index, 1);
//! assert!((at.point.x - 5.0).abs() < 1e-12);
//! ```

mod chain;
mod pose;
mod segment;
mod settings;
mod traverse;
mod winding;

pub use chain::{
    chain_bounds, check_continuity, index_of_point, length_between_indices, repair_chain, reversed_segments,
    split_chain_at_points, total_length,
};
pub use pose::{pose_at, sample_chain_poses, sample_segment, transform_points, PathSample};
pub use segment::{segments_for_curves, ToolingSegment};
pub use settings::TraversalSettings;
pub use traverse::{
    length_at_point, length_between_points, length_from_point_to_end, length_from_start_to_point,
    point_and_index_at_length, point_at_length_from, segment_for_length, ChainPoint,
};
pub use winding::{tooling_winding, Winding};

pub use kerf_kernel_math::{GeometryError, GeometryResult};
