//! Error taxonomy shared by every kernel layer.

use thiserror::Error;

/// Errors raised by geometric queries.
///
/// Every variant is recoverable: the kernel returns it instead of producing a
/// silently wrong result, and the caller decides how to proceed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Attempted to normalize a vector with (near) zero length.
    #[error("cannot normalize degenerate vector ({context})")]
    DegenerateVector {
        /// What was being normalized.
        context: &'static str,
    },

    /// Curve is absent, of the wrong kind, or violates its construction invariant.
    #[error("invalid curve: {0}")]
    InvalidCurve(String),

    /// An arc operation was called without the plane normal it requires.
    #[error("arc operation requires a plane normal")]
    MissingPlaneNormal,

    /// A point that must lie on a curve does not, within tolerance.
    #[error("point ({x}, {y}, {z}) does not lie on the curve")]
    PointNotOnCurve {
        /// X coordinate of the offending point.
        x: f64,
        /// Y coordinate of the offending point.
        y: f64,
        /// Z coordinate of the offending point.
        z: f64,
    },

    /// The arc sense engine reached a configuration outside its case analysis.
    #[error("unhandled geometric configuration: {0}")]
    UnhandledGeometricConfiguration(String),

    /// A chain traversal asked for more length than the chain provides.
    #[error("requested length {requested} exceeds available chain length {available}")]
    SegmentChainLengthExceeded {
        /// Length asked for.
        requested: f64,
        /// Length available from the start position.
        available: f64,
    },

    /// A per-curve length query fell outside `[0, curve_length]`.
    #[error("length {length} is outside the curve length {curve_length}")]
    LengthOutOfRange {
        /// Length asked for.
        length: f64,
        /// Length of the curve.
        curve_length: f64,
    },

    /// Consecutive tooling segments do not share an endpoint.
    #[error("tooling chain is disconnected before segment {index} (gap {gap})")]
    DisconnectedChain {
        /// Index of the segment whose start does not meet its predecessor's end.
        index: usize,
        /// Distance between the two endpoints.
        gap: f64,
    },

    /// A segment index is outside the chain.
    #[error("segment index {index} out of range for chain of {len} segments")]
    SegmentIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of segments in the chain.
        len: usize,
    },

    /// A closed loop is too small or too flat to classify.
    #[error("degenerate loop: {0}")]
    DegenerateLoop(String),

    /// Settings failed validation.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl GeometryError {
    /// Build a [`GeometryError::PointNotOnCurve`] for `p`.
    pub fn not_on_curve(p: &crate::Point3) -> Self {
        Self::PointNotOnCurve {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

/// Result type for kernel operations.
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;
