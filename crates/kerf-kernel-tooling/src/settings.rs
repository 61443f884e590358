//! Traversal settings.

use serde::{Deserialize, Serialize};

use kerf_kernel_math::{GeometryError, GeometryResult, Tolerance};

/// Tunables for walking tooling chains by length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalSettings {
    /// Results closer than this to a segment end snap onto it (mm).
    pub min_segment_length: f64,
    /// Slack when comparing accumulated length with the target (mm).
    pub length_tolerance: f64,
    /// Maximum gap between consecutive segment endpoints (mm).
    pub continuity_tolerance: f64,
    /// Tolerance for on-curve tests (mm).
    pub linear_tolerance: f64,
}

impl Default for TraversalSettings {
    fn default() -> Self {
        Self {
            min_segment_length: 0.5,
            length_tolerance: 1e-3,
            continuity_tolerance: Tolerance::CHAIN.linear,
            linear_tolerance: Tolerance::DEFAULT.linear,
        }
    }
}

impl TraversalSettings {
    /// Reject non-finite or negative values.
    pub fn validate(&self) -> GeometryResult<()> {
        let fields = [
            ("min_segment_length", self.min_segment_length),
            ("length_tolerance", self.length_tolerance),
            ("continuity_tolerance", self.continuity_tolerance),
            ("linear_tolerance", self.linear_tolerance),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(GeometryError::InvalidSettings(format!(
                    "{name} must be a non-negative finite number, got {value}"
                )));
            }
        }
        if self.linear_tolerance == 0.0 {
            return Err(GeometryError::InvalidSettings("linear_tolerance must be positive".into()));
        }
        Ok(())
    }

    /// Tolerance for on-curve tests.
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::DEFAULT.with_linear(self.linear_tolerance)
    }
}
