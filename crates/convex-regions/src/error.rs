//! Error types for region construction and intersection dispatch.
//!
//! Infeasible geometry is not an error: `intersect` reports it as
//! `Region::Empty`. Only malformed input and unregistered operand pairs fail.

use thiserror::Error;

use crate::hsi::HsiError;
use crate::regions::RegionKind;

/// Result type alias for region operations.
pub type RegionResult<T> = Result<T, RegionError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum RegionError {
    /// Malformed constructor arguments.
    #[error("invalid {kind} region: {reason}")]
    InvalidRegion { kind: RegionKind, reason: String },

    /// `intersect` has no rule for this ordered pair of variants.
    #[error("no intersection rule registered for ({left}, {right})")]
    NoIntersectionRule { left: RegionKind, right: RegionKind },

    /// The region has no half-space representation.
    #[error("{kind} region has no half-space representation")]
    NotPolytope { kind: RegionKind },

    /// A half-space representation was requested for a region that is empty
    /// inside the working volume.
    #[error("region is empty inside the working volume")]
    Infeasible,

    #[error("half-space intersection failed: {0}")]
    Hsi(HsiError),
}

impl RegionError {
    pub(crate) fn invalid(kind: RegionKind, reason: impl Into<String>) -> Self {
        RegionError::InvalidRegion {
            kind,
            reason: reason.into(),
        }
    }
}

impl From<HsiError> for RegionError {
    fn from(err: HsiError) -> Self {
        match err {
            HsiError::Infeasible => RegionError::Infeasible,
            other => RegionError::Hsi(other),
        }
    }
}
