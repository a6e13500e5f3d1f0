//! Surface consumed by the scenario/placement layer.
//!
//! The scenario layer turns poses into `Vector3D` and constraint declarations
//! into `Region` values, then only needs the calls below. Everything else in
//! the crate is reachable but considered internal.

pub use crate::contains::{contains, contains_point};
pub use crate::error::{RegionError, RegionResult};
pub use crate::frames::to_hsi;
pub use crate::hsi::{Hsi, HsiCfg};
pub use crate::intersect::{intersect, Intersector};
pub use crate::regions::{Region, RegionKind};
pub use crate::sample::{Placement, RejectionSampler, SampleCfg};
pub use crate::vectors::Vector3D;

/// Whether a candidate placement satisfies every constraint.
pub fn satisfies_all(constraints: &[Region], p: &Vector3D) -> bool {
    constraints.iter().all(|r| contains_point(r, p))
}

/// Fold `intersect` over constraints, starting from `Region::All`.
///
/// Stops at the first unregistered pair; once the running result is `Empty`
/// the remaining constraints are still dispatched (and absorbed).
pub fn intersect_all(intersector: &Intersector, constraints: &[Region]) -> RegionResult<Region> {
    constraints
        .iter()
        .try_fold(Region::All, |acc, r| intersector.intersect(&acc, r))
}
