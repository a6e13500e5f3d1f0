//! Convex-region algebra for scenario placement constraints.
//!
//! Regions are immutable values (half-spaces, boxes, balls, planar polygons,
//! polyhedra, plus the universal and empty regions). The scenario layer builds
//! regions from its constraints, asks `contains_point` of candidate placements
//! and combines constraints with `intersect`, which dispatches on the variant
//! pair and falls back to an explicit error for unregistered pairs.
//!
//! Module map
//! - `vectors`: `Vector3D` and the Euler-angle convention.
//! - `hsi`: half-space intersection backend (interior point, vertices, facets).
//! - `regions`: variant types and validating constructors.
//! - `frames`: local/world frame transforms and `to_hsi`.
//! - `contains`: point membership and reducible region containment.
//! - `intersect`: the pairwise dispatcher.
//! - `sample`: uniform sampling and the placement rejection loop.
//!
//! Everything is pure and single-threaded; regions are `Send + Sync` and can
//! be shared across threads without synchronization.

pub mod api;
pub mod contains;
pub mod error;
pub mod frames;
pub mod hsi;
pub mod intersect;
pub mod regions;
pub mod sample;
pub mod vectors;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{RegionError, RegionResult};
pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};
pub use vectors::Vector3D;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::contains::{contains, contains_point};
    pub use crate::error::{RegionError, RegionResult};
    pub use crate::frames::{local_to_world, to_hsi, world_to_local};
    pub use crate::hsi::{Hs, Hsi, HsiCfg, HsiError};
    pub use crate::intersect::{intersect, Intersector};
    pub use crate::regions::{
        ConvexPolygon3D, ConvexPolyhedron, Cuboid, HalfSpace, Intersection, Rectangle3D, Region,
        RegionKind, Spherical,
    };
    pub use crate::sample::{sample_point, Placement, RejectionSampler, SampleCfg};
    pub use crate::vectors::{rotate_euler, rotate_euler_inverse, Vector3D};
}
