//! Half-space intersection backend (dimension 2 or 3, runtime-sized).
//!
//! Purpose
//! - Turn a finite set of closed half-spaces `n·x <= c` into either a feasible
//!   polytope description (unit constraints, interior point, vertices, facets)
//!   or an explicit `HsiError::Infeasible`.
//! - Keep the numerics explicit: every comparison uses `HsiCfg` tolerances, and
//!   boundary-touching constraints count as satisfied.
//!
//! Working volume
//! - Half-spaces alone may describe unbounded sets, so each solve is clipped to
//!   the box `|x_i| <= HsiCfg::bound`. A pair that only intersects outside that
//!   box reads as infeasible.

mod solve;
mod types;
mod util;

pub use solve::halfspace_intersection;
pub use types::{Facet, FacetSource, Hs, Hsi, HsiCfg, HsiError};

#[cfg(test)]
mod tests;
