//! Basic HSI types and tolerances.
//!
//! - `HsiCfg`: centralizes epsilons and the working-volume bound.
//! - `Hs`: closed half-space `n·x <= c` in R^d with helper predicates.
//! - `Hsi`: a feasible half-space intersection (constraints, Chebyshev centre,
//!   vertices, facets).
//! - `HsiError`: failure signals of the backend.

use nalgebra::DVector;
use thiserror::Error;

/// Tightness threshold for "near-active" constraints during vertex/facet enumeration.
pub(crate) const TIGHT_EPS: f64 = 1e-7;

/// Solver configuration (tolerances and working volume).
///
/// The working volume is the box `|x_i| <= bound`. Intersections that are only
/// non-empty outside of it are reported as infeasible. This is a finite-domain
/// approximation; raise `bound` when scenes are larger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HsiCfg {
    pub eps_det: f64,
    pub eps_feas: f64,
    pub bound: f64,
}

impl Default for HsiCfg {
    fn default() -> Self {
        Self {
            eps_det: 1e-12,
            eps_feas: 1e-9,
            bound: 1000.0,
        }
    }
}

impl HsiCfg {
    #[inline]
    pub fn with_bound(self, bound: f64) -> Self {
        Self { bound, ..self }
    }

    #[inline]
    pub fn with_eps_feas(self, eps_feas: f64) -> Self {
        Self { eps_feas, ..self }
    }
}

/// Closed half-space `n · x <= c` (no normalization required here).
#[derive(Clone, Debug, PartialEq)]
pub struct Hs {
    pub n: DVector<f64>,
    pub c: f64,
}

impl Hs {
    #[inline]
    pub fn new(n: DVector<f64>, c: f64) -> Self {
        Self { n, c }
    }

    /// Build from a normal given as a slice.
    #[inline]
    pub fn from_slice(n: &[f64], c: f64) -> Self {
        Self::new(DVector::from_column_slice(n), c)
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.n.len()
    }

    /// Signed slack `c - n·p`; non-negative inside.
    #[inline]
    pub fn slack(&self, p: &DVector<f64>) -> f64 {
        self.c - self.n.dot(p)
    }

    #[inline]
    pub fn satisfies_eps(&self, p: &DVector<f64>, eps: f64) -> bool {
        self.n.dot(p) <= self.c + eps
    }

    /// Unit-normal copy, or `None` for a zero or non-finite normal.
    pub fn canonical(&self) -> Option<Hs> {
        let norm = self.n.norm();
        if !norm.is_finite() || norm <= 0.0 || !self.c.is_finite() {
            return None;
        }
        Some(Hs::new(&self.n / norm, self.c / norm))
    }
}

/// Where a facet of the solved polytope comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FacetSource {
    /// Index into `Hsi::halfspaces`.
    Constraint(usize),
    /// A face of the working-volume box.
    WorkingVolume,
}

/// Facet: one saturated inequality and the indices of its incident vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct Facet {
    pub source: FacetSource,
    pub vertices: Vec<usize>,
}

/// Feasible half-space intersection.
///
/// Invariants:
/// - `halfspaces` have unit normals, parallel duplicates coalesced.
/// - `interior_point` satisfies every constraint with slack `radius >= -eps_feas`.
/// - `vertices`/`facets` describe the polytope clipped to the working volume;
///   in 2D the vertices are in counter-clockwise order.
#[derive(Clone, Debug, PartialEq)]
pub struct Hsi {
    pub(crate) dim: usize,
    pub(crate) halfspaces: Vec<Hs>,
    pub(crate) interior_point: DVector<f64>,
    pub(crate) radius: f64,
    pub(crate) vertices: Vec<DVector<f64>>,
    pub(crate) facets: Vec<Facet>,
}

impl Hsi {
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn halfspaces(&self) -> &[Hs] {
        &self.halfspaces
    }

    #[inline]
    pub fn interior_point(&self) -> &DVector<f64> {
        &self.interior_point
    }

    /// Radius of the largest ball (clipped to the working volume) inside the region.
    /// Zero for flat results that were accepted within tolerance.
    #[inline]
    pub fn chebyshev_radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn vertices(&self) -> &[DVector<f64>] {
        &self.vertices
    }

    #[inline]
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Membership against the stored constraints only (the working volume is not
    /// part of the region).
    #[inline]
    pub fn contains_eps(&self, p: &DVector<f64>, eps: f64) -> bool {
        p.len() == self.dim && self.halfspaces.iter().all(|h| h.satisfies_eps(p, eps))
    }
}

/// Failure signals of the HSI backend.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum HsiError {
    #[error("half-space intersection needs at least one dimension")]
    ZeroDimension,
    #[error("half-space has dimension {found}, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("half-space normal is zero or not finite")]
    DegenerateNormal,
    #[error("half-spaces have no common interior point inside the working volume")]
    Infeasible,
}
