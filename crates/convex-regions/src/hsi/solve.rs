//! Interior-point search and polytope enumeration.
//!
//! - `halfspace_intersection`: canonicalize constraints, find the Chebyshev
//!   centre inside the working volume, then enumerate vertices and facets.
//! - The Chebyshev LP `max r s.t. n_i·x + r <= c_i` is solved exactly by
//!   enumerating `(d+1)`-tuples of active constraints, the same way H→V
//!   conversion enumerates `d`-tuples. Iteration counts are `C(m, d+1)` and
//!   `C(m, d)`, so both terminate on degenerate input.

use nalgebra::{DMatrix, DVector};
use tracing::{debug, trace};

use super::types::{Facet, FacetSource, Hs, Hsi, HsiCfg, HsiError, TIGHT_EPS};
use super::util::{dedup_points_in_place, for_each_combination, order_ccw, push_or_coalesce};

/// Solve a half-space intersection in R^`dim`.
///
/// Returns `HsiError::Infeasible` when no point satisfies all constraints
/// (within `cfg.eps_feas`) inside the working volume.
pub fn halfspace_intersection(dim: usize, hs: &[Hs], cfg: &HsiCfg) -> Result<Hsi, HsiError> {
    if dim == 0 {
        return Err(HsiError::ZeroDimension);
    }
    let mut constraints: Vec<Hs> = Vec::with_capacity(hs.len());
    for h in hs {
        if h.dim() != dim {
            return Err(HsiError::DimensionMismatch {
                expected: dim,
                found: h.dim(),
            });
        }
        let unit = h.canonical().ok_or(HsiError::DegenerateNormal)?;
        push_or_coalesce(&mut constraints, unit);
    }
    let rows = with_working_volume(&constraints, dim, cfg.bound);
    let (interior_point, radius) =
        chebyshev_center(&rows, dim, cfg).ok_or(HsiError::Infeasible)?;
    if radius < -cfg.eps_feas {
        debug!(
            dim,
            constraints = constraints.len(),
            radius,
            "half-space intersection is infeasible"
        );
        return Err(HsiError::Infeasible);
    }
    // Accepted within tolerance: report touching regions as flat, never negative.
    let radius = radius.max(0.0);

    let mut vertices = h_to_vertices(&rows, dim, cfg);
    if dim == 2 {
        order_ccw(&mut vertices);
    }
    let facets = enumerate_facets(&rows, constraints.len(), &vertices, dim);
    debug!(
        dim,
        constraints = constraints.len(),
        vertices = vertices.len(),
        facets = facets.len(),
        radius,
        "half-space intersection is feasible"
    );
    Ok(Hsi {
        dim,
        halfspaces: constraints,
        interior_point,
        radius,
        vertices,
        facets,
    })
}

impl Hsi {
    /// Solve from scratch; see [`halfspace_intersection`].
    #[inline]
    pub fn new(dim: usize, hs: &[Hs], cfg: &HsiCfg) -> Result<Self, HsiError> {
        halfspace_intersection(dim, hs, cfg)
    }

    /// Return a new intersection with one additional constraint applied.
    pub fn with_halfspace(&self, h: Hs, cfg: &HsiCfg) -> Result<Self, HsiError> {
        let mut hs = self.halfspaces.clone();
        hs.push(h);
        halfspace_intersection(self.dim, &hs, cfg)
    }

    /// Intersect with another HSI of the same dimension (concatenate constraints).
    pub fn intersect(&self, other: &Hsi, cfg: &HsiCfg) -> Result<Self, HsiError> {
        if other.dim != self.dim {
            return Err(HsiError::DimensionMismatch {
                expected: self.dim,
                found: other.dim,
            });
        }
        let mut hs = self.halfspaces.clone();
        hs.extend(other.halfspaces.iter().cloned());
        halfspace_intersection(self.dim, &hs, cfg)
    }
}

/// Append the working-volume box `|x_i| <= bound` after the caller's constraints.
fn with_working_volume(constraints: &[Hs], dim: usize, bound: f64) -> Vec<Hs> {
    let mut rows = Vec::with_capacity(constraints.len() + 2 * dim);
    rows.extend(constraints.iter().cloned());
    for i in 0..dim {
        let e = DVector::from_fn(dim, |j, _| if i == j { 1.0 } else { 0.0 });
        rows.push(Hs::new(e.clone(), bound));
        rows.push(Hs::new(-e, bound));
    }
    rows
}

fn solve_square(a: &DMatrix<f64>, b: &DVector<f64>, eps_det: f64) -> Option<DVector<f64>> {
    let lu = a.clone().lu();
    if lu.determinant().abs() < eps_det {
        return None;
    }
    lu.solve(b)
}

/// Chebyshev centre over unit-normal rows: maximize `r` with `n_i·x + r <= c_i`.
///
/// The LP is bounded above by the working volume and pointed, so the optimum is
/// attained where `d+1` rows are active. Ties keep the first tuple found.
fn chebyshev_center(rows: &[Hs], dim: usize, cfg: &HsiCfg) -> Option<(DVector<f64>, f64)> {
    let k = dim + 1;
    let mut a = DMatrix::zeros(k, k);
    let mut b = DVector::zeros(k);
    let mut best: Option<(DVector<f64>, f64)> = None;
    let mut tuples = 0usize;
    for_each_combination(rows.len(), k, |comb| {
        tuples += 1;
        for (r, &i) in comb.iter().enumerate() {
            for j in 0..dim {
                a[(r, j)] = rows[i].n[j];
            }
            a[(r, dim)] = 1.0;
            b[r] = rows[i].c;
        }
        let Some(y) = solve_square(&a, &b, cfg.eps_det) else {
            return;
        };
        let x: DVector<f64> = y.rows(0, dim).into_owned();
        let r = y[dim];
        if !rows.iter().all(|h| h.n.dot(&x) + r <= h.c + cfg.eps_feas) {
            return;
        }
        if best.as_ref().map_or(true, |(_, br)| r > *br + cfg.eps_det) {
            best = Some((x, r));
        }
    });
    trace!(
        rows = rows.len(),
        tuples,
        radius = best.as_ref().map(|(_, r)| *r),
        "chebyshev centre search"
    );
    best
}

/// H→V: enumerate all `dim`-tuples of rows, solve equalities, test feasibility.
fn h_to_vertices(rows: &[Hs], dim: usize, cfg: &HsiCfg) -> Vec<DVector<f64>> {
    let mut out = Vec::new();
    let mut a = DMatrix::zeros(dim, dim);
    let mut b = DVector::zeros(dim);
    for_each_combination(rows.len(), dim, |comb| {
        for (r, &i) in comb.iter().enumerate() {
            for j in 0..dim {
                a[(r, j)] = rows[i].n[j];
            }
            b[r] = rows[i].c;
        }
        if let Some(x) = solve_square(&a, &b, cfg.eps_det) {
            if rows.iter().all(|h| h.satisfies_eps(&x, TIGHT_EPS)) {
                out.push(x);
            }
        }
    });
    dedup_points_in_place(&mut out, TIGHT_EPS);
    out
}

/// Facets from saturation sets: every row with at least `dim` incident vertices.
fn enumerate_facets(
    rows: &[Hs],
    n_constraints: usize,
    vertices: &[DVector<f64>],
    dim: usize,
) -> Vec<Facet> {
    rows.iter()
        .enumerate()
        .filter_map(|(i, h)| {
            let incident: Vec<usize> = vertices
                .iter()
                .enumerate()
                .filter(|(_, v)| h.slack(v).abs() <= TIGHT_EPS)
                .map(|(j, _)| j)
                .collect();
            if incident.len() < dim {
                return None;
            }
            let source = if i < n_constraints {
                FacetSource::Constraint(i)
            } else {
                FacetSource::WorkingVolume
            };
            Some(Facet {
                source,
                vertices: incident,
            })
        })
        .collect()
}
