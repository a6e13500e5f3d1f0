//! Pairwise intersection, dispatched on the variant tags of both operands.
//!
//! Rules live in a static table keyed by `(left, right)` slot patterns and are
//! tried in order; the first match wins. Order matters only for the identity
//! and absorbing rules: `Empty` is listed before `All`, so `(All, Empty)` is
//! `Empty`. A pair with no entry fails with `RegionError::NoIntersectionRule`.
//! The table is not assumed to be symmetric; each ordered pair is registered
//! on its own.

use tracing::debug;

use crate::error::{RegionError, RegionResult};
use crate::frames::{halfspace_to_plane, PlaneCut};
use crate::hsi::{Hsi, HsiCfg, HsiError};
use crate::regions::{ConvexPolygon3D, ConvexPolyhedron, Region, RegionKind};

type RuleFn = fn(&Region, &Region, &HsiCfg) -> RegionResult<Region>;

/// Operand pattern of a rule.
#[derive(Clone, Copy, Debug)]
enum Slot {
    Any,
    Is(RegionKind),
}

impl Slot {
    #[inline]
    fn matches(self, kind: RegionKind) -> bool {
        match self {
            Slot::Any => true,
            Slot::Is(k) => k == kind,
        }
    }
}

struct Rule {
    left: Slot,
    right: Slot,
    name: &'static str,
    apply: RuleFn,
}

const fn rule(left: Slot, right: Slot, name: &'static str, apply: RuleFn) -> Rule {
    Rule {
        left,
        right,
        name,
        apply,
    }
}

use RegionKind as K;
use Slot::{Any, Is};

static RULES: &[Rule] = &[
    rule(Is(K::Empty), Any, "empty-left", empty),
    rule(Any, Is(K::Empty), "empty-right", empty),
    rule(Is(K::All), Any, "all-left", keep_right),
    rule(Any, Is(K::All), "all-right", keep_left),
    rule(
        Is(K::HalfSpace),
        Is(K::HalfSpace),
        "halfspace-halfspace",
        halfspace_halfspace,
    ),
    rule(
        Is(K::HalfSpace),
        Is(K::ConvexPolyhedron),
        "halfspace-polyhedron",
        halfspace_polyhedron,
    ),
    rule(
        Is(K::ConvexPolyhedron),
        Is(K::HalfSpace),
        "polyhedron-halfspace",
        polyhedron_halfspace,
    ),
    rule(
        Is(K::ConvexPolyhedron),
        Is(K::ConvexPolyhedron),
        "polyhedron-polyhedron",
        polyhedron_polyhedron,
    ),
    rule(
        Is(K::HalfSpace),
        Is(K::ConvexPolygon3D),
        "halfspace-polygon",
        halfspace_polygon,
    ),
    rule(
        Is(K::ConvexPolygon3D),
        Is(K::HalfSpace),
        "polygon-halfspace",
        polygon_halfspace,
    ),
];

fn no_rule(a: &Region, b: &Region) -> RegionError {
    RegionError::NoIntersectionRule {
        left: a.kind(),
        right: b.kind(),
    }
}

/// Map a solver outcome to a region; infeasible reads as `Empty`.
fn feasible_or_empty(
    solved: Result<Hsi, HsiError>,
    wrap: impl FnOnce(Hsi) -> RegionResult<Region>,
) -> RegionResult<Region> {
    match solved {
        Ok(hsi) => wrap(hsi),
        Err(HsiError::Infeasible) => Ok(Region::Empty),
        Err(e) => Err(e.into()),
    }
}

fn polyhedron(hsi: Hsi) -> RegionResult<Region> {
    Ok(Region::ConvexPolyhedron(ConvexPolyhedron::new(hsi)?))
}

fn empty(_: &Region, _: &Region, _: &HsiCfg) -> RegionResult<Region> {
    Ok(Region::Empty)
}

fn keep_left(a: &Region, _: &Region, _: &HsiCfg) -> RegionResult<Region> {
    Ok(a.clone())
}

fn keep_right(_: &Region, b: &Region, _: &HsiCfg) -> RegionResult<Region> {
    Ok(b.clone())
}

fn halfspace_halfspace(a: &Region, b: &Region, cfg: &HsiCfg) -> RegionResult<Region> {
    let (Region::HalfSpace(h1), Region::HalfSpace(h2)) = (a, b) else {
        return Err(no_rule(a, b));
    };
    feasible_or_empty(Hsi::new(3, &[h1.to_hs(), h2.to_hs()], cfg), polyhedron)
}

fn halfspace_polyhedron(a: &Region, b: &Region, cfg: &HsiCfg) -> RegionResult<Region> {
    let (Region::HalfSpace(h), Region::ConvexPolyhedron(p)) = (a, b) else {
        return Err(no_rule(a, b));
    };
    feasible_or_empty(p.hsi().with_halfspace(h.to_hs(), cfg), polyhedron)
}

fn polyhedron_halfspace(a: &Region, b: &Region, cfg: &HsiCfg) -> RegionResult<Region> {
    halfspace_polyhedron(b, a, cfg)
}

fn polyhedron_polyhedron(a: &Region, b: &Region, cfg: &HsiCfg) -> RegionResult<Region> {
    let (Region::ConvexPolyhedron(p1), Region::ConvexPolyhedron(p2)) = (a, b) else {
        return Err(no_rule(a, b));
    };
    feasible_or_empty(p1.hsi().intersect(p2.hsi(), cfg), polyhedron)
}

fn halfspace_polygon(a: &Region, b: &Region, cfg: &HsiCfg) -> RegionResult<Region> {
    let (Region::HalfSpace(h), Region::ConvexPolygon3D(p)) = (a, b) else {
        return Err(no_rule(a, b));
    };
    match halfspace_to_plane(h, p.origin(), p.rotation(), cfg.eps_feas) {
        PlaneCut::Everywhere => Ok(b.clone()),
        PlaneCut::Nowhere => Ok(Region::Empty),
        PlaneCut::Line(line) => feasible_or_empty(p.hsi().with_halfspace(line, cfg), |hsi| {
            Ok(Region::ConvexPolygon3D(ConvexPolygon3D::new(
                hsi,
                *p.origin(),
                *p.rotation(),
            )?))
        }),
    }
}

fn polygon_halfspace(a: &Region, b: &Region, cfg: &HsiCfg) -> RegionResult<Region> {
    halfspace_polygon(b, a, cfg)
}

/// Intersection dispatcher with its solver configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Intersector {
    pub cfg: HsiCfg,
}

impl Intersector {
    #[inline]
    pub fn new(cfg: HsiCfg) -> Self {
        Self { cfg }
    }

    /// Whether a rule is registered for the ordered pair `(left, right)`.
    pub fn has_rule(left: RegionKind, right: RegionKind) -> bool {
        RULES
            .iter()
            .any(|r| r.left.matches(left) && r.right.matches(right))
    }

    /// Intersect `a` with `b`.
    ///
    /// Returns a new region (possibly `Empty`), or
    /// `RegionError::NoIntersectionRule` for an unregistered ordered pair.
    pub fn intersect(&self, a: &Region, b: &Region) -> RegionResult<Region> {
        let (ka, kb) = (a.kind(), b.kind());
        let Some(rule) = RULES
            .iter()
            .find(|r| r.left.matches(ka) && r.right.matches(kb))
        else {
            debug!(left = %ka, right = %kb, "no intersection rule");
            return Err(no_rule(a, b));
        };
        let out = (rule.apply)(a, b, &self.cfg)?;
        debug!(
            left = %ka,
            right = %kb,
            rule = rule.name,
            result = %out.kind(),
            "intersected regions"
        );
        Ok(out)
    }
}

/// Intersect with the default solver configuration.
#[inline]
pub fn intersect(a: &Region, b: &Region) -> RegionResult<Region> {
    Intersector::default().intersect(a, b)
}
