//! Uniform sampling inside bounded regions and the rejection loop used for
//! scenario placement.
//!
//! Model
//! - Boxes and rectangles are sampled directly in their local frame.
//! - Balls, polyhedra and polygons are sampled by rejection from an
//!   axis-aligned bounding box (local for polygons).
//! - `Intersection` samples its first bounded member and rejects against all
//!   members.
//! - Determinism comes from the caller's RNG (`StdRng::seed_from_u64` in tests).

use nalgebra::{DVector, Vector2};
use rand::Rng;
use tracing::{debug, warn};

use crate::contains::contains_point;
use crate::frames::local_to_world;
use crate::regions::Region;
use crate::vectors::{rotate_euler, Vector3D};

/// Sampler configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleCfg {
    /// Cap on rejection-sampling draws per call.
    pub max_attempts: usize,
}

impl Default for SampleCfg {
    fn default() -> Self {
        Self { max_attempts: 1000 }
    }
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}

fn bounding_box(points: impl IntoIterator<Item = DVector<f64>>) -> Option<(DVector<f64>, DVector<f64>)> {
    let mut it = points.into_iter();
    let first = it.next()?;
    let (mut lo, mut hi) = (first.clone(), first);
    for p in it {
        lo = lo.inf(&p);
        hi = hi.sup(&p);
    }
    Some((lo, hi))
}

fn draw_in_box<R: Rng + ?Sized>(rng: &mut R, lo: &DVector<f64>, hi: &DVector<f64>) -> DVector<f64> {
    DVector::from_fn(lo.len(), |i, _| uniform(rng, lo[i], hi[i]))
}

fn is_bounded(region: &Region) -> bool {
    match region {
        Region::All | Region::Empty | Region::HalfSpace(_) => false,
        Region::Intersection(inter) => inter.regions().iter().any(is_bounded),
        _ => true,
    }
}

/// Draw a point uniformly from `region`.
///
/// Returns `None` for `All`, `Empty`, `HalfSpace`, and when rejection sampling
/// runs out of attempts (e.g. a flat polyhedron).
pub fn sample_point<R: Rng + ?Sized>(region: &Region, rng: &mut R, cfg: &SampleCfg) -> Option<Vector3D> {
    match region {
        Region::All | Region::Empty | Region::HalfSpace(_) => None,
        Region::Cuboid(c) => {
            let h = c.half_extents();
            let local = Vector3D::new(
                uniform(rng, -h.x, h.x),
                uniform(rng, -h.y, h.y),
                uniform(rng, -h.z, h.z),
            );
            Some(rotate_euler(&local, c.rotation()) + c.position())
        }
        Region::Rectangle3D(r) => {
            let h = r.half_extents();
            let local = Vector2::new(uniform(rng, -h.x, h.x), uniform(rng, -h.y, h.y));
            Some(local_to_world(&local, r.position(), r.rotation()))
        }
        Region::Spherical(s) => {
            let r = s.radius();
            (0..cfg.max_attempts).find_map(|_| {
                let d = Vector3D::new(uniform(rng, -r, r), uniform(rng, -r, r), uniform(rng, -r, r));
                (d.norm_squared() <= r * r).then(|| s.center() + d)
            })
        }
        Region::ConvexPolyhedron(p) => {
            let hsi = p.hsi();
            let (lo, hi) = bounding_box(hsi.vertices().iter().cloned())?;
            (0..cfg.max_attempts).find_map(|_| {
                let x = draw_in_box(rng, &lo, &hi);
                hsi.contains_eps(&x, 0.0)
                    .then(|| Vector3D::new(x[0], x[1], x[2]))
            })
        }
        Region::ConvexPolygon3D(p) => {
            let hsi = p.hsi();
            let (lo, hi) = bounding_box(hsi.vertices().iter().cloned())?;
            (0..cfg.max_attempts).find_map(|_| {
                let x = draw_in_box(rng, &lo, &hi);
                hsi.contains_eps(&x, 0.0)
                    .then(|| local_to_world(&Vector2::new(x[0], x[1]), p.origin(), p.rotation()))
            })
        }
        Region::Intersection(inter) => {
            let members = inter.regions();
            let base = members.iter().find(|m| is_bounded(m))?;
            let once = SampleCfg { max_attempts: 1 };
            (0..cfg.max_attempts).find_map(|_| {
                let candidate = sample_point(base, rng, &once)?;
                members
                    .iter()
                    .all(|m| contains_point(m, &candidate))
                    .then_some(candidate)
            })
        }
    }
}

/// Accepted placement and how many candidates were rejected before it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub point: Vector3D,
    pub rejections: usize,
}

/// Rejection loop for scenario placement: draw from a domain, accept the first
/// candidate that every constraint region contains.
#[derive(Clone, Copy, Debug, Default)]
pub struct RejectionSampler {
    pub cfg: SampleCfg,
}

impl RejectionSampler {
    #[inline]
    pub fn new(cfg: SampleCfg) -> Self {
        Self { cfg }
    }

    pub fn sample<R: Rng + ?Sized>(
        &self,
        domain: &Region,
        constraints: &[Region],
        rng: &mut R,
    ) -> Option<Placement> {
        let mut rejections = 0usize;
        for _ in 0..self.cfg.max_attempts {
            let Some(point) = sample_point(domain, rng, &self.cfg) else {
                rejections += 1;
                continue;
            };
            if constraints.iter().all(|c| contains_point(c, &point)) {
                debug!(rejections, "placement accepted");
                return Some(Placement { point, rejections });
            }
            rejections += 1;
        }
        warn!(
            attempts = self.cfg.max_attempts,
            domain = %domain.kind(),
            constraints = constraints.len(),
            "no placement satisfied all constraints"
        );
        None
    }
}
