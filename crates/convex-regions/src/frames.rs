//! Frame transforms between world space and local planes/boxes, and the bridge
//! from bounded primitives to half-space intersections (`to_hsi`).
//!
//! Push-forward of a constraint follows the usual derivation: with `n·x <= c`
//! and `x = R y + t`, the constraint in `y` reads `(Rᵀ n)·y <= c - n·t`.

use nalgebra::{DVector, Vector2};
use tracing::trace;

use crate::error::{RegionError, RegionResult};
use crate::hsi::{Hs, Hsi, HsiCfg};
use crate::regions::{Cuboid, HalfSpace, Rectangle3D, Region};
use crate::vectors::{rotate_euler, rotate_euler_inverse, rotation_matrix, Vector3D};

/// Map a local plane point `(u, v)` to world space.
#[inline]
pub fn local_to_world(p: &Vector2<f64>, origin: &Vector3D, rotation: &Vector3D) -> Vector3D {
    rotate_euler(&Vector3D::new(p.x, p.y, 0.0), rotation) + origin
}

/// Map a world point into the local frame; `z` is the signed offset from the plane.
#[inline]
pub fn world_to_local(p: &Vector3D, origin: &Vector3D, rotation: &Vector3D) -> Vector3D {
    rotate_euler_inverse(&(p - origin), rotation)
}

/// A 3D half-space restricted to a plane.
#[derive(Clone, Debug, PartialEq)]
pub enum PlaneCut {
    /// The plane lies entirely inside the half-space.
    Everywhere,
    /// The plane lies entirely outside the half-space.
    Nowhere,
    /// A 2D constraint `n·(u, v) <= c` in the plane's local frame.
    Line(Hs),
}

/// Restrict `hs` to the plane through `origin` oriented by `rotation`.
///
/// If the boundary is parallel to the plane the cut is decided by evaluating the
/// half-space at `origin` (with `eps` slack).
pub fn halfspace_to_plane(
    hs: &HalfSpace,
    origin: &Vector3D,
    rotation: &Vector3D,
    eps: f64,
) -> PlaneCut {
    // (R(u,v,0) + o - q)·m >= 0  <=>  -(Rᵀm)_xy·(u,v) <= (o - q)·m
    let local_normal = rotate_euler_inverse(hs.normal(), rotation);
    let in_plane = Vector2::new(local_normal.x, local_normal.y);
    let at_origin = hs.evaluate(origin);
    if in_plane.norm() <= eps * hs.normal().norm() {
        trace!(at_origin, "half-space boundary is parallel to the plane");
        return if at_origin >= -eps {
            PlaneCut::Everywhere
        } else {
            PlaneCut::Nowhere
        };
    }
    PlaneCut::Line(Hs::new(
        DVector::from_column_slice((-in_plane).as_slice()),
        at_origin,
    ))
}

/// The six bounding half-spaces of a cuboid in world coordinates.
pub fn cuboid_halfspaces(cuboid: &Cuboid) -> Vec<Hs> {
    let rot = rotation_matrix(cuboid.rotation());
    let half = cuboid.half_extents();
    let mut out = Vec::with_capacity(6);
    for axis in 0..3 {
        let mut e = Vector3D::zeros();
        e[axis] = 1.0;
        for sign in [1.0, -1.0] {
            let n = rot * (e * sign);
            let c = half[axis] + n.dot(cuboid.position());
            out.push(Hs::new(DVector::from_column_slice(n.as_slice()), c));
        }
    }
    out
}

/// The four bounding half-spaces of a rectangle in its local plane, solved.
pub fn rectangle_hsi(rect: &Rectangle3D, cfg: &HsiCfg) -> RegionResult<Hsi> {
    let half = rect.half_extents();
    let hs = [
        Hs::from_slice(&[1.0, 0.0], half.x),
        Hs::from_slice(&[-1.0, 0.0], half.x),
        Hs::from_slice(&[0.0, 1.0], half.y),
        Hs::from_slice(&[0.0, -1.0], half.y),
    ];
    Ok(Hsi::new(2, &hs, cfg)?)
}

/// Half-space representation of a polyhedral region.
///
/// 3D for `Cuboid`, `HalfSpace` and `ConvexPolyhedron`; 2D (in the local plane)
/// for `Rectangle3D` and `ConvexPolygon3D`. Regions without one fail with
/// `RegionError::NotPolytope`; a region that is empty inside the working volume
/// fails with `RegionError::Infeasible`.
pub fn to_hsi(region: &Region, cfg: &HsiCfg) -> RegionResult<Hsi> {
    match region {
        Region::Cuboid(c) => Ok(Hsi::new(3, &cuboid_halfspaces(c), cfg)?),
        Region::HalfSpace(h) => Ok(Hsi::new(3, &[h.to_hs()], cfg)?),
        Region::Rectangle3D(r) => rectangle_hsi(r, cfg),
        Region::ConvexPolyhedron(p) => Ok(p.hsi().clone()),
        Region::ConvexPolygon3D(p) => Ok(p.hsi().clone()),
        other => Err(RegionError::NotPolytope { kind: other.kind() }),
    }
}
