//! Point membership and reducible region containment.
//!
//! All tests are closed: boundary points (within `CONTAINS_EPS`) count as inside.

use nalgebra::DVector;

use crate::frames::world_to_local;
use crate::regions::Region;
use crate::vectors::Vector3D;

/// Slack used by every membership test.
pub const CONTAINS_EPS: f64 = 1e-9;

/// Whether `p` lies in `region`.
pub fn contains_point(region: &Region, p: &Vector3D) -> bool {
    match region {
        Region::All => true,
        Region::Empty => false,
        Region::Spherical(s) => {
            let r = s.radius();
            (p - s.center()).norm_squared() <= r * r + CONTAINS_EPS
        }
        Region::HalfSpace(h) => h.evaluate(p) >= -CONTAINS_EPS,
        Region::Cuboid(c) => {
            let local = world_to_local(p, c.position(), c.rotation());
            let half = c.half_extents();
            (0..3).all(|i| local[i].abs() <= half[i] + CONTAINS_EPS)
        }
        Region::Rectangle3D(r) => {
            let local = world_to_local(p, r.position(), r.rotation());
            let half = r.half_extents();
            local.z.abs() <= CONTAINS_EPS
                && local.x.abs() <= half.x + CONTAINS_EPS
                && local.y.abs() <= half.y + CONTAINS_EPS
        }
        Region::ConvexPolyhedron(poly) => poly
            .hsi()
            .contains_eps(&DVector::from_column_slice(p.as_slice()), CONTAINS_EPS),
        Region::ConvexPolygon3D(poly) => {
            let local = world_to_local(p, poly.origin(), poly.rotation());
            local.z.abs() <= CONTAINS_EPS
                && poly
                    .hsi()
                    .contains_eps(&DVector::from_column_slice(&[local.x, local.y]), CONTAINS_EPS)
        }
        Region::Intersection(inter) => inter.regions().iter().all(|r| contains_point(r, p)),
    }
}

/// Finite point set whose convex hull is `region`, when there is one.
fn defining_points(region: &Region) -> Option<Vec<Vector3D>> {
    match region {
        Region::Spherical(s) if s.radius() == 0.0 => Some(vec![*s.center()]),
        Region::Cuboid(c) => Some(c.corners()),
        Region::Rectangle3D(r) => Some(r.corners()),
        Region::ConvexPolyhedron(p) => Some(
            p.hsi()
                .vertices()
                .iter()
                .map(|v| Vector3D::new(v[0], v[1], v[2]))
                .collect(),
        ),
        Region::ConvexPolygon3D(p) => Some(p.vertices_world()),
        _ => None,
    }
}

/// Whether `outer` contains all of `inner`.
///
/// Defined only where it reduces to point containment: every region here is
/// convex, so containing the defining points of a polytope-like `inner` is
/// enough. Returns `None` when no such reduction exists.
///
/// Polyhedron vertices include the working-volume clip, so an `inner`
/// polyhedron that is unbounded in some direction is judged by its clipped part.
pub fn contains(outer: &Region, inner: &Region) -> Option<bool> {
    match (outer, inner) {
        (_, Region::Empty) => Some(true),
        (Region::All, _) => Some(true),
        (Region::Empty, _) => Some(false),
        (_, Region::All) => None,
        _ => {
            let points = defining_points(inner)?;
            Some(points.iter().all(|p| contains_point(outer, p)))
        }
    }
}

impl Region {
    /// Method form of [`contains_point`].
    #[inline]
    pub fn contains_point(&self, p: &Vector3D) -> bool {
        contains_point(self, p)
    }

    /// Method form of [`contains`].
    #[inline]
    pub fn contains(&self, inner: &Region) -> Option<bool> {
        contains(self, inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hsi::{Hs, Hsi, HsiCfg};
    use crate::regions::{
        ConvexPolygon3D, ConvexPolyhedron, Cuboid, HalfSpace, Intersection, Rectangle3D,
        Spherical,
    };
    use nalgebra::vector;
    use std::f64::consts::FRAC_PI_4;

    fn zero() -> Vector3D {
        Vector3D::zeros()
    }

    fn unit_square_polygon(origin: Vector3D, rot: Vector3D) -> Region {
        let hsi = Hsi::new(
            2,
            &[
                Hs::from_slice(&[1.0, 0.0], 1.0),
                Hs::from_slice(&[-1.0, 0.0], 0.0),
                Hs::from_slice(&[0.0, 1.0], 1.0),
                Hs::from_slice(&[0.0, -1.0], 0.0),
            ],
            &HsiCfg::default(),
        )
        .unwrap();
        ConvexPolygon3D::new(hsi, origin, rot).unwrap().into()
    }

    #[test]
    fn all_and_empty() {
        assert!(contains_point(&Region::All, &vector![1e9, 0.0, 0.0]));
        assert!(!contains_point(&Region::Empty, &zero()));
    }

    #[test]
    fn sphere_boundary_is_inside() {
        let s: Region = Spherical::new(vector![1.0, 1.0, 1.0], 2.0).unwrap().into();
        assert!(s.contains_point(&vector![3.0, 1.0, 1.0]));
        assert!(!s.contains_point(&vector![3.1, 1.0, 1.0]));
    }

    #[test]
    fn halfspace_membership() {
        let h: Region = HalfSpace::new(vector![0.0, 1.0, 0.0], vector![0.0, 1.0, 0.0])
            .unwrap()
            .into();
        assert!(h.contains_point(&vector![5.0, 1.0, -3.0]));
        assert!(h.contains_point(&vector![0.0, 7.0, 0.0]));
        assert!(!h.contains_point(&vector![0.0, 0.99, 0.0]));
    }

    #[test]
    fn rotated_cuboid_membership() {
        // 2x2x2 cube turned 45° about z: its corner direction reaches sqrt(2)
        let c: Region = Cuboid::new(zero(), vector![0.0, 0.0, FRAC_PI_4], 2.0, 2.0, 2.0)
            .unwrap()
            .into();
        assert!(c.contains_point(&vector![1.4, 0.0, 0.0]));
        assert!(!c.contains_point(&vector![1.0, 1.0, 0.0]));
        assert!(!c.contains_point(&vector![0.0, 0.0, 1.01]));
    }

    #[test]
    fn rectangle_requires_in_plane_points() {
        let r: Region = Rectangle3D::new(2.0, 2.0, vector![0.0, 0.0, 1.0], zero())
            .unwrap()
            .into();
        assert!(r.contains_point(&vector![0.5, -1.0, 1.0]));
        assert!(!r.contains_point(&vector![0.5, 0.5, 1.001]));
        assert!(!r.contains_point(&vector![1.5, 0.0, 1.0]));
    }

    #[test]
    fn polygon_membership_uses_local_frame() {
        // quarter turn about x: local (u, v) maps to world (u, 0, v) + origin
        let p = unit_square_polygon(vector![0.0, 2.0, 0.0], vector![std::f64::consts::FRAC_PI_2, 0.0, 0.0]);
        assert!(p.contains_point(&vector![0.5, 2.0, 0.5]));
        assert!(!p.contains_point(&vector![0.5, 2.1, 0.5]));
        assert!(!p.contains_point(&vector![0.5, 2.0, 1.5]));
    }

    #[test]
    fn polyhedron_and_intersection_membership() {
        let cfg = HsiCfg::default();
        let cube: Region = Cuboid::new(zero(), zero(), 2.0, 2.0, 2.0).unwrap().into();
        let poly: Region = ConvexPolyhedron::new(crate::frames::to_hsi(&cube, &cfg).unwrap())
            .unwrap()
            .into();
        assert!(poly.contains_point(&vector![1.0, -1.0, 0.0]));
        assert!(!poly.contains_point(&vector![1.1, 0.0, 0.0]));

        let half: Region = HalfSpace::new(zero(), vector![1.0, 0.0, 0.0]).unwrap().into();
        let both: Region = Intersection::new(vec![poly, half]).unwrap().into();
        assert!(both.contains_point(&vector![0.5, 0.0, 0.0]));
        assert!(!both.contains_point(&vector![-0.5, 0.0, 0.0]));
    }

    #[test]
    fn region_containment_reduces_to_points() {
        let big: Region = Cuboid::new(zero(), zero(), 4.0, 4.0, 4.0).unwrap().into();
        let small: Region = Cuboid::new(vector![0.5, 0.0, 0.0], vector![0.3, 0.2, 0.1], 1.0, 1.0, 1.0)
            .unwrap()
            .into();
        let sphere: Region = Spherical::new(zero(), 1.0).unwrap().into();
        let point: Region = Spherical::new(vector![1.9, 0.0, 0.0], 0.0).unwrap().into();
        assert_eq!(contains(&big, &small), Some(true));
        assert_eq!(contains(&small, &big), Some(false));
        assert_eq!(contains(&big, &point), Some(true));
        assert_eq!(contains(&big, &sphere), None);
        assert_eq!(contains(&sphere, &Region::Empty), Some(true));
        assert_eq!(contains(&Region::All, &sphere), Some(true));
        assert_eq!(contains(&Region::Empty, &small), Some(false));
        assert_eq!(contains(&big, &Region::All), None);

        let sq = unit_square_polygon(zero(), zero());
        assert_eq!(big.contains(&sq), Some(true));
    }
}
