//! Region variants.
//!
//! All regions are immutable values. Constructors validate their arguments and
//! fail with `RegionError::InvalidRegion`; nothing mutates a region afterwards.

use std::fmt;

use nalgebra::{DVector, Vector2};

use crate::error::{RegionError, RegionResult};
use crate::hsi::{Hs, Hsi, HsiCfg};
use crate::vectors::{is_finite, rotate_euler, Vector3D};

/// Variant tag, used for dispatch and error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    All,
    Empty,
    Spherical,
    Cuboid,
    Rectangle3D,
    HalfSpace,
    ConvexPolyhedron,
    ConvexPolygon3D,
    Intersection,
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegionKind::All => "All",
            RegionKind::Empty => "Empty",
            RegionKind::Spherical => "Spherical",
            RegionKind::Cuboid => "Cuboid",
            RegionKind::Rectangle3D => "Rectangle3D",
            RegionKind::HalfSpace => "HalfSpace",
            RegionKind::ConvexPolyhedron => "ConvexPolyhedron",
            RegionKind::ConvexPolygon3D => "ConvexPolygon3D",
            RegionKind::Intersection => "Intersection",
        };
        f.write_str(name)
    }
}

/// A convex region of 3D space (or a finite bag of them).
#[derive(Clone, Debug, PartialEq)]
pub enum Region {
    /// Everything; identity for intersection.
    All,
    /// Nothing; absorbing for intersection.
    Empty,
    Spherical(Spherical),
    Cuboid(Cuboid),
    Rectangle3D(Rectangle3D),
    HalfSpace(HalfSpace),
    ConvexPolyhedron(ConvexPolyhedron),
    ConvexPolygon3D(ConvexPolygon3D),
    Intersection(Intersection),
}

impl Region {
    pub fn kind(&self) -> RegionKind {
        match self {
            Region::All => RegionKind::All,
            Region::Empty => RegionKind::Empty,
            Region::Spherical(_) => RegionKind::Spherical,
            Region::Cuboid(_) => RegionKind::Cuboid,
            Region::Rectangle3D(_) => RegionKind::Rectangle3D,
            Region::HalfSpace(_) => RegionKind::HalfSpace,
            Region::ConvexPolyhedron(_) => RegionKind::ConvexPolyhedron,
            Region::ConvexPolygon3D(_) => RegionKind::ConvexPolygon3D,
            Region::Intersection(_) => RegionKind::Intersection,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Region::Empty)
    }
}

macro_rules! impl_from_variant {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Region {
                #[inline]
                fn from(r: $ty) -> Self {
                    Region::$ty(r)
                }
            }
        )*
    };
}

impl_from_variant!(
    Spherical,
    Cuboid,
    Rectangle3D,
    HalfSpace,
    ConvexPolyhedron,
    ConvexPolygon3D,
    Intersection,
);

fn check_point(kind: RegionKind, what: &str, v: &Vector3D) -> RegionResult<()> {
    if is_finite(v) {
        Ok(())
    } else {
        Err(RegionError::invalid(kind, format!("{what} is not finite")))
    }
}

fn check_extent(kind: RegionKind, what: &str, x: f64) -> RegionResult<()> {
    if x.is_finite() && x > 0.0 {
        Ok(())
    } else {
        Err(RegionError::invalid(
            kind,
            format!("{what} must be positive, got {x}"),
        ))
    }
}

/// Ball `|p - center| <= radius`.
#[derive(Clone, Debug, PartialEq)]
pub struct Spherical {
    center: Vector3D,
    radius: f64,
}

impl Spherical {
    pub fn new(center: Vector3D, radius: f64) -> RegionResult<Self> {
        check_point(RegionKind::Spherical, "center", &center)?;
        if !radius.is_finite() || radius < 0.0 {
            return Err(RegionError::invalid(
                RegionKind::Spherical,
                format!("radius must be non-negative, got {radius}"),
            ));
        }
        Ok(Self { center, radius })
    }

    #[inline]
    pub fn center(&self) -> &Vector3D {
        &self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Box centred at `position`, axis-aligned in its frame rotated by `rotation`.
///
/// `width`, `length` and `height` are full side lengths along local x, y, z.
#[derive(Clone, Debug, PartialEq)]
pub struct Cuboid {
    position: Vector3D,
    rotation: Vector3D,
    width: f64,
    length: f64,
    height: f64,
}

impl Cuboid {
    pub fn new(
        position: Vector3D,
        rotation: Vector3D,
        width: f64,
        length: f64,
        height: f64,
    ) -> RegionResult<Self> {
        let kind = RegionKind::Cuboid;
        check_point(kind, "position", &position)?;
        check_point(kind, "rotation", &rotation)?;
        check_extent(kind, "width", width)?;
        check_extent(kind, "length", length)?;
        check_extent(kind, "height", height)?;
        Ok(Self {
            position,
            rotation,
            width,
            length,
            height,
        })
    }

    #[inline]
    pub fn position(&self) -> &Vector3D {
        &self.position
    }

    #[inline]
    pub fn rotation(&self) -> &Vector3D {
        &self.rotation
    }

    #[inline]
    pub fn dimensions(&self) -> (f64, f64, f64) {
        (self.width, self.length, self.height)
    }

    #[inline]
    pub fn half_extents(&self) -> Vector3D {
        Vector3D::new(self.width, self.length, self.height) / 2.0
    }

    /// The eight corners in world coordinates.
    pub fn corners(&self) -> Vec<Vector3D> {
        let h = self.half_extents();
        let mut out = Vec::with_capacity(8);
        for sx in [-1.0, 1.0] {
            for sy in [-1.0, 1.0] {
                for sz in [-1.0, 1.0] {
                    let local = Vector3D::new(sx * h.x, sy * h.y, sz * h.z);
                    out.push(rotate_euler(&local, &self.rotation) + self.position);
                }
            }
        }
        out
    }
}

/// Zero-thickness rectangle centred at `position` in its local x/y plane.
///
/// `width` runs along local x, `length` along local y.
#[derive(Clone, Debug, PartialEq)]
pub struct Rectangle3D {
    width: f64,
    length: f64,
    position: Vector3D,
    rotation: Vector3D,
}

impl Rectangle3D {
    pub fn new(
        width: f64,
        length: f64,
        position: Vector3D,
        rotation: Vector3D,
    ) -> RegionResult<Self> {
        let kind = RegionKind::Rectangle3D;
        check_extent(kind, "width", width)?;
        check_extent(kind, "length", length)?;
        check_point(kind, "position", &position)?;
        check_point(kind, "rotation", &rotation)?;
        Ok(Self {
            width,
            length,
            position,
            rotation,
        })
    }

    #[inline]
    pub fn position(&self) -> &Vector3D {
        &self.position
    }

    #[inline]
    pub fn rotation(&self) -> &Vector3D {
        &self.rotation
    }

    #[inline]
    pub fn dimensions(&self) -> (f64, f64) {
        (self.width, self.length)
    }

    /// Half sizes in the local plane.
    #[inline]
    pub fn half_extents(&self) -> Vector2<f64> {
        Vector2::new(self.width, self.length) / 2.0
    }

    /// The four corners in world coordinates, counter-clockwise in the local plane.
    pub fn corners(&self) -> Vec<Vector3D> {
        let h = self.half_extents();
        [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
            .iter()
            .map(|&(sx, sy)| {
                let local = Vector3D::new(sx * h.x, sy * h.y, 0.0);
                rotate_euler(&local, &self.rotation) + self.position
            })
            .collect()
    }

    /// The same rectangle as a planar polygon with its frame at `position`.
    pub fn to_polygon(&self, cfg: &HsiCfg) -> RegionResult<ConvexPolygon3D> {
        let hsi = crate::frames::rectangle_hsi(self, cfg)?;
        ConvexPolygon3D::new(hsi, self.position, self.rotation)
    }
}

/// Closed half-space `{p : (p - point)·normal >= 0}`.
#[derive(Clone, Debug, PartialEq)]
pub struct HalfSpace {
    point: Vector3D,
    normal: Vector3D,
}

impl HalfSpace {
    pub fn new(point: Vector3D, normal: Vector3D) -> RegionResult<Self> {
        let kind = RegionKind::HalfSpace;
        check_point(kind, "point", &point)?;
        check_point(kind, "normal", &normal)?;
        if normal.norm() <= 0.0 {
            return Err(RegionError::invalid(kind, "normal must be non-zero"));
        }
        Ok(Self { point, normal })
    }

    #[inline]
    pub fn point(&self) -> &Vector3D {
        &self.point
    }

    #[inline]
    pub fn normal(&self) -> &Vector3D {
        &self.normal
    }

    /// Signed distance-like value `(p - point)·normal`; non-negative inside.
    #[inline]
    pub fn evaluate(&self, p: &Vector3D) -> f64 {
        (p - self.point).dot(&self.normal)
    }

    /// As an HSI constraint: `(-normal)·x <= -normal·point`.
    pub fn to_hs(&self) -> Hs {
        let n = -self.normal;
        Hs::new(DVector::from_column_slice(n.as_slice()), n.dot(&self.point))
    }
}

/// Convex polyhedron owning a feasible 3D half-space intersection.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexPolyhedron {
    hsi: Hsi,
}

impl ConvexPolyhedron {
    pub fn new(hsi: Hsi) -> RegionResult<Self> {
        if hsi.dim() != 3 {
            return Err(RegionError::invalid(
                RegionKind::ConvexPolyhedron,
                format!("half-space intersection must be 3D, got {}D", hsi.dim()),
            ));
        }
        Ok(Self { hsi })
    }

    /// Solve `hs` and wrap the result; infeasible input fails construction.
    pub fn from_halfspaces(hs: &[Hs], cfg: &HsiCfg) -> RegionResult<Self> {
        let hsi = Hsi::new(3, hs, cfg).map_err(|e| {
            RegionError::invalid(RegionKind::ConvexPolyhedron, e.to_string())
        })?;
        Self::new(hsi)
    }

    #[inline]
    pub fn hsi(&self) -> &Hsi {
        &self.hsi
    }

    /// Interior point as a 3D vector.
    #[inline]
    pub fn interior_point(&self) -> Vector3D {
        let p = self.hsi.interior_point();
        Vector3D::new(p[0], p[1], p[2])
    }
}

/// Convex polygon living in the plane through `origin` oriented by `rotation`.
///
/// A local point `(u, v)` maps to `rotate_euler((u, v, 0), rotation) + origin`.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexPolygon3D {
    hsi: Hsi,
    origin: Vector3D,
    rotation: Vector3D,
}

impl ConvexPolygon3D {
    pub fn new(hsi: Hsi, origin: Vector3D, rotation: Vector3D) -> RegionResult<Self> {
        let kind = RegionKind::ConvexPolygon3D;
        if hsi.dim() != 2 {
            return Err(RegionError::invalid(
                kind,
                format!("half-space intersection must be 2D, got {}D", hsi.dim()),
            ));
        }
        check_point(kind, "origin", &origin)?;
        check_point(kind, "rotation", &rotation)?;
        Ok(Self {
            hsi,
            origin,
            rotation,
        })
    }

    #[inline]
    pub fn hsi(&self) -> &Hsi {
        &self.hsi
    }

    #[inline]
    pub fn origin(&self) -> &Vector3D {
        &self.origin
    }

    #[inline]
    pub fn rotation(&self) -> &Vector3D {
        &self.rotation
    }

    /// Interior point mapped to world coordinates.
    pub fn interior_point_world(&self) -> Vector3D {
        let p = self.hsi.interior_point();
        crate::frames::local_to_world(&Vector2::new(p[0], p[1]), &self.origin, &self.rotation)
    }

    /// Polygon vertices mapped to world coordinates (counter-clockwise locally).
    pub fn vertices_world(&self) -> Vec<Vector3D> {
        self.hsi
            .vertices()
            .iter()
            .map(|p| {
                crate::frames::local_to_world(&Vector2::new(p[0], p[1]), &self.origin, &self.rotation)
            })
            .collect()
    }
}

/// Un-reduced intersection of at least two regions.
#[derive(Clone, Debug, PartialEq)]
pub struct Intersection {
    regions: Vec<Region>,
}

impl Intersection {
    pub fn new(regions: Vec<Region>) -> RegionResult<Self> {
        if regions.len() < 2 {
            return Err(RegionError::invalid(
                RegionKind::Intersection,
                format!("needs at least two members, got {}", regions.len()),
            ));
        }
        Ok(Self { regions })
    }

    #[inline]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }
}
