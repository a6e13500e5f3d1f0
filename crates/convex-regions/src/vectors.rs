//! 3D vectors and the Euler-angle rotation convention.
//!
//! Rotations are Euler angles `(rx, ry, rz)` in radians applied as extrinsic
//! X, then Y, then Z (intrinsic Z-Y-X). Every local frame in the crate
//! (cuboids, rectangles, planar polygons) goes through `rotation_matrix`.

use nalgebra::{Rotation3, Vector3};

/// Immutable 3D vector; arithmetic comes from nalgebra.
pub type Vector3D = Vector3<f64>;

/// Rotation matrix for Euler angles `rot = (rx, ry, rz)`.
#[inline]
pub fn rotation_matrix(rot: &Vector3D) -> Rotation3<f64> {
    Rotation3::from_euler_angles(rot.x, rot.y, rot.z)
}

/// Rotate `v` by the Euler angles `rot`.
#[inline]
pub fn rotate_euler(v: &Vector3D, rot: &Vector3D) -> Vector3D {
    rotation_matrix(rot) * v
}

/// Undo `rotate_euler(·, rot)`.
#[inline]
pub fn rotate_euler_inverse(v: &Vector3D, rot: &Vector3D) -> Vector3D {
    rotation_matrix(rot).inverse() * v
}

#[inline]
pub(crate) fn is_finite(v: &Vector3D) -> bool {
    v.iter().all(|x| x.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::vector;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn_about_z() {
        let v = rotate_euler(&vector![1.0, 0.0, 0.0], &vector![0.0, 0.0, FRAC_PI_2]);
        assert_relative_eq!(v, vector![0.0, 1.0, 0.0], epsilon = 1e-12);
    }

    #[test]
    fn x_is_applied_before_z() {
        // X first sends y to z, the Z turn then leaves it alone.
        let v = rotate_euler(
            &vector![0.0, 1.0, 0.0],
            &vector![FRAC_PI_2, 0.0, FRAC_PI_2],
        );
        assert_relative_eq!(v, vector![0.0, 0.0, 1.0], epsilon = 1e-12);
    }

    #[test]
    fn inverse_round_trips_seeded() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..16 {
            let v = vector![
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0)
            ];
            let rot = vector![
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0)
            ];
            let back = rotate_euler_inverse(&rotate_euler(&v, &rot), &rot);
            assert_relative_eq!(back, v, epsilon = 1e-9);
            assert_relative_eq!(rotate_euler(&v, &rot).norm(), v.norm(), epsilon = 1e-9);
        }
    }
}
