/*!
Math aliases and small vector helpers shared by the locomotion modules.

This module intentionally contains no gameplay. World convention is Z-up with +X forward and
+Y right, so a yaw-only rotation is a rotation about +Z.
*/

use nalgebra as na;

use crate::constants::DIR_EPS;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// World up axis.
#[inline]
pub fn up() -> Vec3 {
    Vec3::z()
}

/// Normalize `v`, or return zero when it is too short to have a direction.
#[inline]
pub fn safe_normal(v: Vec3) -> Vec3 {
    v.try_normalize(DIR_EPS).unwrap_or_else(Vec3::zeros)
}

/// Drop the vertical component.
#[inline]
pub fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, 0.0)
}

/// Yaw (radians, about +Z) of the direction `dir`, ignoring its vertical component.
///
/// Returns `None` if the planar part is too small to define a heading.
#[inline]
pub fn yaw_of(dir: Vec3) -> Option<f32> {
    let flat = planar(dir);
    if flat.norm_squared() <= DIR_EPS * DIR_EPS {
        return None;
    }
    Some(flat.y.atan2(flat.x))
}

/// Yaw-only rotation (pitch and roll zeroed).
#[inline]
pub fn yaw_rotation(yaw_radians: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::z_axis(), yaw_radians)
}

/// Rotation whose +X axis faces `dir` in the horizontal plane, offset by `yaw_offset_degrees`.
///
/// Pitch and roll are always zero. A degenerate (vertical or zero) `dir` yields yaw 0.
#[inline]
pub fn facing_with_offset(dir: Vec3, yaw_offset_degrees: f32) -> Quat {
    let yaw = yaw_of(dir).unwrap_or(0.0);
    yaw_rotation(yaw + yaw_offset_degrees.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).norm() < 1.0e-4
    }

    #[test]
    fn safe_normal_of_zero_is_zero() {
        assert_eq!(safe_normal(Vec3::zeros()), Vec3::zeros());
        assert!(approx(safe_normal(Vec3::new(0.0, 3.0, 4.0)), Vec3::new(0.0, 0.6, 0.8)));
    }

    #[test]
    fn facing_right_wall_runs_along_plus_x() {
        // A wall on the player's right has a normal pointing back at the player (-Y).
        let rot = facing_with_offset(Vec3::new(0.0, -1.0, 0.0), 90.0);
        assert!(approx(rot * Vec3::x(), Vec3::x()));
    }

    #[test]
    fn facing_left_wall_runs_along_plus_x() {
        let rot = facing_with_offset(Vec3::new(0.0, 1.0, 0.0), -90.0);
        assert!(approx(rot * Vec3::x(), Vec3::x()));
    }

    #[test]
    fn facing_ignores_pitch() {
        let rot = facing_with_offset(Vec3::new(1.0, 0.0, 5.0), 0.0);
        let fwd = rot * Vec3::x();
        assert!(fwd.z.abs() < 1.0e-6);
        assert!(approx(fwd, Vec3::x()));
    }
}
