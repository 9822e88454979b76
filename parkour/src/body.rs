//! Physics/movement collaborator.
//!
//! The locomotion rules only compute vectors and flags; a [`CharacterBody`] owns the actual
//! position, velocity and collision state. [`crate::KinematicBody`] is the engine-free
//! implementation used by the driving loop and tests.

use crate::types::{Quat, Vec3};

/// Movement mode of the underlying character body.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum MovementMode {
    /// Supported by walkable ground.
    #[default]
    Walking,
    /// Unsupported and subject to gravity.
    Falling,
    /// Unsupported and not subject to gravity (scripted repositioning).
    Flying,
}

pub trait CharacterBody {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);

    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);

    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);

    /// Apply a mass-scaled impulse (`velocity += impulse / mass`).
    fn add_impulse(&mut self, impulse: Vec3);

    /// Add `velocity` directly, ignoring mass.
    fn launch(&mut self, velocity: Vec3);

    fn movement_mode(&self) -> MovementMode;
    fn set_movement_mode(&mut self, mode: MovementMode);

    fn set_collision_enabled(&mut self, enabled: bool);
    fn set_gravity_scale(&mut self, scale: f32);

    /// Constrain motion to the plane with `normal`, or lift the constraint with `None`.
    fn set_plane_constraint(&mut self, normal: Option<Vec3>);

    fn set_max_walk_speed(&mut self, speed: f32);

    #[inline]
    fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::x()
    }

    #[inline]
    fn right(&self) -> Vec3 {
        self.rotation() * Vec3::y()
    }

    #[inline]
    fn is_grounded(&self) -> bool {
        self.movement_mode() == MovementMode::Walking
    }

    #[inline]
    fn is_falling(&self) -> bool {
        self.movement_mode() == MovementMode::Falling
    }
}
