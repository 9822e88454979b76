use crate::{
    body::{CharacterBody, MovementMode},
    constants::{
        AIR_CONTROL, CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS, DEFAULT_MASS, DIR_EPS, GRAVITY_CMPS2,
        GROUND_PROBE_DISTANCE, WALKABLE_NORMAL_Z,
    },
    intent::MovementAxes,
    probe::{ProbeFilter, SpatialProbe},
    types::{Quat, Vec3, planar, safe_normal, yaw_of, yaw_rotation},
};

/// Capsule dimensions; `half_height` runs from the centre to the bottom of the capsule.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CapsuleSpec {
    pub radius: f32,
    pub half_height: f32,
}

impl Default for CapsuleSpec {
    fn default() -> Self {
        Self {
            radius: CAPSULE_RADIUS,
            half_height: CAPSULE_HALF_HEIGHT,
        }
    }
}

/// Engine-free character body.
///
/// Holds the pose and velocity the locomotion rules read and write, and integrates them in
/// [`KinematicBody::advance`]. There is no lateral collision; the only world query is the ground
/// probe, which is enough for a deterministic driving loop and for tests.
#[derive(Clone, Debug)]
pub struct KinematicBody {
    pub capsule: CapsuleSpec,
    pub mass: f32,
    position: Vec3,
    rotation: Quat,
    velocity: Vec3,
    mode: MovementMode,
    collision_enabled: bool,
    gravity_scale: f32,
    plane_normal: Option<Vec3>,
    max_walk_speed: f32,
}

/// Output of a single `advance()` tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdvanceResult {
    /// Movement mode before the tick.
    pub previous_mode: MovementMode,
    /// Whether the body has walkable ground support after the tick.
    pub is_grounded: bool,
}

impl KinematicBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            capsule: CapsuleSpec::default(),
            mass: DEFAULT_MASS,
            position,
            rotation: Quat::identity(),
            velocity: Vec3::zeros(),
            mode: MovementMode::Falling,
            collision_enabled: true,
            gravity_scale: 1.0,
            plane_normal: None,
            max_walk_speed: 0.0,
        }
    }

    #[inline]
    pub fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    #[inline]
    pub fn max_walk_speed(&self) -> f32 {
        self.max_walk_speed
    }

    #[inline]
    pub fn collision_enabled(&self) -> bool {
        self.collision_enabled
    }

    #[inline]
    pub fn plane_constraint(&self) -> Option<Vec3> {
        self.plane_normal
    }

    /// Perform one tick of body motion.
    ///
    /// Behavior
    /// - A walking body with upward velocity leaves the ground.
    /// - Planar velocity follows the input axes (world +X forward, +Y right) at the max walk
    ///   speed; airborne bodies only steer with `AIR_CONTROL` of that.
    /// - Falling bodies accelerate downward by gravity times the gravity scale.
    /// - The plane constraint removes velocity along its normal.
    /// - Walking bodies face their planar velocity.
    /// - Unless flying or non-colliding, a ground probe lands or drops the body and snaps the
    ///   capsule bottom onto the hit.
    pub fn advance<P>(&mut self, dt: f32, axes: MovementAxes, probe: &P) -> AdvanceResult
    where
        P: SpatialProbe + ?Sized,
    {
        let previous_mode = self.mode;
        let dt = dt.max(0.0);

        if self.mode == MovementMode::Walking && self.velocity.z > DIR_EPS {
            self.mode = MovementMode::Falling;
        }

        self.apply_input(dt, axes);

        if self.mode == MovementMode::Falling {
            self.velocity.z -= GRAVITY_CMPS2 * self.gravity_scale * dt;
        }

        if let Some(n) = self.plane_normal {
            self.velocity -= n * self.velocity.dot(&n);
        }

        let start = self.position;
        self.position += self.velocity * dt;

        if self.mode == MovementMode::Walking {
            if let Some(yaw) = yaw_of(self.velocity) {
                self.rotation = yaw_rotation(yaw);
            }
        }

        if self.mode != MovementMode::Flying && self.collision_enabled {
            self.settle_on_ground(start, probe);
        }

        AdvanceResult {
            previous_mode,
            is_grounded: self.mode == MovementMode::Walking,
        }
    }

    fn apply_input(&mut self, dt: f32, axes: MovementAxes) {
        let raw = Vec3::new(axes.forward, axes.right, 0.0);
        let wish = safe_normal(raw) * raw.norm().min(1.0);
        let target = wish * self.max_walk_speed;
        let current = planar(self.velocity);

        let next = match self.mode {
            MovementMode::Walking => target,
            MovementMode::Falling => {
                // Steering may not push planar speed past max(current speed, max walk speed).
                let steered = current + target * AIR_CONTROL * dt;
                let limit = current.norm().max(self.max_walk_speed);
                let speed = steered.norm();
                if speed > limit && speed > DIR_EPS {
                    steered * (limit / speed)
                } else {
                    steered
                }
            }
            MovementMode::Flying => current,
        };

        self.velocity.x = next.x;
        self.velocity.y = next.y;
    }

    /// Probe below the capsule; land on walkable ground, otherwise fall.
    fn settle_on_ground<P>(&mut self, start: Vec3, probe: &P)
    where
        P: SpatialProbe + ?Sized,
    {
        if self.velocity.z > DIR_EPS {
            self.mode = MovementMode::Falling;
            return;
        }

        let foot = self.capsule.half_height;
        // Start from the higher of the two centres so a fast fall cannot skip the floor.
        let from = Vec3::new(self.position.x, self.position.y, start.z.max(self.position.z));
        let to = Vec3::new(
            self.position.x,
            self.position.y,
            self.position.z - foot - GROUND_PROBE_DISTANCE,
        );

        match probe.line_probe(from, to, ProbeFilter::VISIBILITY) {
            Some(hit) if hit.normal.z >= WALKABLE_NORMAL_Z => {
                self.position.z = hit.impact_point.z + foot;
                self.velocity.z = 0.0;
                if self.mode == MovementMode::Falling {
                    log::trace!("body landed at {:?}", self.position);
                }
                self.mode = MovementMode::Walking;
            }
            _ => {
                if self.mode == MovementMode::Walking {
                    log::trace!("body lost ground at {:?}", self.position);
                }
                self.mode = MovementMode::Falling;
            }
        }
    }
}

impl CharacterBody for KinematicBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn add_impulse(&mut self, impulse: Vec3) {
        if self.mass > 0.0 {
            self.velocity += impulse / self.mass;
        }
    }

    fn launch(&mut self, velocity: Vec3) {
        self.velocity += velocity;
        if self.mode == MovementMode::Walking && velocity.z > 0.0 {
            self.mode = MovementMode::Falling;
        }
    }

    fn movement_mode(&self) -> MovementMode {
        self.mode
    }

    fn set_movement_mode(&mut self, mode: MovementMode) {
        self.mode = mode;
    }

    fn set_collision_enabled(&mut self, enabled: bool) {
        self.collision_enabled = enabled;
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    fn set_plane_constraint(&mut self, normal: Option<Vec3>) {
        self.plane_normal = normal.map(safe_normal);
    }

    fn set_max_walk_speed(&mut self, speed: f32) {
        self.max_walk_speed = speed.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedProbe, flat_ground};

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn falling_body_lands_on_the_floor() {
        let probe = flat_ground(0.0);
        let mut body = KinematicBody::new(Vec3::new(0.0, 0.0, 200.0));

        for _ in 0..120 {
            body.advance(DT, MovementAxes::default(), &probe);
        }

        assert!(body.is_grounded());
        assert!((body.position().z - CAPSULE_HALF_HEIGHT).abs() < 1.0e-3);
        assert_eq!(body.velocity().z, 0.0);
    }

    #[test]
    fn walking_input_is_capped_at_max_walk_speed() {
        let probe = flat_ground(0.0);
        let mut body = KinematicBody::new(Vec3::new(0.0, 0.0, CAPSULE_HALF_HEIGHT));
        body.set_max_walk_speed(600.0);
        body.advance(DT, MovementAxes::default(), &probe);
        assert!(body.is_grounded());

        body.advance(DT, MovementAxes::new(1.0, 1.0), &probe);

        assert!((planar(body.velocity()).norm() - 600.0).abs() < 1.0e-2);
        assert!((body.right() - Vec3::new(-1.0, 1.0, 0.0).normalize()).norm() < 1.0e-4);
    }

    #[test]
    fn upward_impulse_leaves_the_ground() {
        let probe = flat_ground(0.0);
        let mut body = KinematicBody::new(Vec3::new(0.0, 0.0, CAPSULE_HALF_HEIGHT));
        body.advance(DT, MovementAxes::default(), &probe);

        body.add_impulse(Vec3::new(0.0, 0.0, 125_000.0));
        assert_eq!(body.velocity().z, 1250.0);
        body.advance(DT, MovementAxes::default(), &probe);

        assert!(body.is_falling());
        assert!(body.position().z > CAPSULE_HALF_HEIGHT);
    }

    #[test]
    fn plane_constraint_blocks_vertical_motion() {
        let mut body = KinematicBody::new(Vec3::new(0.0, 0.0, 500.0));
        body.set_plane_constraint(Some(Vec3::z()));
        body.set_gravity_scale(15.0);
        body.set_velocity(Vec3::new(900.0, 0.0, 0.0));

        body.advance(DT, MovementAxes::new(1.0, 0.0), &ScriptedProbe::empty());

        assert_eq!(body.position().z, 500.0);
        assert!(body.position().x > 0.0);
    }

    #[test]
    fn flying_body_ignores_gravity_and_ground() {
        let mut body = KinematicBody::new(Vec3::new(0.0, 0.0, 500.0));
        body.set_movement_mode(MovementMode::Flying);

        body.advance(DT, MovementAxes::default(), &flat_ground(0.0));

        assert_eq!(body.position(), Vec3::new(0.0, 0.0, 500.0));
        assert_eq!(body.movement_mode(), MovementMode::Flying);
    }

    #[test]
    fn air_control_steers_without_exceeding_max_speed() {
        let mut body = KinematicBody::new(Vec3::new(0.0, 0.0, 5000.0));
        body.set_max_walk_speed(600.0);
        body.set_velocity(Vec3::new(600.0, 0.0, 0.0));

        for _ in 0..60 {
            body.advance(DT, MovementAxes::new(0.0, 1.0), &ScriptedProbe::empty());
        }

        let v = planar(body.velocity());
        assert!(v.y > 0.0);
        assert!(v.norm() <= 600.0 + 1.0e-2);
    }
}
