//! Test doubles shared by the module tests.

use crate::{
    body::{CharacterBody, MovementMode},
    constants::DEFAULT_MASS,
    probe::{ProbeFilter, ProbeHit, SpatialProbe},
    surface::{Surface, SurfaceTag},
    types::{Quat, Vec3, safe_normal},
};

/// Body that applies velocity changes immediately and records every impulse and launch.
/// It never integrates position.
#[derive(Clone, Debug)]
pub struct RecordingBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub mode: MovementMode,
    pub gravity_scale: f32,
    pub plane_constraint: Option<Vec3>,
    pub max_walk_speed: f32,
    pub collision_enabled: bool,
    pub mass: f32,
    pub impulses: Vec<Vec3>,
    pub launches: Vec<Vec3>,
}

impl RecordingBody {
    fn with_mode(mode: MovementMode) -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            velocity: Vec3::zeros(),
            mode,
            gravity_scale: 1.0,
            plane_constraint: None,
            max_walk_speed: 0.0,
            collision_enabled: true,
            mass: DEFAULT_MASS,
            impulses: Vec::new(),
            launches: Vec::new(),
        }
    }

    pub fn grounded() -> Self {
        Self::with_mode(MovementMode::Walking)
    }

    pub fn falling() -> Self {
        Self::with_mode(MovementMode::Falling)
    }
}

impl CharacterBody for RecordingBody {
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
        self.impulses.push(impulse);
        self.velocity += impulse / self.mass;
    }

    fn launch(&mut self, velocity: Vec3) {
        self.launches.push(velocity);
        self.velocity += velocity;
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
        self.plane_constraint = normal;
    }

    fn set_max_walk_speed(&mut self, speed: f32) {
        self.max_walk_speed = speed;
    }
}

type LineFn = Box<dyn Fn(Vec3, Vec3, ProbeFilter) -> Option<ProbeHit>>;
type SphereFn = Box<dyn Fn(Vec3, Vec3, f32, ProbeFilter) -> Option<ProbeHit>>;

/// Probe whose answers come from closures; unset probes always miss.
pub struct ScriptedProbe {
    line: Option<LineFn>,
    sphere: Option<SphereFn>,
}

impl ScriptedProbe {
    pub fn empty() -> Self {
        Self {
            line: None,
            sphere: None,
        }
    }

    pub fn with_line<F>(mut self, f: F) -> Self
    where
        F: Fn(Vec3, Vec3, ProbeFilter) -> Option<ProbeHit> + 'static,
    {
        self.line = Some(Box::new(f));
        self
    }

    pub fn with_sphere<F>(mut self, f: F) -> Self
    where
        F: Fn(Vec3, Vec3, f32, ProbeFilter) -> Option<ProbeHit> + 'static,
    {
        self.sphere = Some(Box::new(f));
        self
    }

    /// Every probe hits an anchor-tagged surface halfway along its segment.
    pub fn everything_hits() -> Self {
        fn midpoint(start: Vec3, end: Vec3) -> Option<ProbeHit> {
            Some(hit_at(
                (start + end) * 0.5,
                -safe_normal(end - start),
                Some(Surface::new(1, &[SurfaceTag::GrappleAnchor])),
            ))
        }

        Self::empty()
            .with_line(|start, end, _filter| midpoint(start, end))
            .with_sphere(|start, end, _radius, _filter| midpoint(start, end))
    }
}

impl SpatialProbe for ScriptedProbe {
    fn line_probe(&self, start: Vec3, end: Vec3, filter: ProbeFilter) -> Option<ProbeHit> {
        self.line.as_ref().and_then(|f| f(start, end, filter))
    }

    fn sphere_probe(
        &self,
        start: Vec3,
        end: Vec3,
        radius: f32,
        filter: ProbeFilter,
    ) -> Option<ProbeHit> {
        self.sphere.as_ref().and_then(|f| f(start, end, radius, filter))
    }
}

pub fn hit_at(impact_point: Vec3, normal: Vec3, surface: Option<Surface>) -> ProbeHit {
    ProbeHit {
        impact_point,
        normal,
        surface,
    }
}

/// Infinite floor at height `z`, seen only by line probes.
pub fn flat_ground(z: f32) -> ScriptedProbe {
    ScriptedProbe::empty().with_line(move |start, end, _filter| {
        let (lo, hi) = (start.z.min(end.z), start.z.max(end.z));
        (lo <= z && z <= hi).then(|| hit_at(Vec3::new(start.x, start.y, z), Vec3::z(), None))
    })
}
