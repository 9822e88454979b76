//! Rapier-backed spatial probe over immutable level geometry.
//!
//! Design goals
//! - Deterministic: given the same inputs (sorted by `id`), build identical in-memory sets.
//! - Query-only: no dynamics are ever stepped; the scene only answers ray and sphere casts.
//! - Immutable world: statics do not move after construction.
//!
//! Each collider carries its owning actor and surface tags packed into `user_data`
//! (see [`crate::surface`]), so probe hits report them without a side table.

pub use rapier3d;

use rapier3d::{
    na::{Translation3, UnitQuaternion},
    parry::query::{PointQuery, ShapeCastOptions},
    prelude::*,
};

use crate::{
    probe::{ProbeCategory, ProbeFilter, ProbeHit, SpatialProbe},
    surface::{Surface, SurfaceTag, pack_optional_surface, unpack_surface},
    types::{Vec3, safe_normal},
};

/// Definition of an immutable level collider.
///
/// Conventions
/// - Units are centimetres, +Z is up.
/// - For planes the normal is derived from the pose as `rotation * +Z`, and
///   `dist = dot(normal, translation) + offset_along_normal`.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    pub translation: Vector<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub shape: ColliderShapeDef,
    /// Owning actor and gameplay tags; `None` for anonymous geometry.
    pub surface: Option<Surface>,
}

impl WorldStaticDef {
    pub fn new(id: u32, translation: Vector<f32>, shape: ColliderShapeDef) -> Self {
        Self {
            id,
            translation,
            rotation: UnitQuaternion::identity(),
            shape,
            surface: None,
        }
    }

    pub fn with_rotation(mut self, rotation: UnitQuaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = Some(surface);
        self
    }
}

/// Supported static collider shapes.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space), offset along its pose-derived normal.
    Plane { offset_along_normal: f32 },

    /// Oriented cuboid with given half-extents.
    Cuboid { half_extents: Vector<f32> },

    Sphere { radius: f32 },

    /// Z-aligned capsule, e.g. a pole.
    CapsuleZ { radius: f32, half_height: f32 },

    /// Rounded cuboid; `border_radius` rounds all edges and corners.
    RoundCuboid {
        half_extents: Vector<f32>,
        border_radius: f32,
    },
}

/// In-memory Rapier structures needed for scene queries against a static world.
pub struct RapierProbeWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
}

impl RapierProbeWorld {
    /// Build a query world from a list of static collider definitions.
    ///
    /// The input is sorted by `id` before insertion. NaN or otherwise invalid values should be
    /// filtered by the caller.
    pub fn build(mut defs: Vec<WorldStaticDef>) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        for def in defs.iter() {
            let iso = Isometry::from_parts(Translation3::from(def.translation), def.rotation);
            let rb_handle = bodies.insert(RigidBodyBuilder::fixed().pose(iso).build());
            colliders.insert_with_parent(collider_from_def(def), rb_handle, &mut bodies);
        }

        // Collision detection only (no dynamics): updates the broad-phase BVH and narrow phase.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut narrow_phase = NarrowPhase::new();
        let mut collision_pipeline = CollisionPipeline::new();
        collision_pipeline.step(
            0.0,
            &mut broad_phase,
            &mut narrow_phase,
            &mut bodies,
            &mut colliders,
            &(),
            &(),
        );

        log::debug!("probe world built with {} colliders", colliders.len());

        Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase,
        }
    }

    fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }

    fn surface_of(&self, handle: ColliderHandle) -> Option<Surface> {
        let collider = self.colliders.get(handle)?;
        match unpack_surface(collider.user_data) {
            Ok(surface) => surface,
            Err(err) => {
                log::warn!("collider {handle:?} has malformed surface data: {err}");
                None
            }
        }
    }
}

/// Whether a collider passes the probe category.
fn accepts(category: ProbeCategory, collider: &Collider) -> bool {
    match category {
        ProbeCategory::Visibility => true,
        ProbeCategory::GrappleAnchor => matches!(
            unpack_surface(collider.user_data),
            Ok(Some(surface)) if surface.has_tag(SurfaceTag::GrappleAnchor)
        ),
    }
}

// The character is never inserted into this scene, so `ignore_self` needs no exclusion here.
impl SpatialProbe for RapierProbeWorld {
    fn line_probe(&self, start: Vec3, end: Vec3, filter: ProbeFilter) -> Option<ProbeHit> {
        let delta = end - start;
        let length = delta.norm();
        let dir = safe_normal(delta);
        if dir == Vec3::zeros() {
            return None;
        }

        let category = filter.category;
        let predicate = move |_handle: ColliderHandle, collider: &Collider| accepts(category, collider);
        let pipeline = self.query_pipeline(QueryFilter::default().predicate(&predicate));

        let ray = Ray::new(Point::from(start), dir);
        let (handle, hit) = pipeline.cast_ray_and_get_normal(&ray, length, true)?;

        Some(ProbeHit {
            impact_point: ray.point_at(hit.time_of_impact).coords,
            normal: hit.normal,
            surface: self.surface_of(handle),
        })
    }

    fn sphere_probe(
        &self,
        start: Vec3,
        end: Vec3,
        radius: f32,
        filter: ProbeFilter,
    ) -> Option<ProbeHit> {
        if radius <= 0.0 {
            return self.line_probe(start, end, filter);
        }

        let category = filter.category;
        let predicate = move |_handle: ColliderHandle, collider: &Collider| accepts(category, collider);
        let pipeline = self.query_pipeline(QueryFilter::default().predicate(&predicate));

        let ball = Ball::new(radius);
        let motion = end - start;
        let mut opts = ShapeCastOptions::with_max_time_of_impact(1.0);
        opts.stop_at_penetration = true;

        let pose = Isometry::translation(start.x, start.y, start.z);
        let (handle, hit) = pipeline.cast_shape(&pose, &motion, &ball, opts)?;

        // Closest point on the hit collider to the sphere centre at impact.
        let centre = Point::from(start + motion * hit.time_of_impact);
        let collider = self.colliders.get(handle)?;
        let projection = collider
            .shape()
            .project_point(collider.position(), &centre, false);
        let impact_point = projection.point.coords;

        let mut normal = safe_normal(centre.coords - impact_point);
        if normal == Vec3::zeros() || projection.is_inside {
            normal = -safe_normal(motion);
        }

        Some(ProbeHit {
            impact_point,
            normal,
            surface: self.surface_of(handle),
        })
    }
}

/// Build a Rapier collider from a `WorldStaticDef`.
///
/// The pose lives on the parent rigid body, so the collider has an identity local transform
/// except for planes, which are shifted along their normal.
fn collider_from_def(def: &WorldStaticDef) -> Collider {
    let builder = match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => {
            // Local +Z under the parent pose is the world normal `rotation * +Z`.
            ColliderBuilder::new(SharedShape::new(HalfSpace::new(Vector::z_axis())))
                .translation(Vector::z() * *offset_along_normal)
        }
        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }
        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius),
        ColliderShapeDef::CapsuleZ {
            radius,
            half_height,
        } => ColliderBuilder::capsule_z(*half_height, *radius),
        ColliderShapeDef::RoundCuboid {
            half_extents,
            border_radius,
        } => ColliderBuilder::round_cuboid(
            half_extents.x,
            half_extents.y,
            half_extents.z,
            *border_radius,
        ),
    };

    builder
        .user_data(pack_optional_surface(def.surface))
        .build()
}
