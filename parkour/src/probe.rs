//! Spatial-probe collaborator.
//!
//! Probes are synchronous, point-in-time queries against world geometry. A miss is a normal
//! negative result, never an error.

use crate::{surface::Surface, types::Vec3};

/// Which surfaces a probe may report.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ProbeCategory {
    /// Everything that blocks visibility (walls, floors, obstacles).
    #[default]
    Visibility,
    /// Only surfaces tagged as grapple anchors.
    GrappleAnchor,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProbeFilter {
    pub category: ProbeCategory,
    /// Skip the probing character's own collider.
    pub ignore_self: bool,
}

impl ProbeFilter {
    pub const VISIBILITY: Self = Self {
        category: ProbeCategory::Visibility,
        ignore_self: true,
    };

    pub const GRAPPLE_ANCHOR: Self = Self {
        category: ProbeCategory::GrappleAnchor,
        ignore_self: true,
    };
}

/// Geometry of a probe hit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProbeHit {
    /// World-space point on the hit surface.
    pub impact_point: Vec3,
    /// World-space surface normal at the impact point, facing the prober.
    pub normal: Vec3,
    /// Owning actor and tags; `None` for geometry that belongs to no actor.
    pub surface: Option<Surface>,
}

/// World query interface consumed by the locomotion rules.
pub trait SpatialProbe {
    /// Cast a ray from `start` to `end` and return the first blocking hit.
    fn line_probe(&self, start: Vec3, end: Vec3, filter: ProbeFilter) -> Option<ProbeHit>;

    /// Sweep a sphere of `radius` from `start` to `end` and return the first blocking hit.
    fn sphere_probe(
        &self,
        start: Vec3,
        end: Vec3,
        radius: f32,
        filter: ProbeFilter,
    ) -> Option<ProbeHit>;
}
