//! Vault and climb.
//!
//! Three stacked line probes classify the obstacle ahead:
//! 1. forward from just below the body centre, to find the wall face;
//! 2. straight down just behind the face, to find the top of the wall;
//! 3. straight down further behind the face, to find whatever lies beyond it.
//!
//! A tall enough wall is either vaulted (thin wall, the player is lifted to the top) or climbed
//! (thick wall, the player is moved onto it). Both run with collision disabled until the finish
//! deadline.

use crate::{
    body::{CharacterBody, MovementMode},
    controller::Locomotion,
    mode::LocomotionMode,
    probe::{ProbeFilter, SpatialProbe},
    state::ObstacleProbe,
    types::safe_normal,
};

impl Locomotion {
    /// Run the obstacle probe sequence from the body's current pose.
    ///
    /// Returns `None` when either the wall face or the wall top is missing.
    pub fn probe_obstacle<B, P>(&self, body: &B, probe: &P) -> Option<ObstacleProbe>
    where
        B: CharacterBody + ?Sized,
        P: SpatialProbe + ?Sized,
    {
        let cfg = &self.config.vault;

        let mut start = body.position();
        start.z -= cfg.probe_drop;
        let end = start + body.forward() * cfg.reach;
        let wall = probe.line_probe(start, end, ProbeFilter::VISIBILITY)?;
        let normal = safe_normal(wall.normal);

        let mut top_start = wall.impact_point - normal * cfg.top_probe_setback;
        top_start.z += cfg.top_probe_rise;
        let mut top_end = top_start;
        top_end.z -= cfg.top_probe_length;
        let top = probe.line_probe(top_start, top_end, ProbeFilter::VISIBILITY)?;
        let wall_top_height = top.impact_point.z;

        let mut far_start = wall.impact_point - normal * cfg.far_probe_setback;
        far_start.z += cfg.far_probe_rise;
        let mut far_end = far_start;
        far_end.z -= cfg.far_probe_length;
        let far_height = probe
            .line_probe(far_start, far_end, ProbeFilter::VISIBILITY)
            .map(|hit| hit.impact_point.z);

        // A surface behind the face at (almost) the top height means the top keeps going.
        // An exactly equal height is treated as thin.
        let wall_thick = far_height.is_some_and(|far| {
            let drop = wall_top_height - far;
            drop <= cfg.thickness_tolerance && drop != 0.0
        });

        log::trace!(
            "obstacle: face {:?}, top {wall_top_height:.1}, far {far_height:?}, thick {wall_thick}",
            wall.impact_point
        );

        Some(ObstacleProbe {
            wall_location: wall.impact_point,
            wall_normal: normal,
            wall_top_height,
            far_height,
            wall_thick,
        })
    }

    /// Vault over or climb onto the obstacle ahead.
    ///
    /// No-op while another exclusive ability or a grapple is active, when the probes miss, or
    /// when the wall is not tall enough.
    pub fn try_start_vault<B, P>(&mut self, body: &mut B, probe: &P) -> bool
    where
        B: CharacterBody + ?Sized,
        P: SpatialProbe + ?Sized,
    {
        let mode = self.state.mode();
        if mode.in_action() || mode.is_grappling() {
            log::debug!("vault ignored while {mode:?}");
            return false;
        }

        let obstacle = self.probe_obstacle(body, probe);
        self.state.obstacle = obstacle;
        let Some(obstacle) = obstacle else {
            return false;
        };

        let cfg = self.config.vault;
        if obstacle.wall_top_height - obstacle.wall_location.z <= cfg.min_height {
            return false;
        }

        let finish_at = self.clock + cfg.duration;
        let next = if obstacle.wall_thick {
            LocomotionMode::Climbing { finish_at }
        } else {
            LocomotionMode::Vaulting { finish_at }
        };
        if !self.enter(next) {
            return false;
        }

        body.set_collision_enabled(false);
        body.set_movement_mode(MovementMode::Flying);

        let mut position = body.position();
        if obstacle.wall_thick {
            position += obstacle.wall_normal * cfg.climb_offset;
        } else {
            position.z = obstacle.wall_top_height - cfg.top_clearance;
        }
        body.set_position(position);

        self.state.add_momentum(cfg.momentum_bonus);
        true
    }

    /// End a vault or climb: restore collision and walking.
    pub(crate) fn finish_vault<B>(&mut self, body: &mut B)
    where
        B: CharacterBody + ?Sized,
    {
        if !(self.state.is_vaulting() || self.state.is_climbing()) {
            return;
        }
        body.set_collision_enabled(true);
        body.set_movement_mode(MovementMode::Walking);
        self.enter(LocomotionMode::Grounded);
    }

    /// Abort a running vault or climb before its finish deadline.
    ///
    /// The finish never fires; the player drops back into the air with collision restored.
    pub fn cancel_action<B>(&mut self, body: &mut B) -> bool
    where
        B: CharacterBody + ?Sized,
    {
        if !(self.state.is_vaulting() || self.state.is_climbing()) {
            return false;
        }
        body.set_collision_enabled(true);
        body.set_movement_mode(MovementMode::Falling);
        self.enter(LocomotionMode::Falling)
    }
}
