//! Grapple attach, swing integration, release and the one-shot boost.

use crate::{
    body::CharacterBody,
    controller::Locomotion,
    mode::LocomotionMode,
    probe::{ProbeFilter, SpatialProbe},
    types::{Vec3, safe_normal, up},
};

/// Velocity left after removing the component along the rope.
///
/// The velocity is projected onto the horizontal swing direction (perpendicular to the rope and
/// world up) and onto the radial direction perpendicular to both, and the two projections are
/// summed. Anything along `anchor - position` is discarded.
pub fn swing_velocity(anchor: Vec3, position: Vec3, velocity: Vec3) -> Vec3 {
    let hook_dir = safe_normal(anchor - position);
    let swing_dir = safe_normal(hook_dir.cross(&up()));
    let radial_dir = safe_normal(swing_dir.cross(&hook_dir));

    swing_dir * velocity.dot(&swing_dir) + radial_dir * velocity.dot(&radial_dir)
}

impl Locomotion {
    /// Latch onto a grapple anchor along `view_direction`.
    ///
    /// Only while airborne, not in an exclusive action and not already attached; a second attach
    /// while swinging is a no-op.
    pub fn try_attach_grapple<B, P>(&mut self, body: &B, probe: &P, view_direction: Vec3) -> bool
    where
        B: CharacterBody + ?Sized,
        P: SpatialProbe + ?Sized,
    {
        if self.state.in_action() || self.state.grapple_attached() || body.is_grounded() {
            return false;
        }

        let dir = safe_normal(view_direction);
        if dir == Vec3::zeros() {
            return false;
        }

        let cfg = &self.config.grapple;
        let start = body.position();
        let end = start + dir * cfg.range;
        let Some(hit) = probe.sphere_probe(start, end, cfg.probe_radius, ProbeFilter::GRAPPLE_ANCHOR)
        else {
            log::trace!("grapple probe found no anchor");
            return false;
        };

        if !self.enter(LocomotionMode::Grappling {
            anchor: hit.impact_point,
        }) {
            return false;
        }
        log::debug!("grapple attached at {:?}", hit.impact_point);
        true
    }

    /// Replace the body velocity with its swing components; releases on touching ground.
    pub(crate) fn integrate_grapple<B>(&mut self, body: &mut B)
    where
        B: CharacterBody + ?Sized,
    {
        let Some(anchor) = self.state.hook_point() else {
            return;
        };

        body.set_velocity(swing_velocity(anchor, body.position(), body.velocity()));

        if body.is_grounded() {
            self.release_grapple(body);
        }
    }

    /// Detach, grant release momentum and fling the player forward. No-op when not attached.
    pub fn release_grapple<B>(&mut self, body: &mut B) -> bool
    where
        B: CharacterBody + ?Sized,
    {
        if !self.state.grapple_attached() {
            return false;
        }

        let next = if body.is_grounded() {
            LocomotionMode::Grounded
        } else {
            LocomotionMode::Falling
        };
        if !self.enter(next) {
            return false;
        }

        let cfg = self.config.grapple;
        self.state.has_applied_grapple_boost = false;
        self.state.add_momentum(cfg.release_momentum);

        let force = body.forward() * cfg.release_impulse;
        body.add_impulse(Vec3::new(force.x, force.y, cfg.release_vertical));
        log::debug!("grapple released, momentum {:.0}", self.state.momentum());
        true
    }

    /// One forward boost per attachment, gated by the boost cooldown.
    pub fn apply_grapple_boost<B>(&mut self, body: &mut B) -> bool
    where
        B: CharacterBody + ?Sized,
    {
        if !self.state.grapple_attached()
            || body.is_grounded()
            || self.state.has_applied_grapple_boost
            || !self.state.boost_available
        {
            return false;
        }

        let force = body.forward() * self.config.grapple.boost_impulse;
        body.add_impulse(Vec3::new(force.x, force.y, 0.0));

        self.state.has_applied_grapple_boost = true;
        self.state.last_boost_time = Some(self.clock);
        self.state.boost_available = false;
        log::debug!("grapple boost at t={:.2}", self.clock);
        true
    }
}
