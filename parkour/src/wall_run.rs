//! Wall-run detection, entry, exit and the idle exit launch.
//!
//! Detection runs in two passes every falling step: the right side unless the player is already
//! on a left wall, then the left side unless the first pass (or an earlier step) put the player
//! on a right wall. A right-side hit on a surface that refuses wall runs skips the left pass.

use std::ops::ControlFlow;

use crate::{
    body::CharacterBody,
    controller::Locomotion,
    mode::{LocomotionMode, WallSide},
    probe::{ProbeFilter, ProbeHit, SpatialProbe},
    surface::SurfaceTag,
    types::{Vec3, facing_with_offset, up},
};

impl Locomotion {
    /// Probe both sides for a runnable wall and update the wall-run state.
    ///
    /// Skipped entirely while a grapple is attached. With no movement input while wall-running
    /// the player is pushed off the wall instead of probing.
    pub fn check_wall_run<B, P>(&mut self, body: &mut B, probe: &P)
    where
        B: CharacterBody + ?Sized,
        P: SpatialProbe + ?Sized,
    {
        if self.state.grapple_attached() {
            return;
        }

        if self.axes.is_idle() && self.state.is_wall_running() {
            self.wall_run_exit_launch(body);
            return;
        }

        // A rejected surface on the right ends the whole check for this step.
        if !self.state.on_left_side()
            && self.probe_wall_side(body, probe, WallSide::Right).is_break()
        {
            return;
        }
        if !self.state.on_right_side() {
            let _ = self.probe_wall_side(body, probe, WallSide::Left);
        }
    }

    /// Push the player off the wall they are running on. No-op unless wall-running.
    pub fn wall_run_exit_launch<B>(&mut self, body: &mut B) -> bool
    where
        B: CharacterBody + ?Sized,
    {
        let LocomotionMode::WallRunning { side } = self.state.mode() else {
            return false;
        };
        if !self.enter(LocomotionMode::Falling) {
            return false;
        }

        self.release_wall_constraints(body);

        let mut launch = body.right() * (-side.sign() * self.config.wall_run.exit_launch);
        launch.z = 0.0;
        body.launch(launch);

        self.state.jump_count = 1;
        self.state.wall_contact = None;
        log::debug!("wall run exit launch off {side:?} wall");
        true
    }

    /// Probe one side. Breaks when the hit surface has no owner or refuses wall runs.
    fn probe_wall_side<B, P>(
        &mut self,
        body: &mut B,
        probe: &P,
        side: WallSide,
    ) -> ControlFlow<()>
    where
        B: CharacterBody + ?Sized,
        P: SpatialProbe + ?Sized,
    {
        let cfg = &self.config.wall_run;
        let start = body.position();
        let end = start + body.right() * (side.sign() * cfg.probe_distance);
        let hit = probe.sphere_probe(start, end, cfg.probe_radius, ProbeFilter::VISIBILITY);

        let descending = self.state.height_delta() <= 0.0;
        match hit {
            Some(hit) if descending && !body.is_grounded() => {
                let Some(surface) = hit.surface else {
                    log::trace!("{side:?} wall probe hit geometry without an actor");
                    return ControlFlow::Break(());
                };
                if surface.has_tag(SurfaceTag::NoWallRun) {
                    log::trace!("{side:?} wall of actor {} is tagged no-wall-run", surface.actor);
                    return ControlFlow::Break(());
                }

                self.state.wall_contact = Some(side);
                if !self.state.is_jumping_off_wall() {
                    self.start_wall_run(body, &hit, side);
                }
            }
            _ => self.leave_wall_side(body, side),
        }
        ControlFlow::Continue(())
    }

    fn start_wall_run<B>(&mut self, body: &mut B, hit: &ProbeHit, side: WallSide)
    where
        B: CharacterBody + ?Sized,
    {
        if !self.enter(LocomotionMode::WallRunning { side }) {
            return;
        }

        body.set_rotation(facing_with_offset(hit.normal, side.run_yaw_offset_degrees()));

        // Run straight along the wall at the current speed, capped by the momentum-scaled limit.
        let cfg = &self.config.wall_run;
        let forward = body.forward();
        let speed = body
            .velocity()
            .norm()
            .clamp(0.0, cfg.speed_base + self.state.momentum());
        body.set_velocity(Vec3::new(forward.x * speed, forward.y * speed, 0.0));

        self.state.gravity_scale = cfg.gravity_scale;
        body.set_gravity_scale(self.state.gravity_scale);
        body.set_plane_constraint(Some(up()));
        self.state.gravity_ramp = 0.0;
    }

    fn leave_wall_side<B>(&mut self, body: &mut B, side: WallSide)
    where
        B: CharacterBody + ?Sized,
    {
        if self.state.is_wall_running() {
            self.enter(LocomotionMode::Falling);
        }
        if self.state.wall_contact == Some(side) {
            self.state.wall_contact = None;
        }
        self.release_wall_constraints(body);
    }

    pub(crate) fn release_wall_constraints<B>(&mut self, body: &mut B)
    where
        B: CharacterBody + ?Sized,
    {
        self.state.gravity_scale = self.config.gravity.default_scale;
        body.set_gravity_scale(self.state.gravity_scale);
        body.set_plane_constraint(None);
    }
}
