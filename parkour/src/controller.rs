/*!
Per-player locomotion driver.

[`Locomotion`] owns the tuning, the [`LocomotionState`] record, the simulation clock and the
latest movement axes. A driving loop calls [`Locomotion::step`] once per simulation step and
forwards input edges through [`Locomotion::handle_input`]. The body and the world are passed in
on every call, so the rules never hold on to engine objects.

Step order:
1. advance the clock and clear the double-jump pulse
2. fire expired deadlines (vault/climb finish, wall-jump cooldown)
3. momentum update, then push `base_speed + momentum` to the body
4. landing and fall/gravity bookkeeping
5. grounded jump while the jump latch is held
6. wall-run check and gravity ramp while falling
7. grapple integration while attached
8. boost availability and frame-height history
*/

use crate::{
    body::CharacterBody,
    config::LocomotionConfig,
    constants::{MAX_JUMP_COUNT, STILL_SPEED_EPS},
    intent::{InputEvent, MovementAxes},
    mode::LocomotionMode,
    momentum::MomentumInputs,
    probe::SpatialProbe,
    state::LocomotionState,
};

#[derive(Clone, Debug)]
pub struct Locomotion {
    pub(crate) config: LocomotionConfig,
    pub(crate) state: LocomotionState,
    /// Simulation time in seconds, advanced by `step`.
    pub(crate) clock: f32,
    pub(crate) axes: MovementAxes,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self::new(LocomotionConfig::default())
    }
}

impl Locomotion {
    pub fn new(config: LocomotionConfig) -> Self {
        let state = LocomotionState::new(config.base_speed, config.momentum.max);
        Self {
            config,
            state,
            clock: 0.0,
            axes: MovementAxes::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    #[inline]
    pub fn mode(&self) -> LocomotionMode {
        self.state.mode()
    }

    /// Current simulation time.
    #[inline]
    pub fn now(&self) -> f32 {
        self.clock
    }

    #[inline]
    pub fn axes(&self) -> MovementAxes {
        self.axes
    }

    /// Latest movement axes; polled by the next step and by input handlers.
    pub fn set_axes(&mut self, axes: MovementAxes) {
        self.axes = axes;
    }

    #[inline]
    pub fn momentum(&self) -> f32 {
        self.state.momentum()
    }

    pub fn set_momentum(&mut self, momentum: f32) {
        self.state.set_momentum(momentum);
    }

    #[inline]
    pub fn base_speed(&self) -> f32 {
        self.state.base_speed
    }

    pub fn set_base_speed(&mut self, base_speed: f32) {
        self.state.base_speed = base_speed.max(0.0);
    }

    #[inline]
    pub fn jump_count(&self) -> u8 {
        self.state.jump_count
    }

    pub fn set_jump_count(&mut self, count: u8) {
        self.state.jump_count = count.min(MAX_JUMP_COUNT);
    }

    /// Dispatch one input edge to its entry point.
    pub fn handle_input<B, P>(&mut self, event: InputEvent, body: &mut B, probe: &P)
    where
        B: CharacterBody + ?Sized,
        P: SpatialProbe + ?Sized,
    {
        match event {
            // The jump button toggles the latch on both edges.
            InputEvent::JumpPressed | InputEvent::JumpReleased => self.on_jump_input(body),
            InputEvent::GrapplePressed { view_direction } => {
                self.try_attach_grapple(body, probe, view_direction);
            }
            InputEvent::GrappleReleased => {
                self.release_grapple(body);
            }
            InputEvent::GrappleBoostPressed => {
                self.apply_grapple_boost(body);
            }
        }
    }

    /// Advance the locomotion rules by one simulation step of `dt` seconds.
    pub fn step<B, P>(&mut self, dt: f32, body: &mut B, probe: &P)
    where
        B: CharacterBody + ?Sized,
        P: SpatialProbe + ?Sized,
    {
        self.clock += dt.max(0.0);
        self.state.double_jumped = false;

        self.expire_deadlines(body);

        self.state.update_momentum(
            &self.config.momentum,
            MomentumInputs {
                in_action: self.state.in_action(),
                grounded: body.is_grounded(),
                still: body.velocity().norm() <= STILL_SPEED_EPS,
                wall_running: self.state.is_wall_running(),
            },
        );
        body.set_max_walk_speed(self.state.max_walk_speed());

        self.state.current_frame_height = body.position().z;

        if self.state.was_falling && body.is_grounded() {
            log::debug!("landed at z={:.1}", self.state.current_frame_height);
            self.state.land();
        }

        if self.state.jump_latched {
            self.apply_ground_jump(body);
        }

        if body.is_falling() {
            if self.state.mode() == LocomotionMode::Grounded {
                self.enter(LocomotionMode::Falling);
            }

            self.check_wall_run(body, probe);

            if !self.state.is_wall_running() && !self.state.in_action() {
                self.ramp_gravity(body);
            }
        } else {
            self.settle(body);
        }

        if self.state.grapple_attached() {
            self.integrate_grapple(body);
        }

        self.refresh_boost_availability();

        self.state.last_frame_height = self.state.current_frame_height;
        self.state.was_falling = body.is_falling();
    }

    /// Move to `next`, logging and rejecting transitions the table forbids.
    pub(crate) fn enter(&mut self, next: LocomotionMode) -> bool {
        match self.state.transition(next) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("{err}");
                false
            }
        }
    }

    fn expire_deadlines<B>(&mut self, body: &mut B)
    where
        B: CharacterBody + ?Sized,
    {
        match self.state.mode() {
            LocomotionMode::Vaulting { finish_at } | LocomotionMode::Climbing { finish_at }
                if self.clock >= finish_at =>
            {
                self.finish_vault(body);
            }
            LocomotionMode::WallJumpCooldown { until, .. } if self.clock >= until => {
                let next = if body.is_grounded() {
                    LocomotionMode::Grounded
                } else {
                    LocomotionMode::Falling
                };
                self.enter(next);
            }
            _ => {}
        }
    }

    /// Body is supported (or flying): drop any wall run and reset gravity.
    fn settle<B>(&mut self, body: &mut B)
    where
        B: CharacterBody + ?Sized,
    {
        if body.is_grounded()
            && matches!(
                self.state.mode(),
                LocomotionMode::Falling
                    | LocomotionMode::WallRunning { .. }
                    | LocomotionMode::WallJumpCooldown { .. }
            )
        {
            self.enter(LocomotionMode::Grounded);
        }

        self.state.wall_contact = None;
        self.state.gravity_ramp = 0.0;
        self.state.gravity_scale = self.config.gravity.default_scale;
        body.set_gravity_scale(self.state.gravity_scale);
        body.set_plane_constraint(None);
    }

    fn ramp_gravity<B>(&mut self, body: &mut B)
    where
        B: CharacterBody + ?Sized,
    {
        let g = &self.config.gravity;
        self.state.gravity_ramp = (self.state.gravity_ramp + g.ramp_per_step).min(g.ramp_max);
        self.state.gravity_scale = self.state.gravity_ramp;
        body.set_gravity_scale(self.state.gravity_scale);
    }

    fn refresh_boost_availability(&mut self) {
        let cooldown = self.config.grapple.boost_cooldown;
        self.state.boost_available = self
            .state
            .last_boost_time
            .is_none_or(|t| self.clock - t > cooldown);
    }
}
