//! Jump dispatch: grounded jump, double jump and the wall-run kick-off.

use crate::{
    body::CharacterBody,
    constants::MAX_JUMP_COUNT,
    controller::Locomotion,
    mode::LocomotionMode,
    types::{Vec3, planar, safe_normal},
};

impl Locomotion {
    /// Handle one jump edge (press or release).
    ///
    /// The first edge latches the jump and spends a jump; the next edge clears the latch. Spending
    /// the second jump while falling is a double jump. Any edge while wall-running kicks the
    /// player off the wall instead.
    pub fn on_jump_input<B>(&mut self, body: &mut B)
    where
        B: CharacterBody + ?Sized,
    {
        if self.state.jump_latched {
            self.state.jump_latched = false;
        } else {
            self.state.jump_latched = true;
            let spent = self.state.jump_count < MAX_JUMP_COUNT;
            if spent {
                self.state.jump_count += 1;
            }

            if spent
                && self.state.jump_count == MAX_JUMP_COUNT
                && body.is_falling()
                && !self.state.grapple_attached()
                && !self.state.is_wall_running()
            {
                self.double_jump(body);
            }
        }

        if self.state.is_wall_running() {
            self.wall_jump(body);
        }
    }

    /// Grounded jump impulse, applied every step while the latch is held and the body is supported.
    pub(crate) fn apply_ground_jump<B>(&mut self, body: &mut B)
    where
        B: CharacterBody + ?Sized,
    {
        if !self.state.jump_latched || !body.is_grounded() {
            return;
        }

        let cfg = &self.config.jump;
        let dir = body.forward() + safe_normal(body.velocity());
        let scale = cfg.ground_planar_base + self.state.momentum() * cfg.ground_momentum_factor;
        body.add_impulse(Vec3::new(dir.x * scale, dir.y * scale, cfg.ground_vertical));
    }

    fn double_jump<B>(&mut self, body: &mut B)
    where
        B: CharacterBody + ?Sized,
    {
        self.state.double_jumped = true;

        let carried = planar(body.velocity());
        body.set_velocity(Vec3::zeros());

        let cfg = &self.config.jump;
        let impulse = if self.axes.is_idle() {
            Vec3::new(0.0, 0.0, cfg.double_vertical)
        } else {
            // Velocity was just zeroed, so the direction is the facing alone.
            let dir = body.forward() + safe_normal(body.velocity());
            let scale = cfg.double_planar_base + self.state.momentum() * cfg.double_momentum_factor;
            Vec3::new(dir.x * scale, dir.y * scale, cfg.double_vertical)
                + carried * cfg.double_carry_factor
        };
        body.add_impulse(impulse);
        log::debug!("double jump impulse {impulse:?}");
    }

    fn wall_jump<B>(&mut self, body: &mut B)
    where
        B: CharacterBody + ?Sized,
    {
        let LocomotionMode::WallRunning { side } = self.state.mode() else {
            return;
        };
        let cfg = self.config.wall_run;
        let until = self.clock + cfg.jump_cooldown;
        if !self.enter(LocomotionMode::WallJumpCooldown { side, until }) {
            return;
        }

        self.release_wall_constraints(body);

        let bonus = self.state.momentum() / cfg.jump_momentum_divisor;
        let mut launch = body.right() * (-side.sign() * (cfg.jump_lateral + bonus));
        launch.z = cfg.jump_vertical + bonus;
        body.launch(launch);

        self.state.jump_count = 1;
        log::debug!("wall jump off {side:?} wall, cooldown until {until:.2}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        body::MovementMode,
        intent::{InputEvent, MovementAxes},
        mode::WallSide,
        test_support::{RecordingBody, ScriptedProbe},
    };

    const DT: f32 = 1.0 / 60.0;

    fn press_release(loco: &mut Locomotion, body: &mut RecordingBody) {
        let probe = ScriptedProbe::empty();
        loco.handle_input(InputEvent::JumpPressed, body, &probe);
        loco.handle_input(InputEvent::JumpReleased, body, &probe);
    }

    #[test]
    fn press_spends_a_jump_and_release_only_clears_the_latch() {
        let mut loco = Locomotion::default();
        let mut body = RecordingBody::grounded();
        let probe = ScriptedProbe::empty();

        loco.handle_input(InputEvent::JumpPressed, &mut body, &probe);
        assert!(loco.state().jump_latched);
        assert_eq!(loco.jump_count(), 1);

        loco.handle_input(InputEvent::JumpReleased, &mut body, &probe);
        assert!(!loco.state().jump_latched);
        assert_eq!(loco.jump_count(), 1);
        assert!(body.impulses.is_empty());
    }

    #[test]
    fn grounded_jump_applies_forward_and_vertical_impulse_while_latched() {
        let mut loco = Locomotion::default();
        let mut body = RecordingBody::grounded();
        let probe = ScriptedProbe::empty();

        loco.handle_input(InputEvent::JumpPressed, &mut body, &probe);
        loco.step(DT, &mut body, &probe);

        // Standing still facing +X: planar direction is the facing alone, and the step's momentum
        // update has already granted one point.
        assert_eq!(body.impulses.len(), 1);
        assert!((body.impulses[0] - Vec3::new(10_010.0, 0.0, 125_000.0)).norm() < 1.0e-2);

        loco.handle_input(InputEvent::JumpReleased, &mut body, &probe);
        loco.step(DT, &mut body, &probe);
        assert_eq!(body.impulses.len(), 1);
    }

    #[test]
    fn idle_double_jump_is_straight_up_and_pulses_for_one_step() {
        let mut loco = Locomotion::default();
        let mut body = RecordingBody::falling();
        body.set_velocity(Vec3::new(300.0, 100.0, -200.0));
        loco.set_jump_count(1);

        let probe = ScriptedProbe::empty();
        loco.handle_input(InputEvent::JumpPressed, &mut body, &probe);

        assert_eq!(body.impulses, vec![Vec3::new(0.0, 0.0, 150_000.0)]);
        assert_eq!(body.velocity, Vec3::new(0.0, 0.0, 1500.0));
        assert!(loco.state().double_jumped);
        assert_eq!(loco.jump_count(), 2);

        loco.step(DT, &mut body, &probe);
        assert!(!loco.state().double_jumped);
    }

    #[test]
    fn moving_double_jump_carries_planar_velocity() {
        let mut loco = Locomotion::default();
        loco.set_axes(MovementAxes::new(1.0, 0.0));
        loco.set_momentum(100.0);
        loco.set_jump_count(1);
        let mut body = RecordingBody::falling();
        body.set_velocity(Vec3::new(300.0, 100.0, -200.0));

        press_release(&mut loco, &mut body);

        // (forward * (50000 + 100*50)) + planar velocity * 50
        let expected = Vec3::new(55_000.0 + 15_000.0, 5_000.0, 150_000.0);
        assert_eq!(body.impulses.len(), 1);
        assert!((body.impulses[0] - expected).norm() < 1.0e-1);
    }

    #[test]
    fn third_press_is_not_another_double_jump() {
        let mut loco = Locomotion::default();
        let mut body = RecordingBody::falling();
        loco.set_jump_count(1);

        press_release(&mut loco, &mut body);
        press_release(&mut loco, &mut body);

        assert_eq!(loco.jump_count(), 2);
        assert_eq!(body.impulses.len(), 1);
    }

    #[test]
    fn grapple_blocks_double_jump() {
        let mut loco = Locomotion::default();
        let mut body = RecordingBody::falling();
        loco.set_jump_count(1);
        loco.state
            .transition(LocomotionMode::Grappling { anchor: Vec3::new(0.0, 0.0, 2000.0) })
            .unwrap();

        press_release(&mut loco, &mut body);

        assert!(body.impulses.is_empty());
        assert!(!loco.state().double_jumped);
    }

    #[test]
    fn jump_while_wall_running_kicks_off_the_wall() {
        let mut loco = Locomotion::default();
        let mut body = RecordingBody::falling();
        loco.set_momentum(500.0);
        loco.set_jump_count(1);
        loco.state.transition(LocomotionMode::Falling).unwrap();
        loco.state
            .transition(LocomotionMode::WallRunning { side: WallSide::Left })
            .unwrap();

        let probe = ScriptedProbe::empty();
        loco.handle_input(InputEvent::JumpPressed, &mut body, &probe);

        assert!(body.impulses.is_empty());
        // Wall on the left: pushed toward +Y.
        assert_eq!(body.launches.len(), 1);
        assert!((body.launches[0] - Vec3::new(0.0, 500.0, 900.0)).norm() < 1.0e-3);
        assert_eq!(loco.jump_count(), 1);
        assert!(matches!(
            loco.mode(),
            LocomotionMode::WallJumpCooldown { side: WallSide::Left, .. }
        ));
        assert!(loco.state().in_action());

        // The release edge must not launch again.
        loco.handle_input(InputEvent::JumpReleased, &mut body, &probe);
        assert_eq!(body.launches.len(), 1);
    }

    #[test]
    fn wall_jump_cooldown_expires_after_half_a_second() {
        let mut loco = Locomotion::default();
        let mut body = RecordingBody::falling();
        loco.set_axes(MovementAxes::new(1.0, 0.0));
        loco.state.transition(LocomotionMode::Falling).unwrap();
        loco.state
            .transition(LocomotionMode::WallRunning { side: WallSide::Right })
            .unwrap();
        let probe = ScriptedProbe::empty();
        loco.handle_input(InputEvent::JumpPressed, &mut body, &probe);

        for _ in 0..20 {
            loco.step(DT, &mut body, &probe);
        }
        assert!(loco.state().is_jumping_off_wall());

        for _ in 0..20 {
            loco.step(DT, &mut body, &probe);
        }
        assert_eq!(loco.mode(), LocomotionMode::Falling);
        assert!(!loco.state().in_action());
    }

    #[test]
    fn landing_during_cooldown_grounds_the_player() {
        let mut loco = Locomotion::default();
        let mut body = RecordingBody::falling();
        loco.state.transition(LocomotionMode::Falling).unwrap();
        loco.state
            .transition(LocomotionMode::WallRunning { side: WallSide::Right })
            .unwrap();
        let probe = ScriptedProbe::empty();
        loco.handle_input(InputEvent::JumpPressed, &mut body, &probe);
        loco.step(DT, &mut body, &probe);

        body.set_movement_mode(MovementMode::Walking);
        loco.step(DT, &mut body, &probe);

        assert_eq!(loco.mode(), LocomotionMode::Grounded);
        assert_eq!(loco.jump_count(), 0);
    }
}
