use crate::{
    mode::{LocomotionMode, TransitionError, WallSide},
    types::Vec3,
};

/// Results of the last vault/climb probe sequence.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ObstacleProbe {
    /// Point where the forward probe met the wall face.
    pub wall_location: Vec3,
    /// Normal of the wall face, pointing back at the player.
    pub wall_normal: Vec3,
    /// Height of the wall top.
    pub wall_top_height: f32,
    /// Height of the surface found behind the wall face, if any.
    pub far_height: Option<f32>,
    /// Too thick to vault over; the player climbs onto it instead.
    pub wall_thick: bool,
}

/// Per-player locomotion record.
///
/// Created with the player and mutated in place by every sub-algorithm once per step. The mode
/// is private so every change goes through [`LocomotionState::transition`]; momentum is private
/// so it can never leave `[0, momentum_max]`.
#[derive(Clone, Debug)]
pub struct LocomotionState {
    mode: LocomotionMode,
    momentum: f32,
    momentum_max: f32,

    /// Speed floor before momentum.
    pub base_speed: f32,
    /// Gravity multiplier last pushed to the body.
    pub gravity_scale: f32,
    /// Airborne gravity ramp, reset on landing and when a wall run starts.
    pub gravity_ramp: f32,

    /// Side on which the wall probes last found a runnable wall.
    pub wall_contact: Option<WallSide>,

    /// Jump button latch (set on press, cleared on the next edge).
    pub jump_latched: bool,
    /// Jumps used since the last landing, in `0..=2`.
    pub jump_count: u8,
    /// Pulse set by a double jump, cleared at the start of the following step.
    pub double_jumped: bool,

    /// One-shot boost gate for the current grapple attachment.
    pub has_applied_grapple_boost: bool,
    /// Clock time of the last grapple boost.
    pub last_boost_time: Option<f32>,
    /// Whether the boost cooldown has elapsed, re-evaluated every step.
    pub boost_available: bool,

    pub last_frame_height: f32,
    pub current_frame_height: f32,

    /// Cached result of the last successful vault/climb probe sequence.
    pub obstacle: Option<ObstacleProbe>,

    /// Body was falling at the end of the previous step (landing edge detection).
    pub was_falling: bool,
}

impl LocomotionState {
    pub fn new(base_speed: f32, momentum_max: f32) -> Self {
        Self {
            mode: LocomotionMode::Grounded,
            momentum: 0.0,
            momentum_max: momentum_max.max(0.0),
            base_speed,
            gravity_scale: 1.0,
            gravity_ramp: 0.0,
            wall_contact: None,
            jump_latched: false,
            jump_count: 0,
            double_jumped: false,
            has_applied_grapple_boost: false,
            last_boost_time: None,
            boost_available: true,
            last_frame_height: 0.0,
            current_frame_height: 0.0,
            obstacle: None,
            was_falling: false,
        }
    }

    #[inline]
    pub fn mode(&self) -> LocomotionMode {
        self.mode
    }

    /// Move to `next` if the transition table allows it.
    ///
    /// Re-entering the current mode with identical data is a no-op.
    pub fn transition(&mut self, next: LocomotionMode) -> Result<(), TransitionError> {
        if self.mode == next {
            return Ok(());
        }
        if !self.mode.can_transition_to(&next) {
            return Err(TransitionError {
                from: self.mode,
                to: next,
            });
        }
        log::debug!("locomotion: {:?} -> {:?}", self.mode, next);
        self.mode = next;
        Ok(())
    }

    #[inline]
    pub fn momentum(&self) -> f32 {
        self.momentum
    }

    #[inline]
    pub fn momentum_max(&self) -> f32 {
        self.momentum_max
    }

    /// Set momentum, clamped to `[0, momentum_max]`.
    pub fn set_momentum(&mut self, momentum: f32) {
        self.momentum = if momentum.is_nan() {
            0.0
        } else {
            momentum.clamp(0.0, self.momentum_max)
        };
    }

    pub fn add_momentum(&mut self, delta: f32) {
        self.set_momentum(self.momentum + delta);
    }

    /// Effective max walk speed.
    #[inline]
    pub fn max_walk_speed(&self) -> f32 {
        self.base_speed + self.momentum
    }

    /// Reset the jump bookkeeping on a landing.
    pub fn land(&mut self) {
        self.jump_count = 0;
        self.double_jumped = false;
    }

    /// Height change over the last step; `<= 0` means falling or level.
    #[inline]
    pub fn height_delta(&self) -> f32 {
        self.current_frame_height - self.last_frame_height
    }

    #[inline]
    pub fn in_action(&self) -> bool {
        self.mode.in_action()
    }

    #[inline]
    pub fn is_wall_running(&self) -> bool {
        self.mode.is_wall_running()
    }

    #[inline]
    pub fn is_jumping_off_wall(&self) -> bool {
        self.mode.is_jumping_off_wall()
    }

    #[inline]
    pub fn is_vaulting(&self) -> bool {
        self.mode.is_vaulting()
    }

    #[inline]
    pub fn is_climbing(&self) -> bool {
        self.mode.is_climbing()
    }

    #[inline]
    pub fn grapple_attached(&self) -> bool {
        self.mode.is_grappling()
    }

    #[inline]
    pub fn hook_point(&self) -> Option<Vec3> {
        self.mode.grapple_anchor()
    }

    #[inline]
    pub fn on_left_side(&self) -> bool {
        self.wall_contact == Some(WallSide::Left)
    }

    #[inline]
    pub fn on_right_side(&self) -> bool {
        self.wall_contact == Some(WallSide::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn momentum_setter_clamps_both_ends() {
        let mut state = LocomotionState::new(600.0, 1500.0);

        state.set_momentum(2000.0);
        assert_eq!(state.momentum(), 1500.0);

        state.set_momentum(-10.0);
        assert_eq!(state.momentum(), 0.0);

        state.add_momentum(3.0);
        state.add_momentum(-5.0);
        assert_eq!(state.momentum(), 0.0);
    }

    #[test]
    fn max_walk_speed_is_base_plus_momentum() {
        let mut state = LocomotionState::new(600.0, 1500.0);
        state.set_momentum(250.0);
        assert_eq!(state.max_walk_speed(), 850.0);
    }

    #[test]
    fn illegal_transition_leaves_mode_untouched() {
        let mut state = LocomotionState::new(600.0, 1500.0);
        let err = state
            .transition(LocomotionMode::WallRunning {
                side: WallSide::Left,
            })
            .unwrap_err();

        assert_eq!(err.from, LocomotionMode::Grounded);
        assert_eq!(state.mode(), LocomotionMode::Grounded);
    }

    #[test]
    fn land_resets_jump_bookkeeping() {
        let mut state = LocomotionState::new(600.0, 1500.0);
        state.jump_count = 2;
        state.double_jumped = true;

        state.land();

        assert_eq!(state.jump_count, 0);
        assert!(!state.double_jumped);
    }
}
