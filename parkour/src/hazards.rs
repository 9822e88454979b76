/*!
World aids that nudge a player's locomotion: boost pads and bounce pads.

Pads never see a concrete player type. Anything that implements [`MomentumAffectable`] can be
boosted or bounced; [`crate::Locomotion`] is the implementation used for players.
*/

use crate::{
    body::CharacterBody,
    constants::{BOOST_PAD_DURATION, BOOST_PAD_MOMENTUM, BOUNCE_PAD_REARM},
    controller::Locomotion,
    types::Vec3,
};

/// Capability exposed to hazards: read/write access to the speed-related locomotion values.
pub trait MomentumAffectable {
    fn momentum(&self) -> f32;
    fn set_momentum(&mut self, momentum: f32);

    fn base_speed(&self) -> f32;
    fn set_base_speed(&mut self, base_speed: f32);

    fn jump_count(&self) -> u8;
    fn set_jump_count(&mut self, count: u8);
}

impl MomentumAffectable for Locomotion {
    fn momentum(&self) -> f32 {
        Locomotion::momentum(self)
    }

    fn set_momentum(&mut self, momentum: f32) {
        Locomotion::set_momentum(self, momentum);
    }

    fn base_speed(&self) -> f32 {
        Locomotion::base_speed(self)
    }

    fn set_base_speed(&mut self, base_speed: f32) {
        Locomotion::set_base_speed(self, base_speed);
    }

    fn jump_count(&self) -> u8 {
        Locomotion::jump_count(self)
    }

    fn set_jump_count(&mut self, count: u8) {
        Locomotion::set_jump_count(self, count);
    }
}

/// Deltas a boost pad actually applied, to be taken back when the boost ends.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoostGrant {
    pub base_speed: f32,
    pub momentum: f32,
}

impl BoostGrant {
    pub fn revert<T>(self, target: &mut T)
    where
        T: MomentumAffectable + ?Sized,
    {
        target.set_base_speed(target.base_speed() - self.base_speed);
        target.set_momentum(target.momentum() - self.momentum);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum BoostPhase {
    Idle,
    Boosting { elapsed: f32, grant: BoostGrant },
}

/// Grants a temporary speed bonus to the first player that overlaps it.
#[derive(Clone, Debug)]
pub struct BoostPad {
    /// Added to the player's base speed for the boost window.
    pub boost_amount: f32,
    pub momentum_bonus: f32,
    /// Length of the boost window in seconds.
    pub boost_duration: f32,
    phase: BoostPhase,
}

impl Default for BoostPad {
    fn default() -> Self {
        Self::new(0.0, BOOST_PAD_DURATION)
    }
}

impl BoostPad {
    pub fn new(boost_amount: f32, boost_duration: f32) -> Self {
        Self {
            boost_amount,
            momentum_bonus: BOOST_PAD_MOMENTUM,
            boost_duration,
            phase: BoostPhase::Idle,
        }
    }

    #[inline]
    pub fn is_boosting(&self) -> bool {
        matches!(self.phase, BoostPhase::Boosting { .. })
    }

    /// A player entered the pad. Only one player is boosted per window.
    pub fn on_overlap<T>(&mut self, target: &mut T) -> bool
    where
        T: MomentumAffectable + ?Sized,
    {
        if self.is_boosting() {
            return false;
        }

        let base_before = target.base_speed();
        target.set_base_speed(base_before + self.boost_amount);
        let momentum_before = target.momentum();
        target.set_momentum(momentum_before + self.momentum_bonus);

        let grant = BoostGrant {
            base_speed: target.base_speed() - base_before,
            momentum: target.momentum() - momentum_before,
        };
        self.phase = BoostPhase::Boosting {
            elapsed: 0.0,
            grant,
        };
        log::debug!("boost pad granted {grant:?}");
        true
    }

    /// Advance the boost window; returns the grant to revert once it has elapsed.
    pub fn tick(&mut self, dt: f32) -> Option<BoostGrant> {
        let BoostPhase::Boosting { elapsed, grant } = &mut self.phase else {
            return None;
        };
        *elapsed += dt.max(0.0);
        if *elapsed < self.boost_duration {
            return None;
        }

        let grant = *grant;
        self.phase = BoostPhase::Idle;
        Some(grant)
    }
}

/// Launches whoever hits it, then needs a moment to re-arm.
#[derive(Clone, Debug)]
pub struct BouncePad {
    /// Velocity change applied on a bounce.
    pub launch_velocity: Vec3,
    pub rearm_after: f32,
    /// Time since the last bounce while disarmed.
    disarmed_for: Option<f32>,
}

impl BouncePad {
    pub fn new(launch_velocity: Vec3) -> Self {
        Self {
            launch_velocity,
            rearm_after: BOUNCE_PAD_REARM,
            disarmed_for: None,
        }
    }

    #[inline]
    pub fn is_interactive(&self) -> bool {
        self.disarmed_for.is_none()
    }

    /// Bounce the target. Leaves it exactly one further jump.
    pub fn on_hit<T, B>(&mut self, target: &mut T, body: &mut B) -> bool
    where
        T: MomentumAffectable + ?Sized,
        B: CharacterBody + ?Sized,
    {
        if !self.is_interactive() {
            return false;
        }

        body.launch(self.launch_velocity);
        target.set_jump_count(1);
        self.disarmed_for = Some(0.0);
        true
    }

    pub fn tick(&mut self, dt: f32) {
        if let Some(elapsed) = self.disarmed_for.as_mut() {
            *elapsed += dt.max(0.0);
            if *elapsed >= self.rearm_after {
                self.disarmed_for = None;
            }
        }
    }
}
