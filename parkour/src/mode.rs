/*!
Exclusive locomotion mode.

The player is in exactly one of these modes at any instant. Per-mode data (wall side, deadlines,
grapple anchor) lives inside the variant, so combinations like "vaulting while wall-running"
cannot be represented. Every mode change goes through [`LocomotionMode::can_transition_to`].

Legal transitions:

| from               | to                                                             |
|--------------------|----------------------------------------------------------------|
| Grounded           | Falling, Vaulting, Climbing, Grappling                         |
| Falling            | Grounded, WallRunning, Vaulting, Climbing, Grappling           |
| WallRunning(s)     | WallRunning(s), Falling, Grounded, WallJumpCooldown            |
| WallJumpCooldown   | Falling, Grounded                                              |
| Vaulting, Climbing | Grounded (finish), Falling (cancel)                            |
| Grappling          | Falling, Grounded                                              |
*/

use crate::types::Vec3;

/// Which side of the player the wall is on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// Sign of the player's right vector that points toward the wall.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            WallSide::Left => -1.0,
            WallSide::Right => 1.0,
        }
    }

    /// Yaw offset from the wall normal that makes the player run along the wall.
    #[inline]
    pub fn run_yaw_offset_degrees(self) -> f32 {
        match self {
            WallSide::Left => -90.0,
            WallSide::Right => 90.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum LocomotionMode {
    #[default]
    Grounded,
    Falling,
    WallRunning {
        side: WallSide,
    },
    /// Just kicked off a wall; wall runs are suppressed until `until`.
    WallJumpCooldown {
        side: WallSide,
        until: f32,
    },
    Vaulting {
        finish_at: f32,
    },
    Climbing {
        finish_at: f32,
    },
    Grappling {
        anchor: Vec3,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("illegal locomotion transition {from:?} -> {to:?}")]
pub struct TransitionError {
    pub from: LocomotionMode,
    pub to: LocomotionMode,
}

impl LocomotionMode {
    pub fn can_transition_to(&self, next: &LocomotionMode) -> bool {
        use LocomotionMode::*;

        match (*self, *next) {
            (Grounded, Falling | Vaulting { .. } | Climbing { .. } | Grappling { .. }) => true,
            (
                Falling,
                Grounded | WallRunning { .. } | Vaulting { .. } | Climbing { .. } | Grappling { .. },
            ) => true,
            (WallRunning { side: a }, WallRunning { side: b }) => a == b,
            (WallRunning { .. }, Falling | Grounded | WallJumpCooldown { .. }) => true,
            (WallJumpCooldown { .. }, Falling | Grounded) => true,
            (Vaulting { .. } | Climbing { .. }, Grounded | Falling) => true,
            (Grappling { .. }, Falling | Grounded) => true,
            _ => false,
        }
    }

    #[inline]
    pub fn is_wall_running(&self) -> bool {
        matches!(self, LocomotionMode::WallRunning { .. })
    }

    #[inline]
    pub fn is_jumping_off_wall(&self) -> bool {
        matches!(self, LocomotionMode::WallJumpCooldown { .. })
    }

    #[inline]
    pub fn is_vaulting(&self) -> bool {
        matches!(self, LocomotionMode::Vaulting { .. })
    }

    #[inline]
    pub fn is_climbing(&self) -> bool {
        matches!(self, LocomotionMode::Climbing { .. })
    }

    #[inline]
    pub fn is_grappling(&self) -> bool {
        matches!(self, LocomotionMode::Grappling { .. })
    }

    /// An animated, collision-modified ability currently owns control.
    #[inline]
    pub fn in_action(&self) -> bool {
        matches!(
            self,
            LocomotionMode::WallRunning { .. }
                | LocomotionMode::WallJumpCooldown { .. }
                | LocomotionMode::Vaulting { .. }
                | LocomotionMode::Climbing { .. }
        )
    }

    /// Side of the wall being run on or jumped off.
    pub fn wall_side(&self) -> Option<WallSide> {
        match *self {
            LocomotionMode::WallRunning { side } | LocomotionMode::WallJumpCooldown { side, .. } => {
                Some(side)
            }
            _ => None,
        }
    }

    pub fn grapple_anchor(&self) -> Option<Vec3> {
        match *self {
            LocomotionMode::Grappling { anchor } => Some(anchor),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LocomotionMode::*;

    #[test]
    fn in_action_covers_exclusive_abilities_only() {
        assert!(WallRunning { side: WallSide::Left }.in_action());
        assert!(WallJumpCooldown { side: WallSide::Right, until: 1.0 }.in_action());
        assert!(Vaulting { finish_at: 0.1 }.in_action());
        assert!(Climbing { finish_at: 0.1 }.in_action());

        assert!(!Grounded.in_action());
        assert!(!Falling.in_action());
        assert!(!Grappling { anchor: Vec3::zeros() }.in_action());
    }

    #[test]
    fn abilities_cannot_chain_into_each_other() {
        let vaulting = Vaulting { finish_at: 0.15 };
        assert!(!WallRunning { side: WallSide::Left }.can_transition_to(&vaulting));
        assert!(!vaulting.can_transition_to(&WallRunning { side: WallSide::Left }));
        assert!(!Grappling { anchor: Vec3::zeros() }.can_transition_to(&vaulting));
        assert!(!Grappling { anchor: Vec3::zeros() }
            .can_transition_to(&WallRunning { side: WallSide::Right }));
    }

    #[test]
    fn wall_run_can_only_refresh_on_the_same_side() {
        let left = WallRunning { side: WallSide::Left };
        assert!(left.can_transition_to(&left));
        assert!(!left.can_transition_to(&WallRunning { side: WallSide::Right }));
    }

    #[test]
    fn wall_jump_cooldown_blocks_wall_runs() {
        let cooldown = WallJumpCooldown { side: WallSide::Left, until: 0.5 };
        assert!(!cooldown.can_transition_to(&WallRunning { side: WallSide::Left }));
        assert!(cooldown.can_transition_to(&Falling));
        assert!(cooldown.can_transition_to(&Grounded));
    }

    #[test]
    fn side_accessors() {
        assert_eq!(WallSide::Right.sign(), 1.0);
        assert_eq!(WallSide::Left.sign(), -1.0);
        assert_eq!(
            WallJumpCooldown { side: WallSide::Left, until: 0.0 }.wall_side(),
            Some(WallSide::Left)
        );
        assert_eq!(Falling.wall_side(), None);
    }
}
