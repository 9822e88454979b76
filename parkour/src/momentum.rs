//! Momentum accumulator.
//!
//! Momentum is a scalar speed bonus on top of base speed. It grows while the player runs on the
//! ground or along a wall, bleeds off when standing still, and is pulled back toward the soft
//! cap when running fast with no ability active. Discrete events (vault, grapple release, boost
//! pads) add to it through [`LocomotionState::add_momentum`].

use crate::{config::MomentumConfig, state::LocomotionState};

/// Per-step facts the accumulator reads.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MomentumInputs {
    pub in_action: bool,
    pub grounded: bool,
    /// Body speed is effectively zero.
    pub still: bool,
    pub wall_running: bool,
}

impl LocomotionState {
    /// Apply one step of momentum growth and decay.
    ///
    /// The first block is an if/else chain; the over-cap decay is evaluated afterwards against the
    /// updated value, so at the soft cap a grounded step nets `+gain - over_cap_decay`.
    pub fn update_momentum(&mut self, cfg: &MomentumConfig, inputs: MomentumInputs) {
        let mut m = self.momentum();

        if !inputs.in_action && inputs.still && m > 0.0 {
            m -= cfg.idle_decay_per_step;
        } else if !inputs.in_action && inputs.grounded && m <= cfg.soft_cap {
            m += cfg.gain_per_step;
        } else if inputs.wall_running {
            m += cfg.gain_per_step;
        }

        if !inputs.in_action && inputs.grounded && m > cfg.soft_cap {
            m -= cfg.over_cap_decay_per_step;
        }

        self.set_momentum(m);
    }
}
