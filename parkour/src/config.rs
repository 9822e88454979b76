//! Data-driven locomotion tuning.
//!
//! Every field defaults to the matching value in [`crate::constants`]. JSON documents only need
//! to name what they override:
//!
//! ```text
//! { "base_speed": 700.0, "grapple": { "boost_cooldown": 1.5 } }
//! ```

use serde::Deserialize;

use crate::constants::*;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse locomotion config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid locomotion config `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Momentum accumulation rules.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    pub max: f32,
    pub soft_cap: f32,
    pub gain_per_step: f32,
    pub idle_decay_per_step: f32,
    pub over_cap_decay_per_step: f32,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            max: MOMENTUM_MAX,
            soft_cap: MOMENTUM_SOFT_CAP,
            gain_per_step: MOMENTUM_GAIN_PER_STEP,
            idle_decay_per_step: MOMENTUM_IDLE_DECAY_PER_STEP,
            over_cap_decay_per_step: MOMENTUM_OVER_CAP_DECAY_PER_STEP,
        }
    }
}

/// Airborne gravity ramp.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    pub ramp_per_step: f32,
    pub ramp_max: f32,
    pub default_scale: f32,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            ramp_per_step: GRAVITY_RAMP_PER_STEP,
            ramp_max: GRAVITY_RAMP_MAX,
            default_scale: DEFAULT_GRAVITY_SCALE,
        }
    }
}

/// Wall detection, wall-run and wall-jump tuning.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WallRunConfig {
    pub probe_distance: f32,
    pub probe_radius: f32,
    pub speed_base: f32,
    pub gravity_scale: f32,
    pub exit_launch: f32,
    pub jump_lateral: f32,
    pub jump_vertical: f32,
    pub jump_momentum_divisor: f32,
    pub jump_cooldown: f32,
}

impl Default for WallRunConfig {
    fn default() -> Self {
        Self {
            probe_distance: WALL_PROBE_DISTANCE,
            probe_radius: WALL_PROBE_RADIUS,
            speed_base: WALL_RUN_SPEED_BASE,
            gravity_scale: WALL_RUN_GRAVITY_SCALE,
            exit_launch: WALL_EXIT_LAUNCH,
            jump_lateral: WALL_JUMP_LATERAL,
            jump_vertical: WALL_JUMP_VERTICAL,
            jump_momentum_divisor: WALL_JUMP_MOMENTUM_DIVISOR,
            jump_cooldown: WALL_JUMP_COOLDOWN,
        }
    }
}

/// Grounded and double jump impulses.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    pub ground_planar_base: f32,
    pub ground_momentum_factor: f32,
    pub ground_vertical: f32,
    pub double_planar_base: f32,
    pub double_momentum_factor: f32,
    pub double_vertical: f32,
    pub double_carry_factor: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            ground_planar_base: GROUND_JUMP_PLANAR_BASE,
            ground_momentum_factor: GROUND_JUMP_MOMENTUM_FACTOR,
            ground_vertical: GROUND_JUMP_VERTICAL,
            double_planar_base: DOUBLE_JUMP_PLANAR_BASE,
            double_momentum_factor: DOUBLE_JUMP_MOMENTUM_FACTOR,
            double_vertical: DOUBLE_JUMP_VERTICAL,
            double_carry_factor: DOUBLE_JUMP_CARRY_FACTOR,
        }
    }
}

/// Grapple probe, release and boost tuning.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GrappleConfig {
    pub range: f32,
    pub probe_radius: f32,
    pub release_impulse: f32,
    pub release_vertical: f32,
    pub release_momentum: f32,
    pub boost_impulse: f32,
    pub boost_cooldown: f32,
}

impl Default for GrappleConfig {
    fn default() -> Self {
        Self {
            range: GRAPPLE_RANGE,
            probe_radius: GRAPPLE_PROBE_RADIUS,
            release_impulse: GRAPPLE_RELEASE_IMPULSE,
            release_vertical: GRAPPLE_RELEASE_VERTICAL,
            release_momentum: GRAPPLE_RELEASE_MOMENTUM,
            boost_impulse: GRAPPLE_BOOST_IMPULSE,
            boost_cooldown: GRAPPLE_BOOST_COOLDOWN,
        }
    }
}

/// Vault/climb probe geometry and timing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    pub reach: f32,
    pub probe_drop: f32,
    pub top_probe_setback: f32,
    pub top_probe_rise: f32,
    pub top_probe_length: f32,
    pub far_probe_setback: f32,
    pub far_probe_rise: f32,
    pub far_probe_length: f32,
    pub min_height: f32,
    pub thickness_tolerance: f32,
    pub climb_offset: f32,
    pub top_clearance: f32,
    pub momentum_bonus: f32,
    pub duration: f32,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            reach: VAULT_REACH,
            probe_drop: VAULT_PROBE_DROP,
            top_probe_setback: VAULT_TOP_PROBE_SETBACK,
            top_probe_rise: VAULT_TOP_PROBE_RISE,
            top_probe_length: VAULT_TOP_PROBE_LENGTH,
            far_probe_setback: VAULT_FAR_PROBE_SETBACK,
            far_probe_rise: VAULT_FAR_PROBE_RISE,
            far_probe_length: VAULT_FAR_PROBE_LENGTH,
            min_height: VAULT_MIN_HEIGHT,
            thickness_tolerance: WALL_THICKNESS_TOLERANCE,
            climb_offset: CLIMB_OFFSET,
            top_clearance: VAULT_TOP_CLEARANCE,
            momentum_bonus: VAULT_MOMENTUM_BONUS,
            duration: VAULT_DURATION,
        }
    }
}

/// Complete locomotion tuning.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub base_speed: f32,
    pub momentum: MomentumConfig,
    pub gravity: GravityConfig,
    pub wall_run: WallRunConfig,
    pub jump: JumpConfig,
    pub grapple: GrappleConfig,
    pub vault: VaultConfig,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            base_speed: DEFAULT_BASE_SPEED,
            momentum: MomentumConfig::default(),
            gravity: GravityConfig::default(),
            wall_run: WallRunConfig::default(),
            jump: JumpConfig::default(),
            grapple: GrappleConfig::default(),
            vault: VaultConfig::default(),
        }
    }
}

impl LocomotionConfig {
    /// Parse a (possibly partial) JSON document and validate the result.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }

        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a non-negative finite number",
                })
            }
        }

        non_negative("base_speed", self.base_speed)?;
        positive("momentum.max", self.momentum.max)?;
        non_negative("momentum.soft_cap", self.momentum.soft_cap)?;
        if self.momentum.soft_cap > self.momentum.max {
            return Err(ConfigError::Invalid {
                field: "momentum.soft_cap",
                reason: "must not exceed momentum.max",
            });
        }
        non_negative("gravity.ramp_max", self.gravity.ramp_max)?;
        positive("wall_run.probe_radius", self.wall_run.probe_radius)?;
        positive("wall_run.probe_distance", self.wall_run.probe_distance)?;
        positive("wall_run.jump_momentum_divisor", self.wall_run.jump_momentum_divisor)?;
        non_negative("wall_run.jump_cooldown", self.wall_run.jump_cooldown)?;
        positive("grapple.range", self.grapple.range)?;
        positive("grapple.probe_radius", self.grapple.probe_radius)?;
        non_negative("grapple.boost_cooldown", self.grapple.boost_cooldown)?;
        positive("vault.duration", self.vault.duration)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants_and_validate() {
        let config = LocomotionConfig::default();
        assert_eq!(config.momentum.max, MOMENTUM_MAX);
        assert_eq!(config.vault.duration, VAULT_DURATION);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config = LocomotionConfig::from_json_str(
            r#"{ "base_speed": 700.0, "grapple": { "boost_cooldown": 1.5 } }"#,
        )
        .unwrap();

        assert_eq!(config.base_speed, 700.0);
        assert_eq!(config.grapple.boost_cooldown, 1.5);
        assert_eq!(config.grapple.range, GRAPPLE_RANGE);
        assert_eq!(config.wall_run, WallRunConfig::default());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = LocomotionConfig::from_json_str("{ base_speed: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn soft_cap_above_max_is_rejected() {
        let err = LocomotionConfig::from_json_str(r#"{ "momentum": { "max": 100.0 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "momentum.soft_cap",
                ..
            }
        ));
    }

    #[test]
    fn zero_vault_duration_is_rejected() {
        let err =
            LocomotionConfig::from_json_str(r#"{ "vault": { "duration": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "vault.duration", .. }));
    }
}
