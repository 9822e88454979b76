pub mod bitmask_flags;
pub mod body;
pub mod config;
pub mod constants;
pub mod controller;
pub mod grapple;
pub mod hazards;
pub mod intent;
pub mod jump;
pub mod kinematic;
pub mod mode;
pub mod momentum;
pub mod probe;
pub mod rapier_world;
pub mod state;
pub mod surface;
pub mod types;
pub mod vault;
pub mod wall_run;

#[cfg(test)]
pub(crate) mod test_support;

pub use body::{CharacterBody, MovementMode};
pub use config::{ConfigError, LocomotionConfig};
pub use controller::Locomotion;
pub use grapple::swing_velocity;
pub use hazards::{BoostGrant, BoostPad, BouncePad, MomentumAffectable};
pub use intent::{InputEvent, MovementAxes};
pub use kinematic::{AdvanceResult, CapsuleSpec, KinematicBody};
pub use mode::{LocomotionMode, TransitionError, WallSide};
pub use probe::{ProbeCategory, ProbeFilter, ProbeHit, SpatialProbe};
pub use rapier_world::{ColliderShapeDef, RapierProbeWorld, WorldStaticDef, rapier3d};
pub use state::{LocomotionState, ObstacleProbe};
pub use surface::{Surface, SurfaceTag};
pub use types::{Quat, Vec3};
