/*!
Locomotion tuning constants.

These are the defaults behind [`crate::LocomotionConfig`]. Keeping them together makes tuning
easier and keeps the per-step algorithms free of bare literals.

Notes
- Distances are in centimetres, time in seconds.
- Impulses are mass-scaled (`velocity += impulse / mass`); launches are raw velocity changes.
- World axes: +X forward, +Y right, +Z up.
*/

// --- Momentum ---------------------------------------------------------------------------------

/// Upper bound for accumulated momentum.
pub const MOMENTUM_MAX: f32 = 1500.0;

/// Momentum above which grounded running starts bleeding speed off.
pub const MOMENTUM_SOFT_CAP: f32 = 600.0;

/// Momentum gained per step while running on the ground (below the soft cap) or wall-running.
pub const MOMENTUM_GAIN_PER_STEP: f32 = 1.0;

/// Momentum lost per step while standing still.
pub const MOMENTUM_IDLE_DECAY_PER_STEP: f32 = 5.0;

/// Momentum lost per step while running on the ground above the soft cap.
pub const MOMENTUM_OVER_CAP_DECAY_PER_STEP: f32 = 3.0;

/// Speeds at or below this are treated as standing still (cm/s).
pub const STILL_SPEED_EPS: f32 = 1.0e-3;

/// Default speed floor before momentum is added (cm/s).
pub const DEFAULT_BASE_SPEED: f32 = 600.0;

// --- Gravity ----------------------------------------------------------------------------------

/// Gravity magnitude (cm/s^2). Integrate as a downward acceleration scaled by the gravity scale.
pub const GRAVITY_CMPS2: f32 = 980.0;

/// Gravity ramp increment per airborne step without an active ability.
pub const GRAVITY_RAMP_PER_STEP: f32 = 0.05;

/// Ceiling of the airborne gravity ramp.
pub const GRAVITY_RAMP_MAX: f32 = 3.0;

/// Gravity scale while pinned to a wall.
pub const WALL_RUN_GRAVITY_SCALE: f32 = 15.0;

/// Gravity scale when no ability overrides it.
pub const DEFAULT_GRAVITY_SCALE: f32 = 1.0;

// --- Wall running -----------------------------------------------------------------------------

/// Lateral distance of the wall probe (cm).
pub const WALL_PROBE_DISTANCE: f32 = 50.0;

/// Radius of the wall sphere probe (cm).
pub const WALL_PROBE_RADIUS: f32 = 30.0;

/// Base of the wall-run speed clamp; momentum is added on top (cm/s).
pub const WALL_RUN_SPEED_BASE: f32 = 1200.0;

/// Lateral launch when letting go of a wall without jumping (cm/s).
pub const WALL_EXIT_LAUNCH: f32 = 250.0;

/// Lateral base of the wall-jump launch (cm/s).
pub const WALL_JUMP_LATERAL: f32 = 450.0;

/// Vertical base of the wall-jump launch (cm/s).
pub const WALL_JUMP_VERTICAL: f32 = 850.0;

/// Momentum divisor applied to both wall-jump launch components.
pub const WALL_JUMP_MOMENTUM_DIVISOR: f32 = 10.0;

/// Time after a wall jump during which wall runs cannot start (s).
pub const WALL_JUMP_COOLDOWN: f32 = 0.5;

// --- Jumping ----------------------------------------------------------------------------------

/// Planar scale of the grounded jump impulse before momentum.
pub const GROUND_JUMP_PLANAR_BASE: f32 = 10_000.0;

/// Momentum multiplier of the grounded jump planar scale.
pub const GROUND_JUMP_MOMENTUM_FACTOR: f32 = 10.0;

/// Vertical component of the grounded jump impulse.
pub const GROUND_JUMP_VERTICAL: f32 = 125_000.0;

/// Planar scale of the double-jump impulse before momentum.
pub const DOUBLE_JUMP_PLANAR_BASE: f32 = 50_000.0;

/// Momentum multiplier of the double-jump planar scale.
pub const DOUBLE_JUMP_MOMENTUM_FACTOR: f32 = 50.0;

/// Vertical component of the double-jump impulse.
pub const DOUBLE_JUMP_VERTICAL: f32 = 150_000.0;

/// Multiplier for the pre-jump horizontal velocity carried into a directional double jump.
pub const DOUBLE_JUMP_CARRY_FACTOR: f32 = 50.0;

/// Highest jump count tracked between landings.
pub const MAX_JUMP_COUNT: u8 = 2;

// --- Grapple ----------------------------------------------------------------------------------

/// Reach of the grapple probe along the view direction (cm).
pub const GRAPPLE_RANGE: f32 = 6000.0;

/// Radius of the grapple sphere probe (cm).
pub const GRAPPLE_PROBE_RADIUS: f32 = 2500.0;

/// Forward impulse on release.
pub const GRAPPLE_RELEASE_IMPULSE: f32 = 200_000.0;

/// Vertical impulse on release.
pub const GRAPPLE_RELEASE_VERTICAL: f32 = 450.0;

/// Momentum granted on release.
pub const GRAPPLE_RELEASE_MOMENTUM: f32 = 300.0;

/// Forward impulse of the one-shot swing boost.
pub const GRAPPLE_BOOST_IMPULSE: f32 = 150_000.0;

/// Minimum time between two swing boosts (s).
pub const GRAPPLE_BOOST_COOLDOWN: f32 = 2.0;

// --- Vault / climb ----------------------------------------------------------------------------

/// Forward reach of the wall-finding probe (cm).
pub const VAULT_REACH: f32 = 70.0;

/// Drop below the actor origin for the wall-finding probe (cm).
pub const VAULT_PROBE_DROP: f32 = 44.0;

/// Set-back from the wall face for the top-height probe (cm).
pub const VAULT_TOP_PROBE_SETBACK: f32 = 10.0;

/// Height above the wall point the top-height probe starts from (cm).
pub const VAULT_TOP_PROBE_RISE: f32 = 200.0;

/// Length of the top-height probe (cm).
pub const VAULT_TOP_PROBE_LENGTH: f32 = 200.0;

/// Set-back from the wall face for the far-surface probe (cm).
pub const VAULT_FAR_PROBE_SETBACK: f32 = 50.0;

/// Height above the wall point the far-surface probe starts from (cm).
pub const VAULT_FAR_PROBE_RISE: f32 = 250.0;

/// Length of the far-surface probe (cm).
pub const VAULT_FAR_PROBE_LENGTH: f32 = 300.0;

/// Obstacles must rise more than this above the wall point to be vaulted (cm).
pub const VAULT_MIN_HEIGHT: f32 = 50.0;

/// Top-to-far-surface drops at or below this mark the wall as thick (cm).
pub const WALL_THICKNESS_TOLERANCE: f32 = 10.0;

/// Distance the climb path moves the actor along the wall normal (cm).
pub const CLIMB_OFFSET: f32 = 50.0;

/// How far below the wall top a vault places the actor (cm).
pub const VAULT_TOP_CLEARANCE: f32 = 20.0;

/// Momentum granted when a vault or climb starts.
pub const VAULT_MOMENTUM_BONUS: f32 = 200.0;

/// Duration of the collision-disabled vault/climb reposition (s).
pub const VAULT_DURATION: f32 = 0.15;

// --- Hazards ----------------------------------------------------------------------------------

/// Momentum granted by a boost pad.
pub const BOOST_PAD_MOMENTUM: f32 = 200.0;

/// Default boost pad activation window (s).
pub const BOOST_PAD_DURATION: f32 = 2.0;

/// Time before a bounce pad can launch again (s).
pub const BOUNCE_PAD_REARM: f32 = 0.5;

// --- Body -------------------------------------------------------------------------------------

/// Default body mass used to scale impulses.
pub const DEFAULT_MASS: f32 = 100.0;

/// Capsule radius of the player (cm).
pub const CAPSULE_RADIUS: f32 = 42.0;

/// Capsule half height, measured from the centre to the bottom (cm).
pub const CAPSULE_HALF_HEIGHT: f32 = 96.0;

/// Extra distance below the capsule bottom that still counts as ground (cm).
pub const GROUND_PROBE_DISTANCE: f32 = 2.0;

/// Minimum up component of a ground normal that still counts as walkable.
pub const WALKABLE_NORMAL_Z: f32 = 0.7;

/// Fraction of planar control kept while airborne.
pub const AIR_CONTROL: f32 = 0.2;

/// Practical small length for direction normalization.
pub const DIR_EPS: f32 = 1.0e-6;
