use crate::types::Vec3;

/// Continuous movement axes, polled once per step.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MovementAxes {
    /// Forward/backward axis in `[-1, 1]`.
    pub forward: f32,
    /// Right/left axis in `[-1, 1]`.
    pub right: f32,
}

impl MovementAxes {
    pub fn new(forward: f32, right: f32) -> Self {
        Self { forward, right }
    }

    /// No lateral input on either axis.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.forward == 0.0 && self.right == 0.0
    }
}

/// Edge-triggered input, mapped 1:1 to the locomotion entry points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    JumpPressed,
    JumpReleased,
    /// Grapple button went down while looking along `view_direction`.
    GrapplePressed { view_direction: Vec3 },
    GrappleReleased,
    GrappleBoostPressed,
}
