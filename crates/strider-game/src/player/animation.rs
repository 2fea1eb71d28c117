//! Per-frame animation parameter writes
//!
//! Maps the integrator's world-space velocity into the character's local
//! frame and pushes the results, together with the aim and roll flags,
//! into the animation graph once per visual frame.

use glam::{Quat, Vec3};

use crate::animation::{AnimParam, Animator, ParamId};
use crate::error::PlayerError;
use crate::input::ControlFrame;

/// Writes locomotion state into resolved animation parameters
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    forward_speed: ParamId,
    strafe_speed: ParamId,
    aiming: ParamId,
    jump_roll: ParamId,
}

impl AnimationDriver {
    /// Resolve every parameter up front; a graph missing one is a fatal
    /// wiring error, not something to discover mid-frame
    pub fn bind<A: Animator>(animator: &A) -> Result<Self, PlayerError> {
        Ok(Self {
            forward_speed: Self::resolve(animator, AnimParam::ForwardSpeed)?,
            strafe_speed: Self::resolve(animator, AnimParam::StrafeSpeed)?,
            aiming: Self::resolve(animator, AnimParam::Aiming)?,
            jump_roll: Self::resolve(animator, AnimParam::JumpRoll)?,
        })
    }

    fn resolve<A: Animator>(animator: &A, param: AnimParam) -> Result<ParamId, PlayerError> {
        animator
            .resolve(param.name())
            .ok_or(PlayerError::MissingDependency(param.name()))
    }

    /// Write this frame's parameters.
    ///
    /// `orientation` maps character-local space (+Z facing) to world
    /// space; vertical velocity never reaches the graph.
    pub fn write<A: Animator>(
        &self,
        animator: &mut A,
        velocity: Vec3,
        orientation: Quat,
        frame: &mut ControlFrame,
    ) {
        let planar = Vec3::new(velocity.x, 0.0, velocity.z);
        let local = orientation.inverse() * planar;

        animator.set_float(self.forward_speed, local.z);
        animator.set_float(self.strafe_speed, local.x);
        animator.set_bool(self.aiming, frame.aiming);

        if frame.take_roll() {
            animator.set_trigger(self.jump_roll);
        }
    }
}
