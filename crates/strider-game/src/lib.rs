//! Strider Game - Character control built on the collision crate
//!
//! Provides input sampling, the fixed-step locomotion integrator, aim
//! handling, and animation parameter writes.

pub mod animation;
pub mod error;
pub mod input;
pub mod player;

pub use animation::{AimBehaviour, AnimParam, Animator, ParamId, ParameterBoard};
pub use error::PlayerError;
pub use input::{Axis, Button, ControlFrame, InputSource, KeyboardInput};
pub use player::{
    AimController, AnimationDriver, Locomotion, LocomotionConfig, PlayerController,
};
