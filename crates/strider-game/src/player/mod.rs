//! Player character control
//!
//! Ties input sampling, the fixed-step locomotion integrator, aim
//! handling, and animation parameter writes to a capsule body.

mod aim;
mod animation;
mod config;
mod controller;
mod locomotion;

pub use aim::{clamp_yaw_degrees, AimController};
pub use animation::AnimationDriver;
pub use config::LocomotionConfig;
pub use controller::PlayerController;
pub use locomotion::Locomotion;
