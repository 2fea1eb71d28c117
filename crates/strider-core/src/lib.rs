//! Strider Core - Shared types for the Strider locomotion toolkit
//!
//! This crate provides the foundational pieces used by the other crates:
//! - Mathematical primitives (re-exported from glam)
//! - Transform type for positioning bodies and attachment handles
//! - Frame clock driving the two-rate visual/fixed tick scheme

pub mod time;
pub mod types;

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use time::{ClockConfig, FrameClock};
pub use types::Transform;
