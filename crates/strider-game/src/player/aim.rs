//! Aim-handle yaw clamping
//!
//! A deliberately partial aim solve: the handle's yaw is clamped to a
//! symmetric half-turn around its rest pose, pitch and roll pass through
//! unchanged. No look-rotation is computed.

use glam::{EulerRot, Quat, Vec3};

/// Clamp a raw yaw angle in degrees to [-90, +90]
///
/// Works on the unnormalized angle so out-of-range poses clamp to the
/// near edge: 200 -> 90, -200 -> -90.
pub fn clamp_yaw_degrees(yaw: f32) -> f32 {
    (yaw + 90.0).clamp(0.0, 180.0) - 90.0
}

/// Clamps an aim handle's yaw while the aim stick is deflected
#[derive(Debug, Clone)]
pub struct AimController {
    /// Minimum aim-stick magnitude before the handle is touched
    pub deadzone: f32,
}

impl Default for AimController {
    fn default() -> Self {
        Self { deadzone: 0.5 }
    }
}

impl AimController {
    /// Produce the handle's new local rotation for this frame.
    ///
    /// Below the deadzone the rotation is returned untouched.
    pub fn adjust(&self, aim: Vec3, rotation: Quat) -> Quat {
        if aim.length() <= self.deadzone {
            return rotation;
        }

        let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
        let clamped = clamp_yaw_degrees(yaw.to_degrees()).to_radians();

        Quat::from_euler(EulerRot::YXZ, clamped, pitch, roll)
    }
}
