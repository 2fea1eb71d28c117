//! Player controller lifecycle
//!
//! An external driver owns the loop and calls `tick_visual` once per
//! rendered frame and `tick_fixed` once per fixed physics step. All
//! validation happens in `new`; the ticks are total functions.

use glam::{Quat, Vec3};
use tracing::trace;

use strider_core::Transform;
use strider_physics::{CharacterBody, CharacterBodyConfig, CollisionWorld};

use crate::animation::Animator;
use crate::error::PlayerError;
use crate::input::{ControlFrame, InputSource};

use super::{AimController, AnimationDriver, Locomotion, LocomotionConfig};

/// A playable character: capsule body, velocity integrator, aim handle,
/// and animation parameter drive
#[derive(Debug)]
pub struct PlayerController {
    locomotion: Locomotion,
    body: CharacterBody,
    frame: ControlFrame,
    animation: AnimationDriver,
    aim: AimController,
    aim_handle: Transform,
    orientation: Quat,
}

impl PlayerController {
    /// Build a controller, validating configuration and resolving every
    /// animation parameter. The only fallible step in the lifecycle.
    pub fn new<A: Animator>(
        config: LocomotionConfig,
        body_config: CharacterBodyConfig,
        gravity: Vec3,
        animator: &A,
    ) -> Result<Self, PlayerError> {
        Ok(Self {
            locomotion: Locomotion::new(config, gravity)?,
            body: CharacterBody::with_config(body_config),
            frame: ControlFrame::new(),
            animation: AnimationDriver::bind(animator)?,
            aim: AimController::default(),
            aim_handle: Transform::default(),
            orientation: Quat::IDENTITY,
        })
    }

    /// Place the character's capsule in the world at a feet position
    pub fn spawn(&mut self, world: &mut CollisionWorld, position: Vec3) {
        self.body.spawn(world, position);
    }

    /// Visual-frame tick: latch input, adjust the aim handle, write
    /// animation parameters
    pub fn tick_visual<S: InputSource, A: Animator>(&mut self, source: &S, animator: &mut A) {
        self.frame.sample(source);

        self.aim_handle.rotation = self.aim.adjust(self.frame.aim, self.aim_handle.rotation);

        self.animation.write(
            animator,
            self.locomotion.velocity(),
            self.orientation,
            &mut self.frame,
        );
    }

    /// Fixed-step tick: integrate velocity and sweep the capsule.
    ///
    /// `forward` is the reference direction the input's forward axis maps
    /// to, typically the camera's facing for this frame.
    pub fn tick_fixed(&mut self, world: &mut CollisionWorld, forward: Vec3, dt: f32) {
        let grounded = self.body.is_grounded();
        trace!(grounded, "locomotion step");

        let translation = self
            .locomotion
            .integrate(&mut self.frame, forward, grounded, dt);

        self.body.move_by(world, translation, dt);
    }

    /// Teleport the character, zeroing its velocity
    pub fn teleport(&mut self, world: &mut CollisionWorld, position: Vec3) {
        self.body.set_position(world, position);
        self.locomotion.set_velocity(Vec3::ZERO);
    }

    /// Feet position in world space
    pub fn position(&self) -> Vec3 {
        self.body.position()
    }

    /// Current world-space velocity
    pub fn velocity(&self) -> Vec3 {
        self.locomotion.velocity()
    }

    /// Whether the body rests on a supporting surface
    pub fn is_grounded(&self) -> bool {
        self.body.is_grounded()
    }

    /// Latched input state, readable for HUD or debugging
    pub fn frame(&self) -> &ControlFrame {
        &self.frame
    }

    /// The aim handle this controller orients; a rig attaches to it
    pub fn aim_handle(&self) -> &Transform {
        &self.aim_handle
    }

    /// Mutable aim handle access, for posing the rest pose
    pub fn aim_handle_mut(&mut self) -> &mut Transform {
        &mut self.aim_handle
    }

    /// Rotation mapping character-local space (+Z facing) to world space
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }
}
