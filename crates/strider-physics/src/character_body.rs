//! Capsule body moved by swept collision queries
//!
//! The body owns no velocity. It is pure transport: callers decide the
//! translation for a step, the body sweeps its capsule, and the grounded
//! flag reflects what the sweep found.

use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;

use crate::CollisionWorld;

/// Capsule and sweep tuning for a character body
#[derive(Debug, Clone)]
pub struct CharacterBodyConfig {
    /// Capsule height (default: 1.8m)
    pub height: f32,
    /// Capsule radius (default: 0.4m)
    pub radius: f32,
    /// Maximum slope angle in degrees the sweep treats as walkable (default: 45)
    pub max_slope_angle: f32,
    /// Step height for small ledges (default: 0.25m)
    pub step_height: f32,
    /// Skin width kept between capsule and geometry (default: 0.02m)
    pub skin_width: f32,
    /// Snap to the ground when walking down slopes
    pub snap_to_ground: bool,
    /// Maximum ground snap distance
    pub ground_snap_distance: f32,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.4,
            max_slope_angle: 45.0,
            step_height: 0.25,
            skin_width: 0.02,
            snap_to_ground: true,
            ground_snap_distance: 0.2,
        }
    }
}

/// A capsule-shaped body with a swept `move_by` primitive and grounded oracle
#[derive(Debug)]
pub struct CharacterBody {
    /// Configuration
    pub config: CharacterBodyConfig,
    /// Feet position in world space
    position: Vec3,
    /// Whether the last sweep ended resting on a surface
    grounded: bool,
    /// Collider backing the capsule, present after `spawn`
    collider_handle: Option<ColliderHandle>,
    controller: KinematicCharacterController,
}

impl CharacterBody {
    /// Create a body with default config
    pub fn new() -> Self {
        Self::with_config(CharacterBodyConfig::default())
    }

    /// Create a body with custom config
    pub fn with_config(config: CharacterBodyConfig) -> Self {
        let mut controller = KinematicCharacterController::default();
        controller.max_slope_climb_angle = config.max_slope_angle.to_radians();
        controller.min_slope_slide_angle = config.max_slope_angle.to_radians();
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(config.step_height),
            min_width: CharacterLength::Relative(0.5),
            include_dynamic_bodies: true,
        });
        controller.snap_to_ground = if config.snap_to_ground {
            Some(CharacterLength::Absolute(config.ground_snap_distance))
        } else {
            None
        };
        controller.offset = CharacterLength::Absolute(config.skin_width);

        Self {
            config,
            position: Vec3::ZERO,
            grounded: false,
            collider_handle: None,
            controller,
        }
    }

    /// Place the capsule collider into the world at a feet position
    pub fn spawn(&mut self, world: &mut CollisionWorld, position: Vec3) -> ColliderHandle {
        self.position = position;

        let half_height = (self.config.height - 2.0 * self.config.radius) / 2.0;
        let collider = ColliderBuilder::capsule_y(half_height.max(0.01), self.config.radius)
            .translation(self.center_translation())
            .friction(0.0)
            .restitution(0.0)
            .build();

        let handle = world.add_static(collider);
        self.collider_handle = Some(handle);
        handle
    }

    /// Sweep the capsule by the desired translation, resolving collisions
    /// and refreshing the grounded flag
    pub fn move_by(&mut self, world: &mut CollisionWorld, desired_translation: Vec3, dt: f32) {
        let Some(collider_handle) = self.collider_handle else {
            return;
        };

        let Some(collider) = world.collider_set.get(collider_handle) else {
            return;
        };

        let shape = collider.shape();
        let current_pos = Isometry::translation(
            self.position.x,
            self.position.y + self.config.height / 2.0,
            self.position.z,
        );

        let movement = self.controller.move_shape(
            dt,
            &world.rigid_body_set,
            &world.collider_set,
            world.query_pipeline(),
            shape,
            &current_pos,
            vector![
                desired_translation.x,
                desired_translation.y,
                desired_translation.z
            ],
            QueryFilter::default().exclude_collider(collider_handle),
            |_| {},
        );

        self.grounded = movement.grounded;

        self.position.x += movement.translation.x;
        self.position.y += movement.translation.y;
        self.position.z += movement.translation.z;

        let center = self.center_translation();
        if let Some(collider) = world.collider_set.get_mut(collider_handle) {
            collider.set_translation(center);
        }
    }

    /// Teleport the body, resetting any contact state
    pub fn set_position(&mut self, world: &mut CollisionWorld, position: Vec3) {
        self.position = position;
        self.grounded = false;

        let center = self.center_translation();
        if let Some(handle) = self.collider_handle {
            if let Some(collider) = world.collider_set.get_mut(handle) {
                collider.set_translation(center);
            }
        }
    }

    /// Feet position in world space
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Whether the body currently rests on a supporting surface
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn center_translation(&self) -> nalgebra::Vector3<f32> {
        vector![
            self.position.x,
            self.position.y + self.config.height / 2.0,
            self.position.z
        ]
    }
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self::new()
    }
}
