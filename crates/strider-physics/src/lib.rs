//! Strider Physics - Collision queries and the capsule motion primitive
//!
//! The locomotion integrator never touches collision geometry directly; it
//! hands a desired translation to [`CharacterBody::move_by`], which sweeps
//! the capsule through this world and reports the grounded state back.

mod character_body;

pub use character_body::{CharacterBody, CharacterBodyConfig};

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;

/// Collision world configuration
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -9.81 on Y axis)
    pub gravity: Vec3,
    /// Simulation timestep (default: 1/60)
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            timestep: 1.0 / 60.0,
        }
    }
}

/// Static and kinematic collision geometry the character moves through
pub struct CollisionWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage (kinematic platforms)
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,

    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl CollisionWorld {
    /// Create a world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Advance kinematic bodies and refresh collision queries
    pub fn step(&mut self) {
        let gravity = vector![
            self.config.gravity.x,
            self.config.gravity.y,
            self.config.gravity.z
        ];

        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        self.query_pipeline.update(&self.collider_set);
    }

    /// Refresh the query pipeline without stepping; needed after inserting
    /// colliders when no step has run yet
    pub fn refresh_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, obstacles)
    pub fn add_static(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Create an infinite ground plane at the given height
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .friction(0.7)
            .restitution(0.0)
            .build();
        self.add_static(ground)
    }

    /// Create a static box obstacle
    pub fn create_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .friction(0.7)
            .build();
        self.add_static(collider)
    }

    /// Add a kinematic platform the character can ride
    pub fn create_platform(&mut self, half_extents: Vec3, position: Vec3) -> RigidBodyHandle {
        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(vector![position.x, position.y, position.z])
            .build();
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .friction(0.7)
            .build();

        let handle = self.rigid_body_set.insert(body);
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        handle
    }

    /// Set the pose a kinematic platform should reach at the next step
    pub fn move_platform(&mut self, handle: RigidBodyHandle, position: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_next_kinematic_translation(vector![position.x, position.y, position.z]);
        }
    }

    /// Get a collider by handle
    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    pub(crate) fn query_pipeline(&self) -> &QueryPipeline {
        &self.query_pipeline
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}
