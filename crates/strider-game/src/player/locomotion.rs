//! Fixed-step velocity integration
//!
//! `Locomotion` owns the persistent world-space velocity of a character
//! and advances it once per fixed timestep through an ordered sequence of
//! adjustments. The order is load-bearing: every stage consumes the
//! previous stage's output.

use glam::{Quat, Vec3};

use crate::error::PlayerError;
use crate::input::ControlFrame;

use super::LocomotionConfig;

/// Velocity integrator for a grounded/airborne character
#[derive(Debug, Clone)]
pub struct Locomotion {
    config: LocomotionConfig,
    gravity: Vec3,
    /// Unit vector opposite gravity
    up: Vec3,
    velocity: Vec3,
}

impl Locomotion {
    /// Create an integrator; rejects invalid tuning and zero gravity
    pub fn new(config: LocomotionConfig, gravity: Vec3) -> Result<Self, PlayerError> {
        config.validate()?;
        if gravity.length_squared() <= f32::EPSILON {
            return Err(PlayerError::InvalidConfiguration {
                name: "gravity",
                value: gravity.length(),
            });
        }

        Ok(Self {
            config,
            gravity,
            up: -gravity.normalize(),
            velocity: Vec3::ZERO,
        })
    }

    /// Current world-space velocity
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Overwrite the velocity, e.g. when teleporting or for tests
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Locomotion tuning in effect
    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Advance one fixed step and return the translation for the sweep.
    ///
    /// Consumes the frame's jump request if a grounded jump fires;
    /// everything else on the frame is read-only here.
    pub fn integrate(
        &mut self,
        frame: &mut ControlFrame,
        forward: Vec3,
        grounded: bool,
        dt: f32,
    ) -> Vec3 {
        self.apply_ground(grounded);
        self.apply_gravity(dt);
        self.apply_movement(frame.movement, forward, grounded, dt);
        self.apply_ground_drag(grounded, dt);
        self.apply_jump(frame, grounded);
        self.limit_running_speed();

        self.velocity * dt
    }

    /// Cancel any velocity along gravity while standing on a surface
    fn apply_ground(&mut self, grounded: bool) {
        if grounded {
            self.velocity -= self.velocity.project_onto_normalized(self.up);
        }
    }

    /// Semi-implicit Euler gravity, always on; the grounded projection
    /// above owns cancelling the residual
    fn apply_gravity(&mut self, dt: f32) {
        self.velocity += self.gravity * dt;
    }

    /// Accelerate along the input direction rotated into the reference
    /// frame; only the horizontal part of `forward` matters
    fn apply_movement(&mut self, movement: Vec3, forward: Vec3, grounded: bool, dt: f32) {
        if !grounded {
            return;
        }

        let flat_forward = Vec3::new(forward.x, 0.0, forward.z);
        if flat_forward.length_squared() < 1e-8 {
            return;
        }

        let yaw = flat_forward.x.atan2(flat_forward.z);
        let relative_movement = Quat::from_rotation_y(yaw) * movement;

        // input acts as a fixed-magnitude force, so mass scales the gain
        self.velocity += relative_movement * self.config.mass * self.config.acceleration * dt;
    }

    /// Exponential-style ground drag; factor clamped so large `dt * drag`
    /// stops the body instead of flipping its direction
    fn apply_ground_drag(&mut self, grounded: bool, dt: f32) {
        if grounded {
            let factor = (1.0 - dt * self.config.ground_drag).clamp(0.0, 1.0);
            self.velocity *= factor;
        }
    }

    /// Consume a pending jump request when grounded.
    ///
    /// v² = 2·g·h gives the take-off speed that peaks at `jump_height`.
    /// The request stays latched while airborne so a press between ticks
    /// is never dropped.
    fn apply_jump(&mut self, frame: &mut ControlFrame, grounded: bool) {
        if frame.jump_requested && grounded {
            let take_off = (2.0 * self.gravity.length() * self.config.jump_height).sqrt();
            self.velocity += self.up * take_off;
            frame.jump_requested = false;
        }
    }

    /// Clamp the horizontal (XZ) speed; vertical speed is never clamped
    fn limit_running_speed(&mut self) {
        let vertical = Vec3::new(0.0, self.velocity.y, 0.0);
        let horizontal = Vec3::new(self.velocity.x, 0.0, self.velocity.z);

        self.velocity = vertical + horizontal.clamp_length_max(self.config.max_run_speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
    const DT: f32 = 0.02;

    fn locomotion(config: LocomotionConfig) -> Locomotion {
        Locomotion::new(config, GRAVITY).unwrap()
    }

    fn horizontal_speed(v: Vec3) -> f32 {
        Vec3::new(v.x, 0.0, v.z).length()
    }

    #[test]
    fn test_rejects_zero_gravity() {
        let err = Locomotion::new(LocomotionConfig::default(), Vec3::ZERO).unwrap_err();
        assert!(matches!(
            err,
            PlayerError::InvalidConfiguration { name: "gravity", .. }
        ));
    }

    #[test]
    fn test_ground_projection_removes_vertical() {
        let mut loco = locomotion(LocomotionConfig::default());
        loco.set_velocity(Vec3::new(1.0, 5.0, 1.0));

        loco.apply_ground(true);

        assert_eq!(loco.velocity(), Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_no_projection_while_airborne() {
        let mut loco = locomotion(LocomotionConfig::default());
        loco.set_velocity(Vec3::new(1.0, 5.0, 1.0));

        loco.apply_ground(false);

        assert_eq!(loco.velocity(), Vec3::new(1.0, 5.0, 1.0));
    }

    #[test]
    fn test_jump_take_off_speed() {
        let mut loco = locomotion(LocomotionConfig::default());
        let mut frame = ControlFrame::new();
        frame.jump_requested = true;

        loco.apply_jump(&mut frame, true);

        let expected = (2.0 * 9.81 * 1.0_f32).sqrt();
        assert!((loco.velocity().y - expected).abs() < 1e-5);
        assert!(!frame.jump_requested);
    }

    #[test]
    fn test_jump_request_survives_airborne_steps() {
        let mut loco = locomotion(LocomotionConfig::default());
        let mut frame = ControlFrame::new();
        frame.jump_requested = true;

        for _ in 0..5 {
            loco.integrate(&mut frame, Vec3::Z, false, DT);
        }
        assert!(frame.jump_requested);

        loco.set_velocity(Vec3::ZERO);
        loco.integrate(&mut frame, Vec3::Z, true, DT);

        assert!(!frame.jump_requested);
        assert!(loco.velocity().y > 0.0);
    }

    #[test]
    fn test_horizontal_speed_clamped_for_any_prior_velocity() {
        let mut frame = ControlFrame::new();
        frame.movement = Vec3::Z;

        for start in [
            Vec3::new(100.0, 7.0, -50.0),
            Vec3::new(-3.0, -20.0, 0.5),
            Vec3::splat(1000.0),
        ] {
            for grounded in [true, false] {
                let mut loco = locomotion(LocomotionConfig::default());
                loco.set_velocity(start);

                loco.integrate(&mut frame.clone(), Vec3::Z, grounded, DT);

                assert!(
                    horizontal_speed(loco.velocity()) <= loco.config().max_run_speed + 1e-4
                );
            }
        }
    }

    #[test]
    fn test_vertical_speed_not_clamped() {
        let mut loco = locomotion(LocomotionConfig::default());
        loco.set_velocity(Vec3::new(0.0, -80.0, 0.0));

        loco.limit_running_speed();

        assert_eq!(loco.velocity().y, -80.0);
    }

    #[test]
    fn test_grounded_ticks_settle_without_drag() {
        let config = LocomotionConfig {
            ground_drag: 0.0,
            ..Default::default()
        };
        let mut loco = locomotion(config);
        let mut frame = ControlFrame::new();
        loco.set_velocity(Vec3::new(2.0, 0.0, 0.0));

        for _ in 0..50 {
            loco.integrate(&mut frame, Vec3::Z, true, DT);
            // vertical holds at the one-tick gravity residual
            assert!((loco.velocity().y - GRAVITY.y * DT).abs() < 1e-5);
        }

        // zero input and zero drag leave horizontal speed untouched
        assert!((loco.velocity().x - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_ground_drag_decays_horizontal_speed() {
        let mut loco = locomotion(LocomotionConfig::default());
        let mut frame = ControlFrame::new();
        loco.set_velocity(Vec3::new(5.0, 0.0, 0.0));

        for _ in 0..500 {
            loco.integrate(&mut frame, Vec3::Z, true, DT);
        }

        assert!(horizontal_speed(loco.velocity()) < 1e-3);
    }

    #[test]
    fn test_drag_factor_clamped_instead_of_flipping() {
        let config = LocomotionConfig {
            ground_drag: 1000.0,
            ..Default::default()
        };
        let mut loco = locomotion(config);
        let mut frame = ControlFrame::new();
        loco.set_velocity(Vec3::new(5.0, 0.0, 0.0));

        loco.integrate(&mut frame, Vec3::Z, true, DT);

        // dt * drag > 1 would scale by a negative factor without the clamp
        assert_eq!(loco.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_movement_rotates_with_reference_forward() {
        let mut loco = locomotion(LocomotionConfig::default());
        let mut frame = ControlFrame::new();
        frame.movement = Vec3::Z;

        // reference forward along world X turns forward input into +X motion
        loco.integrate(&mut frame, Vec3::X, true, DT);

        assert!(loco.velocity().x > 0.0);
        assert!(loco.velocity().z.abs() < 1e-5);
    }

    #[test]
    fn test_reference_forward_projected_to_horizontal() {
        let mut loco = locomotion(LocomotionConfig::default());
        let mut frame = ControlFrame::new();
        frame.movement = Vec3::Z;

        // a pitched-down camera still drives flat motion
        loco.integrate(&mut frame, Vec3::new(0.0, -0.7, 0.7), true, DT);

        assert!(loco.velocity().z > 0.0);
        assert!(loco.velocity().x.abs() < 1e-5);
    }

    #[test]
    fn test_no_input_acceleration_while_airborne() {
        let mut loco = locomotion(LocomotionConfig::default());
        let mut frame = ControlFrame::new();
        frame.movement = Vec3::Z;

        loco.integrate(&mut frame, Vec3::Z, false, DT);

        assert_eq!(loco.velocity().x, 0.0);
        assert_eq!(loco.velocity().z, 0.0);
        assert!(loco.velocity().y < 0.0);
    }

    #[test]
    fn test_end_to_end_grounded_step() {
        let config = LocomotionConfig {
            mass: 75.0,
            acceleration: 3.0,
            ground_drag: 1.0,
            max_run_speed: 8.33,
            jump_height: 1.0,
        };
        let mut loco = locomotion(config);
        let mut frame = ControlFrame::new();
        frame.movement = Vec3::Z;

        let translation = loco.integrate(&mut frame, Vec3::Z, true, DT);

        let velocity = loco.velocity();
        assert!(velocity.z > 0.0);
        assert!(velocity.z <= 8.33);

        // strict stage order leaves exactly one tick of (dragged) gravity
        let residual = GRAVITY.y * DT * (1.0 - DT);
        assert!((velocity.y - residual).abs() < 1e-5);

        assert_eq!(translation, velocity * DT);
    }
}
