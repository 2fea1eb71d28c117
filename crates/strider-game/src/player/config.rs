//! Locomotion tuning parameters

use serde::{Deserialize, Serialize};

use crate::error::PlayerError;

/// Locomotion configuration, immutable once a controller is built
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocomotionConfig {
    /// Character mass in kilograms
    pub mass: f32,
    /// Ground acceleration in meters per second squared
    pub acceleration: f32,
    /// Ground drag coefficient per second
    pub ground_drag: f32,
    /// Maximum horizontal running speed in meters per second
    pub max_run_speed: f32,
    /// Apex height of a jump in meters
    pub jump_height: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            mass: 75.0,
            acceleration: 3.0,
            ground_drag: 1.0,
            max_run_speed: (30.0 * 1000.0) / (60.0 * 60.0), // 30 km/h
            jump_height: 1.0,
        }
    }
}

impl LocomotionConfig {
    /// Reject values that would produce NaN or runaway behavior at runtime
    ///
    /// Drag may be zero (a frictionless surface) but not negative.
    pub fn validate(&self) -> Result<(), PlayerError> {
        let positive = [
            ("mass", self.mass),
            ("acceleration", self.acceleration),
            ("max_run_speed", self.max_run_speed),
            ("jump_height", self.jump_height),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(PlayerError::InvalidConfiguration { name, value });
            }
        }
        if !(self.ground_drag >= 0.0) {
            return Err(PlayerError::InvalidConfiguration {
                name: "ground_drag",
                value: self.ground_drag,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(LocomotionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_max_speed_is_30_kmh() {
        let config = LocomotionConfig::default();
        assert!((config.max_run_speed - 8.3333).abs() < 1e-3);
    }

    #[test]
    fn test_rejects_non_positive_fields() {
        for field in ["mass", "acceleration", "max_run_speed", "jump_height"] {
            let mut config = LocomotionConfig::default();
            match field {
                "mass" => config.mass = 0.0,
                "acceleration" => config.acceleration = -1.0,
                "max_run_speed" => config.max_run_speed = 0.0,
                _ => config.jump_height = -0.5,
            }
            let err = config.validate().unwrap_err();
            assert!(matches!(
                err,
                PlayerError::InvalidConfiguration { name, .. } if name == field
            ));
        }
    }

    #[test]
    fn test_zero_drag_allowed() {
        let config = LocomotionConfig {
            ground_drag: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_drag_rejected() {
        let config = LocomotionConfig {
            ground_drag: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_rejected() {
        let config = LocomotionConfig {
            mass: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
