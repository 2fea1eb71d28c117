//! Frame timing for the two-rate update scheme
//!
//! Visual frames arrive at whatever rate the host loop produces them; the
//! physics integrator runs on a fixed timestep. `FrameClock` accumulates
//! visual-frame deltas and tells the driver how many fixed steps to run.

use serde::{Deserialize, Serialize};

/// Configuration for the frame clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Fixed timestep for physics (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time accepted from a single visual frame
    pub max_delta: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_delta: 0.25,
        }
    }
}

/// Tracks visual-frame time and drains fixed physics steps
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Configuration
    pub config: ClockConfig,
    /// Time since start in seconds
    pub total_time: f64,
    /// Clamped delta for the current visual frame
    pub delta_time: f32,
    /// Visual frame counter
    pub frame_count: u64,
    /// Accumulated time not yet consumed by fixed steps
    accumulator: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            config: ClockConfig::default(),
            total_time: 0.0,
            delta_time: 0.0,
            frame_count: 0,
            accumulator: 0.0,
        }
    }
}

impl FrameClock {
    /// Create a clock with a custom config
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Advance by the raw delta of the visual frame that just ended
    pub fn update(&mut self, raw_delta: f32) {
        self.delta_time = raw_delta.min(self.config.max_delta);
        self.frame_count += 1;
        self.total_time += self.delta_time as f64;
        self.accumulator += self.delta_time;
    }

    /// Number of fixed timesteps to run for this visual frame
    pub fn fixed_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.accumulator >= self.config.fixed_timestep {
            self.accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        steps
    }

    /// Interpolation factor between the last two fixed steps, for rendering
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.config.fixed_timestep
    }
}
