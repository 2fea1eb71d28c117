//! Strider - headless locomotion driver
//!
//! Runs the two-rate loop against a small test scene: a ground plane, a
//! box obstacle, and a kinematic platform. Input comes from a scripted
//! pilot so the run is deterministic; a windowed front end would feed a
//! `KeyboardInput` instead.

mod settings;

use anyhow::{Context, Result};
use glam::Vec3;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use strider_core::FrameClock;
use strider_game::{
    AimBehaviour, Animator, Axis, Button, InputSource, ParameterBoard, PlayerController,
};
use strider_physics::{CharacterBodyConfig, CollisionWorld, PhysicsConfig};

use settings::Settings;

/// Scripted input: walks forward, jumps periodically, aims and rolls once
struct DemoPilot {
    frame: u64,
}

impl DemoPilot {
    fn new() -> Self {
        Self { frame: 0 }
    }

    fn advance(&mut self) {
        self.frame += 1;
    }
}

impl InputSource for DemoPilot {
    fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::MoveY => 1.0,
            Axis::MoveX => 0.0,
            // hold the aim stick for a second mid-run
            Axis::AimX => {
                if (300..360).contains(&self.frame) {
                    0.8
                } else {
                    0.0
                }
            }
            Axis::AimY => 0.0,
        }
    }

    fn button_down(&self, button: Button) -> bool {
        match button {
            Button::Jump => self.frame % 180 == 120,
            Button::ToggleAim => self.frame == 300,
            Button::Roll => self.frame == 420,
        }
    }
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    info!("Starting Strider demo run...");

    let settings = Settings::load();
    settings
        .locomotion
        .validate()
        .context("Settings contain an invalid locomotion config")?;

    let gravity = Vec3::new(0.0, -settings.world.gravity, 0.0);
    let mut world = CollisionWorld::with_config(PhysicsConfig {
        gravity,
        timestep: settings.clock.fixed_timestep,
    });

    world.create_ground(0.0);
    world.create_box(Vec3::new(0.5, 1.0, 0.5), Vec3::new(0.0, 1.0, 12.0));
    let platform = world.create_platform(Vec3::new(1.5, 0.2, 1.5), Vec3::new(4.0, 0.5, 6.0));
    world.refresh_queries();

    let mut animator = ParameterBoard::with_standard_params();
    animator.set_aim_target(Vec3::new(0.0, 1.6, 20.0));

    let mut player = PlayerController::new(
        settings.locomotion.clone(),
        CharacterBodyConfig::default(),
        gravity,
        &animator,
    )
    .context("Failed to build the player controller")?;
    player.spawn(&mut world, Vec3::new(0.0, 0.1, 0.0));

    let forward_speed = animator
        .resolve("ForwardSpeed")
        .context("ParameterBoard lost its standard parameters")?;

    let mut clock = FrameClock::new(settings.clock.clone());
    let mut pilot = DemoPilot::new();

    // 10 simulated seconds at a steady 60 Hz visual rate
    let visual_dt = 1.0 / 60.0;
    let camera_forward = Vec3::Z;

    for _ in 0..600 {
        pilot.advance();
        clock.update(visual_dt);

        player.tick_visual(&pilot, &mut animator);

        for _ in 0..clock.fixed_steps() {
            let t = clock.total_time as f32;
            let bob = Vec3::new(4.0, 0.5 + (t * 0.5).sin() * 0.4, 6.0);
            world.move_platform(platform, bob);
            world.step();

            player.tick_fixed(&mut world, camera_forward, clock.config.fixed_timestep);
        }

        if clock.frame_count % 60 == 0 {
            let position = player.position();
            info!(
                "t={:>4.1}s pos=({:>6.2}, {:>5.2}, {:>6.2}) grounded={} forward_speed={:.2}",
                clock.total_time,
                position.x,
                position.y,
                position.z,
                player.is_grounded(),
                animator.float(forward_speed).unwrap_or(0.0),
            );
        }
    }

    info!("Demo run finished at {:?}", player.position());
    Ok(())
}
