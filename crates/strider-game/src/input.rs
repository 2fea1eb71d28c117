//! Input sampling with axis/button abstraction
//!
//! `InputSource` is the boundary to whatever produces input: the winit
//! keyboard backend here, a gamepad, or a script. `ControlFrame` is the
//! latch the sampler writes once per visual frame and the fixed-step
//! integrator reads; it is the only state shared between the two tick
//! rates. Each field has exactly one writer: the sampler owns everything
//! except `jump_requested`, which only a successful grounded jump clears.

use std::collections::{HashMap, HashSet};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Continuous input axes, each in [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Sideways movement (right positive)
    MoveX,
    /// Forward movement (forward positive)
    MoveY,
    /// Sideways aim
    AimX,
    /// Forward aim
    AimY,
}

/// Discrete input events, reported on the press edge only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    /// Request a jump
    Jump,
    /// Toggle aiming on or off
    ToggleAim,
    /// Play the jump-roll animation
    Roll,
}

/// Source of raw input for one visual frame
pub trait InputSource {
    /// Current value of a continuous axis
    fn axis(&self, axis: Axis) -> f32;

    /// True only on the frame the button was pressed
    fn button_down(&self, button: Button) -> bool;
}

/// Latched input state crossing from visual frames into fixed steps
#[derive(Debug, Clone, Default)]
pub struct ControlFrame {
    /// Movement direction on the XZ plane (Y always 0)
    pub movement: Vec3,
    /// Aim direction on the XZ plane (Y always 0)
    pub aim: Vec3,
    /// Sticky jump request; cleared only by a grounded jump
    pub jump_requested: bool,
    /// Aiming toggle; flips on each ToggleAim edge
    pub aiming: bool,
    /// One-shot roll latch, consumed by the animation writer
    roll_latched: bool,
}

impl ControlFrame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch the current state of an input source
    pub fn sample(&mut self, source: &impl InputSource) {
        if source.button_down(Button::Jump) {
            self.jump_requested = true;
        }
        if source.button_down(Button::ToggleAim) {
            self.aiming = !self.aiming;
        }
        if source.button_down(Button::Roll) {
            self.roll_latched = true;
        }

        self.movement = Vec3::new(source.axis(Axis::MoveX), 0.0, source.axis(Axis::MoveY));
        self.aim = Vec3::new(source.axis(Axis::AimX), 0.0, source.axis(Axis::AimY));
    }

    /// Consume the roll latch, returning whether it was set
    pub fn take_roll(&mut self) -> bool {
        std::mem::take(&mut self.roll_latched)
    }
}

/// Binding of a physical key to an axis direction or a button
#[derive(Debug, Clone, Copy, PartialEq)]
enum Binding {
    Axis(Axis, f32),
    Button(Button),
}

/// Keyboard-backed input source fed by winit events
#[derive(Debug)]
pub struct KeyboardInput {
    bindings: HashMap<KeyCode, Binding>,
    held: HashSet<KeyCode>,
    pressed: HashSet<Button>,
}

impl Default for KeyboardInput {
    fn default() -> Self {
        let mut input = Self {
            bindings: HashMap::new(),
            held: HashSet::new(),
            pressed: HashSet::new(),
        };

        // WASD drives movement
        input.bind_axis(KeyCode::KeyW, Axis::MoveY, 1.0);
        input.bind_axis(KeyCode::KeyS, Axis::MoveY, -1.0);
        input.bind_axis(KeyCode::KeyD, Axis::MoveX, 1.0);
        input.bind_axis(KeyCode::KeyA, Axis::MoveX, -1.0);

        // Arrow keys stand in for the aim stick
        input.bind_axis(KeyCode::ArrowUp, Axis::AimY, 1.0);
        input.bind_axis(KeyCode::ArrowDown, Axis::AimY, -1.0);
        input.bind_axis(KeyCode::ArrowRight, Axis::AimX, 1.0);
        input.bind_axis(KeyCode::ArrowLeft, Axis::AimX, -1.0);

        input.bind_button(KeyCode::Space, Button::Jump);
        input.bind_button(KeyCode::KeyF, Button::ToggleAim);
        input.bind_button(KeyCode::KeyV, Button::Roll);

        input
    }
}

impl KeyboardInput {
    /// Create a keyboard source with default bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to one direction of an axis
    pub fn bind_axis(&mut self, key: KeyCode, axis: Axis, sign: f32) {
        self.bindings.insert(key, Binding::Axis(axis, sign));
    }

    /// Bind a key to a button
    pub fn bind_button(&mut self, key: KeyCode, button: Button) {
        self.bindings.insert(key, Binding::Button(button));
    }

    /// Handle a keyboard event from winit
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        let PhysicalKey::Code(key_code) = physical_key else {
            return;
        };
        let Some(binding) = self.bindings.get(&key_code).copied() else {
            return;
        };

        match element_state {
            ElementState::Pressed => {
                let was_held = !self.held.insert(key_code);
                if let Binding::Button(button) = binding {
                    if !was_held {
                        self.pressed.insert(button);
                    }
                }
            }
            ElementState::Released => {
                self.held.remove(&key_code);
            }
        }
    }

    /// Clear press edges; call once at the end of each visual frame
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }
}

impl InputSource for KeyboardInput {
    fn axis(&self, axis: Axis) -> f32 {
        let mut value = 0.0;
        for key in &self.held {
            if let Some(Binding::Axis(bound, sign)) = self.bindings.get(key) {
                if *bound == axis {
                    value += sign;
                }
            }
        }
        value.clamp(-1.0, 1.0)
    }

    fn button_down(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }
}

#[cfg(test)]
pub(crate) mod tests_support {
    use super::*;

    /// Scriptable input source for unit tests
    #[derive(Debug, Default)]
    pub struct ScriptInput {
        pub move_x: f32,
        pub move_y: f32,
        pub aim_x: f32,
        pub aim_y: f32,
        pub jump: bool,
        pub toggle_aim: bool,
        pub roll: bool,
    }

    impl InputSource for ScriptInput {
        fn axis(&self, axis: Axis) -> f32 {
            match axis {
                Axis::MoveX => self.move_x,
                Axis::MoveY => self.move_y,
                Axis::AimX => self.aim_x,
                Axis::AimY => self.aim_y,
            }
        }

        fn button_down(&self, button: Button) -> bool {
            match button {
                Button::Jump => self.jump,
                Button::ToggleAim => self.toggle_aim,
                Button::Roll => self.roll,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut KeyboardInput, key: KeyCode) {
        input.handle_keyboard(PhysicalKey::Code(key), ElementState::Pressed);
    }

    fn release(input: &mut KeyboardInput, key: KeyCode) {
        input.handle_keyboard(PhysicalKey::Code(key), ElementState::Released);
    }

    #[test]
    fn test_axis_from_key_pair() {
        let mut input = KeyboardInput::new();
        press(&mut input, KeyCode::KeyW);
        assert_eq!(input.axis(Axis::MoveY), 1.0);

        // opposing keys cancel
        press(&mut input, KeyCode::KeyS);
        assert_eq!(input.axis(Axis::MoveY), 0.0);

        release(&mut input, KeyCode::KeyW);
        assert_eq!(input.axis(Axis::MoveY), -1.0);
    }

    #[test]
    fn test_button_press_edge() {
        let mut input = KeyboardInput::new();
        press(&mut input, KeyCode::Space);
        assert!(input.button_down(Button::Jump));

        // OS key repeat must not retrigger the edge
        press(&mut input, KeyCode::Space);
        input.end_frame();
        press(&mut input, KeyCode::Space);
        assert!(!input.button_down(Button::Jump));

        release(&mut input, KeyCode::Space);
        press(&mut input, KeyCode::Space);
        assert!(input.button_down(Button::Jump));
    }

    #[test]
    fn test_jump_request_is_sticky() {
        let mut input = KeyboardInput::new();
        let mut frame = ControlFrame::new();

        press(&mut input, KeyCode::Space);
        frame.sample(&input);
        input.end_frame();
        assert!(frame.jump_requested);

        // further frames without a press leave the request set
        frame.sample(&input);
        frame.sample(&input);
        assert!(frame.jump_requested);
    }

    #[test]
    fn test_aim_toggle_flips_per_edge() {
        let mut input = KeyboardInput::new();
        let mut frame = ControlFrame::new();

        press(&mut input, KeyCode::KeyF);
        frame.sample(&input);
        assert!(frame.aiming);

        input.end_frame();
        frame.sample(&input);
        assert!(frame.aiming);

        release(&mut input, KeyCode::KeyF);
        press(&mut input, KeyCode::KeyF);
        frame.sample(&input);
        assert!(!frame.aiming);
    }

    #[test]
    fn test_roll_latch_consumed_once() {
        let mut input = KeyboardInput::new();
        let mut frame = ControlFrame::new();

        press(&mut input, KeyCode::KeyV);
        frame.sample(&input);

        assert!(frame.take_roll());
        assert!(!frame.take_roll());
    }

    #[test]
    fn test_movement_latch_stays_planar() {
        let mut input = KeyboardInput::new();
        let mut frame = ControlFrame::new();

        press(&mut input, KeyCode::KeyW);
        press(&mut input, KeyCode::KeyD);
        frame.sample(&input);

        assert_eq!(frame.movement, Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(frame.movement.y, 0.0);
    }
}
