//! Animation parameter sink
//!
//! The locomotion system never plays animation; it writes named scalar,
//! boolean, and trigger parameters into whatever graph consumes them.
//! Parameters are resolved by name exactly once, at controller
//! construction, into opaque [`ParamId`] handles; per-frame writes go
//! through the handles only.

/// Parameters the locomotion system drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimParam {
    /// Local-space forward speed (scalar)
    ForwardSpeed,
    /// Local-space strafe speed (scalar)
    StrafeSpeed,
    /// Aiming toggle (boolean)
    Aiming,
    /// Jump-roll one-shot (trigger)
    JumpRoll,
}

impl AnimParam {
    /// Parameter name as known to the animation graph
    pub fn name(self) -> &'static str {
        match self {
            AnimParam::ForwardSpeed => "ForwardSpeed",
            AnimParam::StrafeSpeed => "StrafeSpeed",
            AnimParam::Aiming => "Aiming",
            AnimParam::JumpRoll => "JumpRoll",
        }
    }
}

/// Opaque handle to a resolved animation parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Aim layer of the animation graph.
///
/// The driver hands it the world-space point to track once during
/// setup; locomotion never touches it per frame.
pub trait AimBehaviour {
    /// Set the point the aim layer should track
    fn set_aim_target(&mut self, target: glam::Vec3);
}

/// Consumer of animation parameter writes
pub trait Animator {
    /// Look up a parameter by name; `None` if the graph has no such parameter
    fn resolve(&self, name: &str) -> Option<ParamId>;

    /// Write a scalar parameter
    fn set_float(&mut self, id: ParamId, value: f32);

    /// Write a boolean parameter
    fn set_bool(&mut self, id: ParamId, value: bool);

    /// Fire a trigger parameter
    fn set_trigger(&mut self, id: ParamId);
}

#[derive(Debug, Clone, PartialEq)]
enum ParamValue {
    Float(f32),
    Bool(bool),
    Trigger(bool),
}

/// In-memory [`Animator`] that records the last written value per parameter
///
/// Stands in for an animation graph in the demo driver and in tests.
#[derive(Debug, Default)]
pub struct ParameterBoard {
    names: Vec<String>,
    values: Vec<ParamValue>,
    aim_target: Option<glam::Vec3>,
}

impl ParameterBoard {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board carrying the four standard locomotion parameters
    pub fn with_standard_params() -> Self {
        let mut board = Self::new();
        board.register_float(AnimParam::ForwardSpeed.name());
        board.register_float(AnimParam::StrafeSpeed.name());
        board.register_bool(AnimParam::Aiming.name());
        board.register_trigger(AnimParam::JumpRoll.name());
        board
    }

    /// Register a scalar parameter
    pub fn register_float(&mut self, name: &str) -> ParamId {
        self.register(name, ParamValue::Float(0.0))
    }

    /// Register a boolean parameter
    pub fn register_bool(&mut self, name: &str) -> ParamId {
        self.register(name, ParamValue::Bool(false))
    }

    /// Register a trigger parameter
    pub fn register_trigger(&mut self, name: &str) -> ParamId {
        self.register(name, ParamValue::Trigger(false))
    }

    fn register(&mut self, name: &str, initial: ParamValue) -> ParamId {
        self.names.push(name.to_owned());
        self.values.push(initial);
        ParamId(self.names.len() as u32 - 1)
    }

    /// Last written scalar value
    pub fn float(&self, id: ParamId) -> Option<f32> {
        match self.values.get(id.0 as usize) {
            Some(ParamValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    /// Last written boolean value
    pub fn bool_value(&self, id: ParamId) -> Option<bool> {
        match self.values.get(id.0 as usize) {
            Some(ParamValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Aim target handed over at setup, if any
    pub fn aim_target(&self) -> Option<glam::Vec3> {
        self.aim_target
    }

    /// Consume a fired trigger, as an animation graph would on transition
    pub fn take_trigger(&mut self, id: ParamId) -> bool {
        match self.values.get_mut(id.0 as usize) {
            Some(ParamValue::Trigger(fired)) => std::mem::take(fired),
            _ => false,
        }
    }
}

impl AimBehaviour for ParameterBoard {
    fn set_aim_target(&mut self, target: glam::Vec3) {
        self.aim_target = Some(target);
    }
}

impl Animator for ParameterBoard {
    fn resolve(&self, name: &str) -> Option<ParamId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| ParamId(i as u32))
    }

    fn set_float(&mut self, id: ParamId, value: f32) {
        if let Some(slot) = self.values.get_mut(id.0 as usize) {
            if matches!(slot, ParamValue::Float(_)) {
                *slot = ParamValue::Float(value);
            }
        }
    }

    fn set_bool(&mut self, id: ParamId, value: bool) {
        if let Some(slot) = self.values.get_mut(id.0 as usize) {
            if matches!(slot, ParamValue::Bool(_)) {
                *slot = ParamValue::Bool(value);
            }
        }
    }

    fn set_trigger(&mut self, id: ParamId) {
        if let Some(slot) = self.values.get_mut(id.0 as usize) {
            if matches!(slot, ParamValue::Trigger(_)) {
                *slot = ParamValue::Trigger(true);
            }
        }
    }
}
