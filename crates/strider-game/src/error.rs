/// Errors that can occur while wiring up a player character.
///
/// Both kinds are initialization-time: once a controller is built, the
/// per-tick operations are total and cannot fail.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlayerError {
    #[error("locomotion parameter '{name}' must be strictly positive (got {value})")]
    InvalidConfiguration { name: &'static str, value: f32 },

    #[error("missing dependency: {0}")]
    MissingDependency(&'static str),
}
