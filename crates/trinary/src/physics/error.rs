//! Error types for building a body system

use thiserror::Error;

/// Result type for physics construction
pub type PhysicsResult<T> = Result<T, PhysicsError>;

/// Errors raised while constructing bodies and orbits
///
/// Stepping never fails: near-coincident bodies are handled by clamping the
/// separation, not by an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("invalid orbit: {0}")]
    InvalidOrbit(String),

    #[error("invalid body: {0}")]
    InvalidBody(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("center of mass requested for an empty or massless set of bodies")]
    EmptyInput,
}
