//! Point masses and the virtual aggregate used as an orbit parent

use crate::physics::error::{PhysicsError, PhysicsResult};
use crate::physics::math::{Scalar, Vector};
use std::fmt;

/// A star or planet: a point mass with position and velocity
///
/// Mass is fixed once the body exists. Position and velocity are written by
/// the orbit initializer at construction and by the integrator afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    mass: Scalar,
    pub position: Vector,
    pub velocity: Vector,
}

impl Body {
    /// Create a body at rest at the origin.
    pub fn new(mass: Scalar) -> PhysicsResult<Self> {
        Self::with_state(mass, Vector::ZERO, Vector::ZERO)
    }

    pub fn with_state(mass: Scalar, position: Vector, velocity: Vector) -> PhysicsResult<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidBody(format!(
                "mass must be positive and finite, got {mass}"
            )));
        }

        Ok(Self {
            mass,
            position,
            velocity,
        })
    }

    #[inline]
    pub fn mass(&self) -> Scalar {
        self.mass
    }

    #[inline]
    pub fn momentum(&self) -> Vector {
        self.velocity * self.mass
    }

    #[inline]
    pub fn kinetic_energy(&self) -> Scalar {
        0.5 * self.mass * self.velocity.length_squared()
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mass {:.4} at ({:.3}, {:.3}, {:.3}) moving ({:.4}, {:.4}, {:.4})",
            self.mass,
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z
        )
    }
}

/// Mass-weighted aggregate of several bodies
///
/// Only ever used as a reference frame for placing another body in orbit.
/// It is a separate type from [`Body`] so it cannot end up in a body system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycenter {
    pub mass: Scalar,
    pub position: Vector,
    pub velocity: Vector,
}

impl fmt::Display for Barycenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "barycenter of mass {:.4} at ({:.3}, {:.3}, {:.3}) moving ({:.4}, {:.4}, {:.4})",
            self.mass,
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z
        )
    }
}

/// Anything a body can be placed in orbit around
pub trait OrbitalParent {
    fn mass(&self) -> Scalar;
    fn position(&self) -> Vector;
    fn velocity(&self) -> Vector;
}

impl OrbitalParent for Body {
    fn mass(&self) -> Scalar {
        self.mass
    }

    fn position(&self) -> Vector {
        self.position
    }

    fn velocity(&self) -> Vector {
        self.velocity
    }
}

impl OrbitalParent for Barycenter {
    fn mass(&self) -> Scalar {
        self.mass
    }

    fn position(&self) -> Vector {
        self.position
    }

    fn velocity(&self) -> Vector {
        self.velocity
    }
}
