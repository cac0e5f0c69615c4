//! Trinary prelude module
//!
//! Re-exports the types most callers need to build and step a star system.

pub use rand::Rng;

pub use crate::config::{DriverConfig, PhysicsConfig, SimulationConfig, StarSystemConfig};

pub use crate::resources::SharedRng;

pub use crate::physics::diagnostics::SystemDiagnostics;
pub use crate::physics::integrators::{
    AccelerationField, Integrator, IntegratorRegistry, RungeKuttaFourthOrder,
};
pub use crate::physics::math::{Scalar, Vector, random_vector_in_range};
pub use crate::physics::orbit::{add_velocity_jitter, orbit_around};
pub use crate::physics::{
    Barycenter, Body, BodySystem, Gravity, PhysicsError, PhysicsResult, center_of_mass,
    center_of_positions, create_stable_star_system,
};

pub use crate::simulation::{Simulation, Trail};
