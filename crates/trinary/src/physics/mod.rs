//! Gravity simulation core: bodies, orbit construction and integration

pub mod barycenter;
pub mod components;
pub mod diagnostics;
pub mod error;
pub mod gravity;
pub mod integrators;
pub mod math;
pub mod orbit;
pub mod stars;
pub mod system;

pub use barycenter::{center_of_mass, center_of_positions};
pub use components::{Barycenter, Body, OrbitalParent};
pub use error::{PhysicsError, PhysicsResult};
pub use gravity::Gravity;
pub use stars::create_stable_star_system;
pub use system::BodySystem;
