//! Fixed-step numerical integration of the whole body system

use crate::physics::math::{Scalar, Vector};

pub mod registry;
pub mod runge_kutta;

pub use registry::IntegratorRegistry;
pub use runge_kutta::{RungeKuttaFourthOrder, RungeKuttaSecondOrderMidpoint};

/// Acceleration of every body given the positions of all bodies
///
/// Coupled systems need all positions at once: a multi-stage method moves
/// every body to its trial position before evaluating any acceleration.
pub trait AccelerationField {
    /// Overwrite `accelerations[i]` with the acceleration of body `i`.
    fn accelerations(&self, positions: &[Vector], accelerations: &mut [Vector]);
}

/// Base trait for all integrators
///
/// Integrators are stateless and advance the full state in place. They never
/// reorder or resize the slices and do not clip `dt`.
pub trait Integrator: Send + Sync {
    fn clone_box(&self) -> Box<dyn Integrator>;

    /// Advance every position and velocity by one step of size `dt`
    ///
    /// # Arguments
    /// * `positions` - Mutable positions, one per body
    /// * `velocities` - Mutable velocities, one per body
    /// * `field` - Accelerations as a function of all positions
    /// * `dt` - Time step
    fn step(
        &self,
        positions: &mut [Vector],
        velocities: &mut [Vector],
        field: &dyn AccelerationField,
        dt: Scalar,
    );

    fn convergence_order(&self) -> usize;

    fn name(&self) -> &'static str;

    fn aliases(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

impl Clone for Box<dyn Integrator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl std::fmt::Debug for dyn Integrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
