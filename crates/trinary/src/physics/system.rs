//! The ordered set of bodies advanced by the integrator

use crate::physics::components::Body;
use crate::physics::gravity::Gravity;
use crate::physics::integrators::{AccelerationField, Integrator, RungeKuttaFourthOrder};
use crate::physics::math::{Scalar, Vector};

/// Bodies in construction order together with the rules that move them
///
/// The index of a body is its identity for the whole run: stepping never
/// reorders, adds or removes bodies. Outside code gets read-only access.
#[derive(Debug, Clone)]
pub struct BodySystem {
    bodies: Vec<Body>,
    gravity: Gravity,
    integrator: Box<dyn Integrator>,
}

impl BodySystem {
    /// Create a system advanced with RK4.
    pub fn new(bodies: Vec<Body>, gravity: Gravity) -> Self {
        Self {
            bodies,
            gravity,
            integrator: Box::new(RungeKuttaFourthOrder),
        }
    }

    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.integrator = integrator;
        self
    }

    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    #[inline]
    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    pub fn integrator(&self) -> &dyn Integrator {
        self.integrator.as_ref()
    }

    pub fn positions(&self) -> impl ExactSizeIterator<Item = Vector> + '_ {
        self.bodies.iter().map(|body| body.position)
    }

    fn masses(&self) -> Vec<Scalar> {
        self.bodies.iter().map(Body::mass).collect()
    }

    /// Current gravitational acceleration of every body, in body order.
    pub fn accelerations(&self) -> Vec<Vector> {
        let masses = self.masses();
        let positions: Vec<Vector> = self.positions().collect();
        let mut accelerations = vec![Vector::ZERO; self.bodies.len()];

        self.gravity
            .field(&masses)
            .accelerations(&positions, &mut accelerations);

        accelerations
    }

    /// Advance every body by one step of size `dt`.
    ///
    /// `dt` is used as given; bounding it is the caller's job.
    pub fn step(&mut self, dt: Scalar) {
        if self.bodies.is_empty() {
            return;
        }

        let masses = self.masses();
        let mut positions: Vec<Vector> = self.positions().collect();
        let mut velocities: Vec<Vector> = self.bodies.iter().map(|body| body.velocity).collect();

        self.integrator.step(
            &mut positions,
            &mut velocities,
            &self.gravity.field(&masses),
            dt,
        );

        for ((body, position), velocity) in self.bodies.iter_mut().zip(positions).zip(velocities) {
            body.position = position;
            body.velocity = velocity;
        }
    }
}
