//! Runge-Kutta integration methods

use super::{AccelerationField, Integrator};
use crate::physics::math::{Scalar, Vector};

/// One derivative evaluation of the coupled system: `(dx/dt, dv/dt)` per body
struct Derivative {
    dx: Vec<Vector>,
    dv: Vec<Vector>,
}

impl Derivative {
    /// Derivative at `x0 + h * previous.dx`, `v0 + h * previous.dv`
    ///
    /// With `previous` of `None` this is the derivative at `(x0, v0)` itself.
    fn evaluate(
        x0: &[Vector],
        v0: &[Vector],
        previous: Option<(&Derivative, Scalar)>,
        field: &dyn AccelerationField,
    ) -> Self {
        let (dx, trial_positions) = match previous {
            Some((k, h)) => (
                v0.iter().zip(&k.dv).map(|(v, a)| *v + *a * h).collect(),
                x0.iter()
                    .zip(&k.dx)
                    .map(|(x, v)| *x + *v * h)
                    .collect::<Vec<_>>(),
            ),
            None => (v0.to_vec(), x0.to_vec()),
        };

        let mut dv = vec![Vector::ZERO; x0.len()];
        field.accelerations(&trial_positions, &mut dv);

        Self { dx, dv }
    }
}

/// Second-order Runge-Kutta method (Midpoint method)
///
/// This is a 2-stage, 2nd order accurate integrator that evaluates
/// the derivative at the midpoint of the timestep.
///
/// Algorithm:
/// - k1 = f(y)
/// - k2 = f(y + k1*dt/2)
/// - y_new = y + k2*dt
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKuttaSecondOrderMidpoint;

impl Integrator for RungeKuttaSecondOrderMidpoint {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(
        &self,
        positions: &mut [Vector],
        velocities: &mut [Vector],
        field: &dyn AccelerationField,
        dt: Scalar,
    ) {
        let k1 = Derivative::evaluate(positions, velocities, None, field);
        let k2 = Derivative::evaluate(positions, velocities, Some((&k1, dt * 0.5)), field);

        for (position, dx) in positions.iter_mut().zip(&k2.dx) {
            *position += *dx * dt;
        }
        for (velocity, dv) in velocities.iter_mut().zip(&k2.dv) {
            *velocity += *dv * dt;
        }
    }

    fn convergence_order(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "runge_kutta_second_order_midpoint"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["rk2", "midpoint"]
    }
}

/// Fourth-order Runge-Kutta integrator (RK4)
///
/// The state is every body's position and velocity together, so each stage
/// moves all bodies to their trial positions before evaluating gravity.
///
/// The RK4 algorithm:
/// 1. k1 = f(y)
/// 2. k2 = f(y + k1*dt/2)
/// 3. k3 = f(y + k2*dt/2)
/// 4. k4 = f(y + k3*dt)
/// 5. y(t+dt) = y(t) + dt/6 * (k1 + 2*k2 + 2*k3 + k4)
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKuttaFourthOrder;

impl Integrator for RungeKuttaFourthOrder {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(
        &self,
        positions: &mut [Vector],
        velocities: &mut [Vector],
        field: &dyn AccelerationField,
        dt: Scalar,
    ) {
        let k1 = Derivative::evaluate(positions, velocities, None, field);
        let k2 = Derivative::evaluate(positions, velocities, Some((&k1, dt * 0.5)), field);
        let k3 = Derivative::evaluate(positions, velocities, Some((&k2, dt * 0.5)), field);
        let k4 = Derivative::evaluate(positions, velocities, Some((&k3, dt)), field);

        let weight = dt / 6.0;
        for (i, position) in positions.iter_mut().enumerate() {
            *position += (k1.dx[i] + k2.dx[i] * 2.0 + k3.dx[i] * 2.0 + k4.dx[i]) * weight;
        }
        for (i, velocity) in velocities.iter_mut().enumerate() {
            *velocity += (k1.dv[i] + k2.dv[i] * 2.0 + k3.dv[i] * 2.0 + k4.dv[i]) * weight;
        }
    }

    fn convergence_order(&self) -> usize {
        4
    }

    fn name(&self) -> &'static str {
        "runge_kutta_fourth_order"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["rk4"]
    }
}
