//! Accuracy tests for numerical integrators
//!
//! Checks each integrator against an analytical oscillator and verifies the
//! expected order of convergence, then runs a circular binary for a full
//! period.

use trinary::physics::diagnostics::SystemDiagnostics;
use trinary::physics::integrators::{
    AccelerationField, Integrator, RungeKuttaFourthOrder, RungeKuttaSecondOrderMidpoint,
};
use trinary::physics::math::{Scalar, Vector};
use trinary::physics::{BodySystem, Gravity};
use trinary::test_utils::{circular_pair, circular_period};

/// Independent oscillators, one per slot: a = -ω²x
struct HarmonicOscillatorField {
    omega: Scalar,
}

impl AccelerationField for HarmonicOscillatorField {
    fn accelerations(&self, positions: &[Vector], accelerations: &mut [Vector]) {
        for (acceleration, position) in accelerations.iter_mut().zip(positions) {
            *acceleration = -self.omega * self.omega * *position;
        }
    }
}

/// Integrate x(0) = 1, v(0) = 0 to `duration` and return the phase space error
fn oscillator_error(integrator: &dyn Integrator, dt: Scalar, duration: Scalar) -> Scalar {
    let omega = 1.0;
    let field = HarmonicOscillatorField { omega };
    let mut positions = vec![Vector::X];
    let mut velocities = vec![Vector::ZERO];

    let steps = (duration / dt).round() as usize;
    for _ in 0..steps {
        integrator.step(&mut positions, &mut velocities, &field, dt);
    }

    let t = steps as Scalar * dt;
    let exact_position = Vector::new((omega * t).cos(), 0.0, 0.0);
    let exact_velocity = Vector::new(-omega * (omega * t).sin(), 0.0, 0.0);

    (positions[0] - exact_position).length() + (velocities[0] - exact_velocity).length()
}

fn observed_order(integrator: &dyn Integrator) -> Scalar {
    let coarse = oscillator_error(integrator, 0.1, 2.0);
    let fine = oscillator_error(integrator, 0.05, 2.0);
    (coarse / fine).log2()
}

#[test]
fn test_rk4_convergence_order() {
    let integrator = RungeKuttaFourthOrder;
    let order = observed_order(&integrator);

    assert!(
        (order - integrator.convergence_order() as Scalar).abs() < 0.5,
        "RK4 observed order {order}"
    );
}

#[test]
fn test_rk2_convergence_order() {
    let integrator = RungeKuttaSecondOrderMidpoint;
    let order = observed_order(&integrator);

    assert!(
        (order - integrator.convergence_order() as Scalar).abs() < 0.5,
        "RK2 observed order {order}"
    );
}

#[test]
fn test_rk4_oscillator_accuracy() {
    let error = oscillator_error(&RungeKuttaFourthOrder, 0.01, 10.0);
    assert!(error < 1e-8, "RK4 oscillator error {error:e}");
}

/// Run a circular pair for one period and return (position error, energy drift)
fn circular_pair_after_one_period(integrator: Box<dyn Integrator>) -> (Scalar, Scalar) {
    let gravity = Gravity::new(1.0, 1.0).unwrap();
    let mass = 500.0;
    let separation = 200.0;
    let mut system: BodySystem =
        circular_pair(mass, separation, gravity).with_integrator(integrator);
    let start: Vec<Vector> = system.positions().collect();
    let initial = SystemDiagnostics::measure(system.bodies(), &gravity);

    let period = circular_period(gravity, 2.0 * mass, separation);
    let steps = (period / 0.1).round() as usize;
    let dt = period / steps as Scalar;
    for _ in 0..steps {
        system.step(dt);
    }

    let position_error = system
        .positions()
        .zip(&start)
        .map(|(position, initial)| (position - *initial).length())
        .fold(0.0, Scalar::max);
    let drift = SystemDiagnostics::measure(system.bodies(), &gravity).energy_drift(&initial);

    (position_error, drift)
}

#[test]
fn test_rk4_closes_circular_orbit() {
    let (position_error, drift) = circular_pair_after_one_period(Box::new(RungeKuttaFourthOrder));

    assert!(position_error < 1e-3, "Orbit did not close: {position_error:e}");
    assert!(drift.abs() < 1e-8, "Energy drifted by {drift:e}");
}

#[test]
fn test_rk4_beats_rk2_on_circular_orbit() {
    let (rk4_error, _) = circular_pair_after_one_period(Box::new(RungeKuttaFourthOrder));
    let (rk2_error, _) = circular_pair_after_one_period(Box::new(RungeKuttaSecondOrderMidpoint));

    assert!(
        rk4_error < rk2_error,
        "RK4 error {rk4_error:e} not below RK2 error {rk2_error:e}"
    );
}
