//! Fixtures shared by unit tests, integration tests and benchmarks

use crate::physics::components::Body;
use crate::physics::gravity::Gravity;
use crate::physics::math::{Scalar, Vector};
use crate::physics::orbit::circular_orbit_speed;
use crate::physics::system::BodySystem;

/// Two equal masses on a circular orbit about their common barycenter at
/// the origin, separated along X and moving along ±Y.
///
/// Total momentum is zero by construction.
pub fn circular_pair(mass: Scalar, separation: Scalar, gravity: Gravity) -> BodySystem {
    let relative_speed =
        circular_orbit_speed(gravity.gravitational_constant(), 2.0 * mass, separation);
    let half = Vector::new(separation / 2.0, 0.0, 0.0);
    let half_speed = Vector::new(0.0, relative_speed / 2.0, 0.0);

    let bodies = vec![
        Body::with_state(mass, -half, -half_speed).expect("fixture mass is positive"),
        Body::with_state(mass, half, half_speed).expect("fixture mass is positive"),
    ];

    BodySystem::new(bodies, gravity)
}

/// Period of a circular two-body orbit
pub fn circular_period(gravity: Gravity, total_mass: Scalar, separation: Scalar) -> Scalar {
    2.0 * std::f64::consts::PI
        * (separation.powi(3) / (gravity.gravitational_constant() * total_mass)).sqrt()
}

/// Panics unless `actual` is within `tolerance` of `expected`.
#[track_caller]
pub fn assert_vector_near(actual: Vector, expected: Vector, tolerance: Scalar) {
    let error = (actual - expected).length();
    assert!(
        error <= tolerance,
        "expected {expected:?}, got {actual:?} (error {error:e} > {tolerance:e})"
    );
}
