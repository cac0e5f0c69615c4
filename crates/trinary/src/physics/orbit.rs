//! Orbit initialization and velocity jitter

use crate::physics::components::{Body, OrbitalParent};
use crate::physics::error::{PhysicsError, PhysicsResult};
use crate::physics::math::{Scalar, Vector, random_unit_vector};
use crate::resources::SharedRng;

/// Below this length a cross product is treated as degenerate.
const DEGENERATE_CROSS_LENGTH: Scalar = 1e-9;

/// Speed of a circular two-body orbit at `distance` around a combined mass.
#[inline]
pub fn circular_orbit_speed(
    gravitational_constant: Scalar,
    total_mass: Scalar,
    distance: Scalar,
) -> Scalar {
    libm::sqrt(gravitational_constant * total_mass / distance)
}

/// Place `body` on a circular orbit of radius `distance` around `parent`.
///
/// The orbit lies in the plane whose normal is `plane_normal_hint` (any
/// non-zero length, normalized here). The radial direction is the hint
/// crossed with the Y axis, or with the X axis when the hint is parallel to Y.
/// The tangential velocity is added to the parent's velocity, so the orbit is
/// circular in the parent's frame under the two-body approximation.
pub fn orbit_around(
    body: &mut Body,
    parent: &impl OrbitalParent,
    distance: Scalar,
    plane_normal_hint: Vector,
    gravitational_constant: Scalar,
) -> PhysicsResult<()> {
    if !(distance.is_finite() && distance > 0.0) {
        return Err(PhysicsError::InvalidOrbit(format!(
            "distance must be positive, got {distance}"
        )));
    }

    let total_mass = parent.mass() + body.mass();
    if !(total_mass > 0.0) {
        return Err(PhysicsError::InvalidOrbit(format!(
            "combined mass must be positive, got {total_mass}"
        )));
    }

    let normal = plane_normal_hint.normalize_or_zero();
    if normal == Vector::ZERO {
        return Err(PhysicsError::InvalidOrbit(format!(
            "plane normal hint must have non-zero length, got {plane_normal_hint}"
        )));
    }

    let mut radial = normal.cross(Vector::Y);
    if radial.length() < DEGENERATE_CROSS_LENGTH {
        radial = normal.cross(Vector::X);
    }
    let radial = radial.normalize();
    let tangential = normal.cross(radial);

    let speed = circular_orbit_speed(gravitational_constant, total_mass, distance);

    body.position = parent.position() + radial * distance;
    body.velocity = parent.velocity() + tangential * speed;

    Ok(())
}

/// Nudge a body's velocity in a random direction.
///
/// The nudge has magnitude `fraction * |velocity|`, or `floor` when that would
/// be smaller, so a body at rest still moves.
pub fn add_velocity_jitter(body: &mut Body, rng: &mut SharedRng, fraction: Scalar, floor: Scalar) {
    let magnitude = (fraction * body.velocity.length()).max(floor);
    body.velocity += random_unit_vector(rng) * magnitude;
}
