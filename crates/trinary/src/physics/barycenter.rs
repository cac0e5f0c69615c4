//! Center of mass and center of positions for a set of bodies

use crate::physics::components::{Barycenter, Body};
use crate::physics::error::{PhysicsError, PhysicsResult};
use crate::physics::math::{Scalar, Vector};

/// Reduce bodies to their mass-weighted aggregate.
///
/// Fails with [`PhysicsError::EmptyInput`] for an empty slice or a total mass
/// that is not positive.
pub fn center_of_mass(bodies: &[Body]) -> PhysicsResult<Barycenter> {
    let mut total_mass: Scalar = 0.0;
    let mut weighted_position = Vector::ZERO;
    let mut weighted_velocity = Vector::ZERO;

    for body in bodies {
        total_mass += body.mass();
        weighted_position += body.position * body.mass();
        weighted_velocity += body.velocity * body.mass();
    }

    if bodies.is_empty() || !(total_mass > 0.0) {
        return Err(PhysicsError::EmptyInput);
    }

    Ok(Barycenter {
        mass: total_mass,
        position: weighted_position / total_mass,
        velocity: weighted_velocity / total_mass,
    })
}

/// Unweighted mean of the body positions.
pub fn center_of_positions(bodies: &[Body]) -> PhysicsResult<Vector> {
    if bodies.is_empty() {
        return Err(PhysicsError::EmptyInput);
    }

    let sum = bodies
        .iter()
        .fold(Vector::ZERO, |acc, body| acc + body.position);

    Ok(sum / bodies.len() as Scalar)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(mass: Scalar, position: Vector, velocity: Vector) -> Body {
        Body::with_state(mass, position, velocity).unwrap()
    }

    #[test]
    fn test_center_of_mass_two_bodies() {
        let bodies = [
            body_at(100.0, Vector::ZERO, Vector::ZERO),
            body_at(300.0, Vector::new(4.0, 0.0, 0.0), Vector::ZERO),
        ];

        let center = center_of_mass(&bodies).unwrap();
        assert_eq!(center.mass, 400.0);
        assert_eq!(center.position, Vector::new(3.0, 0.0, 0.0));
        assert_eq!(center.velocity, Vector::ZERO);
    }

    #[test]
    fn test_center_of_mass_weights_velocity() {
        let bodies = [
            body_at(1.0, Vector::ZERO, Vector::new(0.0, 4.0, 0.0)),
            body_at(3.0, Vector::ZERO, Vector::new(0.0, -4.0, 0.0)),
        ];

        let center = center_of_mass(&bodies).unwrap();
        assert_eq!(center.velocity, Vector::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn test_center_of_mass_empty() {
        assert_eq!(center_of_mass(&[]), Err(PhysicsError::EmptyInput));
    }

    #[test]
    fn test_center_of_positions_ignores_mass() {
        let bodies = [
            body_at(100.0, Vector::ZERO, Vector::ZERO),
            body_at(300.0, Vector::new(4.0, 2.0, -6.0), Vector::ZERO),
        ];

        assert_eq!(
            center_of_positions(&bodies).unwrap(),
            Vector::new(2.0, 1.0, -3.0)
        );
    }

    #[test]
    fn test_center_of_positions_empty() {
        assert_eq!(center_of_positions(&[]), Err(PhysicsError::EmptyInput));
    }
}
