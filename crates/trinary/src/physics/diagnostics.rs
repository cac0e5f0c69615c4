//! Conserved quantities of a body set, for monitoring a run

use crate::physics::barycenter::center_of_mass;
use crate::physics::components::{Barycenter, Body};
use crate::physics::gravity::Gravity;
use crate::physics::math::{Scalar, Vector};

/// Snapshot of the conserved quantities of a body set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemDiagnostics {
    /// `None` for an empty body set
    pub barycenter: Option<Barycenter>,
    pub momentum: Vector,
    pub kinetic_energy: Scalar,
    pub potential_energy: Scalar,
}

impl SystemDiagnostics {
    pub fn measure(bodies: &[Body], gravity: &Gravity) -> Self {
        Self {
            barycenter: center_of_mass(bodies).ok(),
            momentum: total_momentum(bodies),
            kinetic_energy: kinetic_energy(bodies),
            potential_energy: potential_energy(bodies, gravity),
        }
    }

    #[inline]
    pub fn total_energy(&self) -> Scalar {
        self.kinetic_energy + self.potential_energy
    }

    /// Relative change in total energy since `initial`
    pub fn energy_drift(&self, initial: &SystemDiagnostics) -> Scalar {
        let reference = initial.total_energy();
        if reference.abs() <= Scalar::EPSILON {
            return self.total_energy() - reference;
        }
        (self.total_energy() - reference) / reference.abs()
    }
}

pub fn total_momentum(bodies: &[Body]) -> Vector {
    bodies
        .iter()
        .fold(Vector::ZERO, |acc, body| acc + body.momentum())
}

pub fn kinetic_energy(bodies: &[Body]) -> Scalar {
    bodies.iter().map(Body::kinetic_energy).sum()
}

/// Pairwise gravitational potential energy, softened by the same separation
/// floor the integrator uses.
pub fn potential_energy(bodies: &[Body], gravity: &Gravity) -> Scalar {
    let mut energy = 0.0;

    for (i, first) in bodies.iter().enumerate() {
        for second in &bodies[i + 1..] {
            let distance = (second.position - first.position)
                .length()
                .max(gravity.separation_floor());
            energy -= gravity.gravitational_constant() * first.mass() * second.mass() / distance;
        }
    }

    energy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_body_energies() {
        let bodies = [
            Body::with_state(2.0, Vector::ZERO, Vector::new(1.0, 0.0, 0.0)).unwrap(),
            Body::with_state(4.0, Vector::new(0.0, 8.0, 0.0), Vector::new(-0.5, 0.0, 0.0)).unwrap(),
        ];
        let gravity = Gravity::new(2.0, 0.1).unwrap();

        let diagnostics = SystemDiagnostics::measure(&bodies, &gravity);

        assert_eq!(diagnostics.momentum, Vector::ZERO);
        let barycenter = diagnostics.barycenter.unwrap();
        assert_eq!(barycenter.mass, 6.0);
        assert_eq!(barycenter.position, Vector::new(0.0, 32.0 / 6.0, 0.0));
        assert_eq!(barycenter.velocity, Vector::ZERO);
        assert_eq!(diagnostics.kinetic_energy, 1.0 + 0.5);
        assert_eq!(diagnostics.potential_energy, -2.0 * 2.0 * 4.0 / 8.0);
        assert_eq!(diagnostics.total_energy(), 1.5 - 2.0);
    }

    #[test]
    fn test_energy_drift_is_relative() {
        let initial = SystemDiagnostics {
            barycenter: None,
            momentum: Vector::ZERO,
            kinetic_energy: 1.0,
            potential_energy: -3.0,
        };
        let later = SystemDiagnostics {
            kinetic_energy: 1.02,
            ..initial
        };

        assert!((later.energy_drift(&initial) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_empty_set_has_no_barycenter() {
        let diagnostics = SystemDiagnostics::measure(&[], &Gravity::new(1.0, 1.0).unwrap());

        assert_eq!(diagnostics.barycenter, None);
        assert_eq!(diagnostics.total_energy(), 0.0);
    }
}
