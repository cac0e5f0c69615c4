//! Pairwise Newtonian gravity

use crate::physics::error::{PhysicsError, PhysicsResult};
use crate::physics::integrators::AccelerationField;
use crate::physics::math::{Scalar, Vector};

/// Gravitational parameters shared by every step of a run
///
/// Both parameters are finite and positive, so the field never divides by
/// zero and coincident bodies feel no force.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    gravitational_constant: Scalar,
    /// Separations below this are treated as this value
    separation_floor: Scalar,
}

impl Gravity {
    pub fn new(gravitational_constant: Scalar, separation_floor: Scalar) -> PhysicsResult<Self> {
        if !(gravitational_constant.is_finite() && gravitational_constant > 0.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "gravitational constant must be positive and finite, got {gravitational_constant}"
            )));
        }
        if !(separation_floor.is_finite() && separation_floor > 0.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "separation floor must be positive and finite, got {separation_floor}"
            )));
        }

        Ok(Self {
            gravitational_constant,
            separation_floor,
        })
    }

    #[inline]
    pub fn gravitational_constant(&self) -> Scalar {
        self.gravitational_constant
    }

    #[inline]
    pub fn separation_floor(&self) -> Scalar {
        self.separation_floor
    }

    /// Bind the parameters to the masses of a body system.
    pub fn field<'a>(&self, masses: &'a [Scalar]) -> GravitationalField<'a> {
        GravitationalField {
            masses,
            gravitational_constant: self.gravitational_constant,
            separation_floor: self.separation_floor,
        }
    }

    /// Largest acceleration a body of `mass` can impose on another.
    pub fn max_acceleration(&self, mass: Scalar) -> Scalar {
        self.gravitational_constant * mass / (self.separation_floor * self.separation_floor)
    }
}

/// Mutual gravity of a fixed set of masses, evaluated at arbitrary positions
///
/// Every pair is visited once and the contribution is applied to both bodies
/// with opposite sign, so the mass-weighted sum of accelerations is zero.
#[derive(Debug, Clone, Copy)]
pub struct GravitationalField<'a> {
    masses: &'a [Scalar],
    gravitational_constant: Scalar,
    separation_floor: Scalar,
}

impl AccelerationField for GravitationalField<'_> {
    fn accelerations(&self, positions: &[Vector], accelerations: &mut [Vector]) {
        debug_assert_eq!(positions.len(), self.masses.len());
        debug_assert_eq!(accelerations.len(), self.masses.len());

        accelerations.fill(Vector::ZERO);

        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let direction = positions[j] - positions[i];
                let distance = direction.length().max(self.separation_floor);
                let pull =
                    direction * (self.gravitational_constant / (distance * distance * distance));

                accelerations[i] += pull * self.masses[j];
                accelerations[j] -= pull * self.masses[i];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_body_acceleration() {
        let masses = [500.0, 500.0];
        let positions = [Vector::new(-100.0, 0.0, 0.0), Vector::new(100.0, 0.0, 0.0)];
        let mut accelerations = [Vector::ZERO; 2];

        Gravity::new(1.0, 1.0)
            .unwrap()
            .field(&masses)
            .accelerations(&positions, &mut accelerations);

        let expected = 500.0 / (200.0 * 200.0);
        assert!((accelerations[0].x - expected).abs() < 1e-15);
        assert!((accelerations[1].x + expected).abs() < 1e-15);
        assert_eq!(accelerations[0].y, 0.0);
    }

    #[test]
    fn test_newtons_third_law() {
        let masses = [3.0, 7.0, 11.0, 0.5];
        let positions = [
            Vector::new(1.0, 2.0, 3.0),
            Vector::new(-4.0, 0.0, 9.0),
            Vector::new(6.0, -2.0, -1.0),
            Vector::new(0.0, 8.0, 2.0),
        ];
        let mut accelerations = [Vector::ZERO; 4];

        Gravity::new(2.5, 0.1)
            .unwrap()
            .field(&masses)
            .accelerations(&positions, &mut accelerations);

        let net_force = masses
            .iter()
            .zip(accelerations.iter())
            .fold(Vector::ZERO, |acc, (mass, a)| acc + *a * *mass);
        assert!(net_force.length() < 1e-12, "Net force: {net_force:?}");
    }

    #[test]
    fn test_coincident_bodies_stay_finite() {
        let masses = [10.0, 10.0];
        let positions = [Vector::ONE, Vector::ONE];
        let mut accelerations = [Vector::splat(Scalar::NAN); 2];

        Gravity::new(1.0, 0.5)
            .unwrap()
            .field(&masses)
            .accelerations(&positions, &mut accelerations);

        assert_eq!(accelerations, [Vector::ZERO; 2]);
    }

    #[test]
    fn test_acceleration_clamped_below_floor() {
        let gravity = Gravity::new(1.0, 0.5).unwrap();
        let masses = [10.0, 10.0];
        let mut accelerations = [Vector::ZERO; 2];

        for separation in [1e-12, 1e-6, 0.01, 0.25, 0.4999] {
            let positions = [Vector::ZERO, Vector::new(separation, 0.0, 0.0)];
            gravity
                .field(&masses)
                .accelerations(&positions, &mut accelerations);

            assert!(accelerations[0].length() <= gravity.max_acceleration(10.0) * (1.0 + 1e-12));
        }
    }

    #[test]
    fn test_rejects_non_positive_parameters() {
        for (g, floor) in [
            (1.0, 0.0),
            (1.0, -0.5),
            (0.0, 1.0),
            (-1.0, 1.0),
            (Scalar::INFINITY, 1.0),
            (1.0, Scalar::NAN),
        ] {
            assert!(
                matches!(Gravity::new(g, floor), Err(PhysicsError::InvalidParameter(_))),
                "G = {g}, floor = {floor} should be rejected"
            );
        }
    }
}
