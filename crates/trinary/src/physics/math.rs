use crate::resources::SharedRng;
use rand::Rng;

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 3D vector type for positions, velocities and accelerations
///
/// Operators return new vectors (`a + b`, `a - b`, `a * s`) while the
/// assignment forms (`a += b`, `a -= b`, `a *= s`) accumulate into the
/// receiver. `length`, `normalize_or_zero`, `cross` and `dot` are methods.
pub type Vector = glam::DVec3;

/// Draw a vector whose components are independently uniform in `[min, max]`.
///
/// The bounds may be given in either order.
pub fn random_vector_in_range(rng: &mut SharedRng, min: Scalar, max: Scalar) -> Vector {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };

    Vector::new(
        rng.random_range(low..=high),
        rng.random_range(low..=high),
        rng.random_range(low..=high),
    )
}

/// Draw a direction uniformly distributed over the unit sphere.
pub fn random_unit_vector(rng: &mut SharedRng) -> Vector {
    let theta = rng.random_range(0.0..=2.0 * std::f64::consts::PI);
    let phi = libm::acos(rng.random_range(-1.0..=1.0));

    Vector::new(
        libm::sin(phi) * libm::cos(theta),
        libm::sin(phi) * libm::sin(theta),
        libm::cos(phi),
    )
}
