//! Construction of the hierarchical triple star with a planet

use crate::config::StarSystemConfig;
use crate::physics::barycenter::center_of_mass;
use crate::physics::components::Body;
use crate::physics::error::{PhysicsError, PhysicsResult};
use crate::physics::gravity::Gravity;
use crate::physics::math::{Scalar, Vector, random_vector_in_range};
use crate::physics::orbit::{add_velocity_jitter, orbit_around};
use crate::physics::system::BodySystem;
use crate::resources::SharedRng;
use rand::Rng;
use tracing::debug;

/// Number of bodies in the canonical system
pub const STAR_SYSTEM_BODY_COUNT: usize = 4;

fn sample_star_mass(rng: &mut SharedRng, config: &StarSystemConfig) -> Scalar {
    rng.random_range(config.min_star_mass()..=config.max_star_mass)
}

fn sample_orbit_distance(
    rng: &mut SharedRng,
    config: &StarSystemConfig,
    nominal: Scalar,
) -> Scalar {
    rng.random_range(nominal * config.min_orbit_factor..=nominal * config.max_orbit_factor)
}

fn random_orbital_plane(rng: &mut SharedRng) -> Vector {
    random_vector_in_range(rng, -1.0, 1.0)
}

/// Build a double star, a third star circling the pair, and a planet
/// circling the third star.
///
/// Bodies come back in construction order:
/// 0. first star, at rest at the origin
/// 1. second star, on the inner orbit around the first
/// 2. third star, on the outer orbit around the barycenter of the pair
/// 3. planet, on the planet orbit around the third star
///
/// Every body but the first gets a velocity jitter afterwards, so the system
/// is only roughly stable. All randomness comes from `rng`.
///
/// A configuration that breaks its own rules is rejected before anything is
/// drawn.
pub fn create_stable_star_system(
    config: &StarSystemConfig,
    gravity: Gravity,
    rng: &mut SharedRng,
) -> PhysicsResult<BodySystem> {
    config.validate_ranges().map_err(PhysicsError::InvalidParameter)?;

    let g = gravity.gravitational_constant();

    let primary = Body::new(sample_star_mass(rng, config))?;

    let mut secondary = Body::new(sample_star_mass(rng, config))?;
    let inner_distance = sample_orbit_distance(rng, config, config.inner_orbit);
    let inner_plane = random_orbital_plane(rng);
    orbit_around(&mut secondary, &primary, inner_distance, inner_plane, g)?;

    let inner_pair = center_of_mass(&[primary, secondary])?;
    debug!("Inner pair {}", inner_pair);

    let mut tertiary = Body::new(sample_star_mass(rng, config))?;
    let outer_distance = sample_orbit_distance(rng, config, config.outer_orbit);
    let outer_plane = random_orbital_plane(rng);
    orbit_around(&mut tertiary, &inner_pair, outer_distance, outer_plane, g)?;
    debug!("Third star {}", tertiary);

    let mut planet = Body::new(config.planet_mass)?;
    let planet_distance = sample_orbit_distance(rng, config, config.planet_orbit);
    let planet_plane = random_orbital_plane(rng);
    orbit_around(&mut planet, &tertiary, planet_distance, planet_plane, g)?;

    for body in [&mut secondary, &mut tertiary, &mut planet] {
        add_velocity_jitter(
            body,
            rng,
            config.velocity_jitter_fraction,
            config.velocity_jitter_floor,
        );
    }

    Ok(BodySystem::new(
        vec![primary, secondary, tertiary, planet],
        gravity,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(seed: u64) -> BodySystem {
        create_stable_star_system(
            &StarSystemConfig::default(),
            Gravity::new(1.0, 1.0).unwrap(),
            &mut SharedRng::from_seed(seed),
        )
        .unwrap()
    }

    #[test]
    fn test_body_count_and_masses() {
        let config = StarSystemConfig::default();

        for seed in 0..32 {
            let system = build(seed);
            assert_eq!(system.len(), STAR_SYSTEM_BODY_COUNT);

            for star in &system.bodies()[..3] {
                assert!((config.min_star_mass()..=config.max_star_mass).contains(&star.mass()));
            }
            assert_eq!(system.bodies()[3].mass(), config.planet_mass);
        }
    }

    #[test]
    fn test_orbit_distances_within_factor_range() {
        for seed in 0..32 {
            let system = build(seed);
            let bodies = system.bodies();

            let inner = (bodies[1].position - bodies[0].position).length();
            assert!((160.0 - 1e-9..=240.0 + 1e-9).contains(&inner), "inner {inner}");

            let pair = center_of_mass(&bodies[..2]).unwrap();
            let outer = (bodies[2].position - pair.position).length();
            assert!((800.0 - 1e-9..=1200.0 + 1e-9).contains(&outer), "outer {outer}");

            let planet = (bodies[3].position - bodies[2].position).length();
            assert!((80.0 - 1e-9..=120.0 + 1e-9).contains(&planet), "planet {planet}");
        }
    }

    #[test]
    fn test_first_star_is_not_jittered() {
        let system = build(3);
        let primary = system.bodies()[0];

        assert_eq!(primary.position, Vector::ZERO);
        assert_eq!(primary.velocity, Vector::ZERO);
    }

    #[test]
    fn test_jitter_perturbs_circular_speed() {
        let system = build(21);
        let bodies = system.bodies();
        let gravity = system.gravity();

        let distance = (bodies[3].position - bodies[2].position).length();
        let relative_speed = (bodies[3].velocity - bodies[2].velocity).length();
        let total_mass = bodies[2].mass() + bodies[3].mass();
        let circular = (gravity.gravitational_constant() * total_mass / distance).sqrt();

        assert!(relative_speed.is_finite());
        assert_ne!(relative_speed, circular);
    }

    #[test]
    fn test_same_seed_same_system() {
        assert_eq!(build(99).bodies(), build(99).bodies());
        assert_ne!(build(99).bodies(), build(100).bodies());
    }

    fn build_with(config: &StarSystemConfig) -> PhysicsResult<BodySystem> {
        create_stable_star_system(
            config,
            Gravity::new(1.0, 1.0).unwrap(),
            &mut SharedRng::from_seed(1),
        )
    }

    #[test]
    fn test_invalid_config_surfaces_error() {
        let config = StarSystemConfig {
            planet_mass: 0.0,
            ..StarSystemConfig::default()
        };

        assert!(matches!(
            build_with(&config),
            Err(PhysicsError::InvalidParameter(message))
                if message == "planet_mass must be positive"
        ));
    }

    #[test]
    fn test_infinite_star_mass_is_rejected() {
        let config = StarSystemConfig {
            max_star_mass: Scalar::INFINITY,
            ..StarSystemConfig::default()
        };

        assert!(matches!(
            build_with(&config),
            Err(PhysicsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_inverted_orbit_factors_are_rejected() {
        let config = StarSystemConfig {
            min_orbit_factor: 1.5,
            max_orbit_factor: 0.5,
            ..StarSystemConfig::default()
        };

        assert!(matches!(
            build_with(&config),
            Err(PhysicsError::InvalidParameter(message)) if message.starts_with("min_orbit_factor")
        ));
    }
}
