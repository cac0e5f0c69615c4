//! Frame loop around a body system
//!
//! This is the consumer side of the physics core: it turns wall-clock frame
//! intervals into integration steps and records what a display would show.
//! It only reads body state between steps.

pub mod trail;

pub use trail::Trail;

use crate::config::{ConfigError, DriverConfig, SimulationConfig};
use crate::physics::diagnostics::SystemDiagnostics;
use crate::physics::error::PhysicsError;
use crate::physics::integrators::IntegratorRegistry;
use crate::physics::math::Scalar;
use crate::physics::stars::create_stable_star_system;
use crate::physics::system::BodySystem;
use crate::resources::SharedRng;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error(transparent)]
    Physics(#[from] PhysicsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    UnknownIntegrator(String),
}

/// Frame timing for the physics
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsTime {
    /// Integration steps per frame
    pub speed: u32,
    /// Longest frame interval used as a step
    pub max_frame_delta: Scalar,
    /// Whether physics is paused
    pub paused: bool,
    /// Simulated time so far
    pub elapsed: Scalar,
    /// Integration steps so far
    pub steps: u64,
}

impl PhysicsTime {
    pub fn from_config(config: &DriverConfig) -> Self {
        Self {
            speed: config.speed,
            max_frame_delta: config.max_frame_delta,
            paused: config.paused,
            elapsed: 0.0,
            steps: 0,
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn unpause(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Step size for a frame: the interval clipped to `[0, max_frame_delta]`
    pub fn clip(&self, frame_delta: Scalar) -> Scalar {
        // f64::max discards NaN, so a NaN interval becomes zero
        frame_delta.max(0.0).min(self.max_frame_delta)
    }
}

pub struct Simulation {
    system: BodySystem,
    time: PhysicsTime,
    trails: Vec<Trail>,
    frame: u64,
    initial_diagnostics: SystemDiagnostics,
}

impl Simulation {
    pub fn new(system: BodySystem, driver: &DriverConfig) -> Self {
        let trails = system
            .bodies()
            .iter()
            .map(|body| {
                let mut trail = Trail::new(driver.trail_length);
                trail.add_point(body.position);
                trail
            })
            .collect();
        let initial_diagnostics = SystemDiagnostics::measure(system.bodies(), &system.gravity());

        Self {
            system,
            time: PhysicsTime::from_config(driver),
            trails,
            frame: 0,
            initial_diagnostics,
        }
    }

    /// Build the canonical star system described by `config`.
    ///
    /// The configuration is validated first, so a bad value surfaces as an
    /// error instead of reaching the random draws.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate_all()?;

        let integrator = IntegratorRegistry::default()
            .create(&config.physics.integrator)
            .map_err(SimulationError::UnknownIntegrator)?;
        let mut rng = SharedRng::from_optional_seed(config.physics.initial_seed);

        let gravity = config.physics.gravity()?;
        let system = create_stable_star_system(&config.system, gravity, &mut rng)?
            .with_integrator(integrator);

        info!(
            "Created {} bodies, integrating with {}",
            system.len(),
            system.integrator().name()
        );
        for (index, body) in system.bodies().iter().enumerate() {
            info!("Body {}: {}", index, body);
        }

        Ok(Self::new(system, &config.driver))
    }

    /// Advance one displayed frame and record trails.
    ///
    /// Runs `speed` steps of the clipped frame interval unless paused, then
    /// appends every body's position to its trail. Returns the number of
    /// steps taken.
    pub fn advance_frame(&mut self, frame_delta: Scalar) -> u32 {
        self.frame += 1;

        let steps = if self.time.is_paused() {
            0
        } else {
            self.time.speed
        };
        let dt = self.time.clip(frame_delta);

        for _ in 0..steps {
            self.system.step(dt);
        }
        self.time.steps += u64::from(steps);
        self.time.elapsed += dt * Scalar::from(steps);

        for (trail, body) in self.trails.iter_mut().zip(self.system.bodies()) {
            trail.add_point(body.position);
        }

        steps
    }

    pub fn system(&self) -> &BodySystem {
        &self.system
    }

    pub fn time(&self) -> &PhysicsTime {
        &self.time
    }

    pub fn time_mut(&mut self) -> &mut PhysicsTime {
        &mut self.time
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }

    pub fn set_trail_length(&mut self, trail_length: usize) {
        for trail in &mut self.trails {
            trail.set_max_points(trail_length);
        }
    }

    pub fn diagnostics(&self) -> SystemDiagnostics {
        SystemDiagnostics::measure(self.system.bodies(), &self.system.gravity())
    }

    /// Relative change in total energy since the simulation was created
    pub fn energy_drift(&self) -> Scalar {
        self.diagnostics().energy_drift(&self.initial_diagnostics)
    }
}
