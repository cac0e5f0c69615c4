use crate::physics::error::PhysicsResult;
use crate::physics::gravity::Gravity;
use crate::physics::math::Scalar;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use trinary_macros::{ConfigDefaults, Validate};

const CONFIG_FILE_NAME: &str = "config.toml";
const ENVIRONMENT_PREFIX: &str = "TRINARY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write configuration to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(ConfigDefaults, Validate, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    #[default(PhysicsConfig::default())]
    #[validate(nested)]
    pub physics: PhysicsConfig,

    #[default(StarSystemConfig::default())]
    #[validate(nested)]
    pub system: StarSystemConfig,

    #[default(DriverConfig::default())]
    #[validate(nested)]
    pub driver: DriverConfig,
}

#[derive(ConfigDefaults, Validate, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    #[default(1.0)]
    #[validate(positive)]
    pub gravitational_constant: Scalar,

    /// Nominal step size when no frame clock drives the run
    #[default(1.0 / 60.0)]
    #[validate(positive)]
    pub time_step: Scalar,

    #[default(1.0)]
    #[validate(positive)]
    pub separation_floor: Scalar,

    #[default("rk4")]
    pub integrator: String,

    #[default(None)]
    pub initial_seed: Option<u64>,
}

impl PhysicsConfig {
    pub fn gravity(&self) -> PhysicsResult<Gravity> {
        Gravity::new(self.gravitational_constant, self.separation_floor)
    }
}

/// Parameters of the double star, outer star and planet
#[derive(ConfigDefaults, Validate, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct StarSystemConfig {
    /// Star masses are drawn from `[max_star_mass / 5, max_star_mass]`
    #[default(1000.0)]
    #[validate(positive)]
    pub max_star_mass: Scalar,

    #[default(200.0)]
    #[validate(positive)]
    pub inner_orbit: Scalar,

    #[default(1000.0)]
    #[validate(positive)]
    pub outer_orbit: Scalar,

    #[default(100.0)]
    #[validate(positive)]
    pub planet_orbit: Scalar,

    #[default(0.8)]
    #[validate(positive)]
    pub min_orbit_factor: Scalar,

    #[default(1.2)]
    #[validate(positive)]
    pub max_orbit_factor: Scalar,

    #[default(0.001)]
    #[validate(positive)]
    pub planet_mass: Scalar,

    #[default(0.2)]
    #[validate(non_negative)]
    pub velocity_jitter_fraction: Scalar,

    #[default(1e-3)]
    #[validate(non_negative)]
    pub velocity_jitter_floor: Scalar,
}

impl StarSystemConfig {
    pub fn min_star_mass(&self) -> Scalar {
        self.max_star_mass / 5.0
    }

    /// Field rules plus the ordering of the orbit factor range
    pub fn validate_ranges(&self) -> Result<(), String> {
        self.validate()?;

        if self.min_orbit_factor > self.max_orbit_factor {
            return Err(format!(
                "min_orbit_factor ({}) exceeds max_orbit_factor ({})",
                self.min_orbit_factor, self.max_orbit_factor
            ));
        }

        for (name, orbit) in [
            ("inner_orbit", self.inner_orbit),
            ("outer_orbit", self.outer_orbit),
            ("planet_orbit", self.planet_orbit),
        ] {
            if !(orbit * self.max_orbit_factor).is_finite() {
                return Err(format!("{name} scaled by max_orbit_factor overflows"));
            }
        }

        Ok(())
    }
}

/// Settings of the headless frame loop
#[derive(ConfigDefaults, Validate, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DriverConfig {
    /// Integration steps per frame
    #[default(1)]
    pub speed: u32,

    /// Frame intervals longer than this are clipped
    #[default(0.1)]
    #[validate(positive)]
    pub max_frame_delta: Scalar,

    #[default(600)]
    pub frames: u64,

    /// Positions kept per body for display
    #[default(300)]
    pub trail_length: usize,

    /// Frames between progress logs; zero disables them
    #[default(60)]
    pub log_interval: u64,

    #[default(false)]
    pub paused: bool,
}

impl SimulationConfig {
    /// Per-user configuration file, if the platform has a config directory
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "trinary")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Layer the user configuration file and `TRINARY__SECTION__KEY`
    /// environment variables over the defaults.
    pub fn load_layered(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENVIRONMENT_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?;

        Ok(config)
    }

    /// Load the user configuration, falling back to defaults on any error
    pub fn load_from_user_config() -> Self {
        let path = Self::user_config_path();

        match Self::load_layered(path.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load user configuration: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Check field rules and the relations between fields
    pub fn validate_all(&self) -> Result<(), ConfigError> {
        self.validate().map_err(ConfigError::Invalid)?;
        self.system
            .validate_ranges()
            .map_err(|error| ConfigError::Invalid(format!("system.{error}")))
    }
}
