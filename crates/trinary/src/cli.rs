//! Command line interface for Trinary

use clap::Parser;
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::config::SimulationConfig;
use crate::physics::integrators::IntegratorRegistry;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
    /// Invalid integrator name provided
    InvalidIntegrator(String),
    /// Configuration values break a rule
    InvalidConfig(String),
    /// Configuration file could not be written
    ConfigWrite(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::InvalidIntegrator(msg) => write!(f, "Invalid integrator: {msg}"),
            CliError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
            CliError::ConfigWrite(msg) => write!(f, "Failed to write configuration: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Trinary - headless triple star simulation
#[derive(Parser, Debug)]
#[command(version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Gravitational constant (overrides config file)
    #[arg(short = 'g', long, value_name = "VALUE")]
    pub gravity: Option<f64>,

    /// Integrator type (e.g., rk4, rk2)
    #[arg(short = 'i', long, value_name = "TYPE")]
    pub integrator: Option<String>,

    /// Random seed for star system generation
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Integration steps per frame
    #[arg(long, value_name = "STEPS")]
    pub speed: Option<u32>,

    /// Number of frames to run
    #[arg(short = 'f', long, value_name = "COUNT")]
    pub frames: Option<u64>,

    /// Positions kept per body trail
    #[arg(long, value_name = "POINTS")]
    pub trail_length: Option<usize>,

    /// Start paused
    #[arg(short = 'p', long)]
    pub paused: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// List available integrators and exit
    #[arg(long)]
    pub list_integrators: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    pub write_config: Option<String>,
}

/// Handles the --list-integrators flag by printing available integrators
pub fn handle_list_integrators() {
    let registry = IntegratorRegistry::default();
    println!("Available integrators:");
    for name in registry.list_available() {
        println!("  - {name}");
    }

    let aliases = registry.list_aliases();
    if !aliases.is_empty() {
        println!("\nAliases:");
        for (alias, target) in aliases {
            println!("  - {alias} -> {target}");
        }
    }
}

/// Handles the --write-config flag by saving the effective configuration
pub fn handle_write_config(config: &SimulationConfig, path: &str) -> Result<(), CliError> {
    config
        .save(path)
        .map_err(|err| CliError::ConfigWrite(err.to_string()))
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        SimulationConfig::load_layered(Some(Path::new(config_path)))
            .map_err(|err| CliError::ConfigLoad(err.to_string()))?
    } else {
        SimulationConfig::load_from_user_config()
    };

    if let Some(gravity) = args.gravity {
        info!("Overriding gravitational constant to: {gravity}");
        config.physics.gravitational_constant = gravity;
    }

    if let Some(integrator_type) = &args.integrator {
        IntegratorRegistry::default()
            .create(integrator_type)
            .map_err(CliError::InvalidIntegrator)?;

        info!("Using integrator: {integrator_type}");
        config.physics.integrator = integrator_type.clone();
    }

    if let Some(seed) = args.seed {
        info!("Using random seed: {seed}");
        config.physics.initial_seed = Some(seed);
    }

    if let Some(speed) = args.speed {
        config.driver.speed = speed;
    }

    if let Some(frames) = args.frames {
        config.driver.frames = frames;
    }

    if let Some(trail_length) = args.trail_length {
        config.driver.trail_length = trail_length;
    }

    if args.paused {
        config.driver.paused = true;
    }

    config
        .validate_all()
        .map_err(|err| CliError::InvalidConfig(err.to_string()))?;

    Ok(config)
}
