use clap::Parser;
use tracing::{Level, debug, error, info};

use trinary::cli::{self, Args};
use trinary::config::SimulationConfig;
use trinary::simulation::Simulation;

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    if args.list_integrators {
        cli::handle_list_integrators();
        return;
    }

    let config = match cli::load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    if args.print_config {
        match toml::to_string_pretty(&config) {
            Ok(toml_string) => println!("{toml_string}"),
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if let Some(path) = &args.write_config {
        if let Err(e) = cli::handle_write_config(&config, path) {
            error!("{e}");
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = run(&config) {
        error!("{e}");
        std::process::exit(1);
    }
}

/// Advance the simulation at a fixed frame interval, logging as it goes
fn run(config: &SimulationConfig) -> Result<(), trinary::simulation::SimulationError> {
    let mut simulation = Simulation::from_config(config)?;
    let frame_delta = config.physics.time_step;
    let log_interval = config.driver.log_interval;

    for _ in 0..config.driver.frames {
        simulation.advance_frame(frame_delta);

        if log_interval > 0 && simulation.frame() % log_interval == 0 {
            log_progress(&simulation);
        }
    }

    let diagnostics = simulation.diagnostics();
    info!(
        "Finished {} frames, {} steps, simulated time {:.3}",
        simulation.frame(),
        simulation.time().steps,
        simulation.time().elapsed
    );
    info!(
        "Total momentum ({:.3e}, {:.3e}, {:.3e}), energy {:.6}, drift {:.3e}",
        diagnostics.momentum.x,
        diagnostics.momentum.y,
        diagnostics.momentum.z,
        diagnostics.total_energy(),
        simulation.energy_drift()
    );
    if let Some(barycenter) = diagnostics.barycenter {
        info!("System {}", barycenter);
    }
    for (index, body) in simulation.system().bodies().iter().enumerate() {
        info!("Body {}: {}", index, body);
    }

    Ok(())
}

fn log_progress(simulation: &Simulation) {
    info!(
        "Frame {}: t = {:.3}, energy drift {:.3e}",
        simulation.frame(),
        simulation.time().elapsed,
        simulation.energy_drift()
    );
    for (index, trail) in simulation.trails().iter().enumerate() {
        if let Some(position) = trail.latest() {
            debug!(
                "Body {} at ({:.3}, {:.3}, {:.3}), trail {} points",
                index,
                position.x,
                position.y,
                position.z,
                trail.len()
            );
        }
    }
}
