use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use warroom_app::config::{AppError, Cli};
use warroom_app::game_loop;
use warroom_app::transport;
use warroom_sim::MissionEngine;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "warroom stopped");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let fleet_config = cli.fleet_config()?;
    let engine_config = cli.engine_config()?;
    let tick = cli.tick_duration()?;
    let engine = MissionEngine::from_config(&fleet_config, engine_config)?;

    let link = transport::connect(&cli.url)?;

    let (outbound_tx, outbound_rx) = crossbeam_channel::unbounded();
    transport::spawn_writer(outbound_rx, link.writer).map_err(|source| AppError::Spawn {
        name: "writer",
        source,
    })?;
    let (command_tx, game_loop) = game_loop::spawn_game_loop(engine, tick, outbound_tx)
        .map_err(|source| AppError::Spawn {
            name: "game loop",
            source,
        })?;
    transport::spawn_reader(link.reader, command_tx).map_err(|source| AppError::Spawn {
        name: "reader",
        source,
    })?;

    info!(
        url = %cli.url,
        system_uid = %fleet_config.system_uid,
        swarms = fleet_config.swarms.len(),
        vehicles = fleet_config.vehicle_count(),
        tick_ms = tick.as_millis() as u64,
        "warroom ground station ready"
    );

    game_loop.join().map_err(|_| AppError::LoopPanicked)
}
