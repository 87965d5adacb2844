//! EntityFix replay host.
//!
//! Loads a configuration root the same way a live server would, optionally
//! starts a map, and replays a JSON scenario of host notifications against
//! the coordinator, logging every command the host would have to apply.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --root ./server --map ze_example --script scenario.json
//! ```
//!
//! Set `RUST_LOG=debug` to see per-effect decisions.

use clap::Parser;
use log::info;
use std::path::PathBuf;

use entityfix::coordinator::Coordinator;
use entityfix::resources::config::EntityFixConfig;
use entityfix::resources::mapgravity::MapGravity;
use entityfix::scenario::{Scenario, ScenarioRunner};

/// EntityFix
#[derive(Parser)]
#[command(
    version,
    about = "Replay host notifications against the EntityFix coordinator"
)]
struct Cli {
    /// Configuration root holding resources/config and resources/maps.
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Map to start before replaying. Overrides the scenario's own map.
    #[arg(long)]
    map: Option<String>,

    /// JSON scenario to replay.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let scenario = match cli.script.as_deref().map(Scenario::load).transpose() {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut coordinator = Coordinator::new(&cli.root);
    {
        let config = coordinator.world().resource::<EntityFixConfig>();
        info!(
            "Ignite: velocity x{} every {}s, {} damage, particle {}",
            config.ignite_velocity, config.ignite_repeat, config.ignite_damage, config.ignite_particle
        );
    }

    let map = cli
        .map
        .or_else(|| scenario.as_ref().and_then(|s| s.map.clone()));
    if let Some(map) = map {
        coordinator.map_load(&map);
        coordinator.round_start();
        let gravity = coordinator.world().resource::<MapGravity>();
        info!("{} gravity overrides active", gravity.len());
    }

    let Some(scenario) = scenario else {
        info!("No scenario given, configuration checked");
        return;
    };

    let mut runner = ScenarioRunner::new(coordinator, &scenario);
    match runner.run(&scenario.steps) {
        Ok(count) => info!("Replayed {} steps, {count} host commands", scenario.steps.len()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
    runner.report();
}
