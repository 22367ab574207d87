//! Companion follow demo.
//!
//! Runs the headless follow scenario: a scripted leader walks a route through
//! two locations while a companion follows it under the follow controller.
//!
//! # Main Loop
//!
//! 1. Load the tuning from the INI file (defaults when missing)
//! 2. Build the world, register observers, spawn the scenario
//! 3. Engage the companion's follow mode
//! 4. Tick the schedule a fixed number of times at 60 Hz
//! 5. Optionally print a JSON trace line on every replan tick
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --ticks 1200 --seed 7 --trace
//! ```

use std::path::PathBuf;

use clap::Parser;

use companion_follow::events::companion::EngageFollowEvent;
use companion_follow::headless::scenario::{TickReport, build_schedule, build_world, step};
use companion_follow::resources::followconfig::FollowConfig;
use companion_follow::resources::sessionrole::SessionRole;

const FRAME_DT: f32 = 1.0 / 60.0;

/// Companion follow demo
#[derive(Parser)]
#[command(version, about = "Headless companion follow simulation")]
struct Cli {
    /// INI file with the follow tuning.
    #[arg(long, value_name = "PATH", default_value = "./follow.ini")]
    config: PathBuf,

    /// Write the current tuning to the config file and exit.
    #[arg(long)]
    write_config: bool,

    /// Number of host ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Seed for idle durations. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Run as a non-authoritative replica of a multiplayer session.
    #[arg(long)]
    replica: bool,

    /// Run as the host of a multiplayer session.
    #[arg(long)]
    multiplayer: bool,

    /// Print one JSON line per replan tick.
    #[arg(long)]
    trace: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = FollowConfig::with_path(cli.config.clone());
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using default tuning", e);
    }

    // Early-exit: dump the tuning and quit
    if cli.write_config {
        match config.save_to_file() {
            Ok(()) => println!("Tuning written to {}", cli.config.display()),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let role = if cli.replica {
        SessionRole::replica()
    } else if cli.multiplayer {
        SessionRole::host()
    } else {
        SessionRole::single_player()
    };
    let replan_interval = config.tuning.replan_interval.max(1);

    log::info!("Starting follow scenario ({:?}, seed {:?})", role, cli.seed);
    let (mut world, entities) = build_world(config, role, cli.seed);
    let mut schedule = build_schedule();

    world.trigger(EngageFollowEvent {
        entity: entities.companion,
        leader: entities.leader,
    });
    world.flush();

    let mut idle_ticks = 0u64;
    for tick in 0..cli.ticks {
        step(&mut world, &mut schedule, FRAME_DT);

        let Some(report) = TickReport::capture(&world, entities, tick) else {
            log::warn!("Scenario entities vanished at tick {}", tick);
            break;
        };
        if report.idle {
            idle_ticks += 1;
        }
        if cli.trace && tick % replan_interval == 0 {
            match serde_json::to_string(&report) {
                Ok(line) => println!("{line}"),
                Err(e) => log::warn!("Cannot serialize trace line: {}", e),
            }
        }
    }

    if let Some(report) = TickReport::capture(&world, entities, cli.ticks) {
        log::info!(
            "Done after {} ticks: leader {:?} in {:?}, companion {:?} in {:?}, distance {:.1}, idle {} ticks",
            cli.ticks,
            report.leader_tile,
            report.leader_location,
            report.follower_tile,
            report.follower_location,
            report.distance,
            idle_ticks
        );
    }
}
