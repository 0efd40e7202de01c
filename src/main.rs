//! Dhvani replay daemon.
//!
//! Locates an acoustic source once per tick from statically configured
//! sensor poses and replayed azimuths, printing one JSON line per tick.
//!
//! # Usage
//!
//! ```bash
//! # Replay the angle file named in the config, 10 ticks per second
//! dhvani --config dhvani.toml
//!
//! # Single tick over a given angle file, exhaustive refinement
//! dhvani --config dhvani.toml --angles angles.txt --ticks 1 --solver slow_grid
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use serde::Serialize;

use dhvani::config::DhvaniConfig;
use dhvani::core::types::BearingRay;
use dhvani::engine::{Locator, LocatorOutput, Solution, TickRunner};
use dhvani::io::{ReplayBearings, StaticPoses};
use dhvani::{Error, SolverType};

#[derive(Parser)]
#[command(name = "dhvani")]
#[command(about = "Bearing-only acoustic source localization from DOA microphone arrays")]
struct Args {
    /// Configuration file (default: dhvani.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replay azimuths from this file (enables replay mode)
    #[arg(long)]
    angles: Option<PathBuf>,

    /// Number of ticks to run (0 = until interrupted)
    #[arg(long, default_value = "0")]
    ticks: u64,

    /// Tick rate in Hz
    #[arg(long, default_value = "10.0")]
    rate_hz: f64,

    /// Override the configured solver
    #[arg(long, value_enum)]
    solver: Option<SolverType>,
}

/// One line of output.
#[derive(Serialize)]
struct TickRecord<'a> {
    tick: u64,
    frame: &'a str,
    child_frame: &'a str,
    solution: Option<Solution>,
    rays: &'a [BearingRay],
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> dhvani::Result<()> {
    let mut config = match &args.config {
        Some(path) => DhvaniConfig::load(path)?,
        None => DhvaniConfig::load_default()?,
    };
    if let Some(angles) = &args.angles {
        config.replay.enabled = true;
        config.replay.angles_file = angles.display().to_string();
    }
    if let Some(solver) = args.solver {
        config.solver.algorithm = solver;
    }
    if !config.replay.enabled {
        return Err(Error::Configuration(
            "no live DOA front-end is built in; enable [replay] or pass --angles".to_string(),
        ));
    }
    let period = Duration::try_from_secs_f64(1.0 / args.rate_hz).map_err(|_| {
        Error::Configuration(format!("tick rate must be positive, got {}", args.rate_hz))
    })?;

    let locator = Locator::new(config.sensor_count(), config.to_locator_config()?)?;
    let poses = StaticPoses::new(config.static_poses()?);
    let bearings = ReplayBearings::from_file(&config.replay.angles_file);

    log::info!("dhvani starting");
    log::info!("  Sensors: {}", config.sensor_count());
    log::info!("  Solver: {}", config.solver.algorithm);
    log::info!("  Replay: {}", config.replay.angles_file);
    log::info!(
        "  Frames: {} -> {}",
        config.frames.world,
        config.frames.solution
    );

    let mut runner = TickRunner::new(locator, poses, bearings);
    let stdout = std::io::stdout();

    while args.ticks == 0 || runner.ticks() < args.ticks {
        let started = Instant::now();

        match runner.tick() {
            Ok(output) => {
                let line = render(&config, runner.ticks(), &output)?;
                writeln!(stdout.lock(), "{}", line)?;
            }
            // The tick is skipped; the next one gets fresh inputs
            Err(e) => log::warn!("Tick {} skipped: {}", runner.ticks(), e),
        }

        if args.ticks == 0 || runner.ticks() < args.ticks {
            std::thread::sleep(period.saturating_sub(started.elapsed()));
        }
    }

    log::info!("dhvani finished after {} ticks", runner.ticks());
    Ok(())
}

fn render(config: &DhvaniConfig, tick: u64, output: &LocatorOutput) -> dhvani::Result<String> {
    let record = TickRecord {
        tick,
        frame: &config.frames.world,
        child_frame: &config.frames.solution,
        solution: output.solution,
        rays: &output.rays,
    };
    serde_json::to_string(&record).map_err(|e| Error::InvalidInput(e.to_string()))
}
