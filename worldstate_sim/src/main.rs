//! WorldState Simulator CLI
//!
//! Run the event scheduler against the demo world and report what happened.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use worldstate_core::{default_catalog, load_catalog, SchedulerConfig};
use worldstate_sim::{ForcedTrigger, RunResult, SimConfig, SimError, SimRunner};

/// WorldState event simulator
#[derive(Parser, Debug)]
#[command(name = "worldstate-sim")]
#[command(about = "Run the WorldState event scheduler on a deterministic demo world", long_about = None)]
struct Args {
    /// Master seed for determinism (0 = random from time)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Simulation duration in seconds
    #[arg(short, long, default_value = "60")]
    duration: f64,

    /// Tick rate in Hz
    #[arg(short, long, default_value = "10")]
    tick_rate: u32,

    /// JSON file with event definitions (built-in catalog if omitted)
    #[arg(short, long)]
    catalog: Option<String>,

    /// JSON file with scheduler delay/interval ranges
    #[arg(long)]
    config: Option<String>,

    /// Force an event at a time, e.g. `acid_rain@12.5` (repeatable)
    #[arg(short, long, default_value = "low_gravity@20")]
    force: Vec<String>,

    /// Disable all forced events, including the default one
    #[arg(long)]
    no_force: bool,

    /// Export a world snapshot every N ticks
    #[arg(long, default_value = "10")]
    snapshot_every: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for scripting
    #[arg(long)]
    json: bool,

    /// Export frames and journal to a JSON file
    #[arg(long)]
    export: Option<String>,
}

fn main() {
    let args = Args::parse();

    // Initialize logging; RUST_LOG overrides --verbose
    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let seed = if args.seed == 0 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1)
    } else {
        args.seed
    };

    let catalog = match &args.catalog {
        Some(path) => load_catalog(path)?,
        None => default_catalog(),
    };
    let scheduler = match &args.config {
        Some(path) => SchedulerConfig::load(path)?,
        None => SchedulerConfig::default(),
    };
    let triggers = if args.no_force {
        Vec::new()
    } else {
        args.force
            .iter()
            .map(|s| s.parse::<ForcedTrigger>())
            .collect::<Result<Vec<_>, _>>()?
    };

    if !args.json {
        info!("WorldState Simulator v{}", env!("CARGO_PKG_VERSION"));
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    let config = SimConfig {
        seed,
        scheduler,
        triggers,
        snapshot_every_ticks: args.snapshot_every,
        ..Default::default()
    };
    let runner = SimRunner::new(config)
        .with_catalog(catalog)
        .with_tick_rate(args.tick_rate)
        .with_duration(args.duration);

    let result = match &args.export {
        Some(path) => {
            let (result, export) = runner.run_with_export();
            export.write_to_file(path)?;
            info!("Exported {} frames to {}", export.frames.len(), path);
            result
        }
        None => runner.run(),
    };

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize result: {}", e),
        }
    } else {
        print_summary(&result);
    }

    Ok(())
}

fn print_summary(result: &RunResult) {
    let stats = &result.stats;

    info!("");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!(
        "seed={} ticks={} time={:.1}s",
        result.seed, result.total_ticks, result.final_time_secs
    );
    info!(
        "events: {} started, {} ended, {} preempted, {} overrides",
        stats.events_started, stats.events_ended, stats.events_preempted, stats.overrides
    );
    info!("active for {:.1}s", stats.active_secs);
    for (category, count) in &stats.starts_by_category {
        info!("  {:<16} {}", category, count);
    }
    if result.triggers_ignored > 0 {
        info!("{} forced triggers had no matching event", result.triggers_ignored);
    }
    if let Some(active) = &result.active_at_end {
        info!("still active at end: {}", active);
    }
    info!(
        "world: gravity={:.2} resources={:.2} health={:?}",
        result.final_world.gravity_scale, result.final_world.resource_multiplier, result.final_world.entity_health
    );
}
