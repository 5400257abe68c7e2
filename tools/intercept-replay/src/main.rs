//! intercept-replay: run a recorded target track through the guidance engine.
//!
//! Usage:
//!   intercept-replay --track gti657.json
//!   intercept-replay --track gti657.json --config busan.toml --poll 0.25
//!
//! Snapshots go to stdout as JSON lines; logs go to stderr.

mod replay;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use intercept_core::config::load_config;
use intercept_core::GuidanceConfig;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Replay a recorded target track through the PN guidance engine"
)]
struct Cli {
    /// JSON array of track fixes ({t, latitude, longitude, altitude_meters | altitude_feet})
    #[arg(long)]
    track: PathBuf,

    /// Guidance configuration (TOML); reference tuning when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds of simulated time between polls; must not exceed the
    /// config's stale gap (1 s by default) or the engine never integrates
    #[arg(long, default_value_t = 0.1)]
    poll: f64,
}

fn main() -> anyhow::Result<()> {
    intercept_app::logging::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GuidanceConfig::default(),
    };
    let track = replay::load_track(&cli.track)?;
    info!(fixes = track.len(), poll = cli.poll, "replaying track");

    let mut out = BufWriter::new(io::stdout().lock());
    let summary = replay::replay(&track, config, cli.poll, |snapshot| {
        serde_json::to_writer(&mut out, snapshot)?;
        out.write_all(b"\n")?;
        Ok(())
    })?;
    out.flush()?;

    info!(
        polls = summary.polls,
        elapsed_secs = summary.elapsed_secs,
        min_distance_m = summary.min_distance_m,
        final_distance_m = summary.final_distance_m,
        hit = summary.hit,
        "replay finished"
    );
    Ok(())
}
