//! Timecube CLI entry point

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use timecube::cube_sensor::TraceSampler;
use timecube::{replay, AppConfig, ReplayOptions};

/// Timecube command line interface
#[derive(Parser, Debug)]
#[command(name = "timecube")]
#[command(author, version, about = "Stability-gated cube orientation for time tracking")]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a dry session over a recorded CSV trace (columns x,y,z)
    Replay {
        /// Trace file
        trace: PathBuf,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Sleep between ticks like the device does
        #[arg(long)]
        realtime: bool,

        /// Give up after this many ticks
        #[arg(long)]
        max_ticks: Option<u64>,
    },

    /// Print the default configuration as JSON
    Defaults,

    /// Display version information
    Version,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            trace,
            config,
            realtime,
            max_ticks,
        } => {
            let config = AppConfig::load(config.as_deref())?;
            let mut sampler = TraceSampler::open(&trace)
                .with_context(|| format!("Failed to open trace {}", trace.display()))?;
            let report = replay(
                &mut sampler,
                &config,
                ReplayOptions {
                    realtime,
                    max_ticks,
                },
            )
            .context("Replay ended without a decision")?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Defaults => {
            println!("{}", serde_json::to_string_pretty(&AppConfig::default())?);
        }
        Commands::Version => {
            println!("timecube {}", env!("CARGO_PKG_VERSION"));
            println!("cube-core version: {}", timecube::cube_core::VERSION);
        }
    }

    Ok(())
}
