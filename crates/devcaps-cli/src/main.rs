//! Devcaps - Device capability reporter
//!
//! Composes the host platform backend with the capability resolver and
//! prints the resolved snapshot.

mod config;
mod report;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use devcaps_platform::HostPlatform;
use devcaps_resolver::CapabilityResolver;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "devcaps")]
#[command(about = "Resolve and report device hardware and software capabilities")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "devcaps.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Print the snapshot as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Keep running, refreshing dynamic fields on the configured interval
    #[arg(long)]
    watch: bool,

    /// Write a default configuration file and exit
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if args.init {
        config::save_default_config(&args.config)?;
        println!("Wrote default configuration to {}", args.config.display());
        return Ok(());
    }

    let config = config::load_config(&args.config)?;

    let platform = Arc::new(HostPlatform::new());
    let resolver = CapabilityResolver::new(platform, config.to_focus_overrides());

    info!("Resolving device capabilities");
    let snapshot = resolver.resolve_and_wait().await;
    print_snapshot(&snapshot, args.json)?;

    if args.watch {
        let mut interval =
            tokio::time::interval(Duration::from_secs(config.watch.interval_secs.max(1)));
        interval.tick().await; // first tick completes immediately
        loop {
            interval.tick().await;
            let snapshot = resolver.resolve_and_wait().await;
            print_snapshot(&snapshot, args.json)?;
        }
    }

    Ok(())
}

fn print_snapshot(snapshot: &devcaps_core::Snapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", report::render_json(snapshot)?);
    } else {
        print!("{}", report::render_text(snapshot));
    }
    Ok(())
}
