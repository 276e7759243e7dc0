// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use depthview::backends::synthetic::SyntheticFrameSource;
use depthview::config::Config;
use depthview::driver::PollDriver;
use depthview::FrameSource;

mod cli;

#[derive(Parser)]
#[command(name = "depthview")]
#[command(about = "Terminal depth camera viewer with band highlighting")]
#[command(version = env!("GIT_VERSION"))]
#[command(subcommand_required = false)]
struct Cli {
    /// Use the synthetic frame source even when the capture plugin is linked
    #[arg(long, global = true)]
    synthetic: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save one composited frame as a PNG
    Snapshot {
        /// Output file path (default: ~/Pictures/depthview/IMG_TIMESTAMP.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report frame source availability and dimensions
    Probe,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=depthview=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let source = create_source(cli.synthetic);

    match cli.command {
        Some(Commands::Snapshot { output }) => cli::take_snapshot(source, output),
        Some(Commands::Probe) => cli::probe(source),
        None => run_viewer(source),
    }
}

fn run_viewer(source: Box<dyn FrameSource>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let mut driver = PollDriver::new(source);
    // A failed initialization disables capture for the session but the
    // viewer still comes up with settings editable.
    let _ = driver.initialize();
    depthview::terminal::run(driver, config)
}

fn create_source(synthetic: bool) -> Box<dyn FrameSource> {
    #[cfg(feature = "native-plugin")]
    if !synthetic {
        return Box::new(depthview::backends::plugin::PluginFrameSource::new());
    }
    #[cfg(not(feature = "native-plugin"))]
    let _ = synthetic;

    Box::new(SyntheticFrameSource::new())
}
