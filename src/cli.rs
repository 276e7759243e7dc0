// SPDX-License-Identifier: GPL-3.0-only

//! Headless commands
//!
//! One-shot operations that run without the terminal viewer:
//! - probing the frame source
//! - capturing a single composited snapshot

use std::path::PathBuf;
use std::thread;

use depthview::config::Config;
use depthview::constants::timing;
use depthview::driver::{PollDriver, TickOutcome};
use depthview::{FrameSource, snapshot};

/// Report frame source availability and dimensions
pub fn probe(mut source: Box<dyn FrameSource>) -> Result<(), Box<dyn std::error::Error>> {
    match source.initialize() {
        Ok(dims) => {
            println!("Frame source: available");
            println!("  dimensions:  {}", dims);
            println!("  frame ready: {}", source.frame_ready());
            source.shutdown();
        }
        Err(e) => {
            println!("Frame source: unavailable ({})", e);
        }
    }
    Ok(())
}

/// Wait for one frame, save the composite as a PNG, and exit
pub fn take_snapshot(
    source: Box<dyn FrameSource>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let mut driver = PollDriver::new(source);
    driver.initialize()?;

    let mut presented = false;
    for _ in 0..timing::SNAPSHOT_MAX_TICKS {
        match driver.tick(&config) {
            TickOutcome::Presented => {
                presented = true;
                break;
            }
            TickOutcome::Disabled => break,
            TickOutcome::NotReady | TickOutcome::Failed => {
                thread::sleep(timing::SNAPSHOT_POLL_INTERVAL);
            }
        }
    }

    if !presented {
        driver.shutdown();
        return Err("no frame arrived before the snapshot timeout".into());
    }

    let surfaces = driver
        .surfaces()
        .ok_or("frame source produced no surfaces")?;
    let path = snapshot::save_composite(surfaces, output)?;
    println!("Saved: {}", path.display());

    driver.shutdown();
    Ok(())
}
