// SPDX-License-Identifier: GPL-3.0-only

//! Polling driver
//!
//! The orchestration loop behind the viewer: initialize the frame source
//! once, then tick. Each tick polls readiness, pulls at most one frame,
//! converts it, presents the grayscale view, and paints the overlay at
//! the matched indices; the pulled buffer is released when the tick's
//! frame guard drops, on every exit path. A failed tick is logged and
//! contained; the next tick is the retry. A failed initialization
//! disables the capture path for the rest of the session.

use std::time::Instant;

use tracing::{error, info, warn};

use crate::backends::{FrameDimensions, FrameSource};
use crate::config::Config;
use crate::constants::timing;
use crate::errors::{CaptureResult, TickError};
use crate::render::convert::convert_frame;
use crate::render::overlay::OverlayCanvas;
use crate::render::surface::PixelBuffer;

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Capture is disabled (initialization failed); nothing happened
    Disabled,
    /// The source had no frame; nothing happened
    NotReady,
    /// A frame was converted and presented
    Presented,
    /// The tick failed and was skipped; the next tick retries
    Failed,
}

/// Render surfaces owned by the driver
pub struct ViewSurfaces {
    dims: FrameDimensions,
    base: PixelBuffer,
    overlay: OverlayCanvas,
}

impl ViewSurfaces {
    fn new(dims: FrameDimensions) -> Self {
        Self {
            dims,
            // The base view starts dark and transparent until the first
            // frame replaces it whole.
            base: PixelBuffer::transparent(dims),
            overlay: OverlayCanvas::new(dims),
        }
    }

    pub fn dims(&self) -> FrameDimensions {
        self.dims
    }

    /// Grayscale depth view
    pub fn base(&self) -> &PixelBuffer {
        &self.base
    }

    /// Highlight overlay
    pub fn overlay(&self) -> &OverlayCanvas {
        &self.overlay
    }
}

/// Drives the per-tick poll/pull/convert/present sequence
pub struct PollDriver {
    source: Box<dyn FrameSource>,
    surfaces: Option<ViewSurfaces>,
    frames_presented: u64,
    last_present: Option<Instant>,
    fps: Option<f64>,
    shut_down: bool,
}

impl PollDriver {
    pub fn new(source: Box<dyn FrameSource>) -> Self {
        Self {
            source,
            surfaces: None,
            frames_presented: 0,
            last_present: None,
            fps: None,
            shut_down: false,
        }
    }

    /// Run the source's setup sequence once
    ///
    /// On failure the capture path stays disabled for the session; every
    /// later [`Self::tick`] is a no-op. The caller decides whether the
    /// rest of the application carries on.
    pub fn initialize(&mut self) -> CaptureResult<FrameDimensions> {
        match self.source.initialize() {
            Ok(dims) => {
                info!(dims = %dims, "Frame source initialized");
                self.surfaces = Some(ViewSurfaces::new(dims));
                Ok(dims)
            }
            Err(e) => {
                error!(error = %e, "Frame source initialization failed; capture disabled");
                Err(e)
            }
        }
    }

    /// Whether the poll/convert path is live
    pub fn capture_enabled(&self) -> bool {
        self.surfaces.is_some()
    }

    pub fn surfaces(&self) -> Option<&ViewSurfaces> {
        self.surfaces.as_ref()
    }

    /// Frames presented since startup
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Smoothed presentation rate, once two frames have been shown
    pub fn fps(&self) -> Option<f64> {
        self.fps
    }

    /// One polling tick
    pub fn tick(&mut self, config: &Config) -> TickOutcome {
        let Some(surfaces) = self.surfaces.as_mut() else {
            return TickOutcome::Disabled;
        };
        if !self.source.frame_ready() {
            return TickOutcome::NotReady;
        }
        match capture_once(&mut *self.source, surfaces, config) {
            Ok(()) => {
                self.mark_presented();
                TickOutcome::Presented
            }
            Err(e) => {
                warn!(error = %e, "Capture tick failed; retrying next tick");
                TickOutcome::Failed
            }
        }
    }

    /// Reset the overlay to fully transparent (user-triggered)
    pub fn clear_overlay(&mut self) {
        if let Some(surfaces) = self.surfaces.as_mut() {
            surfaces.overlay.clear();
        }
    }

    /// Stop the source, best-effort, once
    pub fn shutdown(&mut self) {
        if !self.shut_down {
            self.shut_down = true;
            self.source.shutdown();
        }
    }

    fn mark_presented(&mut self) {
        self.frames_presented += 1;
        let now = Instant::now();
        if let Some(last) = self.last_present {
            let dt = now.duration_since(last).as_secs_f64();
            if dt > 0.0 {
                let instantaneous = 1.0 / dt;
                self.fps = Some(match self.fps {
                    Some(prev) => prev + (instantaneous - prev) * timing::FPS_SMOOTHING,
                    None => instantaneous,
                });
            }
        }
        self.last_present = Some(now);
    }
}

/// Pull, convert, present, paint. The frame guard releases the pulled
/// buffer when it drops at the end of this function, also on the error
/// paths.
fn capture_once(
    source: &mut dyn FrameSource,
    surfaces: &mut ViewSurfaces,
    config: &Config,
) -> Result<(), TickError> {
    let frame = source.pull_frame()?;
    let converted = convert_frame(frame.samples(), surfaces.dims.pixel_count(), config.band)?;
    surfaces.base.replace(converted.pixels);
    surfaces
        .overlay
        .paint(&converted.matched, config.highlight_color.rgba());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::synthetic::SyntheticFrameSource;

    #[test]
    fn failed_init_disables_every_tick() {
        let mut driver = PollDriver::new(Box::new(SyntheticFrameSource::failing_init("device")));
        assert!(driver.initialize().is_err());
        assert!(!driver.capture_enabled());
        assert_eq!(driver.tick(&Config::default()), TickOutcome::Disabled);
        assert_eq!(driver.tick(&Config::default()), TickOutcome::Disabled);
        assert_eq!(driver.frames_presented(), 0);
    }
}
