// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic depth source
//!
//! Stands in for the capture plugin when no hardware is present: the
//! animated mode produces a deterministic scene (a sloping far wall with
//! an orbiting disc at a depth inside the default threshold band), and
//! the scripted mode replays a fixed sequence of readiness states and
//! frames for driver tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::backends::{FrameDimensions, FrameGuard, FrameRelease, FrameSource, RawFrame};
use crate::constants::{depth, frame};
use crate::errors::{CaptureError, CaptureResult};

/// Background depth at the near edge of the synthetic wall
const WALL_NEAR: u16 = 400;

/// Depth range spanned by the synthetic wall, left to right
const WALL_SPAN: u16 = 1600;

/// One scripted source event, consumed per driver interaction
#[derive(Debug, Clone)]
pub enum ScriptStep {
    /// A ready frame with the given samples
    Frame(Vec<u16>),
    /// One not-ready poll
    NotReady,
    /// A readiness signal whose pull then fails
    PullError(String),
}

/// Shared pull/release counters for observing source usage in tests
#[derive(Debug, Clone, Default)]
pub struct SourceCounters {
    pulls: Arc<AtomicU64>,
    releases: Arc<AtomicU64>,
}

impl SourceCounters {
    pub fn pulls(&self) -> u64 {
        self.pulls.load(Ordering::Relaxed)
    }

    pub fn releases(&self) -> u64 {
        self.releases.load(Ordering::Relaxed)
    }
}

enum Mode {
    Animated,
    Scripted(VecDeque<ScriptStep>),
}

/// Frame source backed by generated data instead of a device
pub struct SyntheticFrameSource {
    dims: FrameDimensions,
    mode: Mode,
    fail_init_step: Option<&'static str>,
    phase: u64,
    in_flight: Option<Vec<u16>>,
    counters: SourceCounters,
}

impl SyntheticFrameSource {
    /// Animated source at the default frame size
    pub fn new() -> Self {
        Self::with_dimensions(FrameDimensions {
            width: frame::DEFAULT_WIDTH,
            height: frame::DEFAULT_HEIGHT,
        })
    }

    /// Animated source at an explicit frame size
    pub fn with_dimensions(dims: FrameDimensions) -> Self {
        Self {
            dims,
            mode: Mode::Animated,
            fail_init_step: None,
            phase: 0,
            in_flight: None,
            counters: SourceCounters::default(),
        }
    }

    /// Source that replays the given steps, then reports not-ready forever
    pub fn scripted(dims: FrameDimensions, steps: Vec<ScriptStep>) -> Self {
        Self {
            dims,
            mode: Mode::Scripted(steps.into()),
            fail_init_step: None,
            phase: 0,
            in_flight: None,
            counters: SourceCounters::default(),
        }
    }

    /// Source whose initialization fails at the named step
    pub fn failing_init(step: &'static str) -> Self {
        let mut source = Self::new();
        source.fail_init_step = Some(step);
        source
    }

    /// Handle to the pull/release counters
    pub fn counters(&self) -> SourceCounters {
        self.counters.clone()
    }

    fn generate_frame(&self) -> Vec<u16> {
        let w = self.dims.width as usize;
        let h = self.dims.height as usize;
        let mut samples = Vec::with_capacity(w * h);

        // Disc orbits the frame center at a depth inside the default band.
        let disc_depth = (depth::DEFAULT_MIN_BOUND + depth::DEFAULT_MAX_BOUND) / 2;
        let angle = self.phase as f64 * 0.05;
        let cx = w as f64 / 2.0 + angle.cos() * (w as f64 / 4.0);
        let cy = h as f64 / 2.0 + angle.sin() * (h as f64 / 4.0);
        let radius = (h as f64 / 6.0).max(1.0);

        for y in 0..h {
            for x in 0..w {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                let sample = if dx * dx + dy * dy <= radius * radius {
                    disc_depth
                } else {
                    WALL_NEAR + ((x as u32 * WALL_SPAN as u32) / w.max(1) as u32) as u16
                };
                samples.push(sample);
            }
        }

        samples
    }
}

impl Default for SyntheticFrameSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRelease for SyntheticFrameSource {
    fn release(&mut self, _frame: RawFrame) {
        self.in_flight = None;
        self.counters.releases.fetch_add(1, Ordering::Relaxed);
    }
}

impl FrameSource for SyntheticFrameSource {
    fn initialize(&mut self) -> CaptureResult<FrameDimensions> {
        if let Some(step) = self.fail_init_step {
            return Err(CaptureError::InitializationFailed { step });
        }
        info!(dims = %self.dims, "Synthetic depth source ready");
        Ok(self.dims)
    }

    fn frame_ready(&mut self) -> bool {
        match &mut self.mode {
            Mode::Animated => true,
            Mode::Scripted(steps) => match steps.front() {
                Some(ScriptStep::NotReady) => {
                    steps.pop_front();
                    false
                }
                Some(_) => true,
                None => false,
            },
        }
    }

    fn pull_frame(&mut self) -> CaptureResult<FrameGuard<'_>> {
        let samples = if let Mode::Scripted(steps) = &mut self.mode {
            match steps.pop_front() {
                Some(ScriptStep::Frame(samples)) => samples,
                Some(ScriptStep::PullError(msg)) => return Err(CaptureError::PullFailed(msg)),
                Some(ScriptStep::NotReady) | None => return Err(CaptureError::NoFrameAvailable),
            }
        } else {
            self.phase += 1;
            self.generate_frame()
        };

        self.counters.pulls.fetch_add(1, Ordering::Relaxed);
        let stored = self.in_flight.insert(samples);
        // Vec storage is stable while it sits in `in_flight`, and the
        // guard's borrow of the source keeps it there until release.
        let frame = unsafe { RawFrame::new(stored.as_ptr(), stored.len()) };
        Ok(FrameGuard::new(self, frame))
    }

    fn shutdown(&mut self) {
        info!("Synthetic depth source stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(w: u32, h: u32) -> FrameDimensions {
        FrameDimensions {
            width: w,
            height: h,
        }
    }

    #[test]
    fn animated_frames_match_pixel_count() {
        let mut source = SyntheticFrameSource::with_dimensions(dims(16, 8));
        source.initialize().unwrap();
        assert!(source.frame_ready());
        let guard = source.pull_frame().unwrap();
        assert_eq!(guard.samples().len(), 128);
    }

    #[test]
    fn guard_drop_releases_exactly_once() {
        let mut source = SyntheticFrameSource::with_dimensions(dims(4, 4));
        let counters = source.counters();
        source.initialize().unwrap();
        {
            let _guard = source.pull_frame().unwrap();
            assert_eq!(counters.pulls(), 1);
            assert_eq!(counters.releases(), 0);
        }
        assert_eq!(counters.releases(), 1);
    }

    #[test]
    fn scripted_steps_replay_in_order() {
        let mut source = SyntheticFrameSource::scripted(
            dims(2, 1),
            vec![
                ScriptStep::NotReady,
                ScriptStep::Frame(vec![1, 2]),
                ScriptStep::PullError("bus reset".into()),
            ],
        );
        source.initialize().unwrap();

        assert!(!source.frame_ready());

        assert!(source.frame_ready());
        assert_eq!(source.pull_frame().unwrap().samples(), &[1, 2]);

        assert!(source.frame_ready());
        assert!(matches!(
            source.pull_frame(),
            Err(CaptureError::PullFailed(_))
        ));

        assert!(!source.frame_ready());
    }
}
