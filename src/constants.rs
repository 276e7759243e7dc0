// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Frame geometry defaults
///
/// The frame source reports its own dimensions during initialization;
/// these are the values used before a source has been queried and by the
/// synthetic source.
pub mod frame {
    /// Default frame width in pixels
    pub const DEFAULT_WIDTH: u32 = 640;

    /// Default frame height in pixels
    pub const DEFAULT_HEIGHT: u32 = 480;
}

/// Depth threshold defaults
pub mod depth {
    /// Default lower depth bound (exclusive)
    pub const DEFAULT_MIN_BOUND: u16 = 850;

    /// Default upper depth bound (exclusive)
    pub const DEFAULT_MAX_BOUND: u16 = 868;
}

/// User input constants
pub mod input {
    /// Maximum number of digits accepted in a depth bound field
    pub const BOUND_FIELD_MAX_DIGITS: usize = 4;
}

/// Timing constants
pub mod timing {
    use std::time::Duration;

    /// Input poll interval in the terminal viewer (~60Hz)
    pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(16);

    /// Interval between readiness checks in headless snapshot mode
    pub const SNAPSHOT_POLL_INTERVAL: Duration = Duration::from_millis(33);

    /// Ticks to wait for a first frame in headless snapshot mode
    pub const SNAPSHOT_MAX_TICKS: u32 = 300;

    /// Weight of the newest sample in the smoothed FPS estimate
    pub const FPS_SMOOTHING: f64 = 0.1;
}
