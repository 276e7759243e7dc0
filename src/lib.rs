// SPDX-License-Identifier: GPL-3.0-only

//! depthview - a terminal depth camera viewer
//!
//! Polls a depth frame source, converts each 16-bit frame to a grayscale
//! view, and paints a persistent highlight overlay at the pixels whose
//! depth falls inside a user-adjustable band.
//!
//! # Architecture
//!
//! - [`backends`]: frame source abstraction (native plugin, synthetic)
//! - [`render`]: pixel surfaces, depth conversion, highlight overlay
//! - [`driver`]: the per-tick poll/pull/convert/present orchestration
//! - [`terminal`]: ratatui viewer and key input
//! - [`config`]: threshold band and highlight color settings
//! - [`snapshot`]: composite PNG export

pub mod backends;
pub mod config;
pub mod constants;
pub mod driver;
pub mod errors;
pub mod render;
pub mod snapshot;
pub mod terminal;

// Re-export commonly used types
pub use backends::{FrameDimensions, FrameSource};
pub use config::{Config, HighlightColor, ThresholdBand};
pub use driver::{PollDriver, TickOutcome};
