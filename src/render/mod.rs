// SPDX-License-Identifier: GPL-3.0-only

//! Pixel conversion and surfaces

pub mod convert;
pub mod overlay;
pub mod surface;

pub use convert::{ConvertedFrame, convert_frame};
pub use overlay::OverlayCanvas;
pub use surface::{PixelBuffer, Rgba};
