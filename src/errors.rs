// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the depth viewer

use std::fmt;

/// Result type alias for frame source operations
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Errors from the frame source boundary
#[derive(Debug, Clone)]
pub enum CaptureError {
    /// A device/memory/thread setup step failed; the whole init sequence aborts
    InitializationFailed { step: &'static str },
    /// Pulling a ready frame from the source failed
    PullFailed(String),
    /// The source reported ready but produced no frame
    NoFrameAvailable,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::InitializationFailed { step } => {
                write!(f, "initialization failed at step: {}", step)
            }
            CaptureError::PullFailed(msg) => write!(f, "frame pull failed: {}", msg),
            CaptureError::NoFrameAvailable => write!(f, "no frame available"),
        }
    }
}

impl std::error::Error for CaptureError {}

/// Errors from depth frame conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// Sample count does not match the frame's pixel count
    LengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "depth frame has {} samples, expected {}",
                    actual, expected
                )
            }
        }
    }
}

impl std::error::Error for ConvertError {}

/// A depth bound entered as text could not be parsed
///
/// The stored bound is left unchanged when this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundParseError {
    /// The rejected input text
    pub text: String,
}

impl fmt::Display for BoundParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a depth value (expected an integer 0-65535)",
            self.text
        )
    }
}

impl std::error::Error for BoundParseError {}

/// Any failure during one tick's pull/convert/paint sequence
///
/// Contained to the tick that produced it; the next tick retries
/// independently.
#[derive(Debug, Clone)]
pub enum TickError {
    /// Frame source failure
    Capture(CaptureError),
    /// Conversion failure
    Convert(ConvertError),
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickError::Capture(e) => write!(f, "capture error: {}", e),
            TickError::Convert(e) => write!(f, "convert error: {}", e),
        }
    }
}

impl std::error::Error for TickError {}

impl From<CaptureError> for TickError {
    fn from(e: CaptureError) -> Self {
        TickError::Capture(e)
    }
}

impl From<ConvertError> for TickError {
    fn from(e: ConvertError) -> Self {
        TickError::Convert(e)
    }
}
