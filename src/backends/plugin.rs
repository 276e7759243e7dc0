// SPDX-License-Identifier: GPL-3.0-only

#![cfg(feature = "native-plugin")]

//! Native capture plugin backend
//!
//! Binds the vendor capture plugin (Kinect2Unity ABI), which owns device
//! initialization, its grabber/processor threads, and frame buffer
//! allocation. This side only sequences the setup calls, polls
//! readiness, and takes scoped ownership of pulled buffers.
//!
//! Plugin calls return 1 for success. A pulled buffer holds one
//! little-endian `u16` sample per pixel and must be handed back to
//! `FreeAllocatedMemory` exactly once.

use libc::c_int;
use std::ffi::c_void;

use tracing::{info, warn};

use crate::backends::{FrameDimensions, FrameGuard, FrameRelease, FrameSource, RawFrame};
use crate::errors::{CaptureError, CaptureResult};

mod ffi {
    #![allow(non_snake_case)]

    use super::{c_int, c_void};

    #[link(name = "Kinect2Unity")]
    unsafe extern "C" {
        pub fn GetWidth() -> c_int;
        pub fn GetHeight() -> c_int;
        pub fn InitializePlugin() -> c_int;
        pub fn AllocateMemory() -> c_int;
        pub fn InitializeDevice() -> c_int;
        pub fn StartThreads() -> c_int;
        pub fn IsFrameReady() -> c_int;
        pub fn GetReadyFrameByteArray() -> *mut c_void;
        pub fn FreeAllocatedMemory(ptr: *mut c_void) -> c_int;
        pub fn ShutdownDevice() -> c_int;
    }
}

/// Frame source backed by the native capture plugin
pub struct PluginFrameSource {
    dims: Option<FrameDimensions>,
}

impl PluginFrameSource {
    pub fn new() -> Self {
        Self { dims: None }
    }
}

impl Default for PluginFrameSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRelease for PluginFrameSource {
    fn release(&mut self, frame: RawFrame) {
        let ptr = frame.as_ptr() as *mut c_void;
        if unsafe { ffi::FreeAllocatedMemory(ptr) } != 1 {
            warn!(ptr = ?ptr, "Plugin failed to free frame buffer");
        }
    }
}

impl FrameSource for PluginFrameSource {
    fn initialize(&mut self) -> CaptureResult<FrameDimensions> {
        let width = unsafe { ffi::GetWidth() };
        let height = unsafe { ffi::GetHeight() };
        if width <= 0 || height <= 0 {
            return Err(CaptureError::InitializationFailed {
                step: "frame dimensions",
            });
        }
        let dims = FrameDimensions {
            width: width as u32,
            height: height as u32,
        };
        info!(dims = %dims, "Plugin frame dimensions");

        // Setup runs as an ordered sequence; the first failing step
        // aborts the whole thing.
        let steps: [(&'static str, unsafe extern "C" fn() -> c_int); 4] = [
            ("plugin", ffi::InitializePlugin),
            ("memory", ffi::AllocateMemory),
            ("device", ffi::InitializeDevice),
            ("capture threads", ffi::StartThreads),
        ];
        for (step, call) in steps {
            if unsafe { call() } != 1 {
                return Err(CaptureError::InitializationFailed { step });
            }
            info!(step, "Plugin setup step complete");
        }

        self.dims = Some(dims);
        Ok(dims)
    }

    fn frame_ready(&mut self) -> bool {
        unsafe { ffi::IsFrameReady() == 1 }
    }

    fn pull_frame(&mut self) -> CaptureResult<FrameGuard<'_>> {
        let dims = self
            .dims
            .ok_or_else(|| CaptureError::PullFailed("source not initialized".to_string()))?;

        let ptr = unsafe { ffi::GetReadyFrameByteArray() };
        if ptr.is_null() {
            return Err(CaptureError::NoFrameAvailable);
        }

        // The plugin allocates the buffer as 16-bit samples, so the
        // pointer is u16-aligned; it stays valid until FreeAllocatedMemory.
        let frame = unsafe { RawFrame::new(ptr as *const u16, dims.pixel_count()) };
        Ok(FrameGuard::new(self, frame))
    }

    fn shutdown(&mut self) {
        if unsafe { ffi::ShutdownDevice() } == 1 {
            info!("Plugin device shut down");
        } else {
            warn!("Plugin device shutdown reported failure");
        }
    }
}
