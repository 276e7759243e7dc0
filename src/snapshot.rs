// SPDX-License-Identifier: GPL-3.0-only

//! Composite snapshots
//!
//! Flattens the highlight overlay onto the grayscale view and saves the
//! result as a timestamped PNG.

use std::path::PathBuf;

use tracing::info;

use crate::driver::ViewSurfaces;
use crate::render::surface::Rgba;

/// Flatten overlay over base: a painted overlay pixel wins, everything
/// else shows the grayscale view
pub fn composite(surfaces: &ViewSurfaces) -> Vec<Rgba> {
    surfaces
        .base()
        .pixels()
        .iter()
        .zip(surfaces.overlay().pixels())
        .map(|(&base, &over)| if over.is_transparent() { base } else { over })
        .collect()
}

/// Save the current composite as a PNG
///
/// Without an explicit output path, writes `IMG_<timestamp>.png` under
/// the user pictures directory.
pub fn save_composite(
    surfaces: &ViewSurfaces,
    output: Option<PathBuf>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dims = surfaces.dims();
    let pixels = composite(surfaces);
    let bytes: &[u8] = bytemuck::cast_slice(&pixels);

    let img: image::RgbaImage =
        image::ImageBuffer::from_raw(dims.width, dims.height, bytes.to_vec())
            .ok_or("failed to assemble snapshot image")?;

    let filepath = match output {
        Some(path) => path,
        None => {
            let dir = snapshot_directory();
            std::fs::create_dir_all(&dir)?;
            let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            dir.join(format!("IMG_{}.png", timestamp))
        }
    };

    img.save(&filepath)?;
    info!(path = %filepath.display(), "Snapshot saved");

    Ok(filepath)
}

fn snapshot_directory() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("depthview")
}
