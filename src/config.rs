// SPDX-License-Identifier: GPL-3.0-only

//! Viewer configuration
//!
//! One shared settings struct: the threshold band and the highlight
//! color. Mutated only by the input entry points, read by every pipeline
//! stage each tick. Persisted as JSON in the user config directory.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::depth;
use crate::errors::BoundParseError;
use crate::render::surface::Rgba;

/// Depth range selecting highlighted pixels, exclusive on both ends
///
/// The bounds are stored exactly as entered: no ordering check is made
/// between them, so a band with `min_depth >= max_depth` is legal and
/// simply matches no sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdBand {
    /// Lower bound (exclusive)
    pub min_depth: u16,
    /// Upper bound (exclusive)
    pub max_depth: u16,
}

impl ThresholdBand {
    pub const fn new(min_depth: u16, max_depth: u16) -> Self {
        Self {
            min_depth,
            max_depth,
        }
    }

    /// Whether a sample lies strictly inside the band
    pub fn contains(&self, sample: u16) -> bool {
        sample > self.min_depth && sample < self.max_depth
    }
}

impl Default for ThresholdBand {
    fn default() -> Self {
        Self::new(depth::DEFAULT_MIN_BOUND, depth::DEFAULT_MAX_BOUND)
    }
}

/// Highlight paint color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HighlightColor {
    Red,
    #[default]
    Green,
    Blue,
}

impl HighlightColor {
    /// All palette entries for UI iteration
    pub const ALL: [HighlightColor; 3] = [
        HighlightColor::Red,
        HighlightColor::Green,
        HighlightColor::Blue,
    ];

    /// Display name for the status bar
    pub fn display_name(&self) -> &'static str {
        match self {
            HighlightColor::Red => "red",
            HighlightColor::Green => "green",
            HighlightColor::Blue => "blue",
        }
    }

    /// Opaque paint value for the overlay
    pub fn rgba(&self) -> Rgba {
        match self {
            HighlightColor::Red => Rgba::new(255, 0, 0, 255),
            HighlightColor::Green => Rgba::new(0, 255, 0, 255),
            HighlightColor::Blue => Rgba::new(0, 0, 255, 255),
        }
    }
}

/// Shared viewer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Current threshold band
    pub band: ThresholdBand,
    /// Current highlight color
    pub highlight_color: HighlightColor,
}

impl Config {
    /// Set the lower bound from entered text
    ///
    /// Rejects anything that is not an integer fitting in 16 bits and
    /// leaves the stored bound unchanged on rejection. The new value is
    /// not checked against the upper bound.
    pub fn set_min_bound(&mut self, text: &str) -> Result<u16, BoundParseError> {
        let value = parse_bound(text)?;
        self.band.min_depth = value;
        Ok(value)
    }

    /// Set the upper bound from entered text; symmetric to [`Self::set_min_bound`]
    pub fn set_max_bound(&mut self, text: &str) -> Result<u16, BoundParseError> {
        let value = parse_bound(text)?;
        self.band.max_depth = value;
        Ok(value)
    }

    pub fn set_highlight_color(&mut self, color: HighlightColor) {
        self.highlight_color = color;
    }

    /// Path of the persisted settings file, if a config dir exists
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("depthview").join("config.json"))
    }

    /// Load persisted settings, falling back to defaults on any failure
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded settings");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring malformed settings file");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist the current settings
    pub fn save(&self) -> io::Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&path, contents)?;
        debug!(path = %path.display(), "Saved settings");
        Ok(())
    }
}

fn parse_bound(text: &str) -> Result<u16, BoundParseError> {
    text.trim().parse::<u16>().map_err(|_| BoundParseError {
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_setters_accept_valid_text() {
        let mut config = Config::default();
        assert_eq!(config.set_min_bound("700"), Ok(700));
        assert_eq!(config.set_max_bound("1200"), Ok(1200));
        assert_eq!(config.band, ThresholdBand::new(700, 1200));
    }

    #[test]
    fn malformed_text_leaves_bound_unchanged() {
        let mut config = Config::default();
        let before = config.band;
        assert!(config.set_min_bound("12a4").is_err());
        assert!(config.set_max_bound("").is_err());
        assert!(config.set_max_bound("-3").is_err());
        assert!(config.set_max_bound("70000").is_err());
        assert_eq!(config.band, before);
    }

    #[test]
    fn inverted_band_is_stored_as_entered() {
        let mut config = Config::default();
        config.set_min_bound("900").unwrap();
        config.set_max_bound("850").unwrap();
        assert_eq!(config.band, ThresholdBand::new(900, 850));
        // nothing satisfies 900 < s < 850
        assert!(!config.band.contains(875));
        assert!(!config.band.contains(900));
        assert!(!config.band.contains(850));
    }
}
