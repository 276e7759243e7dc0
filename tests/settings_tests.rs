// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for viewer settings

use depthview::{Config, HighlightColor, ThresholdBand};

#[test]
fn test_default_band_and_color() {
    let config = Config::default();
    assert_eq!(config.band, ThresholdBand::new(850, 868));
    assert_eq!(config.highlight_color, HighlightColor::Green);
}

#[test]
fn test_malformed_bound_text_is_rejected_without_state_change() {
    let mut config = Config::default();
    let before = config.band;

    for text in ["12a4", "", " ", "-1", "4.5", "70000", "0x10"] {
        assert!(
            config.set_min_bound(text).is_err(),
            "'{}' should be rejected",
            text
        );
        assert_eq!(config.band, before, "'{}' must not change the band", text);
    }
}

#[test]
fn test_bounds_accept_full_u16_range() {
    let mut config = Config::default();
    assert_eq!(config.set_min_bound("0"), Ok(0));
    assert_eq!(config.set_max_bound("65535"), Ok(65535));
    assert_eq!(config.set_max_bound(" 868 "), Ok(868));
}

#[test]
fn test_no_ordering_check_between_bounds() {
    let mut config = Config::default();
    config.set_min_bound("900").unwrap();
    config.set_max_bound("850").unwrap();
    // inverted band is stored as entered, never corrected
    assert_eq!(config.band, ThresholdBand::new(900, 850));
    assert!(!config.band.contains(875));
}

#[test]
fn test_palette_colors_are_opaque_and_distinct() {
    for color in HighlightColor::ALL {
        let rgba = color.rgba();
        assert_eq!(rgba.a, 255, "{} must paint opaque", color.display_name());
        assert!(!color.display_name().is_empty());
    }
    assert_ne!(HighlightColor::Red.rgba(), HighlightColor::Green.rgba());
    assert_ne!(HighlightColor::Green.rgba(), HighlightColor::Blue.rgba());
}

#[test]
fn test_settings_survive_a_serde_round_trip() {
    let mut config = Config::default();
    config.set_min_bound("500").unwrap();
    config.set_highlight_color(HighlightColor::Blue);

    let json = serde_json::to_string(&config).unwrap();
    let restored: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}
