// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the highlight overlay

use depthview::FrameDimensions;
use depthview::render::overlay::OverlayCanvas;
use depthview::render::surface::Rgba;

fn dims(w: u32, h: u32) -> FrameDimensions {
    FrameDimensions {
        width: w,
        height: h,
    }
}

#[test]
fn test_new_canvas_is_fully_transparent() {
    let overlay = OverlayCanvas::new(dims(8, 4));
    assert_eq!(overlay.pixels().len(), 32);
    assert!(overlay.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
}

#[test]
fn test_paint_modifies_exactly_the_given_indices() {
    let mut overlay = OverlayCanvas::new(dims(4, 2));
    let green = Rgba::new(0, 255, 0, 255);
    overlay.paint(&[0, 3, 7], green);

    for i in 0..8 {
        let expected = if [0, 3, 7].contains(&i) {
            green
        } else {
            Rgba::TRANSPARENT
        };
        assert_eq!(overlay.pixel(i), expected, "pixel {} wrong", i);
    }
}

#[test]
fn test_highlights_persist_until_cleared() {
    // No implicit clear between frames: pixels painted on an earlier
    // tick keep their value unless the new matched set lands on them.
    let mut overlay = OverlayCanvas::new(dims(4, 1));
    let red = Rgba::new(255, 0, 0, 255);
    let blue = Rgba::new(0, 0, 255, 255);

    overlay.paint(&[0, 1], red);
    overlay.paint(&[1, 2], blue);

    assert_eq!(overlay.pixel(0), red, "stale highlight must persist");
    assert_eq!(overlay.pixel(1), blue, "overlapping cell is overwritten");
    assert_eq!(overlay.pixel(2), blue);
    assert_eq!(overlay.pixel(3), Rgba::TRANSPARENT);
}

#[test]
fn test_clear_resets_every_pixel() {
    let mut overlay = OverlayCanvas::new(dims(4, 4));
    overlay.paint(&(0..16).collect::<Vec<_>>(), Rgba::new(255, 0, 0, 255));
    overlay.clear();
    assert!(overlay.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
}

#[test]
fn test_empty_index_set_changes_nothing() {
    let mut overlay = OverlayCanvas::new(dims(2, 2));
    let red = Rgba::new(255, 0, 0, 255);
    overlay.paint(&[2], red);
    let before: Vec<_> = overlay.pixels().to_vec();
    overlay.paint(&[], Rgba::new(0, 0, 255, 255));
    assert_eq!(overlay.pixels(), &before[..]);
}
