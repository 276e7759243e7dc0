// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for depth frame conversion

use depthview::ThresholdBand;
use depthview::errors::ConvertError;
use depthview::render::convert_frame;

#[test]
fn test_band_membership_is_strict_on_both_ends() {
    let band = ThresholdBand::new(850, 868);
    let samples: Vec<u16> = vec![849, 850, 851, 859, 867, 868, 869];
    let out = convert_frame(&samples, samples.len(), band).unwrap();

    for (i, &sample) in samples.iter().enumerate() {
        let expected = sample > 850 && sample < 868;
        assert_eq!(
            out.matched.contains(&i),
            expected,
            "sample {} at index {} misclassified",
            sample,
            i
        );
    }
    // boundary values themselves are excluded
    assert!(!out.matched.contains(&1));
    assert!(!out.matched.contains(&5));
}

#[test]
fn test_conversion_is_deterministic() {
    let band = ThresholdBand::new(500, 2000);
    let samples: Vec<u16> = (0..64).map(|i| 400 + i * 37).collect();

    let first = convert_frame(&samples, samples.len(), band).unwrap();
    let second = convert_frame(&samples, samples.len(), band).unwrap();

    assert_eq!(first.pixels, second.pixels);
    assert_eq!(first.matched, second.matched);
}

#[test]
fn test_two_pixel_scenario() {
    // width=2, height=1, samples=[860, 900], band=(850, 868)
    let band = ThresholdBand::new(850, 868);
    let out = convert_frame(&[860, 900], 2, band).unwrap();

    // 900 fails the upper bound
    assert_eq!(out.matched, vec![0]);

    // gray value is the low byte of the sample
    let p0 = out.pixels[0];
    assert_eq!((p0.r, p0.g, p0.b), (92, 92, 92)); // 860 & 0xFF
    let p1 = out.pixels[1];
    assert_eq!((p1.r, p1.g, p1.b), (132, 132, 132)); // 900 & 0xFF
    assert_eq!(p0.a, p1.a, "alpha is one fixed constant");
}

#[test]
fn test_inverted_band_matches_nothing() {
    let band = ThresholdBand::new(900, 850);
    let samples: Vec<u16> = (0..1024).collect();
    let out = convert_frame(&samples, samples.len(), band).unwrap();
    assert!(out.matched.is_empty());
}

#[test]
fn test_length_mismatch_is_the_only_error() {
    let band = ThresholdBand::new(850, 868);
    assert!(matches!(
        convert_frame(&[1, 2, 3], 4, band),
        Err(ConvertError::LengthMismatch {
            expected: 4,
            actual: 3
        })
    ));
    assert!(matches!(
        convert_frame(&[1, 2, 3, 4, 5], 4, band),
        Err(ConvertError::LengthMismatch { .. })
    ));
    // extreme sample values are still a total function
    assert!(convert_frame(&[0, u16::MAX], 2, band).is_ok());
}
