//! Unit tests for transform planning.

use pdflight::transform::{BackendCaps, ResizeMode, plan_transform};

const RELIABLE: BackendCaps = BackendCaps {
    reliable_explicit_transform: true,
};

#[test]
fn test_contain_never_crops() {
    // Tall page in a wide raster: content height equals raster height and
    // width is letterboxed.
    let t = plan_transform(300.0, 900.0, 1200.0, 600.0, ResizeMode::Contain, RELIABLE)
        .expect("transform");
    let (x, y, w, h) = t.content_rect(300.0, 900.0);
    assert_eq!((w, h), (200, 600));
    assert_eq!(y, 0);
    assert_eq!(x, 500);
}

#[test]
fn test_fit_width_crops_tall_page() {
    // Tall page in a short raster: width fills, height overflows the raster.
    let t = plan_transform(300.0, 900.0, 300.0, 100.0, ResizeMode::FitWidth, RELIABLE)
        .expect("transform");
    let (x, y, w, h) = t.content_rect(300.0, 900.0);
    assert_eq!((x, y), (0, 0));
    assert_eq!((w, h), (300, 900));
}

#[test]
fn test_content_rect_rounds_to_pixels() {
    let t = plan_transform(612.0, 792.0, 1000.0, 1000.0, ResizeMode::Contain, RELIABLE)
        .expect("transform");
    let (x, _, w, h) = t.content_rect(612.0, 792.0);
    // 612/792 aspect at height 1000 gives a fractional width, rounded.
    assert_eq!(h, 1000);
    assert_eq!(w, 773);
    assert_eq!(x, 114);
}

#[test]
fn test_default_caps_use_explicit_transforms() {
    let caps = BackendCaps::detect();
    assert!(caps.reliable_explicit_transform);
    // With reliable transforms, even an aspect-matched raster gets a plan.
    assert!(plan_transform(300.0, 400.0, 300.0, 400.0, ResizeMode::Contain, caps).is_some());
}

#[test]
fn test_resize_mode_round_trip() {
    for mode in [ResizeMode::Contain, ResizeMode::FitWidth] {
        assert_eq!(mode.as_str().parse::<ResizeMode>().unwrap(), mode);
    }
}
