//! Unit tests for page measurement and layout.

use pdflight::measure::{LayoutConstraints, PageMeasurer, PageSize, layout_box};

#[test]
fn test_layout_matches_page_aspect() {
    let size = PageSize {
        width: 612.0,
        height: 792.0,
    };
    let (w, h) = layout_box(size, LayoutConstraints::from_raw(306.0, 0.0));
    assert_eq!((w, h), (306.0, 396.0));
}

#[test]
fn test_layout_contains_within_both_constraints() {
    let size = PageSize {
        width: 612.0,
        height: 792.0,
    };
    let (w, h) = layout_box(size, LayoutConstraints::from_raw(1000.0, 396.0));
    assert!(w <= 1000.0 && h <= 396.0);
    assert_eq!((w, h), (306.0, 396.0));
}

#[test]
fn test_measurer_ignores_repeated_properties() {
    let mut measurer = PageMeasurer::new();
    measurer.set_source("/nonexistent/doc.pdf");
    measurer.set_page(3);
    assert!(!measurer.take_dirty());

    // Repeats are no-ops even when measurement previously failed.
    measurer.set_source("/nonexistent/doc.pdf");
    measurer.set_page(3);
    assert!(!measurer.take_dirty());
    assert_eq!(measurer.page_size(), PageSize::PLACEHOLDER);
}

#[test]
fn test_measurer_empty_source_never_measures() {
    let mut measurer = PageMeasurer::new();
    measurer.set_page(5);
    assert!(!measurer.take_dirty());
    assert_eq!(measurer.page_size(), PageSize::PLACEHOLDER);
}

#[test]
fn test_unreadable_document_keeps_placeholder_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not-a-pdf.pdf");
    std::fs::write(&path, b"plain text").unwrap();

    let mut measurer = PageMeasurer::new();
    measurer.set_source(&path.display().to_string());
    assert!(!measurer.take_dirty());
    let (w, h) = measurer.measure(LayoutConstraints::from_raw(0.0, 0.0));
    assert_eq!((w, h), (1.0, 1.0));
}
