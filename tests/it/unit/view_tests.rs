//! Unit tests for the page view property surface and event queue.

use crate::helpers::{pump_events, sample_annotation_json};
use pdflight::{PdfPageView, PdfViewEvent};
use std::time::Duration;

#[test]
fn test_missing_source_surfaces_error_event() {
    let mut view = PdfPageView::new();
    view.set_source("/nonexistent/report.pdf");
    view.set_layout(200, 200);
    view.render();

    let events = pump_events(&mut view, Duration::from_secs(2));
    assert_eq!(
        events,
        vec![PdfViewEvent::Error {
            message: "File '/nonexistent/report.pdf' not found.".to_string()
        }]
    );
    assert!(view.bands().is_empty());
}

#[test]
fn test_annotation_file_property() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    std::fs::write(&path, sample_annotation_json()).unwrap();

    let mut view = PdfPageView::new();
    view.set_annotation(&path.display().to_string(), true);
    assert!(view.take_events().is_empty());
}

#[test]
fn test_annotation_file_missing_surfaces_error() {
    let mut view = PdfPageView::new();
    view.set_annotation("/nonexistent/notes.json", true);
    let events = view.take_events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        PdfViewEvent::Error { message } => {
            assert!(message.starts_with("Failed to load annotation from '/nonexistent/notes.json'."));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn test_invalid_resize_mode_keeps_rendering_disabled() {
    let mut view = PdfPageView::new();
    view.set_resize_mode("stretch");
    let events = view.take_events();
    assert_eq!(
        events,
        vec![PdfViewEvent::Error {
            message: "Unknown resizeMode 'stretch'.".to_string()
        }]
    );
    // The rejected mode alone does not schedule work.
    view.render();
    assert!(!view.has_pending_render());
}

#[test]
fn test_identical_source_does_not_rerender() {
    let mut view = PdfPageView::new();
    view.set_source("/nonexistent/report.pdf");
    view.set_layout(100, 100);
    view.render();
    let events = pump_events(&mut view, Duration::from_secs(2));
    assert_eq!(events.len(), 1);

    // Re-assigning unchanged properties schedules no new work.
    view.set_source("/nonexistent/report.pdf");
    view.set_page(0);
    view.render();
    assert!(!view.has_pending_render());

    // An actual change does.
    view.set_page(1);
    view.render();
    assert!(view.has_pending_render());
    let _ = pump_events(&mut view, Duration::from_secs(2));
}

#[test]
fn test_render_noop_without_layout() {
    let mut view = PdfPageView::new();
    view.set_source("/nonexistent/report.pdf");
    view.render();
    assert!(!view.has_pending_render());
}

#[test]
fn test_events_drain_once() {
    let mut view = PdfPageView::new();
    view.set_resize_mode("bogus");
    assert_eq!(view.take_events().len(), 1);
    assert!(view.take_events().is_empty());
}
