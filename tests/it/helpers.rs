//! Test helpers and fixtures.

use pdflight::{PdfPageView, PdfViewEvent};
use std::time::{Duration, Instant};

/// Annotation payload with one stroke and one label on the first page.
pub fn sample_annotation_json() -> String {
    r##"[
        {
            "strokes": [
                {"color": "#ff0000", "width": 2.0, "path": [[0.1, 0.1], [0.9, 0.9]]}
            ],
            "text": [
                {"color": "#000000", "fontSize": 4.0, "point": [0.1, 0.05], "str": "note"}
            ]
        }
    ]"##
    .to_string()
}

/// Pump a view's background work until at least one event arrives or the
/// timeout elapses. Returns every event collected.
pub fn pump_events(view: &mut PdfPageView, timeout: Duration) -> Vec<PdfViewEvent> {
    let start = Instant::now();
    let mut events = Vec::new();
    while start.elapsed() < timeout {
        view.process_results();
        events.extend(view.take_events());
        if !events.is_empty() && !view.has_pending_render() {
            return events;
        }
        std::thread::yield_now();
    }
    view.process_results();
    events.extend(view.take_events());
    events
}
