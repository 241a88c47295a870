//! Unit tests for the render gate.

use pdflight::gate::render_gate;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

#[test]
fn test_gate_bodies_never_overlap() {
    let inside = Arc::new(AtomicBool::new(false));
    let overlaps = Arc::new(AtomicUsize::new(0));
    let entries = Arc::new(AtomicUsize::new(0));

    let threads: Vec<_> = (0..4)
        .map(|_| {
            let inside = Arc::clone(&inside);
            let overlaps = Arc::clone(&overlaps);
            let entries = Arc::clone(&entries);
            std::thread::spawn(move || {
                for _ in 0..10 {
                    render_gate().with_exclusive_access(|| {
                        if inside.swap(true, Ordering::SeqCst) {
                            overlaps.fetch_add(1, Ordering::SeqCst);
                        }
                        entries.fetch_add(1, Ordering::SeqCst);
                        std::thread::sleep(Duration::from_micros(50));
                        inside.store(false, Ordering::SeqCst);
                    });
                }
            })
        })
        .collect();
    for thread in threads {
        thread.join().unwrap();
    }

    assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    assert_eq!(entries.load(Ordering::SeqCst), 40);
}

#[test]
fn test_gate_returns_closure_value() {
    let value = render_gate().with_exclusive_access(|| 7 * 6);
    assert_eq!(value, 42);
}

#[test]
fn test_gate_is_process_wide() {
    let a = render_gate() as *const _;
    let b = render_gate() as *const _;
    assert_eq!(a, b);
}
