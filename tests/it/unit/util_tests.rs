//! Unit tests for utility queries.

use pdflight::{PdfError, get_page_count, get_page_sizes, unpack_asset};
use std::path::Path;

#[test]
fn test_missing_document_error_messages() {
    let err = get_page_count(Path::new("/nonexistent/report.pdf")).unwrap_err();
    assert_eq!(err.to_string(), "File '/nonexistent/report.pdf' not found.");

    let err = get_page_sizes(Path::new("/nonexistent/report.pdf")).unwrap_err();
    assert_eq!(err.to_string(), "File '/nonexistent/report.pdf' not found.");
}

#[test]
fn test_unreadable_document_reports_open_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.pdf");
    std::fs::write(&path, b"not a pdf").unwrap();

    // Fails at the backend: either the rendering library is unavailable or
    // the document does not parse. Never a NotFound.
    let err = get_page_count(&path).unwrap_err();
    assert!(!matches!(err, PdfError::NotFound(_)));
}

#[test]
fn test_unpack_asset_is_idempotent() {
    let assets = tempfile::tempdir().unwrap();
    let cache = tempfile::tempdir().unwrap();
    std::fs::write(assets.path().join("guide.pdf"), b"payload").unwrap();

    let first = unpack_asset(assets.path(), cache.path(), "guide.pdf").unwrap();
    let second = unpack_asset(assets.path(), cache.path(), "guide.pdf").unwrap();
    assert_eq!(first, second);
    assert_eq!(std::fs::read(&first).unwrap(), b"payload");
}

#[test]
fn test_unpack_asset_missing_reports_asset_path() {
    let assets = tempfile::tempdir().unwrap();
    let cache = tempfile::tempdir().unwrap();

    let err = unpack_asset(assets.path(), cache.path(), "gone.pdf").unwrap_err();
    let expected = format!("File '{}' not found.", assets.path().join("gone.pdf").display());
    assert_eq!(err.to_string(), expected);
}
