//! Error types for PDF rendering operations
//!
//! Provides unified error handling for document access, rasterization and
//! annotation parsing. View-bound failures are converted to events at the
//! view layer; utility queries surface these errors directly.

use thiserror::Error;

/// Errors that can occur while opening, measuring or rendering a document
#[derive(Error, Debug)]
pub enum PdfError {
    /// Source file (or named asset) does not exist
    #[error("File '{0}' not found.")]
    NotFound(String),

    /// Document exists but failed to parse/open
    #[error("Failed to open '{0}' for reading.")]
    OpenFailed(String),

    /// Document opened but the requested page is invalid or unreadable
    #[error("Failed to open page '{page}' of '{path}' for reading.")]
    PageOpenFailed { path: String, page: usize },

    /// Target raster allocation failed
    #[error("Insufficient memory to render '{path}' at {width}x{height}.")]
    OutOfMemory {
        path: String,
        width: u32,
        height: u32,
    },

    /// Annotation payload could not be parsed
    #[error("Failed to load annotation from '{path}'. {detail}")]
    AnnotationParse { path: String, detail: String },

    /// Unrecognized resize-mode value at the configuration boundary
    #[error("Unknown resizeMode '{0}'.")]
    InvalidResizeMode(String),

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error message
    #[error("{0}")]
    Other(String),
}

/// Result type alias for PDF operations
pub type PdfResult<T> = Result<T, PdfError>;

impl From<String> for PdfError {
    fn from(s: String) -> Self {
        PdfError::Other(s)
    }
}

impl From<&str> for PdfError {
    fn from(s: &str) -> Self {
        PdfError::Other(s.to_string())
    }
}
