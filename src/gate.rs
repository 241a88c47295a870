//! Process-wide serialization of PDFium access.
//!
//! PDFium is not safe for concurrent use, even across unrelated documents.
//! Every document open, page open and rasterize call in the process must run
//! while the render gate is held. The gate is a single shared instance
//! regardless of how many views or documents exist.

use crate::error::{PdfError, PdfResult};
use crate::pdfium_loader::PdfiumLoader;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use pdfium_render::prelude::*;

static RENDER_GATE: Lazy<RenderGate> = Lazy::new(RenderGate::new);

/// Mutual-exclusion wrapper around the non-reentrant rendering capability.
pub struct RenderGate {
    inner: Mutex<()>,
}

impl RenderGate {
    fn new() -> Self {
        Self {
            inner: Mutex::new(()),
        }
    }

    /// Run `f` while holding the gate. `f` never runs concurrently with
    /// another `with_exclusive_access` body anywhere in the process.
    pub fn with_exclusive_access<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.inner.lock();
        f()
    }
}

/// The process-wide render gate.
pub fn render_gate() -> &'static RenderGate {
    &RENDER_GATE
}

/// Bind the PDFium library and run `f` with exclusive access to it.
///
/// The binding is re-resolved per call; the dynamic library itself stays
/// loaded, so this is a cheap lookup. Keeping the `Pdfium` handle scoped to
/// the gate ensures no rendering-capability call can escape serialization.
pub fn with_renderer<R>(f: impl FnOnce(&Pdfium) -> PdfResult<R>) -> PdfResult<R> {
    render_gate().with_exclusive_access(|| {
        let pdfium = PdfiumLoader::load().map_err(PdfError::Other)?;
        f(&pdfium)
    })
}
