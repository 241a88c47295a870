//! Document utility queries.
//!
//! Standalone operations outside the view pipeline: page counting, bulk page
//! size queries and unpacking bundled assets into a readable cache location.
//! Unlike the view, these surface errors directly to the caller.

use crate::document::{self, PdfDocumentHandle};
use crate::error::{PdfError, PdfResult};
use crate::gate;
use crate::measure::PageSize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

fn open_source(source: &Path) -> PdfResult<File> {
    File::open(source).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            PdfError::NotFound(source.display().to_string())
        } else {
            PdfError::OpenFailed(source.display().to_string())
        }
    })
}

/// Number of pages in the document at `source`.
pub fn get_page_count(source: &Path) -> PdfResult<usize> {
    let file = open_source(source)?;
    gate::with_renderer(|pdfium| {
        let doc = PdfDocumentHandle::from_file(pdfium, file, source)?;
        Ok(doc.page_count())
    })
}

/// Displayed dimensions of every page, in PDF units, in page order.
pub fn get_page_sizes(source: &Path) -> PdfResult<Vec<PageSize>> {
    let file = open_source(source)?;
    gate::with_renderer(|pdfium| {
        let doc = PdfDocumentHandle::from_file(pdfium, file, source)?;
        let mut sizes = Vec::with_capacity(doc.page_count());
        for index in 0..doc.page_count() {
            let page = doc.page(index)?;
            let dims = document::page_dims(&page);
            sizes.push(PageSize {
                width: dims.width,
                height: dims.height,
            });
        }
        Ok(sizes)
    })
}

/// Copy a bundled asset into the cache directory so the rendering backend can
/// open it as a regular file. Returns the cached path.
///
/// Idempotent: an already-unpacked asset is returned as-is without touching
/// the bundle.
pub fn unpack_asset(asset_dir: &Path, cache_dir: &Path, name: &str) -> PdfResult<PathBuf> {
    let destination = cache_dir.join(name);
    if destination.exists() {
        return Ok(destination);
    }

    let asset = asset_dir.join(name);
    if !asset.exists() {
        return Err(PdfError::NotFound(asset.display().to_string()));
    }
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(&asset, &destination)?;
    debug!(asset = %asset.display(), cached = %destination.display(), "unpacked asset");
    Ok(destination)
}
