//! Document and page access over the PDFium backend.
//!
//! A `PdfDocumentHandle` is created on demand per render/measure operation
//! and dropped at the end of it; document references are never cached across
//! calls. All constructors and accessors here assume the caller already holds
//! the render gate (see `gate::with_renderer`).

use crate::error::{PdfError, PdfResult};
use pdfium_render::prelude::*;
use std::fs::File;
use std::path::Path;

/// Page rotation angle as stored in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRotation {
    None,
    Degrees90,
    Degrees180,
    Degrees270,
}

impl PageRotation {
    /// True when displayed width and height swap relative to the raw
    /// crop-box dimensions (rotation mod 180 == 90).
    pub fn swaps_axes(self) -> bool {
        matches!(self, PageRotation::Degrees90 | PageRotation::Degrees270)
    }

    pub fn degrees(self) -> u32 {
        match self {
            PageRotation::None => 0,
            PageRotation::Degrees90 => 90,
            PageRotation::Degrees180 => 180,
            PageRotation::Degrees270 => 270,
        }
    }
}

/// Displayed page dimensions in PDF user-space units, plus rotation.
///
/// `width` and `height` are post-rotation: the size the page occupies on
/// screen, not the raw crop-box values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDims {
    pub width: f32,
    pub height: f32,
    pub rotation: PageRotation,
}

impl PageDims {
    /// Build displayed dimensions from raw crop-box values, applying the
    /// quarter-turn axis swap.
    pub fn from_crop_box(width: f32, height: f32, rotation: PageRotation) -> Self {
        if rotation.swaps_axes() {
            Self {
                width: height,
                height: width,
                rotation,
            }
        } else {
            Self {
                width,
                height,
                rotation,
            }
        }
    }
}

/// An open document scoped to a single render or measure operation.
pub struct PdfDocumentHandle<'a> {
    document: PdfDocument<'a>,
    path: String,
}

impl<'a> PdfDocumentHandle<'a> {
    /// Open a document from an already-opened file handle. The file handle is
    /// owned by the document from here on and released when the handle drops,
    /// including on any later failure path.
    pub fn from_file(pdfium: &'a Pdfium, file: File, path: &Path) -> PdfResult<Self> {
        let path_str = path.display().to_string();
        let document = pdfium
            .load_pdf_from_reader(file, None)
            .map_err(|_| PdfError::OpenFailed(path_str.clone()))?;
        Ok(Self {
            document,
            path: path_str,
        })
    }

    pub fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    /// Open a page by 0-based index. Out-of-range or unreadable pages fail
    /// with `PageOpenFailed`.
    pub fn page(&self, index: usize) -> PdfResult<PdfPage<'_>> {
        if index > u16::MAX as usize {
            return Err(PdfError::PageOpenFailed {
                path: self.path.clone(),
                page: index,
            });
        }
        self.document
            .pages()
            .get(index as u16)
            .map_err(|_| PdfError::PageOpenFailed {
                path: self.path.clone(),
                page: index,
            })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Read displayed dimensions and rotation for a page.
///
/// The backend reports page width/height with the /Rotate entry already
/// applied, so the values pass through without an axis swap (the swap in
/// `PageDims::from_crop_box` is only for raw crop-box reads).
///
/// Rotation read failures are treated as unrotated rather than failing the
/// whole render.
pub fn page_dims(page: &PdfPage<'_>) -> PageDims {
    let rotation = match page.rotation() {
        Ok(PdfPageRenderRotation::Degrees90) => PageRotation::Degrees90,
        Ok(PdfPageRenderRotation::Degrees180) => PageRotation::Degrees180,
        Ok(PdfPageRenderRotation::Degrees270) => PageRotation::Degrees270,
        _ => PageRotation::None,
    };
    PageDims {
        width: page.width().value,
        height: page.height().value,
        rotation,
    }
}
