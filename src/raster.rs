//! Page rasterization.
//!
//! Produces a complete page buffer for display: a white opaque raster of the
//! requested dimensions with the PDF page fitted into it per the resize mode,
//! then any annotations composited on top. Every backend resource opened here
//! is scoped to this call and released on all exit paths.

use crate::annotation::{self, AnnotationPage};
use crate::document::{self, PdfDocumentHandle};
use crate::error::{PdfError, PdfResult};
use crate::gate;
use crate::transform::{self, BackendCaps, ResizeMode};
use image::{DynamicImage, RgbaImage, imageops};
use pdfium_render::prelude::*;
use std::fs::File;
use std::path::PathBuf;
use tracing::debug;

/// Everything needed to render one page, captured before the work moves off
/// the caller's thread.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub source: PathBuf,
    pub page: usize,
    pub width: u32,
    pub height: u32,
    pub resize_mode: ResizeMode,
    pub annotations: Vec<AnnotationPage>,
    pub caps: BackendCaps,
}

/// A finished render plus the page's intrinsic displayed size in PDF units.
#[derive(Debug)]
pub struct RenderedPage {
    pub buffer: RgbaImage,
    pub page_width: f32,
    pub page_height: f32,
}

/// Render the requested page into a fresh buffer.
pub fn render_page(request: &RenderRequest) -> PdfResult<RenderedPage> {
    let source_str = request.source.display().to_string();
    let file = File::open(&request.source).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            PdfError::NotFound(source_str.clone())
        } else {
            PdfError::OpenFailed(source_str.clone())
        }
    })?;

    let (mut buffer, page_width, page_height) = gate::with_renderer(|pdfium| {
        let doc = PdfDocumentHandle::from_file(pdfium, file, &request.source)?;
        let pdf_page = doc.page(request.page)?;
        let dims = document::page_dims(&pdf_page);
        let (page_width, page_height) = (dims.width, dims.height);

        let mut buffer = allocate_white(&source_str, request.width, request.height)?;

        let plan = transform::plan_transform(
            page_width,
            page_height,
            request.width as f32,
            request.height as f32,
            request.resize_mode,
            request.caps,
        );
        let (x, y, content_width) = match plan {
            Some(plan) => {
                let (x, y, content_width, _) = plan.content_rect(page_width, page_height);
                (x, y, content_width)
            }
            // Identity render: the backend fits the page to the full raster.
            None => (0, 0, request.width),
        };

        debug!(
            source = %source_str,
            page = request.page,
            content_width,
            x,
            y,
            "rasterizing page"
        );
        let config = PdfRenderConfig::new()
            .set_target_width(content_width as Pixels)
            .set_clear_color(PdfColor::WHITE);
        let bitmap = pdf_page
            .render_with_config(&config)
            .map_err(|_| PdfError::PageOpenFailed {
                path: source_str.clone(),
                page: request.page,
            })?;
        let content: DynamicImage = bitmap.as_image();
        imageops::overlay(&mut buffer, &content.into_rgba8(), x, y);

        Ok((buffer, page_width, page_height))
    })?;

    if let Some(page_annotations) = request.annotations.get(request.page) {
        annotation::composite_page(&mut buffer, page_annotations);
    }

    Ok(RenderedPage {
        buffer,
        page_width,
        page_height,
    })
}

/// Allocate an opaque white RGBA buffer, reporting allocation failure instead
/// of aborting.
fn allocate_white(source: &str, width: u32, height: u32) -> PdfResult<RgbaImage> {
    let out_of_memory = || PdfError::OutOfMemory {
        path: source.to_string(),
        width,
        height,
    };
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(4))
        .ok_or_else(out_of_memory)?;
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|_| out_of_memory())?;
    data.resize(len, 0xff);
    RgbaImage::from_raw(width, height, data).ok_or_else(out_of_memory)
}
