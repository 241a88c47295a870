//! PDF page rendering and annotation compositing.
//!
//! The pipeline turns a document path plus display properties into horizontal
//! display bands: open the document, plan the page-to-raster transform,
//! rasterize through the serialized backend, composite freehand strokes and
//! text labels on top, then slice the result for publishing. `PdfPageView`
//! drives the whole pipeline for a hosted view; the `util` queries and
//! `PageMeasurer` are usable on their own.

pub mod annotation;
pub mod constants;
pub mod document;
pub mod error;
pub mod executor;
pub mod gate;
pub mod logging;
pub mod measure;
pub mod pdfium_loader;
pub mod raster;
pub mod transform;
pub mod util;
pub mod view;

pub use annotation::{AnnotationPage, PositionedText, Stroke};
pub use error::{PdfError, PdfResult};
pub use measure::{LayoutConstraints, PageMeasurer, PageSize};
pub use raster::{RenderRequest, RenderedPage};
pub use transform::{BackendCaps, PageTransform, ResizeMode};
pub use util::{get_page_count, get_page_sizes, unpack_asset};
pub use view::{PdfPageView, PdfViewEvent};
