//! Page measurement for layout.
//!
//! Layout runs off the render path and must never surface document errors:
//! a page that cannot be measured keeps the previous (or placeholder) size
//! and the host lays out with whatever constraints it already has.
//! Successful measurements are cached process-wide so repeated layout passes
//! over the same document stay off disk.

use crate::constants::MEASURE_CACHE_CAPACITY;
use crate::document::{self, PdfDocumentHandle};
use crate::gate;
use lru::LruCache;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fs::File;
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::debug;

/// Displayed page size in PDF user-space units (post-rotation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// Placeholder before any successful measurement.
    pub const PLACEHOLDER: PageSize = PageSize {
        width: 1.0,
        height: 1.0,
    };

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

static SIZE_CACHE: Lazy<Mutex<LruCache<(usize, String), PageSize>>> = Lazy::new(|| {
    let capacity = NonZeroUsize::new(MEASURE_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
    Mutex::new(LruCache::new(capacity))
});

/// Measure the displayed size of `page` in the document at `source`, through
/// the process-wide cache.
///
/// Returns `None` on any failure; measurement is advisory and never reports
/// errors to the caller.
pub fn measure_page(page: usize, source: &Path) -> Option<PageSize> {
    let key = (page, source.display().to_string());
    if let Some(size) = SIZE_CACHE.lock().get(&key) {
        return Some(*size);
    }

    let size = measure_page_uncached(page, source)?;
    SIZE_CACHE.lock().put(key, size);
    Some(size)
}

fn measure_page_uncached(page: usize, source: &Path) -> Option<PageSize> {
    let file = match File::open(source) {
        Ok(file) => file,
        Err(err) => {
            debug!(source = %source.display(), %err, "measurement skipped: cannot open file");
            return None;
        }
    };

    let result = gate::with_renderer(|pdfium| {
        let doc = PdfDocumentHandle::from_file(pdfium, file, source)?;
        let pdf_page = doc.page(page)?;
        let dims = document::page_dims(&pdf_page);
        Ok(PageSize {
            width: dims.width,
            height: dims.height,
        })
    });

    match result {
        Ok(size) => Some(size),
        Err(err) => {
            debug!(source = %source.display(), page, %err, "measurement skipped");
            None
        }
    }
}

/// Drop every cached measurement. Used when the backing files may have
/// changed on disk.
pub fn clear_measure_cache() {
    SIZE_CACHE.lock().clear();
}

/// Layout constraint per axis. Values below one point are indistinguishable
/// from an unset constraint and treated as undefined.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutConstraints {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl LayoutConstraints {
    pub fn from_raw(width: f32, height: f32) -> Self {
        Self {
            width: (width >= 1.0).then_some(width),
            height: (height >= 1.0).then_some(height),
        }
    }
}

/// Resolve the layout box for a page of the given size under the host's
/// constraints.
///
/// Unconstrained on both axes: the page's own size. One axis constrained:
/// the other follows the page aspect ratio. Both constrained: fill the
/// height unless the aspect-matched width would overflow, then fill the
/// width instead.
pub fn layout_box(size: PageSize, constraints: LayoutConstraints) -> (f32, f32) {
    let aspect_ratio = size.aspect_ratio();
    let (Some(width), Some(height)) = (constraints.width, constraints.height) else {
        return match (constraints.width, constraints.height) {
            (Some(width), None) => (width, width / aspect_ratio),
            (None, Some(height)) => (height * aspect_ratio, height),
            _ => (size.width, size.height),
        };
    };

    let target_width = height * aspect_ratio;
    if target_width <= width {
        (target_width, height)
    } else {
        (width, width / aspect_ratio)
    }
}

/// Stateful measurement node for one hosted page view.
///
/// Property setters ignore no-op updates so layout is only invalidated when
/// the measured size actually changes.
pub struct PageMeasurer {
    page: usize,
    source: String,
    size: PageSize,
    dirty: bool,
}

impl Default for PageMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageMeasurer {
    pub fn new() -> Self {
        Self {
            page: 0,
            source: String::new(),
            size: PageSize::PLACEHOLDER,
            dirty: false,
        }
    }

    pub fn set_page(&mut self, page: usize) {
        if self.page != page {
            self.page = page;
            self.remeasure();
        }
    }

    pub fn set_source(&mut self, source: &str) {
        if self.source != source {
            self.source = source.to_string();
            self.remeasure();
        }
    }

    fn remeasure(&mut self) {
        if self.source.is_empty() {
            return;
        }
        if let Some(size) = measure_page(self.page, Path::new(&self.source)) {
            if size != self.size {
                self.size = size;
                self.dirty = true;
            }
        }
    }

    /// Currently measured page size (placeholder until a measurement lands).
    pub fn page_size(&self) -> PageSize {
        self.size
    }

    /// True once since the measured size last changed; layout should be
    /// recomputed when this reports true.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Layout box for the current measurement under the host's constraints.
    pub fn measure(&self, constraints: LayoutConstraints) -> (f32, f32) {
        layout_box(self.size, constraints)
    }
}
