//! Hosted page view: property surface, render scheduling and band publishing.
//!
//! The view owns the mutable display state. Renders run on the background
//! executor; finished buffers and failures land in an inbox that the owning
//! thread drains with `process_results()`, so published bands and queued
//! events are only ever touched from that thread.
//!
//! Each spawned render is stamped with a generation number. A completion
//! whose generation is behind the latest spawn belongs to superseded
//! properties and is discarded instead of overwriting newer output.

use crate::annotation::{self, AnnotationPage};
use crate::constants::SLICES;
use crate::executor::BackgroundExecutor;
use crate::raster::{self, RenderRequest, RenderedPage};
use crate::transform::{BackendCaps, ResizeMode};
use image::{RgbaImage, imageops};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Events surfaced to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfViewEvent {
    /// A render finished and (when tall enough to slice) was published.
    /// Dimensions are the page's displayed size in PDF units.
    LoadComplete { page_width: f32, page_height: f32 },
    /// A render or property update failed. The message is user-facing.
    Error { message: String },
}

enum RenderOutcome {
    Complete {
        generation: u64,
        rendered: RenderedPage,
    },
    Failed {
        message: String,
    },
}

/// One displayed PDF page with optional annotation overlay.
pub struct PdfPageView {
    page: usize,
    source: String,
    resize_mode: ResizeMode,
    annotations: Vec<AnnotationPage>,
    caps: BackendCaps,
    width: u32,
    height: u32,
    dirty: bool,
    generation: u64,
    bands: Vec<RgbaImage>,
    events: VecDeque<PdfViewEvent>,
    inbox: Arc<Mutex<Vec<RenderOutcome>>>,
    executor: BackgroundExecutor,
}

impl Default for PdfPageView {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfPageView {
    pub fn new() -> Self {
        Self {
            page: 0,
            source: String::new(),
            resize_mode: ResizeMode::default(),
            annotations: Vec::new(),
            caps: BackendCaps::detect(),
            width: 0,
            height: 0,
            dirty: false,
            generation: 0,
            bands: Vec::new(),
            events: VecDeque::new(),
            inbox: Arc::new(Mutex::new(Vec::new())),
            executor: BackgroundExecutor::with_default_workers(),
        }
    }

    pub fn set_page(&mut self, page: usize) {
        if self.page != page {
            self.page = page;
            self.dirty = true;
        }
    }

    pub fn set_source(&mut self, source: &str) {
        if self.source != source {
            self.source = source.to_string();
            self.dirty = true;
        }
    }

    /// Update the resize mode from its configuration string. Unknown values
    /// surface an error event and leave the current mode in place.
    pub fn set_resize_mode(&mut self, mode: &str) {
        match mode.parse::<ResizeMode>() {
            Ok(resize_mode) => {
                self.resize_mode = resize_mode;
                self.dirty = true;
            }
            Err(err) => self.events.push_back(PdfViewEvent::Error {
                message: err.to_string(),
            }),
        }
    }

    /// Update the annotation overlay. `value` is a JSON file path when `file`
    /// is set, otherwise an inline JSON document. An empty value clears the
    /// overlay, re-rendering only if annotations were present.
    pub fn set_annotation(&mut self, value: &str, file: bool) {
        if value.is_empty() {
            if !self.annotations.is_empty() {
                self.annotations = Vec::new();
                self.dirty = true;
            }
            return;
        }

        let parsed = if file {
            annotation::load_annotation_file(value)
        } else {
            annotation::parse_annotation(value, value)
        };
        match parsed {
            Ok(pages) => {
                self.annotations = pages;
                self.dirty = true;
            }
            Err(err) => self.events.push_back(PdfViewEvent::Error {
                message: err.to_string(),
            }),
        }
    }

    /// Record the view's laid-out size in pixels.
    pub fn set_layout(&mut self, width: u32, height: u32) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.dirty = true;
        }
    }

    /// Override backend capability detection.
    pub fn set_backend_caps(&mut self, caps: BackendCaps) {
        self.caps = caps;
    }

    /// Kick off a background render if the view is renderable and a property
    /// affecting output changed since the last render.
    pub fn render(&mut self) {
        if self.width < 1 || self.height < 1 || self.source.is_empty() || !self.dirty {
            // Layout not complete yet, or nothing to render.
            return;
        }
        self.dirty = false;
        self.generation += 1;
        let generation = self.generation;

        let request = RenderRequest {
            source: PathBuf::from(&self.source),
            page: self.page,
            width: self.width,
            height: self.height,
            resize_mode: self.resize_mode,
            annotations: self.annotations.clone(),
            caps: self.caps,
        };
        let inbox = Arc::clone(&self.inbox);
        self.executor.spawn(
            "render_page",
            move || Ok(raster::render_page(&request)?),
            move |result| {
                let outcome = match result {
                    Ok(rendered) => RenderOutcome::Complete {
                        generation,
                        rendered,
                    },
                    Err(err) => RenderOutcome::Failed {
                        message: err.to_string(),
                    },
                };
                inbox.lock().push(outcome);
            },
        );
    }

    /// Apply finished background work on the owning thread: publish bands,
    /// queue events, discard stale generations.
    pub fn process_results(&mut self) {
        self.executor.process_results();
        let outcomes: Vec<RenderOutcome> = self.inbox.lock().drain(..).collect();
        for outcome in outcomes {
            match outcome {
                RenderOutcome::Complete {
                    generation,
                    rendered,
                } => {
                    if generation != self.generation {
                        debug!(generation, latest = self.generation, "discarding stale render");
                        continue;
                    }
                    if let Some(bands) = slice_bands(&rendered.buffer) {
                        self.bands = bands;
                    }
                    self.events.push_back(PdfViewEvent::LoadComplete {
                        page_width: rendered.page_width,
                        page_height: rendered.page_height,
                    });
                }
                RenderOutcome::Failed { message } => {
                    self.events.push_back(PdfViewEvent::Error { message });
                }
            }
        }
    }

    /// True while a spawned render has not yet been applied.
    pub fn has_pending_render(&self) -> bool {
        self.executor.has_pending() || !self.inbox.lock().is_empty()
    }

    /// Currently published display bands, top to bottom.
    pub fn bands(&self) -> &[RgbaImage] {
        &self.bands
    }

    /// Drain queued events in arrival order.
    pub fn take_events(&mut self) -> Vec<PdfViewEvent> {
        self.events.drain(..).collect()
    }
}

/// Split a rendered buffer into horizontal display bands.
///
/// Band height is `floor(height / SLICES)`; the final band absorbs the
/// remainder so no rows are lost. Buffers shorter than `SLICES` rows cannot
/// be sliced and yield `None`.
pub fn slice_bands(buffer: &RgbaImage) -> Option<Vec<RgbaImage>> {
    let height = buffer.height();
    let slice_height = height / SLICES as u32;
    if slice_height < 1 {
        return None;
    }

    let mut bands = Vec::with_capacity(SLICES);
    for i in 0..SLICES as u32 {
        let top = i * slice_height;
        let remaining = height - top;
        let band_height = if remaining < 2 * slice_height {
            remaining
        } else {
            slice_height
        };
        bands.push(imageops::crop_imm(buffer, 0, top, buffer.width(), band_height).to_image());
    }
    Some(bands)
}
