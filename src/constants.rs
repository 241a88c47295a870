//! Crate-wide constants.
//!
//! Centralizes tuning values so the rendering pipeline and the annotation
//! compositor stay consistent with each other.

// ============================================================================
// Presentation Surface
// ============================================================================

/// Drawing surfaces can reject very tall rasters. Rendered pages are divided
/// into this many horizontal bands drawn in sequence; logic assumes the view
/// is at least `SLICES` pixels tall.
pub const SLICES: usize = 8;

// ============================================================================
// Measurement Cache
// ============================================================================

/// Maximum number of (page, source) size entries kept in the measurement
/// cache before least-recently-used eviction.
pub const MEASURE_CACHE_CAPACITY: usize = 128;

// ============================================================================
// Transform Planning
// ============================================================================

/// On backends without reliable explicit-transform support, the transform is
/// skipped unless the naive aspect-fit width differs from the raster width by
/// more than this many pixels.
pub const TRANSFORM_SKIP_TOLERANCE: f32 = 4.0;

// ============================================================================
// Annotation Compositing
// ============================================================================

/// Freehand points closer than this (in scaled pixel space) to the previous
/// anchor are treated as input noise and suppressed.
pub const STROKE_NOISE_THRESHOLD: f32 = 8.0;

/// Base font size added so small annotation text stays legible at low
/// resolutions.
pub const TEXT_BASE_FONT_SIZE: f32 = 9.0;

/// Divisor applied to `fontSize * buffer_width`; larger buffers get modestly,
/// not linearly, larger text.
pub const TEXT_FONT_SCALE_FACTOR: f32 = 1000.0;

// ============================================================================
// Background Rendering
// ============================================================================

/// Worker threads for background render tasks. Rendering is serialized by the
/// render gate anyway, so one worker avoids pointless queueing.
pub const RENDER_WORKER_THREADS: usize = 1;
