//! Transform planning - mapping PDF page space onto the target raster.
//!
//! Pure geometry: given effective (post-rotation) page dimensions, target
//! raster dimensions and a fit mode, compute the affine transform placing
//! page content in the raster, or decide to render at identity on backends
//! where an explicit transform is unreliable.

use crate::constants::TRANSFORM_SKIP_TOLERANCE;
use crate::error::PdfError;
use std::str::FromStr;

/// Policy for mapping a page's aspect ratio onto the target rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMode {
    /// Fit the whole page inside the target, centered, no crop.
    #[default]
    Contain,
    /// Match the target width exactly; height overflow is cropped, underflow
    /// is left as background fill.
    FitWidth,
}

impl ResizeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeMode::Contain => "contain",
            ResizeMode::FitWidth => "fitWidth",
        }
    }
}

impl FromStr for ResizeMode {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contain" => Ok(ResizeMode::Contain),
            "fitWidth" => Ok(ResizeMode::FitWidth),
            other => Err(PdfError::InvalidResizeMode(other.to_string())),
        }
    }
}

/// Rendering-backend capabilities, resolved once and injected.
#[derive(Debug, Clone, Copy)]
pub struct BackendCaps {
    /// Whether the backend applies an explicit transform matrix correctly for
    /// rotated/cropped pages. Legacy backends apply their own implicit
    /// rotation handling that conflicts with an explicit matrix.
    pub reliable_explicit_transform: bool,
}

impl BackendCaps {
    /// Capabilities of the PDFium backend in use.
    pub fn detect() -> Self {
        Self {
            reliable_explicit_transform: true,
        }
    }
}

impl Default for BackendCaps {
    fn default() -> Self {
        Self::detect()
    }
}

/// Affine plan mapping the effective page rectangle into raster pixels:
/// `pixel = page * scale + translate` per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTransform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl PageTransform {
    /// Pixel rectangle the page content occupies in the target raster:
    /// (x, y, width, height).
    pub fn content_rect(&self, page_width: f32, page_height: f32) -> (i64, i64, u32, u32) {
        let w = (page_width * self.scale_x).round().max(1.0) as u32;
        let h = (page_height * self.scale_y).round().max(1.0) as u32;
        (
            self.translate_x.round() as i64,
            self.translate_y.round() as i64,
            w,
            h,
        )
    }
}

/// Destination rectangle (width, height) for the given fit mode, anchored at
/// the raster origin.
fn dest_rect(mode: ResizeMode, page_width: f32, page_height: f32, target_width: f32, target_height: f32) -> (f32, f32) {
    match mode {
        ResizeMode::Contain => (target_width, target_height),
        ResizeMode::FitWidth => (target_width, target_width * page_height / page_width),
    }
}

/// Compute the transform placing the effective page rectangle into the target
/// raster, or `None` to render at identity (backend fits the page to the full
/// raster itself).
///
/// `page_width`/`page_height` are post-rotation display dimensions.
pub fn plan_transform(
    page_width: f32,
    page_height: f32,
    target_width: f32,
    target_height: f32,
    mode: ResizeMode,
    caps: BackendCaps,
) -> Option<PageTransform> {
    if page_width <= 0.0 || page_height <= 0.0 || target_width < 1.0 || target_height < 1.0 {
        return None;
    }

    if !caps.reliable_explicit_transform {
        // Skip the explicit matrix unless doing so would visibly distort the
        // aspect ratio: the backend's implicit fit already matches when the
        // naive aspect-fit width is within tolerance of the raster width.
        let aspect_ratio = page_width / page_height;
        let naive_width = target_height * aspect_ratio;
        if (target_width - naive_width).abs() <= TRANSFORM_SKIP_TOLERANCE {
            return None;
        }
    }

    let (dest_width, dest_height) = dest_rect(mode, page_width, page_height, target_width, target_height);

    // Scale-to-fit, centered within the destination rectangle.
    let scale = (dest_width / page_width).min(dest_height / page_height);
    let content_width = page_width * scale;
    let content_height = page_height * scale;

    Some(PageTransform {
        scale_x: scale,
        scale_y: scale,
        translate_x: (dest_width - content_width) / 2.0,
        translate_y: (dest_height - content_height) / 2.0,
    })
}
