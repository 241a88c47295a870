//! Annotation data model and compositing.
//!
//! Annotations arrive as a JSON document: one entry per page, each holding
//! freehand strokes and positioned text labels. Coordinates are normalized to
//! the rendered buffer (0.0 to 1.0 on each axis), so the same payload overlays
//! correctly at any render resolution. Compositing happens after the page
//! raster is produced and draws directly into the page buffer.

use crate::constants::{STROKE_NOISE_THRESHOLD, TEXT_BASE_FONT_SIZE, TEXT_FONT_SCALE_FACTOR};
use crate::error::{PdfError, PdfResult};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tiny_skia::{
    LineCap, LineJoin, Paint, PathBuilder, PixmapMut, Stroke as SkiaStroke, Transform,
};
use tracing::warn;

/// A text label anchored at a normalized point. The anchor marks the top-left
/// corner of the rendered glyphs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionedText {
    pub color: String,
    #[serde(rename = "fontSize")]
    pub font_size: f32,
    pub point: [f32; 2],
    pub str: String,
}

/// A freehand stroke: normalized points in draw order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f32,
    pub path: Vec<[f32; 2]>,
}

/// All annotations for one page of the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnnotationPage {
    pub strokes: Vec<Stroke>,
    pub text: Vec<PositionedText>,
}

/// Parse an annotation payload. `source` names the origin (a file path or the
/// inline string itself) for error reporting only.
pub fn parse_annotation(json: &str, source: &str) -> PdfResult<Vec<AnnotationPage>> {
    serde_json::from_str(json).map_err(|err| PdfError::AnnotationParse {
        path: source.to_string(),
        detail: err.to_string(),
    })
}

/// Load and parse an annotation file.
pub fn load_annotation_file(path: &str) -> PdfResult<Vec<AnnotationPage>> {
    let json = std::fs::read_to_string(path).map_err(|err| PdfError::AnnotationParse {
        path: path.to_string(),
        detail: err.to_string(),
    })?;
    parse_annotation(&json, path)
}

/// Parse `#RRGGBB` or `#RRGGBBAA`. Anything unrecognized falls back to opaque
/// black rather than failing the render.
pub fn parse_color(hex: &str) -> [u8; 4] {
    fn channels(hex: &str) -> Option<[u8; 4]> {
        let digits = hex.strip_prefix('#')?;
        match digits.len() {
            6 | 8 => {}
            _ => return None,
        }
        let mut out = [0u8, 0, 0, 0xff];
        for (i, chunk) in digits.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).ok()?;
            out[i] = u8::from_str_radix(pair, 16).ok()?;
        }
        Some(out)
    }
    channels(hex).unwrap_or([0, 0, 0, 0xff])
}

/// One drawing command of a smoothed stroke, in buffer pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo { x: f32, y: f32 },
    QuadTo { cx: f32, cy: f32, x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
}

/// Convert normalized stroke points into a smoothed pixel-space path.
///
/// Points closer than the noise threshold to the previous anchor are dropped.
/// Each kept point contributes a quadratic segment ending at the midpoint
/// between the previous anchor and itself, with the previous anchor as the
/// control point, so the curve bends toward the recorded samples without
/// passing through every one. A final straight segment reaches the last
/// recorded point exactly.
pub fn smooth_path(points: &[[f32; 2]], scale_x: f32, scale_y: f32) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return segments;
    };

    let mut anchor = *first;
    segments.push(PathSegment::MoveTo {
        x: anchor[0] * scale_x,
        y: anchor[1] * scale_y,
    });
    for point in &points[1..] {
        let dx = scale_x * (anchor[0] - point[0]);
        let dy = scale_y * (anchor[1] - point[1]);
        if dx.hypot(dy) < STROKE_NOISE_THRESHOLD {
            continue;
        }
        let mid_x = (anchor[0] + point[0]) / 2.0;
        let mid_y = (anchor[1] + point[1]) / 2.0;
        segments.push(PathSegment::QuadTo {
            cx: anchor[0] * scale_x,
            cy: anchor[1] * scale_y,
            x: mid_x * scale_x,
            y: mid_y * scale_y,
        });
        anchor = *point;
    }
    segments.push(PathSegment::LineTo {
        x: last[0] * scale_x,
        y: last[1] * scale_y,
    });
    segments
}

/// Font size in pixels for a text label rendered into a buffer of the given
/// width. Larger buffers get larger text, at a reduced rate.
pub fn scaled_font_size(font_size: f32, buffer_width: u32) -> f32 {
    TEXT_BASE_FONT_SIZE + font_size * buffer_width as f32 / TEXT_FONT_SCALE_FACTOR
}

const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static LABEL_FONT: Lazy<Option<FontVec>> = Lazy::new(|| {
    for path in FONT_SEARCH_PATHS {
        if let Ok(bytes) = std::fs::read(path) {
            if let Ok(font) = FontVec::try_from_vec(bytes) {
                return Some(font);
            }
        }
    }
    warn!("no system font found; annotation text labels will not be drawn");
    None
});

/// Draw one page's annotations into the rendered buffer.
pub fn composite_page(buffer: &mut RgbaImage, page: &AnnotationPage) {
    draw_strokes(buffer, &page.strokes);
    draw_text_labels(buffer, &page.text);
}

fn draw_strokes(buffer: &mut RgbaImage, strokes: &[Stroke]) {
    if strokes.is_empty() {
        return;
    }
    let (width, height) = buffer.dimensions();
    // The buffer is opaque, so its pixels are valid premultiplied RGBA and
    // can be stroked in place.
    let Some(mut pixmap) = PixmapMut::from_bytes(&mut *buffer, width, height) else {
        warn!(width, height, "annotation buffer rejected by raster target");
        return;
    };

    for stroke in strokes {
        if stroke.path.len() < 2 {
            continue;
        }
        let segments = smooth_path(&stroke.path, width as f32, height as f32);
        let mut builder = PathBuilder::new();
        for segment in &segments {
            match *segment {
                PathSegment::MoveTo { x, y } => builder.move_to(x, y),
                PathSegment::QuadTo { cx, cy, x, y } => builder.quad_to(cx, cy, x, y),
                PathSegment::LineTo { x, y } => builder.line_to(x, y),
            }
        }
        let Some(path) = builder.finish() else {
            continue;
        };

        let [r, g, b, a] = parse_color(&stroke.color);
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let skia_stroke = SkiaStroke {
            width: stroke.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..SkiaStroke::default()
        };
        pixmap.stroke_path(&path, &paint, &skia_stroke, Transform::identity(), None);
    }
}

/// Distance from the text layout top (the ascent line) down to the tightest
/// ink top of `text` at the given scale.
fn glyph_top_offset(font: &FontVec, scale: PxScale, text: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    let mut top = f32::INFINITY;
    for ch in text.chars() {
        let mut glyph = scaled.scaled_glyph(ch);
        glyph.position = ab_glyph::point(0.0, scaled.ascent());
        if let Some(outlined) = scaled.outline_glyph(glyph) {
            top = top.min(outlined.px_bounds().min.y);
        }
    }
    if top.is_finite() { top } else { 0.0 }
}

fn draw_text_labels(buffer: &mut RgbaImage, labels: &[PositionedText]) {
    if labels.is_empty() {
        return;
    }
    let Some(font) = LABEL_FONT.as_ref() else {
        return;
    };
    let (width, height) = buffer.dimensions();
    for label in labels {
        let [r, g, b, a] = parse_color(&label.color);
        let scale = PxScale::from(scaled_font_size(label.font_size, width));
        let x = (width as f32 * label.point[0]).round() as i32;
        // Anchor the glyphs' actual ink top, not the ascent line, at the
        // requested point.
        let anchor_y = height as f32 * label.point[1];
        let y = (anchor_y - glyph_top_offset(font, scale, &label.str)).round() as i32;
        draw_text_mut(buffer, Rgba([r, g, b, a]), x, y, scale, font, &label.str);
    }
}
