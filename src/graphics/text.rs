//! Font resolution, text measurement and glyph drawing.
//!
//! Fonts are rasterized with `fontdue`. When no usable font file can be
//! found, [`resolve_font`] hands back [`FontFace::Fallback`], a built-in face
//! that draws each visible character as an outlined box. Measurement and
//! drawing share the same glyph placement, so centering stays exact for
//! either face.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use fontdue::{Font, FontSettings};
use log::{debug, info, warn};

use crate::error::FontError;
use crate::graphics::Canvas;
use crate::request::Color;

/// Font files tried, in order, when a request names no font or its font
/// fails to load. Korean-capable faces come first.
pub const PLATFORM_FONTS: &[&str] = &[
    "C:/Windows/Fonts/malgun.ttf",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "C:/Windows/Fonts/arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
];

/// A loaded typeface, independent of size.
#[derive(Clone)]
pub enum FontFace {
    TrueType(Arc<Font>),
    /// Built-in sentinel used when nothing else loads.
    Fallback,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontFace::TrueType(_) => f.write_str("FontFace::TrueType"),
            FontFace::Fallback => f.write_str("FontFace::Fallback"),
        }
    }
}

impl FontFace {
    /// Load a TrueType/OpenType file (collections use their first face).
    pub fn load(path: &Path) -> Result<Self, FontError> {
        let data = fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Font::from_bytes(data, FontSettings::default()).map_err(|reason| {
            FontError::Parse {
                path: path.to_path_buf(),
                reason: reason.to_string(),
            }
        })?;
        Ok(FontFace::TrueType(Arc::new(font)))
    }

    /// First loadable face from [`PLATFORM_FONTS`], or the fallback.
    pub fn search_platform() -> Self {
        for candidate in PLATFORM_FONTS {
            let path = Path::new(candidate);
            if !path.is_file() {
                continue;
            }
            match FontFace::load(path) {
                Ok(face) => {
                    info!("Using platform font {}", path.display());
                    return face;
                }
                Err(e) => debug!("Skipping platform font: {}", e),
            }
        }
        warn!("No usable platform font found; text will render as placeholder boxes");
        FontFace::Fallback
    }

    /// Try `path` first, then the platform fonts. Never fails.
    pub fn resolve(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match FontFace::load(path) {
                Ok(face) => {
                    info!("Using font {}", path.display());
                    return face;
                }
                Err(e) => warn!("{}; falling back to a platform font", e),
            }
        }
        FontFace::search_platform()
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FontFace::Fallback)
    }

    pub fn sized(&self, size: f32) -> FontHandle {
        FontHandle { face: self.clone(), size }
    }
}

/// Resolve a font at a given pixel size, falling back instead of failing.
pub fn resolve_font(path: Option<&Path>, size: f32) -> FontHandle {
    FontFace::resolve(path).sized(size)
}

/// Ink bounding box of a string, relative to its pen origin.
///
/// The origin's y is the top of the ascender line, so `top` is usually a
/// small positive offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBounds {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy)]
struct PlacedGlyph {
    ch: char,
    x: i32,
    top: i32,
    width: u32,
    height: u32,
}

/// A face at a specific pixel size.
#[derive(Debug, Clone)]
pub struct FontHandle {
    face: FontFace,
    size: f32,
}

impl FontHandle {
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn measure(&self, text: &str) -> TextBounds {
        bounds_of(&self.layout(text))
    }

    /// Draw `text` with the left edge of its ink at `x` and the top of the
    /// ascender line at `y`.
    pub fn draw(&self, canvas: &mut Canvas, text: &str, x: i32, y: i32, color: Color) {
        let glyphs = self.layout(text);
        let bounds = bounds_of(&glyphs);
        let origin_x = x - bounds.left;

        match &self.face {
            FontFace::TrueType(font) => {
                for g in glyphs.iter().filter(|g| g.width > 0 && g.height > 0) {
                    let (metrics, coverage) = font.rasterize(g.ch, self.size);
                    for row in 0..metrics.height {
                        for col in 0..metrics.width {
                            let alpha = coverage[row * metrics.width + col];
                            if alpha == 0 {
                                continue;
                            }
                            canvas.blend_at(
                                origin_x + g.x + col as i32,
                                y + g.top + row as i32,
                                color,
                                alpha,
                            );
                        }
                    }
                }
            }
            FontFace::Fallback => {
                let stroke = ((self.size / 16.0).round() as u32).max(1);
                for g in glyphs.iter().filter(|g| g.width > 0 && g.height > 0) {
                    for row in 0..g.height {
                        for col in 0..g.width {
                            let edge = col < stroke
                                || row < stroke
                                || col + stroke >= g.width
                                || row + stroke >= g.height;
                            if edge {
                                canvas.blend_at(
                                    origin_x + g.x + col as i32,
                                    y + g.top + row as i32,
                                    color,
                                    255,
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    fn layout(&self, text: &str) -> Vec<PlacedGlyph> {
        match &self.face {
            FontFace::TrueType(font) => layout_truetype(font, text, self.size),
            FontFace::Fallback => layout_fallback(text, self.size),
        }
    }
}

fn layout_truetype(font: &Font, text: &str, size: f32) -> Vec<PlacedGlyph> {
    let ascent = font
        .horizontal_line_metrics(size)
        .map(|m| m.ascent)
        .unwrap_or(size * 0.8)
        .round() as i32;

    let mut glyphs = Vec::with_capacity(text.len());
    let mut pen = 0.0f32;
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        if let Some(p) = prev {
            pen += font.horizontal_kern(p, ch, size).unwrap_or(0.0);
        }
        let m = font.metrics(ch, size);
        glyphs.push(PlacedGlyph {
            ch,
            x: pen.round() as i32 + m.xmin,
            top: ascent - (m.ymin + m.height as i32),
            width: m.width as u32,
            height: m.height as u32,
        });
        pen += m.advance_width;
        prev = Some(ch);
    }
    glyphs
}

fn layout_fallback(text: &str, size: f32) -> Vec<PlacedGlyph> {
    let advance = size * 0.6;
    let inset = (size * 0.05).round() as i32;
    let width = (size * 0.5).round() as u32;
    let height = (size * 0.7).round() as u32;
    let top = (size * 0.1).round() as i32;

    text.chars()
        .enumerate()
        .map(|(i, ch)| {
            let visible = !ch.is_whitespace();
            PlacedGlyph {
                ch,
                x: (i as f32 * advance).round() as i32 + inset,
                top,
                width: if visible { width } else { 0 },
                height: if visible { height } else { 0 },
            }
        })
        .collect()
}

fn bounds_of(glyphs: &[PlacedGlyph]) -> TextBounds {
    let mut ink = glyphs.iter().filter(|g| g.width > 0 && g.height > 0);
    let Some(first) = ink.next() else {
        return TextBounds::default();
    };
    let (mut x0, mut y0) = (first.x, first.top);
    let (mut x1, mut y1) = (first.x + first.width as i32, first.top + first.height as i32);
    for g in ink {
        x0 = x0.min(g.x);
        y0 = y0.min(g.top);
        x1 = x1.max(g.x + g.width as i32);
        y1 = y1.max(g.top + g.height as i32);
    }
    TextBounds {
        left: x0,
        top: y0,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    }
}

/// Left edge that centers `text_width` on a canvas (floor division).
pub fn centered_x(canvas_width: u32, text_width: u32) -> i32 {
    (canvas_width as i32 - text_width as i32).div_euclid(2)
}
