//! Turns an [`ImageRequest`] into pixels and a PNG file.

use std::path::PathBuf;

use image::{ImageFormat, RgbImage};
use log::debug;

use crate::error::RenderError;
use crate::graphics::{centered_x, Canvas, FontFace};
use crate::request::{Background, Color, HorizontalPosition, ImageRequest, Rect, TextLayer};

/// Color of row `y` in a vertical gradient of `height` rows.
///
/// Each channel is `start + (end - start) * y / height`, truncated, so row 0 is
/// exactly `start` and the last row stops one step short of `end`.
pub fn gradient_row_color(start: Color, end: Color, y: u32, height: u32) -> Color {
    let t = if height == 0 { 0.0 } else { y as f64 / height as f64 };
    let mut out = [0u8; 3];
    for (i, o) in out.iter_mut().enumerate() {
        let s = start.0[i] as f64;
        let e = end.0[i] as f64;
        *o = (s + (e - s) * t).clamp(0.0, 255.0) as u8;
    }
    Color(out)
}

/// Where a layer's ink landed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedLayer {
    /// Inclusive ink rectangle of the main (non-shadow) text.
    pub ink: Rect,
    pub backdrop: Option<Rect>,
}

/// Draws requests onto fresh canvases.
///
/// The face is resolved once per request and shared by every layer.
pub struct Renderer {
    face: FontFace,
}

impl Renderer {
    /// Resolve the request's font (or a fallback) up front.
    pub fn for_request(request: &ImageRequest) -> Self {
        Self { face: FontFace::resolve(request.font.as_deref()) }
    }

    pub fn with_face(face: FontFace) -> Self {
        Self { face }
    }

    /// Rasterize without touching the filesystem.
    pub fn rasterize(&self, request: &ImageRequest) -> RgbImage {
        self.rasterize_with_layout(request).0
    }

    /// Rasterize and report where each layer ended up.
    pub fn rasterize_with_layout(&self, request: &ImageRequest) -> (RgbImage, Vec<PlacedLayer>) {
        let mut canvas = Canvas::new(request.canvas.width, request.canvas.height);
        debug!("Background {}", describe_background(request.background));
        paint_background(&mut canvas, request.background);
        if let Some(overlay) = request.overlay {
            canvas.composite(overlay.color, overlay.alpha);
        }

        let placed = request
            .layers
            .iter()
            .map(|layer| self.draw_layer(&mut canvas, layer))
            .collect();
        (canvas.into_image(), placed)
    }

    fn draw_layer(&self, canvas: &mut Canvas, layer: &TextLayer) -> PlacedLayer {
        let font = self.face.sized(layer.size);
        let bounds = font.measure(&layer.text);
        let x = match layer.x {
            HorizontalPosition::Centered => centered_x(canvas.width(), bounds.width),
            HorizontalPosition::Absolute(px) => px,
        };
        debug!(
            "Layer {:?}: size {} ink {}x{} at ({}, {})",
            layer.text, layer.size, bounds.width, bounds.height, x, layer.y
        );

        let backdrop = layer.backdrop.map(|b| {
            let rect = b.rect(x, layer.y, bounds.width as i32);
            canvas.fill_rect(rect, b.fill, b.opacity);
            rect
        });

        if let Some(shadow) = layer.shadow {
            font.draw(canvas, &layer.text, x + shadow.dx, layer.y + shadow.dy, shadow.color);
        }
        font.draw(canvas, &layer.text, x, layer.y, layer.color);

        let top = layer.y + bounds.top;
        PlacedLayer {
            ink: Rect::new(
                x,
                top,
                x + bounds.width as i32 - 1,
                top + bounds.height as i32 - 1,
            ),
            backdrop,
        }
    }

    /// Rasterize and write the PNG, overwriting any existing file.
    pub fn render(&self, request: &ImageRequest) -> Result<PathBuf, RenderError> {
        if !request.canvas.is_valid() {
            return Err(RenderError::InvalidCanvas {
                path: request.output.clone(),
                width: request.canvas.width,
                height: request.canvas.height,
            });
        }
        let image = self.rasterize(request);
        save_png(&image, request)?;
        Ok(request.output.clone())
    }
}

fn describe_background(background: Background) -> String {
    match background {
        Background::Solid(color) => format!("solid {}", color),
        Background::VerticalGradient { start, end } => format!("gradient {} -> {}", start, end),
    }
}

fn paint_background(canvas: &mut Canvas, background: Background) {
    match background {
        Background::Solid(color) => canvas.fill(color),
        Background::VerticalGradient { start, end } => {
            let height = canvas.height();
            for y in 0..height {
                canvas.fill_row(y, gradient_row_color(start, end, y, height));
            }
        }
    }
}

fn save_png(image: &RgbImage, request: &ImageRequest) -> Result<(), RenderError> {
    image
        .save_with_format(&request.output, ImageFormat::Png)
        .map_err(|source| RenderError::OutputWrite {
            path: request.output.clone(),
            source,
        })
}

/// Rasterize a request with its own resolved font.
pub fn rasterize(request: &ImageRequest) -> RgbImage {
    Renderer::for_request(request).rasterize(request)
}

/// Render a request to its output path.
pub fn render(request: &ImageRequest) -> Result<PathBuf, RenderError> {
    Renderer::for_request(request).render(request)
}
