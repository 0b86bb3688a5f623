//! Procedural Open Graph preview images.
//!
//! An [`ImageRequest`] describes one 1200×630 image: a solid or vertical
//! gradient background, an optional darkening overlay and an ordered list of
//! text layers that may carry drop shadows or a filled badge. [`render`]
//! paints it and writes a PNG.

pub mod config;
pub mod error;
pub mod graphics;
pub mod presets;
pub mod renderer;
pub mod request;

pub use config::BatchConfig;
pub use error::{ConfigError, FontError, RenderError};
pub use graphics::{resolve_font, FontFace, FontHandle, TextBounds};
pub use presets::PresetStyle;
pub use renderer::{gradient_row_color, rasterize, render, PlacedLayer, Renderer};
pub use request::{
    Background, BoxBounds, CanvasSize, Color, DecorativeBox, HorizontalPosition, ImageRequest,
    Overlay, Rect, Shadow, TextLayer,
};
