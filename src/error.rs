//! Error types for image generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a font file.
///
/// These never escape the renderer: [`crate::graphics::text::resolve_font`]
/// turns them into a warning and falls back to another face.
#[derive(Error, Debug)]
pub enum FontError {
    #[error("failed to read font {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
}

/// Errors that abort rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The encoded PNG could not be written to its destination.
    #[error("failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The canvas has a zero side or exceeds the size cap.
    #[error("{}: invalid canvas size {width}x{height}", path.display())]
    InvalidCanvas { path: PathBuf, width: u32, height: u32 },
}

/// Errors raised while loading a TOML batch file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config {} defines no [[image]] entries", path.display())]
    Empty { path: PathBuf },

    #[error(
        "config {}: image {index} canvas {width}x{height} is outside 1..={max}",
        path.display(),
        max = crate::request::CanvasSize::MAX_DIMENSION
    )]
    InvalidCanvas {
        path: PathBuf,
        index: usize,
        width: u32,
        height: u32,
    },
}
