//! Batch configuration parsing.
//!
//! A batch file lists one `[[image]]` table per output image. Paths inside it
//! are used as written, relative to the working directory.
//!
//! # Example batch.toml
//!
//! ```toml
//! [[image]]
//! output = "public/og-image-guide.png"
//! background = { gradient = { start = "#1E64C8", end = "#3C9696" } }
//!
//! [[image.layers]]
//! text = "Guide"
//! size = 70
//! color = "#FFFFFF"
//! y = 200
//! shadow = { dx = 3, dy = 3 }
//!
//! [[image.layers]]
//! text = "Quick Start"
//! size = 40
//! color = [200, 255, 200]
//! x = "centered"
//! y = 320
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::request::ImageRequest;

/// Raw TOML structure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BatchToml {
    #[serde(default)]
    image: Vec<ImageRequest>,
}

/// Loaded batch of requests, in file order.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub requests: Vec<ImageRequest>,
    /// Where the batch was read from.
    source: PathBuf,
}

impl BatchConfig {
    /// Load a batch file.
    ///
    /// Fails if the file cannot be read, does not parse, defines no images,
    /// or gives an image a canvas outside `1..=CanvasSize::MAX_DIMENSION`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse batch TOML; `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let toml: BatchToml = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if toml.image.is_empty() {
            return Err(ConfigError::Empty { path: path.to_path_buf() });
        }
        if let Some((index, request)) =
            toml.image.iter().enumerate().find(|(_, r)| !r.canvas.is_valid())
        {
            return Err(ConfigError::InvalidCanvas {
                path: path.to_path_buf(),
                index,
                width: request.canvas.width,
                height: request.canvas.height,
            });
        }
        Ok(Self {
            requests: toml.image,
            source: path.to_path_buf(),
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}
