//! Image generation requests.
//!
//! A request fully describes one output image: canvas size, background,
//! optional overlay, the font to use and an ordered list of text layers.
//! Requests are plain data; they deserialize from the TOML batch format read
//! by [`crate::config`] and are built in code by [`crate::presets`].

use std::fmt;
use std::path::{Path, PathBuf};

use image::Rgb;
use serde::Deserialize;

/// An opaque RGB color.
///
/// Deserializes from `"#RRGGBB"` or `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ColorSpec")]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const BLACK: Color = Color([0, 0, 0]);
    pub const WHITE: Color = Color([255, 255, 255]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b])
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Color([channel(0)?, channel(2)?, channel(4)?]))
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb(self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    Channels([u8; 3]),
    Hex(String),
}

impl TryFrom<ColorSpec> for Color {
    type Error = String;

    fn try_from(spec: ColorSpec) -> Result<Self, Self::Error> {
        match spec {
            ColorSpec::Channels(c) => Ok(Color(c)),
            ColorSpec::Hex(s) => {
                Color::from_hex(&s)
                    .ok_or_else(|| format!("invalid color '{}', expected #RRGGBB", s))
            }
        }
    }
}

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    /// The conventional Open Graph preview size.
    pub const OG: CanvasSize = CanvasSize { width: 1200, height: 630 };

    /// Largest accepted width or height.
    pub const MAX_DIMENSION: u32 = 8192;

    /// Both sides non-zero and within [`Self::MAX_DIMENSION`].
    pub fn is_valid(&self) -> bool {
        (1..=Self::MAX_DIMENSION).contains(&self.width)
            && (1..=Self::MAX_DIMENSION).contains(&self.height)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::OG
    }
}

/// How the canvas is filled before anything else is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    Solid(Color),
    /// Top-to-bottom linear interpolation, one solid color per row.
    #[serde(rename = "gradient")]
    VerticalGradient { start: Color, end: Color },
}

/// A uniform semi-transparent layer blended over the whole background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Overlay {
    pub color: Color,
    pub alpha: u8,
}

/// Horizontal placement of a text layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "PositionSpec")]
pub enum HorizontalPosition {
    /// Center the measured ink box on the canvas.
    Centered,
    /// Left edge of the ink box at this pixel column.
    Absolute(i32),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PositionSpec {
    Pixels(i32),
    Keyword(String),
}

impl TryFrom<PositionSpec> for HorizontalPosition {
    type Error = String;

    fn try_from(spec: PositionSpec) -> Result<Self, Self::Error> {
        match spec {
            PositionSpec::Pixels(px) => Ok(HorizontalPosition::Absolute(px)),
            PositionSpec::Keyword(word) if word.eq_ignore_ascii_case("centered") => {
                Ok(HorizontalPosition::Centered)
            }
            PositionSpec::Keyword(word) => {
                Err(format!("invalid x '{}', expected \"centered\" or a pixel offset", word))
            }
        }
    }
}

/// Drop shadow drawn immediately before the main text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Shadow {
    #[serde(default = "Shadow::default_offset")]
    pub dx: i32,
    #[serde(default = "Shadow::default_offset")]
    pub dy: i32,
    #[serde(default = "Shadow::default_color")]
    pub color: Color,
}

impl Shadow {
    fn default_offset() -> i32 {
        3
    }

    fn default_color() -> Color {
        Color::BLACK
    }

    /// A black shadow offset by `(d, d)`.
    pub fn offset(d: i32) -> Self {
        Self { dx: d, dy: d, color: Color::BLACK }
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self::offset(Self::default_offset())
    }
}

/// Inclusive pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
    }
}

/// Where a decorative box sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxBounds {
    /// Absolute canvas coordinates.
    Fixed(Rect),
    /// Padding around the resolved text origin and measured width.
    /// The box spans `[x - horizontal, y - top]` to `[x + width + horizontal, y + bottom]`.
    AroundText { horizontal: i32, top: i32, bottom: i32 },
}

/// A filled rectangle drawn beneath a text layer, e.g. a domain badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecorativeBox {
    pub bounds: BoxBounds,
    pub fill: Color,
    #[serde(default = "DecorativeBox::opaque")]
    pub opacity: u8,
}

impl DecorativeBox {
    fn opaque() -> u8 {
        255
    }

    pub fn around_text(horizontal: i32, top: i32, bottom: i32, fill: Color) -> Self {
        Self {
            bounds: BoxBounds::AroundText { horizontal, top, bottom },
            fill,
            opacity: Self::opaque(),
        }
    }

    /// Resolve the box against a text origin and measured ink width.
    pub fn rect(&self, x: i32, y: i32, text_width: i32) -> Rect {
        match self.bounds {
            BoxBounds::Fixed(rect) => rect,
            BoxBounds::AroundText { horizontal, top, bottom } => {
                Rect::new(x - horizontal, y - top, x + text_width + horizontal, y + bottom)
            }
        }
    }
}

/// One string drawn onto the canvas.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextLayer {
    pub text: String,
    /// Font size in pixels.
    pub size: f32,
    pub color: Color,
    #[serde(default = "TextLayer::default_x")]
    pub x: HorizontalPosition,
    /// Top of the ascender line.
    pub y: i32,
    #[serde(default)]
    pub shadow: Option<Shadow>,
    #[serde(default)]
    pub backdrop: Option<DecorativeBox>,
}

impl TextLayer {
    fn default_x() -> HorizontalPosition {
        HorizontalPosition::Centered
    }

    /// A horizontally centered layer with no shadow or backdrop.
    pub fn centered(text: impl Into<String>, size: f32, color: Color, y: i32) -> Self {
        Self {
            text: text.into(),
            size,
            color,
            x: HorizontalPosition::Centered,
            y,
            shadow: None,
            backdrop: None,
        }
    }

    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn with_backdrop(mut self, backdrop: DecorativeBox) -> Self {
        self.backdrop = Some(backdrop);
        self
    }
}

/// Everything needed to produce one image file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageRequest {
    #[serde(default)]
    pub canvas: CanvasSize,
    pub background: Background,
    #[serde(default)]
    pub overlay: Option<Overlay>,
    /// Font file for every layer; `None` searches the platform fonts.
    #[serde(default)]
    pub font: Option<PathBuf>,
    #[serde(default)]
    pub layers: Vec<TextLayer>,
    pub output: PathBuf,
}

impl ImageRequest {
    /// A 1200×630 request with no layers.
    pub fn new(background: Background, output: impl Into<PathBuf>) -> Self {
        Self {
            canvas: CanvasSize::OG,
            background,
            overlay: None,
            font: None,
            layers: Vec::new(),
            output: output.into(),
        }
    }

    pub fn with_overlay(mut self, overlay: Overlay) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn with_font(mut self, font: impl Into<PathBuf>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn layer(mut self, layer: TextLayer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Move the output into `dir`, keeping the file name.
    pub fn relocate(&mut self, dir: &Path) {
        let name = self
            .output
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "og-image.png".into());
        self.output = dir.join(name);
    }
}
