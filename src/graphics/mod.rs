mod canvas;
pub mod text;

pub use canvas::{blend, Canvas};
pub use text::{centered_x, resolve_font, FontFace, FontHandle, TextBounds, PLATFORM_FONTS};
