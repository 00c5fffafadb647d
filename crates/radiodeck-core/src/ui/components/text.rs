// src/ui/components/text.rs
//! Text sizing helpers shared by the live data fields

use embedded_graphics::mono_font::{MonoFont, ascii};

/// Text size variants
///
/// Provides three preset text sizes with corresponding embedded-graphics fonts:
/// - `Small`: 5x8 font
/// - `Medium`: 6x10 font (default)
/// - `Large`: 10x20 font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &ascii::FONT_5X8,
            TextSize::Medium => &ascii::FONT_6X10,
            TextSize::Large => &ascii::FONT_10X20,
        }
    }

    /// Rendered width of `text` in pixels.
    pub fn text_width(&self, text: &str) -> u32 {
        let font = self.font();
        let chars = text.chars().count() as u32;
        if chars == 0 {
            return 0;
        }
        chars * font.character_size.width + (chars - 1) * font.character_spacing
    }

    /// Glyph cell height in pixels.
    pub fn line_height(&self) -> u32 {
        self.font().character_size.height
    }
}
