//! Color definitions for the tuner UI
//!
//! All colors are RGB565, optimized for embedded displays with 16-bit color
//! depth. To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

// ============================================================================
// Base Colors
// ============================================================================

/// Screen background - very dark gray-blue
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(18 >> 3, 23 >> 2, 24 >> 3);

/// Idle button surface - slightly lighter than background
pub const COLOR_SURFACE: Rgb565 = Rgb565::new(43 >> 3, 55 >> 2, 57 >> 3);

/// Active (On) button surface - amber, the classic tuner lamp
pub const COLOR_ACTIVE: Rgb565 = Rgb565::new(230 >> 3, 150 >> 2, 40 >> 3);

/// Pressed highlight - dodger blue
pub const COLOR_PRESSED: Rgb565 = Rgb565::new(30 >> 3, 144 >> 2, 255 >> 3);

/// Disabled surface - dark gray
pub const COLOR_DISABLED: Rgb565 = Rgb565::new(26 >> 3, 32 >> 2, 33 >> 3);

// ============================================================================
// Text Colors
// ============================================================================

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Light gray for secondary text
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

/// Dark gray for disabled labels
pub const DARK_GRAY: Rgb565 = Rgb565::new(10, 20, 10);

/// Station name green, like a VFD segment
pub const COLOR_STATION: Rgb565 = Rgb565::new(95 >> 3, 185 >> 2, 141 >> 3);

// ============================================================================
// Palettes
// ============================================================================

/// Colors a bar button uses for each of its states
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonPalette {
    pub off: Rgb565,
    pub on: Rgb565,
    pub pressed: Rgb565,
    pub disabled: Rgb565,
    pub label: Rgb565,
    pub label_disabled: Rgb565,
    pub background: Rgb565,
}

impl Default for ButtonPalette {
    fn default() -> Self {
        Self {
            off: COLOR_SURFACE,
            on: COLOR_ACTIVE,
            pressed: COLOR_PRESSED,
            disabled: COLOR_DISABLED,
            label: WHITE,
            label_disabled: DARK_GRAY,
            background: COLOR_BACKGROUND,
        }
    }
}
