//! Offscreen strip used to animate overflowing text.
//!
//! The text is rendered once into this RAM buffer. Each scroll frame then
//! copies a window of it onto the display in a single `fill_contiguous`
//! call instead of re-rasterising the glyphs, which keeps the per-frame bus
//! traffic at one rectangle.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

/// Heap-backed pixel strip implementing `DrawTarget<Color = Rgb565>`.
///
/// Dropping the buffer releases its memory; the owning display keeps it in an
/// `Option` so release happens exactly once.
pub struct ScrollBuffer {
    size: Size,
    pixels: Vec<Rgb565>,
}

impl ScrollBuffer {
    /// Allocate a buffer of `size` filled with `background`.
    pub fn new(size: Size, background: Rgb565) -> Self {
        debug!(
            "Allocating {}x{} scroll buffer ({} bytes)",
            size.width,
            size.height,
            size.width as usize * size.height as usize * 2
        );
        Self {
            size,
            pixels: vec![background; size.width as usize * size.height as usize],
        }
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> Option<Rgb565> {
        if x < self.size.width && y < self.size.height {
            Some(self.pixels[(y * self.size.width + x) as usize])
        } else {
            None
        }
    }

    /// Copy a window of the strip into `area` on `display`.
    ///
    /// Column `c` of the area shows strip column `(offset + c) % period`.
    /// Columns past the strip's width (the gap between repeats) and rows past
    /// its height are painted with `background`.
    pub fn blit<D>(
        &self,
        display: &mut D,
        area: Rectangle,
        offset: u32,
        period: u32,
        background: Rgb565,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let period = period.max(1);
        let width = area.size.width;
        let pixel_iter = (0..area.size.height).flat_map(move |y| {
            (0..width).map(move |c| {
                let x = (offset + c) % period;
                self.pixel(x, y).unwrap_or(background)
            })
        });

        display.fill_contiguous(&area, pixel_iter)
    }
}

impl Drop for ScrollBuffer {
    fn drop(&mut self) {
        debug!(
            "Releasing {}x{} scroll buffer",
            self.size.width, self.size.height
        );
    }
}

impl OriginDimensions for ScrollBuffer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for ScrollBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let w = self.size.width as i32;
        let h = self.size.height as i32;

        for Pixel(coord, color) in pixels {
            if coord.x >= 0 && coord.y >= 0 && coord.x < w && coord.y < h {
                self.pixels[(coord.y * w + coord.x) as usize] = color;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let w = self.size.width as usize;

        for point in area.points() {
            self.pixels[point.y as usize * w + point.x as usize] = color;
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}
