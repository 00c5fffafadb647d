//! Test doubles shared by the unit tests.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::radio::{RadioControl, RadioDataSource, SeekDirection};
use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

/// Display that stores pixels and counts the drawing calls it receives.
pub struct RecordingDisplay {
    pixels: Vec<Rgb565>,
    /// Number of `draw_iter` calls (text, rounded rects, ...)
    pub draw_calls: usize,
    /// Number of `fill_solid` / `fill_contiguous` calls (area clears, blits)
    pub fill_calls: usize,
    /// Areas passed to `fill_solid`, in call order
    pub filled_areas: Vec<Rectangle>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb565::BLACK; (DISPLAY_WIDTH_PX * DISPLAY_HEIGHT_PX) as usize],
            draw_calls: 0,
            fill_calls: 0,
            filled_areas: Vec::new(),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.draw_calls + self.fill_calls
    }

    pub fn reset_counts(&mut self) {
        self.draw_calls = 0;
        self.fill_calls = 0;
        self.filled_areas.clear();
    }

    pub fn pixel(&self, x: i32, y: i32) -> Rgb565 {
        self.pixels[y as usize * DISPLAY_WIDTH_PX as usize + x as usize]
    }

    /// Whether any pixel inside `area` differs from `background`
    pub fn has_ink(&self, area: Rectangle, background: Rgb565) -> bool {
        area.points()
            .filter(|p| self.bounding_box().contains(*p))
            .any(|p| self.pixel(p.x, p.y) != background)
    }

    fn set(&mut self, point: Point, color: Rgb565) {
        if self.bounding_box().contains(point) {
            let idx = point.y as usize * DISPLAY_WIDTH_PX as usize + point.x as usize;
            self.pixels[idx] = color;
        }
    }
}

impl OriginDimensions for RecordingDisplay {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX)
    }
}

impl DrawTarget for RecordingDisplay {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.draw_calls += 1;
        for Pixel(point, color) in pixels {
            self.set(point, color);
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.fill_calls += 1;
        for (point, color) in area.points().zip(colors) {
            self.set(point, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_calls += 1;
        self.filled_areas.push(*area);
        for point in area.points() {
            self.set(point, color);
        }
        Ok(())
    }
}

/// Scriptable tuner for screen and live display tests.
#[derive(Debug, Default)]
pub struct FakeTuner {
    pub signal: bool,
    pub station: heapless::String<16>,
    pub program_type: heapless::String<16>,
    pub text: heapless::String<64>,
    pub clock: heapless::String<8>,
    pub muted: bool,
    pub agc: bool,
    pub seeks: Vec<SeekDirection>,
    pub signal_queries: usize,
}

impl FakeTuner {
    pub fn with_station(station: &str, text: &str) -> Self {
        let mut tuner = Self {
            signal: true,
            ..Self::default()
        };
        tuner.set_station(station);
        tuner.set_text(text);
        tuner.set_program_type("Pop Music");
        tuner.set_clock("12:34");
        tuner
    }

    pub fn set_station(&mut self, value: &str) {
        self.station.clear();
        self.station.push_str(value).ok();
    }

    pub fn set_program_type(&mut self, value: &str) {
        self.program_type.clear();
        self.program_type.push_str(value).ok();
    }

    pub fn set_text(&mut self, value: &str) {
        self.text.clear();
        self.text.push_str(value).ok();
    }

    pub fn set_clock(&mut self, value: &str) {
        self.clock.clear();
        self.clock.push_str(value).ok();
    }
}

impl RadioDataSource for FakeTuner {
    fn is_signal_valid(&mut self) -> bool {
        self.signal_queries += 1;
        self.signal
    }

    fn station_name(&self) -> &str {
        &self.station
    }

    fn program_type(&self) -> &str {
        &self.program_type
    }

    fn radio_text(&self) -> &str {
        &self.text
    }

    fn clock_time(&self) -> &str {
        &self.clock
    }
}

impl RadioControl for FakeTuner {
    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_mute(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_agc_enabled(&self) -> bool {
        self.agc
    }

    fn set_agc(&mut self, enabled: bool) {
        self.agc = enabled;
    }

    fn seek(&mut self, direction: SeekDirection) {
        self.seeks.push(direction);
    }
}
