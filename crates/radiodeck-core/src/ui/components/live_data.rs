// src/ui/components/live_data.rs
//! Live RDS display: station, program type, radio text and clock
//!
//! The display keeps two copies of every field. `cached` is what the tuner
//! last reported, `rendered` is what is currently on the glass. Only fields
//! where the two differ are redrawn, so a steady station costs nothing per
//! frame. Radio text wider than its area runs as a marquee from an offscreen
//! [`ScrollBuffer`].

use embassy_time::{Duration, Instant};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};
use log::{debug, info};

use super::scroll_buffer::ScrollBuffer;
use super::text::TextSize;
use crate::config::LiveDataConfig;
use crate::radio::RadioDataSource;
use crate::ui::colors::{COLOR_BACKGROUND, COLOR_STATION, LIGHT_GRAY, WHITE};

/// Longest field value kept, in bytes. Longer values are cut at a char boundary.
pub const MAX_FIELD_LEN: usize = 64;

type FieldText = heapless::String<MAX_FIELD_LEN>;

/// One of the four live data fields, in render order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Station,
    ProgramType,
    Text,
    Time,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Station, Field::ProgramType, Field::Text, Field::Time];

    fn index(self) -> usize {
        match self {
            Field::Station => 0,
            Field::ProgramType => 1,
            Field::Text => 2,
            Field::Time => 3,
        }
    }

    pub fn text_size(self) -> TextSize {
        match self {
            Field::Station => TextSize::Large,
            Field::ProgramType => TextSize::Small,
            Field::Text | Field::Time => TextSize::Medium,
        }
    }

    fn read(self, source: &impl RadioDataSource) -> &str {
        match self {
            Field::Station => source.station_name(),
            Field::ProgramType => source.program_type(),
            Field::Text => source.radio_text(),
            Field::Time => source.clock_time(),
        }
    }
}

/// Small set of [`Field`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldMask(u8);

impl FieldMask {
    pub const NONE: FieldMask = FieldMask(0);
    pub const ALL: FieldMask = FieldMask(0b1111);

    pub fn only(field: Field) -> Self {
        FieldMask(1 << field.index())
    }

    pub fn insert(&mut self, field: Field) {
        self.0 |= 1 << field.index();
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0 & (1 << field.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }
}

/// Whether the display is showing tuner data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalState {
    NoSignal,
    Valid,
}

/// Screen rectangles of the four fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveDataAreas {
    pub station: Rectangle,
    pub program_type: Rectangle,
    pub text: Rectangle,
    pub time: Rectangle,
}

impl LiveDataAreas {
    /// Stack the fields top to bottom inside `bounds`, each one line of its font.
    pub fn stacked(bounds: Rectangle) -> Self {
        const ROW_GAP: i32 = 6;

        let width = bounds.size.width;
        let mut y = bounds.top_left.y;
        let mut row = |field: Field| {
            let height = field.text_size().line_height();
            let rect = Rectangle::new(Point::new(bounds.top_left.x, y), Size::new(width, height));
            y += height as i32 + ROW_GAP;
            rect
        };

        Self {
            station: row(Field::Station),
            program_type: row(Field::ProgramType),
            text: row(Field::Text),
            time: row(Field::Time),
        }
    }

    pub fn get(&self, field: Field) -> Rectangle {
        match field {
            Field::Station => self.station,
            Field::ProgramType => self.program_type,
            Field::Text => self.text,
            Field::Time => self.time,
        }
    }

    /// Smallest rectangle covering all four areas
    pub fn bounding_box(&self) -> Rectangle {
        let top_left = Field::ALL
            .iter()
            .map(|f| self.get(*f).top_left)
            .fold(self.station.top_left, |acc, p| acc.component_min(p));
        let bottom_right = Field::ALL
            .iter()
            .map(|f| {
                let r = self.get(*f);
                r.top_left + r.size
            })
            .fold(top_left, |acc, p| acc.component_max(p));

        Rectangle::with_corners(top_left, bottom_right - Point::new(1, 1))
    }
}

/// Text colors per field, plus the background every area is cleared to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveDataColors {
    pub background: Rgb565,
    pub station: Rgb565,
    pub program_type: Rgb565,
    pub text: Rgb565,
    pub time: Rgb565,
}

impl Default for LiveDataColors {
    fn default() -> Self {
        Self {
            background: COLOR_BACKGROUND,
            station: COLOR_STATION,
            program_type: LIGHT_GRAY,
            text: WHITE,
            time: LIGHT_GRAY,
        }
    }
}

impl LiveDataColors {
    pub fn get(&self, field: Field) -> Rgb565 {
        match field {
            Field::Station => self.station,
            Field::ProgramType => self.program_type,
            Field::Text => self.text,
            Field::Time => self.time,
        }
    }
}

/// What a single [`LiveDataDisplay::poll`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollOutcome {
    /// The tuner was queried (the poll interval had elapsed)
    pub polled: bool,
    /// Fields whose cached value changed
    pub changed: FieldMask,
    /// Signal state entered during this poll, if any
    pub transition: Option<SignalState>,
    /// The marquee advanced one step
    pub scrolled: bool,
}

#[derive(Debug, Default)]
struct FieldSlot {
    cached: FieldText,
    rendered: FieldText,
}

#[derive(Debug, Default, Clone, Copy)]
struct ScrollState {
    offset: u32,
    content_width: u32,
    needs_scrolling: bool,
}

/// Station / program type / text / clock panel fed by a [`RadioDataSource`]
///
/// Call [`tick`](Self::tick) once per frame. Polling and scrolling each run
/// on their own cadence from [`LiveDataConfig`]; calls in between are cheap.
pub struct LiveDataDisplay {
    areas: LiveDataAreas,
    colors: LiveDataColors,
    config: LiveDataConfig,
    fields: [FieldSlot; 4],
    state: SignalState,
    force_redraw: bool,
    scroll: ScrollState,
    scroll_dirty: bool,
    buffer: Option<ScrollBuffer>,
    last_poll: Option<Instant>,
    last_valid: Option<Instant>,
    last_scroll: Option<Instant>,
}

impl LiveDataDisplay {
    pub fn new(areas: LiveDataAreas, config: LiveDataConfig) -> Self {
        Self {
            areas,
            colors: LiveDataColors::default(),
            config,
            fields: Default::default(),
            state: SignalState::NoSignal,
            force_redraw: true,
            scroll: ScrollState::default(),
            scroll_dirty: false,
            buffer: None,
            last_poll: None,
            last_valid: None,
            last_scroll: None,
        }
    }

    pub fn with_colors(mut self, colors: LiveDataColors) -> Self {
        self.colors = colors;
        self
    }

    /// Query the tuner if the poll interval has elapsed, then advance the
    /// marquee if its interval has elapsed.
    pub fn poll(&mut self, now: Instant, source: &mut impl RadioDataSource) -> PollOutcome {
        let mut outcome = PollOutcome::default();

        if self.poll_due(now) {
            self.last_poll = Some(now);
            outcome.polled = true;

            if source.is_signal_valid() {
                self.last_valid = Some(now);
                if self.state == SignalState::NoSignal {
                    info!("Live data: signal acquired");
                    self.state = SignalState::Valid;
                    self.force_redraw = true;
                    outcome.transition = Some(SignalState::Valid);
                }
                outcome.changed = self.store_fields(now, &*source);
            } else if self.state == SignalState::Valid && self.is_stale(now) {
                info!("Live data: signal lost for {} ms", self.config.staleness_ms);
                self.enter_no_signal();
                outcome.transition = Some(SignalState::NoSignal);
            }
        }

        outcome.scrolled = self.step_scroll(now);
        outcome
    }

    /// Draw every field that changed since the last render.
    ///
    /// Returns the fields whose area was touched. A marquee step counts as a
    /// redraw of [`Field::Text`].
    pub fn render<D>(&mut self, display: &mut D) -> Result<FieldMask, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut drawn = FieldMask::NONE;

        for field in Field::ALL {
            let slot = &self.fields[field.index()];
            if !self.force_redraw && slot.cached == slot.rendered {
                continue;
            }

            self.draw_field(display, field)?;

            let slot = &mut self.fields[field.index()];
            slot.rendered = slot.cached.clone();
            drawn.insert(field);
        }

        if self.scroll_dirty && !drawn.contains(Field::Text) {
            if let Some(buffer) = &self.buffer {
                buffer.blit(
                    display,
                    self.areas.text,
                    self.scroll.offset,
                    self.scroll_period(),
                    self.colors.background,
                )?;
                drawn.insert(Field::Text);
            }
        }

        if !drawn.is_empty() {
            debug!("Live data: redrew {} field(s)", drawn.len());
        }

        self.force_redraw = false;
        self.scroll_dirty = false;
        Ok(drawn)
    }

    /// Per-frame entry point: [`poll`](Self::poll) followed by [`render`](Self::render).
    pub fn tick<S, D>(
        &mut self,
        now: Instant,
        source: &mut S,
        display: &mut D,
    ) -> Result<FieldMask, D::Error>
    where
        S: RadioDataSource,
        D: DrawTarget<Color = Rgb565>,
    {
        self.poll(now, source);
        self.render(display)
    }

    /// Drop all tuner data immediately, e.g. after the frequency changed.
    pub fn invalidate_for_context_change(&mut self) {
        info!("Live data: invalidated by context change");
        self.enter_no_signal();
        self.last_valid = None;
    }

    pub fn has_valid_data(&self) -> bool {
        self.state == SignalState::Valid
    }

    /// Move the fields. Must not be called while a render is in progress.
    pub fn configure_areas(&mut self, areas: LiveDataAreas) {
        self.areas = areas;
        self.scroll.needs_scrolling = self.scroll.content_width > self.areas.text.size.width;
        self.scroll.offset = 0;
        if !self.scroll.needs_scrolling {
            self.release_buffer();
        }
        self.force_redraw = true;
    }

    /// Recolor the fields. Must not be called while a render is in progress.
    pub fn configure_colors(&mut self, colors: LiveDataColors) {
        self.colors = colors;
        self.force_redraw = true;
    }

    /// Schedule a full redraw, e.g. after the screen was covered.
    pub fn mark_dirty(&mut self) {
        self.force_redraw = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.force_redraw
            || self.scroll_dirty
            || self.fields.iter().any(|slot| slot.cached != slot.rendered)
    }

    /// Latest value reported for `field`, empty while there is no signal
    pub fn value(&self, field: Field) -> &str {
        &self.fields[field.index()].cached
    }

    pub fn areas(&self) -> &LiveDataAreas {
        &self.areas
    }

    pub fn bounds(&self) -> Rectangle {
        self.areas.bounding_box()
    }

    pub fn scroll_offset(&self) -> u32 {
        self.scroll.offset
    }

    pub fn needs_scrolling(&self) -> bool {
        self.scroll.needs_scrolling
    }

    pub fn has_scroll_buffer(&self) -> bool {
        self.buffer.is_some()
    }

    fn poll_due(&self, now: Instant) -> bool {
        due(self.last_poll, now, self.config.poll_interval())
    }

    fn is_stale(&self, now: Instant) -> bool {
        match self.last_valid {
            Some(last) => now.saturating_duration_since(last) >= self.config.staleness(),
            None => true,
        }
    }

    fn store_fields(&mut self, now: Instant, source: &impl RadioDataSource) -> FieldMask {
        let mut changed = FieldMask::NONE;

        for field in Field::ALL {
            let value = truncated(field.read(source));
            let slot = &mut self.fields[field.index()];
            if slot.cached == value {
                continue;
            }
            slot.cached = value;
            changed.insert(field);
        }

        if changed.contains(Field::Text) {
            self.reset_scroll(now);
        }
        changed
    }

    fn reset_scroll(&mut self, now: Instant) {
        let text = &self.fields[Field::Text.index()].cached;
        let content_width = Field::Text.text_size().text_width(text);

        self.scroll = ScrollState {
            offset: 0,
            content_width,
            needs_scrolling: content_width > self.areas.text.size.width,
        };
        self.scroll_dirty = false;
        self.last_scroll = Some(now);
    }

    fn step_scroll(&mut self, now: Instant) -> bool {
        if self.state != SignalState::Valid || !self.scroll.needs_scrolling {
            return false;
        }
        if !due(self.last_scroll, now, self.config.scroll_interval()) {
            return false;
        }
        self.last_scroll = Some(now);

        let next = self.scroll.offset + self.config.scroll_step_px;
        self.scroll.offset = if next >= self.scroll_period() { 0 } else { next };
        self.scroll_dirty = true;
        true
    }

    /// Distance after which the marquee repeats: the text plus a blank area width
    fn scroll_period(&self) -> u32 {
        self.scroll.content_width + self.areas.text.size.width
    }

    fn enter_no_signal(&mut self) {
        self.state = SignalState::NoSignal;
        for slot in &mut self.fields {
            slot.cached.clear();
        }
        self.scroll = ScrollState::default();
        self.scroll_dirty = false;
        self.release_buffer();
        self.force_redraw = true;
    }

    fn release_buffer(&mut self) {
        if self.buffer.take().is_some() {
            debug!("Live data: marquee stopped");
        }
    }

    fn draw_field<D>(&mut self, display: &mut D, field: Field) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let area = self.areas.get(field);
        let background = self.colors.background;
        let style = MonoTextStyle::new(field.text_size().font(), self.colors.get(field));

        if field == Field::Text {
            if self.scroll.needs_scrolling {
                let size = Size::new(self.scroll.content_width, area.size.height);
                let mut buffer = match self.buffer.take() {
                    Some(buffer) if buffer.size() == size => buffer,
                    _ => ScrollBuffer::new(size, background),
                };
                buffer.clear(background).ok();
                Text::with_baseline(
                    &self.fields[field.index()].cached,
                    Point::zero(),
                    style,
                    Baseline::Top,
                )
                .draw(&mut buffer)
                .ok();

                let result = buffer.blit(
                    display,
                    area,
                    self.scroll.offset,
                    self.scroll_period(),
                    background,
                );
                self.buffer = Some(buffer);
                return result;
            }
            self.release_buffer();
        }

        display.fill_solid(&area, background)?;

        let value = &self.fields[field.index()].cached;
        if !value.is_empty() {
            Text::with_baseline(value, area.top_left, style, Baseline::Top)
                .draw(&mut display.clipped(&area))?;
        }
        Ok(())
    }
}

fn due(last: Option<Instant>, now: Instant, interval: Duration) -> bool {
    match last {
        Some(last) => now.saturating_duration_since(last) >= interval,
        None => true,
    }
}

fn truncated(value: &str) -> FieldText {
    let mut out = FieldText::new();
    for ch in value.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}
