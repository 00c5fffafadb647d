// src/screens/memory.rs
//! Station memory screen: preset list with a bottom button row.
//!
//! The Edit toggle reveals a Delete button that removes the last preset.
//! Presets live in RAM only; storing them is the firmware's business.

use core::fmt::Write;

use embassy_time::Instant;
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::Vec;
use log::{debug, info};

use crate::app_state::MuteView;
use crate::config::RadioUiConfig;
use crate::radio::Tuner;
use crate::screens::screen::Screen;
use crate::ui::colors::{COLOR_BACKGROUND, COLOR_STATION, WHITE};
use crate::ui::{
    Action, Axis, ButtonBar, ButtonEventKind, ButtonSpec, ButtonState, Drawable, ScreenId,
    TextSize, TouchEvent, TouchResult, Touchable,
};

pub const BACK: u8 = 20;
pub const MUTE: u8 = 21;
pub const EDIT: u8 = 22;
pub const DELETE: u8 = 23;

pub const MAX_PRESETS: usize = 8;

// Screen-local actions, handled before anything reaches the manager
const ACTION_EDIT_ON: u16 = 0x0201;
const ACTION_EDIT_OFF: u16 = 0x0202;
const ACTION_DELETE: u16 = 0x0203;

const MARGIN_PX: i32 = 8;
const ROW_GAP_PX: i32 = 4;

pub struct MemoryScreen {
    bounds: Rectangle,
    bar: ButtonBar<4>,
    presets_khz: Vec<u32, MAX_PRESETS>,
    list_area: Rectangle,
    mute: MuteView,
    list_dirty: bool,
    dirty: bool,
}

impl MemoryScreen {
    pub fn new(bounds: Rectangle, config: &RadioUiConfig, mute: MuteView) -> Self {
        let item_height = config.button_bar.item_height;
        let bar_bounds = Rectangle::new(
            Point::new(
                bounds.top_left.x + MARGIN_PX,
                bounds.top_left.y + bounds.size.height as i32 - MARGIN_PX - item_height as i32,
            ),
            Size::new(
                bounds.size.width.saturating_sub(2 * MARGIN_PX as u32),
                item_height,
            ),
        );

        let initial_mute = if mute.is_muted() {
            ButtonState::On
        } else {
            ButtonState::Off
        };
        let mut bar = ButtonBar::from_config(
            bar_bounds,
            [
                ButtonSpec::pushable(BACK, "Back").with_handler(|event| {
                    (event.kind == ButtonEventKind::Released)
                        .then_some(Action::SwitchScreen(ScreenId::Receiver))
                }),
                ButtonSpec::toggleable(MUTE, "Mute")
                    .with_state(initial_mute)
                    .with_handler(|event| Some(Action::SetMute(event.state == ButtonState::On))),
                ButtonSpec::toggleable(EDIT, "Edit").with_handler(|event| {
                    Some(Action::Custom(if event.state == ButtonState::On {
                        ACTION_EDIT_ON
                    } else {
                        ACTION_EDIT_OFF
                    }))
                }),
                ButtonSpec::pushable(DELETE, "Delete").with_handler(|event| {
                    (event.kind == ButtonEventKind::Released)
                        .then_some(Action::Custom(ACTION_DELETE))
                }),
            ],
            &config.button_bar,
            Axis::Horizontal,
        );
        bar.set_button_visible(DELETE, false).ok();

        let list_area = Rectangle::with_corners(
            bounds.top_left + Point::new(MARGIN_PX, MARGIN_PX),
            Point::new(
                bounds.top_left.x + bounds.size.width as i32 - MARGIN_PX - 1,
                bar_bounds.top_left.y - MARGIN_PX - 1,
            ),
        );

        Self {
            bounds,
            bar,
            presets_khz: Vec::new(),
            list_area,
            mute,
            list_dirty: true,
            dirty: true,
        }
    }

    /// Seed the list. Presets past [`MAX_PRESETS`] are ignored.
    pub fn with_presets(mut self, presets_khz: impl IntoIterator<Item = u32>) -> Self {
        for khz in presets_khz {
            if self.presets_khz.push(khz).is_err() {
                break;
            }
        }
        self.list_dirty = true;
        self
    }

    pub fn presets_khz(&self) -> &[u32] {
        &self.presets_khz
    }

    pub fn bar(&self) -> &ButtonBar<4> {
        &self.bar
    }

    pub fn is_editing(&self) -> bool {
        self.bar.button_state(EDIT) == ButtonState::On
    }

    fn set_editing(&mut self, editing: bool) {
        debug!("Memory: edit mode {}", if editing { "on" } else { "off" });
        self.bar.set_button_visible(DELETE, editing).ok();
    }

    fn delete_last(&mut self) {
        if let Some(khz) = self.presets_khz.pop() {
            info!("Memory: deleted preset {} kHz", khz);
            self.list_dirty = true;
        }
    }

    fn draw_list<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.list_area
            .into_styled(PrimitiveStyle::with_fill(COLOR_BACKGROUND))
            .draw(display)?;

        let title_size = TextSize::Large;
        let row_size = TextSize::Medium;
        let mut y = self.list_area.top_left.y;

        Text::with_baseline(
            "Memory",
            Point::new(self.list_area.top_left.x, y),
            MonoTextStyle::new(title_size.font(), COLOR_STATION),
            Baseline::Top,
        )
        .draw(display)?;
        y += title_size.line_height() as i32 + ROW_GAP_PX;

        let row_style = MonoTextStyle::new(row_size.font(), WHITE);
        let mut clipped = display.clipped(&self.list_area);
        for (slot, khz) in self.presets_khz.iter().enumerate() {
            let mut line = heapless::String::<24>::new();
            write!(line, "{}. {:>3}.{:02} MHz", slot + 1, khz / 1000, (khz % 1000) / 10).ok();

            Text::with_baseline(
                &line,
                Point::new(self.list_area.top_left.x, y),
                row_style,
                Baseline::Top,
            )
            .draw(&mut clipped)?;
            y += row_size.line_height() as i32 + ROW_GAP_PX;
        }
        Ok(())
    }
}

impl Screen for MemoryScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Memory
    }

    fn title(&self) -> &str {
        "Memory"
    }

    fn on_activate(&mut self) {
        self.dirty = true;
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        match self.bar.handle_touch(event) {
            TouchResult::Action(Action::Custom(ACTION_EDIT_ON)) => {
                self.set_editing(true);
                None
            }
            TouchResult::Action(Action::Custom(ACTION_EDIT_OFF)) => {
                self.set_editing(false);
                None
            }
            TouchResult::Action(Action::Custom(ACTION_DELETE)) => {
                self.delete_last();
                None
            }
            TouchResult::Action(action) => Some(action),
            TouchResult::Handled | TouchResult::NotHandled => None,
        }
    }

    fn update<T: Tuner>(&mut self, _now: Instant, _radio: &mut T) {
        let wanted = if self.mute.is_muted() {
            ButtonState::On
        } else {
            ButtonState::Off
        };
        if self.bar.button_state(MUTE) != wanted {
            self.bar.set_button_state(MUTE, wanted).ok();
        }
    }

    fn draw_screen<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        if self.dirty {
            self.bounds
                .into_styled(PrimitiveStyle::with_fill(COLOR_BACKGROUND))
                .draw(display)?;
            Drawable::mark_dirty(&mut self.bar);
            self.list_dirty = true;
        }

        if self.list_dirty {
            self.draw_list(display)?;
            self.list_dirty = false;
        }
        if Drawable::is_dirty(&self.bar) {
            self.bar.draw(display)?;
            Drawable::mark_clean(&mut self.bar);
        }
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.list_dirty || Drawable::is_dirty(&self.bar)
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
