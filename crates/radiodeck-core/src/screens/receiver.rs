// src/screens/receiver.rs
//! Main tuner screen: live RDS data on the left, control column on the right.

use embassy_time::Instant;
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::app_state::MuteView;
use crate::config::RadioUiConfig;
use crate::radio::{SeekDirection, Tuner};
use crate::screens::screen::Screen;
use crate::ui::colors::COLOR_BACKGROUND;
use crate::ui::{
    Action, Axis, ButtonBar, ButtonEventKind, ButtonSpec, ButtonState, Drawable, LiveDataAreas,
    LiveDataDisplay, ScreenId, TouchEvent, TouchResult, Touchable,
};

pub const MUTE: u8 = 10;
pub const AGC: u8 = 11;
pub const SEEK_UP: u8 = 12;
pub const SEEK_DOWN: u8 = 13;
pub const MEMO: u8 = 14;
pub const SCAN: u8 = 15;
pub const RDS: u8 = 16;

const MARGIN_PX: i32 = 8;
const BAR_WIDTH_PX: u32 = 65;
/// Column height; with the default 32px items and 4px gap five buttons fit
const BAR_HEIGHT_PX: u32 = 200;

pub struct ReceiverScreen {
    bounds: Rectangle,
    bar: ButtonBar<8>,
    live: LiveDataDisplay,
    mute: MuteView,
    dirty: bool,
}

impl ReceiverScreen {
    pub fn new(bounds: Rectangle, config: &RadioUiConfig, mute: MuteView) -> Self {
        let bar_origin = Point::new(
            bounds.top_left.x + bounds.size.width as i32 - BAR_WIDTH_PX as i32 - MARGIN_PX / 2,
            bounds.top_left.y + MARGIN_PX * 2,
        );
        let bar_bounds = Rectangle::new(bar_origin, Size::new(BAR_WIDTH_PX, BAR_HEIGHT_PX));

        let initial_mute = if mute.is_muted() {
            ButtonState::On
        } else {
            ButtonState::Off
        };
        let bar = ButtonBar::from_config(
            bar_bounds,
            [
                ButtonSpec::toggleable(MUTE, "Mute")
                    .with_state(initial_mute)
                    .with_handler(|event| Some(Action::SetMute(event.state == ButtonState::On))),
                ButtonSpec::toggleable(AGC, "AGC")
                    .with_handler(|event| Some(Action::SetAgc(event.state == ButtonState::On))),
                ButtonSpec::pushable(SEEK_UP, "Seek+").with_handler(|event| {
                    (event.kind == ButtonEventKind::Pressed)
                        .then_some(Action::Seek(SeekDirection::Up))
                }),
                ButtonSpec::pushable(SEEK_DOWN, "Seek-").with_handler(|event| {
                    (event.kind == ButtonEventKind::Pressed)
                        .then_some(Action::Seek(SeekDirection::Down))
                }),
                ButtonSpec::pushable(MEMO, "Memo").with_handler(|event| {
                    (event.kind == ButtonEventKind::Released)
                        .then_some(Action::SwitchScreen(ScreenId::Memory))
                }),
                ButtonSpec::pushable(SCAN, "Scan"),
                ButtonSpec::pushable(RDS, "RDS"),
            ],
            &config.button_bar,
            Axis::Vertical,
        );

        let live_bounds = Rectangle::with_corners(
            bounds.top_left + Point::new(MARGIN_PX, MARGIN_PX * 2),
            Point::new(bar_origin.x - MARGIN_PX, bar_origin.y + BAR_HEIGHT_PX as i32 - 1),
        );
        let live = LiveDataDisplay::new(LiveDataAreas::stacked(live_bounds), config.live_data);

        Self {
            bounds,
            bar,
            live,
            mute,
            dirty: true,
        }
    }

    pub fn bar(&self) -> &ButtonBar<8> {
        &self.bar
    }

    pub fn live(&self) -> &LiveDataDisplay {
        &self.live
    }

    fn sync_toggle(&mut self, id: u8, on: bool) {
        let wanted = if on { ButtonState::On } else { ButtonState::Off };
        let current = self.bar.button_state(id);
        if current != ButtonState::Disabled && current != wanted {
            self.bar.set_button_state(id, wanted).ok();
        }
    }
}

impl Screen for ReceiverScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Receiver
    }

    fn title(&self) -> &str {
        "Receiver"
    }

    fn on_activate(&mut self) {
        self.dirty = true;
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        match self.bar.handle_touch(event) {
            TouchResult::Action(action) => Some(action),
            TouchResult::Handled | TouchResult::NotHandled => None,
        }
    }

    fn update<T: Tuner>(&mut self, now: Instant, radio: &mut T) {
        self.live.poll(now, radio);
        self.sync_toggle(MUTE, self.mute.is_muted());
        self.sync_toggle(AGC, radio.is_agc_enabled());
    }

    fn on_context_change(&mut self) {
        self.live.invalidate_for_context_change();
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
            self.live.mark_dirty();
        }

        if Drawable::is_dirty(&self.bar) {
            self.bar.draw(display)?;
            Drawable::mark_clean(&mut self.bar);
        }
        self.live.render(display)?;
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty || Drawable::is_dirty(&self.bar) || self.live.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
