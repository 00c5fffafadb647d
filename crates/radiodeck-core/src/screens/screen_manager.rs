// src/screens/screen_manager.rs
//! Screen manager: owns the current screen and the shared receiver state.
//!
//! Input reaches the manager either directly (`handle_touch`) or as
//! [`DisplayRequest`]s queued on [`DISPLAY_CHANNEL`] by other tasks (touch
//! controller, tuner driver). The frame loop drains the channel, then calls
//! [`ScreenManager::tick`].

extern crate alloc;

use alloc::boxed::Box;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, info};

use crate::app_state::SharedRadioState;
use crate::config::RadioUiConfig;
use crate::radio::{RadioControl, Tuner};
use crate::screens::memory::{MAX_PRESETS, MemoryScreen};
use crate::screens::receiver::ReceiverScreen;
use crate::screens::screen::{Screen, ScreenWrapper};
use crate::ui::{Action, ScreenId, TouchEvent};

/// Channel capacity for display requests
pub const DISPLAY_REQUEST_CAPACITY: usize = 4;

/// Work for the screen manager queued from outside the frame loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayRequest {
    /// Touch (or encoder click) on the panel
    Touch(TouchEvent),
    /// Navigate to a specific screen
    SwitchScreen(ScreenId),
    /// The tuner changed frequency outside the UI; drop derived data
    ContextChanged,
    /// Force a full redraw of the current screen
    Redraw,
}

/// Global channel for display requests
pub static DISPLAY_CHANNEL: Channel<
    CriticalSectionRawMutex,
    DisplayRequest,
    DISPLAY_REQUEST_CAPACITY,
> = Channel::new();

pub type DisplayReceiver<'a> =
    Receiver<'a, CriticalSectionRawMutex, DisplayRequest, DISPLAY_REQUEST_CAPACITY>;

pub type DisplaySender<'a> =
    Sender<'a, CriticalSectionRawMutex, DisplayRequest, DISPLAY_REQUEST_CAPACITY>;

pub struct ScreenManager {
    current: ScreenWrapper,
    shared: SharedRadioState,
    presets_khz: heapless::Vec<u32, MAX_PRESETS>,
    config: RadioUiConfig,
    bounds: Rectangle,
}

impl ScreenManager {
    /// Start on the receiver screen, seeding shared state from the tuner.
    pub fn new(config: RadioUiConfig, bounds: Rectangle, radio: &impl RadioControl) -> Self {
        let shared = SharedRadioState::new(radio.is_muted());
        let mut manager = Self {
            current: ScreenWrapper::Receiver(Box::new(ReceiverScreen::new(
                bounds,
                &config,
                shared.mute_view(),
            ))),
            shared,
            presets_khz: heapless::Vec::new(),
            config,
            bounds,
        };
        manager.current.on_activate();
        manager
    }

    /// Station presets handed to the memory screen.
    pub fn with_presets(mut self, presets_khz: impl IntoIterator<Item = u32>) -> Self {
        self.presets_khz.clear();
        for khz in presets_khz {
            if self.presets_khz.push(khz).is_err() {
                break;
            }
        }
        self
    }

    pub fn presets_khz(&self) -> &[u32] {
        if let ScreenWrapper::Memory(screen) = &self.current {
            return screen.presets_khz();
        }
        &self.presets_khz
    }

    fn build(&self, id: ScreenId) -> ScreenWrapper {
        let mute = self.shared.mute_view();
        match id {
            ScreenId::Receiver => ScreenWrapper::Receiver(Box::new(ReceiverScreen::new(
                self.bounds,
                &self.config,
                mute,
            ))),
            ScreenId::Memory => ScreenWrapper::Memory(Box::new(
                MemoryScreen::new(self.bounds, &self.config, mute)
                    .with_presets(self.presets_khz.iter().copied()),
            )),
        }
    }

    pub fn current_screen_id(&self) -> ScreenId {
        self.current.id()
    }

    pub fn current_screen(&self) -> &ScreenWrapper {
        &self.current
    }

    pub fn shared_state(&self) -> &SharedRadioState {
        &self.shared
    }

    /// Replace the current screen. Navigating to the current screen is a no-op.
    pub fn navigate_to(&mut self, id: ScreenId) {
        if self.current.id() == id {
            return;
        }
        info!("Switching to {} screen", id.name());
        self.current.on_deactivate();
        if let ScreenWrapper::Memory(screen) = &self.current {
            // Keep edits made on the memory screen
            self.presets_khz.clear();
            self.presets_khz.extend_from_slice(screen.presets_khz()).ok();
        }
        self.current = self.build(id);
        self.current.on_activate();
    }

    pub fn handle_touch(&mut self, event: TouchEvent, radio: &mut impl RadioControl) {
        if let Some(action) = self.current.handle_touch(event) {
            self.apply_action(action, radio);
        }
    }

    /// Carry out an action a screen handed back.
    pub fn apply_action(&mut self, action: Action, radio: &mut impl RadioControl) {
        debug!("Applying {:?}", action);
        match action {
            Action::SwitchScreen(id) => self.navigate_to(id),
            Action::SetMute(muted) => {
                radio.set_mute(muted);
                self.shared.set_muted(muted);
            }
            Action::SetAgc(enabled) => radio.set_agc(enabled),
            Action::Seek(direction) => {
                radio.seek(direction);
                self.on_context_change();
            }
            Action::Custom(code) => debug!("Unhandled custom action {:#06x}", code),
        }
    }

    /// The tuner is now on a different frequency.
    pub fn on_context_change(&mut self) {
        self.current.on_context_change();
    }

    pub fn process_request(&mut self, request: DisplayRequest, radio: &mut impl RadioControl) {
        debug!("Processing request: {:?}", request);
        match request {
            DisplayRequest::Touch(event) => self.handle_touch(event, radio),
            DisplayRequest::SwitchScreen(id) => self.navigate_to(id),
            DisplayRequest::ContextChanged => self.on_context_change(),
            DisplayRequest::Redraw => self.current.mark_dirty(),
        }
    }

    /// Handle every queued request without waiting. Returns how many ran.
    pub fn drain_requests(
        &mut self,
        receiver: &DisplayReceiver<'_>,
        radio: &mut impl RadioControl,
    ) -> usize {
        let mut handled = 0;
        while let Ok(request) = receiver.try_receive() {
            self.process_request(request, radio);
            handled += 1;
        }
        handled
    }

    /// Run one frame: update the current screen, then draw it if anything changed.
    ///
    /// Returns whether anything was drawn.
    pub fn tick<T, D>(&mut self, now: Instant, radio: &mut T, display: &mut D) -> Result<bool, D::Error>
    where
        T: Tuner,
        D: DrawTarget<Color = Rgb565>,
    {
        self.current.update(now, radio);
        if !self.current.is_dirty() {
            return Ok(false);
        }

        self.current.draw_screen(display)?;
        self.current.mark_clean();
        Ok(true)
    }
}

/// Helper to get a display request sender
pub fn display_sender() -> DisplaySender<'static> {
    DISPLAY_CHANNEL.sender()
}

/// Helper to get a display request receiver
pub fn display_receiver() -> DisplayReceiver<'static> {
    DISPLAY_CHANNEL.receiver()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::SeekDirection;
    use crate::screens::receiver;
    use crate::test_support::{FakeTuner, RecordingDisplay};
    use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, Drawable, TouchPoint};

    fn manager(tuner: &FakeTuner) -> ScreenManager {
        ScreenManager::new(
            RadioUiConfig::default(),
            Rectangle::new(Point::zero(), Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX)),
            tuner,
        )
    }

    fn receiver_button(manager: &ScreenManager, id: u8) -> TouchPoint {
        let ScreenWrapper::Receiver(screen) = manager.current_screen() else {
            panic!("receiver screen expected");
        };
        let center = screen.bar().button(id).unwrap().bounds().center();
        TouchPoint::new(center.x as u16, center.y as u16)
    }

    fn tap(manager: &mut ScreenManager, point: TouchPoint, tuner: &mut FakeTuner) {
        manager.handle_touch(TouchEvent::Press(point), tuner);
        manager.handle_touch(TouchEvent::Release(point), tuner);
    }

    #[test]
    fn starts_on_receiver_with_tuner_state() {
        let mut tuner = FakeTuner::default();
        tuner.muted = true;
        let manager = manager(&tuner);

        assert_eq!(manager.current_screen_id(), ScreenId::Receiver);
        assert!(manager.shared_state().is_muted());
    }

    #[test]
    fn mute_toggle_reaches_tuner_and_shared_state() {
        let mut tuner = FakeTuner::with_station("ABC", "Hello");
        let mut manager = manager(&tuner);
        let mute = receiver_button(&manager, receiver::MUTE);

        tap(&mut manager, mute, &mut tuner);

        assert!(tuner.muted);
        assert!(manager.shared_state().is_muted());
    }

    #[test]
    fn agc_button_follows_the_tuner() {
        let mut tuner = FakeTuner::with_station("ABC", "Hello");
        tuner.agc = false;
        let mut manager = manager(&tuner);
        let mut display = RecordingDisplay::new();
        let agc = receiver_button(&manager, receiver::AGC);

        tap(&mut manager, agc, &mut tuner);
        assert!(tuner.agc);

        // The chip can refuse or change AGC behind the UI's back
        tuner.agc = false;
        manager.tick(Instant::from_millis(0), &mut tuner, &mut display).unwrap();

        let ScreenWrapper::Receiver(screen) = manager.current_screen() else {
            panic!("receiver screen expected");
        };
        assert_eq!(
            screen.bar().button_state(receiver::AGC),
            crate::ui::ButtonState::Off
        );
    }

    #[test]
    fn mute_survives_screen_switch() {
        let mut tuner = FakeTuner::with_station("ABC", "Hello");
        let mut manager = manager(&tuner);
        let mut display = RecordingDisplay::new();

        manager.apply_action(Action::SetMute(true), &mut tuner);
        manager.navigate_to(ScreenId::Memory);
        manager.tick(Instant::from_millis(0), &mut tuner, &mut display).unwrap();

        let ScreenWrapper::Memory(screen) = manager.current_screen() else {
            panic!("memory screen expected");
        };
        assert_eq!(
            screen.bar().button_state(crate::screens::memory::MUTE),
            crate::ui::ButtonState::On
        );
    }

    #[test]
    fn memo_button_opens_memory_screen() {
        let mut tuner = FakeTuner::with_station("ABC", "Hello");
        let mut manager = manager(&tuner);
        let memo = receiver_button(&manager, receiver::MEMO);

        tap(&mut manager, memo, &mut tuner);

        assert_eq!(manager.current_screen_id(), ScreenId::Memory);
    }

    #[test]
    fn preset_edits_survive_leaving_the_memory_screen() {
        let mut tuner = FakeTuner::default();
        let mut manager = manager(&tuner).with_presets([87_600, 98_500]);

        manager.navigate_to(ScreenId::Memory);
        assert_eq!(manager.presets_khz(), &[87_600, 98_500]);

        for id in [crate::screens::memory::EDIT, crate::screens::memory::DELETE] {
            let ScreenWrapper::Memory(screen) = manager.current_screen() else {
                panic!("memory screen expected");
            };
            let center = screen.bar().button(id).unwrap().bounds().center();
            tap(&mut manager, TouchPoint::new(center.x as u16, center.y as u16), &mut tuner);
        }

        manager.navigate_to(ScreenId::Receiver);
        assert_eq!(manager.presets_khz(), &[87_600]);
    }

    #[test]
    fn seek_invalidates_live_data() {
        let mut tuner = FakeTuner::with_station("ABC", "Hello");
        let mut manager = manager(&tuner);
        let mut display = RecordingDisplay::new();
        manager.tick(Instant::from_millis(0), &mut tuner, &mut display).unwrap();

        manager.apply_action(Action::Seek(SeekDirection::Up), &mut tuner);

        assert_eq!(tuner.seeks, [SeekDirection::Up]);
        let ScreenWrapper::Receiver(screen) = manager.current_screen() else {
            panic!("receiver screen expected");
        };
        assert!(!screen.live().has_valid_data());
    }

    #[test]
    fn idle_frame_draws_nothing() {
        let mut tuner = FakeTuner::with_station("ABC", "Hello");
        let mut manager = manager(&tuner);
        let mut display = RecordingDisplay::new();

        assert!(manager.tick(Instant::from_millis(0), &mut tuner, &mut display).unwrap());
        display.reset_counts();

        assert!(!manager.tick(Instant::from_millis(250), &mut tuner, &mut display).unwrap());
        assert_eq!(display.total_calls(), 0);
    }

    #[test]
    fn queued_requests_are_drained_in_order() {
        let channel: Channel<CriticalSectionRawMutex, DisplayRequest, DISPLAY_REQUEST_CAPACITY> =
            Channel::new();
        let mut tuner = FakeTuner::with_station("ABC", "Hello");
        let mut manager = manager(&tuner);

        channel.try_send(DisplayRequest::SwitchScreen(ScreenId::Memory)).unwrap();
        channel.try_send(DisplayRequest::Redraw).unwrap();
        channel.try_send(DisplayRequest::SwitchScreen(ScreenId::Receiver)).unwrap();

        let handled = manager.drain_requests(&channel.receiver(), &mut tuner);

        assert_eq!(handled, 3);
        assert_eq!(manager.current_screen_id(), ScreenId::Receiver);
        assert_eq!(manager.drain_requests(&channel.receiver(), &mut tuner), 0);
    }

    #[test]
    fn context_change_request_clears_live_data() {
        let channel: Channel<CriticalSectionRawMutex, DisplayRequest, DISPLAY_REQUEST_CAPACITY> =
            Channel::new();
        let mut tuner = FakeTuner::with_station("ABC", "Hello");
        let mut manager = manager(&tuner);
        let mut display = RecordingDisplay::new();
        manager.tick(Instant::from_millis(0), &mut tuner, &mut display).unwrap();

        channel.try_send(DisplayRequest::ContextChanged).unwrap();
        manager.drain_requests(&channel.receiver(), &mut tuner);

        let ScreenWrapper::Receiver(screen) = manager.current_screen() else {
            panic!("receiver screen expected");
        };
        assert!(!screen.live().has_valid_data());
    }
}
