// src/screens/screen.rs
//! Core screen abstraction and the enum wrapper the manager stores.
//!
//! # Screen Trait
//!
//! [`Screen`] is the lifecycle, rendering and interaction contract for every
//! full-display view. Implementors own their widgets, handle their own touch
//! input and track their own dirtiness.
//!
//! # ScreenWrapper
//!
//! Several methods are generic (over the tuner and the draw target), so
//! `dyn Screen` is not an option. [`ScreenWrapper`] is a concrete enum that
//! delegates every call to the boxed screen inside.

extern crate alloc;

use alloc::boxed::Box;

use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::radio::Tuner;
use crate::screens::memory::MemoryScreen;
use crate::screens::receiver::ReceiverScreen;
use crate::ui::core::{Action, ScreenId, TouchEvent};

/// Trait that all screens implement.
///
/// The [`ScreenManager`](super::ScreenManager) calls these in a fixed order:
///
/// 1. **`on_activate`**: once, when the screen becomes current.
/// 2. **`handle_touch`**: for each touch aimed at the screen.
/// 3. **`update`**: once per frame, with the frame time and the tuner.
/// 4. **`draw_screen`**: when `is_dirty()` is true, followed by `mark_clean`.
/// 5. **`on_deactivate`**: once, before the screen is dropped.
pub trait Screen {
    fn id(&self) -> ScreenId;

    /// Human-readable title, used in logs.
    fn title(&self) -> &str;

    fn on_activate(&mut self) {}

    fn on_deactivate(&mut self) {}

    /// Process a touch event and optionally return an [`Action`] for the manager.
    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action>;

    /// Advance per-frame state: poll live data, sync button states.
    fn update<T: Tuner>(&mut self, now: Instant, radio: &mut T);

    /// The receiving context changed (new frequency); drop anything derived from it.
    fn on_context_change(&mut self) {}

    /// Draw whatever is dirty.
    fn draw_screen<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D)
    -> Result<(), D::Error>;

    fn bounds(&self) -> Rectangle;

    fn is_dirty(&self) -> bool;

    fn mark_clean(&mut self);

    /// Force a full redraw on the next frame.
    fn mark_dirty(&mut self);
}

/// One of the concrete screens.
///
/// Each variant is boxed to keep the enum small whichever screen is current.
pub enum ScreenWrapper {
    Receiver(Box<ReceiverScreen>),
    Memory(Box<MemoryScreen>),
}

impl Screen for ScreenWrapper {
    fn id(&self) -> ScreenId {
        match self {
            ScreenWrapper::Receiver(screen) => screen.id(),
            ScreenWrapper::Memory(screen) => screen.id(),
        }
    }

    fn title(&self) -> &str {
        match self {
            ScreenWrapper::Receiver(screen) => screen.title(),
            ScreenWrapper::Memory(screen) => screen.title(),
        }
    }

    fn on_activate(&mut self) {
        match self {
            ScreenWrapper::Receiver(screen) => screen.on_activate(),
            ScreenWrapper::Memory(screen) => screen.on_activate(),
        }
    }

    fn on_deactivate(&mut self) {
        match self {
            ScreenWrapper::Receiver(screen) => screen.on_deactivate(),
            ScreenWrapper::Memory(screen) => screen.on_deactivate(),
        }
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        match self {
            ScreenWrapper::Receiver(screen) => screen.handle_touch(event),
            ScreenWrapper::Memory(screen) => screen.handle_touch(event),
        }
    }

    fn update<T: Tuner>(&mut self, now: Instant, radio: &mut T) {
        match self {
            ScreenWrapper::Receiver(screen) => screen.update(now, radio),
            ScreenWrapper::Memory(screen) => screen.update(now, radio),
        }
    }

    fn on_context_change(&mut self) {
        match self {
            ScreenWrapper::Receiver(screen) => screen.on_context_change(),
            ScreenWrapper::Memory(screen) => screen.on_context_change(),
        }
    }

    fn draw_screen<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        match self {
            ScreenWrapper::Receiver(screen) => screen.draw_screen(display),
            ScreenWrapper::Memory(screen) => screen.draw_screen(display),
        }
    }

    fn bounds(&self) -> Rectangle {
        match self {
            ScreenWrapper::Receiver(screen) => Screen::bounds(screen.as_ref()),
            ScreenWrapper::Memory(screen) => Screen::bounds(screen.as_ref()),
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            ScreenWrapper::Receiver(screen) => Screen::is_dirty(screen.as_ref()),
            ScreenWrapper::Memory(screen) => Screen::is_dirty(screen.as_ref()),
        }
    }

    fn mark_clean(&mut self) {
        match self {
            ScreenWrapper::Receiver(screen) => Screen::mark_clean(screen.as_mut()),
            ScreenWrapper::Memory(screen) => Screen::mark_clean(screen.as_mut()),
        }
    }

    fn mark_dirty(&mut self) {
        match self {
            ScreenWrapper::Receiver(screen) => Screen::mark_dirty(screen.as_mut()),
            ScreenWrapper::Memory(screen) => Screen::mark_dirty(screen.as_mut()),
        }
    }
}
