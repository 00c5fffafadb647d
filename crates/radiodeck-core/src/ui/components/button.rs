// src/ui/components/button.rs
//! Bar button: an identifiable pushable or toggleable control

extern crate alloc;

use alloc::boxed::Box;
use core::fmt;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment as TextAlignment, Text};

use crate::ui::colors::ButtonPalette;
use crate::ui::core::{Action, DirtyRegion, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};

/// Maximum label length in bytes
pub const MAX_LABEL_LEN: usize = 16;

/// How a button reacts to a press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// On while held, back to Off on release
    Pushable,
    /// Each press flips between Off and On
    Toggleable,
}

/// Logical button state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Off,
    On,
    Disabled,
}

/// What happened to the button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEventKind {
    Pressed,
    Released,
    Toggled,
}

/// Event handed to a button's handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    /// Id of the button that fired
    pub id: u8,
    pub kind: ButtonEventKind,
    /// State of the button after the event was applied
    pub state: ButtonState,
}

/// Per-button event handler. The returned action bubbles up to the screen host.
pub type ButtonHandler = Box<dyn FnMut(&ButtonEvent) -> Option<Action>>;

/// Caller-supplied description of a button, consumed when the bar creates it
pub struct ButtonSpec {
    pub id: u8,
    pub label: heapless::String<MAX_LABEL_LEN>,
    pub kind: ButtonKind,
    pub initial_state: ButtonState,
    pub on_event: Option<ButtonHandler>,
}

impl ButtonSpec {
    /// Labels longer than [`MAX_LABEL_LEN`] are truncated at a char boundary.
    pub fn new(id: u8, label: &str, kind: ButtonKind) -> Self {
        let mut label_string = heapless::String::new();
        for ch in label.chars() {
            if label_string.push(ch).is_err() {
                break;
            }
        }

        Self {
            id,
            label: label_string,
            kind,
            initial_state: ButtonState::Off,
            on_event: None,
        }
    }

    pub fn pushable(id: u8, label: &str) -> Self {
        Self::new(id, label, ButtonKind::Pushable)
    }

    pub fn toggleable(id: u8, label: &str) -> Self {
        Self::new(id, label, ButtonKind::Toggleable)
    }

    pub fn with_state(mut self, state: ButtonState) -> Self {
        self.initial_state = state;
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&ButtonEvent) -> Option<Action> + 'static,
    {
        self.on_event = Some(Box::new(handler));
        self
    }
}

impl fmt::Debug for ButtonSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonSpec")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("initial_state", &self.initial_state)
            .field("has_handler", &self.on_event.is_some())
            .finish()
    }
}

/// A button owned by a [`ButtonBar`](super::button_bar::ButtonBar)
///
/// The bar decides where the button sits; the button only knows its own
/// rectangle, state and handler. Hidden buttons keep their slot in the bar's
/// order but are collapsed to a zero-size rectangle and ignore touches.
pub struct BarButton {
    id: u8,
    bounds: Rectangle,
    label: heapless::String<MAX_LABEL_LEN>,
    kind: ButtonKind,
    state: ButtonState,
    /// Highlight: the finger is down over the button
    pressed: bool,
    /// A press landed on this button and its release is still pending
    captured: bool,
    visible: bool,
    state_before_hide: ButtonState,
    handler: Option<ButtonHandler>,
    palette: ButtonPalette,
    border_radius: u32,
    dirty: bool,
}

impl BarButton {
    pub fn from_spec(spec: ButtonSpec, bounds: Rectangle) -> Self {
        Self {
            id: spec.id,
            bounds,
            label: spec.label,
            kind: spec.kind,
            state: spec.initial_state,
            pressed: false,
            captured: false,
            visible: true,
            state_before_hide: spec.initial_state,
            handler: spec.on_event,
            palette: ButtonPalette::default(),
            border_radius: 6,
            dirty: true,
        }
    }

    pub fn with_palette(mut self, palette: ButtonPalette) -> Self {
        self.palette = palette;
        self.dirty = true;
        self
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_enabled(&self) -> bool {
        self.state != ButtonState::Disabled
    }

    pub fn set_palette(&mut self, palette: ButtonPalette) {
        if self.palette != palette {
            self.palette = palette;
            self.dirty = true;
        }
    }

    /// Set the button's bounds (for re-flow by the owning bar)
    pub fn set_bounds(&mut self, bounds: Rectangle) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.dirty = true;
        }
    }

    pub fn set_state(&mut self, state: ButtonState) {
        if !self.visible {
            // Applied when the button is shown again
            self.state_before_hide = state;
            return;
        }
        if self.state != state {
            self.state = state;
            if state == ButtonState::Disabled {
                self.pressed = false;
                self.captured = false;
            }
            self.dirty = true;
        }
    }

    /// Collapse the button and disable it, remembering the state to restore.
    pub(crate) fn hide(&mut self, collapsed_at: Point) {
        if self.visible {
            self.state_before_hide = self.state;
            self.state = ButtonState::Disabled;
            self.pressed = false;
            self.captured = false;
            self.visible = false;
        }
        self.set_bounds(Rectangle::new(collapsed_at, Size::zero()));
    }

    /// Restore a hidden button. Its position is assigned by the next re-flow.
    pub(crate) fn show(&mut self) {
        if !self.visible {
            self.visible = true;
            self.state = self.state_before_hide;
            self.dirty = true;
        }
    }

    fn fire(&mut self, kind: ButtonEventKind) -> Option<Action> {
        let event = ButtonEvent {
            id: self.id,
            kind,
            state: self.state,
        };
        self.handler.as_mut().and_then(|handler| handler(&event))
    }

    fn result_of(action: Option<Action>) -> TouchResult {
        match action {
            Some(action) => TouchResult::Action(action),
            None => TouchResult::Handled,
        }
    }

    fn fill_color(&self) -> Rgb565 {
        if self.pressed {
            return self.palette.pressed;
        }
        match self.state {
            ButtonState::Off => self.palette.off,
            ButtonState::On => self.palette.on,
            ButtonState::Disabled => self.palette.disabled,
        }
    }

    fn label_color(&self) -> Rgb565 {
        match self.state {
            ButtonState::Disabled => self.palette.label_disabled,
            _ => self.palette.label,
        }
    }
}

impl Drawable for BarButton {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if !self.visible {
            return Ok(());
        }

        let corner_radius = Size::new(self.border_radius, self.border_radius);
        RoundedRectangle::with_equal_corners(self.bounds, corner_radius)
            .into_styled(PrimitiveStyle::with_fill(self.fill_color()))
            .draw(display)?;

        let text_style = MonoTextStyle::new(&FONT_6X10, self.label_color());
        // Text anchors on the baseline; drop it by a third of the glyph height
        let anchor = self.bounds.center() + Point::new(0, FONT_6X10.character_size.height as i32 / 3);

        Text::with_alignment(&self.label, anchor, text_style, TextAlignment::Center)
            .draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.dirty && self.visible {
            Some(DirtyRegion::new(self.bounds))
        } else {
            None
        }
    }
}

impl Touchable for BarButton {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.visible && self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        if !self.visible || !self.is_enabled() {
            return TouchResult::NotHandled;
        }

        match event {
            TouchEvent::Press(point) if self.contains_point(point) => {
                self.pressed = true;
                self.captured = true;
                self.dirty = true;
                match self.kind {
                    ButtonKind::Pushable => {
                        self.state = ButtonState::On;
                        Self::result_of(self.fire(ButtonEventKind::Pressed))
                    }
                    ButtonKind::Toggleable => {
                        self.state = match self.state {
                            ButtonState::On => ButtonState::Off,
                            _ => ButtonState::On,
                        };
                        Self::result_of(self.fire(ButtonEventKind::Toggled))
                    }
                }
            }
            TouchEvent::Release(point) if self.captured => {
                self.captured = false;
                self.pressed = false;
                self.dirty = true;
                match self.kind {
                    ButtonKind::Pushable => {
                        self.state = ButtonState::Off;
                        if self.contains_point(point) {
                            Self::result_of(self.fire(ButtonEventKind::Released))
                        } else {
                            // Lifted off the button: cancelled, no Released
                            TouchResult::Handled
                        }
                    }
                    ButtonKind::Toggleable => TouchResult::Handled,
                }
            }
            TouchEvent::Drag(point) if self.captured => {
                // Highlight follows the finger; state is only settled on release
                let over = self.contains_point(point);
                if self.pressed != over {
                    self.pressed = over;
                    self.dirty = true;
                }
                TouchResult::Handled
            }
            _ => TouchResult::NotHandled,
        }
    }
}
