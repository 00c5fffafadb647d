// src/ui/core.rs
//! Core UI traits and types for the radiodeck UI

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::radio::SeekDirection;

/// Represents a 2D touch point on the display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// Touch events delivered by the input collaborator (touch panel or encoder click)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    /// Initial touch press at a point
    Press(TouchPoint),
    /// Touch lifted at a point
    Release(TouchPoint),
    /// Touch drag to a new point
    Drag(TouchPoint),
}

impl TouchEvent {
    pub fn point(&self) -> TouchPoint {
        match *self {
            TouchEvent::Press(p) | TouchEvent::Release(p) | TouchEvent::Drag(p) => p,
        }
    }
}

/// Result from handling a touch event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchResult {
    /// Event was handled by this element
    Handled,
    /// Event was not handled, pass to next element
    NotHandled,
    /// Event triggered an action
    Action(Action),
}

/// Domain actions that button handlers hand back to the screen host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Switch the active screen
    SwitchScreen(ScreenId),
    /// Mute or unmute the receiver
    SetMute(bool),
    /// Enable or disable automatic gain control
    SetAgc(bool),
    /// Seek to the next station in a direction
    Seek(SeekDirection),
    /// Custom action with ID
    Custom(u16),
}

/// Screen identifier for navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Receiver,
    Memory,
}

impl ScreenId {
    pub const fn name(self) -> &'static str {
        match self {
            ScreenId::Receiver => "receiver",
            ScreenId::Memory => "memory",
        }
    }
}

/// Dirty region tracking for efficient rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirtyRegion {
    pub bounds: Rectangle,
    pub is_dirty: bool,
}

impl DirtyRegion {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            is_dirty: true,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.is_dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Expand this dirty region to include another region
    pub fn expand_to_include(&mut self, other: Rectangle) {
        if other.size.width == 0 || other.size.height == 0 {
            return;
        }

        if !self.is_dirty || self.bounds.size == Size::zero() {
            self.bounds = other;
            self.is_dirty = true;
            return;
        }

        let min_x = self.bounds.top_left.x.min(other.top_left.x);
        let min_y = self.bounds.top_left.y.min(other.top_left.y);

        let max_x = (self.bounds.top_left.x + self.bounds.size.width as i32)
            .max(other.top_left.x + other.size.width as i32);
        let max_y = (self.bounds.top_left.y + self.bounds.size.height as i32)
            .max(other.top_left.y + other.size.height as i32);

        self.bounds = Rectangle::new(
            Point::new(min_x, min_y),
            Size::new((max_x - min_x) as u32, (max_y - min_y) as u32),
        );
    }
}

/// Trait for any UI element that can be drawn
pub trait Drawable {
    /// Draw the element to the display within its bounds
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error>;

    /// Get the bounds of this drawable element
    fn bounds(&self) -> Rectangle;

    /// Check if this element needs to be redrawn
    fn is_dirty(&self) -> bool;

    /// Mark this element as clean (already drawn)
    fn mark_clean(&mut self);

    /// Mark this element as dirty (needs redraw)
    fn mark_dirty(&mut self);

    /// Get the dirty region for partial updates
    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.is_dirty() {
            Some(DirtyRegion::new(self.bounds()))
        } else {
            None
        }
    }
}

/// Trait for UI elements that respond to touch events
pub trait Touchable {
    /// Check if a point is within this element's bounds
    fn contains_point(&self, point: TouchPoint) -> bool;

    /// Handle a touch event, returns result indicating if handled and any action
    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult;
}
