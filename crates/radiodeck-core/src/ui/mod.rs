// src/ui/mod.rs
//! radiodeck UI - widgets for a small tuner display
//!
//! This module provides:
//! - Core traits for drawable and touchable elements
//! - Bar buttons (pushable / toggleable) addressed by id
//! - The button bar container with automatic re-flow
//! - The live RDS data display with diff-based redraw and marquee scrolling

pub mod colors;
pub mod components;
pub mod core;

pub use colors::ButtonPalette;
pub use components::{
    Axis, BarButton, ButtonBar, ButtonBarError, ButtonEvent, ButtonEventKind, ButtonHandler,
    ButtonKind, ButtonSpec, ButtonState, Field, FieldMask, LiveDataAreas, LiveDataColors,
    LiveDataDisplay, PollOutcome, ScrollBuffer, SignalState, TextSize,
};
pub use self::core::{
    Action, DirtyRegion, Drawable, ScreenId, TouchEvent, TouchPoint, TouchResult, Touchable,
};

/// Display width in pixels
pub const DISPLAY_WIDTH_PX: u32 = 320;

/// Display height in pixels
pub const DISPLAY_HEIGHT_PX: u32 = 240;
