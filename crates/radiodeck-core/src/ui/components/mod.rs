// src/ui/components/mod.rs
//! Reusable widgets: bar buttons, the button bar and the live data display

pub mod button;
pub mod button_bar;
pub mod live_data;
pub mod scroll_buffer;
pub mod text;

pub use button::{
    BarButton, ButtonEvent, ButtonEventKind, ButtonHandler, ButtonKind, ButtonSpec, ButtonState,
};
pub use button_bar::{Axis, ButtonBar, ButtonBarError};
pub use live_data::{
    Field, FieldMask, LiveDataAreas, LiveDataColors, LiveDataDisplay, PollOutcome, SignalState,
};
pub use scroll_buffer::ScrollBuffer;
pub use text::TextSize;
