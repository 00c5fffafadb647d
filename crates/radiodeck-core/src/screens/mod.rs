// src/screens/mod.rs
//! Full-display screens and the manager that switches between them

pub mod memory;
pub mod receiver;
pub mod screen;
pub mod screen_manager;

pub use memory::MemoryScreen;
pub use receiver::ReceiverScreen;
pub use screen::{Screen, ScreenWrapper};
pub use screen_manager::{
    DISPLAY_CHANNEL, DISPLAY_REQUEST_CAPACITY, DisplayReceiver, DisplayRequest, DisplaySender,
    ScreenManager, display_receiver, display_sender,
};
