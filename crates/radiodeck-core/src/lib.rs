//! Hardware-independent core library for radiodeck
//!
//! This crate contains the platform-agnostic part of the receiver's front
//! panel: the button bar and live RDS widgets, the screens built from them,
//! the screen manager, UI configuration and the narrow tuner interfaces.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod app_state;
pub mod config;
pub mod radio;
pub mod screens;
pub mod ui;

#[cfg(test)]
mod test_support;
