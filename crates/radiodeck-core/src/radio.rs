//! Narrow interfaces onto the radio chip manager.
//!
//! The UI never talks to the tuner chip directly. Screens and the live data
//! display consume these traits, and the firmware (or the simulator's mock
//! tuner) implements them on top of the real driver.

/// Direction for a station seek
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekDirection {
    Up,
    Down,
}

/// Read side of the tuner: signal quality and decoded RDS payload.
///
/// All reads are cheap queries of state the driver already holds; none of them
/// may block.
pub trait RadioDataSource {
    /// Whether the tuner currently reports a receivable signal.
    fn is_signal_valid(&mut self) -> bool;

    /// Programme service name (RDS PS, up to 8 characters).
    fn station_name(&self) -> &str;

    /// Programme type label (RDS PTY), e.g. "Pop Music".
    fn program_type(&self) -> &str;

    /// Free-form radio text (RDS RT, up to 64 characters).
    fn radio_text(&self) -> &str;

    /// Clock time broadcast by the station (RDS CT), already formatted.
    fn clock_time(&self) -> &str;
}

/// Control side of the tuner used by screen button handlers.
pub trait RadioControl {
    fn is_muted(&self) -> bool;

    fn set_mute(&mut self, muted: bool);

    fn is_agc_enabled(&self) -> bool;

    fn set_agc(&mut self, enabled: bool);

    /// Start a seek. The frequency changes, so any cached RDS data is stale.
    fn seek(&mut self, direction: SeekDirection);
}

/// Everything a screen host needs from the tuner.
pub trait Tuner: RadioDataSource + RadioControl {}

impl<T: RadioDataSource + RadioControl> Tuner for T {}
