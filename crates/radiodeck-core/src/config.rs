//! UI tuning parameters.
//!
//! The firmware keeps these as a postcard blob next to its other settings;
//! everything falls back to the defaults below when no blob is present.

extern crate alloc;

use alloc::vec::Vec;

use embassy_time::Duration;
use embedded_graphics::prelude::Size;
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config blob could not be decoded: {0}")]
    Decode(postcard::Error),
    #[error("config could not be encoded: {0}")]
    Encode(postcard::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RadioUiConfig {
    pub live_data: LiveDataConfig,
    pub button_bar: ButtonBarConfig,
}

impl RadioUiConfig {
    /// Decode and validate a stored config blob.
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_postcard(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(ConfigError::Encode)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.live_data.validate()?;
        self.button_bar.validate()
    }
}

/// Timing of the live RDS display
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveDataConfig {
    /// Minimum time between two reads of the tuner's RDS state
    pub poll_interval_ms: u32,
    /// Time between two marquee steps of the radio text
    pub scroll_interval_ms: u32,
    /// Pixels the radio text moves per marquee step
    pub scroll_step_px: u32,
    /// How long the last good data stays on screen after the signal drops
    pub staleness_ms: u32,
}

impl Default for LiveDataConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 250,
            scroll_interval_ms: 60,
            scroll_step_px: 2,
            staleness_ms: 3000,
        }
    }
}

impl LiveDataConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.into())
    }

    pub fn scroll_interval(&self) -> Duration {
        Duration::from_millis(self.scroll_interval_ms.into())
    }

    pub fn staleness(&self) -> Duration {
        Duration::from_millis(self.staleness_ms.into())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scroll_step_px == 0 {
            return Err(ConfigError::Invalid("scroll step must be at least one pixel"));
        }
        if self.scroll_interval_ms >= self.poll_interval_ms {
            return Err(ConfigError::Invalid(
                "scroll interval must be shorter than the poll interval",
            ));
        }
        Ok(())
    }
}

/// Geometry shared by every button bar
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonBarConfig {
    pub item_width: u32,
    pub item_height: u32,
    pub gap: u32,
}

impl Default for ButtonBarConfig {
    fn default() -> Self {
        Self {
            item_width: 60,
            item_height: 32,
            gap: 4,
        }
    }
}

impl ButtonBarConfig {
    pub fn item_size(&self) -> Size {
        Size::new(self.item_width, self.item_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_width == 0 || self.item_height == 0 {
            return Err(ConfigError::Invalid("button items must have a non-zero size"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(RadioUiConfig::default().validate().is_ok());
    }

    #[test]
    fn stored_blob_is_restored() {
        let mut config = RadioUiConfig::default();
        config.live_data.staleness_ms = 10_000;
        config.button_bar.gap = 8;

        let bytes = config.to_postcard().unwrap();
        assert_eq!(RadioUiConfig::from_postcard(&bytes).unwrap(), config);
    }

    #[test]
    fn truncated_blob_is_rejected() {
        let bytes = RadioUiConfig::default().to_postcard().unwrap();
        assert!(matches!(
            RadioUiConfig::from_postcard(&bytes[..2]),
            Err(ConfigError::Decode(_))
        ));
    }

    #[test]
    fn scroll_must_outpace_polling() {
        let mut config = RadioUiConfig::default();
        config.live_data.scroll_interval_ms = config.live_data.poll_interval_ms;

        let bytes = config.to_postcard().unwrap();
        assert!(matches!(
            RadioUiConfig::from_postcard(&bytes),
            Err(ConfigError::Invalid(_))
        ));
    }
}
