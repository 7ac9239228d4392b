//! Dispatch configuration types
//!
//! Configuration is compiled in by default and can be persisted as
//! postcard-serialized binary data with the `serde` feature.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::state::MotionMode;

/// Current configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Configuration persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Stored bytes could not be decoded
    Deserialize,
    /// Buffer too small for the encoded configuration
    Serialize,
    /// Stored configuration has a different format version
    VersionMismatch,
}

/// When commands on a line are acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AckPolicy {
    /// Every successful command gets its own `ok`
    PerCommand,
    /// One `ok` per line, sent after the last command
    #[default]
    PerLine,
}

/// Dispatch engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DispatchConfig {
    /// Format version
    pub version: u8,
    /// Acknowledgment policy
    pub ack: AckPolicy,
    /// Motion mode assumed before any motion command was seen
    pub initial_motion: Option<MotionMode>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ack: AckPolicy::PerLine,
            initial_motion: None,
        }
    }
}

impl DispatchConfig {
    /// Configuration acknowledging every command
    pub fn per_command() -> Self {
        Self {
            ack: AckPolicy::PerCommand,
            ..Self::default()
        }
    }

    /// Check if this configuration matches the current format version
    pub fn is_current(&self) -> bool {
        self.version == CONFIG_VERSION
    }
}

#[cfg(feature = "serde")]
impl DispatchConfig {
    /// Decode a stored configuration
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        if !config.is_current() {
            return Err(ConfigError::VersionMismatch);
        }
        Ok(config)
    }

    /// Encode into `buffer`, returning the used part
    pub fn to_slice<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buffer).map_err(|_| ConfigError::Serialize)
    }
}
