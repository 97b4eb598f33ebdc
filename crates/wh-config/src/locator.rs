//! Historical look-back configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default look-back window in calendar days.
const fn default_window() -> u32 {
    5
}

/// Largest window a caller may request.
const fn default_max_window() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocatorConfig {
    /// Window used when the caller does not ask for a specific one.
    #[serde(default = "default_window")]
    pub default_window: u32,

    /// Requests above this are rejected as malformed input.
    ///
    /// Month-ago comparisons need the dataset to reach back to the same date
    /// last month, so they only show up with a bound of 28 to 31 or more.
    #[serde(default = "default_max_window")]
    pub max_window: u32,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            default_window: default_window(),
            max_window: default_max_window(),
        }
    }
}

impl LocatorConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `max_window` is zero or the
    /// default window exceeds it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_window == 0 {
            return Err(ConfigError::invalid("locator.max_window", "must be at least 1"));
        }
        if self.default_window > self.max_window {
            return Err(ConfigError::invalid(
                "locator.default_window",
                format!("{} exceeds max_window {}", self.default_window, self.max_window),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = LocatorConfig::default();
        assert_eq!(config.default_window, 5);
        assert_eq!(config.max_window, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_above_max_is_rejected() {
        let config = LocatorConfig {
            default_window: 12,
            max_window: 10,
        };
        assert!(config.validate().is_err());
    }
}
