//! # wh-config
//!
//! Layered configuration loading for the WatchHamster publication monitor
//! using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`WATCHHAMSTER_*` prefix, `__` as separator)
//! 2. Project-level `.watchhamster/config.toml`
//! 3. User-level `~/.config/watchhamster/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `WATCHHAMSTER_LOCATOR__MAX_WINDOW` -> `locator.max_window`,
//! `WATCHHAMSTER_CALENDAR__MAX_LOOKBACK_DAYS` -> `calendar.max_lookback_days`, etc.
//!
//! # Holidays
//!
//! Holiday tables merge per year: a file that adds `[calendar.holidays.2026]`
//! keeps the built-in 2025 table.
//!
//! ```toml
//! [calendar.holidays.2026]
//! 20260101 = "New Year's Day"
//! 20260301 = "Independence Movement Day"
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use wh_config::WatchConfig;
//!
//! let config = WatchConfig::load_with_dotenv().expect("config");
//! let holidays = config.calendar.holiday_table().expect("holidays");
//! let schedule = config.publication_schedule().expect("schedule");
//! ```

mod calendar;
mod error;
mod locator;
mod report;
mod schedule;

pub use calendar::CalendarConfig;
pub use error::ConfigError;
pub use locator::LocatorConfig;
pub use report::ReportConfig;
pub use schedule::CategoryScheduleConfig;

use std::collections::BTreeMap;
use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use wh_core::PublicationSchedule;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub locator: LocatorConfig,
    /// Feed key → expected publication time and tolerance.
    #[serde(default = "schedule::default_schedule")]
    pub schedule: BTreeMap<String, CategoryScheduleConfig>,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            calendar: CalendarConfig::default(),
            locator: LocatorConfig::default(),
            schedule: schedule::default_schedule(),
            report: ReportConfig::default(),
        }
    }
}

impl WatchConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be extracted and
    /// [`ConfigError::InvalidValue`] if the merged values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".watchhamster/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("WATCHHAMSTER_").split("__"))
    }

    /// Check every section, including the typed conversions.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.calendar.validate()?;
        self.locator.validate()?;
        self.publication_schedule().map(|_| ())
    }

    /// Typed schedule with built-in entries for unconfigured categories.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unknown category key or
    /// an unparseable expected time.
    pub fn publication_schedule(&self) -> Result<PublicationSchedule, ConfigError> {
        schedule::to_publication_schedule(&self.schedule)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("watchhamster").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
