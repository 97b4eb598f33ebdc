use figment::Jail;
use pretty_assertions::assert_eq;
use wh_config::{ConfigError, WatchConfig};

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".watchhamster")?;
        jail.create_file(
            ".watchhamster/config.toml",
            r"
[locator]
max_window = 8
",
        )?;
        jail.set_env("WATCHHAMSTER_LOCATOR__MAX_WINDOW", "6");
        jail.set_env("WATCHHAMSTER_CALENDAR__MAX_LOOKBACK_DAYS", "45");

        let config = WatchConfig::load().expect("config loads");
        assert_eq!(config.locator.max_window, 6);
        assert_eq!(config.calendar.max_lookback_days, 45);
        Ok(())
    });
}

#[test]
fn invalid_env_window_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("WATCHHAMSTER_LOCATOR__DEFAULT_WINDOW", "20");

        let err = WatchConfig::load().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "locator.default_window"
        ));
        Ok(())
    });
}
