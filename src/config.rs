//! Compiled-in startup configuration.

use crate::{
    bus::BusSetup,
    profile::{
        BADGE_170X320,
        DisplayProfile,
    },
    sequencer::TestRunConfig,
};

/// Everything bring-up and the runner need, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AppConfig {
    pub profile: &'static DisplayProfile,
    pub bus: BusSetup,
    pub run: TestRunConfig,
}

impl AppConfig {
    pub const DEFAULT: AppConfig = AppConfig {
        profile: &BADGE_170X320,
        bus: BusSetup::Default,
        run: TestRunConfig::DEFAULT,
    };

    /// The default configuration with the profile named by `profile`, usually
    /// `option_env!("DISPLAY_PROFILE")`. Unknown names fall back to the
    /// default profile.
    pub fn select(profile: Option<&str>) -> AppConfig {
        let mut config = AppConfig::DEFAULT;
        if let Some(name) = profile {
            match DisplayProfile::by_name(name) {
                Some(found) => config.profile = found,
                None => warn!(
                    "unknown display profile {}, using {}",
                    name,
                    config.profile.name
                ),
            }
        }
        info!(
            "display profile {}: {}x{}",
            config.profile.name,
            config.profile.width,
            config.profile.height
        );
        config
    }

    #[must_use]
    pub const fn with_bus(mut self, bus: BusSetup) -> Self {
        self.bus = bus;
        self
    }

    #[must_use]
    pub const fn with_run(mut self, run: TestRunConfig) -> Self {
        self.run = run;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use embassy_time::Duration;

    use super::*;
    use crate::{
        bus::BusConfig,
        profile::ADAFRUIT_240X240,
    };

    #[test]
    fn default_runs_everything_on_the_badge() {
        let config = AppConfig::default();
        assert_eq!(config.profile, &BADGE_170X320);
        assert_eq!(config.bus, BusSetup::Default);
        assert!(config.run.run_all_tests);
        assert_eq!(config.run.inter_test_delay, Duration::from_secs(5));
    }

    #[test]
    fn select_by_name_and_fall_back() {
        assert_eq!(AppConfig::select(Some("Adafruit-240x240")).profile, &ADAFRUIT_240X240);
        assert_eq!(AppConfig::select(Some("round-128")).profile, &BADGE_170X320);
        assert_eq!(AppConfig::select(None), AppConfig::DEFAULT);
    }

    #[test]
    fn builders_replace_one_field() {
        let run = TestRunConfig {
            run_all_tests: false,
            inter_test_delay: Duration::from_millis(500),
        };
        let config = AppConfig::DEFAULT
            .with_bus(BusSetup::Advanced(BusConfig::ADVANCED))
            .with_run(run);
        assert_eq!(config.profile, AppConfig::DEFAULT.profile);
        assert_eq!(config.bus.config(), Some(&BusConfig::ADVANCED));
        assert_eq!(config.run, run);
    }
}
