//! SPI bus parameters for display bring-up.

use fugit::HertzU32;

/// SPI clock polarity/phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockMode {
    #[default]
    Mode0,
    Mode1,
    Mode2,
    Mode3,
}

impl ClockMode {
    pub const fn to_hal(self) -> embedded_hal::spi::Mode {
        match self {
            ClockMode::Mode0 => embedded_hal::spi::MODE_0,
            ClockMode::Mode1 => embedded_hal::spi::MODE_1,
            ClockMode::Mode2 => embedded_hal::spi::MODE_2,
            ClockMode::Mode3 => embedded_hal::spi::MODE_3,
        }
    }
}

/// Explicit clock settings for an advanced bus setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    pub frequency: HertzU32,
    pub mode: ClockMode,
}

impl BusConfig {
    /// 48 MHz, mode 0.
    pub const ADVANCED: BusConfig = BusConfig {
        frequency: HertzU32::kHz(48_000),
        mode: ClockMode::Mode0,
    };

    /// The reference board's panel runs at the controller's 80 MHz limit.
    pub const REFERENCE_BOARD: BusConfig = BusConfig {
        frequency: HertzU32::MHz(80),
        mode: ClockMode::Mode0,
    };
}

/// How the display bus is claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusSetup {
    /// Platform defaults for clock and mode.
    #[default]
    Default,
    Advanced(BusConfig),
}

impl BusSetup {
    pub const fn config(&self) -> Option<&BusConfig> {
        match self {
            BusSetup::Default => None,
            BusSetup::Advanced(config) => Some(config),
        }
    }
}
