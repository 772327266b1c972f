//! # st7789-display-test
//!
//! Bring-up and rendering test harness for ST7789 SPI panels.
//!
//! - **Profiles**: the known panels, their native size, offset and rotation
//! - **Bring-up**: SPI bus setup and ST7789 initialisation over `mipidsi`
//! - **Graphics**: a buffered drawing context with rotation, stroke and fonts
//! - **Sequencer**: a fixed battery of rendering tests, stepped with delays
//!
//! Everything except the [`board`] module is hardware independent and runs
//! on the host against any `embedded-graphics` draw target.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let peripherals = st7789_display_test::init();
//! let resources = st7789_display_test::split_resources!(peripherals);
//!
//! let config = AppConfig::select(option_env!("DISPLAY_PROFILE"));
//! let board = bring_up(resources, &config).unwrap();
//! let graphics = Graphics::new(board.panel, config.profile.rotation);
//! let mut runner = TestRunner::new(graphics, EmbassyPause, config.run);
//! runner.run().await.unwrap();
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
mod fmt;

mod battery;
mod bus;
pub mod color;
mod config;
mod display;
mod graphics;
mod profile;
mod sequencer;

#[cfg(feature = "esp32s3")]
pub mod board;

#[cfg(test)]
mod testing;

pub use battery::LINE_FRAME_DELAY;
#[cfg(feature = "esp32s3")]
pub use board::*;
pub use bus::{
    BusConfig,
    BusSetup,
    ClockMode,
};
pub use config::AppConfig;
pub use display::{
    BringUpError,
    Display,
    create_display,
};
pub use graphics::{
    Canvas,
    Font,
    Graphics,
    GraphicsError,
    GraphicsPath,
    HorizontalAlignment,
    OutOfBounds,
    PathVerb,
    PixelBuffer,
    ScaleFactor,
    TextOptions,
};
pub use profile::{
    ADAFRUIT_170X320,
    ADAFRUIT_240X240,
    ADAFRUIT_240X320,
    BADGE_170X320,
    DisplayProfile,
    Hardware,
    PROFILES,
    Rotation,
};
pub use sequencer::{
    Pause,
    Sequencer,
    Step,
    TestId,
    TestRunConfig,
    TestRunner,
};

/// StaticCell helper: allocates a value into a `static` exactly once.
#[cfg(feature = "esp32s3")]
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}
