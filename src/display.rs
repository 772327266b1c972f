//! ST7789 driver construction over any `embedded-hal` SPI device.

use embedded_graphics::prelude::*;
use embedded_hal::{
    delay::DelayNs,
    digital::OutputPin,
    spi::SpiDevice,
};
use mipidsi::{
    Builder,
    interface::SpiInterface,
    models::ST7789,
    options::ColorInversion,
};

use crate::{
    color,
    profile::DisplayProfile,
};

/// An initialised ST7789 panel, ready to draw on with `embedded-graphics`.
pub type Display<'a, SPI, DC, RST> = mipidsi::Display<SpiInterface<'a, SPI, DC>, ST7789, RST>;

/// Bring-up failures. Hardware presence is a precondition, so callers treat
/// these as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BringUpError {
    /// The SPI peripheral, its DMA buffers or chip-select could not be claimed.
    Bus,
    /// The controller rejected the configuration or did not accept commands.
    Display,
}

/// Builds the driver for `profile`, resets the controller and clears the panel
/// to [`color::BACKGROUND`].
///
/// `buffer` batches pixel data for SPI writes; larger buffers mean fewer
/// transactions.
pub fn create_display<'a, SPI, DC, RST, D>(
    spi: SPI,
    dc: DC,
    rst: RST,
    profile: &DisplayProfile,
    buffer: &'a mut [u8],
    delay: &mut D,
) -> Result<Display<'a, SPI, DC, RST>, BringUpError>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    trace!(
        "...creating ST7789: width = {}px, height = {}px...",
        profile.width,
        profile.height
    );

    let inversion = if profile.invert_colors {
        ColorInversion::Inverted
    } else {
        ColorInversion::Normal
    };

    let di = SpiInterface::new(spi, dc, buffer);
    let mut display = Builder::new(ST7789, di)
        .reset_pin(rst)
        .display_size(profile.width, profile.height)
        .display_offset(profile.offset.0, profile.offset.1)
        .invert_colors(inversion)
        .init(delay)
        .map_err(|_| BringUpError::Display)?;

    display
        .clear(color::rgb565(color::BACKGROUND))
        .map_err(|_| BringUpError::Display)?;

    trace!("...ST7789 created.");
    Ok(display)
}
