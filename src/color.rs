//! CSS named colours converted for the panel.

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use palette::{Srgb, named};

/// The colour the panel is cleared to right after bring-up.
pub const BACKGROUND: Srgb<u8> = named::ALICEBLUE;

pub fn rgb565(color: Srgb<u8>) -> Rgb565 {
    Rgb888::new(color.red, color.green, color.blue).into()
}

/// Looks up a CSS colour name such as `"LawnGreen"`.
pub fn by_name(name: &str) -> Option<Rgb565> {
    named::from_str(&name.to_ascii_lowercase()).map(rgb565)
}
