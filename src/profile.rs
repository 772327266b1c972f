//! Display profiles: the panels this harness knows how to drive.

use embedded_graphics::geometry::Size;

/// Rotation applied by the graphics context, clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    pub const fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Whether width and height swap under this rotation.
    pub const fn is_transposed(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// How the panel is attached, resolved once at bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hardware {
    /// A breakout wired to the board's SPI header.
    GenericSpi,
    /// The panel soldered onto the reference board, with its own fixed bus setup.
    ReferenceBoard,
}

/// A named panel configuration.
///
/// `width` and `height` are the panel's native (portrait) size and must match the
/// wired panel; nothing checks this at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayProfile {
    pub name: &'static str,
    pub width: u16,
    pub height: u16,
    pub rotation: Rotation,
    pub hardware: Hardware,
    /// Offset of the visible window inside the ST7789's 240×320 RAM.
    pub offset: (u16, u16),
    pub invert_colors: bool,
}

/// Adafruit 1.9" 170×320 IPS TFT.
pub const ADAFRUIT_170X320: DisplayProfile = DisplayProfile {
    name: "adafruit-170x320",
    width: 170,
    height: 320,
    rotation: Rotation::Deg0,
    hardware: Hardware::GenericSpi,
    offset: (35, 0),
    invert_colors: true,
};

/// Adafruit 2.0" 240×320 IPS TFT.
pub const ADAFRUIT_240X320: DisplayProfile = DisplayProfile {
    name: "adafruit-240x320",
    width: 240,
    height: 320,
    rotation: Rotation::Deg0,
    hardware: Hardware::GenericSpi,
    offset: (0, 0),
    invert_colors: true,
};

/// Adafruit 1.54" 240×240 IPS TFT.
pub const ADAFRUIT_240X240: DisplayProfile = DisplayProfile {
    name: "adafruit-240x240",
    width: 240,
    height: 240,
    rotation: Rotation::Deg0,
    hardware: Hardware::GenericSpi,
    offset: (0, 0),
    invert_colors: true,
};

/// The reference board's on-board 1.9" panel, used in landscape.
pub const BADGE_170X320: DisplayProfile = DisplayProfile {
    name: "badge-170x320",
    width: 170,
    height: 320,
    rotation: Rotation::Deg90,
    hardware: Hardware::ReferenceBoard,
    offset: (35, 0),
    invert_colors: true,
};

pub const PROFILES: [&DisplayProfile; 4] = [
    &ADAFRUIT_170X320,
    &ADAFRUIT_240X320,
    &ADAFRUIT_240X240,
    &BADGE_170X320,
];

impl DisplayProfile {
    /// Looks a profile up by name, ignoring ASCII case.
    pub fn by_name(name: &str) -> Option<&'static DisplayProfile> {
        PROFILES
            .iter()
            .copied()
            .find(|profile| profile.name.eq_ignore_ascii_case(name.trim()))
    }

    pub const fn is_reference_hardware(&self) -> bool {
        matches!(self.hardware, Hardware::ReferenceBoard)
    }

    /// Native panel size, before any rotation.
    pub const fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}
