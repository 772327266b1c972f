//! Fonts, scaling and horizontal alignment for text drawing.

use embedded_graphics::{
    mono_font::{
        MonoFont,
        MonoTextStyle,
        iso_8859_1::{FONT_6X12, FONT_10X20},
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    #[default]
    Font6x12,
    Font10x20,
}

impl Font {
    pub fn mono(self) -> &'static MonoFont<'static> {
        match self {
            Font::Font6x12 => &FONT_6X12,
            Font::Font10x20 => &FONT_10X20,
        }
    }

    pub fn width(self) -> u32 {
        self.mono().character_size.width
    }

    pub fn height(self) -> u32 {
        self.mono().character_size.height
    }
}

/// Integer glyph magnification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScaleFactor {
    #[default]
    X1,
    X2,
    X3,
    X4,
}

impl ScaleFactor {
    pub const fn factor(self) -> u32 {
        match self {
            ScaleFactor::X1 => 1,
            ScaleFactor::X2 => 2,
            ScaleFactor::X3 => 3,
            ScaleFactor::X4 => 4,
        }
    }
}

/// Where the anchor `x` sits relative to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl From<HorizontalAlignment> for Alignment {
    fn from(alignment: HorizontalAlignment) -> Self {
        match alignment {
            HorizontalAlignment::Left => Alignment::Left,
            HorizontalAlignment::Center => Alignment::Center,
            HorizontalAlignment::Right => Alignment::Right,
        }
    }
}

/// Per-call text settings. `font: None` uses the context's current font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextOptions {
    pub color: Rgb565,
    pub font: Option<Font>,
    pub scale: ScaleFactor,
    pub alignment: HorizontalAlignment,
}

impl TextOptions {
    pub const fn new(color: Rgb565) -> Self {
        Self {
            color,
            font: None,
            scale: ScaleFactor::X1,
            alignment: HorizontalAlignment::Left,
        }
    }

    #[must_use]
    pub const fn font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    #[must_use]
    pub const fn scale(mut self, scale: ScaleFactor) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub const fn align(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self::new(Rgb565::WHITE)
    }
}

/// Draws `text` with its top edge at `y`, aligned about `x`.
pub(crate) fn draw_text<T>(
    target: &mut T,
    position: Point,
    text: &str,
    font: Font,
    options: TextOptions,
) -> Result<(), T::Error>
where
    T: DrawTarget<Color = Rgb565>,
{
    let character_style = MonoTextStyle::new(font.mono(), options.color);
    let text_style = TextStyleBuilder::new()
        .alignment(options.alignment.into())
        .baseline(Baseline::Top)
        .build();
    let text = Text::with_text_style(text, position, character_style, text_style);

    match options.scale {
        ScaleFactor::X1 => text.draw(target).map(|_| ()),
        scale => {
            let mut scaled = Scaled {
                target,
                origin: position,
                factor: scale.factor(),
            };
            text.draw(&mut scaled).map(|_| ())
        }
    }
}

/// Replicates every pixel into a `factor`×`factor` block, scaled about `origin`.
struct Scaled<'a, T> {
    target: &'a mut T,
    origin: Point,
    factor: u32,
}

impl<T: DrawTarget> Dimensions for Scaled<'_, T> {
    fn bounding_box(&self) -> Rectangle {
        self.target.bounding_box()
    }
}

impl<T: DrawTarget> DrawTarget for Scaled<'_, T> {
    type Color = T::Color;
    type Error = T::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let block = Size::new_equal(self.factor);
        for Pixel(point, color) in pixels {
            let top_left = self.origin + (point - self.origin) * self.factor as i32;
            self.target.fill_solid(&Rectangle::new(top_left, block), color)?;
        }
        Ok(())
    }
}
