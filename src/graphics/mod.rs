//! Buffered graphics context over an `embedded-graphics` draw target.
//!
//! Drawing calls render into an in-memory framebuffer using the context's
//! rotation, stroke width and current font. Nothing reaches the panel until
//! [`Canvas::show`] transfers the whole buffer.

mod buffer;
mod path;
mod surface;
mod text;

pub use buffer::PixelBuffer;
use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{
        Circle,
        Line,
        PrimitiveStyle,
        PrimitiveStyleBuilder,
        Rectangle,
        StrokeAlignment,
        Triangle,
    },
};
pub use path::{GraphicsPath, PathVerb};
pub use surface::OutOfBounds;
use surface::Surface;
pub use text::{Font, HorizontalAlignment, ScaleFactor, TextOptions};

use crate::profile::Rotation;

/// Errors from a [`Graphics`] context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GraphicsError<E> {
    /// The underlying display failed while the buffer was transferred.
    Display(E),
    /// A pixel fell outside the surface with `ignore_out_of_bounds` off.
    OutOfBounds(Point),
}

impl<E> From<OutOfBounds> for GraphicsError<E> {
    fn from(OutOfBounds(point): OutOfBounds) -> Self {
        GraphicsError::OutOfBounds(point)
    }
}

/// The drawing surface the test battery renders through.
///
/// Coordinates are logical: they follow the current rotation. Lengths may be
/// negative, in which case the line runs from `origin + length` to `origin`.
pub trait Canvas {
    type Error;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn rotation(&self) -> Rotation;
    fn set_rotation(&mut self, rotation: Rotation);

    fn stroke(&self) -> u32;
    fn set_stroke(&mut self, stroke: u32);

    fn font(&self) -> Font;
    fn set_font(&mut self, font: Font);

    /// Clears the buffer. With `show` the blank frame is flushed right away,
    /// so the panel does not keep its previous content.
    fn clear(&mut self, show: bool) -> Result<(), Self::Error>;

    fn draw_text(&mut self, x: i32, y: i32, text: &str, options: TextOptions) -> Result<(), Self::Error>;

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565) -> Result<(), Self::Error>;

    /// Line of `length` pixels from `(x, y)` at `angle` radians, clockwise from +x.
    fn draw_polar_line(&mut self, x: i32, y: i32, length: i32, angle: f32, color: Rgb565) -> Result<(), Self::Error>;

    fn draw_horizontal_line(&mut self, x: i32, y: i32, length: i32, color: Rgb565) -> Result<(), Self::Error>;

    fn draw_vertical_line(&mut self, x: i32, y: i32, length: i32, color: Rgb565) -> Result<(), Self::Error>;

    fn draw_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Rgb565,
        filled: bool,
    ) -> Result<(), Self::Error>;

    fn draw_triangle(&mut self, vertices: [Point; 3], color: Rgb565, filled: bool) -> Result<(), Self::Error>;

    fn draw_circle(&mut self, x: i32, y: i32, radius: u32, color: Rgb565, filled: bool) -> Result<(), Self::Error>;

    fn draw_path(&mut self, path: &GraphicsPath, color: Rgb565) -> Result<(), Self::Error>;

    fn draw_buffer(&mut self, x: i32, y: i32, buffer: &PixelBuffer) -> Result<(), Self::Error>;

    /// Transfers the buffer to the display.
    fn show(&mut self) -> Result<(), Self::Error>;
}

/// [`Canvas`] implementation backed by a framebuffer the size of `D`.
pub struct Graphics<D> {
    display: D,
    surface: Surface,
    stroke: u32,
    font: Font,
}

impl<D> Graphics<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wraps `display`, silently dropping out-of-bounds pixels.
    pub fn new(display: D, rotation: Rotation) -> Self {
        let size = display.bounding_box().size;
        trace!(
            "...creating graphics: {}x{}, rotation is {} degrees...",
            size.width,
            size.height,
            rotation.degrees()
        );
        Self {
            display,
            surface: Surface::new(size, rotation),
            stroke: 1,
            font: Font::default(),
        }
    }

    pub fn ignore_out_of_bounds(&self) -> bool {
        self.surface.ignore_out_of_bounds
    }

    pub fn set_ignore_out_of_bounds(&mut self, ignore: bool) {
        self.surface.ignore_out_of_bounds = ignore;
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn into_display(self) -> D {
        self.display
    }

    fn line_style(&self, color: Rgb565) -> PrimitiveStyle<Rgb565> {
        PrimitiveStyle::with_stroke(color, self.stroke)
    }

    fn shape_style(&self, color: Rgb565, filled: bool) -> PrimitiveStyle<Rgb565> {
        if filled {
            PrimitiveStyle::with_fill(color)
        } else {
            PrimitiveStyleBuilder::new()
                .stroke_color(color)
                .stroke_width(self.stroke)
                .stroke_alignment(StrokeAlignment::Inside)
                .build()
        }
    }

    fn draw_segment(&mut self, from: Point, to: Point, color: Rgb565) -> Result<(), GraphicsError<D::Error>> {
        let style = self.line_style(color);
        Line::new(from, to).into_styled(style).draw(&mut self.surface)?;
        Ok(())
    }
}

/// Inclusive pixel span covered by a line of `length` starting at `origin`.
fn span(origin: i32, length: i32) -> Option<(i32, i32)> {
    match length {
        0 => None,
        l if l > 0 => Some((origin, origin + l - 1)),
        l => Some((origin + l + 1, origin)),
    }
}

impl<D> Canvas for Graphics<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = GraphicsError<D::Error>;

    fn width(&self) -> u32 {
        self.surface.size().width
    }

    fn height(&self) -> u32 {
        self.surface.size().height
    }

    fn rotation(&self) -> Rotation {
        self.surface.rotation
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        self.surface.rotation = rotation;
    }

    fn stroke(&self) -> u32 {
        self.stroke
    }

    fn set_stroke(&mut self, stroke: u32) {
        self.stroke = stroke;
    }

    fn font(&self) -> Font {
        self.font
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn clear(&mut self, show: bool) -> Result<(), Self::Error> {
        self.surface.fill(Rgb565::BLACK);
        if show {
            self.show()?;
        }
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, options: TextOptions) -> Result<(), Self::Error> {
        let font = options.font.unwrap_or(self.font);
        text::draw_text(&mut self.surface, Point::new(x, y), text, font, options)?;
        Ok(())
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565) -> Result<(), Self::Error> {
        self.draw_segment(Point::new(x0, y0), Point::new(x1, y1), color)
    }

    fn draw_polar_line(&mut self, x: i32, y: i32, length: i32, angle: f32, color: Rgb565) -> Result<(), Self::Error> {
        let length = length as f32;
        let end = Point::new(
            x + libm::roundf(length * libm::cosf(angle)) as i32,
            y + libm::roundf(length * libm::sinf(angle)) as i32,
        );
        self.draw_segment(Point::new(x, y), end, color)
    }

    fn draw_horizontal_line(&mut self, x: i32, y: i32, length: i32, color: Rgb565) -> Result<(), Self::Error> {
        match span(x, length) {
            Some((start, end)) => self.draw_segment(Point::new(start, y), Point::new(end, y), color),
            None => Ok(()),
        }
    }

    fn draw_vertical_line(&mut self, x: i32, y: i32, length: i32, color: Rgb565) -> Result<(), Self::Error> {
        match span(y, length) {
            Some((start, end)) => self.draw_segment(Point::new(x, start), Point::new(x, end), color),
            None => Ok(()),
        }
    }

    fn draw_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Rgb565,
        filled: bool,
    ) -> Result<(), Self::Error> {
        let style = self.shape_style(color, filled);
        Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(style)
            .draw(&mut self.surface)?;
        Ok(())
    }

    fn draw_triangle(&mut self, vertices: [Point; 3], color: Rgb565, filled: bool) -> Result<(), Self::Error> {
        let style = self.shape_style(color, filled);
        let [a, b, c] = vertices;
        Triangle::new(a, b, c).into_styled(style).draw(&mut self.surface)?;
        Ok(())
    }

    fn draw_circle(&mut self, x: i32, y: i32, radius: u32, color: Rgb565, filled: bool) -> Result<(), Self::Error> {
        let style = self.shape_style(color, filled);
        Circle::with_center(Point::new(x, y), radius * 2 + 1)
            .into_styled(style)
            .draw(&mut self.surface)?;
        Ok(())
    }

    fn draw_path(&mut self, path: &GraphicsPath, color: Rgb565) -> Result<(), Self::Error> {
        for (from, to) in path.segments() {
            self.draw_segment(from, to, color)?;
        }
        Ok(())
    }

    fn draw_buffer(&mut self, x: i32, y: i32, buffer: &PixelBuffer) -> Result<(), Self::Error> {
        let area = Rectangle::new(Point::new(x, y), buffer.size());
        self.surface
            .fill_contiguous(&area, buffer.pixels().iter().copied())?;
        Ok(())
    }

    fn show(&mut self) -> Result<(), Self::Error> {
        let area = Rectangle::new(Point::zero(), self.surface.physical_size());
        self.display
            .fill_contiguous(&area, self.surface.pixels().iter().copied())
            .map_err(GraphicsError::Display)
    }
}
