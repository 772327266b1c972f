//! Off-screen pixel buffers that can be blitted onto a graphics context.

use alloc::{vec, vec::Vec};

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    size: Size,
    pixels: Vec<Rgb565>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            pixels: vec![Rgb565::BLACK; width as usize * height as usize],
        }
    }

    pub fn fill(&mut self, color: Rgb565) {
        self.pixels.fill(color);
    }

    /// Sets one pixel; points outside the buffer are ignored.
    pub fn set_pixel(&mut self, point: Point, color: Rgb565) {
        if point.x < 0 || point.y < 0 {
            return;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x < self.size.width && y < self.size.height {
            if let Some(pixel) = self
                .pixels
                .get_mut(y as usize * self.size.width as usize + x as usize)
            {
                *pixel = color;
            }
        }
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }
}

impl OriginDimensions for PixelBuffer {
    fn size(&self) -> Size {
        self.size
    }
}
