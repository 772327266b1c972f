//! In-memory framebuffer addressed in rotated (logical) coordinates.

use alloc::{vec, vec::Vec};

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

use crate::profile::Rotation;

/// A pixel landed outside the logical surface while out-of-bounds pixels were
/// not being ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfBounds(pub Point);

pub(crate) struct Surface {
    size: Size,
    pixels: Vec<Rgb565>,
    pub(crate) rotation: Rotation,
    pub(crate) ignore_out_of_bounds: bool,
}

impl Surface {
    pub(crate) fn new(size: Size, rotation: Rotation) -> Self {
        Self {
            size,
            pixels: vec![Rgb565::BLACK; size.width as usize * size.height as usize],
            rotation,
            ignore_out_of_bounds: true,
        }
    }

    pub(crate) fn fill(&mut self, color: Rgb565) {
        self.pixels.fill(color);
    }

    /// Pixels in panel order, row-major.
    pub(crate) fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    pub(crate) fn physical_size(&self) -> Size {
        self.size
    }
}

/// Maps a logical point to panel coordinates, or `None` if it is off-surface.
pub(crate) fn to_physical(rotation: Rotation, panel: Size, point: Point) -> Option<Point> {
    let logical = logical_size(rotation, panel);
    let (x, y) = (point.x, point.y);
    if x < 0 || y < 0 || x >= logical.width as i32 || y >= logical.height as i32 {
        return None;
    }

    let (w, h) = (panel.width as i32, panel.height as i32);
    Some(match rotation {
        Rotation::Deg0 => Point::new(x, y),
        Rotation::Deg90 => Point::new(w - 1 - y, x),
        Rotation::Deg180 => Point::new(w - 1 - x, h - 1 - y),
        Rotation::Deg270 => Point::new(y, h - 1 - x),
    })
}

pub(crate) const fn logical_size(rotation: Rotation, panel: Size) -> Size {
    if rotation.is_transposed() {
        Size::new(panel.height, panel.width)
    } else {
        panel
    }
}

impl OriginDimensions for Surface {
    fn size(&self) -> Size {
        logical_size(self.rotation, self.size)
    }
}

impl DrawTarget for Surface {
    type Color = Rgb565;
    type Error = OutOfBounds;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let width = self.size.width as usize;
        for Pixel(point, color) in pixels {
            match to_physical(self.rotation, self.size, point) {
                Some(p) => {
                    if let Some(pixel) = self.pixels.get_mut(p.y as usize * width + p.x as usize) {
                        *pixel = color;
                    }
                }
                None if self.ignore_out_of_bounds => {}
                None => return Err(OutOfBounds(point)),
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}
