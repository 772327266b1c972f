//! Recording doubles for the canvas and pause seams.

use core::convert::Infallible;

use embassy_time::Duration;
use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
};

use crate::{
    graphics::{
        Canvas,
        Font,
        GraphicsPath,
        HorizontalAlignment,
        PixelBuffer,
        ScaleFactor,
        TextOptions,
    },
    profile::Rotation,
    sequencer::Pause,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Clear {
        show: bool,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        color: Rgb565,
        font: Font,
        scale: ScaleFactor,
        alignment: HorizontalAlignment,
    },
    Line {
        from: Point,
        to: Point,
        stroke: u32,
    },
    PolarLine {
        origin: Point,
        length: i32,
        angle: f32,
        stroke: u32,
    },
    HorizontalLine {
        x: i32,
        y: i32,
        length: i32,
        stroke: u32,
    },
    VerticalLine {
        x: i32,
        y: i32,
        length: i32,
        stroke: u32,
    },
    Rectangle {
        top_left: Point,
        size: Size,
        filled: bool,
    },
    Triangle {
        vertices: [Point; 3],
        filled: bool,
    },
    Circle {
        center: Point,
        radius: u32,
        filled: bool,
    },
    Path {
        segments: usize,
        color: Rgb565,
    },
    Buffer {
        position: Point,
        rotation: Rotation,
        size: Size,
        /// Distinct colours present in the buffer at draw time.
        colors: Vec<Rgb565>,
    },
    Show,
}

/// Canvas that records every call instead of drawing.
pub struct RecordingCanvas {
    size: Size,
    rotation: Rotation,
    stroke: u32,
    font: Font,
    pub calls: Vec<Call>,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            rotation: Rotation::Deg0,
            stroke: 1,
            font: Font::default(),
            calls: Vec::new(),
        }
    }

    /// Transfers to the panel: `show` calls plus clears that flush.
    pub fn flushes(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Show | Call::Clear { show: true }))
            .count()
    }

    pub fn texts(&self) -> Vec<(i32, i32, &str)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Text { x, y, text, .. } => Some((*x, *y, text.as_str())),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    type Error = Infallible;

    fn width(&self) -> u32 {
        if self.rotation.is_transposed() {
            self.size.height
        } else {
            self.size.width
        }
    }

    fn height(&self) -> u32 {
        if self.rotation.is_transposed() {
            self.size.width
        } else {
            self.size.height
        }
    }

    fn rotation(&self) -> Rotation {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
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

    fn clear(&mut self, show: bool) -> Result<(), Infallible> {
        self.calls.push(Call::Clear { show });
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, options: TextOptions) -> Result<(), Infallible> {
        self.calls.push(Call::Text {
            x,
            y,
            text: text.into(),
            color: options.color,
            font: options.font.unwrap_or(self.font),
            scale: options.scale,
            alignment: options.alignment,
        });
        Ok(())
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, _color: Rgb565) -> Result<(), Infallible> {
        self.calls.push(Call::Line {
            from: Point::new(x0, y0),
            to: Point::new(x1, y1),
            stroke: self.stroke,
        });
        Ok(())
    }

    fn draw_polar_line(&mut self, x: i32, y: i32, length: i32, angle: f32, _color: Rgb565) -> Result<(), Infallible> {
        self.calls.push(Call::PolarLine {
            origin: Point::new(x, y),
            length,
            angle,
            stroke: self.stroke,
        });
        Ok(())
    }

    fn draw_horizontal_line(&mut self, x: i32, y: i32, length: i32, _color: Rgb565) -> Result<(), Infallible> {
        self.calls.push(Call::HorizontalLine {
            x,
            y,
            length,
            stroke: self.stroke,
        });
        Ok(())
    }

    fn draw_vertical_line(&mut self, x: i32, y: i32, length: i32, _color: Rgb565) -> Result<(), Infallible> {
        self.calls.push(Call::VerticalLine {
            x,
            y,
            length,
            stroke: self.stroke,
        });
        Ok(())
    }

    fn draw_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        _color: Rgb565,
        filled: bool,
    ) -> Result<(), Infallible> {
        self.calls.push(Call::Rectangle {
            top_left: Point::new(x, y),
            size: Size::new(width, height),
            filled,
        });
        Ok(())
    }

    fn draw_triangle(&mut self, vertices: [Point; 3], _color: Rgb565, filled: bool) -> Result<(), Infallible> {
        self.calls.push(Call::Triangle { vertices, filled });
        Ok(())
    }

    fn draw_circle(&mut self, x: i32, y: i32, radius: u32, _color: Rgb565, filled: bool) -> Result<(), Infallible> {
        self.calls.push(Call::Circle {
            center: Point::new(x, y),
            radius,
            filled,
        });
        Ok(())
    }

    fn draw_path(&mut self, path: &GraphicsPath, color: Rgb565) -> Result<(), Infallible> {
        self.calls.push(Call::Path {
            segments: path.segments().count(),
            color,
        });
        Ok(())
    }

    fn draw_buffer(&mut self, x: i32, y: i32, buffer: &PixelBuffer) -> Result<(), Infallible> {
        let mut colors: Vec<Rgb565> = Vec::new();
        for &color in buffer.pixels() {
            if !colors.contains(&color) {
                colors.push(color);
            }
        }
        self.calls.push(Call::Buffer {
            position: Point::new(x, y),
            rotation: self.rotation,
            size: buffer.size(),
            colors,
        });
        Ok(())
    }

    fn show(&mut self) -> Result<(), Infallible> {
        self.calls.push(Call::Show);
        Ok(())
    }
}

/// Pause that returns immediately and remembers what it was asked for.
#[derive(Debug, Default)]
pub struct RecordingPause {
    pub pauses: Vec<Duration>,
}

impl Pause for RecordingPause {
    async fn pause(&mut self, duration: Duration) {
        self.pauses.push(duration);
    }
}
