//! The rendering demonstrations run by the sequencer.
//!
//! Every test draws through [`Canvas`] only and ends with a `show`, so the
//! same battery runs on the panel and against a recording canvas.

use alloc::string::ToString;
use core::f32::consts::PI;

use embassy_time::Duration;
use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
};
use palette::named;

use crate::{
    color::{
        self,
        rgb565,
    },
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
    sequencer::{
        Pause,
        TestId,
    },
};

/// How long each frame of the line test stays up.
pub const LINE_FRAME_DELAY: Duration = Duration::from_millis(1500);

/// Runs one test to completion.
pub async fn run<C, P>(test: TestId, canvas: &mut C, pause: &mut P) -> Result<(), C::Error>
where
    C: Canvas,
    P: Pause,
{
    match test {
        TestId::LineNumber => line_numbers(canvas),
        TestId::FontScale => font_scale(canvas),
        TestId::FontAlignment => font_alignment(canvas),
        TestId::ColorFont => color_font(canvas),
        TestId::BufferRotation => buffer_rotation(canvas),
        TestId::Path => path(canvas),
        TestId::Line => lines(canvas, pause).await,
        TestId::PolarLine => polar_lines(canvas),
    }
}

fn line_numbers<C: Canvas>(canvas: &mut C) -> Result<(), C::Error> {
    canvas.clear(true)?;

    let font = Font::Font6x12;
    let font_height = font.height();
    let height = canvas.height();
    trace!("...line number test starting...");
    trace!(
        "......font height is {}px, display height is {}, total lines = {}...",
        font_height,
        height,
        height / font_height
    );

    let options = TextOptions::new(Rgb565::WHITE).font(font);
    for (i, y) in (0..)
        .map(|row: u32| row * font_height)
        .take_while(|y| y + font_height <= height)
        .enumerate()
    {
        canvas.draw_text(0, y as i32, &i.to_string(), options)?;
    }

    canvas.show()?;
    trace!("...line number test complete.");
    Ok(())
}

fn font_scale<C: Canvas>(canvas: &mut C) -> Result<(), C::Error> {
    trace!("...font scale test starting...");

    canvas.set_font(Font::Font10x20);
    canvas.clear(false)?;

    let lines = [
        ("2x Scale", named::BLUE, ScaleFactor::X2),
        ("10x20 Font", named::GREEN, ScaleFactor::X2),
        ("0123456789", named::YELLOW, ScaleFactor::X2),
        ("!@#$%^&*()", named::ORANGE, ScaleFactor::X2),
        ("3x!", named::ORANGERED, ScaleFactor::X3),
        ("ST7789!", named::RED, ScaleFactor::X2),
        ("B4.2", named::VIOLET, ScaleFactor::X2),
    ];
    for (y, (text, color, scale)) in (0..).step_by(48).zip(lines) {
        canvas.draw_text(0, y, text, TextOptions::new(rgb565(color)).scale(scale))?;
    }

    canvas.show()?;
    trace!("...font scale test complete.");
    Ok(())
}

fn font_alignment<C: Canvas>(canvas: &mut C) -> Result<(), C::Error> {
    trace!("...font alignment test starting...");

    canvas.clear(false)?;

    let rows = [
        ("Left aligned", named::BLUE, HorizontalAlignment::Left),
        ("Center aligned", named::GREEN, HorizontalAlignment::Center),
        ("Right aligned", named::RED, HorizontalAlignment::Right),
    ];
    for (top, spacing, scale) in [(0, 16, ScaleFactor::X1), (64, 32, ScaleFactor::X2)] {
        for (row, (text, color, alignment)) in (0..).zip(rows) {
            let options = TextOptions::new(rgb565(color)).scale(scale).align(alignment);
            canvas.draw_text(120, top + row * spacing, text, options)?;
        }
    }

    canvas.show()?;
    trace!("...font alignment test complete.");
    Ok(())
}

/// Colour names shown by the colour font test, each drawn in its own colour.
const COLOR_NAMES: [&str; 10] = [
    "Red",
    "Purple",
    "BlueViolet",
    "Blue",
    "Cyan",
    "LawnGreen",
    "GreenYellow",
    "Yellow",
    "Orange",
    "Brown",
];

fn color_font<C: Canvas>(canvas: &mut C) -> Result<(), C::Error> {
    trace!("...color font test starting...");

    canvas.set_font(Font::Font6x12);
    canvas.clear(false)?;

    canvas.draw_triangle(
        [Point::new(120, 20), Point::new(200, 100), Point::new(120, 100)],
        rgb565(named::RED),
        false,
    )?;
    canvas.draw_rectangle(140, 30, 40, 90, rgb565(named::YELLOW), false)?;
    canvas.draw_circle(160, 80, 40, rgb565(named::CYAN), false)?;

    const INDENT: i32 = 5;
    const SPACING: i32 = 14;

    canvas.draw_text(INDENT, INDENT, "ESP32-S3 SPI ST7789!!", TextOptions::default())?;
    for (y, name) in (INDENT + SPACING..).step_by(SPACING as usize).zip(COLOR_NAMES) {
        let color = color::by_name(name).unwrap_or(Rgb565::WHITE);
        canvas.draw_text(INDENT, y, name, TextOptions::new(color))?;
    }

    canvas.show()?;
    info!("...color font test complete.");
    Ok(())
}

fn buffer_rotation<C: Canvas>(canvas: &mut C) -> Result<(), C::Error> {
    trace!("...buffer rotation test starting...");

    let previous = canvas.rotation();
    let result = draw_rotated_buffers(canvas);
    canvas.set_rotation(previous);
    result?;

    trace!("...buffer rotation test complete.");
    Ok(())
}

fn draw_rotated_buffers<C: Canvas>(canvas: &mut C) -> Result<(), C::Error> {
    let mut buffer = PixelBuffer::new(50, 50);
    let fills = [named::RED, named::GREEN, named::BLUE, named::YELLOW];

    canvas.clear(false)?;
    for (rotation, fill) in Rotation::ALL.into_iter().zip(fills) {
        canvas.set_rotation(rotation);
        buffer.fill(rgb565(fill));
        canvas.draw_buffer(10, 10, &buffer)?;
    }
    canvas.show()
}

/// One point of the sine or cosine wave used by the path test.
fn wave(i: i32, f: fn(f32) -> f32) -> Point {
    let radians = (i * 10) as f32 * PI / 180.0;
    Point::new(i * 5, 120 + (f(radians) * 100.0) as i32)
}

fn path<C: Canvas>(canvas: &mut C) -> Result<(), C::Error> {
    trace!("...path test starting...");

    let mut sine = GraphicsPath::new();
    let mut cosine = GraphicsPath::new();
    for i in 0..48 {
        let (s, c) = (wave(i, libm::sinf), wave(i, libm::cosf));
        if i == 0 {
            sine.move_to(s.x, s.y);
            cosine.move_to(c.x, c.y);
        } else {
            sine.line_to(s.x, s.y);
            cosine.line_to(c.x, c.y);
        }
    }

    canvas.clear(false)?;
    canvas.set_stroke(3);
    canvas.draw_line(0, 120, 240, 120, Rgb565::WHITE)?;
    canvas.draw_path(&sine, rgb565(named::CYAN))?;
    canvas.draw_path(&cosine, rgb565(named::LAWNGREEN))?;

    canvas.show()?;
    trace!("...path test complete.");
    Ok(())
}

async fn lines<C, P>(canvas: &mut C, pause: &mut P) -> Result<(), C::Error>
where
    C: Canvas,
    P: Pause,
{
    trace!("...draw lines test starting...");
    let width = canvas.width() as i32;
    let height = canvas.height() as i32;

    info!("Horizontal lines");
    canvas.clear(false)?;
    for i in 1..10 {
        canvas.set_stroke(i as u32);
        canvas.draw_horizontal_line(5, 20 * i, width - 10, rgb565(named::RED))?;
    }
    canvas.show()?;
    pause.pause(LINE_FRAME_DELAY).await;

    info!("Horizontal lines (negative)");
    canvas.clear(false)?;
    for i in 1..10 {
        canvas.set_stroke(i as u32);
        canvas.draw_horizontal_line(width - 5, 20 * i, 10 - width, rgb565(named::GREEN))?;
    }
    canvas.show()?;
    pause.pause(LINE_FRAME_DELAY).await;

    info!("Vertical lines");
    canvas.clear(false)?;
    for i in 1..10 {
        canvas.set_stroke(i as u32);
        canvas.draw_vertical_line(20 * i, 5, height - 10, rgb565(named::ORANGE))?;
    }
    canvas.show()?;
    pause.pause(LINE_FRAME_DELAY).await;

    info!("Vertical lines (negative)");
    canvas.clear(false)?;
    for i in 1..10 {
        canvas.set_stroke(i as u32);
        canvas.draw_vertical_line(20 * i, height - 5, 10 - height, rgb565(named::BLUE))?;
    }
    canvas.show()?;
    pause.pause(LINE_FRAME_DELAY).await;

    trace!("...draw lines test complete.");
    Ok(())
}

fn polar_lines<C: Canvas>(canvas: &mut C) -> Result<(), C::Error> {
    trace!("...polar lines test starting...");

    canvas.clear(false)?;
    canvas.set_stroke(3);
    for degrees in (0..270).step_by(12) {
        let angle = degrees as f32 * PI / 180.0;
        canvas.draw_polar_line(120, 120, 80, angle, Rgb565::WHITE)?;
    }

    canvas.show()?;
    trace!("...polar lines test complete.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::*;
    use crate::{
        graphics::Graphics,
        testing::{
            Call,
            RecordingCanvas,
            RecordingPause,
        },
    };

    fn run_on(test: TestId, canvas: &mut RecordingCanvas) -> RecordingPause {
        let mut pause = RecordingPause::default();
        block_on(run(test, canvas, &mut pause)).unwrap();
        pause
    }

    #[test]
    fn line_numbers_fill_a_square_panel() {
        let mut canvas = RecordingCanvas::new(240, 240);
        run_on(TestId::LineNumber, &mut canvas);

        let texts = canvas.texts();
        assert_eq!(texts.len(), 20);
        for (i, (x, y, text)) in texts.iter().enumerate() {
            assert_eq!(*x, 0);
            assert_eq!(*y, i as i32 * 12);
            assert_eq!(*text, i.to_string());
        }
        assert_eq!(texts.last().map(|t| t.1), Some(228));
        assert_eq!(canvas.calls.first(), Some(&Call::Clear { show: true }));
        assert_eq!(canvas.calls.last(), Some(&Call::Show));
    }

    #[test]
    fn line_numbers_only_draw_whole_rows() {
        let mut canvas = RecordingCanvas::new(170, 320);
        run_on(TestId::LineNumber, &mut canvas);
        assert_eq!(canvas.texts().len(), 320 / 12);
        assert!(canvas.texts().iter().all(|(_, y, _)| y + 12 <= 320));
    }

    #[test]
    fn buffer_rotation_draws_once_per_rotation_and_restores() {
        let mut canvas = RecordingCanvas::new(240, 320);
        canvas.set_rotation(Rotation::Deg90);
        run_on(TestId::BufferRotation, &mut canvas);

        let draws: Vec<(Rotation, Vec<Rgb565>)> = canvas
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Buffer {
                    position,
                    rotation,
                    size,
                    colors,
                } => {
                    assert_eq!(*position, Point::new(10, 10));
                    assert_eq!(*size, Size::new(50, 50));
                    Some((*rotation, colors.clone()))
                }
                _ => None,
            })
            .collect();

        let expected: Vec<(Rotation, Vec<Rgb565>)> = Rotation::ALL
            .into_iter()
            .zip([named::RED, named::GREEN, named::BLUE, named::YELLOW])
            .map(|(rotation, fill)| (rotation, vec![rgb565(fill)]))
            .collect();
        assert_eq!(draws, expected);
        assert_eq!(canvas.rotation(), Rotation::Deg90);
        assert_eq!(canvas.flushes(), 1);
    }

    #[test]
    fn line_test_shows_four_frames_with_pauses() {
        let mut canvas = RecordingCanvas::new(240, 320);
        let pause = run_on(TestId::Line, &mut canvas);

        assert_eq!(pause.pauses, [LINE_FRAME_DELAY; 4]);
        assert_eq!(canvas.flushes(), 4);

        let negative_horizontal = canvas
            .calls
            .iter()
            .filter(|call| matches!(call, Call::HorizontalLine { length, .. } if *length == 10 - 240))
            .count();
        let negative_vertical = canvas
            .calls
            .iter()
            .filter(|call| matches!(call, Call::VerticalLine { length, .. } if *length == 10 - 320))
            .count();
        assert_eq!(negative_horizontal, 9);
        assert_eq!(negative_vertical, 9);
    }

    #[test]
    fn every_test_runs_cleanly_on_a_real_context() {
        use core::convert::Infallible;

        struct Sink(Size);

        impl OriginDimensions for Sink {
            fn size(&self) -> Size {
                self.0
            }
        }

        impl DrawTarget for Sink {
            type Color = Rgb565;
            type Error = Infallible;

            fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Infallible>
            where
                I: IntoIterator<Item = Pixel<Rgb565>>,
            {
                Ok(())
            }
        }

        let mut gfx = Graphics::new(Sink(Size::new(170, 320)), Rotation::Deg0);
        let mut pause = RecordingPause::default();
        for test in TestId::ALL {
            block_on(run(test, &mut gfx, &mut pause)).unwrap();
        }
        assert_eq!(gfx.rotation(), Rotation::Deg0);
    }

    #[test]
    fn path_and_polar_lines_use_stroke_three() {
        let mut canvas = RecordingCanvas::new(240, 240);
        run_on(TestId::PolarLine, &mut canvas);
        let polar: Vec<_> = canvas
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::PolarLine { origin, length, stroke, .. } => Some((*origin, *length, *stroke)),
                _ => None,
            })
            .collect();
        assert_eq!(polar.len(), 23);
        assert!(polar.iter().all(|p| *p == (Point::new(120, 120), 80, 3)));

        let mut canvas = RecordingCanvas::new(240, 240);
        run_on(TestId::Path, &mut canvas);
        let segments: Vec<usize> = canvas
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Path { segments, .. } => Some(*segments),
                _ => None,
            })
            .collect();
        assert_eq!(segments, [47, 47]);
        assert_eq!(canvas.stroke(), 3);
    }

    #[test]
    fn color_names_are_drawn_in_their_colour() {
        let mut canvas = RecordingCanvas::new(240, 240);
        run_on(TestId::ColorFont, &mut canvas);

        let named_texts: Vec<(i32, Rgb565)> = canvas
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Text { y, text, color, .. } if COLOR_NAMES.contains(&text.as_str()) => {
                    assert_eq!(color::by_name(text), Some(*color));
                    Some((*y, *color))
                }
                _ => None,
            })
            .collect();
        assert_eq!(named_texts.len(), 10);
        assert_eq!(named_texts[0], (19, Rgb565::RED));
        assert_eq!(named_texts[9].0, 5 + 14 * 10);
    }
}
