//! Graphics support via embedded-graphics
//!
//! This module provides [`TextDisplay`], a [`StatusDisplay`] for any
//! monochrome [`DrawTarget`] such as an SSD1306 OLED panel. Both lines are
//! drawn in the 6x10 mono font, the second one a line below the first.
//!
//! Buffered drivers only show what was drawn after a flush. Pass the driver's
//! flush routine to [`TextDisplay::with_flush`] so every status write ends up
//! on the panel.
//!
//! ## Example
//!
//! ```rust
//! use embedded_graphics::mock_display::MockDisplay;
//! use embedded_graphics::pixelcolor::BinaryColor;
//! use intervalometer::{StatusDisplay, TextDisplay};
//!
//! let mut target = MockDisplay::<BinaryColor>::new();
//! target.set_allow_overdraw(true);
//!
//! let mut display = TextDisplay::new(target);
//! let _ = display.write("Done!", "", 4);
//! ```

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

use crate::interface::StatusDisplay;

/// Vertical distance between the two lines of a write
pub const LINE_HEIGHT: i32 = 12;

/// Hook pushing a drawn frame to the panel
pub type Flush<D> = fn(&mut D) -> Result<(), <D as DrawTarget>::Error>;

fn no_flush<D: DrawTarget>(_target: &mut D) -> Result<(), D::Error> {
    Ok(())
}

/// Two-line text renderer on a monochrome draw target
pub struct TextDisplay<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target: D,
    flush: Flush<D>,
}

impl<D> TextDisplay<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    /// Render on an unbuffered target
    pub fn new(target: D) -> Self {
        Self {
            target,
            flush: no_flush::<D>,
        }
    }

    /// Render on a buffered target, calling `flush` after every write
    pub fn with_flush(target: D, flush: Flush<D>) -> Self {
        Self { target, flush }
    }

    /// Access the underlying draw target
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Access the underlying draw target mutably
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Release the underlying draw target
    pub fn into_inner(self) -> D {
        self.target
    }
}

impl<D> StatusDisplay for TextDisplay<D>
where
    D: DrawTarget<Color = BinaryColor>,
    D::Error: core::fmt::Debug,
{
    type Error = D::Error;

    fn write(&mut self, line1: &str, line2: &str, row_start: u8) -> Result<(), Self::Error> {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let top = i32::from(row_start);

        self.target.clear(BinaryColor::Off)?;
        Text::with_baseline(line1, Point::new(0, top), style, Baseline::Top)
            .draw(&mut self.target)?;
        if !line2.is_empty() {
            Text::with_baseline(line2, Point::new(0, top + LINE_HEIGHT), style, Baseline::Top)
                .draw(&mut self.target)?;
        }
        (self.flush)(&mut self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusReporter;
    use crate::testing::CountingRng;
    use core::convert::Infallible;
    use embedded_graphics::mock_display::MockDisplay;

    fn lit_rows(display: &MockDisplay<BinaryColor>) -> core::ops::Range<i32> {
        let mut first = i32::MAX;
        let mut last = i32::MIN;
        for y in 0..64 {
            for x in 0..64 {
                if display.get_pixel(Point::new(x, y)) == Some(BinaryColor::On) {
                    first = first.min(y);
                    last = last.max(y);
                }
            }
        }
        first..last + 1
    }

    fn mock() -> MockDisplay<BinaryColor> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    #[test]
    fn test_single_line_starts_at_row() {
        let mut display = TextDisplay::new(mock());
        display.write("Done!", "", 20).unwrap();

        let rows = lit_rows(display.target());
        assert!(rows.start >= 20);
        assert!(rows.end <= 20 + LINE_HEIGHT);
    }

    #[test]
    fn test_second_line_below_first() {
        let mut display = TextDisplay::new(mock());
        display.write("200 at", "Delay: 1", 0).unwrap();

        let rows = lit_rows(display.target());
        assert!(rows.start < LINE_HEIGHT);
        assert!(rows.end > LINE_HEIGHT);
    }

    #[test]
    fn test_write_replaces_previous_content() {
        let mut display = TextDisplay::new(mock());
        display.write("1/200 103mins", "", 0).unwrap();
        display.write("2/200 102mins", "", 40).unwrap();

        let rows = lit_rows(display.target());
        assert!(rows.start >= 40);
    }

    #[test]
    fn test_text_near_bottom_is_clipped() {
        let mut display = TextDisplay::new(mock());
        assert!(display.write("Done!", "", 60).is_ok());
    }

    /// Buffered target counting flushes
    struct Buffered {
        inner: MockDisplay<BinaryColor>,
        flushes: usize,
    }

    impl OriginDimensions for Buffered {
        fn size(&self) -> Size {
            self.inner.size()
        }
    }

    impl DrawTarget for Buffered {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.inner.draw_iter(pixels)
        }
    }

    #[test]
    fn test_flush_after_every_write() {
        fn flush(target: &mut Buffered) -> Result<(), Infallible> {
            target.flushes += 1;
            Ok(())
        }

        let buffered = Buffered {
            inner: mock(),
            flushes: 0,
        };
        let mut display = TextDisplay::with_flush(buffered, flush);
        display.write("Num Pictures", "20", 0).unwrap();
        display.write("Num Pictures", "30", 0).unwrap();
        assert_eq!(display.into_inner().flushes, 2);
    }

    #[test]
    fn test_reporter_draws_on_text_display() {
        let mut reporter = StatusReporter::new(TextDisplay::new(mock()), CountingRng::default());
        reporter.write_at_random_row("Done!").unwrap();
        reporter.write_at_random_row("Done!").unwrap();

        // Second byte from the counting source puts the text on row 1
        let (display, _) = reporter.into_parts();
        let rows = lit_rows(display.target());
        assert!(rows.start >= 1);
        assert!(rows.end <= 1 + LINE_HEIGHT);
    }
}
