//! Frame composition and transfer to the TFT panel.
//!
//! Every screen is drawn into an in-RAM [`FrameBuffer`] first and then
//! pushed to the panel in one `fill_contiguous` call, so the panel never
//! shows a half-drawn frame.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::clock::TimeOfDay;
use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH, UNREADABLE_IMAGE_TEXT};
use crate::gallery::{self, ImageStore};
use crate::ui::state::MenuState;

const FRAME_PIXELS: usize = (DISPLAY_WIDTH * DISPLAY_HEIGHT) as usize;

/// Left margin of the menu and clock.
const MARGIN_X: i32 = 10;
/// Left margin of one-line messages; 20 glyphs of `FONT_6X10` must fit.
const MESSAGE_X: i32 = 4;
/// Top of the first menu row.
const MENU_TOP: i32 = 20;
/// Vertical distance between menu rows.
const MENU_PITCH: i32 = 30;
/// Baseline row for single-line screens (clock, messages).
const BODY_Y: i32 = 50;

/// What the navigator asks to be shown. Drawing never fails from the
/// navigator's point of view; implementations deal with their own errors.
pub trait Renderer {
    /// Number of images the gallery can show.
    fn image_count(&self) -> usize;

    /// All menu labels, with the selected row highlighted.
    fn menu(&mut self, menu: &MenuState);

    fn clock(&mut self, time: TimeOfDay);

    /// Gallery image `index`, scaled to the panel.
    fn image(&mut self, index: usize);

    /// A single line of text on a blank screen.
    fn message(&mut self, text: &str);
}

/// Full-screen RGB565 frame held in RAM (32 KiB).
pub struct FrameBuffer {
    pixels: [Rgb565; FRAME_PIXELS],
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            pixels: [Rgb565::BLACK; FRAME_PIXELS],
        }
    }

    pub fn pixel(&self, p: Point) -> Option<Rgb565> {
        Self::offset(p).map(|i| self.pixels[i])
    }

    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    fn offset(p: Point) -> Option<usize> {
        let (x, y) = (p.x, p.y);
        if x < 0 || y < 0 || x >= DISPLAY_WIDTH as i32 || y >= DISPLAY_HEIGHT as i32 {
            return None;
        }
        Some(y as usize * DISPLAY_WIDTH as usize + x as usize)
    }

    /// Send the whole frame to `panel`.
    pub fn present<P>(&self, panel: &mut P) -> Result<(), P::Error>
    where
        P: DrawTarget<Color = Rgb565>,
    {
        panel.fill_contiguous(&self.bounding_box(), self.pixels.iter().copied())
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = Self::offset(point) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

/// Colour of the highlighted menu row and of all single-line text.
pub fn highlight_color() -> Rgb565 {
    Rgb565::WHITE
}

/// Colour of unselected menu rows.
pub fn dimmed_color() -> Rgb565 {
    Rgb565::from(Rgb888::new(100, 100, 100))
}

fn text_style(font: &'static MonoFont<'static>, color: Rgb565) -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyleBuilder::new()
        .font(font)
        .text_color(color)
        .build()
}

/// Top edge of menu row `row`.
pub fn menu_row_y(row: usize) -> i32 {
    MENU_TOP + row as i32 * MENU_PITCH
}

fn body_line<'t>(
    text: &'t str,
    x: i32,
    font: &'static MonoFont<'static>,
) -> Text<'t, MonoTextStyle<'static, Rgb565>> {
    Text::with_baseline(
        text,
        Point::new(x, BODY_Y),
        text_style(font, highlight_color()),
        Baseline::Top,
    )
}

fn draw_message(frame: &mut FrameBuffer, text: &str) {
    let _ = body_line(text, MESSAGE_X, &FONT_6X10).draw(frame);
}

/// [`Renderer`] that composes frames with embedded-graphics and pushes
/// them to a panel.
pub struct FrameRenderer<'a, P, S> {
    panel: P,
    images: S,
    frame: &'a mut FrameBuffer,
}

impl<'a, P, S> FrameRenderer<'a, P, S>
where
    P: DrawTarget<Color = Rgb565>,
    S: ImageStore,
{
    pub fn new(panel: P, images: S, frame: &'a mut FrameBuffer) -> Self {
        Self {
            panel,
            images,
            frame,
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &*self.frame
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    fn blank(&mut self) {
        let _ = self.frame.clear(Rgb565::BLACK);
    }

    fn flush(&mut self) {
        if self.frame.present(&mut self.panel).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Display: frame transfer failed, frame dropped");
        }
    }
}

impl<'a, P, S> Renderer for FrameRenderer<'a, P, S>
where
    P: DrawTarget<Color = Rgb565>,
    S: ImageStore,
{
    fn image_count(&self) -> usize {
        self.images.len()
    }

    fn menu(&mut self, menu: &MenuState) {
        self.blank();

        for (row, screen) in menu.entries().iter().enumerate() {
            let color = if row == menu.selected() {
                highlight_color()
            } else {
                dimmed_color()
            };
            let _ = Text::with_baseline(
                screen.label(),
                Point::new(MARGIN_X, menu_row_y(row)),
                text_style(&FONT_10X20, color),
                Baseline::Top,
            )
            .draw(&mut *self.frame);
        }

        self.flush();
    }

    fn clock(&mut self, time: TimeOfDay) {
        self.blank();
        let _ = body_line(time.format().as_str(), MARGIN_X, &FONT_10X20).draw(&mut *self.frame);
        self.flush();
    }

    fn image(&mut self, index: usize) {
        if let Err(_e) = gallery::draw_scaled(&mut self.images, index, &mut *self.frame) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Gallery: image {} unreadable: {}", index, _e);
            self.blank();
            draw_message(&mut *self.frame, UNREADABLE_IMAGE_TEXT);
        }
        self.flush();
    }

    fn message(&mut self, text: &str) {
        self.blank();
        draw_message(&mut *self.frame, text);
        self.flush();
    }
}
