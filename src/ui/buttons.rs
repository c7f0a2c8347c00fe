//! GPIO button input with a post-press settle delay.
//!
//! Four physical buttons (active-low with internal pull-up):
//!   - UP     - previous menu entry / previous image
//!   - DOWN   - next menu entry / next image
//!   - SELECT - open the highlighted screen
//!   - BACK   - leave the gallery (and the clock, see `ClockExit`)
//!
//! There is no event queue. Each [`InputReader::poll`] samples the lines
//! once; a press that happens between polls is never seen.

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;

use crate::ui::Button;

/// Pin-level read service: is this button's line currently active?
///
/// Debouncing is the reader's job, not the implementor's.
pub trait ButtonLines {
    fn is_active(&mut self, button: Button) -> bool;
}

/// Button lines backed by four GPIO inputs wired active-low.
pub struct GpioButtons<P> {
    up: P,
    down: P,
    select: P,
    back: P,
}

impl<P: InputPin> GpioButtons<P> {
    pub fn new(up: P, down: P, select: P, back: P) -> Self {
        Self {
            up,
            down,
            select,
            back,
        }
    }

    /// Give the pins back (e.g. to reconfigure them before sleep).
    pub fn release(self) -> [P; 4] {
        [self.up, self.down, self.select, self.back]
    }
}

impl<P: InputPin> ButtonLines for GpioButtons<P> {
    fn is_active(&mut self, button: Button) -> bool {
        let pin = match button {
            Button::Up => &mut self.up,
            Button::Down => &mut self.down,
            Button::Select => &mut self.select,
            Button::Back => &mut self.back,
        };
        // Pulled up: idle reads high, pressed reads low.
        match pin.is_low() {
            Ok(pressed) => pressed,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Button: read failed on {}, treating as idle", button);
                false
            }
        }
    }
}

/// Turns raw line levels into at most one logical press per poll.
pub struct InputReader<L, D> {
    lines: L,
    delay: D,
    debounce_ms: u32,
}

impl<L, D> InputReader<L, D>
where
    L: ButtonLines,
    D: DelayNs,
{
    pub fn new(lines: L, delay: D, debounce_ms: u32) -> Self {
        Self {
            lines,
            delay,
            debounce_ms,
        }
    }

    /// Sample every line in priority order and report the first active one.
    ///
    /// After a hit this waits out the debounce window before returning, so
    /// a held button is reported at most once per window. Returns `None`
    /// straight away when nothing is pressed.
    pub async fn poll(&mut self) -> Option<Button> {
        let lines = &mut self.lines;
        let pressed = Button::ALL.into_iter().find(|&b| lines.is_active(b))?;

        self.delay.delay_ms(self.debounce_ms).await;

        #[cfg(feature = "defmt")]
        defmt::debug!("Button: {}", pressed);
        Some(pressed)
    }

    pub fn into_lines(self) -> L {
        self.lines
    }
}
