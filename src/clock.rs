//! Wall-clock time for the Clock screen.

use core::fmt::Write;

const SECS_PER_DAY: u32 = 24 * 3600;

/// Source of the current time of day.
pub trait WallClock {
    fn now(&self) -> TimeOfDay;
}

/// Hours, minutes and seconds within one day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeOfDay {
    /// Build from seconds since midnight, wrapping every 24 h.
    pub fn from_secs(secs: u64) -> Self {
        let secs = (secs % SECS_PER_DAY as u64) as u32;
        Self {
            hours: (secs / 3600) as u8,
            minutes: (secs / 60 % 60) as u8,
            seconds: (secs % 60) as u8,
        }
    }

    /// `HH:MM:SS`.
    pub fn format(&self) -> heapless::String<8> {
        let mut out = heapless::String::new();
        // 8 chars always fit.
        let _ = write!(
            out,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        );
        out
    }
}
