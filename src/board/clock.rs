//! Wall clock derived from Embassy uptime (the board has no RTC).

use embassy_time::Instant;

use menunav::clock::{TimeOfDay, WallClock};

pub struct UptimeClock {
    start_secs: u32,
}

impl UptimeClock {
    /// `start_secs` is the time of day, in seconds after midnight, at boot.
    pub fn new(start_secs: u32) -> Self {
        Self { start_secs }
    }
}

impl WallClock for UptimeClock {
    fn now(&self) -> TimeOfDay {
        TimeOfDay::from_secs(self.start_secs as u64 + Instant::now().as_secs())
    }
}
