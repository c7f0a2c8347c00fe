//! nRF52840 board support - shared SPI bus, TFT panel, SD card, clock.
//!
//! The ST7735S panel and the SD card share SPI3; each gets its own
//! chip-select through `embedded_hal_bus::spi::RefCellDevice`. Everything
//! runs on the single navigator task, so a `RefCell` is enough.

pub mod clock;
pub mod panel;
pub mod sdcard;

use core::cell::RefCell;

use defmt::{info, warn};
use embassy_embedded_hal::SetConfig;
use embassy_nrf::gpio::Output;
use embassy_nrf::{peripherals, spim};
use embassy_time::Delay;
use embedded_hal_bus::spi::RefCellDevice;

/// SPI3 in blocking mode.
pub type SpiBus = spim::Spim<'static, peripherals::SPI3>;

/// Bus clock until the SD card is initialised (cards accept at most 400 kHz).
pub const SPI_INIT_FREQUENCY: spim::Frequency = spim::Frequency::K250;

/// Bus clock once the card is up.
pub const SPI_RUN_FREQUENCY: spim::Frequency = spim::Frequency::M8;

pub fn spi_config(frequency: spim::Frequency) -> spim::Config {
    let mut config = spim::Config::default();
    config.frequency = frequency;
    config
}

/// Switch the shared bus to [`SPI_RUN_FREQUENCY`]. Must run after the SD
/// card has been initialised.
pub fn raise_bus_clock(bus: &RefCell<SpiBus>) {
    match bus.borrow_mut().set_config(&spi_config(SPI_RUN_FREQUENCY)) {
        Ok(()) => info!("SPI: bus clock raised"),
        Err(_) => warn!("SPI: could not raise bus clock, staying slow"),
    }
}

/// One chip-selected device on the shared bus.
pub type SharedSpi = RefCellDevice<'static, SpiBus, Output<'static>, Delay>;

/// Attach a device with chip-select `cs` to `bus`.
pub fn shared_device(bus: &'static RefCell<SpiBus>, cs: Output<'static>) -> SharedSpi {
    // CS is an nRF GPIO; driving it cannot fail.
    RefCellDevice::new(bus, cs, Delay).unwrap_or_else(|e| match e {})
}
