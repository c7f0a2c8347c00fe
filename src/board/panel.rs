//! ST7735S 128×128 TFT via `mipidsi`.

use core::cell::RefCell;

use defmt::{info, warn};
use embassy_nrf::gpio::Output;
use embassy_time::Delay;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7735s;
use mipidsi::options::{Orientation, Rotation};
use mipidsi::{Builder as MipidsiBuilder, Display};
use static_cell::StaticCell;

use menunav::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use menunav::Error;

use super::{shared_device, SharedSpi, SpiBus};

/// Concrete panel type handed to the frame renderer.
pub type Panel = Display<SpiInterface<'static, SharedSpi, Output<'static>>, ST7735s, Output<'static>>;

/// Batching buffer for pixel writes (larger = fewer SPI transactions).
static SPI_BUFFER: StaticCell<[u8; 512]> = StaticCell::new();

/// Initialise the panel. Must be called exactly once.
pub fn init(
    bus: &'static RefCell<SpiBus>,
    cs: Output<'static>,
    dc: Output<'static>,
    rst: Output<'static>,
) -> Result<Panel, Error> {
    let spi = shared_device(bus, cs);
    let buffer = SPI_BUFFER.init([0u8; 512]);
    let di = SpiInterface::new(spi, dc, buffer);

    let panel = MipidsiBuilder::new(ST7735s, di)
        .display_size(DISPLAY_WIDTH as u16, DISPLAY_HEIGHT as u16)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .reset_pin(rst)
        .init(&mut Delay)
        .map_err(|_| {
            warn!("Display: ST7735S init failed");
            Error::Display
        })?;

    info!("Display: {}x{} ready", DISPLAY_WIDTH, DISPLAY_HEIGHT);
    Ok(panel)
}
