//! menunav firmware - nRF52840 + ST7735S TFT + SD card + four buttons.
//!
//! Wires the board peripherals into the hardware-independent
//! [`menunav::Navigator`] and runs it forever on the main task.

#![no_std]
#![no_main]

mod board;

use core::cell::RefCell;

use defmt::info;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::{bind_interrupts, peripherals, spim};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use menunav::config;
use menunav::gallery::ImageStore;
use menunav::ui::buttons::GpioButtons;
use menunav::ui::display::{FrameBuffer, FrameRenderer};
use menunav::{Navigator, NavigatorConfig};

use board::clock::UptimeClock;
use board::sdcard::SdGallery;
use board::SpiBus;

bind_interrupts!(struct Irqs {
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
});

static SPI_BUS: StaticCell<RefCell<SpiBus>> = StaticCell::new();
static FRAME: StaticCell<FrameBuffer> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("menunav starting");

    // Buttons: active-low, internal pull-ups (see config.rs pin map).
    let buttons = GpioButtons::new(
        Input::new(p.P0_11, Pull::Up),
        Input::new(p.P0_12, Pull::Up),
        Input::new(p.P0_24, Pull::Up),
        Input::new(p.P0_25, Pull::Up),
    );

    // Both chip-selects idle high before the bus carries anything, so the
    // card never latches panel traffic.
    let tft_cs = Output::new(p.P0_22, Level::High, OutputDrive::Standard);
    let sd_cs = Output::new(p.P0_15, Level::High, OutputDrive::Standard);

    let mut spi = spim::Spim::new(
        p.SPI3,
        Irqs,
        p.P0_19,
        p.P0_21,
        p.P0_20,
        board::spi_config(board::SPI_INIT_FREQUENCY),
    );
    board::sdcard::power_up_clocks(&mut spi);
    let bus = SPI_BUS.init(RefCell::new(spi));

    let panel = match board::panel::init(
        bus,
        tft_cs,
        Output::new(p.P0_23, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_13, Level::High, OutputDrive::Standard),
    ) {
        Ok(panel) => panel,
        Err(e) => defmt::panic!("Display init failed: {}", e),
    };
    // Held for the life of the program; dropping it would disconnect the pin.
    let _backlight = Output::new(p.P0_14, Level::High, OutputDrive::Standard);

    let gallery = SdGallery::mount(bus, sd_cs);
    board::raise_bus_clock(bus);
    let image_count = gallery.len();

    let frame = FRAME.init_with(FrameBuffer::new);
    let renderer = FrameRenderer::new(panel, gallery, frame);
    let clock = UptimeClock::new(config::CLOCK_START_SECS);

    let mut navigator = Navigator::new(buttons, Delay, renderer, clock, NavigatorConfig::default());
    info!("Navigator running ({} images)", image_count);
    navigator.run().await
}
