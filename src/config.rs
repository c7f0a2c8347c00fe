//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and gallery
//! constants live here so they can be tuned in one place.

use crate::ui::Screen;

// Timing

/// Settle delay after a press is detected (ms).
///
/// Bridges contact bounce and rate-limits a held button to one report
/// per window.
pub const BUTTON_DEBOUNCE_MS: u32 = 200;

/// Clock screen refresh period (ms).
pub const CLOCK_TICK_MS: u32 = 1_000;

/// How often the Clock screen samples BACK between redraws (ms).
pub const CLOCK_POLL_MS: u32 = 20;

/// How long the Settings and "No Images" placeholders stay up (ms).
pub const PLACEHOLDER_HOLD_MS: u32 = 2_000;

/// Time of day shown when the board boots, in seconds after midnight.
/// There is no RTC; the clock counts up from here.
pub const CLOCK_START_SECS: u32 = 12 * 3600;

// Display

/// Panel width in pixels (ST7735S 1.44" module).
pub const DISPLAY_WIDTH: u32 = 128;

/// Panel height in pixels.
pub const DISPLAY_HEIGHT: u32 = 128;

// Menu

/// Entries on the main menu, top to bottom.
pub const MENU_ENTRIES: &[Screen] = &[Screen::Clock, Screen::Gallery, Screen::Settings];

/// Placeholder text for an empty gallery.
pub const NO_IMAGES_TEXT: &str = "No Images";

/// Placeholder text for the Settings screen.
pub const SETTINGS_TEXT: &str = "Settings Placeholder";

/// Shown in place of a gallery image that fails to load.
pub const UNREADABLE_IMAGE_TEXT: &str = "Unreadable image";

// Gallery

/// Directory on the SD card's first volume holding gallery images.
pub const GALLERY_DIR: &str = "GALLERY";

/// File extension (8.3, case-insensitive) of gallery images.
pub const GALLERY_EXTENSION: &str = "RAW";

/// Maximum number of gallery images indexed at startup.
pub const MAX_GALLERY_IMAGES: usize = 32;

/// Widest source image the scaler accepts (pixels).
/// Bounds the row buffer to `2 * MAX_SOURCE_WIDTH` bytes.
pub const MAX_SOURCE_WIDTH: usize = 512;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button UP      → P0.11
//   Button DOWN    → P0.12
//   Button SELECT  → P0.24
//   Button BACK    → P0.25
//   SPI SCK        → P0.19
//   SPI MOSI       → P0.20
//   SPI MISO       → P0.21
//   TFT CS         → P0.22
//   TFT DC         → P0.23
//   TFT RST        → P0.13
//   TFT Backlight  → P0.14
//   SD CS          → P0.15
