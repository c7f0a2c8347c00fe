//! Four-button menu navigator for a 128×128 TFT appliance.
//!
//! Everything here is hardware-independent: the navigator talks to the
//! buttons through [`ui::buttons::ButtonLines`], to time through
//! `embedded_hal_async::delay::DelayNs` and [`clock::WallClock`], and to the
//! panel through [`ui::display::Renderer`]. The firmware binary (`main.rs`,
//! `embedded` feature) plugs in the nRF52840 implementations; host tests
//! plug in fakes.
//!
//! Usage: `cargo test --lib` / `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].
//! Enable the `defmt` feature to get on-target logging from this crate.

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod error;
pub mod gallery;
pub mod ui;

pub use error::Error;
pub use ui::navigator::{ClockExit, Navigator, NavigatorConfig, Transition};
pub use ui::{Button, Screen};
