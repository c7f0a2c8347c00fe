//! Unified error type for menunav.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (with the `defmt` feature) for on-target logging.

use core::fmt;

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // UI / Display
    /// Panel initialisation or frame transfer failed.
    Display,

    /// A menu was built with no entries.
    EmptyMenu,

    // Storage
    /// SD card, volume, or file access failed.
    Storage,

    // Gallery
    /// More gallery images than `MAX_GALLERY_IMAGES`.
    GalleryFull,

    /// Image header is malformed or the pixel data is truncated.
    InvalidImage,

    /// Source image is wider than `MAX_SOURCE_WIDTH`.
    ImageTooWide(u16),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Display => f.write_str("display transfer failed"),
            Error::EmptyMenu => f.write_str("menu has no entries"),
            Error::Storage => f.write_str("storage access failed"),
            Error::GalleryFull => f.write_str("gallery index is full"),
            Error::InvalidImage => f.write_str("invalid or truncated image"),
            Error::ImageTooWide(w) => write!(f, "image too wide ({} px)", w),
        }
    }
}
