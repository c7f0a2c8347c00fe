//! Gallery image index and nearest-neighbour scaling.
//!
//! Images live in `GALLERY_DIR` on the SD card as `.RAW` files:
//!
//! ```text
//! [u16 LE width][u16 LE height][width*height RGB565 LE pixels, row-major]
//! ```
//!
//! The gallery draws them scaled to whatever the target's size is, one
//! destination row at a time, so only a single source row is ever held
//! in RAM.

use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::{String, Vec};

use crate::config::{GALLERY_EXTENSION, MAX_GALLERY_IMAGES, MAX_SOURCE_WIDTH};
use crate::error::Error;

/// Size of the `.RAW` header in bytes.
pub const HEADER_LEN: u32 = 4;

/// 8.3 file name, e.g. `SUNSET.RAW`.
pub type ImageName = String<12>;

/// Random-access reader over the gallery's image files.
pub trait ImageStore {
    /// Number of images available.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read bytes of image `index` starting at `offset`.
    ///
    /// Returns how many bytes were read; fewer than `buf.len()` means the
    /// file ended.
    fn read_at(&mut self, index: usize, offset: u32, buf: &mut [u8]) -> Result<usize, Error>;
}

/// Sorted list of image files found at startup.
#[derive(Clone, Debug, Default)]
pub struct GalleryIndex {
    names: Vec<ImageName, MAX_GALLERY_IMAGES>,
}

impl GalleryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consider one directory entry, given as 8.3 base name and extension.
    ///
    /// Returns `Ok(true)` if it was added, `Ok(false)` if it is not a
    /// gallery image.
    pub fn offer(&mut self, base: &str, ext: &str) -> Result<bool, Error> {
        if base.is_empty() || !ext.eq_ignore_ascii_case(GALLERY_EXTENSION) {
            return Ok(false);
        }

        let mut name = ImageName::new();
        name.push_str(base).map_err(|_| Error::InvalidImage)?;
        name.push('.').map_err(|_| Error::InvalidImage)?;
        name.push_str(ext).map_err(|_| Error::InvalidImage)?;

        let pos = self
            .names
            .binary_search(&name)
            .unwrap_or_else(|insert_at| insert_at);
        self.names
            .insert(pos, name)
            .map_err(|_| Error::GalleryFull)?;
        Ok(true)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(|n| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Dimensions from a `.RAW` header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImageHeader {
    pub width: u16,
    pub height: u16,
}

impl ImageHeader {
    pub fn parse(bytes: [u8; HEADER_LEN as usize]) -> Result<Self, Error> {
        let width = u16::from_le_bytes([bytes[0], bytes[1]]);
        let height = u16::from_le_bytes([bytes[2], bytes[3]]);
        if width == 0 || height == 0 {
            return Err(Error::InvalidImage);
        }
        if width as usize > MAX_SOURCE_WIDTH {
            return Err(Error::ImageTooWide(width));
        }
        Ok(Self { width, height })
    }

    pub fn row_bytes(&self) -> usize {
        self.width as usize * 2
    }

    /// File offset of the first pixel of `row`.
    pub fn row_offset(&self, row: u16) -> u32 {
        HEADER_LEN + row as u32 * self.row_bytes() as u32
    }
}

/// Map a destination coordinate onto the source axis (nearest neighbour).
pub fn scale_coord(dst: u32, dst_len: u32, src_len: u32) -> u32 {
    if dst_len == 0 {
        return 0;
    }
    ((dst as u64 * src_len as u64) / dst_len as u64) as u32
}

fn read_exact<S: ImageStore>(
    store: &mut S,
    index: usize,
    offset: u32,
    buf: &mut [u8],
) -> Result<(), Error> {
    if store.read_at(index, offset, buf)? < buf.len() {
        return Err(Error::InvalidImage);
    }
    Ok(())
}

/// Draw image `index` stretched over the whole of `target`.
pub fn draw_scaled<S, D>(store: &mut S, index: usize, target: &mut D) -> Result<ImageHeader, Error>
where
    S: ImageStore,
    D: DrawTarget<Color = Rgb565>,
{
    let mut raw_header = [0u8; HEADER_LEN as usize];
    read_exact(store, index, 0, &mut raw_header)?;
    let header = ImageHeader::parse(raw_header)?;

    let area = target.bounding_box();
    let size = area.size;
    let mut row_buf = [0u8; MAX_SOURCE_WIDTH * 2];
    let row = &mut row_buf[..header.row_bytes()];
    let mut loaded: Option<u32> = None;

    for y in 0..size.height {
        let src_y = scale_coord(y, size.height, header.height as u32);
        if loaded != Some(src_y) {
            read_exact(store, index, header.row_offset(src_y as u16), row)?;
            loaded = Some(src_y);
        }

        let row = &*row;
        let colors = (0..size.width).map(|x| {
            let src_x = scale_coord(x, size.width, header.width as u32) as usize * 2;
            Rgb565::from(RawU16::new(u16::from_le_bytes([row[src_x], row[src_x + 1]])))
        });
        let line = Rectangle::new(
            area.top_left + Point::new(0, y as i32),
            Size::new(size.width, 1),
        );
        target
            .fill_contiguous(&line, colors)
            .map_err(|_| Error::Display)?;
    }

    Ok(header)
}
