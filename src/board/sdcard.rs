//! Gallery images on the SD card, via `embedded-sdmmc`.
//!
//! The directory is listed once at mount time. Reads reopen the file on
//! every call; the navigator only reads while drawing, so handle churn is
//! not worth caching.

use core::cell::RefCell;

use defmt::{info, warn, Debug2Format};
use embassy_nrf::gpio::Output;
use embassy_time::Delay;
use embedded_hal::spi::SpiBus as _;
use embedded_sdmmc::{Mode, SdCard, SdCardError, TimeSource, Timestamp, VolumeIdx, VolumeManager};

use menunav::config::{GALLERY_DIR, MAX_GALLERY_IMAGES};
use menunav::gallery::{GalleryIndex, ImageStore};
use menunav::Error;

use super::{shared_device, SharedSpi, SpiBus};

type Card = SdCard<SharedSpi, Delay>;
type Volumes = VolumeManager<Card, FixedTime, 4, 4, 1>;
type SdError = embedded_sdmmc::Error<SdCardError>;

/// The card is only read, so file timestamps never matter.
pub struct FixedTime;

impl TimeSource for FixedTime {
    fn get_timestamp(&self) -> Timestamp {
        Timestamp {
            year_since_1970: 56,
            zero_indexed_month: 0,
            zero_indexed_day: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

/// Send the power-up clocks a card needs before its first command: at
/// least 74 cycles with every chip-select high, at init speed.
pub fn power_up_clocks(bus: &mut SpiBus) {
    let ones = [0xFFu8; 10];
    if bus.write(&ones).is_err() {
        warn!("SD: power-up clocks failed");
    }
}

/// [`ImageStore`] backed by `GALLERY_DIR` on the card's first volume.
pub struct SdGallery {
    volumes: Volumes,
    index: GalleryIndex,
}

impl SdGallery {
    /// Attach the card and list its gallery.
    ///
    /// The bus must still be at `SPI_INIT_FREQUENCY` and have had
    /// [`power_up_clocks`]: listing is what initialises the card.
    /// A missing card, volume or directory gives an empty gallery.
    pub fn mount(bus: &'static RefCell<SpiBus>, cs: Output<'static>) -> Self {
        let card = SdCard::new(shared_device(bus, cs), Delay);
        let volumes = VolumeManager::new(card, FixedTime);

        let index = match scan(&volumes) {
            Ok(index) => index,
            Err(e) => {
                warn!("Gallery: SD card unavailable: {}", Debug2Format(&e));
                GalleryIndex::new()
            }
        };
        info!("Gallery: {} images in /{}", index.len(), GALLERY_DIR);

        Self { volumes, index }
    }
}

fn scan(volumes: &Volumes) -> Result<GalleryIndex, SdError> {
    let volume = volumes.open_volume(VolumeIdx(0))?;
    let root = volume.open_root_dir()?;
    let dir = match root.open_dir(GALLERY_DIR) {
        Ok(dir) => dir,
        Err(embedded_sdmmc::Error::NotFound) => {
            info!("Gallery: no /{} directory", GALLERY_DIR);
            return Ok(GalleryIndex::new());
        }
        Err(e) => return Err(e),
    };

    let mut index = GalleryIndex::new();
    let mut full = false;
    dir.iterate_dir(|entry| {
        if full || entry.attributes.is_directory() {
            return;
        }
        let (Ok(base), Ok(ext)) = (
            core::str::from_utf8(entry.name.base_name()),
            core::str::from_utf8(entry.name.extension()),
        ) else {
            return;
        };
        if let Err(Error::GalleryFull) = index.offer(base, ext) {
            full = true;
        }
    })?;

    if full {
        warn!(
            "Gallery: more than {} images, the rest are skipped",
            MAX_GALLERY_IMAGES
        );
    }
    Ok(index)
}

fn read_file(volumes: &Volumes, name: &str, offset: u32, buf: &mut [u8]) -> Result<usize, SdError> {
    let volume = volumes.open_volume(VolumeIdx(0))?;
    let root = volume.open_root_dir()?;
    let dir = root.open_dir(GALLERY_DIR)?;
    let file = dir.open_file_in_dir(name, Mode::ReadOnly)?;
    file.seek_from_start(offset)?;

    let mut filled = 0;
    while filled < buf.len() {
        let n = file.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

impl ImageStore for SdGallery {
    fn len(&self) -> usize {
        self.index.len()
    }

    fn read_at(&mut self, index: usize, offset: u32, buf: &mut [u8]) -> Result<usize, Error> {
        let name = self.index.get(index).ok_or(Error::InvalidImage)?;
        read_file(&self.volumes, name, offset, buf).map_err(|e| {
            warn!("Gallery: read {} failed: {}", name, Debug2Format(&e));
            Error::Storage
        })
    }
}
