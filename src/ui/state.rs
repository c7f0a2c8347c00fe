//! Menu and gallery cursors.

use crate::config::MENU_ENTRIES;
use crate::error::Error;
use crate::ui::input_logic::{select_next, select_prev};
use crate::ui::Screen;

/// Main menu: a fixed, non-empty list of screens plus the highlighted row.
///
/// Entries are screens rather than strings, so every selection maps to
/// exactly one destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuState {
    entries: &'static [Screen],
    selected: usize,
}

impl MenuState {
    pub fn new(entries: &'static [Screen]) -> Result<Self, Error> {
        if entries.is_empty() {
            return Err(Error::EmptyMenu);
        }
        Ok(Self {
            entries,
            selected: 0,
        })
    }

    pub fn entries(&self) -> &'static [Screen] {
        self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Screen behind the highlighted row.
    pub fn selected_screen(&self) -> Screen {
        // `selected < entries.len()` and `entries` is non-empty.
        self.entries
            .get(self.selected)
            .copied()
            .unwrap_or(Screen::Menu)
    }

    pub fn prev(&mut self) {
        self.selected = select_prev(self.selected, self.entries.len());
    }

    pub fn next(&mut self) {
        self.selected = select_next(self.selected, self.entries.len());
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            entries: MENU_ENTRIES,
            selected: 0,
        }
    }
}

/// Gallery cursor over `count` images. With no images the cursor stays at 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GalleryState {
    count: usize,
    index: usize,
}

impl GalleryState {
    pub fn new(count: usize) -> Self {
        Self { count, index: 0 }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn prev(&mut self) {
        self.index = select_prev(self.index, self.count);
    }

    pub fn next(&mut self) {
        self.index = select_next(self.index, self.count);
    }
}
