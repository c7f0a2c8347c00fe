//! User interface subsystem - TFT display + physical buttons.
//!
//! The navigator maintains a state machine that reacts to button presses,
//! rendering the current screen on the 128×128 panel.
//!
//! ## Components
//!
//! - **Buttons**: 4 tactile switches, polled with a settle delay (UP, DOWN, SELECT, BACK)
//! - **Display**: frame composition + transfer to the panel
//! - **Navigator**: one handler per screen, each returning the next transition

pub mod buttons;
pub mod display;
pub mod input_logic;
pub mod navigator;
pub mod state;

#[cfg(test)]
pub(crate) mod fakes;

/// Screens (views) the UI can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Main menu - list of the other screens.
    Menu,
    /// Wall-clock time, refreshed every tick.
    Clock,
    /// SD-card image viewer.
    Gallery,
    /// Placeholder, returns to the menu on its own.
    Settings,
}

impl Screen {
    /// Label shown for this screen on the menu.
    pub fn label(self) -> &'static str {
        match self {
            Screen::Menu => "Menu",
            Screen::Clock => "Clock",
            Screen::Gallery => "Gallery",
            Screen::Settings => "Settings",
        }
    }
}

/// Physical buttons.
///
/// Declaration order is the poll priority: when several lines are active
/// at once the earliest one wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Up,
    Down,
    Select,
    Back,
}

impl Button {
    /// Every button, in poll priority order.
    pub const ALL: [Button; 4] = [Button::Up, Button::Down, Button::Select, Button::Back];
}
