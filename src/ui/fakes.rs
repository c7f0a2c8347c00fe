//! Host-side stand-ins for the hardware seams, shared by the unit tests.
//!
//! Everything time-related reads one simulated millisecond counter that
//! only moves when a [`FakeDelay`] is awaited.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;

use crate::clock::{TimeOfDay, WallClock};
use crate::ui::buttons::ButtonLines;
use crate::ui::display::Renderer;
use crate::ui::state::MenuState;
use crate::ui::Button;

/// Simulated monotonic time in nanoseconds.
#[derive(Clone, Default)]
pub struct SimTime(Rc<Cell<u64>>);

impl SimTime {
    pub fn now_ms(&self) -> u64 {
        self.0.get() / 1_000_000
    }

    fn advance_ns(&self, ns: u64) {
        self.0.set(self.0.get() + ns);
    }
}

/// Delay that advances [`SimTime`] instead of sleeping.
#[derive(Clone, Default)]
pub struct FakeDelay {
    pub time: SimTime,
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.time.advance_ns(ns as u64);
    }

    async fn delay_us(&mut self, us: u32) {
        self.time.advance_ns(us as u64 * 1_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.time.advance_ns(ms as u64 * 1_000_000);
    }
}

/// Wall clock reading [`SimTime`].
pub struct FakeClock {
    pub time: SimTime,
}

impl WallClock for FakeClock {
    fn now(&self) -> TimeOfDay {
        TimeOfDay::from_secs(self.time.now_ms() / 1_000)
    }
}

/// Button lines replaying one set of held buttons per poll.
///
/// A poll always starts by reading `Button::Up`, so that read pulls the
/// next frame off the script. An exhausted script reads as all idle.
#[derive(Clone, Default)]
pub struct ScriptedLines {
    script: Rc<RefCell<VecDeque<Vec<Button>>>>,
    held: Vec<Button>,
    polls: Rc<Cell<usize>>,
}

impl ScriptedLines {
    pub fn new<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = Option<Button>>,
    {
        let script: VecDeque<Vec<Button>> = frames
            .into_iter()
            .map(|frame| frame.into_iter().collect::<Vec<Button>>())
            .collect();
        Self {
            script: Rc::new(RefCell::new(script)),
            ..Self::default()
        }
    }

    /// Queue a frame with several buttons held at once.
    pub fn push_chord(&self, buttons: &[Button]) {
        self.script.borrow_mut().push_back(buttons.to_vec());
    }

    /// Number of polls that have read the lines so far.
    pub fn polls(&self) -> usize {
        self.polls.get()
    }

    pub fn remaining(&self) -> usize {
        self.script.borrow().len()
    }
}

impl ButtonLines for ScriptedLines {
    fn is_active(&mut self, button: Button) -> bool {
        if button == Button::ALL[0] {
            self.polls.set(self.polls.get() + 1);
            self.held = self.script.borrow_mut().pop_front().unwrap_or_default();
        }
        self.held.contains(&button)
    }
}

/// Button lines driven by [`SimTime`]: each entry holds a button down
/// for `[from_ms, to_ms)`.
pub struct TimedLines {
    time: SimTime,
    presses: Vec<(Button, u64, u64)>,
}

impl TimedLines {
    pub fn new(time: SimTime, presses: &[(Button, u64, u64)]) -> Self {
        Self {
            time,
            presses: presses.to_vec(),
        }
    }
}

impl ButtonLines for TimedLines {
    fn is_active(&mut self, button: Button) -> bool {
        let now = self.time.now_ms();
        self.presses
            .iter()
            .any(|&(b, from, to)| b == button && (from..to).contains(&now))
    }
}

/// One rendered frame, as seen by the navigator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    Menu {
        labels: Vec<&'static str>,
        selected: usize,
    },
    Clock(String),
    Image(usize),
    Message(String),
}

/// Renderer that records what it was asked to draw.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    frames: Rc<RefCell<Vec<Frame>>>,
    images: usize,
}

impl RecordingRenderer {
    /// Renderer whose image store holds `images` images.
    pub fn with_images(images: usize) -> Self {
        Self {
            images,
            ..Self::default()
        }
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.frames.borrow().clone()
    }

    pub fn last(&self) -> Option<Frame> {
        self.frames.borrow().last().cloned()
    }
}

impl Renderer for RecordingRenderer {
    fn image_count(&self) -> usize {
        self.images
    }

    fn menu(&mut self, menu: &MenuState) {
        self.frames.borrow_mut().push(Frame::Menu {
            labels: menu.entries().iter().map(|s| s.label()).collect(),
            selected: menu.selected(),
        });
    }

    fn clock(&mut self, time: TimeOfDay) {
        self.frames
            .borrow_mut()
            .push(Frame::Clock(time.format().as_str().into()));
    }

    fn image(&mut self, index: usize) {
        self.frames.borrow_mut().push(Frame::Image(index));
    }

    fn message(&mut self, text: &str) {
        self.frames.borrow_mut().push(Frame::Message(text.into()));
    }
}
