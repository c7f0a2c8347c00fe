//! Screen state machine.
//!
//! One handler per [`Screen`]. Each call to [`Navigator::step`] runs one
//! iteration of the current screen's loop (render, then react) and applies
//! the [`Transition`] it returns. [`Navigator::run`] steps forever.

use embedded_hal_async::delay::DelayNs;

use crate::clock::WallClock;
use crate::config::{
    BUTTON_DEBOUNCE_MS, CLOCK_POLL_MS, CLOCK_TICK_MS, NO_IMAGES_TEXT, PLACEHOLDER_HOLD_MS,
    SETTINGS_TEXT,
};
use crate::ui::buttons::{ButtonLines, InputReader};
use crate::ui::display::Renderer;
use crate::ui::state::{GalleryState, MenuState};
use crate::ui::{Button, Screen};

/// What a screen handler wants to happen next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    Stay,
    Goto(Screen),
}

/// How the Clock screen can be left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockExit {
    /// Buttons are never read while the clock is up; the screen cannot be
    /// left without a reset.
    Never,
    /// BACK returns to the menu. The lines are polled every
    /// `clock_poll_ms` between redraws.
    #[default]
    OnBack,
}

/// Timings and policies for the navigator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigatorConfig {
    pub debounce_ms: u32,
    pub clock_tick_ms: u32,
    pub clock_poll_ms: u32,
    pub placeholder_ms: u32,
    pub clock_exit: ClockExit,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: BUTTON_DEBOUNCE_MS,
            clock_tick_ms: CLOCK_TICK_MS,
            clock_poll_ms: CLOCK_POLL_MS,
            placeholder_ms: PLACEHOLDER_HOLD_MS,
            clock_exit: ClockExit::default(),
        }
    }
}

/// Owns all navigation state and the collaborators it drives.
pub struct Navigator<L, D, R, C> {
    screen: Screen,
    menu: MenuState,
    gallery: GalleryState,
    input: InputReader<L, D>,
    delay: D,
    renderer: R,
    clock: C,
    config: NavigatorConfig,
}

impl<L, D, R, C> Navigator<L, D, R, C>
where
    L: ButtonLines,
    D: DelayNs + Clone,
    R: Renderer,
    C: WallClock,
{
    /// Start on the menu with the default entries. The gallery size is
    /// taken from the renderer's image store.
    pub fn new(lines: L, delay: D, renderer: R, clock: C, config: NavigatorConfig) -> Self {
        Self {
            screen: Screen::Menu,
            menu: MenuState::default(),
            gallery: GalleryState::new(renderer.image_count()),
            input: InputReader::new(lines, delay.clone(), config.debounce_ms),
            delay,
            renderer,
            clock,
            config,
        }
    }

    /// Replace the menu entries.
    pub fn with_menu(mut self, menu: MenuState) -> Self {
        self.menu = menu;
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn gallery(&self) -> &GalleryState {
        &self.gallery
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Tear down, handing back the button lines and renderer.
    pub fn into_parts(self) -> (L, R) {
        (self.input.into_lines(), self.renderer)
    }

    /// Run the UI forever.
    pub async fn run(&mut self) -> ! {
        #[cfg(feature = "defmt")]
        defmt::info!("Nav: starting on {}", self.screen);
        loop {
            self.step().await;
        }
    }

    /// One iteration of the current screen, then apply its transition.
    pub async fn step(&mut self) -> Transition {
        let transition = match self.screen {
            Screen::Menu => self.menu_step().await,
            Screen::Clock => self.clock_step().await,
            Screen::Gallery => self.gallery_step().await,
            Screen::Settings => self.settings_step().await,
        };

        if let Transition::Goto(next) = transition {
            #[cfg(feature = "defmt")]
            defmt::info!("Nav: {} -> {}", self.screen, next);
            self.screen = next;
        }
        transition
    }

    async fn menu_step(&mut self) -> Transition {
        self.renderer.menu(&self.menu);

        match self.input.poll().await {
            Some(Button::Up) => self.menu.prev(),
            Some(Button::Down) => self.menu.next(),
            Some(Button::Select) => return Transition::Goto(self.menu.selected_screen()),
            Some(Button::Back) | None => {}
        }
        Transition::Stay
    }

    /// Draw the time, then wait out one tick. With `ClockExit::OnBack` the
    /// tick is spent polling in `clock_poll_ms` slices so a short BACK tap
    /// anywhere in it is seen.
    async fn clock_step(&mut self) -> Transition {
        self.renderer.clock(self.clock.now());

        let tick = self.config.clock_tick_ms;
        let slice = match self.config.clock_exit {
            ClockExit::Never => tick,
            ClockExit::OnBack => self.config.clock_poll_ms.max(1),
        };

        let mut waited = 0;
        while waited < tick {
            if self.config.clock_exit == ClockExit::OnBack {
                match self.input.poll().await {
                    Some(Button::Back) => return Transition::Goto(Screen::Menu),
                    // The debounce wait already ate into the tick.
                    Some(_) => {
                        waited += self.config.debounce_ms;
                        continue;
                    }
                    None => {}
                }
            }
            let wait = slice.min(tick - waited);
            self.delay.delay_ms(wait).await;
            waited += wait;
        }
        Transition::Stay
    }

    async fn gallery_step(&mut self) -> Transition {
        if self.gallery.is_empty() {
            return self.placeholder(NO_IMAGES_TEXT).await;
        }

        self.renderer.image(self.gallery.index());

        match self.input.poll().await {
            Some(Button::Up) => self.gallery.prev(),
            Some(Button::Down) => self.gallery.next(),
            Some(Button::Back) => return Transition::Goto(Screen::Menu),
            Some(Button::Select) | None => {}
        }
        Transition::Stay
    }

    async fn settings_step(&mut self) -> Transition {
        self.placeholder(SETTINGS_TEXT).await
    }

    /// Show `text` for the hold time, then go back to the menu.
    async fn placeholder(&mut self, text: &str) -> Transition {
        self.renderer.message(text);
        self.delay.delay_ms(self.config.placeholder_ms).await;
        Transition::Goto(Screen::Menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::fakes::{
        FakeClock, FakeDelay, Frame, RecordingRenderer, ScriptedLines, SimTime, TimedLines,
    };
    use embassy_futures::block_on;

    type TestNavigator = Navigator<ScriptedLines, FakeDelay, RecordingRenderer, FakeClock>;

    struct Rig {
        nav: TestNavigator,
        lines: ScriptedLines,
        renderer: RecordingRenderer,
        time: SimTime,
    }

    fn rig<I>(script: I, images: usize, config: NavigatorConfig) -> Rig
    where
        I: IntoIterator<Item = Option<Button>>,
    {
        let lines = ScriptedLines::new(script);
        let delay = FakeDelay::default();
        let time = delay.time.clone();
        let renderer = RecordingRenderer::with_images(images);
        let clock = FakeClock { time: time.clone() };
        let nav = Navigator::new(lines.clone(), delay, renderer.clone(), clock, config);
        Rig {
            nav,
            lines,
            renderer,
            time,
        }
    }

    impl Rig {
        fn step(&mut self) -> Transition {
            block_on(self.nav.step())
        }

        fn steps(&mut self, n: usize) {
            for _ in 0..n {
                self.step();
            }
        }
    }

    fn menu_frame(selected: usize) -> Frame {
        Frame::Menu {
            labels: vec!["Clock", "Gallery", "Settings"],
            selected,
        }
    }

    #[test]
    fn starts_on_menu_with_first_entry_selected() {
        let mut r = rig([None], 0, NavigatorConfig::default());
        assert_eq!(r.nav.screen(), Screen::Menu);
        assert_eq!(r.step(), Transition::Stay);
        assert_eq!(r.renderer.frames(), vec![menu_frame(0)]);
    }

    #[test]
    fn menu_up_from_top_wraps_to_last() {
        let mut r = rig([Some(Button::Up)], 0, NavigatorConfig::default());
        r.step();
        assert_eq!(r.nav.menu().selected(), 2);
        r.step();
        assert_eq!(r.renderer.last(), Some(menu_frame(2)));
    }

    #[test]
    fn menu_down_from_bottom_wraps_to_first() {
        let mut r = rig(
            [Some(Button::Down), Some(Button::Down), Some(Button::Down)],
            0,
            NavigatorConfig::default(),
        );
        r.steps(2);
        assert_eq!(r.nav.menu().selected(), 2);
        r.step();
        assert_eq!(r.nav.menu().selected(), 0);
        assert_eq!(r.nav.screen(), Screen::Menu);
    }

    #[test]
    fn menu_back_changes_nothing() {
        let mut r = rig(
            [Some(Button::Down), Some(Button::Back), Some(Button::Back)],
            0,
            NavigatorConfig::default(),
        );
        r.step();
        r.steps(2);
        assert_eq!(r.nav.screen(), Screen::Menu);
        assert_eq!(r.nav.menu().selected(), 1);
    }

    #[test]
    fn select_opens_the_highlighted_screen() {
        let cases = [
            (vec![Some(Button::Select)], Screen::Clock),
            (vec![Some(Button::Down), Some(Button::Select)], Screen::Gallery),
            (vec![Some(Button::Up), Some(Button::Select)], Screen::Settings),
        ];
        for (script, expected) in cases {
            let presses = script.len();
            let mut r = rig(script, 1, NavigatorConfig::default());
            r.steps(presses - 1);
            assert_eq!(r.step(), Transition::Goto(expected));
            assert_eq!(r.nav.screen(), expected);
        }
    }

    #[test]
    fn idle_menu_polls_without_waiting() {
        let mut r = rig([None, None, None], 0, NavigatorConfig::default());
        r.steps(3);
        assert_eq!(r.lines.polls(), 3);
        assert_eq!(r.time.now_ms(), 0);
    }

    #[test]
    fn empty_gallery_shows_placeholder_and_returns() {
        let mut r = rig([Some(Button::Down), Some(Button::Select)], 0, NavigatorConfig::default());
        r.steps(2);
        assert_eq!(r.nav.screen(), Screen::Gallery);
        let polls = r.lines.polls();
        let before = r.time.now_ms();

        assert_eq!(r.step(), Transition::Goto(Screen::Menu));

        assert_eq!(r.renderer.last(), Some(Frame::Message("No Images".into())));
        assert_eq!(r.time.now_ms() - before, 2_000);
        assert_eq!(r.lines.polls(), polls, "no button consumed");
        assert_eq!(r.nav.screen(), Screen::Menu);
    }

    /// Menu -> Gallery, leaving the rig on the first gallery step.
    fn into_gallery<I>(script: I, images: usize) -> Rig
    where
        I: IntoIterator<Item = Option<Button>>,
    {
        let mut full = vec![Some(Button::Down), Some(Button::Select)];
        full.extend(script);
        let mut r = rig(full, images, NavigatorConfig::default());
        r.steps(2);
        assert_eq!(r.nav.screen(), Screen::Gallery);
        r
    }

    #[test]
    fn gallery_wraps_both_ways() {
        let mut r = into_gallery([Some(Button::Up), Some(Button::Down)], 4);
        r.step();
        assert_eq!(r.nav.gallery().index(), 3);
        assert_eq!(r.renderer.last(), Some(Frame::Image(0)));
        r.step();
        assert_eq!(r.nav.gallery().index(), 0);
        assert_eq!(r.renderer.last(), Some(Frame::Image(3)));
    }

    #[test]
    fn gallery_select_and_idle_are_ignored() {
        let mut r = into_gallery([Some(Button::Select), None], 3);
        r.steps(2);
        assert_eq!(r.nav.screen(), Screen::Gallery);
        assert_eq!(r.nav.gallery().index(), 0);
    }

    #[test]
    fn gallery_back_keeps_index_for_next_visit() {
        let mut r = into_gallery(
            [
                Some(Button::Down),
                Some(Button::Down),
                Some(Button::Back),
                // Back on the menu; Gallery is still highlighted.
                Some(Button::Select),
                None,
            ],
            5,
        );
        r.steps(2);
        assert_eq!(r.step(), Transition::Goto(Screen::Menu));
        assert_eq!(r.nav.gallery().index(), 2);
        assert_eq!(r.nav.menu().selected(), 1);

        assert_eq!(r.step(), Transition::Goto(Screen::Gallery));
        r.step();
        assert_eq!(r.renderer.last(), Some(Frame::Image(2)));
    }

    #[test]
    fn settings_is_a_timed_placeholder() {
        let mut r = rig([Some(Button::Up), Some(Button::Select)], 0, NavigatorConfig::default());
        r.steps(2);
        assert_eq!(r.nav.screen(), Screen::Settings);
        // Buttons held during the placeholder must not matter.
        r.lines.push_chord(&Button::ALL);
        let before = r.time.now_ms();
        let polls = r.lines.polls();

        assert_eq!(r.step(), Transition::Goto(Screen::Menu));
        assert_eq!(
            r.renderer.last(),
            Some(Frame::Message("Settings Placeholder".into()))
        );
        assert_eq!(r.time.now_ms() - before, 2_000);
        assert_eq!(r.lines.polls(), polls);
        assert_eq!(r.lines.remaining(), 1);
    }

    #[test]
    fn clock_ticks_once_per_second() {
        let config = NavigatorConfig {
            clock_exit: ClockExit::Never,
            ..NavigatorConfig::default()
        };
        let mut r = rig([Some(Button::Select)], 0, config);
        r.step();
        let start = r.time.now_ms();
        assert_eq!(start, 200);

        r.steps(3);
        let clocks: Vec<_> = r
            .renderer
            .frames()
            .into_iter()
            .filter_map(|f| match f {
                Frame::Clock(t) => Some(t),
                _ => None,
            })
            .collect();
        assert_eq!(clocks, ["00:00:00", "00:00:01", "00:00:02"]);
        assert_eq!(r.time.now_ms() - start, 3_000);
    }

    #[test]
    fn clock_without_exit_never_reads_buttons() {
        let config = NavigatorConfig {
            clock_exit: ClockExit::Never,
            ..NavigatorConfig::default()
        };
        let mut r = rig([Some(Button::Select)], 0, config);
        r.step();
        for _ in 0..5 {
            r.lines.push_chord(&[Button::Back]);
        }
        let polls = r.lines.polls();

        for _ in 0..10 {
            assert_eq!(r.step(), Transition::Stay);
        }
        assert_eq!(r.nav.screen(), Screen::Clock);
        assert_eq!(r.lines.polls(), polls);
    }

    #[test]
    fn clock_back_returns_to_menu() {
        let mut r = rig([Some(Button::Select)], 0, NavigatorConfig::default());
        r.step();
        assert_eq!(r.step(), Transition::Stay);

        r.lines.push_chord(&[]);
        r.lines.push_chord(&[Button::Up]);
        r.lines.push_chord(&[Button::Back]);
        assert_eq!(r.step(), Transition::Goto(Screen::Menu));
        assert_eq!(r.nav.screen(), Screen::Menu);
        assert_eq!(r.nav.menu().selected(), 0);
    }

    #[test]
    fn idle_clock_polls_through_each_tick() {
        let mut r = rig([Some(Button::Select)], 0, NavigatorConfig::default());
        r.step();
        let (start, polls) = (r.time.now_ms(), r.lines.polls());

        assert_eq!(r.step(), Transition::Stay);

        assert_eq!(r.time.now_ms() - start, 1_000);
        assert_eq!(r.lines.polls() - polls, 1_000 / CLOCK_POLL_MS as usize);
        assert_eq!(r.renderer.frames().len(), 2, "one menu, one clock frame");
    }

    #[test]
    fn other_buttons_on_the_clock_keep_the_tick_length() {
        let mut r = rig([Some(Button::Select)], 0, NavigatorConfig::default());
        r.step();
        r.lines.push_chord(&[Button::Down]);
        let start = r.time.now_ms();

        assert_eq!(r.step(), Transition::Stay);
        assert_eq!(r.time.now_ms() - start, 1_000);
    }

    #[test]
    fn short_back_tap_mid_tick_leaves_the_clock() {
        // SELECT held for the first 100 ms, BACK for 150 ms half way
        // through the first clock tick.
        let delay = FakeDelay::default();
        let time = delay.time.clone();
        let lines = TimedLines::new(
            time.clone(),
            &[(Button::Select, 0, 100), (Button::Back, 500, 650)],
        );
        let mut nav = Navigator::new(
            lines,
            delay,
            RecordingRenderer::default(),
            FakeClock { time: time.clone() },
            NavigatorConfig::default(),
        );

        assert_eq!(block_on(nav.step()), Transition::Goto(Screen::Clock));
        assert_eq!(block_on(nav.step()), Transition::Goto(Screen::Menu));
        assert!(time.now_ms() < 1_000, "left at t={}", time.now_ms());
    }

    #[test]
    fn gallery_size_comes_from_the_renderer() {
        let r = rig([None], 4, NavigatorConfig::default());
        assert_eq!(r.nav.gallery().count(), 4);
    }

    #[test]
    fn custom_menu_entries_drive_select() {
        let mut r = rig([Some(Button::Select)], 2, NavigatorConfig::default());
        r.nav = r
            .nav
            .with_menu(MenuState::new(&[Screen::Gallery, Screen::Clock]).unwrap());
        assert_eq!(r.step(), Transition::Goto(Screen::Gallery));
    }

    #[test]
    fn into_parts_hands_back_collaborators() {
        let mut r = rig([None], 0, NavigatorConfig::default());
        r.step();
        let (lines, renderer) = r.nav.into_parts();
        assert_eq!(lines.polls(), 1);
        assert_eq!(renderer.frames().len(), 1);
    }
}
