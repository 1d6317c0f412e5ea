use crate::command::Command;
use crate::consts;
use crate::events::{GameEvent, SubscriberId};
use crate::game::{Board, Direction, Game, GameState, Hud, PauseMenu, PauseOpt};
use crate::menu::{MainMenu, MenuOpt, SettingsMenu, SettingsOutcome, SettingsView};
use crate::settings::Settings;
use crate::store::KeyValueStore;
use crate::util::center_rect;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, layout::Size, Frame, Terminal};
use std::io;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

/// The terminal front end: owns the game and the settings, routes input to
/// whichever screen is showing, and keeps the HUD in sync with the game's
/// events
#[derive(Debug)]
pub(crate) struct App<S, R = rand::rngs::ThreadRng> {
    game: Game<S, R>,
    settings: Settings,
    screen: Screen,
    hud: Hud,
    subscription: SubscriberId,
    events: Receiver<GameEvent>,
}

impl<S: KeyValueStore, R: Rng> App<S, R> {
    pub(crate) fn new(mut game: Game<S, R>, mut settings: Settings) -> App<S, R> {
        game.apply_settings(settings.confirm());
        let (subscription, events) = game.subscribe();
        let screen = Screen::Main(MainMenu::new(game.records()));
        App {
            game,
            settings,
            screen,
            hud: Hud::new(),
            subscription,
            events,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        let mut last_frame = Instant::now();
        while !self.quitting() {
            terminal.draw(|frame| self.draw(frame))?;
            if poll(consts::FRAME_PERIOD)? {
                self.handle_event(read()?);
            }
            let now = Instant::now();
            self.update(now.saturating_duration_since(last_frame));
            last_frame = now;
        }
        self.game.unsubscribe(self.subscription);
        Ok(())
    }

    /// Advance the game & the rainbow effect by `dt`, then catch the HUD up
    /// on whatever the game published
    fn update(&mut self, dt: Duration) {
        self.game.update(dt);
        if let Some(color) = self.settings.update(dt) {
            self.game.set_snake_color(color);
        }
        for ev in self.events.try_iter() {
            self.hud.apply(ev);
        }
    }

    fn handle_event(&mut self, event: Event) {
        if event == Event::FocusLost {
            if matches!(self.screen, Screen::Game(_)) && self.game.state() == GameState::Playing {
                self.pause();
            }
            return;
        }
        if let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) {
            self.handle_command(cmd);
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match self.screen {
            Screen::Main(ref mut menu) => match menu.handle_command(cmd) {
                Some(MenuOpt::Play) => {
                    self.game.start_game();
                    self.screen = Screen::Game(PauseMenu::new());
                }
                Some(MenuOpt::Settings) => {
                    let high_score = self.game.records().high_score;
                    self.screen =
                        Screen::Settings(SettingsMenu::open(&mut self.settings, high_score));
                }
                Some(MenuOpt::Quit) => self.screen = Screen::Quit,
                None => (),
            },
            Screen::Settings(ref mut menu) => match menu.handle_command(cmd, &mut self.settings) {
                Some(SettingsOutcome::Confirmed(change)) => {
                    self.game.apply_settings(change);
                    self.show_main_menu();
                }
                Some(SettingsOutcome::Cancelled) => self.show_main_menu(),
                Some(SettingsOutcome::Quit) => self.screen = Screen::Quit,
                None => (),
            },
            Screen::Game(ref mut pause_menu) => match self.game.state() {
                GameState::Playing => match cmd {
                    Command::Up => self.game.set_heading(Direction::North),
                    Command::Down => self.game.set_heading(Direction::South),
                    Command::Left => self.game.set_heading(Direction::West),
                    Command::Right => self.game.set_heading(Direction::East),
                    Command::Esc | Command::P => self.pause(),
                    Command::Quit => self.screen = Screen::Quit,
                    _ => (),
                },
                GameState::Paused => match pause_menu.handle_command(cmd) {
                    Some(PauseOpt::Resume) => self.game.toggle_pause(),
                    Some(PauseOpt::Restart) => self.game.retry(),
                    Some(PauseOpt::MainMenu) => {
                        self.game.return_to_menu();
                        self.show_main_menu();
                    }
                    Some(PauseOpt::Quit) => self.screen = Screen::Quit,
                    None => (),
                },
                GameState::GameOver => match cmd {
                    Command::R => self.game.retry(),
                    Command::M => {
                        self.game.return_to_menu();
                        self.show_main_menu();
                    }
                    Command::Q | Command::Quit => self.screen = Screen::Quit,
                    _ => (),
                },
                GameState::MainMenu => self.show_main_menu(),
            },
            Screen::Quit => (),
        }
    }

    fn pause(&mut self) {
        self.game.toggle_pause();
        self.screen = Screen::Game(PauseMenu::new());
    }
}

impl<S: KeyValueStore, R> App<S, R> {
    fn draw(&self, frame: &mut Frame<'_>) {
        match self.screen {
            Screen::Main(ref menu) => frame.render_widget(menu, frame.area()),
            Screen::Settings(ref menu) => {
                let area = center_rect(
                    frame.area(),
                    Size::new(SettingsView::WIDTH, SettingsView::HEIGHT),
                );
                frame.render_widget(
                    SettingsView {
                        menu,
                        settings: &self.settings,
                    },
                    area,
                );
            }
            Screen::Game(ref pause_menu) => frame.render_widget(
                Board {
                    game: &self.game,
                    hud: &self.hud,
                    pause_menu,
                },
                frame.area(),
            ),
            Screen::Quit => (),
        }
    }

    fn show_main_menu(&mut self) {
        self.screen = Screen::Main(MainMenu::new(self.game.records()));
    }

    fn quitting(&self) -> bool {
        self.screen == Screen::Quit
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Screen {
    Main(MainMenu),
    Settings(SettingsMenu),
    /// The board, with the pause menu's state for when the game is paused
    Game(PauseMenu),
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Grid;
    use crate::settings::Difficulty;
    use crate::store::{JsonStore, HIGH_SCORE_KEY};
    use crossterm::event::{KeyCode, KeyEvent};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::{backend::TestBackend, style::Color};
    use std::num::NonZeroU16;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_app(difficulty: Difficulty) -> App<JsonStore, ChaCha12Rng> {
        let grid = Grid::new(NonZeroU16::new(10).unwrap(), NonZeroU16::new(10).unwrap());
        let game = Game::new_with_rng(
            grid,
            10,
            JsonStore::in_memory(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        App::new(game, Settings::new(difficulty, 0))
    }

    fn press(app: &mut App<JsonStore, ChaCha12Rng>, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::from(code)));
    }

    #[test]
    fn configured_difficulty_applies() {
        let app = new_app(Difficulty::Easy);
        assert_eq!(
            app.game.snake().tick_interval(),
            Duration::from_millis(650)
        );
    }

    #[test]
    fn play_pause_resume() {
        let mut app = new_app(Difficulty::Normal);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.game.state(), GameState::Playing);
        assert!(matches!(app.screen, Screen::Game(_)));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.game.state(), GameState::Paused);
        app.update(Duration::from_millis(20));
        assert!(app.hud.paused());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.game.state(), GameState::Playing);
        app.update(Duration::from_millis(20));
        assert!(!app.hud.paused());
        assert_eq!(app.hud.time(), Duration::from_millis(20));
    }

    #[test]
    fn focus_lost_pauses() {
        let mut app = new_app(Difficulty::Normal);
        app.handle_event(Event::FocusLost);
        assert_eq!(app.game.state(), GameState::MainMenu);
        press(&mut app, KeyCode::Enter);
        app.handle_event(Event::FocusLost);
        assert_eq!(app.game.state(), GameState::Paused);
    }

    #[test]
    fn pause_menu_to_main_menu() {
        let mut app = new_app(Difficulty::Normal);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.game.state(), GameState::MainMenu);
        assert!(matches!(app.screen, Screen::Main(_)));
    }

    #[test]
    fn crash_then_retry() {
        let mut app = new_app(Difficulty::Normal);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        app.update(Duration::from_secs(30));
        assert_eq!(app.game.state(), GameState::GameOver);
        let summary = app.hud.summary().unwrap();
        assert_eq!(summary.score, app.game.score());
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.game.state(), GameState::Playing);
        app.update(Duration::ZERO);
        assert_eq!(app.hud.score(), 0);
        assert_eq!(app.hud.time(), Duration::ZERO);
    }

    #[test]
    fn change_settings() {
        let mut app = new_app(Difficulty::Normal);
        press(&mut app, KeyCode::Char('o'));
        assert!(matches!(app.screen, Screen::Settings(_)));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.screen, Screen::Main(_)));
        assert_eq!(
            app.game.snake().tick_interval(),
            Duration::from_millis(250)
        );
        assert_eq!(
            app.game.snake().color(),
            Color::Rgb(80, 220, 100)
        );
    }

    #[test]
    fn rainbow_recolors_snake_every_frame() {
        let grid = Grid::new(NonZeroU16::new(10).unwrap(), NonZeroU16::new(10).unwrap());
        let mut store = JsonStore::in_memory();
        store.set_int(HIGH_SCORE_KEY, 500);
        let game = Game::new_with_rng(grid, 10, store, ChaCha12Rng::seed_from_u64(RNG_SEED));
        let mut app = App::new(game, Settings::new(Difficulty::Normal, 500));
        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.screen, Screen::Main(_)));
        let colors = (0..3)
            .map(|_| {
                app.update(Duration::from_millis(100));
                app.game.snake().color()
            })
            .collect::<Vec<_>>();
        assert_eq!(
            colors,
            [
                Color::Rgb(255, 46, 0),
                Color::Rgb(255, 93, 0),
                Color::Rgb(255, 140, 0),
            ]
        );
    }

    #[test]
    fn quit() {
        let mut app = new_app(Difficulty::Normal);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.quitting());
    }

    #[test]
    fn draws_every_screen() {
        let mut app = new_app(Difficulty::Normal);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        press(&mut app, KeyCode::Char('o'));
        terminal.draw(|frame| app.draw(frame)).unwrap();
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('p'));
        app.update(Duration::ZERO);
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect::<String>();
        assert!(text.contains("PAUSED"));
        assert!(text.contains("Score: 0"));
    }
}
