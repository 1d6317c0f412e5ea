mod board;
mod direction;
mod food;
mod grid;
mod paused;
mod snake;
mod timer;
pub(crate) use self::board::{Board, Hud};
pub(crate) use self::direction::Direction;
use self::food::FoodSpawner;
pub(crate) use self::grid::{Grid, Position};
pub(crate) use self::paused::{PauseMenu, PauseOpt};
pub(crate) use self::snake::Snake;
use self::snake::TickOutcome;
use crate::consts;
use crate::events::{EventBus, GameEvent, GameSummary, SubscriberId};
use crate::settings::{Difficulty, SettingsChange, SnakeColor};
use crate::store::{KeyValueStore, HIGH_SCORE_KEY, LONGEST_SURVIVAL_KEY};
use rand::Rng;
use ratatui::style::Color;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// The high-level mode of the game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameState {
    MainMenu,
    Playing,
    Paused,
    GameOver,
}

/// Why a game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DeathReason {
    /// The snake's head left the playfield
    Wall,

    /// The snake's head ran into its own body
    SelfCollision,

    /// The snake has filled the board and there are no more cells to place
    /// food in.
    BoardFull,
}

/// Best results recorded in the store
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Records {
    pub(crate) high_score: u32,
    pub(crate) longest_survival: Duration,
}

/// One play session: the snake, the food, and the score and time of the
/// current game, plus the store that records bests across sessions.
#[derive(Debug)]
pub(crate) struct Game<S, R = rand::rngs::ThreadRng> {
    state: GameState,
    snake: Snake,
    food: FoodSpawner<R>,
    score: u32,
    survival_time: Duration,
    base_score_per_food: u32,
    death: Option<DeathReason>,
    store: S,
    events: EventBus,
}

impl<S: KeyValueStore> Game<S, rand::rngs::ThreadRng> {
    pub(crate) fn new(grid: Grid, base_score_per_food: u32, store: S) -> Self {
        Game::new_with_rng(grid, base_score_per_food, store, rand::rng())
    }
}

impl<S: KeyValueStore, R: Rng> Game<S, R> {
    pub(crate) fn new_with_rng(grid: Grid, base_score_per_food: u32, store: S, rng: R) -> Self {
        Game {
            state: GameState::MainMenu,
            snake: Snake::new(
                grid,
                Difficulty::default().tick_interval(),
                consts::DEFAULT_SNAKE_COLOR,
            ),
            food: FoodSpawner::new(grid, rng),
            score: 0,
            survival_time: Duration::ZERO,
            base_score_per_food,
            death: None,
            store,
            events: EventBus::new(),
        }
    }

    /// Start a new game from the main menu or the game over screen
    pub(crate) fn start_game(&mut self) {
        match self.state {
            GameState::MainMenu | GameState::GameOver => {
                log::info!("Starting game");
                self.begin_round();
            }
            other => log::debug!("Ignoring start request while {other:?}"),
        }
    }

    /// Throw away the current game and immediately start another
    pub(crate) fn retry(&mut self) {
        match self.state {
            GameState::GameOver | GameState::Paused => {
                log::info!("Retrying");
                let was_paused = self.state == GameState::Paused;
                self.begin_round();
                if was_paused {
                    self.events.publish(GameEvent::PauseChanged(false));
                }
            }
            other => log::debug!("Ignoring retry request while {other:?}"),
        }
    }

    /// Advance the game by one frame's worth of time.  Survival time accrues
    /// and the snake moves as often as its timer says; nothing happens unless
    /// a game is being played.
    pub(crate) fn update(&mut self, dt: Duration) {
        if self.state != GameState::Playing {
            return;
        }
        self.advance_time(dt);
        self.snake.advance_clock(dt);
        while self.state == GameState::Playing && self.snake.tick_due() {
            match self.snake.tick(&mut self.food) {
                TickOutcome::Moved => (),
                TickOutcome::Grew { length, board_full } => {
                    self.on_snake_grew(length);
                    if board_full {
                        self.game_over(DeathReason::BoardFull);
                    }
                }
                TickOutcome::Died(reason) => self.game_over(reason),
            }
        }
    }

    fn begin_round(&mut self) {
        self.reset_stats();
        self.snake.start();
        self.state = GameState::Playing;
        self.events.publish(GameEvent::ScoreChanged(self.score));
        self.events
            .publish(GameEvent::TimeChanged(self.survival_time));
        if self.food.spawn(&self.snake).is_none() {
            self.game_over(DeathReason::BoardFull);
        }
    }
}

impl<S: KeyValueStore, R> Game<S, R> {
    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub(crate) fn survival_time(&self) -> Duration {
        self.survival_time
    }

    pub(crate) fn death_reason(&self) -> Option<DeathReason> {
        self.death
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Option<Position> {
        self.food.food()
    }

    pub(crate) fn subscribe(&mut self) -> (SubscriberId, Receiver<GameEvent>) {
        self.events.subscribe()
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Read the best score & survival time from the store
    pub(crate) fn records(&self) -> Records {
        Records {
            high_score: u32::try_from(self.store.get_int(HIGH_SCORE_KEY, 0)).unwrap_or_default(),
            longest_survival: Duration::try_from_secs_f64(
                self.store.get_float(LONGEST_SURVIVAL_KEY, 0.0),
            )
            .unwrap_or_default(),
        }
    }

    /// Pause a running game or resume a paused one
    pub(crate) fn toggle_pause(&mut self) {
        let paused = match self.state {
            GameState::Playing => true,
            GameState::Paused => false,
            other => {
                log::debug!("Ignoring pause request while {other:?}");
                return;
            }
        };
        self.state = if paused {
            GameState::Paused
        } else {
            GameState::Playing
        };
        log::info!("{}", if paused { "Paused" } else { "Resumed" });
        self.events.publish(GameEvent::PauseChanged(paused));
    }

    pub(crate) fn advance_time(&mut self, dt: Duration) {
        if self.state != GameState::Playing {
            return;
        }
        self.survival_time = self.survival_time.saturating_add(dt);
        self.events
            .publish(GameEvent::TimeChanged(self.survival_time));
    }

    /// Steer the snake.  Ignored unless a game is being played.
    pub(crate) fn set_heading(&mut self, direction: Direction) {
        if self.state == GameState::Playing {
            self.snake.set_heading(direction);
        }
    }

    /// Abandon the current game and go back to the main menu
    pub(crate) fn return_to_menu(&mut self) {
        match self.state {
            GameState::GameOver | GameState::Paused => {
                log::info!("Returning to main menu");
                let was_paused = self.state == GameState::Paused;
                self.reset_stats();
                self.snake.stop();
                self.food.clear();
                self.state = GameState::MainMenu;
                if was_paused {
                    self.events.publish(GameEvent::PauseChanged(false));
                }
                self.events.publish(GameEvent::ScoreChanged(self.score));
                self.events
                    .publish(GameEvent::TimeChanged(self.survival_time));
            }
            other => log::debug!("Ignoring return-to-menu request while {other:?}"),
        }
    }

    pub(crate) fn apply_settings(&mut self, change: SettingsChange) {
        self.snake.set_tick_interval(change.tick_interval);
        if let SnakeColor::Flat(color) = change.color {
            self.snake.set_color(color);
        }
    }

    pub(crate) fn set_snake_color(&mut self, color: Color) {
        self.snake.set_color(color);
    }

    /// Score a meal.  Food is worth more the longer the snake gets.
    fn on_snake_grew(&mut self, length: usize) {
        let length = u32::try_from(length).unwrap_or(u32::MAX);
        self.score = self
            .score
            .saturating_add(self.base_score_per_food.saturating_mul(length));
        self.events.publish(GameEvent::ScoreChanged(self.score));
    }

    fn game_over(&mut self, reason: DeathReason) {
        self.snake.stop();
        self.state = GameState::GameOver;
        self.death = Some(reason);
        let (new_high_score, new_best_time) = self.save_records();
        log::info!(
            "Game over ({reason:?}): score {}, survived {:.1}s",
            self.score,
            self.survival_time.as_secs_f64()
        );
        self.events.publish(GameEvent::GameOver(GameSummary {
            score: self.score,
            survival_time: self.survival_time,
            new_high_score,
            new_best_time,
        }));
    }

    /// Store the score and survival time of the finished game wherever they
    /// beat the stored values.  Returns which of the two were beaten.
    fn save_records(&mut self) -> (bool, bool) {
        let score = i64::from(self.score);
        let new_high_score = score > self.store.get_int(HIGH_SCORE_KEY, 0);
        if new_high_score {
            self.store.set_int(HIGH_SCORE_KEY, score);
        }
        let time = self.survival_time.as_secs_f64();
        let new_best_time = time > self.store.get_float(LONGEST_SURVIVAL_KEY, 0.0);
        if new_best_time {
            self.store.set_float(LONGEST_SURVIVAL_KEY, time);
        }
        if new_high_score || new_best_time {
            log::info!("New record(s): high score {new_high_score}, survival time {new_best_time}");
            if let Err(e) = self.store.save() {
                log::warn!("{:#}", anyhow::Error::new(e));
            }
        }
        (new_high_score, new_best_time)
    }

    fn reset_stats(&mut self) {
        self.score = 0;
        self.survival_time = Duration::ZERO;
        self.death = None;
        self.snake.reset();
    }
}
