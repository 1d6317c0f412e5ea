use super::direction::Direction;
use super::food::FoodSpawner;
use super::grid::{Grid, Position};
use super::timer::MoveTimer;
use super::DeathReason;
use rand::Rng;
use ratatui::style::Color;
use std::collections::VecDeque;
use std::time::Duration;

/// A snake on a grid.
///
/// The snake owns its segment positions, its heading (with a one-slot turn
/// buffer), its render color, and the timer that schedules its movement.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    grid: Grid,

    /// The position of the snake's head
    head: Position,

    /// The positions of the rest of the snake, from the neck to the tail
    body: VecDeque<Position>,

    /// The direction the head will step in on the next tick
    direction: Direction,

    /// A turn requested while another turn was still waiting for a tick;
    /// applied (unless it's a reversal) right after the next move
    buffered: Option<Direction>,

    /// Whether the snake has moved since the last immediately-applied turn
    has_moved: bool,

    /// The cell the tail left on the most recent tick, which is where a
    /// newly grown segment goes
    vacated: Option<Position>,

    color: Color,
    timer: MoveTimer,
}

impl Snake {
    /// Create a one-segment snake in the center of `grid`, heading east.
    /// The movement timer starts out stopped.
    pub(crate) fn new(grid: Grid, tick_interval: Duration, color: Color) -> Snake {
        Snake {
            grid,
            head: grid.center(),
            body: VecDeque::new(),
            direction: Direction::East,
            buffered: None,
            has_moved: true,
            vacated: None,
            color,
            timer: MoveTimer::new(tick_interval),
        }
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn head(&self) -> Position {
        self.head
    }

    /// Return the position of the last segment
    pub(crate) fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or(self.head)
    }

    /// Iterate over all segment positions from the head to the tail
    pub(crate) fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len() + 1
    }

    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub(crate) fn buffered_direction(&self) -> Option<Direction> {
        self.buffered
    }

    pub(crate) fn color(&self) -> Color {
        self.color
    }

    #[cfg(test)]
    pub(crate) fn tick_interval(&self) -> Duration {
        self.timer.interval()
    }

    /// Request a change of heading.
    ///
    /// The first turn after a move is applied at once.  Any further request
    /// before the next move lands in the single buffer slot, replacing what
    /// was there; a request for the current heading empties the slot.
    /// Reversals are never applied directly and are weeded out when the
    /// buffer is flushed.
    pub(crate) fn set_heading(&mut self, requested: Direction) {
        if requested == self.direction {
            self.buffered = None;
        } else if self.has_moved && !requested.is_opposite(self.direction) {
            self.direction = requested;
            self.has_moved = false;
            self.buffered = None;
        } else {
            self.buffered = Some(requested);
        }
    }

    /// Advance the snake one cell.
    ///
    /// On a collision the movement timer is cancelled and the snake is left
    /// where it died.  If the head lands on `food`, the snake grows and a new
    /// food is spawned.
    pub(crate) fn tick<R: Rng>(&mut self, food: &mut FoodSpawner<R>) -> TickOutcome {
        let new_head = self.direction.advance(self.head);
        self.body.push_front(self.head);
        self.head = new_head;
        self.vacated = self.body.pop_back();

        if !self.grid.contains(new_head) {
            self.stop();
            return TickOutcome::Died(DeathReason::Wall);
        }
        if self.body.contains(&new_head) {
            self.stop();
            return TickOutcome::Died(DeathReason::SelfCollision);
        }

        self.has_moved = true;
        if let Some(turn) = self.buffered.take() {
            if !turn.is_opposite(self.direction) {
                self.direction = turn;
            }
        }

        if food.is_food_at(new_head) {
            let length = self.grow();
            let board_full = food.spawn(self).is_none();
            TickOutcome::Grew { length, board_full }
        } else {
            TickOutcome::Moved
        }
    }

    /// Add one segment behind the tail, at the cell the tail most recently
    /// left (or on top of the tail if the snake hasn't moved yet).  Returns
    /// the new length.
    pub(crate) fn grow(&mut self) -> usize {
        let pos = self.vacated.take().unwrap_or_else(|| self.tail());
        self.body.push_back(pos);
        self.len()
    }

    /// Put the snake back to a single segment in the center of the grid,
    /// heading east.  If the snake was moving, its timer is restarted from
    /// zero.
    pub(crate) fn reset(&mut self) {
        self.head = self.grid.center();
        self.body.clear();
        self.direction = Direction::East;
        self.buffered = None;
        self.has_moved = true;
        self.vacated = None;
        if self.timer.is_running() {
            self.timer.start();
        }
    }

    pub(crate) fn set_tick_interval(&mut self, interval: Duration) {
        self.timer.set_interval(interval);
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Start moving.  Any schedule already running is replaced.
    pub(crate) fn start(&mut self) {
        self.timer.start();
    }

    pub(crate) fn stop(&mut self) {
        self.timer.cancel();
    }

    #[cfg(test)]
    pub(crate) fn is_moving(&self) -> bool {
        self.timer.is_running()
    }

    pub(crate) fn advance_clock(&mut self, dt: Duration) {
        self.timer.advance(dt);
    }

    /// Returns `true` if a movement tick is due, consuming it
    pub(crate) fn tick_due(&mut self) -> bool {
        self.timer.fire()
    }

    #[cfg(test)]
    pub(crate) fn from_segments(grid: Grid, segments: &[Position], direction: Direction) -> Snake {
        let mut snake = Snake::new(grid, Duration::from_millis(100), Color::White);
        let mut iter = segments.iter().copied();
        if let Some(head) = iter.next() {
            snake.head = head;
        }
        snake.body = iter.collect();
        snake.direction = direction;
        snake
    }
}

/// What happened on one movement tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    /// The snake moved into an empty cell
    Moved,

    /// The snake ate the food and is now `length` segments long.  If
    /// `board_full` is set, there was nowhere left to put the next food.
    Grew { length: usize, board_full: bool },

    /// The snake hit something and stopped
    Died(DeathReason),
}
