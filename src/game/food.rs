use super::grid::{Grid, Position};
use super::snake::Snake;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use std::mem;

/// Owner of the single food cell on the playfield
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FoodSpawner<R = rand::rngs::ThreadRng> {
    grid: Grid,
    food: Option<Position>,
    rng: R,
}

impl<R> FoodSpawner<R> {
    pub(crate) fn new(grid: Grid, rng: R) -> FoodSpawner<R> {
        FoodSpawner {
            grid,
            food: None,
            rng,
        }
    }

    pub(crate) fn food(&self) -> Option<Position> {
        self.food
    }

    pub(crate) fn is_food_at(&self, pos: Position) -> bool {
        self.food == Some(pos)
    }

    /// Remove the food from the playfield
    pub(crate) fn clear(&mut self) {
        self.food = None;
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, pos: Position) {
        self.food = Some(pos);
    }
}

impl<R: Rng> FoodSpawner<R> {
    /// Replace the current food with one on a random cell not occupied by
    /// `snake`.  Returns the new food position, or `None` if the snake covers
    /// the whole grid.
    pub(crate) fn spawn(&mut self, snake: &Snake) -> Option<Position> {
        let pos = self.pick_free_cell(snake);
        if let Some(old) = mem::replace(&mut self.food, pos) {
            log::debug!("Removed food at ({}, {})", old.x, old.y);
        }
        match pos {
            Some(p) => log::debug!("Spawned food at ({}, {})", p.x, p.y),
            None => log::info!("No free cell left for food"),
        }
        pos
    }

    /// Sample random cells until one is free.  After
    /// [`FOOD_SPAWN_ATTEMPTS`][consts::FOOD_SPAWN_ATTEMPTS] misses, pick
    /// uniformly among the remaining free cells instead, which also detects a
    /// full board.
    fn pick_free_cell(&mut self, snake: &Snake) -> Option<Position> {
        if snake.len() >= self.grid.cell_count() {
            return None;
        }
        let width = i32::from(self.grid.width());
        let height = i32::from(self.grid.height());
        for _ in 0..consts::FOOD_SPAWN_ATTEMPTS {
            let pos = Position::new(
                self.rng.random_range(0..width),
                self.rng.random_range(0..height),
            );
            if !snake.occupies(pos) {
                return Some(pos);
            }
        }
        self.grid
            .positions()
            .filter(|&p| !snake.occupies(p))
            .choose(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::num::NonZeroU16;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn grid(width: u16, height: u16) -> Grid {
        Grid::new(
            NonZeroU16::new(width).unwrap(),
            NonZeroU16::new(height).unwrap(),
        )
    }

    #[test]
    fn spawn_never_overlaps_snake() {
        let g = grid(8, 6);
        let snake = Snake::from_segments(
            g,
            &[Position::new(2, 0), Position::new(1, 0), Position::new(0, 0)],
            Direction::East,
        );
        let mut food = FoodSpawner::new(g, ChaCha12Rng::seed_from_u64(RNG_SEED));
        for _ in 0..100 {
            let pos = food.spawn(&snake).unwrap();
            assert!(g.contains(pos));
            assert!(!snake.occupies(pos));
            assert!(food.is_food_at(pos));
        }
    }

    #[test]
    fn spawn_replaces_previous_food() {
        let g = grid(8, 6);
        let snake = Snake::from_segments(g, &[Position::new(4, 3)], Direction::East);
        let mut food = FoodSpawner::new(g, ChaCha12Rng::seed_from_u64(RNG_SEED));
        food.place(Position::new(0, 0));
        let pos = food.spawn(&snake).unwrap();
        assert_eq!(food.food(), Some(pos));
        if pos != Position::new(0, 0) {
            assert!(!food.is_food_at(Position::new(0, 0)));
        }
    }

    #[test]
    fn spawn_finds_last_free_cell() {
        let g = grid(3, 1);
        let snake = Snake::from_segments(
            g,
            &[Position::new(2, 0), Position::new(1, 0)],
            Direction::East,
        );
        let mut food = FoodSpawner::new(g, ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert_eq!(food.spawn(&snake), Some(Position::new(0, 0)));
    }

    #[test]
    fn spawn_on_full_board() {
        let g = grid(2, 1);
        let snake = Snake::from_segments(
            g,
            &[Position::new(1, 0), Position::new(0, 0)],
            Direction::East,
        );
        let mut food = FoodSpawner::new(g, ChaCha12Rng::seed_from_u64(RNG_SEED));
        food.place(Position::new(1, 0));
        assert_eq!(food.spawn(&snake), None);
        assert_eq!(food.food(), None);
    }

    #[test]
    fn is_food_at_without_food() {
        let food = FoodSpawner::new(grid(4, 4), ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert!(!food.is_food_at(Position::new(0, 0)));
    }
}
