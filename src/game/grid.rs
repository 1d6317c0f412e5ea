use std::num::NonZeroU16;

/// A cell on the playfield, in integer grid coordinates.
///
/// Positions are allowed to leave the grid (the head can step to `x == -1`);
/// [`Grid::contains()`] decides whether that is fatal.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Position {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Position {
    pub(crate) const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    /// Return the position `(dx, dy)` away from this one
    pub(crate) fn offset(self, (dx, dy): (i32, i32)) -> Position {
        Position {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Playfield dimensions, fixed for the lifetime of a session.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: NonZeroU16,
    height: NonZeroU16,
}

impl Grid {
    pub(crate) fn new(width: NonZeroU16, height: NonZeroU16) -> Grid {
        Grid { width, height }
    }

    pub(crate) fn width(self) -> u16 {
        self.width.get()
    }

    pub(crate) fn height(self) -> u16 {
        self.height.get()
    }

    /// Total number of cells on the playfield
    pub(crate) fn cell_count(self) -> usize {
        usize::from(self.width()) * usize::from(self.height())
    }

    /// The cell the snake starts on: `(width / 2, height / 2)`
    pub(crate) fn center(self) -> Position {
        Position {
            x: i32::from(self.width() / 2),
            y: i32::from(self.height() / 2),
        }
    }

    pub(crate) fn contains(self, pos: Position) -> bool {
        (0..i32::from(self.width())).contains(&pos.x)
            && (0..i32::from(self.height())).contains(&pos.y)
    }

    /// Iterate over every cell, row by row
    pub(crate) fn positions(self) -> impl Iterator<Item = Position> {
        let width = i32::from(self.width());
        (0..i32::from(self.height()))
            .flat_map(move |y| (0..width).map(move |x| Position { x, y }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn grid(width: u16, height: u16) -> Grid {
        Grid::new(
            NonZeroU16::new(width).unwrap(),
            NonZeroU16::new(height).unwrap(),
        )
    }

    #[rstest]
    #[case(Position::new(0, 0), true)]
    #[case(Position::new(9, 4), true)]
    #[case(Position::new(10, 4), false)]
    #[case(Position::new(9, 5), false)]
    #[case(Position::new(-1, 0), false)]
    #[case(Position::new(0, -1), false)]
    fn test_contains(#[case] pos: Position, #[case] inside: bool) {
        assert_eq!(grid(10, 5).contains(pos), inside);
    }

    #[rstest]
    #[case(grid(10, 10), Position::new(5, 5))]
    #[case(grid(20, 20), Position::new(10, 10))]
    #[case(grid(7, 3), Position::new(3, 1))]
    #[case(grid(1, 1), Position::new(0, 0))]
    fn test_center(#[case] grid: Grid, #[case] center: Position) {
        assert_eq!(grid.center(), center);
        assert!(grid.contains(grid.center()));
    }

    #[test]
    fn positions_cover_every_cell_once() {
        let g = grid(4, 3);
        let cells = g.positions().collect::<Vec<_>>();
        assert_eq!(cells.len(), g.cell_count());
        assert_eq!(cells.first(), Some(&Position::new(0, 0)));
        assert_eq!(cells.last(), Some(&Position::new(3, 2)));
        assert!(cells.iter().all(|&p| g.contains(p)));
    }
}
