use crate::consts;
use rand::Rng;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the position one cell over from `pos` in this direction,
    /// wrapping around to the opposite edge of `bounds` when stepping off of
    /// it
    pub(super) fn advance(self, pos: Position, bounds: Bounds) -> Position {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = bounds.decrement(y),
            Direction::Down => y = bounds.increment(y),
            Direction::Left => x = bounds.decrement(x),
            Direction::Right => x = bounds.increment(x),
        }
        Position { x, y }
    }

    pub(super) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A square toroidal board measured in logical units, divided into square
/// cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Bounds {
    pub(super) extent: u16,
    pub(super) cell: u16,
}

impl Bounds {
    pub(super) const BOARD: Bounds = Bounds {
        extent: consts::BOARD_EXTENT,
        cell: consts::CELL_SIZE,
    };

    /// Number of cells along each side
    pub(super) fn cells(self) -> u16 {
        self.extent / self.cell
    }

    /// Choose a grid-aligned position uniformly at random
    pub(super) fn random_cell<R: Rng>(self, rng: &mut R) -> Position {
        let cells = self.cells();
        Position::new(
            rng.random_range(0..cells) * self.cell,
            rng.random_range(0..cells) * self.cell,
        )
    }

    fn decrement(self, v: u16) -> u16 {
        v.checked_sub(self.cell)
            .unwrap_or_else(|| self.extent.saturating_sub(self.cell))
    }

    fn increment(self, v: u16) -> u16 {
        v.checked_add(self.cell)
            .filter(|&v2| v2 < self.extent)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::Up, Position::new(40, 140), Position::new(40, 120))]
    #[case(Direction::Down, Position::new(40, 140), Position::new(40, 160))]
    #[case(Direction::Left, Position::new(40, 140), Position::new(20, 140))]
    #[case(Direction::Right, Position::new(40, 140), Position::new(60, 140))]
    #[case(Direction::Up, Position::new(40, 0), Position::new(40, 380))]
    #[case(Direction::Down, Position::new(40, 380), Position::new(40, 0))]
    #[case(Direction::Left, Position::new(0, 140), Position::new(380, 140))]
    #[case(Direction::Right, Position::new(380, 140), Position::new(0, 140))]
    #[case(Direction::Right, Position::new(380, 380), Position::new(0, 380))]
    #[case(Direction::Up, Position::new(0, 0), Position::new(0, 380))]
    fn test_direction_advance(#[case] d: Direction, #[case] pos: Position, #[case] r: Position) {
        assert_eq!(d.advance(pos, Bounds::BOARD), r);
    }

    #[rstest]
    #[case(Direction::Up, Direction::Down)]
    #[case(Direction::Down, Direction::Up)]
    #[case(Direction::Left, Direction::Right)]
    #[case(Direction::Right, Direction::Left)]
    fn test_reverse(#[case] d: Direction, #[case] r: Direction) {
        assert_eq!(d.reverse(), r);
        assert_eq!(d.reverse().reverse(), d);
    }

    #[test]
    fn random_cells_are_aligned_and_in_bounds() {
        let mut rng = ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF);
        for _ in 0..500 {
            let p = Bounds::BOARD.random_cell(&mut rng);
            assert_eq!(p.x % consts::CELL_SIZE, 0, "{p:?} is not grid-aligned");
            assert_eq!(p.y % consts::CELL_SIZE, 0, "{p:?} is not grid-aligned");
            assert!(p.x < consts::BOARD_EXTENT, "{p:?} is out of bounds");
            assert!(p.y < consts::BOARD_EXTENT, "{p:?} is out of bounds");
        }
    }
}
