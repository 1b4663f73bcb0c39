use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction on a square
    /// board `size` cells wide, or `None` if the step would leave the board.
    pub(crate) fn advance(self, pos: Position, size: u16) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = y.checked_sub(1)?,
            Direction::Down => y = increment_in_bounds(y, size)?,
            Direction::Left => x = x.checked_sub(1)?,
            Direction::Right => x = increment_in_bounds(x, size)?,
        }
        Some(Position { x, y })
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

fn increment_in_bounds(v: u16, max: u16) -> Option<u16> {
    v.checked_add(1).filter(|&v2| v2 < max)
}
