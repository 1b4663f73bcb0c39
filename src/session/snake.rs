use ratatui::layout::Position;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// All positions are relative to the top-left corner of the board.  The
/// body is never empty, and no two of its cells are equal while the snake is
/// alive.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells occupied by the snake, from the head to the tail
    cells: VecDeque<Position>,
}

impl Snake {
    /// Create a new one-cell snake at `head`
    pub(crate) fn new(head: Position) -> Snake {
        Snake {
            cells: VecDeque::from([head]),
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.cells.front().copied().unwrap_or_default()
    }

    /// Return the cells occupied by the snake, head first
    pub(crate) fn cells(&self) -> &VecDeque<Position> {
        &self.cells
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Move the head to `pos`, keeping the tail in place so that the snake
    /// grows by one cell
    pub(crate) fn grow_to(&mut self, pos: Position) {
        self.cells.push_front(pos);
    }

    /// Move the head to `pos` and drop the tail, leaving the length unchanged
    pub(crate) fn slither_to(&mut self, pos: Position) {
        self.cells.push_front(pos);
        let _ = self.cells.pop_back();
    }
}
