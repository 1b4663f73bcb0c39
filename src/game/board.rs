use crate::consts;
use crate::session::{Renderer, Snapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Position, Rect},
    style::Style,
    widgets::{Block, Widget},
};

/// What occupies a cell of the board
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Mark {
    #[default]
    Empty,
    Head,
    Body,
    Food,
}

/// The board as last reported by the session, one mark per cell
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct BoardView {
    /// Row-major marks for every cell
    marks: Vec<Mark>,
    score: u32,
}

impl BoardView {
    /// Each board cell is drawn this many terminal columns wide so that the
    /// board looks roughly square
    const CELL_WIDTH: u16 = 2;

    /// The width that should be used for the `Rect` the board is rendered in
    pub(crate) const WIDTH: u16 = consts::BOARD_SIZE * Self::CELL_WIDTH + 2;

    /// The height that should be used for the `Rect` the board is rendered in
    pub(crate) const HEIGHT: u16 = consts::BOARD_SIZE + 2;

    pub(crate) fn new() -> BoardView {
        let side = usize::from(consts::BOARD_SIZE);
        BoardView {
            marks: vec![Mark::Empty; side * side],
            score: 0,
        }
    }

    fn index(pos: Position) -> Option<usize> {
        (pos.x < consts::BOARD_SIZE && pos.y < consts::BOARD_SIZE).then(|| {
            usize::from(pos.y) * usize::from(consts::BOARD_SIZE) + usize::from(pos.x)
        })
    }

    pub(crate) fn mark_at(&self, pos: Position) -> Mark {
        Self::index(pos)
            .and_then(|i| self.marks.get(i).copied())
            .unwrap_or_default()
    }

    fn set_mark(&mut self, pos: Position, mark: Mark) {
        if let Some(slot) = Self::index(pos).and_then(|i| self.marks.get_mut(i)) {
            *slot = mark;
        }
    }

    /// The score as of the last update
    pub(crate) fn score(&self) -> u32 {
        self.score
    }
}

impl Default for BoardView {
    fn default() -> BoardView {
        BoardView::new()
    }
}

impl Renderer for BoardView {
    fn render(&mut self, snapshot: Snapshot<'_>) {
        self.marks.fill(Mark::Empty);
        for (i, &pos) in snapshot.snake.iter().enumerate() {
            self.set_mark(pos, if i == 0 { Mark::Head } else { Mark::Body });
        }
        if let Some(food) = snapshot.food {
            self.set_mark(food, Mark::Food);
        }
        self.score = snapshot.score;
    }
}

impl Widget for &BoardView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::bordered().render(area, buf);
        let inner = area.inner(Margin::new(1, 1));
        for y in 0..consts::BOARD_SIZE {
            for x in 0..consts::BOARD_SIZE {
                let (symbol, style) = match self.mark_at(Position::new(x, y)) {
                    Mark::Empty => continue,
                    Mark::Head => (consts::SNAKE_HEAD_SYMBOL, consts::SNAKE_STYLE),
                    Mark::Body => (consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE),
                    Mark::Food => (consts::FOOD_SYMBOL, consts::FOOD_STYLE),
                };
                let Some(cx) = inner.x.checked_add(x * BoardView::CELL_WIDTH) else {
                    continue;
                };
                let Some(cy) = inner.y.checked_add(y) else {
                    continue;
                };
                if !inner.contains(Position::new(cx, cy)) {
                    continue;
                }
                if let Some(cell) = buf.cell_mut((cx, cy)) {
                    cell.set_char(symbol);
                    cell.set_style(Style::reset().patch(style));
                }
            }
        }
    }
}
