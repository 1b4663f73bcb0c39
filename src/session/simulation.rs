use super::direction::Direction;
use super::snake::Snake;
use crate::consts;
use rand::Rng;
use ratatui::layout::Position;

/// The outcome of advancing the simulation by one tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Step {
    /// The snake moved and the game goes on
    Continued,

    /// The snake tried to move off the board or into itself.  Nothing was
    /// moved.
    Collided,

    /// The snake ate the food and now covers every cell of the board, so
    /// there is nowhere left to put new food.
    BoardFull,
}

/// Snake, food, direction & score for a single game, advanced one tick at a
/// time
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Simulation<R = rand::rngs::ThreadRng> {
    rng: R,
    snake: Snake,
    /// `None` only once the snake has filled the board
    food: Option<Position>,
    /// The direction the snake moved in on the last tick
    direction: Direction,
    /// The direction the snake will move in on the next tick
    pending: Direction,
    score: u32,
}

impl<R: Rng> Simulation<R> {
    pub(crate) fn new(rng: R) -> Simulation<R> {
        let mut sim = Simulation {
            rng,
            snake: Snake::new(consts::START_CELL),
            food: None,
            direction: Direction::Right,
            pending: Direction::Right,
            score: 0,
        };
        sim.place_food();
        sim
    }

    /// Put the snake back at its starting cell, facing right, with a score of
    /// zero and freshly-placed food
    pub(crate) fn reset(&mut self) {
        self.snake = Snake::new(consts::START_CELL);
        self.direction = Direction::Right;
        self.pending = Direction::Right;
        self.score = 0;
        self.place_food();
    }

    /// Advance the snake by one cell in the pending direction.
    ///
    /// On a collision, the snake, food, and score are left untouched.
    pub(crate) fn step(&mut self) -> Step {
        self.direction = self.pending;
        let Some(new_head) = self.direction.advance(self.snake.head(), consts::BOARD_SIZE) else {
            return Step::Collided;
        };
        // The tail still counts: it only moves out of the way after the head
        // has moved in.
        if self.snake.contains(new_head) {
            return Step::Collided;
        }
        if self.food == Some(new_head) {
            self.snake.grow_to(new_head);
            self.score += 1;
            self.place_food();
            if self.food.is_none() {
                return Step::BoardFull;
            }
        } else {
            self.snake.slither_to(new_head);
        }
        Step::Continued
    }

    /// Pick uniformly random cells until one is found that the snake isn't
    /// on.  If the snake covers the whole board, the food is removed instead.
    fn place_food(&mut self) {
        let cell_qty = usize::from(consts::BOARD_SIZE) * usize::from(consts::BOARD_SIZE);
        if self.snake.len() >= cell_qty {
            self.food = None;
            return;
        }
        let rng = &mut self.rng;
        let snake = &self.snake;
        self.food = std::iter::repeat_with(|| {
            Position::new(
                rng.random_range(0..consts::BOARD_SIZE),
                rng.random_range(0..consts::BOARD_SIZE),
            )
        })
        .find(|&pos| !snake.contains(pos));
    }
}

impl<R> Simulation<R> {
    /// Request that the snake turn to `requested` on the next tick.  Requests
    /// to turn back the way the snake is currently moving are ignored.
    pub(crate) fn set_direction(&mut self, requested: Direction) {
        if requested != self.direction.reverse() {
            self.pending = requested;
        }
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Option<Position> {
        self.food
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, pos: Position) {
        self.food = Some(pos);
    }

    #[cfg(test)]
    pub(crate) fn set_snake<I: IntoIterator<Item = Position>>(&mut self, cells: I) {
        let mut cells = cells.into_iter().collect::<Vec<_>>();
        let mut snake = Snake::new(cells.pop().unwrap_or(consts::START_CELL));
        for pos in cells.into_iter().rev() {
            snake.grow_to(pos);
        }
        self.snake = snake;
    }
}
