//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::{Position, Size},
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Width & height of the (square) board, in cells
pub(crate) const BOARD_SIZE: u16 = 20;

/// Time between movements of the snake
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(150);

/// Cell occupied by the snake at the start of every game
pub(crate) const START_CELL: Position = Position { x: 10, y: 10 };

/// Maximum number of entries kept on the leaderboard
pub(crate) const LEADERBOARD_CAPACITY: usize = 10;

/// Key under which the leaderboard is stored
pub(crate) const LEADERBOARD_KEY: &str = "snake_highscores";

/// Maximum length, in characters, of a player name
pub(crate) const MAX_NAME_LEN: usize = 16;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Glyph for the snake's head
pub(crate) const SNAKE_HEAD_SYMBOL: char = '@';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for validation & storage problems shown to the player
pub(crate) const ERROR_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for the scores in the leaderboard
pub(crate) const SCORE_STYLE: Style = Style::new().fg(Color::Yellow);
