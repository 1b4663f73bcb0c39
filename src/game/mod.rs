mod board;
pub(crate) use self::board::BoardView;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::leaderboard::LeaderboardEntry;
use crate::menu::MainMenu;
use crate::session::{
    Direction, EndReason, GameOver, Renderer, Session, SessionState, Ticker,
};
use crate::store::KeyValueStore;
use crate::util::get_display_area;
use crate::widgets::LeaderboardTable;
use crossterm::event::Event;
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::Widget,
};

/// Handle an input event on the game screen.  Returns `Some` if the app
/// should switch to another screen.
pub(crate) fn handle_event<S, T, V, R>(
    session: &mut Session<S, T, V, R>,
    event: Event,
) -> Option<Screen>
where
    S: KeyValueStore,
    T: Ticker,
    V: Renderer,
    R: Rng,
{
    let cmd = Command::from_key_event(event.as_key_press_event()?)?;
    match session.state() {
        SessionState::Running => match cmd {
            Command::Quit => return Some(Screen::Quit),
            Command::Up => session.direction_requested(Direction::Up),
            Command::Down => session.direction_requested(Direction::Down),
            Command::Left => session.direction_requested(Direction::Left),
            Command::Right => session.direction_requested(Direction::Right),
            _ => (),
        },
        SessionState::Ended => match cmd {
            Command::R | Command::Enter => {
                let name = session.player().to_owned();
                if let Err(e) = session.start(&name) {
                    log::error!("Could not restart game: {e}");
                }
            }
            Command::M | Command::Esc => {
                session.return_to_idle();
                return Some(Screen::Menu(MainMenu::new(session.player())));
            }
            Command::Quit | Command::Q => return Some(Screen::Quit),
            _ => (),
        },
        SessionState::Idle => return Some(Screen::Menu(MainMenu::new(session.player()))),
    }
    None
}

/// The game screen: score bar, board, leaderboard, and, once the game is
/// over, the final result
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GameView<'a> {
    player: &'a str,
    board: &'a BoardView,
    outcome: Option<GameOver>,
    standings: &'a [LeaderboardEntry],
}

impl<'a> GameView<'a> {
    pub(crate) fn new<S, T, R>(session: &'a Session<S, T, BoardView, R>) -> GameView<'a> {
        GameView {
            player: session.player(),
            board: session.renderer(),
            outcome: session.outcome(),
            standings: session.standings(),
        }
    }
}

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, main_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(" Player: {}   Score: {}", self.player, self.board.score()),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let [board_area, side_area] =
            Layout::horizontal([BoardView::WIDTH, LeaderboardTable::WIDTH])
                .flex(Flex::Center)
                .spacing(2)
                .areas(main_area);
        let [board_area] = Layout::vertical([BoardView::HEIGHT])
            .flex(Flex::Center)
            .areas(board_area);
        self.board.render(board_area, buf);

        let [table_area, result_area] =
            Layout::vertical([Constraint::Length(LeaderboardTable::HEIGHT), Constraint::Fill(1)])
                .spacing(1)
                .areas(side_area);
        LeaderboardTable::new(self.standings).render(table_area, buf);

        match self.outcome {
            None => {
                Line::from_iter([
                    Span::raw(" Steer with the arrow keys — Quit ("),
                    Span::styled("Ctrl-C", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg_area, buf);
            }
            Some(outcome) => {
                let headline = match outcome.reason {
                    EndReason::Collided => "— GAME OVER —",
                    EndReason::BoardFull => "— BOARD FULL! YOU WIN —",
                };
                let mut lines = vec![
                    Line::from(headline),
                    Line::from(format!("Final score: {}", outcome.score)),
                ];
                if outcome.save_failed {
                    lines.push(Line::styled(
                        "Could not save the leaderboard",
                        consts::ERROR_STYLE,
                    ));
                }
                for (line, row) in lines.into_iter().zip(result_area.rows()) {
                    line.render(row, buf);
                }
                Line::from_iter([
                    Span::raw(" Play Again ("),
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw(") — Main Menu ("),
                    Span::styled("m", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg_area, buf);
            }
        }
    }
}
