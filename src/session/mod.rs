//! Game session lifecycle: starting, ticking, ending & recording scores
mod direction;
mod simulation;
mod snake;
mod ticker;
pub(crate) use self::direction::Direction;
use self::simulation::{Simulation, Step};
#[cfg(test)]
pub(crate) use self::ticker::ManualTicker;
pub(crate) use self::ticker::{IntervalTicker, Ticker};
use crate::consts;
use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::store::KeyValueStore;
use crate::util::ErrorChain;
use ratatui::layout::Position;
use rand::Rng;
use std::collections::VecDeque;
use thiserror::Error;

/// The state of the board handed to a [`Renderer`] after each move
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot<'a> {
    /// The snake's cells, head first
    pub(crate) snake: &'a VecDeque<Position>,
    pub(crate) food: Option<Position>,
    pub(crate) score: u32,
}

/// Something that displays the board.  It is told about every move; how (or
/// whether) it draws anything is its own business.
pub(crate) trait Renderer {
    fn render(&mut self, snapshot: Snapshot<'_>);
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum SessionState {
    /// No game has been started, or the player has left the last one
    #[default]
    Idle,
    Running,
    Ended,
}

/// Why a game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EndReason {
    /// The snake ran into a wall or itself
    Collided,

    /// The snake filled the entire board
    BoardFull,
}

/// The end-of-game report
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GameOver {
    pub(crate) score: u32,
    pub(crate) reason: EndReason,
    /// Whether writing the score to the leaderboard failed
    pub(crate) save_failed: bool,
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum ValidationError {
    #[error("Please enter your name")]
    EmptyName,
}

/// A single player's series of games: owns the simulation, the tick source,
/// the renderer, and the leaderboard the final scores go to
#[derive(Clone, Debug)]
pub(crate) struct Session<S, T, V, R = rand::rngs::ThreadRng> {
    state: SessionState,
    player: String,
    simulation: Simulation<R>,
    leaderboard: Leaderboard<S>,
    ticker: T,
    renderer: V,
    outcome: Option<GameOver>,
}

impl<S: KeyValueStore, T: Ticker, V: Renderer, R: Rng> Session<S, T, V, R> {
    pub(crate) fn new(leaderboard: Leaderboard<S>, ticker: T, renderer: V, rng: R) -> Self {
        Session {
            state: SessionState::Idle,
            player: String::new(),
            simulation: Simulation::new(rng),
            leaderboard,
            ticker,
            renderer,
            outcome: None,
        }
    }

    /// Start a new game for the player `name`.
    ///
    /// Starting while a game is already running does nothing.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `name` is empty or all whitespace; the session is left
    /// as it was.
    pub(crate) fn start(&mut self, name: &str) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.state == SessionState::Running {
            return Ok(());
        }
        name.clone_into(&mut self.player);
        self.simulation.reset();
        self.outcome = None;
        self.state = SessionState::Running;
        self.ticker.start(consts::TICK_PERIOD);
        log::info!("Starting game for {:?}", self.player);
        self.render();
        Ok(())
    }

    /// Run the tick handler if the tick source has a tick due.  Returns
    /// `true` if a tick was handled.
    pub(crate) fn poll_tick(&mut self) -> bool {
        if self.ticker.take_due() {
            self.tick();
            true
        } else {
            false
        }
    }

    /// How long until the tick source next fires, or `None` if no game is
    /// running
    pub(crate) fn until_next_tick(&self) -> Option<std::time::Duration> {
        self.ticker.until_next()
    }

    /// Advance the game by one tick.  Does nothing unless a game is running.
    pub(crate) fn tick(&mut self) {
        if self.state != SessionState::Running {
            return;
        }
        match self.simulation.step() {
            Step::Continued => self.render(),
            Step::Collided => self.finish(EndReason::Collided),
            Step::BoardFull => {
                self.render();
                self.finish(EndReason::BoardFull);
            }
        }
    }

    fn finish(&mut self, reason: EndReason) {
        self.state = SessionState::Ended;
        self.ticker.stop();
        let score = self.simulation.score();
        log::info!("Game over for {:?} ({reason:?}); score: {score}", self.player);
        let save_failed = match self.leaderboard.record(&self.player, score) {
            Ok(()) => false,
            Err(e) => {
                log::error!("{}", e.source_chain());
                true
            }
        };
        self.leaderboard.load();
        self.outcome = Some(GameOver {
            score,
            reason,
            save_failed,
        });
    }

    fn render(&mut self) {
        self.renderer.render(Snapshot {
            snake: self.simulation.snake().cells(),
            food: self.simulation.food(),
            score: self.simulation.score(),
        });
    }

    /// Leave a finished game, going back to the idle state.  Does nothing
    /// unless the last game has ended.
    pub(crate) fn return_to_idle(&mut self) {
        if self.state == SessionState::Ended {
            self.state = SessionState::Idle;
            self.leaderboard.load();
        }
    }
}

impl<S, T, V, R> Session<S, T, V, R> {
    /// Ask the snake to turn.  Ignored unless a game is running.
    pub(crate) fn direction_requested(&mut self, dir: Direction) {
        if self.state == SessionState::Running {
            self.simulation.set_direction(dir);
        }
    }

    pub(crate) fn state(&self) -> SessionState {
        self.state
    }

    /// The trimmed name given to the most recent successful `start()`
    pub(crate) fn player(&self) -> &str {
        &self.player
    }

    #[cfg(test)]
    pub(crate) fn score(&self) -> u32 {
        self.simulation.score()
    }

    /// The report for the last game, if it has ended
    pub(crate) fn outcome(&self) -> Option<GameOver> {
        self.outcome
    }

    pub(crate) fn standings(&self) -> &[LeaderboardEntry] {
        self.leaderboard.all()
    }

    pub(crate) fn renderer(&self) -> &V {
        &self.renderer
    }

    #[cfg(test)]
    pub(crate) fn ticker(&self) -> &T {
        &self.ticker
    }

    #[cfg(test)]
    pub(crate) fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    #[cfg(test)]
    pub(crate) fn simulation_mut(&mut self) -> &mut Simulation<R> {
        &mut self.simulation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, MemoryStore};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::num::NonZeroU32;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// A renderer that remembers every snapshot it's given
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    struct Recorder {
        frames: Vec<(Vec<Position>, Option<Position>, u32)>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, snapshot: Snapshot<'_>) {
            self.frames.push((
                snapshot.snake.iter().copied().collect(),
                snapshot.food,
                snapshot.score,
            ));
        }
    }

    type TestSession<S = MemoryStore> = Session<S, ManualTicker, Recorder, ChaCha12Rng>;

    fn new_session() -> TestSession {
        new_session_with_store(MemoryStore::new())
    }

    fn new_session_with_store(store: MemoryStore) -> TestSession {
        Session::new(
            Leaderboard::new(store),
            ManualTicker::new(),
            Recorder::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
    }

    /// Fire the ticker and handle the resulting tick
    fn advance<S: KeyValueStore>(session: &mut TestSession<S>) -> bool {
        session.ticker_mut().fire() && session.poll_tick()
    }

    fn last_frame<S>(session: &TestSession<S>) -> &(Vec<Position>, Option<Position>, u32) {
        session.renderer().frames.last().unwrap()
    }

    #[test]
    fn starts_idle() {
        let session = new_session();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.ticker().running());
        assert_eq!(session.outcome(), None);
    }

    #[test]
    fn empty_name_rejected() {
        let mut session = new_session();
        assert_eq!(session.start(""), Err(ValidationError::EmptyName));
        assert_eq!(session.start("   \t"), Err(ValidationError::EmptyName));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.ticker().running());
        assert!(session.renderer().frames.is_empty());
    }

    #[test]
    fn start_runs_ticker() {
        let mut session = new_session();
        session.start("  Alice ").unwrap();
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.player(), "Alice");
        assert_eq!(session.ticker().period(), Some(Duration::from_millis(150)));
        assert_eq!(session.ticker().starts, 1);
        let (snake, food, score) = last_frame(&session);
        assert_eq!(snake, &[Position::new(10, 10)]);
        assert_ne!(*food, Some(Position::new(10, 10)));
        assert_eq!(*score, 0);
    }

    #[test]
    fn double_start_is_noop() {
        let mut session = new_session();
        session.start("Alice").unwrap();
        session.simulation_mut().set_food(Position::new(0, 0));
        assert!(advance(&mut session));
        session.start("Bob").unwrap();
        assert_eq!(session.player(), "Alice");
        assert_eq!(session.ticker().starts, 1);
        assert_eq!(last_frame(&session).0, [Position::new(11, 10)]);
    }

    #[test]
    fn double_start_with_empty_name_still_rejected() {
        let mut session = new_session();
        session.start("Alice").unwrap();
        assert_eq!(session.start(""), Err(ValidationError::EmptyName));
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn tick_without_food() {
        let mut session = new_session();
        session.start("Alice").unwrap();
        session.simulation_mut().set_food(Position::new(3, 3));
        assert!(advance(&mut session));
        assert_eq!(
            last_frame(&session),
            &(vec![Position::new(11, 10)], Some(Position::new(3, 3)), 0)
        );
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn tick_onto_food() {
        let mut session = new_session();
        session.start("Alice").unwrap();
        session.simulation_mut().set_food(Position::new(11, 10));
        assert!(advance(&mut session));
        let (snake, food, score) = last_frame(&session);
        assert_eq!(snake, &[Position::new(11, 10), Position::new(10, 10)]);
        assert_eq!(*score, 1);
        let food = food.unwrap();
        assert!(!snake.contains(&food));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn no_tick_without_fire() {
        let mut session = new_session();
        session.start("Alice").unwrap();
        let frames = session.renderer().frames.len();
        assert!(!session.poll_tick());
        assert_eq!(session.renderer().frames.len(), frames);
    }

    #[test]
    fn direction_ignored_unless_running() {
        let mut session = new_session();
        session.direction_requested(Direction::Down);
        session.start("Alice").unwrap();
        session.simulation_mut().set_food(Position::new(0, 0));
        assert!(advance(&mut session));
        assert_eq!(last_frame(&session).0, [Position::new(11, 10)]);
    }

    #[test]
    fn direction_change() {
        let mut session = new_session();
        session.start("Alice").unwrap();
        session.simulation_mut().set_food(Position::new(0, 0));
        session.direction_requested(Direction::Down);
        assert!(advance(&mut session));
        assert_eq!(last_frame(&session).0, [Position::new(10, 11)]);
        session.direction_requested(Direction::Up);
        assert!(advance(&mut session));
        assert_eq!(last_frame(&session).0, [Position::new(10, 12)]);
    }

    /// Eat one piece of food, then run right into the wall
    fn play_to_wall<S: KeyValueStore>(session: &mut TestSession<S>) {
        session.simulation_mut().set_food(Position::new(11, 10));
        assert!(advance(session));
        session.simulation_mut().set_food(Position::new(0, 0));
        // Head at 11; moves to 19 in eight ticks
        for _ in 0..8 {
            assert!(advance(session));
            assert_eq!(session.state(), SessionState::Running);
        }
        assert_eq!(last_frame(session).0[0], Position::new(19, 10));
        let frames = session.renderer().frames.len();
        assert!(advance(session));
        assert_eq!(session.renderer().frames.len(), frames);
    }

    #[test]
    fn collision_ends_game_and_records_score() {
        let mut session = new_session();
        session.start("Alice").unwrap();
        play_to_wall(&mut session);
        assert_eq!(session.state(), SessionState::Ended);
        assert!(!session.ticker().running());
        assert_eq!(
            session.outcome(),
            Some(GameOver {
                score: 1,
                reason: EndReason::Collided,
                save_failed: false,
            })
        );
        assert_eq!(
            session.standings(),
            [LeaderboardEntry {
                name: String::from("Alice"),
                score: NonZeroU32::new(1).unwrap(),
            }]
        );
        // No more ticks once ended
        assert!(!session.ticker_mut().fire());
        session.tick();
        assert_eq!(session.state(), SessionState::Ended);
    }

    #[test]
    fn collision_ranks_among_existing_scores() {
        let mut store = MemoryStore::new();
        store
            .set(
                consts::LEADERBOARD_KEY,
                r#"[{"name":"Bob","score":5},{"name":"Carol","score":1}]"#,
            )
            .unwrap();
        let mut session = new_session_with_store(store);
        session.start("Alice").unwrap();
        play_to_wall(&mut session);
        let names = session
            .standings()
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["Bob", "Carol", "Alice"]);
    }

    #[test]
    fn filling_the_board_wins() {
        let mut session = new_session();
        session.start("Alice").unwrap();
        let mut body = vec![Position::new(18, 19)];
        body.extend(
            (0..consts::BOARD_SIZE)
                .flat_map(|y| (0..consts::BOARD_SIZE).map(move |x| Position::new(x, y)))
                .filter(|&p| p != Position::new(18, 19) && p != Position::new(19, 19)),
        );
        session.simulation_mut().set_snake(body);
        session.simulation_mut().set_food(Position::new(19, 19));
        assert!(advance(&mut session));
        assert_eq!(session.state(), SessionState::Ended);
        assert!(!session.ticker().running());
        let (snake, food, score) = last_frame(&session);
        assert_eq!(snake.len(), 400);
        assert_eq!(*food, None);
        assert_eq!(*score, 1);
        assert_eq!(
            session.outcome(),
            Some(GameOver {
                score: 1,
                reason: EndReason::BoardFull,
                save_failed: false,
            })
        );
        assert_eq!(session.standings().len(), 1);
    }

    #[test]
    fn save_failure_is_reported() {
        let tmpdir = tempfile::tempdir().unwrap();
        let blocker = tmpdir.path().join("blocker");
        fs_err::write(&blocker, "not a directory").unwrap();
        let mut session = Session::new(
            Leaderboard::new(FileStore::new(blocker.join("data"))),
            ManualTicker::new(),
            Recorder::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        session.start("Alice").unwrap();
        play_to_wall(&mut session);
        assert_eq!(session.state(), SessionState::Ended);
        assert_eq!(
            session.outcome(),
            Some(GameOver {
                score: 1,
                reason: EndReason::Collided,
                save_failed: true,
            })
        );
        assert!(session.standings().is_empty());
        session.start("Alice").unwrap();
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn zero_score_not_recorded() {
        let mut session = new_session();
        session.start("Alice").unwrap();
        session.simulation_mut().set_food(Position::new(0, 0));
        // Nine moves to reach the edge, then one into the wall
        for _ in 0..10 {
            assert!(advance(&mut session));
        }
        assert_eq!(session.state(), SessionState::Ended);
        assert_eq!(session.outcome().map(|o| o.score), Some(0));
        assert!(session.standings().is_empty());
    }

    #[test]
    fn restart_after_end() {
        let mut session = new_session();
        session.start("Alice").unwrap();
        play_to_wall(&mut session);
        session.start("Alice").unwrap();
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.outcome(), None);
        assert_eq!(session.score(), 0);
        assert_eq!(session.ticker().starts, 2);
        assert_eq!(last_frame(&session).0, [Position::new(10, 10)]);
    }

    #[test]
    fn return_to_idle() {
        let mut session = new_session();
        session.return_to_idle();
        assert_eq!(session.state(), SessionState::Idle);
        session.start("Alice").unwrap();
        session.return_to_idle();
        assert_eq!(session.state(), SessionState::Running);
        play_to_wall(&mut session);
        session.return_to_idle();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.standings().len(), 1);
    }
}
