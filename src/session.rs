use crate::board::{Board, Move, Outcome, Symbol};
use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::policy::PolicyKind;
use crate::random::{RandomGenerator, StandardRandomGenerator};
use tracing::{debug, info, instrument};

/// One game of tic-tac-toe, owned by whatever presents it.
///
/// Holds the canonical board, the symbol to move and the policy bound to
/// each symbol. Every move, human or automatic, goes through
/// [`GameSession::attempt_move`], which enforces legality, re-evaluates the
/// outcome and advances the turn.
///
/// A session starts out idle, like a setup screen before "Start" is pressed:
/// moves are refused until [`GameSession::start`].
///
/// ```rust
/// use minimax_ttt::board::{Move, Outcome, Symbol};
/// use minimax_ttt::policy::PolicyKind;
/// use minimax_ttt::session::GameSession;
///
/// let mut session = GameSession::builder()
///     .with_policy(Symbol::X, PolicyKind::Human)
///     .with_policy(Symbol::O, PolicyKind::Optimal)
///     .build();
///
/// session.start().unwrap();
/// let outcome = session.play_human_move(Move::new(0, 0)).unwrap();
///
/// assert_eq!(outcome, Outcome::InProgress);
/// assert_eq!(session.history(), &[Move::new(0, 0), Move::new(1, 1)]);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession<R: RandomGenerator = StandardRandomGenerator> {
    board: Board,
    current_player: Symbol,
    config: GameConfig,
    started: bool,
    history: Vec<Move>,
    random: R,
}

/// A builder for [`GameSession`].
#[derive(Debug, Clone)]
pub struct GameSessionBuilder<R: RandomGenerator> {
    config: GameConfig,
    random: R,
}

impl GameSessionBuilder<StandardRandomGenerator> {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            random: StandardRandomGenerator,
        }
    }
}

impl Default for GameSessionBuilder<StandardRandomGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomGenerator> GameSessionBuilder<R> {
    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_policy(mut self, symbol: Symbol, kind: PolicyKind) -> Self {
        self.config.set_policy(symbol, kind);
        self
    }

    pub fn with_first_player(mut self, symbol: Symbol) -> Self {
        self.config.first_player = symbol;
        self
    }

    /// Sets the generator used by the easy tier. Seed it to make games reproducible.
    pub fn with_random_generator<K: RandomGenerator>(self, random: K) -> GameSessionBuilder<K> {
        GameSessionBuilder {
            config: self.config,
            random,
        }
    }

    pub fn build(self) -> GameSession<R> {
        GameSession {
            board: Board::new(),
            current_player: self.config.first_player,
            config: self.config,
            started: false,
            history: Vec::new(),
            random: self.random,
        }
    }
}

impl GameSession<StandardRandomGenerator> {
    /// Returns a new builder with the default configuration.
    pub fn builder() -> GameSessionBuilder<StandardRandomGenerator> {
        GameSessionBuilder::new()
    }
}

impl<R: RandomGenerator> GameSession<R> {
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The symbol whose turn it is. After a game ends this stays on the symbol that finished it.
    pub fn current_player(&self) -> Symbol {
        self.current_player
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn policy(&self, symbol: Symbol) -> PolicyKind {
        self.config.policy(symbol)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Recomputed from the board on every call.
    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Moves applied since the last start, in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Rebinds a symbol's policy. Only allowed between games.
    pub fn set_policy(&mut self, symbol: Symbol, kind: PolicyKind) -> Result<()> {
        if self.started {
            return Err(Error::PoliciesLocked);
        }
        self.config.set_policy(symbol, kind);
        Ok(())
    }

    /// Clears the board, locks the policies and plays any automatic turns
    /// until a human must move or the game ends.
    pub fn start(&mut self) -> Result<Outcome> {
        self.clear();
        self.started = true;
        info!(
            x = %self.config.x,
            o = %self.config.o,
            first = %self.current_player,
            "game started"
        );
        self.advance()
    }

    /// Clears the board and returns to the idle state, unlocking the policies.
    pub fn reset(&mut self) {
        self.clear();
        self.started = false;
        debug!("game reset");
    }

    fn clear(&mut self) {
        self.board = Board::new();
        self.current_player = self.config.first_player;
        self.history.clear();
    }

    /// Places the current player's symbol at `mv`.
    ///
    /// This is the single mutation path for every move source. A rejected
    /// attempt leaves the board and the turn exactly as they were, so callers
    /// can simply ignore [`Error::InvalidMove`].
    pub fn attempt_move(&mut self, mv: Move) -> Result<Outcome> {
        if !self.started {
            return Err(Error::NotStarted);
        }

        let outcome = self.board.outcome();
        if outcome.is_terminal() {
            return Err(Error::GameOver { outcome });
        }

        let symbol = self.current_player;
        if let Err(err) = self.board.place(mv, symbol) {
            debug!(%symbol, %mv, %err, "move rejected");
            return Err(err);
        }
        self.history.push(mv);

        let outcome = self.board.outcome();
        if outcome.is_terminal() {
            info!(%outcome, moves = self.history.len(), "game over");
        } else {
            self.current_player = symbol.opponent();
        }
        debug!(%symbol, %mv, %outcome, "move applied");
        Ok(outcome)
    }

    /// Applies a move on behalf of a human and lets the engine reply.
    ///
    /// Refused with [`Error::AutomaticTurn`] when the side to move is not human.
    pub fn play_human_move(&mut self, mv: Move) -> Result<Outcome> {
        if self.started && !self.is_over() {
            let symbol = self.current_player;
            if self.policy(symbol).is_automatic() {
                return Err(Error::AutomaticTurn { symbol });
            }
        }
        self.attempt_move(mv)?;
        self.advance()
    }

    /// Plays one move for the side to move if its policy is automatic.
    ///
    /// Returns `None` when a human is to move or the game is over.
    #[instrument(level = "debug", skip(self))]
    pub fn play_automatic_turn(&mut self) -> Result<Option<Move>> {
        if !self.started {
            return Err(Error::NotStarted);
        }
        if self.is_over() {
            return Ok(None);
        }

        let symbol = self.current_player;
        let kind = self.policy(symbol);
        if !kind.is_automatic() {
            return Ok(None);
        }

        let snapshot = self.board;
        let mv = kind.select_move(&snapshot, symbol, &mut self.random)?;
        self.attempt_move(mv)?;
        Ok(Some(mv))
    }

    /// Plays automatic turns until a human must move or the game ends.
    #[instrument(level = "debug", skip(self))]
    pub fn advance(&mut self) -> Result<Outcome> {
        while self.play_automatic_turn()?.is_some() {}
        Ok(self.outcome())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MoveRejection;
    use crate::minimax::best_move;
    use crate::random::SeededRandomGenerator;

    fn human_vs_human() -> GameSession {
        GameSession::builder()
            .with_policy(Symbol::X, PolicyKind::Human)
            .with_policy(Symbol::O, PolicyKind::Human)
            .build()
    }

    #[test]
    fn moves_are_refused_before_start() {
        let mut session = human_vs_human();

        assert!(matches!(
            session.attempt_move(Move::new(0, 0)),
            Err(Error::NotStarted)
        ));
        assert!(matches!(session.play_automatic_turn(), Err(Error::NotStarted)));
        assert_eq!(session.board(), &Board::new());
    }

    #[test]
    fn turns_alternate_and_rejections_change_nothing() {
        // arrange
        let mut session = human_vs_human();
        session.start().unwrap();

        // act
        session.attempt_move(Move::new(1, 1)).unwrap();
        let before = *session.board();
        let occupied = session.attempt_move(Move::new(1, 1)).unwrap_err();
        let off_grid = session.attempt_move(Move::new(0, 5)).unwrap_err();

        // assert
        assert!(matches!(
            occupied,
            Error::InvalidMove {
                reason: MoveRejection::Occupied(Symbol::X),
                ..
            }
        ));
        assert!(off_grid.is_invalid_move());
        assert_eq!(session.board(), &before);
        assert_eq!(session.current_player(), Symbol::O);
        assert_eq!(session.history(), &[Move::new(1, 1)]);
    }

    #[test]
    fn win_ends_the_game() {
        let mut session = human_vs_human();
        session.start().unwrap();

        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(session.attempt_move(Move::new(row, col)).unwrap(), Outcome::InProgress);
        }
        let outcome = session.attempt_move(Move::new(0, 2)).unwrap();

        assert_eq!(outcome, Outcome::Win(Symbol::X));
        assert!(session.is_over());
        assert_eq!(session.current_player(), Symbol::X);
        assert!(matches!(
            session.attempt_move(Move::new(2, 2)),
            Err(Error::GameOver {
                outcome: Outcome::Win(Symbol::X)
            })
        ));
        assert_eq!(session.play_automatic_turn().unwrap(), None);
    }

    #[test]
    fn optimal_against_optimal_always_draws() {
        for first in Symbol::ALL {
            // arrange
            let mut session = GameSession::builder()
                .with_config(GameConfig::new(PolicyKind::Optimal, PolicyKind::Optimal))
                .with_first_player(first)
                .build();
            session.start_without_advancing();

            // act
            while !session.is_over() {
                let to_move = session.current_player();
                let best = best_move(session.board(), to_move).unwrap();
                assert_eq!(best.score, 0, "{to_move} to move:\n{}", session.board());

                let played = session.play_automatic_turn().unwrap();
                assert_eq!(played, best.mv);
            }

            // assert
            assert_eq!(session.outcome(), Outcome::Draw);
            assert_eq!(session.history().len(), 9);
        }
    }

    #[test]
    fn optimal_never_loses_to_random() {
        for seed in 0..8 {
            for optimal in Symbol::ALL {
                let mut session = GameSession::builder()
                    .with_policy(optimal, PolicyKind::Optimal)
                    .with_policy(optimal.opponent(), PolicyKind::UniformRandom)
                    .with_random_generator(SeededRandomGenerator::new(seed))
                    .build();

                let outcome = session.start().unwrap();

                assert!(outcome.is_terminal());
                assert_ne!(
                    outcome,
                    Outcome::Win(optimal.opponent()),
                    "seed {seed}, optimal {optimal}:\n{}",
                    session.board()
                );
            }
        }
    }

    #[test]
    fn engine_replies_to_a_human_move() {
        let mut session = GameSession::builder()
            .with_policy(Symbol::X, PolicyKind::Human)
            .with_policy(Symbol::O, PolicyKind::Optimal)
            .build();
        assert_eq!(session.start().unwrap(), Outcome::InProgress);
        assert!(session.history().is_empty());

        session.play_human_move(Move::new(0, 0)).unwrap();

        assert_eq!(session.history(), &[Move::new(0, 0), Move::new(1, 1)]);
        assert_eq!(session.current_player(), Symbol::X);
        assert!(matches!(
            session.play_human_move(Move::new(0, 0)),
            Err(Error::InvalidMove { .. })
        ));
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn human_moves_are_refused_on_engine_turns() {
        let mut session = GameSession::builder()
            .with_policy(Symbol::X, PolicyKind::Human)
            .with_policy(Symbol::O, PolicyKind::Optimal)
            .with_first_player(Symbol::O)
            .build();
        session.start_without_advancing();

        assert!(matches!(
            session.play_human_move(Move::new(2, 2)),
            Err(Error::AutomaticTurn { symbol: Symbol::O })
        ));
        assert!(session.history().is_empty());
    }

    #[test]
    fn engine_opens_when_it_moves_first() {
        let mut session = GameSession::builder()
            .with_policy(Symbol::X, PolicyKind::Optimal)
            .with_policy(Symbol::O, PolicyKind::Human)
            .build();

        let outcome = session.start().unwrap();

        assert_eq!(outcome, Outcome::InProgress);
        assert_eq!(session.history(), &[Move::new(0, 0)]);
        assert_eq!(session.current_player(), Symbol::O);
    }

    #[test]
    fn policies_are_locked_until_reset() {
        let mut session = human_vs_human();
        session.start().unwrap();

        assert!(matches!(
            session.set_policy(Symbol::O, PolicyKind::Optimal),
            Err(Error::PoliciesLocked)
        ));

        session.reset();
        session.set_policy(Symbol::O, PolicyKind::Optimal).unwrap();

        assert!(!session.is_started());
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.policy(Symbol::O), PolicyKind::Optimal);
    }

    #[test]
    fn seeded_random_games_replay_exactly() {
        let play = |seed| {
            let mut session = GameSession::builder()
                .with_config(GameConfig::new(
                    PolicyKind::UniformRandom,
                    PolicyKind::UniformRandom,
                ))
                .with_random_generator(SeededRandomGenerator::new(seed))
                .build();
            let outcome = session.start().unwrap();
            (outcome, session.history().to_vec())
        };

        let (first_outcome, first_moves) = play(99);
        let (second_outcome, second_moves) = play(99);

        assert!(first_outcome.is_terminal());
        assert_eq!(first_outcome, second_outcome);
        assert_eq!(first_moves, second_moves);
    }

    #[test]
    fn history_matches_the_board() {
        let mut session = GameSession::builder()
            .with_config(GameConfig::new(
                PolicyKind::UniformRandom,
                PolicyKind::Optimal,
            ))
            .with_random_generator(SeededRandomGenerator::new(8))
            .build();

        session.start().unwrap();

        let board = session.board();
        assert_eq!(session.history().len(), 9 - board.empty_count());
        for mv in session.history() {
            assert!(!board.cell_at(mv.row, mv.col).is_empty());
        }
    }

    impl<R: RandomGenerator> GameSession<R> {
        /// Starts a game without playing the automatic opening, so tests can step turn by turn.
        fn start_without_advancing(&mut self) {
            self.clear();
            self.started = true;
        }
    }
}
