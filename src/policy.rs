use crate::board::{Board, Move, Symbol};
use crate::error::{Error, Result};
use crate::minimax::best_move;
use crate::random::{RandomGenerator, StandardRandomGenerator};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Chooses a move for `to_move` on a board snapshot.
///
/// Selectors never mutate the board; the caller applies the returned move
/// through the same path used for human moves.
pub trait MoveSelector {
    fn select_move(&mut self, board: &Board, to_move: Symbol) -> Result<Move>;
}

/// Picks uniformly among the empty cells. No look-ahead.
#[derive(Debug, Default, Clone)]
pub struct UniformRandomPolicy<R: RandomGenerator = StandardRandomGenerator> {
    random: R,
}

impl<R: RandomGenerator> UniformRandomPolicy<R> {
    pub fn new(random: R) -> Self {
        Self { random }
    }
}

impl<R: RandomGenerator> MoveSelector for UniformRandomPolicy<R> {
    fn select_move(&mut self, board: &Board, _to_move: Symbol) -> Result<Move> {
        ensure_undecided(board)?;
        let moves = board.legal_moves();
        self.random
            .choose(&moves)
            .copied()
            .ok_or(Error::TerminalBoard {
                outcome: board.outcome(),
            })
    }
}

/// Perfect play: delegates to the minimax search.
#[derive(Debug, Default, Clone, Copy)]
pub struct OptimalPolicy;

impl MoveSelector for OptimalPolicy {
    fn select_move(&mut self, board: &Board, to_move: Symbol) -> Result<Move> {
        let best = best_move(board, to_move)?;
        best.mv.ok_or(Error::TerminalBoard {
            outcome: board.outcome(),
        })
    }
}

fn ensure_undecided(board: &Board) -> Result<()> {
    let outcome = board.outcome();
    if outcome.is_terminal() {
        return Err(Error::TerminalBoard { outcome });
    }
    Ok(())
}

/// Who controls a symbol for the length of a game.
///
/// Parsed from the configuration strings the game's setup screen offers:
/// `human`, `easy` (also `easyAI`, `random`) and `hard` (also `hardAI`, `optimal`),
/// in any case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(try_from = "String", into = "String")]
#[strum(ascii_case_insensitive)]
pub enum PolicyKind {
    /// Moves come from the caller; nothing is selected automatically.
    #[strum(to_string = "human")]
    Human,
    /// The easy tier.
    #[strum(to_string = "easy", serialize = "easyAI", serialize = "random")]
    UniformRandom,
    /// The hard tier.
    #[strum(to_string = "hard", serialize = "hardAI", serialize = "optimal")]
    Optimal,
}

impl PolicyKind {
    /// Parses a configuration string, reporting [`Error::InvalidPolicy`] on anything unknown.
    pub fn from_config_str(input: &str) -> Result<Self> {
        input.trim().parse().map_err(|_| Error::InvalidPolicy {
            input: input.to_string(),
        })
    }

    /// Returns `true` if moves for this side are chosen by the engine.
    pub fn is_automatic(self) -> bool {
        self != PolicyKind::Human
    }

    /// Dispatches to the selector for this kind.
    ///
    /// `Human` has no selector and fails with [`Error::HumanTurn`].
    pub fn select_move<R: RandomGenerator>(
        self,
        board: &Board,
        to_move: Symbol,
        random: &mut R,
    ) -> Result<Move> {
        let mv = match self {
            PolicyKind::Human => return Err(Error::HumanTurn { symbol: to_move }),
            PolicyKind::UniformRandom => {
                UniformRandomPolicy::new(random).select_move(board, to_move)?
            }
            PolicyKind::Optimal => OptimalPolicy.select_move(board, to_move)?,
        };
        debug!(policy = %self, %to_move, %mv, "policy selected move");
        Ok(mv)
    }
}

impl TryFrom<String> for PolicyKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_config_str(&value)
    }
}

impl From<PolicyKind> for String {
    fn from(kind: PolicyKind) -> Self {
        kind.to_string()
    }
}
