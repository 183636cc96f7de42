use crate::board::{Outcome, Symbol};
use thiserror::Error;

/// Every failure the engine and the session can report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A placement was attempted on a cell that cannot take it.
    #[error("invalid move at ({row}, {col}): {reason}")]
    InvalidMove {
        row: usize,
        col: usize,
        reason: MoveRejection,
    },

    /// Move selection was asked to act on a board whose outcome is already decided.
    #[error("cannot select a move on a finished board ({outcome})")]
    TerminalBoard { outcome: Outcome },

    #[error("game already over ({outcome})")]
    GameOver { outcome: Outcome },

    #[error("game has not been started")]
    NotStarted,

    #[error("policies are fixed while a game is in progress")]
    PoliciesLocked,

    #[error("{symbol} is played by a human, no move can be selected automatically")]
    HumanTurn { symbol: Symbol },

    #[error("{symbol} is played by the engine, not by a human")]
    AutomaticTurn { symbol: Symbol },

    #[error("invalid board: {message}")]
    InvalidBoard { message: String },

    #[error("invalid policy '{input}' (expected one of: human, easy, hard)")]
    InvalidPolicy { input: String },

    #[error("configuration error: {0}")]
    Config(#[from] serde_yaml_ng::Error),
}

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("coordinates are outside the 3x3 grid")]
    OutOfRange,

    #[error("cell is already occupied by {0}")]
    Occupied(Symbol),
}

impl Error {
    /// Returns `true` for rejections a caller is expected to ignore quietly.
    pub fn is_invalid_move(&self) -> bool {
        matches!(self, Error::InvalidMove { .. })
    }
}

/// Convenience alias for results carrying the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
