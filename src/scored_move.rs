use crate::board::{Move, Symbol};

/// Score of a line that ends in a forced win for `O`.
pub const O_WIN_SCORE: i32 = 10;
/// Score of a line that ends in a forced win for `X`.
pub const X_WIN_SCORE: i32 = -10;
/// Score of a forced draw.
pub const DRAW_SCORE: i32 = 0;

/// A candidate move paired with its minimax value.
///
/// Scores are always from `O`'s point of view, whichever side is to move:
/// positive favours `O`, negative favours `X`. Only exists while a search
/// is running or being reported; nothing persists it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    /// The chosen cell. `None` at a terminal node, where there is nothing to play.
    pub mv: Option<Move>,
    /// The game value under optimal play by both sides.
    pub score: i32,
}

impl ScoredMove {
    pub(crate) fn terminal(score: i32) -> Self {
        Self { mv: None, score }
    }

    pub(crate) fn new(mv: Move, score: i32) -> Self {
        Self { mv: Some(mv), score }
    }

    /// The symbol this score forces a win for, or `None` for a draw.
    pub fn forced_winner(&self) -> Option<Symbol> {
        match self.score.signum() {
            1 => Some(Symbol::O),
            -1 => Some(Symbol::X),
            _ => None,
        }
    }

    /// Returns `true` if `symbol` cannot lose along this line.
    pub fn is_safe_for(&self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::O => self.score >= DRAW_SCORE,
            Symbol::X => self.score <= DRAW_SCORE,
        }
    }
}
