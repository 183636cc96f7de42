use crate::board::{Board, Symbol};
use crate::error::{Error, Result};
use crate::scored_move::{DRAW_SCORE, O_WIN_SCORE, ScoredMove, X_WIN_SCORE};
use tracing::{debug, trace};

/// Exhaustive minimax over a private copy of a board.
///
/// The search places a symbol, recurses for the opponent and removes the
/// symbol again, in row-major order, with no pruning and no memoization.
/// `O` maximizes and `X` minimizes; among equal scores the first move
/// enumerated wins, so results are fully deterministic.
///
/// The caller's board is copied on construction and never touched.
///
/// ```rust
/// use minimax_ttt::board::{Board, Move, Symbol};
/// use minimax_ttt::minimax::Minimax;
///
/// let board = Board::from_rows(["XX.", "OO.", "..."]).unwrap();
/// let mut search = Minimax::new(&board);
/// let best = search.search(Symbol::X).unwrap();
///
/// assert_eq!(best.mv, Some(Move::new(0, 2)));
/// assert_eq!(best.score, -10);
/// ```
#[derive(Debug, Clone)]
pub struct Minimax {
    scratch: Board,
    nodes_visited: u64,
}

impl Minimax {
    /// Creates a searcher working on a copy of `board`.
    pub fn new(board: &Board) -> Self {
        Self {
            scratch: *board,
            nodes_visited: 0,
        }
    }

    /// Returns the searcher's working board. Between searches it equals the board it was built from.
    pub fn board(&self) -> &Board {
        &self.scratch
    }

    /// Number of positions evaluated by the last [`Minimax::search`], the root included.
    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited
    }

    /// Finds the optimal move for `to_move`.
    ///
    /// Fails with [`Error::TerminalBoard`] if the board is already won or full:
    /// there is no move to return and nothing safe to apply.
    pub fn search(&mut self, to_move: Symbol) -> Result<ScoredMove> {
        let outcome = self.scratch.outcome();
        if outcome.is_terminal() {
            return Err(Error::TerminalBoard { outcome });
        }

        debug!(%to_move, empty = self.scratch.empty_count(), "starting minimax search");
        self.nodes_visited = 0;

        let snapshot = self.scratch;
        let best = self.evaluate(to_move, 0);
        debug_assert_eq!(self.scratch, snapshot, "search must restore its working board");

        debug!(
            %to_move,
            mv = ?best.mv,
            score = best.score,
            nodes = self.nodes_visited,
            "minimax search finished"
        );
        Ok(best)
    }

    fn evaluate(&mut self, to_move: Symbol, depth: usize) -> ScoredMove {
        self.nodes_visited += 1;

        if let Some(score) = terminal_score(&self.scratch) {
            return ScoredMove::terminal(score);
        }

        let moves = self.scratch.legal_moves();
        let mut candidates = Vec::with_capacity(moves.len());
        for mv in moves {
            self.scratch.fill_cell(mv, to_move);
            let reply = self.evaluate(to_move.opponent(), depth + 1);
            self.scratch.clear_cell(mv);

            if depth == 0 {
                trace!(%to_move, %mv, score = reply.score, "root candidate");
            }
            candidates.push(ScoredMove::new(mv, reply.score));
        }

        // A non-terminal board always has an empty cell, so a candidate exists.
        select(to_move, &candidates).unwrap_or(ScoredMove::terminal(DRAW_SCORE))
    }
}

/// Finds the optimal move for `to_move` without touching `board`.
///
/// Shorthand for building a [`Minimax`] and running one search.
pub fn best_move(board: &Board, to_move: Symbol) -> Result<ScoredMove> {
    Minimax::new(board).search(to_move)
}

/// Scores a decided board, or `None` while play continues.
///
/// `O` is tested before `X` no matter who is to move, and the scores are
/// fixed to `O`'s perspective.
fn terminal_score(board: &Board) -> Option<i32> {
    if board.has_won(Symbol::O) {
        Some(O_WIN_SCORE)
    } else if board.has_won(Symbol::X) {
        Some(X_WIN_SCORE)
    } else if board.is_full() {
        Some(DRAW_SCORE)
    } else {
        None
    }
}

/// Picks the strict maximum for `O` or the strict minimum for `X`; the earliest candidate wins ties.
fn select(to_move: Symbol, candidates: &[ScoredMove]) -> Option<ScoredMove> {
    let mut best: Option<ScoredMove> = None;
    for &candidate in candidates {
        let improves = match best {
            None => true,
            Some(current) => match to_move {
                Symbol::O => candidate.score > current.score,
                Symbol::X => candidate.score < current.score,
            },
        };
        if improves {
            best = Some(candidate);
        }
    }
    best
}
