//! A small perfect-play engine for 3x3 tic-tac-toe.
//!
//! The engine answers one question: given a board and the symbol to move,
//! which cell is game-theoretically best, and what is the game worth under
//! optimal play from both sides. It does so by exhaustive minimax; the full
//! tic-tac-toe tree is small enough that no pruning, depth limit or
//! heuristic is needed.
//!
//! Around the search sit the pieces a front end needs to run a game: move
//! selection policies (uniform random for an easy opponent, optimal for a
//! hard one), a per-symbol configuration and a [`session::GameSession`]
//! through which every move, human or automatic, is applied.
//!
//! # Example
//!
//! ```rust
//! use minimax_ttt::board::{Board, Move, Symbol};
//! use minimax_ttt::minimax::best_move;
//!
//! // X threatens the top row; O to move
//! let board = Board::from_rows(["XX.", "O..", "..."]).unwrap();
//!
//! let best = best_move(&board, Symbol::O).unwrap();
//!
//! assert_eq!(best.mv, Some(Move::new(0, 2)));
//! println!("O should play {:?} (score {})", best.mv, best.score);
//! ```

/// The 3x3 board, its cells and terminal-state detection.
pub mod board;
/// Per-game configuration of who controls each symbol.
pub mod config;
/// The crate's error type.
pub mod error;
/// Exhaustive minimax search.
pub mod minimax;
/// Move selection policies and their closed set of kinds.
pub mod policy;
/// Traits and implementations for random number generation.
pub mod random;
/// The scored result of a search.
pub mod scored_move;
/// A game in progress, owned by the caller.
pub mod session;

pub use error::{Error, Result};
