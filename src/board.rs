use crate::error::{Error, MoveRejection, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width and height of the grid.
pub const SIZE: usize = 3;

const CELL_COUNT: usize = SIZE * SIZE;

/// Every three-in-a-row, as row-major cell indices: rows, columns, then both diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// One of the two game pieces.
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
)]
#[strum(ascii_case_insensitive)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// Both symbols, `X` first.
    pub const ALL: [Symbol; 2] = [Symbol::X, Symbol::O];

    /// Returns the other symbol.
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

/// The state of a single square.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Symbol),
}

impl Cell {
    /// Returns `true` if no symbol has been placed here.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Returns the symbol occupying the cell, if any.
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(symbol) => Some(symbol),
        }
    }
}

/// A `(row, col)` coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Builds a move from a row-major index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        (index < CELL_COUNT).then(|| Self::new(index / SIZE, index % SIZE))
    }

    /// Returns the row-major index, or `None` when the coordinates are off the grid.
    pub fn index(self) -> Option<usize> {
        self.is_in_range().then(|| self.row * SIZE + self.col)
    }

    pub fn is_in_range(self) -> bool {
        self.row < SIZE && self.col < SIZE
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The state of the game as derived from a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    Win(Symbol),
    Draw,
}

impl Outcome {
    /// Returns `true` once the game is decided.
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Win(symbol) => write!(f, "{symbol} wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// A 3x3 tic-tac-toe grid.
///
/// Cells are stored in row-major order. The board only knows which symbols
/// sit where; whose turn it is belongs to the caller. Win and draw state is
/// always recomputed from the cells, never cached.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a board from three row strings.
    ///
    /// `X` and `O` (any case) are symbols; `.`, `_`, `-` and space are empty cells.
    ///
    /// ```rust
    /// use minimax_ttt::board::{Board, Cell, Symbol};
    ///
    /// let board = Board::from_rows(["XX.", "OO.", "..."]).unwrap();
    /// assert_eq!(board.cell_at(1, 0), Cell::Occupied(Symbol::O));
    /// ```
    pub fn from_rows(rows: [&str; SIZE]) -> Result<Self> {
        let mut board = Board::new();
        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != SIZE {
                return Err(Error::InvalidBoard {
                    message: format!(
                        "row {row} has {} cells, expected {SIZE} in '{line}'",
                        chars.len()
                    ),
                });
            }
            for (col, ch) in chars.into_iter().enumerate() {
                board.cells[row * SIZE + col] = match ch {
                    'X' | 'x' => Cell::Occupied(Symbol::X),
                    'O' | 'o' => Cell::Occupied(Symbol::O),
                    '.' | '_' | '-' | ' ' => Cell::Empty,
                    other => {
                        return Err(Error::InvalidBoard {
                            message: format!("unexpected character '{other}' at ({row}, {col})"),
                        });
                    }
                };
            }
        }
        Ok(board)
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the grid; use [`Board::get`] for a checked lookup.
    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        assert!(row < SIZE && col < SIZE, "cell ({row}, {col}) is off the board");
        self.cells[row * SIZE + col]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        Move::new(row, col).index().map(|i| self.cells[i])
    }

    /// Places `symbol` on an empty cell.
    ///
    /// Fails with [`Error::InvalidMove`] when the cell is occupied or off the grid;
    /// the board is left untouched in that case.
    pub fn set_cell(&mut self, row: usize, col: usize, symbol: Symbol) -> Result<()> {
        let index = Move::new(row, col).index().ok_or(Error::InvalidMove {
            row,
            col,
            reason: MoveRejection::OutOfRange,
        })?;

        if let Cell::Occupied(by) = self.cells[index] {
            return Err(Error::InvalidMove {
                row,
                col,
                reason: MoveRejection::Occupied(by),
            });
        }

        self.cells[index] = Cell::Occupied(symbol);
        Ok(())
    }

    /// Same as [`Board::set_cell`], taking a [`Move`].
    pub fn place(&mut self, mv: Move, symbol: Symbol) -> Result<()> {
        self.set_cell(mv.row, mv.col, symbol)
    }

    /// Writes a symbol without checks. The search only calls this with moves from
    /// [`Board::legal_moves`].
    pub(crate) fn fill_cell(&mut self, mv: Move, symbol: Symbol) {
        if let Some(index) = mv.index() {
            self.cells[index] = Cell::Occupied(symbol);
        }
    }

    /// Empties a cell. Only the search's scratch board ever undoes a placement.
    pub(crate) fn clear_cell(&mut self, mv: Move) {
        if let Some(index) = mv.index() {
            self.cells[index] = Cell::Empty;
        }
    }

    /// Returns `true` if `symbol` holds a full row, column or diagonal.
    ///
    /// Each symbol is checked on its own; a board with two winners is not rejected here.
    pub fn has_won(&self, symbol: Symbol) -> bool {
        let target = Cell::Occupied(symbol);
        LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.cells[i] == target))
    }

    /// Returns the first symbol, `X` before `O`, holding a three-in-a-row.
    pub fn winner(&self) -> Option<Symbol> {
        Symbol::ALL.into_iter().find(|&symbol| self.has_won(symbol))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// All empty cells in row-major order.
    ///
    /// The order is relied upon by the search for deterministic tie-breaking.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .filter_map(|(i, _)| Move::from_index(i))
            .collect()
    }

    pub fn outcome(&self) -> Outcome {
        match self.winner() {
            Some(symbol) => Outcome::Win(symbol),
            None if self.is_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }

    /// Number of cells occupied by `symbol`.
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Occupied(symbol))
            .count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..SIZE {
                let ch = match self.cells[row * SIZE + col] {
                    Cell::Empty => '.',
                    Cell::Occupied(Symbol::X) => 'X',
                    Cell::Occupied(Symbol::O) => 'O',
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}
