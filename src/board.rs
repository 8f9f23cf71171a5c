//! Board model: nine cells, two scores and the undecided-or-winner field.

use crate::common::{BoardError, CellState, Side};
use crate::config::CELL_COUNT;
use core::fmt;

/// Value of `winner` while no winner has been declared.
pub const UNDECIDED: i8 = -1;

/// A complete authoritative board state, as carried by one status frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardUpdate {
    pub score_a: u8,
    pub score_b: u8,
    pub cells: [CellState; CELL_COUNT],
    pub winner: i8,
}

impl BoardUpdate {
    /// Update describing a fresh board with the given scores.
    pub fn empty(score_a: u8, score_b: u8) -> Self {
        Self {
            score_a,
            score_b,
            cells: [CellState::Empty; CELL_COUNT],
            winner: UNDECIDED,
        }
    }
}

/// The 3×3 grid and running scores.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: [CellState; CELL_COUNT],
    score_a: u8,
    score_b: u8,
    winner: i8,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with zero scores.
    pub fn new() -> Self {
        Board {
            cells: [CellState::Empty; CELL_COUNT],
            score_a: 0,
            score_b: 0,
            winner: UNDECIDED,
        }
    }

    pub fn cell(&self, index: usize) -> Option<CellState> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[CellState; CELL_COUNT] {
        &self.cells
    }

    pub fn score_a(&self) -> u8 {
        self.score_a
    }

    pub fn score_b(&self) -> u8 {
        self.score_b
    }

    pub fn score(&self, side: Side) -> u8 {
        match side {
            Side::A => self.score_a,
            Side::B => self.score_b,
        }
    }

    /// Winner field as last received; [`UNDECIDED`] when none.
    pub fn winner(&self) -> i8 {
        self.winner
    }

    /// Place `side`'s mark on an empty cell.
    pub fn assign(&mut self, index: usize, side: Side) -> Result<(), BoardError> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(BoardError::InvalidIndex(index))?;
        if !cell.is_empty() {
            return Err(BoardError::Occupied(index));
        }
        *cell = CellState::Owned(side);
        Ok(())
    }

    /// Replace cells, scores and winner with an authoritative update.
    pub fn apply(&mut self, update: &BoardUpdate) {
        self.cells = update.cells;
        self.score_a = update.score_a;
        self.score_b = update.score_b;
        self.winner = update.winner;
    }

    /// Start a new game: clear every cell, keep the scores.
    pub fn reset(&mut self) {
        self.cells = [CellState::Empty; CELL_COUNT];
        self.winner = UNDECIDED;
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    /// Number of cells owned by `side`.
    pub fn count(&self, side: Side) -> usize {
        self.cells
            .iter()
            .filter(|c| c.owner() == Some(side))
            .count()
    }

    /// Indices of all empty cells in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
    }

    /// Side expected to move next when A opens and turns alternate.
    pub fn next_to_move(&self) -> Side {
        if self.count(Side::A) > self.count(Side::B) {
            Side::B
        } else {
            Side::A
        }
    }

    /// Snapshot of the board in wire form.
    pub fn to_update(&self) -> BoardUpdate {
        BoardUpdate {
            score_a: self.score_a,
            score_b: self.score_b,
            cells: self.cells,
            winner: self.winner,
        }
    }
}

impl From<&BoardUpdate> for Board {
    fn from(update: &BoardUpdate) -> Self {
        let mut board = Board::new();
        board.apply(update);
        board
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board {{ {}:{} [", self.score_a, self.score_b)?;
        for cell in self.cells.iter() {
            let ch = match cell {
                CellState::Empty => '.',
                CellState::Owned(Side::A) => 'A',
                CellState::Owned(Side::B) => 'B',
            };
            write!(f, "{}", ch)?;
        }
        write!(f, "] winner: {} }}", self.winner)
    }
}
