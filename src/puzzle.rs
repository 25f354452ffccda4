//! Board model for the 3×3 sliding-tile puzzle.
//!
//! A [`Board`] is an immutable value: moves produce new boards and equality
//! depends only on which label sits in which cell.

use std::{fmt, str::FromStr};

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidBoard, Result};

/// Width and height of the grid.
pub const SIZE: usize = 3;

/// Number of cells on the grid, blank included.
pub const CELLS: usize = SIZE * SIZE;

/// Label used for the blank cell.
pub const BLANK: u8 = 0;

const GOAL_CELLS: [u8; CELLS] = [1, 2, 3, 4, 5, 6, 7, 8, BLANK];

/// Direction the blank travels. Moving the blank up slides the tile above it down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Successor enumeration order used by the solver.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Row and column delta applied to the blank.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Move::Up),
            "down" | "d" => Ok(Move::Down),
            "left" | "l" => Ok(Move::Left),
            "right" | "r" => Ok(Move::Right),
            _ => Err(Error::ParseMove {
                input: s.to_string(),
            }),
        }
    }
}

/// One arrangement of the eight tiles and the blank, stored row-major.
///
/// The blank index is cached alongside the cells; it is always derived from
/// them, so derived equality and hashing remain a function of the contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Board {
    cells: [u8; CELLS],
    blank: u8,
}

impl Board {
    /// The solved arrangement: tiles 1-8 in row-major order, blank last.
    pub fn goal() -> Self {
        Self::from_valid_cells(GOAL_CELLS)
    }

    /// Build a board from untrusted row-major cells, checking every structural invariant.
    pub fn from_cells(cells: &[u8]) -> std::result::Result<Self, InvalidBoard> {
        if cells.len() != CELLS {
            return Err(InvalidBoard::WrongCellCount {
                expected: CELLS,
                got: cells.len(),
            });
        }

        let mut counts = [0usize; CELLS];
        for (position, &label) in cells.iter().enumerate() {
            if usize::from(label) >= CELLS {
                return Err(InvalidBoard::LabelOutOfRange { label, position });
            }
            counts[usize::from(label)] += 1;
        }

        if counts[usize::from(BLANK)] != 1 {
            return Err(InvalidBoard::BlankCount {
                count: counts[usize::from(BLANK)],
            });
        }
        if let Some(label) = (1..CELLS).find(|&label| counts[label] > 1) {
            return Err(InvalidBoard::DuplicateTile {
                label: label as u8,
                count: counts[label],
            });
        }
        if let Some(label) = (1..CELLS).find(|&label| counts[label] == 0) {
            return Err(InvalidBoard::MissingTile { label: label as u8 });
        }

        let mut valid = [BLANK; CELLS];
        valid.copy_from_slice(cells);
        Ok(Self::from_valid_cells(valid))
    }

    pub fn from_rows(rows: [[u8; SIZE]; SIZE]) -> std::result::Result<Self, InvalidBoard> {
        let flat: Vec<u8> = rows.iter().flat_map(|row| row.iter().copied()).collect();
        Self::from_cells(&flat)
    }

    fn from_valid_cells(cells: [u8; CELLS]) -> Self {
        let blank = cells.iter().position(|&label| label == BLANK);
        debug_assert!(blank.is_some(), "board {cells:?} has no blank");
        Self {
            cells,
            blank: blank.unwrap_or_default() as u8,
        }
    }

    /// Uniformly random solvable board.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cells = GOAL_CELLS;
        loop {
            cells.shuffle(rng);
            let board = Self::from_valid_cells(cells);
            if board.is_solvable() {
                return board;
            }
        }
    }

    /// Walk `moves` random legal moves away from this board.
    pub fn scramble<R: Rng + ?Sized>(&self, rng: &mut R, moves: usize) -> Self {
        let mut board = *self;
        for _ in 0..moves {
            let legal: Vec<Move> = board.legal_moves().collect();
            if let Some(&mv) = legal.choose(rng) {
                if let Some(next) = board.try_move(mv) {
                    board = next;
                }
            }
        }
        board
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    pub fn rows(&self) -> [[u8; SIZE]; SIZE] {
        let mut rows = [[BLANK; SIZE]; SIZE];
        for (i, &label) in self.cells.iter().enumerate() {
            rows[i / SIZE][i % SIZE] = label;
        }
        rows
    }

    /// `(row, col)` of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        let blank = usize::from(self.blank);
        (blank / SIZE, blank % SIZE)
    }

    /// Index of the cell the blank would move into, if it stays on the grid.
    fn target(&self, mv: Move) -> Option<usize> {
        let (row, col) = self.blank_position();
        let (dr, dc) = mv.offset();

        let new_row = row as isize + dr;
        let new_col = col as isize + dc;

        if new_row >= 0 && new_row < SIZE as isize && new_col >= 0 && new_col < SIZE as isize {
            Some(new_row as usize * SIZE + new_col as usize)
        } else {
            None
        }
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.target(mv).is_some()
    }

    /// Legal moves in [`Move::ALL`] order: two in a corner, three on an edge, four in the centre.
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> {
        let board = *self;
        Move::ALL.into_iter().filter(move |&mv| board.is_legal(mv))
    }

    /// Swap the blank with its neighbour in direction `mv`, or `None` if that leaves the grid.
    pub fn try_move(&self, mv: Move) -> Option<Self> {
        let target = self.target(mv)?;
        let mut cells = self.cells;
        cells.swap(usize::from(self.blank), target);
        Some(Self {
            cells,
            blank: target as u8,
        })
    }

    /// Like [`Board::try_move`], but an illegal move is reported as an error.
    pub fn apply_move(&self, mv: Move) -> Result<Self> {
        self.try_move(mv).ok_or_else(|| {
            let (row, col) = self.blank_position();
            Error::IllegalMove { mv, row, col }
        })
    }

    pub fn is_goal(&self) -> bool {
        self.cells == GOAL_CELLS
    }

    /// Number of tile pairs out of order in row-major reading, blank ignored.
    pub fn inversions(&self) -> usize {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != BLANK)
            .map(|(i, &val)| {
                self.cells[i + 1..]
                    .iter()
                    .filter(|&&next| next != BLANK && next < val)
                    .count()
            })
            .sum()
    }

    /// On an odd-width grid a blank move never changes inversion parity, so
    /// two boards are mutually reachable iff their parities agree.
    pub fn is_solvable_towards(&self, goal: &Board) -> bool {
        self.inversions() % 2 == goal.inversions() % 2
    }

    pub fn is_solvable(&self) -> bool {
        self.is_solvable_towards(&Board::goal())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::goal()
    }
}

impl TryFrom<Vec<u8>> for Board {
    type Error = InvalidBoard;

    fn try_from(cells: Vec<u8>) -> std::result::Result<Self, Self::Error> {
        Self::from_cells(&cells)
    }
}

impl From<Board> for Vec<u8> {
    fn from(board: Board) -> Self {
        board.cells.to_vec()
    }
}

impl FromStr for Board {
    type Err = InvalidBoard;

    /// Accepts nine labels, e.g. `123456780`, `1,2,3,4,5,6,7,8,0`,
    /// `123/456/78_` or `[1 2 3 4 5 6 7 8 0]`. `_` and `.` stand for the
    /// blank; commas, `/`, `[`, `]` and whitespace are ignored.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(CELLS);
        for c in s.chars() {
            match c {
                '_' | '.' => cells.push(BLANK),
                ',' | '/' | '[' | ']' => {}
                c if c.is_whitespace() => {}
                c => {
                    let digit = c.to_digit(10).ok_or_else(|| InvalidBoard::Parse {
                        input: s.to_string(),
                        reason: format!("unexpected character '{c}'"),
                    })?;
                    cells.push(digit as u8);
                }
            }
        }
        Self::from_cells(&cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for val in row {
                if val == BLANK {
                    write!(f, "{:>2} ", '.')?;
                } else {
                    write!(f, "{:2} ", val)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
